//! Expression evaluation. Every expression yields an `i64`.

use bir_ir::{Expression, Primitive};
use bir_stack::ensure_sufficient_stack;

use super::Engine;
use crate::errors::{not_an_integer, undefined_reference, EvalResult};
use crate::operators::{evaluate_arithmetic, evaluate_condition};

impl Engine {
    pub(super) fn eval(&mut self, expr: &Expression) -> EvalResult<i64> {
        ensure_sufficient_stack(|| self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expression) -> EvalResult<i64> {
        match expr {
            Expression::Arithmetic {
                op,
                left,
                right,
                position,
            } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_arithmetic(*op, left, right).map_err(|err| err.at(*position))
            }
            Expression::Condition {
                op, left, right, ..
            } => {
                // Both sides are always evaluated.
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Ok(evaluate_condition(*op, left, right))
            }
            Expression::BlockCall(call) => self.call_block(call).map_err(|err| err.at(call.position)),
            Expression::ScopeMutater {
                mutater,
                args,
                position,
            } => self
                .scope_mutater(*mutater, args)
                .map_err(|err| err.at(*position)),
            Expression::Primitive { value, position } => match value {
                Primitive::Int(value) => Ok(*value),
                other => Err(not_an_integer(other.type_name()).at(*position)),
            },
            Expression::Reference(name) => {
                let value = self
                    .current_scope()
                    .borrow()
                    .find(&name.value)
                    .ok_or_else(|| undefined_reference(&name.value).at(name.position))?;
                // A glued `-` reads the magnitude, not the negation.
                Ok(if name.negative {
                    value.wrapping_abs()
                } else {
                    value
                })
            }
        }
    }
}
