//! Frames and statements.
//!
//! A frame runs its statements in order and yields the value that ended it:
//! a `return`, a taken `if`/`elif`/`else` branch, a matched `switch` arm, or
//! 0 when it runs off the end. Loop bodies run in frames of their own, so a
//! `return` inside a loop ends only the current iteration.

use bir_ir::{
    ArithmeticOp, Expression, Identifier, QuantityOp, Statement, Statements, VariableKind,
};
use bir_stack::ensure_sufficient_stack;

use super::Engine;
use crate::callstack::Frame;
use crate::errors::{
    const_reassignment, duplicate_declaration, immutable_scope_reassignment,
    top_level_control_flow, undefined_reference, user_throw, EvalResult,
};
use crate::operators::{evaluate_arithmetic, is_truthy};
use crate::scope::{Scope, UpdateOutcome};

/// What a statement did to its frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Next,
    Exit(i64),
}

impl Engine {
    /// Push `frame`, run it and pop it.
    ///
    /// Block calls pass `call = true`, which counts the frame against the
    /// call-stack limit.
    pub(super) fn enter(&mut self, frame: Frame, call: bool) -> EvalResult<i64> {
        ensure_sufficient_stack(|| {
            let statements = frame.statements.clone();
            if call {
                self.callstack.push_call(frame)?;
            } else {
                self.callstack.push(frame);
            }
            let result = self
                .execute_statements(&statements)
                .map_err(|err| self.attach_report(err));
            self.callstack.pop();
            result
        })
    }

    fn execute_statements(&mut self, statements: &Statements) -> EvalResult<i64> {
        for statement in statements.iter() {
            let flow = self
                .execute_statement(statement)
                .map_err(|err| err.at(statement.position()))?;
            if let Flow::Exit(value) = flow {
                return Ok(value);
            }
        }
        Ok(0)
    }

    fn execute_statement(&mut self, statement: &Statement) -> EvalResult<Flow> {
        match statement {
            Statement::VariableDecl {
                kind, name, value, ..
            } => {
                self.declare_variable(*kind, name, value)?;
                Ok(Flow::Next)
            }
            Statement::BlockDecl(decl) => {
                self.declare_block(decl)?;
                Ok(Flow::Next)
            }
            Statement::Assign { target, value, .. } => {
                if self.current_scope().borrow().find(&target.value).is_none() {
                    return Err(undefined_reference(&target.value).at(target.position));
                }
                let value = self.eval(value)?;
                self.write_back(target, value)?;
                Ok(Flow::Next)
            }
            Statement::QuantityModifier {
                op, target, right, ..
            } => {
                self.modify_quantity(*op, target, right.as_ref())?;
                Ok(Flow::Next)
            }
            Statement::Return { value, .. } => {
                if self.callstack.outside_blocks() {
                    return Err(top_level_control_flow("return"));
                }
                Ok(Flow::Exit(self.eval(value)?))
            }
            Statement::Throw { value, .. } => {
                if self.callstack.outside_blocks() {
                    return Err(top_level_control_flow("throw"));
                }
                Err(user_throw(self.eval(value)?))
            }
            Statement::If {
                condition,
                body,
                elifs,
                otherwise,
                ..
            } => {
                if is_truthy(self.eval(condition)?) {
                    return self.take_branch("<if>", body);
                }
                for arm in elifs {
                    if is_truthy(self.eval(&arm.condition)?) {
                        return self.take_branch("<elif>", &arm.body);
                    }
                }
                match otherwise {
                    Some(body) => self.take_branch("<else>", body),
                    None => Ok(Flow::Next),
                }
            }
            Statement::While {
                condition, body, ..
            } => {
                while is_truthy(self.eval(condition)?) {
                    self.enter(Frame::new("<while>", body.clone()), false)?;
                }
                Ok(Flow::Next)
            }
            Statement::For {
                count,
                placeholder,
                body,
                ..
            } => {
                let count = self.eval(count)?;
                for index in 0..count {
                    let scope = Scope::child_of(&self.current_scope());
                    scope
                        .borrow_mut()
                        .push(placeholder.value.clone(), index, VariableKind::Const);
                    self.with_scope(scope, |this| {
                        this.enter(Frame::new("<for>", body.clone()), false)
                    })?;
                }
                Ok(Flow::Next)
            }
            Statement::Switch {
                condition,
                cases,
                default,
                ..
            } => {
                let condition = self.eval(condition)?;
                for arm in cases {
                    if self.eval(&arm.value)? == condition {
                        return self.take_branch("<case>", &arm.body);
                    }
                }
                match default {
                    Some(body) => self.take_branch("<default>", body),
                    None => Ok(Flow::Next),
                }
            }
            Statement::Expression { value, .. } => {
                self.eval(value)?;
                Ok(Flow::Next)
            }
            Statement::Comment { .. } => Ok(Flow::Next),
        }
    }

    /// Run a branch body; its result ends the enclosing frame.
    fn take_branch(&mut self, name: &str, body: &Statements) -> EvalResult<Flow> {
        let value = self.enter(Frame::new(name, body.clone()), false)?;
        Ok(Flow::Exit(value))
    }

    fn declare_variable(
        &mut self,
        kind: VariableKind,
        name: &Identifier,
        value: &Expression,
    ) -> EvalResult<()> {
        let scope = self.current_scope();
        if scope.borrow().has_local(&name.value) {
            return Err(duplicate_declaration(&name.value).at(name.position));
        }
        let value = self.eval(value)?;
        scope.borrow_mut().push(name.value.clone(), value, kind);
        Ok(())
    }

    /// `x++`, `x -= e`, ... on any expression.
    ///
    /// Only a plain reference is written back; any other target just yields
    /// the modified value.
    fn modify_quantity(
        &mut self,
        op: QuantityOp,
        target: &Expression,
        right: Option<&Expression>,
    ) -> EvalResult<i64> {
        let current = self.eval(target)?;
        let operand = match right {
            Some(expr) => self.eval(expr)?,
            None => 1,
        };
        let value = match op {
            QuantityOp::Increment | QuantityOp::Add => current.wrapping_add(operand),
            QuantityOp::Decrement | QuantityOp::Subtract => current.wrapping_sub(operand),
            QuantityOp::Multiply => current.wrapping_mul(operand),
            QuantityOp::Divide => evaluate_arithmetic(ArithmeticOp::Division, current, operand)?,
        };
        if let Some(name) = target.as_reference() {
            self.write_back(name, value)?;
        }
        Ok(value)
    }

    /// Update an existing binding, turning denials into errors.
    fn write_back(&mut self, target: &Identifier, value: i64) -> EvalResult<()> {
        let outcome = self.current_scope().borrow_mut().update(&target.value, value);
        let err = match outcome {
            UpdateOutcome::Granted => return Ok(()),
            UpdateOutcome::DeniedConst => const_reassignment(&target.value),
            UpdateOutcome::DeniedImmutable => immutable_scope_reassignment(&target.value),
            UpdateOutcome::Unbound => undefined_reference(&target.value),
        };
        Err(err.at(target.position))
    }
}
