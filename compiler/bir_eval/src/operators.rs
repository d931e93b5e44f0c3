//! Integer arithmetic and conditions.
//!
//! All runtime values are `i64`. Addition, subtraction and multiplication
//! wrap; every other operator reports its undefined inputs as an
//! `ArithmeticFault`.

use bir_ir::{ArithmeticOp, ConditionOp};

use crate::errors::{arithmetic_fault, EvalResult};

/// The only truthy value.
pub const TRUE: i64 = 1;
pub const FALSE: i64 = 0;

#[inline]
pub fn is_truthy(value: i64) -> bool {
    value == TRUE
}

pub fn evaluate_arithmetic(op: ArithmeticOp, left: i64, right: i64) -> EvalResult<i64> {
    match op {
        ArithmeticOp::Addition => Ok(left.wrapping_add(right)),
        ArithmeticOp::Subtraction => Ok(left.wrapping_sub(right)),
        ArithmeticOp::Multiplication => Ok(left.wrapping_mul(right)),
        ArithmeticOp::Division => {
            if right == 0 {
                return Err(arithmetic_fault(op.as_symbol(), "division by zero"));
            }
            Ok(left.wrapping_div(right))
        }
        ArithmeticOp::Modulus => {
            if right == 0 {
                return Err(arithmetic_fault(op.as_symbol(), "modulus by zero"));
            }
            Ok(left.wrapping_rem(right))
        }
        ArithmeticOp::Exponent => Ok(power(left, right)),
        ArithmeticOp::Root => root(left, right),
        ArithmeticOp::Log10 => {
            if left <= 0 {
                return Err(arithmetic_fault(op.as_symbol(), "logarithm of a non-positive value"));
            }
            Ok(i64::from(left.ilog10()))
        }
    }
}

/// `base ^ exponent`, wrapping. Negative exponents truncate toward zero.
fn power(base: i64, exponent: i64) -> i64 {
    if exponent < 0 {
        return match base {
            1 => 1,
            -1 if exponent % 2 == 0 => 1,
            -1 => -1,
            _ => 0,
        };
    }

    let mut result: i64 = 1;
    let mut base = base;
    let mut exponent = exponent.unsigned_abs();
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result.wrapping_mul(base);
        }
        base = base.wrapping_mul(base);
        exponent >>= 1;
    }
    result
}

/// `value ' degree`: the integer `degree`-th root, rounded toward zero.
fn root(value: i64, degree: i64) -> EvalResult<i64> {
    if degree <= 0 {
        return Err(arithmetic_fault("'", "root of degree zero or less"));
    }
    if degree == 1 {
        return Ok(value);
    }
    if value < 0 && degree % 2 == 0 {
        return Err(arithmetic_fault("'", "even root of a negative value"));
    }

    let degree = u32::try_from(degree).unwrap_or(u32::MAX);
    let magnitude = integer_root(value.unsigned_abs(), degree);
    let magnitude = i64::try_from(magnitude).unwrap_or(i64::MAX);
    Ok(if value < 0 { -magnitude } else { magnitude })
}

/// Largest `r` with `r ^ degree <= value`.
fn integer_root(value: u64, degree: u32) -> u64 {
    if value < 2 || degree == 1 {
        return value;
    }
    let (mut low, mut high) = (1_u64, value);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        match mid.checked_pow(degree) {
            Some(raised) if raised <= value => low = mid,
            _ => high = mid - 1,
        }
    }
    low
}

/// Conditions evaluate both sides and yield 1 or 0.
pub fn evaluate_condition(op: ConditionOp, left: i64, right: i64) -> i64 {
    let and = is_truthy(left) && is_truthy(right);
    let or = is_truthy(left) || is_truthy(right);
    let result = match op {
        ConditionOp::And => and,
        ConditionOp::Or => or,
        ConditionOp::LessThan => left < right,
        ConditionOp::GreaterThan => left > right,
        ConditionOp::LessThanEquals => left <= right,
        ConditionOp::GreaterThanEquals => left >= right,
        ConditionOp::Equals => left == right,
        ConditionOp::Nand => !and,
        ConditionOp::Nor => !or,
        ConditionOp::NotLessThan => left >= right,
        ConditionOp::NotGreaterThan => left <= right,
        ConditionOp::NotLessThanEquals => left > right,
        ConditionOp::NotGreaterThanEquals => left < right,
        ConditionOp::NotEquals => left != right,
    };
    i64::from(result)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]

    use super::*;
    use bir_diagnostic::ErrorCode;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn arith(op: ArithmeticOp, left: i64, right: i64) -> i64 {
        evaluate_arithmetic(op, left, right).unwrap()
    }

    fn fault(op: ArithmeticOp, left: i64, right: i64) -> ErrorCode {
        evaluate_arithmetic(op, left, right).unwrap_err().code()
    }

    #[test]
    fn basic_arithmetic() {
        assert_eq!(arith(ArithmeticOp::Addition, 2, 3), 5);
        assert_eq!(arith(ArithmeticOp::Subtraction, 2, 3), -1);
        assert_eq!(arith(ArithmeticOp::Multiplication, -4, 3), -12);
        assert_eq!(arith(ArithmeticOp::Addition, i64::MAX, 1), i64::MIN);
    }

    #[test]
    fn division_truncates_and_modulus_follows_dividend() {
        assert_eq!(arith(ArithmeticOp::Division, 7, 2), 3);
        assert_eq!(arith(ArithmeticOp::Division, -7, 2), -3);
        assert_eq!(arith(ArithmeticOp::Modulus, -7, 3), -1);
        assert_eq!(arith(ArithmeticOp::Modulus, 7, -3), 1);
        assert_eq!(fault(ArithmeticOp::Division, 1, 0), ErrorCode::E6013);
        assert_eq!(fault(ArithmeticOp::Modulus, 1, 0), ErrorCode::E6013);
    }

    #[test]
    fn exponent() {
        assert_eq!(arith(ArithmeticOp::Exponent, 2, 3), 8);
        assert_eq!(arith(ArithmeticOp::Exponent, 5, 0), 1);
        assert_eq!(arith(ArithmeticOp::Exponent, 2, -1), 0);
        assert_eq!(arith(ArithmeticOp::Exponent, -1, -3), -1);
        assert_eq!(arith(ArithmeticOp::Exponent, -1, -2), 1);
        assert_eq!(arith(ArithmeticOp::Exponent, -3, 3), -27);
    }

    #[test]
    fn roots() {
        assert_eq!(arith(ArithmeticOp::Root, 8, 3), 2);
        assert_eq!(arith(ArithmeticOp::Root, 9, 3), 2);
        assert_eq!(arith(ArithmeticOp::Root, 16, 2), 4);
        assert_eq!(arith(ArithmeticOp::Root, -27, 3), -3);
        assert_eq!(arith(ArithmeticOp::Root, i64::MAX, 2), 3_037_000_499);
        assert_eq!(arith(ArithmeticOp::Root, 5, 100), 1);
        assert_eq!(fault(ArithmeticOp::Root, 4, 0), ErrorCode::E6013);
        assert_eq!(fault(ArithmeticOp::Root, -4, 2), ErrorCode::E6013);
    }

    #[test]
    fn log10() {
        assert_eq!(arith(ArithmeticOp::Log10, 1000, 0), 3);
        assert_eq!(arith(ArithmeticOp::Log10, 999, 0), 2);
        assert_eq!(arith(ArithmeticOp::Log10, 1, 0), 0);
        assert_eq!(fault(ArithmeticOp::Log10, 0, 0), ErrorCode::E6013);
    }

    #[test]
    fn conditions() {
        assert_eq!(evaluate_condition(ConditionOp::NotEquals, 1, 1), 0);
        assert_eq!(evaluate_condition(ConditionOp::Equals, 4, 4), 1);
        assert_eq!(evaluate_condition(ConditionOp::And, 1, 1), 1);
        // Only 1 is truthy.
        assert_eq!(evaluate_condition(ConditionOp::And, 2, 1), 0);
        assert_eq!(evaluate_condition(ConditionOp::Or, 0, 1), 1);
        assert_eq!(evaluate_condition(ConditionOp::Nand, 1, 1), 0);
        assert_eq!(evaluate_condition(ConditionOp::Nor, 0, 0), 1);
        assert_eq!(evaluate_condition(ConditionOp::NotLessThan, 3, 2), 1);
        assert_eq!(evaluate_condition(ConditionOp::NotGreaterThanEquals, 3, 2), 0);
    }

    proptest! {
        #[test]
        fn root_is_floor(value in 0_i64..1_000_000_000, degree in 1_i64..6) {
            let r = arith(ArithmeticOp::Root, value, degree);
            let degree = u32::try_from(degree).unwrap();
            prop_assert!(r.pow(degree) <= value);
            prop_assert!((r + 1).pow(degree) > value);
        }

        #[test]
        fn negated_conditions_are_complements(left in -5_i64..5, right in -5_i64..5) {
            let pairs = [
                (ConditionOp::And, ConditionOp::Nand),
                (ConditionOp::Or, ConditionOp::Nor),
                (ConditionOp::LessThan, ConditionOp::NotLessThan),
                (ConditionOp::GreaterThan, ConditionOp::NotGreaterThan),
                (ConditionOp::LessThanEquals, ConditionOp::NotLessThanEquals),
                (ConditionOp::GreaterThanEquals, ConditionOp::NotGreaterThanEquals),
                (ConditionOp::Equals, ConditionOp::NotEquals),
            ];
            for (op, negated) in pairs {
                prop_assert_eq!(
                    evaluate_condition(op, left, right) + evaluate_condition(negated, left, right),
                    1
                );
            }
        }
    }
}
