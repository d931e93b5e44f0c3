//! Operator enums.
//!
//! Each enum is closed: the engine matches them exhaustively, so adding a
//! variant is a compile error everywhere it matters.

use std::fmt;

/// Binary (and one postfix) arithmetic operator.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ArithmeticOp {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    /// `a ^ b`
    Exponent,
    /// `a ' b`, the b-th root of a.
    Root,
    Modulus,
    /// Postfix `a log`. The right operand is a synthesized zero.
    Log10,
}

impl ArithmeticOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            ArithmeticOp::Addition => "+",
            ArithmeticOp::Subtraction => "-",
            ArithmeticOp::Multiplication => "*",
            ArithmeticOp::Division => "/",
            ArithmeticOp::Exponent => "^",
            ArithmeticOp::Root => "'",
            ArithmeticOp::Modulus => "%",
            ArithmeticOp::Log10 => "log",
        }
    }
}

impl fmt::Display for ArithmeticOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// Comparison and logical operator.
///
/// The `Not*`, `Nand` and `Nor` forms are spelled with a leading `!`
/// (`!<`, `!&&`, `!==`, ...).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ConditionOp {
    And,
    Or,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    Equals,
    Nand,
    Nor,
    NotLessThan,
    NotGreaterThan,
    NotLessThanEquals,
    NotGreaterThanEquals,
    NotEquals,
}

impl ConditionOp {
    /// Map a condition sign as written in source to its operator.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "&&" => ConditionOp::And,
            "||" => ConditionOp::Or,
            "<" => ConditionOp::LessThan,
            ">" => ConditionOp::GreaterThan,
            "<=" => ConditionOp::LessThanEquals,
            ">=" => ConditionOp::GreaterThanEquals,
            "==" => ConditionOp::Equals,
            "!&&" => ConditionOp::Nand,
            "!||" => ConditionOp::Nor,
            "!<" => ConditionOp::NotLessThan,
            "!>" => ConditionOp::NotGreaterThan,
            "!<=" => ConditionOp::NotLessThanEquals,
            "!>=" => ConditionOp::NotGreaterThanEquals,
            "!==" => ConditionOp::NotEquals,
            _ => return None,
        };
        Some(op)
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            ConditionOp::And => "&&",
            ConditionOp::Or => "||",
            ConditionOp::LessThan => "<",
            ConditionOp::GreaterThan => ">",
            ConditionOp::LessThanEquals => "<=",
            ConditionOp::GreaterThanEquals => ">=",
            ConditionOp::Equals => "==",
            ConditionOp::Nand => "!&&",
            ConditionOp::Nor => "!||",
            ConditionOp::NotLessThan => "!<",
            ConditionOp::NotGreaterThan => "!>",
            ConditionOp::NotLessThanEquals => "!<=",
            ConditionOp::NotGreaterThanEquals => "!>=",
            ConditionOp::NotEquals => "!==",
        }
    }
}

impl fmt::Display for ConditionOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_symbol())
    }
}

/// In-place modification applied by `x++`, `x -= 2`, etc.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum QuantityOp {
    Increment,
    Decrement,
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl QuantityOp {
    /// Whether the operator takes a right-hand expression.
    pub fn needs_operand(self) -> bool {
        !matches!(self, QuantityOp::Increment | QuantityOp::Decrement)
    }

    pub fn as_symbol(self) -> &'static str {
        match self {
            QuantityOp::Increment => "++",
            QuantityOp::Decrement => "--",
            QuantityOp::Add => "+=",
            QuantityOp::Subtract => "-=",
            QuantityOp::Multiply => "*=",
            QuantityOp::Divide => "/=",
        }
    }
}

/// Direct access to numbered slots of a block's instance scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeMutaterKind {
    Read,
    Write,
    Delete,
}

impl ScopeMutaterKind {
    /// Minimum number of arguments the mutater needs.
    pub fn min_args(self) -> usize {
        match self {
            ScopeMutaterKind::Read | ScopeMutaterKind::Delete => 1,
            ScopeMutaterKind::Write => 2,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            ScopeMutaterKind::Read => "$read",
            ScopeMutaterKind::Write => "$write",
            ScopeMutaterKind::Delete => "$delete",
        }
    }
}
