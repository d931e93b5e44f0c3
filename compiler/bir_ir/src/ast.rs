//! Syntax tree produced by `bir_parse` and walked by `bir_eval`.
//!
//! Statement sequences are stored as `Statements` (`Rc<[Statement]>`). The
//! engine pushes a call-stack frame per executing sequence; sharing the slice
//! lets every invocation of a block hold its body without copying the tree.
//! Nothing in the tree is mutated after parsing.

use std::rc::Rc;

use crate::{ArithmeticOp, ConditionOp, Position, QuantityOp, ScopeMutaterKind};

/// A shared, immutable statement sequence.
pub type Statements = Rc<[Statement]>;

/// A name as written in source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identifier {
    pub value: String,
    /// Leading `-` glued to the name (`-x`). References resolve this to the
    /// absolute value of the binding, not to its negation.
    pub negative: bool,
    pub position: Position,
}

impl Identifier {
    pub fn new(value: impl Into<String>, position: Position) -> Self {
        Identifier {
            value: value.into(),
            negative: false,
            position,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

/// `const` or `let`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum VariableKind {
    Const,
    Let,
}

impl VariableKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariableKind::Const => "const",
            VariableKind::Let => "let",
        }
    }
}

/// Literal values.
///
/// Only `Int` exists at runtime. `String` and `Array` are accepted as
/// `populate` sources of an implementing block and as `use` paths.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Int(i64),
    String(String),
    Array(Vec<Expression>),
}

impl Primitive {
    pub fn type_name(&self) -> &'static str {
        match self {
            Primitive::Int(_) => "int",
            Primitive::String(_) => "string",
            Primitive::Array(_) => "array",
        }
    }
}

/// `name:verb:verb(arg, arg)`
#[derive(Clone, Debug, PartialEq)]
pub struct BlockCall {
    pub name: Identifier,
    pub verbs: Vec<Expression>,
    pub args: Vec<Expression>,
    pub position: Position,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    Arithmetic {
        op: ArithmeticOp,
        left: Box<Expression>,
        right: Box<Expression>,
        position: Position,
    },
    Condition {
        op: ConditionOp,
        left: Box<Expression>,
        right: Box<Expression>,
        position: Position,
    },
    BlockCall(BlockCall),
    ScopeMutater {
        mutater: ScopeMutaterKind,
        args: Vec<Expression>,
        position: Position,
    },
    Primitive {
        value: Primitive,
        position: Position,
    },
    Reference(Identifier),
}

impl Expression {
    pub fn int(value: i64, position: Position) -> Self {
        Expression::Primitive {
            value: Primitive::Int(value),
            position,
        }
    }

    pub fn position(&self) -> Position {
        match self {
            Expression::Arithmetic { position, .. }
            | Expression::Condition { position, .. }
            | Expression::ScopeMutater { position, .. }
            | Expression::Primitive { position, .. } => *position,
            Expression::BlockCall(call) => call.position,
            Expression::Reference(ident) => ident.position,
        }
    }

    /// The referenced name when this expression is a plain variable reference.
    pub fn as_reference(&self) -> Option<&Identifier> {
        match self {
            Expression::Reference(ident) => Some(ident),
            _ => None,
        }
    }
}

/// `init { ... }` plus the statements run on every call.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockBody {
    pub init: Option<Statements>,
    pub program: Statements,
}

/// Block declaration, either with a body or as `name implements super`.
#[derive(Clone, Debug, PartialEq)]
pub struct BlockDecl {
    pub name: Identifier,
    pub verbs: Vec<Identifier>,
    pub args: Vec<Identifier>,
    /// `None` for implementing declarations; the body is copied from the
    /// super-block when the declaration executes.
    pub body: Option<BlockBody>,
    pub implements: Option<Identifier>,
    /// String or array literal seeding `value_0..value_{n-1}`.
    pub populate: Option<Primitive>,
    pub position: Position,
}

impl BlockDecl {
    pub fn is_implementing(&self) -> bool {
        self.implements.is_some()
    }
}

/// `elif cond { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct ConditionalArm {
    pub condition: Expression,
    pub body: Statements,
}

/// `case expr { ... }`
#[derive(Clone, Debug, PartialEq)]
pub struct CaseArm {
    pub value: Expression,
    pub body: Statements,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    VariableDecl {
        kind: VariableKind,
        name: Identifier,
        value: Expression,
        position: Position,
    },
    BlockDecl(Box<BlockDecl>),
    Assign {
        target: Identifier,
        value: Expression,
        position: Position,
    },
    QuantityModifier {
        op: QuantityOp,
        target: Expression,
        right: Option<Expression>,
        position: Position,
    },
    Return {
        value: Expression,
        position: Position,
    },
    Throw {
        value: Expression,
        position: Position,
    },
    If {
        condition: Expression,
        body: Statements,
        elifs: Vec<ConditionalArm>,
        otherwise: Option<Statements>,
        position: Position,
    },
    While {
        condition: Expression,
        body: Statements,
        position: Position,
    },
    For {
        count: Expression,
        placeholder: Identifier,
        body: Statements,
        position: Position,
    },
    Switch {
        condition: Expression,
        cases: Vec<CaseArm>,
        default: Option<Statements>,
        position: Position,
    },
    /// A block call or scope mutater evaluated for its side effects.
    Expression {
        value: Expression,
        position: Position,
    },
    Comment {
        text: String,
        position: Position,
    },
}

impl Statement {
    pub fn position(&self) -> Position {
        match self {
            Statement::VariableDecl { position, .. }
            | Statement::Assign { position, .. }
            | Statement::QuantityModifier { position, .. }
            | Statement::Return { position, .. }
            | Statement::Throw { position, .. }
            | Statement::If { position, .. }
            | Statement::While { position, .. }
            | Statement::For { position, .. }
            | Statement::Switch { position, .. }
            | Statement::Expression { position, .. }
            | Statement::Comment { position, .. } => *position,
            Statement::BlockDecl(decl) => decl.position,
        }
    }
}

/// `use "name"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UseImport {
    pub source: String,
    pub position: Position,
}

/// A parsed source file.
#[derive(Clone, Debug, PartialEq)]
pub struct Program {
    pub imports: Vec<UseImport>,
    pub statements: Statements,
}

impl Default for Program {
    fn default() -> Self {
        Program {
            imports: Vec::new(),
            statements: Rc::from(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn expression_positions() {
        let pos = Position::new(3, 7);
        let expr = Expression::Arithmetic {
            op: ArithmeticOp::Addition,
            left: Box::new(Expression::int(1, pos)),
            right: Box::new(Expression::int(2, Position::new(3, 11))),
            position: pos,
        };
        assert_eq!(expr.position(), pos);
        assert!(expr.as_reference().is_none());

        let reference = Expression::Reference(Identifier::new("x", Position::new(1, 1)));
        assert_eq!(reference.as_reference().map(Identifier::as_str), Some("x"));
    }

    #[test]
    fn implementing_declaration() {
        let decl = BlockDecl {
            name: Identifier::new("text", Position::new(1, 1)),
            verbs: Vec::new(),
            args: Vec::new(),
            body: None,
            implements: Some(Identifier::new("buffer", Position::new(1, 17))),
            populate: Some(Primitive::String("AB".to_string())),
            position: Position::new(1, 1),
        };
        assert!(decl.is_implementing());
        assert_eq!(decl.populate.as_ref().map(Primitive::type_name), Some("string"));
    }

    #[test]
    fn empty_program() {
        let program = Program::default();
        assert!(program.imports.is_empty());
        assert!(program.statements.is_empty());
    }
}
