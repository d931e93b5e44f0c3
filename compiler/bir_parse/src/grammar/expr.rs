//! Expression parsing.
//!
//! Precedence, lowest first:
//!
//! | level | operators | associativity |
//! |---|---|---|
//! | condition | `&& \|\| < > <= >= ==` and `!` forms | left |
//! | additive | `+ -` | left |
//! | multiplicative | `* /` | left |
//! | exponent | `^ ' %`, postfix `log` | right |
//! | caller | block call, primary | |

use bir_ir::{ArithmeticOp, BlockCall, Expression, Identifier, Primitive};
use bir_lexer::TokenKind;
use bir_stack::ensure_sufficient_stack;

use crate::{ParseError, Parser};

fn arithmetic(op: ArithmeticOp, left: Expression, right: Expression) -> Expression {
    let position = left.position();
    Expression::Arithmetic {
        op,
        left: Box::new(left),
        right: Box::new(right),
        position,
    }
}

impl Parser {
    pub(crate) fn parse_expr(&mut self) -> Result<Expression, ParseError> {
        ensure_sufficient_stack(|| self.parse_condition())
    }

    fn parse_condition(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_additive()?;

        while let TokenKind::Condition(op) = *self.cursor.current_kind() {
            self.cursor.advance();
            let right = self.parse_additive()?;
            let position = left.position();
            left = Expression::Condition {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position,
            };
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Plus => ArithmeticOp::Addition,
                TokenKind::Minus => ArithmeticOp::Subtraction,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_multiplicative()?;
            left = arithmetic(op, left, right);
        }
    }

    fn parse_multiplicative(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.parse_exponent()?;

        loop {
            let op = match self.cursor.current_kind() {
                TokenKind::Star => ArithmeticOp::Multiplication,
                TokenKind::Slash => ArithmeticOp::Division,
                _ => return Ok(left),
            };
            self.cursor.advance();
            let right = self.parse_exponent()?;
            left = arithmetic(op, left, right);
        }
    }

    /// Right-associative `^ ' %` and postfix `log`.
    fn parse_exponent(&mut self) -> Result<Expression, ParseError> {
        let base = self.parse_caller()?;

        let op = match self.cursor.current_kind() {
            TokenKind::Caret => ArithmeticOp::Exponent,
            TokenKind::Apostrophe => ArithmeticOp::Root,
            TokenKind::Percent => ArithmeticOp::Modulus,
            TokenKind::Log => {
                let position = self.cursor.advance().position;
                return Ok(arithmetic(
                    ArithmeticOp::Log10,
                    base,
                    Expression::int(0, position),
                ));
            }
            _ => return Ok(base),
        };
        self.cursor.advance();
        let right = ensure_sufficient_stack(|| self.parse_exponent())?;
        Ok(arithmetic(op, base, right))
    }

    /// Block call or primary.
    fn parse_caller(&mut self) -> Result<Expression, ParseError> {
        let is_call = matches!(self.cursor.current_kind(), TokenKind::Ident { .. })
            && matches!(
                self.cursor.peek_kind(1),
                TokenKind::Colon | TokenKind::LParen
            );
        if is_call {
            let name = self.parse_identifier()?;
            return self.parse_block_call(name).map(Expression::BlockCall);
        }

        match self.cursor.current_kind() {
            TokenKind::Str(_) => {
                let token = self.cursor.advance();
                let TokenKind::Str(text) = token.kind else {
                    return Err(ParseError::expected_expression(&token.kind, token.position));
                };
                Ok(Expression::Primitive {
                    value: Primitive::String(text),
                    position: token.position,
                })
            }
            _ => self.parse_primary(),
        }
    }

    /// Number, reference, `{grouping}` or scope mutater.
    ///
    /// Verbs are restricted to this level so that `name:verb(...)` stays
    /// unambiguous.
    fn parse_primary(&mut self) -> Result<Expression, ParseError> {
        let position = self.cursor.current_position();
        match self.cursor.current_kind() {
            TokenKind::Int(value) => {
                let value = *value;
                self.cursor.advance();
                Ok(Expression::int(value, position))
            }
            TokenKind::Ident { .. } => self.parse_identifier().map(Expression::Reference),
            TokenKind::LBrace => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                self.expect_closing(&TokenKind::RBrace, '{', position)?;
                Ok(inner)
            }
            TokenKind::Mutater(mutater) => {
                let mutater = *mutater;
                self.cursor.advance();
                let args = self.parse_call_args()?;
                Ok(Expression::ScopeMutater {
                    mutater,
                    args,
                    position,
                })
            }
            other => Err(ParseError::expected_expression(other, position)),
        }
    }

    /// `(:verb)* ( args )` after the callee name.
    fn parse_block_call(&mut self, name: Identifier) -> Result<BlockCall, ParseError> {
        let mut verbs = Vec::new();
        while self.cursor.eat(&TokenKind::Colon) {
            verbs.push(self.parse_primary()?);
        }
        let args = self.parse_call_args()?;
        let position = name.position;
        Ok(BlockCall {
            name,
            verbs,
            args,
            position,
        })
    }

    /// `( (expr (, expr)*)? )`
    fn parse_call_args(&mut self) -> Result<Vec<Expression>, ParseError> {
        let open = self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        if !self.cursor.check(&TokenKind::RParen) {
            args.push(self.parse_expr()?);
            while self.cursor.eat(&TokenKind::Comma) {
                args.push(self.parse_expr()?);
            }
        }
        self.expect_closing(&TokenKind::RParen, '(', open)?;
        Ok(args)
    }
}
