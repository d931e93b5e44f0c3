//! Statement parsing.

use std::rc::Rc;

use bir_ir::{
    BlockBody, BlockDecl, CaseArm, ConditionalArm, Expression, Primitive, QuantityOp, Statement,
    VariableKind,
};
use bir_lexer::TokenKind;
use bir_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{ParseError, Parser};

impl Parser {
    pub(crate) fn parse_statement(&mut self) -> Result<Statement, ParseError> {
        ensure_sufficient_stack(|| self.parse_statement_inner())
    }

    fn parse_statement_inner(&mut self) -> Result<Statement, ParseError> {
        let position = self.cursor.current_position();
        trace!(at = %position, kind = ?self.cursor.current_kind(), "statement");

        match self.cursor.current_kind() {
            TokenKind::Const => self.parse_variable_decl(VariableKind::Const),
            TokenKind::Let => self.parse_variable_decl(VariableKind::Let),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::Return => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                Ok(Statement::Return { value, position })
            }
            TokenKind::Throw => {
                self.cursor.advance();
                let value = self.parse_expr()?;
                Ok(Statement::Throw { value, position })
            }
            TokenKind::Comment(text) => {
                let text = text.clone();
                self.cursor.advance();
                Ok(Statement::Comment { text, position })
            }
            TokenKind::Ident { .. } if self.is_block_decl_start() => self.parse_block_decl(),
            TokenKind::Ident { .. }
            | TokenKind::Mutater(_)
            | TokenKind::LBrace
            | TokenKind::Int(_)
            | TokenKind::Str(_) => self.parse_expression_statement(),
            other => Err(ParseError::unexpected("statement", other, position)),
        }
    }

    /// `name (:verb)* [` or `name implements`.
    fn is_block_decl_start(&self) -> bool {
        let mut ahead = 1;
        while matches!(self.cursor.peek_kind(ahead), TokenKind::Colon)
            && matches!(self.cursor.peek_kind(ahead + 1), TokenKind::Ident { .. })
        {
            ahead += 2;
        }
        match self.cursor.peek_kind(ahead) {
            TokenKind::LBracket => true,
            TokenKind::Implements => ahead == 1,
            _ => false,
        }
    }

    /// `const|let name = expr`
    fn parse_variable_decl(&mut self, kind: VariableKind) -> Result<Statement, ParseError> {
        let position = self.cursor.advance().position;
        let name = self.parse_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expr()?;
        Ok(Statement::VariableDecl {
            kind,
            name,
            value,
            position,
        })
    }

    /// `if e { } (elif e { })* (else { })?`
    fn parse_if(&mut self) -> Result<Statement, ParseError> {
        let position = self.expect(&TokenKind::If)?;
        let condition = self.parse_expr()?;
        let body = self.parse_statement_list()?;

        let mut elifs = Vec::new();
        while self.cursor.eat(&TokenKind::Elif) {
            let condition = self.parse_expr()?;
            let body = self.parse_statement_list()?;
            elifs.push(ConditionalArm { condition, body });
        }

        let otherwise = if self.cursor.eat(&TokenKind::Else) {
            Some(self.parse_statement_list()?)
        } else {
            None
        };

        Ok(Statement::If {
            condition,
            body,
            elifs,
            otherwise,
            position,
        })
    }

    /// `while e { }`
    fn parse_while(&mut self) -> Result<Statement, ParseError> {
        let position = self.expect(&TokenKind::While)?;
        let condition = self.parse_expr()?;
        let body = self.parse_statement_list()?;
        Ok(Statement::While {
            condition,
            body,
            position,
        })
    }

    /// `for e as name { }`
    fn parse_for(&mut self) -> Result<Statement, ParseError> {
        let position = self.expect(&TokenKind::For)?;
        let count = self.parse_expr()?;
        self.expect(&TokenKind::As)?;
        let placeholder = self.parse_identifier()?;
        let body = self.parse_statement_list()?;
        Ok(Statement::For {
            count,
            placeholder,
            body,
            position,
        })
    }

    /// `switch e { (case e { })* (default { })? }`
    fn parse_switch(&mut self) -> Result<Statement, ParseError> {
        let position = self.expect(&TokenKind::Switch)?;
        let condition = self.parse_expr()?;
        let open = self.expect(&TokenKind::LBrace)?;

        let mut cases = Vec::new();
        while self.cursor.eat(&TokenKind::Case) {
            let value = self.parse_expr()?;
            let body = self.parse_statement_list()?;
            cases.push(CaseArm { value, body });
        }
        let default = if self.cursor.eat(&TokenKind::Default) {
            Some(self.parse_statement_list()?)
        } else {
            None
        };
        self.expect_closing(&TokenKind::RBrace, '{', open)?;

        Ok(Statement::Switch {
            condition,
            cases,
            default,
            position,
        })
    }

    fn parse_block_decl(&mut self) -> Result<Statement, ParseError> {
        let name = self.parse_identifier()?;
        let position = name.position;

        if self.cursor.eat(&TokenKind::Implements) {
            let implements = self.parse_identifier()?;
            let populate = self.parse_populate()?;
            return Ok(Statement::BlockDecl(Box::new(BlockDecl {
                name,
                verbs: Vec::new(),
                args: Vec::new(),
                body: None,
                implements: Some(implements),
                populate,
                position,
            })));
        }

        let mut verbs = Vec::new();
        while self.cursor.eat(&TokenKind::Colon) {
            verbs.push(self.parse_identifier()?);
        }

        let open = self.expect(&TokenKind::LBracket)?;
        let mut args = Vec::new();
        if !self.cursor.check(&TokenKind::RBracket) {
            args.push(self.parse_identifier()?);
            while self.cursor.eat(&TokenKind::Comma) {
                args.push(self.parse_identifier()?);
            }
        }
        self.expect_closing(&TokenKind::RBracket, '[', open)?;

        let body = self.parse_block_body()?;
        Ok(Statement::BlockDecl(Box::new(BlockDecl {
            name,
            verbs,
            args,
            body: Some(body),
            implements: None,
            populate: None,
            position,
        })))
    }

    /// `{ (init { ... })? statement* }`
    fn parse_block_body(&mut self) -> Result<BlockBody, ParseError> {
        let open = self.expect(&TokenKind::LBrace)?;
        let init = if self.cursor.eat(&TokenKind::Init) {
            Some(self.parse_statement_list()?)
        } else {
            None
        };
        let program = self.parse_statements_until_close(open)?;
        Ok(BlockBody {
            init,
            program: Rc::from(program),
        })
    }

    /// Optional `{ "text" }` or `{ [e, ...] }` after `implements super`.
    fn parse_populate(&mut self) -> Result<Option<Primitive>, ParseError> {
        let starts_populate = self.cursor.check(&TokenKind::LBrace)
            && matches!(
                self.cursor.peek_kind(1),
                TokenKind::Str(_) | TokenKind::LBracket
            );
        if !starts_populate {
            return Ok(None);
        }

        let open = self.expect(&TokenKind::LBrace)?;
        let token = self.cursor.advance();
        let populate = match token.kind {
            TokenKind::Str(text) => Primitive::String(text),
            _ => {
                let bracket = token.position;
                let mut elements = Vec::new();
                if !self.cursor.check(&TokenKind::RBracket) {
                    elements.push(self.parse_expr()?);
                    while self.cursor.eat(&TokenKind::Comma) {
                        elements.push(self.parse_expr()?);
                    }
                }
                self.expect_closing(&TokenKind::RBracket, '[', bracket)?;
                Primitive::Array(elements)
            }
        };
        self.expect_closing(&TokenKind::RBrace, '{', open)?;
        Ok(Some(populate))
    }

    /// Assignment, quantity modifier, or a bare block call / scope mutater.
    fn parse_expression_statement(&mut self) -> Result<Statement, ParseError> {
        let target = self.parse_expr()?;
        let position = target.position();

        let op = match self.cursor.current_kind() {
            TokenKind::Eq => {
                self.cursor.advance();
                let Expression::Reference(name) = target else {
                    return Err(ParseError::expected_identifier(
                        "an expression as assignment target",
                        position,
                    ));
                };
                let value = self.parse_expr()?;
                return Ok(Statement::Assign {
                    target: name,
                    value,
                    position,
                });
            }
            TokenKind::PlusPlus => QuantityOp::Increment,
            TokenKind::MinusMinus => QuantityOp::Decrement,
            TokenKind::PlusEq => QuantityOp::Add,
            TokenKind::MinusEq => QuantityOp::Subtract,
            TokenKind::StarEq => QuantityOp::Multiply,
            TokenKind::SlashEq => QuantityOp::Divide,
            other => {
                if matches!(
                    target,
                    Expression::BlockCall(_) | Expression::ScopeMutater { .. }
                ) {
                    return Ok(Statement::Expression {
                        value: target,
                        position,
                    });
                }
                return Err(ParseError::unexpected(
                    "`=`, `++`, `--`, `+=`, `-=`, `*=` or `/=`",
                    other,
                    self.cursor.current_position(),
                ));
            }
        };
        self.cursor.advance();

        let right = if op.needs_operand() {
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(Statement::QuantityModifier {
            op,
            target,
            right,
            position,
        })
    }
}
