//! Grammar productions.
//!
//! - `mod.rs`: program, `use` imports, `{ ... }` statement lists, identifiers
//! - `stmt.rs`: statements and block declarations
//! - `expr.rs`: the expression precedence chain, block calls, scope mutaters

mod expr;
mod stmt;

use std::rc::Rc;

use bir_ir::{Identifier, Position, Program, Statement, Statements, UseImport};
use bir_lexer::TokenKind;
use tracing::debug;

use crate::{ParseError, Parser};

impl Parser {
    /// `use "name"`* followed by statements.
    ///
    /// Comments may appear before and between the imports.
    pub(crate) fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut imports = Vec::new();
        let mut statements = Vec::new();
        let mut in_header = true;

        while !self.cursor.is_at_end() {
            if in_header && self.cursor.check(&TokenKind::Use) {
                imports.push(self.parse_use()?);
                continue;
            }
            let statement = self.parse_statement()?;
            if !matches!(statement, Statement::Comment { .. }) {
                in_header = false;
            }
            statements.push(statement);
        }

        debug!(
            imports = imports.len(),
            statements = statements.len(),
            "parsed program"
        );
        Ok(Program {
            imports,
            statements: Rc::from(statements),
        })
    }

    fn parse_use(&mut self) -> Result<UseImport, ParseError> {
        let position = self.expect(&TokenKind::Use)?;
        let token = self.cursor.advance();
        match token.kind {
            TokenKind::Str(source) => Ok(UseImport { source, position }),
            other => Err(ParseError::unexpected(
                "module name string",
                &other,
                token.position,
            )),
        }
    }

    /// `{ statement* }`
    pub(crate) fn parse_statement_list(&mut self) -> Result<Statements, ParseError> {
        let open = self.expect(&TokenKind::LBrace)?;
        let statements = self.parse_statements_until_close(open)?;
        Ok(Rc::from(statements))
    }

    /// Statements up to and including the `}` matching the `{` at `open`.
    pub(crate) fn parse_statements_until_close(
        &mut self,
        open: Position,
    ) -> Result<Vec<Statement>, ParseError> {
        let mut statements = Vec::new();
        while !self.cursor.check(&TokenKind::RBrace) && !self.cursor.is_at_end() {
            statements.push(self.parse_statement()?);
        }
        self.expect_closing(&TokenKind::RBrace, '{', open)?;
        Ok(statements)
    }

    /// A plain identifier. A leading `-` is kept in `negative`.
    pub(crate) fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let position = self.cursor.current_position();
        match self.cursor.current_kind().clone() {
            TokenKind::Ident { name, negative } => {
                self.cursor.advance();
                Ok(Identifier {
                    value: name,
                    negative,
                    position,
                })
            }
            other => Err(ParseError::expected_identifier(other.describe(), position)),
        }
    }
}
