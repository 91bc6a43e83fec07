//! Statement parsing implementation
//!
//! This module handles parsing of all pseudocode statement types:
//!
//! - Control flow: `SI`/`IF`, `MIENTRAS`/`WHILE`, `PARA`/`FOR`, `REPETIR`/`REPEAT`
//! - Assignments: `x = e`, `x <- e`, `A[i] = e`
//! - Calls: `f(a)`, `LLAMAR f(a)` / `CALL f(a)`
//! - `RETORNAR`/`RETURN`
//! - Blocks: `{ ... }`, `INICIO ... FIN`, `BEGIN ... END`
//!
//! # Grammar
//!
//! ```text
//! statement ::= var_decl | function_decl | if_stmt | while_stmt | for_stmt
//!             | repeat_stmt | return_stmt | call_stmt | block | assign_or_call
//! if_stmt     ::= IF expr THEN stmts [ELSE stmts] END_IF
//! while_stmt  ::= WHILE expr DO stmts END_WHILE
//! for_stmt    ::= FOR ident ("=" | "<-") expr TO expr [STEP expr] DO stmts END_FOR
//! repeat_stmt ::= REPEAT stmts UNTIL expr
//! block       ::= "{" stmts "}" | BEGIN stmts END
//! ```
//!
//! The statement kind is always decided by the current token, so no
//! backtracking is needed. `;` after simple statements is optional.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

/// Tokens that can begin a statement, reported when none is found
const STATEMENT_START: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::IntegerType,
    TokenKind::RealType,
    TokenKind::StringType,
    TokenKind::BooleanType,
    TokenKind::CharType,
    TokenKind::If,
    TokenKind::While,
    TokenKind::For,
    TokenKind::Repeat,
    TokenKind::Function,
    TokenKind::Return,
    TokenKind::Call,
    TokenKind::Begin,
    TokenKind::LBrace,
];

impl Parser {
    /// Parse statements until a block closer (or end of input) is reached.
    /// The closer itself is left for the caller.
    pub(crate) fn parse_statement_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        loop {
            // empty statements
            while self.match_token(TokenKind::Semicolon) {}

            if self.peek_kind().is_block_closer() {
                break;
            }
            statements.push(self.parse_statement()?);
        }

        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        let kind = self.peek_kind();
        log::trace!(
            "statement {:?} at line {}",
            kind,
            self.current_location().line
        );

        match kind {
            k if k.is_type_keyword() => self.parse_variable_declaration(),
            TokenKind::Function => self.parse_function_declaration(),
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Repeat => self.parse_repeat_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Call => self.parse_call_statement(),
            TokenKind::Begin | TokenKind::LBrace => self.parse_block(),
            TokenKind::Identifier => self.parse_assignment_or_call(),
            _ => Err(self.error_expected(STATEMENT_START, "at start of statement")),
        }
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let opener = self.advance().clone();

        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::Then, "after condition")?;

        let then_branch = self.parse_statement_list()?;

        let else_branch = if self.match_token(TokenKind::Else) {
            Some(self.parse_statement_list()?)
        } else {
            None
        };

        self.expect_closer(TokenKind::EndIf, &opener)?;

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            line: opener.location.line,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let opener = self.advance().clone();

        let condition = self.parse_expression()?;
        self.expect_token(TokenKind::Do, "after loop condition")?;

        let body = self.parse_statement_list()?;
        self.expect_closer(TokenKind::EndWhile, &opener)?;

        Ok(Stmt::While {
            condition,
            body,
            line: opener.location.line,
        })
    }

    /// Parse for statement. Bounds and step are arbitrary expressions.
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let opener = self.advance().clone();

        let var = self.expect_identifier("as loop variable")?;
        self.expect_assign_op("after loop variable")?;
        let from = self.parse_expression()?;

        self.expect_token(TokenKind::To, "after loop start value")?;
        let to = self.parse_expression()?;

        let step = if self.match_token(TokenKind::Step) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_token(TokenKind::Do, "after loop header")?;

        let body = self.parse_statement_list()?;
        self.expect_closer(TokenKind::EndFor, &opener)?;

        Ok(Stmt::For {
            var,
            from,
            to,
            step,
            body,
            line: opener.location.line,
        })
    }

    /// Parse repeat-until statement
    fn parse_repeat_statement(&mut self) -> Result<Stmt, ParseError> {
        let opener = self.advance().clone();

        let body = self.parse_statement_list()?;
        self.expect_closer(TokenKind::Until, &opener)?;
        let condition = self.parse_expression()?;
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::Repeat {
            body,
            condition,
            line: opener.location.line,
        })
    }

    /// Parse return statement.
    ///
    /// The value is optional and must start on the same line as the keyword,
    /// otherwise a bare `RETURN` would swallow the next statement.
    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let keyword = self.advance().clone();
        let line = keyword.location.line;

        let value = if self.peek_kind().starts_expression() && self.current_location().line == line {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::Return { value, line })
    }

    /// Parse `CALL f(args)`
    fn parse_call_statement(&mut self) -> Result<Stmt, ParseError> {
        let line = self.advance().location.line;

        let callee = self.expect_identifier("after CALL")?;
        self.expect_token(TokenKind::LParen, &format!("after '{}' in call", callee))?;
        let args = self.parse_arguments()?;
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::Call {
            call: CallExpr { callee, args },
            line,
        })
    }

    /// Parse block: `{ ... }` or `INICIO ... FIN`
    fn parse_block(&mut self) -> Result<Stmt, ParseError> {
        let opener = self.advance().clone();
        let closer = if opener.kind == TokenKind::LBrace {
            TokenKind::RBrace
        } else {
            TokenKind::End
        };

        let statements = self.parse_statement_list()?;
        self.expect_closer(closer, &opener)?;

        Ok(Stmt::Block {
            statements,
            line: opener.location.line,
        })
    }

    /// Parse a statement led by an identifier: assignment or bare call.
    ///
    /// The target is read as a postfix expression (name, calls, index
    /// suffixes); what follows decides which statement it is.
    fn parse_assignment_or_call(&mut self) -> Result<Stmt, ParseError> {
        let line = self.current_location().line;
        let target = self.parse_postfix()?;

        let assign_loc = self.current_location();
        if self.match_token(TokenKind::Eq) || self.match_token(TokenKind::Arrow) {
            if !target.is_lvalue() {
                return Err(ParseError::syntax(
                    "Invalid assignment target: expected a variable or array element",
                    assign_loc,
                    Vec::new(),
                ));
            }
            let value = self.parse_expression()?;
            self.match_token(TokenKind::Semicolon);
            return Ok(Stmt::Assignment {
                target,
                value,
                line,
            });
        }

        match target {
            Expr::Call(call) => {
                self.match_token(TokenKind::Semicolon);
                Ok(Stmt::Call { call, line })
            }
            _ => Err(self.error_expected(
                &[TokenKind::Eq, TokenKind::Arrow, TokenKind::LParen],
                "after assignment target",
            )),
        }
    }
}
