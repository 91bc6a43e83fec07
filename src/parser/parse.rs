//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with one token of lookahead
//! and no backtracking:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: variable and function declarations, types, parameters
//! - `statements`: control flow, assignments, calls, blocks
//! - `expressions`: layered precedence chain from `OR` down to primaries
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::parser::ast::*;
use crate::parser::keywords::Keywords;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The two failure classes of a parse call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseErrorKind {
    /// Unrecognized or malformed character sequence
    Lexical,
    /// Token present but grammatically unexpected
    Syntax,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Lexical => write!(f, "Lexical"),
            ParseErrorKind::Syntax => write!(f, "Syntax"),
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("{kind} error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
    /// Token kinds that would have been accepted, when known
    pub expected: Vec<TokenKind>,
}

impl ParseError {
    pub fn syntax(
        message: impl Into<String>,
        location: SourceLocation,
        expected: Vec<TokenKind>,
    ) -> Self {
        ParseError {
            kind: ParseErrorKind::Syntax,
            message: message.into(),
            location,
            expected,
        }
    }

    pub fn line(&self) -> usize {
        self.location.line
    }

    pub fn column(&self) -> usize {
        self.location.column
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            kind: ParseErrorKind::Lexical,
            message: err.message,
            location: err.location,
            expected: Vec::new(),
        }
    }
}

/// Recursive descent parser for bilingual pseudocode
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    /// Lex `source` with the bilingual keyword table and prepare to parse it.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let tokens = Lexer::new(source).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Lex `source` with a caller-supplied keyword table.
    pub fn with_keywords(source: &str, keywords: &Keywords) -> Result<Self, ParseError> {
        let tokens = Lexer::with_keywords(source, keywords).tokenize()?;
        Ok(Self::from_tokens(tokens))
    }

    /// Build a parser over an existing token stream. An end-of-input token is
    /// appended if the stream does not already end with one.
    pub fn from_tokens(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let location = tokens
                .last()
                .map(|t| t.location)
                .unwrap_or(SourceLocation::new(1, 1));
            tokens.push(Token::new(TokenKind::Eof, "", location));
        }
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse the entire program
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        program.statements = self.parse_statement_list()?;

        if !self.is_at_end() {
            // A closer with no open block, e.g. a stray FIN_SI
            return Err(ParseError::syntax(
                format!("Unexpected {} without a matching opening statement", self.peek()),
                self.current_location(),
                vec![TokenKind::Eof],
            ));
        }

        log::debug!(
            "parsed {} top-level statements",
            program.statements.len()
        );
        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    /// Consume a token of `kind` or fail naming what was expected.
    pub(crate) fn expect_token(&mut self, kind: TokenKind, ctx: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance().clone())
        } else {
            Err(self.error_expected(&[kind], ctx))
        }
    }

    pub(crate) fn expect_identifier(&mut self, ctx: &str) -> Result<String, ParseError> {
        self.expect_token(TokenKind::Identifier, ctx)
            .map(|token| token.lexeme)
    }

    /// Consume `=` or `<-`.
    pub(crate) fn expect_assign_op(&mut self, ctx: &str) -> Result<(), ParseError> {
        if self.match_token(TokenKind::Eq) || self.match_token(TokenKind::Arrow) {
            Ok(())
        } else {
            Err(self.error_expected(&[TokenKind::Eq, TokenKind::Arrow], ctx))
        }
    }

    /// Consume the terminator of a block opened by `opener`.
    ///
    /// On failure the error points at the opening keyword, since that is the
    /// construct left unterminated.
    pub(crate) fn expect_closer(&mut self, closer: TokenKind, opener: &Token) -> Result<(), ParseError> {
        if self.match_token(closer) {
            return Ok(());
        }

        let found = self.peek();
        Err(ParseError::syntax(
            format!(
                "Expected {} to close '{}' opened at line {}, found {} at line {}, column {}",
                closer,
                opener.lexeme,
                opener.location.line,
                found,
                found.location.line,
                found.location.column
            ),
            opener.location,
            vec![closer],
        ))
    }

    /// Build an error at the current token listing the accepted kinds.
    pub(crate) fn error_expected(&self, expected: &[TokenKind], ctx: &str) -> ParseError {
        let wanted = match expected {
            [] => "token".to_string(),
            [only] => only.to_string(),
            [init @ .., last] => {
                let head: Vec<String> = init.iter().map(|k| k.to_string()).collect();
                format!("{} or {}", head.join(", "), last)
            }
        };
        let ctx = if ctx.is_empty() {
            String::new()
        } else {
            format!(" {}", ctx)
        };
        ParseError::syntax(
            format!("Expected {}{}, found {}", wanted, ctx, self.peek()),
            self.current_location(),
            expected.to_vec(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_declaration() {
        let mut parser = Parser::new("ENTERO x = 5;").unwrap();
        let program = parser.parse_program().unwrap();

        assert_eq!(program.statements.len(), 1);
        match &program.statements[0] {
            Stmt::VarDecl {
                ty,
                names,
                init,
                line,
            } => {
                assert_eq!(ty.base, DataType::Integer);
                assert!(!ty.is_array());
                assert_eq!(names, &vec!["x".to_string()]);
                assert_eq!(init, &Some(Expr::int(5)));
                assert_eq!(*line, 1);
            }
            other => panic!("Expected variable declaration, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_program() {
        let program = Parser::new("  // nothing\n").unwrap().parse_program().unwrap();
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_lex_error_becomes_lexical_parse_error() {
        let err = Parser::new("x = 1 @").err().unwrap();
        assert_eq!(err.kind, ParseErrorKind::Lexical);
        assert_eq!(err.location, SourceLocation::new(1, 7));
        assert!(err.expected.is_empty());
    }

    #[test]
    fn test_stray_closer_at_top_level() {
        let err = Parser::new("x = 1\nFIN_SI").unwrap().parse_program().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert_eq!(err.location, SourceLocation::new(2, 1));
        assert!(err.message.contains("FIN_SI"));
    }

    #[test]
    fn test_from_tokens_appends_eof() {
        let tokens = vec![
            Token::new(TokenKind::Identifier, "f", SourceLocation::new(1, 1)),
            Token::new(TokenKind::LParen, "(", SourceLocation::new(1, 2)),
            Token::new(TokenKind::RParen, ")", SourceLocation::new(1, 3)),
        ];
        let program = Parser::from_tokens(tokens).parse_program().unwrap();
        assert_eq!(program.statements.len(), 1);
        assert!(matches!(program.statements[0], Stmt::Call { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::syntax(
            "Expected ')'",
            SourceLocation::new(3, 7),
            vec![TokenKind::RParen],
        );
        assert_eq!(
            err.to_string(),
            "Syntax error at line 3, column 7: Expected ')'"
        );
    }
}
