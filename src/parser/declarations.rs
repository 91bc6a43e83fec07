//! Declaration parsing implementation
//!
//! This module handles parsing of declarations:
//!
//! - Variable declarations: `ENTERO i, j = 0;`, `REAL A[n][m]`
//! - Function declarations: `FUNCION f(a, ENTERO B[]) ... FIN_FUNCION`
//! - Type parsing: scalar type keyword plus array dimensions
//!
//! # Grammar
//!
//! ```text
//! var_decl      ::= type dims? ident dims? ("," ident)* (("=" | "<-") expr)? ";"?
//! dims          ::= ("[" expr ("," expr)* "]")+
//! function_decl ::= FUNCTION ident "(" params? ")" stmts END_FUNCTION
//! params        ::= param ("," param)*
//! param         ::= type? ident ("[" "]")*
//! ```
//!
//! Dimensions may follow the type keyword or the first name; either way they
//! apply to every name in the declaration, as does the initializer.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const TYPE_KEYWORDS: &[TokenKind] = &[
    TokenKind::IntegerType,
    TokenKind::RealType,
    TokenKind::StringType,
    TokenKind::BooleanType,
    TokenKind::CharType,
];

impl Parser {
    /// Parse variable declaration
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let line = self.current_location().line;
        let mut ty = TypeSpec::new(self.parse_data_type()?);
        ty.dims = self.parse_dimensions()?;

        let mut names = vec![self.expect_identifier("in declaration")?];

        if self.check(TokenKind::LBracket) {
            if ty.is_array() {
                return Err(ParseError::syntax(
                    "Array dimensions declared twice in one declaration",
                    self.current_location(),
                    Vec::new(),
                ));
            }
            ty.dims = self.parse_dimensions()?;
        }

        while self.match_token(TokenKind::Comma) {
            names.push(self.expect_identifier("after ',' in declaration")?);
            if self.check(TokenKind::LBracket) {
                return Err(ParseError::syntax(
                    "Array dimensions must follow the type or the first declared name",
                    self.current_location(),
                    Vec::new(),
                ));
            }
        }

        let init = if self.match_token(TokenKind::Eq) || self.match_token(TokenKind::Arrow) {
            Some(self.parse_expression()?)
        } else {
            None
        };
        self.match_token(TokenKind::Semicolon);

        Ok(Stmt::VarDecl {
            ty,
            names,
            init,
            line,
        })
    }

    /// Parse function declaration
    pub(crate) fn parse_function_declaration(&mut self) -> Result<Stmt, ParseError> {
        let opener = self.advance().clone();

        let name = self.expect_identifier("as function name")?;
        self.expect_token(TokenKind::LParen, "after function name")?;
        let params = self.parse_parameter_list()?;
        self.expect_token(TokenKind::RParen, "after parameters")?;

        let body = self.parse_statement_list()?;
        self.expect_closer(TokenKind::EndFunction, &opener)?;

        Ok(Stmt::FunctionDecl {
            name,
            params,
            body,
            line: opener.location.line,
        })
    }

    /// Parse a scalar type keyword
    pub(crate) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        let data_type = match self.peek_kind() {
            TokenKind::IntegerType => DataType::Integer,
            TokenKind::RealType => DataType::Real,
            TokenKind::StringType => DataType::String,
            TokenKind::BooleanType => DataType::Boolean,
            TokenKind::CharType => DataType::Character,
            _ => return Err(self.error_expected(TYPE_KEYWORDS, "")),
        };
        self.advance();
        Ok(data_type)
    }

    /// Parse zero or more `[size, ...]` groups into a flat dimension list
    fn parse_dimensions(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut dims = Vec::new();

        while self.match_token(TokenKind::LBracket) {
            loop {
                dims.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
            self.expect_token(TokenKind::RBracket, "after array size")?;
        }

        Ok(dims)
    }

    /// Parse parameter list (without the parentheses)
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        loop {
            let ty = if self.peek_kind().is_type_keyword() {
                Some(self.parse_data_type()?)
            } else {
                None
            };
            let name = self.expect_identifier("as parameter name")?;

            let mut is_array = false;
            while self.match_token(TokenKind::LBracket) {
                self.expect_token(TokenKind::RBracket, "in array parameter")?;
                is_array = true;
            }

            params.push(Param { name, ty, is_array });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }
}
