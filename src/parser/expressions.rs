//! Expression parsing implementation
//!
//! This module handles parsing of pseudocode expressions with a layered
//! recursive-descent chain, one method per precedence level.
//!
//! # Supported Expressions
//!
//! - Literals: integers, reals, strings, `VERDADERO`/`TRUE`, `FALSO`/`FALSE`
//! - Identifiers
//! - Binary operators: arithmetic, relational, logical
//! - Unary operators: `-`, `NOT`/`NO`
//! - Postfix: one or more `[i, ...]` index groups
//! - Calls: `f(a, b)`
//!
//! # Precedence
//!
//! From lowest to highest:
//!
//! | Level          | Operators                           |
//! |----------------|-------------------------------------|
//! | or             | `OR` `O`                            |
//! | and            | `AND` `Y`                           |
//! | not            | prefix `NOT` `NO`                   |
//! | relational     | `=` `<>` `!=` `<` `<=` `>` `>=`     |
//! | additive       | `+` `-`                             |
//! | multiplicative | `*` `/` `%` `MOD` `DIV`             |
//! | unary          | prefix `-` `NOT`                    |
//! | postfix        | `[...]`                             |
//!
//! All binary operators are left-associative.
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

const EXPRESSION_START: &[TokenKind] = &[
    TokenKind::Identifier,
    TokenKind::IntegerLiteral,
    TokenKind::RealLiteral,
    TokenKind::StringLiteral,
    TokenKind::True,
    TokenKind::False,
    TokenKind::LParen,
    TokenKind::Minus,
    TokenKind::Not,
];

const RELATIONAL_OPS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Eq, BinOp::Eq),
    (TokenKind::NotEq, BinOp::Ne),
    (TokenKind::Lt, BinOp::Lt),
    (TokenKind::Le, BinOp::Le),
    (TokenKind::Gt, BinOp::Gt),
    (TokenKind::Ge, BinOp::Ge),
];

const ADDITIVE_OPS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Plus, BinOp::Add),
    (TokenKind::Minus, BinOp::Sub),
];

const MULTIPLICATIVE_OPS: &[(TokenKind, BinOp)] = &[
    (TokenKind::Star, BinOp::Mul),
    (TokenKind::Slash, BinOp::Div),
    (TokenKind::Percent, BinOp::Mod),
    (TokenKind::Mod, BinOp::Mod),
    (TokenKind::Div, BinOp::IntDiv),
];

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(TokenKind::Or) {
            let right = self.parse_logical_and()?;
            left = Expr::binary(BinOp::Or, left, right);
        }

        Ok(left)
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_logical_not()?;

        while self.match_token(TokenKind::And) {
            let right = self.parse_logical_not()?;
            left = Expr::binary(BinOp::And, left, right);
        }

        Ok(left)
    }

    /// `NOT a = b` negates the whole comparison.
    fn parse_logical_not(&mut self) -> Result<Expr, ParseError> {
        if self.match_token(TokenKind::Not) {
            let operand = self.parse_logical_not()?;
            return Ok(Expr::Unary {
                op: UnOp::Not,
                operand: Box::new(operand),
            });
        }
        self.parse_relational()
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        while let Some(op) = self.match_binary_op(RELATIONAL_OPS) {
            let right = self.parse_additive()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while let Some(op) = self.match_binary_op(ADDITIVE_OPS) {
            let right = self.parse_multiplicative()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        while let Some(op) = self.match_binary_op(MULTIPLICATIVE_OPS) {
            let right = self.parse_unary()?;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let op = if self.match_token(TokenKind::Minus) {
            UnOp::Neg
        } else if self.match_token(TokenKind::Not) {
            UnOp::Not
        } else {
            return self.parse_postfix();
        };

        let operand = self.parse_unary()?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    /// Parse a primary followed by any number of `[...]` index groups.
    ///
    /// Each bracket group becomes its own `ArrayAccess` node, so `m[i][j]`
    /// nests while `m[i, j]` is a single node with two indices.
    pub(crate) fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.parse_primary()?;

        while self.match_token(TokenKind::LBracket) {
            let mut indices = vec![self.parse_expression()?];
            while self.match_token(TokenKind::Comma) {
                indices.push(self.parse_expression()?);
            }
            self.expect_token(TokenKind::RBracket, "after array index")?;

            expr = Expr::ArrayAccess {
                base: Box::new(expr),
                indices,
            };
        }

        Ok(expr)
    }

    /// Parse call arguments after the opening `(` up to and including `)`.
    pub(crate) fn parse_arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();

        if !self.check(TokenKind::RParen) {
            loop {
                args.push(self.parse_expression()?);
                if !self.match_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_token(TokenKind::RParen, "after arguments")?;

        Ok(args)
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let token = self.peek().clone();

        match token.kind {
            TokenKind::IntegerLiteral => {
                self.advance();
                let value = token.lexeme.parse::<i64>().map_err(|_| {
                    ParseError::syntax(
                        format!("Integer literal out of range: {}", token.lexeme),
                        token.location,
                        Vec::new(),
                    )
                })?;
                Ok(Expr::Literal(Literal::Integer(value)))
            }
            TokenKind::RealLiteral => {
                self.advance();
                let value = token.lexeme.parse::<f64>().map_err(|_| {
                    ParseError::syntax(
                        format!("Invalid real literal: {}", token.lexeme),
                        token.location,
                        Vec::new(),
                    )
                })?;
                Ok(Expr::Literal(Literal::Real(value)))
            }
            TokenKind::StringLiteral => {
                self.advance();
                Ok(Expr::Literal(Literal::Str(token.lexeme)))
            }
            TokenKind::True => {
                self.advance();
                Ok(Expr::Literal(Literal::Bool(true)))
            }
            TokenKind::False => {
                self.advance();
                Ok(Expr::Literal(Literal::Bool(false)))
            }
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect_token(TokenKind::RParen, "after expression")?;
                Ok(expr)
            }
            TokenKind::Identifier => {
                self.advance();
                if self.match_token(TokenKind::LParen) {
                    let args = self.parse_arguments()?;
                    Ok(Expr::Call(CallExpr {
                        callee: token.lexeme,
                        args,
                    }))
                } else {
                    Ok(Expr::Identifier(token.lexeme))
                }
            }
            _ => Err(self.error_expected(EXPRESSION_START, "in expression")),
        }
    }

    /// Consume the current token if it is one of `ops`, returning its operator.
    fn match_binary_op(&mut self, ops: &[(TokenKind, BinOp)]) -> Option<BinOp> {
        let kind = self.peek_kind();
        let op = ops.iter().find(|(k, _)| *k == kind).map(|(_, op)| *op)?;
        self.advance();
        Some(op)
    }
}
