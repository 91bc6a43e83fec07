//! # Introduction
//!
//! pseudoparse turns bilingual (Spanish/English) teaching pseudocode into a
//! typed abstract syntax tree, the input for complexity analyzers and other
//! tools that reason about algorithms written the way they appear in class.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → AST → (external analyzers via Visitor)
//! ```
//!
//! 1. [`parser::lexer`] turns source text into tokens. Keyword spellings in
//!    either language map to the same [`TokenKind`].
//! 2. [`parser::parse`] builds a [`Program`] by recursive descent, failing on
//!    the first error with a 1-based line and column.
//! 3. [`parser::visit`] exposes the tree to consumers without giving them any
//!    access to parser state.
//!
//! ## Example
//!
//! ```
//! let es = pseudoparse::parse("MIENTRAS i < n HACER\n  i <- i + 1\nFIN_MIENTRAS").unwrap();
//! let en = pseudoparse::parse("WHILE i < n DO\n  i <- i + 1\nEND_WHILE").unwrap();
//! assert_eq!(es, en);
//! ```

pub mod parser;

pub use parser::ast::{
    BinOp, CallExpr, DataType, Expr, Literal, Param, Program, SourceLocation, Stmt, TypeSpec,
    UnOp,
};
pub use parser::keywords::Keywords;
pub use parser::lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::parse::{ParseError, ParseErrorKind, Parser};
pub use parser::printer::AstPrinter;
pub use parser::visit::Visitor;

/// Parse `source` with the default bilingual keyword table.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}

/// Parse `source` with a caller-supplied keyword table.
pub fn parse_with(source: &str, keywords: &Keywords) -> Result<Program, ParseError> {
    Parser::with_keywords(source, keywords)?.parse_program()
}
