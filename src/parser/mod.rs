//! Bilingual pseudocode parser
//!
//! This module transforms pseudocode source text into an Abstract Syntax Tree (AST):
//! - [`keywords`]: Spanish/English keyword spellings → canonical token kinds
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parse`]: Parsing (tokens → AST), split across `declarations`,
//!   `statements` and `expressions`
//! - [`ast`]: AST node definitions
//! - [`visit`]: Read-only traversal for downstream analyzers
//! - [`printer`]: Indented text dump of a tree
//!
//! # Supported Pseudocode
//!
//! - Types: `ENTERO`/`INT`, `REAL`/`FLOAT`, `CADENA`/`STRING`,
//!   `BOOLEANO`/`BOOL`, `CARACTER`/`CHAR`, fixed or symbolic arrays
//! - Statements: declarations, assignments (`=` or `<-`), `SI`/`IF`,
//!   `MIENTRAS`/`WHILE`, `PARA`/`FOR`, `REPETIR`/`REPEAT`, functions,
//!   `RETORNAR`/`RETURN`, calls, blocks
//! - Expressions: arithmetic, relational, logical, calls, array indexing
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with one token of lookahead.
//! No external parser generator dependencies.

pub mod ast;
mod declarations;
mod expressions;
pub mod keywords;
pub mod lexer;
pub mod parse;
pub mod printer;
mod statements;
pub mod visit;
