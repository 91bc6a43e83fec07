//! Lexer (tokenizer) for bilingual pseudocode
//!
//! Converts raw source text into a flat [`Token`] stream consumed by the parser.
//! Keywords are resolved through a [`Keywords`] table, so `SI` and `IF` produce
//! the same [`TokenKind::If`]. Comments (`//` or `#` to end of line) and
//! whitespace are skipped. The stream always ends with [`TokenKind::Eof`].

use super::ast::SourceLocation;
use super::keywords::Keywords;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

/// Canonical token kinds. Keyword kinds are language-neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    // Keywords
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndWhile,
    For,
    To,
    Step,
    EndFor,
    Repeat,
    Until,
    Begin,
    End,
    Function,
    EndFunction,
    Return,
    Call,

    // Type keywords
    IntegerType,
    RealType,
    StringType,
    BooleanType,
    CharType,

    // Boolean literals and word operators
    True,
    False,
    And,
    Or,
    Not,
    Mod,
    Div,

    // Identifiers and literals
    Identifier,
    IntegerLiteral,
    RealLiteral,
    StringLiteral,

    // Arithmetic
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %

    // Relational (`=` doubles as assignment)
    Eq,    // =
    NotEq, // <> !=
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=

    // Assignment arrow: <-  ←  🡨
    Arrow,

    // Punctuation
    LParen,    // (
    RParen,    // )
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Semicolon, // ;

    // End of input
    Eof,
}

impl TokenKind {
    pub fn is_type_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerType
                | TokenKind::RealType
                | TokenKind::StringType
                | TokenKind::BooleanType
                | TokenKind::CharType
        )
    }

    /// Tokens that close a statement list
    pub fn is_block_closer(self) -> bool {
        matches!(
            self,
            TokenKind::EndIf
                | TokenKind::Else
                | TokenKind::EndWhile
                | TokenKind::EndFor
                | TokenKind::Until
                | TokenKind::End
                | TokenKind::EndFunction
                | TokenKind::RBrace
                | TokenKind::Eof
        )
    }

    /// Tokens that may begin an expression
    pub fn starts_expression(self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::IntegerLiteral
                | TokenKind::RealLiteral
                | TokenKind::StringLiteral
                | TokenKind::True
                | TokenKind::False
                | TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Not
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::If => "'SI'/'IF'",
            TokenKind::Then => "'ENTONCES'/'THEN'",
            TokenKind::Else => "'SINO'/'ELSE'",
            TokenKind::EndIf => "'FIN_SI'/'END_IF'",
            TokenKind::While => "'MIENTRAS'/'WHILE'",
            TokenKind::Do => "'HACER'/'DO'",
            TokenKind::EndWhile => "'FIN_MIENTRAS'/'END_WHILE'",
            TokenKind::For => "'PARA'/'FOR'",
            TokenKind::To => "'HASTA'/'TO'",
            TokenKind::Step => "'PASO'/'STEP'",
            TokenKind::EndFor => "'FIN_PARA'/'END_FOR'",
            TokenKind::Repeat => "'REPETIR'/'REPEAT'",
            TokenKind::Until => "'HASTA_QUE'/'UNTIL'",
            TokenKind::Begin => "'INICIO'/'BEGIN'",
            TokenKind::End => "'FIN'/'END'",
            TokenKind::Function => "'FUNCION'/'FUNCTION'",
            TokenKind::EndFunction => "'FIN_FUNCION'/'END_FUNCTION'",
            TokenKind::Return => "'RETORNAR'/'RETURN'",
            TokenKind::Call => "'LLAMAR'/'CALL'",
            TokenKind::IntegerType => "'ENTERO'/'INT'",
            TokenKind::RealType => "'REAL'/'FLOAT'",
            TokenKind::StringType => "'CADENA'/'STRING'",
            TokenKind::BooleanType => "'BOOLEANO'/'BOOLEAN'",
            TokenKind::CharType => "'CARACTER'/'CHAR'",
            TokenKind::True => "'VERDADERO'/'TRUE'",
            TokenKind::False => "'FALSO'/'FALSE'",
            TokenKind::And => "'Y'/'AND'",
            TokenKind::Or => "'O'/'OR'",
            TokenKind::Not => "'NO'/'NOT'",
            TokenKind::Mod => "'MOD'",
            TokenKind::Div => "'DIV'",
            TokenKind::Identifier => "identifier",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::RealLiteral => "real literal",
            TokenKind::StringLiteral => "string literal",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Eq => "'='",
            TokenKind::NotEq => "'<>'",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::Arrow => "'<-'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBracket => "'['",
            TokenKind::RBracket => "']'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(text)
    }
}

/// A classified, positioned lexical unit.
///
/// `lexeme` is the source spelling, except for string literals where it holds
/// the decoded contents without quotes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, location: SourceLocation) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            location,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::IntegerLiteral => write!(f, "integer literal {}", self.lexeme),
            TokenKind::RealLiteral => write!(f, "real literal {}", self.lexeme),
            TokenKind::StringLiteral => write!(f, "string literal \"{}\"", self.lexeme),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
#[error("Lexer error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for pseudocode source
pub struct Lexer<'k> {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
    keywords: Cow<'k, Keywords>,
}

impl Lexer<'static> {
    /// Create a lexer using the default bilingual keyword table.
    pub fn new(input: &str) -> Self {
        Self::build(input, Cow::Owned(Keywords::bilingual()))
    }
}

impl<'k> Lexer<'k> {
    /// Create a lexer with a caller-supplied keyword table.
    pub fn with_keywords(input: &str, keywords: &'k Keywords) -> Self {
        Self::build(input, Cow::Borrowed(keywords))
    }

    fn build(input: &str, keywords: Cow<'k, Keywords>) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
            keywords,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace_and_comments();

            if self.is_at_end() {
                tokens.push(Token::new(TokenKind::Eof, "", self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        log::debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.advance().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        let simple = move |kind: TokenKind, text: &str| Ok(Token::new(kind, text, loc));

        match ch {
            '"' | '\'' => self.string_literal(ch, loc),

            '0'..='9' => self.number_literal(ch, loc),

            c if c.is_alphabetic() || c == '_' => Ok(self.identifier_or_keyword(c, loc)),

            '<' => {
                if self.match_char('-') {
                    simple(TokenKind::Arrow, "<-")
                } else if self.match_char('=') {
                    simple(TokenKind::Le, "<=")
                } else if self.match_char('>') {
                    simple(TokenKind::NotEq, "<>")
                } else {
                    simple(TokenKind::Lt, "<")
                }
            }
            '>' => {
                if self.match_char('=') {
                    simple(TokenKind::Ge, ">=")
                } else {
                    simple(TokenKind::Gt, ">")
                }
            }
            '!' => {
                if self.match_char('=') {
                    simple(TokenKind::NotEq, "!=")
                } else {
                    Err(LexError {
                        message: "Unexpected character: '!' (did you mean '!='?)".to_string(),
                        location: loc,
                    })
                }
            }
            '←' | '🡨' => Ok(Token::new(TokenKind::Arrow, ch.to_string(), loc)),
            '=' => simple(TokenKind::Eq, "="),
            '+' => simple(TokenKind::Plus, "+"),
            '-' => simple(TokenKind::Minus, "-"),
            '*' => simple(TokenKind::Star, "*"),
            '/' => simple(TokenKind::Slash, "/"),
            '%' => simple(TokenKind::Percent, "%"),
            '(' => simple(TokenKind::LParen, "("),
            ')' => simple(TokenKind::RParen, ")"),
            '[' => simple(TokenKind::LBracket, "["),
            ']' => simple(TokenKind::RBracket, "]"),
            '{' => simple(TokenKind::LBrace, "{"),
            '}' => simple(TokenKind::RBrace, "}"),
            ',' => simple(TokenKind::Comma, ","),
            ';' => simple(TokenKind::Semicolon, ";"),

            _ => Err(LexError {
                message: format!("Unexpected character: '{}'", ch),
                location: loc,
            }),
        }
    }

    /// Parse string literal delimited by `quote`. Newlines are not allowed inside.
    fn string_literal(&mut self, quote: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut string = String::new();

        while let Some(ch) = self.peek() {
            if ch == quote {
                self.advance(); // closing quote
                return Ok(Token::new(TokenKind::StringLiteral, string, loc));
            }

            if ch == '\n' {
                break;
            }

            if ch == '\\' {
                self.advance();
                let escape_loc = self.current_location();
                let escaped = match self.peek() {
                    Some(c) if c != '\n' => c,
                    _ => break,
                };
                self.advance();

                let unescaped = match escaped {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    '\\' => '\\',
                    '"' => '"',
                    '\'' => '\'',
                    _ => {
                        return Err(LexError {
                            message: format!("Unknown escape sequence: \\{}", escaped),
                            location: escape_loc,
                        });
                    }
                };
                string.push(unescaped);
            } else {
                string.push(ch);
                self.advance();
            }
        }

        Err(LexError {
            message: "Unterminated string literal".to_string(),
            location: loc,
        })
    }

    /// Parse numeric literal: digits with an optional single decimal point.
    /// The fraction may be empty, so `7.` is a real.
    fn number_literal(&mut self, first_digit: char, loc: SourceLocation) -> Result<Token, LexError> {
        let mut text = String::new();
        text.push(first_digit);
        self.take_digits(&mut text);

        if self.match_char('.') {
            text.push('.');
            self.take_digits(&mut text);
            return Ok(Token::new(TokenKind::RealLiteral, text, loc));
        }

        if text.parse::<i64>().is_err() {
            return Err(LexError {
                message: format!("Integer literal out of range: {}", text),
                location: loc,
            });
        }

        Ok(Token::new(TokenKind::IntegerLiteral, text, loc))
    }

    fn take_digits(&mut self, buf: &mut String) {
        while let Some(ch) = self.peek() {
            if !ch.is_ascii_digit() {
                break;
            }
            buf.push(ch);
            self.advance();
        }
    }

    /// Parse identifier or keyword
    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self.keywords.lookup(&ident).unwrap_or(TokenKind::Identifier);
        Token::new(kind, ident, loc)
    }

    /// Skip whitespace and single-line comments (`//` and `#`)
    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('#') => self.skip_line_comment(),
                Some('/') if self.peek_ahead(1) == Some('/') => self.skip_line_comment(),
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = *self.input.get(self.position)?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

/// Tokenize `source` with the default bilingual keyword table.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}
