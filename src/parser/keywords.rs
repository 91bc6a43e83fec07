//! Bilingual keyword table
//!
//! Every accepted spelling, Spanish or English, maps to exactly one canonical
//! [`TokenKind`]. The lexer consults this table once per identifier-shaped
//! lexeme, so two programs that differ only in keyword language lex to the
//! same token-kind sequence.
//!
//! Matching is case-insensitive in both languages, including the short
//! Spanish logical words `Y`, `O` and `NO`, so `y`, `o` and `no` are reserved.

use super::lexer::TokenKind;
use rustc_hash::FxHashMap;

const SPANISH: &[(&str, TokenKind)] = &[
    ("SI", TokenKind::If),
    ("ENTONCES", TokenKind::Then),
    ("SINO", TokenKind::Else),
    ("FIN_SI", TokenKind::EndIf),
    ("MIENTRAS", TokenKind::While),
    ("HACER", TokenKind::Do),
    ("FIN_MIENTRAS", TokenKind::EndWhile),
    ("PARA", TokenKind::For),
    ("HASTA", TokenKind::To),
    ("PASO", TokenKind::Step),
    ("FIN_PARA", TokenKind::EndFor),
    ("REPETIR", TokenKind::Repeat),
    ("HASTA_QUE", TokenKind::Until),
    ("INICIO", TokenKind::Begin),
    ("FIN", TokenKind::End),
    ("FUNCION", TokenKind::Function),
    ("FUNCIÓN", TokenKind::Function),
    ("FIN_FUNCION", TokenKind::EndFunction),
    ("FIN_FUNCIÓN", TokenKind::EndFunction),
    ("PROCEDIMIENTO", TokenKind::Function),
    ("FIN_PROCEDIMIENTO", TokenKind::EndFunction),
    ("RETORNAR", TokenKind::Return),
    ("DEVOLVER", TokenKind::Return),
    ("LLAMAR", TokenKind::Call),
    ("ENTERO", TokenKind::IntegerType),
    ("REAL", TokenKind::RealType),
    ("CADENA", TokenKind::StringType),
    ("BOOLEANO", TokenKind::BooleanType),
    ("CARACTER", TokenKind::CharType),
    ("CARÁCTER", TokenKind::CharType),
    ("VERDADERO", TokenKind::True),
    ("FALSO", TokenKind::False),
    ("MOD", TokenKind::Mod),
    ("DIV", TokenKind::Div),
    ("Y", TokenKind::And),
    ("O", TokenKind::Or),
    ("NO", TokenKind::Not),
];

const ENGLISH: &[(&str, TokenKind)] = &[
    ("IF", TokenKind::If),
    ("THEN", TokenKind::Then),
    ("ELSE", TokenKind::Else),
    ("END_IF", TokenKind::EndIf),
    ("WHILE", TokenKind::While),
    ("DO", TokenKind::Do),
    ("END_WHILE", TokenKind::EndWhile),
    ("FOR", TokenKind::For),
    ("TO", TokenKind::To),
    ("STEP", TokenKind::Step),
    ("END_FOR", TokenKind::EndFor),
    ("REPEAT", TokenKind::Repeat),
    ("UNTIL", TokenKind::Until),
    ("BEGIN", TokenKind::Begin),
    ("END", TokenKind::End),
    ("FUNCTION", TokenKind::Function),
    ("END_FUNCTION", TokenKind::EndFunction),
    ("PROCEDURE", TokenKind::Function),
    ("END_PROCEDURE", TokenKind::EndFunction),
    ("RETURN", TokenKind::Return),
    ("CALL", TokenKind::Call),
    ("INT", TokenKind::IntegerType),
    ("INTEGER", TokenKind::IntegerType),
    ("FLOAT", TokenKind::RealType),
    ("STRING", TokenKind::StringType),
    ("BOOLEAN", TokenKind::BooleanType),
    ("BOOL", TokenKind::BooleanType),
    ("CHAR", TokenKind::CharType),
    ("TRUE", TokenKind::True),
    ("FALSE", TokenKind::False),
    ("AND", TokenKind::And),
    ("OR", TokenKind::Or),
    ("NOT", TokenKind::Not),
];

/// Lookup table from keyword spelling to canonical token kind
#[derive(Debug, Clone)]
pub struct Keywords {
    folded: FxHashMap<String, TokenKind>, // keys stored upper-cased
}

impl Keywords {
    /// An empty table: every word lexes as an identifier.
    pub fn empty() -> Self {
        Keywords {
            folded: FxHashMap::default(),
        }
    }

    /// The full Spanish + English table.
    pub fn bilingual() -> Self {
        let mut table = Keywords::empty();
        for &(spelling, kind) in SPANISH.iter().chain(ENGLISH) {
            table.insert(spelling, kind);
        }
        table
    }

    /// Add a case-insensitive spelling.
    pub fn insert(&mut self, spelling: &str, kind: TokenKind) {
        self.folded.insert(spelling.to_uppercase(), kind);
    }

    /// Resolve a word to its keyword kind, if it is one.
    pub fn lookup(&self, word: &str) -> Option<TokenKind> {
        self.folded.get(&word.to_uppercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.folded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Keywords {
    fn default() -> Self {
        Keywords::bilingual()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spanish_and_english_share_kinds() {
        let kw = Keywords::bilingual();
        assert_eq!(kw.lookup("SI"), Some(TokenKind::If));
        assert_eq!(kw.lookup("IF"), Some(TokenKind::If));
        assert_eq!(kw.lookup("FIN_MIENTRAS"), kw.lookup("END_WHILE"));
        assert_eq!(kw.lookup("HASTA"), Some(TokenKind::To));
        assert_eq!(kw.lookup("HASTA_QUE"), Some(TokenKind::Until));
    }

    #[test]
    fn test_case_insensitive() {
        let kw = Keywords::bilingual();
        assert_eq!(kw.lookup("mientras"), Some(TokenKind::While));
        assert_eq!(kw.lookup("While"), Some(TokenKind::While));
        assert_eq!(kw.lookup("entero"), Some(TokenKind::IntegerType));
        assert_eq!(kw.lookup("función"), Some(TokenKind::Function));
    }

    #[test]
    fn test_short_spanish_logicals_any_case() {
        let kw = Keywords::bilingual();
        for (es, en) in [("Y", "AND"), ("y", "and"), ("O", "OR"), ("o", "or"), ("No", "Not")] {
            assert_eq!(kw.lookup(es), kw.lookup(en), "{}", es);
            assert!(kw.lookup(es).is_some(), "{}", es);
        }
    }

    #[test]
    fn test_identifiers_are_not_keywords() {
        let kw = Keywords::bilingual();
        assert_eq!(kw.lookup("suma"), None);
        assert_eq!(kw.lookup("FIN_SII"), None);
    }

    #[test]
    fn test_custom_table() {
        let mut kw = Keywords::empty();
        assert!(kw.is_empty());
        kw.insert("wenn", TokenKind::If);
        assert_eq!(kw.lookup("WENN"), Some(TokenKind::If));
        assert_eq!(kw.lookup("if"), None);
    }
}
