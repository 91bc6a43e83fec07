// Spanish and English spellings of the same program must parse to equal trees

use pseudoparse::{parse, Program};

fn both(es: &str, en: &str) -> Program {
    let es_tree = parse(es).unwrap_or_else(|e| panic!("Spanish source failed: {}", e));
    let en_tree = parse(en).unwrap_or_else(|e| panic!("English source failed: {}", e));
    assert_eq!(es_tree, en_tree, "\n{}\n---\n{}", es, en);
    es_tree
}

#[test]
fn test_declarations() {
    both("ENTERO a, b = 0", "INT a, b = 0");
    both("REAL x", "FLOAT x");
    both("CADENA s <- \"hola\"", "STRING s <- \"hola\"");
    both("BOOLEANO ok = VERDADERO", "BOOLEAN ok = TRUE");
    both("CARÁCTER c", "CHAR c");
    both("ENTERO M[n][m]", "INTEGER M[n][m]");
}

#[test]
fn test_if_else() {
    both(
        "SI a >= b ENTONCES\n  m <- a\nSINO\n  m <- b\nFIN_SI",
        "IF a >= b THEN\n  m <- a\nELSE\n  m <- b\nEND_IF",
    );
}

#[test]
fn test_while() {
    both(
        "MIENTRAS i < n Y NO listo HACER\n  i = i + 1\nFIN_MIENTRAS",
        "WHILE i < n AND NOT listo DO\n  i = i + 1\nEND_WHILE",
    );
}

#[test]
fn test_for_with_step() {
    both(
        "PARA i <- n HASTA 1 PASO -1 HACER\n  s = s + i\nFIN_PARA",
        "FOR i <- n TO 1 STEP -1 DO\n  s = s + i\nEND_FOR",
    );
}

#[test]
fn test_repeat_until() {
    both(
        "REPETIR\n  x <- x DIV 2\nHASTA_QUE x = 0 O fin",
        "REPEAT\n  x <- x DIV 2\nUNTIL x = 0 OR fin",
    );
}

#[test]
fn test_functions_and_procedures() {
    both(
        "FUNCION suma(ENTERO a, ENTERO b)\n  RETORNAR a + b\nFIN_FUNCION",
        "FUNCTION suma(INT a, INT b)\n  RETURN a + b\nEND_FUNCTION",
    );
    both(
        "PROCEDIMIENTO saludar()\n  DEVOLVER\nFIN_PROCEDIMIENTO",
        "PROCEDURE saludar()\n  RETURN\nEND_PROCEDURE",
    );
}

#[test]
fn test_calls_and_blocks() {
    both("LLAMAR ordenar(A, n)", "CALL ordenar(A, n)");
    both(
        "INICIO\n  a = 1\n  b = 2\nFIN",
        "BEGIN\n  a = 1\n  b = 2\nEND",
    );
}

#[test]
fn test_literals_and_word_operators() {
    both(
        "x = FALSO O (n MOD 2 = 0 Y VERDADERO)",
        "x = FALSE OR (n MOD 2 = 0 AND TRUE)",
    );
}

#[test]
fn test_keyword_case_is_irrelevant() {
    both(
        "si x ENTONCES\n  z <- 1\nfin_si",
        "If x Then\n  z <- 1\nEnd_If",
    );
}

#[test]
fn test_lowercase_spanish_logicals() {
    both(
        "si a y no b entonces x = 1 fin_si",
        "if a and not b then x = 1 end_if",
    );
    both(
        "mientras i < n o listo hacer\n  i = i + 1\nfin_mientras",
        "while i < n or listo do\n  i = i + 1\nend_while",
    );
}

#[test]
fn test_mixed_languages_in_one_program() {
    both(
        "SI x > 0 THEN\n  WHILE x > 0 HACER\n    x <- x - 1\n  FIN_MIENTRAS\nEND_IF",
        "IF x > 0 ENTONCES\n  MIENTRAS x > 0 DO\n    x <- x - 1\n  END_WHILE\nFIN_SI",
    );
}

#[test]
fn test_assignment_arrows() {
    both("x ← 1", "x <- 1");
    both("x 🡨 1", "x = 1");
}
