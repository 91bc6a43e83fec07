// Downstream consumers see only the returned tree

use pseudoparse::parser::visit::{walk_expr, walk_stmt};
use pseudoparse::{parse, parse_with, CallExpr, Expr, Keywords, Stmt, TokenKind, Visitor};
use std::collections::HashMap;

/// Statements per source line, the shape a cost annotator needs
#[derive(Default)]
struct LineCounter {
    per_line: HashMap<usize, usize>,
}

impl Visitor for LineCounter {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        *self.per_line.entry(stmt.line()).or_default() += 1;
        walk_stmt(self, stmt);
    }
}

/// Finds functions that call themselves
#[derive(Default)]
struct RecursionFinder {
    current: Option<String>,
    recursive: Vec<String>,
}

impl Visitor for RecursionFinder {
    fn visit_stmt(&mut self, stmt: &Stmt) {
        if let Stmt::FunctionDecl { name, .. } = stmt {
            let outer = self.current.replace(name.clone());
            walk_stmt(self, stmt);
            self.current = outer;
        } else {
            walk_stmt(self, stmt);
        }
    }

    fn visit_call(&mut self, call: &CallExpr) {
        if self.current.as_deref() == Some(call.callee.as_str())
            && !self.recursive.contains(&call.callee)
        {
            self.recursive.push(call.callee.clone());
        }
        for arg in &call.args {
            self.visit_expr(arg);
        }
    }
}

/// Array names indexed anywhere in expressions
#[derive(Default)]
struct IndexedArrays {
    names: Vec<String>,
}

impl Visitor for IndexedArrays {
    fn visit_expr(&mut self, expr: &Expr) {
        if let Expr::ArrayAccess { base, .. } = expr {
            if let Expr::Identifier(name) = base.as_ref() {
                if !self.names.contains(name) {
                    self.names.push(name.clone());
                }
            }
        }
        walk_expr(self, expr);
    }
}

#[test]
fn test_statements_per_line() {
    let program = parse("ENTERO i\nPARA i <- 1 HASTA n HACER\n  a = 1; b = 2\nFIN_PARA").unwrap();

    let mut counter = LineCounter::default();
    counter.visit_program(&program);

    assert_eq!(counter.per_line.get(&1), Some(&1));
    assert_eq!(counter.per_line.get(&2), Some(&1));
    assert_eq!(counter.per_line.get(&3), Some(&2));
    assert_eq!(counter.per_line.get(&4), None);
}

#[test]
fn test_recursion_detection() {
    let source = "\
FUNCION fact(n)
  SI n <= 1 ENTONCES
    RETORNAR 1
  FIN_SI
  RETORNAR n * fact(n - 1)
FIN_FUNCION

FUNCION doble(n)
  RETORNAR suma(n, n)
FIN_FUNCION

FUNCION hanoi(n, a, b, c)
  SI n > 0 ENTONCES
    LLAMAR hanoi(n - 1, a, c, b)
    mover(a, b)
    hanoi(n - 1, c, b, a)
  FIN_SI
FIN_FUNCION";
    let program = parse(source).unwrap();

    let mut finder = RecursionFinder::default();
    finder.visit_program(&program);

    assert_eq!(finder.recursive, vec!["fact", "hanoi"]);
}

#[test]
fn test_indexed_arrays() {
    let program = parse("x = A[i] + B[j][k]\nC[A[1]] = 0").unwrap();

    let mut arrays = IndexedArrays::default();
    arrays.visit_program(&program);

    assert_eq!(arrays.names, vec!["A", "B", "C"]);
}

#[test]
fn test_custom_keyword_table() {
    let mut keywords = Keywords::empty();
    keywords.insert("wenn", TokenKind::If);
    keywords.insert("dann", TokenKind::Then);
    keywords.insert("ende", TokenKind::EndIf);

    let german = parse_with("wenn x dann\n  z = 1\nende", &keywords).unwrap();
    let english = parse("IF x THEN\n  z = 1\nEND_IF").unwrap();
    assert_eq!(german, english);

    // Without the default table SI is just a name
    assert!(parse_with("SI x ENTONCES z = 1 FIN_SI", &keywords).is_err());
}

#[test]
fn test_tree_serializes_to_json() {
    let program = parse("ENTERO v[3]\nv[1] <- 2.5").unwrap();
    let json = serde_json::to_value(&program).unwrap();

    let statements = json["statements"].as_array().unwrap();
    assert_eq!(statements.len(), 2);
    assert_eq!(statements[0]["VarDecl"]["names"][0], "v");
    assert_eq!(statements[0]["VarDecl"]["ty"]["base"], "Integer");
    assert_eq!(statements[1]["Assignment"]["line"], 2);
    assert_eq!(
        statements[1]["Assignment"]["value"]["Literal"]["Real"],
        2.5
    );
}

#[test]
fn test_error_serializes_to_json() {
    let err = parse("MIENTRAS x HACER").unwrap_err();
    let json = serde_json::to_value(&err).unwrap();

    assert_eq!(json["kind"], "Syntax");
    assert_eq!(json["location"]["line"], 1);
    assert_eq!(json["expected"][0], "EndWhile");
}
