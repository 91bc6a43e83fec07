//! Indented tree dump of a parsed program
//!
//! Used by the `parse` command of the CLI and by tests that compare whole
//! trees as text. One node per line, two spaces per nesting level, statement
//! nodes suffixed with their source line.

use crate::parser::ast::*;
use crate::parser::visit::{walk_call, walk_expr, walk_program, Visitor};
use std::fmt;

#[derive(Debug, Default)]
pub struct AstPrinter {
    out: String,
    depth: usize,
}

impl AstPrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `program` as an indented tree.
    pub fn print(program: &Program) -> String {
        let mut printer = AstPrinter::new();
        printer.visit_program(program);
        printer.out
    }

    fn line(&mut self, text: impl AsRef<str>) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text.as_ref());
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }

    fn section(&mut self, label: &str, f: impl FnOnce(&mut Self)) {
        self.line(label);
        self.nested(f);
    }

    fn statements(&mut self, label: &str, statements: &[Stmt]) {
        self.section(label, |p| {
            for stmt in statements {
                p.visit_stmt(stmt);
            }
        });
    }
}

fn format_param(param: &Param) -> String {
    let mut text = match param.ty {
        Some(ty) => format!("{} {}", ty, param.name),
        None => param.name.clone(),
    };
    if param.is_array {
        text.push_str("[]");
    }
    text
}

impl Visitor for AstPrinter {
    fn visit_program(&mut self, program: &Program) {
        self.line("Program");
        self.nested(|p| walk_program(p, program));
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::VarDecl {
                ty,
                names,
                init,
                line,
            } => {
                self.line(format!("VarDecl {} {} (line {})", ty.base, names.join(", "), line));
                self.nested(|p| {
                    if ty.is_array() {
                        p.section("Dims:", |p| {
                            for dim in &ty.dims {
                                p.visit_expr(dim);
                            }
                        });
                    }
                    if let Some(init) = init {
                        p.section("Init:", |p| p.visit_expr(init));
                    }
                });
            }
            Stmt::Assignment {
                target,
                value,
                line,
            } => {
                self.line(format!("Assign (line {})", line));
                self.nested(|p| {
                    p.section("Target:", |p| p.visit_expr(target));
                    p.section("Value:", |p| p.visit_expr(value));
                });
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                line,
            } => {
                self.line(format!("If (line {})", line));
                self.nested(|p| {
                    p.section("Condition:", |p| p.visit_expr(condition));
                    p.statements("Then:", then_branch);
                    if let Some(else_branch) = else_branch {
                        p.statements("Else:", else_branch);
                    }
                });
            }
            Stmt::While {
                condition,
                body,
                line,
            } => {
                self.line(format!("While (line {})", line));
                self.nested(|p| {
                    p.section("Condition:", |p| p.visit_expr(condition));
                    p.statements("Body:", body);
                });
            }
            Stmt::For {
                var,
                from,
                to,
                step,
                body,
                line,
            } => {
                self.line(format!("For {} (line {})", var, line));
                self.nested(|p| {
                    p.section("From:", |p| p.visit_expr(from));
                    p.section("To:", |p| p.visit_expr(to));
                    if let Some(step) = step {
                        p.section("Step:", |p| p.visit_expr(step));
                    }
                    p.statements("Body:", body);
                });
            }
            Stmt::Repeat {
                body,
                condition,
                line,
            } => {
                self.line(format!("Repeat (line {})", line));
                self.nested(|p| {
                    p.statements("Body:", body);
                    p.section("Until:", |p| p.visit_expr(condition));
                });
            }
            Stmt::FunctionDecl {
                name,
                params,
                body,
                line,
            } => {
                let params: Vec<String> = params.iter().map(format_param).collect();
                self.line(format!("Function {}({}) (line {})", name, params.join(", "), line));
                self.nested(|p| {
                    for stmt in body {
                        p.visit_stmt(stmt);
                    }
                });
            }
            Stmt::Return { value, line } => {
                self.line(format!("Return (line {})", line));
                if let Some(value) = value {
                    self.nested(|p| p.visit_expr(value));
                }
            }
            Stmt::Call { call, line } => {
                self.line(format!("Call {} (line {})", call.callee, line));
                self.nested(|p| walk_call(p, call));
            }
            Stmt::Block { statements, line } => {
                self.line(format!("Block (line {})", line));
                self.nested(|p| {
                    for stmt in statements {
                        p.visit_stmt(stmt);
                    }
                });
            }
        }
    }

    fn visit_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(lit) => self.line(format!("Literal {}", lit)),
            Expr::Identifier(name) => self.line(format!("Identifier {}", name)),
            Expr::Binary { op, .. } => {
                self.line(format!("Binary {}", op.symbol()));
                self.nested(|p| walk_expr(p, expr));
            }
            Expr::Unary { op, .. } => {
                self.line(format!("Unary {}", op.symbol()));
                self.nested(|p| walk_expr(p, expr));
            }
            Expr::Call(call) => self.visit_call(call),
            Expr::ArrayAccess { base, indices } => {
                self.line("ArrayAccess");
                self.nested(|p| {
                    p.visit_expr(base);
                    p.section("Indices:", |p| {
                        for index in indices {
                            p.visit_expr(index);
                        }
                    });
                });
            }
        }
    }

    fn visit_call(&mut self, call: &CallExpr) {
        self.line(format!("Call {}", call.callee));
        self.nested(|p| walk_call(p, call));
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&AstPrinter::print(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn dump(source: &str) -> String {
        Parser::new(source).unwrap().parse_program().unwrap().to_string()
    }

    #[test]
    fn test_declaration_and_assignment() {
        let expected = "\
Program
  VarDecl integer x, z (line 1)
    Init:
      Literal 0
  Assign (line 2)
    Target:
      Identifier x
    Value:
      Binary +
        Identifier z
        Literal 1
";
        assert_eq!(dump("ENTERO x, z = 0\nx <- z + 1"), expected);
    }

    #[test]
    fn test_if_else() {
        let expected = "\
Program
  If (line 1)
    Condition:
      Binary >
        Identifier a
        Literal 0
    Then:
      Call print (line 2)
        Identifier a
    Else:
      Return (line 4)
";
        assert_eq!(
            dump("IF a > 0 THEN\n  print(a)\nELSE\n  RETURN\nEND_IF"),
            expected
        );
    }

    #[test]
    fn test_for_and_array_access() {
        let expected = "\
Program
  For i (line 1)
    From:
      Literal 1
    To:
      Identifier n
    Step:
      Literal 2
    Body:
      Assign (line 2)
        Target:
          ArrayAccess
            Identifier v
            Indices:
              Identifier i
        Value:
          Literal 0.5
";
        assert_eq!(
            dump("PARA i <- 1 HASTA n PASO 2 HACER\n  v[i] = 0.5\nFIN_PARA"),
            expected
        );
    }

    #[test]
    fn test_function_header() {
        let out = dump("FUNCION f(ENTERO A[], n)\nFIN_FUNCION");
        assert_eq!(out, "Program\n  Function f(integer A[], n) (line 1)\n");
    }

    #[test]
    fn test_repeat_and_string_literal() {
        let expected = "\
Program
  Repeat (line 1)
    Body:
      Call leer (line 2)
        Literal \"s\"
    Until:
      Unary NOT
        Identifier ok
";
        assert_eq!(
            dump("REPETIR\n  LLAMAR leer('s')\nHASTA_QUE NO ok"),
            expected
        );
    }
}
