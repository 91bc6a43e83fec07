//! AST traversal
//!
//! [`Visitor`] is the read-only traversal contract for consumers of a parsed
//! [`Program`]. Every method has a default that recurses into the node's
//! children through the matching `walk_*` function, so an implementor only
//! overrides the node kinds it cares about and calls `walk_*` itself when it
//! still wants the children visited.

use crate::parser::ast::*;

pub trait Visitor: Sized {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    /// Called for both call statements and call expressions.
    fn visit_call(&mut self, call: &CallExpr) {
        walk_call(self, call);
    }
}

pub fn walk_program<V: Visitor>(visitor: &mut V, program: &Program) {
    walk_block(visitor, &program.statements);
}

pub fn walk_block<V: Visitor>(visitor: &mut V, statements: &[Stmt]) {
    for stmt in statements {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::VarDecl { ty, init, .. } => {
            for dim in &ty.dims {
                visitor.visit_expr(dim);
            }
            if let Some(init) = init {
                visitor.visit_expr(init);
            }
        }
        Stmt::Assignment { target, value, .. } => {
            visitor.visit_expr(target);
            visitor.visit_expr(value);
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            visitor.visit_expr(condition);
            walk_block(visitor, then_branch);
            if let Some(else_branch) = else_branch {
                walk_block(visitor, else_branch);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            visitor.visit_expr(condition);
            walk_block(visitor, body);
        }
        Stmt::For {
            from,
            to,
            step,
            body,
            ..
        } => {
            visitor.visit_expr(from);
            visitor.visit_expr(to);
            if let Some(step) = step {
                visitor.visit_expr(step);
            }
            walk_block(visitor, body);
        }
        Stmt::Repeat {
            body, condition, ..
        } => {
            walk_block(visitor, body);
            visitor.visit_expr(condition);
        }
        Stmt::FunctionDecl { body, .. } => walk_block(visitor, body),
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
        Stmt::Call { call, .. } => visitor.visit_call(call),
        Stmt::Block { statements, .. } => walk_block(visitor, statements),
    }
}

pub fn walk_expr<V: Visitor>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Literal(_) | Expr::Identifier(_) => {}
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
        Expr::Unary { operand, .. } => visitor.visit_expr(operand),
        Expr::Call(call) => visitor.visit_call(call),
        Expr::ArrayAccess { base, indices } => {
            visitor.visit_expr(base);
            for index in indices {
                visitor.visit_expr(index);
            }
        }
    }
}

pub fn walk_call<V: Visitor>(visitor: &mut V, call: &CallExpr) {
    for arg in &call.args {
        visitor.visit_expr(arg);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse::Parser;

    fn program(source: &str) -> Program {
        Parser::new(source).unwrap().parse_program().unwrap()
    }

    /// Records the callee of every call, in visiting order
    #[derive(Default)]
    struct CallCollector {
        callees: Vec<String>,
    }

    impl Visitor for CallCollector {
        fn visit_call(&mut self, call: &CallExpr) {
            self.callees.push(call.callee.clone());
            walk_call(self, call);
        }
    }

    /// Deepest loop nesting seen
    #[derive(Default)]
    struct LoopDepth {
        current: usize,
        max: usize,
    }

    impl Visitor for LoopDepth {
        fn visit_stmt(&mut self, stmt: &Stmt) {
            let is_loop = matches!(
                stmt,
                Stmt::While { .. } | Stmt::For { .. } | Stmt::Repeat { .. }
            );
            if is_loop {
                self.current += 1;
                self.max = self.max.max(self.current);
            }
            walk_stmt(self, stmt);
            if is_loop {
                self.current -= 1;
            }
        }
    }

    #[test]
    fn test_calls_found_in_statements_and_expressions() {
        let program = program(
            "LLAMAR init()\n\
             x = f(g(1)) + 2\n\
             SI h(x) ENTONCES\n  imprimir(x)\nFIN_SI",
        );
        let mut collector = CallCollector::default();
        collector.visit_program(&program);
        assert_eq!(collector.callees, vec!["init", "f", "g", "h", "imprimir"]);
    }

    #[test]
    fn test_loop_depth() {
        let program = program(
            "PARA i <- 1 HASTA n HACER\n\
             \x20 PARA j <- 1 HASTA n HACER\n\
             \x20   MIENTRAS k > 0 HACER\n\
             \x20     k = k - 1\n\
             \x20   FIN_MIENTRAS\n\
             \x20 FIN_PARA\n\
             FIN_PARA\n\
             REPEAT\n  x = x + 1\nUNTIL x > 3",
        );
        let mut depth = LoopDepth::default();
        depth.visit_program(&program);
        assert_eq!(depth.max, 3);
        assert_eq!(depth.current, 0);
    }

    #[test]
    fn test_function_bodies_are_walked() {
        let program = program(
            "FUNCTION fib(n)\n\
             \x20 IF n < 2 THEN\n    RETURN n\n  END_IF\n\
             \x20 RETURN fib(n - 1) + fib(n - 2)\n\
             END_FUNCTION",
        );
        let mut collector = CallCollector::default();
        collector.visit_program(&program);
        assert_eq!(collector.callees, vec!["fib", "fib"]);
    }
}
