//! AST (Abstract Syntax Tree) definitions for pseudocode programs

use serde::Serialize;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Scalar data types. Spanish and English spellings collapse to one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DataType {
    Integer,
    Real,
    String,
    Boolean,
    Character,
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::Integer => "integer",
            DataType::Real => "real",
            DataType::String => "string",
            DataType::Boolean => "boolean",
            DataType::Character => "character",
        };
        f.write_str(name)
    }
}

/// Declared type: a scalar base plus zero or more array dimensions
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeSpec {
    pub base: DataType,
    pub dims: Vec<Expr>, // one size expression per dimension, empty for scalars
}

impl TypeSpec {
    pub fn new(base: DataType) -> Self {
        TypeSpec {
            base,
            dims: Vec::new(),
        }
    }

    pub fn is_array(&self) -> bool {
        !self.dims.is_empty()
    }
}

/// Function parameter. The type annotation is optional in pseudocode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: Option<DataType>,
    pub is_array: bool, // written as `A[]`
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinOp {
    // Logical
    Or,
    And,
    // Relational
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    // Additive
    Add,
    Sub,
    // Multiplicative
    Mul,
    Div,
    IntDiv, // DIV
    Mod,    // % and MOD
}

impl BinOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinOp::Or => "OR",
            BinOp::And => "AND",
            BinOp::Eq => "=",
            BinOp::Ne => "<>",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::IntDiv => "DIV",
            BinOp::Mod => "MOD",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnOp {
    Neg, // -x
    Not, // NOT x / NO x
}

impl UnOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnOp::Neg => "-",
            UnOp::Not => "NOT",
        }
    }
}

/// Literal values
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Literal {
    Integer(i64),
    Real(f64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(n) => write!(f, "{}", n),
            Literal::Real(x) => write!(f, "{:?}", x),
            Literal::Str(s) => write!(f, "{:?}", s),
            Literal::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// Call site: `name(args)`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CallExpr {
    pub callee: String,
    pub args: Vec<Expr>,
}

/// Expressions
///
/// Expressions carry no position; the enclosing statement's `line` is the
/// unit of cost attribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    Literal(Literal),
    Identifier(String),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnOp,
        operand: Box<Expr>,
    },
    Call(CallExpr),
    /// One node per bracket group: `m[i][j]` nests, `m[i, j]` does not.
    ArrayAccess {
        base: Box<Expr>,
        indices: Vec<Expr>,
    },
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Self {
        Expr::Identifier(name.into())
    }

    pub fn int(value: i64) -> Self {
        Expr::Literal(Literal::Integer(value))
    }

    pub fn binary(op: BinOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// True for expressions that may appear on the left of an assignment
    pub fn is_lvalue(&self) -> bool {
        match self {
            Expr::Identifier(_) => true,
            Expr::ArrayAccess { base, .. } => base.is_lvalue(),
            _ => false,
        }
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    VarDecl {
        ty: TypeSpec,
        names: Vec<String>,
        init: Option<Expr>,
        line: usize,
    },
    Assignment {
        target: Expr, // Identifier or ArrayAccess
        value: Expr,
        line: usize,
    },
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
        line: usize,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        line: usize,
    },
    For {
        var: String,
        from: Expr,
        to: Expr,
        step: Option<Expr>,
        body: Vec<Stmt>,
        line: usize,
    },
    Repeat {
        body: Vec<Stmt>,
        condition: Expr,
        line: usize,
    },
    FunctionDecl {
        name: String,
        params: Vec<Param>,
        body: Vec<Stmt>,
        line: usize,
    },
    Return {
        value: Option<Expr>,
        line: usize,
    },
    Call {
        call: CallExpr,
        line: usize,
    },
    Block {
        statements: Vec<Stmt>,
        line: usize,
    },
}

impl Stmt {
    /// Line of the statement's first token
    pub fn line(&self) -> usize {
        match self {
            Stmt::VarDecl { line, .. }
            | Stmt::Assignment { line, .. }
            | Stmt::If { line, .. }
            | Stmt::While { line, .. }
            | Stmt::For { line, .. }
            | Stmt::Repeat { line, .. }
            | Stmt::FunctionDecl { line, .. }
            | Stmt::Return { line, .. }
            | Stmt::Call { line, .. }
            | Stmt::Block { line, .. } => *line,
        }
    }
}

/// Top-level program structure
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new() -> Self {
        Program::default()
    }

    /// Function declarations at the top level, in source order
    pub fn functions(&self) -> impl Iterator<Item = &Stmt> {
        self.statements
            .iter()
            .filter(|s| matches!(s, Stmt::FunctionDecl { .. }))
    }
}
