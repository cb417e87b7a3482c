//! Arena-independent parse results. Grammar rules build these freely while
//! backtracking; only a fully parsed top-level statement is copied into the
//! module's `Ast` (see `into_mem`).

use crate::ast::{BinaryOp, Literal, TypeName, UnaryOp};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
  Literal(Literal),
  Unary {
    op: UnaryOp,
    operand: Box<Expr>,
  },
  Binary {
    op: BinaryOp,
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Variable(Variable),
  MemberAccess {
    left: Box<Expr>,
    right: Box<Expr>,
  },
  Call(Call),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
  pub name: String,
  pub index: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
  pub name: String,
  pub args: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarDef {
  pub name: String,
  pub ty: TypeName,
  pub array_size: u32,
}

/// Left-hand side of an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
  Definition(VarDef),
  Member(Expr),
  Variable(Variable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
  pub name: String,
  pub return_type: TypeName,
  pub params: Vec<VarDef>,
  pub body: Option<Vec<Stmt>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
  Comment(String),
  Import(String),
  TypeDecl {
    name: String,
    members: Vec<VarDef>,
  },
  Assert(Expr),
  Call(Call),
  Function(Function),
  If {
    condition: Expr,
    if_body: Vec<Stmt>,
    else_body: Vec<Stmt>,
  },
  For {
    init: Box<Stmt>,
    condition: Expr,
    update: Box<Stmt>,
    body: Vec<Stmt>,
  },
  Assign {
    target: Target,
    value: Expr,
  },
  VarDef(VarDef),
  Return(Expr),
}

impl Expr {
  pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
    Expr::Binary { op, left: Box::new(left), right: Box::new(right) }
  }

  pub fn unary(op: UnaryOp, operand: Expr) -> Self {
    Expr::Unary { op, operand: Box::new(operand) }
  }

  pub fn member(head: Variable, tail: Expr) -> Self {
    Expr::MemberAccess {
      left: Box::new(Expr::Variable(head)),
      right: Box::new(tail),
    }
  }
}

impl Stmt {
  pub const fn is_return(&self) -> bool {
    matches!(self, Stmt::Return(_))
  }
}
