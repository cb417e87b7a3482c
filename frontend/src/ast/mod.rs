mod data;
mod dump;
pub use data::{ArenaExhausted, Ast, Walk};

use crate::idx::NodeRef;

/// One arena slot. The variant is the node's kind and carries exactly that
/// kind's payload; children are referenced by handle.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
  Sequence(Vec<NodeRef>),
  Statement {
    child: NodeRef,
    is_return: bool,
  },
  Literal(Literal),
  UnaryOperation {
    op: UnaryOp,
    child: NodeRef,
  },
  BinaryOperation {
    op: BinaryOp,
    left: NodeRef,
    right: NodeRef,
  },
  Assignment {
    left: NodeRef,
    right: NodeRef,
  },
  VariableDefinition {
    name: String,
    ty: TypeName,
    /// 0 for a scalar
    array_size: u32,
  },
  Variable {
    name: String,
    array_index: Option<NodeRef>,
  },
  MemberAccess {
    left: NodeRef,
    right: NodeRef,
  },
  Call {
    name: String,
    args: Vec<NodeRef>,
  },
  Function {
    name: String,
    return_type: TypeName,
    params: Vec<NodeRef>,
    /// `None` for a declaration without a body
    body: Option<NodeRef>,
  },
  IfStatement {
    condition: NodeRef,
    if_body: Option<NodeRef>,
    else_body: Option<NodeRef>,
  },
  ForStatement {
    init: NodeRef,
    condition: NodeRef,
    update: NodeRef,
    body: Option<NodeRef>,
  },
  TypeDeclaration {
    name: String,
    members: Vec<NodeRef>,
  },
  TypeMember(NodeRef),
  Import(String),
  Assert(NodeRef),
  Comment(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
  Sequence,
  Statement,
  Literal,
  UnaryOperation,
  BinaryOperation,
  Assignment,
  VariableDefinition,
  Variable,
  MemberAccess,
  Call,
  Function,
  IfStatement,
  ForStatement,
  TypeDeclaration,
  TypeMember,
  Import,
  Assert,
  Comment,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
  Integer(i64),
  Float(f64),
  Bool(bool),
  String(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
  Not,
  Negate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
  Add,
  Sub,
  Mul,
  Div,
  Eq,
  NotEq,
  Lt,
  LtEq,
  Gt,
  GtEq,
  And,
  Or,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeName {
  Int,
  Float,
  Bool,
  String,
  Void,
  Named(String),
}

impl Node {
  pub const fn kind(&self) -> NodeKind {
    match self {
      Node::Sequence(_) => NodeKind::Sequence,
      Node::Statement { .. } => NodeKind::Statement,
      Node::Literal(_) => NodeKind::Literal,
      Node::UnaryOperation { .. } => NodeKind::UnaryOperation,
      Node::BinaryOperation { .. } => NodeKind::BinaryOperation,
      Node::Assignment { .. } => NodeKind::Assignment,
      Node::VariableDefinition { .. } => NodeKind::VariableDefinition,
      Node::Variable { .. } => NodeKind::Variable,
      Node::MemberAccess { .. } => NodeKind::MemberAccess,
      Node::Call { .. } => NodeKind::Call,
      Node::Function { .. } => NodeKind::Function,
      Node::IfStatement { .. } => NodeKind::IfStatement,
      Node::ForStatement { .. } => NodeKind::ForStatement,
      Node::TypeDeclaration { .. } => NodeKind::TypeDeclaration,
      Node::TypeMember(_) => NodeKind::TypeMember,
      Node::Import(_) => NodeKind::Import,
      Node::Assert(_) => NodeKind::Assert,
      Node::Comment(_) => NodeKind::Comment,
    }
  }

  /// Direct children in source order. Absent optional children are skipped.
  pub fn children(&self) -> Vec<NodeRef> {
    match self {
      Node::Sequence(items) => items.clone(),
      Node::Call { args, .. } => args.clone(),
      Node::TypeDeclaration { members, .. } => members.clone(),
      Node::Statement { child, .. }
      | Node::UnaryOperation { child, .. }
      | Node::TypeMember(child)
      | Node::Assert(child) => vec![*child],
      Node::BinaryOperation { left, right, .. }
      | Node::Assignment { left, right }
      | Node::MemberAccess { left, right } => vec![*left, *right],
      Node::Variable { array_index, .. } => array_index.iter().copied().collect(),
      Node::Function { params, body, .. } => params.iter().copied().chain(*body).collect(),
      Node::IfStatement { condition, if_body, else_body } => {
        std::iter::once(*condition).chain(*if_body).chain(*else_body).collect()
      }
      Node::ForStatement { init, condition, update, body } => {
        [*init, *condition, *update].into_iter().chain(*body).collect()
      }
      Node::Literal(_) | Node::VariableDefinition { .. } | Node::Import(_) | Node::Comment(_) => {
        vec![]
      }
    }
  }
}

impl std::fmt::Display for NodeKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    std::fmt::Debug::fmt(self, f)
  }
}

impl std::fmt::Display for TypeName {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      TypeName::Int => f.write_str("int"),
      TypeName::Float => f.write_str("float"),
      TypeName::Bool => f.write_str("bool"),
      TypeName::String => f.write_str("string"),
      TypeName::Void => f.write_str("void"),
      TypeName::Named(name) => f.write_str(name),
    }
  }
}

impl std::fmt::Display for BinaryOp {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    std::fmt::Debug::fmt(self, f)
  }
}

impl std::fmt::Display for UnaryOp {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    std::fmt::Debug::fmt(self, f)
  }
}
