use std::fmt::Write;

use super::{Ast, Literal, Node};
use crate::idx::NodeRef;

impl Ast {
  /// Renders the subtree at `idx` as a one-line S-expression, e.g.
  /// `(Statement (Assignment (Variable a) (Literal 5)))`. Absent optional
  /// children of `if`/`for` print as `_`.
  pub fn dump(&self, idx: NodeRef) -> String {
    let mut out = String::new();
    self.dump_into(idx, &mut out);
    out
  }

  fn dump_into(&self, idx: NodeRef, out: &mut String) {
    let Some(node) = self.get(idx) else {
      out.push_str("<dangling>");
      return;
    };
    out.push('(');
    out.push_str(&node.kind().to_string());
    match node {
      Node::Sequence(items) => self.dump_list(items, out),
      Node::Statement { child, is_return } => {
        if *is_return {
          out.push_str(" return");
        }
        self.dump_child(*child, out);
      }
      Node::Literal(lit) => {
        let _ = match lit {
          Literal::Integer(int) => write!(out, " {int}"),
          Literal::Float(float) => write!(out, " {float:?}"),
          Literal::Bool(b) => write!(out, " {b}"),
          Literal::String(s) => write!(out, " {s:?}"),
        };
      }
      Node::UnaryOperation { op, child } => {
        let _ = write!(out, " {op}");
        self.dump_child(*child, out);
      }
      Node::BinaryOperation { op, left, right } => {
        let _ = write!(out, " {op}");
        self.dump_child(*left, out);
        self.dump_child(*right, out);
      }
      Node::Assignment { left, right } | Node::MemberAccess { left, right } => {
        self.dump_child(*left, out);
        self.dump_child(*right, out);
      }
      Node::VariableDefinition { name, ty, array_size } => {
        let _ = match array_size {
          0 => write!(out, " {ty} {name}"),
          n => write!(out, " {ty}[{n}] {name}"),
        };
      }
      Node::Variable { name, array_index } => {
        let _ = write!(out, " {name}");
        if let Some(index) = array_index {
          self.dump_child(*index, out);
        }
      }
      Node::Call { name, args } => {
        let _ = write!(out, " {name}");
        self.dump_list(args, out);
      }
      Node::Function { name, return_type, params, body } => {
        let _ = write!(out, " {name} {return_type} (");
        for (i, param) in params.iter().enumerate() {
          if i > 0 {
            out.push(' ');
          }
          self.dump_into(*param, out);
        }
        out.push(')');
        if let Some(body) = body {
          self.dump_child(*body, out);
        }
      }
      Node::IfStatement { condition, if_body, else_body } => {
        self.dump_child(*condition, out);
        self.dump_opt(*if_body, out);
        self.dump_opt(*else_body, out);
      }
      Node::ForStatement { init, condition, update, body } => {
        self.dump_child(*init, out);
        self.dump_child(*condition, out);
        self.dump_child(*update, out);
        self.dump_opt(*body, out);
      }
      Node::TypeDeclaration { name, members } => {
        let _ = write!(out, " {name}");
        self.dump_list(members, out);
      }
      Node::TypeMember(inner) | Node::Assert(inner) => self.dump_child(*inner, out),
      Node::Import(path) | Node::Comment(path) => {
        let _ = write!(out, " {path:?}");
      }
    }
    out.push(')');
  }

  fn dump_child(&self, idx: NodeRef, out: &mut String) {
    out.push(' ');
    self.dump_into(idx, out);
  }

  fn dump_opt(&self, idx: Option<NodeRef>, out: &mut String) {
    match idx {
      Some(idx) => self.dump_child(idx, out),
      None => out.push_str(" _"),
    }
  }

  fn dump_list(&self, items: &[NodeRef], out: &mut String) {
    for item in items {
      self.dump_child(*item, out);
    }
  }
}
