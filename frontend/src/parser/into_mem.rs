use super::parse_nodes::{self as parse, Stmt, Target};
use crate::internal::*;

/// Copies a finished parse node into the arena, children before parents,
/// returning the handle of the node that represents it.
pub trait IntoAst {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted>;
}

impl IntoAst for parse::Expr {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    match self {
      parse::Expr::Literal(lit) => ast.create(Node::Literal(lit)),
      parse::Expr::Unary { op, operand } => {
        let child = operand.into_ast(ast)?;
        ast.create(Node::UnaryOperation { op, child })
      }
      parse::Expr::Binary { op, left, right } => {
        let left = left.into_ast(ast)?;
        let right = right.into_ast(ast)?;
        ast.create(Node::BinaryOperation { op, left, right })
      }
      parse::Expr::Variable(var) => var.into_ast(ast),
      parse::Expr::MemberAccess { left, right } => {
        let left = left.into_ast(ast)?;
        let right = right.into_ast(ast)?;
        ast.create(Node::MemberAccess { left, right })
      }
      parse::Expr::Call(call) => call.into_ast(ast),
    }
  }
}

impl<N: IntoAst> IntoAst for Box<N> {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    (*self).into_ast(ast)
  }
}

impl IntoAst for parse::Variable {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    let array_index = self.index.map(|index| index.into_ast(ast)).transpose()?;
    ast.create(Node::Variable { name: self.name, array_index })
  }
}

impl IntoAst for parse::Call {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    let args = all_into_ast(self.args, ast)?;
    ast.create(Node::Call { name: self.name, args })
  }
}

impl IntoAst for parse::VarDef {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    ast.create(Node::VariableDefinition {
      name: self.name,
      ty: self.ty,
      array_size: self.array_size,
    })
  }
}

impl IntoAst for Target {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    match self {
      Target::Definition(def) => def.into_ast(ast),
      Target::Member(expr) => expr.into_ast(ast),
      Target::Variable(var) => var.into_ast(ast),
    }
  }
}

/// The statement's own node, without the `Statement` wrapper. A `return`
/// is represented by its value; the wrapper records that it returns.
impl IntoAst for Stmt {
  fn into_ast(self, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
    match self {
      Stmt::Comment(text) => ast.create(Node::Comment(text)),
      Stmt::Import(path) => ast.create(Node::Import(path)),
      Stmt::TypeDecl { name, members } => {
        let mut refs = Vec::with_capacity(members.len());
        for member in members {
          let def = member.into_ast(ast)?;
          refs.push(ast.create(Node::TypeMember(def))?);
        }
        ast.create(Node::TypeDeclaration { name, members: refs })
      }
      Stmt::Assert(condition) => {
        let condition = condition.into_ast(ast)?;
        ast.create(Node::Assert(condition))
      }
      Stmt::Call(call) => call.into_ast(ast),
      Stmt::Function(function) => {
        let params = all_into_ast(function.params, ast)?;
        let body = function.body.map(|body| block_into_ast(body, ast)).transpose()?;
        ast.create(Node::Function {
          name: function.name,
          return_type: function.return_type,
          params,
          body,
        })
      }
      Stmt::If { condition, if_body, else_body } => {
        let condition = condition.into_ast(ast)?;
        let if_body = optional_block(if_body, ast)?;
        let else_body = optional_block(else_body, ast)?;
        ast.create(Node::IfStatement { condition, if_body, else_body })
      }
      Stmt::For { init, condition, update, body } => {
        let init = init.into_ast(ast)?;
        let condition = condition.into_ast(ast)?;
        let update = update.into_ast(ast)?;
        let body = optional_block(body, ast)?;
        ast.create(Node::ForStatement { init, condition, update, body })
      }
      Stmt::Assign { target, value } => {
        let left = target.into_ast(ast)?;
        let right = value.into_ast(ast)?;
        ast.create(Node::Assignment { left, right })
      }
      Stmt::VarDef(def) => def.into_ast(ast),
      Stmt::Return(value) => value.into_ast(ast),
    }
  }
}

/// Materializes a statement together with its `Statement` wrapper.
pub fn statement_into_ast(stmt: Stmt, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
  let is_return = stmt.is_return();
  let child = stmt.into_ast(ast)?;
  ast.create(Node::Statement { child, is_return })
}

fn all_into_ast<N: IntoAst>(nodes: Vec<N>, ast: &mut Ast) -> Result<Vec<NodeRef>, ArenaExhausted> {
  nodes.into_iter().map(|node| node.into_ast(ast)).collect()
}

fn block_into_ast(stmts: Vec<Stmt>, ast: &mut Ast) -> Result<NodeRef, ArenaExhausted> {
  let items = stmts
    .into_iter()
    .map(|stmt| statement_into_ast(stmt, ast))
    .collect::<Result<Vec<_>, _>>()?;
  ast.create(Node::Sequence(items))
}

// empty `if`, `else` and `for` bodies are left out of the tree
fn optional_block(stmts: Vec<Stmt>, ast: &mut Ast) -> Result<Option<NodeRef>, ArenaExhausted> {
  if stmts.is_empty() {
    Ok(None)
  } else {
    block_into_ast(stmts, ast).map(Some)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parser::Grammar;
  use crate::test_util::*;
  use pretty_assertions::assert_eq;

  fn materialize(src: &str) -> (Ast, NodeRef) {
    let tokens = tokens_of(src);
    let (stmt, _) = Grammar::new(&tokens).parse_statement(0).unwrap();
    let mut ast = Ast::with_capacity(64);
    let idx = statement_into_ast(stmt, &mut ast).unwrap();
    (ast, idx)
  }

  #[test]
  fn children_are_created_before_parents() {
    let (ast, idx) = materialize("int a = 1 + 1");
    let kinds: Vec<NodeKind> = (1..ast.len())
      .map(|n| ast[NodeRef::new(n as u32)].kind())
      .collect();
    assert_eq!(
      kinds,
      vec![
        NodeKind::VariableDefinition,
        NodeKind::Literal,
        NodeKind::Literal,
        NodeKind::BinaryOperation,
        NodeKind::Assignment,
        NodeKind::Statement,
      ]
    );
    assert_eq!(idx, NodeRef::new(6));
  }

  #[test]
  fn return_marks_its_wrapper() {
    let (ast, idx) = materialize("return x");
    assert_eq!(ast.dump(idx), "(Statement return (Variable x))");
  }

  #[test]
  fn empty_function_body_is_still_a_sequence() {
    let (ast, idx) = materialize("fun f() { }");
    assert_eq!(ast.dump(idx), "(Statement (Function f void () (Sequence)))");
  }

  #[test]
  fn type_members_wrap_definitions() {
    let (ast, idx) = materialize("type P {\n  int x\n  float y\n}");
    assert_eq!(
      ast.dump(idx),
      "(Statement (TypeDeclaration P (TypeMember (VariableDefinition int x)) (TypeMember (VariableDefinition float y))))"
    );
  }

  #[test]
  fn exhaustion_mid_statement_is_reported() {
    let tokens = tokens_of("f(1, 2, 3)");
    let (stmt, _) = Grammar::new(&tokens).parse_statement(0).unwrap();
    let mut ast = Ast::with_capacity(3);
    assert_eq!(
      statement_into_ast(stmt, &mut ast),
      Err(ArenaExhausted { capacity: 3 })
    );
  }
}
