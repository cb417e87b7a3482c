use super::Node;
use crate::idx::NodeRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("ast arena exhausted: capacity of {capacity} nodes reached")]
pub struct ArenaExhausted {
  pub capacity: usize,
}

/// Fixed-capacity node pool for one module. Slot 0 is the root `Sequence`;
/// nodes are only ever appended and are dropped together with the arena.
#[derive(Debug)]
pub struct Ast {
  nodes: Vec<Node>,
  capacity: usize,
  complete: bool,
}

impl Ast {
  pub fn with_capacity(capacity: usize) -> Self {
    assert!(capacity >= 1, "ast arena needs room for its root");
    assert!(capacity <= u32::MAX as usize);
    let mut nodes = Vec::with_capacity(capacity.min(1024));
    nodes.push(Node::Sequence(Vec::new()));
    Ast { nodes, capacity, complete: false }
  }

  pub fn create(&mut self, node: Node) -> Result<NodeRef, ArenaExhausted> {
    if self.nodes.len() >= self.capacity {
      return Err(ArenaExhausted { capacity: self.capacity });
    }
    let idx = NodeRef::new(self.nodes.len() as u32);
    self.nodes.push(node);
    Ok(idx)
  }

  pub const fn root(&self) -> NodeRef {
    NodeRef::root()
  }

  pub fn push_root_statement(&mut self, stmt: NodeRef) {
    debug_assert!(stmt.usize() < self.nodes.len());
    let Node::Sequence(items) = &mut self.nodes[0] else {
      panic!("invalid ast data, root is not a Sequence");
    };
    items.push(stmt);
  }

  /// Top-level statements attached so far.
  pub fn root_statements(&self) -> &[NodeRef] {
    match &self.nodes[0] {
      Node::Sequence(items) => items,
      _ => panic!("invalid ast data, root is not a Sequence"),
    }
  }

  pub fn mark_complete(&mut self) {
    assert!(!self.complete, "ast marked complete twice");
    self.complete = true;
  }

  pub const fn is_complete(&self) -> bool {
    self.complete
  }

  pub fn get(&self, idx: NodeRef) -> Option<&Node> {
    self.nodes.get(idx.usize())
  }

  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  /// True when nothing but the root has been allocated.
  pub fn is_empty(&self) -> bool {
    self.nodes.len() <= 1
  }

  pub const fn capacity(&self) -> usize {
    self.capacity
  }

  /// Pre-order traversal starting at `start`.
  pub fn walk(&self, start: NodeRef) -> Walk<'_> {
    Walk { ast: self, stack: vec![start] }
  }
}

impl std::ops::Index<NodeRef> for Ast {
  type Output = Node;
  fn index(&self, idx: NodeRef) -> &Node {
    &self.nodes[idx.usize()]
  }
}

#[derive(Debug)]
pub struct Walk<'a> {
  ast: &'a Ast,
  stack: Vec<NodeRef>,
}

impl<'a> Iterator for Walk<'a> {
  type Item = (NodeRef, &'a Node);

  fn next(&mut self) -> Option<Self::Item> {
    let idx = self.stack.pop()?;
    let node = self.ast.get(idx)?;
    self.stack.extend(node.children().into_iter().rev());
    Some((idx, node))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ast::{Literal, NodeKind};

  #[test]
  fn root_is_an_empty_sequence() {
    let ast = Ast::with_capacity(4);
    assert_eq!(ast.root(), NodeRef::new(0));
    assert_eq!(ast[ast.root()], Node::Sequence(vec![]));
    assert!(ast.is_empty());
    assert!(!ast.is_complete());
  }

  #[test]
  fn create_hands_out_increasing_handles() {
    let mut ast = Ast::with_capacity(8);
    let a = ast.create(Node::Literal(Literal::Integer(1))).unwrap();
    let b = ast.create(Node::Literal(Literal::Integer(2))).unwrap();
    assert_eq!((a, b), (NodeRef::new(1), NodeRef::new(2)));
    assert_ne!(a, b);
    assert_eq!(ast[b], Node::Literal(Literal::Integer(2)));
  }

  #[test]
  fn exhausting_capacity_fails() {
    let mut ast = Ast::with_capacity(2);
    assert!(ast.create(Node::Comment("one".into())).is_ok());
    assert_eq!(
      ast.create(Node::Comment("two".into())),
      Err(ArenaExhausted { capacity: 2 })
    );
    assert_eq!(ast.len(), 2);
  }

  #[test]
  #[should_panic(expected = "room for its root")]
  fn zero_capacity_is_rejected() {
    Ast::with_capacity(0);
  }

  #[test]
  #[should_panic(expected = "marked complete twice")]
  fn completes_only_once() {
    let mut ast = Ast::with_capacity(1);
    ast.mark_complete();
    ast.mark_complete();
  }

  #[test]
  fn get_is_bounds_checked() {
    let ast = Ast::with_capacity(4);
    assert!(ast.get(NodeRef::new(3)).is_none());
  }

  #[test]
  fn walk_visits_pre_order() {
    let mut ast = Ast::with_capacity(8);
    let one = ast.create(Node::Literal(Literal::Integer(1))).unwrap();
    let two = ast.create(Node::Literal(Literal::Integer(2))).unwrap();
    let add = ast
      .create(Node::BinaryOperation { op: crate::ast::BinaryOp::Add, left: one, right: two })
      .unwrap();
    let stmt = ast.create(Node::Statement { child: add, is_return: false }).unwrap();
    ast.push_root_statement(stmt);
    let kinds: Vec<NodeKind> = ast.walk(ast.root()).map(|(_, n)| n.kind()).collect();
    assert_eq!(
      kinds,
      vec![
        NodeKind::Sequence,
        NodeKind::Statement,
        NodeKind::BinaryOperation,
        NodeKind::Literal,
        NodeKind::Literal,
      ]
    );
  }
}
