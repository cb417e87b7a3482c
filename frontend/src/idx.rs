/// Handle to a node inside one `Ast` arena. Handles are issued in slot order
/// and a slot is never rewritten, so a handle always names the same node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef(u32);

impl NodeRef {
  pub const fn new(idx: u32) -> Self {
    Self(idx)
  }

  pub const fn root() -> Self {
    Self(0)
  }

  pub const fn is_root(&self) -> bool {
    self.0 == 0
  }

  pub const fn usize(&self) -> usize {
    self.0 as usize
  }
}

impl std::fmt::Debug for NodeRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "idx::NodeRef({})", self.0)
  }
}

impl std::fmt::Display for NodeRef {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "#{}", self.0)
  }
}
