use bilge::prelude::*;

/// Line and column of a token, packed into 32 bits. Both are 1-based;
/// out-of-range values saturate at the field maximum.
#[bitsize(32)]
#[derive(FromBits, DebugBits, Clone, Copy, PartialEq, Eq)]
pub struct SrcLoc {
  pub col: u12,
  pub line: u20,
}

impl SrcLoc {
  pub fn at(line: u32, col: u32) -> Self {
    let line = u20::new(line.min(<u20 as Number>::MAX.value()));
    let col = u12::new(col.min(u32::from(<u12 as Number>::MAX.value())) as u16);
    SrcLoc::new(col, line)
  }

  pub fn line_no(&self) -> u32 {
    self.line().value()
  }

  pub fn col_no(&self) -> u32 {
    u32::from(self.col().value())
  }
}

impl Default for SrcLoc {
  fn default() -> Self {
    SrcLoc::at(1, 1)
  }
}
