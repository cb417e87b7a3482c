pub mod ast;
pub mod diag;
pub mod idx;
pub mod lexer;
pub mod module;
pub mod parser;
pub mod provider;
pub mod src_loc;
pub mod token;

#[cfg(test)]
mod test_util;

pub use module::{Module, ParseOptions, parse_str};

pub mod internal {
  pub use crate::ast::*;
  pub use crate::diag::*;
  pub use crate::idx::NodeRef;
  pub use crate::lexer::*;
  pub use crate::module::*;
  pub use crate::parser::*;
  pub use crate::provider::*;
  pub use crate::src_loc::*;
  pub use crate::token::*;
  pub use bilge::prelude::*;
  pub use tracing::{debug, error, instrument, trace, warn};
}
