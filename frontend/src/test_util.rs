use std::sync::Once;

use crate::internal::*;
use tracing_subscriber::fmt::{self, format::FmtSpan};
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

pub fn configure_test_tracing() {
  INIT.call_once(|| {
    let subscriber = fmt::Subscriber::builder()
      .with_env_filter(EnvFilter::from_default_env())
      .with_test_writer()
      .with_span_events(FmtSpan::ACTIVE)
      .finish();
    tracing::subscriber::set_global_default(subscriber)
      .expect("setting default tracing subscriber failed");
  });
}

/// Lexes `src`, failing the test on any lexer diagnostic.
pub fn tokens_of(src: &str) -> Vec<Token> {
  configure_test_tracing();
  let mut diags: Vec<Diagnostic> = Vec::new();
  let tokens = Lexer::new(StrProvider::new(src)).lex(&mut diags);
  assert!(diags.is_empty(), "unexpected diagnostics for {src:?}: {diags:?}");
  tokens
}

/// Parses `src` as a module and dumps its root, failing on any error.
pub fn dump_module(src: &str) -> String {
  configure_test_tracing();
  let mut diags: Vec<Diagnostic> = Vec::new();
  let (module, result) = parse_str("test", src, ParseOptions::default(), &mut diags);
  if let Err(err) = result {
    panic!("{src:?} failed to parse: {err}");
  }
  assert!(diags.is_empty(), "unexpected diagnostics for {src:?}: {diags:?}");
  module.ast.dump(module.ast.root())
}
