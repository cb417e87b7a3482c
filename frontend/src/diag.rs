use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Warning,
  Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
  pub severity: Severity,
  pub line: u32,
  pub col: u32,
  pub width: u32,
  pub msg: String,
}

impl Diagnostic {
  pub fn warning(line: u32, col: u32, width: u32, msg: impl Into<String>) -> Self {
    Diagnostic { severity: Severity::Warning, line, col, width, msg: msg.into() }
  }

  pub fn error(line: u32, col: u32, width: u32, msg: impl Into<String>) -> Self {
    Diagnostic { severity: Severity::Error, line, col, width, msg: msg.into() }
  }
}

impl std::fmt::Display for Diagnostic {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let severity = match self.severity {
      Severity::Warning => "warning",
      Severity::Error => "error",
    };
    write!(f, "{}:{}: {severity}: {}", self.line, self.col, self.msg)
  }
}

/// Sink for diagnostics raised while lexing and parsing.
pub trait Reporter {
  fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
  fn report(&mut self, diagnostic: Diagnostic) {
    self.push(diagnostic);
  }
}

/// Forwards diagnostics to the installed `tracing` subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
  fn report(&mut self, diagnostic: Diagnostic) {
    match diagnostic.severity {
      Severity::Warning => warn!(line = diagnostic.line, col = diagnostic.col, "{}", diagnostic.msg),
      Severity::Error => error!(line = diagnostic.line, col = diagnostic.col, "{}", diagnostic.msg),
    }
  }
}
