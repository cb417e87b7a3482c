use std::cell::Cell;

use crate::internal::{TokenKind as T, *};
use parse_nodes::Stmt;

mod expr;
mod into_mem;
pub mod parse_nodes;
mod stmts;

/// Drives a whole-module parse: drains the lexer into the module's token
/// list, then parses top-level statements one at a time from a cursor,
/// materializing each into the module's `Ast` once it has fully parsed.
pub struct Parser<'a> {
  module: &'a mut Module,
  reporter: &'a mut dyn Reporter,
  tok_pos: usize,
  /// furthest token any rule has looked at so far
  furthest: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
  #[error("{line}:{col}: unexpected {}", describe(.kind, .text))]
  UnexpectedToken {
    kind: TokenKind,
    text: String,
    line: u32,
    col: u32,
    context: String,
  },
  #[error(transparent)]
  ArenaExhausted(#[from] ArenaExhausted),
}

/// Grammar rules as pure functions over a token slice. Each rule takes the
/// position to start at and returns the parsed node with the position just
/// past it, or `None` when its construct is not there. A failed rule never
/// moves anyone's cursor, so callers can simply try the next alternative.
/// The only state is the furthest position any rule has looked at, which
/// is where a failed parse is reported.
#[derive(Debug, Clone)]
pub struct Grammar<'t> {
  tokens: &'t [Token],
  furthest: Cell<usize>,
}

impl<'t> Grammar<'t> {
  pub const fn new(tokens: &'t [Token]) -> Self {
    Grammar { tokens, furthest: Cell::new(0) }
  }

  pub fn furthest(&self) -> usize {
    self.furthest.get()
  }

  fn token(&self, pos: usize) -> Option<&'t Token> {
    self.reach(pos);
    self.tokens.get(pos)
  }

  fn kind(&self, pos: usize) -> TokenKind {
    self.reach(pos);
    self.tokens.get(pos).map_or(T::Eof, |t| t.kind)
  }

  fn reach(&self, pos: usize) {
    if pos > self.furthest.get() {
      self.furthest.set(pos);
    }
  }

  fn is(&self, pos: usize, kind: TokenKind) -> bool {
    self.kind(pos) == kind
  }

  fn expect(&self, pos: usize, kind: TokenKind) -> Option<usize> {
    self.is(pos, kind).then_some(pos + 1)
  }

  fn skip_newlines(&self, mut pos: usize) -> usize {
    while self.is(pos, T::Newline) {
      pos += 1;
    }
    pos
  }
}

impl<'a> Parser<'a> {
  pub fn new(module: &'a mut Module, reporter: &'a mut dyn Reporter) -> Self {
    Parser { module, reporter, tok_pos: 0, furthest: 0 }
  }

  /// Lexes and parses the whole module. On success the module's AST is
  /// marked complete; on failure it is left incomplete and the error has
  /// also been reported.
  #[instrument(skip_all, fields(module = %self.module.name))]
  pub fn run<P: CodeProvider>(mut self, lexer: Lexer<P>) -> Result<(), ParseError> {
    self.module.tokens = lexer.lex(self.reporter);
    debug!(tokens = self.module.tokens.len(), "lexed");
    self.parse_program()
  }

  fn parse_program(&mut self) -> Result<(), ParseError> {
    loop {
      self.tok_pos = Grammar::new(&self.module.tokens).skip_newlines(self.tok_pos);
      if self.at_eof() {
        break;
      }
      let start = self.tok_pos;
      let Some(stmt) = self.try_statement() else {
        return Err(self.unexpected_token());
      };
      trace!(?stmt, "statement");
      let idx = match into_mem::statement_into_ast(stmt, &mut self.module.ast) {
        Ok(idx) => idx,
        Err(err) => {
          let loc = self.loc_at(start);
          self.reporter.report(Diagnostic::error(loc.line_no(), loc.col_no(), 1, err.to_string()));
          error!(%err, "parse failed");
          return Err(err.into());
        }
      };
      self.module.ast.push_root_statement(idx);
    }
    self.module.ast.mark_complete();
    debug!(nodes = self.module.ast.len(), "parsed");
    Ok(())
  }

  /// Parses one statement at the cursor. The cursor only moves on success.
  fn try_statement(&mut self) -> Option<Stmt> {
    let grammar = Grammar::new(&self.module.tokens);
    let parsed = grammar.parse_statement(self.tok_pos);
    self.furthest = self.furthest.max(grammar.furthest());
    let (stmt, end) = parsed?;
    self.tok_pos = end;
    Some(stmt)
  }

  pub const fn cursor(&self) -> usize {
    self.tok_pos
  }

  fn at_eof(&self) -> bool {
    self
      .module
      .tokens
      .get(self.tok_pos)
      .is_none_or(|t| t.is(T::Eof))
  }

  /// Reports the furthest token reached rather than the statement start: a
  /// bad body can let a shorter form succeed (`fun f()` as a declaration),
  /// leaving the real culprit behind the cursor's next failure.
  fn unexpected_token(&mut self) -> ParseError {
    let tokens = &self.module.tokens;
    let pos = self.furthest.max(self.tok_pos).min(tokens.len().saturating_sub(1));
    let (kind, text) = match tokens.get(pos) {
      Some(token) => (token.kind, token.text.clone()),
      None => (T::Eof, String::new()),
    };
    let loc = self.loc_at(pos);
    let from = pos.saturating_sub(3);
    let to = (pos + 4).min(tokens.len());
    let context = render_tokens(&tokens[from..to]).replace('\n', " ").trim().to_string();
    let width = tokens.get(pos).map_or(1, Token::width);
    self.reporter.report(Diagnostic::error(
      loc.line_no(),
      loc.col_no(),
      width,
      format!("unexpected {} near `{context}`", describe(&kind, &text)),
    ));
    error!(%kind, %text, %context, "parse failed");
    ParseError::UnexpectedToken {
      kind,
      text,
      line: loc.line_no(),
      col: loc.col_no(),
      context,
    }
  }

  fn loc_at(&self, pos: usize) -> SrcLoc {
    self.module.tokens.get(pos).map_or_else(SrcLoc::default, |t| t.loc)
  }
}

/// Names a token for an error message, quoting its text unless the kind
/// already spells it.
fn describe(kind: &TokenKind, text: &str) -> String {
  if text.is_empty() || kind.lexeme().is_some() {
    kind.to_string()
  } else {
    format!("{kind} `{text}`")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_util::*;
  use pretty_assertions::assert_eq;

  fn module_with_tokens(src: &str) -> Module {
    let mut module = Module::new("test", ParseOptions::default());
    module.tokens = tokens_of(src);
    module
  }

  #[test]
  fn cursor_is_unchanged_after_failed_statement() {
    let mut module = module_with_tokens("x + 1\nfoo(1)");
    let mut diags: Vec<Diagnostic> = Vec::new();
    let mut parser = Parser::new(&mut module, &mut diags);
    assert_eq!(parser.cursor(), 0);
    assert!(parser.try_statement().is_none());
    assert_eq!(parser.cursor(), 0);
  }

  #[test]
  fn cursor_advances_past_successful_statement() {
    let mut module = module_with_tokens("foo(1)\nbar()");
    let mut diags: Vec<Diagnostic> = Vec::new();
    let mut parser = Parser::new(&mut module, &mut diags);
    assert!(parser.try_statement().is_some());
    assert_eq!(parser.cursor(), 4);
    assert!(parser.try_statement().is_some());
    assert_eq!(parser.cursor(), 8);
  }

  #[test]
  fn every_rule_leaves_position_alone_on_failure() {
    let tokens = tokens_of("if x { fun");
    let grammar = Grammar::new(&tokens);
    let pos = 0;
    assert_eq!(grammar.parse_statement(pos), None);
    assert_eq!(grammar.parse_function(pos), None);
    assert_eq!(grammar.parse_assignment(pos), None);
    assert_eq!(grammar.parse_var_def(pos), None);
    assert_eq!(grammar.parse_scope(pos + 2), None);
    // the slice is untouched, so the same position parses the same way again
    assert_eq!(grammar.parse_expr(1).map(|(_, end)| end), Some(2));
  }

  #[test]
  fn fatal_failure_reports_offending_token_with_context() {
    let mut module = Module::new("bad", ParseOptions::default());
    let mut diags: Vec<Diagnostic> = Vec::new();
    let lexer = Lexer::new(StrProvider::new("a = 1\nb = ) 2\n"));
    let err = Parser::new(&mut module, &mut diags).run(lexer).unwrap_err();
    assert_eq!(
      err,
      ParseError::UnexpectedToken {
        kind: T::RParen,
        text: ")".into(),
        line: 2,
        col: 5,
        context: "b =) 2".into(),
      }
    );
    assert_eq!(err.to_string(), "2:5: unexpected `)`");
    assert!(!module.is_complete());
    assert!(module.completed_ast().is_none());
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Error);
    assert_eq!(diags[0].to_string(), "2:5: error: unexpected `)` near `b =) 2`");
  }

  #[test]
  fn failure_inside_a_body_points_at_the_bad_token() {
    let mut module = Module::new("bad", ParseOptions::default());
    let mut diags: Vec<Diagnostic> = Vec::new();
    let lexer = Lexer::new(StrProvider::new("fun f() {\n  x = 1\n  y = )\n}\n"));
    let err = Parser::new(&mut module, &mut diags).run(lexer).unwrap_err();
    assert!(matches!(
      err,
      ParseError::UnexpectedToken { kind: T::RParen, line: 3, col: 7, .. }
    ));
    assert_eq!(diags[0].to_string(), "3:7: error: unexpected `)` near `y =) }`");
  }

  #[test]
  fn unknown_statement_start_names_the_identifier() {
    let mut diags: Vec<Diagnostic> = Vec::new();
    let (_, result) = parse_str("bad", "x + 1", ParseOptions::default(), &mut diags);
    let err = result.unwrap_err();
    // `x` parses as a variable target before `+` stops it
    assert_eq!(err.to_string(), "1:3: unexpected `+`");
    assert_eq!(diags[0].msg, "unexpected `+` near `x + 1`");
  }

  #[test]
  fn grammar_tracks_the_furthest_token_looked_at() {
    let tokens = tokens_of("f(1, 2 3)");
    let grammar = Grammar::new(&tokens);
    assert_eq!(grammar.parse_call(0), None);
    assert_eq!(grammar.furthest(), 5);
    assert_eq!(describe(&tokens[5].kind, &tokens[5].text), "integer literal `3`");
  }

  #[test]
  fn invalid_token_stops_the_parse() {
    let mut module = Module::new("bad", ParseOptions::default());
    let mut diags: Vec<Diagnostic> = Vec::new();
    let lexer = Lexer::new(StrProvider::new("x = 1 ? 2"));
    let err = Parser::new(&mut module, &mut diags).run(lexer).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedToken { kind: T::Invalid, .. }));
    // one warning from the lexer, one error from the parser
    let severities: Vec<Severity> = diags.iter().map(|d| d.severity).collect();
    assert_eq!(severities, vec![Severity::Warning, Severity::Error]);
  }

  #[test]
  fn empty_source_is_complete() {
    let mut module = Module::new("empty", ParseOptions::default());
    let mut diags: Vec<Diagnostic> = Vec::new();
    let lexer = Lexer::new(StrProvider::new("\n\n"));
    Parser::new(&mut module, &mut diags).run(lexer).unwrap();
    assert!(module.is_complete());
    assert_eq!(module.ast.dump(module.ast.root()), "(Sequence)");
  }
}
