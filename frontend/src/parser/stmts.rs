use super::Grammar;
use super::expr::{Parsed, strip_quotes};
use super::parse_nodes::*;
use crate::internal::{TokenKind as T, *};

impl Grammar<'_> {
  /// Tries every statement form in a fixed order; the first that parses wins.
  /// Assignment comes before the bare definition because `int x = 1` starts
  /// like one.
  #[instrument(level = "trace", skip(self))]
  pub fn parse_statement(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.skip_newlines(pos);
    self
      .parse_comment(pos)
      .or_else(|| self.parse_import(pos))
      .or_else(|| self.parse_type_decl(pos))
      .or_else(|| self.parse_assert(pos))
      .or_else(|| self.parse_call(pos).map(|(call, end)| (Stmt::Call(call), end)))
      .or_else(|| self.parse_function(pos))
      .or_else(|| self.parse_if(pos))
      .or_else(|| self.parse_for(pos))
      .or_else(|| self.parse_assignment(pos))
      .or_else(|| self.parse_var_def(pos).map(|(def, end)| (Stmt::VarDef(def), end)))
      .or_else(|| self.parse_return(pos))
  }

  fn parse_comment(&self, pos: usize) -> Parsed<Stmt> {
    let token = self.token(pos).filter(|t| t.is(T::Comment))?;
    let text = token.text.trim_start_matches('#').trim();
    Some((Stmt::Comment(text.to_string()), pos + 1))
  }

  fn parse_import(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::Import)?;
    let path = self.token(pos).filter(|t| t.is(T::StringLit))?;
    trace!(path = %path.text, "import");
    Some((Stmt::Import(strip_quotes(&path.text).to_string()), pos + 1))
  }

  /// `type Name { member (NEWLINE member)* }`, at least one member.
  fn parse_type_decl(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::Type)?;
    let (name, pos) = self.parse_ident(pos)?;
    let pos = self.expect(pos, T::LBrace)?;
    let (first, mut pos) = self.parse_var_def(self.skip_newlines(pos))?;
    let mut members = vec![first];
    while self.is(pos, T::Newline) {
      let Some((member, next)) = self.parse_var_def(self.skip_newlines(pos)) else {
        break;
      };
      members.push(member);
      pos = next;
    }
    let end = self.expect(self.skip_newlines(pos), T::RBrace)?;
    Some((Stmt::TypeDecl { name, members }, end))
  }

  fn parse_assert(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::Assert)?;
    let (condition, end) = self.parse_expr(pos)?;
    Some((Stmt::Assert(condition), end))
  }

  /// `extern? fun name(params) type? scope?`. Without a scope the function
  /// is a declaration only; without a type it returns `void`.
  #[instrument(level = "trace", skip(self))]
  pub fn parse_function(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::Extern).unwrap_or(pos);
    let pos = self.expect(pos, T::Fun)?;
    let (name, pos) = self.parse_ident(pos)?;
    let (params, pos) = self.parse_params(pos)?;
    let (return_type, pos) = self.parse_type(pos).unwrap_or((TypeName::Void, pos));
    let (body, end) = match self.parse_scope(pos) {
      Some((body, end)) => (Some(body), end),
      None => (None, pos),
    };
    let function = Function { name, return_type, params, body };
    Some((Stmt::Function(function), end))
  }

  fn parse_params(&self, pos: usize) -> Parsed<Vec<VarDef>> {
    let mut pos = self.expect(pos, T::LParen)?;
    let mut params = Vec::new();
    if let Some(end) = self.expect(pos, T::RParen) {
      return Some((params, end));
    }
    loop {
      let (param, next) = self.parse_var_def(pos)?;
      params.push(param);
      match self.kind(next) {
        T::Comma => pos = next + 1,
        T::RParen => return Some((params, next + 1)),
        _ => return None,
      }
    }
  }

  /// `if cond { } (else { })?`. The `else` may sit on a later line.
  fn parse_if(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::If)?;
    let (condition, pos) = self.parse_expr(pos)?;
    let (if_body, pos) = self.parse_scope(pos)?;
    let (else_body, end) = self
      .expect(self.skip_newlines(pos), T::Else)
      .and_then(|p| self.parse_scope(p))
      .unwrap_or((Vec::new(), pos));
    Some((Stmt::If { condition, if_body, else_body }, end))
  }

  /// `for init; cond; update { }` with no parentheses around the header.
  fn parse_for(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::For)?;
    let (init, pos) = self.parse_simple_statement(pos)?;
    let pos = self.expect(pos, T::Semicolon)?;
    let (condition, pos) = self.parse_expr(pos)?;
    let pos = self.expect(pos, T::Semicolon)?;
    let (update, pos) = self.parse_simple_statement(pos)?;
    let (body, end) = self.parse_scope(pos)?;
    let stmt = Stmt::For {
      init: Box::new(init),
      condition,
      update: Box::new(update),
      body,
    };
    Some((stmt, end))
  }

  fn parse_simple_statement(&self, pos: usize) -> Parsed<Stmt> {
    self
      .parse_call(pos)
      .map(|(call, end)| (Stmt::Call(call), end))
      .or_else(|| self.parse_assignment(pos))
      .or_else(|| self.parse_var_def(pos).map(|(def, end)| (Stmt::VarDef(def), end)))
  }

  /// `target = expr`, where the target is tried as a definition, then a
  /// member chain, then a plain or indexed variable. The variable-led
  /// targets share one parse of the leading variable.
  pub fn parse_assignment(&self, pos: usize) -> Parsed<Stmt> {
    let assign = |target: Target, pos: usize| {
      let pos = self.expect(pos, T::Assign)?;
      let (value, end) = self.parse_expr(pos)?;
      Some((Stmt::Assign { target, value }, end))
    };
    let definition = self
      .parse_var_def(pos)
      .and_then(|(def, end)| assign(Target::Definition(def), end));
    if definition.is_some() {
      return definition;
    }
    let (head, end) = self.parse_variable(pos)?;
    match self.parse_member_tail(end) {
      Some((tail, end)) => assign(Target::Member(Expr::member(head, tail)), end),
      None => assign(Target::Variable(head), end),
    }
  }

  /// `type ([N])? name`. The array size must be a positive integer literal.
  pub fn parse_var_def(&self, pos: usize) -> Parsed<VarDef> {
    let (ty, pos) = self.parse_type(pos)?;
    let (array_size, pos) = match self.expect(pos, T::LBracket) {
      Some(p) => {
        let size = self.token(p).filter(|t| t.is(T::IntLit))?;
        let size = size.text.parse::<u32>().ok().filter(|n| *n > 0)?;
        (size, self.expect(p + 1, T::RBracket)?)
      }
      None => (0, pos),
    };
    let (name, end) = self.parse_ident(pos)?;
    Some((VarDef { name, ty, array_size }, end))
  }

  pub fn parse_type(&self, pos: usize) -> Parsed<TypeName> {
    let token = self.token(pos)?;
    let ty = match token.kind {
      T::IntType => TypeName::Int,
      T::FloatType => TypeName::Float,
      T::BoolType => TypeName::Bool,
      T::StringType => TypeName::String,
      T::Ident => TypeName::Named(token.text.clone()),
      _ => return None,
    };
    Some((ty, pos + 1))
  }

  fn parse_return(&self, pos: usize) -> Parsed<Stmt> {
    let pos = self.expect(pos, T::Return)?;
    let (value, end) = self.parse_expr(pos)?;
    Some((Stmt::Return(value), end))
  }

  /// `{ statement* }`; statements may be separated by any number of newlines.
  pub fn parse_scope(&self, pos: usize) -> Parsed<Vec<Stmt>> {
    let mut pos = self.expect(pos, T::LBrace)?;
    let mut stmts = Vec::new();
    loop {
      pos = self.skip_newlines(pos);
      if let Some(end) = self.expect(pos, T::RBrace) {
        return Some((stmts, end));
      }
      let (stmt, next) = self.parse_statement(pos)?;
      stmts.push(stmt);
      pos = next;
    }
  }
}
