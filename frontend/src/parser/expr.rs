use super::Grammar;
use super::parse_nodes::*;
use crate::internal::{TokenKind as T, *};

pub(super) type Parsed<N> = Option<(N, usize)>;

/// Binary operator levels, loosest first. Every level folds to the left.
const LEVELS: &[&[(TokenKind, BinaryOp)]] = &[
  &[(T::And, BinaryOp::And), (T::Or, BinaryOp::Or)],
  &[(T::EqEq, BinaryOp::Eq), (T::NotEq, BinaryOp::NotEq)],
  &[
    (T::Lt, BinaryOp::Lt),
    (T::LtEq, BinaryOp::LtEq),
    (T::Gt, BinaryOp::Gt),
    (T::GtEq, BinaryOp::GtEq),
  ],
  &[(T::Plus, BinaryOp::Add), (T::Minus, BinaryOp::Sub)],
  &[(T::Star, BinaryOp::Mul), (T::Slash, BinaryOp::Div)],
];

impl Grammar<'_> {
  #[instrument(level = "trace", skip(self))]
  pub fn parse_expr(&self, pos: usize) -> Parsed<Expr> {
    self.parse_binary(0, pos)
  }

  fn parse_binary(&self, level: usize, pos: usize) -> Parsed<Expr> {
    let Some(ops) = LEVELS.get(level) else {
      return self.parse_unary(pos);
    };
    let (mut expr, mut pos) = self.parse_binary(level + 1, pos)?;
    while let Some(&(_, op)) = ops.iter().find(|(kind, _)| self.is(pos, *kind)) {
      // a dangling operator is left for the caller to reject
      let Some((rhs, next)) = self.parse_binary(level + 1, pos + 1) else {
        break;
      };
      expr = Expr::binary(op, expr, rhs);
      pos = next;
    }
    Some((expr, pos))
  }

  pub fn parse_unary(&self, pos: usize) -> Parsed<Expr> {
    let op = match self.kind(pos) {
      T::Not => UnaryOp::Not,
      T::Minus => UnaryOp::Negate,
      _ => return self.parse_primary(pos),
    };
    let (operand, end) = self.parse_unary(pos + 1)?;
    Some((Expr::unary(op, operand), end))
  }

  /// An identifier-led primary is parsed as a variable once and then
  /// extended: a `.` makes it a member chain, a `(` a call.
  pub fn parse_primary(&self, pos: usize) -> Parsed<Expr> {
    let Some((head, end)) = self.parse_variable(pos) else {
      return self
        .parse_literal(pos)
        .map(|(lit, end)| (Expr::Literal(lit), end))
        .or_else(|| self.parse_parenthesized(pos));
    };
    if let Some((tail, end)) = self.parse_member_tail(end) {
      return Some((Expr::member(head, tail), end));
    }
    self
      .parse_call(pos)
      .map(|(call, end)| (Expr::Call(call), end))
      .or_else(|| Some((Expr::Variable(head), end)))
  }

  /// `a.b.c`, folded to the right: `MemberAccess(a, MemberAccess(b, c))`.
  pub fn parse_member_access(&self, pos: usize) -> Parsed<Expr> {
    let (head, pos) = self.parse_variable(pos)?;
    let (tail, end) = self.parse_member_tail(pos)?;
    Some((Expr::member(head, tail), end))
  }

  /// `.segment` and whatever chain follows it. A trailing `.` with nothing
  /// after it is not consumed.
  pub(super) fn parse_member_tail(&self, pos: usize) -> Parsed<Expr> {
    let pos = self.expect(pos, T::Dot)?;
    let (head, end) = self.parse_variable(pos)?;
    match self.parse_member_tail(end) {
      Some((tail, end)) => Some((Expr::member(head, tail), end)),
      None => Some((Expr::Variable(head), end)),
    }
  }

  pub fn parse_call(&self, pos: usize) -> Parsed<Call> {
    let (name, pos) = self.parse_ident(pos)?;
    let mut pos = self.expect(pos, T::LParen)?;
    let mut args = Vec::new();
    if let Some(end) = self.expect(pos, T::RParen) {
      return Some((Call { name, args }, end));
    }
    loop {
      let (arg, next) = self.parse_expr(pos)?;
      args.push(arg);
      match self.kind(next) {
        T::Comma => pos = next + 1,
        T::RParen => return Some((Call { name, args }, next + 1)),
        _ => return None,
      }
    }
  }

  /// An identifier with an optional `[index]`. A malformed index suffix is
  /// not consumed.
  pub fn parse_variable(&self, pos: usize) -> Parsed<Variable> {
    let (name, pos) = self.parse_ident(pos)?;
    let index = self.expect(pos, T::LBracket).and_then(|p| {
      let (index, p) = self.parse_expr(p)?;
      let p = self.expect(p, T::RBracket)?;
      Some((index, p))
    });
    match index {
      Some((index, end)) => Some((Variable { name, index: Some(Box::new(index)) }, end)),
      None => Some((Variable { name, index: None }, pos)),
    }
  }

  pub fn parse_literal(&self, pos: usize) -> Parsed<Literal> {
    let token = self.token(pos)?;
    let lit = match token.kind {
      T::IntLit => Literal::Integer(token.text.parse().ok()?),
      T::FloatLit => Literal::Float(token.text.parse().ok()?),
      T::BoolLit => Literal::Bool(token.text == "true"),
      T::StringLit => Literal::String(strip_quotes(&token.text).to_string()),
      _ => return None,
    };
    Some((lit, pos + 1))
  }

  fn parse_parenthesized(&self, pos: usize) -> Parsed<Expr> {
    let pos = self.expect(pos, T::LParen)?;
    let (expr, pos) = self.parse_expr(pos)?;
    let end = self.expect(pos, T::RParen)?;
    Some((expr, end))
  }

  pub fn parse_ident(&self, pos: usize) -> Parsed<String> {
    let token = self.token(pos)?;
    token.is(T::Ident).then(|| (token.text.clone(), pos + 1))
  }
}

pub(super) fn strip_quotes(text: &str) -> &str {
  text
    .strip_prefix('"')
    .and_then(|s| s.strip_suffix('"'))
    .unwrap_or(text)
}
