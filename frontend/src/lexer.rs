use crate::internal::{TokenKind as T, *};

/// Pulls lines from a `CodeProvider` and cuts them into tokens, one per
/// `next_token` call. Only the unconsumed remainder of the current line is
/// buffered.
#[derive(Debug)]
pub struct Lexer<P> {
  provider: P,
  buffer: String,
  offset: usize,
  line: u32,
  /// chars consumed on the current line
  col: u32,
}

impl<P: CodeProvider> Lexer<P> {
  pub const fn new(provider: P) -> Self {
    Lexer {
      provider,
      buffer: String::new(),
      offset: 0,
      line: 0,
      col: 0,
    }
  }

  /// Drains the lexer, returning every token up to and including `Eof`.
  pub fn lex(mut self, reporter: &mut dyn Reporter) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(64);
    loop {
      let token = self.next_token(reporter);
      let done = token.is(T::Eof);
      tokens.push(token);
      if done {
        return tokens;
      }
    }
  }

  pub fn next_token(&mut self, reporter: &mut dyn Reporter) -> Token {
    loop {
      if self.rest().is_empty() {
        if !self.refill() {
          return Token::eof(self.loc());
        }
        continue;
      }
      self.skip_blanks();
      if self.rest().is_empty() {
        continue;
      }

      let before = self.offset;
      let token = self.match_token(reporter);
      // every match, invalid runs included, is at least one char
      debug_assert!(self.offset > before, "lexer made no progress");
      trace!(kind = ?token.kind, text = %token.text, "token");
      return token;
    }
  }

  fn match_token(&mut self, reporter: &mut dyn Reporter) -> Token {
    let rest = self.rest();
    let matched = match_float(rest)
      .map(|len| (T::FloatLit, len))
      .or_else(|| match_int(rest).map(|len| (T::IntLit, len)))
      .or_else(|| match_string(rest).map(|len| (T::StringLit, len)))
      .or_else(|| match_comment(rest).map(|len| (T::Comment, len)))
      .or_else(|| match_keyword(rest))
      .or_else(|| match_two_char_op(rest))
      .or_else(|| match_one_char(rest))
      .or_else(|| match_ident(rest).map(|len| (T::Ident, len)));
    let (kind, len) = matched.unwrap_or_else(|| (T::Invalid, invalid_run(rest)));

    let token = self.take(kind, len);
    if kind == T::Invalid {
      self.report_invalid(&token, reporter);
    }
    token
  }

  fn take(&mut self, kind: TokenKind, len: usize) -> Token {
    let loc = self.loc();
    let text = &self.buffer[self.offset..self.offset + len];
    let token = Token::new(kind, text, loc);
    self.offset += len;
    self.col = self.col.saturating_add(token.text.chars().count() as u32);
    token
  }

  fn report_invalid(&self, token: &Token, reporter: &mut dyn Reporter) {
    reporter.report(Diagnostic::warning(
      token.loc.line_no(),
      token.loc.col_no(),
      token.width(),
      format!("unrecognized input `{}`", token.text),
    ));
  }

  fn refill(&mut self) -> bool {
    match self.provider.get_more_code() {
      Some(code) => {
        self.buffer = code;
        self.offset = 0;
        self.col = 0;
        self.line += 1;
        true
      }
      None => false,
    }
  }

  fn skip_blanks(&mut self) {
    let (bytes, chars) = self
      .rest()
      .chars()
      .take_while(|c| c.is_whitespace() && *c != '\n')
      .fold((0, 0u32), |(bytes, chars), c| (bytes + c.len_utf8(), chars + 1));
    self.offset += bytes;
    self.col = self.col.saturating_add(chars);
  }

  fn rest(&self) -> &str {
    &self.buffer[self.offset..]
  }

  fn loc(&self) -> SrcLoc {
    SrcLoc::at(self.line.max(1), self.col.saturating_add(1))
  }
}

fn digits(s: &str) -> usize {
  s.bytes().take_while(u8::is_ascii_digit).count()
}

fn match_float(s: &str) -> Option<usize> {
  let whole = digits(s);
  if whole == 0 || !s[whole..].starts_with('.') {
    return None;
  }
  let fraction = digits(&s[whole + 1..]);
  (fraction > 0).then_some(whole + 1 + fraction)
}

fn match_int(s: &str) -> Option<usize> {
  let len = digits(s);
  (len > 0).then_some(len)
}

fn match_string(s: &str) -> Option<usize> {
  let body = s.strip_prefix('"')?;
  let end = body.find(['"', '\n'])?;
  body[end..].starts_with('"').then_some(end + 2)
}

fn match_comment(s: &str) -> Option<usize> {
  if !s.starts_with('#') {
    return None;
  }
  Some(s.find('\n').unwrap_or(s.len()))
}

fn continues_ident(s: &str) -> bool {
  s.chars().next().is_some_and(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn match_keyword(s: &str) -> Option<(TokenKind, usize)> {
  KEYWORDS
    .iter()
    .find(|(word, _)| s.starts_with(word) && !continues_ident(&s[word.len()..]))
    .map(|(word, kind)| (*kind, word.len()))
}

fn match_two_char_op(s: &str) -> Option<(TokenKind, usize)> {
  TWO_CHAR_OPS
    .iter()
    .find(|(op, _)| s.starts_with(op))
    .map(|(_, kind)| (*kind, 2))
}

fn match_one_char(s: &str) -> Option<(TokenKind, usize)> {
  let c = s.chars().next()?;
  one_char_kind(c).map(|kind| (kind, 1))
}

fn match_ident(s: &str) -> Option<usize> {
  let first = s.chars().next()?;
  if !(first.is_ascii_alphabetic() || first == '_') {
    return None;
  }
  Some(1 + s[1..].bytes().take_while(|b| b.is_ascii_alphanumeric() || *b == b'_').count())
}

fn invalid_run(s: &str) -> usize {
  match s.find(char::is_whitespace) {
    Some(0) => s.chars().next().map_or(0, char::len_utf8),
    Some(end) => end,
    None => s.len(),
  }
}
