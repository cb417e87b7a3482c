use crate::src_loc::SrcLoc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
  IntLit,
  FloatLit,
  BoolLit,
  StringLit,
  Ident,
  // keywords
  Fun,
  Type,
  Return,
  Extern,
  If,
  Else,
  For,
  Import,
  Assert,
  Not,
  And,
  Or,
  // primitive type names
  IntType,
  FloatType,
  BoolType,
  StringType,
  // operators
  Plus,
  Minus,
  Star,
  Slash,
  Lt,
  LtEq,
  Gt,
  GtEq,
  EqEq,
  NotEq,
  Assign,
  // punctuation
  LParen,
  RParen,
  LBrace,
  RBrace,
  LBracket,
  RBracket,
  Comma,
  Semicolon,
  Dot,
  Comment,
  Newline,
  Eof,
  Invalid,
}

/// Word tokens in the order the lexer checks them.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
  ("true", TokenKind::BoolLit),
  ("false", TokenKind::BoolLit),
  ("not", TokenKind::Not),
  ("and", TokenKind::And),
  ("or", TokenKind::Or),
  ("fun", TokenKind::Fun),
  ("type", TokenKind::Type),
  ("int", TokenKind::IntType),
  ("float", TokenKind::FloatType),
  ("bool", TokenKind::BoolType),
  ("string", TokenKind::StringType),
  ("return", TokenKind::Return),
  ("extern", TokenKind::Extern),
  ("if", TokenKind::If),
  ("else", TokenKind::Else),
  ("for", TokenKind::For),
  ("import", TokenKind::Import),
  ("assert", TokenKind::Assert),
];

pub const TWO_CHAR_OPS: &[(&str, TokenKind)] = &[
  ("!=", TokenKind::NotEq),
  ("==", TokenKind::EqEq),
  (">=", TokenKind::GtEq),
  ("<=", TokenKind::LtEq),
];

pub const fn one_char_kind(c: char) -> Option<TokenKind> {
  let kind = match c {
    '\n' => TokenKind::Newline,
    '(' => TokenKind::LParen,
    ')' => TokenKind::RParen,
    '{' => TokenKind::LBrace,
    '}' => TokenKind::RBrace,
    '[' => TokenKind::LBracket,
    ']' => TokenKind::RBracket,
    '=' => TokenKind::Assign,
    '+' => TokenKind::Plus,
    '-' => TokenKind::Minus,
    '*' => TokenKind::Star,
    '/' => TokenKind::Slash,
    ',' => TokenKind::Comma,
    ';' => TokenKind::Semicolon,
    '<' => TokenKind::Lt,
    '>' => TokenKind::Gt,
    '.' => TokenKind::Dot,
    _ => return None,
  };
  Some(kind)
}

impl TokenKind {
  pub const fn is_type_name(&self) -> bool {
    matches!(
      self,
      TokenKind::IntType | TokenKind::FloatType | TokenKind::BoolType | TokenKind::StringType
    )
  }

  pub const fn is_literal(&self) -> bool {
    matches!(
      self,
      TokenKind::IntLit | TokenKind::FloatLit | TokenKind::BoolLit | TokenKind::StringLit
    )
  }
}

impl std::fmt::Display for TokenKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      TokenKind::IntLit => "integer literal",
      TokenKind::FloatLit => "float literal",
      TokenKind::BoolLit => "boolean literal",
      TokenKind::StringLit => "string literal",
      TokenKind::Ident => "identifier",
      TokenKind::Comment => "comment",
      TokenKind::Newline => "newline",
      TokenKind::Eof => "end of stream",
      TokenKind::Invalid => "invalid token",
      other => return write!(f, "`{}`", other.lexeme().unwrap_or("?")),
    };
    f.write_str(name)
  }
}

impl TokenKind {
  /// Fixed spelling of a keyword, operator or punctuation kind.
  pub const fn lexeme(&self) -> Option<&'static str> {
    let s = match self {
      TokenKind::Fun => "fun",
      TokenKind::Type => "type",
      TokenKind::Return => "return",
      TokenKind::Extern => "extern",
      TokenKind::If => "if",
      TokenKind::Else => "else",
      TokenKind::For => "for",
      TokenKind::Import => "import",
      TokenKind::Assert => "assert",
      TokenKind::Not => "not",
      TokenKind::And => "and",
      TokenKind::Or => "or",
      TokenKind::IntType => "int",
      TokenKind::FloatType => "float",
      TokenKind::BoolType => "bool",
      TokenKind::StringType => "string",
      TokenKind::Plus => "+",
      TokenKind::Minus => "-",
      TokenKind::Star => "*",
      TokenKind::Slash => "/",
      TokenKind::Lt => "<",
      TokenKind::LtEq => "<=",
      TokenKind::Gt => ">",
      TokenKind::GtEq => ">=",
      TokenKind::EqEq => "==",
      TokenKind::NotEq => "!=",
      TokenKind::Assign => "=",
      TokenKind::LParen => "(",
      TokenKind::RParen => ")",
      TokenKind::LBrace => "{",
      TokenKind::RBrace => "}",
      TokenKind::LBracket => "[",
      TokenKind::RBracket => "]",
      TokenKind::Comma => ",",
      TokenKind::Semicolon => ";",
      TokenKind::Dot => ".",
      TokenKind::Newline => "\n",
      TokenKind::IntLit
      | TokenKind::FloatLit
      | TokenKind::BoolLit
      | TokenKind::StringLit
      | TokenKind::Ident
      | TokenKind::Comment
      | TokenKind::Eof
      | TokenKind::Invalid => return None,
    };
    Some(s)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
  pub kind: TokenKind,
  pub text: String,
  pub loc: SrcLoc,
}

impl Token {
  pub fn new(kind: TokenKind, text: impl Into<String>, loc: SrcLoc) -> Self {
    Token { kind, text: text.into(), loc }
  }

  pub fn eof(loc: SrcLoc) -> Self {
    Token::new(TokenKind::Eof, "", loc)
  }

  pub fn is(&self, kind: TokenKind) -> bool {
    self.kind == kind
  }

  pub fn width(&self) -> u32 {
    self.text.chars().count().max(1) as u32
  }
}

/// Renders tokens back to source text. A single space separates tokens except
/// where the pair reads naturally without one and cannot lex differently.
pub fn render_tokens(tokens: &[Token]) -> String {
  let mut out = String::new();
  let mut prev: Option<&Token> = None;
  for token in tokens {
    if token.is(TokenKind::Eof) {
      break;
    }
    if let Some(prev) = prev {
      if needs_space(prev.kind, token.kind) {
        out.push(' ');
      }
    }
    out.push_str(&token.text);
    prev = Some(token);
  }
  out
}

fn needs_space(prev: TokenKind, next: TokenKind) -> bool {
  use TokenKind as T;
  match (prev, next) {
    // invalid runs end at whitespace, so they must stay separated
    (T::Invalid, _) | (_, T::Invalid) => true,
    (T::Newline, _) | (_, T::Newline) => false,
    (T::LParen | T::LBracket, _) => false,
    (_, T::RParen | T::RBracket | T::Comma | T::Semicolon) => false,
    (T::Ident, T::LParen | T::LBracket) => false,
    (T::Ident | T::RParen | T::RBracket, T::Dot) => false,
    (T::Dot, T::Ident) => false,
    _ => true,
  }
}
