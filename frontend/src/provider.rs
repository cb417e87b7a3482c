use std::io::BufRead;

use tracing::warn;

/// Source of raw program text for the lexer. Each call yields one line,
/// trailing `\n` included when the source had one; `None` marks the end.
pub trait CodeProvider {
  fn get_more_code(&mut self) -> Option<String>;
}

#[derive(Debug)]
pub struct StrProvider {
  lines: std::vec::IntoIter<String>,
}

impl StrProvider {
  pub fn new(src: &str) -> Self {
    let lines: Vec<String> = src.split_inclusive('\n').map(str::to_owned).collect();
    StrProvider { lines: lines.into_iter() }
  }
}

impl CodeProvider for StrProvider {
  fn get_more_code(&mut self) -> Option<String> {
    self.lines.next()
  }
}

/// Reads lines from any buffered reader (a file, stdin, a byte slice).
#[derive(Debug)]
pub struct ReadProvider<R> {
  reader: R,
  done: bool,
}

impl<R: BufRead> ReadProvider<R> {
  pub const fn new(reader: R) -> Self {
    ReadProvider { reader, done: false }
  }
}

impl<R: BufRead> CodeProvider for ReadProvider<R> {
  fn get_more_code(&mut self) -> Option<String> {
    if self.done {
      return None;
    }
    let mut line = String::new();
    match self.reader.read_line(&mut line) {
      Ok(0) => {
        self.done = true;
        None
      }
      Ok(_) => Some(line),
      Err(err) => {
        warn!("reading source failed, treating as end of input: {err}");
        self.done = true;
        None
      }
    }
  }
}

impl<P: CodeProvider + ?Sized> CodeProvider for &mut P {
  fn get_more_code(&mut self) -> Option<String> {
    (**self).get_more_code()
  }
}
