/// Accumulates emitted source. Statements own their leading indentation and
/// their inner newlines; the top-level driver owns the newline between
/// statements.
pub struct Emitter {
  out: String,
  depth: usize,
}

impl Emitter {
  pub fn new() -> Emitter {
    Emitter {
      out: String::new(),
      depth: 0,
    }
  }

  pub fn finish(self) -> String {
    self.out
  }

  pub(crate) fn raw(&mut self, s: &str) {
    self.out.push_str(s);
  }

  pub(crate) fn indent(&mut self) {
    for _ in 0..self.depth {
      self.out.push_str("  ");
    }
  }

  pub(crate) fn line_break(&mut self) {
    self.out.push('\n');
  }

  pub(crate) fn nested<F: FnOnce(&mut Emitter)>(&mut self, f: F) {
    self.depth += 1;
    f(self);
    self.depth -= 1;
  }

  /// Writes `value` as a single-quoted string literal.
  pub(crate) fn quoted(&mut self, value: &str) {
    self.out.push('\'');
    for c in value.chars() {
      match c {
        '\\' => self.out.push_str("\\\\"),
        '\'' => self.out.push_str("\\'"),
        '\n' => self.out.push_str("\\n"),
        '\r' => self.out.push_str("\\r"),
        '\t' => self.out.push_str("\\t"),
        '\0' => self.out.push_str("\\0"),
        c => self.out.push(c),
      }
    }
    self.out.push('\'');
  }
}

impl Default for Emitter {
  fn default() -> Emitter {
    Emitter::new()
  }
}
