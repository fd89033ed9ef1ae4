use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::token::TT;
use std::cmp::max;
use std::cmp::min;

/// A location within the current source file expressed as UTF-8 byte offsets.
///
/// Nodes manufactured by codemods don't exist anywhere in the source text;
/// they carry [`Loc::synthetic`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Loc(pub usize, pub usize);

impl Loc {
  pub const fn synthetic() -> Loc {
    Loc(0, 0)
  }

  pub fn is_empty(&self) -> bool {
    self.0 >= self.1
  }

  pub fn len(&self) -> usize {
    self.1 - self.0
  }

  pub fn extend(&mut self, other: Loc) {
    self.0 = min(self.0, other.0);
    self.1 = max(self.1, other.1);
  }

  pub fn error(self, typ: SyntaxErrorType, actual_token: Option<TT>) -> SyntaxError {
    SyntaxError::new(typ, self, actual_token)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extend_covers_both_ranges() {
    let mut loc = Loc(4, 10);
    loc.extend(Loc(2, 6));
    assert_eq!(loc, Loc(2, 10));
    loc.extend(Loc(8, 15));
    assert_eq!(loc, Loc(2, 15));
  }

  #[test]
  fn synthetic_is_empty() {
    assert!(Loc::synthetic().is_empty());
    assert_eq!(Loc(3, 7).len(), 4);
  }
}
