use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use ahash::HashMap;
use ahash::HashMapExt;
use memchr::memchr;
use memchr::memchr2;
use memchr::memchr3;
use once_cell::sync::Lazy;

pub const KEYWORD_TABLE: &[(&str, TT)] = &[
  ("as", TT::KeywordAs),
  ("async", TT::KeywordAsync),
  ("await", TT::KeywordAwait),
  ("const", TT::KeywordConst),
  ("declare", TT::KeywordDeclare),
  ("else", TT::KeywordElse),
  ("export", TT::KeywordExport),
  ("extends", TT::KeywordExtends),
  ("false", TT::KeywordFalse),
  ("from", TT::KeywordFrom),
  ("function", TT::KeywordFunction),
  ("global", TT::KeywordGlobal),
  ("if", TT::KeywordIf),
  ("import", TT::KeywordImport),
  ("interface", TT::KeywordInterface),
  ("let", TT::KeywordLet),
  ("module", TT::KeywordModule),
  ("namespace", TT::KeywordNamespace),
  ("null", TT::KeywordNull),
  ("readonly", TT::KeywordReadonly),
  ("return", TT::KeywordReturn),
  ("true", TT::KeywordTrue),
  ("type", TT::KeywordType),
  ("typeof", TT::KeywordTypeof),
  ("var", TT::KeywordVar),
];

pub static KEYWORDS: Lazy<HashMap<&'static str, TT>> = Lazy::new(|| {
  let mut map = HashMap::new();
  for (syntax, typ) in KEYWORD_TABLE {
    map.insert(*syntax, *typ);
  }
  map
});

/// Inverse of [`KEYWORDS`]; also used by the parser to accept keywords in
/// name positions (TypeScript keywords are almost all contextual).
pub static KEYWORDS_MAPPING: Lazy<HashMap<TT, &'static str>> = Lazy::new(|| {
  let mut map = HashMap::new();
  for (syntax, typ) in KEYWORD_TABLE {
    map.insert(*typ, *syntax);
  }
  map
});

fn is_id_start(c: char) -> bool {
  c == '$' || c == '_' || c.is_alphabetic()
}

fn is_id_continue(c: char) -> bool {
  c == '$' || c == '_' || c.is_alphanumeric()
}

pub struct Lexer<'a> {
  source: &'a str,
  next: usize,
}

impl<'a> Lexer<'a> {
  pub fn new(source: &'a str) -> Lexer<'a> {
    Lexer { source, next: 0 }
  }

  pub fn source(&self) -> &'a str {
    self.source
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  fn bytes(&self) -> &[u8] {
    self.source.as_bytes()
  }

  fn at(&self, i: usize) -> u8 {
    // 0 is a safe sentinel; it matches no token syntax.
    self.bytes().get(i).copied().unwrap_or(0)
  }

  fn rest(&self) -> &str {
    &self.source[self.next..]
  }

  /// Skips whitespace and comments, reporting whether a line terminator was
  /// crossed. Unterminated block comments consume to EOF.
  fn skip_trivia(&mut self) -> bool {
    let mut crossed_line = false;
    loop {
      match self.at(self.next) {
        b' ' | b'\t' | b'\r' => self.next += 1,
        b'\n' => {
          crossed_line = true;
          self.next += 1;
        }
        b'/' if self.at(self.next + 1) == b'/' => {
          match memchr(b'\n', self.rest().as_bytes()) {
            Some(i) => self.next += i,
            None => self.next = self.source.len(),
          };
        }
        b'/' if self.at(self.next + 1) == b'*' => {
          let mut i = self.next + 2;
          loop {
            match memchr(b'*', &self.bytes()[i.min(self.source.len())..]) {
              Some(j) if self.at(i + j + 1) == b'/' => {
                let end = i + j + 2;
                if memchr(b'\n', &self.bytes()[self.next..end]).is_some() {
                  crossed_line = true;
                }
                self.next = end;
                break;
              }
              Some(j) => i += j + 1,
              None => {
                self.next = self.source.len();
                break;
              }
            }
          }
        }
        _ => return crossed_line,
      }
    }
  }

  pub fn lex_next(&mut self) -> Token {
    let after_line_terminator = self.skip_trivia();
    let start = self.next;
    if start >= self.source.len() {
      return Token::new(Loc(start, start), TT::EOF, after_line_terminator);
    }
    let typ = self.lex_token();
    Token::new(Loc(start, self.next), typ, after_line_terminator)
  }

  fn lex_token(&mut self) -> TT {
    let b = self.at(self.next);
    let b1 = self.at(self.next + 1);
    let b2 = self.at(self.next + 2);
    // Multi-byte punctuators first, longest match.
    let punct = match (b, b1, b2) {
      (b'=', b'=', b'=') => Some((3, TT::EqualsEqualsEquals)),
      (b'!', b'=', b'=') => Some((3, TT::ExclamationEqualsEquals)),
      (b'.', b'.', b'.') => Some((3, TT::DotDotDot)),
      (b'=', b'=', _) => Some((2, TT::EqualsEquals)),
      (b'=', b'>', _) => Some((2, TT::EqualsChevronRight)),
      (b'!', b'=', _) => Some((2, TT::ExclamationEquals)),
      (b'&', b'&', _) => Some((2, TT::AmpersandAmpersand)),
      (b'|', b'|', _) => Some((2, TT::BarBar)),
      (b'?', b'?', _) => Some((2, TT::QuestionQuestion)),
      (b'?', b'.', _) => Some((2, TT::QuestionDot)),
      (b'<', b'=', _) => Some((2, TT::ChevronLeftEquals)),
      (b'>', b'=', _) => Some((2, TT::ChevronRightEquals)),
      (b'&', _, _) => Some((1, TT::Ampersand)),
      (b'|', _, _) => Some((1, TT::Bar)),
      (b'=', _, _) => Some((1, TT::Equals)),
      (b'!', _, _) => Some((1, TT::Exclamation)),
      (b'?', _, _) => Some((1, TT::Question)),
      (b'<', _, _) => Some((1, TT::ChevronLeft)),
      (b'>', _, _) => Some((1, TT::ChevronRight)),
      (b'.', _, _) => Some((1, TT::Dot)),
      (b'(', _, _) => Some((1, TT::ParenOpen)),
      (b')', _, _) => Some((1, TT::ParenClose)),
      (b'{', _, _) => Some((1, TT::BraceOpen)),
      (b'}', _, _) => Some((1, TT::BraceClose)),
      (b'[', _, _) => Some((1, TT::BracketOpen)),
      (b']', _, _) => Some((1, TT::BracketClose)),
      (b':', _, _) => Some((1, TT::Colon)),
      (b';', _, _) => Some((1, TT::Semicolon)),
      (b',', _, _) => Some((1, TT::Comma)),
      (b'+', _, _) => Some((1, TT::Plus)),
      (b'-', _, _) => Some((1, TT::Hyphen)),
      (b'*', _, _) => Some((1, TT::Asterisk)),
      (b'/', _, _) => Some((1, TT::Slash)),
      (b'%', _, _) => Some((1, TT::Percent)),
      _ => None,
    };
    if let Some((len, typ)) = punct {
      self.next += len;
      return typ;
    }
    match b {
      b'\'' | b'"' => self.lex_string(b),
      b'`' => self.lex_template(),
      b'0'..=b'9' => self.lex_number(),
      _ => self.lex_identifier_or_invalid(),
    }
  }

  fn lex_identifier_or_invalid(&mut self) -> TT {
    let rest = self.rest();
    let mut chars = rest.char_indices();
    match chars.next() {
      Some((_, c)) if is_id_start(c) => {}
      Some((_, c)) => {
        self.next += c.len_utf8();
        return TT::Invalid;
      }
      None => return TT::Invalid,
    };
    let mut len = rest.len();
    for (i, c) in chars {
      if !is_id_continue(c) {
        len = i;
        break;
      }
    }
    let typ = KEYWORDS.get(&rest[..len]).copied().unwrap_or(TT::Identifier);
    self.next += len;
    typ
  }

  fn lex_number(&mut self) -> TT {
    let digits: &[u8] = match (self.at(self.next), self.at(self.next + 1)) {
      (b'0', b'x') | (b'0', b'X') => {
        self.next += 2;
        b"0123456789abcdefABCDEF_"
      }
      (b'0', b'b') | (b'0', b'B') => {
        self.next += 2;
        b"01_"
      }
      (b'0', b'o') | (b'0', b'O') => {
        self.next += 2;
        b"01234567_"
      }
      _ => {
        self.eat_digit_run();
        if self.at(self.next) == b'.' {
          self.next += 1;
          self.eat_digit_run();
        }
        if matches!(self.at(self.next), b'e' | b'E') {
          self.next += 1;
          if matches!(self.at(self.next), b'+' | b'-') {
            self.next += 1;
          }
          self.eat_digit_run();
        }
        if self.at(self.next) == b'n' {
          self.next += 1;
        }
        return TT::LiteralNumber;
      }
    };
    while digits.contains(&self.at(self.next)) {
      self.next += 1;
    }
    if self.at(self.next) == b'n' {
      self.next += 1;
    }
    TT::LiteralNumber
  }

  fn eat_digit_run(&mut self) {
    while matches!(self.at(self.next), b'0'..=b'9' | b'_') {
      self.next += 1;
    }
  }

  fn lex_string(&mut self, quote: u8) -> TT {
    let mut i = self.next + 1;
    loop {
      match memchr3(quote, b'\\', b'\n', &self.bytes()[i.min(self.source.len())..]) {
        Some(j) => match self.at(i + j) {
          b'\\' => i += j + 2,
          b'\n' => {
            // Line terminator in a single/double-quoted string.
            self.next = i + j;
            return TT::Invalid;
          }
          _ => {
            self.next = i + j + 1;
            return TT::LiteralString;
          }
        },
        None => {
          self.next = self.source.len();
          return TT::Invalid;
        }
      }
    }
  }

  /// Lexes an entire template literal, substitutions included, as one token.
  /// Codemods never look inside templates; the raw text round-trips verbatim.
  /// Substitution bodies are matched by brace depth, so a brace inside a
  /// string inside a substitution is out of subset.
  fn lex_template(&mut self) -> TT {
    let mut i = self.next + 1;
    loop {
      match memchr3(b'`', b'\\', b'$', &self.bytes()[i.min(self.source.len())..]) {
        Some(j) => match self.at(i + j) {
          b'\\' => i += j + 2,
          b'$' if self.at(i + j + 1) == b'{' => {
            let mut depth = 1usize;
            let mut k = i + j + 2;
            while depth > 0 {
              match memchr2(b'{', b'}', &self.bytes()[k.min(self.source.len())..]) {
                Some(m) => {
                  depth = if self.at(k + m) == b'{' {
                    depth + 1
                  } else {
                    depth - 1
                  };
                  k += m + 1;
                }
                None => {
                  self.next = self.source.len();
                  return TT::Invalid;
                }
              }
            }
            i = k;
          }
          b'$' => i += j + 1,
          _ => {
            self.next = i + j + 1;
            return TT::LiteralTemplate;
          }
        },
        None => {
          self.next = self.source.len();
          return TT::Invalid;
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lex_all(src: &str) -> Vec<(TT, &str)> {
    let mut lexer = Lexer::new(src);
    let mut out = Vec::new();
    loop {
      let t = lexer.lex_next();
      if t.typ == TT::EOF {
        return out;
      }
      out.push((t.typ, &src[t.loc.0..t.loc.1]));
    }
  }

  #[test]
  fn lexes_export_const_arrow() {
    let toks = lex_all("export const handle = async ({ event }) => resolve(event);");
    let types: Vec<TT> = toks.iter().map(|(t, _)| *t).collect();
    assert_eq!(types, vec![
      TT::KeywordExport,
      TT::KeywordConst,
      TT::Identifier,
      TT::Equals,
      TT::KeywordAsync,
      TT::ParenOpen,
      TT::BraceOpen,
      TT::Identifier,
      TT::BraceClose,
      TT::ParenClose,
      TT::EqualsChevronRight,
      TT::Identifier,
      TT::ParenOpen,
      TT::Identifier,
      TT::ParenClose,
      TT::Semicolon,
    ]);
  }

  #[test]
  fn longest_punctuator_wins() {
    let toks = lex_all("a === b => c ?? d?.e");
    let types: Vec<TT> = toks.iter().map(|(t, _)| *t).collect();
    assert_eq!(types, vec![
      TT::Identifier,
      TT::EqualsEqualsEquals,
      TT::Identifier,
      TT::EqualsChevronRight,
      TT::Identifier,
      TT::QuestionQuestion,
      TT::Identifier,
      TT::QuestionDot,
      TT::Identifier,
    ]);
  }

  #[test]
  fn keyword_lookup_requires_exact_word() {
    let toks = lex_all("export exports exp");
    assert_eq!(toks, vec![
      (TT::KeywordExport, "export"),
      (TT::Identifier, "exports"),
      (TT::Identifier, "exp"),
    ]);
  }

  #[test]
  fn comments_and_line_terminators() {
    let mut lexer = Lexer::new("a // trailing\nb /* inline */ c");
    assert!(!lexer.lex_next().after_line_terminator);
    let b = lexer.lex_next();
    assert_eq!(b.typ, TT::Identifier);
    assert!(b.after_line_terminator);
    let c = lexer.lex_next();
    assert_eq!(c.typ, TT::Identifier);
    assert!(!c.after_line_terminator);
  }

  #[test]
  fn strings_and_templates_are_single_tokens() {
    let toks = lex_all(r#"'a\'b' "c" `d${e + 1}f`"#);
    assert_eq!(toks[0], (TT::LiteralString, r#"'a\'b'"#));
    assert_eq!(toks[1], (TT::LiteralString, r#""c""#));
    assert_eq!(toks[2], (TT::LiteralTemplate, "`d${e + 1}f`"));
  }

  #[test]
  fn unterminated_string_is_invalid() {
    let toks = lex_all("'abc");
    assert_eq!(toks[0].0, TT::Invalid);
  }

  #[test]
  fn numbers() {
    let toks = lex_all("0 1.5 2e10 0xff 10n");
    assert!(toks.iter().all(|(t, _)| *t == TT::LiteralNumber));
    assert_eq!(toks.len(), 5);
  }
}
