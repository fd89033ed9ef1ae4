use crate::ast::node::Node;
use crate::error::SyntaxError;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::lex::Lexer;
use crate::lex::KEYWORDS_MAPPING;
use crate::loc::Loc;
use crate::token::Token;
use crate::token::TT;
use derive_visitor::Drive;
use derive_visitor::DriveMut;

pub mod expr;
pub mod import_export;
pub mod pat;
pub mod stmt;
pub mod toplevel;
pub mod ts_decl;
pub mod type_expr;

#[derive(Debug)]
#[must_use]
pub struct MaybeToken {
  typ: TT,
  loc: Loc,
  matched: bool,
}

impl MaybeToken {
  pub fn is_match(&self) -> bool {
    self.matched
  }

  pub fn match_loc(&self) -> Option<Loc> {
    if self.matched {
      Some(self.loc)
    } else {
      None
    }
  }

  pub fn error(&self, err: SyntaxErrorType) -> SyntaxError {
    debug_assert!(!self.matched);
    self.loc.error(err, Some(self.typ))
  }
}

pub struct ParserCheckpoint {
  next: usize,
}

pub struct Parser<'a> {
  source: &'a str,
  tokens: Vec<Token>,
  next: usize,
}

// The grammar is small enough to lex eagerly; scaffolding codemods operate on
// single source files. Having the whole token stream up front also makes the
// bounded lookahead for arrow-function heads trivial.
impl<'a> Parser<'a> {
  pub fn new(lexer: Lexer<'a>) -> Parser<'a> {
    let source = lexer.source();
    let mut lexer = lexer;
    let mut tokens = Vec::new();
    loop {
      let t = lexer.lex_next();
      let done = t.typ == TT::EOF;
      tokens.push(t);
      if done {
        break;
      }
    }
    Parser {
      source,
      tokens,
      next: 0,
    }
  }

  pub fn source_range(&self) -> Loc {
    Loc(0, self.source.len())
  }

  pub fn str(&self, loc: Loc) -> &str {
    &self.source[loc.0..loc.1]
  }

  pub fn string(&self, loc: Loc) -> String {
    self.str(loc).to_string()
  }

  pub fn checkpoint(&self) -> ParserCheckpoint {
    ParserCheckpoint { next: self.next }
  }

  pub fn restore_checkpoint(&mut self, checkpoint: ParserCheckpoint) {
    self.next = checkpoint.next;
  }

  pub fn peek(&self) -> Token {
    self.peek_at(0)
  }

  /// Peeks `n` tokens past the next one; saturates at EOF.
  pub fn peek_at(&self, n: usize) -> Token {
    let i = (self.next + n).min(self.tokens.len() - 1);
    self.tokens[i]
  }

  pub fn consume(&mut self) -> Token {
    let t = self.peek();
    if self.next < self.tokens.len() - 1 {
      self.next += 1;
    }
    t
  }

  pub fn consume_as_string(&mut self) -> String {
    let t = self.consume();
    self.string(t.loc)
  }

  pub fn consume_if(&mut self, typ: TT) -> MaybeToken {
    let t = self.peek();
    let matched = t.typ == typ;
    if matched {
      self.consume();
    }
    MaybeToken {
      typ: t.typ,
      loc: t.loc,
      matched,
    }
  }

  pub fn require(&mut self, typ: TT) -> SyntaxResult<Token> {
    let t = self.peek();
    if t.typ != typ {
      return Err(t.error(if t.typ == TT::EOF {
        SyntaxErrorType::UnexpectedEnd
      } else {
        SyntaxErrorType::RequiredTokenNotFound(typ)
      }));
    }
    Ok(self.consume())
  }

  /// Requires an identifier, also accepting keywords (TypeScript keywords
  /// are almost all contextual and valid in name positions).
  pub fn require_identifier(&mut self) -> SyntaxResult<String> {
    let t = self.peek();
    if t.typ == TT::Identifier || KEYWORDS_MAPPING.contains_key(&t.typ) {
      return Ok(self.consume_as_string());
    }
    Err(t.error(SyntaxErrorType::ExpectedSyntax("identifier")))
  }

  /// End of the most recently consumed token.
  fn prev_end(&self) -> usize {
    if self.next == 0 {
      0
    } else {
      self.tokens[self.next - 1].loc.1
    }
  }

  /// Runs the callback and wraps its syntax in a Node spanning every token
  /// consumed during the callback.
  pub fn with_loc<S: Drive + DriveMut, F: FnOnce(&mut Parser<'a>) -> SyntaxResult<S>>(
    &mut self,
    f: F,
  ) -> SyntaxResult<Node<S>> {
    let start = self.peek().loc.0;
    let stx = f(self)?;
    Ok(Node::new(Loc(start, self.prev_end()), stx))
  }

  /// Statement terminator: an explicit semicolon, or an automatic one at a
  /// block end, at EOF, or before a token on a new line.
  pub fn semicolon(&mut self) -> SyntaxResult<()> {
    if self.consume_if(TT::Semicolon).is_match() {
      return Ok(());
    }
    let t = self.peek();
    if matches!(t.typ, TT::BraceClose | TT::EOF) || t.after_line_terminator {
      return Ok(());
    }
    Err(t.error(SyntaxErrorType::ExpectedSyntax("semicolon")))
  }

  /// The cooked value of a string literal token (quotes stripped, escapes
  /// resolved).
  pub fn lit_str_val(&mut self) -> SyntaxResult<String> {
    let t = self.require(TT::LiteralString)?;
    let raw = self.str(t.loc);
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
      if c != '\\' {
        out.push(c);
        continue;
      }
      match chars.next() {
        Some('n') => out.push('\n'),
        Some('r') => out.push('\r'),
        Some('t') => out.push('\t'),
        Some('0') => out.push('\0'),
        Some(other) => out.push(other),
        None => {}
      }
    }
    Ok(out)
  }
}
