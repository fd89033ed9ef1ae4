use crate::loc::Loc;
use serde::Serialize;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize)]
pub enum TT {
  // Special token representing the end of the source code. Easier than using
  // and handling Option everywhere.
  EOF,
  // Special token representing source the lexer cannot tokenize. The parser
  // surfaces it as a SyntaxError; the lexer itself stays infallible.
  Invalid,

  Ampersand,
  AmpersandAmpersand,
  Asterisk,
  Bar,
  BarBar,
  BraceClose,
  BraceOpen,
  BracketClose,
  BracketOpen,
  ChevronLeft,
  ChevronLeftEquals,
  ChevronRight,
  ChevronRightEquals,
  Colon,
  Comma,
  Dot,
  DotDotDot,
  Equals,
  EqualsChevronRight,
  EqualsEquals,
  EqualsEqualsEquals,
  Exclamation,
  ExclamationEquals,
  ExclamationEqualsEquals,
  Hyphen,
  ParenClose,
  ParenOpen,
  Percent,
  Plus,
  Question,
  QuestionDot,
  QuestionQuestion,
  Semicolon,
  Slash,

  Identifier,
  LiteralNumber,
  LiteralString,
  LiteralTemplate,

  KeywordAs,
  KeywordAsync,
  KeywordAwait,
  KeywordConst,
  KeywordDeclare,
  KeywordElse,
  KeywordExport,
  KeywordExtends,
  KeywordFalse,
  KeywordFrom,
  KeywordFunction,
  KeywordGlobal,
  KeywordIf,
  KeywordImport,
  KeywordInterface,
  KeywordLet,
  KeywordModule,
  KeywordNamespace,
  KeywordNull,
  KeywordReadonly,
  KeywordReturn,
  KeywordTrue,
  KeywordType,
  KeywordTypeof,
  KeywordVar,
}

/// To get the lexer's position after this token was lexed, use `token.loc.1`.
#[derive(Copy, Clone, Debug)]
pub struct Token {
  pub loc: Loc,
  pub typ: TT,
  // Whether a line terminator appeared between the previous token and this
  // one. Drives automatic-semicolon handling at statement boundaries.
  pub after_line_terminator: bool,
}

impl Token {
  pub fn new(loc: Loc, typ: TT, after_line_terminator: bool) -> Token {
    Token {
      loc,
      typ,
      after_line_terminator,
    }
  }

  pub fn error(&self, typ: crate::error::SyntaxErrorType) -> crate::error::SyntaxError {
    self.loc.error(typ, Some(self.typ))
  }
}
