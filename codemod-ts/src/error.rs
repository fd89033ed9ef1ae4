use parse_ts::error::SyntaxError;
use parse_ts::loc::Loc;
use std::error::Error;
use std::fmt;
use std::fmt::Display;
use std::fmt::Formatter;

/// The existing tree does not match any recognized shape at a point where a
/// shape is required. Fatal for the current merge; callers treat it as "file
/// could not be auto-modified".
#[derive(Debug)]
pub enum StructureErrorKind {
  MalformedFragment(SyntaxError),
  MissingDeclaration { local: String },
  MultipleDeclarators { name: String },
  NamespaceBodyNotBlock { name: String },
  UnexpectedShape(&'static str),
}

#[derive(Debug)]
pub struct StructureError {
  pub kind: StructureErrorKind,
  pub loc: Option<Loc>,
}

impl StructureError {
  pub fn new(kind: StructureErrorKind) -> StructureError {
    StructureError { kind, loc: None }
  }

  pub fn at(kind: StructureErrorKind, loc: Loc) -> StructureError {
    StructureError {
      kind,
      loc: Some(loc),
    }
  }
}

impl Display for StructureError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match &self.kind {
      StructureErrorKind::MalformedFragment(err) => {
        write!(f, "fragment failed to parse: {err}")
      }
      StructureErrorKind::MissingDeclaration { local } => {
        write!(f, "no top-level declaration found for exported binding `{local}`")
      }
      StructureErrorKind::MultipleDeclarators { name } => {
        write!(f, "declaration of `{name}` has multiple declarators")
      }
      StructureErrorKind::NamespaceBodyNotBlock { name } => {
        write!(f, "namespace `{name}` has a nested-namespace body where a block was expected")
      }
      StructureErrorKind::UnexpectedShape(shape) => {
        write!(f, "unexpected shape: {shape}")
      }
    }?;
    if let Some(loc) = self.loc {
      write!(f, " [{}:{}]", loc.0, loc.1)?;
    }
    Ok(())
  }
}

impl Error for StructureError {}

impl From<SyntaxError> for StructureError {
  fn from(err: SyntaxError) -> StructureError {
    let loc = err.loc;
    StructureError::at(StructureErrorKind::MalformedFragment(err), loc)
  }
}

pub type MergeResult<T> = Result<T, StructureError>;
