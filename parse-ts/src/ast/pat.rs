use super::expr::Expr;
use super::node::Node;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Pat {
  Arr(Node<ArrPat>),
  Id(Node<IdPat>),
  Obj(Node<ObjPat>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdPat {
  #[drive(skip)]
  pub name: String,
}

/// `{ a, b: c, d = e, ...rest }`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPat {
  pub properties: Vec<Node<ObjPatProp>>,
  pub rest: Option<Node<IdPat>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjPatProp {
  #[drive(skip)]
  pub key: String,
  // `key: target`; None is shorthand.
  pub target: Option<Node<Pat>>,
  pub default_value: Option<Node<Expr>>,
}

/// `[a, b, ...rest]`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrPat {
  pub elements: Vec<Node<Pat>>,
  pub rest: Option<Node<IdPat>>,
}

// A pattern in a declaration position (e.g. imports, function params,
// var/let/const), as opposed to inside an expression.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct PatDecl {
  pub pat: Node<Pat>,
}

impl PatDecl {
  /// The single bound name, when the pattern is a plain identifier.
  pub fn as_id(&self) -> Option<&str> {
    match self.pat.stx.as_ref() {
      Pat::Id(id) => Some(&id.stx.name),
      _ => None,
    }
  }
}
