use super::func::Func;
use super::node::Node;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Expr {
  Arrow(Node<ArrowFuncExpr>),
  Binary(Node<BinaryExpr>),
  Call(Node<CallExpr>),
  ComputedMember(Node<ComputedMemberExpr>),
  Cond(Node<CondExpr>),
  Id(Node<IdExpr>),
  Member(Node<MemberExpr>),
  Unary(Node<UnaryExpr>),

  // Literals.
  LitArr(Node<LitArrExpr>),
  LitBool(Node<LitBoolExpr>),
  LitNull(Node<LitNullExpr>),
  LitNum(Node<LitNumExpr>),
  LitObj(Node<LitObjExpr>),
  LitStr(Node<LitStrExpr>),
  LitTemplate(Node<LitTemplateExpr>),
}

impl Expr {
  /// The referenced name, when this expression is a bare identifier.
  pub fn as_id(&self) -> Option<&str> {
    match self {
      Expr::Id(id) => Some(&id.stx.name),
      _ => None,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrowFuncExpr {
  pub func: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BinaryExpr {
  #[drive(skip)]
  pub operator: BinaryOp,
  pub left: Node<Expr>,
  pub right: Node<Expr>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum BinaryOp {
  Add,
  And,
  Div,
  Eq,
  EqStrict,
  Gt,
  Gte,
  Lt,
  Lte,
  Mod,
  Mul,
  Neq,
  NeqStrict,
  Nullish,
  Or,
  Sub,
}

impl BinaryOp {
  pub fn syntax(&self) -> &'static str {
    match self {
      BinaryOp::Add => "+",
      BinaryOp::And => "&&",
      BinaryOp::Div => "/",
      BinaryOp::Eq => "==",
      BinaryOp::EqStrict => "===",
      BinaryOp::Gt => ">",
      BinaryOp::Gte => ">=",
      BinaryOp::Lt => "<",
      BinaryOp::Lte => "<=",
      BinaryOp::Mod => "%",
      BinaryOp::Mul => "*",
      BinaryOp::Neq => "!=",
      BinaryOp::NeqStrict => "!==",
      BinaryOp::Nullish => "??",
      BinaryOp::Or => "||",
      BinaryOp::Sub => "-",
    }
  }

  pub fn precedence(&self) -> u8 {
    match self {
      BinaryOp::Nullish | BinaryOp::Or => 3,
      BinaryOp::And => 4,
      BinaryOp::Eq | BinaryOp::EqStrict | BinaryOp::Neq | BinaryOp::NeqStrict => 5,
      BinaryOp::Gt | BinaryOp::Gte | BinaryOp::Lt | BinaryOp::Lte => 6,
      BinaryOp::Add | BinaryOp::Sub => 7,
      BinaryOp::Div | BinaryOp::Mod | BinaryOp::Mul => 8,
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallArg {
  #[drive(skip)]
  pub spread: bool,
  pub value: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CallExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub callee: Node<Expr>,
  pub arguments: Vec<Node<CallArg>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ComputedMemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub object: Node<Expr>,
  pub member: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct CondExpr {
  pub test: Node<Expr>,
  pub consequent: Node<Expr>,
  pub alternate: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IdExpr {
  #[drive(skip)]
  pub name: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct MemberExpr {
  #[drive(skip)]
  pub optional_chaining: bool,
  pub left: Node<Expr>,
  #[drive(skip)]
  pub right: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnaryExpr {
  #[drive(skip)]
  pub operator: UnaryOp,
  pub argument: Node<Expr>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum UnaryOp {
  Await,
  LogicalNot,
  Negate,
  Typeof,
}

impl UnaryOp {
  pub fn syntax(&self) -> &'static str {
    match self {
      UnaryOp::Await => "await",
      UnaryOp::LogicalNot => "!",
      UnaryOp::Negate => "-",
      UnaryOp::Typeof => "typeof",
    }
  }
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitArrExpr {
  pub elements: Vec<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitBoolExpr {
  #[drive(skip)]
  pub value: bool,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNullExpr {}

// The raw source text is kept; codemods never do arithmetic, and raw text
// reprints exactly.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitNumExpr {
  #[drive(skip)]
  pub raw: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitObjExpr {
  pub members: Vec<Node<ObjMember>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjMember {
  #[drive(skip)]
  pub key: String,
  // None is shorthand (`{ a }`).
  pub value: Option<Node<Expr>>,
}

// Cooked value; the emitter re-quotes.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrExpr {
  #[drive(skip)]
  pub value: String,
}

// Raw text including backticks and any substitutions, verbatim.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitTemplateExpr {
  #[drive(skip)]
  pub raw: String,
}
