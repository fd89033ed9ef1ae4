use super::expr::Expr;
use super::node::Node;
use super::pat::PatDecl;
use super::stmt::Stmt;
use super::type_expr::TypeExpr;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct Func {
  #[drive(skip)]
  pub arrow: bool,
  #[drive(skip)]
  pub async_: bool,
  pub parameters: Vec<Node<ParamDecl>>,
  pub return_type: Option<Node<TypeExpr>>,
  pub body: FuncBody,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum FuncBody {
  Block(Vec<Node<Stmt>>),
  // Concise arrow body.
  Expr(Node<Expr>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ParamDecl {
  #[drive(skip)]
  pub rest: bool,
  #[drive(skip)]
  pub optional: bool,
  pub pattern: Node<PatDecl>,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub default_value: Option<Node<Expr>>,
}
