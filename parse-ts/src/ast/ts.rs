use super::node::Node;
use super::stmt::Stmt;
use super::type_expr::TypeExpr;
use super::type_expr::TypeMember;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

/// Interface declaration: `interface Foo extends Bar { }`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct InterfaceDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub extends: Vec<Node<TypeExpr>>,
  pub members: Vec<Node<TypeMember>>,
}

/// Type alias declaration: `type Foo = Bar`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeAliasDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub type_expr: Node<TypeExpr>,
}

/// Namespace declaration: `namespace Foo { }`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NamespaceDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub declare: bool,
  #[drive(skip)]
  pub name: String,
  pub body: NamespaceBody,
}

/// Namespace body - either a block of statements or a nested namespace
/// (the dotted `namespace A.B { }` form).
#[derive(Debug, Drive, DriveMut, Serialize)]
#[serde(tag = "$t", content = "v")]
pub enum NamespaceBody {
  Block(Vec<Node<Stmt>>),
  Namespace(Box<Node<NamespaceDecl>>),
}

/// Global augmentation: `declare global { }`
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct GlobalDecl {
  pub body: Vec<Node<Stmt>>,
}
