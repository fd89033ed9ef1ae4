use super::node::Node;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum TypeExpr {
  Array(Node<ArrayType>),
  LitStr(Node<LitStrType>),
  Named(Node<NamedType>),
  Object(Node<ObjectType>),
  Union(Node<UnionType>),
}

/// `A.B.C<T, U>`; primitive keywords (`string`, `number`, ...) are a
/// single-segment path.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct NamedType {
  #[drive(skip)]
  pub path: Vec<String>,
  pub arguments: Vec<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct UnionType {
  pub members: Vec<Node<TypeExpr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct LitStrType {
  #[drive(skip)]
  pub value: String,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ArrayType {
  pub element: Node<TypeExpr>,
}

/// Inline object type: `{ a: T; b?: U }`.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ObjectType {
  pub members: Vec<Node<TypeMember>>,
}

/// A property signature; shared by inline object types and interface bodies.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct TypeMember {
  #[drive(skip)]
  pub readonly: bool,
  #[drive(skip)]
  pub name: String,
  #[drive(skip)]
  pub optional: bool,
  pub type_expr: Node<TypeExpr>,
}
