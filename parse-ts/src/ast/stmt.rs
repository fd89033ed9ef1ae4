use super::expr::Expr;
use super::func::Func;
use super::import_export::ExportName;
use super::import_export::ImportName;
use super::node::Node;
use super::pat::IdPat;
use super::pat::PatDecl;
use super::ts::GlobalDecl;
use super::ts::InterfaceDecl;
use super::ts::NamespaceDecl;
use super::ts::TypeAliasDecl;
use super::type_expr::TypeExpr;
use derive_more::derive::From;
use derive_more::derive::TryInto;
use derive_visitor::Drive;
use derive_visitor::DriveMut;
use serde::Serialize;

// We must wrap each variant with Node<T> as otherwise we won't be able to
// visit Node<T> instead of just T.
#[derive(Debug, Drive, DriveMut, From, Serialize, TryInto)]
#[serde(tag = "$t")]
pub enum Stmt {
  Block(Node<BlockStmt>),
  Empty(Node<EmptyStmt>),
  ExportList(Node<ExportListStmt>),
  Expr(Node<ExprStmt>),
  If(Node<IfStmt>),
  Import(Node<ImportStmt>),
  Return(Node<ReturnStmt>),

  FuncDecl(Node<FuncDecl>),
  VarDecl(Node<VarDecl>),

  // TypeScript statements.
  GlobalDecl(Node<GlobalDecl>),
  InterfaceDecl(Node<InterfaceDecl>),
  NamespaceDecl(Node<NamespaceDecl>),
  TypeAliasDecl(Node<TypeAliasDecl>),
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct BlockStmt {
  pub body: Vec<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct EmptyStmt {}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExprStmt {
  pub expr: Node<Expr>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct IfStmt {
  pub test: Node<Expr>,
  pub consequent: Node<Stmt>,
  pub alternate: Option<Node<Stmt>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ReturnStmt {
  pub value: Option<Node<Expr>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ImportStmt {
  #[drive(skip)]
  pub type_only: bool,
  pub default: Option<Node<IdPat>>,
  pub names: Vec<Node<ImportName>>,
  #[drive(skip)]
  pub module: String,
}

/// `export { a, b as c };`, optionally `type`-only or re-exporting `from` a
/// module. An empty list (`export {};`) marks a file as a module.
#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct ExportListStmt {
  #[drive(skip)]
  pub type_only: bool,
  pub names: Vec<Node<ExportName>>,
  #[drive(skip)]
  pub from: Option<String>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct FuncDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub name: String,
  pub function: Node<Func>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDecl {
  #[drive(skip)]
  pub export: bool,
  #[drive(skip)]
  pub mode: VarDeclMode,
  pub declarators: Vec<Node<VarDeclarator>>,
}

#[derive(Debug, Drive, DriveMut, Serialize)]
pub struct VarDeclarator {
  pub pattern: Node<PatDecl>,
  pub type_annotation: Option<Node<TypeExpr>>,
  pub initializer: Option<Node<Expr>>,
}

#[derive(Eq, PartialEq, Clone, Copy, Debug, Serialize)]
pub enum VarDeclMode {
  Const,
  Let,
  Var,
}

impl VarDeclMode {
  pub fn syntax(&self) -> &'static str {
    match self {
      VarDeclMode::Const => "const",
      VarDeclMode::Let => "let",
      VarDeclMode::Var => "var",
    }
  }
}
