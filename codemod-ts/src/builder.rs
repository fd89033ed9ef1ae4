//! Manufactures well-formed fragment nodes. These are the merge engine's
//! only way to introduce new tree content, so everything here goes through
//! the same AST types the parser produces; synthetic nodes print and compare
//! exactly like parsed ones.

use crate::error::MergeResult;
use crate::error::StructureError;
use crate::error::StructureErrorKind;
use parse_ts::ast::expr::CallArg;
use parse_ts::ast::expr::CallExpr;
use parse_ts::ast::expr::Expr;
use parse_ts::ast::expr::IdExpr;
use parse_ts::ast::import_export::ExportName;
use parse_ts::ast::import_export::ImportName;
use parse_ts::ast::node::Node;
use parse_ts::ast::pat::IdPat;
use parse_ts::ast::pat::Pat;
use parse_ts::ast::pat::PatDecl;
use parse_ts::ast::stmt::ExportListStmt;
use parse_ts::ast::stmt::ImportStmt;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stmt::VarDecl;
use parse_ts::ast::stmt::VarDeclMode;
use parse_ts::ast::stmt::VarDeclarator;
use parse_ts::ast::type_expr::NamedType;
use parse_ts::ast::type_expr::TypeExpr;
use parse_ts::parse;

pub fn id(name: impl Into<String>) -> Node<Expr> {
  Node::synthetic(IdExpr { name: name.into() }).wrap(Expr::from)
}

pub fn call(callee: Node<Expr>, arguments: impl IntoIterator<Item = Node<Expr>>) -> Node<Expr> {
  Node::synthetic(CallExpr {
    optional_chaining: false,
    callee,
    arguments: arguments
      .into_iter()
      .map(|value| Node::synthetic(CallArg {
        spread: false,
        value,
      }))
      .collect(),
  })
  .wrap(Expr::from)
}

pub fn named_type(name: impl Into<String>) -> Node<TypeExpr> {
  Node::synthetic(NamedType {
    path: vec![name.into()],
    arguments: Vec::new(),
  })
  .wrap(TypeExpr::from)
}

pub fn const_decl(
  name: impl Into<String>,
  type_annotation: Option<Node<TypeExpr>>,
  initializer: Node<Expr>,
) -> Node<Stmt> {
  var_decl(false, name, type_annotation, initializer)
}

pub fn export_const(
  name: impl Into<String>,
  type_annotation: Option<Node<TypeExpr>>,
  initializer: Node<Expr>,
) -> Node<Stmt> {
  var_decl(true, name, type_annotation, initializer)
}

fn var_decl(
  export: bool,
  name: impl Into<String>,
  type_annotation: Option<Node<TypeExpr>>,
  initializer: Node<Expr>,
) -> Node<Stmt> {
  let pat = Node::synthetic(IdPat { name: name.into() }).wrap(Pat::from);
  Node::synthetic(VarDecl {
    export,
    mode: VarDeclMode::Const,
    declarators: vec![Node::synthetic(VarDeclarator {
      pattern: Node::synthetic(PatDecl { pat }),
      type_annotation,
      initializer: Some(initializer),
    })],
  })
  .wrap(Stmt::from)
}

/// `export { local as exported, ... };`
pub fn export_specifiers(names: &[(&str, &str)]) -> Node<Stmt> {
  Node::synthetic(ExportListStmt {
    type_only: false,
    names: names
      .iter()
      .map(|(local, exported)| Node::synthetic(ExportName {
        local: (*local).to_string(),
        exported: (*exported).to_string(),
      }))
      .collect(),
    from: None,
  })
  .wrap(Stmt::from)
}

pub fn import_named(module: impl Into<String>, names: &[&str], type_only: bool) -> Node<Stmt> {
  Node::synthetic(ImportStmt {
    type_only,
    default: None,
    names: names
      .iter()
      .map(|name| Node::synthetic(ImportName {
        imported: (*name).to_string(),
        local: (*name).to_string(),
      }))
      .collect(),
    module: module.into(),
  })
  .wrap(Stmt::from)
}

/// Sets the declarator's annotation; an existing annotation is left alone.
pub fn attach_type_annotation(declarator: &mut VarDeclarator, type_name: &str) {
  if declarator.type_annotation.is_none() {
    declarator.type_annotation = Some(named_type(type_name));
  }
}

/// Parses a source fragment as a single expression.
pub fn expression_from_source(source: &str) -> MergeResult<Node<Expr>> {
  // Parenthesized so fragments that open with `{` or `async` parse in
  // expression position.
  let trimmed = source.trim().trim_end_matches(';');
  let top = parse(&format!("({trimmed})"))?;
  let mut body = top.stx.body;
  if body.len() != 1 {
    return Err(StructureError::new(StructureErrorKind::UnexpectedShape(
      "fragment is not a single expression",
    )));
  }
  match *body.remove(0).stx {
    Stmt::Expr(stmt) => Ok(stmt.stx.expr),
    _ => Err(StructureError::new(StructureErrorKind::UnexpectedShape(
      "fragment is not an expression statement",
    ))),
  }
}

/// Parses a source fragment as a statement list.
pub fn statements_from_source(source: &str) -> MergeResult<Vec<Node<Stmt>>> {
  Ok(parse(source)?.stx.body)
}

#[cfg(test)]
mod tests {
  use super::*;
  use emit_ts::emit_top_level;
  use parse_ts::ast::stx::TopLevel;

  fn print(stmts: Vec<Node<Stmt>>) -> String {
    emit_top_level(&Node::synthetic(TopLevel { body: stmts }))
  }

  #[test]
  fn builds_export_const_composition() {
    let composition = call(id("sequence"), [id("originalHandle"), id("auth")]);
    assert_eq!(
      print(vec![export_const("handle", None, composition)]),
      "export const handle = sequence(originalHandle, auth);\n"
    );
  }

  #[test]
  fn builds_typed_declaration() {
    let stmt = const_decl("auth", Some(named_type("Handle")), id("guard"));
    assert_eq!(print(vec![stmt]), "const auth: Handle = guard;\n");
  }

  #[test]
  fn builds_type_only_import() {
    assert_eq!(
      print(vec![import_named("@sveltejs/kit", &["Handle"], true)]),
      "import type { Handle } from '@sveltejs/kit';\n"
    );
  }

  #[test]
  fn fragment_expression_round_trips() {
    let expr = expression_from_source("async ({ event, resolve }) => resolve(event)").unwrap();
    assert_eq!(
      print(vec![export_const("handle", None, expr)]),
      "export const handle = async ({ event, resolve }) => resolve(event);\n"
    );
  }

  #[test]
  fn malformed_fragment_is_a_structure_error() {
    assert!(expression_from_source("const x =").is_err());
  }
}
