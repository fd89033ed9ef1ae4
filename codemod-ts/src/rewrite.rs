//! Tree Rewriter: the only module that mutates the tree. Each helper edits
//! the top-level body (or one statement) in place; orchestration of a whole
//! merge lives in the crate root.

use crate::builder;
use crate::error::MergeResult;
use crate::error::StructureError;
use crate::error::StructureErrorKind;
use derive_visitor::DriveMut;
use derive_visitor::VisitorMut;
use parse_ts::ast::expr::CallArg;
use parse_ts::ast::expr::Expr;
use parse_ts::ast::expr::IdExpr;
use parse_ts::ast::node::Node;
use parse_ts::ast::pat::IdPat;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stx::TopLevel;

pub fn remove_statement(top: &mut TopLevel, index: usize) -> Node<Stmt> {
  top.body.remove(index)
}

pub fn insert_statement(top: &mut TopLevel, index: usize, stmt: Node<Stmt>) {
  top.body.insert(index, stmt);
}

pub fn append_statements(top: &mut TopLevel, stmts: Vec<Node<Stmt>>) {
  top.body.extend(stmts);
}

/// Removes the matching specifier from an `export { ... }` statement,
/// dropping the statement entirely when it empties. Returns whether the
/// statement was dropped.
pub fn remove_export_specifier(
  top: &mut TopLevel,
  index: usize,
  exported: &str,
) -> MergeResult<bool> {
  let stmt = &mut top.body[index];
  let Stmt::ExportList(list) = stmt.stx.as_mut() else {
    return Err(StructureError::at(
      StructureErrorKind::UnexpectedShape("statement is not an export list"),
      stmt.loc,
    ));
  };
  list.stx.names.retain(|name| name.stx.exported != exported);
  if list.stx.names.is_empty() {
    top.body.remove(index);
    return Ok(true);
  }
  Ok(false)
}

pub fn strip_export(stmt: &mut Node<Stmt>) {
  match stmt.stx.as_mut() {
    Stmt::VarDecl(decl) => decl.stx.export = false,
    Stmt::FuncDecl(decl) => decl.stx.export = false,
    _ => {}
  }
}

type IdExprNode = Node<IdExpr>;
type IdPatNode = Node<IdPat>;

#[derive(VisitorMut)]
#[visitor(IdExprNode(enter), IdPatNode(enter))]
struct RenameBinding {
  from: String,
  to: String,
}

impl RenameBinding {
  fn enter_id_expr_node(&mut self, node: &mut IdExprNode) {
    if node.stx.name == self.from {
      self.to.clone_into(&mut node.stx.name);
    }
  }

  fn enter_id_pat_node(&mut self, node: &mut IdPatNode) {
    if node.stx.name == self.from {
      self.to.clone_into(&mut node.stx.name);
    }
  }
}

/// Renames the statement's binding and every reference to it inside the
/// statement, so self-references (recursion, inner reads) stay consistent.
pub fn rename_binding(stmt: &mut Node<Stmt>, from: &str, to: &str) {
  if let Stmt::FuncDecl(decl) = stmt.stx.as_mut() {
    // The declaration name is scalar state the visitor does not reach.
    if decl.stx.name == from {
      decl.stx.name = to.to_string();
    }
  }
  stmt.drive_mut(&mut RenameBinding {
    from: from.to_string(),
    to: to.to_string(),
  });
}

/// Appends an identifier reference to the composition call held by the
/// variable declaration at `index`.
pub fn push_composition_arg(
  top: &mut TopLevel,
  index: usize,
  helper: &str,
  argument: &str,
) -> MergeResult<()> {
  let stmt = &mut top.body[index];
  let loc = stmt.loc;
  let Stmt::VarDecl(decl) = stmt.stx.as_mut() else {
    return Err(StructureError::at(
      StructureErrorKind::UnexpectedShape("composition statement is not a variable declaration"),
      loc,
    ));
  };
  let Some(initializer) = &mut decl.stx.declarators[0].stx.initializer else {
    return Err(StructureError::at(
      StructureErrorKind::UnexpectedShape("composition declaration has no initializer"),
      loc,
    ));
  };
  let Expr::Call(call) = initializer.stx.as_mut() else {
    return Err(StructureError::at(
      StructureErrorKind::UnexpectedShape("composition initializer is not a call"),
      loc,
    ));
  };
  if call.stx.callee.stx.as_id() != Some(helper) {
    return Err(StructureError::at(
      StructureErrorKind::UnexpectedShape("composition callee is not the known helper"),
      loc,
    ));
  }
  call.stx.arguments.push(Node::synthetic(CallArg {
    spread: false,
    value: builder::id(argument),
  }));
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use emit_ts::emit_top_level;
  use parse_ts::parse;

  #[test]
  fn rename_rewrites_internal_references() {
    let mut top = parse("export function handle(event) {\n  return handle(event);\n}\n").unwrap();
    rename_binding(&mut top.stx.body[0], "handle", "originalHandle");
    strip_export(&mut top.stx.body[0]);
    assert_eq!(
      emit_top_level(&top),
      "function originalHandle(event) {\n  return originalHandle(event);\n}\n"
    );
  }

  #[test]
  fn rename_leaves_other_names_alone() {
    let mut top = parse("const handle = other(handle2);\n").unwrap();
    rename_binding(&mut top.stx.body[0], "handle", "originalHandle");
    assert_eq!(emit_top_level(&top), "const originalHandle = other(handle2);\n");
  }

  #[test]
  fn specifier_removal_keeps_other_entries() {
    let mut top = parse("export { a, handle, b };\n").unwrap();
    let dropped = remove_export_specifier(&mut top.stx, 0, "handle").unwrap();
    assert!(!dropped);
    assert_eq!(emit_top_level(&top), "export { a, b };\n");
  }

  #[test]
  fn emptied_specifier_list_is_dropped() {
    let mut top = parse("export { foo as handle };\nconst foo = 1;\n").unwrap();
    let dropped = remove_export_specifier(&mut top.stx, 0, "handle").unwrap();
    assert!(dropped);
    assert_eq!(emit_top_level(&top), "const foo = 1;\n");
  }

  #[test]
  fn appends_composition_argument_in_place() {
    let mut top = parse("export const handle = sequence(a, b);\n").unwrap();
    push_composition_arg(&mut top.stx, 0, "sequence", "auth").unwrap();
    assert_eq!(
      emit_top_level(&top),
      "export const handle = sequence(a, b, auth);\n"
    );
  }

  #[test]
  fn rejects_non_composition_statement() {
    let mut top = parse("export const handle = other();\n").unwrap();
    assert!(push_composition_arg(&mut top.stx, 0, "sequence", "auth").is_err());
  }
}
