//! Global Declaration Merger: locate-or-create the `declare global` →
//! namespace → interface nesting used for ambient type declarations. Each
//! level only ever transitions absent → present; nothing is removed or
//! duplicated, so repeated calls settle on the same nodes.

use crate::error::MergeResult;
use crate::error::StructureError;
use crate::error::StructureErrorKind;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stx::TopLevel;
use parse_ts::ast::ts::GlobalDecl;
use parse_ts::ast::ts::InterfaceDecl;
use parse_ts::ast::ts::NamespaceBody;
use parse_ts::ast::ts::NamespaceDecl;

/// The namespace ambient app types live in by convention.
pub const APP_NAMESPACE: &str = "App";

/// `ensure_ambient_interface(tree, "Locals")` yields the `App.Locals`
/// interface inside `declare global`, creating any missing level. Callers
/// add members to the returned declaration.
pub fn ensure_ambient_interface<'a>(
  top: &'a mut TopLevel,
  interface_name: &str,
) -> MergeResult<&'a mut Node<InterfaceDecl>> {
  ensure_global_interface(top, APP_NAMESPACE, interface_name)
}

pub fn ensure_global_interface<'a>(
  top: &'a mut TopLevel,
  namespace: &str,
  interface_name: &str,
) -> MergeResult<&'a mut Node<InterfaceDecl>> {
  let global_index = ensure_global_block(top);
  let Stmt::GlobalDecl(global) = top.body[global_index].stx.as_mut() else {
    unreachable!();
  };
  let namespace_index = ensure_namespace(&mut global.stx.body, namespace)?;
  let Stmt::NamespaceDecl(ns) = global.stx.body[namespace_index].stx.as_mut() else {
    unreachable!();
  };
  let NamespaceBody::Block(body) = &mut ns.stx.body else {
    unreachable!();
  };
  let interface_index = ensure_interface(body, interface_name);
  let Stmt::InterfaceDecl(interface) = body[interface_index].stx.as_mut() else {
    unreachable!();
  };
  Ok(interface)
}

fn ensure_global_block(top: &mut TopLevel) -> usize {
  let existing = top
    .body
    .iter()
    .position(|stmt| matches!(stmt.stx.as_ref(), Stmt::GlobalDecl(_)));
  match existing {
    Some(index) => index,
    None => {
      // New ambient blocks go before any `export {}` module marker, at the
      // end otherwise.
      let index = top
        .body
        .iter()
        .position(|stmt| matches!(stmt.stx.as_ref(), Stmt::ExportList(list) if list.stx.names.is_empty()))
        .unwrap_or(top.body.len());
      top.body.insert(
        index,
        Node::synthetic(GlobalDecl { body: Vec::new() }).wrap(Stmt::from),
      );
      index
    }
  }
}

fn ensure_namespace(body: &mut Vec<Node<Stmt>>, namespace: &str) -> MergeResult<usize> {
  for (i, stmt) in body.iter().enumerate() {
    let Stmt::NamespaceDecl(ns) = stmt.stx.as_ref() else {
      continue;
    };
    if ns.stx.name != namespace {
      continue;
    }
    // `namespace App.X { }` cannot hold the interface directly; refuse
    // rather than guess.
    if let NamespaceBody::Namespace(_) = ns.stx.body {
      return Err(StructureError::at(
        StructureErrorKind::NamespaceBodyNotBlock {
          name: namespace.to_string(),
        },
        stmt.loc,
      ));
    }
    return Ok(i);
  }
  body.push(
    Node::synthetic(NamespaceDecl {
      export: false,
      declare: false,
      name: namespace.to_string(),
      body: NamespaceBody::Block(Vec::new()),
    })
    .wrap(Stmt::from),
  );
  Ok(body.len() - 1)
}

fn ensure_interface(body: &mut Vec<Node<Stmt>>, interface_name: &str) -> usize {
  let existing = body.iter().position(|stmt| {
    matches!(stmt.stx.as_ref(), Stmt::InterfaceDecl(decl) if decl.stx.name == interface_name)
  });
  match existing {
    Some(index) => index,
    None => {
      body.push(
        Node::synthetic(InterfaceDecl {
          export: false,
          declare: false,
          name: interface_name.to_string(),
          extends: Vec::new(),
          members: Vec::new(),
        })
        .wrap(Stmt::from),
      );
      body.len() - 1
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_ts::parse;

  #[test]
  fn creates_all_three_levels() {
    let mut top = parse("").unwrap();
    let interface = ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
    assert_eq!(interface.stx.name, "Locals");
    assert_eq!(top.stx.body.len(), 1);
  }

  #[test]
  fn reuses_existing_levels() {
    let mut top = parse(
      "declare global {\n  namespace App {\n    interface Locals {\n      user: string;\n    }\n  }\n}\n",
    )
    .unwrap();
    let interface = ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
    assert_eq!(interface.stx.members.len(), 1);
    assert_eq!(top.stx.body.len(), 1);
  }

  #[test]
  fn nested_namespace_body_is_an_error() {
    let mut top = parse("declare global {\n  namespace App.Inner {}\n}\n").unwrap();
    let err = ensure_ambient_interface(&mut top.stx, "Locals").unwrap_err();
    assert!(matches!(
      err.kind,
      StructureErrorKind::NamespaceBodyNotBlock { .. }
    ));
  }

  #[test]
  fn global_block_lands_before_module_marker() {
    let mut top = parse("export {};\n").unwrap();
    ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
    assert!(matches!(top.stx.body[0].stx.as_ref(), Stmt::GlobalDecl(_)));
    assert!(matches!(top.stx.body[1].stx.as_ref(), Stmt::ExportList(_)));
  }
}
