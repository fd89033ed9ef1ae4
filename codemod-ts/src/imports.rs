//! Import merger: idempotently ensures a named binding is imported from a
//! module, extending an existing import over creating a second one.

use crate::builder;
use parse_ts::ast::import_export::ImportName;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stx::TopLevel;

pub fn ensure_named_import(top: &mut TopLevel, module: &str, name: &str, type_only: bool) {
  // Any import from the module that already binds the name satisfies the
  // request, type-only or not.
  for stmt in &top.body {
    let Stmt::Import(import) = stmt.stx.as_ref() else {
      continue;
    };
    if import.stx.module != module {
      continue;
    }
    if import.stx.names.iter().any(|entry| entry.stx.imported == name) {
      return;
    }
  }
  for stmt in &mut top.body {
    let Stmt::Import(import) = stmt.stx.as_mut() else {
      continue;
    };
    if import.stx.module != module || import.stx.type_only != type_only {
      continue;
    }
    import.stx.names.push(Node::synthetic(ImportName {
      imported: name.to_string(),
      local: name.to_string(),
    }));
    return;
  }
  // No import to extend: insert a fresh one after the leading import run so
  // imports stay grouped at the top.
  let index = top
    .body
    .iter()
    .position(|stmt| !matches!(stmt.stx.as_ref(), Stmt::Import(_)))
    .unwrap_or(top.body.len());
  top
    .body
    .insert(index, builder::import_named(module, &[name], type_only));
}
