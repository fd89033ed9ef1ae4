//! Construct Locator: scans a top-level body for the target hook export in
//! any of its recognized surface forms and reduces it to a normalized
//! finding. Read-only; the finding carries statement indices, never aliased
//! references into the tree.

use crate::error::MergeResult;
use crate::error::StructureError;
use crate::error::StructureErrorKind;
use crate::HookSpec;
use parse_ts::ast::expr::Expr;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stmt::VarDecl;
use parse_ts::ast::stx::TopLevel;

/// Classification of the located declaration's initializer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InitShape {
  /// `sequence(a, b)`: the well-known helper applied to identifier
  /// references, in application order.
  Composition { arguments: Vec<String> },
  /// A bare identifier reference: the export merely forwards another
  /// binding.
  PassThrough { target: String },
  /// Any other initializer expression.
  Other,
  /// No initializer to classify (a function declaration).
  None,
}

#[derive(Clone, Debug)]
pub struct HookFinding {
  /// Index of the statement carrying the export (specifier list, or the
  /// exported declaration itself).
  pub export_index: usize,
  /// Index of the statement declaring the binding. Equal to `export_index`
  /// for inline forms; the standalone declaration for specifier exports.
  pub decl_index: usize,
  /// The export is a `export { local as exported }` specifier.
  pub specifier: bool,
  /// The local binding name the export resolves to.
  pub local_name: String,
  /// The declaration is a function declaration.
  pub function: bool,
  pub init: InitShape,
}

/// One pass over the top-level statements, first match in source order wins.
/// Precedence per statement: a specifier-list entry whose exported name
/// matches resolves to its local binding (found by a second scan); an inline
/// exported variable or function declaration matches directly.
pub fn locate_hook(top: &TopLevel, spec: &HookSpec) -> MergeResult<Option<HookFinding>> {
  for (i, stmt) in top.body.iter().enumerate() {
    match stmt.stx.as_ref() {
      Stmt::ExportList(list) if !list.stx.type_only && list.stx.from.is_none() => {
        let Some(name) = list
          .stx
          .names
          .iter()
          .find(|name| name.stx.exported == spec.export_name)
        else {
          continue;
        };
        let local = name.stx.local.clone();
        let Some((decl_index, function, init)) = find_declaration(top, &local, spec) else {
          return Err(StructureError::at(
            StructureErrorKind::MissingDeclaration { local },
            stmt.loc,
          ));
        };
        return Ok(Some(HookFinding {
          export_index: i,
          decl_index,
          specifier: true,
          local_name: local,
          function,
          init,
        }));
      }
      Stmt::VarDecl(decl) if decl.stx.export => {
        let Some(init) = match_var_decl(decl.stx.as_ref(), &spec.export_name, spec)? else {
          continue;
        };
        return Ok(Some(HookFinding {
          export_index: i,
          decl_index: i,
          specifier: false,
          local_name: spec.export_name.clone(),
          function: false,
          init,
        }));
      }
      Stmt::FuncDecl(decl) if decl.stx.export && decl.stx.name == spec.export_name => {
        return Ok(Some(HookFinding {
          export_index: i,
          decl_index: i,
          specifier: false,
          local_name: spec.export_name.clone(),
          function: true,
          init: InitShape::None,
        }));
      }
      _ => {}
    }
  }
  Ok(None)
}

/// Second pass for the specifier form: the value lives in a separate
/// top-level statement. Declarations by the wrong name are ignored.
fn find_declaration(
  top: &TopLevel,
  local: &str,
  spec: &HookSpec,
) -> Option<(usize, bool, InitShape)> {
  for (i, stmt) in top.body.iter().enumerate() {
    match stmt.stx.as_ref() {
      Stmt::VarDecl(decl) => {
        if let Ok(Some(init)) = match_var_decl(decl.stx.as_ref(), local, spec) {
          return Some((i, false, init));
        }
      }
      Stmt::FuncDecl(decl) if decl.stx.name == local => {
        return Some((i, true, InitShape::None));
      }
      _ => {}
    }
  }
  None
}

fn match_var_decl(
  decl: &VarDecl,
  name: &str,
  spec: &HookSpec,
) -> MergeResult<Option<InitShape>> {
  let matches = decl
    .declarators
    .iter()
    .any(|declarator| declarator.stx.pattern.stx.as_id() == Some(name));
  if !matches {
    return Ok(None);
  }
  if decl.declarators.len() != 1 {
    return Err(StructureError::new(StructureErrorKind::MultipleDeclarators {
      name: name.to_string(),
    }));
  }
  Ok(Some(init_shape(
    decl.declarators[0].stx.initializer.as_ref(),
    spec,
  )))
}

fn init_shape(initializer: Option<&Node<Expr>>, spec: &HookSpec) -> InitShape {
  let Some(initializer) = initializer else {
    return InitShape::None;
  };
  match initializer.stx.as_ref() {
    Expr::Id(target) => InitShape::PassThrough {
      target: target.stx.name.clone(),
    },
    Expr::Call(call) if call.stx.callee.stx.as_id() == Some(&spec.helper) => {
      let mut arguments = Vec::with_capacity(call.stx.arguments.len());
      for arg in &call.stx.arguments {
        if arg.stx.spread {
          return InitShape::Other;
        }
        match arg.stx.value.stx.as_id() {
          Some(name) => arguments.push(name.to_string()),
          None => return InitShape::Other,
        }
      }
      InitShape::Composition { arguments }
    }
    _ => InitShape::Other,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use parse_ts::parse;

  fn locate(source: &str) -> Option<HookFinding> {
    let top = parse(source).unwrap();
    locate_hook(&top.stx, &HookSpec::default()).unwrap()
  }

  #[test]
  fn finds_inline_export_const() {
    let finding = locate("export const handle = sequence(a, b);\n").unwrap();
    assert!(!finding.specifier);
    assert_eq!(finding.local_name, "handle");
    assert_eq!(finding.init, InitShape::Composition {
      arguments: vec!["a".to_string(), "b".to_string()],
    });
  }

  #[test]
  fn finds_aliased_specifier_export() {
    let finding =
      locate("function foo() {\n  return 1;\n}\nexport { foo as handle };\n").unwrap();
    assert!(finding.specifier);
    assert_eq!(finding.local_name, "foo");
    assert_eq!(finding.export_index, 1);
    assert_eq!(finding.decl_index, 0);
    assert!(finding.function);
  }

  #[test]
  fn resolves_pass_through_initializer() {
    let finding = locate("const other = 1;\nexport const handle = other;\n").unwrap();
    assert_eq!(finding.init, InitShape::PassThrough {
      target: "other".to_string(),
    });
  }

  #[test]
  fn absent_export_is_none() {
    assert!(locate("export const notHandle = 1;\n").is_none());
  }

  #[test]
  fn first_export_in_source_order_wins() {
    let finding = locate(
      "export const handle = first;\nconst x = 1;\nexport { x as handle };\n",
    )
    .unwrap();
    assert_eq!(finding.export_index, 0);
    assert!(!finding.specifier);
  }

  #[test]
  fn specifier_without_declaration_is_an_error() {
    let top = parse("export { handle };\n").unwrap();
    assert!(locate_hook(&top.stx, &HookSpec::default()).is_err());
  }

  #[test]
  fn helper_call_with_non_identifier_args_is_other() {
    let finding = locate("export const handle = sequence(a, () => 1);\n").unwrap();
    assert_eq!(finding.init, InitShape::Other);
  }
}
