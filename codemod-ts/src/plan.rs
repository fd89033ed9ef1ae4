//! Merge Planner: a pure decision from (finding, fragment) to the action the
//! rewriter applies. No mutation happens here.

use crate::locate::HookFinding;
use crate::locate::InitShape;
use parse_ts::ast::expr::Expr;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stx::TopLevel;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum MergeAction {
  /// No prior construct: declare the new unit and export it directly under
  /// the public name; nothing to compose with.
  Create,
  /// Already merged; leave the tree untouched.
  Noop,
  /// A composition call exists: append the new unit to its argument list.
  Append,
  /// A plain declaration exists: introduce a composition over the original
  /// and the new unit. `rename` is the internal name the original binding
  /// moves to, or None when the original was a pass-through reference.
  Promote { rename: Option<String> },
}

pub fn plan_merge(
  top: &TopLevel,
  finding: Option<&HookFinding>,
  new_unit_name: &str,
  fragment: &Node<Expr>,
  export_name: &str,
) -> MergeAction {
  let Some(finding) = finding else {
    return MergeAction::Create;
  };
  match &finding.init {
    InitShape::Composition { arguments } => {
      if arguments.iter().any(|arg| arg == new_unit_name) {
        MergeAction::Noop
      } else {
        MergeAction::Append
      }
    }
    InitShape::PassThrough { target } if target == new_unit_name => MergeAction::Noop,
    init => {
      // A plain declaration whose value already equals the fragment is the
      // merged state of an earlier run.
      if let InitShape::PassThrough { .. } | InitShape::Other = init {
        if initializer_equals_fragment(top, finding, fragment) {
          return MergeAction::Noop;
        }
      }
      let rename = if matches!(init, InitShape::PassThrough { .. }) {
        None
      } else {
        Some(internal_rename_name(top, export_name))
      };
      MergeAction::Promote { rename }
    }
  }
}

fn initializer_equals_fragment(top: &TopLevel, finding: &HookFinding, fragment: &Node<Expr>) -> bool {
  let Some(stmt) = top.body.get(finding.decl_index) else {
    return false;
  };
  let Stmt::VarDecl(decl) = stmt.stx.as_ref() else {
    return false;
  };
  let Some(initializer) = &decl.stx.declarators[0].stx.initializer else {
    return false;
  };
  structurally_equal(initializer, fragment)
}

/// Node locations never serialize, so two trees with the same syntax compare
/// equal regardless of where (or whether) they appeared in source.
pub fn structurally_equal(a: &Node<Expr>, b: &Node<Expr>) -> bool {
  match (serde_json::to_value(a), serde_json::to_value(b)) {
    (Ok(a), Ok(b)) => a == b,
    _ => false,
  }
}

/// `originalHandle` for `handle`; numeric suffixes disambiguate when the
/// preferred name is already declared.
pub fn internal_rename_name(top: &TopLevel, export_name: &str) -> String {
  let mut chars = export_name.chars();
  let capitalized = match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
    None => String::new(),
  };
  let base = format!("original{capitalized}");
  if !is_declared(top, &base) {
    return base;
  }
  let mut n = 1u32;
  loop {
    let candidate = format!("{base}{n}");
    if !is_declared(top, &candidate) {
      return candidate;
    }
    n += 1;
  }
}

/// Whether `name` is bound by any top-level declaration or import.
pub fn is_declared(top: &TopLevel, name: &str) -> bool {
  top.body.iter().any(|stmt| match stmt.stx.as_ref() {
    Stmt::VarDecl(decl) => decl
      .stx
      .declarators
      .iter()
      .any(|declarator| declarator.stx.pattern.stx.as_id() == Some(name)),
    Stmt::FuncDecl(decl) => decl.stx.name == name,
    Stmt::Import(import) => {
      import
        .stx
        .default
        .as_ref()
        .is_some_and(|default| default.stx.name == name)
        || import.stx.names.iter().any(|entry| entry.stx.local == name)
    }
    _ => false,
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::builder;
  use crate::locate::locate_hook;
  use crate::HookSpec;
  use parse_ts::parse;

  fn plan(source: &str, new_unit_name: &str, fragment_source: &str) -> MergeAction {
    let top = parse(source).unwrap();
    let spec = HookSpec::default();
    let finding = locate_hook(&top.stx, &spec).unwrap();
    let fragment = builder::expression_from_source(fragment_source).unwrap();
    plan_merge(
      &top.stx,
      finding.as_ref(),
      new_unit_name,
      &fragment,
      &spec.export_name,
    )
  }

  #[test]
  fn empty_program_creates() {
    assert_eq!(plan("", "auth", "({ event, resolve }) => resolve(event)"), MergeAction::Create);
  }

  #[test]
  fn composition_missing_unit_appends() {
    assert_eq!(
      plan("export const handle = sequence(a, b);\n", "auth", "x => x"),
      MergeAction::Append
    );
  }

  #[test]
  fn composition_containing_unit_is_noop() {
    assert_eq!(
      plan("export const handle = sequence(a, auth);\n", "auth", "x => x"),
      MergeAction::Noop
    );
  }

  #[test]
  fn plain_declaration_promotes_with_rename() {
    assert_eq!(
      plan(
        "export const handle = async ({ event, resolve }) => resolve(event);\n",
        "auth",
        "x => x"
      ),
      MergeAction::Promote {
        rename: Some("originalHandle".to_string()),
      }
    );
  }

  #[test]
  fn pass_through_promotes_without_rename() {
    assert_eq!(
      plan(
        "const other = x => x;\nexport const handle = other;\n",
        "auth",
        "y => y"
      ),
      MergeAction::Promote { rename: None }
    );
  }

  #[test]
  fn identical_initializer_is_noop() {
    assert_eq!(
      plan(
        "export const handle = async ({ event, resolve }) => resolve(event);\n",
        "auth",
        "async ({ event, resolve }) => resolve(event)"
      ),
      MergeAction::Noop
    );
  }

  #[test]
  fn rename_avoids_existing_bindings() {
    let top = parse("const originalHandle = 1;\nconst originalHandle1 = 2;\n").unwrap();
    assert_eq!(internal_rename_name(&top.stx, "handle"), "originalHandle2");
  }
}
