//! Idempotent AST-merge engine for scaffolding codemods.
//!
//! Given a parsed source file that may or may not already wire up a target
//! construct (the well-known hook export, in any of its recognized surface
//! forms), these merges deterministically produce a correct tree without
//! duplicating or corrupting existing code. Re-running a merge on its own
//! output is a no-op.
//!
//! ```
//! use codemod_ts::merge_handle_composition;
//! use codemod_ts::MergeOutcome;
//! use emit_ts::emit_top_level;
//! use parse_ts::parse;
//!
//! let mut tree = parse("export const handle = sequence(logger);\n").unwrap();
//! let outcome = merge_handle_composition(
//!   &mut tree,
//!   false,
//!   "auth",
//!   "async ({ event, resolve }) => resolve(event)",
//! )
//! .unwrap();
//! assert_eq!(outcome, MergeOutcome::Appended);
//! assert_eq!(
//!   emit_top_level(&tree),
//!   "const auth = async ({ event, resolve }) => resolve(event);\nexport const handle = sequence(logger, auth);\n"
//! );
//! ```

pub mod ambient;
pub mod builder;
pub mod error;
pub mod imports;
pub mod locate;
pub mod plan;
pub mod rewrite;

pub use ambient::ensure_ambient_interface;
pub use ambient::ensure_global_interface;
pub use ambient::APP_NAMESPACE;
pub use error::MergeResult;
pub use error::StructureError;
pub use error::StructureErrorKind;
pub use locate::locate_hook;
pub use locate::HookFinding;
pub use locate::InitShape;
pub use plan::plan_merge;
pub use plan::MergeAction;

use parse_ts::ast::expr::Expr;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::stx::TopLevel;

/// The construct a merge targets. The defaults describe the well-known hook
/// convention; other compositions of the same shape only need a different
/// spec.
#[derive(Clone, Debug)]
pub struct HookSpec {
  /// Public export name (`handle`).
  pub export_name: String,
  /// Composition helper identifier (`sequence`).
  pub helper: String,
  /// Module the helper is imported from.
  pub helper_module: String,
  /// Type annotation for typed mode (`Handle`).
  pub type_name: String,
  /// Module the type is imported from.
  pub type_module: String,
}

impl Default for HookSpec {
  fn default() -> HookSpec {
    HookSpec {
      export_name: "handle".to_string(),
      helper: "sequence".to_string(),
      helper_module: "@sveltejs/kit/hooks".to_string(),
      type_name: "Handle".to_string(),
      type_module: "@sveltejs/kit".to_string(),
    }
  }
}

/// What a merge did, for caller-facing reporting.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MergeOutcome {
  /// No prior construct existed; a fresh declaration and export were added.
  Created,
  /// The new unit was appended to an existing composition.
  Appended,
  /// A plain declaration was promoted to a composition.
  Promoted,
  /// Already merged; the tree is untouched.
  Unchanged,
}

/// Merges `new_unit_source` into the default hook composition.
pub fn merge_handle_composition(
  top: &mut Node<TopLevel>,
  typed: bool,
  new_unit_name: &str,
  new_unit_source: &str,
) -> MergeResult<MergeOutcome> {
  merge_hook_composition(top, &HookSpec::default(), typed, new_unit_name, new_unit_source)
}

pub fn merge_hook_composition(
  top: &mut Node<TopLevel>,
  spec: &HookSpec,
  typed: bool,
  new_unit_name: &str,
  new_unit_source: &str,
) -> MergeResult<MergeOutcome> {
  let fragment = builder::expression_from_source(new_unit_source)?;
  let top = top.stx.as_mut();
  let finding = locate_hook(top, spec)?;
  let action = plan_merge(top, finding.as_ref(), new_unit_name, &fragment, &spec.export_name);
  match (action, finding) {
    (MergeAction::Noop, _) => Ok(MergeOutcome::Unchanged),
    (MergeAction::Create, _) => {
      let mut block = Vec::new();
      let created = !plan::is_declared(top, new_unit_name);
      if created {
        block.push(new_unit_decl(new_unit_name, typed, spec, fragment));
      }
      block.push(builder::export_const(
        &spec.export_name,
        None,
        builder::id(new_unit_name),
      ));
      rewrite::append_statements(top, block);
      if typed && created {
        imports::ensure_named_import(top, &spec.type_module, &spec.type_name, true);
      }
      Ok(MergeOutcome::Created)
    }
    (MergeAction::Append, Some(finding)) => {
      let mut composition_index = finding.decl_index;
      let created = !plan::is_declared(top, new_unit_name);
      if created {
        // The new declaration hoists immediately before the (otherwise
        // untouched) composition statement.
        rewrite::insert_statement(
          top,
          composition_index,
          new_unit_decl(new_unit_name, typed, spec, fragment),
        );
        composition_index += 1;
      }
      rewrite::push_composition_arg(top, composition_index, &spec.helper, new_unit_name)?;
      if typed && created {
        imports::ensure_named_import(top, &spec.type_module, &spec.type_name, true);
      }
      Ok(MergeOutcome::Appended)
    }
    (MergeAction::Promote { rename }, Some(finding)) => {
      let mut block = Vec::new();
      let reference = match (finding.specifier, rename) {
        (true, Some(new_name)) => {
          let dropped =
            rewrite::remove_export_specifier(top, finding.export_index, &spec.export_name)?;
          let mut decl_index = finding.decl_index;
          if dropped && finding.export_index < decl_index {
            decl_index -= 1;
          }
          let mut original = rewrite::remove_statement(top, decl_index);
          rewrite::rename_binding(&mut original, &finding.local_name, &new_name);
          block.push(original);
          new_name
        }
        (true, None) => {
          // Pass-through behind a specifier: the standalone declaration
          // stays put; the composition references it by its local name.
          rewrite::remove_export_specifier(top, finding.export_index, &spec.export_name)?;
          finding.local_name.clone()
        }
        (false, Some(new_name)) => {
          let mut original = rewrite::remove_statement(top, finding.decl_index);
          rewrite::strip_export(&mut original);
          rewrite::rename_binding(&mut original, &finding.local_name, &new_name);
          block.push(original);
          new_name
        }
        (false, None) => {
          // `export const handle = other;` dissolves into the composition.
          rewrite::remove_statement(top, finding.decl_index);
          let InitShape::PassThrough { target } = finding.init else {
            return Err(StructureError::new(StructureErrorKind::UnexpectedShape(
              "pass-through promotion without a pass-through initializer",
            )));
          };
          target
        }
      };
      let created = !plan::is_declared(top, new_unit_name);
      if created {
        block.push(new_unit_decl(new_unit_name, typed, spec, fragment));
      }
      block.push(builder::export_const(
        &spec.export_name,
        None,
        builder::call(builder::id(&spec.helper), [
          builder::id(&reference),
          builder::id(new_unit_name),
        ]),
      ));
      rewrite::append_statements(top, block);
      imports::ensure_named_import(top, &spec.helper_module, &spec.helper, false);
      if typed && created {
        imports::ensure_named_import(top, &spec.type_module, &spec.type_name, true);
      }
      Ok(MergeOutcome::Promoted)
    }
    (_, None) => Err(StructureError::new(StructureErrorKind::UnexpectedShape(
      "planner action requires a finding",
    ))),
  }
}

fn new_unit_decl(
  name: &str,
  typed: bool,
  spec: &HookSpec,
  fragment: Node<Expr>,
) -> Node<Stmt> {
  let annotation = typed.then(|| builder::named_type(&spec.type_name));
  builder::const_decl(name, annotation, fragment)
}
