pub mod emitter;

mod expr;
mod stmt;
mod type_expr;

use emitter::Emitter;
use parse_ts::ast::node::Node;
use parse_ts::ast::stx::TopLevel;

/// Prints the module with canonical formatting: two-space indentation,
/// single quotes, one statement per line, explicit semicolons, and a
/// trailing newline. Emitting a just-parsed emitted tree reproduces the
/// text byte for byte, which is what makes rewrites idempotent.
pub fn emit_top_level(top: &Node<TopLevel>) -> String {
  let mut emitter = Emitter::new();
  for stmt in &top.stx.body {
    emitter.stmt(stmt);
  }
  emitter.finish()
}

#[cfg(test)]
mod tests {
  use super::emit_top_level;
  use parse_ts::parse;

  fn roundtrip(source: &str) -> String {
    emit_top_level(&parse(source).unwrap())
  }

  #[test]
  fn canonicalizes_quotes_and_semicolons() {
    assert_eq!(
      roundtrip("import { sequence } from \"@sveltejs/kit/hooks\"\n"),
      "import { sequence } from '@sveltejs/kit/hooks';\n"
    );
  }

  #[test]
  fn emits_arrow_with_block_body() {
    let out = roundtrip("export const handle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n");
    assert_eq!(
      out,
      "export const handle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n"
    );
  }

  #[test]
  fn emits_declare_global_block() {
    let out = roundtrip(
      "declare global { namespace App { interface Locals { user: string | null } } }\nexport {};\n",
    );
    assert_eq!(
      out,
      "declare global {\n  namespace App {\n    interface Locals {\n      user: string | null;\n    }\n  }\n}\nexport {};\n"
    );
  }

  #[test]
  fn preserves_composition_argument_order() {
    assert_eq!(
      roundtrip("export const handle = sequence(a, b, c);"),
      "export const handle = sequence(a, b, c);\n"
    );
  }

  #[test]
  fn parenthesizes_mixed_nullish() {
    assert_eq!(
      roundtrip("const x = (a ?? b) || c;\n"),
      "const x = (a ?? b) || c;\n"
    );
  }

  #[test]
  fn dotted_namespace_round_trips() {
    assert_eq!(
      roundtrip("declare namespace A.B { interface C {} }\n"),
      "declare namespace A.B {\n  interface C {}\n}\n"
    );
  }

  #[test]
  fn emit_is_stable() {
    let source = r#"import type { Handle } from '@sveltejs/kit';
import { sequence } from '@sveltejs/kit/hooks';
const auth: Handle = async ({ event, resolve }) => {
  if (!event.locals.user) {
    return resolve(event);
  }
  return resolve(event);
};
export const handle = sequence(auth);
"#;
    let once = roundtrip(source);
    let twice = roundtrip(&once);
    assert_eq!(once, twice);
  }
}
