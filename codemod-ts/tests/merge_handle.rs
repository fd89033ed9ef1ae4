use codemod_ts::merge_handle_composition;
use codemod_ts::MergeOutcome;
use emit_ts::emit_top_level;
use parse_ts::parse;
use similar::ChangeTag;
use similar::TextDiff;

fn assert_text_eq(actual: &str, expected: &str) {
  if actual != expected {
    let diff = TextDiff::from_lines(expected, actual);
    let mut rendered = String::new();
    for change in diff.iter_all_changes() {
      let sign = match change.tag() {
        ChangeTag::Delete => "-",
        ChangeTag::Insert => "+",
        ChangeTag::Equal => " ",
      };
      rendered.push_str(sign);
      rendered.push_str(change.value());
    }
    panic!("emitted text mismatch (expected vs actual):\n{rendered}");
  }
}

fn merge(source: &str, typed: bool, name: &str, fragment: &str) -> (MergeOutcome, String) {
  let mut top = parse(source).unwrap();
  let outcome = merge_handle_composition(&mut top, typed, name, fragment).unwrap();
  (outcome, emit_top_level(&top))
}

const AUTH_FRAGMENT: &str = "async ({ event, resolve }) => {\n  console.log(event);\n  return resolve(event);\n}";

#[test]
fn promotes_plain_inline_declaration() {
  let (outcome, text) = merge(
    "export const handle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n",
    false,
    "auth",
    AUTH_FRAGMENT,
  );
  assert_eq!(outcome, MergeOutcome::Promoted);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const originalHandle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n\
     const auth = async ({ event, resolve }) => {\n  console.log(event);\n  return resolve(event);\n};\n\
     export const handle = sequence(originalHandle, auth);\n",
  );
}

#[test]
fn appends_to_existing_composition_preserving_order() {
  let (outcome, text) = merge(
    "import { sequence } from '@sveltejs/kit/hooks';\nexport const handle = sequence(a, b);\n",
    false,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Appended);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const auth = ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(a, b, auth);\n",
  );
}

#[test]
fn creates_fresh_typed_hook_in_empty_file() {
  let (outcome, text) = merge(
    "",
    true,
    "auth",
    "async ({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Created);
  assert_text_eq(
    &text,
    "import type { Handle } from '@sveltejs/kit';\n\
     const auth: Handle = async ({ event, resolve }) => resolve(event);\n\
     export const handle = auth;\n",
  );
}

#[test]
fn typed_promotion_preserves_existing_annotation() {
  let (outcome, text) = merge(
    "import type { Handle } from '@sveltejs/kit';\n\
     export const handle: Handle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n",
    true,
    "auth",
    AUTH_FRAGMENT,
  );
  assert_eq!(outcome, MergeOutcome::Promoted);
  assert_text_eq(
    &text,
    "import type { Handle } from '@sveltejs/kit';\n\
     import { sequence } from '@sveltejs/kit/hooks';\n\
     const originalHandle: Handle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n\
     const auth: Handle = async ({ event, resolve }) => {\n  console.log(event);\n  return resolve(event);\n};\n\
     export const handle = sequence(originalHandle, auth);\n",
  );
}

#[test]
fn typed_append_adds_type_import() {
  let (outcome, text) = merge(
    "import { sequence } from '@sveltejs/kit/hooks';\nexport const handle = sequence(a);\n",
    true,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Appended);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     import type { Handle } from '@sveltejs/kit';\n\
     const auth: Handle = ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(a, auth);\n",
  );
}

#[test]
fn promotes_aliased_specifier_export_with_rename() {
  let (outcome, text) = merge(
    "function foo(event) {\n  return foo(event);\n}\nexport { foo as handle };\n",
    false,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Promoted);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     function originalHandle(event) {\n  return originalHandle(event);\n}\n\
     const auth = ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(originalHandle, auth);\n",
  );
}

#[test]
fn promotes_inline_exported_function_declaration() {
  let (outcome, text) = merge(
    "export function handle(event) {\n  return resolve(event);\n}\n",
    false,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Promoted);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     function originalHandle(event) {\n  return resolve(event);\n}\n\
     const auth = ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(originalHandle, auth);\n",
  );
}

#[test]
fn appends_to_composition_behind_aliased_specifier() {
  let (outcome, text) = merge(
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const composed = sequence(a);\n\
     export { composed as handle };\n",
    false,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Appended);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const auth = ({ event, resolve }) => resolve(event);\n\
     const composed = sequence(a, auth);\n\
     export { composed as handle };\n",
  );
}

#[test]
fn pass_through_export_is_not_renamed() {
  let (outcome, text) = merge(
    "const otherHandle = ({ event, resolve }) => resolve(event);\nexport const handle = otherHandle;\n",
    false,
    "auth",
    "async ({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Promoted);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const otherHandle = ({ event, resolve }) => resolve(event);\n\
     const auth = async ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(otherHandle, auth);\n",
  );
}

#[test]
fn specifier_removal_keeps_unrelated_entries() {
  let (outcome, text) = merge(
    "function foo(event) {\n  return event;\n}\nconst bar = 1;\nexport { foo as handle, bar };\n",
    false,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Promoted);
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const bar = 1;\n\
     export { bar };\n\
     function originalHandle(event) {\n  return event;\n}\n\
     const auth = ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(originalHandle, auth);\n",
  );
}

#[test]
fn reuses_already_declared_new_unit() {
  let (outcome, text) = merge(
    "const auth = ({ event, resolve }) => resolve(event);\nexport const handle = sequence(logger);\n",
    false,
    "auth",
    "({ event, resolve }) => resolve(event)",
  );
  assert_eq!(outcome, MergeOutcome::Appended);
  assert_text_eq(
    &text,
    "const auth = ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(logger, auth);\n",
  );
}

#[test]
fn merge_is_idempotent_across_all_shapes() {
  let sources = [
    "",
    "export const handle = async ({ event, resolve }) => resolve(event);\n",
    "import { sequence } from '@sveltejs/kit/hooks';\nexport const handle = sequence(a);\n",
    "function foo(event) {\n  return event;\n}\nexport { foo as handle };\n",
    "const otherHandle = ({ event, resolve }) => resolve(event);\nexport const handle = otherHandle;\n",
  ];
  for source in sources {
    let mut top = parse(source).unwrap();
    merge_handle_composition(&mut top, false, "auth", AUTH_FRAGMENT).unwrap();
    let once = emit_top_level(&top);

    let mut again = parse(&once).unwrap();
    let outcome = merge_handle_composition(&mut again, false, "auth", AUTH_FRAGMENT).unwrap();
    assert_eq!(outcome, MergeOutcome::Unchanged, "source: {source:?}");
    assert_text_eq(&emit_top_level(&again), &once);
  }
}

#[test]
fn exactly_one_export_of_the_target_name_remains() {
  let sources = [
    "",
    "export const handle = sequence(a);\n",
    "export const handle = ({ event, resolve }) => resolve(event);\n",
    "function foo(event) {\n  return event;\n}\nexport { foo as handle };\n",
  ];
  for source in sources {
    let mut top = parse(source).unwrap();
    merge_handle_composition(&mut top, false, "auth", AUTH_FRAGMENT).unwrap();
    let text = emit_top_level(&top);
    let exports = text
      .lines()
      .filter(|line| line.starts_with("export") && line.contains("handle"))
      .count();
    assert_eq!(exports, 1, "source: {source:?}\nresult:\n{text}");
  }
}

#[test]
fn rename_collision_picks_numeric_suffix() {
  let (_, text) = merge(
    "const originalHandle = 1;\nexport const handle = ({ event, resolve }) => resolve(event);\n",
    false,
    "auth",
    "async ({ event, resolve }) => resolve(event)",
  );
  assert_text_eq(
    &text,
    "import { sequence } from '@sveltejs/kit/hooks';\n\
     const originalHandle = 1;\n\
     const originalHandle1 = ({ event, resolve }) => resolve(event);\n\
     const auth = async ({ event, resolve }) => resolve(event);\n\
     export const handle = sequence(originalHandle1, auth);\n",
  );
}

#[test]
fn unsupported_source_shape_reports_an_error() {
  assert!(parse("export default function () {}\n").is_err());
  let mut top = parse("export const handle = sequence(a);\n").unwrap();
  assert!(merge_handle_composition(&mut top, false, "auth", "const x = 1;").is_err());
}
