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

// Already-canonical sources must survive parse → emit byte for byte.
#[test]
fn canonical_sources_are_fixed_points() {
  let sources = [
    "import type { Handle } from '@sveltejs/kit';\n",
    "import { sequence } from '@sveltejs/kit/hooks';\n",
    "import 'polyfills';\n",
    "export {};\n",
    "export { foo as handle, bar };\n",
    "const auth: Handle = async ({ event, resolve }) => {\n  return resolve(event);\n};\n",
    "export const handle = sequence(auth, logging);\n",
    "function originalHandle(event) {\n  return originalHandle(event);\n}\n",
    "declare global {\n  namespace App {\n    interface Locals {\n      user: string | null;\n    }\n  }\n}\n",
    "export type Session = { user: string }[];\n",
    "const route = event.url.pathname === '/admin' ? deny : allow;\n",
    "const name = event.locals.user?.name ?? 'guest';\n",
    "if (!event.locals.user) {\n  return resolve(event);\n} else if (redirecting) {\n  return redirect;\n} else {\n  return resolve(event);\n}\n",
    "const greeting = `hello ${name}`;\n",
  ];
  for source in sources {
    assert_text_eq(&emit_top_level(&parse(source).unwrap()), source);
  }
}

// Anything parseable must settle after a single emit.
#[test]
fn emit_settles_after_one_pass() {
  let sources = [
    "import {sequence} from \"@sveltejs/kit/hooks\";export const handle=sequence(a,b)",
    "export   const   handle = async ({ event, resolve }) =>\n  resolve(event)\n",
    "declare global { namespace App { interface Locals { user?: string } } }",
    "const x = a ?? (b && c);",
    "type Keys = ('a' | 'b')[];",
  ];
  for source in sources {
    let once = emit_top_level(&parse(source).unwrap());
    let twice = emit_top_level(&parse(&once).unwrap());
    assert_text_eq(&twice, &once);
  }
}
