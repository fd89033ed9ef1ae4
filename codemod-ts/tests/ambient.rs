use codemod_ts::builder;
use codemod_ts::ensure_ambient_interface;
use emit_ts::emit_top_level;
use parse_ts::ast::node::Node;
use parse_ts::ast::type_expr::TypeMember;
use parse_ts::parse;

fn user_member() -> Node<TypeMember> {
  Node::synthetic(TypeMember {
    readonly: false,
    name: "user".to_string(),
    optional: false,
    type_expr: builder::named_type("string"),
  })
}

#[test]
fn creates_nesting_and_returns_interface_for_members() {
  let mut top = parse("export {};\n").unwrap();
  let interface = ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
  interface.stx.members.push(user_member());
  assert_eq!(
    emit_top_level(&top),
    "declare global {\n  namespace App {\n    interface Locals {\n      user: string;\n    }\n  }\n}\nexport {};\n"
  );
}

#[test]
fn second_call_returns_existing_interface_without_duplication() {
  let mut top = parse("export {};\n").unwrap();
  ensure_ambient_interface(&mut top.stx, "Locals")
    .unwrap()
    .stx
    .members
    .push(user_member());
  let first = emit_top_level(&top);

  let interface = ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
  assert_eq!(interface.stx.members.len(), 1);
  assert_eq!(emit_top_level(&top), first);
}

#[test]
fn merges_into_existing_ambient_block() {
  let mut top = parse(
    "declare global {\n  namespace App {\n    interface Error {\n      code: string;\n    }\n  }\n}\nexport {};\n",
  )
  .unwrap();
  let interface = ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
  assert!(interface.stx.members.is_empty());
  assert_eq!(
    emit_top_level(&top),
    "declare global {\n  namespace App {\n    interface Error {\n      code: string;\n    }\n    interface Locals {}\n  }\n}\nexport {};\n"
  );
}

#[test]
fn distinct_interfaces_coexist() {
  let mut top = parse("").unwrap();
  ensure_ambient_interface(&mut top.stx, "Locals").unwrap();
  ensure_ambient_interface(&mut top.stx, "PageData").unwrap();
  assert_eq!(
    emit_top_level(&top),
    "declare global {\n  namespace App {\n    interface Locals {}\n    interface PageData {}\n  }\n}\n"
  );
}
