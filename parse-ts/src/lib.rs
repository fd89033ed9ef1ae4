pub mod ast;
pub mod error;
pub mod lex;
pub mod loc;
pub mod parse;
pub mod token;

use ast::node::Node;
use ast::stx::TopLevel;
use error::SyntaxResult;
use lex::Lexer;
use parse::Parser;

pub fn parse(source: &str) -> SyntaxResult<Node<TopLevel>> {
  let mut parser = Parser::new(Lexer::new(source));
  parser.parse_top_level()
}

#[cfg(test)]
mod tests {
  use super::parse;
  use crate::ast::expr::Expr;
  use crate::ast::func::FuncBody;
  use crate::ast::stmt::Stmt;
  use crate::ast::ts::NamespaceBody;

  #[test]
  fn parses_export_const_arrow_handle() {
    let top = parse("export const handle = async ({ event, resolve }) => resolve(event);\n")
      .unwrap();
    assert_eq!(top.stx.body.len(), 1);
    let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
      panic!("expected var decl");
    };
    assert!(decl.stx.export);
    let declarator = &decl.stx.declarators[0];
    assert_eq!(declarator.stx.pattern.stx.as_id(), Some("handle"));
    let Some(init) = &declarator.stx.initializer else {
      panic!("expected initializer");
    };
    let Expr::Arrow(arrow) = init.stx.as_ref() else {
      panic!("expected arrow function");
    };
    assert!(arrow.stx.func.stx.async_);
    assert!(matches!(arrow.stx.func.stx.body, FuncBody::Expr(_)));
  }

  #[test]
  fn parses_sequence_composition() {
    let top = parse(
      r#"import { sequence } from '@sveltejs/kit/hooks';
const first = ({ event, resolve }) => resolve(event);
export const handle = sequence(first, second);
"#,
    )
    .unwrap();
    assert_eq!(top.stx.body.len(), 3);
    let Stmt::VarDecl(decl) = top.stx.body[2].stx.as_ref() else {
      panic!("expected var decl");
    };
    let init = decl.stx.declarators[0].stx.initializer.as_ref().unwrap();
    let Expr::Call(call) = init.stx.as_ref() else {
      panic!("expected call");
    };
    assert_eq!(call.stx.callee.stx.as_id(), Some("sequence"));
    assert_eq!(call.stx.arguments.len(), 2);
  }

  #[test]
  fn parses_declare_global_interface() {
    let top = parse(
      r#"declare global {
  namespace App {
    interface Locals {
      user: string | null;
    }
  }
}

export {};
"#,
    )
    .unwrap();
    let Stmt::GlobalDecl(global) = top.stx.body[0].stx.as_ref() else {
      panic!("expected declare global");
    };
    let Stmt::NamespaceDecl(ns) = global.stx.body[0].stx.as_ref() else {
      panic!("expected namespace");
    };
    assert_eq!(ns.stx.name, "App");
    let NamespaceBody::Block(body) = &ns.stx.body else {
      panic!("expected block body");
    };
    let Stmt::InterfaceDecl(iface) = body[0].stx.as_ref() else {
      panic!("expected interface");
    };
    assert_eq!(iface.stx.name, "Locals");
    assert_eq!(iface.stx.members.len(), 1);
    assert_eq!(iface.stx.members[0].stx.name, "user");
    let Stmt::ExportList(list) = top.stx.body[1].stx.as_ref() else {
      panic!("expected export list");
    };
    assert!(list.stx.names.is_empty());
  }

  #[test]
  fn parses_typed_hook_with_import_type() {
    let top = parse(
      r#"import type { Handle } from '@sveltejs/kit';

export const handle: Handle = ({ event, resolve }) => {
  return resolve(event);
};
"#,
    )
    .unwrap();
    let Stmt::Import(import) = top.stx.body[0].stx.as_ref() else {
      panic!("expected import");
    };
    assert!(import.stx.type_only);
    assert_eq!(import.stx.names[0].stx.imported, "Handle");
    let Stmt::VarDecl(decl) = top.stx.body[1].stx.as_ref() else {
      panic!("expected var decl");
    };
    assert!(decl.stx.declarators[0].stx.type_annotation.is_some());
  }

  #[test]
  fn arrow_with_return_type_annotation() {
    let top = parse("const f = (a: string): number => a.length;\n").unwrap();
    let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
      panic!("expected var decl");
    };
    let init = decl.stx.declarators[0].stx.initializer.as_ref().unwrap();
    let Expr::Arrow(arrow) = init.stx.as_ref() else {
      panic!("expected arrow function");
    };
    assert!(arrow.stx.func.stx.return_type.is_some());
  }

  #[test]
  fn conditional_does_not_misparse_as_arrow() {
    let top = parse("const x = a ? (b) : c;\n").unwrap();
    let Stmt::VarDecl(decl) = top.stx.body[0].stx.as_ref() else {
      panic!("expected var decl");
    };
    let init = decl.stx.declarators[0].stx.initializer.as_ref().unwrap();
    assert!(matches!(init.stx.as_ref(), Expr::Cond(_)));
  }

  #[test]
  fn rejects_namespace_import() {
    assert!(parse("import * as path from 'path';\n").is_err());
  }

  #[test]
  fn structural_equality_ignores_locations() {
    let a = parse("export const handle = sequence(a, b);\n").unwrap();
    let b = parse("  export   const handle = sequence( a , b ) ;").unwrap();
    assert_eq!(
      serde_json::to_value(&a).unwrap(),
      serde_json::to_value(&b).unwrap()
    );
  }
}
