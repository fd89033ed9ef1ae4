use super::Parser;
use crate::ast::node::Node;
use crate::ast::ts::GlobalDecl;
use crate::ast::ts::InterfaceDecl;
use crate::ast::ts::NamespaceBody;
use crate::ast::ts::NamespaceDecl;
use crate::ast::ts::TypeAliasDecl;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn interface_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<Node<InterfaceDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordInterface)?;
      let name = p.require_identifier()?;
      let mut extends = Vec::new();
      if p.consume_if(TT::KeywordExtends).is_match() {
        loop {
          extends.push(p.type_expr()?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
      }
      p.require(TT::BraceOpen)?;
      let members = p.type_members(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(InterfaceDecl {
        export,
        declare,
        name,
        extends,
        members,
      })
    })
  }

  pub fn type_alias_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<Node<TypeAliasDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordType)?;
      let name = p.require_identifier()?;
      p.require(TT::Equals)?;
      let type_expr = p.type_expr()?;
      p.semicolon()?;
      Ok(TypeAliasDecl {
        export,
        declare,
        name,
        type_expr,
      })
    })
  }

  /// Parses `namespace A { }` or `module A { }`. A dotted name
  /// (`namespace A.B { }`) nests: each segment past the first becomes an
  /// inner namespace declaration.
  pub fn namespace_decl(&mut self, export: bool, declare: bool) -> SyntaxResult<Node<NamespaceDecl>> {
    self.with_loc(|p| {
      if !p.consume_if(TT::KeywordNamespace).is_match() {
        p.require(TT::KeywordModule)?;
      }
      p.namespace_decl_tail(export, declare)
    })
  }

  fn namespace_decl_tail(&mut self, export: bool, declare: bool) -> SyntaxResult<NamespaceDecl> {
    let name = self.require_identifier()?;
    let body = if self.consume_if(TT::Dot).is_match() {
      let inner = self.with_loc(|p| p.namespace_decl_tail(false, false))?;
      NamespaceBody::Namespace(Box::new(inner))
    } else {
      self.require(TT::BraceOpen)?;
      let body = self.stmts(TT::BraceClose)?;
      self.require(TT::BraceClose)?;
      NamespaceBody::Block(body)
    };
    Ok(NamespaceDecl {
      export,
      declare,
      name,
      body,
    })
  }

  pub fn global_decl(&mut self) -> SyntaxResult<Node<GlobalDecl>> {
    self.with_loc(|p| {
      p.require(TT::KeywordDeclare)?;
      p.require(TT::KeywordGlobal)?;
      p.require(TT::BraceOpen)?;
      let body = p.stmts(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(GlobalDecl { body })
    })
  }
}
