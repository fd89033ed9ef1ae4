use super::Parser;
use crate::ast::node::Node;
use crate::ast::type_expr::ArrayType;
use crate::ast::type_expr::LitStrType;
use crate::ast::type_expr::NamedType;
use crate::ast::type_expr::ObjectType;
use crate::ast::type_expr::TypeExpr;
use crate::ast::type_expr::TypeMember;
use crate::ast::type_expr::UnionType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn type_expr(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    // A leading `|` is allowed on the first union member.
    let leading_bar = self.consume_if(TT::Bar).is_match();
    let first = self.type_postfix()?;
    if !leading_bar && self.peek().typ != TT::Bar {
      return Ok(first);
    }
    let mut members = vec![first];
    while self.consume_if(TT::Bar).is_match() {
      members.push(self.type_postfix()?);
    }
    if members.len() == 1 {
      // `| T` alone is just T.
      return Ok(members.remove(0));
    }
    let mut loc = members[0].loc;
    loc.extend(members[members.len() - 1].loc);
    Ok(Node::new(loc, UnionType { members }).wrap(TypeExpr::from))
  }

  fn type_postfix(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let mut typ = self.type_primary()?;
    while self.peek().typ == TT::BracketOpen && self.peek_at(1).typ == TT::BracketClose {
      self.consume();
      let close = self.consume();
      let mut loc = typ.loc;
      loc.extend(close.loc);
      typ = Node::new(loc, ArrayType { element: typ }).wrap(TypeExpr::from);
    }
    Ok(typ)
  }

  fn type_primary(&mut self) -> SyntaxResult<Node<TypeExpr>> {
    let t = self.peek();
    match t.typ {
      TT::LiteralString => {
        let value = self.lit_str_val()?;
        Ok(Node::new(t.loc, LitStrType { value }).wrap(TypeExpr::from))
      }
      TT::BraceOpen => Ok(self.object_type()?.wrap(TypeExpr::from)),
      TT::ParenOpen => {
        self.consume();
        let inner = self.type_expr()?;
        self.require(TT::ParenClose)?;
        Ok(inner)
      }
      _ => Ok(self.named_type()?.wrap(TypeExpr::from)),
    }
  }

  fn named_type(&mut self) -> SyntaxResult<Node<NamedType>> {
    self.with_loc(|p| {
      let mut path = vec![p.require_identifier()?];
      while p.consume_if(TT::Dot).is_match() {
        path.push(p.require_identifier()?);
      }
      let mut arguments = Vec::new();
      if p.consume_if(TT::ChevronLeft).is_match() {
        loop {
          arguments.push(p.type_expr()?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
        p.require(TT::ChevronRight)?;
      }
      Ok(NamedType { path, arguments })
    })
  }

  fn object_type(&mut self) -> SyntaxResult<Node<ObjectType>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let members = p.type_members(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(ObjectType { members })
    })
  }

  /// Property signatures up to (not consuming) `end`. Members separate with
  /// `;`, `,`, or just a line break.
  pub fn type_members(&mut self, end: TT) -> SyntaxResult<Vec<Node<TypeMember>>> {
    let mut members = Vec::new();
    while self.peek().typ != end {
      members.push(self.with_loc(|p| {
        // `readonly` immediately before `:` or `?` is a property named
        // `readonly`, not the modifier.
        let readonly = p.peek().typ == TT::KeywordReadonly
          && !matches!(p.peek_at(1).typ, TT::Colon | TT::Question);
        if readonly {
          p.consume();
        }
        let name = p.require_identifier()?;
        let optional = p.consume_if(TT::Question).is_match();
        p.require(TT::Colon)?;
        let type_expr = p.type_expr()?;
        Ok(TypeMember {
          readonly,
          name,
          optional,
          type_expr,
        })
      })?);
      if matches!(self.peek().typ, TT::Semicolon | TT::Comma) {
        self.consume();
      }
    }
    Ok(members)
  }
}
