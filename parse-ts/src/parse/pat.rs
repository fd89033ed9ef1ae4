use super::Parser;
use crate::ast::node::Node;
use crate::ast::pat::ArrPat;
use crate::ast::pat::IdPat;
use crate::ast::pat::ObjPat;
use crate::ast::pat::ObjPatProp;
use crate::ast::pat::Pat;
use crate::ast::pat::PatDecl;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn pat_decl(&mut self) -> SyntaxResult<Node<PatDecl>> {
    self.with_loc(|p| Ok(PatDecl { pat: p.pat()? }))
  }

  pub fn pat(&mut self) -> SyntaxResult<Node<Pat>> {
    let t = self.peek();
    match t.typ {
      TT::BraceOpen => Ok(self.obj_pat()?.wrap(Pat::from)),
      TT::BracketOpen => Ok(self.arr_pat()?.wrap(Pat::from)),
      _ => Ok(self.id_pat()?.wrap(Pat::from)),
    }
  }

  pub fn id_pat(&mut self) -> SyntaxResult<Node<IdPat>> {
    self.with_loc(|p| {
      let name = p.require_identifier()?;
      Ok(IdPat { name })
    })
  }

  fn obj_pat(&mut self) -> SyntaxResult<Node<ObjPat>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let mut properties = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BraceClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          break;
        }
        properties.push(p.with_loc(|p| {
          let key = p.require_identifier()?;
          let target = if p.consume_if(TT::Colon).is_match() {
            Some(p.pat()?)
          } else {
            None
          };
          let default_value = if p.consume_if(TT::Equals).is_match() {
            Some(p.expr(1)?)
          } else {
            None
          };
          Ok(ObjPatProp {
            key,
            target,
            default_value,
          })
        })?);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        }
      }
      p.require(TT::BraceClose)?;
      Ok(ObjPat { properties, rest })
    })
  }

  fn arr_pat(&mut self) -> SyntaxResult<Node<ArrPat>> {
    self.with_loc(|p| {
      p.require(TT::BracketOpen)?;
      let mut elements = Vec::new();
      let mut rest = None;
      while p.peek().typ != TT::BracketClose {
        if p.consume_if(TT::DotDotDot).is_match() {
          rest = Some(p.id_pat()?);
          break;
        }
        elements.push(p.pat()?);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        }
      }
      p.require(TT::BracketClose)?;
      Ok(ArrPat { elements, rest })
    })
  }
}
