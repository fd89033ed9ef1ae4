use super::Parser;
use crate::ast::expr::ArrowFuncExpr;
use crate::ast::expr::BinaryExpr;
use crate::ast::expr::BinaryOp;
use crate::ast::expr::CallArg;
use crate::ast::expr::CallExpr;
use crate::ast::expr::ComputedMemberExpr;
use crate::ast::expr::CondExpr;
use crate::ast::expr::Expr;
use crate::ast::expr::IdExpr;
use crate::ast::expr::LitArrExpr;
use crate::ast::expr::LitBoolExpr;
use crate::ast::expr::LitNullExpr;
use crate::ast::expr::LitNumExpr;
use crate::ast::expr::LitObjExpr;
use crate::ast::expr::LitStrExpr;
use crate::ast::expr::LitTemplateExpr;
use crate::ast::expr::MemberExpr;
use crate::ast::expr::ObjMember;
use crate::ast::expr::UnaryExpr;
use crate::ast::expr::UnaryOp;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::func::ParamDecl;
use crate::ast::node::Node;
use crate::ast::pat::IdPat;
use crate::ast::pat::Pat;
use crate::ast::pat::PatDecl;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::loc::Loc;
use crate::token::TT;

fn binary_op_for(typ: TT) -> Option<BinaryOp> {
  match typ {
    TT::Ampersand => None, // Bitwise ops are out of subset.
    TT::AmpersandAmpersand => Some(BinaryOp::And),
    TT::Asterisk => Some(BinaryOp::Mul),
    TT::BarBar => Some(BinaryOp::Or),
    TT::ChevronLeft => Some(BinaryOp::Lt),
    TT::ChevronLeftEquals => Some(BinaryOp::Lte),
    TT::ChevronRight => Some(BinaryOp::Gt),
    TT::ChevronRightEquals => Some(BinaryOp::Gte),
    TT::EqualsEquals => Some(BinaryOp::Eq),
    TT::EqualsEqualsEquals => Some(BinaryOp::EqStrict),
    TT::ExclamationEquals => Some(BinaryOp::Neq),
    TT::ExclamationEqualsEquals => Some(BinaryOp::NeqStrict),
    TT::Hyphen => Some(BinaryOp::Sub),
    TT::Percent => Some(BinaryOp::Mod),
    TT::Plus => Some(BinaryOp::Add),
    TT::QuestionQuestion => Some(BinaryOp::Nullish),
    TT::Slash => Some(BinaryOp::Div),
    _ => None,
  }
}

// Keywords that are valid plain identifier references in expression position.
fn is_id_expr_keyword(typ: TT) -> bool {
  matches!(
    typ,
    TT::KeywordAs
      | TT::KeywordAsync
      | TT::KeywordDeclare
      | TT::KeywordFrom
      | TT::KeywordGlobal
      | TT::KeywordModule
      | TT::KeywordNamespace
      | TT::KeywordReadonly
      | TT::KeywordType
  )
}

impl<'a> Parser<'a> {
  /// Pratt expression parser. `min_prec` of 1 accepts any expression
  /// (arrows and conditionals included); binary operator precedences start
  /// at 3.
  pub fn expr(&mut self, min_prec: u8) -> SyntaxResult<Node<Expr>> {
    let mut left = self.unary_expr()?;
    while let Some(op) = binary_op_for(self.peek().typ) {
      if op.precedence() < min_prec {
        break;
      }
      self.consume();
      let right = self.expr(op.precedence() + 1)?;
      let mut loc = left.loc;
      loc.extend(right.loc);
      left = Node::new(loc, BinaryExpr {
        operator: op,
        left,
        right,
      })
      .wrap(Expr::from);
    }
    if min_prec <= 1 && self.consume_if(TT::Question).is_match() {
      let consequent = self.expr(1)?;
      self.require(TT::Colon)?;
      let alternate = self.expr(1)?;
      let mut loc = left.loc;
      loc.extend(alternate.loc);
      left = Node::new(loc, CondExpr {
        test: left,
        consequent,
        alternate,
      })
      .wrap(Expr::from);
    }
    Ok(left)
  }

  fn unary_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    let operator = match t.typ {
      TT::Exclamation => Some(UnaryOp::LogicalNot),
      TT::Hyphen => Some(UnaryOp::Negate),
      TT::KeywordTypeof => Some(UnaryOp::Typeof),
      TT::KeywordAwait => Some(UnaryOp::Await),
      _ => None,
    };
    match operator {
      Some(operator) => {
        self.consume();
        let argument = self.unary_expr()?;
        let mut loc = t.loc;
        loc.extend(argument.loc);
        Ok(Node::new(loc, UnaryExpr { operator, argument }).wrap(Expr::from))
      }
      None => self.postfix_expr(),
    }
  }

  fn postfix_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let mut expr = self.primary_expr()?;
    loop {
      let start = expr.loc;
      match self.peek().typ {
        TT::Dot => {
          self.consume();
          let right = self.require_identifier()?;
          expr = self.wrap_postfix(start, MemberExpr {
            optional_chaining: false,
            left: expr,
            right,
          });
        }
        TT::QuestionDot => {
          self.consume();
          match self.peek().typ {
            TT::ParenOpen => {
              let arguments = self.call_args()?;
              expr = self.wrap_postfix(start, CallExpr {
                optional_chaining: true,
                callee: expr,
                arguments,
              });
            }
            TT::BracketOpen => {
              self.consume();
              let member = self.expr(1)?;
              self.require(TT::BracketClose)?;
              expr = self.wrap_postfix(start, ComputedMemberExpr {
                optional_chaining: true,
                object: expr,
                member,
              });
            }
            _ => {
              let right = self.require_identifier()?;
              expr = self.wrap_postfix(start, MemberExpr {
                optional_chaining: true,
                left: expr,
                right,
              });
            }
          }
        }
        TT::ParenOpen => {
          let arguments = self.call_args()?;
          expr = self.wrap_postfix(start, CallExpr {
            optional_chaining: false,
            callee: expr,
            arguments,
          });
        }
        TT::BracketOpen => {
          self.consume();
          let member = self.expr(1)?;
          self.require(TT::BracketClose)?;
          expr = self.wrap_postfix(start, ComputedMemberExpr {
            optional_chaining: false,
            object: expr,
            member,
          });
        }
        _ => return Ok(expr),
      }
    }
  }

  fn wrap_postfix<S>(&self, start: Loc, stx: S) -> Node<Expr>
  where
    S: derive_visitor::Drive + derive_visitor::DriveMut,
    Expr: From<Node<S>>,
  {
    let mut loc = start;
    loc.extend(Loc(start.0, self.prev_end()));
    Node::new(loc, stx).wrap(Expr::from)
  }

  fn call_args(&mut self) -> SyntaxResult<Vec<Node<CallArg>>> {
    self.require(TT::ParenOpen)?;
    let mut arguments = Vec::new();
    while self.peek().typ != TT::ParenClose {
      arguments.push(self.with_loc(|p| {
        let spread = p.consume_if(TT::DotDotDot).is_match();
        let value = p.expr(1)?;
        Ok(CallArg { spread, value })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require(TT::ParenClose)?;
    Ok(arguments)
  }

  fn primary_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    let t = self.peek();
    match t.typ {
      TT::ParenOpen => match self.after_matching_paren() {
        Some(TT::EqualsChevronRight) => self.arrow_func(false),
        Some(TT::Colon) => {
          // `(a): T => ...` or a parenthesized expression followed by a
          // colon from an enclosing conditional; only an attempt tells.
          let checkpoint = self.checkpoint();
          match self.arrow_func(false) {
            Ok(arrow) => Ok(arrow),
            Err(_) => {
              self.restore_checkpoint(checkpoint);
              self.paren_expr()
            }
          }
        }
        _ => self.paren_expr(),
      },
      TT::KeywordAsync if self.is_async_arrow_head() => {
        self.consume();
        self.arrow_func(true)
      }
      TT::Identifier if self.peek_at(1).typ == TT::EqualsChevronRight => self.arrow_func(false),
      TT::Identifier => {
        let name = self.consume_as_string();
        Ok(Node::new(t.loc, IdExpr { name }).wrap(Expr::from))
      }
      typ if is_id_expr_keyword(typ) => {
        let name = self.consume_as_string();
        Ok(Node::new(t.loc, IdExpr { name }).wrap(Expr::from))
      }
      TT::KeywordTrue | TT::KeywordFalse => {
        self.consume();
        let value = t.typ == TT::KeywordTrue;
        Ok(Node::new(t.loc, LitBoolExpr { value }).wrap(Expr::from))
      }
      TT::KeywordNull => {
        self.consume();
        Ok(Node::new(t.loc, LitNullExpr {}).wrap(Expr::from))
      }
      TT::LiteralNumber => {
        let raw = self.consume_as_string();
        Ok(Node::new(t.loc, LitNumExpr { raw }).wrap(Expr::from))
      }
      TT::LiteralString => {
        let value = self.lit_str_val()?;
        Ok(Node::new(t.loc, LitStrExpr { value }).wrap(Expr::from))
      }
      TT::LiteralTemplate => {
        let raw = self.consume_as_string();
        Ok(Node::new(t.loc, LitTemplateExpr { raw }).wrap(Expr::from))
      }
      TT::BracketOpen => self.lit_arr_expr(),
      TT::BraceOpen => self.lit_obj_expr(),
      _ => Err(t.error(SyntaxErrorType::ExpectedSyntax("expression"))),
    }
  }

  fn paren_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    self.require(TT::ParenOpen)?;
    let expr = self.expr(1)?;
    self.require(TT::ParenClose)?;
    Ok(expr)
  }

  fn lit_arr_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::BracketOpen)?;
          let mut elements = Vec::new();
          while p.peek().typ != TT::BracketClose {
            elements.push(p.expr(1)?);
            if !p.consume_if(TT::Comma).is_match() {
              break;
            }
          }
          p.require(TT::BracketClose)?;
          Ok(LitArrExpr { elements })
        })?
        .wrap(Expr::from),
    )
  }

  fn lit_obj_expr(&mut self) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          p.require(TT::BraceOpen)?;
          let mut members = Vec::new();
          while p.peek().typ != TT::BraceClose {
            members.push(p.with_loc(|p| {
              let key = match p.peek().typ {
                TT::LiteralString => p.lit_str_val()?,
                _ => p.require_identifier()?,
              };
              let value = if p.consume_if(TT::Colon).is_match() {
                Some(p.expr(1)?)
              } else {
                None
              };
              Ok(ObjMember { key, value })
            })?);
            if !p.consume_if(TT::Comma).is_match() {
              break;
            }
          }
          p.require(TT::BraceClose)?;
          Ok(LitObjExpr { members })
        })?
        .wrap(Expr::from),
    )
  }

  /// The token type immediately after the parenthesis group starting at the
  /// next token, or None when the group is unterminated.
  fn after_matching_paren(&self) -> Option<TT> {
    debug_assert_eq!(self.peek().typ, TT::ParenOpen);
    let mut depth = 0usize;
    let mut i = 0usize;
    loop {
      match self.peek_at(i).typ {
        TT::ParenOpen => depth += 1,
        TT::ParenClose => {
          depth -= 1;
          if depth == 0 {
            return Some(self.peek_at(i + 1).typ);
          }
        }
        TT::EOF => return None,
        _ => {}
      }
      i += 1;
    }
  }

  fn is_async_arrow_head(&self) -> bool {
    let t1 = self.peek_at(1);
    if t1.typ == TT::Identifier && self.peek_at(2).typ == TT::EqualsChevronRight {
      return true;
    }
    if t1.typ != TT::ParenOpen {
      return false;
    }
    // Scan from the `(` after `async`.
    let mut depth = 0usize;
    let mut i = 1usize;
    loop {
      match self.peek_at(i).typ {
        TT::ParenOpen => depth += 1,
        TT::ParenClose => {
          depth -= 1;
          if depth == 0 {
            return matches!(
              self.peek_at(i + 1).typ,
              TT::EqualsChevronRight | TT::Colon
            );
          }
        }
        TT::EOF => return false,
        _ => {}
      }
      i += 1;
    }
  }

  /// Parses an arrow function from its parameter list (the `async` prefix,
  /// if any, is already consumed).
  fn arrow_func(&mut self, async_: bool) -> SyntaxResult<Node<Expr>> {
    Ok(
      self
        .with_loc(|p| {
          let (parameters, return_type) = if p.peek().typ == TT::Identifier {
            // Single-parameter concise form: `x => ...`.
            let t = p.peek();
            let name = p.consume_as_string();
            let pat = Node::new(t.loc, IdPat { name }).wrap(Pat::from);
            let pattern = Node::new(t.loc, PatDecl { pat });
            (
              vec![Node::new(t.loc, ParamDecl {
                rest: false,
                optional: false,
                pattern,
                type_annotation: None,
                default_value: None,
              })],
              None,
            )
          } else {
            let parameters = p.func_params()?;
            let return_type = if p.consume_if(TT::Colon).is_match() {
              Some(p.type_expr()?)
            } else {
              None
            };
            (parameters, return_type)
          };
          p.require(TT::EqualsChevronRight)?;
          let body = if p.peek().typ == TT::BraceOpen {
            p.require(TT::BraceOpen)?;
            let body = p.stmts(TT::BraceClose)?;
            p.require(TT::BraceClose)?;
            FuncBody::Block(body)
          } else {
            FuncBody::Expr(p.expr(1)?)
          };
          Ok(Func {
            arrow: true,
            async_,
            parameters,
            return_type,
            body,
          })
        })?
        .wrap(|func| ArrowFuncExpr { func })
        .wrap(Expr::from),
    )
  }

  pub fn func_params(&mut self) -> SyntaxResult<Vec<Node<ParamDecl>>> {
    self.require(TT::ParenOpen)?;
    let mut parameters = Vec::new();
    while self.peek().typ != TT::ParenClose {
      parameters.push(self.with_loc(|p| {
        let rest = p.consume_if(TT::DotDotDot).is_match();
        let pattern = p.pat_decl()?;
        let optional = p.consume_if(TT::Question).is_match();
        let type_annotation = if p.consume_if(TT::Colon).is_match() {
          Some(p.type_expr()?)
        } else {
          None
        };
        let default_value = if p.consume_if(TT::Equals).is_match() {
          Some(p.expr(1)?)
        } else {
          None
        };
        Ok(ParamDecl {
          rest,
          optional,
          pattern,
          type_annotation,
          default_value,
        })
      })?);
      if !self.consume_if(TT::Comma).is_match() {
        break;
      }
    }
    self.require(TT::ParenClose)?;
    Ok(parameters)
  }
}
