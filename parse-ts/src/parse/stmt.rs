use super::Parser;
use crate::ast::func::Func;
use crate::ast::func::FuncBody;
use crate::ast::node::Node;
use crate::ast::stmt::BlockStmt;
use crate::ast::stmt::EmptyStmt;
use crate::ast::stmt::ExprStmt;
use crate::ast::stmt::FuncDecl;
use crate::ast::stmt::IfStmt;
use crate::ast::stmt::ReturnStmt;
use crate::ast::stmt::Stmt;
use crate::ast::stmt::VarDecl;
use crate::ast::stmt::VarDeclMode;
use crate::ast::stmt::VarDeclarator;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  /// Parses statements up to (not consuming) the `end` token.
  pub fn stmts(&mut self, end: TT) -> SyntaxResult<Vec<Node<Stmt>>> {
    let mut body = Vec::new();
    while self.peek().typ != end {
      body.push(self.stmt()?);
    }
    Ok(body)
  }

  pub fn stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t = self.peek();
    match t.typ {
      TT::KeywordImport => Ok(self.import_stmt()?.wrap(Stmt::from)),
      TT::KeywordExport => self.export_stmt(),
      TT::KeywordConst | TT::KeywordLet | TT::KeywordVar => {
        Ok(self.var_decl(false)?.wrap(Stmt::from))
      }
      TT::KeywordFunction => Ok(self.func_decl(false)?.wrap(Stmt::from)),
      TT::KeywordAsync if self.peek_at(1).typ == TT::KeywordFunction => {
        Ok(self.func_decl(false)?.wrap(Stmt::from))
      }
      TT::KeywordInterface => Ok(self.interface_decl(false, false)?.wrap(Stmt::from)),
      TT::KeywordType if is_name_start(self.peek_at(1).typ) => {
        Ok(self.type_alias_decl(false, false)?.wrap(Stmt::from))
      }
      TT::KeywordNamespace | TT::KeywordModule if self.peek_at(1).typ == TT::Identifier => {
        Ok(self.namespace_decl(false, false)?.wrap(Stmt::from))
      }
      TT::KeywordDeclare => self.declare_stmt(),
      TT::BraceOpen => Ok(self.block_stmt()?.wrap(Stmt::from)),
      TT::Semicolon => Ok(self.with_loc(|p| {
        p.require(TT::Semicolon)?;
        Ok(EmptyStmt {})
      })?.wrap(Stmt::from)),
      TT::KeywordReturn => Ok(self.return_stmt()?.wrap(Stmt::from)),
      TT::KeywordIf => Ok(self.if_stmt()?.wrap(Stmt::from)),
      _ => Ok(self.expr_stmt()?.wrap(Stmt::from)),
    }
  }

  fn export_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t1 = self.peek_at(1);
    match t1.typ {
      TT::BraceOpen => Ok(self.export_list_stmt()?.wrap(Stmt::from)),
      TT::KeywordType if self.peek_at(2).typ == TT::BraceOpen => {
        Ok(self.export_list_stmt()?.wrap(Stmt::from))
      }
      TT::KeywordConst | TT::KeywordLet | TT::KeywordVar => {
        self.require(TT::KeywordExport)?;
        Ok(self.var_decl(true)?.wrap(Stmt::from))
      }
      TT::KeywordFunction | TT::KeywordAsync => {
        self.require(TT::KeywordExport)?;
        Ok(self.func_decl(true)?.wrap(Stmt::from))
      }
      TT::KeywordInterface => {
        self.require(TT::KeywordExport)?;
        Ok(self.interface_decl(true, false)?.wrap(Stmt::from))
      }
      TT::KeywordType => {
        self.require(TT::KeywordExport)?;
        Ok(self.type_alias_decl(true, false)?.wrap(Stmt::from))
      }
      TT::KeywordNamespace | TT::KeywordModule => {
        self.require(TT::KeywordExport)?;
        Ok(self.namespace_decl(true, false)?.wrap(Stmt::from))
      }
      _ => Err(t1.error(SyntaxErrorType::UnsupportedSyntax("export form"))),
    }
  }

  fn declare_stmt(&mut self) -> SyntaxResult<Node<Stmt>> {
    let t1 = self.peek_at(1);
    match t1.typ {
      TT::KeywordGlobal => Ok(self.global_decl()?.wrap(Stmt::from)),
      TT::KeywordNamespace | TT::KeywordModule => {
        self.require(TT::KeywordDeclare)?;
        Ok(self.namespace_decl(false, true)?.wrap(Stmt::from))
      }
      TT::KeywordInterface => {
        self.require(TT::KeywordDeclare)?;
        Ok(self.interface_decl(false, true)?.wrap(Stmt::from))
      }
      TT::KeywordType => {
        self.require(TT::KeywordDeclare)?;
        Ok(self.type_alias_decl(false, true)?.wrap(Stmt::from))
      }
      TT::KeywordConst | TT::KeywordLet | TT::KeywordVar | TT::KeywordFunction => {
        Err(t1.error(SyntaxErrorType::UnsupportedSyntax("ambient value declaration")))
      }
      // `declare` used as a plain identifier.
      _ => Ok(self.expr_stmt()?.wrap(Stmt::from)),
    }
  }

  pub fn block_stmt(&mut self) -> SyntaxResult<Node<BlockStmt>> {
    self.with_loc(|p| {
      p.require(TT::BraceOpen)?;
      let body = p.stmts(TT::BraceClose)?;
      p.require(TT::BraceClose)?;
      Ok(BlockStmt { body })
    })
  }

  fn expr_stmt(&mut self) -> SyntaxResult<Node<ExprStmt>> {
    self.with_loc(|p| {
      let expr = p.expr(1)?;
      p.semicolon()?;
      Ok(ExprStmt { expr })
    })
  }

  fn return_stmt(&mut self) -> SyntaxResult<Node<ReturnStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordReturn)?;
      let t = p.peek();
      let value = if matches!(t.typ, TT::Semicolon | TT::BraceClose | TT::EOF)
        || t.after_line_terminator
      {
        None
      } else {
        Some(p.expr(1)?)
      };
      p.semicolon()?;
      Ok(ReturnStmt { value })
    })
  }

  fn if_stmt(&mut self) -> SyntaxResult<Node<IfStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordIf)?;
      p.require(TT::ParenOpen)?;
      let test = p.expr(1)?;
      p.require(TT::ParenClose)?;
      let consequent = p.stmt()?;
      let alternate = if p.consume_if(TT::KeywordElse).is_match() {
        Some(p.stmt()?)
      } else {
        None
      };
      Ok(IfStmt {
        test,
        consequent,
        alternate,
      })
    })
  }

  pub fn var_decl(&mut self, export: bool) -> SyntaxResult<Node<VarDecl>> {
    self.with_loc(|p| {
      let mode = match p.consume().typ {
        TT::KeywordConst => VarDeclMode::Const,
        TT::KeywordLet => VarDeclMode::Let,
        _ => VarDeclMode::Var,
      };
      let mut declarators = Vec::new();
      loop {
        declarators.push(p.with_loc(|p| {
          let pattern = p.pat_decl()?;
          let type_annotation = if p.consume_if(TT::Colon).is_match() {
            Some(p.type_expr()?)
          } else {
            None
          };
          let initializer = if p.consume_if(TT::Equals).is_match() {
            Some(p.expr(1)?)
          } else {
            None
          };
          Ok(VarDeclarator {
            pattern,
            type_annotation,
            initializer,
          })
        })?);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        }
      }
      p.semicolon()?;
      Ok(VarDecl {
        export,
        mode,
        declarators,
      })
    })
  }

  pub fn func_decl(&mut self, export: bool) -> SyntaxResult<Node<FuncDecl>> {
    self.with_loc(|p| {
      let async_ = p.consume_if(TT::KeywordAsync).is_match();
      p.require(TT::KeywordFunction)?;
      let name = p.require_identifier()?;
      let function = p.with_loc(|p| {
        let parameters = p.func_params()?;
        let return_type = if p.consume_if(TT::Colon).is_match() {
          Some(p.type_expr()?)
        } else {
          None
        };
        p.require(TT::BraceOpen)?;
        let body = p.stmts(TT::BraceClose)?;
        p.require(TT::BraceClose)?;
        Ok(Func {
          arrow: false,
          async_,
          parameters,
          return_type,
          body: FuncBody::Block(body),
        })
      })?;
      Ok(FuncDecl {
        export,
        name,
        function,
      })
    })
  }
}

pub fn is_name_start(typ: TT) -> bool {
  typ == TT::Identifier || crate::lex::KEYWORDS_MAPPING.contains_key(&typ)
}
