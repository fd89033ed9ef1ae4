use super::Parser;
use crate::ast::import_export::ExportName;
use crate::ast::import_export::ImportName;
use crate::ast::node::Node;
use crate::ast::stmt::ExportListStmt;
use crate::ast::stmt::ImportStmt;
use crate::error::SyntaxErrorType;
use crate::error::SyntaxResult;
use crate::token::TT;

impl<'a> Parser<'a> {
  pub fn import_stmt(&mut self) -> SyntaxResult<Node<ImportStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordImport)?;
      // Side-effect import: `import 'module';`.
      if p.peek().typ == TT::LiteralString {
        let module = p.lit_str_val()?;
        p.semicolon()?;
        return Ok(ImportStmt {
          type_only: false,
          default: None,
          names: Vec::new(),
          module,
        });
      }
      // `import type { ... }`; `type` followed by `from` or a comma is the
      // default binding named `type` instead.
      let type_only = p.peek().typ == TT::KeywordType
        && matches!(p.peek_at(1).typ, TT::BraceOpen | TT::Identifier)
        && p.consume_if(TT::KeywordType).is_match();
      let mut default = None;
      let mut names = Vec::new();
      if p.peek().typ == TT::Asterisk {
        return Err(
          p.peek()
            .error(SyntaxErrorType::UnsupportedSyntax("namespace import")),
        );
      }
      if p.peek().typ != TT::BraceOpen {
        default = Some(p.id_pat()?);
      }
      if default.is_none() || p.consume_if(TT::Comma).is_match() {
        p.require(TT::BraceOpen)?;
        while p.peek().typ != TT::BraceClose {
          names.push(p.with_loc(|p| {
            let imported = p.require_identifier()?;
            let local = if p.consume_if(TT::KeywordAs).is_match() {
              p.require_identifier()?
            } else {
              imported.clone()
            };
            Ok(ImportName { imported, local })
          })?);
          if !p.consume_if(TT::Comma).is_match() {
            break;
          }
        }
        p.require(TT::BraceClose)?;
      }
      p.require(TT::KeywordFrom)?;
      let module = p.lit_str_val()?;
      p.semicolon()?;
      Ok(ImportStmt {
        type_only,
        default,
        names,
        module,
      })
    })
  }

  pub fn export_list_stmt(&mut self) -> SyntaxResult<Node<ExportListStmt>> {
    self.with_loc(|p| {
      p.require(TT::KeywordExport)?;
      let type_only = p.peek().typ == TT::KeywordType
        && p.peek_at(1).typ == TT::BraceOpen
        && p.consume_if(TT::KeywordType).is_match();
      p.require(TT::BraceOpen)?;
      let mut names = Vec::new();
      while p.peek().typ != TT::BraceClose {
        names.push(p.with_loc(|p| {
          let local = p.require_identifier()?;
          let exported = if p.consume_if(TT::KeywordAs).is_match() {
            p.require_identifier()?
          } else {
            local.clone()
          };
          Ok(ExportName { local, exported })
        })?);
        if !p.consume_if(TT::Comma).is_match() {
          break;
        }
      }
      p.require(TT::BraceClose)?;
      let from = if p.consume_if(TT::KeywordFrom).is_match() {
        Some(p.lit_str_val()?)
      } else {
        None
      };
      p.semicolon()?;
      Ok(ExportListStmt {
        type_only,
        names,
        from,
      })
    })
  }
}
