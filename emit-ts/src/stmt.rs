use crate::emitter::Emitter;
use parse_ts::ast::node::Node;
use parse_ts::ast::stmt::IfStmt;
use parse_ts::ast::stmt::Stmt;
use parse_ts::ast::ts::GlobalDecl;
use parse_ts::ast::ts::InterfaceDecl;
use parse_ts::ast::ts::NamespaceBody;
use parse_ts::ast::ts::NamespaceDecl;
use parse_ts::ast::type_expr::TypeMember;

impl Emitter {
  /// Emits one statement on its own line (or lines), indentation included.
  pub(crate) fn stmt(&mut self, node: &Node<Stmt>) {
    self.indent();
    match node.stx.as_ref() {
      Stmt::Block(block) => self.braced_body(&block.stx.body),
      Stmt::Empty(_) => self.raw(";"),
      Stmt::ExportList(list) => {
        self.raw("export ");
        if list.stx.type_only {
          self.raw("type ");
        }
        if list.stx.names.is_empty() {
          self.raw("{}");
        } else {
          self.raw("{ ");
          for (i, name) in list.stx.names.iter().enumerate() {
            if i > 0 {
              self.raw(", ");
            }
            self.raw(&name.stx.local);
            if name.stx.exported != name.stx.local {
              self.raw(" as ");
              self.raw(&name.stx.exported);
            }
          }
          self.raw(" }");
        }
        if let Some(from) = &list.stx.from {
          self.raw(" from ");
          self.quoted(from);
        }
        self.raw(";");
      }
      Stmt::Expr(expr) => {
        self.stmt_expr(&expr.stx.expr);
        self.raw(";");
      }
      Stmt::If(if_stmt) => self.if_stmt(if_stmt.stx.as_ref()),
      Stmt::Import(import) => {
        self.raw("import ");
        if import.stx.default.is_none() && import.stx.names.is_empty() {
          self.quoted(&import.stx.module);
          self.raw(";");
        } else {
          if import.stx.type_only {
            self.raw("type ");
          }
          if let Some(default) = &import.stx.default {
            self.raw(&default.stx.name);
            if !import.stx.names.is_empty() {
              self.raw(", ");
            }
          }
          if !import.stx.names.is_empty() {
            self.raw("{ ");
            for (i, name) in import.stx.names.iter().enumerate() {
              if i > 0 {
                self.raw(", ");
              }
              self.raw(&name.stx.imported);
              if name.stx.local != name.stx.imported {
                self.raw(" as ");
                self.raw(&name.stx.local);
              }
            }
            self.raw(" }");
          }
          self.raw(" from ");
          self.quoted(&import.stx.module);
          self.raw(";");
        }
      }
      Stmt::Return(ret) => {
        self.raw("return");
        if let Some(value) = &ret.stx.value {
          self.raw(" ");
          self.any_expr(value);
        }
        self.raw(";");
      }
      Stmt::FuncDecl(decl) => {
        if decl.stx.export {
          self.raw("export ");
        }
        self.func(&decl.stx.function, Some(&decl.stx.name));
      }
      Stmt::VarDecl(decl) => {
        if decl.stx.export {
          self.raw("export ");
        }
        self.raw(decl.stx.mode.syntax());
        self.raw(" ");
        for (i, declarator) in decl.stx.declarators.iter().enumerate() {
          if i > 0 {
            self.raw(", ");
          }
          self.pat_decl(&declarator.stx.pattern);
          if let Some(annotation) = &declarator.stx.type_annotation {
            self.raw(": ");
            self.type_expr(annotation, false);
          }
          if let Some(initializer) = &declarator.stx.initializer {
            self.raw(" = ");
            self.any_expr(initializer);
          }
        }
        self.raw(";");
      }
      Stmt::GlobalDecl(global) => self.global_decl(global.stx.as_ref()),
      Stmt::InterfaceDecl(decl) => self.interface_decl(decl.stx.as_ref()),
      Stmt::NamespaceDecl(decl) => self.namespace_decl(decl.stx.as_ref()),
      Stmt::TypeAliasDecl(decl) => {
        if decl.stx.export {
          self.raw("export ");
        }
        if decl.stx.declare {
          self.raw("declare ");
        }
        self.raw("type ");
        self.raw(&decl.stx.name);
        self.raw(" = ");
        self.type_expr(&decl.stx.type_expr, false);
        self.raw(";");
      }
    }
    self.line_break();
  }

  pub(crate) fn braced_body(&mut self, body: &[Node<Stmt>]) {
    if body.is_empty() {
      self.raw("{}");
      return;
    }
    self.raw("{");
    self.line_break();
    self.nested(|emitter| {
      for stmt in body {
        emitter.stmt(stmt);
      }
    });
    self.indent();
    self.raw("}");
  }

  // Consequent and alternate are always braced; `else if` chains stay flat.
  fn if_stmt(&mut self, if_stmt: &IfStmt) {
    self.raw("if (");
    self.any_expr(&if_stmt.test);
    self.raw(") ");
    self.stmt_as_block(&if_stmt.consequent);
    if let Some(alternate) = &if_stmt.alternate {
      self.raw(" else ");
      if let Stmt::If(nested) = alternate.stx.as_ref() {
        self.if_stmt(nested.stx.as_ref());
      } else {
        self.stmt_as_block(alternate);
      }
    }
  }

  fn stmt_as_block(&mut self, stmt: &Node<Stmt>) {
    match stmt.stx.as_ref() {
      Stmt::Block(block) => self.braced_body(&block.stx.body),
      _ => self.braced_body(std::slice::from_ref(stmt)),
    }
  }

  fn global_decl(&mut self, global: &GlobalDecl) {
    self.raw("declare global ");
    self.braced_body(&global.body);
  }

  fn interface_decl(&mut self, decl: &InterfaceDecl) {
    if decl.export {
      self.raw("export ");
    }
    if decl.declare {
      self.raw("declare ");
    }
    self.raw("interface ");
    self.raw(&decl.name);
    if !decl.extends.is_empty() {
      self.raw(" extends ");
      for (i, parent) in decl.extends.iter().enumerate() {
        if i > 0 {
          self.raw(", ");
        }
        self.type_expr(parent, false);
      }
    }
    self.raw(" ");
    self.type_member_block(&decl.members);
  }

  pub(crate) fn type_member_block(&mut self, members: &[Node<TypeMember>]) {
    if members.is_empty() {
      self.raw("{}");
      return;
    }
    self.raw("{");
    self.line_break();
    self.nested(|emitter| {
      for member in members {
        emitter.type_member_line(member);
      }
    });
    self.indent();
    self.raw("}");
  }

  fn namespace_decl(&mut self, decl: &NamespaceDecl) {
    if decl.export {
      self.raw("export ");
    }
    if decl.declare {
      self.raw("declare ");
    }
    self.raw("namespace ");
    self.raw(&decl.name);
    // Flatten the nested form back to its dotted spelling.
    let mut body = &decl.body;
    while let NamespaceBody::Namespace(inner) = body {
      self.raw(".");
      self.raw(&inner.stx.name);
      body = &inner.stx.body;
    }
    self.raw(" ");
    let NamespaceBody::Block(stmts) = body else {
      unreachable!();
    };
    self.braced_body(stmts);
  }
}
