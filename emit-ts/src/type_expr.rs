use crate::emitter::Emitter;
use parse_ts::ast::node::Node;
use parse_ts::ast::type_expr::TypeExpr;
use parse_ts::ast::type_expr::TypeMember;

impl Emitter {
  /// `element_position` is true when the type is the element of a `T[]`;
  /// unions bind looser than the postfix brackets and need parentheses there.
  pub(crate) fn type_expr(&mut self, node: &Node<TypeExpr>, element_position: bool) {
    match node.stx.as_ref() {
      TypeExpr::Named(named) => {
        self.raw(&named.stx.path.join("."));
        if !named.stx.arguments.is_empty() {
          self.raw("<");
          for (i, argument) in named.stx.arguments.iter().enumerate() {
            if i > 0 {
              self.raw(", ");
            }
            self.type_expr(argument, false);
          }
          self.raw(">");
        }
      }
      TypeExpr::Union(union) => {
        if element_position {
          self.raw("(");
        }
        for (i, member) in union.stx.members.iter().enumerate() {
          if i > 0 {
            self.raw(" | ");
          }
          self.type_expr(member, false);
        }
        if element_position {
          self.raw(")");
        }
      }
      TypeExpr::LitStr(lit) => self.quoted(&lit.stx.value),
      TypeExpr::Array(arr) => {
        self.type_expr(&arr.stx.element, true);
        self.raw("[]");
      }
      TypeExpr::Object(obj) => {
        if obj.stx.members.is_empty() {
          self.raw("{}");
          return;
        }
        self.raw("{ ");
        for (i, member) in obj.stx.members.iter().enumerate() {
          if i > 0 {
            self.raw("; ");
          }
          self.type_member_inline(member);
        }
        self.raw(" }");
      }
    }
  }

  fn type_member_inline(&mut self, member: &Node<TypeMember>) {
    if member.stx.readonly {
      self.raw("readonly ");
    }
    self.raw(&member.stx.name);
    if member.stx.optional {
      self.raw("?");
    }
    self.raw(": ");
    self.type_expr(&member.stx.type_expr, false);
  }

  /// One interface or object-type member on its own indented line.
  pub(crate) fn type_member_line(&mut self, member: &Node<TypeMember>) {
    self.indent();
    self.type_member_inline(member);
    self.raw(";");
    self.line_break();
  }
}
