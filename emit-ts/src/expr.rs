use crate::emitter::Emitter;
use parse_ts::ast::expr::BinaryOp;
use parse_ts::ast::expr::Expr;
use parse_ts::ast::func::Func;
use parse_ts::ast::func::FuncBody;
use parse_ts::ast::node::Node;
use parse_ts::ast::pat::Pat;
use parse_ts::ast::pat::PatDecl;

// Precedence levels, loosest to tightest. Binary operators occupy 3 to 8
// (see BinaryOp::precedence); an operand is parenthesized whenever its own
// level is below what its position requires.
const PREC_ANY: u8 = 1;
const PREC_COND: u8 = 2;
const PREC_UNARY: u8 = 9;
const PREC_POSTFIX: u8 = 10;
const PREC_PRIMARY: u8 = 11;
const PREC_FORCE_PARENS: u8 = u8::MAX;

fn precedence(expr: &Expr) -> u8 {
  match expr {
    Expr::Arrow(_) => PREC_ANY,
    Expr::Cond(_) => PREC_COND,
    Expr::Binary(binary) => binary.stx.operator.precedence(),
    Expr::Unary(_) => PREC_UNARY,
    Expr::Call(_) | Expr::Member(_) | Expr::ComputedMember(_) => PREC_POSTFIX,
    _ => PREC_PRIMARY,
  }
}

// `a ?? b || c` is a syntax error; mixing nullish with && or || always needs
// parentheses.
fn mixes_nullish(parent: BinaryOp, child: &Expr) -> bool {
  let Expr::Binary(binary) = child else {
    return false;
  };
  let child_op = binary.stx.operator;
  match parent {
    BinaryOp::Nullish => matches!(child_op, BinaryOp::And | BinaryOp::Or),
    BinaryOp::And | BinaryOp::Or => child_op == BinaryOp::Nullish,
    _ => false,
  }
}

fn is_valid_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
    _ => return false,
  }
  chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

impl Emitter {
  pub(crate) fn expr(&mut self, node: &Node<Expr>, min_prec: u8) {
    let parens = precedence(node.stx.as_ref()) < min_prec;
    if parens {
      self.raw("(");
    }
    match node.stx.as_ref() {
      Expr::Arrow(arrow) => self.func(&arrow.stx.func, None),
      Expr::Binary(binary) => {
        let op = binary.stx.operator;
        let left_prec = if mixes_nullish(op, binary.stx.left.stx.as_ref()) {
          PREC_FORCE_PARENS
        } else {
          op.precedence()
        };
        let right_prec = if mixes_nullish(op, binary.stx.right.stx.as_ref()) {
          PREC_FORCE_PARENS
        } else {
          op.precedence() + 1
        };
        self.expr(&binary.stx.left, left_prec);
        self.raw(" ");
        self.raw(op.syntax());
        self.raw(" ");
        self.expr(&binary.stx.right, right_prec);
      }
      Expr::Call(call) => {
        self.expr(&call.stx.callee, PREC_POSTFIX);
        if call.stx.optional_chaining {
          self.raw("?.");
        }
        self.raw("(");
        for (i, arg) in call.stx.arguments.iter().enumerate() {
          if i > 0 {
            self.raw(", ");
          }
          if arg.stx.spread {
            self.raw("...");
          }
          self.expr(&arg.stx.value, PREC_ANY);
        }
        self.raw(")");
      }
      Expr::ComputedMember(member) => {
        self.expr(&member.stx.object, PREC_POSTFIX);
        if member.stx.optional_chaining {
          self.raw("?.");
        }
        self.raw("[");
        self.expr(&member.stx.member, PREC_ANY);
        self.raw("]");
      }
      Expr::Cond(cond) => {
        self.expr(&cond.stx.test, PREC_COND + 1);
        self.raw(" ? ");
        self.expr(&cond.stx.consequent, PREC_ANY);
        self.raw(" : ");
        self.expr(&cond.stx.alternate, PREC_ANY);
      }
      Expr::Id(id) => self.raw(&id.stx.name),
      Expr::Member(member) => {
        self.expr(&member.stx.left, PREC_POSTFIX);
        self.raw(if member.stx.optional_chaining {
          "?."
        } else {
          "."
        });
        self.raw(&member.stx.right);
      }
      Expr::Unary(unary) => {
        match unary.stx.operator.syntax() {
          op @ ("await" | "typeof") => {
            self.raw(op);
            self.raw(" ");
          }
          op => self.raw(op),
        }
        self.expr(&unary.stx.argument, PREC_UNARY);
      }
      Expr::LitArr(arr) => {
        self.raw("[");
        for (i, element) in arr.stx.elements.iter().enumerate() {
          if i > 0 {
            self.raw(", ");
          }
          self.expr(element, PREC_ANY);
        }
        self.raw("]");
      }
      Expr::LitBool(b) => self.raw(if b.stx.value { "true" } else { "false" }),
      Expr::LitNull(_) => self.raw("null"),
      Expr::LitNum(num) => self.raw(&num.stx.raw),
      Expr::LitObj(obj) => {
        if obj.stx.members.is_empty() {
          self.raw("{}");
        } else {
          self.raw("{ ");
          for (i, member) in obj.stx.members.iter().enumerate() {
            if i > 0 {
              self.raw(", ");
            }
            if is_valid_identifier(&member.stx.key) {
              self.raw(&member.stx.key);
            } else {
              self.quoted(&member.stx.key);
            }
            if let Some(value) = &member.stx.value {
              self.raw(": ");
              self.expr(value, PREC_ANY);
            }
          }
          self.raw(" }");
        }
      }
      Expr::LitStr(s) => self.quoted(&s.stx.value),
      Expr::LitTemplate(template) => self.raw(&template.stx.raw),
    }
    if parens {
      self.raw(")");
    }
  }

  pub(crate) fn func(&mut self, func: &Node<Func>, name: Option<&str>) {
    if func.stx.async_ {
      self.raw("async ");
    }
    if !func.stx.arrow {
      self.raw("function");
      if let Some(name) = name {
        self.raw(" ");
        self.raw(name);
      }
    }
    self.raw("(");
    for (i, param) in func.stx.parameters.iter().enumerate() {
      if i > 0 {
        self.raw(", ");
      }
      if param.stx.rest {
        self.raw("...");
      }
      self.pat_decl(&param.stx.pattern);
      if param.stx.optional {
        self.raw("?");
      }
      if let Some(annotation) = &param.stx.type_annotation {
        self.raw(": ");
        self.type_expr(annotation, false);
      }
      if let Some(default) = &param.stx.default_value {
        self.raw(" = ");
        self.expr(default, PREC_ANY);
      }
    }
    self.raw(")");
    if let Some(return_type) = &func.stx.return_type {
      self.raw(": ");
      self.type_expr(return_type, false);
    }
    if func.stx.arrow {
      self.raw(" => ");
    } else {
      self.raw(" ");
    }
    match &func.stx.body {
      FuncBody::Block(body) => self.braced_body(body),
      FuncBody::Expr(expr) => {
        // An object literal body would parse as a block.
        if matches!(expr.stx.as_ref(), Expr::LitObj(_)) {
          self.raw("(");
          self.expr(expr, PREC_ANY);
          self.raw(")");
        } else {
          self.expr(expr, PREC_ANY);
        }
      }
    }
  }

  pub(crate) fn pat_decl(&mut self, pat: &Node<PatDecl>) {
    self.pat(&pat.stx.pat);
  }

  pub(crate) fn pat(&mut self, pat: &Node<Pat>) {
    match pat.stx.as_ref() {
      Pat::Id(id) => self.raw(&id.stx.name),
      Pat::Obj(obj) => {
        if obj.stx.properties.is_empty() && obj.stx.rest.is_none() {
          self.raw("{}");
          return;
        }
        self.raw("{ ");
        for (i, prop) in obj.stx.properties.iter().enumerate() {
          if i > 0 {
            self.raw(", ");
          }
          self.raw(&prop.stx.key);
          if let Some(target) = &prop.stx.target {
            self.raw(": ");
            self.pat(target);
          }
          if let Some(default) = &prop.stx.default_value {
            self.raw(" = ");
            self.expr(default, PREC_ANY);
          }
        }
        if let Some(rest) = &obj.stx.rest {
          if !obj.stx.properties.is_empty() {
            self.raw(", ");
          }
          self.raw("...");
          self.raw(&rest.stx.name);
        }
        self.raw(" }");
      }
      Pat::Arr(arr) => {
        self.raw("[");
        for (i, element) in arr.stx.elements.iter().enumerate() {
          if i > 0 {
            self.raw(", ");
          }
          self.pat(element);
        }
        if let Some(rest) = &arr.stx.rest {
          if !arr.stx.elements.is_empty() {
            self.raw(", ");
          }
          self.raw("...");
          self.raw(&rest.stx.name);
        }
        self.raw("]");
      }
    }
  }

  pub(crate) fn any_expr(&mut self, node: &Node<Expr>) {
    self.expr(node, PREC_ANY);
  }

  /// An expression at the start of a statement; object literals and other
  /// ambiguous heads get parenthesized by precedence already, except `{`
  /// which would parse as a block.
  pub(crate) fn stmt_expr(&mut self, node: &Node<Expr>) {
    if matches!(node.stx.as_ref(), Expr::LitObj(_)) {
      self.raw("(");
      self.expr(node, PREC_ANY);
      self.raw(")");
    } else {
      self.expr(node, PREC_ANY);
    }
  }
}
