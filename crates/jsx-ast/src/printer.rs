//! JavaScript code generation.
//!
//! Produces deterministic output: expressions on a single line, statements
//! and blocks on their own lines with two-space indentation. Parentheses are
//! inserted from operator precedence only, never preserved from the source.

use crate::ast::*;

const PREC_SEQ: u8 = 1;
const PREC_ASSIGN: u8 = 2;
const PREC_COND: u8 = 3;
const PREC_UNARY: u8 = 15;
const PREC_POSTFIX: u8 = 16;
const PREC_CALL: u8 = 18;
const PREC_PRIMARY: u8 = 20;

/// Prints a whole program.
pub fn print_program(program: &Program) -> String {
    let mut printer = Printer::new();
    for stmt in &program.body {
        printer.stmt(stmt);
    }
    printer.finish()
}

/// Prints a single statement, including its trailing newline.
pub fn print_stmt(stmt: &Stmt) -> String {
    let mut printer = Printer::new();
    printer.stmt(stmt);
    printer.finish()
}

/// Prints a single expression.
pub fn print_expr(expr: &Expr) -> String {
    let mut printer = Printer::new();
    printer.expr(expr, PREC_SEQ);
    printer.finish()
}

/// An indenting string writer for AST nodes.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    /// Creates an empty printer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the printed text.
    pub fn finish(self) -> String {
        self.out
    }

    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn line_start(&mut self) {
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    /// Prints a statement on its own line.
    pub fn stmt(&mut self, stmt: &Stmt) {
        self.line_start();
        self.stmt_inline(stmt);
        self.out.push('\n');
    }

    fn stmt_inline(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Import(decl) => self.import(decl),
            Stmt::Expr(s) => {
                if starts_ambiguously(&s.expr) {
                    self.push("(");
                    self.expr(&s.expr, PREC_SEQ);
                    self.push(")");
                } else {
                    self.expr(&s.expr, PREC_SEQ);
                }
                self.push(";");
            }
            Stmt::Var(decl) => {
                self.var_decl(decl);
                self.push(";");
            }
            Stmt::Fn(decl) => self.fn_expr(Some(&decl.ident), &decl.function),
            Stmt::Return(s) => {
                self.push("return");
                if let Some(arg) = &s.arg {
                    self.push(" ");
                    self.expr(arg, PREC_SEQ);
                }
                self.push(";");
            }
            Stmt::Block(block) => self.block(block),
            Stmt::If(s) => {
                self.push("if (");
                self.expr(&s.test, PREC_SEQ);
                self.push(") ");
                self.stmt_inline(&s.cons);
                if let Some(alt) = &s.alt {
                    self.push(" else ");
                    self.stmt_inline(alt);
                }
            }
            Stmt::Empty(_) => self.push(";"),
            Stmt::ExportDecl(export) => {
                self.push("export ");
                match &export.decl {
                    Decl::Var(decl) => {
                        self.var_decl(decl);
                        self.push(";");
                    }
                    Decl::Fn(decl) => self.fn_expr(Some(&decl.ident), &decl.function),
                    Decl::Class(decl) => self.class(Some(&decl.ident), &decl.class),
                }
            }
            Stmt::ExportDefaultExpr(export) => {
                self.push("export default ");
                if matches!(leftmost(&export.expr), Expr::Fn(_) | Expr::Class(_)) {
                    self.push("(");
                    self.expr(&export.expr, PREC_SEQ);
                    self.push(")");
                } else {
                    self.expr(&export.expr, PREC_ASSIGN);
                }
                self.push(";");
            }
            Stmt::ExportDefaultDecl(export) => {
                self.push("export default ");
                match &export.decl {
                    DefaultDecl::Fn(f) => self.fn_expr(f.ident.as_ref(), &f.function),
                    DefaultDecl::Class(c) => self.class(c.ident.as_ref(), &c.class),
                }
            }
            Stmt::ExportNamed(export) => {
                self.push("export ");
                if export.type_only {
                    self.push("type ");
                }
                if export.specifiers.is_empty() {
                    self.push("{}");
                } else {
                    self.push("{ ");
                    for (i, spec) in export.specifiers.iter().enumerate() {
                        if i > 0 {
                            self.push(", ");
                        }
                        self.push(&spec.orig.sym);
                        if let Some(exported) = &spec.exported {
                            self.push(" as ");
                            self.push(&exported.sym);
                        }
                    }
                    self.push(" }");
                }
                if let Some(source) = &export.source {
                    self.push(" from ");
                    self.string(&source.value);
                }
                self.push(";");
            }
            Stmt::ExportAll(export) => {
                self.push("export * from ");
                self.string(&export.source.value);
                self.push(";");
            }
            Stmt::Class(decl) => self.class(Some(&decl.ident), &decl.class),
            Stmt::For(s) => {
                self.push("for (");
                match &s.init {
                    Some(ForInit::Var(decl)) => self.var_decl(decl),
                    Some(ForInit::Expr(expr)) => self.expr(expr, PREC_SEQ),
                    None => {}
                }
                self.push(";");
                if let Some(test) = &s.test {
                    self.push(" ");
                    self.expr(test, PREC_SEQ);
                }
                self.push(";");
                if let Some(update) = &s.update {
                    self.push(" ");
                    self.expr(update, PREC_SEQ);
                }
                self.push(") ");
                self.stmt_inline(&s.body);
            }
            Stmt::ForIn(s) => {
                self.push("for (");
                self.for_head(&s.left);
                self.push(" in ");
                self.expr(&s.right, PREC_SEQ);
                self.push(") ");
                self.stmt_inline(&s.body);
            }
            Stmt::ForOf(s) => {
                self.push(if s.is_await { "for await (" } else { "for (" });
                self.for_head(&s.left);
                self.push(" of ");
                self.expr(&s.right, PREC_ASSIGN);
                self.push(") ");
                self.stmt_inline(&s.body);
            }
            Stmt::While(s) => {
                self.push("while (");
                self.expr(&s.test, PREC_SEQ);
                self.push(") ");
                self.stmt_inline(&s.body);
            }
            Stmt::DoWhile(s) => {
                self.push("do ");
                self.stmt_inline(&s.body);
                self.push(" while (");
                self.expr(&s.test, PREC_SEQ);
                self.push(");");
            }
            Stmt::Try(s) => {
                self.push("try ");
                self.block(&s.block);
                if let Some(handler) = &s.handler {
                    self.push(" catch ");
                    if let Some(param) = &handler.param {
                        self.push("(");
                        self.pat(param);
                        self.push(") ");
                    }
                    self.block(&handler.body);
                }
                if let Some(finalizer) = &s.finalizer {
                    self.push(" finally ");
                    self.block(finalizer);
                }
            }
            Stmt::Switch(s) => self.switch(s),
            Stmt::Labeled(s) => {
                self.push(&s.label.sym);
                self.push(": ");
                self.stmt_inline(&s.body);
            }
            Stmt::Break(s) => self.jump("break", s.label.as_ref()),
            Stmt::Continue(s) => self.jump("continue", s.label.as_ref()),
            Stmt::Throw(s) => {
                self.push("throw ");
                self.expr(&s.arg, PREC_SEQ);
                self.push(";");
            }
        }
    }

    fn jump(&mut self, keyword: &str, label: Option<&Ident>) {
        self.push(keyword);
        if let Some(label) = label {
            self.push(" ");
            self.push(&label.sym);
        }
        self.push(";");
    }

    fn for_head(&mut self, head: &ForHead) {
        match head {
            ForHead::Var(decl) => self.var_decl(decl),
            ForHead::Pat(pat) => self.pat(pat),
        }
    }

    fn switch(&mut self, s: &SwitchStmt) {
        self.push("switch (");
        self.expr(&s.discriminant, PREC_SEQ);
        self.push(") ");
        if s.cases.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for case in &s.cases {
            self.newline();
            match &case.test {
                Some(test) => {
                    self.push("case ");
                    self.expr(test, PREC_SEQ);
                    self.push(":");
                }
                None => self.push("default:"),
            }
            self.indent += 1;
            for stmt in &case.cons {
                self.newline();
                self.stmt_inline(stmt);
            }
            self.indent -= 1;
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn fn_expr(&mut self, ident: Option<&Ident>, function: &Function) {
        if function.is_async {
            self.push("async ");
        }
        self.push(if function.is_generator { "function* " } else { "function " });
        if let Some(ident) = ident {
            self.push(&ident.sym);
        }
        self.function(function);
    }

    fn method(&mut self, key: &PropName, kind: MethodKind, function: &Function) {
        match kind {
            MethodKind::Method => {}
            MethodKind::Getter => self.push("get "),
            MethodKind::Setter => self.push("set "),
        }
        if function.is_async {
            self.push("async ");
        }
        if function.is_generator {
            self.push("*");
        }
        self.prop_name(key);
        self.function(function);
    }

    fn class(&mut self, ident: Option<&Ident>, class: &Class) {
        self.push("class ");
        if let Some(ident) = ident {
            self.push(&ident.sym);
            self.push(" ");
        }
        if let Some(super_class) = &class.super_class {
            self.push("extends ");
            self.expr(super_class, PREC_CALL);
            self.push(" ");
        }
        if class.body.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for member in &class.body {
            self.newline();
            match member {
                ClassMember::Method(m) => {
                    if m.is_static {
                        self.push("static ");
                    }
                    self.method(&m.key, m.kind, &m.function);
                }
                ClassMember::Prop(p) => {
                    if p.is_static {
                        self.push("static ");
                    }
                    self.prop_name(&p.key);
                    if let Some(value) = &p.value {
                        self.push(" = ");
                        self.expr(value, PREC_ASSIGN);
                    }
                    self.push(";");
                }
                ClassMember::StaticBlock(block) => {
                    self.push("static ");
                    self.block(block);
                }
            }
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn import(&mut self, decl: &ImportDecl) {
        self.push("import ");
        if decl.type_only {
            self.push("type ");
        }
        if !decl.specifiers.is_empty() {
            let mut named = Vec::new();
            let mut first = true;
            for spec in &decl.specifiers {
                match spec {
                    ImportSpecifier::Default(s) => {
                        if !first {
                            self.push(", ");
                        }
                        self.push(&s.local.sym);
                        first = false;
                    }
                    ImportSpecifier::Namespace(s) => {
                        if !first {
                            self.push(", ");
                        }
                        self.push("* as ");
                        self.push(&s.local.sym);
                        first = false;
                    }
                    ImportSpecifier::Named(s) => named.push(s),
                }
            }
            if !named.is_empty() {
                if !first {
                    self.push(", ");
                }
                self.push("{ ");
                for (i, s) in named.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    if s.imported.sym == s.local.sym {
                        self.push(&s.local.sym);
                    } else {
                        self.push(&s.imported.sym);
                        self.push(" as ");
                        self.push(&s.local.sym);
                    }
                }
                self.push(" }");
            }
            self.push(" from ");
        }
        self.string(&decl.source.value);
        self.push(";");
    }

    fn var_decl(&mut self, decl: &VarDecl) {
        self.push(decl.kind.as_str());
        self.push(" ");
        for (i, d) in decl.decls.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.pat(&d.name);
            if let Some(init) = &d.init {
                self.push(" = ");
                self.expr(init, PREC_ASSIGN);
            }
        }
    }

    fn function(&mut self, function: &Function) {
        self.push("(");
        self.params(&function.params);
        self.push(") ");
        self.block(&function.body);
    }

    fn params(&mut self, params: &[Pat]) {
        for (i, p) in params.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.pat(p);
        }
    }

    fn block(&mut self, block: &BlockStmt) {
        if block.stmts.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for stmt in &block.stmts {
            self.newline();
            self.stmt_inline(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn pat(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(ident) => self.push(&ident.sym),
            Pat::Array(array) => {
                self.push("[");
                for (i, elem) in array.elems.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    if let Some(elem) = elem {
                        self.pat(elem);
                    }
                }
                if matches!(array.elems.last(), Some(None)) {
                    self.push(",");
                }
                self.push("]");
            }
            Pat::Object(object) => {
                if object.props.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{ ");
                for (i, prop) in object.props.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    match prop {
                        ObjectPatProp::KeyValue(kv) => {
                            self.prop_name(&kv.key);
                            self.push(": ");
                            self.pat(&kv.value);
                        }
                        ObjectPatProp::Shorthand(sh) => {
                            self.push(&sh.key.sym);
                            if let Some(value) = &sh.value {
                                self.push(" = ");
                                self.expr(value, PREC_ASSIGN);
                            }
                        }
                        ObjectPatProp::Rest(rest) => {
                            self.push("...");
                            self.pat(&rest.arg);
                        }
                    }
                }
                self.push(" }");
            }
            Pat::Assign(assign) => {
                self.pat(&assign.left);
                self.push(" = ");
                self.expr(&assign.right, PREC_ASSIGN);
            }
            Pat::Rest(rest) => {
                self.push("...");
                self.pat(&rest.arg);
            }
        }
    }

    fn prop_name(&mut self, key: &PropName) {
        match key {
            PropName::Ident(ident) => self.push(&ident.sym),
            PropName::Str(s) => self.string(&s.value),
            PropName::Num(n) => self.number(n.value),
            PropName::Computed(c) => {
                self.push("[");
                self.expr(&c.expr, PREC_ASSIGN);
                self.push("]");
            }
        }
    }

    /// Prints an expression, parenthesised when it binds looser than `min`.
    pub fn expr(&mut self, expr: &Expr, min: u8) {
        let prec = precedence(expr);
        let wrap = prec < min;
        if wrap {
            self.push("(");
        }
        self.expr_unwrapped(expr);
        if wrap {
            self.push(")");
        }
    }

    fn expr_unwrapped(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(ident) => self.push(&ident.sym),
            Expr::Str(s) => self.string(&s.value),
            Expr::Num(n) => self.number(n.value),
            Expr::Bool(b) => self.push(if b.value { "true" } else { "false" }),
            Expr::Null(_) => self.push("null"),
            Expr::This(_) => self.push("this"),
            Expr::Tpl(tpl) => self.tpl(tpl),
            Expr::Array(array) => {
                self.push("[");
                for (i, elem) in array.elems.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    if let Some(elem) = elem {
                        self.expr_or_spread(elem);
                    }
                }
                if matches!(array.elems.last(), Some(None)) {
                    self.push(",");
                }
                self.push("]");
            }
            Expr::Object(object) => self.object(object),
            Expr::Fn(f) => self.fn_expr(f.ident.as_ref(), &f.function),
            Expr::Arrow(arrow) => {
                if arrow.is_async {
                    self.push("async ");
                }
                match arrow.params.as_slice() {
                    [Pat::Ident(ident)] => self.push(&ident.sym),
                    params => {
                        self.push("(");
                        self.params(params);
                        self.push(")");
                    }
                }
                self.push(" => ");
                match &arrow.body {
                    ArrowBody::Expr(body) => {
                        if starts_ambiguously(body) {
                            self.push("(");
                            self.expr(body, PREC_SEQ);
                            self.push(")");
                        } else {
                            self.expr(body, PREC_ASSIGN);
                        }
                    }
                    ArrowBody::Block(block) => self.block(block),
                }
            }
            Expr::Unary(unary) => {
                let op = unary.op.as_str();
                self.push(op);
                if op.chars().all(|c| c.is_ascii_alphabetic()) {
                    self.push(" ");
                }
                self.expr(&unary.arg, PREC_UNARY);
            }
            Expr::Bin(bin) => {
                let prec = bin.op.precedence();
                // `**` is right-associative and rejects a bare unary operand.
                let (left_min, right_min) = if bin.op == BinaryOp::Exp {
                    (PREC_POSTFIX, prec)
                } else {
                    (prec, prec + 1)
                };
                self.expr(&bin.left, left_min);
                self.push(" ");
                self.push(bin.op.as_str());
                self.push(" ");
                self.expr(&bin.right, right_min);
            }
            Expr::Assign(assign) => {
                self.expr(&assign.left, PREC_CALL);
                self.push(" ");
                self.push(assign.op.as_str());
                self.push(" ");
                self.expr(&assign.right, PREC_ASSIGN);
            }
            Expr::Member(member) => self.member(member, "."),
            Expr::OptMember(member) => self.member(member, "?."),
            Expr::Cond(cond) => {
                self.expr(&cond.test, PREC_COND + 1);
                self.push(" ? ");
                self.expr(&cond.cons, PREC_ASSIGN);
                self.push(" : ");
                self.expr(&cond.alt, PREC_ASSIGN);
            }
            Expr::Call(call) => {
                self.expr(&call.callee, PREC_CALL);
                self.args(&call.args);
            }
            Expr::OptCall(call) => {
                self.expr(&call.callee, PREC_CALL);
                self.push("?.");
                self.args(&call.args);
            }
            Expr::New(new) => {
                self.push("new ");
                if calls_in_chain(&new.callee) {
                    self.push("(");
                    self.expr(&new.callee, PREC_SEQ);
                    self.push(")");
                } else {
                    self.expr(&new.callee, PREC_CALL);
                }
                self.args(&new.args);
            }
            Expr::Await(await_expr) => {
                self.push("await ");
                self.expr(&await_expr.arg, PREC_UNARY);
            }
            Expr::Yield(yield_expr) => {
                self.push(if yield_expr.delegate { "yield*" } else { "yield" });
                if let Some(arg) = &yield_expr.arg {
                    self.push(" ");
                    self.expr(arg, PREC_ASSIGN);
                }
            }
            Expr::Update(update) => {
                if update.prefix {
                    self.push(update.op.as_str());
                    self.expr(&update.arg, PREC_UNARY);
                } else {
                    self.expr(&update.arg, PREC_POSTFIX);
                    self.push(update.op.as_str());
                }
            }
            Expr::TaggedTpl(tagged) => {
                self.expr(&tagged.tag, PREC_CALL);
                self.tpl(&tagged.tpl);
            }
            Expr::Class(c) => self.class(c.ident.as_ref(), &c.class),
            Expr::Regex(regex) => {
                self.push("/");
                self.push(&regex.exp);
                self.push("/");
                self.push(&regex.flags);
            }
            Expr::Seq(seq) => {
                for (i, e) in seq.exprs.iter().enumerate() {
                    if i > 0 {
                        self.push(", ");
                    }
                    self.expr(e, PREC_ASSIGN);
                }
            }
            Expr::JsxElement(element) => self.jsx_element(element),
            Expr::JsxFragment(fragment) => self.jsx_fragment(fragment),
        }
    }

    fn member(&mut self, member: &MemberExpr, dot: &str) {
        self.expr(&member.obj, PREC_CALL);
        match &member.prop {
            MemberProp::Ident(ident) => {
                self.push(dot);
                self.push(&ident.sym);
            }
            MemberProp::Computed(c) => {
                if dot != "." {
                    self.push(dot);
                }
                self.push("[");
                self.expr(&c.expr, PREC_SEQ);
                self.push("]");
            }
        }
    }

    fn args(&mut self, args: &[ExprOrSpread]) {
        self.push("(");
        for (i, arg) in args.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr_or_spread(arg);
        }
        self.push(")");
    }

    fn tpl(&mut self, tpl: &Tpl) {
        self.push("`");
        for (i, quasi) in tpl.quasis.iter().enumerate() {
            self.push(quasi);
            if let Some(e) = tpl.exprs.get(i) {
                self.push("${");
                self.expr(e, PREC_SEQ);
                self.push("}");
            }
        }
        self.push("`");
    }

    fn expr_or_spread(&mut self, e: &ExprOrSpread) {
        if e.spread {
            self.push("...");
        }
        self.expr(&e.expr, PREC_ASSIGN);
    }

    fn object(&mut self, object: &ObjectLit) {
        if object.props.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{ ");
        for (i, prop) in object.props.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            match prop {
                PropOrSpread::KeyValue(kv) => {
                    self.prop_name(&kv.key);
                    self.push(": ");
                    self.expr(&kv.value, PREC_ASSIGN);
                }
                PropOrSpread::Shorthand(ident) => self.push(&ident.sym),
                PropOrSpread::Spread(spread) => {
                    self.push("...");
                    self.expr(&spread.expr, PREC_ASSIGN);
                }
                PropOrSpread::Method(m) => self.method(&m.key, m.kind, &m.function),
            }
        }
        self.push(" }");
    }

    fn string(&mut self, value: &str) {
        self.out.push('"');
        for c in value.chars() {
            match c {
                '"' => self.push("\\\""),
                '\\' => self.push("\\\\"),
                '\n' => self.push("\\n"),
                '\r' => self.push("\\r"),
                '\t' => self.push("\\t"),
                c if (c as u32) < 0x20 => self.push(&format!("\\u{:04X}", c as u32)),
                c => self.out.push(c),
            }
        }
        self.out.push('"');
    }

    fn number(&mut self, value: f64) {
        if value.is_nan() {
            self.push("NaN");
        } else if value.is_infinite() {
            self.push(if value > 0.0 { "Infinity" } else { "-Infinity" });
        } else if value.fract() == 0.0 && value.abs() < 1e15 {
            self.push(&format!("{}", value as i64));
        } else {
            self.push(&format!("{value}"));
        }
    }

    fn jsx_element(&mut self, element: &JsxElement) {
        self.push("<");
        self.jsx_element_name(&element.opening.name);
        for attr in &element.opening.attrs {
            self.push(" ");
            match attr {
                JsxAttrOrSpread::Attr(attr) => {
                    self.push(&attr.name.full_name());
                    match &attr.value {
                        None => {}
                        Some(JsxAttrValue::Str(s)) => {
                            self.push("=");
                            self.string(&s.value);
                        }
                        Some(JsxAttrValue::ExprContainer(c)) => {
                            self.push("=");
                            self.jsx_expr_container(c);
                        }
                        Some(JsxAttrValue::Element(e)) => {
                            self.push("=");
                            self.jsx_element(e);
                        }
                        Some(JsxAttrValue::Fragment(f)) => {
                            self.push("=");
                            self.jsx_fragment(f);
                        }
                    }
                }
                JsxAttrOrSpread::Spread(spread) => {
                    self.push("{...");
                    self.expr(&spread.expr, PREC_ASSIGN);
                    self.push("}");
                }
            }
        }
        if element.children.is_empty() && element.opening.self_closing {
            self.push(" />");
            return;
        }
        self.push(">");
        self.jsx_children(&element.children);
        self.push("</");
        self.jsx_element_name(&element.opening.name);
        self.push(">");
    }

    fn jsx_fragment(&mut self, fragment: &JsxFragment) {
        self.push("<>");
        self.jsx_children(&fragment.children);
        self.push("</>");
    }

    fn jsx_children(&mut self, children: &[JsxChild]) {
        for child in children {
            match child {
                JsxChild::Text(text) => self.push(&text.value),
                JsxChild::ExprContainer(c) => self.jsx_expr_container(c),
                JsxChild::Spread(spread) => {
                    self.push("{...");
                    self.expr(&spread.expr, PREC_ASSIGN);
                    self.push("}");
                }
                JsxChild::Element(e) => self.jsx_element(e),
                JsxChild::Fragment(f) => self.jsx_fragment(f),
                JsxChild::Expr(e) => {
                    self.push("{");
                    self.expr(e, PREC_SEQ);
                    self.push("}");
                }
            }
        }
    }

    fn jsx_expr_container(&mut self, container: &JsxExprContainer) {
        self.push("{");
        if let Some(expr) = &container.expr {
            self.expr(expr, PREC_SEQ);
        }
        self.push("}");
    }

    fn jsx_element_name(&mut self, name: &JsxElementName) {
        match name {
            JsxElementName::Ident(ident) => self.push(&ident.sym),
            JsxElementName::Member(member) => self.jsx_member(member),
            JsxElementName::Namespaced(n) => {
                self.push(&n.ns.sym);
                self.push(":");
                self.push(&n.name.sym);
            }
        }
    }

    fn jsx_member(&mut self, member: &JsxMemberExpr) {
        match &member.obj {
            JsxObject::Ident(ident) => self.push(&ident.sym),
            JsxObject::Member(inner) => self.jsx_member(inner),
        }
        self.push(".");
        self.push(&member.prop.sym);
    }
}

fn precedence(expr: &Expr) -> u8 {
    match expr {
        Expr::Seq(_) => PREC_SEQ,
        Expr::Assign(_) | Expr::Arrow(_) | Expr::Yield(_) => PREC_ASSIGN,
        Expr::Cond(_) => PREC_COND,
        Expr::Bin(bin) => bin.op.precedence(),
        Expr::Unary(_) | Expr::Await(_) => PREC_UNARY,
        Expr::Update(update) if update.prefix => PREC_UNARY,
        Expr::Update(_) => PREC_POSTFIX,
        Expr::Call(_)
        | Expr::OptCall(_)
        | Expr::Member(_)
        | Expr::OptMember(_)
        | Expr::New(_)
        | Expr::TaggedTpl(_) => PREC_CALL,
        _ => PREC_PRIMARY,
    }
}

/// Returns the sub-expression whose first token starts `expr` when printed.
fn leftmost(expr: &Expr) -> &Expr {
    match expr {
        Expr::Call(call) | Expr::OptCall(call) => leftmost(&call.callee),
        Expr::Member(member) | Expr::OptMember(member) => leftmost(&member.obj),
        Expr::TaggedTpl(tagged) => leftmost(&tagged.tag),
        Expr::Bin(bin) => leftmost(&bin.left),
        Expr::Cond(cond) => leftmost(&cond.test),
        Expr::Assign(assign) => leftmost(&assign.left),
        Expr::Update(update) if !update.prefix => leftmost(&update.arg),
        Expr::Seq(seq) => seq.exprs.first().map_or(expr, leftmost),
        _ => expr,
    }
}

/// Returns true if printing `expr` at the start of a statement or arrow body
/// would be read as a block or a declaration.
fn starts_ambiguously(expr: &Expr) -> bool {
    matches!(leftmost(expr), Expr::Object(_) | Expr::Fn(_) | Expr::Class(_))
}

/// A `new` callee containing a call would bind the call's arguments instead.
fn calls_in_chain(expr: &Expr) -> bool {
    match expr {
        Expr::Call(_) | Expr::OptCall(_) => true,
        Expr::Member(member) | Expr::OptMember(member) => calls_in_chain(&member.obj),
        Expr::TaggedTpl(tagged) => calls_in_chain(&tagged.tag),
        _ => false,
    }
}
