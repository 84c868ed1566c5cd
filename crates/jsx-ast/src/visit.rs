//! Read-only traversal.
//!
//! Implementors override the `visit_*` methods they care about and call the
//! matching `walk_*` function to keep descending.

use crate::ast::*;

/// A read-only AST visitor.
pub trait Visit {
    fn visit_program(&mut self, program: &Program) {
        walk_program(self, program);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }

    fn visit_pat(&mut self, pat: &Pat) {
        walk_pat(self, pat);
    }

    /// Called for every identifier: references, bindings, keys and tag names.
    fn visit_ident(&mut self, _ident: &Ident) {}

    fn visit_jsx_element(&mut self, element: &JsxElement) {
        walk_jsx_element(self, element);
    }

    fn visit_jsx_fragment(&mut self, fragment: &JsxFragment) {
        walk_jsx_children(self, &fragment.children);
    }
}

pub fn walk_program<V: Visit + ?Sized>(v: &mut V, program: &Program) {
    for stmt in &program.body {
        v.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visit + ?Sized>(v: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Import(decl) => {
            for spec in &decl.specifiers {
                v.visit_ident(spec.local());
            }
        }
        Stmt::Expr(s) => v.visit_expr(&s.expr),
        Stmt::Var(decl) => walk_var_decl(v, decl),
        Stmt::Fn(decl) => {
            v.visit_ident(&decl.ident);
            walk_function(v, &decl.function);
        }
        Stmt::Return(s) => {
            if let Some(arg) = &s.arg {
                v.visit_expr(arg);
            }
        }
        Stmt::Block(block) => walk_block(v, block),
        Stmt::If(s) => {
            v.visit_expr(&s.test);
            v.visit_stmt(&s.cons);
            if let Some(alt) = &s.alt {
                v.visit_stmt(alt);
            }
        }
        Stmt::ExportDecl(export) => match &export.decl {
            Decl::Var(decl) => walk_var_decl(v, decl),
            Decl::Fn(decl) => {
                v.visit_ident(&decl.ident);
                walk_function(v, &decl.function);
            }
            Decl::Class(decl) => {
                v.visit_ident(&decl.ident);
                walk_class(v, &decl.class);
            }
        },
        Stmt::ExportDefaultExpr(export) => v.visit_expr(&export.expr),
        Stmt::ExportDefaultDecl(export) => match &export.decl {
            DefaultDecl::Fn(f) => {
                if let Some(ident) = &f.ident {
                    v.visit_ident(ident);
                }
                walk_function(v, &f.function);
            }
            DefaultDecl::Class(c) => {
                if let Some(ident) = &c.ident {
                    v.visit_ident(ident);
                }
                walk_class(v, &c.class);
            }
        },
        Stmt::ExportNamed(export) => {
            for spec in &export.specifiers {
                v.visit_ident(&spec.orig);
                if let Some(exported) = &spec.exported {
                    v.visit_ident(exported);
                }
            }
        }
        Stmt::ExportAll(_) | Stmt::Empty(_) => {}
        Stmt::Class(decl) => {
            v.visit_ident(&decl.ident);
            walk_class(v, &decl.class);
        }
        Stmt::For(s) => {
            match &s.init {
                Some(ForInit::Var(decl)) => walk_var_decl(v, decl),
                Some(ForInit::Expr(expr)) => v.visit_expr(expr),
                None => {}
            }
            if let Some(test) = &s.test {
                v.visit_expr(test);
            }
            if let Some(update) = &s.update {
                v.visit_expr(update);
            }
            v.visit_stmt(&s.body);
        }
        Stmt::ForIn(s) => {
            walk_for_head(v, &s.left);
            v.visit_expr(&s.right);
            v.visit_stmt(&s.body);
        }
        Stmt::ForOf(s) => {
            walk_for_head(v, &s.left);
            v.visit_expr(&s.right);
            v.visit_stmt(&s.body);
        }
        Stmt::While(s) => {
            v.visit_expr(&s.test);
            v.visit_stmt(&s.body);
        }
        Stmt::DoWhile(s) => {
            v.visit_stmt(&s.body);
            v.visit_expr(&s.test);
        }
        Stmt::Try(s) => {
            walk_block(v, &s.block);
            if let Some(handler) = &s.handler {
                if let Some(param) = &handler.param {
                    v.visit_pat(param);
                }
                walk_block(v, &handler.body);
            }
            if let Some(finalizer) = &s.finalizer {
                walk_block(v, finalizer);
            }
        }
        Stmt::Switch(s) => {
            v.visit_expr(&s.discriminant);
            for case in &s.cases {
                if let Some(test) = &case.test {
                    v.visit_expr(test);
                }
                for stmt in &case.cons {
                    v.visit_stmt(stmt);
                }
            }
        }
        Stmt::Labeled(s) => {
            v.visit_ident(&s.label);
            v.visit_stmt(&s.body);
        }
        Stmt::Break(BreakStmt { label }) | Stmt::Continue(ContinueStmt { label }) => {
            if let Some(label) = label {
                v.visit_ident(label);
            }
        }
        Stmt::Throw(s) => v.visit_expr(&s.arg),
    }
}

fn walk_var_decl<V: Visit + ?Sized>(v: &mut V, decl: &VarDecl) {
    for d in &decl.decls {
        v.visit_pat(&d.name);
        if let Some(init) = &d.init {
            v.visit_expr(init);
        }
    }
}

fn walk_for_head<V: Visit + ?Sized>(v: &mut V, head: &ForHead) {
    match head {
        ForHead::Var(decl) => walk_var_decl(v, decl),
        ForHead::Pat(pat) => v.visit_pat(pat),
    }
}

pub fn walk_class<V: Visit + ?Sized>(v: &mut V, class: &Class) {
    if let Some(super_class) = &class.super_class {
        v.visit_expr(super_class);
    }
    for member in &class.body {
        match member {
            ClassMember::Method(method) => {
                walk_prop_name(v, &method.key);
                walk_function(v, &method.function);
            }
            ClassMember::Prop(prop) => {
                walk_prop_name(v, &prop.key);
                if let Some(value) = &prop.value {
                    v.visit_expr(value);
                }
            }
            ClassMember::StaticBlock(block) => walk_block(v, block),
        }
    }
}

pub fn walk_block<V: Visit + ?Sized>(v: &mut V, block: &BlockStmt) {
    for stmt in &block.stmts {
        v.visit_stmt(stmt);
    }
}

pub fn walk_function<V: Visit + ?Sized>(v: &mut V, function: &Function) {
    for param in &function.params {
        v.visit_pat(param);
    }
    walk_block(v, &function.body);
}

pub fn walk_pat<V: Visit + ?Sized>(v: &mut V, pat: &Pat) {
    match pat {
        Pat::Ident(ident) => v.visit_ident(ident),
        Pat::Array(array) => {
            for elem in array.elems.iter().flatten() {
                v.visit_pat(elem);
            }
        }
        Pat::Object(object) => {
            for prop in &object.props {
                match prop {
                    ObjectPatProp::KeyValue(kv) => {
                        walk_prop_name(v, &kv.key);
                        v.visit_pat(&kv.value);
                    }
                    ObjectPatProp::Shorthand(sh) => {
                        v.visit_ident(&sh.key);
                        if let Some(value) = &sh.value {
                            v.visit_expr(value);
                        }
                    }
                    ObjectPatProp::Rest(rest) => v.visit_pat(&rest.arg),
                }
            }
        }
        Pat::Assign(assign) => {
            v.visit_pat(&assign.left);
            v.visit_expr(&assign.right);
        }
        Pat::Rest(rest) => v.visit_pat(&rest.arg),
    }
}

fn walk_prop_name<V: Visit + ?Sized>(v: &mut V, key: &PropName) {
    match key {
        PropName::Ident(ident) => v.visit_ident(ident),
        PropName::Computed(computed) => v.visit_expr(&computed.expr),
        PropName::Str(_) | PropName::Num(_) => {}
    }
}

pub fn walk_expr<V: Visit + ?Sized>(v: &mut V, expr: &Expr) {
    match expr {
        Expr::Ident(ident) => v.visit_ident(ident),
        Expr::Str(_)
        | Expr::Num(_)
        | Expr::Bool(_)
        | Expr::Null(_)
        | Expr::This(_)
        | Expr::Regex(_) => {}
        Expr::Tpl(tpl) => {
            for e in &tpl.exprs {
                v.visit_expr(e);
            }
        }
        Expr::Array(array) => {
            for elem in array.elems.iter().flatten() {
                v.visit_expr(&elem.expr);
            }
        }
        Expr::Object(object) => {
            for prop in &object.props {
                match prop {
                    PropOrSpread::KeyValue(kv) => {
                        walk_prop_name(v, &kv.key);
                        v.visit_expr(&kv.value);
                    }
                    PropOrSpread::Shorthand(ident) => v.visit_ident(ident),
                    PropOrSpread::Spread(spread) => v.visit_expr(&spread.expr),
                    PropOrSpread::Method(method) => {
                        walk_prop_name(v, &method.key);
                        walk_function(v, &method.function);
                    }
                }
            }
        }
        Expr::Fn(f) => {
            if let Some(ident) = &f.ident {
                v.visit_ident(ident);
            }
            walk_function(v, &f.function);
        }
        Expr::Arrow(arrow) => {
            for param in &arrow.params {
                v.visit_pat(param);
            }
            match &arrow.body {
                ArrowBody::Expr(body) => v.visit_expr(body),
                ArrowBody::Block(block) => walk_block(v, block),
            }
        }
        Expr::Unary(unary) => v.visit_expr(&unary.arg),
        Expr::Bin(bin) => {
            v.visit_expr(&bin.left);
            v.visit_expr(&bin.right);
        }
        Expr::Assign(assign) => {
            v.visit_expr(&assign.left);
            v.visit_expr(&assign.right);
        }
        Expr::Member(member) | Expr::OptMember(member) => {
            v.visit_expr(&member.obj);
            match &member.prop {
                MemberProp::Ident(ident) => v.visit_ident(ident),
                MemberProp::Computed(computed) => v.visit_expr(&computed.expr),
            }
        }
        Expr::Cond(cond) => {
            v.visit_expr(&cond.test);
            v.visit_expr(&cond.cons);
            v.visit_expr(&cond.alt);
        }
        Expr::Call(call) | Expr::OptCall(call) => {
            v.visit_expr(&call.callee);
            for arg in &call.args {
                v.visit_expr(&arg.expr);
            }
        }
        Expr::Seq(seq) => {
            for e in &seq.exprs {
                v.visit_expr(e);
            }
        }
        Expr::New(new) => {
            v.visit_expr(&new.callee);
            for arg in &new.args {
                v.visit_expr(&arg.expr);
            }
        }
        Expr::Await(await_expr) => v.visit_expr(&await_expr.arg),
        Expr::Yield(yield_expr) => {
            if let Some(arg) = &yield_expr.arg {
                v.visit_expr(arg);
            }
        }
        Expr::Update(update) => v.visit_expr(&update.arg),
        Expr::TaggedTpl(tagged) => {
            v.visit_expr(&tagged.tag);
            for e in &tagged.tpl.exprs {
                v.visit_expr(e);
            }
        }
        Expr::Class(c) => {
            if let Some(ident) = &c.ident {
                v.visit_ident(ident);
            }
            walk_class(v, &c.class);
        }
        Expr::JsxElement(element) => v.visit_jsx_element(element),
        Expr::JsxFragment(fragment) => v.visit_jsx_fragment(fragment),
    }
}

pub fn walk_jsx_element<V: Visit + ?Sized>(v: &mut V, element: &JsxElement) {
    walk_jsx_element_name(v, &element.opening.name);
    for attr in &element.opening.attrs {
        match attr {
            JsxAttrOrSpread::Attr(attr) => {
                match &attr.name {
                    JsxAttrName::Ident(ident) => v.visit_ident(ident),
                    JsxAttrName::Namespaced(name) => {
                        v.visit_ident(&name.ns);
                        v.visit_ident(&name.name);
                    }
                }
                match &attr.value {
                    Some(JsxAttrValue::ExprContainer(container)) => {
                        if let Some(expr) = &container.expr {
                            v.visit_expr(expr);
                        }
                    }
                    Some(JsxAttrValue::Element(element)) => v.visit_jsx_element(element),
                    Some(JsxAttrValue::Fragment(fragment)) => v.visit_jsx_fragment(fragment),
                    Some(JsxAttrValue::Str(_)) | None => {}
                }
            }
            JsxAttrOrSpread::Spread(spread) => v.visit_expr(&spread.expr),
        }
    }
    walk_jsx_children(v, &element.children);
}

fn walk_jsx_element_name<V: Visit + ?Sized>(v: &mut V, name: &JsxElementName) {
    match name {
        JsxElementName::Ident(ident) => v.visit_ident(ident),
        JsxElementName::Member(member) => walk_jsx_member(v, member),
        JsxElementName::Namespaced(name) => {
            v.visit_ident(&name.ns);
            v.visit_ident(&name.name);
        }
    }
}

fn walk_jsx_member<V: Visit + ?Sized>(v: &mut V, member: &JsxMemberExpr) {
    match &member.obj {
        JsxObject::Ident(ident) => v.visit_ident(ident),
        JsxObject::Member(inner) => walk_jsx_member(v, inner),
    }
    v.visit_ident(&member.prop);
}

pub fn walk_jsx_children<V: Visit + ?Sized>(v: &mut V, children: &[JsxChild]) {
    for child in children {
        match child {
            JsxChild::Text(_) => {}
            JsxChild::ExprContainer(container) => {
                if let Some(expr) = &container.expr {
                    v.visit_expr(expr);
                }
            }
            JsxChild::Spread(spread) => v.visit_expr(&spread.expr),
            JsxChild::Element(element) => v.visit_jsx_element(element),
            JsxChild::Fragment(fragment) => v.visit_jsx_fragment(fragment),
            JsxChild::Expr(expr) => v.visit_expr(expr),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Names(Vec<String>);

    impl Visit for Names {
        fn visit_ident(&mut self, ident: &Ident) {
            self.0.push(ident.sym.to_string());
        }
    }

    #[test]
    fn test_collects_idents_through_jsx() {
        let element = JsxElement::new(
            JsxElementName::ident("Comp"),
            vec![JsxAttrOrSpread::expr("value", Expr::ident("model"))],
            vec![JsxChild::expr(Expr::ident("child"))],
        );
        let program = Program::module(vec![Stmt::var(
            VarKind::Const,
            Ident::new("node"),
            Some(Expr::jsx(element)),
        )]);

        let mut names = Names::default();
        names.visit_program(&program);
        assert_eq!(names.0, vec!["node", "Comp", "value", "model", "child"]);
    }

    #[test]
    fn test_walks_exported_class_methods() {
        let render = Function::new(
            Vec::new(),
            vec![Stmt::return_(Expr::jsx(JsxElement::new(
                JsxElementName::ident("Row"),
                Vec::new(),
                Vec::new(),
            )))],
        );
        let class = ClassExpr {
            ident: Some(Ident::new("Table")),
            class: Class {
                super_class: Some(Box::new(Expr::ident("Base"))),
                body: vec![ClassMember::Method(ClassMethod {
                    key: PropName::Ident(Ident::new("render")),
                    kind: MethodKind::Method,
                    is_static: false,
                    function: render,
                })],
            },
        };
        let program = Program::module(vec![Stmt::ExportDefaultDecl(ExportDefaultDecl {
            decl: DefaultDecl::Class(class),
            span: None,
        })]);

        let mut names = Names::default();
        names.visit_program(&program);
        assert_eq!(names.0, vec!["Table", "Base", "render", "Row"]);
    }
}
