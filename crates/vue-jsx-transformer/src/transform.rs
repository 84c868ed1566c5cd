//! Main transformation logic.

use crate::context::FileContext;
use crate::element::{lower_element, lower_fragment};
use crate::error::TransformError;
use crate::helpers::RUNTIME_SOURCE;
use crate::options::TransformOptions;
use indexmap::IndexMap;
use jsx_ast::visit::{self, Visit};
use jsx_ast::*;
use module_imports::is_module;
use smol_str::SmolStr;
use tracing::{debug, trace};

/// The result of transformation.
#[derive(Debug)]
pub struct TransformResult {
    /// The lowered program.
    pub program: Program,
    /// Whether the input contained any JSX.
    pub has_jsx: bool,
    /// Interop helpers (`interopRequireDefault`, ...) referenced by injected
    /// requires; the host provides their definitions.
    pub interop_helpers: Vec<String>,
}

/// Lowers every JSX element and fragment in `program` to runtime calls.
///
/// Runtime helpers are imported from `vue` on first use. Files without JSX
/// are returned unchanged apart from the final import coalescing.
pub fn transform(
    program: Program,
    options: &TransformOptions,
) -> Result<TransformResult, TransformError> {
    let has_jsx = contains_jsx(&program);
    if !has_jsx {
        let mut program = program;
        coalesce_runtime_imports(&mut program);
        return Ok(TransformResult {
            program,
            has_jsx,
            interop_helpers: Vec::new(),
        });
    }

    let module = is_module(&program)?;
    debug!(module, "lowering JSX");
    let mut cx = FileContext::new(program, options, module);
    lower_program(&mut cx)?;

    let interop_helpers = cx.hub.requested().map(str::to_string).collect();
    let mut program = cx.program;
    coalesce_runtime_imports(&mut program);
    Ok(TransformResult {
        program,
        has_jsx,
        interop_helpers,
    })
}

#[derive(Default)]
struct JsxFinder {
    found: bool,
}

impl Visit for JsxFinder {
    fn visit_expr(&mut self, expr: &Expr) {
        if self.found {
            return;
        }
        match expr {
            Expr::JsxElement(_) | Expr::JsxFragment(_) => self.found = true,
            _ => visit::walk_expr(self, expr),
        }
    }
}

/// Returns true if the program contains a JSX element or fragment.
pub fn contains_jsx(program: &Program) -> bool {
    let mut finder = JsxFinder::default();
    finder.visit_program(program);
    finder.found
}

/// Marks the program statement being lowered while helpers are injected
/// around it.
fn placeholder() -> Stmt {
    Stmt::Empty(EmptyStmt {
        span: Some(Span::new(u32::MAX, u32::MAX)),
    })
}

fn is_placeholder(stmt: &Stmt) -> bool {
    matches!(stmt, Stmt::Empty(EmptyStmt { span: Some(span) }) if *span == Span::new(u32::MAX, u32::MAX))
}

fn lower_program(cx: &mut FileContext<'_>) -> Result<(), TransformError> {
    let mut index = 0;
    while index < cx.program.body.len() {
        let mut stmt = std::mem::replace(&mut cx.program.body[index], placeholder());
        cx.hoists.push(Vec::new());
        let lowered = lower_stmt(cx, &mut stmt);
        let hoisted = cx.hoists.pop().unwrap_or_default();
        // Injected imports may have shifted the statement.
        let at = cx
            .program
            .body
            .iter()
            .position(is_placeholder)
            .unwrap_or(index);
        cx.program.body[at] = stmt;
        lowered?;
        let count = hoisted.len();
        cx.program.body.splice(at..at, hoisted);
        index = at + count + 1;
    }

    let pending = cx.scopes.pop();
    if !pending.is_empty() {
        trace!(count = pending.len(), "declaring program-level slot bindings");
        cx.program.body.insert(0, let_decl(pending));
    }
    Ok(())
}

fn let_decl(idents: Vec<Ident>) -> Stmt {
    Stmt::Var(VarDecl {
        kind: VarKind::Let,
        decls: idents
            .into_iter()
            .map(|ident| VarDeclarator {
                name: Pat::Ident(ident),
                init: None,
            })
            .collect(),
        span: None,
    })
}

/// Runs `f` with a fresh hoist list and returns what it hoisted.
fn collect_hoists<T>(
    cx: &mut FileContext<'_>,
    f: impl FnOnce(&mut FileContext<'_>) -> Result<T, TransformError>,
) -> Result<(T, Vec<Stmt>), TransformError> {
    cx.hoists.push(Vec::new());
    let result = f(cx);
    let hoisted = cx.hoists.pop().unwrap_or_default();
    result.map(|value| (value, hoisted))
}

fn lower_stmts(cx: &mut FileContext<'_>, stmts: &mut Vec<Stmt>) -> Result<(), TransformError> {
    let mut index = 0;
    while index < stmts.len() {
        let ((), hoisted) = collect_hoists(cx, |cx| lower_stmt(cx, &mut stmts[index]))?;
        let count = hoisted.len();
        stmts.splice(index..index, hoisted);
        index += count + 1;
    }
    Ok(())
}

/// Lowers a statement in a single-statement position such as an `if` branch.
fn lower_nested_stmt(cx: &mut FileContext<'_>, stmt: &mut Stmt) -> Result<(), TransformError> {
    let ((), mut hoisted) = collect_hoists(cx, |cx| lower_stmt(cx, stmt))?;
    if !hoisted.is_empty() {
        hoisted.push(std::mem::take(stmt));
        *stmt = Stmt::Block(BlockStmt { stmts: hoisted });
    }
    Ok(())
}

fn lower_stmt(cx: &mut FileContext<'_>, stmt: &mut Stmt) -> Result<(), TransformError> {
    match stmt {
        Stmt::Import(_)
        | Stmt::Empty(_)
        | Stmt::ExportNamed(_)
        | Stmt::ExportAll(_)
        | Stmt::Break(_)
        | Stmt::Continue(_) => Ok(()),
        Stmt::Expr(s) => lower_expr(cx, &mut s.expr),
        Stmt::Var(decl) => lower_var_decl(cx, decl),
        Stmt::Fn(decl) => lower_function(cx, &mut decl.function, None),
        Stmt::Class(decl) => lower_class(cx, &mut decl.class, None),
        Stmt::ExportDecl(export) => match &mut export.decl {
            Decl::Var(decl) => lower_var_decl(cx, decl),
            Decl::Fn(decl) => lower_function(cx, &mut decl.function, None),
            Decl::Class(decl) => lower_class(cx, &mut decl.class, None),
        },
        Stmt::ExportDefaultExpr(export) => lower_expr(cx, &mut export.expr),
        Stmt::ExportDefaultDecl(export) => match &mut export.decl {
            DefaultDecl::Fn(f) => lower_function(cx, &mut f.function, f.ident.as_ref()),
            DefaultDecl::Class(c) => lower_class(cx, &mut c.class, c.ident.as_ref()),
        },
        Stmt::Return(s) => match &mut s.arg {
            Some(arg) => lower_expr(cx, arg),
            None => Ok(()),
        },
        Stmt::Block(block) => lower_block(cx, block, &[]),
        Stmt::If(s) => {
            lower_expr(cx, &mut s.test)?;
            lower_nested_stmt(cx, &mut s.cons)?;
            if let Some(alt) = &mut s.alt {
                lower_nested_stmt(cx, alt)?;
            }
            Ok(())
        }
        Stmt::For(s) => {
            cx.scopes.push();
            let lowered = lower_for(cx, s);
            leave_scope(cx);
            lowered
        }
        Stmt::ForIn(s) => {
            lower_expr(cx, &mut s.right)?;
            cx.scopes.push();
            let lowered = lower_for_head(cx, &mut s.left)
                .and_then(|()| lower_nested_stmt(cx, &mut s.body));
            leave_scope(cx);
            lowered
        }
        Stmt::ForOf(s) => {
            lower_expr(cx, &mut s.right)?;
            cx.scopes.push();
            let lowered = lower_for_head(cx, &mut s.left)
                .and_then(|()| lower_nested_stmt(cx, &mut s.body));
            leave_scope(cx);
            lowered
        }
        Stmt::While(s) => {
            lower_expr(cx, &mut s.test)?;
            lower_nested_stmt(cx, &mut s.body)
        }
        Stmt::DoWhile(s) => {
            lower_nested_stmt(cx, &mut s.body)?;
            lower_expr(cx, &mut s.test)
        }
        Stmt::Try(s) => {
            lower_block(cx, &mut s.block, &[])?;
            if let Some(handler) = &mut s.handler {
                let params: Vec<Pat> = match &mut handler.param {
                    Some(param) => {
                        lower_pat(cx, param)?;
                        vec![param.clone()]
                    }
                    None => Vec::new(),
                };
                lower_block(cx, &mut handler.body, &params)?;
            }
            match &mut s.finalizer {
                Some(finalizer) => lower_block(cx, finalizer, &[]),
                None => Ok(()),
            }
        }
        Stmt::Switch(s) => {
            lower_expr(cx, &mut s.discriminant)?;
            cx.scopes.push();
            for case in &s.cases {
                cx.scopes.declare_stmts(&case.cons);
            }
            let lowered = s.cases.iter_mut().try_for_each(|case| {
                if let Some(test) = &mut case.test {
                    lower_expr(cx, test)?;
                }
                lower_stmts(cx, &mut case.cons)
            });
            leave_scope(cx);
            lowered
        }
        // Hoists go before the label so `continue label` keeps its target.
        Stmt::Labeled(s) => lower_stmt(cx, &mut s.body),
        Stmt::Throw(s) => lower_expr(cx, &mut s.arg),
    }
}

/// Leaves a scope that owns no statement list. Its queued slot bindings are
/// declared just before the statement being lowered.
fn leave_scope(cx: &mut FileContext<'_>) {
    let pending = cx.scopes.pop();
    if !pending.is_empty() {
        cx.hoist(let_decl(pending));
    }
}

fn lower_var_decl(cx: &mut FileContext<'_>, decl: &mut VarDecl) -> Result<(), TransformError> {
    for declarator in &mut decl.decls {
        lower_pat(cx, &mut declarator.name)?;
        if let Some(init) = &mut declarator.init {
            lower_expr(cx, init)?;
        }
    }
    Ok(())
}

fn lower_for(cx: &mut FileContext<'_>, s: &mut ForStmt) -> Result<(), TransformError> {
    match &mut s.init {
        Some(ForInit::Var(decl)) => {
            for declarator in &decl.decls {
                cx.scopes.declare_pat(&declarator.name);
            }
            lower_var_decl(cx, decl)?;
        }
        Some(ForInit::Expr(init)) => lower_expr(cx, init)?,
        None => {}
    }
    if let Some(test) = &mut s.test {
        lower_expr(cx, test)?;
    }
    if let Some(update) = &mut s.update {
        lower_expr(cx, update)?;
    }
    lower_nested_stmt(cx, &mut s.body)
}

fn lower_for_head(cx: &mut FileContext<'_>, head: &mut ForHead) -> Result<(), TransformError> {
    match head {
        ForHead::Var(decl) => {
            for declarator in &decl.decls {
                cx.scopes.declare_pat(&declarator.name);
            }
            lower_var_decl(cx, decl)
        }
        ForHead::Pat(pat) => lower_pat(cx, pat),
    }
}

/// Lowers a class body. A class expression's own name is bound inside it.
fn lower_class(
    cx: &mut FileContext<'_>,
    class: &mut Class,
    name: Option<&Ident>,
) -> Result<(), TransformError> {
    if let Some(super_class) = &mut class.super_class {
        lower_expr(cx, super_class)?;
    }
    cx.scopes.push();
    if let Some(name) = name {
        cx.scopes.declare(name.sym.clone());
    }
    let lowered = class.body.iter_mut().try_for_each(|member| match member {
        ClassMember::Method(method) => {
            lower_prop_name(cx, &mut method.key)?;
            lower_function(cx, &mut method.function, None)
        }
        ClassMember::Prop(prop) => {
            lower_prop_name(cx, &mut prop.key)?;
            match &mut prop.value {
                Some(value) => lower_expr(cx, value),
                None => Ok(()),
            }
        }
        ClassMember::StaticBlock(block) => lower_block(cx, block, &[]),
    });
    leave_scope(cx);
    lowered
}

fn lower_prop_name(cx: &mut FileContext<'_>, key: &mut PropName) -> Result<(), TransformError> {
    match key {
        PropName::Computed(computed) => lower_expr(cx, &mut computed.expr),
        PropName::Ident(_) | PropName::Str(_) | PropName::Num(_) => Ok(()),
    }
}

/// Lowers a block in its own scope. `params` are bound in that scope too.
fn lower_block(
    cx: &mut FileContext<'_>,
    block: &mut BlockStmt,
    params: &[Pat],
) -> Result<(), TransformError> {
    cx.scopes.push();
    for param in params {
        cx.scopes.declare_pat(param);
    }
    cx.scopes.declare_stmts(&block.stmts);
    let lowered = lower_stmts(cx, &mut block.stmts);
    let pending = cx.scopes.pop();
    lowered?;
    if !pending.is_empty() {
        block.stmts.insert(0, let_decl(pending));
    }
    Ok(())
}

fn lower_function(
    cx: &mut FileContext<'_>,
    function: &mut Function,
    name: Option<&Ident>,
) -> Result<(), TransformError> {
    for param in &mut function.params {
        lower_pat(cx, param)?;
    }
    let mut params = function.params.clone();
    if let Some(name) = name {
        params.push(Pat::Ident(name.clone()));
    }
    lower_block(cx, &mut function.body, &params)
}

fn lower_arrow(cx: &mut FileContext<'_>, arrow: &mut ArrowExpr) -> Result<(), TransformError> {
    for param in &mut arrow.params {
        lower_pat(cx, param)?;
    }
    let params = arrow.params.clone();
    match &mut arrow.body {
        ArrowBody::Block(block) => lower_block(cx, block, &params),
        ArrowBody::Expr(body) => {
            cx.scopes.push();
            for param in &params {
                cx.scopes.declare_pat(param);
            }
            let lowered = collect_hoists(cx, |cx| lower_expr(cx, body));
            let pending = cx.scopes.pop();
            let ((), hoisted) = lowered?;
            if pending.is_empty() && hoisted.is_empty() {
                return Ok(());
            }
            let mut stmts = Vec::with_capacity(hoisted.len() + 2);
            if !pending.is_empty() {
                stmts.push(let_decl(pending));
            }
            stmts.extend(hoisted);
            stmts.push(Stmt::return_(std::mem::replace(body.as_mut(), Expr::null())));
            arrow.body = ArrowBody::Block(BlockStmt { stmts });
            Ok(())
        }
    }
}

fn lower_pat(cx: &mut FileContext<'_>, pat: &mut Pat) -> Result<(), TransformError> {
    match pat {
        Pat::Ident(_) => Ok(()),
        Pat::Array(array) => {
            for elem in array.elems.iter_mut().flatten() {
                lower_pat(cx, elem)?;
            }
            Ok(())
        }
        Pat::Object(object) => {
            for prop in &mut object.props {
                match prop {
                    ObjectPatProp::KeyValue(kv) => {
                        lower_prop_name(cx, &mut kv.key)?;
                        lower_pat(cx, &mut kv.value)?;
                    }
                    ObjectPatProp::Shorthand(sh) => {
                        if let Some(value) = &mut sh.value {
                            lower_expr(cx, value)?;
                        }
                    }
                    ObjectPatProp::Rest(rest) => lower_pat(cx, &mut rest.arg)?,
                }
            }
            Ok(())
        }
        Pat::Assign(assign) => {
            lower_pat(cx, &mut assign.left)?;
            lower_expr(cx, &mut assign.right)
        }
        Pat::Rest(rest) => lower_pat(cx, &mut rest.arg),
    }
}

/// Lowers JSX anywhere inside `expr`, bottom-up.
pub(crate) fn lower_expr(cx: &mut FileContext<'_>, expr: &mut Expr) -> Result<(), TransformError> {
    match expr {
        Expr::JsxElement(_) | Expr::JsxFragment(_) => {
            let jsx = std::mem::replace(expr, Expr::null());
            *expr = lower_jsx(cx, jsx, None)?;
            Ok(())
        }
        Expr::Ident(_)
        | Expr::Str(_)
        | Expr::Num(_)
        | Expr::Bool(_)
        | Expr::Null(_)
        | Expr::This(_)
        | Expr::Regex(_) => Ok(()),
        Expr::Tpl(tpl) => {
            for e in &mut tpl.exprs {
                lower_expr(cx, e)?;
            }
            Ok(())
        }
        Expr::Array(array) => {
            for elem in array.elems.iter_mut().flatten() {
                lower_expr(cx, &mut elem.expr)?;
            }
            Ok(())
        }
        Expr::Object(object) => {
            for prop in &mut object.props {
                match prop {
                    PropOrSpread::KeyValue(kv) => {
                        lower_prop_name(cx, &mut kv.key)?;
                        lower_expr(cx, &mut kv.value)?;
                    }
                    PropOrSpread::Shorthand(_) => {}
                    PropOrSpread::Spread(spread) => lower_expr(cx, &mut spread.expr)?,
                    PropOrSpread::Method(method) => {
                        lower_prop_name(cx, &mut method.key)?;
                        lower_function(cx, &mut method.function, None)?;
                    }
                }
            }
            Ok(())
        }
        Expr::Fn(f) => lower_function(cx, &mut f.function, f.ident.as_ref()),
        Expr::Arrow(arrow) => lower_arrow(cx, arrow),
        Expr::Unary(unary) => lower_expr(cx, &mut unary.arg),
        Expr::Bin(bin) => {
            lower_expr(cx, &mut bin.left)?;
            lower_expr(cx, &mut bin.right)
        }
        Expr::Assign(assign) => {
            lower_expr(cx, &mut assign.left)?;
            let target: Option<SmolStr> = assign.left.as_ident().map(|ident| ident.sym.clone());
            if assign.op == AssignOp::Assign
                && matches!(*assign.right, Expr::JsxElement(_) | Expr::JsxFragment(_))
            {
                let jsx = std::mem::replace(assign.right.as_mut(), Expr::null());
                *assign.right = lower_jsx(cx, jsx, target.as_ref())?;
                Ok(())
            } else {
                lower_expr(cx, &mut assign.right)
            }
        }
        Expr::Member(member) | Expr::OptMember(member) => {
            lower_expr(cx, &mut member.obj)?;
            if let MemberProp::Computed(computed) = &mut member.prop {
                lower_expr(cx, &mut computed.expr)?;
            }
            Ok(())
        }
        Expr::Cond(cond) => {
            lower_expr(cx, &mut cond.test)?;
            lower_expr(cx, &mut cond.cons)?;
            lower_expr(cx, &mut cond.alt)
        }
        Expr::Call(call) | Expr::OptCall(call) => {
            lower_expr(cx, &mut call.callee)?;
            for arg in &mut call.args {
                lower_expr(cx, &mut arg.expr)?;
            }
            Ok(())
        }
        Expr::New(new) => {
            lower_expr(cx, &mut new.callee)?;
            for arg in &mut new.args {
                lower_expr(cx, &mut arg.expr)?;
            }
            Ok(())
        }
        Expr::Await(await_expr) => lower_expr(cx, &mut await_expr.arg),
        Expr::Yield(yield_expr) => match &mut yield_expr.arg {
            Some(arg) => lower_expr(cx, arg),
            None => Ok(()),
        },
        Expr::Update(update) => lower_expr(cx, &mut update.arg),
        Expr::TaggedTpl(tagged) => {
            lower_expr(cx, &mut tagged.tag)?;
            for e in &mut tagged.tpl.exprs {
                lower_expr(cx, e)?;
            }
            Ok(())
        }
        Expr::Class(c) => lower_class(cx, &mut c.class, c.ident.as_ref()),
        Expr::Seq(seq) => {
            for e in &mut seq.exprs {
                lower_expr(cx, e)?;
            }
            Ok(())
        }
    }
}

fn lower_jsx(
    cx: &mut FileContext<'_>,
    jsx: Expr,
    assigned_to: Option<&SmolStr>,
) -> Result<Expr, TransformError> {
    match jsx {
        Expr::JsxElement(element) => lower_element(cx, *element, assigned_to),
        Expr::JsxFragment(fragment) => lower_fragment(cx, *fragment),
        other => Ok(other),
    }
}

/// Moves every injected `vue` specifier into one import at the top of the
/// program. Declarations left without specifiers are removed.
pub fn coalesce_runtime_imports(program: &mut Program) {
    let mut injected: IndexMap<SmolStr, ImportSpecifier> = IndexMap::new();
    program.body.retain_mut(|stmt| {
        let Stmt::Import(decl) = stmt else {
            return true;
        };
        if decl.source.value != RUNTIME_SOURCE {
            return true;
        }
        let before = decl.specifiers.len();
        decl.specifiers.retain(|spec| match spec {
            ImportSpecifier::Named(named) if named.span.is_none() => {
                injected.insert(named.imported.sym.clone(), spec.clone());
                false
            }
            _ => true,
        });
        !(decl.specifiers.is_empty() && before > 0)
    });
    if injected.is_empty() {
        return;
    }
    program.body.insert(
        0,
        Stmt::Import(ImportDecl {
            specifiers: injected.into_values().collect(),
            source: Str::new(RUNTIME_SOURCE),
            type_only: false,
            span: None,
        }),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn injected(name: &str) -> ImportSpecifier {
        ImportSpecifier::Named(ImportNamedSpecifier {
            local: Ident::new(format!("_{name}")),
            imported: Ident::new(name),
            span: None,
        })
    }

    #[test]
    fn test_contains_jsx() {
        let plain = Program::module(vec![Stmt::expr(Expr::call(Expr::ident("f"), Vec::new()))]);
        assert!(!contains_jsx(&plain));
        let nested = Program::module(vec![Stmt::expr(Expr::arrow(
            Vec::new(),
            Expr::jsx(JsxElement::new(JsxElementName::ident("div"), Vec::new(), Vec::new())),
        ))]);
        assert!(contains_jsx(&nested));
    }

    #[test]
    fn test_coalesce_runtime_imports() {
        let user = ImportSpecifier::Named(ImportNamedSpecifier {
            local: Ident::new("ref"),
            imported: Ident::new("ref"),
            span: Some(Span::new(9u32, 12u32)),
        });
        let mut program = Program::module(vec![
            Stmt::Import(ImportDecl {
                specifiers: vec![injected("createVNode")],
                source: Str::new("vue"),
                type_only: false,
                span: None,
            }),
            Stmt::Import(ImportDecl {
                specifiers: vec![user, injected("mergeProps")],
                source: Str::new("vue"),
                type_only: false,
                span: Some(Span::new(0u32, 30u32)),
            }),
            Stmt::Import(ImportDecl {
                specifiers: vec![injected("createVNode")],
                source: Str::new("vue"),
                type_only: false,
                span: None,
            }),
            Stmt::Import(ImportDecl::bare("vue")),
        ]);
        coalesce_runtime_imports(&mut program);
        assert_eq!(
            print_program(&program),
            "import { createVNode as _createVNode, mergeProps as _mergeProps } from \"vue\";\n\
             import { ref } from \"vue\";\n\
             import \"vue\";\n"
        );
    }

    #[test]
    fn test_program_without_jsx_is_untouched() {
        let program = Program::module(vec![Stmt::expr(Expr::call(Expr::ident("f"), Vec::new()))]);
        let result = transform(program.clone(), &TransformOptions::default()).unwrap();
        assert!(!result.has_jsx);
        assert_eq!(result.program, program);
    }
}
