//! Runtime helper references.
//!
//! Every runtime function the lowered code calls is obtained through the
//! per-file [`HelperTable`]. The first request for a helper injects its import
//! (or, in scripts, the shared `vue` namespace require); later requests return
//! the same reference.

use jsx_ast::*;
use module_imports::{add_default, add_named, add_namespace, ImportError, ImportOptions, RecordingHub};
use rustc_hash::FxHashMap;
use tracing::debug;

/// The runtime package the helpers are imported from.
pub const RUNTIME_SOURCE: &str = "vue";

/// The package providing the `on` / `nativeOn` attribute transform.
pub const TRANSFORM_ON_SOURCE: &str = "@vue/babel-helper-vue-transform-on";

/// A runtime helper exported by `vue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Helper {
    CreateVNode,
    Fragment,
    ResolveComponent,
    WithDirectives,
    VShow,
    VModelSelect,
    VModelText,
    VModelCheckbox,
    VModelRadio,
    VModelDynamic,
    ResolveDirective,
    MergeProps,
    CreateTextVNode,
    IsVNode,
}

impl Helper {
    /// Returns the exported name.
    pub fn name(self) -> &'static str {
        match self {
            Helper::CreateVNode => "createVNode",
            Helper::Fragment => "Fragment",
            Helper::ResolveComponent => "resolveComponent",
            Helper::WithDirectives => "withDirectives",
            Helper::VShow => "vShow",
            Helper::VModelSelect => "vModelSelect",
            Helper::VModelText => "vModelText",
            Helper::VModelCheckbox => "vModelCheckbox",
            Helper::VModelRadio => "vModelRadio",
            Helper::VModelDynamic => "vModelDynamic",
            Helper::ResolveDirective => "resolveDirective",
            Helper::MergeProps => "mergeProps",
            Helper::CreateTextVNode => "createTextVNode",
            Helper::IsVNode => "isVNode",
        }
    }
}

/// The injection targets a helper provider writes into.
pub(crate) struct Injection<'a> {
    pub program: &'a mut Program,
    pub uids: &'a mut UidGenerator,
    pub hub: &'a mut RecordingHub,
}

/// Per-file memo of helper references.
#[derive(Debug)]
pub struct HelperTable {
    module: bool,
    resolved: FxHashMap<Helper, Expr>,
    namespace: Option<Expr>,
    is_slot: Option<Ident>,
    transform_on: Option<Expr>,
}

impl HelperTable {
    /// Creates an empty table for a module (`true`) or script program.
    ///
    /// `pragma` replaces `createVNode` without importing anything.
    pub fn new(module: bool, pragma: Option<&str>) -> Self {
        let mut resolved = FxHashMap::default();
        if let Some(pragma) = pragma {
            resolved.insert(Helper::CreateVNode, Expr::ident(pragma));
        }
        Self {
            module,
            resolved,
            namespace: None,
            is_slot: None,
            transform_on: None,
        }
    }

    /// Returns the reference for `helper`, injecting its import on first use.
    pub(crate) fn resolve(
        &mut self,
        helper: Helper,
        target: Injection<'_>,
    ) -> Result<Expr, ImportError> {
        if let Some(expr) = self.resolved.get(&helper) {
            return Ok(expr.clone());
        }
        let expr = if self.module {
            debug!(helper = helper.name(), "importing runtime helper");
            add_named(
                target.program,
                target.uids,
                target.hub,
                helper.name(),
                RUNTIME_SOURCE,
                &ImportOptions::live(),
            )?
        } else {
            let namespace = self.namespace(target)?;
            Expr::member(namespace, helper.name())
        };
        self.resolved.insert(helper, expr.clone());
        Ok(expr)
    }

    fn namespace(&mut self, target: Injection<'_>) -> Result<Expr, ImportError> {
        if let Some(ns) = &self.namespace {
            return Ok(ns.clone());
        }
        debug!("requiring runtime namespace");
        let ns = add_namespace(
            target.program,
            target.uids,
            target.hub,
            RUNTIME_SOURCE,
            &ImportOptions::live(),
        )?;
        self.namespace = Some(ns.clone());
        Ok(ns)
    }

    /// Returns `_isSlot`, declaring the function on first use.
    ///
    /// ```js
    /// function _isSlot(s) {
    ///   return typeof s === "function" || Object.prototype.toString.call(s) === "[object Object]" && !_isVNode(s);
    /// }
    /// ```
    ///
    /// The declaration goes after the last import in modules and after the
    /// `vue` namespace binding in scripts.
    pub(crate) fn runtime_is_slot(&mut self, target: Injection<'_>) -> Result<Expr, ImportError> {
        if let Some(id) = &self.is_slot {
            return Ok(Expr::Ident(id.clone()));
        }
        let Injection { program, uids, hub } = target;
        let is_vnode = self.resolve(
            Helper::IsVNode,
            Injection {
                program: &mut *program,
                uids: &mut *uids,
                hub: &mut *hub,
            },
        )?;
        let id = uids.generate_uid("isSlot");
        let param = Ident::new("s");
        let test = Expr::bin(
            BinaryOp::LogicalOr,
            Expr::bin(
                BinaryOp::EqEqEq,
                Expr::Unary(UnaryExpr {
                    op: UnaryOp::TypeOf,
                    arg: Box::new(Expr::Ident(param.clone())),
                }),
                Expr::str("function"),
            ),
            Expr::bin(
                BinaryOp::LogicalAnd,
                Expr::bin(
                    BinaryOp::EqEqEq,
                    Expr::call(
                        Expr::member(
                            Expr::member(Expr::member(Expr::ident("Object"), "prototype"), "toString"),
                            "call",
                        ),
                        vec![Expr::Ident(param.clone())],
                    ),
                    Expr::str("[object Object]"),
                ),
                Expr::Unary(UnaryExpr {
                    op: UnaryOp::Not,
                    arg: Box::new(Expr::call(is_vnode, vec![Expr::Ident(param.clone())])),
                }),
            ),
        );
        let decl = Stmt::Fn(FnDecl {
            ident: id.clone(),
            function: Function::new(vec![Pat::Ident(param)], vec![Stmt::return_(test)]),
        });

        let anchor = if self.module {
            program.body.iter().rposition(|s| matches!(s, Stmt::Import(_)))
        } else {
            let ns = self.namespace.as_ref().and_then(Expr::as_ident).map(|i| i.sym.clone());
            program.body.iter().rposition(|s| match (s, &ns) {
                (Stmt::Var(decl), Some(ns)) => decl
                    .decls
                    .iter()
                    .any(|d| matches!(&d.name, Pat::Ident(i) if i.sym == *ns)),
                _ => false,
            })
        };
        let at = anchor.map_or(0, |i| i + 1);
        program.body.insert(at, decl);

        self.is_slot = Some(id.clone());
        Ok(Expr::Ident(id))
    }

    /// Returns `_transformOn`, default-importing it on first use.
    pub(crate) fn transform_on(&mut self, target: Injection<'_>) -> Result<Expr, ImportError> {
        if let Some(expr) = &self.transform_on {
            return Ok(expr.clone());
        }
        debug!(source = TRANSFORM_ON_SOURCE, "importing transformOn");
        let expr = add_default(
            target.program,
            target.uids,
            target.hub,
            TRANSFORM_ON_SOURCE,
            &ImportOptions::default().with_name_hint("_transformOn"),
        )?;
        self.transform_on = Some(expr.clone());
        Ok(expr)
    }
}
