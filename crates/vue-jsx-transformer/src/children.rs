//! Children lowering and slot construction.

use crate::context::FileContext;
use crate::error::{TransformError, TransformErrorKind};
use crate::flags::SlotFlags;
use crate::helpers::Helper;
use jsx_ast::*;
use smol_str::SmolStr;

/// A child after its nested JSX has been lowered.
#[derive(Debug, Clone)]
pub(crate) enum Child {
    /// Raw JSX text.
    Text(String),
    /// `{expr}`; `None` for an empty container.
    Expr(Option<Expr>),
    /// `{...expr}`
    Spread(Expr),
    /// A nested element or fragment, already a vnode call.
    Lowered(Expr),
    /// An expression a host put in place of a child node.
    Host(Expr),
}

/// Collapses JSX text whitespace the way JSX renders it.
///
/// Lines are trimmed where they touch a line break, tabs become spaces,
/// blank lines are dropped and the remaining lines are joined with a single
/// space. Returns `None` when nothing is left.
pub fn collapse_jsx_text(text: &str) -> Option<String> {
    let lines: Vec<&str> = text.split("\r\n").flat_map(|l| l.split(['\n', '\r'])).collect();
    let last_non_empty = lines
        .iter()
        .rposition(|line| line.chars().any(|c| c != ' ' && c != '\t'))
        .unwrap_or(0);

    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        let line = line.replace('\t', " ");
        let mut trimmed = line.as_str();
        if i != 0 {
            trimmed = trimmed.trim_start_matches(' ');
        }
        if i != lines.len() - 1 {
            trimmed = trimmed.trim_end_matches(' ');
        }
        if trimmed.is_empty() {
            continue;
        }
        out.push_str(trimmed);
        if i != last_non_empty {
            out.push(' ');
        }
    }
    (!out.is_empty()).then_some(out)
}

/// Turns lowered children into the argument list of a vnode.
pub(crate) fn get_children(
    cx: &mut FileContext<'_>,
    children: Vec<Child>,
) -> Result<Vec<ExprOrSpread>, TransformError> {
    let mut out = Vec::with_capacity(children.len());
    for child in children {
        match child {
            Child::Text(text) => {
                if let Some(text) = collapse_jsx_text(&text) {
                    let create_text = cx.helper(Helper::CreateTextVNode)?;
                    out.push(ExprOrSpread::expr(Expr::call(create_text, vec![Expr::str(text)])));
                }
            }
            Child::Expr(None) => {}
            Child::Expr(Some(expr)) => {
                if let Expr::Ident(ident) = &expr {
                    cx.mark_dynamic(&ident.sym, true);
                }
                out.push(ExprOrSpread::expr(expr));
            }
            Child::Spread(expr) => out.push(ExprOrSpread::spread(expr)),
            Child::Lowered(expr) => out.push(ExprOrSpread::expr(expr)),
            Child::Host(expr @ Expr::Call(_)) => out.push(ExprOrSpread::expr(expr)),
            Child::Host(other) => {
                return Err(TransformErrorKind::UnsupportedChild {
                    kind: other.kind_name(),
                }
                .into())
            }
        }
    }
    Ok(out)
}

/// How the element's children end up in the vnode call.
pub(crate) struct SlotTarget<'a> {
    pub is_component: bool,
    pub slots: Option<Expr>,
    pub slot_flag: SlotFlags,
    /// `x` when the element is the right side of `x = <El>`.
    pub assigned_to: Option<&'a SmolStr>,
}

fn default_slot(children: Vec<ExprOrSpread>) -> PropOrSpread {
    let body = Expr::Array(ArrayLit {
        elems: children.into_iter().map(Some).collect(),
    });
    PropOrSpread::key_value(PropName::ident("default"), Expr::arrow(Vec::new(), body))
}

fn slot_flag_prop(cx: &FileContext<'_>, flag: SlotFlags) -> Option<PropOrSpread> {
    cx.options.optimize.then(|| {
        PropOrSpread::key_value(PropName::ident("_"), Expr::num(f64::from(flag.value())))
    })
}

/// Replaces children that read the assignment target with a snapshot taken
/// before the assignment: `const _x = function () { return x; }();`.
fn snapshot_self_references(
    cx: &mut FileContext<'_>,
    children: Vec<ExprOrSpread>,
    target: Option<&SmolStr>,
) -> Vec<ExprOrSpread> {
    let Some(target) = target else {
        return children;
    };
    children
        .into_iter()
        .map(|child| {
            let reads_target = !child.spread
                && matches!(child.expr.as_ref(), Expr::Ident(ident) if ident.sym == *target);
            if !reads_target {
                return child;
            }
            let uid = cx.uids.generate_uid(target);
            let read = Expr::Fn(FnExpr {
                ident: None,
                function: Function::new(Vec::new(), vec![Stmt::return_(*child.expr)]),
            });
            cx.hoist(Stmt::var(
                VarKind::Const,
                uid.clone(),
                Some(Expr::call(read, Vec::new())),
            ));
            ExprOrSpread::expr(Expr::Ident(uid))
        })
        .collect()
}

fn default_slot_object(
    cx: &mut FileContext<'_>,
    children: Vec<ExprOrSpread>,
    target: &SlotTarget<'_>,
) -> Expr {
    let children = snapshot_self_references(cx, children, target.assigned_to);
    let mut props = vec![default_slot(children)];
    props.extend(slot_flag_prop(cx, target.slot_flag));
    Expr::object(props)
}

/// Builds the third `createVNode` argument, `None` when there are no children.
pub(crate) fn build_vnode_children(
    cx: &mut FileContext<'_>,
    mut children: Vec<ExprOrSpread>,
    target: SlotTarget<'_>,
) -> Result<Option<Expr>, TransformError> {
    if children.len() > 1 || target.slots.is_some() {
        if !target.is_component {
            return Ok(Some(Expr::Array(ArrayLit {
                elems: children.into_iter().map(Some).collect(),
            })));
        }
        if children.is_empty() {
            return Ok(target.slots);
        }
        let children = snapshot_self_references(cx, children, target.assigned_to);
        let mut props = vec![default_slot(children)];
        match target.slots {
            Some(Expr::Object(object)) => props.extend(object.props),
            Some(other) => props.push(PropOrSpread::spread(other)),
            None => {}
        }
        props.extend(slot_flag_prop(cx, target.slot_flag));
        return Ok(Some(Expr::object(props)));
    }

    let Some(child) = children.pop() else {
        return Ok(None);
    };
    let enable_object_slots = cx.options.enable_object_slots;
    let expr = match child.expr.as_ref() {
        _ if child.spread => None,
        Expr::Ident(_) if target.is_component => {
            let fallback = default_slot_object(cx, vec![child.clone()], &target);
            if !enable_object_slots {
                return Ok(Some(fallback));
            }
            let is_slot = cx.is_slot()?;
            let value = (*child.expr).clone();
            Some(Expr::cond(
                Expr::call(is_slot, vec![value.clone()]),
                value,
                fallback,
            ))
        }
        Expr::Call(call) if call.span.is_some() && target.is_component => {
            if !enable_object_slots {
                return Ok(Some(default_slot_object(cx, vec![child], &target)));
            }
            let slot = cx.uids.generate_uid("slot");
            cx.scopes.push_declaration(slot.clone());
            let fallback = default_slot_object(
                cx,
                vec![ExprOrSpread::expr(Expr::Ident(slot.clone()))],
                &target,
            );
            let is_slot = cx.is_slot()?;
            let assign = Expr::assign(Expr::Ident(slot.clone()), (*child.expr).clone());
            Some(Expr::cond(
                Expr::call(is_slot, vec![assign]),
                Expr::Ident(slot),
                fallback,
            ))
        }
        Expr::Fn(_) | Expr::Arrow(_) => Some(Expr::object(vec![PropOrSpread::key_value(
            PropName::ident("default"),
            (*child.expr).clone(),
        )])),
        Expr::Object(object) => {
            let mut props = object.props.clone();
            props.extend(slot_flag_prop(cx, target.slot_flag));
            Some(Expr::object(props))
        }
        _ => None,
    };
    Ok(Some(match expr {
        Some(expr) => expr,
        None if target.is_component => Expr::object(vec![default_slot(vec![child])]),
        None => Expr::Array(ArrayLit {
            elems: vec![Some(child)],
        }),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TransformOptions;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_collapse_jsx_text() {
        assert_eq!(collapse_jsx_text("hello").as_deref(), Some("hello"));
        assert_eq!(collapse_jsx_text("\n  a\n  b  \n").as_deref(), Some("a b"));
        assert_eq!(collapse_jsx_text("  a\n  b  \n").as_deref(), Some("  a b"));
        assert_eq!(collapse_jsx_text("a\tb").as_deref(), Some("a b"));
        assert_eq!(collapse_jsx_text("a\r\n\r\n   b").as_deref(), Some("a b"));
        assert_eq!(collapse_jsx_text(" trailing "), Some(" trailing ".to_string()));
        assert_eq!(collapse_jsx_text("\n   \n\t\n"), None);
        assert_eq!(collapse_jsx_text(""), None);
    }

    fn lower(
        options: &TransformOptions,
        children: Vec<ExprOrSpread>,
        is_component: bool,
        slots: Option<Expr>,
    ) -> (Option<String>, String) {
        let mut cx = FileContext::new(Program::module(Vec::new()), options, true);
        let built = build_vnode_children(
            &mut cx,
            children,
            SlotTarget {
                is_component,
                slots,
                slot_flag: SlotFlags::Stable,
                assigned_to: None,
            },
        )
        .unwrap();
        (built.as_ref().map(print_expr), print_program(&cx.program))
    }

    fn exprs(names: &[&str]) -> Vec<ExprOrSpread> {
        names.iter().map(|n| ExprOrSpread::expr(Expr::ident(*n))).collect()
    }

    #[test]
    fn test_multiple_children() {
        let options = TransformOptions::default();
        let (component, _) = lower(&options, exprs(&["a", "b"]), true, None);
        assert_eq!(component.as_deref(), Some("{ default: () => [a, b] }"));
        let (element, _) = lower(&options, exprs(&["a", "b"]), false, None);
        assert_eq!(element.as_deref(), Some("[a, b]"));
    }

    #[test]
    fn test_explicit_slots() {
        let options = TransformOptions::default();
        let (only_slots, _) = lower(&options, Vec::new(), true, Some(Expr::ident("slots")));
        assert_eq!(only_slots.as_deref(), Some("slots"));

        let inline = Expr::object(vec![PropOrSpread::key_value(
            PropName::ident("header"),
            Expr::ident("h"),
        )]);
        let (merged, _) = lower(&options, exprs(&["a"]), true, Some(inline));
        assert_eq!(merged.as_deref(), Some("{ default: () => [a], header: h }"));

        let (spread, _) = lower(&options, exprs(&["a"]), true, Some(Expr::ident("slots")));
        assert_eq!(spread.as_deref(), Some("{ default: () => [a], ...slots }"));
    }

    #[test]
    fn test_identifier_child_checks_slot_at_runtime() {
        let options = TransformOptions::default();
        let (child, imports) = lower(&options, exprs(&["content"]), true, None);
        assert_eq!(
            child.as_deref(),
            Some("_isSlot(content) ? content : { default: () => [content] }")
        );
        assert!(imports.contains("function _isSlot(s)"));

        let options = TransformOptions {
            enable_object_slots: false,
            optimize: true,
            ..Default::default()
        };
        let (child, imports) = lower(&options, exprs(&["content"]), true, None);
        assert_eq!(child.as_deref(), Some("{ default: () => [content], _: 1 }"));
        assert_eq!(imports, "");
    }

    #[test]
    fn test_function_and_object_children() {
        let options = TransformOptions {
            optimize: true,
            ..Default::default()
        };
        let arrow = Expr::arrow(Vec::new(), Expr::ident("a"));
        let (child, _) = lower(&options, vec![ExprOrSpread::expr(arrow)], true, None);
        assert_eq!(child.as_deref(), Some("{ default: () => a }"));

        let object = Expr::object(vec![PropOrSpread::key_value(
            PropName::ident("footer"),
            Expr::ident("f"),
        )]);
        let (child, _) = lower(&options, vec![ExprOrSpread::expr(object)], true, None);
        assert_eq!(child.as_deref(), Some("{ footer: f, _: 1 }"));
    }

    #[test]
    fn test_single_plain_child() {
        let options = TransformOptions::default();
        let (child, _) = lower(&options, vec![ExprOrSpread::expr(Expr::str("x"))], true, None);
        assert_eq!(child.as_deref(), Some("{ default: () => [\"x\"] }"));
        let (child, _) = lower(&options, exprs(&["a"]), false, None);
        assert_eq!(child.as_deref(), Some("[a]"));
        let (child, _) = lower(&options, Vec::new(), false, None);
        assert_eq!(child, None);
    }

    #[test]
    fn test_source_call_child_is_cached() {
        let options = TransformOptions::default();
        let call = Expr::Call(CallExpr {
            callee: Box::new(Expr::ident("render")),
            args: Vec::new(),
            span: Some(Span::new(10u32, 18u32)),
        });
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let built = build_vnode_children(
            &mut cx,
            vec![ExprOrSpread::expr(call)],
            SlotTarget {
                is_component: true,
                slots: None,
                slot_flag: SlotFlags::Stable,
                assigned_to: None,
            },
        )
        .unwrap();
        assert_eq!(
            built.as_ref().map(print_expr).as_deref(),
            Some("_isSlot(_slot = render()) ? _slot : { default: () => [_slot] }")
        );
        assert_eq!(cx.scopes.pop(), vec![Ident::new("_slot")]);
    }

    #[test]
    fn test_unsupported_host_child() {
        let options = TransformOptions::default();
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let err = get_children(&mut cx, vec![Child::Host(Expr::num(1.0))]).unwrap_err();
        assert_eq!(
            err.kind,
            TransformErrorKind::UnsupportedChild {
                kind: "NumericLiteral"
            }
        );
    }
}
