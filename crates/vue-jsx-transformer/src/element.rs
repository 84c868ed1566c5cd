//! Element and fragment lowering.
//!
//! An element is lowered after everything nested in it, so by the time its
//! own call is built every child and attribute value is plain JavaScript.

use crate::children::{build_vnode_children, get_children, Child, SlotTarget};
use crate::context::{ElementFrame, FileContext};
use crate::error::{TransformError, TransformErrorKind};
use crate::flags::SlotFlags;
use crate::helpers::Helper;
use crate::props::{build_props, Attr, AttrItem, ElementInfo, TypeAttr};
use crate::tags::{is_html_tag, is_svg_tag, should_transform_to_slots};
use crate::transform::lower_expr;
use jsx_ast::*;
use smol_str::SmolStr;

/// Resolves the first `createVNode` argument for a tag name.
pub(crate) fn get_tag(
    cx: &mut FileContext<'_>,
    name: &JsxElementName,
    span: Option<Span>,
) -> Result<Expr, TransformError> {
    match name {
        JsxElementName::Ident(ident) => {
            let name = ident.sym.as_str();
            if is_html_tag(name) || is_svg_tag(name) {
                return Ok(Expr::str(name));
            }
            if name == "Fragment" {
                return cx.helper(Helper::Fragment);
            }
            if cx.scopes.has_binding(name) {
                return Ok(Expr::Ident(Ident::new(ident.sym.clone())));
            }
            if cx.options.is_custom_element.matches(name) {
                return Ok(Expr::str(name));
            }
            let resolve = cx.helper(Helper::ResolveComponent)?;
            Ok(Expr::call(resolve, vec![Expr::str(name)]))
        }
        JsxElementName::Member(member) => Ok(member_tag(member)),
        JsxElementName::Namespaced(_) => Err(TransformError::new(
            TransformErrorKind::UnsupportedTag {
                kind: "JSXNamespacedName",
            },
            span,
        )),
    }
}

fn member_tag(member: &JsxMemberExpr) -> Expr {
    let obj = match &member.obj {
        JsxObject::Ident(ident) => Expr::Ident(ident.clone()),
        JsxObject::Member(inner) => member_tag(inner),
    };
    Expr::member(obj, member.prop.sym.clone())
}

/// Returns true if the tag names a component, whose children become slots.
pub(crate) fn is_component(cx: &FileContext<'_>, name: &JsxElementName) -> bool {
    match name {
        JsxElementName::Member(member) => should_transform_to_slots(&member.prop.sym),
        JsxElementName::Ident(ident) => {
            let tag = ident.sym.as_str();
            !cx.options.is_custom_element.matches(tag)
                && should_transform_to_slots(tag)
                && !is_html_tag(tag)
                && !is_svg_tag(tag)
        }
        JsxElementName::Namespaced(_) => false,
    }
}

/// Lowers an element to `createVNode(...)`, wrapped in `withDirectives`
/// when it carries runtime directives.
///
/// `assigned_to` names `x` when the element is the right side of `x = <El>`.
pub(crate) fn lower_element(
    cx: &mut FileContext<'_>,
    element: JsxElement,
    assigned_to: Option<&SmolStr>,
) -> Result<Expr, TransformError> {
    cx.elements.push(ElementFrame {
        scope_depth: cx.scopes.depth(),
        slot_flag: SlotFlags::Stable,
    });
    let lowered = lower_element_inner(cx, element, assigned_to);
    cx.elements.pop();
    lowered
}

fn lower_element_inner(
    cx: &mut FileContext<'_>,
    element: JsxElement,
    assigned_to: Option<&SmolStr>,
) -> Result<Expr, TransformError> {
    let JsxElement {
        opening,
        children,
        span,
    } = element;
    let type_attr = TypeAttr::of(&opening.attrs);
    let attrs = lower_attrs(cx, opening.attrs)?;
    let children = lower_children(cx, children)?;

    let children = get_children(cx, children)?;
    let tag = get_tag(cx, &opening.name, span.or(opening.span))?;
    let is_component = is_component(cx, &opening.name);
    let built = build_props(
        cx,
        ElementInfo {
            tag: &tag,
            is_component,
            type_attr: &type_attr,
        },
        attrs,
    )?;

    let slot_flag = cx
        .elements
        .last()
        .map(|frame| frame.slot_flag)
        .unwrap_or_default();
    let vnode_children = build_vnode_children(
        cx,
        children,
        SlotTarget {
            is_component,
            slots: built.slots,
            slot_flag,
            assigned_to,
        },
    )?;

    let mut args = vec![tag, built.props, vnode_children.unwrap_or_else(Expr::null)];
    if cx.options.optimize {
        if !built.patch_flag.is_empty() {
            args.push(Expr::num(f64::from(built.patch_flag.bits())));
        }
        if !built.dynamic_prop_names.is_empty() {
            args.push(Expr::array(
                built
                    .dynamic_prop_names
                    .iter()
                    .map(|name| Expr::str(name.as_str()))
                    .collect(),
            ));
        }
    }
    let create_vnode = cx.helper(Helper::CreateVNode)?;
    let vnode = Expr::call(create_vnode, args);
    if built.directives.is_empty() {
        return Ok(vnode);
    }
    let with_directives = cx.helper(Helper::WithDirectives)?;
    Ok(Expr::call(
        with_directives,
        vec![vnode, Expr::array(built.directives)],
    ))
}

/// Lowers `<>...</>` as a `Fragment` element without attributes.
pub(crate) fn lower_fragment(
    cx: &mut FileContext<'_>,
    fragment: JsxFragment,
) -> Result<Expr, TransformError> {
    let tag = cx.helper(Helper::Fragment)?;
    cx.elements.push(ElementFrame {
        scope_depth: cx.scopes.depth(),
        slot_flag: SlotFlags::Stable,
    });
    let lowered = lower_fragment_inner(cx, tag, fragment.children);
    cx.elements.pop();
    lowered
}

fn lower_fragment_inner(
    cx: &mut FileContext<'_>,
    tag: Expr,
    children: Vec<JsxChild>,
) -> Result<Expr, TransformError> {
    let children = lower_children(cx, children)?;
    let children = get_children(cx, children)?;
    let vnode_children = build_vnode_children(
        cx,
        children,
        SlotTarget {
            is_component: false,
            slots: None,
            slot_flag: SlotFlags::Stable,
            assigned_to: None,
        },
    )?;
    let create_vnode = cx.helper(Helper::CreateVNode)?;
    Ok(Expr::call(
        create_vnode,
        vec![tag, Expr::null(), vnode_children.unwrap_or_else(Expr::null)],
    ))
}

fn lower_attrs(
    cx: &mut FileContext<'_>,
    attrs: Vec<JsxAttrOrSpread>,
) -> Result<Vec<AttrItem>, TransformError> {
    let mut items = Vec::with_capacity(attrs.len());
    for attr in attrs {
        match attr {
            JsxAttrOrSpread::Spread(spread) => {
                let mut expr = *spread.expr;
                lower_expr(cx, &mut expr)?;
                items.push(AttrItem::Spread(expr));
            }
            JsxAttrOrSpread::Attr(JsxAttr { name, value, span }) => {
                let (value, container) = match value {
                    None => (None, false),
                    Some(JsxAttrValue::Str(s)) => (Some(Expr::Str(s)), false),
                    Some(JsxAttrValue::ExprContainer(container)) => match container.expr {
                        Some(expr) => {
                            let mut expr = *expr;
                            lower_expr(cx, &mut expr)?;
                            (Some(expr), true)
                        }
                        None => (None, true),
                    },
                    Some(JsxAttrValue::Element(element)) => {
                        (Some(lower_element(cx, *element, None)?), false)
                    }
                    Some(JsxAttrValue::Fragment(fragment)) => {
                        (Some(lower_fragment(cx, *fragment)?), false)
                    }
                };
                items.push(AttrItem::Attr(Attr {
                    name: (&name).into(),
                    value,
                    container,
                    span,
                }));
            }
        }
    }
    Ok(items)
}

fn lower_children(
    cx: &mut FileContext<'_>,
    children: Vec<JsxChild>,
) -> Result<Vec<Child>, TransformError> {
    let mut lowered = Vec::with_capacity(children.len());
    for child in children {
        lowered.push(match child {
            JsxChild::Text(text) => Child::Text(text.value),
            JsxChild::ExprContainer(container) => match container.expr {
                Some(expr) => {
                    let mut expr = *expr;
                    lower_expr(cx, &mut expr)?;
                    Child::Expr(Some(expr))
                }
                None => Child::Expr(None),
            },
            JsxChild::Spread(spread) => {
                let mut expr = *spread.expr;
                lower_expr(cx, &mut expr)?;
                Child::Spread(expr)
            }
            JsxChild::Element(element) => Child::Lowered(lower_element(cx, *element, None)?),
            JsxChild::Fragment(fragment) => Child::Lowered(lower_fragment(cx, *fragment)?),
            JsxChild::Expr(expr) => {
                let mut expr = *expr;
                lower_expr(cx, &mut expr)?;
                Child::Host(expr)
            }
        });
    }
    Ok(lowered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::{CustomElementMatcher, TransformOptions};
    use pretty_assertions::assert_eq;

    fn tag_of(options: &TransformOptions, program: Program, name: JsxElementName) -> (String, bool) {
        let mut cx = FileContext::new(program, options, true);
        let tag = get_tag(&mut cx, &name, None).unwrap();
        (print_expr(&tag), is_component(&cx, &name))
    }

    #[test]
    fn test_builtin_tags_are_strings() {
        let options = TransformOptions::default();
        let empty = || Program::module(Vec::new());
        assert_eq!(
            tag_of(&options, empty(), JsxElementName::ident("div")),
            ("\"div\"".to_string(), false)
        );
        assert_eq!(
            tag_of(&options, empty(), JsxElementName::ident("circle")),
            ("\"circle\"".to_string(), false)
        );
    }

    #[test]
    fn test_component_tags() {
        let options = TransformOptions::default();
        assert_eq!(
            tag_of(&options, Program::module(Vec::new()), JsxElementName::ident("MyComp")),
            ("_resolveComponent(\"MyComp\")".to_string(), true)
        );

        let bound = Program::module(vec![Stmt::var(
            VarKind::Const,
            Ident::new("MyComp"),
            Some(Expr::null()),
        )]);
        assert_eq!(
            tag_of(&options, bound, JsxElementName::ident("MyComp")),
            ("MyComp".to_string(), true)
        );

        let (tag, component) = tag_of(
            &options,
            Program::module(Vec::new()),
            JsxElementName::ident("Fragment"),
        );
        assert_eq!(tag, "_Fragment");
        assert!(!component);
    }

    #[test]
    fn test_custom_element_tag() {
        let options = TransformOptions {
            is_custom_element: CustomElementMatcher::from_fn(|tag| tag.starts_with("ion-")),
            ..Default::default()
        };
        assert_eq!(
            tag_of(&options, Program::module(Vec::new()), JsxElementName::ident("ion-button")),
            ("\"ion-button\"".to_string(), false)
        );
    }

    #[test]
    fn test_member_tag() {
        let options = TransformOptions::default();
        let name = JsxElementName::Member(JsxMemberExpr {
            obj: JsxObject::Member(Box::new(JsxMemberExpr {
                obj: JsxObject::Ident(Ident::new("ui")),
                prop: Ident::new("forms"),
            })),
            prop: Ident::new("Input"),
        });
        assert_eq!(
            tag_of(&options, Program::module(Vec::new()), name),
            ("ui.forms.Input".to_string(), true)
        );
    }

    #[test]
    fn test_namespaced_tag_is_rejected() {
        let options = TransformOptions::default();
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let name = JsxElementName::Namespaced(JsxNamespacedName {
            ns: Ident::new("svg"),
            name: Ident::new("rect"),
        });
        let err = get_tag(&mut cx, &name, Some(Span::new(0u32, 4u32))).unwrap_err();
        assert_eq!(err.to_string(), "getTag: JSXNamespacedName is not supported");
        assert_eq!(err.span, Some(Span::new(0u32, 4u32)));
    }

    #[test]
    fn test_lower_element_with_children() {
        let options = TransformOptions::default();
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let element = JsxElement::new(
            JsxElementName::ident("div"),
            vec![JsxAttrOrSpread::str("id", "app")],
            vec![
                JsxChild::text("hi "),
                JsxChild::element(JsxElement::new(
                    JsxElementName::ident("span"),
                    Vec::new(),
                    Vec::new(),
                )),
            ],
        );
        let vnode = lower_element(&mut cx, element, None).unwrap();
        assert_eq!(
            print_expr(&vnode),
            "_createVNode(\"div\", { \"id\": \"app\" }, [_createTextVNode(\"hi \"), _createVNode(\"span\", null, null)])"
        );
        assert!(cx.elements.is_empty());
    }

    #[test]
    fn test_lower_fragment() {
        let options = TransformOptions::default();
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let fragment = JsxFragment {
            children: vec![JsxChild::expr(Expr::ident("a")), JsxChild::expr(Expr::ident("b"))],
            span: None,
        };
        let vnode = lower_fragment(&mut cx, fragment).unwrap();
        assert_eq!(
            print_expr(&vnode),
            "_createVNode(_Fragment, null, [a, b])"
        );
    }
}
