//! Attribute classification and props object construction.

use crate::context::FileContext;
use crate::directives::{directive_name, is_directive, parse_directive, DirectiveInput};
use crate::error::TransformError;
use crate::flags::PatchFlags;
use crate::helpers::Helper;
use indexmap::IndexSet;
use jsx_ast::*;
use rustc_hash::FxHashMap;
use smol_str::SmolStr;

/// An attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AttrName {
    Plain(SmolStr),
    Namespaced { ns: SmolStr, local: SmolStr },
}

impl AttrName {
    /// Returns the name as written, `ns:local` for namespaced names.
    pub fn full(&self) -> SmolStr {
        match self {
            AttrName::Plain(name) => name.clone(),
            AttrName::Namespaced { ns, local } => SmolStr::from(format!("{ns}:{local}")),
        }
    }
}

impl From<&JsxAttrName> for AttrName {
    fn from(name: &JsxAttrName) -> Self {
        match name {
            JsxAttrName::Ident(ident) => AttrName::Plain(ident.sym.clone()),
            JsxAttrName::Namespaced(n) => AttrName::Namespaced {
                ns: n.ns.sym.clone(),
                local: n.name.sym.clone(),
            },
        }
    }
}

/// An attribute whose value has already been lowered.
#[derive(Debug, Clone)]
pub(crate) struct Attr {
    pub name: AttrName,
    pub value: Option<Expr>,
    /// Whether the value was written as `{expr}`.
    pub container: bool,
    pub span: Option<Span>,
}

/// An attribute or a spread attribute.
#[derive(Debug, Clone)]
pub(crate) enum AttrItem {
    Attr(Attr),
    Spread(Expr),
}

/// The element's `type` attribute, which selects the `v-model` variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TypeAttr {
    /// No `type` attribute, or one without a value.
    Absent,
    /// `type="checkbox"`
    Literal(String),
    /// `type={expr}`
    Dynamic,
}

impl TypeAttr {
    /// Reads the first `type` attribute of an opening element.
    pub fn of(attrs: &[JsxAttrOrSpread]) -> Self {
        let found = attrs.iter().find_map(|attr| match attr {
            JsxAttrOrSpread::Attr(JsxAttr {
                name: JsxAttrName::Ident(name),
                value,
                ..
            }) if name.sym == "type" => Some(value),
            _ => None,
        });
        match found {
            None | Some(None) => TypeAttr::Absent,
            Some(Some(JsxAttrValue::Str(s))) => TypeAttr::Literal(s.value.clone()),
            Some(Some(_)) => TypeAttr::Dynamic,
        }
    }
}

/// The props side of an element.
#[derive(Debug)]
pub(crate) struct BuiltProps {
    /// The props expression, `null` when there are none.
    pub props: Expr,
    /// `[directive, value, arg?, modifiers?]` arrays.
    pub directives: Vec<Expr>,
    pub patch_flag: PatchFlags,
    pub dynamic_prop_names: IndexSet<SmolStr>,
    /// The `v-slots` value.
    pub slots: Option<Expr>,
}

/// The element an attribute list belongs to.
pub(crate) struct ElementInfo<'a> {
    pub tag: &'a Expr,
    pub is_component: bool,
    pub type_attr: &'a TypeAttr,
}

#[derive(Default)]
struct Analysis {
    has_ref: bool,
    has_class_binding: bool,
    has_style_binding: bool,
    has_hydration_event_binding: bool,
    has_dynamic_keys: bool,
}

/// Returns true for event listener names such as `onClick` or `on-click`.
pub(crate) fn is_on(name: &str) -> bool {
    name.strip_prefix("on")
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| !c.is_ascii_lowercase())
}

/// Returns true if a value never changes between renders: literals, the
/// identifier `undefined`, and arrays or objects made only of those.
///
/// A missing value (`<input disabled />`) is the constant `true`.
pub(crate) fn is_constant(value: Option<&Expr>) -> bool {
    let Some(value) = value else {
        return true;
    };
    match value {
        Expr::Ident(ident) => ident.sym == "undefined",
        Expr::Array(array) => array
            .elems
            .iter()
            .all(|el| matches!(el, Some(el) if !el.spread && is_constant(Some(&el.expr)))),
        Expr::Object(object) => object.props.iter().all(|prop| match prop {
            PropOrSpread::KeyValue(kv) => is_constant(Some(&kv.value)),
            PropOrSpread::Shorthand(ident) => ident.sym == "undefined",
            PropOrSpread::Spread(_) | PropOrSpread::Method(_) => false,
        }),
        other => other.is_literal(),
    }
}

fn rewrite_xlink(name: &str) -> Option<String> {
    let rest = name.strip_prefix("xlink")?;
    let mut chars = rest.chars();
    let first = chars.next().filter(char::is_ascii_uppercase)?;
    Some(format!("xlink:{}{}", first.to_ascii_lowercase(), chars.as_str()))
}

fn str_prop(key: impl Into<String>, value: Expr) -> PropOrSpread {
    PropOrSpread::key_value(PropName::str(key), value)
}

/// Classifies the attributes of one element and builds its props expression,
/// directive list and patch flags.
pub(crate) fn build_props(
    cx: &mut FileContext<'_>,
    element: ElementInfo<'_>,
    attrs: Vec<AttrItem>,
) -> Result<BuiltProps, TransformError> {
    let merge_props = cx.options.merge_props;
    let is_component = element.is_component;

    let mut properties: Vec<PropOrSpread> = Vec::new();
    let mut merge_args: Vec<Expr> = Vec::new();
    let mut directives = Vec::new();
    let mut dynamic_prop_names: IndexSet<SmolStr> = IndexSet::new();
    let mut slots = None;
    let mut analysis = Analysis::default();

    for item in attrs {
        let attr = match item {
            AttrItem::Attr(attr) => attr,
            AttrItem::Spread(arg) => {
                if merge_props && !properties.is_empty() {
                    let flushed = std::mem::take(&mut properties);
                    merge_args.push(Expr::object(dedupe(flushed, merge_props)));
                }
                analysis.has_dynamic_keys = true;
                spread_attribute(cx, arg, merge_props, &mut merge_args, &mut properties);
                continue;
            }
        };

        let name = attr.name.full();
        if !is_constant(attr.value.as_ref()) || name == "ref" {
            if !is_component
                && is_on(&name)
                && !name.eq_ignore_ascii_case("onclick")
                && name != "onUpdate:modelValue"
            {
                analysis.has_hydration_event_binding = true;
            }
            if name == "ref" {
                analysis.has_ref = true;
            } else if name == "class" && !is_component {
                analysis.has_class_binding = true;
            } else if name == "style" && !is_component {
                analysis.has_style_binding = true;
            } else if name != "key" && !is_directive(&name) && name != "on" {
                dynamic_prop_names.insert(name.clone());
            }
        }

        if cx.options.transform_on && (name == "on" || name == "nativeOn") {
            let transform_on = cx.transform_on()?;
            let value = attr.value.unwrap_or(Expr::bool(true));
            merge_args.push(Expr::call(transform_on, vec![value]));
            continue;
        }

        if !is_directive(&name) {
            let key = rewrite_xlink(&name).unwrap_or_else(|| name.to_string());
            properties.push(str_prop(key, attr.value.unwrap_or(Expr::bool(true))));
            continue;
        }

        if directive_name(&attr.name) == "slots" {
            slots = attr.value;
            continue;
        }

        let parsed = parse_directive(
            cx,
            DirectiveInput {
                name: &attr.name,
                value: attr.value,
                container: attr.container,
                span: attr.span,
                tag: element.tag,
                is_component,
                type_attr: element.type_attr,
            },
        )?;

        let first_value = || {
            parsed
                .values
                .first()
                .cloned()
                .flatten()
                .unwrap_or(Expr::bool(true))
        };
        if let Some(directive) = &parsed.directive {
            directives.push(Expr::array(directive.clone()));
        } else if parsed.name == "html" {
            properties.push(str_prop("innerHTML", first_value()));
            dynamic_prop_names.insert(SmolStr::new_static("innerHTML"));
        } else if parsed.name == "text" {
            properties.push(str_prop("textContent", first_value()));
            dynamic_prop_names.insert(SmolStr::new_static("textContent"));
        }

        if parsed.name != "model" && parsed.name != "models" {
            continue;
        }

        for (index, value) in parsed.values.iter().enumerate() {
            let value = value.clone().unwrap_or(Expr::bool(true));
            let prop_name = parsed.args.get(index);
            let (dynamic_key, static_name) = match prop_name {
                None | Some(Expr::Null(_)) => (None, None),
                Some(Expr::Str(s)) => (None, Some(s.value.as_str()).filter(|v| !v.is_empty())),
                Some(other) => (Some(other), None),
            };

            if parsed.directive.is_none() {
                let key = match dynamic_key {
                    Some(expr) => PropName::computed(expr.clone()),
                    None => PropName::str(static_name.unwrap_or("modelValue")),
                };
                properties.push(PropOrSpread::key_value(key, value.clone()));
                if dynamic_key.is_none() {
                    dynamic_prop_names.insert(SmolStr::from(static_name.unwrap_or("modelValue")));
                }

                if let Some(mods) = parsed.modifiers.get(index).filter(|m| !m.is_empty()) {
                    let key = match dynamic_key {
                        Some(expr) => PropName::computed(Expr::bin(
                            BinaryOp::Add,
                            expr.clone(),
                            Expr::str("Modifiers"),
                        )),
                        None => PropName::str(format!("{}Modifiers", static_name.unwrap_or("model"))),
                    };
                    let flags = mods
                        .iter()
                        .map(|m| str_prop(m.as_str(), Expr::bool(true)))
                        .collect();
                    properties.push(PropOrSpread::key_value(key, Expr::object(flags)));
                }
            }

            let handler = Expr::arrow(
                vec![Ident::new("$event")],
                Expr::assign(value, Expr::ident("$event")),
            );
            match dynamic_key {
                Some(expr) => {
                    let key = Expr::bin(BinaryOp::Add, Expr::str("onUpdate:"), expr.clone());
                    properties.push(PropOrSpread::key_value(PropName::computed(key), handler));
                    analysis.has_dynamic_keys = true;
                }
                None => {
                    let key = format!("onUpdate:{}", static_name.unwrap_or("modelValue"));
                    dynamic_prop_names.insert(SmolStr::from(key.as_str()));
                    properties.push(str_prop(key, handler));
                }
            }
        }
    }

    let mut patch_flag = PatchFlags::empty();
    if analysis.has_dynamic_keys {
        patch_flag |= PatchFlags::FULL_PROPS;
    } else {
        if analysis.has_class_binding {
            patch_flag |= PatchFlags::CLASS;
        }
        if analysis.has_style_binding {
            patch_flag |= PatchFlags::STYLE;
        }
        if !dynamic_prop_names.is_empty() {
            patch_flag |= PatchFlags::PROPS;
        }
        if analysis.has_hydration_event_binding {
            patch_flag |= PatchFlags::HYDRATE_EVENTS;
        }
    }
    if (patch_flag.is_empty() || patch_flag == PatchFlags::HYDRATE_EVENTS)
        && (analysis.has_ref || !directives.is_empty())
    {
        patch_flag |= PatchFlags::NEED_PATCH;
    }

    let props = if !merge_args.is_empty() {
        if !properties.is_empty() {
            merge_args.push(Expr::object(dedupe(properties, merge_props)));
        }
        if merge_args.len() > 1 {
            let merge = cx.helper(Helper::MergeProps)?;
            Expr::call(merge, merge_args)
        } else {
            merge_args.swap_remove(0)
        }
    } else if properties.is_empty() {
        Expr::null()
    } else if let [PropOrSpread::Spread(spread)] = properties.as_mut_slice() {
        std::mem::replace(spread.expr.as_mut(), Expr::null())
    } else {
        Expr::object(dedupe(properties, merge_props))
    };

    Ok(BuiltProps {
        props,
        directives,
        patch_flag,
        dynamic_prop_names,
        slots,
    })
}

/// Handles `{...arg}`. Object literals are inlined; other values are passed
/// to `mergeProps` or spread into the props object.
fn spread_attribute(
    cx: &mut FileContext<'_>,
    arg: Expr,
    merge_props: bool,
    merge_args: &mut Vec<Expr>,
    properties: &mut Vec<PropOrSpread>,
) {
    match arg {
        Expr::Object(object) if merge_props => merge_args.push(Expr::Object(object)),
        Expr::Object(object) => properties.extend(object.props),
        other => {
            if let Expr::Ident(ident) = &other {
                cx.mark_dynamic(&ident.sym, false);
            }
            if merge_props {
                merge_args.push(other);
            } else {
                properties.push(PropOrSpread::spread(other));
            }
        }
    }
}

/// Collapses repeated string keys: `class`, `style` and `on*` values merge
/// into an array, other repeats keep the first value.
pub(crate) fn dedupe(properties: Vec<PropOrSpread>, merge_props: bool) -> Vec<PropOrSpread> {
    if !merge_props {
        return properties;
    }
    let mut known: FxHashMap<String, usize> = FxHashMap::default();
    let mut deduped: Vec<PropOrSpread> = Vec::with_capacity(properties.len());
    for prop in properties {
        let (key, value) = match prop {
            PropOrSpread::KeyValue(KeyValueProp {
                key: PropName::Str(key),
                value,
            }) => (key, value),
            other => {
                deduped.push(other);
                continue;
            }
        };
        match known.get(&key.value) {
            Some(&at) => {
                let name = key.value.as_str();
                if name == "class" || name == "style" || name.starts_with("on") {
                    if let PropOrSpread::KeyValue(existing) = &mut deduped[at] {
                        merge_as_array(&mut existing.value, *value);
                    }
                }
            }
            None => {
                known.insert(key.value.clone(), deduped.len());
                deduped.push(PropOrSpread::KeyValue(KeyValueProp {
                    key: PropName::Str(key),
                    value,
                }));
            }
        }
    }
    deduped
}

fn merge_as_array(existing: &mut Expr, incoming: Expr) {
    if let Expr::Array(array) = existing {
        array.elems.push(Some(ExprOrSpread::expr(incoming)));
        return;
    }
    let previous = std::mem::replace(existing, Expr::null());
    *existing = Expr::array(vec![previous, incoming]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TransformOptions;
    use pretty_assertions::assert_eq;

    fn attr(name: &str, value: Option<Expr>) -> AttrItem {
        AttrItem::Attr(Attr {
            name: AttrName::Plain(name.into()),
            value,
            container: true,
            span: None,
        })
    }

    fn build(options: &TransformOptions, tag: Expr, is_component: bool, attrs: Vec<AttrItem>) -> (BuiltProps, String) {
        let mut cx = FileContext::new(Program::module(Vec::new()), options, true);
        let built = build_props(
            &mut cx,
            ElementInfo {
                tag: &tag,
                is_component,
                type_attr: &TypeAttr::Absent,
            },
            attrs,
        )
        .unwrap();
        (built, print_program(&cx.program))
    }

    #[test]
    fn test_is_on() {
        assert!(is_on("onClick"));
        assert!(is_on("on-click"));
        assert!(is_on("onUpdate:modelValue"));
        assert!(!is_on("onclick"));
        assert!(!is_on("on"));
        assert!(!is_on("one"));
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(None));
        assert!(is_constant(Some(&Expr::str("a"))));
        assert!(is_constant(Some(&Expr::ident("undefined"))));
        assert!(is_constant(Some(&Expr::array(vec![Expr::num(1.0), Expr::null()]))));
        assert!(!is_constant(Some(&Expr::ident("x"))));
        assert!(!is_constant(Some(&Expr::array(vec![Expr::ident("x")]))));
        let object = Expr::object(vec![
            PropOrSpread::key_value(PropName::ident("a"), Expr::bool(true)),
            PropOrSpread::spread(Expr::ident("rest")),
        ]);
        assert!(!is_constant(Some(&object)));
        let hole = Expr::Array(ArrayLit { elems: vec![None] });
        assert!(!is_constant(Some(&hole)));
    }

    #[test]
    fn test_xlink_rewrite() {
        assert_eq!(rewrite_xlink("xlinkHref").as_deref(), Some("xlink:href"));
        assert_eq!(rewrite_xlink("xlinkhref"), None);
        assert_eq!(rewrite_xlink("href"), None);
    }

    #[test]
    fn test_constant_attrs_have_no_flags() {
        let options = TransformOptions::default();
        let (built, _) = build(
            &options,
            Expr::str("div"),
            false,
            vec![attr("id", Some(Expr::str("a"))), attr("hidden", None)],
        );
        assert_eq!(print_expr(&built.props), "{ \"id\": \"a\", \"hidden\": true }");
        assert!(built.patch_flag.is_empty());
        assert!(built.dynamic_prop_names.is_empty());
    }

    #[test]
    fn test_dynamic_bindings() {
        let options = TransformOptions::default();
        let (built, _) = build(
            &options,
            Expr::str("div"),
            false,
            vec![
                attr("class", Some(Expr::ident("cls"))),
                attr("style", Some(Expr::ident("st"))),
                attr("title", Some(Expr::ident("t"))),
                attr("onInput", Some(Expr::ident("h"))),
                attr("key", Some(Expr::ident("k"))),
            ],
        );
        assert_eq!(
            built.patch_flag,
            PatchFlags::CLASS | PatchFlags::STYLE | PatchFlags::PROPS | PatchFlags::HYDRATE_EVENTS
        );
        let names: Vec<&str> = built.dynamic_prop_names.iter().map(SmolStr::as_str).collect();
        assert_eq!(names, vec!["title", "onInput"]);
    }

    #[test]
    fn test_component_class_is_a_prop() {
        let options = TransformOptions::default();
        let (built, _) = build(
            &options,
            Expr::ident("Comp"),
            true,
            vec![attr("class", Some(Expr::ident("cls"))), attr("onClick", Some(Expr::ident("h")))],
        );
        assert_eq!(built.patch_flag, PatchFlags::PROPS);
        let names: Vec<&str> = built.dynamic_prop_names.iter().map(SmolStr::as_str).collect();
        assert_eq!(names, vec!["class", "onClick"]);
    }

    #[test]
    fn test_ref_needs_patch() {
        let options = TransformOptions::default();
        let (built, _) = build(
            &options,
            Expr::str("div"),
            false,
            vec![attr("ref", Some(Expr::str("root")))],
        );
        assert_eq!(built.patch_flag, PatchFlags::NEED_PATCH);
    }

    #[test]
    fn test_spread_merges_and_dedupes() {
        let options = TransformOptions::default();
        let (built, imports) = build(
            &options,
            Expr::str("div"),
            false,
            vec![
                attr("class", Some(Expr::str("a"))),
                AttrItem::Spread(Expr::ident("rest")),
                attr("class", Some(Expr::str("b"))),
                attr("class", Some(Expr::str("c"))),
                attr("id", Some(Expr::str("x"))),
                attr("id", Some(Expr::str("y"))),
            ],
        );
        assert_eq!(
            print_expr(&built.props),
            "_mergeProps({ \"class\": \"a\" }, rest, { \"class\": [\"b\", \"c\"], \"id\": \"x\" })"
        );
        assert_eq!(built.patch_flag, PatchFlags::FULL_PROPS);
        assert_eq!(imports, "import { mergeProps as _mergeProps } from \"vue\";\n");
    }

    #[test]
    fn test_single_spread_is_passed_through() {
        let options = TransformOptions::default();
        let (built, imports) = build(
            &options,
            Expr::str("div"),
            false,
            vec![AttrItem::Spread(Expr::ident("attrs"))],
        );
        assert_eq!(print_expr(&built.props), "attrs");
        assert_eq!(imports, "");

        let options = TransformOptions {
            merge_props: false,
            ..Default::default()
        };
        let (built, _) = build(
            &options,
            Expr::str("div"),
            false,
            vec![AttrItem::Spread(Expr::ident("attrs"))],
        );
        assert_eq!(print_expr(&built.props), "attrs");
    }

    #[test]
    fn test_spread_without_merge_props() {
        let options = TransformOptions {
            merge_props: false,
            ..Default::default()
        };
        let inline = Expr::object(vec![PropOrSpread::key_value(
            PropName::ident("a"),
            Expr::num(1.0),
        )]);
        let (built, _) = build(
            &options,
            Expr::str("div"),
            false,
            vec![
                attr("id", Some(Expr::str("x"))),
                AttrItem::Spread(Expr::ident("rest")),
                AttrItem::Spread(inline),
                attr("id", Some(Expr::str("y"))),
            ],
        );
        assert_eq!(
            print_expr(&built.props),
            "{ \"id\": \"x\", ...rest, a: 1, \"id\": \"y\" }"
        );
    }

    #[test]
    fn test_component_v_model() {
        let options = TransformOptions::default();
        let model = AttrItem::Attr(Attr {
            name: AttrName::Plain("v-model_trim".into()),
            value: Some(Expr::ident("text")),
            container: true,
            span: None,
        });
        let (built, _) = build(&options, Expr::ident("Comp"), true, vec![model]);
        assert_eq!(
            print_expr(&built.props),
            "{ \"modelValue\": text, \"modelModifiers\": { \"trim\": true }, \"onUpdate:modelValue\": $event => text = $event }"
        );
        let names: Vec<&str> = built.dynamic_prop_names.iter().map(SmolStr::as_str).collect();
        assert_eq!(names, vec!["modelValue", "onUpdate:modelValue"]);
        assert!(built.directives.is_empty());
    }

    #[test]
    fn test_dynamic_model_argument() {
        let options = TransformOptions::default();
        let model = attr(
            "v-model",
            Some(Expr::array(vec![Expr::ident("val"), Expr::ident("propName")])),
        );
        let (built, _) = build(&options, Expr::ident("Comp"), true, vec![model]);
        assert_eq!(
            print_expr(&built.props),
            "{ [propName]: val, [\"onUpdate:\" + propName]: $event => val = $event }"
        );
        assert_eq!(built.patch_flag, PatchFlags::FULL_PROPS);
    }

    #[test]
    fn test_intrinsic_v_model_keeps_directive_and_handler() {
        let options = TransformOptions::default();
        let (built, imports) = build(
            &options,
            Expr::str("input"),
            false,
            vec![attr("v-model", Some(Expr::ident("text")))],
        );
        assert_eq!(
            print_expr(&built.props),
            "{ \"onUpdate:modelValue\": $event => text = $event }"
        );
        assert_eq!(
            print_expr(&Expr::array(built.directives)),
            "[[_vModelText, text]]"
        );
        assert_eq!(built.patch_flag, PatchFlags::PROPS);
        assert_eq!(imports, "import { vModelText as _vModelText } from \"vue\";\n");
    }

    #[test]
    fn test_html_and_text_directives() {
        let options = TransformOptions::default();
        let (built, _) = build(
            &options,
            Expr::str("div"),
            false,
            vec![attr("v-html", Some(Expr::ident("raw")))],
        );
        assert_eq!(print_expr(&built.props), "{ \"innerHTML\": raw }");
        assert_eq!(built.patch_flag, PatchFlags::PROPS);

        let (built, _) = build(
            &options,
            Expr::str("span"),
            false,
            vec![attr("vText", Some(Expr::ident("msg")))],
        );
        assert_eq!(print_expr(&built.props), "{ \"textContent\": msg }");
    }

    #[test]
    fn test_slots_attribute() {
        let options = TransformOptions::default();
        let (built, imports) = build(
            &options,
            Expr::ident("Comp"),
            true,
            vec![attr("v-slots", Some(Expr::ident("slots")))],
        );
        assert_eq!(built.slots, Some(Expr::ident("slots")));
        assert_eq!(built.props, Expr::null());
        assert_eq!(imports, "");
    }

    #[test]
    fn test_transform_on() {
        let options = TransformOptions {
            transform_on: true,
            ..Default::default()
        };
        let (built, imports) = build(
            &options,
            Expr::str("div"),
            false,
            vec![attr("on", Some(Expr::ident("listeners"))), attr("id", Some(Expr::str("a")))],
        );
        assert_eq!(
            print_expr(&built.props),
            "_mergeProps(_transformOn(listeners), { \"id\": \"a\" })"
        );
        assert!(imports.contains("import _transformOn from \"@vue/babel-helper-vue-transform-on\";"));
    }
}
