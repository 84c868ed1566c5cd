//! Directive attribute parsing.
//!
//! A directive attribute is written either as `v-name`, `vName`,
//! `v-name_mod1_mod2` or namespaced as `v-name:arg_mod`. Array values carry an
//! argument and modifiers inline: `v-model={[value, "arg", ["trim"]]}`, and
//! `v-models` takes a list of such tuples.

use crate::context::FileContext;
use crate::error::{TransformError, TransformErrorKind};
use crate::helpers::Helper;
use crate::props::{AttrName, TypeAttr};
use indexmap::IndexSet;
use jsx_ast::*;
use smol_str::SmolStr;

/// Returns true for `v-` prefixed names and `v` followed by an uppercase letter.
pub(crate) fn is_directive(name: &str) -> bool {
    if name.starts_with("v-") {
        return true;
    }
    let mut chars = name.chars();
    chars.next() == Some('v') && chars.next().is_some_and(|c| c.is_ascii_uppercase())
}

/// A parsed directive attribute.
#[derive(Debug)]
pub(crate) struct ParsedDirective {
    pub name: SmolStr,
    /// One modifier set per value.
    pub modifiers: Vec<IndexSet<SmolStr>>,
    pub values: Vec<Option<Expr>>,
    pub args: Vec<Expr>,
    /// `[directive, value, arg?, modifiers?]` for `withDirectives`, when the
    /// directive is resolved at runtime.
    pub directive: Option<Vec<Expr>>,
}

/// The attribute being parsed and the element it sits on.
pub(crate) struct DirectiveInput<'a> {
    pub name: &'a AttrName,
    pub value: Option<Expr>,
    /// Whether the value was written as `{expr}`.
    pub container: bool,
    pub span: Option<Span>,
    pub tag: &'a Expr,
    pub is_component: bool,
    pub type_attr: &'a TypeAttr,
}

struct NameParts<'a> {
    raw: &'a str,
    argument: Option<&'a str>,
    modifiers: Vec<SmolStr>,
}

fn split_name(name: &AttrName) -> NameParts<'_> {
    match name {
        AttrName::Namespaced { ns, local } => {
            let mut parts = local.split('_');
            NameParts {
                raw: ns.as_str(),
                argument: parts.next(),
                modifiers: parts.map(SmolStr::from).collect(),
            }
        }
        AttrName::Plain(name) => {
            let mut parts = name.split('_');
            NameParts {
                raw: parts.next().unwrap_or_default(),
                argument: None,
                modifiers: parts.map(SmolStr::from).collect(),
            }
        }
    }
}

fn normalize(raw: &str) -> SmolStr {
    let name = raw.strip_prefix('v').unwrap_or(raw);
    let name = name.strip_prefix('-').unwrap_or(name);
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if !first.is_whitespace() => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            SmolStr::from(out)
        }
        _ => SmolStr::from(name),
    }
}

/// Returns the normalised directive name of an attribute: `v-model:foo`,
/// `vModel_trim` and `v-model` all give `model`.
pub(crate) fn directive_name(name: &AttrName) -> SmolStr {
    normalize(split_name(name).raw)
}

fn parse_modifiers(value: Option<&Expr>) -> Vec<SmolStr> {
    let Some(Expr::Array(array)) = value else {
        return Vec::new();
    };
    array
        .elems
        .iter()
        .flatten()
        .filter(|el| !el.spread)
        .filter_map(|el| el.expr.as_str())
        .filter(|s| !s.value.is_empty())
        .map(|s| SmolStr::from(s.value.as_str()))
        .collect()
}

/// Parses a directive attribute into its name, values, arguments and
/// modifiers, resolving the runtime directive when one is needed.
pub(crate) fn parse_directive(
    cx: &mut FileContext<'_>,
    input: DirectiveInput<'_>,
) -> Result<ParsedDirective, TransformError> {
    let parts = split_name(input.name);
    let name = normalize(parts.raw);
    let directive_modifiers = parts.modifiers;

    let mut args = Vec::new();
    if let Some(arg) = parts.argument.filter(|a| !a.is_empty()) {
        args.push(Expr::str(arg));
    }

    let is_model = name == "model";
    let is_models = name == "models";
    if is_model && !input.container {
        return Err(TransformError::new(
            TransformErrorKind::ModelNotExpression,
            input.span,
        ));
    }
    if is_models && !input.is_component {
        return Err(TransformError::new(TransformErrorKind::ModelsOnElement, input.span));
    }

    let should_resolve = !matches!(name.as_str(), "html" | "text" | "model" | "models")
        || (is_model && !input.is_component);

    let value = input.value;
    let mut vals: Vec<Option<Expr>> = Vec::new();
    let mut modifiers_set: Vec<IndexSet<SmolStr>> = Vec::new();

    if let Some(Expr::Array(array)) = &value {
        let tuples: Vec<&ArrayLit> = if is_models {
            array
                .elems
                .iter()
                .map(|el| match el {
                    Some(ExprOrSpread {
                        spread: false,
                        expr,
                    }) => match expr.as_ref() {
                        Expr::Array(tuple) => Ok(tuple),
                        _ => Err(TransformError::new(
                            TransformErrorKind::ModelsNotNested,
                            input.span,
                        )),
                    },
                    _ => Err(TransformError::new(
                        TransformErrorKind::ModelsNotNested,
                        input.span,
                    )),
                })
                .collect::<Result<_, _>>()?
        } else {
            vec![array]
        };

        for tuple in tuples {
            let slot = |i: usize| tuple.elems.get(i).and_then(Option::as_ref);
            let mut modifiers = directive_modifiers.clone();
            match slot(1) {
                Some(second) if !second.spread && !matches!(*second.expr, Expr::Array(_)) => {
                    args.push((*second.expr).clone());
                    modifiers = parse_modifiers(slot(2).map(|e| e.expr.as_ref()));
                }
                Some(second) if !second.spread => {
                    if !should_resolve {
                        args.push(Expr::null());
                    }
                    modifiers = parse_modifiers(Some(second.expr.as_ref()));
                }
                _ => {
                    if !should_resolve {
                        args.push(Expr::null());
                    }
                }
            }
            modifiers_set.push(modifiers.into_iter().collect());
            vals.push(slot(0).map(|e| (*e.expr).clone()));
        }
    } else {
        if is_model && !should_resolve {
            args.push(Expr::null());
        }
        modifiers_set.push(directive_modifiers.into_iter().collect());
    }

    let directive = if should_resolve {
        let callee = resolve_directive(cx, &name, input.tag, input.type_attr)?;
        let target = vals.first().cloned().flatten().or_else(|| value.clone());
        let mods = modifiers_set.first().filter(|m| !m.is_empty());
        let arg = match mods {
            Some(_) => Some(args.first().cloned().unwrap_or_else(Expr::void0)),
            None => args.first().cloned(),
        };
        let mods = mods.map(|m| {
            Expr::object(
                m.iter()
                    .map(|modifier| {
                        PropOrSpread::key_value(PropName::ident(modifier.clone()), Expr::bool(true))
                    })
                    .collect(),
            )
        });
        Some(compact(vec![Some(callee), target, arg, mods]))
    } else {
        None
    };

    let values = if vals.is_empty() { vec![value] } else { vals };
    Ok(ParsedDirective {
        name,
        modifiers: modifiers_set,
        values,
        args,
        directive,
    })
}

/// Drops trailing absent entries and fills inner gaps with `void 0`, keeping
/// later entries in their positions.
fn compact(items: Vec<Option<Expr>>) -> Vec<Expr> {
    let len = items.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
    items
        .into_iter()
        .take(len)
        .map(|item| item.unwrap_or_else(Expr::void0))
        .collect()
}

fn resolve_directive(
    cx: &mut FileContext<'_>,
    name: &str,
    tag: &Expr,
    type_attr: &TypeAttr,
) -> Result<Expr, TransformError> {
    match name {
        "show" => cx.helper(Helper::VShow),
        "model" => {
            let helper = match tag.as_str().map(|s| s.value.as_str()) {
                Some("select") => Helper::VModelSelect,
                Some("textarea") => Helper::VModelText,
                _ => match type_attr {
                    TypeAttr::Absent => Helper::VModelText,
                    TypeAttr::Literal(ty) => match ty.as_str() {
                        "checkbox" => Helper::VModelCheckbox,
                        "radio" => Helper::VModelRadio,
                        _ => Helper::VModelText,
                    },
                    TypeAttr::Dynamic => Helper::VModelDynamic,
                },
            };
            cx.helper(helper)
        }
        _ => {
            let resolve = cx.helper(Helper::ResolveDirective)?;
            Ok(Expr::call(resolve, vec![Expr::str(name)]))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::TransformOptions;
    use pretty_assertions::assert_eq;

    fn plain(name: &str) -> AttrName {
        AttrName::Plain(name.into())
    }

    fn parse(
        name: AttrName,
        value: Expr,
        tag: &Expr,
        is_component: bool,
    ) -> Result<(ParsedDirective, String), TransformError> {
        let options = TransformOptions::default();
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let parsed = parse_directive(
            &mut cx,
            DirectiveInput {
                name: &name,
                value: Some(value),
                container: true,
                span: None,
                tag,
                is_component,
                type_attr: &TypeAttr::Absent,
            },
        )?;
        Ok((parsed, print_program(&cx.program)))
    }

    fn printed(directive: &Option<Vec<Expr>>) -> Option<String> {
        directive
            .as_ref()
            .map(|items| print_expr(&Expr::array(items.clone())))
    }

    #[test]
    fn test_is_directive() {
        assert!(is_directive("v-show"));
        assert!(is_directive("vModel"));
        assert!(!is_directive("value"));
        assert!(!is_directive("v"));
        assert!(!is_directive("vmodel"));
    }

    #[test]
    fn test_directive_name_forms_agree() {
        let forms = [
            plain("v-model"),
            plain("vModel"),
            plain("vModel_trim"),
            plain("v-model_trim_lazy"),
            AttrName::Namespaced {
                ns: "v-model".into(),
                local: "value_trim".into(),
            },
            AttrName::Namespaced {
                ns: "vModel".into(),
                local: "value".into(),
            },
        ];
        for form in &forms {
            assert_eq!(directive_name(form), "model", "{form:?}");
        }
        assert_eq!(directive_name(&plain("vCustom")), "custom");
    }

    #[test]
    fn test_underscore_modifiers() {
        let tag = Expr::str("div");
        let (parsed, _) = parse(plain("vFocus_once_once"), Expr::ident("x"), &tag, false).unwrap();
        assert_eq!(parsed.name, "focus");
        assert_eq!(
            printed(&parsed.directive).as_deref(),
            Some("[_resolveDirective(\"focus\"), x, void 0, { once: true }]")
        );
    }

    #[test]
    fn test_namespaced_argument() {
        let tag = Expr::str("div");
        let name = AttrName::Namespaced {
            ns: "v-custom".into(),
            local: "arg_mod".into(),
        };
        let (parsed, _) = parse(name, Expr::ident("x"), &tag, false).unwrap();
        assert_eq!(
            printed(&parsed.directive).as_deref(),
            Some("[_resolveDirective(\"custom\"), x, \"arg\", { mod: true }]")
        );
    }

    #[test]
    fn test_array_value_carries_arg_and_modifiers() {
        let tag = Expr::str("div");
        let value = Expr::array(vec![
            Expr::ident("x"),
            Expr::str("arg"),
            Expr::array(vec![Expr::str("a"), Expr::num(1.0), Expr::str("b")]),
        ]);
        let (parsed, _) = parse(plain("v-custom"), value, &tag, false).unwrap();
        assert_eq!(
            printed(&parsed.directive).as_deref(),
            Some("[_resolveDirective(\"custom\"), x, \"arg\", { a: true, b: true }]")
        );
    }

    #[test]
    fn test_component_model_has_no_directive() {
        let tag = Expr::ident("Comp");
        let (parsed, imports) = parse(plain("v-model"), Expr::ident("x"), &tag, true).unwrap();
        assert!(parsed.directive.is_none());
        assert_eq!(parsed.args, vec![Expr::null()]);
        assert_eq!(parsed.values, vec![Some(Expr::ident("x"))]);
        assert_eq!(imports, "");
    }

    #[test]
    fn test_models_tuples() {
        let tag = Expr::ident("Comp");
        let value = Expr::array(vec![
            Expr::array(vec![
                Expr::ident("a"),
                Expr::str("foo"),
                Expr::array(vec![Expr::str("trim")]),
            ]),
            Expr::array(vec![Expr::ident("b"), Expr::array(vec![Expr::str("lazy")])]),
            Expr::array(vec![Expr::ident("c")]),
        ]);
        let (parsed, _) = parse(plain("v-models"), value, &tag, true).unwrap();
        assert_eq!(parsed.args, vec![Expr::str("foo"), Expr::null(), Expr::null()]);
        let mods: Vec<Vec<&str>> = parsed
            .modifiers
            .iter()
            .map(|m| m.iter().map(SmolStr::as_str).collect())
            .collect();
        assert_eq!(mods, vec![vec!["trim"], vec!["lazy"], vec![]]);
    }

    #[test]
    fn test_model_errors() {
        let tag = Expr::str("input");
        let options = TransformOptions::default();
        let mut cx = FileContext::new(Program::module(Vec::new()), &options, true);
        let err = parse_directive(
            &mut cx,
            DirectiveInput {
                name: &plain("v-model"),
                value: Some(Expr::str("x")),
                container: false,
                span: None,
                tag: &tag,
                is_component: false,
                type_attr: &TypeAttr::Absent,
            },
        )
        .unwrap_err();
        assert_eq!(err.kind, TransformErrorKind::ModelNotExpression);

        let err = parse(plain("v-models"), Expr::array(Vec::new()), &tag, false).unwrap_err();
        assert_eq!(err.kind, TransformErrorKind::ModelsOnElement);

        let comp = Expr::ident("Comp");
        let err = parse(plain("v-models"), Expr::array(vec![Expr::ident("a")]), &comp, true)
            .unwrap_err();
        assert_eq!(err.kind, TransformErrorKind::ModelsNotNested);
    }

    #[test]
    fn test_compact_fills_gaps() {
        let items = vec![Some(Expr::ident("d")), None, Some(Expr::str("arg")), None];
        assert_eq!(
            print_expr(&Expr::array(compact(items))),
            "[d, void 0, \"arg\"]"
        );
    }
}
