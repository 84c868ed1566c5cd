//! Lowering options.

use globset::{Glob, GlobSet, GlobSetBuilder};
use std::fmt;
use std::sync::Arc;

/// Options controlling how JSX is lowered.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct TransformOptions {
    /// Tags that stay plain elements even though they are not HTML or SVG.
    pub is_custom_element: CustomElementMatcher,
    /// Merge spread attributes with `mergeProps` instead of object spread.
    pub merge_props: bool,
    /// Resolve single identifier or call children at runtime with `_isSlot`.
    pub enable_object_slots: bool,
    /// Emit patch flags, dynamic prop names and slot flags.
    pub optimize: bool,
    /// Route `on` / `nativeOn` attributes through `_transformOn`.
    pub transform_on: bool,
    /// Replaces `createVNode` as the vnode factory.
    pub pragma: Option<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            is_custom_element: CustomElementMatcher::None,
            merge_props: true,
            enable_object_slots: true,
            optimize: false,
            transform_on: false,
            pragma: None,
        }
    }
}

impl TransformOptions {
    /// Returns the configured pragma, ignoring an empty string.
    pub fn pragma(&self) -> Option<&str> {
        self.pragma.as_deref().filter(|p| !p.is_empty())
    }
}

/// Decides whether a tag name is a custom element.
#[derive(Clone, Default)]
pub enum CustomElementMatcher {
    /// No custom elements.
    #[default]
    None,
    /// Tags matching any of the glob patterns.
    Globs {
        /// The source patterns.
        patterns: Vec<String>,
        /// The compiled set.
        set: GlobSet,
    },
    /// A caller-supplied predicate.
    Callback(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl CustomElementMatcher {
    /// Compiles a matcher from glob patterns such as `my-*`.
    pub fn from_globs<S: AsRef<str>>(patterns: &[S]) -> Result<Self, globset::Error> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(Glob::new(pattern.as_ref())?);
        }
        Ok(Self::Globs {
            patterns: patterns.iter().map(|p| p.as_ref().to_string()).collect(),
            set: builder.build()?,
        })
    }

    /// Wraps a predicate.
    pub fn from_fn(f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        Self::Callback(Arc::new(f))
    }

    /// Returns true if `tag` is a custom element.
    pub fn matches(&self, tag: &str) -> bool {
        match self {
            Self::None => false,
            Self::Globs { set, .. } => set.is_match(tag),
            Self::Callback(f) => f(tag),
        }
    }
}

impl fmt::Debug for CustomElementMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Globs { patterns, .. } => f.debug_tuple("Globs").field(patterns).finish(),
            Self::Callback(_) => f.write_str("Callback(..)"),
        }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for CustomElementMatcher {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let patterns = Vec::<String>::deserialize(deserializer)?;
        if patterns.is_empty() {
            return Ok(Self::None);
        }
        Self::from_globs(&patterns).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TransformOptions::default();
        assert!(opts.merge_props);
        assert!(opts.enable_object_slots);
        assert!(!opts.optimize);
        assert!(!opts.transform_on);
        assert_eq!(opts.pragma(), None);
        assert!(!opts.is_custom_element.matches("div"));
    }

    #[test]
    fn test_empty_pragma_is_ignored() {
        let opts = TransformOptions {
            pragma: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(opts.pragma(), None);
    }

    #[test]
    fn test_glob_matcher() {
        let matcher = CustomElementMatcher::from_globs(&["my-*", "x-button"]).unwrap();
        assert!(matcher.matches("my-widget"));
        assert!(matcher.matches("x-button"));
        assert!(!matcher.matches("MyWidget"));
        assert_eq!(format!("{matcher:?}"), "Globs([\"my-*\", \"x-button\"])");
    }

    #[test]
    fn test_callback_matcher() {
        let matcher = CustomElementMatcher::from_fn(|tag| tag.contains('-'));
        assert!(matcher.matches("ion-button"));
        assert!(!matcher.matches("Comp"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_camel_case() {
        let opts: TransformOptions = serde_json::from_str(
            r#"{ "optimize": true, "mergeProps": false, "isCustomElement": ["ion-*"] }"#,
        )
        .unwrap();
        assert!(opts.optimize);
        assert!(!opts.merge_props);
        assert!(opts.enable_object_slots);
        assert!(opts.is_custom_element.matches("ion-card"));
    }
}
