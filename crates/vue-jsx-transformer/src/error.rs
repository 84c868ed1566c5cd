//! Transform error types.

use jsx_ast::Span;
use miette::Diagnostic;
use module_imports::ImportError;
use thiserror::Error;

/// An error that stopped the lowering of a file.
#[derive(Debug, Clone, Error)]
#[error("{kind}")]
pub struct TransformError {
    /// The kind of error.
    pub kind: TransformErrorKind,
    /// The location of the offending node, when it came from source.
    pub span: Option<Span>,
}

impl TransformError {
    /// Creates a new transform error.
    pub fn new(kind: TransformErrorKind, span: Option<Span>) -> Self {
        Self { kind, span }
    }
}

impl From<TransformErrorKind> for TransformError {
    fn from(kind: TransformErrorKind) -> Self {
        Self { kind, span: None }
    }
}

impl From<ImportError> for TransformError {
    fn from(err: ImportError) -> Self {
        TransformErrorKind::Import(err).into()
    }
}

impl Diagnostic for TransformError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.kind.code()
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.kind.help()
    }
}

/// The kind of transform error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum TransformErrorKind {
    /// `v-model` was given a string or a bare attribute.
    #[error("You have to use JSX Expression inside your v-model")]
    #[diagnostic(
        code(vue_jsx::model_value),
        help("bind an expression container, not a string")
    )]
    ModelNotExpression,

    /// `v-models` was used on a plain HTML element.
    #[error("v-models can only use in custom components")]
    #[diagnostic(code(vue_jsx::models_on_element))]
    ModelsOnElement,

    /// A `v-models` entry was not an array.
    #[error("You should pass a Two-dimensional Arrays to v-models")]
    #[diagnostic(
        code(vue_jsx::models_shape),
        help("each entry is [value, \"arg\"?, [\"modifier\"]?]")
    )]
    ModelsNotNested,

    /// A child node kind that cannot become a vnode child.
    #[error("getChildren: {kind} is not supported")]
    #[diagnostic(code(vue_jsx::unsupported_child))]
    UnsupportedChild {
        /// The node kind.
        kind: &'static str,
    },

    /// A tag name kind that cannot be resolved.
    #[error("getTag: {kind} is not supported")]
    #[diagnostic(code(vue_jsx::unsupported_tag))]
    UnsupportedTag {
        /// The node kind.
        kind: &'static str,
    },

    /// Injecting a runtime import failed.
    #[error(transparent)]
    #[diagnostic(code(vue_jsx::import))]
    Import(ImportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = TransformError::from(TransformErrorKind::UnsupportedChild {
            kind: "NumericLiteral",
        });
        assert_eq!(err.to_string(), "getChildren: NumericLiteral is not supported");
        assert_eq!(
            TransformError::from(ImportError::AfterInScript).to_string(),
            "\"importPosition\": \"after\" is only supported in modules"
        );
    }

    #[test]
    fn test_diagnostic_code() {
        let err = TransformError::new(
            TransformErrorKind::ModelNotExpression,
            Some(Span::new(3u32, 9u32)),
        );
        let code = err.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("vue_jsx::model_value"));
        assert!(err.help().is_some());
    }
}
