//! Import injection error types.

use thiserror::Error;

/// An error raised while building or injecting an import.
///
/// Configuration errors come from the options a caller passed; the remaining
/// variants mean the builder operations were chained in an order that the
/// statement shapes cannot support.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    /// The program is neither a module nor a script.
    #[error("Unknown sourceType \"{source_type}\", cannot transform.")]
    UnknownSourceType {
        /// The declared source type.
        source_type: String,
    },

    /// An ES module was requested from a CommonJS script.
    #[error("Cannot import an ES6 module from CommonJS")]
    Es6FromCommonJs,

    /// `After` insertion was requested for a script.
    #[error("\"importPosition\": \"after\" is only supported in modules")]
    AfterInScript,

    /// A live default binding was requested from an uncompiled CommonJS module.
    #[error("No live reference for commonjs default")]
    LiveCommonJsDefault,

    /// An operation ran before any statement was started.
    #[error("{op}: no statement has been started")]
    NoStatement {
        /// The builder operation.
        op: &'static str,
    },

    /// The current statement has the wrong shape for the operation.
    #[error("{op}: expected {expected}, found {found}")]
    UnexpectedStatement {
        /// The builder operation.
        op: &'static str,
        /// The shape the operation needs.
        expected: &'static str,
        /// The shape that was found.
        found: &'static str,
    },

    /// The current import already has specifiers.
    #[error("{op}: import declaration already has specifiers")]
    SpecifiersAlreadyBound {
        /// The builder operation.
        op: &'static str,
    },

    /// A variable declaration has more than one declarator.
    #[error("{op}: expected a single declarator, found {count}")]
    MultipleDeclarators {
        /// The builder operation.
        op: &'static str,
        /// The number of declarators.
        count: usize,
    },

    /// The operation needs a bound result name and none exists yet.
    #[error("{op}: no result name has been bound")]
    MissingResultName {
        /// The builder operation.
        op: &'static str,
    },
}
