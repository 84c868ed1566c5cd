//! Interop helper references.

use indexmap::IndexSet;
use jsx_ast::Expr;
use smol_str::SmolStr;

/// Supplies references to runtime interop helpers such as
/// `interopRequireDefault`.
pub trait HelperHub {
    /// Returns an expression referencing the helper `name`.
    fn add_helper(&mut self, name: &str) -> Expr;
}

/// A hub that references helpers as `_<name>` identifiers and remembers
/// which ones were requested, so a host can emit their definitions.
#[derive(Debug, Clone, Default)]
pub struct RecordingHub {
    requested: IndexSet<SmolStr>,
}

impl RecordingHub {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the helper names requested so far, in first-request order.
    pub fn requested(&self) -> impl Iterator<Item = &str> {
        self.requested.iter().map(SmolStr::as_str)
    }
}

impl HelperHub for RecordingHub {
    fn add_helper(&mut self, name: &str) -> Expr {
        self.requested.insert(SmolStr::new(name));
        Expr::ident(format!("_{name}"))
    }
}
