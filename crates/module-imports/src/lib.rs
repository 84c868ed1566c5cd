//! Import and require injection for vue-jsx-rs.
//!
//! This crate adds import or require bindings for a module to a program,
//! honoring the interop conventions of the code being imported:
//! - [`ImportBuilder`] accumulates the statements for one import
//! - [`ImportInjector`] picks builder operations for the module form and
//!   interop options, then splices the statements into the program
//! - [`is_module`] classifies the program's source type
//!
//! # Example
//!
//! ```
//! use jsx_ast::{print_program, Program, UidGenerator};
//! use module_imports::{add_named, ImportOptions, RecordingHub};
//!
//! let mut program = Program::module(Vec::new());
//! let mut uids = UidGenerator::from_program(&program);
//! let mut hub = RecordingHub::new();
//! let local = add_named(&mut program, &mut uids, &mut hub, "h", "vue", &ImportOptions::default())?;
//! assert_eq!(jsx_ast::print_expr(&local), "_h");
//! assert_eq!(print_program(&program), "import { h as _h } from \"vue\";\n");
//! # Ok::<(), module_imports::ImportError>(())
//! ```

mod builder;
mod error;
mod hub;
mod injector;
mod is_module;

pub use builder::{BuiltImport, ImportBuilder};
pub use error::ImportError;
pub use hub::{HelperHub, RecordingHub};
pub use injector::{
    ImportInjector, ImportOptions, ImportPosition, ImportedInterop, ImportedType,
    ImportingInterop,
};
pub use is_module::is_module;

use jsx_ast::{Expr, Program, UidGenerator};

/// Imports the default export of `source` into `program`.
pub fn add_default(
    program: &mut Program,
    uids: &mut UidGenerator,
    hub: &mut dyn HelperHub,
    source: &str,
    opts: &ImportOptions,
) -> Result<Expr, ImportError> {
    ImportInjector::new(program, uids, hub).add_default(source, opts)
}

/// Imports the export `name` of `source` into `program`.
pub fn add_named(
    program: &mut Program,
    uids: &mut UidGenerator,
    hub: &mut dyn HelperHub,
    name: &str,
    source: &str,
    opts: &ImportOptions,
) -> Result<Expr, ImportError> {
    ImportInjector::new(program, uids, hub).add_named(name, source, opts)
}

/// Imports `source` into `program` as a namespace object.
pub fn add_namespace(
    program: &mut Program,
    uids: &mut UidGenerator,
    hub: &mut dyn HelperHub,
    source: &str,
    opts: &ImportOptions,
) -> Result<Expr, ImportError> {
    ImportInjector::new(program, uids, hub).add_namespace(source, opts)
}

/// Imports `source` into `program` for its side effects.
pub fn add_side_effect(
    program: &mut Program,
    uids: &mut UidGenerator,
    hub: &mut dyn HelperHub,
    source: &str,
    opts: &ImportOptions,
) -> Result<(), ImportError> {
    ImportInjector::new(program, uids, hub).add_side_effect(source, opts)
}
