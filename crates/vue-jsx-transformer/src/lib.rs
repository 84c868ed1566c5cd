//! Vue JSX to `createVNode` lowering.
//!
//! This crate rewrites the JSX in a program into calls against Vue's runtime
//! helpers. It handles:
//! - Tag resolution (built-in elements, bound components, `resolveComponent`)
//! - Props objects, `mergeProps`, directives and `v-model`
//! - Children and slot objects
//! - Patch flags and slot flags for the runtime's diffing fast paths
//! - Injecting the helper imports, once per file
//!
//! # Example
//!
//! ```
//! use jsx_ast::*;
//! use vue_jsx_transformer::{transform, TransformOptions};
//!
//! let element = JsxElement::new(
//!     JsxElementName::ident("div"),
//!     vec![JsxAttrOrSpread::str("id", "app")],
//!     vec![JsxChild::text("hello")],
//! );
//! let program = Program::module(vec![Stmt::expr(Expr::jsx(element))]);
//!
//! let result = transform(program, &TransformOptions::default())?;
//! assert_eq!(
//!     print_program(&result.program),
//!     "import { createTextVNode as _createTextVNode, createVNode as _createVNode } from \"vue\";\n\
//!      _createVNode(\"div\", { \"id\": \"app\" }, [_createTextVNode(\"hello\")]);\n"
//! );
//! # Ok::<(), vue_jsx_transformer::TransformError>(())
//! ```

mod children;
mod context;
mod directives;
mod element;
mod error;
mod flags;
mod helpers;
mod options;
mod props;
pub mod tags;
mod transform;

pub use children::collapse_jsx_text;
pub use error::{TransformError, TransformErrorKind};
pub use flags::{PatchFlags, SlotFlags};
pub use helpers::{Helper, RUNTIME_SOURCE, TRANSFORM_ON_SOURCE};
pub use options::{CustomElementMatcher, TransformOptions};
pub use transform::{coalesce_runtime_imports, contains_jsx, transform, TransformResult};
