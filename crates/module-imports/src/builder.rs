//! Import statement builder.
//!
//! The builder accumulates the statements for one import or require of one
//! source. Every operation consumes the builder and hands it back, acting on
//! the last statement produced so far; `done` yields the statements and the
//! expression that refers to the imported value.

use crate::{HelperHub, ImportError};
use jsx_ast::*;

/// The output of an [`ImportBuilder`].
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltImport {
    /// Statements to insert into the program, in order.
    pub statements: Vec<Stmt>,
    /// The expression referencing the imported value, if one was bound.
    pub result_name: Option<Expr>,
}

/// Accumulates the statements for a single import.
pub struct ImportBuilder<'a> {
    source: String,
    uids: &'a mut UidGenerator,
    hub: &'a mut dyn HelperHub,
    statements: Vec<Stmt>,
    result_name: Option<Expr>,
}

impl<'a> ImportBuilder<'a> {
    /// Creates a builder for `source`.
    pub fn new(
        source: impl Into<String>,
        uids: &'a mut UidGenerator,
        hub: &'a mut dyn HelperHub,
    ) -> Self {
        Self {
            source: source.into(),
            uids,
            hub,
            statements: Vec::new(),
            result_name: None,
        }
    }

    /// Finishes the builder.
    pub fn done(self) -> BuiltImport {
        BuiltImport {
            statements: self.statements,
            result_name: self.result_name,
        }
    }

    /// Starts `import "source";`.
    pub fn import(mut self) -> Self {
        self.statements
            .push(Stmt::Import(ImportDecl::bare(self.source.clone())));
        self
    }

    /// Starts `require("source");`.
    pub fn require(mut self) -> Self {
        self.statements.push(Stmt::expr(Expr::call(
            Expr::ident("require"),
            vec![Expr::str(self.source.clone())],
        )));
        self
    }

    /// Binds the current import as `* as _hint`.
    pub fn namespace(self, hint: &str) -> Result<Self, ImportError> {
        self.bind("namespace", hint, |local| {
            ImportSpecifier::Namespace(ImportNamespaceSpecifier { local, span: None })
        })
    }

    /// Binds the current import's default export as `_hint`.
    pub fn default(self, hint: &str) -> Result<Self, ImportError> {
        self.bind("default", hint, |local| {
            ImportSpecifier::Default(ImportDefaultSpecifier { local, span: None })
        })
    }

    /// Binds the current import's `import_name` export as `_hint`.
    pub fn named(self, hint: &str, import_name: &str) -> Result<Self, ImportError> {
        if import_name == "default" {
            return self.default(hint);
        }
        let imported = Ident::new(import_name);
        self.bind("named", hint, move |local| {
            ImportSpecifier::Named(ImportNamedSpecifier {
                local,
                imported,
                span: None,
            })
        })
    }

    fn bind(
        mut self,
        op: &'static str,
        hint: &str,
        make: impl FnOnce(Ident) -> ImportSpecifier,
    ) -> Result<Self, ImportError> {
        let decl = match self.statements.last_mut() {
            Some(Stmt::Import(decl)) => decl,
            Some(other) => {
                return Err(ImportError::UnexpectedStatement {
                    op,
                    expected: "ImportDeclaration",
                    found: other.kind_name(),
                })
            }
            None => return Err(ImportError::NoStatement { op }),
        };
        if !decl.specifiers.is_empty() {
            return Err(ImportError::SpecifiersAlreadyBound { op });
        }
        let local = self.uids.generate_uid(hint);
        decl.specifiers = vec![make(local.clone())];
        self.result_name = Some(Expr::Ident(local));
        Ok(self)
    }

    /// Captures the current value in `var _hint = ...;`.
    ///
    /// When the last statement is not an expression statement, the current
    /// result name becomes the captured value.
    pub fn var(mut self, hint: &str) -> Result<Self, ImportError> {
        let local = self.uids.generate_uid(hint);
        let value = match self.statements.pop() {
            Some(Stmt::Expr(stmt)) => *stmt.expr,
            other => {
                if let Some(stmt) = other {
                    self.statements.push(stmt);
                }
                self.result_name
                    .clone()
                    .ok_or(ImportError::MissingResultName { op: "var" })?
            }
        };
        self.statements
            .push(Stmt::var(VarKind::Var, local.clone(), Some(value)));
        self.result_name = Some(Expr::Ident(local));
        Ok(self)
    }

    /// Wraps the current value in `_interopRequireDefault(...)`.
    pub fn default_interop(self) -> Result<Self, ImportError> {
        self.interop("defaultInterop", "interopRequireDefault")
    }

    /// Wraps the current value in `_interopRequireWildcard(...)`.
    pub fn wildcard_interop(self) -> Result<Self, ImportError> {
        self.interop("wildcardInterop", "interopRequireWildcard")
    }

    fn interop(mut self, op: &'static str, helper: &str) -> Result<Self, ImportError> {
        let callee = self.hub.add_helper(helper);
        self.map_current(op, |value| Expr::call(callee, vec![value]))?;
        Ok(self)
    }

    /// Replaces the current value with `value.name`.
    pub fn prop(mut self, name: &str) -> Result<Self, ImportError> {
        self.map_current("prop", |value| Expr::member(value, name))?;
        Ok(self)
    }

    /// Makes the result `result.name` without changing any statement.
    pub fn read(mut self, name: &str) -> Result<Self, ImportError> {
        let current = self
            .result_name
            .take()
            .ok_or(ImportError::MissingResultName { op: "read" })?;
        self.result_name = Some(Expr::member(current, name));
        Ok(self)
    }

    fn map_current(
        &mut self,
        op: &'static str,
        f: impl FnOnce(Expr) -> Expr,
    ) -> Result<(), ImportError> {
        let slot: &mut Box<Expr> = match self.statements.last_mut() {
            Some(Stmt::Expr(stmt)) => &mut stmt.expr,
            Some(Stmt::Var(decl)) => {
                let count = decl.decls.len();
                match decl.decls.as_mut_slice() {
                    [declarator] => match declarator.init.as_mut() {
                        Some(init) => init,
                        None => return Err(ImportError::MissingResultName { op }),
                    },
                    _ => return Err(ImportError::MultipleDeclarators { op, count }),
                }
            }
            Some(other) => {
                return Err(ImportError::UnexpectedStatement {
                    op,
                    expected: "ExpressionStatement or VariableDeclaration",
                    found: other.kind_name(),
                })
            }
            None => return Err(ImportError::NoStatement { op }),
        };
        let value = std::mem::replace(slot.as_mut(), Expr::null());
        **slot = f(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingHub;
    use pretty_assertions::assert_eq;

    fn printed(built: &BuiltImport) -> String {
        built.statements.iter().map(print_stmt).collect()
    }

    #[test]
    fn test_named_import() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let built = ImportBuilder::new("vue", &mut uids, &mut hub)
            .import()
            .named("createVNode", "createVNode")
            .unwrap()
            .done();
        assert_eq!(
            printed(&built),
            "import { createVNode as _createVNode } from \"vue\";\n"
        );
        assert_eq!(built.result_name, Some(Expr::ident("_createVNode")));
    }

    #[test]
    fn test_named_default_delegates() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let built = ImportBuilder::new("lib", &mut uids, &mut hub)
            .import()
            .named("lib", "default")
            .unwrap()
            .done();
        assert_eq!(printed(&built), "import _lib from \"lib\";\n");
    }

    #[test]
    fn test_require_var_wildcard() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let built = ImportBuilder::new("vue", &mut uids, &mut hub)
            .require()
            .var("vue")
            .unwrap()
            .wildcard_interop()
            .unwrap()
            .done();
        assert_eq!(
            printed(&built),
            "var _vue = _interopRequireWildcard(require(\"vue\"));\n"
        );
        assert_eq!(built.result_name, Some(Expr::ident("_vue")));
        assert_eq!(hub.requested().collect::<Vec<_>>(), vec!["interopRequireWildcard"]);
    }

    #[test]
    fn test_prop_then_var() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let built = ImportBuilder::new("lib", &mut uids, &mut hub)
            .require()
            .prop("foo")
            .unwrap()
            .var("foo")
            .unwrap()
            .done();
        assert_eq!(printed(&built), "var _foo = require(\"lib\").foo;\n");
    }

    #[test]
    fn test_default_then_var_reads_result() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let built = ImportBuilder::new("lib", &mut uids, &mut hub)
            .import()
            .default("lib$es6Default")
            .unwrap()
            .var("lib")
            .unwrap()
            .wildcard_interop()
            .unwrap()
            .done();
        assert_eq!(
            printed(&built),
            "import _lib$es6Default from \"lib\";\nvar _lib = _interopRequireWildcard(_lib$es6Default);\n"
        );
    }

    #[test]
    fn test_read_is_non_mutating() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let built = ImportBuilder::new("lib", &mut uids, &mut hub)
            .require()
            .var("lib")
            .unwrap()
            .read("named")
            .unwrap()
            .done();
        assert_eq!(printed(&built), "var _lib = require(\"lib\");\n");
        assert_eq!(
            built.result_name.as_ref().map(print_expr),
            Some("_lib.named".to_string())
        );
    }

    #[test]
    fn test_binding_requires_bare_import() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let err = ImportBuilder::new("lib", &mut uids, &mut hub)
            .require()
            .namespace("lib")
            .err();
        assert_eq!(
            err,
            Some(ImportError::UnexpectedStatement {
                op: "namespace",
                expected: "ImportDeclaration",
                found: "ExpressionStatement",
            })
        );

        let mut uids = UidGenerator::default();
        let err = ImportBuilder::new("lib", &mut uids, &mut hub)
            .import()
            .default("a")
            .and_then(|b| b.default("b"))
            .err();
        assert_eq!(err, Some(ImportError::SpecifiersAlreadyBound { op: "default" }));
    }

    #[test]
    fn test_interop_on_import_fails() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let err = ImportBuilder::new("lib", &mut uids, &mut hub)
            .import()
            .default_interop()
            .err();
        assert!(matches!(
            err,
            Some(ImportError::UnexpectedStatement { op: "defaultInterop", .. })
        ));
    }

    #[test]
    fn test_var_without_result_fails() {
        let mut uids = UidGenerator::default();
        let mut hub = RecordingHub::new();
        let err = ImportBuilder::new("lib", &mut uids, &mut hub)
            .import()
            .var("lib")
            .err();
        assert_eq!(err, Some(ImportError::MissingResultName { op: "var" }));
    }
}
