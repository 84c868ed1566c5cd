//! Import injection.
//!
//! Chooses the builder operations for a requested binding from the module
//! form of the program and the interop options, then splices the resulting
//! statements into the program body.

use crate::builder::{BuiltImport, ImportBuilder};
use crate::{is_module, HelperHub, ImportError};
use jsx_ast::*;
use tracing::debug;

/// The module system of the imported source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportedType {
    /// An ES module.
    Es6,
    /// A CommonJS module.
    #[default]
    CommonJs,
}

/// How the imported CommonJS module was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportedInterop {
    /// Compiled from ES modules by Babel, with `__esModule` marking.
    #[default]
    Babel,
    /// Compiled from ES modules without default interop.
    Compiled,
    /// Hand-written CommonJS.
    Uncompiled,
}

/// How the importing module resolves CommonJS imports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportingInterop {
    /// Babel-style interop.
    #[default]
    Babel,
    /// Node's native ESM interop: the default export is `module.exports`.
    Node,
}

/// Where injected statements go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportPosition {
    /// At the top of the program, merged into a leading import when possible.
    #[default]
    Before,
    /// After the last import. Modules only.
    After,
}

/// Options for a single injection.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// The module system of the imported source.
    pub imported_type: ImportedType,
    /// The interop style of the imported source.
    pub imported_interop: ImportedInterop,
    /// The interop style of the importing program.
    pub importing_interop: ImportingInterop,
    /// Keep the binding live, reading through the module object.
    pub ensure_live_reference: bool,
    /// Return `(0, obj.prop)` instead of `obj.prop` so calls get no `this`.
    pub ensure_no_context: bool,
    /// Seed for the generated local name.
    pub name_hint: Option<String>,
    /// Where the statements are inserted.
    pub import_position: ImportPosition,
}

impl ImportOptions {
    /// Options with a live reference, as used for framework helpers.
    pub fn live() -> Self {
        Self {
            ensure_live_reference: true,
            ..Self::default()
        }
    }

    /// Sets the name hint.
    pub fn with_name_hint(mut self, hint: impl Into<String>) -> Self {
        self.name_hint = Some(hint.into());
        self
    }
}

/// What the caller wants bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Binding<'n> {
    Default,
    Named(&'n str),
    Namespace,
    SideEffect,
}

impl Binding<'_> {
    fn import_name(&self) -> Option<&str> {
        match self {
            Binding::Default => Some("default"),
            Binding::Named(name) => Some(name),
            Binding::Namespace | Binding::SideEffect => None,
        }
    }
}

/// Injects imports into one program.
pub struct ImportInjector<'a> {
    program: &'a mut Program,
    uids: &'a mut UidGenerator,
    hub: &'a mut dyn HelperHub,
}

impl<'a> ImportInjector<'a> {
    /// Creates an injector over `program`.
    pub fn new(
        program: &'a mut Program,
        uids: &'a mut UidGenerator,
        hub: &'a mut dyn HelperHub,
    ) -> Self {
        Self { program, uids, hub }
    }

    /// Imports the default export of `source`.
    pub fn add_default(&mut self, source: &str, opts: &ImportOptions) -> Result<Expr, ImportError> {
        self.generate(source, Binding::Default, opts)?
            .ok_or(ImportError::MissingResultName { op: "addDefault" })
    }

    /// Imports the export `name` of `source`.
    pub fn add_named(
        &mut self,
        name: &str,
        source: &str,
        opts: &ImportOptions,
    ) -> Result<Expr, ImportError> {
        self.generate(source, Binding::Named(name), opts)?
            .ok_or(ImportError::MissingResultName { op: "addNamed" })
    }

    /// Imports `source` as a namespace object.
    pub fn add_namespace(&mut self, source: &str, opts: &ImportOptions) -> Result<Expr, ImportError> {
        self.generate(source, Binding::Namespace, opts)?
            .ok_or(ImportError::MissingResultName { op: "addNamespace" })
    }

    /// Imports `source` for its side effects only.
    pub fn add_side_effect(&mut self, source: &str, opts: &ImportOptions) -> Result<(), ImportError> {
        self.generate(source, Binding::SideEffect, opts)?;
        Ok(())
    }

    fn generate(
        &mut self,
        source: &str,
        binding: Binding<'_>,
        opts: &ImportOptions,
    ) -> Result<Option<Expr>, ImportError> {
        let is_default = binding == Binding::Default;
        let is_named = matches!(binding, Binding::Named(_));
        let is_namespace = binding == Binding::Namespace;
        let import_name = binding.import_name();

        let is_mod = is_module(self.program)?;
        let for_node = is_mod && opts.importing_interop == ImportingInterop::Node;
        let for_babel = is_mod && opts.importing_interop == ImportingInterop::Babel;

        if opts.import_position == ImportPosition::After && !is_mod {
            return Err(ImportError::AfterInScript);
        }

        if is_mod && !opts.ensure_live_reference {
            if let Some(existing) = self.find_existing(source, binding, opts) {
                debug!(source, local = %existing.sym, "reusing existing import");
                return Ok(Some(Expr::Ident(existing)));
            }
        }

        let name: Option<&str> = opts.name_hint.as_deref().or(import_name);
        let hint = |fallback: &str| name.unwrap_or(fallback).to_string();
        let builder = ImportBuilder::new(source, self.uids, self.hub);

        let builder = match (opts.imported_type, opts.imported_interop) {
            (ImportedType::Es6, _) => {
                if !for_node && !for_babel {
                    return Err(ImportError::Es6FromCommonJs);
                }
                let b = builder.import();
                match (is_namespace, import_name) {
                    (true, _) => b.namespace(opts.name_hint.as_deref().unwrap_or(source))?,
                    (false, Some(import_name)) => b.named(&hint(import_name), import_name)?,
                    (false, None) => b,
                }
            }
            (ImportedType::CommonJs, ImportedInterop::Babel) => {
                if for_node {
                    let name = match name {
                        Some("default") | None => source.to_string(),
                        Some(name) => name.to_string(),
                    };
                    let es6_default = format!("{source}$es6Default");
                    let b = builder.import();
                    if is_namespace {
                        b.default(&es6_default)?.var(&name)?.wildcard_interop()?
                    } else if is_default {
                        if opts.ensure_live_reference {
                            b.default(&es6_default)?
                                .var(&name)?
                                .default_interop()?
                                .read("default")?
                        } else {
                            b.default(&es6_default)?
                                .var(&name)?
                                .default_interop()?
                                .prop("default")?
                        }
                    } else if let Binding::Named(import_name) = binding {
                        b.default(&es6_default)?.read(import_name)?
                    } else {
                        b
                    }
                } else if for_babel {
                    let b = builder.import();
                    if is_namespace {
                        b.namespace(&hint(source))?
                    } else if let Some(import_name) = import_name {
                        b.named(&hint(import_name), import_name)?
                    } else {
                        b
                    }
                } else {
                    let b = builder.require();
                    if is_namespace {
                        b.var(&hint(source))?.wildcard_interop()?
                    } else if (is_default || is_named) && opts.ensure_live_reference {
                        if is_default {
                            let name = match name {
                                Some("default") | None => source,
                                Some(name) => name,
                            };
                            b.var(name)?.read("default")?.default_interop()?
                        } else {
                            b.var(source)?.read(import_name.unwrap_or_default())?
                        }
                    } else if is_default {
                        b.var(&hint(source))?.default_interop()?.prop("default")?
                    } else if let Binding::Named(import_name) = binding {
                        b.var(&hint(import_name))?.prop(import_name)?
                    } else {
                        b
                    }
                }
            }
            (ImportedType::CommonJs, ImportedInterop::Compiled) => {
                if for_node {
                    let b = builder.import();
                    if is_namespace {
                        b.default(&hint(source))?
                    } else if is_default || is_named {
                        b.default(source)?.read(&hint(source))?
                    } else {
                        b
                    }
                } else if for_babel {
                    let b = builder.import();
                    if is_namespace {
                        b.namespace(&hint(source))?
                    } else if let Some(import_name) = import_name {
                        b.named(&hint(import_name), import_name)?
                    } else {
                        b
                    }
                } else {
                    let b = builder.require();
                    if is_namespace {
                        b.var(&hint(source))?
                    } else if let Some(import_name) = import_name {
                        if opts.ensure_live_reference {
                            b.var(source)?.read(&hint(import_name))?
                        } else {
                            b.prop(import_name)?.var(&hint(import_name))?
                        }
                    } else {
                        b
                    }
                }
            }
            (ImportedType::CommonJs, ImportedInterop::Uncompiled) => {
                if is_default && opts.ensure_live_reference {
                    return Err(ImportError::LiveCommonJsDefault);
                }
                if is_mod {
                    let b = builder.import();
                    if is_namespace || is_default {
                        b.default(&hint(source))?
                    } else if let Binding::Named(import_name) = binding {
                        b.default(source)?.read(&hint(import_name))?
                    } else {
                        b
                    }
                } else {
                    let b = builder.require();
                    if is_namespace || is_default {
                        b.var(&hint(source))?
                    } else if let Binding::Named(import_name) = binding {
                        if opts.ensure_live_reference {
                            b.var(source)?.read(&hint(import_name))?
                        } else {
                            b.var(&hint(import_name))?.prop(import_name)?
                        }
                    } else {
                        b
                    }
                }
            }
        };

        let BuiltImport {
            statements,
            result_name,
        } = builder.done();
        debug!(
            source,
            statements = statements.len(),
            position = ?opts.import_position,
            "injecting import"
        );
        self.insert(statements, opts.import_position);

        let result_name = match result_name {
            Some(expr @ Expr::Member(_)) if (is_default || is_named) && opts.ensure_no_context => {
                Some(Expr::Seq(SeqExpr {
                    exprs: vec![Expr::num(0.0), expr],
                }))
            }
            other => other,
        };
        Ok(result_name)
    }

    /// Finds an import of `source` that already binds what is requested.
    fn find_existing(
        &self,
        source: &str,
        binding: Binding<'_>,
        opts: &ImportOptions,
    ) -> Option<Ident> {
        let plain_import = match opts.imported_type {
            ImportedType::Es6 => opts.importing_interop == ImportingInterop::Babel,
            ImportedType::CommonJs => match opts.imported_interop {
                ImportedInterop::Babel | ImportedInterop::Compiled => {
                    opts.importing_interop == ImportingInterop::Babel
                }
                ImportedInterop::Uncompiled => binding != Binding::Namespace,
            },
        };
        if !plain_import {
            return None;
        }

        let uncompiled = opts.imported_type == ImportedType::CommonJs
            && opts.imported_interop == ImportedInterop::Uncompiled;

        self.program
            .body
            .iter()
            .filter_map(Stmt::as_import)
            .filter(|decl| decl.is_value_import() && decl.source.value == source)
            .flat_map(|decl| decl.specifiers.iter())
            .find_map(|spec| match (spec, binding) {
                (ImportSpecifier::Named(s), Binding::Named(name))
                    if !uncompiled && s.imported.sym == name =>
                {
                    Some(s.local.clone())
                }
                (ImportSpecifier::Default(s), Binding::Default) => Some(s.local.clone()),
                (ImportSpecifier::Namespace(s), Binding::Namespace) => Some(s.local.clone()),
                _ => None,
            })
    }

    fn insert(&mut self, statements: Vec<Stmt>, position: ImportPosition) {
        let statements = match position {
            ImportPosition::After => match self.insert_after(statements) {
                Ok(()) => return,
                Err(rest) => rest,
            },
            ImportPosition::Before => match self.insert_before(statements) {
                Ok(()) => return,
                Err(rest) => rest,
            },
        };
        self.program.body.splice(0..0, statements);
    }

    /// Merges a lone value import into the first value import of the program.
    fn insert_before(&mut self, mut statements: Vec<Stmt>) -> Result<(), Vec<Stmt>> {
        if statements.len() != 1 {
            return Err(statements);
        }
        let Some(Stmt::Import(incoming)) = statements.first_mut() else {
            return Err(statements);
        };
        if !incoming.is_value_import() {
            return Err(statements);
        }
        let first = self
            .program
            .body
            .iter_mut()
            .filter_map(|stmt| match stmt {
                Stmt::Import(decl) if decl.is_value_import() => Some(decl),
                _ => None,
            })
            .next();
        match first {
            Some(target) if target.source.value == incoming.source.value => {
                if maybe_append_specifiers(target, incoming) {
                    Ok(())
                } else {
                    Err(statements)
                }
            }
            _ => Err(statements),
        }
    }

    /// Appends specifiers to matching imports and puts the remaining statements
    /// after the last value import.
    fn insert_after(&mut self, statements: Vec<Stmt>) -> Result<(), Vec<Stmt>> {
        let mut pending: Vec<Option<Stmt>> = statements.into_iter().map(Some).collect();
        let mut last_import = None;

        for (index, stmt) in self.program.body.iter_mut().enumerate() {
            let Stmt::Import(existing) = stmt else {
                continue;
            };
            if !existing.is_value_import() {
                continue;
            }
            last_import = Some(index);
            for slot in pending.iter_mut() {
                let merged = match slot {
                    Some(Stmt::Import(incoming))
                        if incoming.is_value_import()
                            && incoming.source.value == existing.source.value =>
                    {
                        maybe_append_specifiers(existing, incoming)
                    }
                    _ => false,
                };
                if merged {
                    *slot = None;
                }
            }
        }

        let rest: Vec<Stmt> = pending.into_iter().flatten().collect();
        if rest.is_empty() {
            return Ok(());
        }
        match last_import {
            Some(index) => {
                self.program.body.splice(index + 1..index + 1, rest);
                Ok(())
            }
            None => Err(rest),
        }
    }
}

/// Moves the specifiers of `incoming` into `target` when the two can share a
/// declaration. Returns false, leaving both untouched, when they cannot.
fn maybe_append_specifiers(target: &mut ImportDecl, incoming: &mut ImportDecl) -> bool {
    if target.specifiers.is_empty() {
        target.specifiers = std::mem::take(&mut incoming.specifiers);
        return true;
    }
    if incoming.specifiers.is_empty() {
        return true;
    }
    if matches!(target.specifiers[0], ImportSpecifier::Namespace(_)) {
        return false;
    }

    let incoming_default = matches!(incoming.specifiers[0], ImportSpecifier::Default(_));
    if incoming_default && matches!(target.specifiers[0], ImportSpecifier::Default(_)) {
        return false;
    }
    let rest_index = usize::from(incoming_default);
    if matches!(
        incoming.specifiers.get(rest_index),
        Some(ImportSpecifier::Namespace(_))
    ) {
        return false;
    }

    let mut specifiers = std::mem::take(&mut incoming.specifiers).into_iter();
    if incoming_default {
        if let Some(default) = specifiers.next() {
            target.specifiers.insert(0, default);
        }
    }
    target.specifiers.extend(specifiers);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RecordingHub;
    use pretty_assertions::assert_eq;

    fn named(local: &str, imported: &str) -> ImportSpecifier {
        ImportSpecifier::Named(ImportNamedSpecifier {
            local: Ident::new(local),
            imported: Ident::new(imported),
            span: None,
        })
    }

    fn import(specifiers: Vec<ImportSpecifier>, source: &str) -> ImportDecl {
        ImportDecl {
            specifiers,
            ..ImportDecl::bare(source)
        }
    }

    #[test]
    fn test_append_into_bare_import() {
        let mut target = ImportDecl::bare("vue");
        let mut incoming = import(vec![named("_h", "h")], "vue");
        assert!(maybe_append_specifiers(&mut target, &mut incoming));
        assert_eq!(target.specifiers.len(), 1);
    }

    #[test]
    fn test_append_default_goes_first() {
        let mut target = import(vec![named("ref", "ref")], "vue");
        let mut incoming = import(
            vec![ImportSpecifier::Default(ImportDefaultSpecifier {
                local: Ident::new("_vue"),
                span: None,
            })],
            "vue",
        );
        assert!(maybe_append_specifiers(&mut target, &mut incoming));
        assert_eq!(target.specifiers[0].local().sym, "_vue");
        assert_eq!(target.specifiers[1].local().sym, "ref");
    }

    #[test]
    fn test_no_append_next_to_namespace() {
        let mut target = import(
            vec![ImportSpecifier::Namespace(ImportNamespaceSpecifier {
                local: Ident::new("vue"),
                span: None,
            })],
            "vue",
        );
        let mut incoming = import(vec![named("_h", "h")], "vue");
        assert!(!maybe_append_specifiers(&mut target, &mut incoming));
        assert_eq!(incoming.specifiers.len(), 1);
    }

    #[test]
    fn test_existing_import_is_reused() {
        let mut program = Program::module(vec![Stmt::Import(import(
            vec![named("h", "h")],
            "vue",
        ))]);
        let mut uids = UidGenerator::from_program(&program);
        let mut hub = RecordingHub::new();
        let mut injector = ImportInjector::new(&mut program, &mut uids, &mut hub);
        let result = injector
            .add_named("h", "vue", &ImportOptions::default())
            .unwrap();
        assert_eq!(result, Expr::ident("h"));
        assert_eq!(program.body.len(), 1);
    }
}
