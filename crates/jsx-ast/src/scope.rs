//! Lexical scopes and unique identifier generation.

use crate::ast::*;
use crate::visit::Visit;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;

/// Generates identifiers that collide with no name used anywhere in a program.
///
/// Names are seeded from every identifier in the program (bindings, references,
/// property keys and JSX names) and every uid handed out so far, so a generated
/// name can neither shadow nor be shadowed by anything in the file.
#[derive(Debug, Clone, Default)]
pub struct UidGenerator {
    used: FxHashSet<SmolStr>,
}

impl UidGenerator {
    /// Creates a generator seeded with the names used in `program`.
    pub fn from_program(program: &Program) -> Self {
        let mut collector = NameCollector::default();
        collector.visit_program(program);
        Self {
            used: collector.names,
        }
    }

    /// Returns true if `name` is already taken.
    pub fn is_used(&self, name: &str) -> bool {
        self.used.contains(name)
    }

    /// Marks `name` as taken.
    pub fn reserve(&mut self, name: impl Into<SmolStr>) {
        self.used.insert(name.into());
    }

    /// Generates a fresh identifier from `hint`: `_hint`, `_hint2`, `_hint3`, ...
    pub fn generate_uid(&mut self, hint: &str) -> Ident {
        let base = to_identifier(hint);
        let base = base.trim_start_matches('_');
        let base = base.trim_end_matches(|c: char| c.is_ascii_digit());

        let mut i = 1usize;
        loop {
            let candidate = if i > 1 {
                format!("_{base}{i}")
            } else {
                format!("_{base}")
            };
            if !self.used.contains(candidate.as_str()) {
                let sym = SmolStr::from(candidate);
                self.used.insert(sym.clone());
                return Ident::new(sym);
            }
            i += 1;
        }
    }
}

/// Converts an arbitrary string into a valid identifier.
///
/// Non-identifier characters become word breaks and the following character is
/// upper-cased, so `@vue/babel-helper-vue-transform-on` becomes
/// `vueBabelHelperVueTransformOn`.
pub fn to_identifier(input: &str) -> String {
    let replaced: String = input
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '$' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    let trimmed = replaced.trim_start_matches(|c: char| c == '-' || c.is_ascii_digit());

    let mut out = String::with_capacity(trimmed.len());
    let mut upper_next = false;
    for c in trimmed.chars() {
        if c == '-' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }

    if out.is_empty() {
        return "_".to_string();
    }
    if is_reserved_word(&out) {
        out.insert(0, '_');
    }
    out
}

fn is_reserved_word(name: &str) -> bool {
    matches!(
        name,
        "break"
            | "case"
            | "catch"
            | "class"
            | "const"
            | "continue"
            | "debugger"
            | "default"
            | "delete"
            | "do"
            | "else"
            | "export"
            | "extends"
            | "false"
            | "finally"
            | "for"
            | "function"
            | "if"
            | "import"
            | "in"
            | "instanceof"
            | "new"
            | "null"
            | "return"
            | "super"
            | "switch"
            | "this"
            | "throw"
            | "true"
            | "try"
            | "typeof"
            | "var"
            | "void"
            | "while"
            | "with"
            | "yield"
            | "let"
            | "static"
            | "enum"
            | "await"
    )
}

#[derive(Default)]
struct NameCollector {
    names: FxHashSet<SmolStr>,
}

impl Visit for NameCollector {
    fn visit_ident(&mut self, ident: &Ident) {
        self.names.insert(ident.sym.clone());
    }
}

/// A single lexical scope.
#[derive(Debug, Default)]
struct Frame {
    bindings: FxHashSet<SmolStr>,
    /// `let` declarations to prepend to the scope's body when it is left.
    pending: Vec<Ident>,
}

/// A stack of lexical scopes, innermost last.
///
/// The program scope sits at depth 0 and is never popped.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<Frame>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    /// Creates a stack holding only an empty program scope.
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()],
        }
    }

    /// Creates a stack whose program scope holds the top-level bindings of `program`.
    pub fn for_program(program: &Program) -> Self {
        let mut stack = Self::new();
        stack.declare_stmts(&program.body);
        stack
    }

    /// Returns the depth of the innermost scope.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }

    /// Enters a new scope.
    pub fn push(&mut self) {
        self.frames.push(Frame::default());
    }

    /// Leaves the innermost scope, returning the declarations queued for it.
    ///
    /// Popping the program scope only drains its queue.
    pub fn pop(&mut self) -> Vec<Ident> {
        if self.frames.len() == 1 {
            return std::mem::take(&mut self.frames[0].pending);
        }
        self.frames.pop().map(|f| f.pending).unwrap_or_default()
    }

    /// Declares a binding in the innermost scope.
    pub fn declare(&mut self, name: impl Into<SmolStr>) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(name.into());
        }
    }

    /// Declares every name bound by a pattern.
    pub fn declare_pat(&mut self, pat: &Pat) {
        let mut names = BindingNames::default();
        names.visit_pat(pat);
        for name in names.0 {
            self.declare(name);
        }
    }

    /// Declares the bindings introduced directly by a statement list.
    pub fn declare_stmts(&mut self, stmts: &[Stmt]) {
        for stmt in stmts {
            match stmt {
                Stmt::Import(decl) => {
                    for spec in &decl.specifiers {
                        self.declare(spec.local().sym.clone());
                    }
                }
                Stmt::Var(decl) | Stmt::ExportDecl(ExportDecl { decl: Decl::Var(decl), .. }) => {
                    for d in &decl.decls {
                        self.declare_pat(&d.name);
                    }
                }
                Stmt::Fn(decl) | Stmt::ExportDecl(ExportDecl { decl: Decl::Fn(decl), .. }) => {
                    self.declare(decl.ident.sym.clone())
                }
                Stmt::Class(decl)
                | Stmt::ExportDecl(ExportDecl {
                    decl: Decl::Class(decl),
                    ..
                }) => self.declare(decl.ident.sym.clone()),
                Stmt::ExportDefaultDecl(export) => {
                    let ident = match &export.decl {
                        DefaultDecl::Fn(f) => f.ident.as_ref(),
                        DefaultDecl::Class(c) => c.ident.as_ref(),
                    };
                    if let Some(ident) = ident {
                        self.declare(ident.sym.clone());
                    }
                }
                _ => {}
            }
        }
    }

    /// Queues `let ident;` for the innermost scope and declares it.
    pub fn push_declaration(&mut self, ident: Ident) {
        if let Some(frame) = self.frames.last_mut() {
            frame.bindings.insert(ident.sym.clone());
            frame.pending.push(ident);
        }
    }

    /// Returns true if `name` is bound in any enclosing scope.
    pub fn has_binding(&self, name: &str) -> bool {
        self.binding_depth(name).is_some()
    }

    /// Returns the depth of the innermost scope binding `name`.
    pub fn binding_depth(&self, name: &str) -> Option<usize> {
        self.frames
            .iter()
            .rposition(|frame| frame.bindings.contains(name))
    }
}

/// Collects the names a pattern binds, skipping default values and keys.
#[derive(Default)]
struct BindingNames(Vec<SmolStr>);

impl Visit for BindingNames {
    fn visit_pat(&mut self, pat: &Pat) {
        match pat {
            Pat::Ident(ident) => self.0.push(ident.sym.clone()),
            Pat::Array(array) => {
                for elem in array.elems.iter().flatten() {
                    self.visit_pat(elem);
                }
            }
            Pat::Object(object) => {
                for prop in &object.props {
                    match prop {
                        ObjectPatProp::KeyValue(kv) => self.visit_pat(&kv.value),
                        ObjectPatProp::Shorthand(sh) => self.0.push(sh.key.sym.clone()),
                        ObjectPatProp::Rest(rest) => self.visit_pat(&rest.arg),
                    }
                }
            }
            Pat::Assign(assign) => self.visit_pat(&assign.left),
            Pat::Rest(rest) => self.visit_pat(&rest.arg),
        }
    }
}
