//! Per-file lowering state.

use crate::error::TransformError;
use crate::flags::SlotFlags;
use crate::helpers::{Helper, HelperTable, Injection};
use crate::options::TransformOptions;
use jsx_ast::*;
use module_imports::RecordingHub;

/// An element whose children are being lowered.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ElementFrame {
    /// Scope depth at the element's position.
    pub scope_depth: usize,
    pub slot_flag: SlotFlags,
}

/// Everything one file's lowering reads and writes.
pub(crate) struct FileContext<'o> {
    pub options: &'o TransformOptions,
    pub program: Program,
    pub uids: UidGenerator,
    pub hub: RecordingHub,
    pub helpers: HelperTable,
    pub scopes: ScopeStack,
    /// Enclosing elements, innermost last.
    pub elements: Vec<ElementFrame>,
    /// Statements to insert before the statement being visited, one list per
    /// statement nesting level.
    pub hoists: Vec<Vec<Stmt>>,
}

impl<'o> FileContext<'o> {
    pub fn new(program: Program, options: &'o TransformOptions, module: bool) -> Self {
        let pragma = jsx_pragma(&program).or_else(|| options.pragma().map(str::to_string));
        Self {
            options,
            uids: UidGenerator::from_program(&program),
            scopes: ScopeStack::for_program(&program),
            helpers: HelperTable::new(module, pragma.as_deref()),
            hub: RecordingHub::new(),
            program,
            elements: Vec::new(),
            hoists: Vec::new(),
        }
    }

    fn injection(&mut self) -> (&mut HelperTable, Injection<'_>) {
        (
            &mut self.helpers,
            Injection {
                program: &mut self.program,
                uids: &mut self.uids,
                hub: &mut self.hub,
            },
        )
    }

    /// Returns the reference for a runtime helper.
    pub fn helper(&mut self, helper: Helper) -> Result<Expr, TransformError> {
        let (table, target) = self.injection();
        Ok(table.resolve(helper, target)?)
    }

    /// Returns the `_isSlot` function reference.
    pub fn is_slot(&mut self) -> Result<Expr, TransformError> {
        let (table, target) = self.injection();
        Ok(table.runtime_is_slot(target)?)
    }

    /// Returns the `_transformOn` reference.
    pub fn transform_on(&mut self) -> Result<Expr, TransformError> {
        let (table, target) = self.injection();
        Ok(table.transform_on(target)?)
    }

    /// Marks enclosing elements inside the scope of `name` as having dynamic
    /// slots. The innermost element is skipped unless `include_current`.
    pub fn mark_dynamic(&mut self, name: &str, include_current: bool) {
        let Some(depth) = self.scopes.binding_depth(name) else {
            return;
        };
        let end = if include_current {
            self.elements.len()
        } else {
            self.elements.len().saturating_sub(1)
        };
        for frame in self.elements[..end].iter_mut().rev() {
            if frame.scope_depth < depth {
                break;
            }
            frame.slot_flag = SlotFlags::Dynamic;
        }
    }

    /// Queues a statement to run before the statement being visited.
    pub fn hoist(&mut self, stmt: Stmt) {
        match self.hoists.last_mut() {
            Some(list) => list.push(stmt),
            None => self.program.body.insert(0, stmt),
        }
    }
}

/// Finds a `@jsx <name>` annotation in the program's comments; the last one wins.
pub(crate) fn jsx_pragma(program: &Program) -> Option<String> {
    let mut pragma = None;
    for comment in &program.comments {
        if let Some(name) = pragma_in(&comment.text) {
            pragma = Some(name.to_string());
        }
    }
    pragma
}

fn pragma_in(text: &str) -> Option<&str> {
    for (at, _) in text.match_indices("@jsx") {
        let rest = &text[at + "@jsx".len()..];
        let trimmed = rest.trim_start();
        if trimmed.len() == rest.len() {
            continue;
        }
        let name: &str = trimmed
            .split(char::is_whitespace)
            .next()
            .unwrap_or_default();
        if !name.is_empty() {
            return Some(name);
        }
    }
    None
}
