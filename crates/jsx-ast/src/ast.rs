//! AST types for JavaScript programs containing JSX.
//!
//! Only the node kinds that JSX lowering and import injection read or produce
//! are modelled, as closed enums per syntactic category. Every node that can
//! come from source text carries an optional span; nodes built by a transform
//! leave it empty.

use crate::span::Span;
use smol_str::SmolStr;

/// A complete program.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    /// The declared source form, `"module"` or `"script"`.
    pub source_type: SmolStr,
    /// Top-level statements.
    pub body: Vec<Stmt>,
    /// Comments attached to the file.
    #[cfg_attr(feature = "serde", serde(default))]
    pub comments: Vec<Comment>,
    /// The span of the entire program.
    pub span: Option<Span>,
}

impl Program {
    /// Creates an ES module program.
    pub fn module(body: Vec<Stmt>) -> Self {
        Self {
            source_type: SmolStr::new_static("module"),
            body,
            comments: Vec::new(),
            span: None,
        }
    }

    /// Creates a CommonJS script program.
    pub fn script(body: Vec<Stmt>) -> Self {
        Self {
            source_type: SmolStr::new_static("script"),
            body,
            comments: Vec::new(),
            span: None,
        }
    }

    /// Adds a comment to the program.
    pub fn with_comment(mut self, kind: CommentKind, text: impl Into<String>) -> Self {
        self.comments.push(Comment {
            kind,
            text: text.into(),
            span: None,
        });
        self
    }
}

/// A source comment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comment {
    /// Line or block comment.
    pub kind: CommentKind,
    /// The comment text without delimiters.
    pub text: String,
    /// The span of the comment.
    pub span: Option<Span>,
}

/// The kind of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommentKind {
    /// `// text`
    Line,
    /// `/* text */`
    Block,
}

// ============================================================================
// Statements
// ============================================================================

/// A statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    /// `import ... from "source";`
    Import(ImportDecl),
    /// An expression statement.
    Expr(ExprStmt),
    /// `var` / `let` / `const` declaration.
    Var(VarDecl),
    /// A function declaration.
    Fn(FnDecl),
    /// `return arg;`
    Return(ReturnStmt),
    /// `{ ... }`
    Block(BlockStmt),
    /// `if (test) cons else alt`
    If(IfStmt),
    /// `;`
    Empty(EmptyStmt),
    /// `export <declaration>`
    ExportDecl(ExportDecl),
    /// `export default <expr>;`
    ExportDefaultExpr(ExportDefaultExpr),
    /// `export default function () {}` or `export default class {}`
    ExportDefaultDecl(ExportDefaultDecl),
    /// `export { a as b };`, optionally re-exported from a source.
    ExportNamed(NamedExport),
    /// `export * from "source";`
    ExportAll(ExportAll),
    /// A class declaration.
    Class(ClassDecl),
    /// `for (init; test; update) body`
    For(ForStmt),
    /// `for (left in right) body`
    ForIn(ForInStmt),
    /// `for (left of right) body`
    ForOf(ForOfStmt),
    /// `while (test) body`
    While(WhileStmt),
    /// `do body while (test);`
    DoWhile(DoWhileStmt),
    /// `try {} catch (e) {} finally {}`
    Try(TryStmt),
    /// `switch (discriminant) { case test: ... }`
    Switch(SwitchStmt),
    /// `label: body`
    Labeled(LabeledStmt),
    /// `break label;`
    Break(BreakStmt),
    /// `continue label;`
    Continue(ContinueStmt),
    /// `throw arg;`
    Throw(ThrowStmt),
}

impl Default for Stmt {
    fn default() -> Self {
        Stmt::Empty(EmptyStmt { span: None })
    }
}

impl Stmt {
    /// Returns the ESTree node type name, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Stmt::Import(_) => "ImportDeclaration",
            Stmt::Expr(_) => "ExpressionStatement",
            Stmt::Var(_) => "VariableDeclaration",
            Stmt::Fn(_) => "FunctionDeclaration",
            Stmt::Return(_) => "ReturnStatement",
            Stmt::Block(_) => "BlockStatement",
            Stmt::If(_) => "IfStatement",
            Stmt::Empty(_) => "EmptyStatement",
            Stmt::ExportDecl(_) | Stmt::ExportNamed(_) => "ExportNamedDeclaration",
            Stmt::ExportDefaultExpr(_) | Stmt::ExportDefaultDecl(_) => "ExportDefaultDeclaration",
            Stmt::ExportAll(_) => "ExportAllDeclaration",
            Stmt::Class(_) => "ClassDeclaration",
            Stmt::For(_) => "ForStatement",
            Stmt::ForIn(_) => "ForInStatement",
            Stmt::ForOf(_) => "ForOfStatement",
            Stmt::While(_) => "WhileStatement",
            Stmt::DoWhile(_) => "DoWhileStatement",
            Stmt::Try(_) => "TryStatement",
            Stmt::Switch(_) => "SwitchStatement",
            Stmt::Labeled(_) => "LabeledStatement",
            Stmt::Break(_) => "BreakStatement",
            Stmt::Continue(_) => "ContinueStatement",
            Stmt::Throw(_) => "ThrowStatement",
        }
    }

    /// Creates an expression statement.
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr(ExprStmt {
            expr: Box::new(expr),
            span: None,
        })
    }

    /// Creates a single-declarator variable declaration.
    pub fn var(kind: VarKind, name: Ident, init: Option<Expr>) -> Self {
        Stmt::Var(VarDecl {
            kind,
            decls: vec![VarDeclarator {
                name: Pat::Ident(name),
                init: init.map(Box::new),
            }],
            span: None,
        })
    }

    /// Creates a `return` statement.
    pub fn return_(arg: Expr) -> Self {
        Stmt::Return(ReturnStmt {
            arg: Some(Box::new(arg)),
        })
    }

    /// Returns the import declaration if this statement is one.
    pub fn as_import(&self) -> Option<&ImportDecl> {
        match self {
            Stmt::Import(decl) => Some(decl),
            _ => None,
        }
    }
}

/// An import declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportDecl {
    /// The import specifiers, empty for a side-effect import.
    pub specifiers: Vec<ImportSpecifier>,
    /// The module source.
    pub source: Str,
    /// `import type ...` (TypeScript); never a value import.
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_only: bool,
    /// The span of the declaration.
    pub span: Option<Span>,
}

impl ImportDecl {
    /// Creates a bare `import "source";`.
    pub fn bare(source: impl Into<String>) -> Self {
        Self {
            specifiers: Vec::new(),
            source: Str::new(source),
            type_only: false,
            span: None,
        }
    }

    /// Returns true if this import brings values into scope.
    pub fn is_value_import(&self) -> bool {
        !self.type_only
    }
}

/// An import specifier.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ImportSpecifier {
    /// `{ imported as local }`
    Named(ImportNamedSpecifier),
    /// `local`
    Default(ImportDefaultSpecifier),
    /// `* as local`
    Namespace(ImportNamespaceSpecifier),
}

impl ImportSpecifier {
    /// Returns the local binding.
    pub fn local(&self) -> &Ident {
        match self {
            ImportSpecifier::Named(s) => &s.local,
            ImportSpecifier::Default(s) => &s.local,
            ImportSpecifier::Namespace(s) => &s.local,
        }
    }

    /// Returns the span, which is only present on hand-written specifiers.
    pub fn span(&self) -> Option<Span> {
        match self {
            ImportSpecifier::Named(s) => s.span,
            ImportSpecifier::Default(s) => s.span,
            ImportSpecifier::Namespace(s) => s.span,
        }
    }
}

/// `{ imported as local }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportNamedSpecifier {
    /// The local binding.
    pub local: Ident,
    /// The exported name.
    pub imported: Ident,
    /// The span of the specifier.
    pub span: Option<Span>,
}

/// `import local from "source"`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportDefaultSpecifier {
    /// The local binding.
    pub local: Ident,
    /// The span of the specifier.
    pub span: Option<Span>,
}

/// `import * as local from "source"`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ImportNamespaceSpecifier {
    /// The local binding.
    pub local: Ident,
    /// The span of the specifier.
    pub span: Option<Span>,
}

/// An expression statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprStmt {
    /// The expression.
    pub expr: Box<Expr>,
    /// The span of the statement.
    pub span: Option<Span>,
}

/// A variable declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDecl {
    /// `var`, `let` or `const`.
    pub kind: VarKind,
    /// The declarators.
    pub decls: Vec<VarDeclarator>,
    /// The span of the declaration.
    pub span: Option<Span>,
}

/// The kind of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VarKind {
    /// `var`
    Var,
    /// `let`
    Let,
    /// `const`
    Const,
}

impl VarKind {
    /// Returns the keyword.
    pub fn as_str(&self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

/// A single `name = init` declarator.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarDeclarator {
    /// The binding pattern.
    pub name: Pat,
    /// The initializer.
    pub init: Option<Box<Expr>>,
}

/// A function declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FnDecl {
    /// The function name.
    pub ident: Ident,
    /// Parameters and body.
    pub function: Function,
}

/// Function parameters and body, shared by declarations, expressions and
/// methods.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    /// The parameters.
    pub params: Vec<Pat>,
    /// The body.
    pub body: BlockStmt,
    /// `async function`
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_async: bool,
    /// `function*`
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_generator: bool,
}

impl Function {
    /// Creates a plain synchronous function.
    pub fn new(params: Vec<Pat>, stmts: Vec<Stmt>) -> Self {
        Self {
            params,
            body: BlockStmt { stmts },
            is_async: false,
            is_generator: false,
        }
    }
}

/// `return arg;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReturnStmt {
    /// The returned value.
    pub arg: Option<Box<Expr>>,
}

/// A block of statements.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BlockStmt {
    /// The statements.
    pub stmts: Vec<Stmt>,
}

/// `if (test) cons else alt`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IfStmt {
    /// The condition.
    pub test: Box<Expr>,
    /// The consequent.
    pub cons: Box<Stmt>,
    /// The alternate.
    pub alt: Option<Box<Stmt>>,
}

/// `;`
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EmptyStmt {
    /// The span of the statement.
    pub span: Option<Span>,
}

/// A declaration that can follow `export`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decl {
    /// `export const a = 1;`
    Var(VarDecl),
    /// `export function f() {}`
    Fn(FnDecl),
    /// `export class C {}`
    Class(ClassDecl),
}

/// `export <declaration>`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportDecl {
    /// The exported declaration.
    pub decl: Decl,
    /// The span of the statement.
    pub span: Option<Span>,
}

/// `export default <expr>;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportDefaultExpr {
    /// The exported value.
    pub expr: Box<Expr>,
    /// The span of the statement.
    pub span: Option<Span>,
}

/// A function or class after `export default`, possibly anonymous.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultDecl {
    /// `export default function name() {}`
    Fn(FnExpr),
    /// `export default class Name {}`
    Class(ClassExpr),
}

/// `export default function () {}` or `export default class {}`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportDefaultDecl {
    /// The exported declaration.
    pub decl: DefaultDecl,
    /// The span of the statement.
    pub span: Option<Span>,
}

/// `export { a, b as c } from "source";`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedExport {
    /// The specifiers.
    pub specifiers: Vec<ExportSpecifier>,
    /// The re-exported module, if any.
    pub source: Option<Str>,
    /// `export type { ... }` (TypeScript).
    #[cfg_attr(feature = "serde", serde(default))]
    pub type_only: bool,
    /// The span of the statement.
    pub span: Option<Span>,
}

/// `orig as exported`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportSpecifier {
    /// The local or re-exported name.
    pub orig: Ident,
    /// The exported name when it differs.
    pub exported: Option<Ident>,
}

/// `export * from "source";`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExportAll {
    /// The re-exported module.
    pub source: Str,
    /// The span of the statement.
    pub span: Option<Span>,
}

/// A class declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassDecl {
    /// The class name.
    pub ident: Ident,
    /// Heritage and body.
    pub class: Class,
}

/// Heritage and body, shared by class declarations and expressions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Class {
    /// `extends super_class`
    pub super_class: Option<Box<Expr>>,
    /// The members.
    pub body: Vec<ClassMember>,
}

/// A class member.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ClassMember {
    /// A method, getter or setter, including `constructor`.
    Method(ClassMethod),
    /// `key = value;`
    Prop(ClassProp),
    /// `static { ... }`
    StaticBlock(BlockStmt),
}

/// A class method.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassMethod {
    /// The method name.
    pub key: PropName,
    /// Method, getter or setter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: MethodKind,
    /// `static`
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_static: bool,
    /// Parameters and body.
    pub function: Function,
}

/// A class field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassProp {
    /// The field name.
    pub key: PropName,
    /// The initializer.
    pub value: Option<Box<Expr>>,
    /// `static`
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_static: bool,
}

/// How a method-like member is invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MethodKind {
    /// `name() {}`
    #[default]
    Method,
    /// `get name() {}`
    Getter,
    /// `set name(v) {}`
    Setter,
}

/// The initializer of a `for` statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForInit {
    /// `for (let i = 0; ...)`
    Var(VarDecl),
    /// `for (i = 0; ...)`
    Expr(Box<Expr>),
}

/// `for (init; test; update) body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForStmt {
    /// The initializer.
    pub init: Option<ForInit>,
    /// The condition.
    pub test: Option<Box<Expr>>,
    /// The update expression.
    pub update: Option<Box<Expr>>,
    /// The loop body.
    pub body: Box<Stmt>,
}

/// The left side of a `for-in` or `for-of` statement.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ForHead {
    /// `for (const item of ...)`
    Var(VarDecl),
    /// `for (item of ...)`
    Pat(Pat),
}

/// `for (left in right) body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForInStmt {
    /// The binding.
    pub left: ForHead,
    /// The iterated object.
    pub right: Box<Expr>,
    /// The loop body.
    pub body: Box<Stmt>,
}

/// `for (left of right) body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForOfStmt {
    /// `for await`
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_await: bool,
    /// The binding.
    pub left: ForHead,
    /// The iterable.
    pub right: Box<Expr>,
    /// The loop body.
    pub body: Box<Stmt>,
}

/// `while (test) body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WhileStmt {
    /// The condition.
    pub test: Box<Expr>,
    /// The loop body.
    pub body: Box<Stmt>,
}

/// `do body while (test);`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DoWhileStmt {
    /// The loop body.
    pub body: Box<Stmt>,
    /// The condition.
    pub test: Box<Expr>,
}

/// `try block catch (param) handler finally finalizer`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TryStmt {
    /// The protected block.
    pub block: BlockStmt,
    /// The `catch` clause.
    pub handler: Option<CatchClause>,
    /// The `finally` block.
    pub finalizer: Option<BlockStmt>,
}

/// `catch (param) { ... }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CatchClause {
    /// The caught value binding; absent for `catch {}`.
    pub param: Option<Pat>,
    /// The handler body.
    pub body: BlockStmt,
}

/// `switch (discriminant) { ... }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchStmt {
    /// The switched value.
    pub discriminant: Box<Expr>,
    /// The cases, in source order.
    pub cases: Vec<SwitchCase>,
}

/// `case test: cons` or `default: cons`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwitchCase {
    /// The case value; absent for `default`.
    pub test: Option<Box<Expr>>,
    /// The statements of the case.
    pub cons: Vec<Stmt>,
}

/// `label: body`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LabeledStmt {
    /// The label.
    pub label: Ident,
    /// The labeled statement.
    pub body: Box<Stmt>,
}

/// `break label;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakStmt {
    /// The target label.
    pub label: Option<Ident>,
}

/// `continue label;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContinueStmt {
    /// The target label.
    pub label: Option<Ident>,
}

/// `throw arg;`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThrowStmt {
    /// The thrown value.
    pub arg: Box<Expr>,
}

// ============================================================================
// Patterns
// ============================================================================

/// A binding pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pat {
    /// `a`
    Ident(Ident),
    /// `[a, , b]`
    Array(ArrayPat),
    /// `{ a, b: c }`
    Object(ObjectPat),
    /// `a = default`
    Assign(AssignPat),
    /// `...rest`
    Rest(RestPat),
}

/// `[a, , b]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayPat {
    /// The elements, `None` for holes.
    pub elems: Vec<Option<Pat>>,
}

/// `{ a, b: c, ...rest }`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectPat {
    /// The properties.
    pub props: Vec<ObjectPatProp>,
}

/// A property of an object pattern.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObjectPatProp {
    /// `key: pattern`
    KeyValue(KeyValuePatProp),
    /// `key` or `key = default`
    Shorthand(ShorthandPatProp),
    /// `...rest`
    Rest(RestPat),
}

/// `key: pattern`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValuePatProp {
    /// The property key.
    pub key: PropName,
    /// The bound pattern.
    pub value: Box<Pat>,
}

/// `key` or `key = default`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShorthandPatProp {
    /// The key, which is also the binding.
    pub key: Ident,
    /// The default value.
    pub value: Option<Box<Expr>>,
}

/// `left = right`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignPat {
    /// The binding.
    pub left: Box<Pat>,
    /// The default value.
    pub right: Box<Expr>,
}

/// `...arg`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestPat {
    /// The rest binding.
    pub arg: Box<Pat>,
}

// ============================================================================
// Expressions
// ============================================================================

/// An expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    /// An identifier reference.
    Ident(Ident),
    /// A string literal.
    Str(Str),
    /// A numeric literal.
    Num(Number),
    /// A boolean literal.
    Bool(Bool),
    /// `null`
    Null(Null),
    /// A template literal.
    Tpl(Tpl),
    /// `this`
    This(ThisExpr),
    /// `[a, b]`
    Array(ArrayLit),
    /// `{ a: b }`
    Object(ObjectLit),
    /// `function () {}`
    Fn(FnExpr),
    /// `() => {}`
    Arrow(ArrowExpr),
    /// `!a`, `void 0`
    Unary(UnaryExpr),
    /// `a + b`
    Bin(BinExpr),
    /// `a = b`
    Assign(AssignExpr),
    /// `a.b`, `a[b]`
    Member(MemberExpr),
    /// `a ? b : c`
    Cond(CondExpr),
    /// `f(a)`
    Call(CallExpr),
    /// `(a, b)`
    Seq(SeqExpr),
    /// `new C(args)`
    New(NewExpr),
    /// `await arg`
    Await(AwaitExpr),
    /// `yield arg`
    Yield(YieldExpr),
    /// `++a`, `a--`
    Update(UpdateExpr),
    /// `a?.b`, `a?.[b]`
    OptMember(MemberExpr),
    /// `f?.(a)`
    OptCall(CallExpr),
    /// ``tag`text` ``
    TaggedTpl(TaggedTpl),
    /// `class {}`
    Class(ClassExpr),
    /// `/exp/flags`
    Regex(Regex),
    /// `<div />`
    JsxElement(Box<JsxElement>),
    /// `<></>`
    JsxFragment(Box<JsxFragment>),
}

impl Expr {
    /// Creates an identifier reference.
    pub fn ident(sym: impl Into<SmolStr>) -> Self {
        Expr::Ident(Ident::new(sym))
    }

    /// Creates a string literal.
    pub fn str(value: impl Into<String>) -> Self {
        Expr::Str(Str::new(value))
    }

    /// Creates a numeric literal.
    pub fn num(value: f64) -> Self {
        Expr::Num(Number { value, span: None })
    }

    /// Creates a boolean literal.
    pub fn bool(value: bool) -> Self {
        Expr::Bool(Bool { value, span: None })
    }

    /// Creates `null`.
    pub fn null() -> Self {
        Expr::Null(Null { span: None })
    }

    /// Creates `void 0`.
    pub fn void0() -> Self {
        Expr::Unary(UnaryExpr {
            op: UnaryOp::Void,
            arg: Box::new(Expr::num(0.0)),
        })
    }

    /// Creates a call expression without a span.
    pub fn call(callee: Expr, args: Vec<Expr>) -> Self {
        Expr::Call(CallExpr {
            callee: Box::new(callee),
            args: args.into_iter().map(ExprOrSpread::expr).collect(),
            span: None,
        })
    }

    /// Creates `obj.prop`.
    pub fn member(obj: Expr, prop: impl Into<SmolStr>) -> Self {
        Expr::Member(MemberExpr {
            obj: Box::new(obj),
            prop: MemberProp::Ident(Ident::new(prop)),
        })
    }

    /// Creates an array literal without holes.
    pub fn array(elems: Vec<Expr>) -> Self {
        Expr::Array(ArrayLit {
            elems: elems
                .into_iter()
                .map(|expr| Some(ExprOrSpread::expr(expr)))
                .collect(),
        })
    }

    /// Creates an object literal.
    pub fn object(props: Vec<PropOrSpread>) -> Self {
        Expr::Object(ObjectLit { props })
    }

    /// Creates an arrow function with an expression body.
    pub fn arrow(params: Vec<Ident>, body: Expr) -> Self {
        Expr::Arrow(ArrowExpr {
            params: params.into_iter().map(Pat::Ident).collect(),
            body: ArrowBody::Expr(Box::new(body)),
            is_async: false,
        })
    }

    /// Creates `test ? cons : alt`.
    pub fn cond(test: Expr, cons: Expr, alt: Expr) -> Self {
        Expr::Cond(CondExpr {
            test: Box::new(test),
            cons: Box::new(cons),
            alt: Box::new(alt),
        })
    }

    /// Creates `left = right`.
    pub fn assign(left: Expr, right: Expr) -> Self {
        Expr::Assign(AssignExpr {
            op: AssignOp::Assign,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Creates a binary expression.
    pub fn bin(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Bin(BinExpr {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Creates a JSX element expression.
    pub fn jsx(element: JsxElement) -> Self {
        Expr::JsxElement(Box::new(element))
    }

    /// Returns the identifier if this is one.
    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Expr::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Returns the string literal if this is one.
    pub fn as_str(&self) -> Option<&Str> {
        match self {
            Expr::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns true for literal nodes (including template literals).
    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            Expr::Str(_)
                | Expr::Num(_)
                | Expr::Bool(_)
                | Expr::Null(_)
                | Expr::Tpl(_)
                | Expr::Regex(_)
        )
    }

    /// Returns a short name for the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Ident(_) => "Identifier",
            Expr::Str(_) => "StringLiteral",
            Expr::Num(_) => "NumericLiteral",
            Expr::Bool(_) => "BooleanLiteral",
            Expr::Null(_) => "NullLiteral",
            Expr::Tpl(_) => "TemplateLiteral",
            Expr::This(_) => "ThisExpression",
            Expr::Array(_) => "ArrayExpression",
            Expr::Object(_) => "ObjectExpression",
            Expr::Fn(_) => "FunctionExpression",
            Expr::Arrow(_) => "ArrowFunctionExpression",
            Expr::Unary(_) => "UnaryExpression",
            Expr::Bin(_) => "BinaryExpression",
            Expr::Assign(_) => "AssignmentExpression",
            Expr::Member(_) => "MemberExpression",
            Expr::Cond(_) => "ConditionalExpression",
            Expr::Call(_) => "CallExpression",
            Expr::Seq(_) => "SequenceExpression",
            Expr::New(_) => "NewExpression",
            Expr::Await(_) => "AwaitExpression",
            Expr::Yield(_) => "YieldExpression",
            Expr::Update(_) => "UpdateExpression",
            Expr::OptMember(_) => "OptionalMemberExpression",
            Expr::OptCall(_) => "OptionalCallExpression",
            Expr::TaggedTpl(_) => "TaggedTemplateExpression",
            Expr::Class(_) => "ClassExpression",
            Expr::Regex(_) => "RegExpLiteral",
            Expr::JsxElement(_) => "JSXElement",
            Expr::JsxFragment(_) => "JSXFragment",
        }
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

/// An identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ident {
    /// The name.
    pub sym: SmolStr,
    /// The span of the identifier.
    pub span: Option<Span>,
}

impl Ident {
    /// Creates an identifier without a span.
    pub fn new(sym: impl Into<SmolStr>) -> Self {
        Self {
            sym: sym.into(),
            span: None,
        }
    }
}

/// A string literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Str {
    /// The cooked value.
    pub value: String,
    /// The span of the literal.
    pub span: Option<Span>,
}

impl Str {
    /// Creates a string literal without a span.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: None,
        }
    }
}

/// A numeric literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Number {
    /// The value.
    pub value: f64,
    /// The span of the literal.
    pub span: Option<Span>,
}

/// A boolean literal.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bool {
    /// The value.
    pub value: bool,
    /// The span of the literal.
    pub span: Option<Span>,
}

/// `null`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Null {
    /// The span of the literal.
    pub span: Option<Span>,
}

/// `this`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThisExpr {
    /// The span of the expression.
    pub span: Option<Span>,
}

/// A template literal: `quasis[0] ${exprs[0]} quasis[1] ...`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tpl {
    /// The raw string parts, one more than `exprs`.
    pub quasis: Vec<String>,
    /// The interpolated expressions.
    pub exprs: Vec<Expr>,
}

/// An array literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayLit {
    /// The elements, `None` for holes.
    pub elems: Vec<Option<ExprOrSpread>>,
}

/// An expression, optionally spread.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExprOrSpread {
    /// Whether this is `...expr`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub spread: bool,
    /// The expression.
    pub expr: Box<Expr>,
}

impl ExprOrSpread {
    /// Wraps a plain expression.
    pub fn expr(expr: Expr) -> Self {
        Self {
            spread: false,
            expr: Box::new(expr),
        }
    }

    /// Wraps a spread expression.
    pub fn spread(expr: Expr) -> Self {
        Self {
            spread: true,
            expr: Box::new(expr),
        }
    }
}

/// An object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectLit {
    /// The properties.
    pub props: Vec<PropOrSpread>,
}

/// A property of an object literal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropOrSpread {
    /// `key: value`
    KeyValue(KeyValueProp),
    /// `key`
    Shorthand(Ident),
    /// `...expr`
    Spread(SpreadElement),
    /// `key() {}`, `get key() {}`, `set key(v) {}`
    Method(MethodProp),
}

impl PropOrSpread {
    /// Creates `key: value`.
    pub fn key_value(key: PropName, value: Expr) -> Self {
        PropOrSpread::KeyValue(KeyValueProp {
            key,
            value: Box::new(value),
        })
    }

    /// Creates `...expr`.
    pub fn spread(expr: Expr) -> Self {
        PropOrSpread::Spread(SpreadElement {
            expr: Box::new(expr),
        })
    }
}

/// `key: value`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyValueProp {
    /// The key.
    pub key: PropName,
    /// The value.
    pub value: Box<Expr>,
}

/// An object literal method, getter or setter.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodProp {
    /// The key.
    pub key: PropName,
    /// Method, getter or setter.
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: MethodKind,
    /// Parameters and body.
    pub function: Function,
}

/// `...expr`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpreadElement {
    /// The spread argument.
    pub expr: Box<Expr>,
}

/// A property key.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PropName {
    /// `key`
    Ident(Ident),
    /// `"key"`
    Str(Str),
    /// `1`
    Num(Number),
    /// `[expr]`
    Computed(ComputedPropName),
}

impl PropName {
    /// Creates an identifier key.
    pub fn ident(sym: impl Into<SmolStr>) -> Self {
        PropName::Ident(Ident::new(sym))
    }

    /// Creates a string key.
    pub fn str(value: impl Into<String>) -> Self {
        PropName::Str(Str::new(value))
    }

    /// Creates a computed key.
    pub fn computed(expr: Expr) -> Self {
        PropName::Computed(ComputedPropName {
            expr: Box::new(expr),
        })
    }
}

/// `[expr]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComputedPropName {
    /// The key expression.
    pub expr: Box<Expr>,
}

/// A function expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FnExpr {
    /// The optional name.
    pub ident: Option<Ident>,
    /// Parameters and body.
    pub function: Function,
}

/// An arrow function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrowExpr {
    /// The parameters.
    pub params: Vec<Pat>,
    /// The body.
    pub body: ArrowBody,
    /// `async () => {}`
    #[cfg_attr(feature = "serde", serde(default))]
    pub is_async: bool,
}

/// A class expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClassExpr {
    /// The optional name, bound inside the class body only.
    pub ident: Option<Ident>,
    /// Heritage and body.
    pub class: Class,
}

/// The body of an arrow function.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArrowBody {
    /// `=> expr`
    Expr(Box<Expr>),
    /// `=> { ... }`
    Block(BlockStmt),
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    /// `void`
    Void,
    /// `typeof`
    TypeOf,
    /// `!`
    Not,
    /// `-`
    Minus,
    /// `+`
    Plus,
    /// `~`
    BitNot,
    /// `delete`
    Delete,
}

impl UnaryOp {
    /// Returns the operator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Void => "void",
            UnaryOp::TypeOf => "typeof",
            UnaryOp::Not => "!",
            UnaryOp::Minus => "-",
            UnaryOp::Plus => "+",
            UnaryOp::BitNot => "~",
            UnaryOp::Delete => "delete",
        }
    }
}

/// A unary expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnaryExpr {
    /// The operator.
    pub op: UnaryOp,
    /// The operand.
    pub arg: Box<Expr>,
}

/// A binary or logical operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// `**`
    Exp,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `===`
    EqEqEq,
    /// `!==`
    NotEqEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `<<`
    LShift,
    /// `>>`
    RShift,
    /// `>>>`
    ZeroFillRShift,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `^`
    BitXor,
    /// `instanceof`
    InstanceOf,
    /// `in`
    In,
    /// `&&`
    LogicalAnd,
    /// `||`
    LogicalOr,
    /// `??`
    NullishCoalescing,
}

impl BinaryOp {
    /// Returns the operator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Exp => "**",
            BinaryOp::EqEq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::EqEqEq => "===",
            BinaryOp::NotEqEq => "!==",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::LtEq => "<=",
            BinaryOp::GtEq => ">=",
            BinaryOp::LShift => "<<",
            BinaryOp::RShift => ">>",
            BinaryOp::ZeroFillRShift => ">>>",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitOr => "|",
            BinaryOp::BitXor => "^",
            BinaryOp::InstanceOf => "instanceof",
            BinaryOp::In => "in",
            BinaryOp::LogicalAnd => "&&",
            BinaryOp::LogicalOr => "||",
            BinaryOp::NullishCoalescing => "??",
        }
    }

    /// Returns the binding power; higher binds tighter.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::NullishCoalescing | BinaryOp::LogicalOr => 4,
            BinaryOp::LogicalAnd => 5,
            BinaryOp::BitOr => 6,
            BinaryOp::BitXor => 7,
            BinaryOp::BitAnd => 8,
            BinaryOp::EqEq | BinaryOp::NotEq | BinaryOp::EqEqEq | BinaryOp::NotEqEq => 9,
            BinaryOp::Lt
            | BinaryOp::Gt
            | BinaryOp::LtEq
            | BinaryOp::GtEq
            | BinaryOp::InstanceOf
            | BinaryOp::In => 10,
            BinaryOp::LShift | BinaryOp::RShift | BinaryOp::ZeroFillRShift => 11,
            BinaryOp::Add | BinaryOp::Sub => 12,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 13,
            BinaryOp::Exp => 14,
        }
    }
}

/// A binary expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinExpr {
    /// The operator.
    pub op: BinaryOp,
    /// The left operand.
    pub left: Box<Expr>,
    /// The right operand.
    pub right: Box<Expr>,
}

/// An assignment operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignOp {
    /// `=`
    #[default]
    Assign,
    /// `+=`
    AddAssign,
    /// `-=`
    SubAssign,
    /// `*=`
    MulAssign,
    /// `/=`
    DivAssign,
    /// `%=`
    ModAssign,
    /// `&&=`
    AndAssign,
    /// `||=`
    OrAssign,
    /// `??=`
    NullishAssign,
}

impl AssignOp {
    /// Returns the operator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignOp::Assign => "=",
            AssignOp::AddAssign => "+=",
            AssignOp::SubAssign => "-=",
            AssignOp::MulAssign => "*=",
            AssignOp::DivAssign => "/=",
            AssignOp::ModAssign => "%=",
            AssignOp::AndAssign => "&&=",
            AssignOp::OrAssign => "||=",
            AssignOp::NullishAssign => "??=",
        }
    }
}

/// `left = right`, `left += right`, ...
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignExpr {
    /// The operator.
    #[cfg_attr(feature = "serde", serde(default))]
    pub op: AssignOp,
    /// The assignment target.
    pub left: Box<Expr>,
    /// The assigned value.
    pub right: Box<Expr>,
}

/// `obj.prop` or `obj[expr]`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MemberExpr {
    /// The object.
    pub obj: Box<Expr>,
    /// The property.
    pub prop: MemberProp,
}

/// The property of a member expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberProp {
    /// `.prop`
    Ident(Ident),
    /// `[expr]`
    Computed(ComputedPropName),
}

/// `test ? cons : alt`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CondExpr {
    /// The condition.
    pub test: Box<Expr>,
    /// The consequent.
    pub cons: Box<Expr>,
    /// The alternate.
    pub alt: Box<Expr>,
}

/// A call expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallExpr {
    /// The callee.
    pub callee: Box<Expr>,
    /// The arguments.
    pub args: Vec<ExprOrSpread>,
    /// The span of the call; absent on generated calls.
    pub span: Option<Span>,
}

/// `(a, b)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SeqExpr {
    /// The expressions.
    pub exprs: Vec<Expr>,
}

/// `new callee(args)`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NewExpr {
    /// The constructor.
    pub callee: Box<Expr>,
    /// The arguments.
    pub args: Vec<ExprOrSpread>,
    /// The span of the expression.
    pub span: Option<Span>,
}

/// `await arg`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AwaitExpr {
    /// The awaited value.
    pub arg: Box<Expr>,
}

/// `yield arg` or `yield* arg`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YieldExpr {
    /// The yielded value.
    pub arg: Option<Box<Expr>>,
    /// `yield*`
    #[cfg_attr(feature = "serde", serde(default))]
    pub delegate: bool,
}

/// `++` or `--`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UpdateOp {
    /// `++`
    Increment,
    /// `--`
    Decrement,
}

impl UpdateOp {
    /// Returns the operator text.
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateOp::Increment => "++",
            UpdateOp::Decrement => "--",
        }
    }
}

/// `++arg` or `arg--`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UpdateExpr {
    /// The operator.
    pub op: UpdateOp,
    /// Whether the operator comes first.
    #[cfg_attr(feature = "serde", serde(default))]
    pub prefix: bool,
    /// The updated target.
    pub arg: Box<Expr>,
}

/// ``tag`quasi ${expr}` ``
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaggedTpl {
    /// The tag function.
    pub tag: Box<Expr>,
    /// The template.
    pub tpl: Tpl,
}

/// `/exp/flags`
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Regex {
    /// The pattern source.
    pub exp: String,
    /// The flags.
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: String,
}

// ============================================================================
// JSX
// ============================================================================

/// A JSX element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxElement {
    /// The opening tag.
    pub opening: JsxOpeningElement,
    /// The children.
    pub children: Vec<JsxChild>,
    /// The span of the element.
    pub span: Option<Span>,
}

impl JsxElement {
    /// Creates an element with the given tag name, attributes and children.
    pub fn new(name: JsxElementName, attrs: Vec<JsxAttrOrSpread>, children: Vec<JsxChild>) -> Self {
        let self_closing = children.is_empty();
        Self {
            opening: JsxOpeningElement {
                name,
                attrs,
                self_closing,
                span: None,
            },
            children,
            span: None,
        }
    }
}

/// The opening tag of a JSX element.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxOpeningElement {
    /// The tag name.
    pub name: JsxElementName,
    /// The attributes.
    pub attrs: Vec<JsxAttrOrSpread>,
    /// Whether the tag is self-closing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub self_closing: bool,
    /// The span of the opening tag.
    pub span: Option<Span>,
}

/// A JSX tag name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxElementName {
    /// `<div>`, `<Comp>`
    Ident(Ident),
    /// `<a.b.c>`
    Member(JsxMemberExpr),
    /// `<svg:rect>`
    Namespaced(JsxNamespacedName),
}

impl JsxElementName {
    /// Creates an identifier tag name.
    pub fn ident(sym: impl Into<SmolStr>) -> Self {
        JsxElementName::Ident(Ident::new(sym))
    }
}

/// `<obj.prop>`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxMemberExpr {
    /// The object.
    pub obj: JsxObject,
    /// The property.
    pub prop: Ident,
}

/// The object of a JSX member tag name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxObject {
    /// `a` in `<a.b>`
    Ident(Ident),
    /// `a.b` in `<a.b.c>`
    Member(Box<JsxMemberExpr>),
}

/// `ns:name`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxNamespacedName {
    /// The namespace.
    pub ns: Ident,
    /// The local name.
    pub name: Ident,
}

/// An attribute or spread attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxAttrOrSpread {
    /// `name=value`
    Attr(JsxAttr),
    /// `{...expr}`
    Spread(SpreadElement),
}

impl JsxAttrOrSpread {
    /// Creates `name="value"`.
    pub fn str(name: impl Into<SmolStr>, value: impl Into<String>) -> Self {
        JsxAttrOrSpread::Attr(JsxAttr {
            name: JsxAttrName::Ident(Ident::new(name)),
            value: Some(JsxAttrValue::Str(Str::new(value))),
            span: None,
        })
    }

    /// Creates `name={expr}`.
    pub fn expr(name: impl Into<SmolStr>, expr: Expr) -> Self {
        JsxAttrOrSpread::Attr(JsxAttr {
            name: JsxAttrName::Ident(Ident::new(name)),
            value: Some(JsxAttrValue::ExprContainer(JsxExprContainer::new(expr))),
            span: None,
        })
    }

    /// Creates a value-less `name`.
    pub fn boolean(name: impl Into<SmolStr>) -> Self {
        JsxAttrOrSpread::Attr(JsxAttr {
            name: JsxAttrName::Ident(Ident::new(name)),
            value: None,
            span: None,
        })
    }

    /// Creates `ns:name={expr}`.
    pub fn namespaced(ns: impl Into<SmolStr>, name: impl Into<SmolStr>, expr: Expr) -> Self {
        JsxAttrOrSpread::Attr(JsxAttr {
            name: JsxAttrName::Namespaced(JsxNamespacedName {
                ns: Ident::new(ns),
                name: Ident::new(name),
            }),
            value: Some(JsxAttrValue::ExprContainer(JsxExprContainer::new(expr))),
            span: None,
        })
    }

    /// Creates `{...expr}`.
    pub fn spread(expr: Expr) -> Self {
        JsxAttrOrSpread::Spread(SpreadElement {
            expr: Box::new(expr),
        })
    }
}

/// A JSX attribute.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxAttr {
    /// The attribute name.
    pub name: JsxAttrName,
    /// The value, absent for `<input disabled />`.
    pub value: Option<JsxAttrValue>,
    /// The span of the attribute.
    pub span: Option<Span>,
}

/// A JSX attribute name.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxAttrName {
    /// `name`
    Ident(Ident),
    /// `ns:name`
    Namespaced(JsxNamespacedName),
}

impl JsxAttrName {
    /// Returns the full attribute name, `ns:name` for namespaced names.
    pub fn full_name(&self) -> SmolStr {
        match self {
            JsxAttrName::Ident(ident) => ident.sym.clone(),
            JsxAttrName::Namespaced(name) => {
                SmolStr::from(format!("{}:{}", name.ns.sym, name.name.sym))
            }
        }
    }
}

/// A JSX attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxAttrValue {
    /// `"text"`
    Str(Str),
    /// `{expr}`
    ExprContainer(JsxExprContainer),
    /// `<div />`
    Element(Box<JsxElement>),
    /// `<></>`
    Fragment(Box<JsxFragment>),
}

/// `{expr}`; an absent expression is the empty `{/* comment */}` form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxExprContainer {
    /// The contained expression.
    pub expr: Option<Box<Expr>>,
    /// The span of the container.
    pub span: Option<Span>,
}

impl JsxExprContainer {
    /// Creates a container around an expression.
    pub fn new(expr: Expr) -> Self {
        Self {
            expr: Some(Box::new(expr)),
            span: None,
        }
    }
}

/// A child of a JSX element or fragment.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JsxChild {
    /// Raw text.
    Text(JsxText),
    /// `{expr}`
    ExprContainer(JsxExprContainer),
    /// `{...expr}`
    Spread(JsxSpreadChild),
    /// A nested element.
    Element(Box<JsxElement>),
    /// A nested fragment.
    Fragment(Box<JsxFragment>),
    /// An expression a host already put in place of a child node.
    Expr(Box<Expr>),
}

impl JsxChild {
    /// Creates a text child.
    pub fn text(value: impl Into<String>) -> Self {
        JsxChild::Text(JsxText {
            value: value.into(),
            span: None,
        })
    }

    /// Creates an `{expr}` child.
    pub fn expr(expr: Expr) -> Self {
        JsxChild::ExprContainer(JsxExprContainer::new(expr))
    }

    /// Creates a nested element child.
    pub fn element(element: JsxElement) -> Self {
        JsxChild::Element(Box::new(element))
    }
}

/// JSX text.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxText {
    /// The raw text.
    pub value: String,
    /// The span of the text.
    pub span: Option<Span>,
}

/// `{...expr}` as a child.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxSpreadChild {
    /// The spread argument.
    pub expr: Box<Expr>,
    /// The span of the child.
    pub span: Option<Span>,
}

/// `<>children</>`
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JsxFragment {
    /// The children.
    pub children: Vec<JsxChild>,
    /// The span of the fragment.
    pub span: Option<Span>,
}
