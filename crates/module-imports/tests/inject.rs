//! Injection tests across module forms and interop options.

use jsx_ast::*;
use module_imports::*;
use pretty_assertions::assert_eq;

struct Fixture {
    program: Program,
    uids: UidGenerator,
    hub: RecordingHub,
}

impl Fixture {
    fn new(program: Program) -> Self {
        let uids = UidGenerator::from_program(&program);
        Self {
            program,
            uids,
            hub: RecordingHub::new(),
        }
    }

    fn module() -> Self {
        Self::new(Program::module(Vec::new()))
    }

    fn script() -> Self {
        Self::new(Program::script(Vec::new()))
    }

    fn injector(&mut self) -> ImportInjector<'_> {
        ImportInjector::new(&mut self.program, &mut self.uids, &mut self.hub)
    }

    fn output(&self) -> String {
        print_program(&self.program)
    }
}

fn user_import(names: &[&str], source: &str) -> Stmt {
    Stmt::Import(ImportDecl {
        specifiers: names
            .iter()
            .map(|name| {
                ImportSpecifier::Named(ImportNamedSpecifier {
                    local: Ident::new(*name),
                    imported: Ident::new(*name),
                    span: Some(Span::new(0u32, 1u32)),
                })
            })
            .collect(),
        source: Str::new(source),
        type_only: false,
        span: Some(Span::new(0u32, 20u32)),
    })
}

fn call_stmt(callee: &str) -> Stmt {
    Stmt::expr(Expr::call(Expr::ident(callee), Vec::new()))
}

#[test]
fn test_module_named_import() {
    let mut f = Fixture::module();
    let local = f
        .injector()
        .add_named("createVNode", "vue", &ImportOptions::live())
        .unwrap();
    assert_eq!(print_expr(&local), "_createVNode");
    assert_eq!(
        f.output(),
        "import { createVNode as _createVNode } from \"vue\";\n"
    );
}

#[test]
fn test_module_namespace_and_default() {
    let mut f = Fixture::module();
    let ns = f.injector().add_namespace("lib", &ImportOptions::default()).unwrap();
    let def = f.injector().add_default("other", &ImportOptions::default()).unwrap();
    assert_eq!(print_expr(&ns), "_lib");
    assert_eq!(print_expr(&def), "_default");
    assert_eq!(
        f.output(),
        "import _default from \"other\";\nimport * as _lib from \"lib\";\n"
    );
}

#[test]
fn test_default_with_name_hint() {
    let mut f = Fixture::module();
    let opts = ImportOptions::default().with_name_hint("_transformOn");
    let local = f
        .injector()
        .add_default("@vue/babel-helper-vue-transform-on", &opts)
        .unwrap();
    assert_eq!(print_expr(&local), "_transformOn");
    assert_eq!(
        f.output(),
        "import _transformOn from \"@vue/babel-helper-vue-transform-on\";\n"
    );
}

#[test]
fn test_script_namespace_uses_wildcard_interop() {
    let mut f = Fixture::script();
    let ns = f.injector().add_namespace("vue", &ImportOptions::live()).unwrap();
    assert_eq!(print_expr(&ns), "_vue");
    assert_eq!(
        f.output(),
        "var _vue = _interopRequireWildcard(require(\"vue\"));\n"
    );
    assert_eq!(f.hub.requested().collect::<Vec<_>>(), vec!["interopRequireWildcard"]);
}

#[test]
fn test_script_named_snapshot_and_live() {
    let mut f = Fixture::script();
    let snapshot = f
        .injector()
        .add_named("h", "vue", &ImportOptions::default())
        .unwrap();
    assert_eq!(print_expr(&snapshot), "_h");

    let opts = ImportOptions {
        ensure_no_context: true,
        ..ImportOptions::live()
    };
    let live = f.injector().add_named("h", "vue", &opts).unwrap();
    assert_eq!(print_expr(&Expr::call(live, Vec::new())), "(0, _vue.h)()");

    assert_eq!(
        f.output(),
        "var _vue = require(\"vue\");\nvar _h = require(\"vue\").h;\n"
    );
}

#[test]
fn test_script_default_interop() {
    let mut f = Fixture::script();
    let opts = ImportOptions::default().with_name_hint("lib");
    let local = f.injector().add_default("lib", &opts).unwrap();
    assert_eq!(print_expr(&local), "_lib");
    assert_eq!(
        f.output(),
        "var _lib = _interopRequireDefault(require(\"lib\")).default;\n"
    );
}

#[test]
fn test_script_live_default() {
    let mut f = Fixture::script();
    let local = f.injector().add_default("lib", &ImportOptions::live()).unwrap();
    assert_eq!(print_expr(&local), "_lib.default");
    assert_eq!(
        f.output(),
        "var _lib = _interopRequireDefault(require(\"lib\"));\n"
    );
}

#[test]
fn test_compiled_script_named() {
    let mut f = Fixture::script();
    let opts = ImportOptions {
        imported_interop: ImportedInterop::Compiled,
        ..ImportOptions::default()
    };
    let local = f.injector().add_named("foo", "lib", &opts).unwrap();
    assert_eq!(print_expr(&local), "_foo");
    assert_eq!(f.output(), "var _foo = require(\"lib\").foo;\n");
}

#[test]
fn test_uncompiled_module_named_reads_default() {
    let mut f = Fixture::module();
    let opts = ImportOptions {
        imported_interop: ImportedInterop::Uncompiled,
        ..ImportOptions::default()
    };
    let local = f.injector().add_named("foo", "lib", &opts).unwrap();
    assert_eq!(print_expr(&local), "_lib.foo");
    assert_eq!(f.output(), "import _lib from \"lib\";\n");
}

#[test]
fn test_node_interop_named() {
    let mut f = Fixture::module();
    let opts = ImportOptions {
        importing_interop: ImportingInterop::Node,
        ..ImportOptions::default()
    };
    let local = f.injector().add_named("foo", "lib", &opts).unwrap();
    assert_eq!(print_expr(&local), "_lib$es6Default.foo");
    assert_eq!(f.output(), "import _lib$es6Default from \"lib\";\n");
}

#[test]
fn test_side_effect_imports() {
    let mut f = Fixture::module();
    f.injector()
        .add_side_effect("polyfill", &ImportOptions::default())
        .unwrap();
    assert_eq!(f.output(), "import \"polyfill\";\n");

    let mut f = Fixture::script();
    f.injector()
        .add_side_effect("polyfill", &ImportOptions::default())
        .unwrap();
    assert_eq!(f.output(), "require(\"polyfill\");\n");
}

#[test]
fn test_configuration_errors() {
    let mut f = Fixture::script();
    let es6 = ImportOptions {
        imported_type: ImportedType::Es6,
        ..ImportOptions::default()
    };
    assert_eq!(
        f.injector().add_named("h", "vue", &es6),
        Err(ImportError::Es6FromCommonJs)
    );

    let after = ImportOptions {
        import_position: ImportPosition::After,
        ..ImportOptions::default()
    };
    assert_eq!(
        f.injector().add_named("h", "vue", &after),
        Err(ImportError::AfterInScript)
    );

    let mut f = Fixture::module();
    let live_uncompiled = ImportOptions {
        imported_interop: ImportedInterop::Uncompiled,
        ..ImportOptions::live()
    };
    assert_eq!(
        f.injector().add_default("lib", &live_uncompiled),
        Err(ImportError::LiveCommonJsDefault)
    );

    let mut program = Program::module(Vec::new());
    program.source_type = "unambiguous".into();
    let mut f = Fixture::new(program);
    assert!(matches!(
        f.injector().add_named("h", "vue", &ImportOptions::default()),
        Err(ImportError::UnknownSourceType { .. })
    ));
}

#[test]
fn test_before_merges_into_first_import_of_same_source() {
    let mut f = Fixture::new(Program::module(vec![
        user_import(&["ref"], "vue"),
        call_stmt("setup"),
    ]));
    f.injector()
        .add_named("h", "vue", &ImportOptions::live())
        .unwrap();
    assert_eq!(
        f.output(),
        "import { ref, h as _h } from \"vue\";\nsetup();\n"
    );
}

#[test]
fn test_before_other_source_goes_to_top() {
    let mut f = Fixture::new(Program::module(vec![
        user_import(&["a"], "a"),
        user_import(&["ref"], "vue"),
    ]));
    f.injector()
        .add_named("h", "vue", &ImportOptions::live())
        .unwrap();
    assert_eq!(
        f.output(),
        "import { h as _h } from \"vue\";\nimport { a } from \"a\";\nimport { ref } from \"vue\";\n"
    );
}

#[test]
fn test_after_inserts_behind_last_import() {
    let mut f = Fixture::new(Program::module(vec![
        user_import(&["a"], "a"),
        user_import(&["b"], "b"),
        call_stmt("run"),
    ]));
    let opts = ImportOptions {
        import_position: ImportPosition::After,
        ..ImportOptions::live()
    };
    f.injector().add_named("h", "vue", &opts).unwrap();
    f.injector().add_named("c", "a", &opts).unwrap();
    assert_eq!(
        f.output(),
        "import { a, c as _c } from \"a\";\nimport { b } from \"b\";\nimport { h as _h } from \"vue\";\nrun();\n"
    );
}

#[test]
fn test_after_without_imports_goes_to_top() {
    let mut f = Fixture::new(Program::module(vec![call_stmt("run")]));
    let opts = ImportOptions {
        import_position: ImportPosition::After,
        ..ImportOptions::default()
    };
    f.injector().add_named("h", "vue", &opts).unwrap();
    assert_eq!(f.output(), "import { h as _h } from \"vue\";\nrun();\n");
}

#[test]
fn test_repeated_request_is_deduplicated() {
    let mut f = Fixture::module();
    let first = f
        .injector()
        .add_named("h", "vue", &ImportOptions::default())
        .unwrap();
    let second = f
        .injector()
        .add_named("h", "vue", &ImportOptions::default())
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(f.output(), "import { h as _h } from \"vue\";\n");
}

#[test]
fn test_type_only_import_is_not_reused() {
    let mut decl = match user_import(&["h"], "vue") {
        Stmt::Import(decl) => decl,
        _ => unreachable!(),
    };
    decl.type_only = true;
    let mut f = Fixture::new(Program::module(vec![Stmt::Import(decl)]));
    let local = f
        .injector()
        .add_named("h", "vue", &ImportOptions::default())
        .unwrap();
    assert_eq!(print_expr(&local), "_h");
    insta::assert_snapshot!(f.output(), @r###"
    import { h as _h } from "vue";
    import type { h } from "vue";
    "###);
}
