//! Integration tests for the vue-jsx-rs binary.
//!
//! These tests verify that:
//! - Serialized syntax trees are discovered, lowered and written
//! - Config files and flags reach the transform
//! - Failures are reported per file and set the exit code

use jsx_ast::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

fn binary_path() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_vue-jsx-rs"))
}

fn run_cli(workspace: &Path, args: &[&str]) -> Output {
    Command::new(binary_path())
        .arg("--workspace")
        .arg(workspace)
        .args(args)
        .env_remove("VUE_JSX_LOG")
        .output()
        .expect("failed to run vue-jsx-rs")
}

fn write_program(workspace: &Path, rel: &str, program: &Program) {
    let path = workspace.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, serde_json::to_string(program).unwrap()).unwrap();
}

fn div_with_text(text: &str) -> Program {
    let element = JsxElement::new(
        JsxElementName::ident("div"),
        Vec::new(),
        vec![JsxChild::text(text)],
    );
    Program::module(vec![Stmt::expr(Expr::jsx(element))])
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_single_file_prints_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    write_program(dir.path(), "App.ast.json", &div_with_text("hello"));

    let output = run_cli(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "import { createTextVNode as _createTextVNode, createVNode as _createVNode } from \"vue\";\n\
         _createVNode(\"div\", null, [_createTextVNode(\"hello\")]);\n"
    );
    assert!(stderr(&output).contains("processed 1 file (1 with JSX) with 0 errors"));
}

#[test]
fn test_export_default_object_method_from_json() {
    let dir = tempfile::tempdir().unwrap();
    let element = serde_json::to_value(Expr::jsx(JsxElement::new(
        JsxElementName::ident("div"),
        Vec::new(),
        Vec::new(),
    )))
    .unwrap();
    let program = serde_json::json!({
        "source_type": "module",
        "body": [{
            "ExportDefaultExpr": {
                "expr": { "Object": { "props": [{
                    "Method": {
                        "key": { "Ident": { "sym": "render" } },
                        "function": {
                            "params": [],
                            "body": { "stmts": [{ "Return": { "arg": element } }] }
                        }
                    }
                }] } }
            }
        }]
    });
    fs::write(dir.path().join("App.ast.json"), program.to_string()).unwrap();

    let output = run_cli(dir.path(), &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "import { createVNode as _createVNode } from \"vue\";\n\
         export default { render() {\n  return _createVNode(\"div\", null, null);\n} };\n"
    );
}

#[test]
fn test_out_dir_mirrors_layout() {
    let dir = tempfile::tempdir().unwrap();
    write_program(dir.path(), "src/App.ast.json", &div_with_text("a"));
    write_program(
        dir.path(),
        "src/plain.ast.json",
        &Program::module(vec![Stmt::expr(Expr::call(Expr::ident("run"), Vec::new()))]),
    );

    let output = run_cli(dir.path(), &["--out-dir", "dist"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");

    let app = fs::read_to_string(dir.path().join("dist/src/App.js")).unwrap();
    assert!(app.contains("_createVNode(\"div\""));
    let plain = fs::read_to_string(dir.path().join("dist/src/plain.js")).unwrap();
    assert_eq!(plain, "run();\n");
    assert!(stderr(&output).contains("processed 2 files (1 with JSX)"));

    // A second run must not pick up its own output.
    let output = run_cli(dir.path(), &["--out-dir", "dist", "--emit", "ast"]);
    assert!(output.status.success());
    assert!(dir.path().join("dist/src/App.vnode.ast.json").exists());
    assert!(stderr(&output).contains("processed 2 files"));
}

#[test]
fn test_emit_ast_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    write_program(dir.path(), "App.ast.json", &div_with_text("x"));

    let output = run_cli(dir.path(), &["--emit", "ast"]);
    assert!(output.status.success());
    let program: Program = serde_json::from_str(&stdout(&output)).unwrap();
    assert!(matches!(program.body.first(), Some(Stmt::Import(_))));
}

#[test]
fn test_config_file_and_flags() {
    let dir = tempfile::tempdir().unwrap();
    let element = JsxElement::new(
        JsxElementName::ident("ion-button"),
        vec![JsxAttrOrSpread::expr("id", Expr::ident("id"))],
        Vec::new(),
    );
    write_program(
        dir.path(),
        "App.ast.json",
        &Program::module(vec![Stmt::expr(Expr::jsx(element))]),
    );
    fs::write(
        dir.path().join("vue-jsx.config.json"),
        r#"{ "isCustomElement": ["ion-*"] }"#,
    )
    .unwrap();

    let output = run_cli(dir.path(), &["--optimize"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "import { createVNode as _createVNode } from \"vue\";\n\
         _createVNode(\"ion-button\", { \"id\": id }, null, 8, [\"id\"]);\n"
    );
}

#[test]
fn test_ignore_patterns() {
    let dir = tempfile::tempdir().unwrap();
    write_program(dir.path(), "keep/App.ast.json", &div_with_text("a"));
    write_program(dir.path(), "legacy/Old.ast.json", &div_with_text("b"));

    let output = run_cli(dir.path(), &["--ignore", "legacy/**"]);
    assert!(output.status.success());
    assert!(stderr(&output).contains("processed 1 file"));
}

#[test]
fn test_transform_error_sets_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let element = JsxElement::new(
        JsxElementName::ident("input"),
        vec![JsxAttrOrSpread::str("v-model", "text")],
        Vec::new(),
    );
    write_program(
        dir.path(),
        "Bad.ast.json",
        &Program::module(vec![Stmt::expr(Expr::jsx(element))]),
    );
    write_program(dir.path(), "Good.ast.json", &div_with_text("ok"));

    let output = run_cli(dir.path(), &["--output", "json"]);
    assert_eq!(output.status.code(), Some(1));

    let stdout = stdout(&output);
    assert!(stdout.contains("// Good.ast.json\n"));
    let stderr = stderr(&output);
    assert!(stderr.contains("\"code\": \"vue_jsx::model_value\""));
    assert!(stderr.contains("\"filename\": \"Bad.ast.json\""));
    assert!(stderr.contains("with 1 error"));
}

#[test]
fn test_invalid_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Broken.ast.json"), "{ not json").unwrap();

    let output = run_cli(dir.path(), &[]);
    assert_eq!(output.status.code(), Some(1));
    let stderr = stderr(&output);
    assert!(stderr.contains("Broken.ast.json"));
    assert!(stderr.contains("invalid syntax tree"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_cli(dir.path(), &["--config", "missing.json"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("missing.json"));
}
