//! Main orchestration logic.

use crate::cli::{Args, EmitFormat};
use crate::config::{ConfigError, VueJsxConfig};
use crate::output::{Formatter, RunSummary};
use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use jsx_ast::{print_program, Program, Span};
use miette::Diagnostic;
use rayon::prelude::*;
use std::fs;
use thiserror::Error;
use tracing::{debug, info};
use vue_jsx_transformer::{transform, TransformError, TransformOptions};
use walkdir::WalkDir;

/// Input files are syntax trees serialized as JSON.
pub const INPUT_SUFFIX: &str = ".ast.json";

/// Orchestration errors that stop the whole run.
#[derive(Debug, Error, Diagnostic)]
pub enum OrchestratorError {
    /// The config could not be loaded.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Invalid glob pattern.
    #[error("invalid glob pattern: {0}")]
    #[diagnostic(code(vue_jsx::ignore_glob))]
    InvalidGlob(String),

    /// The workspace path is not valid UTF-8 or does not exist.
    #[error("invalid workspace: {0}")]
    #[diagnostic(code(vue_jsx::workspace))]
    InvalidWorkspace(String),
}

/// Errors for a single file. The run continues with the other files.
#[derive(Debug, Error, Diagnostic)]
pub enum FileError {
    /// Failed to read the file.
    #[error("failed to read file: {0}")]
    #[diagnostic(code(vue_jsx::read))]
    Read(std::io::Error),

    /// The file is not a serialized syntax tree.
    #[error("invalid syntax tree: {0}")]
    #[diagnostic(code(vue_jsx::input))]
    Parse(serde_json::Error),

    /// The transform rejected the program.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Transform(TransformError),

    /// The lowered tree could not be serialized.
    #[error("failed to serialize syntax tree: {0}")]
    #[diagnostic(code(vue_jsx::emit))]
    Serialize(serde_json::Error),

    /// Failed to write the result.
    #[error("failed to write {path}: {source}")]
    #[diagnostic(code(vue_jsx::write))]
    Write {
        path: Utf8PathBuf,
        source: std::io::Error,
    },
}

impl FileError {
    /// Returns the location of the offending node, if known.
    pub fn span(&self) -> Option<Span> {
        match self {
            FileError::Transform(err) => err.span,
            _ => None,
        }
    }
}

/// A transformed file, ready to be written.
#[derive(Debug)]
struct Emitted {
    code: String,
    has_jsx: bool,
}

/// The outcome for one input file.
#[derive(Debug)]
struct FileOutcome {
    relative: Utf8PathBuf,
    result: Result<Emitted, FileError>,
}

/// Runs the transform on all files.
pub fn run(args: Args) -> Result<RunSummary, OrchestratorError> {
    let workspace = resolve_workspace(&args.workspace)?;

    let mut config = VueJsxConfig::load(&workspace, args.config.as_deref())?;
    config.apply_args(&args)?;

    let ignore_set = build_ignore_set(&config.ignore)?;
    let mut files = find_input_files(&workspace, &args.paths, &ignore_set);
    if let Some(out_dir) = &args.out_dir {
        let out_dir = workspace.join(out_dir);
        files.retain(|file| !file.starts_with(&out_dir));
    }
    info!(count = files.len(), %workspace, "found input files");

    let options = &config.options;
    let emit = args.emit;
    let outcomes: Vec<FileOutcome> = files
        .par_iter()
        .map(|path| FileOutcome {
            relative: path.strip_prefix(&workspace).unwrap_or(path).to_path_buf(),
            result: process_file(path, options, emit),
        })
        .collect();

    let mut summary = RunSummary {
        file_count: outcomes.len(),
        ..Default::default()
    };
    let mut failures: Vec<(Utf8PathBuf, FileError)> = Vec::new();
    let single = outcomes.len() == 1;

    for outcome in outcomes {
        let emitted = match outcome.result {
            Ok(emitted) => emitted,
            Err(err) => {
                failures.push((outcome.relative, err));
                continue;
            }
        };
        if emitted.has_jsx {
            summary.lowered_count += 1;
        }
        match &args.out_dir {
            Some(out_dir) => {
                let target = output_path(&workspace.join(out_dir), &outcome.relative, emit);
                if let Err(err) = write_output(&target, &emitted.code) {
                    failures.push((outcome.relative, err));
                }
            }
            None if single => print!("{}", emitted.code),
            None => print!("// {}\n{}", outcome.relative, emitted.code),
        }
    }

    summary.error_count = failures.len();
    if !failures.is_empty() {
        let refs: Vec<(&Utf8Path, &FileError)> = failures
            .iter()
            .map(|(path, err)| (path.as_path(), err))
            .collect();
        eprint!("{}", Formatter::new(args.output).format(&refs));
    }
    eprintln!("{}", summary.format());

    Ok(summary)
}

fn resolve_workspace(workspace: &Utf8Path) -> Result<Utf8PathBuf, OrchestratorError> {
    if workspace.is_absolute() {
        return Ok(workspace.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|e| OrchestratorError::InvalidWorkspace(e.to_string()))?;
    let cwd = Utf8PathBuf::try_from(cwd)
        .map_err(|e| OrchestratorError::InvalidWorkspace(e.to_string()))?;
    Ok(cwd.join(workspace))
}

fn build_ignore_set(patterns: &[String]) -> Result<GlobSet, OrchestratorError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))?;
        builder.add(glob);
    }
    for pattern in ["**/node_modules/**", "**/.git/**"] {
        if let Ok(glob) = Glob::new(pattern) {
            builder.add(glob);
        }
    }
    builder
        .build()
        .map_err(|e| OrchestratorError::InvalidGlob(e.to_string()))
}

/// Collects `*.ast.json` files under the given roots, sorted and without
/// duplicates. Explicitly named files are taken even if they are ignored.
fn find_input_files(workspace: &Utf8Path, roots: &[Utf8PathBuf], ignore: &GlobSet) -> Vec<Utf8PathBuf> {
    let roots: Vec<Utf8PathBuf> = if roots.is_empty() {
        vec![workspace.to_path_buf()]
    } else {
        roots.iter().map(|root| workspace.join(root)).collect()
    };

    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root);
            continue;
        }
        files.extend(
            WalkDir::new(&root)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter_map(|e| Utf8PathBuf::try_from(e.into_path()).ok())
                .filter(|p| p.as_str().ends_with(INPUT_SUFFIX))
                .filter(|p| {
                    let relative = p.strip_prefix(workspace).unwrap_or(p);
                    !ignore.is_match(relative.as_str())
                }),
        );
    }
    files.sort();
    files.dedup();
    files
}

fn process_file(
    path: &Utf8Path,
    options: &TransformOptions,
    emit: EmitFormat,
) -> Result<Emitted, FileError> {
    let source = fs::read_to_string(path).map_err(FileError::Read)?;
    let program: Program = serde_json::from_str(&source).map_err(FileError::Parse)?;
    let result = transform(program, options).map_err(FileError::Transform)?;
    debug!(%path, has_jsx = result.has_jsx, "transformed");

    let mut code = match emit {
        EmitFormat::Js => print_program(&result.program),
        EmitFormat::Ast => serde_json::to_string_pretty(&result.program).map_err(FileError::Serialize)?,
    };
    if emit == EmitFormat::Js && !result.interop_helpers.is_empty() {
        let helpers = result.interop_helpers.join(", ");
        code.insert_str(0, &format!("// requires interop helpers: {helpers}\n"));
    }
    Ok(Emitted {
        code,
        has_jsx: result.has_jsx,
    })
}

/// Maps `dir/App.ast.json` to `<out>/dir/App.js` (or `App.vnode.ast.json`).
fn output_path(out_dir: &Utf8Path, relative: &Utf8Path, emit: EmitFormat) -> Utf8PathBuf {
    let name = relative.file_name().unwrap_or_default();
    let stem = name.strip_suffix(INPUT_SUFFIX).unwrap_or(name);
    let file = format!("{stem}{}", emit.suffix());
    match relative.parent() {
        Some(parent) => out_dir.join(parent).join(file),
        None => out_dir.join(file),
    }
}

fn write_output(target: &Utf8Path, code: &str) -> Result<(), FileError> {
    let write_err = |source: std::io::Error| FileError::Write {
        path: target.to_path_buf(),
        source,
    };
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    fs::write(target, code).map_err(write_err)
}
