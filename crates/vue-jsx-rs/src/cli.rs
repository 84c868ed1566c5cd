//! CLI argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Lowers Vue JSX syntax trees to createVNode calls.
#[derive(Debug, Parser)]
#[command(name = "vue-jsx-rs")]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Files or directories to transform (defaults to the workspace)
    pub paths: Vec<Utf8PathBuf>,

    /// Working directory for config lookup and relative output paths
    #[arg(long, default_value = ".")]
    pub workspace: Utf8PathBuf,

    /// Path to vue-jsx.config.json
    #[arg(long)]
    pub config: Option<Utf8PathBuf>,

    /// Directory to write results to (stdout when omitted)
    #[arg(long = "out-dir")]
    pub out_dir: Option<Utf8PathBuf>,

    /// What to emit for each file
    #[arg(long, value_enum, default_value = "js")]
    pub emit: EmitFormat,

    /// Error report format
    #[arg(long, value_enum, default_value = "human")]
    pub output: OutputFormat,

    /// Emit patch flags and slot flags
    #[arg(long)]
    pub optimize: bool,

    /// Spread attributes into the props object instead of calling mergeProps
    #[arg(long = "no-merge-props")]
    pub no_merge_props: bool,

    /// Never resolve single children with _isSlot
    #[arg(long = "no-object-slots")]
    pub no_object_slots: bool,

    /// Route `on` / `nativeOn` through _transformOn
    #[arg(long = "transform-on")]
    pub transform_on: bool,

    /// Call this function instead of createVNode
    #[arg(long)]
    pub pragma: Option<String>,

    /// Glob patterns for tags that are custom elements
    #[arg(long = "custom-element")]
    pub custom_elements: Vec<String>,

    /// Glob patterns to ignore
    #[arg(long)]
    pub ignore: Vec<String>,
}

/// What is written for each transformed file.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum EmitFormat {
    /// Printed JavaScript (default)
    #[default]
    Js,
    /// The lowered syntax tree as JSON
    Ast,
}

impl EmitFormat {
    /// Returns the file suffix that replaces `.ast.json`.
    pub fn suffix(self) -> &'static str {
        match self {
            EmitFormat::Js => ".js",
            EmitFormat::Ast => ".vnode.ast.json",
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable reports (default)
    #[default]
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::parse_from(["vue-jsx-rs"]);
        assert_eq!(args.workspace.as_str(), ".");
        assert!(args.paths.is_empty());
        assert_eq!(args.emit, EmitFormat::Js);
        assert_eq!(args.output, OutputFormat::Human);
        assert!(!args.optimize);
    }

    #[test]
    fn test_paths_and_out_dir() {
        let args = Args::parse_from(["vue-jsx-rs", "src", "lib/app.ast.json", "--out-dir", "dist"]);
        assert_eq!(args.paths.len(), 2);
        assert_eq!(args.out_dir.as_deref().map(|p| p.as_str()), Some("dist"));
    }

    #[test]
    fn test_transform_flags() {
        let args = Args::parse_from([
            "vue-jsx-rs",
            "--optimize",
            "--no-merge-props",
            "--custom-element",
            "ion-*",
            "--custom-element",
            "my-*",
            "--pragma",
            "h",
        ]);
        assert!(args.optimize);
        assert!(args.no_merge_props);
        assert_eq!(args.custom_elements, vec!["ion-*", "my-*"]);
        assert_eq!(args.pragma.as_deref(), Some("h"));
    }

    #[test]
    fn test_emit_formats() {
        let args = Args::parse_from(["vue-jsx-rs", "--emit", "ast"]);
        assert_eq!(args.emit, EmitFormat::Ast);
        assert_eq!(args.emit.suffix(), ".vnode.ast.json");
    }
}
