//! Output formatting.

use crate::cli::OutputFormat;
use crate::orchestrator::FileError;
use camino::Utf8Path;
use miette::{Diagnostic, GraphicalReportHandler, GraphicalTheme};
use serde::Serialize;

/// A file that failed, formatted for JSON output.
#[derive(Debug, Serialize)]
pub struct FormattedError {
    /// The file path, relative to the workspace.
    pub filename: String,
    /// The diagnostic code, e.g. `vue_jsx::model_value`.
    pub code: Option<String>,
    /// The message.
    pub message: String,
    /// A hint for fixing the input.
    pub help: Option<String>,
    /// Byte offsets of the offending node, when it came from source.
    pub start: Option<u32>,
    pub end: Option<u32>,
}

impl FormattedError {
    /// Extracts the reportable parts of an error.
    pub fn new(file_path: &Utf8Path, error: &FileError) -> Self {
        let span = error.span();
        Self {
            filename: file_path.to_string(),
            code: error.code().map(|c| c.to_string()),
            message: error.to_string(),
            help: error.help().map(|h| h.to_string()),
            start: span.map(|s| u32::from(s.start)),
            end: span.map(|s| u32::from(s.end)),
        }
    }
}

/// Formats file errors for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats a collection of failures.
    pub fn format(&self, failures: &[(&Utf8Path, &FileError)]) -> String {
        match self.format {
            OutputFormat::Human => Self::format_human(failures),
            OutputFormat::Json => Self::format_json(failures),
        }
    }

    /// Formats as human-readable reports.
    fn format_human(failures: &[(&Utf8Path, &FileError)]) -> String {
        let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());
        let mut output = String::new();
        for (path, error) in failures {
            output.push_str(&format!("{path}\n"));
            let at = output.len();
            if handler.render_report(&mut output, *error).is_err() {
                output.truncate(at);
                output.push_str(&format!("Error: {error}\n"));
            }
            output.push('\n');
        }
        output
    }

    /// Formats as a JSON array.
    fn format_json(failures: &[(&Utf8Path, &FileError)]) -> String {
        let formatted: Vec<FormattedError> = failures
            .iter()
            .map(|(path, error)| FormattedError::new(path, error))
            .collect();
        serde_json::to_string_pretty(&formatted).unwrap_or_default()
    }
}

/// Summary of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of files read.
    pub file_count: usize,
    /// Number of files that contained JSX.
    pub lowered_count: usize,
    /// Number of files that failed.
    pub error_count: usize,
}

impl RunSummary {
    /// Formats the summary line.
    pub fn format(&self) -> String {
        let file_word = if self.file_count == 1 { "file" } else { "files" };
        let error_word = if self.error_count == 1 {
            "error"
        } else {
            "errors"
        };
        format!(
            "vue-jsx-rs processed {} {} ({} with JSX) with {} {}",
            self.file_count, file_word, self.lowered_count, self.error_count, error_word
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsx_ast::Span;
    use vue_jsx_transformer::{TransformError, TransformErrorKind};

    fn model_error() -> FileError {
        FileError::Transform(TransformError::new(
            TransformErrorKind::ModelNotExpression,
            Some(Span::new(12u32, 27u32)),
        ))
    }

    #[test]
    fn test_format_human() {
        let error = model_error();
        let output = Formatter::new(OutputFormat::Human).format(&[(Utf8Path::new("src/App.ast.json"), &error)]);
        assert!(output.starts_with("src/App.ast.json\n"));
        assert!(output.contains("You have to use JSX Expression inside your v-model"));
        assert!(output.contains("vue_jsx::model_value"));
    }

    #[test]
    fn test_format_json() {
        let error = model_error();
        let output = Formatter::new(OutputFormat::Json).format(&[(Utf8Path::new("App.ast.json"), &error)]);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value[0]["filename"], "App.ast.json");
        assert_eq!(value[0]["code"], "vue_jsx::model_value");
        assert_eq!(value[0]["start"], 12);
        assert_eq!(value[0]["end"], 27);
    }

    #[test]
    fn test_summary_format() {
        let summary = RunSummary {
            file_count: 3,
            lowered_count: 2,
            error_count: 1,
        };
        assert_eq!(
            summary.format(),
            "vue-jsx-rs processed 3 files (2 with JSX) with 1 error"
        );
    }
}
