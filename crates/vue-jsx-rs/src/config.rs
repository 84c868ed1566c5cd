//! Configuration loading.

use crate::cli::Args;
use camino::{Utf8Path, Utf8PathBuf};
use miette::Diagnostic;
use serde::Deserialize;
use std::fs;
use thiserror::Error;
use tracing::debug;
use vue_jsx_transformer::{CustomElementMatcher, TransformOptions};

/// The config file looked up in the workspace when `--config` is not given.
pub const CONFIG_FILE: &str = "vue-jsx.config.json";

/// Configuration errors.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read {path}")]
    #[diagnostic(code(vue_jsx::config_read))]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid JSON for the expected shape.
    #[error("failed to parse {path}")]
    #[diagnostic(
        code(vue_jsx::config_parse),
        help("options use camelCase keys, e.g. \"enableObjectSlots\"")
    )]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A `--custom-element` pattern is not a valid glob.
    #[error("invalid custom element pattern")]
    #[diagnostic(code(vue_jsx::config_glob))]
    Glob(#[from] globset::Error),
}

/// Project configuration: the transform options plus file selection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VueJsxConfig {
    /// Options passed to the transform.
    #[serde(flatten)]
    pub options: TransformOptions,

    /// Glob patterns, relative to the workspace, of files to skip.
    pub ignore: Vec<String>,
}

impl VueJsxConfig {
    /// Loads the config from `explicit`, or from `vue-jsx.config.json` in the
    /// workspace when it exists.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file yields the default config.
    pub fn load(workspace: &Utf8Path, explicit: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) if path.is_relative() => workspace.join(path),
            Some(path) => path.to_path_buf(),
            None => {
                let path = workspace.join(CONFIG_FILE);
                if !path.exists() {
                    debug!(%workspace, "no config file, using defaults");
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        debug!(%path, "loaded config");
        Ok(config)
    }

    /// Parses a config from JSON text.
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Applies command-line overrides. Flags only ever switch behavior on or
    /// add patterns; they never reset what the file configured.
    pub fn apply_args(&mut self, args: &Args) -> Result<(), ConfigError> {
        let options = &mut self.options;
        options.optimize |= args.optimize;
        options.transform_on |= args.transform_on;
        if args.no_merge_props {
            options.merge_props = false;
        }
        if args.no_object_slots {
            options.enable_object_slots = false;
        }
        if args.pragma.is_some() {
            options.pragma = args.pragma.clone();
        }

        if !args.custom_elements.is_empty() {
            let mut patterns = match &options.is_custom_element {
                CustomElementMatcher::Globs { patterns, .. } => patterns.clone(),
                _ => Vec::new(),
            };
            patterns.extend(args.custom_elements.iter().cloned());
            options.is_custom_element = CustomElementMatcher::from_globs(&patterns)?;
        }

        self.ignore.extend(args.ignore.iter().cloned());
        Ok(())
    }
}
