//! zhscript_options: zhscript.json parsing and compiler options.
//!
//! Parses project files and provides the CompilerOptions structure. Every
//! option is optional; unset options fall back to the printer defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use zhscript_diagnostics::{messages, Diagnostic};
use zhscript_printer::PrinterOptions;

/// Name of the project file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "zhscript.json";

/// Source file extension.
pub const SOURCE_EXTENSION: &str = "zh";

/// Compiler options, matching the `compilerOptions` object of zhscript.json.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompilerOptions {
    // -- Emit --
    #[serde(skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub no_emit: Option<bool>,

    // -- Formatting --
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indent_width: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_newline: Option<bool>,

    // -- JSX --
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_factory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jsx_fragment: Option<String>,
}

impl CompilerOptions {
    /// Printer settings with defaults filled in.
    pub fn printer_options(&self) -> PrinterOptions {
        let defaults = PrinterOptions::default();
        PrinterOptions {
            indent_width: self.indent_width.unwrap_or(defaults.indent_width),
            trailing_newline: self.trailing_newline.unwrap_or(defaults.trailing_newline),
            jsx_factory: self.jsx_factory.clone().unwrap_or(defaults.jsx_factory),
            jsx_fragment: self.jsx_fragment.clone().unwrap_or(defaults.jsx_fragment),
        }
    }

    pub fn no_emit(&self) -> bool {
        self.no_emit.unwrap_or(false)
    }

    /// Overlay every option set in `overrides` onto `self`.
    pub fn merge(&mut self, overrides: &CompilerOptions) {
        if overrides.out_dir.is_some() {
            self.out_dir = overrides.out_dir.clone();
        }
        if overrides.no_emit.is_some() {
            self.no_emit = overrides.no_emit;
        }
        if overrides.indent_width.is_some() {
            self.indent_width = overrides.indent_width;
        }
        if overrides.trailing_newline.is_some() {
            self.trailing_newline = overrides.trailing_newline;
        }
        if overrides.jsx_factory.is_some() {
            self.jsx_factory = overrides.jsx_factory.clone();
        }
        if overrides.jsx_fragment.is_some() {
            self.jsx_fragment = overrides.jsx_fragment.clone();
        }
    }
}

/// The zhscript.json file structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZhConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compiler_options: Option<CompilerOptions>,
    /// Explicit source files, relative to the config file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<String>>,
    /// Directories searched recursively for `.zh` files when `files` is absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
    /// Path fragments skipped during the `include` search.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,
}

impl ZhConfig {
    pub fn compiler_options(&self) -> CompilerOptions {
        self.compiler_options.clone().unwrap_or_default()
    }
}

/// A loaded project file together with the directory it was found in.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub path: PathBuf,
    pub root_dir: PathBuf,
    pub config: ZhConfig,
}

/// Errors loading a project file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Cannot read file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Io { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let path = self.path().display().to_string();
        let mut diagnostic = match self {
            ConfigError::Io { source, .. } => {
                Diagnostic::new(&messages::CANNOT_READ_FILE_0_1, &[&path, &source.to_string()])
            }
            ConfigError::Parse { source, .. } => {
                Diagnostic::new(&messages::CANNOT_PARSE_CONFIG_FILE_0_1, &[&path, &source.to_string()])
            }
        };
        diagnostic.file = Some(path);
        diagnostic
    }
}

/// Parse a zhscript.json file from a string.
pub fn parse_config(content: &str) -> Result<ZhConfig, serde_json::Error> {
    serde_json::from_str(content)
}

/// Parse a zhscript.json file from a path.
pub fn parse_config_file(path: &Path) -> Result<LoadedConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let root_dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok(LoadedConfig {
        path: path.to_path_buf(),
        root_dir,
        config,
    })
}

/// Whether `path` carries the `.zh` extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension().map_or(false, |ext| ext == SOURCE_EXTENSION)
}

/// The text `zhs --init` writes.
pub fn default_config_text() -> String {
    let config = ZhConfig {
        compiler_options: Some(CompilerOptions {
            out_dir: Some("dist".to_string()),
            indent_width: Some(2),
            trailing_newline: Some(true),
            ..CompilerOptions::default()
        }),
        include: Some(vec!["src".to_string()]),
        ..ZhConfig::default()
    };
    let mut text = serde_json::to_string_pretty(&config).unwrap_or_default();
    text.push('\n');
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(
            r#"{
                "compilerOptions": {
                    "outDir": "dist",
                    "indentWidth": 4,
                    "trailingNewline": true,
                    "jsxFactory": "h",
                    "jsxFragment": "Fragment",
                    "noEmit": false
                },
                "files": ["src/main.zh"]
            }"#,
        )
        .unwrap();
        let options = config.compiler_options();
        assert_eq!(options.out_dir.as_deref(), Some("dist"));
        assert_eq!(options.indent_width, Some(4));
        assert_eq!(options.jsx_factory.as_deref(), Some("h"));
        assert!(!options.no_emit());
        assert_eq!(config.files, Some(vec!["src/main.zh".to_string()]));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("{}").unwrap();
        assert_eq!(config, ZhConfig::default());
        assert_eq!(config.compiler_options().printer_options(), PrinterOptions::default());
    }

    #[test]
    fn test_printer_options_override_defaults() {
        let options = CompilerOptions {
            indent_width: Some(4),
            jsx_fragment: Some("Frag".to_string()),
            ..CompilerOptions::default()
        };
        let printer = options.printer_options();
        assert_eq!(printer.indent_width, 4);
        assert_eq!(printer.jsx_fragment, "Frag");
        assert_eq!(printer.jsx_factory, "React.createElement");
        assert!(!printer.trailing_newline);
    }

    #[test]
    fn test_merge_keeps_unset_options() {
        let mut base = CompilerOptions {
            out_dir: Some("build".to_string()),
            indent_width: Some(4),
            ..CompilerOptions::default()
        };
        base.merge(&CompilerOptions {
            out_dir: Some("dist".to_string()),
            no_emit: Some(true),
            ..CompilerOptions::default()
        });
        assert_eq!(base.out_dir.as_deref(), Some("dist"));
        assert_eq!(base.indent_width, Some(4));
        assert!(base.no_emit());
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(parse_config("{ \"compilerOptions\": ").is_err());
        assert!(parse_config("{ \"compilerOptions\": { \"indentWidth\": \"two\" } }").is_err());
    }

    #[test]
    fn test_missing_file_error() {
        let err = parse_config_file(Path::new("/nonexistent/zhscript.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        let diagnostic = err.to_diagnostic();
        assert_eq!(diagnostic.code, 5001);
        assert!(diagnostic.message_text.starts_with("Cannot read file '/nonexistent/zhscript.json'"));
    }

    #[test]
    fn test_source_extension() {
        assert!(is_source_file(Path::new("src/主.zh")));
        assert!(!is_source_file(Path::new("src/main.js")));
        assert!(!is_source_file(Path::new("zh")));
    }

    #[test]
    fn test_default_config_round_trips() {
        let config = parse_config(&default_config_text()).unwrap();
        assert_eq!(config.compiler_options().out_dir.as_deref(), Some("dist"));
        assert_eq!(config.include, Some(vec!["src".to_string()]));
    }
}
