//! Compile errors with source-annotated reports.

use miette::{NamedSource, SourceSpan};
use std::path::{Path, PathBuf};
use zhscript_core::text::LineMap;
use zhscript_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use zhscript_parser::ParseError;

/// A failed compilation of one source.
#[derive(thiserror::Error, miette::Diagnostic, Debug)]
pub enum CompileError {
    /// The source does not parse. Displays as the parse error text.
    #[error("{error}")]
    #[diagnostic(code(zhscript::parse))]
    Parse {
        file_name: String,
        error: ParseError,
        #[source_code]
        source_code: NamedSource<String>,
        #[label("{label}")]
        span: SourceSpan,
        label: String,
    },

    #[error("Cannot read file '{}': {source}", .path.display())]
    #[diagnostic(code(zhscript::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write file '{}': {source}", .path.display())]
    #[diagnostic(code(zhscript::write))]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    /// Wrap a parse error, converting its char span into a byte span of `source`.
    pub fn parse(file_name: &str, source: &str, error: ParseError) -> Self {
        let bytes = LineMap::new(source).byte_range(error.span);
        let span = SourceSpan::from((bytes.start, bytes.end - bytes.start));
        CompileError::Parse {
            file_name: file_name.to_string(),
            label: error.message.clone(),
            error,
            source_code: NamedSource::new(file_name, source.to_string()),
            span,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CompileError::Write {
            path: path.into(),
            source,
        }
    }

    /// The underlying parse error, if this is one.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            CompileError::Parse { error, .. } => Some(error),
            CompileError::Io { .. } | CompileError::Write { .. } => None,
        }
    }

    /// A plain diagnostic for non-graphical output.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Parse { file_name, error, .. } => error.to_diagnostic(file_name),
            CompileError::Io { path, source } => file_diagnostic(&messages::CANNOT_READ_FILE_0_1, path, source),
            CompileError::Write { path, source } => file_diagnostic(&messages::CANNOT_WRITE_FILE_0_1, path, source),
        }
    }
}

fn file_diagnostic(message: &DiagnosticMessage, path: &Path, source: &std::io::Error) -> Diagnostic {
    let path = path.display().to_string();
    Diagnostic {
        file: Some(path.clone()),
        ..Diagnostic::new(message, &[&path, &source.to_string()])
    }
}
