//! zhscript_diagnostics: Diagnostic messages and error reporting infrastructure.
//!
//! Every user-facing message of the compiler lives in the [`messages`] table
//! with a stable code and category. Diagnostics carry the resolved text plus
//! an optional file and source span.

use zhscript_core::text::TextSpan;
use std::fmt;

/// Diagnostic category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Warning,
    Error,
    Message,
}

impl fmt::Display for DiagnosticCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticCategory::Warning => write!(f, "warning"),
            DiagnosticCategory::Error => write!(f, "error"),
            DiagnosticCategory::Message => write!(f, "message"),
        }
    }
}

/// A diagnostic message template with a code and category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticMessage {
    /// The diagnostic code (e.g., 1001, 5002).
    pub code: u32,
    /// The category of this diagnostic.
    pub category: DiagnosticCategory,
    /// The message template string. May contain `{0}`, `{1}`, etc. placeholders.
    pub message: &'static str,
}

impl DiagnosticMessage {
    /// Resolve the template against `args`.
    pub fn format(&self, args: &[&str]) -> String {
        format_message(self.message, args)
    }
}

/// A realized diagnostic with location information and resolved message text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// The file path where this diagnostic occurred, if any.
    pub file: Option<String>,
    /// The source text span where this diagnostic occurred, if any.
    pub span: Option<TextSpan>,
    /// The resolved message text.
    pub message_text: String,
    /// The diagnostic code.
    pub code: u32,
    /// The category.
    pub category: DiagnosticCategory,
}

impl Diagnostic {
    /// Create a new diagnostic without location info.
    pub fn new(message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            file: None,
            span: None,
            message_text: message.format(args),
            code: message.code,
            category: message.category,
        }
    }

    /// Whether this is an error diagnostic.
    pub fn is_error(&self) -> bool {
        self.category == DiagnosticCategory::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref file) = self.file {
            write!(f, "{}", file)?;
            if let Some(span) = self.span {
                write!(f, "({})", span.start)?;
            }
            write!(f, ": ")?;
        }
        write!(f, "{} ZH{}: {}", self.category, self.code, self.message_text)
    }
}

/// Format a diagnostic message template by replacing `{0}`, `{1}`, etc. with arguments.
///
/// The template is scanned once, so placeholder-like text inside an argument
/// is kept as is. Placeholders without a matching argument stay verbatim.
pub fn format_message(template: &str, args: &[&str]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after
            .find('}')
            .and_then(|close| after[..close].parse::<usize>().ok().map(|index| (index, close)))
            .and_then(|(index, close)| args.get(index).map(|arg| (*arg, close)));
        match arg {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

// ============================================================================
// Diagnostic Messages
// ============================================================================

pub mod messages {
    use super::*;

    macro_rules! diag {
        ($code:expr, Error, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Error, message: $msg }
        };
        ($code:expr, Warning, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Warning, message: $msg }
        };
        ($code:expr, Message, $msg:expr) => {
            DiagnosticMessage { code: $code, category: DiagnosticCategory::Message, message: $msg }
        };
    }

    // ========================================================================
    // Parser errors (1000-1099)
    // ========================================================================
    pub const EXPECTED_0_BUT_FOUND_1: DiagnosticMessage = diag!(1001, Error, "Expected {0} but found {1}");
    pub const UNEXPECTED_TOKEN_0: DiagnosticMessage = diag!(1002, Error, "Unexpected token {0}");
    pub const UNEXPECTED_TOKEN_0_IN_JSX_CHILDREN: DiagnosticMessage = diag!(1003, Error, "Unexpected token {0} in JSX children");
    pub const INVALID_ASSIGNMENT_TARGET: DiagnosticMessage = diag!(1004, Error, "Invalid assignment target");
    pub const MISMATCHED_CLOSING_TAG_0_EXPECTED_1: DiagnosticMessage = diag!(1005, Error, "Mismatched closing tag </{0}>, expected </{1}>");
    pub const NESTED_PATTERNS_ARE_NOT_SUPPORTED: DiagnosticMessage = diag!(1006, Error, "Nested destructuring patterns are not supported");
    pub const NESTING_TOO_DEEP: DiagnosticMessage = diag!(1007, Error, "Maximum nesting depth of {0} exceeded");
    pub const INVALID_NUMERIC_LITERAL_0: DiagnosticMessage = diag!(1008, Error, "Invalid numeric literal {0}");

    // ========================================================================
    // Project and file errors (5000-5099)
    // ========================================================================
    pub const CANNOT_READ_FILE_0_1: DiagnosticMessage = diag!(5001, Error, "Cannot read file '{0}': {1}");
    pub const CANNOT_WRITE_FILE_0_1: DiagnosticMessage = diag!(5002, Error, "Cannot write file '{0}': {1}");
    pub const CANNOT_PARSE_CONFIG_FILE_0_1: DiagnosticMessage = diag!(5003, Error, "Cannot parse config file '{0}': {1}");
    pub const NO_INPUTS_WERE_FOUND: DiagnosticMessage = diag!(5004, Error, "No inputs were found. Pass source files or a project file.");
    pub const FILE_0_HAS_UNSUPPORTED_EXTENSION: DiagnosticMessage = diag!(5005, Warning, "File '{0}' does not have a .zh extension");

    // ========================================================================
    // Informational (6000-6099)
    // ========================================================================
    pub const FOUND_0_ERRORS: DiagnosticMessage = diag!(6001, Message, "Found {0} error(s).");
    pub const COMPILED_0_FILES: DiagnosticMessage = diag!(6002, Message, "Compiled {0} file(s).");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        let msg = format_message(messages::EXPECTED_0_BUT_FOUND_1.message, &["SEMICOLON", "RBRACE"]);
        assert_eq!(msg, "Expected SEMICOLON but found RBRACE");
    }

    #[test]
    fn test_format_message_repeated_placeholder() {
        assert_eq!(format_message("{0} and {0}", &["x"]), "x and x");
        assert_eq!(format_message("no args", &[]), "no args");
    }

    #[test]
    fn test_format_message_keeps_braces_inside_arguments() {
        let msg = messages::CANNOT_READ_FILE_0_1.format(&["dir/{1}/a.zh", "denied"]);
        assert_eq!(msg, "Cannot read file 'dir/{1}/a.zh': denied");
    }

    #[test]
    fn test_format_message_leaves_unknown_placeholders() {
        assert_eq!(format_message("{0} {2} {x} {", &["a"]), "a {2} {x} {");
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            file: Some("main.zh".to_string()),
            span: Some(TextSpan::new(10, 1)),
            ..Diagnostic::new(&messages::UNEXPECTED_TOKEN_0, &["RBRACE"])
        };
        let display = format!("{}", diag);
        assert!(display.contains("main.zh(10)"));
        assert!(display.contains("ZH1002"));
        assert!(display.contains("Unexpected token RBRACE"));
    }

    #[test]
    fn test_diagnostic_without_location() {
        let diag = Diagnostic::new(&messages::NO_INPUTS_WERE_FOUND, &[]);
        assert!(diag.file.is_none());
        assert!(diag.span.is_none());
        assert_eq!(diag.code, 5004);
        assert!(diag.is_error());
    }

    #[test]
    fn test_message_categories() {
        assert_eq!(messages::FILE_0_HAS_UNSUPPORTED_EXTENSION.category, DiagnosticCategory::Warning);
        assert_eq!(messages::FOUND_0_ERRORS.format(&["3"]), "Found 3 error(s).");
    }
}
