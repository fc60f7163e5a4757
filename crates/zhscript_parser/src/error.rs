//! The parse error type.

use zhscript_core::text::TextSpan;
use zhscript_diagnostics::{messages, Diagnostic, DiagnosticMessage};
use zhscript_scanner::{Token, TokenKind};

/// A positioned parse failure. Displays as
/// `Parse Error at line {L}, column {C}: {message}`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse Error at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    /// Span of the offending token, in chars.
    pub span: TextSpan,
    /// The kind the grammar required, for mismatched-token errors.
    pub expected: Option<TokenKind>,
    /// The kind actually found.
    pub found: TokenKind,
    /// Diagnostic code of the message.
    pub code: u32,
    /// Resolved message text, without the position prefix.
    pub message: String,
}

impl ParseError {
    /// `Expected {expected} but found {found}` at `token`.
    pub fn expected(expected: TokenKind, token: &Token) -> Self {
        let msg = &messages::EXPECTED_0_BUT_FOUND_1;
        Self {
            expected: Some(expected),
            ..Self::at(token, msg, &[expected.name(), token.kind.name()])
        }
    }

    /// A generic error at `token` from a message template.
    pub fn at(token: &Token, message: &DiagnosticMessage, args: &[&str]) -> Self {
        Self {
            line: token.line,
            column: token.column,
            span: token.span(),
            expected: None,
            found: token.kind,
            code: message.code,
            message: message.format(args),
        }
    }

    /// Convert to a located diagnostic for `file`.
    pub fn to_diagnostic(&self, file: &str) -> Diagnostic {
        Diagnostic {
            file: Some(file.to_string()),
            span: Some(self.span),
            message_text: self.message.clone(),
            code: self.code,
            category: zhscript_diagnostics::DiagnosticCategory::Error,
        }
    }
}

/// How a token is named in messages: its kind, plus its text when it has one.
pub(crate) fn describe(token: &Token) -> String {
    if token.text.is_empty() {
        token.kind.name().to_string()
    } else {
        format!("{} '{}'", token.kind.name(), token.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhscript_core::text::Position;

    fn token(kind: TokenKind, text: &str) -> Token {
        Token::new(kind, text, Position::new(3, 7), 20, 20 + text.chars().count() as u32)
    }

    #[test]
    fn test_expected_message() {
        let err = ParseError::expected(TokenKind::Semicolon, &token(TokenKind::Identifier, "y"));
        assert_eq!(
            err.to_string(),
            "Parse Error at line 3, column 7: Expected SEMICOLON but found IDENTIFIER"
        );
        assert_eq!(err.expected, Some(TokenKind::Semicolon));
        assert_eq!(err.code, 1001);
    }

    #[test]
    fn test_generic_message() {
        let tok = token(TokenKind::CloseBrace, "}");
        let err = ParseError::at(&tok, &messages::UNEXPECTED_TOKEN_0, &[&describe(&tok)]);
        assert_eq!(err.to_string(), "Parse Error at line 3, column 7: Unexpected token RBRACE '}'");
        assert_eq!(err.span, TextSpan::new(20, 1));
    }

    #[test]
    fn test_describe_eof() {
        assert_eq!(describe(&token(TokenKind::Eof, "")), "EOF");
    }

    #[test]
    fn test_to_diagnostic() {
        let err = ParseError::expected(TokenKind::CloseParen, &token(TokenKind::Eof, ""));
        let diag = err.to_diagnostic("main.zh");
        assert_eq!(diag.file.as_deref(), Some("main.zh"));
        assert!(diag.is_error());
        assert_eq!(diag.message_text, "Expected RPAREN but found EOF");
    }
}
