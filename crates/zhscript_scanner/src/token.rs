//! Tokens produced by the scanner.

use std::fmt;
use zhscript_core::text::{Position, TextSpan};

/// The closed set of token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Number,
    String,
    Template,
    True,
    False,
    Null,
    Undefined,
    Identifier,

    // Keywords
    Let,
    Const,
    Function,
    Component,
    Return,
    If,
    Else,
    While,
    For,
    Break,
    Continue,
    Import,
    From,
    Export,
    Default,
    New,
    This,
    Class,
    Extends,
    Try,
    Catch,
    Finally,
    Throw,
    Typeof,
    Async,
    Await,
    Switch,
    Case,
    Do,
    In,
    Instanceof,
    Delete,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    StarStar,
    Equals,
    PlusEquals,
    MinusEquals,
    StarEquals,
    SlashEquals,
    PercentEquals,
    EqualsEquals,
    ExclamationEquals,
    EqualsEqualsEquals,
    ExclamationEqualsEquals,
    LessThan,
    GreaterThan,
    LessThanEquals,
    GreaterThanEquals,
    AmpersandAmpersand,
    BarBar,
    Exclamation,
    QuestionQuestion,
    QuestionDot,
    EqualsGreaterThan,
    DotDotDot,

    // Punctuation
    OpenParen,
    CloseParen,
    OpenBrace,
    CloseBrace,
    OpenBracket,
    CloseBracket,
    Semicolon,
    Comma,
    Dot,
    Colon,
    Question,

    // JSX
    /// `</`
    LessThanSlash,
    /// `/>`
    SlashGreaterThan,

    Eof,
    Unrecognized,
}

impl TokenKind {
    /// Upper-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Number => "NUMBER",
            TokenKind::String => "STRING",
            TokenKind::Template => "TEMPLATE",
            TokenKind::True => "TRUE",
            TokenKind::False => "FALSE",
            TokenKind::Null => "NULL",
            TokenKind::Undefined => "UNDEFINED",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Let => "LET",
            TokenKind::Const => "CONST",
            TokenKind::Function => "FUNCTION",
            TokenKind::Component => "COMPONENT",
            TokenKind::Return => "RETURN",
            TokenKind::If => "IF",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::For => "FOR",
            TokenKind::Break => "BREAK",
            TokenKind::Continue => "CONTINUE",
            TokenKind::Import => "IMPORT",
            TokenKind::From => "FROM",
            TokenKind::Export => "EXPORT",
            TokenKind::Default => "DEFAULT",
            TokenKind::New => "NEW",
            TokenKind::This => "THIS",
            TokenKind::Class => "CLASS",
            TokenKind::Extends => "EXTENDS",
            TokenKind::Try => "TRY",
            TokenKind::Catch => "CATCH",
            TokenKind::Finally => "FINALLY",
            TokenKind::Throw => "THROW",
            TokenKind::Typeof => "TYPEOF",
            TokenKind::Async => "ASYNC",
            TokenKind::Await => "AWAIT",
            TokenKind::Switch => "SWITCH",
            TokenKind::Case => "CASE",
            TokenKind::Do => "DO",
            TokenKind::In => "IN",
            TokenKind::Instanceof => "INSTANCEOF",
            TokenKind::Delete => "DELETE",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MODULO",
            TokenKind::StarStar => "POWER",
            TokenKind::Equals => "ASSIGN",
            TokenKind::PlusEquals => "PLUS_ASSIGN",
            TokenKind::MinusEquals => "MINUS_ASSIGN",
            TokenKind::StarEquals => "MULTIPLY_ASSIGN",
            TokenKind::SlashEquals => "DIVIDE_ASSIGN",
            TokenKind::PercentEquals => "MODULO_ASSIGN",
            TokenKind::EqualsEquals => "EQUAL",
            TokenKind::ExclamationEquals => "NOT_EQUAL",
            TokenKind::EqualsEqualsEquals => "STRICT_EQUAL",
            TokenKind::ExclamationEqualsEquals => "STRICT_NOT_EQUAL",
            TokenKind::LessThan => "LESS_THAN",
            TokenKind::GreaterThan => "GREATER_THAN",
            TokenKind::LessThanEquals => "LESS_EQUAL",
            TokenKind::GreaterThanEquals => "GREATER_EQUAL",
            TokenKind::AmpersandAmpersand => "AND",
            TokenKind::BarBar => "OR",
            TokenKind::Exclamation => "NOT",
            TokenKind::QuestionQuestion => "NULLISH",
            TokenKind::QuestionDot => "OPTIONAL_CHAIN",
            TokenKind::EqualsGreaterThan => "ARROW",
            TokenKind::DotDotDot => "SPREAD",
            TokenKind::OpenParen => "LPAREN",
            TokenKind::CloseParen => "RPAREN",
            TokenKind::OpenBrace => "LBRACE",
            TokenKind::CloseBrace => "RBRACE",
            TokenKind::OpenBracket => "LBRACKET",
            TokenKind::CloseBracket => "RBRACKET",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Colon => "COLON",
            TokenKind::Question => "QUESTION",
            TokenKind::LessThanSlash => "JSX_CLOSE_SLASH",
            TokenKind::SlashGreaterThan => "JSX_SELF_CLOSE",
            TokenKind::Eof => "EOF",
            TokenKind::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Whether this kind comes from the keyword table.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Let
                | TokenKind::Const
                | TokenKind::Function
                | TokenKind::Component
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Import
                | TokenKind::From
                | TokenKind::Export
                | TokenKind::Default
                | TokenKind::New
                | TokenKind::This
                | TokenKind::Class
                | TokenKind::Extends
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Throw
                | TokenKind::Typeof
                | TokenKind::Async
                | TokenKind::Await
                | TokenKind::Switch
                | TokenKind::Case
                | TokenKind::Do
                | TokenKind::In
                | TokenKind::Instanceof
                | TokenKind::Delete
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::Number
                | TokenKind::String
                | TokenKind::Template
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Undefined
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A classified, positioned lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Decoded value for strings, ASCII form for punctuation, source text otherwise.
    pub text: String,
    /// 1-based line.
    pub line: u32,
    /// 1-based column, in chars.
    pub column: u32,
    /// Char offset of the first character.
    pub start: u32,
    /// Char offset one past the last character.
    pub end: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: Position, start: u32, end: u32) -> Self {
        Self {
            kind,
            text: text.into(),
            line: position.line,
            column: position.column,
            start,
            end,
        }
    }

    #[inline]
    pub fn span(&self) -> TextSpan {
        TextSpan::from_bounds(self.start, self.end)
    }

    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::String | TokenKind::Template => {
                write!(f, "{}({})", self.kind, self.text)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
