//! The zhscript scanner/lexer.
//!
//! Converts source text into positioned tokens. Positions are char offsets;
//! line and column come from a [`LineMap`] built once per scanner.

use crate::char_codes::*;
use crate::keywords::{ascii_literal_kind, keyword_kind};
use crate::token::{Token, TokenKind};
use zhscript_core::text::LineMap;

/// Tokenize a whole source text. The result always ends with one `Eof` token.
pub fn tokenize(source: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.scan();
        let at_end = token.kind == TokenKind::Eof;
        tokens.push(token);
        if at_end {
            return tokens;
        }
    }
}

/// The scanner converts zhscript source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    line_map: LineMap,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading trivia).
    token_start: usize,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            line_map: LineMap::new(text),
            pos: 0,
            token_start: 0,
        }
    }

    // ========================================================================
    // Character access
    // ========================================================================

    /// Look at the character at the current position without advancing.
    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    /// Look at the character at position pos + offset.
    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    /// The character at pos + offset with CJK punctuation mapped to ASCII,
    /// or `'\0'` past the end.
    #[inline]
    fn punct_at(&self, offset: usize) -> char {
        self.char_at(offset).map_or('\0', normalize_punctuation)
    }

    /// Whether we've reached the end of the text.
    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.current_char().map_or(false, &pred) {
            self.pos += 1;
        }
    }

    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() || ch == '\u{FEFF}' {
                self.pos += 1;
            } else if ch == '/' && self.char_at(1) == Some('/') {
                self.pos += 2;
                self.skip_while(|c| c != LINE_FEED);
            } else if ch == '/' && self.char_at(1) == Some('*') {
                self.pos += 2;
                loop {
                    if self.is_eof() {
                        return;
                    }
                    if self.text[self.pos] == '*' && self.char_at(1) == Some('/') {
                        self.pos += 2;
                        break;
                    }
                    self.pos += 1;
                }
            } else {
                return;
            }
        }
    }

    fn make_token(&self, kind: TokenKind, text: String) -> Token {
        let start = self.token_start as u32;
        Token::new(kind, text, self.line_map.position_of(start), start, self.pos as u32)
    }

    // ========================================================================
    // Core scanning
    // ========================================================================

    /// Scan the next token. Once the input is exhausted every call returns `Eof`.
    pub fn scan(&mut self) -> Token {
        self.skip_trivia();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            return self.make_token(TokenKind::Eof, String::new());
        };

        if let Some(close) = closing_quote(ch) {
            self.scan_string(ch, close)
        } else if is_digit(ch) {
            self.scan_number()
        } else if is_identifier_start(ch) {
            self.scan_identifier()
        } else {
            self.scan_punctuation()
        }
    }

    // ========================================================================
    // Token-specific scanning methods
    // ========================================================================

    fn scan_string(&mut self, open: char, close: char) -> Token {
        self.pos += 1; // skip opening quote
        let mut value = String::new();
        while let Some(ch) = self.current_char() {
            self.pos += 1;
            if ch == close {
                break;
            }
            if ch == BACKSLASH {
                if let Some(escaped) = self.current_char() {
                    value.push(unescape(escaped));
                    self.pos += 1;
                }
                continue;
            }
            value.push(ch);
        }
        let kind = if open == '`' {
            TokenKind::Template
        } else {
            TokenKind::String
        };
        self.make_token(kind, value)
    }

    fn scan_number(&mut self) -> Token {
        let start = self.pos;

        if self.current_char() == Some('0') {
            let radix_digit: Option<fn(char) -> bool> = match self.char_at(1) {
                Some('x') | Some('X') => Some(is_hex_digit),
                Some('b') | Some('B') => Some(is_binary_digit),
                Some('o') | Some('O') => Some(is_octal_digit),
                _ => None,
            };
            if let Some(is_radix_digit) = radix_digit {
                self.pos += 2; // skip 0x / 0b / 0o
                self.skip_while(is_radix_digit);
                let text = self.chars_to_string(start, self.pos);
                return self.make_token(TokenKind::Number, text);
            }
        }

        self.skip_while(is_digit);

        // A dot only belongs to the number when a digit follows it.
        if self.current_char() == Some('.') && self.char_at(1).map_or(false, is_digit) {
            self.pos += 1;
            self.skip_while(is_digit);
        }

        // Exponent
        if let Some('e') | Some('E') = self.current_char() {
            let digits_at = match self.char_at(1) {
                Some('+') | Some('-') => 2,
                _ => 1,
            };
            if self.char_at(digits_at).map_or(false, is_digit) {
                self.pos += digits_at;
                self.skip_while(is_digit);
            }
        }

        let text = self.chars_to_string(start, self.pos);
        self.make_token(TokenKind::Number, text)
    }

    fn scan_identifier(&mut self) -> Token {
        let start = self.pos;
        self.pos += 1;
        self.skip_while(is_identifier_part);
        let text = self.chars_to_string(start, self.pos);

        let kind = keyword_kind(&text)
            .or_else(|| ascii_literal_kind(&text))
            .unwrap_or(TokenKind::Identifier);
        self.make_token(kind, text)
    }

    fn scan_punctuation(&mut self) -> Token {
        let (c0, c1, c2) = (self.punct_at(0), self.punct_at(1), self.punct_at(2));

        let matched = match (c0, c1, c2) {
            ('.', '.', '.') => Some((TokenKind::DotDotDot, 3)),
            ('=', '=', '=') => Some((TokenKind::EqualsEqualsEquals, 3)),
            ('!', '=', '=') => Some((TokenKind::ExclamationEqualsEquals, 3)),
            // `</>` is left as `<` followed by `/>`
            ('<', '/', c) if c != '>' => Some((TokenKind::LessThanSlash, 2)),
            ('/', '>', _) => Some((TokenKind::SlashGreaterThan, 2)),
            ('=', '=', _) => Some((TokenKind::EqualsEquals, 2)),
            ('!', '=', _) => Some((TokenKind::ExclamationEquals, 2)),
            ('<', '=', _) => Some((TokenKind::LessThanEquals, 2)),
            ('>', '=', _) => Some((TokenKind::GreaterThanEquals, 2)),
            ('&', '&', _) => Some((TokenKind::AmpersandAmpersand, 2)),
            ('|', '|', _) => Some((TokenKind::BarBar, 2)),
            ('+', '=', _) => Some((TokenKind::PlusEquals, 2)),
            ('-', '=', _) => Some((TokenKind::MinusEquals, 2)),
            ('*', '=', _) => Some((TokenKind::StarEquals, 2)),
            ('/', '=', _) => Some((TokenKind::SlashEquals, 2)),
            ('%', '=', _) => Some((TokenKind::PercentEquals, 2)),
            ('=', '>', _) => Some((TokenKind::EqualsGreaterThan, 2)),
            ('*', '*', _) => Some((TokenKind::StarStar, 2)),
            ('?', '.', _) => Some((TokenKind::QuestionDot, 2)),
            ('?', '?', _) => Some((TokenKind::QuestionQuestion, 2)),
            (c, _, _) => single_char_kind(c).map(|kind| (kind, 1)),
        };

        match matched {
            Some((kind, len)) => {
                let text: String = (0..len).map(|i| self.punct_at(i)).collect();
                self.pos += len;
                self.make_token(kind, text)
            }
            None => {
                let text = self.chars_to_string(self.pos, self.pos + 1);
                self.pos += 1;
                self.make_token(TokenKind::Unrecognized, text)
            }
        }
    }
}

fn single_char_kind(ch: char) -> Option<TokenKind> {
    let kind = match ch {
        '(' => TokenKind::OpenParen,
        ')' => TokenKind::CloseParen,
        '{' => TokenKind::OpenBrace,
        '}' => TokenKind::CloseBrace,
        '[' => TokenKind::OpenBracket,
        ']' => TokenKind::CloseBracket,
        ';' => TokenKind::Semicolon,
        ',' => TokenKind::Comma,
        '.' => TokenKind::Dot,
        ':' => TokenKind::Colon,
        '?' => TokenKind::Question,
        '!' => TokenKind::Exclamation,
        '+' => TokenKind::Plus,
        '-' => TokenKind::Minus,
        '*' => TokenKind::Star,
        '/' => TokenKind::Slash,
        '%' => TokenKind::Percent,
        '=' => TokenKind::Equals,
        '<' => TokenKind::LessThan,
        '>' => TokenKind::GreaterThan,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_scan_empty_input() {
        let tokens = tokenize("");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Eof);
        assert_eq!((tokens[0].start, tokens[0].end), (0, 0));
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
    }

    #[test]
    fn test_scan_let_statement() {
        assert_eq!(
            kinds("令 x = 10;"),
            vec![
                TokenKind::Let,
                TokenKind::Identifier,
                TokenKind::Equals,
                TokenKind::Number,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_repeats_eof() {
        let mut scanner = Scanner::new("x");
        assert_eq!(scanner.scan().kind, TokenKind::Identifier);
        assert_eq!(scanner.scan().kind, TokenKind::Eof);
        assert_eq!(scanner.scan().kind, TokenKind::Eof);
    }

    #[test]
    fn test_scan_longest_match() {
        assert_eq!(kinds("==="), vec![TokenKind::EqualsEqualsEquals, TokenKind::Eof]);
        assert_eq!(
            kinds("= =="),
            vec![TokenKind::Equals, TokenKind::EqualsEquals, TokenKind::Eof]
        );
        assert_eq!(kinds("**"), vec![TokenKind::StarStar, TokenKind::Eof]);
    }

    #[test]
    fn test_scan_unrecognized() {
        let tokens = tokenize("@");
        assert_eq!(tokens[0].kind, TokenKind::Unrecognized);
        assert_eq!(tokens[0].text, "@");
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_scan_eof_after_trailing_whitespace() {
        let tokens = tokenize("x\n  ");
        let eof = tokens.last().map(|t| (t.start, t.end, t.line, t.column));
        assert_eq!(eof, Some((4, 4, 2, 3)));
    }
}
