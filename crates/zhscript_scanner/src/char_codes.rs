//! Character classes and the CJK punctuation/quote tables used by the scanner.

pub const LINE_FEED: char = '\n';
pub const BACKSLASH: char = '\\';

// CJK quote marks
pub const LEFT_DOUBLE_QUOTE: char = '\u{201C}'; // “
pub const RIGHT_DOUBLE_QUOTE: char = '\u{201D}'; // ”
pub const LEFT_SINGLE_QUOTE: char = '\u{2018}'; // ‘
pub const RIGHT_SINGLE_QUOTE: char = '\u{2019}'; // ’

/// Check if a character is a decimal digit.
#[inline]
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Check if a character is a hex digit.
#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

/// CJK Unified Ideographs block.
#[inline]
pub fn is_cjk_ideograph(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}')
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_' || is_cjk_ideograph(ch)
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch) || is_digit(ch)
}

/// The closing delimiter for a string opener, or `None` if `ch` opens no string.
#[inline]
pub fn closing_quote(ch: char) -> Option<char> {
    match ch {
        '"' | '\'' | '`' => Some(ch),
        LEFT_DOUBLE_QUOTE | RIGHT_DOUBLE_QUOTE => Some(RIGHT_DOUBLE_QUOTE),
        LEFT_SINGLE_QUOTE | RIGHT_SINGLE_QUOTE => Some(RIGHT_SINGLE_QUOTE),
        _ => None,
    }
}

/// Map full-width CJK punctuation to its ASCII twin; other chars pass through.
#[inline]
pub fn normalize_punctuation(ch: char) -> char {
    match ch {
        '。' | '·' => '.',
        '，' | '、' => ',',
        '；' => ';',
        '：' => ':',
        '（' => '(',
        '）' => ')',
        '［' | '【' => '[',
        '］' | '】' => ']',
        '｛' => '{',
        '｝' => '}',
        '！' => '!',
        '？' => '?',
        _ => ch,
    }
}

/// Decode the character following a backslash inside a string.
#[inline]
pub fn unescape(ch: char) -> char {
    match ch {
        'n' => '\n',
        't' => '\t',
        'r' => '\r',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_classes() {
        assert!(is_identifier_start('变'));
        assert!(is_identifier_start('_'));
        assert!(!is_identifier_start('1'));
        assert!(is_identifier_part('1'));
        assert!(!is_identifier_start('$'));
        assert!(!is_identifier_start('。'));
    }

    #[test]
    fn test_closing_quotes() {
        assert_eq!(closing_quote('"'), Some('"'));
        assert_eq!(closing_quote(LEFT_DOUBLE_QUOTE), Some(RIGHT_DOUBLE_QUOTE));
        assert_eq!(closing_quote(LEFT_SINGLE_QUOTE), Some(RIGHT_SINGLE_QUOTE));
        assert_eq!(closing_quote(RIGHT_SINGLE_QUOTE), Some(RIGHT_SINGLE_QUOTE));
        assert_eq!(closing_quote('a'), None);
    }

    #[test]
    fn test_normalize_punctuation() {
        assert_eq!(normalize_punctuation('，'), ',');
        assert_eq!(normalize_punctuation('【'), '[');
        assert_eq!(normalize_punctuation('·'), '.');
        assert_eq!(normalize_punctuation('x'), 'x');
    }
}
