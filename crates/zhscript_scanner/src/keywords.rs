//! The keyword table.
//!
//! Each Chinese surface keyword maps to a token kind and to the JavaScript
//! keyword it stands for. Both lookup maps are built once from [`KEYWORDS`]
//! and never change afterwards.

use crate::token::TokenKind;
use lazy_static::lazy_static;
use rustc_hash::FxHashMap;

/// One row of the keyword table.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub word: &'static str,
    pub kind: TokenKind,
    pub js: &'static str,
}

macro_rules! kw {
    ($word:expr, $kind:ident, $js:expr) => {
        Keyword { word: $word, kind: TokenKind::$kind, js: $js }
    };
}

pub const KEYWORDS: &[Keyword] = &[
    kw!("令", Let, "let"),
    kw!("常量", Const, "const"),
    kw!("函数", Function, "function"),
    kw!("组件", Component, "function"),
    kw!("返回", Return, "return"),
    kw!("如果", If, "if"),
    kw!("否则", Else, "else"),
    kw!("当", While, "while"),
    kw!("对于", For, "for"),
    kw!("跳出", Break, "break"),
    kw!("继续", Continue, "continue"),
    kw!("导入", Import, "import"),
    kw!("从", From, "from"),
    kw!("导出", Export, "export"),
    kw!("默认", Default, "default"),
    kw!("真", True, "true"),
    kw!("假", False, "false"),
    kw!("空", Null, "null"),
    kw!("未定义", Undefined, "undefined"),
    kw!("新建", New, "new"),
    kw!("这个", This, "this"),
    kw!("类", Class, "class"),
    kw!("继承", Extends, "extends"),
    kw!("尝试", Try, "try"),
    kw!("捕获", Catch, "catch"),
    kw!("最终", Finally, "finally"),
    kw!("抛出", Throw, "throw"),
    kw!("类型", Typeof, "typeof"),
    kw!("异步", Async, "async"),
    kw!("等待", Await, "await"),
    kw!("选择", Switch, "switch"),
    kw!("情况", Case, "case"),
    kw!("执行", Do, "do"),
    kw!("在", In, "in"),
    kw!("属于", Instanceof, "instanceof"),
    kw!("删除", Delete, "delete"),
];

lazy_static! {
    static ref KEYWORD_KINDS: FxHashMap<&'static str, TokenKind> =
        KEYWORDS.iter().map(|k| (k.word, k.kind)).collect();
    static ref JS_EQUIVALENTS: FxHashMap<&'static str, &'static str> =
        KEYWORDS.iter().map(|k| (k.word, k.js)).collect();
}

/// Whether `word` is a surface keyword. Lookup is whole-word.
pub fn is_keyword(word: &str) -> bool {
    KEYWORD_KINDS.contains_key(word)
}

pub fn keyword_kind(word: &str) -> Option<TokenKind> {
    KEYWORD_KINDS.get(word).copied()
}

/// The JavaScript spelling of a surface keyword.
pub fn js_equivalent(word: &str) -> Option<&'static str> {
    JS_EQUIVALENTS.get(word).copied()
}

/// Literal kinds for the ASCII spellings `true`, `False`, `null`, ...
pub(crate) fn ascii_literal_kind(word: &str) -> Option<TokenKind> {
    match word {
        "true" | "True" => Some(TokenKind::True),
        "false" | "False" => Some(TokenKind::False),
        "null" | "Null" => Some(TokenKind::Null),
        "undefined" | "Undefined" => Some(TokenKind::Undefined),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup() {
        assert!(is_keyword("令"));
        assert_eq!(keyword_kind("令"), Some(TokenKind::Let));
        assert_eq!(js_equivalent("令"), Some("let"));
        assert_eq!(keyword_kind("组件"), Some(TokenKind::Component));
        assert_eq!(js_equivalent("组件"), Some("function"));
    }

    #[test]
    fn test_lookup_is_whole_word() {
        assert!(!is_keyword("令牌"));
        assert!(!is_keyword("函"));
        assert!(!is_keyword("let"));
        assert_eq!(js_equivalent("变量"), None);
    }

    #[test]
    fn test_table_is_consistent() {
        assert_eq!(KEYWORD_KINDS.len(), KEYWORDS.len());
        for k in KEYWORDS {
            assert_eq!(keyword_kind(k.word), Some(k.kind));
            assert_eq!(js_equivalent(k.word), Some(k.js));
        }
    }

    #[test]
    fn test_ascii_literal_spellings() {
        assert_eq!(ascii_literal_kind("True"), Some(TokenKind::True));
        assert_eq!(ascii_literal_kind("Undefined"), Some(TokenKind::Undefined));
        assert_eq!(ascii_literal_kind("NULL"), None);
    }
}
