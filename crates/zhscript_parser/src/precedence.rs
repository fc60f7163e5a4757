//! Token-to-operator tables, one per precedence level of the expression grammar.

use zhscript_ast::{AssignmentOperator, BinaryOperator, UnaryOperator};
use zhscript_scanner::TokenKind;

pub fn assignment_operator(kind: TokenKind) -> Option<AssignmentOperator> {
    match kind {
        TokenKind::Equals => Some(AssignmentOperator::Assign),
        TokenKind::PlusEquals => Some(AssignmentOperator::AddAssign),
        TokenKind::MinusEquals => Some(AssignmentOperator::SubtractAssign),
        TokenKind::StarEquals => Some(AssignmentOperator::MultiplyAssign),
        TokenKind::SlashEquals => Some(AssignmentOperator::DivideAssign),
        TokenKind::PercentEquals => Some(AssignmentOperator::RemainderAssign),
        _ => None,
    }
}

pub fn logical_or_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::BarBar => Some(BinaryOperator::LogicalOr),
        TokenKind::QuestionQuestion => Some(BinaryOperator::NullishCoalescing),
        _ => None,
    }
}

pub fn logical_and_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::AmpersandAmpersand => Some(BinaryOperator::LogicalAnd),
        _ => None,
    }
}

pub fn equality_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::EqualsEquals => Some(BinaryOperator::Equal),
        TokenKind::ExclamationEquals => Some(BinaryOperator::NotEqual),
        TokenKind::EqualsEqualsEquals => Some(BinaryOperator::StrictEqual),
        TokenKind::ExclamationEqualsEquals => Some(BinaryOperator::StrictNotEqual),
        _ => None,
    }
}

pub fn relational_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::LessThan => Some(BinaryOperator::LessThan),
        TokenKind::GreaterThan => Some(BinaryOperator::GreaterThan),
        TokenKind::LessThanEquals => Some(BinaryOperator::LessThanOrEqual),
        TokenKind::GreaterThanEquals => Some(BinaryOperator::GreaterThanOrEqual),
        _ => None,
    }
}

pub fn additive_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Subtract),
        _ => None,
    }
}

pub fn multiplicative_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Star => Some(BinaryOperator::Multiply),
        TokenKind::Slash => Some(BinaryOperator::Divide),
        TokenKind::Percent => Some(BinaryOperator::Remainder),
        _ => None,
    }
}

pub fn unary_operator(kind: TokenKind) -> Option<UnaryOperator> {
    match kind {
        TokenKind::Minus => Some(UnaryOperator::Minus),
        TokenKind::Plus => Some(UnaryOperator::Plus),
        TokenKind::Exclamation => Some(UnaryOperator::LogicalNot),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_are_disjoint() {
        let levels: [fn(TokenKind) -> Option<BinaryOperator>; 6] = [
            logical_or_operator,
            logical_and_operator,
            equality_operator,
            relational_operator,
            additive_operator,
            multiplicative_operator,
        ];
        for kind in [TokenKind::Plus, TokenKind::LessThan, TokenKind::QuestionQuestion, TokenKind::Percent] {
            let hits = levels.iter().filter(|level| level(kind).is_some()).count();
            assert_eq!(hits, 1, "{:?}", kind);
        }
    }

    #[test]
    fn test_operator_mapping() {
        assert_eq!(assignment_operator(TokenKind::PercentEquals), Some(AssignmentOperator::RemainderAssign));
        assert_eq!(assignment_operator(TokenKind::EqualsEquals), None);
        assert_eq!(unary_operator(TokenKind::Exclamation), Some(UnaryOperator::LogicalNot));
        assert_eq!(unary_operator(TokenKind::Star), None);
    }
}
