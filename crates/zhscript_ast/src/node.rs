//! AST node definitions for the zhscript compiler.
//!
//! Nodes reference child nodes via arena-allocated references and slices.
//! Every node carries a [`NodeData`] with its source span and the 1-based
//! line/column of its first token.

use crate::operators::{AssignmentOperator, BinaryOperator, UnaryOperator, VariableKind};
use zhscript_core::text::{Position, TextSpan};

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Common data shared by all AST nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeData {
    /// Source span in chars.
    pub span: TextSpan,
    /// 1-based line of the first token.
    pub line: u32,
    /// 1-based column of the first token.
    pub column: u32,
}

impl NodeData {
    pub fn new(start: u32, end: u32, line: u32, column: u32) -> Self {
        Self {
            span: TextSpan::from_bounds(start, end),
            line,
            column,
        }
    }

    #[inline]
    pub fn start(&self) -> u32 {
        self.span.start
    }

    #[inline]
    pub fn end(&self) -> u32 {
        self.span.end()
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

/// An optional arena-allocated node.
pub type OptionalNode<'a, T> = Option<&'a T>;

// ============================================================================
// Program
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct Program<'a> {
    pub data: NodeData,
    pub body: NodeList<'a, Statement<'a>>,
}

// ============================================================================
// Identifiers and Literals
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identifier<'a> {
    pub data: NodeData,
    pub name: &'a str,
}

/// The decoded value of a literal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralValue<'a> {
    Number(f64),
    String(&'a str),
    /// Backtick string, kept uninterpreted.
    Template(&'a str),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, Copy)]
pub struct Literal<'a> {
    pub data: NodeData,
    pub value: LiteralValue<'a>,
    /// Source text of the literal; for strings this is the decoded value.
    pub raw: &'a str,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Statement<'a> {
    VariableDeclaration(VariableDeclaration<'a>),
    FunctionDeclaration(FunctionDeclaration<'a>),
    BlockStatement(BlockStatement<'a>),
    IfStatement(IfStatement<'a>),
    WhileStatement(WhileStatement<'a>),
    ForStatement(ForStatement<'a>),
    ReturnStatement(ReturnStatement<'a>),
    BreakStatement(NodeData),
    ContinueStatement(NodeData),
    ImportDeclaration(ImportDeclaration<'a>),
    ExportDeclaration(ExportDeclaration<'a>),
    ExpressionStatement(ExpressionStatement<'a>),
}

impl<'a> Statement<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Statement::VariableDeclaration(n) => &n.data,
            Statement::FunctionDeclaration(n) => &n.data,
            Statement::BlockStatement(n) => &n.data,
            Statement::IfStatement(n) => &n.data,
            Statement::WhileStatement(n) => &n.data,
            Statement::ForStatement(n) => &n.data,
            Statement::ReturnStatement(n) => &n.data,
            Statement::BreakStatement(data) | Statement::ContinueStatement(data) => data,
            Statement::ImportDeclaration(n) => &n.data,
            Statement::ExportDeclaration(n) => &n.data,
            Statement::ExpressionStatement(n) => &n.data,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclaration<'a> {
    pub data: NodeData,
    pub kind: VariableKind,
    pub declarations: NodeList<'a, VariableDeclarator<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct VariableDeclarator<'a> {
    pub data: NodeData,
    pub target: BindingTarget<'a>,
    pub init: OptionalNode<'a, Expression<'a>>,
}

/// The left-hand side of a declarator.
#[derive(Debug, Clone, Copy)]
pub enum BindingTarget<'a> {
    Identifier(Identifier<'a>),
    ArrayPattern(ArrayPattern<'a>),
}

/// A flat array destructuring pattern. `None` marks a hole.
#[derive(Debug, Clone, Copy)]
pub struct ArrayPattern<'a> {
    pub data: NodeData,
    pub elements: NodeList<'a, Option<Identifier<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct FunctionDeclaration<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    pub params: NodeList<'a, Identifier<'a>>,
    pub body: BlockStatement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct BlockStatement<'a> {
    pub data: NodeData,
    pub body: NodeList<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct IfStatement<'a> {
    pub data: NodeData,
    pub test: &'a Expression<'a>,
    pub consequent: &'a Statement<'a>,
    pub alternate: OptionalNode<'a, Statement<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct WhileStatement<'a> {
    pub data: NodeData,
    pub test: &'a Expression<'a>,
    pub body: &'a Statement<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ForStatement<'a> {
    pub data: NodeData,
    pub init: Option<ForInit<'a>>,
    pub test: OptionalNode<'a, Expression<'a>>,
    pub update: OptionalNode<'a, Expression<'a>>,
    pub body: &'a Statement<'a>,
}

/// The first clause of a `for` header.
#[derive(Debug, Clone, Copy)]
pub enum ForInit<'a> {
    VariableDeclaration(&'a VariableDeclaration<'a>),
    Expression(&'a Expression<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct ReturnStatement<'a> {
    pub data: NodeData,
    pub argument: OptionalNode<'a, Expression<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ImportDeclaration<'a> {
    pub data: NodeData,
    pub specifiers: NodeList<'a, Identifier<'a>>,
    /// Always a string literal.
    pub source: Literal<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ExportDeclaration<'a> {
    pub data: NodeData,
    pub declaration: &'a Statement<'a>,
    pub is_default: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ExpressionStatement<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expression<'a> {
    Identifier(Identifier<'a>),
    Literal(Literal<'a>),
    Array(ArrayExpression<'a>),
    Object(ObjectExpression<'a>),
    Binary(BinaryExpression<'a>),
    Unary(UnaryExpression<'a>),
    Assignment(AssignmentExpression<'a>),
    Conditional(ConditionalExpression<'a>),
    Call(CallExpression<'a>),
    Member(MemberExpression<'a>),
    JsxElement(JsxElement<'a>),
    JsxFragment(JsxFragment<'a>),
}

impl<'a> Expression<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            Expression::Identifier(n) => &n.data,
            Expression::Literal(n) => &n.data,
            Expression::Array(n) => &n.data,
            Expression::Object(n) => &n.data,
            Expression::Binary(n) => &n.data,
            Expression::Unary(n) => &n.data,
            Expression::Assignment(n) => &n.data,
            Expression::Conditional(n) => &n.data,
            Expression::Call(n) => &n.data,
            Expression::Member(n) => &n.data,
            Expression::JsxElement(n) => &n.data,
            Expression::JsxFragment(n) => &n.data,
        }
    }

    /// Whether the expression may appear on the left of an assignment.
    pub fn is_assignment_target(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::Member(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BinaryExpression<'a> {
    pub data: NodeData,
    pub operator: BinaryOperator,
    pub left: &'a Expression<'a>,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct UnaryExpression<'a> {
    pub data: NodeData,
    pub operator: UnaryOperator,
    /// Always true; only prefix forms are parsed.
    pub prefix: bool,
    pub argument: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct AssignmentExpression<'a> {
    pub data: NodeData,
    pub operator: AssignmentOperator,
    pub left: &'a Expression<'a>,
    pub right: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConditionalExpression<'a> {
    pub data: NodeData,
    pub test: &'a Expression<'a>,
    pub consequent: &'a Expression<'a>,
    pub alternate: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub struct CallExpression<'a> {
    pub data: NodeData,
    pub callee: &'a Expression<'a>,
    pub arguments: NodeList<'a, Expression<'a>>,
    /// `f?.(x)`
    pub optional: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct MemberExpression<'a> {
    pub data: NodeData,
    pub object: &'a Expression<'a>,
    /// An identifier for `.name`, any expression for `[expr]`.
    pub property: &'a Expression<'a>,
    pub computed: bool,
    /// `a?.b` / `a?.[b]`
    pub optional: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct ArrayExpression<'a> {
    pub data: NodeData,
    /// `None` marks a hole.
    pub elements: NodeList<'a, Option<Expression<'a>>>,
}

#[derive(Debug, Clone, Copy)]
pub struct ObjectExpression<'a> {
    pub data: NodeData,
    pub properties: NodeList<'a, Property<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub struct Property<'a> {
    pub data: NodeData,
    pub key: Identifier<'a>,
    pub value: &'a Expression<'a>,
}

// ============================================================================
// JSX
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct JsxElement<'a> {
    pub data: NodeData,
    pub name: JsxElementName<'a>,
    pub attributes: NodeList<'a, JsxAttribute<'a>>,
    pub children: NodeList<'a, JsxChild<'a>>,
    pub self_closing: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct JsxFragment<'a> {
    pub data: NodeData,
    pub children: NodeList<'a, JsxChild<'a>>,
}

/// A tag name: `div` or a dotted path such as `界面.按钮`.
#[derive(Debug, Clone, Copy)]
pub enum JsxElementName<'a> {
    Identifier(Identifier<'a>),
    Member(JsxMemberName<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct JsxMemberName<'a> {
    pub data: NodeData,
    pub object: &'a JsxElementName<'a>,
    pub property: Identifier<'a>,
}

impl<'a> JsxElementName<'a> {
    pub fn data(&self) -> &NodeData {
        match self {
            JsxElementName::Identifier(id) => &id.data,
            JsxElementName::Member(m) => &m.data,
        }
    }

    /// The dotted source form of the name.
    pub fn to_text(&self) -> String {
        match self {
            JsxElementName::Identifier(id) => id.name.to_string(),
            JsxElementName::Member(m) => format!("{}.{}", m.object.to_text(), m.property.name),
        }
    }

    /// Structural name equality, used to match closing tags.
    pub fn same_name(&self, other: &JsxElementName<'_>) -> bool {
        match (self, other) {
            (JsxElementName::Identifier(a), JsxElementName::Identifier(b)) => a.name == b.name,
            (JsxElementName::Member(a), JsxElementName::Member(b)) => {
                a.property.name == b.property.name && a.object.same_name(b.object)
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JsxAttribute<'a> {
    pub data: NodeData,
    pub name: Identifier<'a>,
    /// `None` for boolean shorthand (`<input disabled />`).
    pub value: Option<JsxAttributeValue<'a>>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxAttributeValue<'a> {
    StringLiteral(Literal<'a>),
    ExpressionContainer(JsxExpressionContainer<'a>),
}

#[derive(Debug, Clone, Copy)]
pub struct JsxExpressionContainer<'a> {
    pub data: NodeData,
    pub expression: &'a Expression<'a>,
}

#[derive(Debug, Clone, Copy)]
pub enum JsxChild<'a> {
    Text(JsxText<'a>),
    ExpressionContainer(JsxExpressionContainer<'a>),
    Element(&'a JsxElement<'a>),
    Fragment(&'a JsxFragment<'a>),
}

/// Verbatim text content; produced from identifier and string tokens.
#[derive(Debug, Clone, Copy)]
pub struct JsxText<'a> {
    pub data: NodeData,
    pub value: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str, start: u32) -> Identifier<'_> {
        Identifier {
            data: NodeData::new(start, start + name.chars().count() as u32, 1, start + 1),
            name,
        }
    }

    #[test]
    fn test_node_data_bounds() {
        let data = NodeData::new(3, 7, 1, 4);
        assert_eq!(data.start(), 3);
        assert_eq!(data.end(), 7);
        assert_eq!(data.position(), Position::new(1, 4));
    }

    #[test]
    fn test_jsx_member_name_text_and_equality() {
        let object = JsxElementName::Identifier(ident("界面", 1));
        let a = JsxElementName::Member(JsxMemberName {
            data: NodeData::new(1, 6, 1, 2),
            object: &object,
            property: ident("按钮", 4),
        });
        let b = JsxElementName::Member(JsxMemberName {
            data: NodeData::new(10, 15, 1, 11),
            object: &object,
            property: ident("按钮", 13),
        });
        assert_eq!(a.to_text(), "界面.按钮");
        assert!(a.same_name(&b));
        assert!(!a.same_name(&object));
    }

    #[test]
    fn test_assignment_targets() {
        let id = Expression::Identifier(ident("x", 0));
        assert!(id.is_assignment_target());
        let lit = Expression::Literal(Literal {
            data: NodeData::new(0, 1, 1, 1),
            value: LiteralValue::Number(1.0),
            raw: "1",
        });
        assert!(!lit.is_assignment_target());
    }
}
