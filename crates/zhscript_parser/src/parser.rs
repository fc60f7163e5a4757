//! The zhscript parser implementation.
//!
//! A recursive descent parser over a token slice with a single forward
//! cursor. Each expression precedence level is one method calling the next.
//! Lookahead past the current token is only used to tell JSX apart from the
//! `<` operator.

use bumpalo::Bump;
use zhscript_ast::*;
use zhscript_diagnostics::{messages, DiagnosticMessage};
use zhscript_scanner::{Token, TokenKind};

use crate::error::{describe, ParseError};
use crate::precedence::*;

/// Maximum nesting depth before the parser gives up instead of overflowing the stack.
pub const MAX_RECURSION_DEPTH: u32 = 200;

type ParseResult<T> = Result<T, ParseError>;

/// Parse a token stream into a [`Program`] allocated in `arena`.
///
/// The stream normally ends with the `Eof` token produced by `tokenize`; if it
/// does not, an `Eof` right after the last token is assumed.
pub fn parse<'a>(arena: &'a Bump, tokens: &[Token]) -> ParseResult<Program<'a>> {
    if tokens.last().map_or(false, |t| t.kind == TokenKind::Eof) {
        return Parser::new(arena, tokens).parse_program();
    }
    let mut owned = tokens.to_vec();
    owned.push(synthetic_eof(tokens.last()));
    Parser::new(arena, &owned).parse_program()
}

fn synthetic_eof(last: Option<&Token>) -> Token {
    match last {
        Some(last) => {
            let width = last.end - last.start;
            let position = zhscript_core::Position::new(last.line, last.column + width);
            Token::new(TokenKind::Eof, "", position, last.end, last.end)
        }
        None => Token::new(TokenKind::Eof, "", zhscript_core::Position::new(1, 1), 0, 0),
    }
}

/// The result of parsing something that starts with `<`.
enum JsxNode<'a> {
    Element(JsxElement<'a>),
    Fragment(JsxFragment<'a>),
}

/// The parser produces a Program AST from a token stream ending in `Eof`.
struct Parser<'a, 't> {
    arena: &'a Bump,
    tokens: &'t [Token],
    pos: usize,
    /// End offset of the most recently consumed token.
    prev_end: u32,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a, 't> Parser<'a, 't> {
    fn new(arena: &'a Bump, tokens: &'t [Token]) -> Self {
        debug_assert!(tokens.last().map_or(false, |t| t.kind == TokenKind::Eof));
        Self {
            arena,
            tokens,
            pos: 0,
            prev_end: 0,
            recursion_depth: 0,
        }
    }

    fn parse_program(mut self) -> ParseResult<Program<'a>> {
        let mut body = Vec::new();
        while !self.at(TokenKind::Eof) {
            body.push(self.parse_statement()?);
        }
        let end = self.current().end;
        Ok(Program {
            data: NodeData::new(0, end, 1, 1),
            body: self.alloc_slice(body),
        })
    }

    // ========================================================================
    // Token management
    // ========================================================================

    #[inline]
    fn current(&self) -> &'t Token {
        let tokens = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    #[inline]
    fn peek(&self, offset: usize) -> &'t Token {
        let tokens = self.tokens;
        &tokens[(self.pos + offset).min(tokens.len() - 1)]
    }

    #[inline]
    fn at(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    /// Consume the current token and return it. The cursor never moves past `Eof`.
    fn next_token(&mut self) -> &'t Token {
        let token = self.current();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        self.prev_end = token.end;
        token
    }

    fn expect_token(&mut self, kind: TokenKind) -> ParseResult<&'t Token> {
        if self.at(kind) {
            Ok(self.next_token())
        } else {
            Err(ParseError::expected(kind, self.current()))
        }
    }

    fn optional_token(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Statement terminator: consumed if present, optional only before `}` or the end.
    fn parse_expected_semicolon(&mut self) -> ParseResult<()> {
        match self.current().kind {
            TokenKind::Semicolon => {
                self.next_token();
                Ok(())
            }
            TokenKind::CloseBrace | TokenKind::Eof => Ok(()),
            _ => Err(ParseError::expected(TokenKind::Semicolon, self.current())),
        }
    }

    fn error_at(&self, token: &Token, message: &DiagnosticMessage, args: &[&str]) -> ParseError {
        ParseError::at(token, message, args)
    }

    fn unexpected(&self, token: &Token) -> ParseError {
        self.error_at(token, &messages::UNEXPECTED_TOKEN_0, &[&describe(token)])
    }

    /// Node data spanning from `start` to the end of the last consumed token.
    fn finish(&self, start: &Token) -> NodeData {
        let end = self.prev_end.max(start.start);
        NodeData::new(start.start, end, start.line, start.column)
    }

    fn token_data(token: &Token) -> NodeData {
        NodeData::new(token.start, token.end, token.line, token.column)
    }

    fn guarded<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.recursion_depth >= MAX_RECURSION_DEPTH {
            let limit = MAX_RECURSION_DEPTH.to_string();
            return Err(self.error_at(self.current(), &messages::NESTING_TOO_DEEP, &[&limit]));
        }
        self.recursion_depth += 1;
        let result = f(self);
        self.recursion_depth -= 1;
        result
    }

    // ========================================================================
    // Arena helpers
    // ========================================================================

    #[inline]
    fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    fn alloc_slice<T>(&self, items: Vec<T>) -> &'a [T] {
        if items.is_empty() {
            return &[];
        }
        self.arena.alloc_slice_fill_iter(items)
    }

    #[inline]
    fn alloc_str(&self, s: &str) -> &'a str {
        self.arena.alloc_str(s)
    }

    fn expect_identifier(&mut self) -> ParseResult<Identifier<'a>> {
        let token = self.expect_token(TokenKind::Identifier)?;
        Ok(Identifier {
            data: Self::token_data(token),
            name: self.alloc_str(&token.text),
        })
    }

    /// A name after `.`: identifiers and any keyword spelling.
    fn expect_property_name(&mut self) -> ParseResult<Identifier<'a>> {
        let token = self.current();
        if token.kind == TokenKind::Identifier || token.kind.is_keyword() || is_word_literal(token.kind) {
            self.next_token();
            Ok(Identifier {
                data: Self::token_data(token),
                name: self.alloc_str(&token.text),
            })
        } else {
            Err(ParseError::expected(TokenKind::Identifier, token))
        }
    }

    // ========================================================================
    // Statement parsing
    // ========================================================================

    fn parse_statement(&mut self) -> ParseResult<Statement<'a>> {
        self.guarded(|p| match p.current().kind {
            TokenKind::Let | TokenKind::Const => {
                let start = p.current();
                let mut declaration = p.parse_variable_declaration()?;
                p.parse_expected_semicolon()?;
                declaration.data = p.finish(start);
                Ok(Statement::VariableDeclaration(declaration))
            }
            TokenKind::Function | TokenKind::Component => p.parse_function_declaration(),
            TokenKind::OpenBrace => Ok(Statement::BlockStatement(p.parse_block()?)),
            TokenKind::If => p.parse_if_statement(),
            TokenKind::While => p.parse_while_statement(),
            TokenKind::For => p.parse_for_statement(),
            TokenKind::Return => p.parse_return_statement(),
            TokenKind::Break => {
                let start = p.next_token();
                p.parse_expected_semicolon()?;
                Ok(Statement::BreakStatement(p.finish(start)))
            }
            TokenKind::Continue => {
                let start = p.next_token();
                p.parse_expected_semicolon()?;
                Ok(Statement::ContinueStatement(p.finish(start)))
            }
            TokenKind::Import => p.parse_import_declaration(),
            TokenKind::Export => p.parse_export_declaration(),
            _ => p.parse_expression_statement(),
        })
    }

    fn parse_block(&mut self) -> ParseResult<BlockStatement<'a>> {
        let start = self.expect_token(TokenKind::OpenBrace)?;
        let mut body = Vec::new();
        while !self.at(TokenKind::CloseBrace) {
            if self.at(TokenKind::Eof) {
                return Err(ParseError::expected(TokenKind::CloseBrace, self.current()));
            }
            body.push(self.parse_statement()?);
        }
        self.next_token();
        Ok(BlockStatement {
            data: self.finish(start),
            body: self.alloc_slice(body),
        })
    }

    /// `令`/`常量` and its declarators, without the terminator.
    fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration<'a>> {
        let start = self.next_token();
        let kind = if start.kind == TokenKind::Const {
            VariableKind::Const
        } else {
            VariableKind::Let
        };
        let mut declarations = Vec::new();
        loop {
            declarations.push(self.parse_variable_declarator()?);
            if !self.optional_token(TokenKind::Comma) {
                break;
            }
        }
        Ok(VariableDeclaration {
            data: self.finish(start),
            kind,
            declarations: self.alloc_slice(declarations),
        })
    }

    fn parse_variable_declarator(&mut self) -> ParseResult<VariableDeclarator<'a>> {
        let start = self.current();
        let target = if self.at(TokenKind::OpenBracket) {
            BindingTarget::ArrayPattern(self.parse_array_pattern()?)
        } else {
            BindingTarget::Identifier(self.expect_identifier()?)
        };
        let init = if self.optional_token(TokenKind::Equals) {
            let value = self.parse_assignment_expression()?;
            Some(self.alloc(value))
        } else {
            None
        };
        Ok(VariableDeclarator {
            data: self.finish(start),
            target,
            init,
        })
    }

    /// `[a, , b]`: identifiers and holes only.
    fn parse_array_pattern(&mut self) -> ParseResult<ArrayPattern<'a>> {
        let start = self.expect_token(TokenKind::OpenBracket)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::CloseBracket) {
            match self.current().kind {
                TokenKind::Comma => {
                    self.next_token();
                    elements.push(None);
                    continue;
                }
                TokenKind::OpenBracket | TokenKind::OpenBrace => {
                    return Err(self.error_at(self.current(), &messages::NESTED_PATTERNS_ARE_NOT_SUPPORTED, &[]));
                }
                _ => elements.push(Some(self.expect_identifier()?)),
            }
            if !self.at(TokenKind::CloseBracket) {
                self.expect_token(TokenKind::Comma)?;
            }
        }
        self.next_token();
        Ok(ArrayPattern {
            data: self.finish(start),
            elements: self.alloc_slice(elements),
        })
    }

    fn parse_function_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token(); // 函数 or 组件
        let name = self.expect_identifier()?;
        self.expect_token(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        if !self.at(TokenKind::CloseParen) {
            loop {
                params.push(self.expect_identifier()?);
                if !self.optional_token(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect_token(TokenKind::CloseParen)?;
        let body = self.parse_block()?;
        Ok(Statement::FunctionDeclaration(FunctionDeclaration {
            data: self.finish(start),
            name,
            params: self.alloc_slice(params),
            body,
        }))
    }

    /// `(expr)` as required by `如果`, `当`.
    fn parse_parenthesized_condition(&mut self) -> ParseResult<&'a Expression<'a>> {
        self.expect_token(TokenKind::OpenParen)?;
        let test = self.parse_expression()?;
        self.expect_token(TokenKind::CloseParen)?;
        Ok(self.alloc(test))
    }

    fn parse_if_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token();
        let test = self.parse_parenthesized_condition()?;
        let consequent = self.parse_statement()?;
        let consequent = self.alloc(consequent);
        // `否则 如果` needs no rule of its own: the alternate is just another statement.
        let alternate = if self.optional_token(TokenKind::Else) {
            let alternate = self.parse_statement()?;
            Some(self.alloc(alternate))
        } else {
            None
        };
        Ok(Statement::IfStatement(IfStatement {
            data: self.finish(start),
            test,
            consequent,
            alternate,
        }))
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token();
        let test = self.parse_parenthesized_condition()?;
        let body = self.parse_statement()?;
        Ok(Statement::WhileStatement(WhileStatement {
            data: self.finish(start),
            test,
            body: self.alloc(body),
        }))
    }

    fn parse_for_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token();
        self.expect_token(TokenKind::OpenParen)?;

        let init = match self.current().kind {
            TokenKind::Semicolon => None,
            TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_variable_declaration()?;
                Some(ForInit::VariableDeclaration(self.alloc(declaration)))
            }
            _ => {
                let expression = self.parse_expression()?;
                Some(ForInit::Expression(self.alloc(expression)))
            }
        };
        self.expect_token(TokenKind::Semicolon)?;

        let test = if self.at(TokenKind::Semicolon) {
            None
        } else {
            let test = self.parse_expression()?;
            Some(self.alloc(test))
        };
        self.expect_token(TokenKind::Semicolon)?;

        let update = if self.at(TokenKind::CloseParen) {
            None
        } else {
            let update = self.parse_expression()?;
            Some(self.alloc(update))
        };
        self.expect_token(TokenKind::CloseParen)?;

        let body = self.parse_statement()?;
        Ok(Statement::ForStatement(ForStatement {
            data: self.finish(start),
            init,
            test,
            update,
            body: self.alloc(body),
        }))
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token();
        let argument = match self.current().kind {
            TokenKind::Semicolon | TokenKind::CloseBrace | TokenKind::Eof => None,
            _ => {
                let argument = self.parse_expression()?;
                Some(self.alloc(argument))
            }
        };
        self.parse_expected_semicolon()?;
        Ok(Statement::ReturnStatement(ReturnStatement {
            data: self.finish(start),
            argument,
        }))
    }

    /// `导入 { a, b } 从 "模块";`
    fn parse_import_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token();
        self.expect_token(TokenKind::OpenBrace)?;
        let mut specifiers = Vec::new();
        while !self.at(TokenKind::CloseBrace) {
            specifiers.push(self.expect_identifier()?);
            if !self.optional_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect_token(TokenKind::CloseBrace)?;
        self.expect_token(TokenKind::From)?;
        let source_token = self.expect_token(TokenKind::String)?;
        let value = self.alloc_str(&source_token.text);
        let source = Literal {
            data: Self::token_data(source_token),
            value: LiteralValue::String(value),
            raw: value,
        };
        self.parse_expected_semicolon()?;
        Ok(Statement::ImportDeclaration(ImportDeclaration {
            data: self.finish(start),
            specifiers: self.alloc_slice(specifiers),
            source,
        }))
    }

    fn parse_export_declaration(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.next_token();
        let is_default = self.optional_token(TokenKind::Default);
        let declaration = self.parse_statement()?;
        Ok(Statement::ExportDeclaration(ExportDeclaration {
            data: self.finish(start),
            declaration: self.alloc(declaration),
            is_default,
        }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Statement<'a>> {
        let start = self.current();
        let expression = self.parse_expression()?;
        self.parse_expected_semicolon()?;
        Ok(Statement::ExpressionStatement(ExpressionStatement {
            data: self.finish(start),
            expression: self.alloc(expression),
        }))
    }

    // ========================================================================
    // Expression parsing
    // ========================================================================

    fn parse_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_assignment_expression()
    }

    /// Right-associative: `a = b = c` is `a = (b = c)`.
    fn parse_assignment_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.guarded(|p| {
            let start = p.current();
            let left = p.parse_conditional_expression()?;
            let Some(operator) = assignment_operator(p.current().kind) else {
                return Ok(left);
            };
            if !left.is_assignment_target() {
                return Err(p.error_at(start, &messages::INVALID_ASSIGNMENT_TARGET, &[]));
            }
            p.next_token();
            let right = p.parse_assignment_expression()?;
            Ok(Expression::Assignment(AssignmentExpression {
                data: p.finish(start),
                operator,
                left: p.alloc(left),
                right: p.alloc(right),
            }))
        })
    }

    fn parse_conditional_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.current();
        let test = self.parse_logical_or_expression()?;
        if !self.optional_token(TokenKind::Question) {
            return Ok(test);
        }
        let consequent = self.parse_assignment_expression()?;
        self.expect_token(TokenKind::Colon)?;
        let alternate = self.parse_assignment_expression()?;
        Ok(Expression::Conditional(ConditionalExpression {
            data: self.finish(start),
            test: self.alloc(test),
            consequent: self.alloc(consequent),
            alternate: self.alloc(alternate),
        }))
    }

    /// One left-associative binary level: `next (op next)*`.
    fn parse_binary_level(
        &mut self,
        next: fn(&mut Self) -> ParseResult<Expression<'a>>,
        operator_of: fn(TokenKind) -> Option<BinaryOperator>,
    ) -> ParseResult<Expression<'a>> {
        let start = self.current();
        let mut left = next(self)?;
        while let Some(operator) = operator_of(self.current().kind) {
            self.next_token();
            let right = next(self)?;
            left = self.make_binary(start, operator, left, right);
        }
        Ok(left)
    }

    fn make_binary(
        &self,
        start: &Token,
        operator: BinaryOperator,
        left: Expression<'a>,
        right: Expression<'a>,
    ) -> Expression<'a> {
        Expression::Binary(BinaryExpression {
            data: self.finish(start),
            operator,
            left: self.alloc(left),
            right: self.alloc(right),
        })
    }

    fn parse_logical_or_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_binary_level(Self::parse_logical_and_expression, logical_or_operator)
    }

    fn parse_logical_and_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_binary_level(Self::parse_equality_expression, logical_and_operator)
    }

    fn parse_equality_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_binary_level(Self::parse_relational_expression, equality_operator)
    }

    fn parse_relational_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_binary_level(Self::parse_additive_expression, relational_operator)
    }

    fn parse_additive_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_binary_level(Self::parse_multiplicative_expression, additive_operator)
    }

    fn parse_multiplicative_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.parse_binary_level(Self::parse_power_expression, multiplicative_operator)
    }

    /// Right-associative by recursing into itself: `2 ** 3 ** 2` is `2 ** (3 ** 2)`.
    fn parse_power_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.current();
        let left = self.parse_unary_expression()?;
        if !self.optional_token(TokenKind::StarStar) {
            return Ok(left);
        }
        let right = self.guarded(Self::parse_power_expression)?;
        Ok(self.make_binary(start, BinaryOperator::Exponent, left, right))
    }

    fn parse_unary_expression(&mut self) -> ParseResult<Expression<'a>> {
        self.guarded(|p| {
            let Some(operator) = unary_operator(p.current().kind) else {
                return p.parse_call_or_member_expression();
            };
            let start = p.next_token();
            let argument = p.parse_unary_expression()?;
            Ok(Expression::Unary(UnaryExpression {
                data: p.finish(start),
                operator,
                prefix: true,
                argument: p.alloc(argument),
            }))
        })
    }

    /// Greedy left-to-right chain of calls, `.name` and `[expr]` accesses.
    fn parse_call_or_member_expression(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.current();
        let mut expression = self.parse_primary_expression()?;
        loop {
            expression = match self.current().kind {
                TokenKind::OpenParen => self.parse_call_rest(start, expression, false)?,
                TokenKind::Dot => {
                    self.next_token();
                    self.parse_property_access_rest(start, expression, false)?
                }
                TokenKind::OpenBracket => self.parse_element_access_rest(start, expression, false)?,
                TokenKind::QuestionDot => {
                    self.next_token();
                    match self.current().kind {
                        TokenKind::OpenParen => self.parse_call_rest(start, expression, true)?,
                        TokenKind::OpenBracket => self.parse_element_access_rest(start, expression, true)?,
                        _ => self.parse_property_access_rest(start, expression, true)?,
                    }
                }
                _ => return Ok(expression),
            };
        }
    }

    fn parse_call_rest(
        &mut self,
        start: &Token,
        callee: Expression<'a>,
        optional: bool,
    ) -> ParseResult<Expression<'a>> {
        let arguments = self.parse_arguments()?;
        Ok(Expression::Call(CallExpression {
            data: self.finish(start),
            callee: self.alloc(callee),
            arguments,
            optional,
        }))
    }

    fn parse_property_access_rest(
        &mut self,
        start: &Token,
        object: Expression<'a>,
        optional: bool,
    ) -> ParseResult<Expression<'a>> {
        let name = self.expect_property_name()?;
        Ok(Expression::Member(MemberExpression {
            data: self.finish(start),
            object: self.alloc(object),
            property: self.alloc(Expression::Identifier(name)),
            computed: false,
            optional,
        }))
    }

    fn parse_element_access_rest(
        &mut self,
        start: &Token,
        object: Expression<'a>,
        optional: bool,
    ) -> ParseResult<Expression<'a>> {
        self.expect_token(TokenKind::OpenBracket)?;
        let property = self.parse_expression()?;
        self.expect_token(TokenKind::CloseBracket)?;
        Ok(Expression::Member(MemberExpression {
            data: self.finish(start),
            object: self.alloc(object),
            property: self.alloc(property),
            computed: true,
            optional,
        }))
    }

    fn parse_arguments(&mut self) -> ParseResult<&'a [Expression<'a>]> {
        self.expect_token(TokenKind::OpenParen)?;
        let mut arguments = Vec::new();
        while !self.at(TokenKind::CloseParen) {
            arguments.push(self.parse_assignment_expression()?);
            if !self.optional_token(TokenKind::Comma) {
                break;
            }
        }
        self.expect_token(TokenKind::CloseParen)?;
        Ok(self.alloc_slice(arguments))
    }

    fn parse_primary_expression(&mut self) -> ParseResult<Expression<'a>> {
        let token = self.current();
        let literal = |p: &Self, value: LiteralValue<'a>| {
            Expression::Literal(Literal {
                data: Self::token_data(token),
                value,
                raw: p.alloc_str(&token.text),
            })
        };

        match token.kind {
            TokenKind::Number => {
                let Some(value) = numeric_value(&token.text) else {
                    return Err(self.error_at(token, &messages::INVALID_NUMERIC_LITERAL_0, &[&token.text]));
                };
                self.next_token();
                Ok(literal(self, LiteralValue::Number(value)))
            }
            TokenKind::String => {
                self.next_token();
                let value = self.alloc_str(&token.text);
                Ok(Expression::Literal(Literal {
                    data: Self::token_data(token),
                    value: LiteralValue::String(value),
                    raw: value,
                }))
            }
            TokenKind::Template => {
                self.next_token();
                let value = self.alloc_str(&token.text);
                Ok(Expression::Literal(Literal {
                    data: Self::token_data(token),
                    value: LiteralValue::Template(value),
                    raw: value,
                }))
            }
            TokenKind::True | TokenKind::False => {
                self.next_token();
                Ok(literal(self, LiteralValue::Boolean(token.kind == TokenKind::True)))
            }
            TokenKind::Null => {
                self.next_token();
                Ok(literal(self, LiteralValue::Null))
            }
            TokenKind::Undefined => {
                self.next_token();
                Ok(Expression::Identifier(Identifier {
                    data: Self::token_data(token),
                    name: "undefined",
                }))
            }
            TokenKind::Identifier => Ok(Expression::Identifier(self.expect_identifier()?)),
            TokenKind::OpenBracket => self.parse_array_literal(),
            TokenKind::OpenBrace => self.parse_object_literal(),
            TokenKind::OpenParen => {
                self.next_token();
                let expression = self.parse_expression()?;
                self.expect_token(TokenKind::CloseParen)?;
                Ok(expression)
            }
            TokenKind::LessThan if self.is_start_of_jsx() => match self.parse_jsx_element_or_fragment()? {
                JsxNode::Element(element) => Ok(Expression::JsxElement(element)),
                JsxNode::Fragment(fragment) => Ok(Expression::JsxFragment(fragment)),
            },
            _ => Err(self.unexpected(token)),
        }
    }

    /// `[1, , 2]` keeps the hole as `None`; a trailing comma adds nothing.
    fn parse_array_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.expect_token(TokenKind::OpenBracket)?;
        let mut elements = Vec::new();
        while !self.at(TokenKind::CloseBracket) {
            if self.optional_token(TokenKind::Comma) {
                elements.push(None);
                continue;
            }
            elements.push(Some(self.parse_assignment_expression()?));
            if !self.at(TokenKind::CloseBracket) {
                self.expect_token(TokenKind::Comma)?;
            }
        }
        self.next_token();
        Ok(Expression::Array(ArrayExpression {
            data: self.finish(start),
            elements: self.alloc_slice(elements),
        }))
    }

    /// `{ key: value, ... }` with identifier keys.
    fn parse_object_literal(&mut self) -> ParseResult<Expression<'a>> {
        let start = self.expect_token(TokenKind::OpenBrace)?;
        let mut properties = Vec::new();
        while !self.at(TokenKind::CloseBrace) {
            let property_start = self.current();
            let key = self.expect_identifier()?;
            self.expect_token(TokenKind::Colon)?;
            let value = self.parse_assignment_expression()?;
            properties.push(Property {
                data: self.finish(property_start),
                key,
                value: self.alloc(value),
            });
            if !self.at(TokenKind::CloseBrace) {
                self.expect_token(TokenKind::Comma)?;
            }
        }
        self.next_token();
        Ok(Expression::Object(ObjectExpression {
            data: self.finish(start),
            properties: self.alloc_slice(properties),
        }))
    }

    // ========================================================================
    // JSX parsing
    // ========================================================================

    /// `<` starts JSX only when an identifier or `>` follows it.
    fn is_start_of_jsx(&self) -> bool {
        self.at(TokenKind::LessThan)
            && matches!(self.peek(1).kind, TokenKind::Identifier | TokenKind::GreaterThan)
    }

    fn parse_jsx_element_or_fragment(&mut self) -> ParseResult<JsxNode<'a>> {
        self.guarded(|p| {
            let start = p.expect_token(TokenKind::LessThan)?;

            if p.optional_token(TokenKind::GreaterThan) {
                let children = p.parse_jsx_children()?;
                p.parse_fragment_close()?;
                return Ok(JsxNode::Fragment(JsxFragment {
                    data: p.finish(start),
                    children,
                }));
            }

            let name = p.parse_jsx_element_name()?;
            let mut attributes = Vec::new();
            while p.at(TokenKind::Identifier) {
                attributes.push(p.parse_jsx_attribute()?);
            }
            let attributes = p.alloc_slice(attributes);

            if p.optional_token(TokenKind::SlashGreaterThan) {
                return Ok(JsxNode::Element(JsxElement {
                    data: p.finish(start),
                    name,
                    attributes,
                    children: &[],
                    self_closing: true,
                }));
            }

            p.expect_token(TokenKind::GreaterThan)?;
            let children = p.parse_jsx_children()?;
            p.expect_token(TokenKind::LessThanSlash)?;
            let closing_start = p.current();
            let closing = p.parse_jsx_element_name()?;
            if !closing.same_name(&name) {
                return Err(p.error_at(
                    closing_start,
                    &messages::MISMATCHED_CLOSING_TAG_0_EXPECTED_1,
                    &[&closing.to_text(), &name.to_text()],
                ));
            }
            p.expect_token(TokenKind::GreaterThan)?;

            Ok(JsxNode::Element(JsxElement {
                data: p.finish(start),
                name,
                attributes,
                children,
                self_closing: false,
            }))
        })
    }

    /// `</>` arrives as `<` `/>`; `</ >` arrives as `</` `>`.
    fn parse_fragment_close(&mut self) -> ParseResult<()> {
        let closes = match self.current().kind {
            TokenKind::LessThan => self.peek(1).kind == TokenKind::SlashGreaterThan,
            TokenKind::LessThanSlash => self.peek(1).kind == TokenKind::GreaterThan,
            _ => false,
        };
        if !closes {
            return Err(ParseError::expected(TokenKind::LessThanSlash, self.current()));
        }
        self.next_token();
        self.next_token();
        Ok(())
    }

    fn is_at_jsx_closing(&self) -> bool {
        match self.current().kind {
            TokenKind::LessThanSlash => true,
            TokenKind::LessThan => self.peek(1).kind == TokenKind::SlashGreaterThan,
            _ => false,
        }
    }

    fn parse_jsx_element_name(&mut self) -> ParseResult<JsxElementName<'a>> {
        let start = self.current();
        let mut name = JsxElementName::Identifier(self.expect_identifier()?);
        while self.optional_token(TokenKind::Dot) {
            let property = self.expect_identifier()?;
            name = JsxElementName::Member(JsxMemberName {
                data: self.finish(start),
                object: self.alloc(name),
                property,
            });
        }
        Ok(name)
    }

    fn parse_jsx_attribute(&mut self) -> ParseResult<JsxAttribute<'a>> {
        let start = self.current();
        let name = self.expect_identifier()?;
        let value = if self.optional_token(TokenKind::Equals) {
            match self.current().kind {
                TokenKind::String => {
                    let token = self.next_token();
                    let value = self.alloc_str(&token.text);
                    Some(JsxAttributeValue::StringLiteral(Literal {
                        data: Self::token_data(token),
                        value: LiteralValue::String(value),
                        raw: value,
                    }))
                }
                TokenKind::OpenBrace => Some(JsxAttributeValue::ExpressionContainer(
                    self.parse_jsx_expression_container()?,
                )),
                _ => return Err(ParseError::expected(TokenKind::String, self.current())),
            }
        } else {
            None
        };
        Ok(JsxAttribute {
            data: self.finish(start),
            name,
            value,
        })
    }

    fn parse_jsx_expression_container(&mut self) -> ParseResult<JsxExpressionContainer<'a>> {
        let start = self.expect_token(TokenKind::OpenBrace)?;
        let expression = self.parse_expression()?;
        self.expect_token(TokenKind::CloseBrace)?;
        Ok(JsxExpressionContainer {
            data: self.finish(start),
            expression: self.alloc(expression),
        })
    }

    /// Children up to the closing `</`. Identifier and string tokens are text.
    fn parse_jsx_children(&mut self) -> ParseResult<&'a [JsxChild<'a>]> {
        let mut children = Vec::new();
        while !self.is_at_jsx_closing() {
            let token = self.current();
            let child = match token.kind {
                TokenKind::Identifier | TokenKind::String => {
                    self.next_token();
                    JsxChild::Text(JsxText {
                        data: Self::token_data(token),
                        value: self.alloc_str(&token.text),
                    })
                }
                TokenKind::OpenBrace => JsxChild::ExpressionContainer(self.parse_jsx_expression_container()?),
                TokenKind::LessThan => match self.parse_jsx_element_or_fragment()? {
                    JsxNode::Element(element) => JsxChild::Element(self.alloc(element)),
                    JsxNode::Fragment(fragment) => JsxChild::Fragment(self.alloc(fragment)),
                },
                _ => {
                    return Err(self.error_at(
                        token,
                        &messages::UNEXPECTED_TOKEN_0_IN_JSX_CHILDREN,
                        &[&describe(token)],
                    ))
                }
            };
            children.push(child);
        }
        Ok(self.alloc_slice(children))
    }
}

fn is_word_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::True | TokenKind::False | TokenKind::Null | TokenKind::Undefined
    )
}

/// Value of a numeric literal's raw text; radix prefixes are honored.
fn numeric_value(text: &str) -> Option<f64> {
    let radix = match text.get(..2) {
        Some("0x") | Some("0X") => 16,
        Some("0b") | Some("0B") => 2,
        Some("0o") | Some("0O") => 8,
        _ => return text.parse::<f64>().ok(),
    };
    u128::from_str_radix(&text[2..], radix).ok().map(|v| v as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use zhscript_scanner::tokenize;

    #[test]
    fn test_numeric_value() {
        assert_eq!(numeric_value("10"), Some(10.0));
        assert_eq!(numeric_value("3.5e2"), Some(350.0));
        assert_eq!(numeric_value("0xff"), Some(255.0));
        assert_eq!(numeric_value("0b101"), Some(5.0));
        assert_eq!(numeric_value("0o17"), Some(15.0));
        assert_eq!(numeric_value("0x"), None);
    }

    #[test]
    fn test_missing_eof_is_synthesized() {
        let arena = Bump::new();
        let mut tokens = tokenize("x");
        tokens.pop();
        let program = parse(&arena, &tokens).unwrap();
        assert_eq!(program.body.len(), 1);
    }

    #[test]
    fn test_empty_token_slice() {
        let arena = Bump::new();
        let program = parse(&arena, &[]).unwrap();
        assert!(program.body.is_empty());
    }

    #[test]
    fn test_synthetic_eof_position() {
        let tokens = tokenize("令 名字");
        let eof = synthetic_eof(tokens.get(1));
        assert_eq!((eof.line, eof.column, eof.start, eof.end), (1, 5, 4, 4));
    }

    #[test]
    fn test_invalid_radix_literal_is_error() {
        let arena = Bump::new();
        let err = parse(&arena, &tokenize("令 x = 0x;")).unwrap_err();
        assert_eq!(err.message, "Invalid numeric literal 0x");
        assert_eq!((err.line, err.column), (1, 7));
    }
}
