//! zhscript_printer: AST to JavaScript text.
//!
//! Walks a parsed [`Program`] and produces the equivalent JavaScript source.
//! Every node kind is handled; JSX is lowered to factory calls. Indentation
//! depth is passed down explicitly, so a printer carries no depth state.

mod precedence;

use precedence::*;
use zhscript_ast::*;

/// Options for the printer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterOptions {
    /// Spaces per nesting level.
    pub indent_width: usize,
    /// Whether to end non-empty output with a newline.
    pub trailing_newline: bool,
    /// Function JSX elements are lowered to.
    pub jsx_factory: String,
    /// Tag passed to the factory for fragments.
    pub jsx_fragment: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            trailing_newline: false,
            jsx_factory: "React.createElement".to_string(),
            jsx_fragment: "React.Fragment".to_string(),
        }
    }
}

/// Transpile a program to JavaScript with the default options.
pub fn transpile(program: &Program<'_>) -> String {
    Printer::new().print_program(program)
}

pub fn transpile_with_options(program: &Program<'_>, options: &PrinterOptions) -> String {
    Printer::with_options(options.clone()).print_program(program)
}

/// The printer converts AST nodes to text.
pub struct Printer {
    output: String,
    options: PrinterOptions,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(4096),
            options,
        }
    }

    /// Print a whole program. Top-level statements are separated by newlines.
    pub fn print_program(&mut self, program: &Program<'_>) -> String {
        self.output.clear();
        for (i, stmt) in program.body.iter().enumerate() {
            if i > 0 {
                self.write_newline();
            }
            self.print_statement(stmt, 0);
        }
        if self.options.trailing_newline && !self.output.is_empty() {
            self.write_newline();
        }
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Statement printing
    // ========================================================================

    /// Print `stmt` at the current position. `depth` is the nesting level of
    /// the line the statement starts on.
    fn print_statement(&mut self, stmt: &Statement<'_>, depth: usize) {
        match stmt {
            Statement::VariableDeclaration(n) => {
                self.print_variable_declaration(n, depth);
                self.write(";");
            }
            Statement::FunctionDeclaration(n) => self.print_function_declaration(n, depth),
            Statement::BlockStatement(n) => self.print_block(n, depth),
            Statement::IfStatement(n) => self.print_if_statement(n, depth),
            Statement::WhileStatement(n) => {
                self.write("while (");
                self.print_expression(n.test, depth);
                self.write(") ");
                self.print_statement(n.body, depth);
            }
            Statement::ForStatement(n) => self.print_for_statement(n, depth),
            Statement::ReturnStatement(n) => {
                self.write("return");
                if let Some(argument) = n.argument {
                    self.write(" ");
                    self.print_expression(argument, depth);
                }
                self.write(";");
            }
            Statement::BreakStatement(_) => self.write("break;"),
            Statement::ContinueStatement(_) => self.write("continue;"),
            Statement::ImportDeclaration(n) => self.print_import_declaration(n),
            Statement::ExportDeclaration(n) => {
                self.write("export ");
                if n.is_default {
                    self.write("default ");
                }
                self.print_statement(n.declaration, depth);
            }
            Statement::ExpressionStatement(n) => {
                // A leading `{` would read as a block.
                if starts_with_object(n.expression) {
                    self.write("(");
                    self.print_expression(n.expression, depth);
                    self.write(")");
                } else {
                    self.print_expression(n.expression, depth);
                }
                self.write(";");
            }
        }
    }

    fn print_block(&mut self, node: &BlockStatement<'_>, depth: usize) {
        self.write("{");
        if !node.body.is_empty() {
            for stmt in node.body {
                self.write_newline();
                self.write_indent(depth + 1);
                self.print_statement(stmt, depth + 1);
            }
            self.write_newline();
            self.write_indent(depth);
        }
        self.write("}");
    }

    /// Declaration without the terminator, shared with `for` headers.
    fn print_variable_declaration(&mut self, node: &VariableDeclaration<'_>, depth: usize) {
        self.write(node.kind.as_str());
        self.write(" ");
        for (i, declarator) in node.declarations.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match declarator.target {
                BindingTarget::Identifier(id) => self.write(id.name),
                BindingTarget::ArrayPattern(pattern) => self.print_array_pattern(&pattern),
            }
            if let Some(init) = declarator.init {
                self.write(" = ");
                self.print_operand(init, ASSIGNMENT, depth);
            }
        }
    }

    fn print_array_pattern(&mut self, pattern: &ArrayPattern<'_>) {
        self.write("[");
        for (i, element) in pattern.elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(id) = element {
                self.write(id.name);
            }
        }
        if let Some(None) = pattern.elements.last() {
            self.write(",");
        }
        self.write("]");
    }

    fn print_function_declaration(&mut self, node: &FunctionDeclaration<'_>, depth: usize) {
        self.write("function ");
        self.write(node.name.name);
        self.write("(");
        for (i, param) in node.params.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(param.name);
        }
        self.write(") ");
        self.print_block(&node.body, depth);
    }

    fn print_if_statement(&mut self, node: &IfStatement<'_>, depth: usize) {
        self.write("if (");
        self.print_expression(node.test, depth);
        self.write(") ");
        self.print_statement(node.consequent, depth);
        if let Some(alternate) = node.alternate {
            self.write(" else ");
            self.print_statement(alternate, depth);
        }
    }

    fn print_for_statement(&mut self, node: &ForStatement<'_>, depth: usize) {
        self.write("for (");
        match node.init {
            Some(ForInit::VariableDeclaration(decl)) => self.print_variable_declaration(decl, depth),
            Some(ForInit::Expression(expr)) => self.print_expression(expr, depth),
            None => {}
        }
        self.write(";");
        if let Some(test) = node.test {
            self.write(" ");
            self.print_expression(test, depth);
        }
        self.write(";");
        if let Some(update) = node.update {
            self.write(" ");
            self.print_expression(update, depth);
        }
        self.write(") ");
        self.print_statement(node.body, depth);
    }

    fn print_import_declaration(&mut self, node: &ImportDeclaration<'_>) {
        self.write("import {");
        for (i, specifier) in node.specifiers.iter().enumerate() {
            self.write(if i > 0 { ", " } else { " " });
            self.write(specifier.name);
        }
        if !node.specifiers.is_empty() {
            self.write(" ");
        }
        self.write("} from ");
        self.print_literal(&node.source);
        self.write(";");
    }

    // ========================================================================
    // Expression printing
    // ========================================================================

    fn print_expression(&mut self, expr: &Expression<'_>, depth: usize) {
        match expr {
            Expression::Identifier(id) => self.write(id.name),
            Expression::Literal(lit) => self.print_literal(lit),
            Expression::Array(n) => self.print_array_literal(n, depth),
            Expression::Object(n) => self.print_object_literal(n, depth),
            Expression::Binary(n) => self.print_binary_expression(n, depth),
            Expression::Unary(n) => {
                self.write(n.operator.as_str());
                if fuses_with_sign(n.operator, n.argument) {
                    self.print_parenthesized(n.argument, depth);
                } else {
                    self.print_operand(n.argument, UNARY, depth);
                }
            }
            Expression::Assignment(n) => {
                self.print_operand(n.left, CALL, depth);
                self.write(" ");
                self.write(n.operator.as_str());
                self.write(" ");
                // Right-associative: another assignment needs no parentheses.
                self.print_operand(n.right, ASSIGNMENT, depth);
            }
            Expression::Conditional(n) => {
                self.print_operand(n.test, LOGICAL_OR, depth);
                self.write(" ? ");
                self.print_operand(n.consequent, ASSIGNMENT, depth);
                self.write(" : ");
                self.print_operand(n.alternate, ASSIGNMENT, depth);
            }
            Expression::Call(n) => {
                self.print_operand(n.callee, CALL, depth);
                if n.optional {
                    self.write("?.");
                }
                self.print_arguments(n.arguments, depth);
            }
            Expression::Member(n) => self.print_member_expression(n, depth),
            Expression::JsxElement(n) => self.print_jsx_element(n, depth),
            Expression::JsxFragment(n) => self.print_jsx_fragment(n, depth),
        }
    }

    /// Print `expr`, parenthesized when it binds looser than `min_precedence`.
    fn print_operand(&mut self, expr: &Expression<'_>, min_precedence: u8, depth: usize) {
        if expression_precedence(expr) < min_precedence {
            self.print_parenthesized(expr, depth);
        } else {
            self.print_expression(expr, depth);
        }
    }

    fn print_parenthesized(&mut self, expr: &Expression<'_>, depth: usize) {
        self.write("(");
        self.print_expression(expr, depth);
        self.write(")");
    }

    fn print_binary_expression(&mut self, node: &BinaryExpression<'_>, depth: usize) {
        let precedence = node.operator.precedence();
        let (left_min, right_min) = if node.operator.is_right_associative() {
            // `-x ** 2` is a syntax error, so a unary base is wrapped too.
            (UNARY + 1, precedence)
        } else {
            (precedence, precedence + 1)
        };

        if mixes_nullish(node.operator, node.left) {
            self.print_parenthesized(node.left, depth);
        } else {
            self.print_operand(node.left, left_min, depth);
        }
        self.write(" ");
        self.write(node.operator.as_str());
        self.write(" ");
        if mixes_nullish(node.operator, node.right) {
            self.print_parenthesized(node.right, depth);
        } else {
            self.print_operand(node.right, right_min, depth);
        }
    }

    fn print_member_expression(&mut self, node: &MemberExpression<'_>, depth: usize) {
        let number_object = matches!(
            node.object,
            Expression::Literal(Literal { value: LiteralValue::Number(_), .. })
        );
        if number_object && !node.computed {
            // `1.toString` would read the dot as a decimal point.
            self.print_parenthesized(node.object, depth);
        } else {
            self.print_operand(node.object, CALL, depth);
        }

        match (node.computed, node.optional) {
            (true, optional) => {
                self.write(if optional { "?.[" } else { "[" });
                self.print_expression(node.property, depth);
                self.write("]");
            }
            (false, optional) => {
                self.write(if optional { "?." } else { "." });
                self.print_expression(node.property, depth);
            }
        }
    }

    fn print_arguments(&mut self, arguments: &[Expression<'_>], depth: usize) {
        self.write("(");
        for (i, arg) in arguments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_operand(arg, ASSIGNMENT, depth);
        }
        self.write(")");
    }

    fn print_array_literal(&mut self, node: &ArrayExpression<'_>, depth: usize) {
        self.write("[");
        for (i, element) in node.elements.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            if let Some(element) = element {
                self.print_operand(element, ASSIGNMENT, depth);
            }
        }
        // A trailing hole needs its own comma to survive.
        if let Some(None) = node.elements.last() {
            self.write(",");
        }
        self.write("]");
    }

    fn print_object_literal(&mut self, node: &ObjectExpression<'_>, depth: usize) {
        if node.properties.is_empty() {
            self.write("{}");
            return;
        }
        self.write("{ ");
        for (i, property) in node.properties.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write(property.key.name);
            self.write(": ");
            self.print_operand(property.value, ASSIGNMENT, depth);
        }
        self.write(" }");
    }

    fn print_literal(&mut self, lit: &Literal<'_>) {
        match lit.value {
            LiteralValue::Number(_) => self.write(lit.raw),
            LiteralValue::String(value) => self.write_string_literal(value),
            LiteralValue::Template(value) => {
                self.write("`");
                for ch in value.chars() {
                    match ch {
                        '`' => self.write("\\`"),
                        '\\' => self.write("\\\\"),
                        _ => self.output.push(ch),
                    }
                }
                self.write("`");
            }
            LiteralValue::Boolean(true) => self.write("true"),
            LiteralValue::Boolean(false) => self.write("false"),
            LiteralValue::Null => self.write("null"),
        }
    }

    // ========================================================================
    // JSX lowering
    // ========================================================================

    /// `<a x="1">t</a>` becomes `factory("a", { x: "1" }, "t")`.
    fn print_jsx_element(&mut self, node: &JsxElement<'_>, depth: usize) {
        self.write_factory_call_start();
        match node.name {
            JsxElementName::Identifier(id) => self.write_string_literal(id.name),
            JsxElementName::Member(_) => self.write_owned(node.name.to_text()),
        }
        self.write(", ");
        if node.attributes.is_empty() {
            self.write("null");
        } else {
            self.write("{ ");
            for (i, attribute) in node.attributes.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.write(attribute.name.name);
                self.write(": ");
                match attribute.value {
                    None => self.write("true"),
                    Some(JsxAttributeValue::StringLiteral(lit)) => self.print_literal(&lit),
                    Some(JsxAttributeValue::ExpressionContainer(container)) => {
                        self.print_operand(container.expression, ASSIGNMENT, depth)
                    }
                }
            }
            self.write(" }");
        }
        self.print_jsx_children(node.children, depth);
        self.write(")");
    }

    fn print_jsx_fragment(&mut self, node: &JsxFragment<'_>, depth: usize) {
        self.write_factory_call_start();
        self.output.push_str(&self.options.jsx_fragment);
        self.write(", null");
        self.print_jsx_children(node.children, depth);
        self.write(")");
    }

    fn print_jsx_children(&mut self, children: &[JsxChild<'_>], depth: usize) {
        for child in children {
            self.write(", ");
            match child {
                JsxChild::Text(text) => self.write_string_literal(text.value),
                JsxChild::ExpressionContainer(container) => {
                    self.print_operand(container.expression, ASSIGNMENT, depth)
                }
                JsxChild::Element(element) => self.print_jsx_element(element, depth),
                JsxChild::Fragment(fragment) => self.print_jsx_fragment(fragment, depth),
            }
        }
    }

    fn write_factory_call_start(&mut self) {
        self.output.push_str(&self.options.jsx_factory);
        self.write("(");
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_owned(&mut self, s: String) {
        self.output.push_str(&s);
    }

    fn write_newline(&mut self) {
        self.output.push('\n');
    }

    fn write_indent(&mut self, depth: usize) {
        let width = depth * self.options.indent_width;
        self.output.extend(std::iter::repeat(' ').take(width));
    }

    fn write_string_literal(&mut self, value: &str) {
        self.output.push('"');
        for ch in value.chars() {
            match ch {
                '"' => self.write("\\\""),
                '\\' => self.write("\\\\"),
                '\n' => self.write("\\n"),
                '\r' => self.write("\\r"),
                '\t' => self.write("\\t"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn literal(value: LiteralValue<'static>, raw: &'static str) -> Expression<'static> {
        Expression::Literal(Literal {
            data: NodeData::new(0, 0, 1, 1),
            value,
            raw,
        })
    }

    fn print(expr: &Expression<'_>) -> String {
        let mut printer = Printer::new();
        printer.print_expression(expr, 0);
        printer.output
    }

    #[test]
    fn test_string_escaping() {
        let expr = literal(LiteralValue::String("说\"你好\"\n\\"), "");
        assert_eq!(print(&expr), r#""说\"你好\"\n\\""#);
    }

    #[test]
    fn test_unicode_is_not_escaped() {
        assert_eq!(print(&literal(LiteralValue::String("中文"), "")), "\"中文\"");
    }

    #[test]
    fn test_template_escaping() {
        assert_eq!(print(&literal(LiteralValue::Template("a`b"), "")), "`a\\`b`");
    }

    #[test]
    fn test_number_prints_raw() {
        assert_eq!(print(&literal(LiteralValue::Number(255.0), "0xFF")), "0xFF");
    }

    #[test]
    fn test_write_indent_uses_width() {
        let mut printer = Printer::with_options(PrinterOptions {
            indent_width: 4,
            ..PrinterOptions::default()
        });
        printer.write_indent(2);
        assert_eq!(printer.output, " ".repeat(8));
    }
}
