use crate::ast;
use crate::lexer::Lexer;
use crate::token::{Token, TokenType};
use std::collections::HashMap;

type PrefixParseFn = fn(&mut Parser) -> Option<ast::Expression>;
type InfixParseFn = fn(&mut Parser, ast::Expression) -> Option<ast::Expression>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Precedence {
    Lowest,
    Equals,
    LessGreater,
    Sum,
    Product,
    Prefix,
    Call,
    Index,
}

impl From<TokenType> for Precedence {
    fn from(token_type: TokenType) -> Self {
        match token_type {
            TokenType::Eq | TokenType::NotEq => Self::Equals,
            TokenType::LT | TokenType::GT => Self::LessGreater,
            TokenType::Plus | TokenType::Minus => Self::Sum,
            TokenType::Slash | TokenType::Asterisk => Self::Product,
            TokenType::LParen => Self::Call,
            TokenType::LBracket => Self::Index,
            _ => Self::Lowest,
        }
    }
}

pub struct Parser {
    lexer: Lexer,
    errors: Vec<String>,

    cur_token: Token,
    peek_token: Token,

    prefix_parse_fns: HashMap<TokenType, PrefixParseFn>,
    infix_parse_fns: HashMap<TokenType, InfixParseFn>,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let cur_token = lexer.next_token();
        let peek_token = lexer.next_token();

        let mut parser = Self {
            lexer,
            cur_token,
            peek_token,
            errors: Default::default(),
            prefix_parse_fns: Default::default(),
            infix_parse_fns: Default::default(),
        };

        parser.register_prefix(TokenType::Ident, Self::parse_identifier);
        parser.register_prefix(TokenType::Int, Self::parse_integer_literal);
        parser.register_prefix(TokenType::String, Self::parse_string_literal);
        parser.register_prefix(TokenType::True, Self::parse_boolean);
        parser.register_prefix(TokenType::False, Self::parse_boolean);
        parser.register_prefix(TokenType::Bang, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::Minus, Self::parse_prefix_expression);
        parser.register_prefix(TokenType::LParen, Self::parse_grouped_expression);
        parser.register_prefix(TokenType::If, Self::parse_if_expression);
        parser.register_prefix(TokenType::Function, Self::parse_function_literal);
        parser.register_prefix(TokenType::LBracket, Self::parse_array_literal);
        parser.register_prefix(TokenType::LBrace, Self::parse_hash_literal);

        parser.register_infix(TokenType::Plus, Self::parse_infix_expression);
        parser.register_infix(TokenType::Minus, Self::parse_infix_expression);
        parser.register_infix(TokenType::Slash, Self::parse_infix_expression);
        parser.register_infix(TokenType::Asterisk, Self::parse_infix_expression);
        parser.register_infix(TokenType::Eq, Self::parse_infix_expression);
        parser.register_infix(TokenType::NotEq, Self::parse_infix_expression);
        parser.register_infix(TokenType::LT, Self::parse_infix_expression);
        parser.register_infix(TokenType::GT, Self::parse_infix_expression);
        parser.register_infix(TokenType::LParen, Self::parse_call_expression);
        parser.register_infix(TokenType::LBracket, Self::parse_index_expression);

        parser
    }

    fn register_prefix(&mut self, token_type: TokenType, func: PrefixParseFn) {
        self.prefix_parse_fns.insert(token_type, func);
    }

    fn register_infix(&mut self, token_type: TokenType, func: InfixParseFn) {
        self.infix_parse_fns.insert(token_type, func);
    }

    fn next_token(&mut self) {
        self.cur_token = self.peek_token.clone();
        self.peek_token = self.lexer.next_token();
    }

    pub fn parse_program(mut self) -> Result<ast::Program, Vec<String>> {
        let mut program = ast::Program::default();

        while !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt)
            }
            self.next_token();
        }

        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(self.errors)
        }
    }

    fn parse_statement(&mut self) -> Option<ast::Statement> {
        match TokenType::from(&self.cur_token) {
            TokenType::Let => self.parse_let_statement().map(ast::Statement::Let),
            TokenType::Return => self.parse_return_statement().map(ast::Statement::Return),
            _ => self.parse_expression_statement().map(ast::Statement::Expr),
        }
    }

    fn parse_let_statement(&mut self) -> Option<ast::LetStatement> {
        if !self.expect_peek(TokenType::Ident) {
            return None;
        }

        let name: ast::Identifier = self.cur_token.clone().into();

        if !self.expect_peek(TokenType::Assign) {
            return None;
        }

        self.next_token();
        let value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::LetStatement { name, value })
    }

    fn parse_return_statement(&mut self) -> Option<ast::ReturnStatement> {
        self.next_token();

        let return_value = self.parse_expression(Precedence::Lowest)?;

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ReturnStatement { return_value })
    }

    fn parse_expression_statement(&mut self) -> Option<ast::ExpressionStatement> {
        let expression = self.parse_expression(Precedence::Lowest);

        if self.peek_token.is(TokenType::Semicolon) {
            self.next_token();
        }

        Some(ast::ExpressionStatement {
            expression: expression?,
        })
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Option<ast::Expression> {
        let prefix = match self.prefix_parse_fns.get(&TokenType::from(&self.cur_token)) {
            Some(prefix) => *prefix,
            None => {
                self.no_prefix_parse_fn_error();
                return None;
            }
        };

        let mut left = prefix(self)?;

        while !self.peek_token.is(TokenType::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self.infix_parse_fns.get(&TokenType::from(&self.peek_token)) {
                Some(infix) => *infix,
                None => return Some(left),
            };

            self.next_token();
            left = infix(self, left)?;
        }

        Some(left)
    }

    fn parse_identifier(&mut self) -> Option<ast::Expression> {
        Some(ast::Expression::Identifier(self.cur_token.clone().into()))
    }

    fn parse_integer_literal(&mut self) -> Option<ast::Expression> {
        let text = match &self.cur_token {
            Token::Int(text) => text.clone(),
            t => panic!("parsing non-integer token {:?} as integer literal", t),
        };

        match text.parse() {
            Ok(value) => Some(ast::Expression::IntegerLiteral(ast::IntegerLiteral {
                value,
            })),
            Err(_) => {
                self.errors
                    .push(format!("could not parse {:?} as integer", text));
                None
            }
        }
    }

    fn parse_string_literal(&mut self) -> Option<ast::Expression> {
        match &self.cur_token {
            Token::String(value) => Some(ast::Expression::String(ast::StringLiteral {
                value: value.clone(),
            })),
            t => panic!("parsing non-string token {:?} as string literal", t),
        }
    }

    fn parse_boolean(&mut self) -> Option<ast::Expression> {
        Some(ast::Expression::Boolean(self.cur_token.clone().into()))
    }

    fn parse_prefix_expression(&mut self) -> Option<ast::Expression> {
        let operator = ast::Operator::from(&self.cur_token);

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Some(ast::Expression::Prefix(ast::PrefixExpression {
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_infix_expression(&mut self, left: ast::Expression) -> Option<ast::Expression> {
        let operator = ast::Operator::from(&self.cur_token);
        let precedence = self.cur_precedence();

        self.next_token();
        let right = self.parse_expression(precedence)?;

        Some(ast::Expression::Infix(ast::InfixExpression {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }))
    }

    fn parse_grouped_expression(&mut self) -> Option<ast::Expression> {
        self.next_token();

        let expression = self.parse_expression(Precedence::Lowest);

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        expression
    }

    fn parse_if_expression(&mut self) -> Option<ast::Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        self.next_token();
        let condition = Box::new(self.parse_expression(Precedence::Lowest)?);

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }
        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let consequence = self.parse_block_statement();

        let alternative = if self.peek_token.is(TokenType::Else) {
            self.next_token();

            if !self.expect_peek(TokenType::LBrace) {
                return None;
            }

            Some(self.parse_block_statement())
        } else {
            None
        };

        Some(ast::Expression::If(ast::IfExpression {
            condition,
            consequence,
            alternative,
        }))
    }

    // Leaves the closing brace as the current token.
    fn parse_block_statement(&mut self) -> ast::BlockStatement {
        let mut statements = vec![];

        self.next_token();
        while !self.cur_token.is(TokenType::RBrace) && !self.cur_token.is(TokenType::Eof) {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.next_token();
        }

        ast::BlockStatement { statements }
    }

    fn parse_function_literal(&mut self) -> Option<ast::Expression> {
        if !self.expect_peek(TokenType::LParen) {
            return None;
        }

        let parameters = self.parse_function_parameters()?;

        if !self.expect_peek(TokenType::LBrace) {
            return None;
        }

        let body = self.parse_block_statement();

        Some(ast::Expression::Function(ast::FunctionLiteral {
            parameters,
            body,
        }))
    }

    fn parse_function_parameters(&mut self) -> Option<Vec<ast::Identifier>> {
        let mut identifiers = vec![];

        if self.peek_token.is(TokenType::RParen) {
            self.next_token();
            return Some(identifiers);
        }

        if !self.expect_peek(TokenType::Ident) {
            return None;
        }
        identifiers.push(self.cur_token.clone().into());

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            if !self.expect_peek(TokenType::Ident) {
                return None;
            }
            identifiers.push(self.cur_token.clone().into());
        }

        if !self.expect_peek(TokenType::RParen) {
            return None;
        }

        Some(identifiers)
    }

    fn parse_call_expression(&mut self, function: ast::Expression) -> Option<ast::Expression> {
        let arguments = self.parse_expression_list(TokenType::RParen)?;

        Some(ast::Expression::Call(ast::CallExpression {
            function: Box::new(function),
            arguments,
        }))
    }

    fn parse_array_literal(&mut self) -> Option<ast::Expression> {
        let elements = self.parse_expression_list(TokenType::RBracket)?;

        Some(ast::Expression::Array(ast::ArrayLiteral { elements }))
    }

    fn parse_expression_list(&mut self, end: TokenType) -> Option<Vec<ast::Expression>> {
        let mut list = vec![];

        if self.peek_token.is(end) {
            self.next_token();
            return Some(list);
        }

        self.next_token();
        list.push(self.parse_expression(Precedence::Lowest)?);

        while self.peek_token.is(TokenType::Comma) {
            self.next_token();
            self.next_token();
            list.push(self.parse_expression(Precedence::Lowest)?);
        }

        if !self.expect_peek(end) {
            return None;
        }

        Some(list)
    }

    fn parse_index_expression(&mut self, left: ast::Expression) -> Option<ast::Expression> {
        self.next_token();
        let index = self.parse_expression(Precedence::Lowest)?;

        if !self.expect_peek(TokenType::RBracket) {
            return None;
        }

        Some(ast::Expression::Index(ast::IndexExpression {
            left: Box::new(left),
            index: Box::new(index),
        }))
    }

    fn parse_hash_literal(&mut self) -> Option<ast::Expression> {
        let mut pairs = vec![];

        while !self.peek_token.is(TokenType::RBrace) {
            self.next_token();
            let key = self.parse_expression(Precedence::Lowest)?;

            if !self.expect_peek(TokenType::Colon) {
                return None;
            }

            self.next_token();
            let value = self.parse_expression(Precedence::Lowest)?;
            pairs.push((key, value));

            if !self.peek_token.is(TokenType::RBrace) && !self.expect_peek(TokenType::Comma) {
                return None;
            }
        }

        if !self.expect_peek(TokenType::RBrace) {
            return None;
        }

        Some(ast::Expression::Hash(ast::HashLiteral { pairs }))
    }

    fn cur_precedence(&self) -> Precedence {
        TokenType::from(&self.cur_token).into()
    }

    fn peek_precedence(&self) -> Precedence {
        TokenType::from(&self.peek_token).into()
    }

    fn expect_peek(&mut self, expected: TokenType) -> bool {
        if self.peek_token.is(expected) {
            self.next_token();
            true
        } else {
            self.peek_error(expected);
            false
        }
    }

    fn peek_error(&mut self, expected: TokenType) {
        self.errors.push(format!(
            "expected next token to be {:?}, got {:?} instead",
            expected,
            TokenType::from(&self.peek_token)
        ));
    }

    fn no_prefix_parse_fn_error(&mut self) {
        self.errors.push(format!(
            "no prefix parse function found for {}",
            TokenType::from(&self.cur_token)
        ));
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ast::{Expression, Statement};

    fn parse(input: &str) -> ast::Program {
        Parser::new(Lexer::new(input.to_owned()))
            .parse_program()
            .expect("Parse errors found")
    }

    fn parse_single_expression(input: &str) -> Expression {
        let program = parse(input);
        assert_eq!(program.statements.len(), 1);

        match program.statements.into_iter().next().unwrap() {
            Statement::Expr(stmt) => stmt.expression,
            stmt => panic!("expected expression statement, got {:?}", stmt),
        }
    }

    #[test]
    fn test_let_statements() {
        let cases = vec![
            ("let x = 5;", "x", "5"),
            ("let y = true;", "y", "true"),
            ("let foobar = y;", "foobar", "y"),
        ];

        for (input, name, value) in cases.into_iter() {
            let program = parse(input);
            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::Let(stmt) => {
                    assert_eq!(stmt.name.value, name);
                    assert_eq!(stmt.value.to_string(), value);
                }
                stmt => panic!("expected let statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_return_statements() {
        let cases = vec![
            ("return 5;", "5"),
            ("return true;", "true"),
            ("return foobar;", "foobar"),
        ];

        for (input, value) in cases.into_iter() {
            let program = parse(input);
            assert_eq!(program.statements.len(), 1);

            match &program.statements[0] {
                Statement::Return(stmt) => assert_eq!(stmt.return_value.to_string(), value),
                stmt => panic!("expected return statement, got {:?}", stmt),
            }
        }
    }

    #[test]
    fn test_identifier_expression() {
        match parse_single_expression("foobar;") {
            Expression::Identifier(ident) => assert_eq!(ident.value, "foobar"),
            expr => panic!("expected identifier, got {:?}", expr),
        }
    }

    #[test]
    fn test_integer_literal_expression() {
        match parse_single_expression("5;") {
            Expression::IntegerLiteral(literal) => assert_eq!(literal.value, 5),
            expr => panic!("expected integer literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_string_literal_expression() {
        match parse_single_expression("\"hello world\";") {
            Expression::String(literal) => assert_eq!(literal.value, "hello world"),
            expr => panic!("expected string literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_boolean_expression() {
        let cases = vec![("true;", true), ("false;", false)];

        for (input, value) in cases.into_iter() {
            match parse_single_expression(input) {
                Expression::Boolean(b) => assert_eq!(b.value, value),
                expr => panic!("expected boolean, got {:?}", expr),
            }
        }
    }

    #[test]
    fn test_prefix_expressions() {
        let cases = vec![
            ("!5;", ast::Operator::Bang, "5"),
            ("-15;", ast::Operator::Minus, "15"),
            ("!true;", ast::Operator::Bang, "true"),
            ("!false;", ast::Operator::Bang, "false"),
        ];

        for (input, operator, right) in cases.into_iter() {
            match parse_single_expression(input) {
                Expression::Prefix(prefix) => {
                    assert_eq!(prefix.operator, operator);
                    assert_eq!(prefix.right.to_string(), right);
                }
                expr => panic!("expected prefix expression, got {:?}", expr),
            }
        }
    }

    #[test]
    fn test_infix_expressions() {
        let cases = vec![
            ("5 + 5;", "5", ast::Operator::Plus, "5"),
            ("5 - 5;", "5", ast::Operator::Minus, "5"),
            ("5 * 5;", "5", ast::Operator::Asterisk, "5"),
            ("5 / 5;", "5", ast::Operator::Slash, "5"),
            ("5 > 5;", "5", ast::Operator::GT, "5"),
            ("5 < 5;", "5", ast::Operator::LT, "5"),
            ("5 == 5;", "5", ast::Operator::Eq, "5"),
            ("5 != 5;", "5", ast::Operator::NotEq, "5"),
            ("true == true", "true", ast::Operator::Eq, "true"),
            ("true != false", "true", ast::Operator::NotEq, "false"),
        ];

        for (input, left, operator, right) in cases.into_iter() {
            match parse_single_expression(input) {
                Expression::Infix(infix) => {
                    assert_eq!(infix.left.to_string(), left);
                    assert_eq!(infix.operator, operator);
                    assert_eq!(infix.right.to_string(), right);
                }
                expr => panic!("expected infix expression, got {:?}", expr),
            }
        }
    }

    #[test]
    fn test_operator_precedence() {
        let cases = vec![
            ("-a * b", "((-a) * b)"),
            ("!-a", "(!(-a))"),
            ("a + b + c", "((a + b) + c)"),
            ("a + b - c", "((a + b) - c)"),
            ("a * b * c", "((a * b) * c)"),
            ("a * b / c", "((a * b) / c)"),
            ("a + b / c", "(a + (b / c))"),
            ("a + b * c + d / e - f", "(((a + (b * c)) + (d / e)) - f)"),
            ("3 + 4; -5 * 5", "(3 + 4)((-5) * 5)"),
            ("5 > 4 == 3 < 4", "((5 > 4) == (3 < 4))"),
            ("5 < 4 != 3 > 4", "((5 < 4) != (3 > 4))"),
            (
                "3 + 4 * 5 == 3 * 1 + 4 * 5",
                "((3 + (4 * 5)) == ((3 * 1) + (4 * 5)))",
            ),
            ("true", "true"),
            ("false", "false"),
            ("3 > 5 == false", "((3 > 5) == false)"),
            ("3 < 5 == true", "((3 < 5) == true)"),
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4)"),
            ("(5 + 5) * 2", "((5 + 5) * 2)"),
            ("2 / (5 + 5)", "(2 / (5 + 5))"),
            ("-(5 + 5)", "(-(5 + 5))"),
            ("!(true == true)", "(!(true == true))"),
            ("a + add(b * c) + d", "((a + add((b * c))) + d)"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)))",
            ),
            ("add(a + b + c * d / f + g)", "add((((a + b) + ((c * d) / f)) + g))"),
            (
                "a * [1, 2, 3, 4][b * c] * d",
                "((a * ([1, 2, 3, 4][(b * c)])) * d)",
            ),
            (
                "add(a * b[2], b[1], 2 * [1, 2][1])",
                "add((a * (b[2])), (b[1]), (2 * ([1, 2][1])))",
            ),
        ];

        for (input, rendered) in cases.into_iter() {
            assert_eq!(parse(input).to_string(), rendered);
        }
    }

    #[test]
    fn test_if_expression() {
        match parse_single_expression("if (x < y) { x }") {
            Expression::If(if_expr) => {
                assert_eq!(if_expr.condition.to_string(), "(x < y)");
                assert_eq!(if_expr.consequence.to_string(), "x");
                assert!(if_expr.alternative.is_none());
            }
            expr => panic!("expected if expression, got {:?}", expr),
        }
    }

    #[test]
    fn test_if_else_expression() {
        match parse_single_expression("if (x < y) { x } else { y }") {
            Expression::If(if_expr) => {
                assert_eq!(if_expr.condition.to_string(), "(x < y)");
                assert_eq!(if_expr.consequence.to_string(), "x");
                assert_eq!(if_expr.alternative.unwrap().to_string(), "y");
            }
            expr => panic!("expected if expression, got {:?}", expr),
        }
    }

    #[test]
    fn test_function_literal() {
        match parse_single_expression("fn(x, y) { x + y; }") {
            Expression::Function(func) => {
                assert_eq!(func.parameters.len(), 2);
                assert_eq!(func.parameters[0].value, "x");
                assert_eq!(func.parameters[1].value, "y");
                assert_eq!(func.body.to_string(), "(x + y)");
            }
            expr => panic!("expected function literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_function_parameters() {
        let cases = vec![
            ("fn() {};", vec![]),
            ("fn(x) {};", vec!["x"]),
            ("fn(x, y, z) {};", vec!["x", "y", "z"]),
        ];

        for (input, parameters) in cases.into_iter() {
            match parse_single_expression(input) {
                Expression::Function(func) => {
                    let names: Vec<&str> =
                        func.parameters.iter().map(|p| p.value.as_str()).collect();
                    assert_eq!(names, parameters);
                }
                expr => panic!("expected function literal, got {:?}", expr),
            }
        }
    }

    #[test]
    fn test_call_expression() {
        match parse_single_expression("add(1, 2 * 3, 4 + 5);") {
            Expression::Call(call) => {
                assert_eq!(call.function.to_string(), "add");
                assert_eq!(call.arguments.len(), 3);
                assert_eq!(call.arguments[0].to_string(), "1");
                assert_eq!(call.arguments[1].to_string(), "(2 * 3)");
                assert_eq!(call.arguments[2].to_string(), "(4 + 5)");
            }
            expr => panic!("expected call expression, got {:?}", expr),
        }
    }

    #[test]
    fn test_array_literal() {
        match parse_single_expression("[1, 2 * 2, 3 + 3]") {
            Expression::Array(array) => {
                assert_eq!(array.elements.len(), 3);
                assert_eq!(array.elements[0].to_string(), "1");
                assert_eq!(array.elements[1].to_string(), "(2 * 2)");
                assert_eq!(array.elements[2].to_string(), "(3 + 3)");
            }
            expr => panic!("expected array literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_empty_array_literal() {
        match parse_single_expression("[]") {
            Expression::Array(array) => assert!(array.elements.is_empty()),
            expr => panic!("expected array literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_index_expression() {
        match parse_single_expression("myArray[1 + 1]") {
            Expression::Index(index) => {
                assert_eq!(index.left.to_string(), "myArray");
                assert_eq!(index.index.to_string(), "(1 + 1)");
            }
            expr => panic!("expected index expression, got {:?}", expr),
        }
    }

    #[test]
    fn test_hash_literal_string_keys() {
        match parse_single_expression("{\"one\": 1, \"two\": 2, \"three\": 3}") {
            Expression::Hash(hash) => {
                let pairs: Vec<(String, String)> = hash
                    .pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect();

                assert_eq!(
                    pairs,
                    vec![
                        ("one".to_owned(), "1".to_owned()),
                        ("two".to_owned(), "2".to_owned()),
                        ("three".to_owned(), "3".to_owned()),
                    ]
                );
            }
            expr => panic!("expected hash literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_empty_hash_literal() {
        match parse_single_expression("{}") {
            Expression::Hash(hash) => assert!(hash.pairs.is_empty()),
            expr => panic!("expected hash literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_hash_literal_with_expressions() {
        match parse_single_expression("{\"one\": 0 + 1, \"two\": 10 - 8, \"three\": 15 / 5}") {
            Expression::Hash(hash) => {
                let values: Vec<String> = hash.pairs.iter().map(|(_, v)| v.to_string()).collect();
                assert_eq!(values, vec!["(0 + 1)", "(10 - 8)", "(15 / 5)"]);
            }
            expr => panic!("expected hash literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_hash_literal_mixed_keys() {
        match parse_single_expression("{1: \"one\", true: 2, \"three\": 3}") {
            Expression::Hash(hash) => {
                let keys: Vec<String> = hash.pairs.iter().map(|(k, _)| k.to_string()).collect();
                assert_eq!(keys, vec!["1", "true", "three"]);
            }
            expr => panic!("expected hash literal, got {:?}", expr),
        }
    }

    #[test]
    fn test_rendered_program_reparses_identically() {
        // String literals render without quotes, so they are the one
        // literal kind that does not survive a render/re-parse cycle.
        let input = "let double = fn(a, b) { return a + b * 2; };
double(1, 2);
let tbl = {1: [1, 2, 3][0], true: !false};
if (tbl[1] < 2) { double(tbl[1], 2) } else { 0 }";

        let program = parse(input);
        let reparsed = parse(&program.to_string());

        assert_eq!(program, reparsed);
    }

    #[test]
    fn test_expected_token_errors() {
        let errors = Parser::new(Lexer::new("let x 5;".to_owned()))
            .parse_program()
            .unwrap_err();

        assert_eq!(
            errors,
            vec!["expected next token to be Assign, got Int instead".to_owned()]
        );
    }

    #[test]
    fn test_missing_prefix_fn_error() {
        let errors = Parser::new(Lexer::new("5 + ;".to_owned()))
            .parse_program()
            .unwrap_err();

        assert_eq!(
            errors,
            vec!["no prefix parse function found for Semicolon".to_owned()]
        );
    }

    #[test]
    fn test_bad_integer_literal_error() {
        let errors = Parser::new(Lexer::new("99999999999999999999;".to_owned()))
            .parse_program()
            .unwrap_err();

        assert_eq!(
            errors,
            vec!["could not parse \"99999999999999999999\" as integer".to_owned()]
        );
    }
}
