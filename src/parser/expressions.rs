//! Expression recognizers.
//!
//! The C89 expression grammar is a precedence ladder: `expression` (comma)
//! at the loosest, down through assignment, conditional, ten binary levels,
//! cast, unary, and postfix to `primary-expression`. The grammar's
//! left-recursive levels are realized as repetition loops, so
//! `a + b - c` becomes one `AdditiveExpression` node with five children in
//! source order rather than a left-leaning chain.
//!
//! Two alternatives here are genuinely ambiguous on their prefix and rely on
//! backtracking plus the typedef table:
//!
//! - `(name)x` is a cast only when `name` is a registered typedef name;
//!   otherwise the cast alternative fails inside `type-name` and the input
//!   reparses as a parenthesized primary.
//! - `sizeof (x)` takes the unary-expression alternative; `sizeof (int)`
//!   falls through to the parenthesized type-name alternative.

use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use crate::parser::tree::{Node, NodeKind};

impl<'a> Parser<'a> {
    /// `expression ::= assignment-expression ("," assignment-expression)*`
    pub(crate) fn parse_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::Expression,
            &[TokenKind::Comma],
            Self::parse_assignment_expression,
        )
    }

    /// `assignment-expression ::= unary-expression assignment-operator
    /// assignment-expression | conditional-expression`
    ///
    /// The assignment alternative is tried first; when no assignment
    /// operator follows the unary prefix, the whole prefix is re-parsed
    /// under the conditional alternative.
    pub(crate) fn parse_assignment_expression(&mut self) -> Option<Node<'a>> {
        if self.fatal.is_some() {
            return None;
        }
        let save = self.stream;
        let mut node = Node::new(NodeKind::AssignmentExpression);
        if let Some(target) = self.parse_unary_expression() {
            if let Some(operator) = self.parse_assignment_operator() {
                if let Some(value) = self.parse_assignment_expression() {
                    node.push(target);
                    node.push(operator);
                    node.push(value);
                    return Some(node);
                }
            }
            self.stream = save;
        }
        let conditional = self.parse_conditional_expression()?;
        node.push(conditional);
        Some(node)
    }

    fn parse_assignment_operator(&mut self) -> Option<Node<'a>> {
        let symbol = self.match_symbol_of(&[
            TokenKind::Eq,
            TokenKind::StarEq,
            TokenKind::SlashEq,
            TokenKind::PercentEq,
            TokenKind::PlusEq,
            TokenKind::MinusEq,
            TokenKind::LtLtEq,
            TokenKind::GtGtEq,
            TokenKind::AmpEq,
            TokenKind::CaretEq,
            TokenKind::PipeEq,
        ])?;
        let mut node = Node::new(NodeKind::AssignmentOperator);
        node.push(symbol);
        Some(node)
    }

    /// `conditional-expression ::= logical-or-expression
    /// ("?" expression ":" conditional-expression)?`
    pub(crate) fn parse_conditional_expression(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::ConditionalExpression);
        node.push(self.parse_logical_or_expression()?);
        let mark = self.stream;
        if let Some(question) = self.match_symbol(TokenKind::Question) {
            if let Some(then_value) = self.parse_expression() {
                if let Some(colon) = self.match_symbol(TokenKind::Colon) {
                    if let Some(else_value) = self.parse_conditional_expression() {
                        node.push(question);
                        node.push(then_value);
                        node.push(colon);
                        node.push(else_value);
                        return Some(node);
                    }
                }
            }
            self.stream = mark;
        }
        Some(node)
    }

    /// `constant-expression ::= conditional-expression`
    pub(crate) fn parse_constant_expression(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::ConstantExpression);
        node.push(self.parse_conditional_expression()?);
        Some(node)
    }

    // ===== Binary precedence ladder =====

    fn parse_logical_or_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::LogicalOrExpression,
            &[TokenKind::OrOr],
            Self::parse_logical_and_expression,
        )
    }

    fn parse_logical_and_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::LogicalAndExpression,
            &[TokenKind::AndAnd],
            Self::parse_inclusive_or_expression,
        )
    }

    fn parse_inclusive_or_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::InclusiveOrExpression,
            &[TokenKind::Pipe],
            Self::parse_exclusive_or_expression,
        )
    }

    fn parse_exclusive_or_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::ExclusiveOrExpression,
            &[TokenKind::Caret],
            Self::parse_and_expression,
        )
    }

    fn parse_and_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::AndExpression,
            &[TokenKind::Amp],
            Self::parse_equality_expression,
        )
    }

    fn parse_equality_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::EqualityExpression,
            &[TokenKind::EqEq, TokenKind::NotEq],
            Self::parse_relational_expression,
        )
    }

    fn parse_relational_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::RelationalExpression,
            &[TokenKind::Lt, TokenKind::Gt, TokenKind::Le, TokenKind::Ge],
            Self::parse_shift_expression,
        )
    }

    fn parse_shift_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::ShiftExpression,
            &[TokenKind::LtLt, TokenKind::GtGt],
            Self::parse_additive_expression,
        )
    }

    fn parse_additive_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::AdditiveExpression,
            &[TokenKind::Plus, TokenKind::Minus],
            Self::parse_multiplicative_expression,
        )
    }

    fn parse_multiplicative_expression(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::MultiplicativeExpression,
            &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
            Self::parse_cast_expression,
        )
    }

    /// One left-associative level: `operand (operator operand)*`, flattened
    /// into a single node whose children alternate operand and operator in
    /// source order.
    fn parse_binary_level(
        &mut self,
        kind: NodeKind,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> Option<Node<'a>>,
    ) -> Option<Node<'a>> {
        let mut node = Node::new(kind);
        node.push(operand(self)?);
        loop {
            let mark = self.stream;
            let Some(operator) = self.match_symbol_of(operators) else {
                break;
            };
            let Some(right) = operand(self) else {
                self.stream = mark;
                break;
            };
            node.push(operator);
            node.push(right);
        }
        Some(node)
    }

    /// `cast-expression ::= "(" type-name ")" cast-expression |
    /// unary-expression`
    pub(crate) fn parse_cast_expression(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::CastExpression);
        if let Some(lparen) = self.match_symbol(TokenKind::LParen) {
            if let Some(type_name) = self.parse_type_name() {
                if let Some(rparen) = self.match_symbol(TokenKind::RParen) {
                    if let Some(operand) = self.parse_cast_expression() {
                        node.push(lparen);
                        node.push(type_name);
                        node.push(rparen);
                        node.push(operand);
                        return Some(node);
                    }
                }
            }
            self.stream = save;
        }
        let unary = self.parse_unary_expression()?;
        node.push(unary);
        Some(node)
    }

    /// `unary-expression ::= "++" unary-expression | "--" unary-expression
    /// | unary-operator cast-expression | sizeof unary-expression
    /// | sizeof "(" type-name ")" | postfix-expression`
    pub(crate) fn parse_unary_expression(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::UnaryExpression);
        if let Some(operator) =
            self.match_symbol_of(&[TokenKind::PlusPlus, TokenKind::MinusMinus])
        {
            let Some(operand) = self.parse_unary_expression() else {
                self.stream = save;
                return None;
            };
            node.push(operator);
            node.push(operand);
            return Some(node);
        }
        if let Some(operator) = self.parse_unary_operator() {
            if let Some(operand) = self.parse_cast_expression() {
                node.push(operator);
                node.push(operand);
                return Some(node);
            }
            self.stream = save;
            return None;
        }
        if let Some(keyword) = self.match_keyword("sizeof") {
            if let Some(operand) = self.parse_unary_expression() {
                node.push(keyword);
                node.push(operand);
                return Some(node);
            }
            if let Some(lparen) = self.match_symbol(TokenKind::LParen) {
                if let Some(type_name) = self.parse_type_name() {
                    if let Some(rparen) = self.match_symbol(TokenKind::RParen) {
                        node.push(keyword);
                        node.push(lparen);
                        node.push(type_name);
                        node.push(rparen);
                        return Some(node);
                    }
                }
            }
            self.stream = save;
            return None;
        }
        let postfix = self.parse_postfix_expression()?;
        node.push(postfix);
        Some(node)
    }

    /// `unary-operator ::= "&" | "*" | "+" | "-" | "~" | "!"`
    fn parse_unary_operator(&mut self) -> Option<Node<'a>> {
        let symbol = self.match_symbol_of(&[
            TokenKind::Amp,
            TokenKind::Star,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Tilde,
            TokenKind::Bang,
        ])?;
        let mut node = Node::new(NodeKind::UnaryOperator);
        node.push(symbol);
        Some(node)
    }

    /// `postfix-expression ::= primary-expression postfix-suffix*` where a
    /// suffix is `"[" expression "]"`, `"(" argument-expression-list? ")"`,
    /// `"." identifier`, `"->" identifier`, `"++"`, or `"--"`.
    fn parse_postfix_expression(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::PostfixExpression);
        node.push(self.parse_primary_expression()?);
        loop {
            let mark = self.stream;
            if let Some(lbracket) = self.match_symbol(TokenKind::LBracket) {
                if let Some(index) = self.parse_expression() {
                    if let Some(rbracket) = self.match_symbol(TokenKind::RBracket) {
                        node.push(lbracket);
                        node.push(index);
                        node.push(rbracket);
                        continue;
                    }
                }
                self.stream = mark;
                break;
            }
            if let Some(lparen) = self.match_symbol(TokenKind::LParen) {
                let arguments = self.parse_argument_expression_list();
                if let Some(rparen) = self.match_symbol(TokenKind::RParen) {
                    node.push(lparen);
                    if let Some(arguments) = arguments {
                        node.push(arguments);
                    }
                    node.push(rparen);
                    continue;
                }
                self.stream = mark;
                break;
            }
            if let Some(access) = self.match_symbol_of(&[TokenKind::Dot, TokenKind::Arrow]) {
                if let Some(member) = self.match_identifier() {
                    node.push(access);
                    node.push(member);
                    continue;
                }
                self.stream = mark;
                break;
            }
            if let Some(operator) =
                self.match_symbol_of(&[TokenKind::PlusPlus, TokenKind::MinusMinus])
            {
                node.push(operator);
                continue;
            }
            break;
        }
        Some(node)
    }

    /// `primary-expression ::= identifier | constant | string-literal |
    /// "(" expression ")"`
    fn parse_primary_expression(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::PrimaryExpression);
        if let Some(name) = self.match_identifier() {
            node.push(name);
            return Some(node);
        }
        if let Some(constant) = self.match_constant() {
            node.push(constant);
            return Some(node);
        }
        if let Some(string) = self.match_string_literal() {
            node.push(string);
            return Some(node);
        }
        let save = self.stream;
        let lparen = self.match_symbol(TokenKind::LParen)?;
        let Some(expression) = self.parse_expression() else {
            self.stream = save;
            return None;
        };
        let Some(rparen) = self.match_symbol(TokenKind::RParen) else {
            self.stream = save;
            return None;
        };
        node.push(lparen);
        node.push(expression);
        node.push(rparen);
        Some(node)
    }

    /// `argument-expression-list ::= assignment-expression
    /// ("," assignment-expression)*`
    fn parse_argument_expression_list(&mut self) -> Option<Node<'a>> {
        self.parse_binary_level(
            NodeKind::ArgumentExpressionList,
            &[TokenKind::Comma],
            Self::parse_assignment_expression,
        )
    }
}
