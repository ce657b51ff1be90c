//! Statement recognizers.
//!
//! ```text
//! statement ::= labeled-statement | expression-statement
//!             | compound-statement | selection-statement
//!             | iteration-statement | jump-statement
//! ```
//!
//! Alternatives are tried in that order, so `case`/`default`/label forms win
//! before the expression fallback, and the dangling `else` binds to the
//! nearest `if` because the `else` arm is consumed greedily.

use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use crate::parser::tree::{Node, NodeKind};

impl<'a> Parser<'a> {
    pub(crate) fn parse_statement(&mut self) -> Option<Node<'a>> {
        if self.fatal.is_some() {
            return None;
        }
        let mut node = Node::new(NodeKind::Statement);
        let inner = self
            .parse_labeled_statement()
            .or_else(|| self.parse_expression_statement())
            .or_else(|| self.parse_compound_statement())
            .or_else(|| self.parse_selection_statement())
            .or_else(|| self.parse_iteration_statement())
            .or_else(|| self.parse_jump_statement())?;
        node.push(inner);
        Some(node)
    }

    /// `labeled-statement ::= identifier ":" statement |
    /// case constant-expression ":" statement | default ":" statement`
    fn parse_labeled_statement(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::LabeledStatement);
        if let Some(name) = self.match_identifier() {
            if let Some(colon) = self.match_symbol(TokenKind::Colon) {
                if let Some(statement) = self.parse_statement() {
                    node.push(name);
                    node.push(colon);
                    node.push(statement);
                    return Some(node);
                }
            }
            self.stream = save;
            return None;
        }
        if let Some(case) = self.match_keyword("case") {
            if let Some(value) = self.parse_constant_expression() {
                if let Some(colon) = self.match_symbol(TokenKind::Colon) {
                    if let Some(statement) = self.parse_statement() {
                        node.push(case);
                        node.push(value);
                        node.push(colon);
                        node.push(statement);
                        return Some(node);
                    }
                }
            }
            self.stream = save;
            return None;
        }
        if let Some(default) = self.match_keyword("default") {
            if let Some(colon) = self.match_symbol(TokenKind::Colon) {
                if let Some(statement) = self.parse_statement() {
                    node.push(default);
                    node.push(colon);
                    node.push(statement);
                    return Some(node);
                }
            }
            self.stream = save;
        }
        None
    }

    /// `compound-statement ::= "{" declaration-list? statement-list? "}"`
    ///
    /// Declarations precede statements; there is no interleaving in C89.
    pub(crate) fn parse_compound_statement(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::CompoundStatement);
        node.push(self.match_symbol(TokenKind::LBrace)?);
        if let Some(declarations) = self.parse_declaration_list() {
            node.push(declarations);
        }
        if let Some(statements) = self.parse_statement_list() {
            node.push(statements);
        }
        let Some(rbrace) = self.match_symbol(TokenKind::RBrace) else {
            self.stream = save;
            return None;
        };
        node.push(rbrace);
        Some(node)
    }

    fn parse_statement_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::StatementList);
        node.push(self.parse_statement()?);
        while let Some(statement) = self.parse_statement() {
            node.push(statement);
        }
        Some(node)
    }

    /// `expression-statement ::= expression? ";"`
    fn parse_expression_statement(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::ExpressionStatement);
        let expression = self.parse_expression();
        let Some(semicolon) = self.match_symbol(TokenKind::Semicolon) else {
            self.stream = save;
            return None;
        };
        if let Some(expression) = expression {
            node.push(expression);
        }
        node.push(semicolon);
        Some(node)
    }

    /// `selection-statement ::= if "(" expression ")" statement
    /// (else statement)? | switch "(" expression ")" statement`
    fn parse_selection_statement(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::SelectionStatement);
        if let Some(keyword) = self.match_keyword("if") {
            node.push(keyword);
            if !self.parenthesized_condition(&mut node) {
                self.stream = save;
                return None;
            }
            let Some(then_branch) = self.parse_statement() else {
                self.stream = save;
                return None;
            };
            node.push(then_branch);
            let mark = self.stream;
            if let Some(else_keyword) = self.match_keyword("else") {
                if let Some(else_branch) = self.parse_statement() {
                    node.push(else_keyword);
                    node.push(else_branch);
                } else {
                    self.stream = mark;
                }
            }
            return Some(node);
        }
        let keyword = self.match_keyword("switch")?;
        node.push(keyword);
        if !self.parenthesized_condition(&mut node) {
            self.stream = save;
            return None;
        }
        let Some(body) = self.parse_statement() else {
            self.stream = save;
            return None;
        };
        node.push(body);
        Some(node)
    }

    /// `iteration-statement ::= while "(" expression ")" statement |
    /// do statement while "(" expression ")" ";" |
    /// for "(" expression? ";" expression? ";" expression? ")" statement`
    fn parse_iteration_statement(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::IterationStatement);
        if let Some(keyword) = self.match_keyword("while") {
            node.push(keyword);
            if !self.parenthesized_condition(&mut node) {
                self.stream = save;
                return None;
            }
            let Some(body) = self.parse_statement() else {
                self.stream = save;
                return None;
            };
            node.push(body);
            return Some(node);
        }
        if let Some(keyword) = self.match_keyword("do") {
            node.push(keyword);
            let Some(body) = self.parse_statement() else {
                self.stream = save;
                return None;
            };
            node.push(body);
            let Some(while_keyword) = self.match_keyword("while") else {
                self.stream = save;
                return None;
            };
            node.push(while_keyword);
            if !self.parenthesized_condition(&mut node) {
                self.stream = save;
                return None;
            }
            let Some(semicolon) = self.match_symbol(TokenKind::Semicolon) else {
                self.stream = save;
                return None;
            };
            node.push(semicolon);
            return Some(node);
        }
        let keyword = self.match_keyword("for")?;
        node.push(keyword);
        let Some(lparen) = self.match_symbol(TokenKind::LParen) else {
            self.stream = save;
            return None;
        };
        node.push(lparen);
        if let Some(init) = self.parse_expression() {
            node.push(init);
        }
        let Some(first_semicolon) = self.match_symbol(TokenKind::Semicolon) else {
            self.stream = save;
            return None;
        };
        node.push(first_semicolon);
        if let Some(condition) = self.parse_expression() {
            node.push(condition);
        }
        let Some(second_semicolon) = self.match_symbol(TokenKind::Semicolon) else {
            self.stream = save;
            return None;
        };
        node.push(second_semicolon);
        if let Some(step) = self.parse_expression() {
            node.push(step);
        }
        let Some(rparen) = self.match_symbol(TokenKind::RParen) else {
            self.stream = save;
            return None;
        };
        node.push(rparen);
        let Some(body) = self.parse_statement() else {
            self.stream = save;
            return None;
        };
        node.push(body);
        Some(node)
    }

    /// `jump-statement ::= goto identifier ";" | continue ";" | break ";" |
    /// return expression? ";"`
    fn parse_jump_statement(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::JumpStatement);
        if let Some(keyword) = self.match_keyword("goto") {
            node.push(keyword);
            let Some(label) = self.match_identifier() else {
                self.stream = save;
                return None;
            };
            node.push(label);
        } else if let Some(keyword) = self.match_keyword_of(&["continue", "break"]) {
            node.push(keyword);
        } else if let Some(keyword) = self.match_keyword("return") {
            node.push(keyword);
            if let Some(value) = self.parse_expression() {
                node.push(value);
            }
        } else {
            return None;
        }
        let Some(semicolon) = self.match_symbol(TokenKind::Semicolon) else {
            self.stream = save;
            return None;
        };
        node.push(semicolon);
        Some(node)
    }

    /// `"(" expression ")"`, pushed onto `node` as three children. Returns
    /// false without restoring; callers restore their own save point.
    fn parenthesized_condition(&mut self, node: &mut Node<'a>) -> bool {
        let Some(lparen) = self.match_symbol(TokenKind::LParen) else {
            return false;
        };
        let Some(condition) = self.parse_expression() else {
            return false;
        };
        let Some(rparen) = self.match_symbol(TokenKind::RParen) else {
            return false;
        };
        node.push(lparen);
        node.push(condition);
        node.push(rparen);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statement_parses(source: &str) -> bool {
        let mut parser = Parser::new(source);
        parser.parse_statement().is_some() && parser.peek().kind == TokenKind::Eof
    }

    #[test]
    fn test_expression_and_empty_statements() {
        assert!(statement_parses("x = 1;"));
        assert!(statement_parses(";"));
        assert!(statement_parses("f(a, b);"));
        assert!(!statement_parses("x = 1"));
    }

    #[test]
    fn test_compound_statement_orders_declarations_first() {
        assert!(statement_parses("{ int x; x = 1; }"));
        assert!(statement_parses("{ }"));
        assert!(statement_parses("{ x = 1; }"));
        // C89 forbids a declaration after a statement.
        assert!(!statement_parses("{ x = 1; int y; }"));
    }

    #[test]
    fn test_selection_statements() {
        assert!(statement_parses("if (x) y = 1;"));
        assert!(statement_parses("if (x) y = 1; else y = 2;"));
        assert!(statement_parses(
            "switch (x) { case 1: y = 1; break; default: y = 0; }"
        ));
        assert!(!statement_parses("if x y = 1;"));
    }

    #[test]
    fn test_dangling_else_binds_to_nearest_if() {
        let mut parser = Parser::new("if (a) if (b) x = 1; else x = 2;");
        let statement = parser.parse_statement().expect("statement");
        assert_eq!(parser.peek().kind, TokenKind::Eof);
        // Outer if has no else arm: keyword, (, cond, ), inner statement.
        let outer = &statement.children[0];
        assert_eq!(outer.kind, NodeKind::SelectionStatement);
        assert_eq!(outer.children.len(), 5);
        // Inner if carries the else: 5 children plus `else statement`.
        let inner = &outer.children[4].children[0];
        assert_eq!(inner.kind, NodeKind::SelectionStatement);
        assert_eq!(inner.children.len(), 7);
    }

    #[test]
    fn test_iteration_statements() {
        assert!(statement_parses("while (x) x = x - 1;"));
        assert!(statement_parses("do x = x - 1; while (x);"));
        assert!(statement_parses("for (i = 0; i < 10; i = i + 1) s = s + i;"));
        assert!(statement_parses("for (;;) break;"));
        assert!(statement_parses("for (; i < 10;) i = i + 1;"));
        assert!(!statement_parses("do x = 1; while (x)"));
    }

    #[test]
    fn test_jump_statements() {
        assert!(statement_parses("goto done;"));
        assert!(statement_parses("continue;"));
        assert!(statement_parses("break;"));
        assert!(statement_parses("return;"));
        assert!(statement_parses("return x + 1;"));
        assert!(!statement_parses("goto;"));
        assert!(!statement_parses("return x + 1"));
    }

    #[test]
    fn test_labeled_statements() {
        assert!(statement_parses("done: return 0;"));
        assert!(statement_parses("case 3: x = 1;"));
        assert!(statement_parses("default: x = 0;"));
        assert!(!statement_parses("case: x = 1;"));
    }
}
