//! Parser coordinator.
//!
//! This module provides the [`Parser`] struct and core parsing
//! infrastructure: error types, terminal-matching helpers, and the main
//! parse entry point. Recognizer methods are split across sibling modules
//! using `impl Parser` blocks:
//!
//! - `declarations`: translation unit, declarations, declarators, types
//! - `statements`: labeled, compound, expression, selection, iteration,
//!   and jump statements
//! - `expressions`: the full C89 expression precedence chain
//!
//! # Backtracking
//!
//! Every recognizer has the shape `fn(&mut self) -> Option<Node>`. On
//! success the tokenizer has advanced past the consumed tokens and the
//! returned node carries the matched subtree. On failure the tokenizer is
//! restored to its exact entry value by reassigning a saved copy, and the
//! partially built subtree is dropped. Alternatives are tried in grammar
//! order; the first that succeeds wins.

use super::lexer::Tokenizer;
use super::token::{Token, TokenKind};
use super::tree::{Node, NodeKind};
use super::typedefs::{TypedefTable, TYPEDEF_CAPACITY};
use thiserror::Error;

/// Parser error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Every alternative was exhausted at the root. The position is the
    /// furthest token start the parser reached before giving up.
    #[error("input did not parse at line {line}, column {column}")]
    Syntax { line: usize, column: usize },

    /// The typedef table's backing capacity was exhausted. Fatal for the
    /// current parse; no partial tree is returned.
    #[error("typedef table is full ({capacity} entries)")]
    OutOfSpace { capacity: usize },
}

/// Backtracking recursive descent parser for the C89 translation-unit
/// grammar.
///
/// A `Parser` is one parse session: it owns the tokenizer, the typedef
/// table, the furthest-position watermark used for error reporting, and a
/// last-error slot for resource failures. Independent sessions share no
/// state, so translation units can be parsed back to back without
/// contamination.
pub struct Parser<'a> {
    pub(crate) stream: Tokenizer<'a>,
    pub(crate) typedefs: TypedefTable,
    pub(crate) fatal: Option<ParseError>,
    furthest: (usize, usize),
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            stream: Tokenizer::new(source),
            typedefs: TypedefTable::new(),
            fatal: None,
            furthest: (1, 1),
        }
    }

    /// Parse the whole input as a translation unit.
    ///
    /// Succeeds only if the recognized translation unit is followed by end
    /// of input. On syntax failure the error reports the furthest position
    /// reached across all attempted alternatives.
    pub fn parse(&mut self) -> Result<Node<'a>, ParseError> {
        let tree = self.parse_translation_unit();
        if let Some(error) = self.fatal.take() {
            return Err(error);
        }
        match tree {
            Some(node) if self.peek().kind == TokenKind::Eof => Ok(node),
            _ => Err(ParseError::Syntax {
                line: self.furthest.0,
                column: self.furthest.1,
            }),
        }
    }

    /// Current tokenizer position as `(line, column)`.
    pub fn position(&self) -> (usize, usize) {
        self.stream.position()
    }

    // ===== Helper methods =====

    /// Fetch the next token, updating the furthest-position watermark.
    pub(crate) fn next(&mut self) -> Token<'a> {
        let token = self.stream.next_token();
        let start = (token.line, token.column);
        if start > self.furthest {
            self.furthest = start;
        }
        token
    }

    /// Look at the next token without consuming it.
    pub(crate) fn peek(&mut self) -> Token<'a> {
        let save = self.stream;
        let token = self.next();
        self.stream = save;
        token
    }

    /// Consume a punctuation or operator token of exactly `kind`, lifted
    /// into a `Symbol` leaf.
    pub(crate) fn match_symbol(&mut self, kind: TokenKind) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        if token.kind == kind {
            Some(Node::leaf(NodeKind::Symbol, token))
        } else {
            self.stream = save;
            None
        }
    }

    /// Consume a punctuation or operator token whose kind is one of `kinds`.
    pub(crate) fn match_symbol_of(&mut self, kinds: &[TokenKind]) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        if kinds.contains(&token.kind) {
            Some(Node::leaf(NodeKind::Symbol, token))
        } else {
            self.stream = save;
            None
        }
    }

    /// Consume a keyword token spelling exactly `word`.
    pub(crate) fn match_keyword(&mut self, word: &str) -> Option<Node<'a>> {
        self.match_keyword_of(&[word])
    }

    /// Consume a keyword token whose text is one of `words`. The tokenizer
    /// tags keywords generically; spellings are distinguished here.
    pub(crate) fn match_keyword_of(&mut self, words: &[&str]) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        if token.kind == TokenKind::Keyword && words.contains(&token.text) {
            Some(Node::leaf(NodeKind::Keyword, token))
        } else {
            self.stream = save;
            None
        }
    }

    /// Consume an identifier token, lifted into an `Identifier` leaf.
    pub(crate) fn match_identifier(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        if token.kind == TokenKind::Identifier {
            Some(Node::leaf(NodeKind::Identifier, token))
        } else {
            self.stream = save;
            None
        }
    }

    /// Consume a string literal token.
    pub(crate) fn match_string_literal(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        if token.kind == TokenKind::StringLiteral {
            Some(Node::leaf(NodeKind::StringLiteral, token))
        } else {
            self.stream = save;
            None
        }
    }

    /// Consume an integer, character, or floating constant.
    pub(crate) fn match_constant(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        match token.kind {
            TokenKind::IntLiteral | TokenKind::CharLiteral | TokenKind::FloatLiteral => {
                Some(Node::leaf(NodeKind::Constant, token))
            }
            _ => {
                self.stream = save;
                None
            }
        }
    }

    /// Record typedef table exhaustion in the session's last-error slot.
    /// Recognizers then fail all the way to the root, which reports the
    /// resource error instead of a syntax error.
    pub(crate) fn report_out_of_space(&mut self) {
        if self.fatal.is_none() {
            self.fatal = Some(ParseError::OutOfSpace {
                capacity: TYPEDEF_CAPACITY,
            });
        }
    }
}

/// Parse `source` as a C89 translation unit.
pub fn parse(source: &str) -> Result<Node<'_>, ParseError> {
    Parser::new(source).parse()
}
