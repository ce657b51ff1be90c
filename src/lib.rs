//! # Introduction
//!
//! ctree parses ISO C89 translation units into concrete parse trees. The
//! input is tokenized on demand and recognized by a backtracking recursive
//! descent parser covering the full C89 grammar, including the typedef-name
//! ambiguity that makes C context-sensitive.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Tokenizer → Parser → Parse tree
//! ```
//!
//! 1. [`parser::lexer`] — turns source text into tokens, longest match
//!    first, skipping whitespace, comments, and preprocessor lines.
//! 2. [`parser::parse`] — recognizes the translation-unit grammar by trial
//!    and backtracking, consulting a per-session typedef table to decide
//!    whether an identifier names a type.
//! 3. [`parser::tree`] — the resulting concrete tree: one node per matched
//!    nonterminal, with keywords and punctuation kept as leaves.
//!
//! ## Example
//!
//! ```
//! let tree = ctree::parse("typedef int myint; myint x;").unwrap();
//! println!("{}", tree);
//! ```
//!
//! Parsing either yields a tree spanning the whole input or an error with
//! the furthest line and column the parser reached.

pub mod parser;

pub use parser::lexer::{lex, LexError, Tokenizer};
pub use parser::parse::{parse, ParseError, Parser};
pub use parser::token::{Token, TokenKind};
pub use parser::tree::{Node, NodeKind};
