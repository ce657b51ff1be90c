//! C89 source code parser
//!
//! This module transforms C89 source text into a concrete parse tree:
//! - [`lexer`]: tokenization (source text → tokens)
//! - [`parse`]: backtracking recursive descent over the token stream
//! - [`tree`]: parse tree node definitions
//! - [`typedefs`]: the typedef-name table that makes the grammar
//!   context-sensitive
//!
//! The grammar recognizers are split across [`declarations`],
//! [`statements`], and [`expressions`] as `impl` blocks on
//! [`parse::Parser`].
//!
//! # Parser implementation
//!
//! Hand-written recursive descent with unbounded backtracking: every
//! recognizer either succeeds and advances the tokenizer, or fails and
//! restores it exactly. Alternatives are tried in grammar order. The tree
//! is concrete, not abstract: keywords, punctuation, and every matched
//! nonterminal appear as nodes, so the token sequence can be read back off
//! the leaves in source order. No external parser generator dependencies.

pub(crate) mod chars;
pub mod declarations;
pub mod expressions;
pub mod lexer;
pub mod parse;
pub mod statements;
pub mod token;
pub mod tree;
pub mod typedefs;
