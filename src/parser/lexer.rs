//! Tokenizer for C89 source text.
//!
//! The [`Tokenizer`] is a cursor over an immutable input buffer. It produces
//! one [`Token`] per call and always succeeds: bytes that match no lexical
//! rule become [`TokenKind::Unknown`] tokens, and the end of input (or a NUL
//! byte) becomes [`TokenKind::Eof`] without advancing further.
//!
//! A `Tokenizer` is `Copy`. Saving a copy and assigning it back is the sole
//! backtracking mechanism in the whole parser: restoring a saved value fully
//! undoes every byte consumed in between.
//!
//! Preprocessor commands and block comments are recognized lexically but
//! discarded; [`Tokenizer::next_token`] never returns them.

use super::chars;
use super::token::{Token, TokenKind, KEYWORDS, MULTI_CHAR_OPERATORS};
use thiserror::Error;

/// Error returned by the lexing entry point when the input contains a byte
/// sequence matching no lexical rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown token '{text}' at line {line}, column {column}")]
pub struct LexError {
    pub text: String,
    pub line: usize,
    pub column: usize,
}

/// Cursor over the input buffer with line/column tracking.
#[derive(Debug, Clone, Copy)]
pub struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Current position as `(line, column)`.
    pub fn position(&self) -> (usize, usize) {
        (self.line, self.column)
    }

    /// Produce the next token, advancing past it. Preprocessor commands and
    /// block comments are consumed and skipped.
    pub fn next_token(&mut self) -> Token<'a> {
        loop {
            let token = self.raw_token();
            match token.kind {
                TokenKind::Preprocessor | TokenKind::Comment => continue,
                _ => return token,
            }
        }
    }

    /// One token of any kind, including the discarded ones. Rules are tried
    /// in strict priority order; each failed attempt leaves the cursor
    /// unmoved.
    fn raw_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        let start = self.pos;
        let line = self.line;
        let column = self.column;

        if self.at_end() {
            return Token {
                kind: TokenKind::Eof,
                text: "",
                line,
                column,
            };
        }

        if let Some(kind) = self.scan_operator() {
            return self.make(kind, start, line, column);
        }
        if self.scan_keyword() {
            return self.make(TokenKind::Keyword, start, line, column);
        }
        if self.scan_char_literal() {
            return self.make(TokenKind::CharLiteral, start, line, column);
        }
        if self.scan_preprocessor() {
            return self.make(TokenKind::Preprocessor, start, line, column);
        }
        if self.scan_block_comment() {
            return self.make(TokenKind::Comment, start, line, column);
        }
        if self.scan_string_literal() {
            return self.make(TokenKind::StringLiteral, start, line, column);
        }
        if self.scan_float() {
            return self.make(TokenKind::FloatLiteral, start, line, column);
        }
        if self.scan_integer() {
            return self.make(TokenKind::IntLiteral, start, line, column);
        }
        if self.scan_identifier() {
            return self.make(TokenKind::Identifier, start, line, column);
        }

        // Nothing matched: consume one character and classify it against
        // the punctuation table.
        match self.src[self.pos..].chars().next() {
            Some(ch) => {
                for _ in 0..ch.len_utf8() {
                    self.advance();
                }
                let kind = if ch.is_ascii() {
                    super::token::single_char_kind(ch as u8).unwrap_or(TokenKind::Unknown)
                } else {
                    TokenKind::Unknown
                };
                self.make(kind, start, line, column)
            }
            None => Token {
                kind: TokenKind::Eof,
                text: "",
                line,
                column,
            },
        }
    }

    // ===== Scanning rules =====
    //
    // Each rule advances the cursor only on success; on failure the cursor
    // is restored by reassigning the saved copy.

    fn scan_operator(&mut self) -> Option<TokenKind> {
        let rest = &self.src[self.pos..];
        for (spelling, kind) in MULTI_CHAR_OPERATORS {
            if rest.starts_with(spelling) {
                for _ in 0..spelling.len() {
                    self.advance();
                }
                return Some(*kind);
            }
        }
        None
    }

    /// A keyword must match the full identifier-length run, never a prefix
    /// of a longer identifier.
    fn scan_keyword(&mut self) -> bool {
        let bytes = self.src.as_bytes();
        if !self.peek().is_some_and(chars::is_letter) {
            return false;
        }
        let mut end = self.pos + 1;
        while end < bytes.len() && chars::is_ident_continue(bytes[end]) {
            end += 1;
        }
        let run = &self.src[self.pos..end];
        if KEYWORDS.contains(&run) {
            for _ in 0..run.len() {
                self.advance();
            }
            true
        } else {
            false
        }
    }

    /// `'` ... unescaped `'`, at most 4 bytes total (covers `'\x'` forms and
    /// a literal `'\''`).
    fn scan_char_literal(&mut self) -> bool {
        let save = *self;
        if self.peek() != Some(b'\'') {
            return false;
        }
        self.advance();
        loop {
            match self.peek() {
                None => {
                    *self = save;
                    return false;
                }
                Some(b'\\') => {
                    self.advance();
                    self.advance();
                }
                Some(b'\'') => {
                    self.advance();
                    if self.pos - save.pos > 4 {
                        *self = save;
                        return false;
                    }
                    return true;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// A `#` starts a preprocessor command only at the beginning of a line:
    /// scanning backward over non-newline whitespace, the previous byte must
    /// be a line break or absent. The command runs to an unescaped newline
    /// or end of input.
    fn scan_preprocessor(&mut self) -> bool {
        if self.peek() != Some(b'#') {
            return false;
        }
        let bytes = self.src.as_bytes();
        let mut back = self.pos;
        while back > 0 {
            let prev = bytes[back - 1];
            if chars::is_line_break(prev) {
                break;
            }
            if chars::is_space(prev) {
                back -= 1;
                continue;
            }
            return false;
        }
        // Consume to an unescaped newline.
        self.advance();
        while let Some(byte) = self.peek() {
            if byte == b'\\' {
                self.advance();
                self.advance();
                continue;
            }
            if chars::is_line_break(byte) {
                break;
            }
            self.advance();
        }
        true
    }

    /// `/*` ... `*/`; an unterminated comment fails the rule.
    fn scan_block_comment(&mut self) -> bool {
        let save = *self;
        if !self.src[self.pos..].starts_with("/*") {
            return false;
        }
        self.advance();
        self.advance();
        loop {
            if self.src[self.pos..].starts_with("*/") {
                self.advance();
                self.advance();
                return true;
            }
            if self.advance().is_none() {
                *self = save;
                return false;
            }
        }
    }

    /// `"` ... unescaped `"`; an unterminated string fails the rule and the
    /// opening quote falls through to the punctuation table.
    fn scan_string_literal(&mut self) -> bool {
        let save = *self;
        if self.peek() != Some(b'"') {
            return false;
        }
        self.advance();
        loop {
            match self.peek() {
                None => {
                    *self = save;
                    return false;
                }
                Some(b'\\') => {
                    self.advance();
                    self.advance();
                }
                Some(b'"') => {
                    self.advance();
                    return true;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
    }

    /// Floating literal: optional integer part, optional `.` with optional
    /// fractional part, optional exponent (`e`/`E`, optional `-`, required
    /// digits), optional suffix. At least one digit part and at least one of
    /// {decimal point, exponent} must be present.
    ///
    /// Tried before the integer rule so that `1.5` and `1e3` lex as one
    /// token; a plain integer has neither point nor exponent and falls
    /// through.
    fn scan_float(&mut self) -> bool {
        let save = *self;
        let mut int_digits = 0;
        while self.peek().is_some_and(chars::is_digit) {
            self.advance();
            int_digits += 1;
        }
        let mut frac_digits = 0;
        let mut seen_dot = false;
        if self.peek() == Some(b'.') {
            self.advance();
            seen_dot = true;
            while self.peek().is_some_and(chars::is_digit) {
                self.advance();
                frac_digits += 1;
            }
        }
        let mut seen_exp = false;
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            let mark = *self;
            self.advance();
            if self.peek() == Some(b'-') {
                self.advance();
            }
            let mut exp_digits = 0;
            while self.peek().is_some_and(chars::is_digit) {
                self.advance();
                exp_digits += 1;
            }
            if exp_digits > 0 {
                seen_exp = true;
            } else {
                // A bare `e` is not an exponent; leave it for the caller.
                *self = mark;
            }
        }
        if (int_digits == 0 && frac_digits == 0) || (!seen_dot && !seen_exp) {
            *self = save;
            return false;
        }
        if self.peek().is_some_and(chars::is_float_suffix) {
            self.advance();
        }
        true
    }

    /// Integer literal: `0x`/`0X` hex, leading-zero octal, or decimal, with
    /// optional trailing suffix letters. A leading zero followed by a
    /// non-octal digit fails the rule outright.
    fn scan_integer(&mut self) -> bool {
        let save = *self;
        match self.peek() {
            Some(b'0') => {
                self.advance();
                if matches!(self.peek(), Some(b'x') | Some(b'X')) {
                    self.advance();
                    let mut hex_digits = 0;
                    while self.peek().is_some_and(chars::is_hex_digit) {
                        self.advance();
                        hex_digits += 1;
                    }
                    if hex_digits == 0 {
                        *self = save;
                        return false;
                    }
                } else {
                    while let Some(byte) = self.peek() {
                        if !chars::is_digit(byte) {
                            break;
                        }
                        if !chars::is_octal_digit(byte) {
                            *self = save;
                            return false;
                        }
                        self.advance();
                    }
                }
            }
            Some(byte) if chars::is_digit(byte) => {
                while self.peek().is_some_and(chars::is_digit) {
                    self.advance();
                }
            }
            _ => return false,
        }
        while self.peek().is_some_and(chars::is_int_suffix) {
            self.advance();
        }
        true
    }

    /// Identifier: a letter followed by letters, digits, or underscores.
    fn scan_identifier(&mut self) -> bool {
        if !self.peek().is_some_and(chars::is_letter) {
            return false;
        }
        self.advance();
        while self.peek().is_some_and(chars::is_ident_continue) {
            self.advance();
        }
        true
    }

    // ===== Cursor primitives =====

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(chars::is_space) {
            self.advance();
        }
    }

    /// End of input: past the buffer, or at the NUL sentinel.
    fn at_end(&self) -> bool {
        match self.src.as_bytes().get(self.pos) {
            None => true,
            Some(0) => true,
            Some(_) => false,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if chars::is_line_break(byte) {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(byte)
    }

    fn make(&self, kind: TokenKind, start: usize, line: usize, column: usize) -> Token<'a> {
        Token {
            kind,
            text: &self.src[start..self.pos],
            line,
            column,
        }
    }
}

/// Tokenize the whole input, stopping at the first [`TokenKind::Unknown`]
/// token. On success the returned stream ends with the [`TokenKind::Eof`]
/// token. Comments and preprocessor commands never appear in the stream.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, LexError> {
    let mut tokenizer = Tokenizer::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next_token();
        match token.kind {
            TokenKind::Unknown => {
                return Err(LexError {
                    text: token.text.to_string(),
                    line: token.line,
                    column: token.column,
                });
            }
            TokenKind::Eof => {
                tokens.push(token);
                return Ok(tokens);
            }
            _ => tokens.push(token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source)
            .expect("lexing failed")
            .iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_simple_declaration() {
        let tokens = lex("int x = 42;").unwrap();
        let expected = [
            (TokenKind::Keyword, "int"),
            (TokenKind::Identifier, "x"),
            (TokenKind::Eq, "="),
            (TokenKind::IntLiteral, "42"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Eof, ""),
        ];
        assert_eq!(tokens.len(), expected.len());
        for (token, (kind, text)) in tokens.iter().zip(expected) {
            assert_eq!(token.kind, kind);
            assert_eq!(token.text, text);
        }
    }

    #[test]
    fn test_longest_match_wins() {
        assert_eq!(kinds("<<="), vec![TokenKind::LtLtEq, TokenKind::Eof]);
        assert_eq!(kinds("<<"), vec![TokenKind::LtLt, TokenKind::Eof]);
        assert_eq!(
            kinds("a >>= b"),
            vec![
                TokenKind::Identifier,
                TokenKind::GtGtEq,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_keyword_requires_full_run() {
        let tokens = lex("intvar").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].text, "intvar");

        let tokens = lex("int var").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_integer_classification() {
        for source in ["0", "0x1F", "0123", "42u", "0x1FUL", "10L"] {
            let tokens = lex(source).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::IntLiteral, "source: {}", source);
            assert_eq!(tokens[0].text, source);
        }
        // Leading zero with a non-octal digit matches no rule.
        let err = lex("08").unwrap_err();
        assert_eq!(err.text, "0");
        assert_eq!((err.line, err.column), (1, 1));
    }

    #[test]
    fn test_float_classification() {
        for source in ["1.5", "1.", ".5", "1e3", "1.5e-2", "1.5f", "2.0L"] {
            let tokens = lex(source).unwrap();
            assert_eq!(
                tokens[0].kind,
                TokenKind::FloatLiteral,
                "source: {}",
                source
            );
            assert_eq!(tokens[0].text, source);
        }
        // A bare exponent marker is not part of the literal.
        let tokens = lex("1e").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::IntLiteral);
        assert_eq!(tokens[0].text, "1");
        assert_eq!(tokens[1].kind, TokenKind::Identifier);
        assert_eq!(tokens[1].text, "e");
    }

    #[test]
    fn test_member_access_is_not_a_float() {
        assert_eq!(
            kinds("a.b"),
            vec![
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_char_literals() {
        for source in ["'a'", "'\\n'", "'\\''", "'\\x'"] {
            let tokens = lex(source).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::CharLiteral, "source: {}", source);
        }
        // Longer than 4 bytes fails the rule; the opening quote then
        // matches nothing.
        assert!(lex("'abcd'").is_err());
    }

    #[test]
    fn test_string_literals() {
        let tokens = lex(r#""hello\nworld""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].text, r#""hello\nworld""#);

        let tokens = lex(r#""with \" escape""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);

        // Unterminated string: the opening quote lexes as Unknown.
        assert!(lex("\"oops").is_err());
    }

    #[test]
    fn test_comment_transparency() {
        let with = lex("/* c */ int").unwrap();
        let without = lex("int").unwrap();
        assert_eq!(with.len(), without.len());
        for (a, b) in with.iter().zip(&without) {
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.text, b.text);
        }

        // Unterminated comment: the slash falls back to punctuation.
        let tokens = lex("/* oops").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Slash);
        assert_eq!(tokens[1].kind, TokenKind::Star);
    }

    #[test]
    fn test_preprocessor_line_start_rule() {
        // At start of input.
        let tokens = lex("#include <stdio.h>\nint x;").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[0].text, "int");

        // After a newline with leading indentation.
        let tokens = lex("int y;\n   #define N 4\nint z;").unwrap();
        let texts: Vec<&str> = tokens.iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["int", "y", ";", "int", "z", ";", ""]);

        // Mid-line `#` is ordinary punctuation.
        let tokens = lex("a # b").unwrap();
        assert_eq!(tokens[1].kind, TokenKind::Hash);
    }

    #[test]
    fn test_line_and_column_tracking() {
        let tokens = lex("int x;\n  char y;").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        assert_eq!((tokens[1].line, tokens[1].column), (1, 5));
        assert_eq!((tokens[3].line, tokens[3].column), (2, 3)); // char
        assert_eq!((tokens[4].line, tokens[4].column), (2, 8)); // y
    }

    #[test]
    fn test_eof_is_sticky() {
        let mut tokenizer = Tokenizer::new("x");
        assert_eq!(tokenizer.next_token().kind, TokenKind::Identifier);
        assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
        assert_eq!(tokenizer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_nul_byte_ends_stream() {
        let tokens = lex("int\0char").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Keyword);
        assert_eq!(tokens[1].kind, TokenKind::Eof);
    }

    #[test]
    fn test_copy_restores_everything() {
        let mut tokenizer = Tokenizer::new("int x = 42;");
        let save = tokenizer;
        tokenizer.next_token();
        tokenizer.next_token();
        tokenizer = save;
        let token = tokenizer.next_token();
        assert_eq!(token.kind, TokenKind::Keyword);
        assert_eq!(token.text, "int");
        assert_eq!((token.line, token.column), (1, 1));
    }

    #[test]
    fn test_underscore_does_not_start_identifier() {
        let err = lex("_foo").unwrap_err();
        assert_eq!(err.text, "_");
    }
}
