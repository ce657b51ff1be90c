//! Token definitions for the C89 tokenizer.
//!
//! A [`Token`] is a tagged byte span borrowed from the input buffer together
//! with the line and column where it starts. Tokens are immutable once
//! produced; the parser never mutates them, it only lifts them into parse
//! tree leaves.

use std::fmt;

/// All token variants produced by the tokenizer.
///
/// The enumeration is closed: every punctuator and operator spelling has its
/// own variant, literal and structural classes are generic (a keyword token
/// is tagged [`TokenKind::Keyword`] regardless of which keyword it spells;
/// the parser distinguishes keywords by their text). [`TokenKind::Comment`]
/// and [`TokenKind::Preprocessor`] are recognized internally but never
/// returned by [`Tokenizer::next_token`](super::lexer::Tokenizer::next_token).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Multi-character operators
    LtLtEq,     // <<=
    GtGtEq,     // >>=
    Ellipsis,   // ...
    NotEq,      // !=
    Ge,         // >=
    Le,         // <=
    Arrow,      // ->
    OrOr,       // ||
    AndAnd,     // &&
    LtLt,       // <<
    GtGt,       // >>
    PlusPlus,   // ++
    MinusMinus, // --
    StarEq,     // *=
    SlashEq,    // /=
    PercentEq,  // %=
    PlusEq,     // +=
    MinusEq,    // -=
    AmpEq,      // &=
    CaretEq,    // ^=
    PipeEq,     // |=
    EqEq,       // ==

    // Single-character punctuation
    LParen,    // (
    RParen,    // )
    Colon,     // :
    Semicolon, // ;
    Star,      // *
    LBracket,  // [
    RBracket,  // ]
    LBrace,    // {
    RBrace,    // }
    Comma,     // ,
    Minus,     // -
    Plus,      // +
    Eq,        // =
    Caret,     // ^
    Amp,       // &
    Percent,   // %
    Question,  // ?
    Bang,      // !
    Slash,     // /
    Pipe,      // |
    Lt,        // <
    Gt,        // >
    Tilde,     // ~
    Dot,       // .
    Hash,      // #

    // Literal classes
    CharLiteral,
    StringLiteral,
    IntLiteral,
    FloatLiteral,

    // Structural classes
    Identifier,
    Keyword,
    Preprocessor,
    Comment,

    // Sentinels
    Unknown,
    Eof,
}

/// A single token: kind, borrowed text span, and start position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Keyword => write!(f, "keyword '{}'", self.text),
            TokenKind::CharLiteral => write!(f, "char literal {}", self.text),
            TokenKind::StringLiteral => write!(f, "string literal {}", self.text),
            TokenKind::IntLiteral => write!(f, "int literal {}", self.text),
            TokenKind::FloatLiteral => write!(f, "float literal {}", self.text),
            TokenKind::Preprocessor => write!(f, "preprocessor command"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Unknown => write!(f, "unknown token '{}'", self.text),
            TokenKind::Eof => write!(f, "end of input"),
            _ => write!(f, "'{}'", self.text),
        }
    }
}

/// Multi-character operator spellings, longest first, in the order the
/// tokenizer tries them. An exact prefix match consumes the spelling, so
/// `<<=` must come before `<<`, which must come before `<`.
pub(crate) const MULTI_CHAR_OPERATORS: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::LtLtEq),
    (">>=", TokenKind::GtGtEq),
    ("...", TokenKind::Ellipsis),
    ("!=", TokenKind::NotEq),
    (">=", TokenKind::Ge),
    ("<=", TokenKind::Le),
    ("->", TokenKind::Arrow),
    ("||", TokenKind::OrOr),
    ("&&", TokenKind::AndAnd),
    ("<<", TokenKind::LtLt),
    (">>", TokenKind::GtGt),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("*=", TokenKind::StarEq),
    ("/=", TokenKind::SlashEq),
    ("%=", TokenKind::PercentEq),
    ("+=", TokenKind::PlusEq),
    ("-=", TokenKind::MinusEq),
    ("&=", TokenKind::AmpEq),
    ("^=", TokenKind::CaretEq),
    ("|=", TokenKind::PipeEq),
    ("==", TokenKind::EqEq),
];

/// The fixed C89 keyword list. An identifier-length run must match one of
/// these in full to lex as a keyword; `intvar` is an identifier.
pub(crate) const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "char", "const", "continue", "default", "do",
    "double", "else", "enum", "extern", "float", "for", "goto", "if", "int",
    "long", "register", "return", "short", "signed", "sizeof", "static",
    "struct", "switch", "typedef", "union", "unsigned", "void", "volatile",
    "while",
];

/// Single-character punctuation table, consulted after every other rule has
/// failed. Bytes outside this table lex as [`TokenKind::Unknown`].
pub(crate) fn single_char_kind(byte: u8) -> Option<TokenKind> {
    let kind = match byte {
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b':' => TokenKind::Colon,
        b';' => TokenKind::Semicolon,
        b'*' => TokenKind::Star,
        b'[' => TokenKind::LBracket,
        b']' => TokenKind::RBracket,
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b',' => TokenKind::Comma,
        b'-' => TokenKind::Minus,
        b'+' => TokenKind::Plus,
        b'=' => TokenKind::Eq,
        b'^' => TokenKind::Caret,
        b'&' => TokenKind::Amp,
        b'%' => TokenKind::Percent,
        b'?' => TokenKind::Question,
        b'!' => TokenKind::Bang,
        b'/' => TokenKind::Slash,
        b'|' => TokenKind::Pipe,
        b'<' => TokenKind::Lt,
        b'>' => TokenKind::Gt,
        b'~' => TokenKind::Tilde,
        b'.' => TokenKind::Dot,
        b'#' => TokenKind::Hash,
        _ => return None,
    };
    Some(kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_table_is_complete_c89() {
        assert_eq!(KEYWORDS.len(), 32);
        assert!(KEYWORDS.contains(&"typedef"));
        assert!(KEYWORDS.contains(&"volatile"));
        assert!(!KEYWORDS.contains(&"inline")); // C99
    }

    #[test]
    fn test_operator_table_is_longest_first() {
        // No spelling may appear after one of its own prefixes.
        for (i, (spelling, _)) in MULTI_CHAR_OPERATORS.iter().enumerate() {
            for (earlier, _) in &MULTI_CHAR_OPERATORS[..i] {
                assert!(
                    !spelling.starts_with(earlier),
                    "'{}' is shadowed by earlier '{}'",
                    spelling,
                    earlier
                );
            }
        }
    }

    #[test]
    fn test_single_char_table() {
        assert_eq!(single_char_kind(b';'), Some(TokenKind::Semicolon));
        assert_eq!(single_char_kind(b'#'), Some(TokenKind::Hash));
        assert_eq!(single_char_kind(b'@'), None);
        assert_eq!(single_char_kind(b'$'), None);
    }

    #[test]
    fn test_token_display() {
        let token = Token {
            kind: TokenKind::Keyword,
            text: "int",
            line: 1,
            column: 1,
        };
        assert_eq!(token.to_string(), "keyword 'int'");
    }
}
