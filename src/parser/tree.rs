//! Concrete parse tree definitions.
//!
//! The tree mirrors the grammar: every node is tagged with the nonterminal
//! (or lifted terminal) it represents, optionally carries the token that
//! justified it, and owns its children in match order. Dropping a node frees
//! its whole subtree, which is how subtrees built by a failed recognizer are
//! discarded on backtrack.

use super::token::Token;
use std::fmt;

/// Tags for parse tree nodes: one variant per grammar nonterminal, plus the
/// leaf kinds for terminals lifted into the tree (`Symbol`, `Keyword`,
/// `Identifier`, `StringLiteral`, `Constant`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    // Lifted terminals
    Symbol,
    Keyword,
    Identifier,
    StringLiteral,
    Constant,

    // External definitions
    TranslationUnit,
    ExternalDeclaration,
    FunctionDefinition,

    // Declarations
    Declaration,
    DeclarationList,
    DeclarationSpecifiers,
    StorageClassSpecifier,
    TypeSpecifier,
    TypeQualifier,
    TypeQualifierList,
    StructOrUnionSpecifier,
    StructOrUnion,
    StructDeclarationList,
    StructDeclaration,
    SpecifierQualifierList,
    StructDeclaratorList,
    StructDeclarator,
    EnumSpecifier,
    EnumeratorList,
    Enumerator,
    InitDeclaratorList,
    InitDeclarator,
    Declarator,
    DirectDeclarator,
    Pointer,
    ParameterTypeList,
    ParameterList,
    ParameterDeclaration,
    IdentifierList,
    Initializer,
    InitializerList,
    TypeName,
    AbstractDeclarator,
    DirectAbstractDeclarator,
    TypedefName,

    // Statements
    Statement,
    LabeledStatement,
    CompoundStatement,
    StatementList,
    ExpressionStatement,
    SelectionStatement,
    IterationStatement,
    JumpStatement,

    // Expressions
    Expression,
    AssignmentExpression,
    AssignmentOperator,
    ConditionalExpression,
    ConstantExpression,
    LogicalOrExpression,
    LogicalAndExpression,
    InclusiveOrExpression,
    ExclusiveOrExpression,
    AndExpression,
    EqualityExpression,
    RelationalExpression,
    ShiftExpression,
    AdditiveExpression,
    MultiplicativeExpression,
    CastExpression,
    UnaryExpression,
    UnaryOperator,
    PostfixExpression,
    PrimaryExpression,
    ArgumentExpressionList,
}

/// One parse tree node. A node exclusively owns its children; the tree has a
/// single [`NodeKind::TranslationUnit`] root owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<'a> {
    pub kind: NodeKind,
    pub token: Option<Token<'a>>,
    pub children: Vec<Node<'a>>,
}

impl<'a> Node<'a> {
    /// New interior node with no token and no children.
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            token: None,
            children: Vec::new(),
        }
    }

    /// New leaf node carrying the token that justified it.
    pub fn leaf(kind: NodeKind, token: Token<'a>) -> Self {
        Self {
            kind,
            token: Some(token),
            children: Vec::new(),
        }
    }

    /// Append a child, preserving match order.
    pub fn push(&mut self, child: Node<'a>) {
        self.children.push(child);
    }

    /// Source position of this node: its own token's position, or the first
    /// position found in its subtree.
    pub fn location(&self) -> Option<(usize, usize)> {
        if let Some(token) = self.token {
            return Some((token.line, token.column));
        }
        self.children.iter().find_map(Node::location)
    }

    fn write_indented(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for _ in 0..depth {
            write!(f, "  ")?;
        }
        if let Some((line, column)) = self.location() {
            write!(f, "[{},{}] ", line, column)?;
        }
        write!(f, "{:?}", self.kind)?;
        match self.token {
            Some(token) => writeln!(f, "( {} )", token.text)?,
            None => writeln!(f)?,
        }
        for child in &self.children {
            child.write_indented(f, depth + 1)?;
        }
        Ok(())
    }
}

/// Renders the subtree in document order, one node per line, indented two
/// spaces per depth: `[line,col] Name( text )`, with the token parenthetical
/// omitted for tokenless nodes.
impl fmt::Display for Node<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_indented(f, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::token::TokenKind;

    fn token(kind: TokenKind, text: &str, line: usize, column: usize) -> Token<'_> {
        Token {
            kind,
            text,
            line,
            column,
        }
    }

    #[test]
    fn test_children_preserve_insertion_order() {
        let mut node = Node::new(NodeKind::Expression);
        node.push(Node::leaf(
            NodeKind::Identifier,
            token(TokenKind::Identifier, "a", 1, 1),
        ));
        node.push(Node::leaf(
            NodeKind::Symbol,
            token(TokenKind::Comma, ",", 1, 2),
        ));
        node.push(Node::leaf(
            NodeKind::Identifier,
            token(TokenKind::Identifier, "b", 1, 4),
        ));
        let texts: Vec<&str> = node
            .children
            .iter()
            .filter_map(|c| c.token.map(|t| t.text))
            .collect();
        assert_eq!(texts, vec!["a", ",", "b"]);
    }

    #[test]
    fn test_location_falls_through_to_first_descendant() {
        let mut root = Node::new(NodeKind::TranslationUnit);
        assert_eq!(root.location(), None);

        let mut inner = Node::new(NodeKind::Declaration);
        inner.push(Node::leaf(
            NodeKind::Keyword,
            token(TokenKind::Keyword, "int", 3, 5),
        ));
        root.push(inner);
        assert_eq!(root.location(), Some((3, 5)));
    }

    #[test]
    fn test_display_format() {
        let mut root = Node::new(NodeKind::PrimaryExpression);
        root.push(Node::leaf(
            NodeKind::Constant,
            token(TokenKind::IntLiteral, "42", 2, 9),
        ));
        let rendered = root.to_string();
        assert_eq!(
            rendered,
            "[2,9] PrimaryExpression\n  [2,9] Constant( 42 )\n"
        );
    }
}
