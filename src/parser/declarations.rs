//! Declaration recognizers.
//!
//! Covers the external-definition and declaration half of the C89 grammar:
//!
//! ```text
//! translation-unit     ::= external-declaration+
//! external-declaration ::= function-definition | declaration
//! function-definition  ::= declaration-specifiers? declarator
//!                          declaration-list? compound-statement
//! declaration          ::= declaration-specifiers init-declarator-list? ";"
//! ```
//!
//! plus declarators, abstract declarators, struct/union/enum specifiers,
//! initializers, and type names.
//!
//! Typedef handling lives here: a recognized declaration whose specifiers
//! contain the `typedef` storage class registers each declared name in the
//! session's typedef table, and `type-specifier` accepts an identifier only
//! if its spelling is already registered. Declaration order in the input is
//! therefore load-bearing.
//!
//! All recognizers are `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::parse::Parser;
use crate::parser::token::TokenKind;
use crate::parser::tree::{Node, NodeKind};

impl<'a> Parser<'a> {
    /// `translation-unit ::= external-declaration+`
    pub(crate) fn parse_translation_unit(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::TranslationUnit);
        node.push(self.parse_external_declaration()?);
        while let Some(declaration) = self.parse_external_declaration() {
            node.push(declaration);
        }
        Some(node)
    }

    /// `external-declaration ::= function-definition | declaration`
    fn parse_external_declaration(&mut self) -> Option<Node<'a>> {
        if self.fatal.is_some() {
            return None;
        }
        let mut node = Node::new(NodeKind::ExternalDeclaration);
        if let Some(definition) = self.parse_function_definition() {
            node.push(definition);
            return Some(node);
        }
        let declaration = self.parse_declaration()?;
        node.push(declaration);
        Some(node)
    }

    /// `function-definition ::= declaration-specifiers? declarator
    /// declaration-list? compound-statement`
    ///
    /// The optional declaration list is the old-style parameter declaration
    /// block between the declarator and the body.
    fn parse_function_definition(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::FunctionDefinition);
        if let Some(specifiers) = self.parse_declaration_specifiers() {
            node.push(specifiers);
        }
        let Some(declarator) = self.parse_declarator() else {
            self.stream = save;
            return None;
        };
        node.push(declarator);
        if let Some(declarations) = self.parse_declaration_list() {
            node.push(declarations);
        }
        let Some(body) = self.parse_compound_statement() else {
            self.stream = save;
            return None;
        };
        node.push(body);
        Some(node)
    }

    /// `declaration ::= declaration-specifiers init-declarator-list? ";"`
    ///
    /// On success, a `typedef` declaration registers every declared name
    /// before the next declaration is attempted, so later declarations can
    /// use those names as type-specifiers.
    pub(crate) fn parse_declaration(&mut self) -> Option<Node<'a>> {
        if self.fatal.is_some() {
            return None;
        }
        let save = self.stream;
        let mut node = Node::new(NodeKind::Declaration);
        let specifiers = self.parse_declaration_specifiers()?;
        let is_typedef = declares_typedef(&specifiers);
        node.push(specifiers);
        if let Some(declarators) = self.parse_init_declarator_list() {
            node.push(declarators);
        }
        let Some(semicolon) = self.match_symbol(TokenKind::Semicolon) else {
            self.stream = save;
            return None;
        };
        node.push(semicolon);
        if is_typedef {
            for name in declared_names(&node) {
                if !self.typedefs.register(name) {
                    self.report_out_of_space();
                    self.stream = save;
                    return None;
                }
            }
        }
        Some(node)
    }

    /// `declaration-list ::= declaration+`
    pub(crate) fn parse_declaration_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::DeclarationList);
        node.push(self.parse_declaration()?);
        while let Some(declaration) = self.parse_declaration() {
            node.push(declaration);
        }
        Some(node)
    }

    /// `declaration-specifiers ::= (storage-class-specifier | type-specifier
    /// | type-qualifier)+`, flattened into one sibling list.
    pub(crate) fn parse_declaration_specifiers(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::DeclarationSpecifiers);
        loop {
            if let Some(specifier) = self.parse_storage_class_specifier() {
                node.push(specifier);
                continue;
            }
            if let Some(specifier) = self.parse_type_specifier() {
                node.push(specifier);
                continue;
            }
            if let Some(qualifier) = self.parse_type_qualifier() {
                node.push(qualifier);
                continue;
            }
            break;
        }
        if node.children.is_empty() {
            None
        } else {
            Some(node)
        }
    }

    fn parse_storage_class_specifier(&mut self) -> Option<Node<'a>> {
        let keyword = self.match_keyword_of(&["typedef", "extern", "static", "auto", "register"])?;
        let mut node = Node::new(NodeKind::StorageClassSpecifier);
        node.push(keyword);
        Some(node)
    }

    /// `type-specifier ::= void | char | short | int | long | float | double
    /// | signed | unsigned | struct-or-union-specifier | enum-specifier
    /// | typedef-name`
    pub(crate) fn parse_type_specifier(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::TypeSpecifier);
        if let Some(keyword) = self.match_keyword_of(&[
            "void", "char", "short", "int", "long", "float", "double", "signed", "unsigned",
        ]) {
            node.push(keyword);
            return Some(node);
        }
        if let Some(specifier) = self.parse_struct_or_union_specifier() {
            node.push(specifier);
            return Some(node);
        }
        if let Some(specifier) = self.parse_enum_specifier() {
            node.push(specifier);
            return Some(node);
        }
        let name = self.parse_typedef_name()?;
        node.push(name);
        Some(node)
    }

    /// `typedef-name ::= identifier`, accepted only if the spelling is
    /// already in the typedef table.
    fn parse_typedef_name(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let token = self.next();
        if token.kind == TokenKind::Identifier && self.typedefs.is_registered(token.text) {
            let mut node = Node::new(NodeKind::TypedefName);
            node.push(Node::leaf(NodeKind::Identifier, token));
            Some(node)
        } else {
            self.stream = save;
            None
        }
    }

    pub(crate) fn parse_type_qualifier(&mut self) -> Option<Node<'a>> {
        let keyword = self.match_keyword_of(&["const", "volatile"])?;
        let mut node = Node::new(NodeKind::TypeQualifier);
        node.push(keyword);
        Some(node)
    }

    fn parse_type_qualifier_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::TypeQualifierList);
        node.push(self.parse_type_qualifier()?);
        while let Some(qualifier) = self.parse_type_qualifier() {
            node.push(qualifier);
        }
        Some(node)
    }

    /// `struct-or-union-specifier ::= struct-or-union identifier?
    /// "{" struct-declaration-list "}" | struct-or-union identifier`
    fn parse_struct_or_union_specifier(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::StructOrUnionSpecifier);
        node.push(self.parse_struct_or_union()?);
        if let Some(name) = self.match_identifier() {
            node.push(name);
        }
        if let Some(lbrace) = self.match_symbol(TokenKind::LBrace) {
            node.push(lbrace);
            let Some(fields) = self.parse_struct_declaration_list() else {
                self.stream = save;
                return None;
            };
            node.push(fields);
            let Some(rbrace) = self.match_symbol(TokenKind::RBrace) else {
                self.stream = save;
                return None;
            };
            node.push(rbrace);
            return Some(node);
        }
        // The tag-only form requires the identifier.
        if node.children.iter().any(|c| c.kind == NodeKind::Identifier) {
            Some(node)
        } else {
            self.stream = save;
            None
        }
    }

    fn parse_struct_or_union(&mut self) -> Option<Node<'a>> {
        let keyword = self.match_keyword_of(&["struct", "union"])?;
        let mut node = Node::new(NodeKind::StructOrUnion);
        node.push(keyword);
        Some(node)
    }

    fn parse_struct_declaration_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::StructDeclarationList);
        node.push(self.parse_struct_declaration()?);
        while let Some(declaration) = self.parse_struct_declaration() {
            node.push(declaration);
        }
        Some(node)
    }

    /// `struct-declaration ::= specifier-qualifier-list
    /// struct-declarator-list ";"`
    fn parse_struct_declaration(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::StructDeclaration);
        node.push(self.parse_specifier_qualifier_list()?);
        let Some(declarators) = self.parse_struct_declarator_list() else {
            self.stream = save;
            return None;
        };
        node.push(declarators);
        let Some(semicolon) = self.match_symbol(TokenKind::Semicolon) else {
            self.stream = save;
            return None;
        };
        node.push(semicolon);
        Some(node)
    }

    /// `specifier-qualifier-list ::= (type-specifier | type-qualifier)+`
    pub(crate) fn parse_specifier_qualifier_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::SpecifierQualifierList);
        loop {
            if let Some(specifier) = self.parse_type_specifier() {
                node.push(specifier);
                continue;
            }
            if let Some(qualifier) = self.parse_type_qualifier() {
                node.push(qualifier);
                continue;
            }
            break;
        }
        if node.children.is_empty() {
            None
        } else {
            Some(node)
        }
    }

    fn parse_struct_declarator_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::StructDeclaratorList);
        node.push(self.parse_struct_declarator()?);
        loop {
            let mark = self.stream;
            let Some(comma) = self.match_symbol(TokenKind::Comma) else {
                break;
            };
            let Some(declarator) = self.parse_struct_declarator() else {
                self.stream = mark;
                break;
            };
            node.push(comma);
            node.push(declarator);
        }
        Some(node)
    }

    /// `struct-declarator ::= declarator | declarator? ":"
    /// constant-expression`
    fn parse_struct_declarator(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::StructDeclarator);
        if let Some(declarator) = self.parse_declarator() {
            node.push(declarator);
            let mark = self.stream;
            if let Some(colon) = self.match_symbol(TokenKind::Colon) {
                if let Some(width) = self.parse_constant_expression() {
                    node.push(colon);
                    node.push(width);
                } else {
                    self.stream = mark;
                }
            }
            return Some(node);
        }
        // Anonymous bit-field.
        if let Some(colon) = self.match_symbol(TokenKind::Colon) {
            if let Some(width) = self.parse_constant_expression() {
                node.push(colon);
                node.push(width);
                return Some(node);
            }
            self.stream = save;
        }
        None
    }

    /// `enum-specifier ::= enum identifier? "{" enumerator-list "}" |
    /// enum identifier`
    fn parse_enum_specifier(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::EnumSpecifier);
        node.push(self.match_keyword("enum")?);
        if let Some(name) = self.match_identifier() {
            node.push(name);
        }
        if let Some(lbrace) = self.match_symbol(TokenKind::LBrace) {
            node.push(lbrace);
            let Some(enumerators) = self.parse_enumerator_list() else {
                self.stream = save;
                return None;
            };
            node.push(enumerators);
            let Some(rbrace) = self.match_symbol(TokenKind::RBrace) else {
                self.stream = save;
                return None;
            };
            node.push(rbrace);
            return Some(node);
        }
        if node.children.iter().any(|c| c.kind == NodeKind::Identifier) {
            Some(node)
        } else {
            self.stream = save;
            None
        }
    }

    fn parse_enumerator_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::EnumeratorList);
        node.push(self.parse_enumerator()?);
        loop {
            let mark = self.stream;
            let Some(comma) = self.match_symbol(TokenKind::Comma) else {
                break;
            };
            let Some(enumerator) = self.parse_enumerator() else {
                self.stream = mark;
                break;
            };
            node.push(comma);
            node.push(enumerator);
        }
        Some(node)
    }

    /// `enumerator ::= identifier ("=" constant-expression)?`
    fn parse_enumerator(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::Enumerator);
        node.push(self.match_identifier()?);
        let mark = self.stream;
        if let Some(eq) = self.match_symbol(TokenKind::Eq) {
            if let Some(value) = self.parse_constant_expression() {
                node.push(eq);
                node.push(value);
            } else {
                self.stream = mark;
            }
        }
        Some(node)
    }

    fn parse_init_declarator_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::InitDeclaratorList);
        node.push(self.parse_init_declarator()?);
        loop {
            let mark = self.stream;
            let Some(comma) = self.match_symbol(TokenKind::Comma) else {
                break;
            };
            let Some(declarator) = self.parse_init_declarator() else {
                self.stream = mark;
                break;
            };
            node.push(comma);
            node.push(declarator);
        }
        Some(node)
    }

    /// `init-declarator ::= declarator ("=" initializer)?`
    fn parse_init_declarator(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::InitDeclarator);
        node.push(self.parse_declarator()?);
        let mark = self.stream;
        if let Some(eq) = self.match_symbol(TokenKind::Eq) {
            if let Some(initializer) = self.parse_initializer() {
                node.push(eq);
                node.push(initializer);
            } else {
                self.stream = mark;
            }
        }
        Some(node)
    }

    /// `declarator ::= pointer? direct-declarator`
    pub(crate) fn parse_declarator(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::Declarator);
        let pointer = self.parse_pointer();
        let Some(direct) = self.parse_direct_declarator() else {
            self.stream = save;
            return None;
        };
        if let Some(pointer) = pointer {
            node.push(pointer);
        }
        node.push(direct);
        Some(node)
    }

    /// `pointer ::= "*" type-qualifier-list? pointer?`
    fn parse_pointer(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::Pointer);
        node.push(self.match_symbol(TokenKind::Star)?);
        if let Some(qualifiers) = self.parse_type_qualifier_list() {
            node.push(qualifiers);
        }
        if let Some(inner) = self.parse_pointer() {
            node.push(inner);
        }
        Some(node)
    }

    /// `direct-declarator ::= (identifier | "(" declarator ")")
    /// declarator-suffix*`
    fn parse_direct_declarator(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::DirectDeclarator);
        if let Some(name) = self.match_identifier() {
            node.push(name);
        } else if let Some(lparen) = self.match_symbol(TokenKind::LParen) {
            let Some(inner) = self.parse_declarator() else {
                self.stream = save;
                return None;
            };
            let Some(rparen) = self.match_symbol(TokenKind::RParen) else {
                self.stream = save;
                return None;
            };
            node.push(lparen);
            node.push(inner);
            node.push(rparen);
        } else {
            return None;
        }
        while let Some(group) = self.parse_declarator_suffix() {
            for child in group {
                node.push(child);
            }
        }
        Some(node)
    }

    /// One `"[" constant-expression? "]"`, `"(" parameter-type-list ")"`,
    /// or `"(" identifier-list? ")"` suffix group.
    fn parse_declarator_suffix(&mut self) -> Option<Vec<Node<'a>>> {
        let save = self.stream;
        if let Some(lbracket) = self.match_symbol(TokenKind::LBracket) {
            let size = self.parse_constant_expression();
            if let Some(rbracket) = self.match_symbol(TokenKind::RBracket) {
                let mut group = vec![lbracket];
                if let Some(size) = size {
                    group.push(size);
                }
                group.push(rbracket);
                return Some(group);
            }
            self.stream = save;
            return None;
        }
        let lparen = self.match_symbol(TokenKind::LParen)?;
        if let Some(parameters) = self.parse_parameter_type_list() {
            if let Some(rparen) = self.match_symbol(TokenKind::RParen) {
                return Some(vec![lparen, parameters, rparen]);
            }
        }
        self.stream = save;
        let lparen = self.match_symbol(TokenKind::LParen)?;
        let identifiers = self.parse_identifier_list();
        if let Some(rparen) = self.match_symbol(TokenKind::RParen) {
            let mut group = vec![lparen];
            if let Some(identifiers) = identifiers {
                group.push(identifiers);
            }
            group.push(rparen);
            return Some(group);
        }
        self.stream = save;
        None
    }

    /// `parameter-type-list ::= parameter-list ("," "...")?`
    pub(crate) fn parse_parameter_type_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::ParameterTypeList);
        node.push(self.parse_parameter_list()?);
        let mark = self.stream;
        if let Some(comma) = self.match_symbol(TokenKind::Comma) {
            if let Some(ellipsis) = self.match_symbol(TokenKind::Ellipsis) {
                node.push(comma);
                node.push(ellipsis);
            } else {
                self.stream = mark;
            }
        }
        Some(node)
    }

    fn parse_parameter_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::ParameterList);
        node.push(self.parse_parameter_declaration()?);
        loop {
            let mark = self.stream;
            let Some(comma) = self.match_symbol(TokenKind::Comma) else {
                break;
            };
            let Some(parameter) = self.parse_parameter_declaration() else {
                self.stream = mark;
                break;
            };
            node.push(comma);
            node.push(parameter);
        }
        Some(node)
    }

    /// `parameter-declaration ::= declaration-specifiers
    /// (declarator | abstract-declarator?)`
    fn parse_parameter_declaration(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::ParameterDeclaration);
        node.push(self.parse_declaration_specifiers()?);
        if let Some(declarator) = self.parse_declarator() {
            node.push(declarator);
        } else if let Some(declarator) = self.parse_abstract_declarator() {
            node.push(declarator);
        }
        Some(node)
    }

    fn parse_identifier_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::IdentifierList);
        node.push(self.match_identifier()?);
        loop {
            let mark = self.stream;
            let Some(comma) = self.match_symbol(TokenKind::Comma) else {
                break;
            };
            let Some(name) = self.match_identifier() else {
                self.stream = mark;
                break;
            };
            node.push(comma);
            node.push(name);
        }
        Some(node)
    }

    /// `initializer ::= assignment-expression |
    /// "{" initializer-list ","? "}"`
    fn parse_initializer(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::Initializer);
        if let Some(value) = self.parse_assignment_expression() {
            node.push(value);
            return Some(node);
        }
        let save = self.stream;
        let lbrace = self.match_symbol(TokenKind::LBrace)?;
        let Some(list) = self.parse_initializer_list() else {
            self.stream = save;
            return None;
        };
        let comma = self.match_symbol(TokenKind::Comma);
        let Some(rbrace) = self.match_symbol(TokenKind::RBrace) else {
            self.stream = save;
            return None;
        };
        node.push(lbrace);
        node.push(list);
        if let Some(comma) = comma {
            node.push(comma);
        }
        node.push(rbrace);
        Some(node)
    }

    fn parse_initializer_list(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::InitializerList);
        node.push(self.parse_initializer()?);
        loop {
            let mark = self.stream;
            let Some(comma) = self.match_symbol(TokenKind::Comma) else {
                break;
            };
            let Some(initializer) = self.parse_initializer() else {
                self.stream = mark;
                break;
            };
            node.push(comma);
            node.push(initializer);
        }
        Some(node)
    }

    /// `type-name ::= specifier-qualifier-list abstract-declarator?`
    pub(crate) fn parse_type_name(&mut self) -> Option<Node<'a>> {
        let mut node = Node::new(NodeKind::TypeName);
        node.push(self.parse_specifier_qualifier_list()?);
        if let Some(declarator) = self.parse_abstract_declarator() {
            node.push(declarator);
        }
        Some(node)
    }

    /// `abstract-declarator ::= pointer | pointer?
    /// direct-abstract-declarator`
    fn parse_abstract_declarator(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::AbstractDeclarator);
        let pointer = self.parse_pointer();
        let direct = self.parse_direct_abstract_declarator();
        match (pointer, direct) {
            (None, None) => {
                self.stream = save;
                None
            }
            (pointer, direct) => {
                if let Some(pointer) = pointer {
                    node.push(pointer);
                }
                if let Some(direct) = direct {
                    node.push(direct);
                }
                Some(node)
            }
        }
    }

    /// `direct-abstract-declarator ::= ("(" abstract-declarator ")")?
    /// abstract-declarator-suffix*`, requiring at least one part.
    fn parse_direct_abstract_declarator(&mut self) -> Option<Node<'a>> {
        let save = self.stream;
        let mut node = Node::new(NodeKind::DirectAbstractDeclarator);
        let mark = self.stream;
        if let Some(lparen) = self.match_symbol(TokenKind::LParen) {
            match self.parse_abstract_declarator() {
                Some(inner) => match self.match_symbol(TokenKind::RParen) {
                    Some(rparen) => {
                        node.push(lparen);
                        node.push(inner);
                        node.push(rparen);
                    }
                    None => self.stream = mark,
                },
                None => self.stream = mark,
            }
        }
        while let Some(group) = self.parse_abstract_declarator_suffix() {
            for child in group {
                node.push(child);
            }
        }
        if node.children.is_empty() {
            self.stream = save;
            None
        } else {
            Some(node)
        }
    }

    /// One `"[" constant-expression? "]"` or `"(" parameter-type-list? ")"`
    /// suffix group.
    fn parse_abstract_declarator_suffix(&mut self) -> Option<Vec<Node<'a>>> {
        let save = self.stream;
        if let Some(lbracket) = self.match_symbol(TokenKind::LBracket) {
            let size = self.parse_constant_expression();
            if let Some(rbracket) = self.match_symbol(TokenKind::RBracket) {
                let mut group = vec![lbracket];
                if let Some(size) = size {
                    group.push(size);
                }
                group.push(rbracket);
                return Some(group);
            }
            self.stream = save;
            return None;
        }
        let lparen = self.match_symbol(TokenKind::LParen)?;
        let parameters = self.parse_parameter_type_list();
        if let Some(rparen) = self.match_symbol(TokenKind::RParen) {
            let mut group = vec![lparen];
            if let Some(parameters) = parameters {
                group.push(parameters);
            }
            group.push(rparen);
            return Some(group);
        }
        self.stream = save;
        None
    }
}

/// True if the specifier list contains the `typedef` storage class.
fn declares_typedef(specifiers: &Node<'_>) -> bool {
    specifiers.children.iter().any(|child| {
        child.kind == NodeKind::StorageClassSpecifier
            && child
                .children
                .first()
                .and_then(|keyword| keyword.token)
                .is_some_and(|token| token.text == "typedef")
    })
}

/// Every name declared by the declaration's init-declarator list.
fn declared_names<'a>(declaration: &Node<'a>) -> Vec<&'a str> {
    let mut names = Vec::new();
    let Some(list) = declaration
        .children
        .iter()
        .find(|child| child.kind == NodeKind::InitDeclaratorList)
    else {
        return names;
    };
    for init in &list.children {
        if init.kind != NodeKind::InitDeclarator {
            continue;
        }
        if let Some(declarator) = init
            .children
            .iter()
            .find(|child| child.kind == NodeKind::Declarator)
        {
            if let Some(name) = declarator_name(declarator) {
                names.push(name);
            }
        }
    }
    names
}

/// The identifier a declarator declares: the first child of its direct
/// declarator, or the parenthesized inner declarator's name.
fn declarator_name<'a>(declarator: &Node<'a>) -> Option<&'a str> {
    let direct = declarator
        .children
        .iter()
        .find(|child| child.kind == NodeKind::DirectDeclarator)?;
    let first = direct.children.first()?;
    match first.kind {
        NodeKind::Identifier => first.token.map(|token| token.text),
        NodeKind::Symbol => direct
            .children
            .iter()
            .find(|child| child.kind == NodeKind::Declarator)
            .and_then(declarator_name),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_declaration() {
        let mut parser = Parser::new("int x = 42;");
        let declaration = parser.parse_declaration().expect("declaration");
        assert_eq!(declaration.kind, NodeKind::Declaration);
        assert_eq!(declaration.children[0].kind, NodeKind::DeclarationSpecifiers);
        assert_eq!(declaration.children[1].kind, NodeKind::InitDeclaratorList);
    }

    #[test]
    fn test_missing_semicolon_restores_position() {
        let mut parser = Parser::new("int x");
        assert!(parser.parse_declaration().is_none());
        assert_eq!(parser.position(), (1, 1));
    }

    #[test]
    fn test_typedef_registers_declared_name() {
        let mut parser = Parser::new("typedef unsigned long ulong_t;");
        parser.parse_declaration().expect("typedef declaration");
        assert!(parser.typedefs.is_registered("ulong_t"));
        assert!(!parser.typedefs.is_registered("unsigned"));
    }

    #[test]
    fn test_typedef_of_function_pointer() {
        let mut parser = Parser::new("typedef int (*callback)(int, int);");
        parser.parse_declaration().expect("typedef declaration");
        assert!(parser.typedefs.is_registered("callback"));
    }

    #[test]
    fn test_typedef_registers_every_declarator() {
        let mut parser = Parser::new("typedef int small, *small_ptr;");
        parser.parse_declaration().expect("typedef declaration");
        assert!(parser.typedefs.is_registered("small"));
        assert!(parser.typedefs.is_registered("small_ptr"));
    }

    #[test]
    fn test_pointer_and_array_declarators() {
        for source in [
            "int *p;",
            "int **pp;",
            "const char *s;",
            "int a[10];",
            "int m[3][4];",
            "char *argv[];",
            "int (*f)(void);",
        ] {
            let mut parser = Parser::new(source);
            assert!(
                parser.parse_declaration().is_some(),
                "failed to parse: {}",
                source
            );
            assert_eq!(parser.peek().kind, TokenKind::Eof, "leftover in: {}", source);
        }
    }

    #[test]
    fn test_struct_specifier_forms() {
        for source in [
            "struct point { int x; int y; };",
            "struct point p;",
            "union u { int i; char c; } v;",
            "struct flags { unsigned a : 1; unsigned : 3; unsigned b : 4; };",
        ] {
            let mut parser = Parser::new(source);
            assert!(
                parser.parse_declaration().is_some(),
                "failed to parse: {}",
                source
            );
        }
    }

    #[test]
    fn test_enum_specifier_forms() {
        for source in [
            "enum color { RED, GREEN, BLUE };",
            "enum color { RED = 1, GREEN = 2 } c;",
            "enum color c;",
        ] {
            let mut parser = Parser::new(source);
            assert!(
                parser.parse_declaration().is_some(),
                "failed to parse: {}",
                source
            );
        }
    }

    #[test]
    fn test_braced_initializers() {
        for source in [
            "int a[3] = { 1, 2, 3 };",
            "int a[3] = { 1, 2, 3, };",
            "int m[2][2] = { { 1, 2 }, { 3, 4 } };",
        ] {
            let mut parser = Parser::new(source);
            assert!(
                parser.parse_declaration().is_some(),
                "failed to parse: {}",
                source
            );
        }
    }

    #[test]
    fn test_declared_name_extraction() {
        let mut parser = Parser::new("typedef int a, *b, c[4], (*d)(void);");
        let declaration = parser.parse_declaration().expect("declaration");
        assert_eq!(declared_names(&declaration), vec!["a", "b", "c", "d"]);
    }
}
