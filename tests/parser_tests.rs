//! End-to-end parser tests: whole translation units in, concrete parse
//! trees or positioned errors out.

use ctree::{parse, NodeKind, ParseError};

#[test]
fn test_minimal_main() {
    let tree = parse("int main() { return 0; }").expect("parse failed");
    assert_eq!(tree.kind, NodeKind::TranslationUnit);
    assert_eq!(tree.children.len(), 1);
    let external = &tree.children[0];
    assert_eq!(external.kind, NodeKind::ExternalDeclaration);
    assert_eq!(external.children[0].kind, NodeKind::FunctionDefinition);
}

#[test]
fn test_typedef_before_use_parses() {
    let tree = parse("typedef int myint; myint x;").expect("parse failed");
    assert_eq!(tree.children.len(), 2);
}

#[test]
fn test_typedef_after_use_fails() {
    // `myint x;` is reached before the typedef registers the name.
    assert!(parse("myint x; typedef int myint;").is_err());
}

#[test]
fn test_typedef_chain() {
    let source = "typedef unsigned long word;\n\
                  typedef word *word_ptr;\n\
                  word_ptr table[16];\n";
    assert!(parse(source).is_ok());
}

#[test]
fn test_syntax_error_reports_furthest_position() {
    let err = parse("int main() { return 0 }").unwrap_err();
    // The parser consumed through `0` and failed needing `;` at `}`.
    assert_eq!(err, ParseError::Syntax { line: 1, column: 23 });
}

#[test]
fn test_old_style_function_definition() {
    let source = "\
int add(a, b)\n\
int a;\n\
int b;\n\
{\n\
    return a + b;\n\
}\n";
    assert!(parse(source).is_ok());
}

#[test]
fn test_struct_heavy_program() {
    let source = "\
struct point {\n\
    int x;\n\
    int y;\n\
};\n\
\n\
struct rect {\n\
    struct point min;\n\
    struct point max;\n\
};\n\
\n\
int area(struct rect *r)\n\
{\n\
    return (r->max.x - r->min.x) * (r->max.y - r->min.y);\n\
}\n";
    assert!(parse(source).is_ok());
}

#[test]
fn test_comprehensive_program() {
    let source = "\
#include <stdio.h>\n\
#define LIMIT 32\n\
\n\
typedef unsigned long count_t;\n\
\n\
enum state { IDLE, RUNNING = 5, DONE };\n\
\n\
struct entry {\n\
    char name[16];\n\
    count_t hits;\n\
    unsigned flag : 1;\n\
};\n\
\n\
static count_t total;\n\
\n\
/* Classic iterative sum with every statement form. */\n\
int sum(int limit)\n\
{\n\
    int i;\n\
    int acc;\n\
    acc = 0;\n\
    for (i = 0; i < limit; i++) {\n\
        if (i % 2 == 0)\n\
            acc += i;\n\
        else\n\
            acc -= 1;\n\
    }\n\
    while (acc > 100)\n\
        acc >>= 1;\n\
    do {\n\
        acc++;\n\
    } while (acc < 0);\n\
    switch (acc) {\n\
    case 0:\n\
        goto done;\n\
    default:\n\
        break;\n\
    }\n\
done:\n\
    return acc;\n\
}\n\
\n\
int main(void)\n\
{\n\
    struct entry table[LIMIT];\n\
    count_t n;\n\
    char *p;\n\
    n = (count_t) sum(10);\n\
    p = &table[0].name[0];\n\
    *p = 'x';\n\
    total = n ? n : sizeof(struct entry);\n\
    return 0;\n\
}\n";
    let tree = parse(source).expect("parse failed");
    // typedef, enum, struct, static declaration, sum, main.
    assert_eq!(tree.children.len(), 6);
}

#[test]
fn test_tree_display_is_indented_with_positions() {
    let tree = parse("int x;").expect("parse failed");
    let rendered = tree.to_string();
    let mut lines = rendered.lines();
    assert_eq!(lines.next(), Some("[1,1] TranslationUnit"));
    assert_eq!(lines.next(), Some("  [1,1] ExternalDeclaration"));
    assert!(rendered.contains("Keyword( int )"));
    assert!(rendered.contains("Identifier( x )"));
    assert!(rendered.contains("Symbol( ; )"));
}

#[test]
fn test_leaves_read_back_in_source_order() {
    fn collect<'a>(node: &ctree::Node<'a>, out: &mut Vec<&'a str>) {
        if let Some(token) = node.token {
            out.push(token.text);
        }
        for child in &node.children {
            collect(child, out);
        }
    }
    let tree = parse("int f(void) { return 1 + 2; }").expect("parse failed");
    let mut leaves = Vec::new();
    collect(&tree, &mut leaves);
    assert_eq!(
        leaves,
        vec!["int", "f", "(", "void", ")", "{", "return", "1", "+", "2", ";", "}"]
    );
}

#[test]
fn test_rejects_c99_constructs() {
    // Declaration after statement.
    assert!(parse("int f(void) { f(); int x; return 0; }").is_err());
    // Line comments are not C89; `//` lexes as two slashes.
    assert!(parse("int x; // note\n").is_err());
}

#[test]
fn test_error_on_unbalanced_braces() {
    assert!(parse("int main() { return 0;").is_err());
    assert!(parse("int main() { { } ").is_err());
}
