use std::fmt::Write;

use crate::document::{ParsedDocument, parse_text};
use crate::parser::RuleKind;

mod grammar {
    mod declarations_tests;
    mod expressions_tests;
    mod literals_tests;
    mod statements_tests;
}

mod recovery {
    mod fuel_tests;
    mod unclosed_tests;
    mod unexpected_tests;
}


fn render(doc: &ParsedDocument) -> String {
    let mut out = String::new();
    for diagnostic in doc.diagnostics() {
        writeln!(out, "{diagnostic}").unwrap();
    }
    out
}

/// Tree of a program that must parse cleanly.
fn dump(src: &str) -> String {
    let doc = parse_text(src);
    assert!(
        doc.diagnostics().is_empty(),
        "expected a clean parse, got:\n{}",
        render(&doc)
    );
    doc.dump_tree()
}

/// Subtree of a single expression, parsed as the only statement of a
/// function body.
fn dump_expr(expr: &str) -> String {
    let src = format!("void f() {{ {expr}; }}");
    let doc = parse_text(&src);
    assert!(
        doc.diagnostics().is_empty(),
        "expected a clean parse of `{expr}`, got:\n{}",
        render(&doc)
    );

    let tree = doc.tree();
    let statement = tree
        .descendants(tree.root())
        .find(|id| tree.rule(*id) == RuleKind::ExprStatement)
        .expect("expression statement");
    let expr = tree.child_nodes(statement).next().expect("expression");

    let mut out = String::new();
    doc.printer().format_subtree(expr, &mut out).unwrap();
    out
}

/// Tree followed by every diagnostic, for input that must not parse cleanly.
fn dump_invalid(src: &str) -> String {
    let doc = parse_text(src);
    assert!(
        !doc.diagnostics().is_empty(),
        "expected diagnostics, got a clean parse:\n{}",
        doc.dump_tree()
    );
    let mut out = doc.dump_tree();
    out.push_str("---\n");
    out.push_str(&render(&doc));
    out
}

/// Diagnostics only.
fn diagnostics(src: &str) -> String {
    render(&parse_text(src))
}
