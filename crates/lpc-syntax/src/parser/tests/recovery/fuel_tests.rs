use crate::diagnostics::DiagnosticKind;
use crate::document::parse_text_with;
use crate::parser::{ParseOptions, RuleKind};

#[test]
fn exec_fuel_truncates_with_a_warning() {
    let options = ParseOptions::default().with_exec_fuel(Some(3));
    let doc = parse_text_with("int x; int y; int z;", options);

    let messages: Vec<_> = doc.diagnostics().iter().map(|d| d.to_string()).collect();
    assert_eq!(
        messages,
        ["warning at 7..10: parsing stopped early; the rest of the file was skipped"]
    );
    assert!(doc.is_valid());
    assert_eq!(doc.exec_fuel_consumed(), 3);

    let tree = doc.tree();
    let last = tree.child_nodes(tree.root()).last().unwrap();
    assert_eq!(tree.rule(last), RuleKind::Error);
    assert_eq!(doc.node_text(last), "int y; int z;");
}

#[test]
fn exec_fuel_counts_consumed_tokens() {
    let doc = parse_text_with("int x;", ParseOptions::default());
    assert_eq!(doc.exec_fuel_consumed(), 3);

    let doc = parse_text_with("int x;", ParseOptions::unlimited());
    assert_eq!(doc.exec_fuel_consumed(), 0);
}

#[test]
fn recursion_fuel_stops_deep_nesting() {
    let depth = 50;
    let src = format!("void f() {{ x = {}1{}; }}", "(".repeat(depth), ")".repeat(depth));
    let options = ParseOptions::default().with_recursion_fuel(Some(10));
    let doc = parse_text_with(&src, options);

    let nesting: Vec<_> = doc
        .diagnostics()
        .iter()
        .filter(|d| d.kind == DiagnosticKind::NestingTooDeep)
        .collect();
    assert_eq!(nesting.len(), 1);
    assert!(!doc.is_valid());

    // Everything is still in the tree.
    let tree = doc.tree();
    assert_eq!(tree.span(tree.root()).len(), doc.stream().eof_index());
}

#[test]
fn default_limits_handle_moderate_nesting() {
    let depth = 100;
    let src = format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth));
    let doc = parse_text_with(&src, ParseOptions::default());
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn statement_nesting_is_limited_too() {
    let depth = 40;
    let src = format!("void f() {}{}", "{".repeat(depth), "}".repeat(depth + 1));
    let options = ParseOptions::default().with_recursion_fuel(Some(16));
    let doc = parse_text_with(&src, options);

    assert!(
        doc.diagnostics()
            .iter()
            .any(|d| d.kind == DiagnosticKind::NestingTooDeep)
    );
}
