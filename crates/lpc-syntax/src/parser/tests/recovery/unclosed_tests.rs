use super::super::{diagnostics, dump_invalid};
use crate::diagnostics::DiagnosticKind;
use crate::document::parse_text;

#[test]
fn unclosed_call() {
    insta::assert_snapshot!(dump_invalid("void f() { foo(1;  }"), @r#"
    SourceFile
      FunctionDef
        TypeSpec
          KwVoid "void"
        Ident "f"
        ParameterList
          LParen "("
          RParen ")"
        Block
          LBrace "{"
          ExprStatement
            CallExpr
              Name
                Ident "foo"
              ArgumentList
                LParen "("
                IntLiteral
                  IntLiteral "1"
            Semicolon ";"
          RBrace "}"
    ---
    error at 14..17: unclosed `(` (related: `(` opened here at 14..15)
    "#);
}

#[test]
fn unclosed_block_at_end_of_input() {
    insta::assert_snapshot!(
        diagnostics("void f() { return 1;"),
        @"error at 9..20: unclosed `{` (related: `{` opened here at 9..10)"
    );
}

#[test]
fn unclosed_function_pointer() {
    let doc = parse_text("void f() { g((: foo, 1); }");
    let kinds: Vec<_> = doc.diagnostics().iter().map(|d| d.kind).collect();
    assert!(kinds.contains(&DiagnosticKind::UnclosedDelimiter), "{kinds:?}");
}

#[test]
fn unclosed_delimiter_points_at_opener() {
    let doc = parse_text("int x = (1 + 2;");
    let diagnostic = doc
        .diagnostics()
        .iter()
        .find(|d| d.kind == DiagnosticKind::UnclosedDelimiter)
        .unwrap();

    assert_eq!(u32::from(diagnostic.range.start()), 8);
    assert_eq!(diagnostic.related.len(), 1);
    assert_eq!(diagnostic.related[0].message, "`(` opened here");
    assert_eq!(&doc.source()[diagnostic.related[0].range], "(");
}

#[test]
fn unterminated_string_is_lexical() {
    insta::assert_snapshot!(diagnostics("string s = \"abc;\nint y;"), @r"
    error at 11..16: unterminated string literal
    error at 17..20: expected `;`
    ");
}

#[test]
fn unterminated_comment_runs_to_end() {
    let doc = parse_text("int x; /* never closed\nint y;");
    let messages: Vec<_> = doc.diagnostics().iter().map(|d| d.to_string()).collect();
    assert_eq!(messages, ["error at 7..29: unterminated block comment"]);

    let decls = doc.source_file().unwrap().variables().count();
    assert_eq!(decls, 1);
}
