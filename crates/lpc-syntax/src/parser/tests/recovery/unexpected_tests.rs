use super::super::{diagnostics, dump_invalid};
use crate::document::parse_text;

#[test]
fn missing_initializer() {
    insta::assert_snapshot!(dump_invalid("int x = ; int y = 1;"), @r#"
    SourceFile
      VariableDecl
        TypeSpec
          KwInt "int"
        VariableDeclarator
          Ident "x"
          Eq "="
          Error
        Semicolon ";"
      VariableDecl
        TypeSpec
          KwInt "int"
        VariableDeclarator
          Ident "y"
          Eq "="
          IntLiteral
            IntLiteral "1"
        Semicolon ";"
    ---
    error at 8..9: expected an expression
    "#);
}

#[test]
fn stray_token_in_body() {
    insta::assert_snapshot!(dump_invalid("void f() { int a = 1; ) ; a = 2; }"), @r#"
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
          VariableDecl
            TypeSpec
              KwInt "int"
            VariableDeclarator
              Ident "a"
              Eq "="
              IntLiteral
                IntLiteral "1"
            Semicolon ";"
          Error
            RParen ")"
            Semicolon ";"
          ExprStatement
            AssignExpr =
              Name
                Ident "a"
              Eq "="
              IntLiteral
                IntLiteral "2"
            Semicolon ";"
          RBrace "}"
    ---
    error at 22..23: expected a statement, found `)`
    "#);
}

#[test]
fn expression_at_top_level() {
    insta::assert_snapshot!(dump_invalid("42; int x;"), @r#"
    SourceFile
      Error
        IntLiteral "42"
        Semicolon ";"
      VariableDecl
        TypeSpec
          KwInt "int"
        VariableDeclarator
          Ident "x"
        Semicolon ";"
    ---
    error at 0..2: no viable alternative: expected a declaration
    "#);
}

#[test]
fn illegal_character_is_reported_once() {
    insta::assert_snapshot!(dump_invalid(r"int x; \ int y;"), @r#"
    SourceFile
      VariableDecl
        TypeSpec
          KwInt "int"
        VariableDeclarator
          Ident "x"
        Semicolon ";"
      Error
        Error "\\"
      VariableDecl
        TypeSpec
          KwInt "int"
        VariableDeclarator
          Ident "y"
        Semicolon ";"
    ---
    error at 7..8: illegal character `\`
    "#);
}

#[test]
fn missing_semicolon() {
    insta::assert_snapshot!(diagnostics("int x\nint y;"), @"error at 6..9: expected `;`");
}

#[test]
fn missing_declarator_name() {
    insta::assert_snapshot!(diagnostics("int = 3;"), @"error at 4..5: expected a name: found `=`");
}

#[test]
fn one_diagnostic_per_position() {
    // `}` and `)` are both missing at the `;`; only the first is reported.
    insta::assert_snapshot!(
        diagnostics("void f() { x = ({ 1, 2; }"),
        @"error at 22..23: expected `}`"
    );
}

#[test]
fn lexer_error_suppresses_cascade_in_filtered_view() {
    let doc = parse_text("void f() { x = 1 @ 2; }");

    let all: Vec<_> = doc.diagnostics().iter().map(|d| d.to_string()).collect();
    assert_eq!(
        all,
        [
            "error at 17..18: illegal character `@`",
            "error at 17..18: expected `;`",
        ]
    );

    let filtered = doc.diagnostics().filtered();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].to_string(), "error at 17..18: illegal character `@`");
}

#[test]
fn recovery_keeps_later_functions() {
    let doc = parse_text("void broken( { } int ok() { return 1; }");
    assert!(!doc.is_valid());

    let names: Vec<_> = doc
        .source_file()
        .unwrap()
        .functions()
        .filter_map(|f| f.name())
        .collect();
    assert!(names.contains(&"ok"), "{names:?}");
}
