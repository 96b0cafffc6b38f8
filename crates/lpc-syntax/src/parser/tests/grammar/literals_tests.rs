use super::super::{dump, dump_expr};
use crate::document::parse_text;
use crate::parser::{RuleKind, heredoc_body};

#[test]
fn numbers_and_characters() {
    insta::assert_snapshot!(dump_expr("({ 0x1F, 1_000, 1.5e3, 'a' })"), @r#"
    ArrayLiteral
      LParen "("
      LBrace "{"
      IntLiteral
        IntLiteral "0x1F"
      Comma ","
      IntLiteral
        IntLiteral "1_000"
      Comma ","
      FloatLiteral
        FloatLiteral "1.5e3"
      Comma ","
      CharLiteral
        CharLiteral "'a'"
      RBrace "}"
      RParen ")"
    "#);
}

#[test]
fn adjacent_strings_form_one_literal() {
    insta::assert_snapshot!(dump_expr(r#""abc" "def""#), @r#"
    StringLiteral
      StringLiteral "\"abc\""
      StringLiteral "\"def\""
    "#);
}

#[test]
fn array_with_trailing_comma() {
    insta::assert_snapshot!(dump_expr("({ 1, 2, })"), @r#"
    ArrayLiteral
      LParen "("
      LBrace "{"
      IntLiteral
        IntLiteral "1"
      Comma ","
      IntLiteral
        IntLiteral "2"
      Comma ","
      RBrace "}"
      RParen ")"
    "#);
}

#[test]
fn mapping_with_trailing_comma() {
    insta::assert_snapshot!(dump_expr(r#"([ "a" : 1, "b" : 2, ])"#), @r#"
    MappingLiteral
      LParen "("
      LBracket "["
      MappingEntry
        StringLiteral
          StringLiteral "\"a\""
        Colon ":"
        IntLiteral
          IntLiteral "1"
      Comma ","
      MappingEntry
        StringLiteral
          StringLiteral "\"b\""
        Colon ":"
        IntLiteral
          IntLiteral "2"
      Comma ","
      RBracket "]"
      RParen ")"
    "#);
}

#[test]
fn multi_value_mapping() {
    insta::assert_snapshot!(dump_expr(r#"([ "k" : 1 ; 2 ])"#), @r#"
    MappingLiteral
      LParen "("
      LBracket "["
      MappingEntry
        StringLiteral
          StringLiteral "\"k\""
        Colon ":"
        IntLiteral
          IntLiteral "1"
        Semicolon ";"
        IntLiteral
          IntLiteral "2"
      RBracket "]"
      RParen ")"
    "#);
}

#[test]
fn sized_empty_mapping() {
    insta::assert_snapshot!(dump_expr("([ :3 ])"), @r#"
    MappingLiteral
      LParen "("
      LBracket "["
      Colon ":"
      IntLiteral
        IntLiteral "3"
      RBracket "]"
      RParen ")"
    "#);
}

#[test]
fn function_pointer() {
    insta::assert_snapshot!(dump_expr("(: foo, 1 :)"), @r#"
    FunctionPointer
      FunctionPtrOpen "(:"
      Name
        Ident "foo"
      Comma ","
      IntLiteral
        IntLiteral "1"
      FunctionPtrClose ":)"
    "#);
}

#[test]
fn function_pointer_with_placeholders() {
    insta::assert_snapshot!(dump_expr("(: $1 + $(offset) :)"), @r#"
    FunctionPointer
      FunctionPtrOpen "(:"
      BinaryExpr +
        Placeholder
          ArgPlaceholder "$1"
        Plus "+"
        Placeholder
          Dollar "$"
          LParen "("
          Name
            Ident "offset"
          RParen ")"
      FunctionPtrClose ":)"
    "#);
}

#[test]
fn closure_literals() {
    insta::assert_snapshot!(dump_expr("({ #'query_name, #'efun::write, #'+ })"), @r##"
    ArrayLiteral
      LParen "("
      LBrace "{"
      Closure
        ClosureLiteral "#'query_name"
      Comma ","
      Closure
        ClosureLiteral "#'efun::write"
      Comma ","
      Closure
        ClosureLiteral "#'+"
      RBrace "}"
      RParen ")"
    "##);
}

#[test]
fn heredoc_string() {
    insta::assert_snapshot!(dump_expr("text = @END\nhello\nEND\n"), @r#"
    AssignExpr =
      Name
        Ident "text"
      Eq "="
      HeredocString
        HeredocString "@END\nhello\nEND"
    "#);
}

#[test]
fn heredoc_array_body() {
    let doc = parse_text("string *lines = @@TEXT\none\ntwo\nTEXT\n;\n");
    assert!(doc.diagnostics().is_empty());

    let tree = doc.tree();
    let heredoc = tree
        .descendants(tree.root())
        .find(|id| tree.rule(*id) == RuleKind::HeredocArray)
        .unwrap();
    let token = tree.child_tokens(heredoc).next().unwrap();
    assert_eq!(heredoc_body(doc.token_text(token)), "one\ntwo\n");
}

#[test]
fn nested_collections() {
    let input = r#"mapping m = ([ "list" : ({ ([ ]), ({ }) }) ]);"#;

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      VariableDecl
        TypeSpec
          KwMapping "mapping"
        VariableDeclarator
          Ident "m"
          Eq "="
          MappingLiteral
            LParen "("
            LBracket "["
            MappingEntry
              StringLiteral
                StringLiteral "\"list\""
              Colon ":"
              ArrayLiteral
                LParen "("
                LBrace "{"
                MappingLiteral
                  LParen "("
                  LBracket "["
                  RBracket "]"
                  RParen ")"
                Comma ","
                ArrayLiteral
                  LParen "("
                  LBrace "{"
                  RBrace "}"
                  RParen ")"
                RBrace "}"
                RParen ")"
            RBracket "]"
            RParen ")"
        Semicolon ";"
    "#);
}
