use indoc::indoc;

use super::super::dump;
use crate::document::parse_text;
use crate::parser::ast::{ClassDef, FunctionDef};
use crate::parser::RuleKind;

#[test]
fn empty_input() {
    insta::assert_snapshot!(dump(""), @"SourceFile");
}

#[test]
fn only_trivia() {
    let doc = parse_text("  // nothing here\n/* or here */\n");
    assert!(doc.diagnostics().is_empty());
    let tree = doc.tree();
    assert_eq!(tree.child_nodes(tree.root()).count(), 0);
    assert_eq!(tree.children(tree.root()).len(), doc.stream().eof_index());
}

#[test]
fn inherit_with_modifier() {
    let input = indoc! {r#"
    virtual inherit "/std/room";
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      Inherit
        Modifiers
          KwVirtual "virtual"
        KwInherit "inherit"
        StringLiteral
          StringLiteral "\"/std/room\""
        Semicolon ";"
    "#);
}

#[test]
fn function_definition() {
    let input = indoc! {r#"
    int add(int a, int b) { return a + b; }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      FunctionDef
        TypeSpec
          KwInt "int"
        Ident "add"
        ParameterList
          LParen "("
          Parameter
            TypeSpec
              KwInt "int"
            Ident "a"
          Comma ","
          Parameter
            TypeSpec
              KwInt "int"
            Ident "b"
          RParen ")"
        Block
          LBrace "{"
          ReturnStatement
            KwReturn "return"
            BinaryExpr +
              Name
                Ident "a"
              Plus "+"
              Name
                Ident "b"
            Semicolon ";"
          RBrace "}"
    "#);
}

#[test]
fn globals_and_prototype() {
    let input = indoc! {r#"
    static int count, *list = ({ });
    varargs void log(string fmt, mixed args...);
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      VariableDecl
        Modifiers
          KwStatic "static"
        TypeSpec
          KwInt "int"
        VariableDeclarator
          Ident "count"
        Comma ","
        VariableDeclarator
          Star "*"
          Ident "list"
          Eq "="
          ArrayLiteral
            LParen "("
            LBrace "{"
            RBrace "}"
            RParen ")"
        Semicolon ";"
      FunctionPrototype
        Modifiers
          KwVarargs "varargs"
        TypeSpec
          KwVoid "void"
        Ident "log"
        ParameterList
          LParen "("
          Parameter
            TypeSpec
              KwString "string"
            Ident "fmt"
          Comma ","
          Parameter
            TypeSpec
              KwMixed "mixed"
            Ident "args"
            Ellipsis "..."
          RParen ")"
        Semicolon ";"
    "#);
}

#[test]
fn untyped_function_calling_inherited() {
    let input = indoc! {r#"
    create() { ::create(); }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      FunctionDef
        Ident "create"
        ParameterList
          LParen "("
          RParen ")"
        Block
          LBrace "{"
          ExprStatement
            CallExpr
              ScopeAccess
                ColonColon "::"
                Ident "create"
              ArgumentList
                LParen "("
                RParen ")"
            Semicolon ";"
          RBrace "}"
    "#);
}

#[test]
fn class_definition_and_use() {
    let input = indoc! {r#"
    class Point {
        int x, y;
    }
    class Point origin;
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      ClassDef
        KwClass "class"
        Ident "Point"
        LBrace "{"
        VariableDecl
          TypeSpec
            KwInt "int"
          VariableDeclarator
            Ident "x"
          Comma ","
          VariableDeclarator
            Ident "y"
          Semicolon ";"
        RBrace "}"
      VariableDecl
        TypeSpec
          KwClass "class"
          Ident "Point"
        VariableDeclarator
          Ident "origin"
        Semicolon ";"
    "#);
}

#[test]
fn object_typed_star_global() {
    let doc = parse_text("Room *rooms;");
    assert!(doc.diagnostics().is_empty());
    let tree = doc.tree();
    let decl = tree.child_nodes(tree.root()).next().unwrap();
    assert_eq!(tree.rule(decl), RuleKind::VariableDecl);
}

#[test]
fn function_view_accessors() {
    let doc = parse_text("private string *names(object who, int flags: 0) { return ({}); }");
    assert!(doc.diagnostics().is_empty());

    let syntax = doc.syntax();
    let root = doc.source_file().unwrap();
    let function: FunctionDef<'_> = root.functions().next().unwrap();

    assert_eq!(function.name(), Some("names"));
    assert!(function.modifiers().is_some());
    let return_type = function.return_type().unwrap();
    assert_eq!(syntax.node_text(return_type), "string");

    let params: Vec<_> = function.parameters().filter_map(|p| p.name()).collect();
    assert_eq!(params, ["who", "flags"]);
    assert!(function.body().is_some());
}

#[test]
fn varargs_parameter_view() {
    let doc = parse_text("void f(int a, mixed rest...) {}");
    let function = doc.source_file().unwrap().functions().next().unwrap();
    let varargs: Vec<_> = function.parameters().map(|p| p.is_varargs()).collect();
    assert_eq!(varargs, [false, true]);
}

#[test]
fn class_view_members() {
    let doc = parse_text("struct Pair { mixed first; mixed second; };");
    assert!(doc.diagnostics().is_empty());

    let tree = doc.tree();
    let id = tree.child_nodes(tree.root()).next().unwrap();
    let class = ClassDef::cast(doc.syntax(), id).unwrap();
    assert_eq!(class.name(), Some("Pair"));

    let members: Vec<_> = class
        .members()
        .flat_map(|decl| decl.declarators())
        .filter_map(|d| d.name())
        .collect();
    assert_eq!(members, ["first", "second"]);
}
