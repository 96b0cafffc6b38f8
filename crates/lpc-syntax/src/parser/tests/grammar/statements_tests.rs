use indoc::indoc;

use super::super::dump;
use crate::document::parse_text;
use crate::parser::RuleKind;

#[test]
fn if_else_chain() {
    let input = indoc! {r#"
    void f() {
        if (x) return;
        else if (y) x = 1;
        else ;
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
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
          IfStatement
            KwIf "if"
            LParen "("
            Name
              Ident "x"
            RParen ")"
            ReturnStatement
              KwReturn "return"
              Semicolon ";"
            KwElse "else"
            IfStatement
              KwIf "if"
              LParen "("
              Name
                Ident "y"
              RParen ")"
              ExprStatement
                AssignExpr =
                  Name
                    Ident "x"
                  Eq "="
                  IntLiteral
                    IntLiteral "1"
                Semicolon ";"
              KwElse "else"
              EmptyStatement
                Semicolon ";"
          RBrace "}"
    "#);
}

#[test]
fn loops() {
    let input = indoc! {r#"
    void f() {
        for (int i = 0; i < 3; i++) continue;
        while (1) break;
        do { } while (0);
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
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
          ForStatement
            KwFor "for"
            LParen "("
            VariableDecl
              TypeSpec
                KwInt "int"
              VariableDeclarator
                Ident "i"
                Eq "="
                IntLiteral
                  IntLiteral "0"
            Semicolon ";"
            BinaryExpr <
              Name
                Ident "i"
              Lt "<"
              IntLiteral
                IntLiteral "3"
            Semicolon ";"
            PostfixExpr ++
              Name
                Ident "i"
              PlusPlus "++"
            RParen ")"
            ContinueStatement
              KwContinue "continue"
              Semicolon ";"
          WhileStatement
            KwWhile "while"
            LParen "("
            IntLiteral
              IntLiteral "1"
            RParen ")"
            BreakStatement
              KwBreak "break"
              Semicolon ";"
          DoWhileStatement
            KwDo "do"
            Block
              LBrace "{"
              RBrace "}"
            KwWhile "while"
            LParen "("
            IntLiteral
              IntLiteral "0"
            RParen ")"
            Semicolon ";"
          RBrace "}"
    "#);
}

#[test]
fn empty_for_header() {
    let doc = parse_text("void f() { for (;;) ; }");
    assert!(doc.diagnostics().is_empty());
    let tree = doc.tree();
    let for_stmt = tree
        .descendants(tree.root())
        .find(|id| tree.rule(*id) == RuleKind::ForStatement)
        .unwrap();
    let children: Vec<_> = tree.child_nodes(for_stmt).map(|id| tree.rule(id)).collect();
    assert_eq!(children, [RuleKind::EmptyStatement]);
}

#[test]
fn foreach_over_mapping() {
    let input = indoc! {r#"
    void f(mapping m) {
        foreach (string key, mixed value in m) { }
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
    SourceFile
      FunctionDef
        TypeSpec
          KwVoid "void"
        Ident "f"
        ParameterList
          LParen "("
          Parameter
            TypeSpec
              KwMapping "mapping"
            Ident "m"
          RParen ")"
        Block
          LBrace "{"
          ForeachStatement
            KwForeach "foreach"
            LParen "("
            ForeachVar
              TypeSpec
                KwString "string"
              Ident "key"
            Comma ","
            ForeachVar
              TypeSpec
                KwMixed "mixed"
              Ident "value"
            KwIn "in"
            Name
              Ident "m"
            RParen ")"
            Block
              LBrace "{"
              RBrace "}"
          RBrace "}"
    "#);
}

#[test]
fn foreach_with_colon_and_untyped_variable() {
    let doc = parse_text("void f() { foreach (x : list) write(x); }");
    assert!(doc.diagnostics().is_empty());
}

#[test]
fn switch_with_range_case() {
    let input = indoc! {r#"
    void f() {
        switch (n) {
        case 1..5:
            break;
        default:
            return;
        }
    }
    "#};

    insta::assert_snapshot!(dump(input), @r#"
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
          SwitchStatement
            KwSwitch "switch"
            LParen "("
            Name
              Ident "n"
            RParen ")"
            Block
              LBrace "{"
              CaseLabel
                KwCase "case"
                IntLiteral
                  IntLiteral "1"
                DotDot ".."
                IntLiteral
                  IntLiteral "5"
                Colon ":"
              BreakStatement
                KwBreak "break"
                Semicolon ";"
              DefaultLabel
                KwDefault "default"
                Colon ":"
              ReturnStatement
                KwReturn "return"
                Semicolon ";"
              RBrace "}"
          RBrace "}"
    "#);
}

#[test]
fn local_declarations_versus_expressions() {
    let input = indoc! {r#"
    void f() {
        Foo bar;
        Foo *list;
        a * b;
        static int count;
    }
    "#};

    let doc = parse_text(input);
    assert!(doc.diagnostics().is_empty());

    let tree = doc.tree();
    let block = tree
        .descendants(tree.root())
        .find(|id| tree.rule(*id) == RuleKind::Block)
        .unwrap();
    let statements: Vec<_> = tree.child_nodes(block).map(|id| tree.rule(id)).collect();

    // `Foo *list` has the same shape as `a * b`; inside a body both read as
    // multiplication.
    assert_eq!(
        statements,
        [
            RuleKind::VariableDecl,
            RuleKind::ExprStatement,
            RuleKind::ExprStatement,
            RuleKind::VariableDecl,
        ]
    );
}

#[test]
fn nested_blocks() {
    let doc = parse_text("void f() { { { return; } } }");
    assert!(doc.diagnostics().is_empty());
    let tree = doc.tree();
    let blocks = tree
        .descendants(tree.root())
        .filter(|id| tree.rule(*id) == RuleKind::Block)
        .count();
    assert_eq!(blocks, 3);
}

#[test]
fn comments_and_directives_stay_in_the_tree() {
    let input = indoc! {r#"
    #include <std.h>
    // greeting
    void f() { /* nothing */ }
    "#};

    let doc = parse_text(input);
    assert!(doc.diagnostics().is_empty());
    insta::assert_snapshot!(doc.printer().with_trivia(true).dump(), @r##"
    SourceFile
      Directive "#include <std.h>"
      Newline "\n"
      LineComment "// greeting"
      Newline "\n"
      FunctionDef
        TypeSpec
          KwVoid "void"
        Whitespace " "
        Ident "f"
        ParameterList
          LParen "("
          RParen ")"
        Whitespace " "
        Block
          LBrace "{"
          Whitespace " "
          BlockComment "/* nothing */"
          Whitespace " "
          RBrace "}"
      Newline "\n"
    "##);
}
