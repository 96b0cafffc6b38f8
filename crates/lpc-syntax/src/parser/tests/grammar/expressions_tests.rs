use super::super::dump_expr;
use crate::document::parse_text;
use crate::parser::RuleKind;

#[test]
fn multiplication_binds_tighter() {
    insta::assert_snapshot!(dump_expr("1 + 2 * 3"), @r#"
    BinaryExpr +
      IntLiteral
        IntLiteral "1"
      Plus "+"
      BinaryExpr *
        IntLiteral
          IntLiteral "2"
        Star "*"
        IntLiteral
          IntLiteral "3"
    "#);
}

#[test]
fn binary_operators_associate_left() {
    insta::assert_snapshot!(dump_expr("a - b - c"), @r#"
    BinaryExpr -
      BinaryExpr -
        Name
          Ident "a"
        Minus "-"
        Name
          Ident "b"
      Minus "-"
      Name
        Ident "c"
    "#);
}

#[test]
fn logical_and_binds_tighter_than_or() {
    insta::assert_snapshot!(dump_expr("a || b && c"), @r#"
    BinaryExpr ||
      Name
        Ident "a"
      PipePipe "||"
      BinaryExpr &&
        Name
          Ident "b"
        AmpAmp "&&"
        Name
          Ident "c"
    "#);
}

#[test]
fn assignment_associates_right() {
    insta::assert_snapshot!(dump_expr("a = b += 1"), @r#"
    AssignExpr =
      Name
        Ident "a"
      Eq "="
      AssignExpr +=
        Name
          Ident "b"
        PlusEq "+="
        IntLiteral
          IntLiteral "1"
    "#);
}

#[test]
fn nested_conditional() {
    insta::assert_snapshot!(dump_expr("x ? 1 : y ? 2 : 3"), @r#"
    ConditionalExpr
      Name
        Ident "x"
      Question "?"
      IntLiteral
        IntLiteral "1"
      Colon ":"
      ConditionalExpr
        Name
          Ident "y"
        Question "?"
        IntLiteral
          IntLiteral "2"
        Colon ":"
        IntLiteral
          IntLiteral "3"
    "#);
}

#[test]
fn comma_expression() {
    insta::assert_snapshot!(dump_expr("a = 1, b = 2"), @r#"
    CommaExpr
      AssignExpr =
        Name
          Ident "a"
        Eq "="
        IntLiteral
          IntLiteral "1"
      Comma ","
      AssignExpr =
        Name
          Ident "b"
        Eq "="
        IntLiteral
          IntLiteral "2"
    "#);
}

#[test]
fn prefix_applies_after_postfix() {
    insta::assert_snapshot!(dump_expr("-x++"), @r#"
    UnaryExpr -
      Minus "-"
      PostfixExpr ++
        Name
          Ident "x"
        PlusPlus "++"
    "#);
}

#[test]
fn not_binds_tighter_than_and() {
    insta::assert_snapshot!(dump_expr("!a && b"), @r#"
    BinaryExpr &&
      UnaryExpr !
        Bang "!"
        Name
          Ident "a"
      AmpAmp "&&"
      Name
        Ident "b"
    "#);
}

#[test]
fn builtin_cast() {
    insta::assert_snapshot!(dump_expr("(int)x"), @r#"
    CastExpr
      LParen "("
      TypeSpec
        KwInt "int"
      RParen ")"
      Name
        Ident "x"
    "#);
}

#[test]
fn starred_cast() {
    insta::assert_snapshot!(dump_expr("(object *)list"), @r#"
    CastExpr
      LParen "("
      TypeSpec
        KwObject "object"
      Star "*"
      RParen ")"
      Name
        Ident "list"
    "#);
}

#[test]
fn parenthesized_name_followed_by_operator() {
    insta::assert_snapshot!(dump_expr("(x) + 1"), @r#"
    BinaryExpr +
      ParenExpr
        LParen "("
        Name
          Ident "x"
        RParen ")"
      Plus "+"
      IntLiteral
        IntLiteral "1"
    "#);
}

#[test]
fn parenthesized_name_followed_by_operand() {
    insta::assert_snapshot!(dump_expr("(Foo) bar"), @r#"
    CastExpr
      LParen "("
      TypeSpec
        Ident "Foo"
      RParen ")"
      Name
        Ident "bar"
    "#);
}

#[test]
fn builtin_type_then_minus_is_a_cast() {
    insta::assert_snapshot!(dump_expr("(float)-1"), @r#"
    CastExpr
      LParen "("
      TypeSpec
        KwFloat "float"
      RParen ")"
      UnaryExpr -
        Minus "-"
        IntLiteral
          IntLiteral "1"
    "#);
}

#[test]
fn member_call() {
    insta::assert_snapshot!(dump_expr("ob->query_name()"), @r#"
    CallExpr
      MemberAccess
        Name
          Ident "ob"
        Arrow "->"
        Ident "query_name"
      ArgumentList
        LParen "("
        RParen ")"
    "#);
}

#[test]
fn call_with_spread_argument() {
    insta::assert_snapshot!(dump_expr("foo(1, rest...)"), @r#"
    CallExpr
      Name
        Ident "foo"
      ArgumentList
        LParen "("
        IntLiteral
          IntLiteral "1"
        Comma ","
        Name
          Ident "rest"
        Ellipsis "..."
        RParen ")"
    "#);
}

#[test]
fn class_type_argument() {
    insta::assert_snapshot!(dump_expr("p = new(class Point)"), @r#"
    AssignExpr =
      Name
        Ident "p"
      Eq "="
      CallExpr
        Name
          Ident "new"
        ArgumentList
          LParen "("
          TypeSpec
            KwClass "class"
            Ident "Point"
          RParen ")"
    "#);
}

#[test]
fn reference_arguments() {
    insta::assert_snapshot!(dump_expr("swap(ref a, &b)"), @r#"
    CallExpr
      Name
        Ident "swap"
      ArgumentList
        LParen "("
        UnaryExpr ref
          KwRef "ref"
          Name
            Ident "a"
        Comma ","
        UnaryExpr ref
          Amp "&"
          Name
            Ident "b"
        RParen ")"
    "#);
}

#[test]
fn efun_scope_call() {
    insta::assert_snapshot!(dump_expr(r#"efun::write("x")"#), @r#"
    CallExpr
      ScopeAccess
        Name
          KwEfun "efun"
        ColonColon "::"
        Ident "write"
      ArgumentList
        LParen "("
        StringLiteral
          StringLiteral "\"x\""
        RParen ")"
    "#);
}

#[test]
fn inherited_call_as_argument() {
    insta::assert_snapshot!(dump_expr("foo(::bar())"), @r#"
    CallExpr
      Name
        Ident "foo"
      ArgumentList
        LParen "("
        CallExpr
          ScopeAccess
            ColonColon "::"
            Ident "bar"
          ArgumentList
            LParen "("
            RParen ")"
        RParen ")"
    "#);
}

#[test]
fn inherited_call_as_condition() {
    let doc = parse_text("void f() { if(::query()) return; }");
    assert!(doc.diagnostics().is_empty());
    let tree = doc.tree();
    let scoped = tree
        .descendants(tree.root())
        .filter(|id| tree.rule(*id) == RuleKind::ScopeAccess)
        .count();
    assert_eq!(scoped, 1);
}

#[test]
fn field_access_then_postfix() {
    insta::assert_snapshot!(dump_expr("p.count--"), @r#"
    PostfixExpr --
      FieldAccess
        Name
          Ident "p"
        Dot "."
        Ident "count"
      MinusMinus "--"
    "#);
}

#[test]
fn range_slice() {
    insta::assert_snapshot!(dump_expr("a[1..2]"), @r#"
    SliceExpr [i..i]
      Name
        Ident "a"
      LBracket "["
      IntLiteral
        IntLiteral "1"
      DotDot ".."
      IntLiteral
        IntLiteral "2"
      RBracket "]"
    "#);
}

#[test]
fn tail_relative_open_slice() {
    insta::assert_snapshot!(dump_expr("a[<1..]"), @r#"
    SliceExpr [<i..]
      Name
        Ident "a"
      LBracket "["
      Lt "<"
      IntLiteral
        IntLiteral "1"
      DotDot ".."
      RBracket "]"
    "#);
}

#[test]
fn fully_open_slice() {
    insta::assert_snapshot!(dump_expr("a[..]"), @r#"
    SliceExpr [..]
      Name
        Ident "a"
      LBracket "["
      DotDot ".."
      RBracket "]"
    "#);
}

#[test]
fn tail_index() {
    insta::assert_snapshot!(dump_expr("a[<1]"), @r#"
    SliceExpr [<i]
      Name
        Ident "a"
      LBracket "["
      Lt "<"
      IntLiteral
        IntLiteral "1"
      RBracket "]"
    "#);
}

#[test]
fn chained_index() {
    insta::assert_snapshot!(dump_expr(r#"m["k"][0]"#), @r#"
    SliceExpr [i]
      SliceExpr [i]
        Name
          Ident "m"
        LBracket "["
        StringLiteral
          StringLiteral "\"k\""
        RBracket "]"
      LBracket "["
      IntLiteral
        IntLiteral "0"
      RBracket "]"
    "#);
}

#[test]
fn catch_expression() {
    insta::assert_snapshot!(dump_expr("catch(load())"), @r#"
    CatchExpr
      KwCatch "catch"
      LParen "("
      CallExpr
        Name
          Ident "load"
        ArgumentList
          LParen "("
          RParen ")"
      RParen ")"
    "#);
}

#[test]
fn anonymous_function() {
    insta::assert_snapshot!(dump_expr("f = function(int x) { return x * 2; }"), @r#"
    AssignExpr =
      Name
        Ident "f"
      Eq "="
      AnonymousFunction
        KwFunction "function"
        ParameterList
          LParen "("
          Parameter
            TypeSpec
              KwInt "int"
            Ident "x"
          RParen ")"
        Block
          LBrace "{"
          ReturnStatement
            KwReturn "return"
            BinaryExpr *
              Name
                Ident "x"
              Star "*"
              IntLiteral
                IntLiteral "2"
            Semicolon ";"
          RBrace "}"
    "#);
}
