//! Tree visitor.
//!
//! # Usage
//!
//! Implement `Visitor` for your struct and override the `visit_*` methods
//! you care about. Call `walk_children` inside an override to keep
//! descending, or leave it out to skip the subtree.
//!
//! ```
//! use lpc_syntax::parse_text;
//! use lpc_syntax::parser::ast::FunctionDef;
//! use lpc_syntax::visitor::{Visitor, walk_children, walk_document};
//!
//! #[derive(Default)]
//! struct FunctionNames(Vec<String>);
//!
//! impl<'a> Visitor<'a> for FunctionNames {
//!     fn visit_function_def(&mut self, function: FunctionDef<'a>) {
//!         self.0.extend(function.name().map(str::to_string));
//!         walk_children(self, function.syntax(), function.id());
//!     }
//! }
//!
//! let doc = parse_text("void a() {} int b(int x) { return x; }");
//! let mut names = FunctionNames::default();
//! walk_document(&mut names, &doc);
//! assert_eq!(names.0, ["a", "b"]);
//! ```

use crate::document::ParsedDocument;
use crate::parser::ast::{self, Syntax};
use crate::parser::{Element, NodeId, RuleKind, TokenId};

pub trait Visitor<'a>: Sized {
    fn visit_node(&mut self, syntax: Syntax<'a>, id: NodeId) {
        walk_node(self, syntax, id);
    }

    fn visit_function_def(&mut self, function: ast::FunctionDef<'a>) {
        walk_children(self, function.syntax(), function.id());
    }

    fn visit_variable_decl(&mut self, decl: ast::VariableDecl<'a>) {
        walk_children(self, decl.syntax(), decl.id());
    }

    fn visit_parameter(&mut self, parameter: ast::Parameter<'a>) {
        walk_children(self, parameter.syntax(), parameter.id());
    }

    fn visit_block(&mut self, block: ast::Block<'a>) {
        walk_children(self, block.syntax(), block.id());
    }

    /// Any statement except blocks and local declarations, which have
    /// their own hooks. Switch labels count as statements.
    fn visit_statement(&mut self, syntax: Syntax<'a>, id: NodeId) {
        walk_children(self, syntax, id);
    }

    fn visit_expr(&mut self, syntax: Syntax<'a>, id: NodeId) {
        walk_children(self, syntax, id);
    }

    fn visit_error(&mut self, _syntax: Syntax<'a>, _id: NodeId) {}

    fn visit_token(&mut self, _syntax: Syntax<'a>, _token: TokenId) {}
}

pub fn walk_document<'a, V: Visitor<'a>>(visitor: &mut V, doc: &'a ParsedDocument) {
    let syntax = doc.syntax();
    visitor.visit_node(syntax, syntax.tree.root());
}

/// Dispatches `id` to the hook for its rule.
pub fn walk_node<'a, V: Visitor<'a>>(visitor: &mut V, syntax: Syntax<'a>, id: NodeId) {
    use RuleKind::*;

    match syntax.rule(id) {
        FunctionDef => match ast::FunctionDef::cast(syntax, id) {
            Some(function) => visitor.visit_function_def(function),
            None => walk_children(visitor, syntax, id),
        },
        VariableDecl => match ast::VariableDecl::cast(syntax, id) {
            Some(decl) => visitor.visit_variable_decl(decl),
            None => walk_children(visitor, syntax, id),
        },
        Parameter => match ast::Parameter::cast(syntax, id) {
            Some(parameter) => visitor.visit_parameter(parameter),
            None => walk_children(visitor, syntax, id),
        },
        Block => match ast::Block::cast(syntax, id) {
            Some(block) => visitor.visit_block(block),
            None => walk_children(visitor, syntax, id),
        },
        Error => visitor.visit_error(syntax, id),

        ExprStatement | EmptyStatement | IfStatement | WhileStatement | DoWhileStatement
        | ForStatement | ForeachStatement | SwitchStatement | CaseLabel | DefaultLabel
        | ReturnStatement | BreakStatement | ContinueStatement => {
            visitor.visit_statement(syntax, id)
        }

        CommaExpr | AssignExpr { .. } | ConditionalExpr | BinaryExpr { .. } | UnaryExpr { .. }
        | PostfixExpr { .. } | CastExpr | CatchExpr | CallExpr | SliceExpr { .. }
        | MemberAccess | ScopeAccess | FieldAccess | ParenExpr | Name | IntLiteral
        | FloatLiteral | CharLiteral | StringLiteral | HeredocString | HeredocArray
        | ArrayLiteral | MappingLiteral | Closure | FunctionPointer | AnonymousFunction
        | Placeholder => visitor.visit_expr(syntax, id),

        SourceFile | Inherit | FunctionPrototype | Modifiers | TypeSpec | ParameterList
        | VariableDeclarator | ClassDef | ForeachVar | ArgumentList | MappingEntry => {
            walk_children(visitor, syntax, id)
        }
    }
}

/// Visits every child of `id` in source order, tokens included.
pub fn walk_children<'a, V: Visitor<'a>>(visitor: &mut V, syntax: Syntax<'a>, id: NodeId) {
    for child in syntax.tree.children(id) {
        match *child {
            Element::Node(node) => visitor.visit_node(syntax, node),
            Element::Token(token) => visitor.visit_token(syntax, token),
        }
    }
}
