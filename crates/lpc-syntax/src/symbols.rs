//! Declarations and their textual usages.
//!
//! The tree only locates declaration boundaries. Usages are found by a
//! linear scan of default-channel identifiers inside the declaration's
//! scope, matched by exact text. Shadowing is not resolved.

use crate::document::ParsedDocument;
use crate::parser::ast::{
    ClassDef, ForeachVar, FunctionDef, FunctionPrototype, Parameter, Syntax, VariableDecl,
};
use crate::parser::{Channel, NodeId, RuleKind, TokenId, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Function,
    Prototype,
    Class,
    Global,
    /// Member of a `class` or `struct`.
    Member,
    Local,
    Parameter,
}

impl DeclarationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Prototype => "prototype",
            Self::Class => "class",
            Self::Global => "global",
            Self::Member => "member",
            Self::Local => "local",
            Self::Parameter => "parameter",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub name_token: TokenId,
    /// The declaring node: function, declarator, parameter or foreach variable.
    pub node: NodeId,
    /// Node whose token span bounds where the name is visible.
    pub scope: NodeId,
}

/// Every named declaration in the document, in source order.
pub fn declarations(doc: &ParsedDocument) -> Vec<Declaration> {
    let syntax = doc.syntax();
    let tree = syntax.tree;
    let mut out = Vec::new();

    for id in tree.descendants(tree.root()) {
        let found = match tree.rule(id) {
            RuleKind::FunctionDef => FunctionDef::cast(syntax, id)
                .and_then(|f| f.name_token())
                .map(|t| (DeclarationKind::Function, t, tree.root())),
            RuleKind::FunctionPrototype => FunctionPrototype::cast(syntax, id)
                .and_then(|f| f.name_token())
                .map(|t| (DeclarationKind::Prototype, t, tree.root())),
            RuleKind::ClassDef => ClassDef::cast(syntax, id)
                .and_then(|c| c.name_token())
                .map(|t| (DeclarationKind::Class, t, tree.root())),
            RuleKind::VariableDecl => {
                collect_variables(syntax, id, &mut out);
                None
            }
            RuleKind::Parameter => {
                let scope = parameter_scope(syntax, id);
                Parameter::cast(syntax, id)
                    .and_then(|p| p.name_token())
                    .zip(scope)
                    .map(|(t, s)| (DeclarationKind::Parameter, t, s))
            }
            RuleKind::ForeachVar => {
                let scope = tree.parent(id).unwrap_or(tree.root());
                ForeachVar::cast(syntax, id)
                    .and_then(|v| v.name_token())
                    .map(|t| (DeclarationKind::Local, t, scope))
            }
            _ => None,
        };

        if let Some((kind, name_token, scope)) = found {
            out.push(Declaration {
                kind,
                name: syntax.token_text(name_token).to_string(),
                name_token,
                node: id,
                scope,
            });
        }
    }

    out
}

fn collect_variables(syntax: Syntax<'_>, decl: NodeId, out: &mut Vec<Declaration>) {
    let Some(view) = VariableDecl::cast(syntax, decl) else {
        return;
    };
    let tree = syntax.tree;
    let parent = tree.parent(decl).unwrap_or(tree.root());
    let (kind, scope) = match tree.rule(parent) {
        RuleKind::SourceFile => (DeclarationKind::Global, parent),
        RuleKind::ClassDef => (DeclarationKind::Member, parent),
        _ => (DeclarationKind::Local, parent),
    };

    for declarator in view.declarators() {
        if let Some(name_token) = declarator.name_token() {
            out.push(Declaration {
                kind,
                name: syntax.token_text(name_token).to_string(),
                name_token,
                node: declarator.id(),
                scope,
            });
        }
    }
}

/// Parameters are visible in the body of a definition or anonymous
/// function. Prototype parameters have no scope and are skipped.
fn parameter_scope(syntax: Syntax<'_>, parameter: NodeId) -> Option<NodeId> {
    let list = syntax.tree.parent(parameter)?;
    let owner = syntax.tree.parent(list)?;
    match syntax.rule(owner) {
        RuleKind::FunctionDef | RuleKind::AnonymousFunction => Some(owner),
        _ => None,
    }
}

/// Identifier tokens naming `decl` inside its scope, outside the declaring
/// node itself.
pub fn usages(doc: &ParsedDocument, decl: &Declaration) -> Vec<TokenId> {
    let tree = doc.tree();
    let scope = tree.span(decl.scope);
    let own = tree.span(decl.node);

    scope
        .range()
        .map(TokenId::new)
        .filter(|id| !own.contains(*id))
        .filter(|id| {
            let token = doc.token(*id);
            token.channel == Channel::Default
                && token.kind == TokenKind::Ident
                && doc.token_text(*id) == decl.name
        })
        .collect()
}
