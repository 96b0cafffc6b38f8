//! Typed views over arena nodes.
//!
//! A view pairs a [`NodeId`] with the tree and token stream it came from.
//! Casting is checked against [`RuleKind`] only; the grammar guarantees the
//! child layout the accessors rely on, and accessors return `None` where
//! recovery may have left a piece out.

use rowan::TextRange;

use super::kinds::TokenKind;
use super::lexer::Token;
use super::stream::TokenStream;
use super::tree::{NodeId, RuleKind, SyntaxTree, TokenId};

/// Tree plus the stream its token indices point into.
#[derive(Debug, Clone, Copy)]
pub struct Syntax<'a> {
    pub tree: &'a SyntaxTree,
    pub stream: &'a TokenStream,
}

impl<'a> Syntax<'a> {
    pub fn new(tree: &'a SyntaxTree, stream: &'a TokenStream) -> Self {
        Self { tree, stream }
    }

    pub fn rule(&self, id: NodeId) -> RuleKind {
        self.tree.rule(id)
    }

    pub fn token(&self, id: TokenId) -> &'a Token {
        self.stream.at(id.index())
    }

    pub fn token_text(&self, id: TokenId) -> &'a str {
        self.stream.text(self.token(id))
    }

    /// Byte range of a node, trivia at its edges included.
    pub fn text_range(&self, id: NodeId) -> TextRange {
        let span = self.tree.span(id);
        self.stream.text_range(span.start as usize, span.end as usize)
    }

    pub fn node_text(&self, id: NodeId) -> &'a str {
        let range = self.text_range(id);
        &self.stream.source()[range]
    }

    /// First identifier among the direct child tokens of `id`.
    pub fn name_token(&self, id: NodeId) -> Option<TokenId> {
        self.tree
            .child_tokens(id)
            .find(|t| self.token(*t).kind == TokenKind::Ident)
    }

    fn name(&self, id: NodeId) -> Option<&'a str> {
        self.name_token(id).map(|t| self.token_text(t))
    }
}

macro_rules! ast_node {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name<'a> {
            syntax: Syntax<'a>,
            id: NodeId,
        }

        impl<'a> $name<'a> {
            pub fn cast(syntax: Syntax<'a>, id: NodeId) -> Option<Self> {
                (syntax.rule(id) == RuleKind::$name).then_some(Self { syntax, id })
            }

            pub fn id(&self) -> NodeId {
                self.id
            }

            pub fn syntax(&self) -> Syntax<'a> {
                self.syntax
            }

            pub fn text(&self) -> &'a str {
                self.syntax.node_text(self.id)
            }

            #[allow(dead_code)]
            fn child(&self, rule: RuleKind) -> Option<NodeId> {
                self.syntax.tree.first_child(self.id, rule)
            }

            #[allow(dead_code)]
            fn children_of(self, rule: RuleKind) -> impl Iterator<Item = NodeId> + 'a {
                let tree = self.syntax.tree;
                tree.child_nodes(self.id)
                    .filter(move |c| tree.rule(*c) == rule)
            }
        }
    };
}

ast_node!(SourceFile);
ast_node!(FunctionDef);
ast_node!(FunctionPrototype);
ast_node!(VariableDecl);
ast_node!(VariableDeclarator);
ast_node!(Parameter);
ast_node!(ForeachVar);
ast_node!(ClassDef);
ast_node!(Inherit);
ast_node!(Block);

impl<'a> SourceFile<'a> {
    pub fn functions(self) -> impl Iterator<Item = FunctionDef<'a>> + 'a {
        let syntax = self.syntax;
        self.children_of(RuleKind::FunctionDef)
            .filter_map(move |id| FunctionDef::cast(syntax, id))
    }

    pub fn variables(self) -> impl Iterator<Item = VariableDecl<'a>> + 'a {
        let syntax = self.syntax;
        self.children_of(RuleKind::VariableDecl)
            .filter_map(move |id| VariableDecl::cast(syntax, id))
    }

    pub fn inherits(self) -> impl Iterator<Item = Inherit<'a>> + 'a {
        let syntax = self.syntax;
        self.children_of(RuleKind::Inherit)
            .filter_map(move |id| Inherit::cast(syntax, id))
    }
}

impl<'a> FunctionDef<'a> {
    pub fn name_token(&self) -> Option<TokenId> {
        self.syntax.name_token(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.syntax.name(self.id)
    }

    /// `None` for old-style functions declared without a return type.
    pub fn return_type(&self) -> Option<NodeId> {
        self.child(RuleKind::TypeSpec)
    }

    pub fn modifiers(&self) -> Option<NodeId> {
        self.child(RuleKind::Modifiers)
    }

    pub fn parameters(self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        parameters_of(self.syntax, self.child(RuleKind::ParameterList))
    }

    pub fn body(&self) -> Option<Block<'a>> {
        self.child(RuleKind::Block)
            .and_then(|id| Block::cast(self.syntax, id))
    }
}

impl<'a> FunctionPrototype<'a> {
    pub fn name_token(&self) -> Option<TokenId> {
        self.syntax.name_token(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.syntax.name(self.id)
    }

    pub fn parameters(self) -> impl Iterator<Item = Parameter<'a>> + 'a {
        parameters_of(self.syntax, self.child(RuleKind::ParameterList))
    }
}

fn parameters_of<'a>(
    syntax: Syntax<'a>,
    list: Option<NodeId>,
) -> impl Iterator<Item = Parameter<'a>> + 'a {
    list.into_iter()
        .flat_map(move |list| syntax.tree.child_nodes(list))
        .filter_map(move |id| Parameter::cast(syntax, id))
}

impl<'a> VariableDecl<'a> {
    pub fn ty(&self) -> Option<NodeId> {
        self.child(RuleKind::TypeSpec)
    }

    pub fn declarators(self) -> impl Iterator<Item = VariableDeclarator<'a>> + 'a {
        let syntax = self.syntax;
        self.children_of(RuleKind::VariableDeclarator)
            .filter_map(move |id| VariableDeclarator::cast(syntax, id))
    }
}

impl<'a> VariableDeclarator<'a> {
    pub fn name_token(&self) -> Option<TokenId> {
        self.syntax.name_token(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.syntax.name(self.id)
    }

    /// Initializer expression after `=`.
    pub fn initializer(&self) -> Option<NodeId> {
        self.syntax.tree.child_nodes(self.id).next()
    }
}

impl<'a> Parameter<'a> {
    /// `None` for an unnamed parameter such as `int` in a prototype.
    pub fn name_token(&self) -> Option<TokenId> {
        self.syntax.name_token(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.syntax.name(self.id)
    }

    pub fn ty(&self) -> Option<NodeId> {
        self.child(RuleKind::TypeSpec)
    }

    pub fn is_varargs(&self) -> bool {
        self.syntax
            .tree
            .child_tokens(self.id)
            .any(|t| self.syntax.token(t).kind == TokenKind::Ellipsis)
    }
}

impl<'a> ForeachVar<'a> {
    pub fn name_token(&self) -> Option<TokenId> {
        self.syntax.name_token(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.syntax.name(self.id)
    }
}

impl<'a> ClassDef<'a> {
    pub fn name_token(&self) -> Option<TokenId> {
        self.syntax.name_token(self.id)
    }

    pub fn name(&self) -> Option<&'a str> {
        self.syntax.name(self.id)
    }

    pub fn members(self) -> impl Iterator<Item = VariableDecl<'a>> + 'a {
        let syntax = self.syntax;
        self.children_of(RuleKind::VariableDecl)
            .filter_map(move |id| VariableDecl::cast(syntax, id))
    }
}

impl<'a> Inherit<'a> {
    /// The inherited path expression, usually a string literal.
    pub fn path(&self) -> Option<NodeId> {
        self.syntax
            .tree
            .child_nodes(self.id)
            .find(|c| self.syntax.rule(*c) != RuleKind::Modifiers)
    }
}

impl<'a> Block<'a> {
    pub fn statements(self) -> impl Iterator<Item = NodeId> + 'a {
        self.syntax.tree.child_nodes(self.id)
    }
}
