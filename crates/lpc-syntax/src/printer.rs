//! Indented text dump of a syntax tree.

use std::fmt::Write;

use rowan::TextRange;

use crate::parser::ast::Syntax;
use crate::parser::{Element, NodeId, RuleKind, TokenId};

pub struct TreePrinter<'a> {
    syntax: Syntax<'a>,
    trivia: bool,
    spans: bool,
}

impl<'a> TreePrinter<'a> {
    pub fn new(syntax: Syntax<'a>) -> Self {
        Self {
            syntax,
            trivia: false,
            spans: false,
        }
    }

    /// Includes whitespace, comments and directives.
    pub fn with_trivia(mut self, value: bool) -> Self {
        self.trivia = value;
        self
    }

    /// Appends byte ranges as ` [start..end]`.
    pub fn with_spans(mut self, value: bool) -> Self {
        self.spans = value;
        self
    }

    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.format(&mut out);
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(self.syntax.tree.root(), 0, w)
    }

    /// Dumps the subtree rooted at `id`.
    pub fn format_subtree(&self, id: NodeId, w: &mut impl Write) -> std::fmt::Result {
        self.format_node(id, 0, w)
    }

    fn format_node(&self, id: NodeId, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let prefix = "  ".repeat(indent);
        let span = self.span_str(self.syntax.text_range(id));
        writeln!(w, "{}{}{}", prefix, rule_label(self.syntax.rule(id)), span)?;

        for child in self.syntax.tree.children(id) {
            match *child {
                Element::Node(node) => self.format_node(node, indent + 1, w)?,
                Element::Token(token) => self.format_token(token, indent + 1, w)?,
            }
        }
        Ok(())
    }

    fn format_token(&self, id: TokenId, indent: usize, w: &mut impl Write) -> std::fmt::Result {
        let token = self.syntax.token(id);
        if token.kind.is_trivia() && !self.trivia {
            return Ok(());
        }
        writeln!(
            w,
            "{}{:?}{} {:?}",
            "  ".repeat(indent),
            token.kind,
            self.span_str(token.span),
            self.syntax.token_text(id)
        )
    }

    fn span_str(&self, range: TextRange) -> String {
        if !self.spans {
            return String::new();
        }
        format!(
            " [{}..{}]",
            u32::from(range.start()),
            u32::from(range.end())
        )
    }
}

/// Rule name, followed by the operator or subscript shape where the
/// variant carries one.
fn rule_label(rule: RuleKind) -> String {
    match rule {
        RuleKind::AssignExpr { op } => format!("AssignExpr {}", op.as_str()),
        RuleKind::BinaryExpr { op } => format!("BinaryExpr {}", op.as_str()),
        RuleKind::UnaryExpr { op } => format!("UnaryExpr {}", op.as_str()),
        RuleKind::PostfixExpr { op } => format!("PostfixExpr {}", op.as_str()),
        RuleKind::SliceExpr { kind } => format!("SliceExpr {kind}"),
        other => format!("{other:?}"),
    }
}
