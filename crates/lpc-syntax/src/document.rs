//! One parsed version of a document.

use rowan::TextRange;

use crate::diagnostics::Diagnostics;
use crate::line_index::LineIndex;
use crate::parser::ast::{SourceFile, Syntax};
use crate::parser::{self, NodeId, ParseOptions, SyntaxTree, Token, TokenId, TokenStream};
use crate::printer::TreePrinter;

/// Token stream, tree and diagnostics for one document version.
///
/// Never mutated after construction. A new version gets a new document.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    version: i32,
    stream: TokenStream,
    tree: SyntaxTree,
    diagnostics: Diagnostics,
    exec_fuel_consumed: u32,
}

/// Parses standalone text with default limits, as version `0`.
pub fn parse_text(text: &str) -> ParsedDocument {
    parse_text_with(text, ParseOptions::default())
}

pub fn parse_text_with(text: &str, options: ParseOptions) -> ParsedDocument {
    ParsedDocument::parse(0, text, options)
}

impl ParsedDocument {
    /// Lexes and parses `text`. Lexical and syntax diagnostics are merged
    /// in source order.
    pub fn parse(version: i32, text: &str, options: ParseOptions) -> Self {
        let (stream, mut diagnostics) = TokenStream::lex(text);
        let parse = parser::parse_with(&stream, options);
        diagnostics.extend(parse.diagnostics);
        diagnostics.sort_by_position();
        Self {
            version,
            stream,
            tree: parse.tree,
            diagnostics,
            exec_fuel_consumed: parse.exec_fuel_consumed,
        }
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn source(&self) -> &str {
        self.stream.source()
    }

    pub fn stream(&self) -> &TokenStream {
        &self.stream
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn exec_fuel_consumed(&self) -> u32 {
        self.exec_fuel_consumed
    }

    /// True when nothing at error severity was reported.
    pub fn is_valid(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    pub fn syntax(&self) -> Syntax<'_> {
        Syntax::new(&self.tree, &self.stream)
    }

    pub fn source_file(&self) -> Option<SourceFile<'_>> {
        SourceFile::cast(self.syntax(), self.tree.root())
    }

    pub fn token(&self, id: TokenId) -> &Token {
        self.stream.at(id.index())
    }

    pub fn token_text(&self, id: TokenId) -> &str {
        self.stream.text(self.token(id))
    }

    pub fn node_range(&self, id: NodeId) -> TextRange {
        self.syntax().text_range(id)
    }

    pub fn node_text(&self, id: NodeId) -> &str {
        self.syntax().node_text(id)
    }

    pub fn line_index(&self) -> LineIndex {
        LineIndex::new(self.source())
    }

    pub fn printer(&self) -> TreePrinter<'_> {
        TreePrinter::new(self.syntax())
    }

    pub fn dump_tree(&self) -> String {
        self.printer().dump()
    }

    pub fn dump_diagnostics(&self) -> String {
        self.diagnostics.render_filtered(self.source())
    }
}
