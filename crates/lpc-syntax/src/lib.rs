//! Lossless parsing core for LPC.
//!
//! Text goes through the lexer into a channel-tagged [`TokenStream`], the
//! recursive-descent parser turns the stream into an arena [`SyntaxTree`],
//! and [`ParseCache`] keeps one [`ParsedDocument`] per open document version.
//!
//! ```
//! use lpc_syntax::{parse_text, RuleKind};
//!
//! let doc = parse_text("int main() { return 1 + 2 * 3; }");
//! assert!(doc.diagnostics().is_empty());
//! assert_eq!(doc.tree().rule(doc.tree().root()), RuleKind::SourceFile);
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod cache;
pub mod diagnostics;
pub mod document;
pub mod line_index;
pub mod parser;
pub mod printer;
pub mod symbols;
pub mod visitor;


pub use cache::{CacheConfig, CacheStats, DEFAULT_CAPACITY, ParseCache};
pub use diagnostics::{DiagnosticCategory, DiagnosticKind, Diagnostics, Severity};
pub use document::{ParsedDocument, parse_text, parse_text_with};
pub use line_index::{LineCol, LineIndex};
pub use parser::{
    Channel, Cursor, Element, Mark, NodeId, ParseOptions, RuleKind, Syntax, SyntaxNode, SyntaxTree,
    Token, TokenId, TokenKind, TokenSpan, TokenStream, tokenize,
};
pub use printer::TreePrinter;
pub use symbols::{Declaration, DeclarationKind, declarations, usages};
pub use visitor::Visitor;

pub use rowan::{TextRange, TextSize};

/// Errors for the few operations that can fail outright.
///
/// Malformed source never ends up here: lexing and parsing always produce a
/// tree and report problems through [`Diagnostics`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("line {line}, column {column} is outside the document")]
    PositionOutOfBounds { line: u32, column: u32 },

    #[error("offset {0:?} is outside the document")]
    OffsetOutOfBounds(TextSize),

    #[error("parse cache capacity must be at least 1")]
    ZeroCapacity,
}

pub type Result<T> = std::result::Result<T, Error>;
