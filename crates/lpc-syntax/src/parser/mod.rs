//! Lexer, token stream and parser for LPC.
//!
//! # Architecture
//!
//! - The lexer tags every token with a [`Channel`]. Only the default channel
//!   reaches grammar rules; whitespace, comments and preprocessor lines stay
//!   in the [`TokenStream`] so the tree remains lossless.
//! - The parser is recursive descent with one function per production and
//!   precedence climbing for binary operators.
//! - Ambiguous prefixes (casts, declarations) are decided by a bounded
//!   speculative scan using [`Cursor::mark`] and [`Cursor::reset`].
//! - Nodes are wrapped retroactively through checkpoints, so the kind of a
//!   node can depend on what follows its first child.
//!
//! # Recovery
//!
//! The parser always produces a tree:
//!
//! 1. Tokens the lexer rejected are wrapped in `Error` nodes silently, the
//!    lexer has already reported them
//! 2. Missing tokens emit a diagnostic but are not consumed
//! 3. Unexpected tokens are skipped into an `Error` node up to the next
//!    `;`, `{` or `}`
//! 4. When a fuel limit is hit, the rest of the input goes into one `Error`
//!    node under the root

pub mod ast;
pub mod kinds;
pub mod lexer;
pub mod stream;
pub mod tree;

mod core;
mod grammar;
mod invariants;

#[cfg(test)]
mod tests;

pub use ast::Syntax;
pub use core::{DEFAULT_EXEC_FUEL, DEFAULT_RECURSION_FUEL, Parse, ParseOptions, Parser};
pub use kinds::{Channel, TokenKind, TokenSet, token_sets};
pub use lexer::{Lexed, Token, heredoc_body, lex, token_text, tokenize};
pub use stream::{Cursor, Mark, TokenStream};
pub use tree::{
    AssignOp, BinaryOp, Element, NodeId, PostfixOp, RangeBound, RuleKind, SliceKind, SyntaxNode,
    SyntaxTree, TokenId, TokenSpan, UnaryOp,
};

/// Parses a token stream with default limits.
pub fn parse(stream: &TokenStream) -> Parse {
    parse_with(stream, ParseOptions::default())
}

#[tracing::instrument(skip_all, fields(tokens = stream.len()))]
pub fn parse_with(stream: &TokenStream, options: ParseOptions) -> Parse {
    let parse = Parser::new(stream).with_options(options).parse();
    tracing::debug!(
        nodes = parse.tree.len(),
        diagnostics = parse.diagnostics.len(),
        fuel = parse.exec_fuel_consumed,
        "parsed"
    );
    parse
}
