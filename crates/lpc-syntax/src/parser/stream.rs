//! Random-access token buffer and a channel-aware cursor over it.
//!
//! [`TokenStream`] owns the source text and every token the lexer produced,
//! including trivia, in source order. [`Cursor`] walks the default channel
//! and supports `mark`/`reset` for backtracking. Marks are plain indices, so
//! backtracking never copies tokens.

use std::sync::Arc;

use rowan::TextRange;

use super::kinds::{Channel, TokenKind};
use super::lexer::{Lexed, Token, token_text, tokenize};
use crate::diagnostics::Diagnostics;

#[derive(Debug, Clone)]
pub struct TokenStream {
    source: Arc<str>,
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Lexes `source`, returning the stream and the lexical diagnostics.
    pub fn lex(source: impl Into<Arc<str>>) -> (Self, Diagnostics) {
        let source = source.into();
        let Lexed {
            tokens,
            diagnostics,
        } = tokenize(&source);
        (Self { source, tokens }, diagnostics)
    }

    /// Wraps tokens produced elsewhere.
    ///
    /// An `Eof` token is appended when the sequence does not already end
    /// with one.
    pub fn from_tokens(source: impl Into<Arc<str>>, mut tokens: Vec<Token>) -> Self {
        let source = source.into();
        if tokens.last().is_none_or(|t| !t.is_eof()) {
            let end = rowan::TextSize::from(source.len() as u32);
            let (line, column) = tokens.last().map_or((1, 0), |t| (t.line, t.column));
            tokens.push(Token::new(TokenKind::Eof, TextRange::empty(end), line, column));
        }
        Self { source, tokens }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of tokens, including the trailing `Eof`.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the source produced no tokens besides `Eof`.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Token at `index`. Indices past the end yield the `Eof` token.
    pub fn at(&self, index: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[index.min(last)]
    }

    pub fn text(&self, token: &Token) -> &str {
        token_text(&self.source, token)
    }

    pub fn eof_index(&self) -> usize {
        self.tokens.len() - 1
    }

    /// All tokens on one channel, in order.
    pub fn channel(&self, channel: Channel) -> impl Iterator<Item = &Token> {
        self.tokens.iter().filter(move |t| t.channel == channel)
    }

    /// Byte range covered by the tokens in `start..end`.
    pub fn text_range(&self, start: usize, end: usize) -> TextRange {
        if start >= end {
            return TextRange::empty(self.at(start).start());
        }
        TextRange::new(self.at(start).start(), self.at(end - 1).end())
    }

    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(self)
    }
}

/// Saved cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Mark(usize);

/// Default-channel view over a [`TokenStream`].
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    stream: &'t TokenStream,
    /// Raw index of the next unconsumed token, trivia included.
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(stream: &'t TokenStream) -> Self {
        Self { stream, pos: 0 }
    }

    pub fn stream(&self) -> &'t TokenStream {
        self.stream
    }

    /// Raw token access, independent of the cursor position.
    pub fn at(&self, index: usize) -> &'t Token {
        self.stream.at(index)
    }

    /// Raw index of the next unconsumed token.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Raw index of the `k`-th significant token at or after the cursor.
    pub fn significant_index(&self, k: usize) -> usize {
        let tokens = self.stream.tokens();
        let mut seen = 0;
        let mut i = self.pos;
        while i < tokens.len() {
            let token = &tokens[i];
            if token.channel == Channel::Default {
                if seen == k || token.is_eof() {
                    return i;
                }
                seen += 1;
            }
            i += 1;
        }
        self.stream.eof_index()
    }

    /// Peeks `k` significant tokens ahead, `0` being the current one.
    pub fn lookahead(&self, k: usize) -> &'t Token {
        self.stream.at(self.significant_index(k))
    }

    pub fn current(&self) -> &'t Token {
        self.lookahead(0)
    }

    pub fn kind(&self) -> TokenKind {
        self.current().kind
    }

    pub fn nth_kind(&self, k: usize) -> TokenKind {
        self.lookahead(k).kind
    }

    pub fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Consumes and returns the current significant token. At `Eof` the
    /// cursor stays put and keeps returning `Eof`.
    pub fn advance(&mut self) -> &'t Token {
        let index = self.significant_index(0);
        let token = self.stream.at(index);
        if !token.is_eof() {
            self.pos = index + 1;
        }
        token
    }

    pub fn mark(&self) -> Mark {
        Mark(self.pos)
    }

    pub fn reset(&mut self, mark: Mark) {
        self.pos = mark.0;
    }
}

impl<'t> Iterator for Cursor<'t> {
    type Item = &'t Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.at_eof() {
            return None;
        }
        Some(self.advance())
    }
}
