//! Parser state machine and low-level operations.

use std::cell::Cell;

use rowan::{TextRange, TextSize};

use super::kinds::{TokenKind, TokenSet};
use super::stream::{Cursor, Mark, TokenStream};
use super::tree::{Checkpoint, RuleKind, SyntaxTree, TreeBuilder};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Limits that keep pathological input from running away.
///
/// `None` disables a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of tokens the parser may consume.
    pub exec_fuel: Option<u32>,
    /// Maximum nesting depth of statements and expressions.
    pub recursion_fuel: Option<u32>,
}

pub const DEFAULT_EXEC_FUEL: u32 = 1_000_000;
pub const DEFAULT_RECURSION_FUEL: u32 = 512;

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            exec_fuel: Some(DEFAULT_EXEC_FUEL),
            recursion_fuel: Some(DEFAULT_RECURSION_FUEL),
        }
    }
}

impl ParseOptions {
    pub fn unlimited() -> Self {
        Self {
            exec_fuel: None,
            recursion_fuel: None,
        }
    }

    pub fn with_exec_fuel(mut self, limit: Option<u32>) -> Self {
        self.exec_fuel = limit;
        self
    }

    pub fn with_recursion_fuel(mut self, limit: Option<u32>) -> Self {
        self.recursion_fuel = limit;
        self
    }
}

/// Tree and syntax diagnostics produced by one parse.
#[derive(Debug, Clone)]
pub struct Parse {
    pub tree: SyntaxTree,
    pub diagnostics: Diagnostics,
    pub exec_fuel_consumed: u32,
}

#[derive(Debug, Clone, Copy)]
pub(super) struct OpenDelimiter {
    pub kind: TokenKind,
    pub span: TextRange,
}

/// Trivia between significant tokens is flushed into the tree when the next
/// node starts or the next token is consumed.
pub struct Parser<'t> {
    pub(super) cursor: Cursor<'t>,
    /// Raw index of the first token not yet placed in the tree.
    emitted: usize,
    builder: TreeBuilder,
    pub(super) diagnostics: Diagnostics,
    depth: u32,
    last_diagnostic_pos: Option<TextSize>,
    delimiter_stack: Vec<OpenDelimiter>,
    pub(super) debug_fuel: Cell<u32>,
    exec_fuel_initial: Option<u32>,
    exec_fuel_remaining: Option<u32>,
    recursion_fuel_limit: Option<u32>,
    stopped: bool,
}

impl<'t> Parser<'t> {
    pub fn new(stream: &'t TokenStream) -> Self {
        Self {
            cursor: stream.cursor(),
            emitted: 0,
            builder: TreeBuilder::new(),
            diagnostics: Diagnostics::new(),
            depth: 0,
            last_diagnostic_pos: None,
            delimiter_stack: Vec::with_capacity(8),
            debug_fuel: Cell::new(256),
            exec_fuel_initial: None,
            exec_fuel_remaining: None,
            recursion_fuel_limit: None,
            stopped: false,
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.exec_fuel_initial = options.exec_fuel;
        self.exec_fuel_remaining = options.exec_fuel;
        self.recursion_fuel_limit = options.recursion_fuel;
        self
    }

    pub fn parse(mut self) -> Parse {
        self.parse_root();
        self.finish()
    }

    fn finish(self) -> Parse {
        let exec_fuel_consumed = match (self.exec_fuel_initial, self.exec_fuel_remaining) {
            (Some(initial), Some(remaining)) => initial.saturating_sub(remaining),
            _ => 0,
        };
        Parse {
            tree: self.builder.finish(self.emitted),
            diagnostics: self.diagnostics,
            exec_fuel_consumed,
        }
    }

    /// Kind of the current significant token. Reads as `Eof` once parsing
    /// has been stopped by a resource limit, so every loop unwinds.
    pub(super) fn current(&self) -> TokenKind {
        if self.stopped {
            return TokenKind::Eof;
        }
        self.ensure_progress();
        self.cursor.kind()
    }

    /// LL(k) lookahead past trivia.
    pub(super) fn nth(&self, k: usize) -> TokenKind {
        if self.stopped {
            return TokenKind::Eof;
        }
        self.cursor.nth_kind(k)
    }

    pub(super) fn current_span(&self) -> TextRange {
        self.cursor.current().span
    }

    pub(super) fn reset_debug_fuel(&self) {
        self.debug_fuel.set(256);
    }

    fn consume_exec_fuel(&mut self) {
        if let Some(ref mut remaining) = self.exec_fuel_remaining {
            if *remaining == 0 {
                self.stop(DiagnosticKind::Truncated);
                return;
            }
            *remaining -= 1;
        }
    }

    /// Records why parsing ended early. The rest of the input is swept into
    /// an error node by [`Parser::sweep_remaining`].
    fn stop(&mut self, kind: DiagnosticKind) {
        if self.stopped {
            return;
        }
        let range = self.current_span();
        tracing::warn!(?kind, offset = u32::from(range.start()), "parser stopped early");
        self.diagnostics.report(kind, range).emit();
        self.stopped = true;
    }

    pub(super) fn eof(&self) -> bool {
        self.current() == TokenKind::Eof
    }

    pub(super) fn currently_is(&self, kind: TokenKind) -> bool {
        self.current() == kind
    }

    pub(super) fn currently_is_one_of(&self, set: TokenSet) -> bool {
        set.contains(self.current())
    }

    /// Places pending trivia into the currently open node.
    fn drain_trivia(&mut self) {
        let target = self.cursor.significant_index(0);
        while self.emitted < target {
            self.builder.token(self.emitted);
            self.emitted += 1;
        }
    }

    /// Opens the root without flushing trivia, so leading trivia lands inside it.
    pub(super) fn start_root(&mut self) {
        self.builder.start_node(RuleKind::SourceFile);
    }

    pub(super) fn start_node(&mut self, rule: RuleKind) {
        self.drain_trivia();
        self.builder.start_node(rule);
    }

    pub(super) fn start_node_at(&mut self, checkpoint: Checkpoint, rule: RuleKind) {
        self.builder.start_node_at(checkpoint, rule);
    }

    pub(super) fn finish_node(&mut self) {
        self.builder.finish_node(self.emitted);
    }

    pub(super) fn checkpoint(&mut self) -> Checkpoint {
        self.drain_trivia();
        self.builder.checkpoint()
    }

    pub(super) fn bump(&mut self) {
        if self.stopped {
            return;
        }
        assert!(!self.eof(), "bump called at EOF");
        self.reset_debug_fuel();
        self.consume_exec_fuel();
        if self.stopped {
            return;
        }

        self.drain_trivia();
        let index = self.cursor.significant_index(0);
        self.builder.token(index);
        self.cursor.advance();
        self.emitted = index + 1;
    }

    pub(super) fn eat_token(&mut self, kind: TokenKind) -> bool {
        if self.currently_is(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// On mismatch: emit diagnostic but don't consume.
    pub(super) fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat_token(kind) {
            return true;
        }
        self.error_msg(DiagnosticKind::ExpectedToken, kind.describe());
        false
    }

    /// Saves the cursor for a speculative scan. Nothing may be placed in the
    /// tree until the matching [`Parser::reset`].
    pub(super) fn mark(&self) -> Mark {
        self.cursor.mark()
    }

    pub(super) fn reset(&mut self, mark: Mark) {
        self.cursor.reset(mark);
        self.reset_debug_fuel();
    }

    /// Advances the cursor during a speculative scan without building tree.
    pub(super) fn skip_speculatively(&mut self) -> TokenKind {
        self.cursor.advance().kind
    }

    fn should_report(&mut self, pos: TextSize) -> bool {
        if self.stopped || self.last_diagnostic_pos == Some(pos) {
            return false;
        }
        self.last_diagnostic_pos = Some(pos);
        true
    }

    fn bump_as_error(&mut self) {
        if !self.eof() {
            self.start_node(RuleKind::Error);
            self.bump();
            self.finish_node();
        }
    }

    /// Wraps a token the lexer already reported.
    pub(super) fn bump_lex_error(&mut self) {
        self.bump_as_error();
    }

    pub(super) fn error(&mut self, kind: DiagnosticKind) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).emit();
    }

    pub(super) fn error_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        let range = self.current_span();
        if !self.should_report(range.start()) {
            return;
        }
        self.diagnostics.report(kind, range).message(message).emit();
    }

    pub(super) fn error_and_bump_msg(&mut self, kind: DiagnosticKind, message: impl Into<String>) {
        self.error_msg(kind, message);
        self.bump_as_error();
    }

    /// Empty `Error` node standing in for something missing.
    pub(super) fn missing(&mut self, kind: DiagnosticKind) {
        self.error(kind);
        self.start_node(RuleKind::Error);
        self.finish_node();
    }

    pub(super) fn enter_recursion(&mut self) -> bool {
        if let Some(limit) = self.recursion_fuel_limit
            && self.depth >= limit
        {
            self.stop(DiagnosticKind::NestingTooDeep);
            return false;
        }
        self.depth += 1;
        self.reset_debug_fuel();
        true
    }

    pub(super) fn exit_recursion(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.reset_debug_fuel();
    }

    pub(super) fn push_delimiter(&mut self, kind: TokenKind) {
        let span = self.current_span();
        self.delimiter_stack.push(OpenDelimiter { kind, span });
    }

    pub(super) fn pop_delimiter(&mut self) -> Option<OpenDelimiter> {
        self.delimiter_stack.pop()
    }

    /// Closes the innermost delimiter with `close`, or reports it unclosed.
    pub(super) fn close_delimiter(&mut self, close: TokenKind) {
        let open = self.pop_delimiter();
        if self.eat_token(close) {
            return;
        }
        let Some(open) = open else {
            self.expect(close);
            return;
        };
        let current = self.current_span();
        if !self.should_report(current.start()) {
            return;
        }
        let full_range = TextRange::new(open.span.start(), current.end());
        let opener = self.cursor.stream().source()[open.span].to_string();
        self.diagnostics
            .report(DiagnosticKind::UnclosedDelimiter, full_range)
            .message(opener)
            .related_to(format!("{} opened here", open.kind.describe()), open.span)
            .emit();
    }

    /// Emits every token left before `Eof` into the open node. Significant
    /// leftovers are grouped into one `Error` node.
    pub(super) fn sweep_remaining(&mut self) {
        let eof = self.cursor.stream().eof_index();
        let stream = self.cursor.stream();
        let has_significant = stream.tokens()[self.emitted..eof]
            .iter()
            .any(|t| !t.kind.is_trivia());
        if has_significant {
            self.builder.start_node(RuleKind::Error);
        }
        while self.emitted < eof {
            self.builder.token(self.emitted);
            self.emitted += 1;
        }
        if has_significant {
            self.builder.finish_node(self.emitted);
        }
    }
}
