//! LPC grammar, one function per production.
//!
//! Split by level: `items` for top-level declarations, `types` for
//! modifiers, types and parameters, `statements`, `expressions` for the
//! operator cascade and `atoms` for primaries.

mod atoms;
mod expressions;
mod items;
mod statements;
mod types;

use super::core::Parser;
use super::kinds::TokenKind;
use crate::diagnostics::DiagnosticKind;

impl Parser<'_> {
    pub(super) fn parse_root(&mut self) {
        self.start_root();
        while !self.eof() {
            self.parse_item();
        }
        self.sweep_remaining();
        self.finish_node();
    }

    /// Consumes an identifier or reports a missing name without consuming.
    pub(super) fn expect_name(&mut self) -> bool {
        if self.eat_token(TokenKind::Ident) {
            return true;
        }
        let found = self.current().describe();
        self.error_msg(DiagnosticKind::ExpectedName, format!("found {found}"));
        false
    }
}
