//! Top-level declarations.
//!
//! ```text
//! item        = ";" | inherit | class_def | declaration
//! inherit     = modifiers? "inherit" expression ";"
//! class_def   = ("class" | "struct") IDENT "{" member* "}" ";"?
//! declaration = modifiers? type? ( function | declarators ";" )
//! function    = "*"* IDENT parameters ( block | ";" )
//! ```

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::kinds::TokenKind::*;
use crate::parser::kinds::token_sets::STMT_RECOVERY;
use crate::parser::tree::{Checkpoint, RuleKind};

impl Parser<'_> {
    pub(super) fn parse_item(&mut self) {
        match self.current() {
            Semicolon => {
                self.start_node(RuleKind::EmptyStatement);
                self.bump();
                self.finish_node();
            }
            KwInherit => {
                let checkpoint = self.checkpoint();
                self.parse_inherit(checkpoint);
            }
            Error => self.bump_lex_error(),
            KwClass | KwStruct if self.at_class_def() => self.parse_class_def(),
            kind if kind.is_modifier() || kind.is_builtin_type() => self.parse_declaration(),
            KwClass | KwStruct | Ident => self.parse_declaration(),
            _ => self.recover_item(
                DiagnosticKind::NoViableAlternative,
                "expected a declaration",
                true,
            ),
        }
    }

    fn at_class_def(&self) -> bool {
        self.nth(1) == Ident && self.nth(2) == LBrace
    }

    fn parse_declaration(&mut self) {
        let checkpoint = self.checkpoint();
        let has_modifiers = self.parse_modifiers();

        if self.currently_is(KwInherit) {
            self.parse_inherit(checkpoint);
            return;
        }

        let has_type = self.at_type_start(true);
        if has_type {
            self.parse_type();
        }

        if self.function_ahead() {
            self.parse_function_rest(checkpoint);
            return;
        }

        if !has_type && !has_modifiers {
            self.recover_item(
                DiagnosticKind::NoViableAlternative,
                "expected a declaration",
                true,
            );
            return;
        }

        self.start_node_at(checkpoint, RuleKind::VariableDecl);
        self.parse_declarators();
        self.expect(Semicolon);
        self.finish_node();
    }

    /// `"*"* IDENT "("` ahead, i.e. a function rather than a variable.
    fn function_ahead(&self) -> bool {
        let mut k = 0;
        while self.nth(k) == Star {
            k += 1;
        }
        self.nth(k) == Ident && self.nth(k + 1) == LParen
    }

    /// Everything after the return type. The node kind is only known once
    /// the parameter list is done: a body makes it a definition, `;` a
    /// prototype.
    fn parse_function_rest(&mut self, checkpoint: Checkpoint) {
        while self.eat_token(Star) {}
        self.expect_name();
        self.parse_parameter_list();

        if self.currently_is(LBrace) {
            self.start_node_at(checkpoint, RuleKind::FunctionDef);
            self.parse_block();
        } else {
            self.start_node_at(checkpoint, RuleKind::FunctionPrototype);
            self.expect(Semicolon);
        }
        self.finish_node();
    }

    fn parse_inherit(&mut self, checkpoint: Checkpoint) {
        self.start_node_at(checkpoint, RuleKind::Inherit);
        self.assert_current(KwInherit);
        self.bump();
        if self.currently_is(Semicolon) {
            self.missing(DiagnosticKind::ExpectedExpression);
        } else {
            self.parse_expression();
        }
        self.expect(Semicolon);
        self.finish_node();
    }

    fn parse_class_def(&mut self) {
        self.start_node(RuleKind::ClassDef);
        self.bump();
        self.expect_name();

        self.push_delimiter(LBrace);
        self.bump();
        while !self.eof() && !self.currently_is(RBrace) {
            if self.at_type_start(true) || self.current().is_modifier() {
                self.parse_local_declaration(true);
            } else {
                self.recover_item(
                    DiagnosticKind::UnexpectedToken,
                    "expected a member declaration",
                    false,
                );
            }
        }
        self.close_delimiter(RBrace);
        self.eat_token(Semicolon);
        self.finish_node();
    }

    /// Skips to the next statement boundary inside an `Error` node. A `{`
    /// found there is parsed as a block so the body of a broken header is
    /// still visible. `}` is consumed only when `take_close` is set.
    fn recover_item(&mut self, kind: DiagnosticKind, message: &str, take_close: bool) {
        self.start_node(RuleKind::Error);
        self.error_msg(kind, message);
        while !self.currently_is_one_of(STMT_RECOVERY) && !self.eof() {
            self.bump();
        }
        tracing::trace!(at = ?self.current(), "resynchronized");
        match self.current() {
            Semicolon => self.bump(),
            RBrace if take_close => self.bump(),
            LBrace => self.parse_block(),
            _ => {}
        }
        self.finish_node();
    }
}
