//! Statements and blocks.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::kinds::TokenKind::*;
use crate::parser::kinds::token_sets::{EXPR_FIRST, STMT_RECOVERY};
use crate::parser::tree::RuleKind;

impl Parser<'_> {
    pub(super) fn parse_block(&mut self) {
        self.start_node(RuleKind::Block);
        self.assert_current(LBrace);
        self.push_delimiter(LBrace);
        self.bump();

        if self.enter_recursion() {
            while !self.eof() && !self.currently_is(RBrace) {
                self.parse_statement();
            }
            self.exit_recursion();
        }

        self.close_delimiter(RBrace);
        self.finish_node();
    }

    pub(super) fn parse_statement(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        match self.current() {
            LBrace => self.parse_block(),
            Semicolon => self.parse_keyword_statement(RuleKind::EmptyStatement),
            KwIf => self.parse_if(),
            KwWhile => self.parse_while(),
            KwDo => self.parse_do_while(),
            KwFor => self.parse_for(),
            KwForeach => self.parse_foreach(),
            KwSwitch => self.parse_switch(),
            KwCase => self.parse_case_label(),
            KwDefault => self.parse_default_label(),
            KwReturn => self.parse_return(),
            KwBreak => self.parse_keyword_statement(RuleKind::BreakStatement),
            KwContinue => self.parse_keyword_statement(RuleKind::ContinueStatement),
            Error => self.bump_lex_error(),
            _ if self.at_local_declaration() => self.parse_local_declaration(true),
            kind if EXPR_FIRST.contains(kind) => self.parse_expr_statement(),
            kind => {
                let message = format!("expected a statement, found {}", kind.describe());
                self.recover_statement(&message);
            }
        }

        self.exit_recursion();
    }

    /// Skips to the next `;`, `{` or `}` inside an `Error` node. A `;`
    /// there is taken into the node.
    fn recover_statement(&mut self, message: &str) {
        self.start_node(RuleKind::Error);
        self.error_msg(DiagnosticKind::UnexpectedToken, message);
        while !self.currently_is_one_of(STMT_RECOVERY) && !self.eof() {
            self.bump();
        }
        tracing::trace!(at = ?self.current(), "resynchronized");
        self.eat_token(Semicolon);
        self.finish_node();
    }

    fn at_local_declaration(&self) -> bool {
        match self.current() {
            kind if kind.is_modifier() => true,
            KwFunction => self.nth(1) != LParen,
            _ => self.at_type_start(false),
        }
    }

    /// `keyword? ";"` for `break`, `continue` and the empty statement.
    fn parse_keyword_statement(&mut self, rule: RuleKind) {
        self.start_node(rule);
        if rule != RuleKind::EmptyStatement {
            self.bump();
        }
        self.expect(Semicolon);
        self.finish_node();
    }

    fn parse_expr_statement(&mut self) {
        self.start_node(RuleKind::ExprStatement);
        self.parse_expression();
        self.expect(Semicolon);
        self.finish_node();
    }

    /// `"(" expression ")"` as used by `if`, `while`, `switch` and `do`.
    fn parse_condition(&mut self) {
        let opened = self.currently_is(LParen);
        if opened {
            self.push_delimiter(LParen);
            self.bump();
        } else {
            self.expect(LParen);
        }
        self.parse_expression();
        if opened {
            self.close_delimiter(RParen);
        } else {
            self.eat_token(RParen);
        }
    }

    fn parse_if(&mut self) {
        self.start_node(RuleKind::IfStatement);
        self.bump();
        self.parse_condition();
        self.parse_statement();
        if self.eat_token(KwElse) {
            self.parse_statement();
        }
        self.finish_node();
    }

    fn parse_while(&mut self) {
        self.start_node(RuleKind::WhileStatement);
        self.bump();
        self.parse_condition();
        self.parse_statement();
        self.finish_node();
    }

    fn parse_do_while(&mut self) {
        self.start_node(RuleKind::DoWhileStatement);
        self.bump();
        self.parse_statement();
        if self.expect(KwWhile) {
            self.parse_condition();
        }
        self.expect(Semicolon);
        self.finish_node();
    }

    /// `for (init? ; condition? ; update?) statement`, where init may declare.
    fn parse_for(&mut self) {
        self.start_node(RuleKind::ForStatement);
        self.bump();
        let opened = self.currently_is(LParen);
        if opened {
            self.push_delimiter(LParen);
            self.bump();
        } else {
            self.expect(LParen);
        }

        if !self.currently_is(Semicolon) {
            if self.at_local_declaration() {
                self.parse_local_declaration(false);
            } else {
                self.parse_expression();
            }
        }
        self.expect(Semicolon);
        if !self.currently_is(Semicolon) {
            self.parse_expression();
        }
        self.expect(Semicolon);
        if !self.currently_is(RParen) {
            self.parse_expression();
        }

        if opened {
            self.close_delimiter(RParen);
        } else {
            self.eat_token(RParen);
        }
        self.parse_statement();
        self.finish_node();
    }

    /// `foreach (var ("," var)* ("in" | ":") expression) statement`
    fn parse_foreach(&mut self) {
        self.start_node(RuleKind::ForeachStatement);
        self.bump();
        let opened = self.currently_is(LParen);
        if opened {
            self.push_delimiter(LParen);
            self.bump();
        } else {
            self.expect(LParen);
        }

        loop {
            self.parse_foreach_var();
            if !self.eat_token(Comma) {
                break;
            }
        }
        if !self.eat_token(KwIn) && !self.eat_token(Colon) {
            self.error_msg(DiagnosticKind::ExpectedToken, "`in` or `:`");
        }
        self.parse_expression();

        if opened {
            self.close_delimiter(RParen);
        } else {
            self.eat_token(RParen);
        }
        self.parse_statement();
        self.finish_node();
    }

    fn parse_foreach_var(&mut self) {
        self.start_node(RuleKind::ForeachVar);
        self.eat_token(KwRef);
        if self.at_type_start(true) {
            self.parse_type();
        }
        while self.eat_token(Star) {}
        self.expect_name();
        self.finish_node();
    }

    fn parse_switch(&mut self) {
        self.start_node(RuleKind::SwitchStatement);
        self.bump();
        self.parse_condition();
        if self.currently_is(LBrace) {
            self.parse_block();
        } else {
            self.expect(LBrace);
        }
        self.finish_node();
    }

    /// `case value (".." value)? ":"`
    ///
    /// Values are parsed without the conditional operator so its `:` cannot
    /// swallow the label terminator.
    fn parse_case_label(&mut self) {
        self.start_node(RuleKind::CaseLabel);
        self.bump();
        self.parse_binary_operand();
        if self.eat_token(DotDot) {
            self.parse_binary_operand();
        }
        self.expect(Colon);
        self.finish_node();
    }

    fn parse_default_label(&mut self) {
        self.start_node(RuleKind::DefaultLabel);
        self.bump();
        self.expect(Colon);
        self.finish_node();
    }

    fn parse_return(&mut self) {
        self.start_node(RuleKind::ReturnStatement);
        self.bump();
        if !self.currently_is(Semicolon) {
            self.parse_expression();
        }
        self.expect(Semicolon);
        self.finish_node();
    }
}
