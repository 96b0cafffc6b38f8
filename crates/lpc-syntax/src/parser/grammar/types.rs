//! Modifiers, types, declarators and parameter lists.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::kinds::TokenKind::*;
use crate::parser::tree::RuleKind;

impl Parser<'_> {
    /// Parses a run of modifier keywords into one `Modifiers` node.
    pub(super) fn parse_modifiers(&mut self) -> bool {
        if !self.current().is_modifier() {
            return false;
        }
        self.start_node(RuleKind::Modifiers);
        while self.current().is_modifier() {
            self.bump();
        }
        self.finish_node();
        true
    }

    /// Whether a type starts at the current token.
    ///
    /// A bare identifier only counts when another identifier follows
    /// (`Foo bar`), or a `*` when `allow_star` is set (`Foo *bar`). The
    /// latter reads as multiplication inside statements, so statement
    /// contexts pass `false`.
    pub(super) fn at_type_start(&self, allow_star: bool) -> bool {
        match self.current() {
            kind if kind.is_builtin_type() => true,
            KwClass | KwStruct => self.nth(1) == Ident,
            Ident => match self.nth(1) {
                Ident => true,
                Star => allow_star,
                _ => false,
            },
            _ => false,
        }
    }

    /// `builtin | ("class" | "struct") IDENT | IDENT`, optionally followed by `array`.
    pub(super) fn parse_type(&mut self) {
        self.start_node(RuleKind::TypeSpec);
        match self.current() {
            KwClass | KwStruct => {
                self.bump();
                self.expect_name();
            }
            kind if kind.is_builtin_type() || kind == Ident => self.bump(),
            _ => self.error(DiagnosticKind::ExpectedType),
        }
        self.eat_token(KwArray);
        self.finish_node();
    }

    /// Local or member declaration: `modifiers? type declarators ";"?`.
    pub(super) fn parse_local_declaration(&mut self, terminated: bool) {
        self.start_node(RuleKind::VariableDecl);
        let has_modifiers = self.parse_modifiers();
        if self.at_type_start(true) {
            self.parse_type();
        } else if !has_modifiers {
            self.error(DiagnosticKind::ExpectedType);
        }
        self.parse_declarators();
        if terminated {
            self.expect(Semicolon);
        }
        self.finish_node();
    }

    pub(super) fn parse_declarators(&mut self) {
        loop {
            self.parse_declarator();
            if !self.eat_token(Comma) {
                break;
            }
        }
    }

    /// `"*"* IDENT ("=" assignment)?`
    fn parse_declarator(&mut self) {
        self.start_node(RuleKind::VariableDeclarator);
        while self.eat_token(Star) {}
        self.expect_name();
        if self.eat_token(Eq) {
            self.parse_assignment();
        }
        self.finish_node();
    }

    pub(super) fn parse_parameter_list(&mut self) {
        self.start_node(RuleKind::ParameterList);
        if !self.currently_is(LParen) {
            self.expect(LParen);
            self.finish_node();
            return;
        }
        self.push_delimiter(LParen);
        self.bump();

        while !self.currently_is(RParen) && !self.eof() {
            if !self.parse_parameter() || !self.eat_token(Comma) {
                break;
            }
        }

        self.close_delimiter(RParen);
        self.finish_node();
    }

    /// `modifiers? "ref"? type? "*"* IDENT? "..."? (":" assignment)?`
    ///
    /// Returns false when nothing resembling a parameter was found.
    fn parse_parameter(&mut self) -> bool {
        let starts_parameter = self.current().is_modifier()
            || self.current().is_builtin_type()
            || matches!(self.current(), KwRef | KwClass | KwStruct | Ident | Ellipsis);
        if !starts_parameter {
            let found = self.current().describe();
            self.error_msg(DiagnosticKind::ExpectedName, format!("found {found}"));
            return false;
        }

        self.start_node(RuleKind::Parameter);
        self.parse_modifiers();
        self.eat_token(KwRef);
        let typed = self.at_type_start(true);
        if typed {
            self.parse_type();
        }
        while self.eat_token(Star) {}
        if !self.eat_token(Ident) && !typed && !self.currently_is(Ellipsis) {
            self.expect_name();
        }
        self.eat_token(Ellipsis);
        if self.eat_token(Colon) {
            self.parse_assignment();
        }
        self.finish_node();
        true
    }
}
