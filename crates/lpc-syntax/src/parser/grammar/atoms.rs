//! Primary expressions: names, literals and bracketed forms.

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::kinds::TokenKind::*;
use crate::parser::kinds::token_sets::EXPR_RECOVERY;
use crate::parser::tree::RuleKind;

impl Parser<'_> {
    /// Returns false when no primary could be parsed. A missing operand is
    /// reported once and replaced by an empty `Error` node, or the offending
    /// token is wrapped in one.
    pub(super) fn parse_primary(&mut self) -> bool {
        match self.current() {
            Ident | KwEfun => self.parse_single(RuleKind::Name),
            ColonColon => {
                self.start_node(RuleKind::ScopeAccess);
                self.bump();
                self.expect_name();
                self.finish_node();
            }
            IntLiteral => self.parse_single(RuleKind::IntLiteral),
            FloatLiteral => self.parse_single(RuleKind::FloatLiteral),
            CharLiteral => self.parse_single(RuleKind::CharLiteral),
            StringLiteral => {
                self.start_node(RuleKind::StringLiteral);
                while self.eat_token(StringLiteral) {}
                self.finish_node();
            }
            HeredocString => self.parse_single(RuleKind::HeredocString),
            HeredocArray => self.parse_single(RuleKind::HeredocArray),
            ClosureLiteral => self.parse_single(RuleKind::Closure),
            ArgPlaceholder => self.parse_single(RuleKind::Placeholder),
            Dollar => self.parse_dollar(),
            FunctionPtrOpen => self.parse_function_pointer(),
            LParen => match self.nth(1) {
                LBracket => self.parse_mapping(),
                LBrace => self.parse_array(),
                _ => self.parse_paren(),
            },
            KwFunction => self.parse_anonymous_function(),
            Error => {
                self.bump_lex_error();
                return false;
            }
            kind if EXPR_RECOVERY.contains(kind) => {
                self.missing(DiagnosticKind::ExpectedExpression);
                return false;
            }
            kind => {
                let message = format!("found {}", kind.describe());
                self.error_and_bump_msg(DiagnosticKind::ExpectedExpression, message);
                return false;
            }
        }
        true
    }

    fn parse_single(&mut self, rule: RuleKind) {
        self.start_node(rule);
        self.bump();
        self.finish_node();
    }

    /// `"$" "(" expression ")"`
    fn parse_dollar(&mut self) {
        self.start_node(RuleKind::Placeholder);
        self.bump();
        if self.currently_is(LParen) {
            self.push_delimiter(LParen);
            self.bump();
            self.parse_expression();
            self.close_delimiter(RParen);
        } else {
            self.expect(LParen);
        }
        self.finish_node();
    }

    /// `"(:" expression? ("," argument)* ":)"`
    fn parse_function_pointer(&mut self) {
        self.start_node(RuleKind::FunctionPointer);
        self.push_delimiter(FunctionPtrOpen);
        self.bump();
        if !self.currently_is(FunctionPtrClose) {
            self.parse_assignment();
            while self.eat_token(Comma) {
                if self.currently_is(FunctionPtrClose) {
                    break;
                }
                self.parse_assignment();
            }
        }
        self.close_delimiter(FunctionPtrClose);
        self.finish_node();
    }

    fn parse_paren(&mut self) {
        self.start_node(RuleKind::ParenExpr);
        self.push_delimiter(LParen);
        self.bump();
        self.parse_expression();
        self.close_delimiter(RParen);
        self.finish_node();
    }

    /// `"({" (assignment ","?)* "})"`
    fn parse_array(&mut self) {
        self.start_node(RuleKind::ArrayLiteral);
        self.push_delimiter(LParen);
        self.bump();
        self.bump();
        self.parse_comma_list(RBrace, |p| {
            p.parse_assignment();
            p.eat_token(Ellipsis);
        });
        self.expect(RBrace);
        self.close_delimiter(RParen);
        self.finish_node();
    }

    /// `"([" (":" width | entry ("," entry)* ","?)? "])"` where
    /// `entry = key (":" value (";" value)*)?`.
    fn parse_mapping(&mut self) {
        self.start_node(RuleKind::MappingLiteral);
        self.push_delimiter(LParen);
        self.bump();
        self.bump();
        if self.eat_token(Colon) {
            self.parse_assignment();
        } else {
            self.parse_comma_list(RBracket, Self::parse_mapping_entry);
        }
        self.expect(RBracket);
        self.close_delimiter(RParen);
        self.finish_node();
    }

    fn parse_mapping_entry(&mut self) {
        self.start_node(RuleKind::MappingEntry);
        self.parse_assignment();
        if self.eat_token(Colon) {
            self.parse_assignment();
            while self.eat_token(Semicolon) {
                self.parse_assignment();
            }
        }
        self.finish_node();
    }

    /// `"function" parameters block`
    fn parse_anonymous_function(&mut self) {
        self.start_node(RuleKind::AnonymousFunction);
        self.bump();
        self.parse_parameter_list();
        if self.currently_is(LBrace) {
            self.parse_block();
        } else {
            self.expect(LBrace);
        }
        self.finish_node();
    }
}
