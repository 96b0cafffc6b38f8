//! Expression cascade, lowest binding first:
//!
//! ```text
//! expression  = assignment ("," assignment)*
//! assignment  = conditional (assign_op assignment)?
//! conditional = binary ("?" assignment ":" conditional)?
//! binary      = unary (binary_op unary)*      precedence climbing, left-assoc
//! unary       = prefix_op unary | catch | cast | postfix
//! postfix     = primary ( call | slice | "->" IDENT | "::" IDENT | "." IDENT | "++" | "--" )*
//! ```

use crate::diagnostics::DiagnosticKind;
use crate::parser::core::Parser;
use crate::parser::kinds::TokenKind::{self, *};
use crate::parser::kinds::token_sets::{CAST_FOLLOW_UNAMBIGUOUS, EXPR_FIRST};
use crate::parser::tree::{
    AssignOp, BinaryOp, Checkpoint, PostfixOp, RangeBound, RuleKind, SliceKind, UnaryOp,
};

impl Parser<'_> {
    pub(super) fn parse_expression(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_assignment();
        if self.currently_is(Comma) {
            self.start_node_at(checkpoint, RuleKind::CommaExpr);
            while self.eat_token(Comma) {
                self.parse_assignment();
            }
            self.finish_node();
        }
    }

    /// Right-associative: `a = b = c` assigns `c` to `b` first.
    pub(super) fn parse_assignment(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        let checkpoint = self.checkpoint();
        self.parse_conditional();
        if let Some(op) = AssignOp::from_token(self.current()) {
            self.start_node_at(checkpoint, RuleKind::AssignExpr { op });
            self.bump();
            self.parse_assignment();
            self.finish_node();
        }

        self.exit_recursion();
    }

    fn parse_conditional(&mut self) {
        let checkpoint = self.checkpoint();
        self.parse_binary(1);
        if self.currently_is(Question) {
            self.start_node_at(checkpoint, RuleKind::ConditionalExpr);
            self.bump();
            self.parse_assignment();
            self.expect(Colon);
            self.parse_conditional();
            self.finish_node();
        }
    }

    /// Any binary expression, without `?:` or assignment.
    pub(super) fn parse_binary_operand(&mut self) {
        self.parse_binary(1);
    }

    /// Precedence climbing over [`BinaryOp::precedence`]. Operators binding
    /// looser than `min_precedence` are left to the caller.
    fn parse_binary(&mut self, min_precedence: u8) {
        let checkpoint = self.checkpoint();
        self.parse_unary();
        while let Some(op) = BinaryOp::from_token(self.current()) {
            let precedence = op.precedence();
            if precedence < min_precedence {
                break;
            }
            self.start_node_at(checkpoint, RuleKind::BinaryExpr { op });
            self.bump();
            self.parse_binary(precedence + 1);
            self.finish_node();
        }
    }

    fn parse_unary(&mut self) {
        if !self.enter_recursion() {
            return;
        }

        let current = self.current();
        if let Some(op) = UnaryOp::from_token(current) {
            self.start_node(RuleKind::UnaryExpr { op });
            self.bump();
            self.parse_unary();
            self.finish_node();
        } else if current == KwCatch {
            self.parse_catch();
        } else if current == LParen && self.cast_ahead() {
            self.parse_cast();
        } else {
            self.parse_postfix();
        }

        self.exit_recursion();
    }

    /// `catch (expression)` or `catch { ... }`.
    fn parse_catch(&mut self) {
        self.start_node(RuleKind::CatchExpr);
        self.bump();
        match self.current() {
            LBrace => self.parse_block(),
            LParen => {
                self.push_delimiter(LParen);
                self.bump();
                self.parse_expression();
                self.close_delimiter(RParen);
            }
            _ => {
                self.expect(LParen);
            }
        }
        self.finish_node();
    }

    /// Decides whether the `(` at the cursor opens a cast.
    ///
    /// Scans `( type "*"* )` speculatively and looks at the token after the
    /// `)`. A builtin type, a `class` type or a starred type is always a
    /// cast when an operand follows. A bare identifier is a cast only when
    /// the next token cannot continue an expression, so `(x) + 1` stays a
    /// parenthesized expression while `(Foo) bar` is a cast.
    fn cast_ahead(&mut self) -> bool {
        let mark = self.mark();
        let verdict = self.scan_cast();
        self.reset(mark);
        verdict
    }

    fn scan_cast(&mut self) -> bool {
        self.skip_speculatively();
        let mut definitely_type = match self.skip_speculatively() {
            kind if kind.is_builtin_type() => true,
            KwClass | KwStruct => {
                if self.skip_speculatively() != Ident {
                    return false;
                }
                true
            }
            Ident => false,
            _ => return false,
        };

        let mut next = self.skip_speculatively();
        if next == KwArray {
            definitely_type = true;
            next = self.skip_speculatively();
        }
        while next == Star {
            definitely_type = true;
            next = self.skip_speculatively();
        }
        if next != RParen {
            return false;
        }

        let follow = self.cursor.kind();
        if definitely_type {
            EXPR_FIRST.contains(follow)
        } else {
            CAST_FOLLOW_UNAMBIGUOUS.contains(follow)
        }
    }

    fn parse_cast(&mut self) {
        self.start_node(RuleKind::CastExpr);
        self.bump();
        self.parse_type();
        while self.eat_token(Star) {}
        self.expect(RParen);
        self.parse_unary();
        self.finish_node();
    }

    fn parse_postfix(&mut self) {
        let checkpoint = self.checkpoint();
        if !self.parse_primary() {
            return;
        }

        loop {
            match self.current() {
                LParen => {
                    self.start_node_at(checkpoint, RuleKind::CallExpr);
                    self.parse_argument_list();
                    self.finish_node();
                }
                LBracket => self.parse_slice(checkpoint),
                Arrow => self.parse_access(checkpoint, RuleKind::MemberAccess),
                ColonColon => self.parse_access(checkpoint, RuleKind::ScopeAccess),
                Dot => self.parse_access(checkpoint, RuleKind::FieldAccess),
                kind @ (PlusPlus | MinusMinus) => {
                    let op = if kind == PlusPlus {
                        PostfixOp::Increment
                    } else {
                        PostfixOp::Decrement
                    };
                    self.start_node_at(checkpoint, RuleKind::PostfixExpr { op });
                    self.bump();
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_access(&mut self, checkpoint: Checkpoint, rule: RuleKind) {
        self.start_node_at(checkpoint, rule);
        self.bump();
        self.expect_name();
        self.finish_node();
    }

    /// `"(" (argument ("," argument)* ","?)? ")"` where an argument may be
    /// followed by `...` to spread an array, or be a class type as in
    /// `new(class Point)`.
    pub(super) fn parse_argument_list(&mut self) {
        self.start_node(RuleKind::ArgumentList);
        self.push_delimiter(LParen);
        self.bump();
        self.parse_comma_list(RParen, |p| {
            if matches!(p.current(), KwClass | KwStruct) && p.nth(1) == Ident {
                p.parse_type();
                return;
            }
            p.parse_assignment();
            p.eat_token(Ellipsis);
        });
        self.close_delimiter(RParen);
        self.finish_node();
    }

    /// Comma-separated items up to `close`, trailing comma allowed. Stops
    /// early when an item makes no progress.
    pub(super) fn parse_comma_list(&mut self, close: TokenKind, mut item: impl FnMut(&mut Self)) {
        while !self.currently_is(close) && !self.eof() {
            item(self);
            if !self.eat_token(Comma) {
                break;
            }
        }
    }

    /// `"[" bound (".." bound?)? "]"` with `bound = "<"? expression`.
    ///
    /// The node kind depends on the contents, so the subscript is parsed
    /// first and wrapped afterwards.
    fn parse_slice(&mut self, checkpoint: Checkpoint) {
        self.push_delimiter(LBracket);
        self.bump();

        let start = self.parse_range_bound();
        let kind = if self.eat_token(DotDot) {
            let end = self.parse_range_bound();
            SliceKind::Range { start, end }
        } else {
            match start {
                RangeBound::FromHead => SliceKind::Index,
                RangeBound::FromTail => SliceKind::TailIndex,
                RangeBound::Open => {
                    self.missing(DiagnosticKind::ExpectedExpression);
                    SliceKind::Index
                }
            }
        };

        self.close_delimiter(RBracket);
        self.start_node_at(checkpoint, RuleKind::SliceExpr { kind });
        self.finish_node();
    }

    fn parse_range_bound(&mut self) -> RangeBound {
        match self.current() {
            DotDot | RBracket => RangeBound::Open,
            Lt => {
                self.bump();
                self.parse_assignment();
                RangeBound::FromTail
            }
            _ => {
                self.parse_assignment();
                RangeBound::FromHead
            }
        }
    }
}
