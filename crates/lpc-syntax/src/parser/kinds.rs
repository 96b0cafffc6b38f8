//! Token kinds for LPC.
//!
//! `TokenKind` is the logos lexer definition. Node kinds live separately in
//! [`RuleKind`](super::tree::RuleKind) because the tree is an index arena
//! rather than a homogeneous green tree.

use logos::Logos;

use super::lexer::{
    LexErrorKind, block_comment, directive, heredoc, unterminated_char, unterminated_string,
};

/// All token kinds. Punctuation first, then keywords, literals, trivia and
/// the two synthetic kinds. `#[repr(u8)]` keeps every kind addressable by
/// [`TokenSet`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[logos(error = LexErrorKind)]
#[repr(u8)]
pub enum TokenKind {
    #[token("(")]
    LParen = 0,

    #[token(")")]
    RParen,

    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("{")]
    LBrace,

    #[token("}")]
    RBrace,

    #[token(";")]
    Semicolon,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[token("::")]
    ColonColon,

    #[token("?")]
    Question,

    #[token(".")]
    Dot,

    #[token("..")]
    DotDot,

    #[token("...")]
    Ellipsis,

    #[token("->")]
    Arrow,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("++")]
    PlusPlus,

    #[token("--")]
    MinusMinus,

    #[token("=")]
    Eq,

    #[token("+=")]
    PlusEq,

    #[token("-=")]
    MinusEq,

    #[token("*=")]
    StarEq,

    #[token("/=")]
    SlashEq,

    #[token("%=")]
    PercentEq,

    #[token("&=")]
    AmpEq,

    #[token("|=")]
    PipeEq,

    #[token("^=")]
    CaretEq,

    #[token("<<=")]
    ShlEq,

    #[token(">>=")]
    ShrEq,

    #[token("==")]
    EqEq,

    #[token("!=")]
    BangEq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<<")]
    Shl,

    #[token(">>")]
    Shr,

    #[token("&&")]
    AmpAmp,

    #[token("||")]
    PipePipe,

    #[token("!")]
    Bang,

    #[token("~")]
    Tilde,

    #[token("&")]
    Amp,

    #[token("|")]
    Pipe,

    #[token("^")]
    Caret,

    /// `(:` opens a function pointer.
    #[token("(:")]
    FunctionPtrOpen,

    #[token(":)")]
    FunctionPtrClose,

    #[token("if")]
    KwIf,

    #[token("else")]
    KwElse,

    #[token("while")]
    KwWhile,

    #[token("do")]
    KwDo,

    #[token("for")]
    KwFor,

    #[token("foreach")]
    KwForeach,

    #[token("in")]
    KwIn,

    #[token("switch")]
    KwSwitch,

    #[token("case")]
    KwCase,

    #[token("default")]
    KwDefault,

    #[token("break")]
    KwBreak,

    #[token("continue")]
    KwContinue,

    #[token("return")]
    KwReturn,

    #[token("inherit")]
    KwInherit,

    #[token("virtual")]
    KwVirtual,

    #[token("catch")]
    KwCatch,

    #[token("ref")]
    KwRef,

    #[token("efun")]
    KwEfun,

    #[token("int")]
    KwInt,

    #[token("float")]
    KwFloat,

    #[token("string")]
    KwString,

    #[token("object")]
    KwObject,

    #[token("mapping")]
    KwMapping,

    #[token("mixed")]
    KwMixed,

    #[token("function")]
    KwFunction,

    #[token("buffer")]
    KwBuffer,

    #[token("void")]
    KwVoid,

    #[token("status")]
    KwStatus,

    #[token("closure")]
    KwClosure,

    #[token("array")]
    KwArray,

    #[token("class")]
    KwClass,

    #[token("struct")]
    KwStruct,

    #[token("private")]
    KwPrivate,

    #[token("protected")]
    KwProtected,

    #[token("public")]
    KwPublic,

    #[token("static")]
    KwStatic,

    #[token("nomask")]
    KwNomask,

    #[token("varargs")]
    KwVarargs,

    #[token("nosave")]
    KwNosave,

    #[token("deprecated")]
    KwDeprecated,

    #[regex(r"[0-9][0-9_]*")]
    #[regex(r"0[xX][0-9a-fA-F_]+")]
    #[regex(r"0[bB][01_]+")]
    IntLiteral,

    #[regex(r"[0-9][0-9_]*\.[0-9][0-9_]*(?:[eE][+-]?[0-9]+)?")]
    #[regex(r"[0-9][0-9_]*[eE][+-]?[0-9]+")]
    FloatLiteral,

    #[regex(r#""(?:[^"\\\n]|\\[^\n]|\\\n)*""#)]
    #[regex(r#""(?:[^"\\\n]|\\[^\n]|\\\n)*"#, unterminated_string, allow_greedy = true)]
    StringLiteral,

    #[regex(r"'(?:[^'\\\n]|\\[^\n])'")]
    #[regex(r"'(?:[^'\\\n]|\\[^\n])?", unterminated_char)]
    CharLiteral,

    /// `@MARK ... MARK`: a string built from the enclosed lines.
    #[regex(r"@[A-Za-z_][A-Za-z0-9_]*", heredoc)]
    HeredocString,

    /// `@@MARK ... MARK`: an array with one string per enclosed line.
    #[regex(r"@@[A-Za-z_][A-Za-z0-9_]*", heredoc)]
    HeredocArray,

    /// `#'name`, `#'efun::name` or `#'<operator>`.
    #[regex(r"#'[A-Za-z_][A-Za-z0-9_]*(?:::[A-Za-z_][A-Za-z0-9_]*)?")]
    #[regex(r"#'(?:[-+*/%<>=!&|^~]+|\[|\(\{|\(\[)")]
    ClosureLiteral,

    /// `$1`, `$2`, ... inside function pointers.
    #[regex(r"\$[0-9]+")]
    ArgPlaceholder,

    #[token("$")]
    Dollar,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    #[regex(r"[ \t\r\f]+")]
    Whitespace,

    #[token("\n")]
    #[token("\r\n")]
    Newline,

    #[regex(r"//[^\n]*", allow_greedy = true)]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    /// A whole preprocessor line including backslash continuations.
    #[regex(r"#[ \t]*[A-Za-z_]*", directive)]
    Directive,

    /// Text the lexer could not turn into a token. Never produced by logos
    /// directly; `lex` assigns it to lexer errors.
    Error,

    /// Zero-width terminator appended after the last real token.
    Eof,
}

use TokenKind::*;

impl TokenKind {
    /// Which lane the parser reads this kind from.
    pub fn channel(self) -> Channel {
        match self {
            Whitespace | Newline => Channel::Whitespace,
            LineComment | BlockComment => Channel::Comment,
            Directive => Channel::Directive,
            _ => Channel::Default,
        }
    }

    #[inline]
    pub fn is_trivia(self) -> bool {
        self.channel() != Channel::Default
    }

    #[inline]
    pub fn is_keyword(self) -> bool {
        (KwIf as u8..=KwDeprecated as u8).contains(&(self as u8))
    }

    #[inline]
    pub fn is_builtin_type(self) -> bool {
        token_sets::BUILTIN_TYPES.contains(self)
    }

    #[inline]
    pub fn is_modifier(self) -> bool {
        token_sets::MODIFIERS.contains(self)
    }

    /// Human-readable name used in diagnostics.
    pub fn describe(self) -> &'static str {
        match self {
            LParen => "`(`",
            RParen => "`)`",
            LBracket => "`[`",
            RBracket => "`]`",
            LBrace => "`{`",
            RBrace => "`}`",
            Semicolon => "`;`",
            Comma => "`,`",
            Colon => "`:`",
            ColonColon => "`::`",
            Question => "`?`",
            Dot => "`.`",
            DotDot => "`..`",
            Ellipsis => "`...`",
            Arrow => "`->`",
            Eq => "`=`",
            FunctionPtrOpen => "`(:`",
            FunctionPtrClose => "`:)`",
            KwWhile => "`while`",
            KwIn => "`in`",
            IntLiteral | FloatLiteral => "number",
            StringLiteral => "string",
            CharLiteral => "character",
            HeredocString | HeredocArray => "heredoc",
            ClosureLiteral => "closure",
            Ident => "identifier",
            Error => "invalid token",
            Eof => "end of file",
            kind if kind.is_keyword() => "keyword",
            kind if kind.is_trivia() => "trivia",
            _ => "operator",
        }
    }
}

/// Lane a token travels on. Only `Default` tokens are visible to grammar
/// rules; the others stay in the stream for formatters and analyzers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Channel {
    #[default]
    Default,
    Whitespace,
    Comment,
    Directive,
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Channel::Default => "default",
            Channel::Whitespace => "whitespace",
            Channel::Comment => "comment",
            Channel::Directive => "directive",
        };
        f.write_str(name)
    }
}

/// 128-bit bitset of `TokenKind`s for O(1) membership testing.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenSet(u128);

impl TokenSet {
    pub const EMPTY: TokenSet = TokenSet(0);

    /// Panics at compile time if any kind's discriminant >= 128.
    #[inline]
    pub const fn new(kinds: &[TokenKind]) -> Self {
        let mut bits = 0u128;
        let mut i = 0;
        while i < kinds.len() {
            let kind = kinds[i] as u8;
            assert!(kind < 128, "TokenKind value exceeds TokenSet capacity");
            bits |= 1 << kind;
            i += 1;
        }
        TokenSet(bits)
    }

    #[inline]
    pub const fn contains(&self, kind: TokenKind) -> bool {
        let kind = kind as u8;
        if kind >= 128 {
            return false;
        }
        self.0 & (1 << kind) != 0
    }

    #[inline]
    pub const fn union(self, other: TokenSet) -> TokenSet {
        TokenSet(self.0 | other.0)
    }
}

impl std::fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut list = f.debug_set();
        for kind in ALL_KINDS {
            if self.contains(*kind) {
                list.entry(kind);
            }
        }
        list.finish()
    }
}

const ALL_KINDS: &[TokenKind] = &[
    LParen, RParen, LBracket, RBracket, LBrace, RBrace, Semicolon, Comma, Colon, ColonColon,
    Question, Dot, DotDot, Ellipsis, Arrow, Plus, Minus, Star, Slash, Percent, PlusPlus,
    MinusMinus, Eq, PlusEq, MinusEq, StarEq, SlashEq, PercentEq, AmpEq, PipeEq, CaretEq, ShlEq,
    ShrEq, EqEq, BangEq, Lt, Gt, LtEq, GtEq, Shl, Shr, AmpAmp, PipePipe, Bang, Tilde, Amp, Pipe,
    Caret, FunctionPtrOpen, FunctionPtrClose, KwIf, KwElse, KwWhile, KwDo, KwFor, KwForeach, KwIn,
    KwSwitch, KwCase, KwDefault, KwBreak, KwContinue, KwReturn, KwInherit, KwVirtual, KwCatch,
    KwRef, KwEfun, KwInt, KwFloat, KwString, KwObject, KwMapping, KwMixed, KwFunction, KwBuffer,
    KwVoid, KwStatus, KwClosure, KwArray, KwClass, KwStruct, KwPrivate, KwProtected, KwPublic,
    KwStatic, KwNomask, KwVarargs, KwNosave, KwDeprecated, IntLiteral, FloatLiteral,
    StringLiteral, CharLiteral, HeredocString, HeredocArray, ClosureLiteral, ArgPlaceholder,
    Dollar, Ident, Whitespace, Newline, LineComment, BlockComment, Directive, Error, Eof,
];

/// Pre-defined token sets for the parser.
pub mod token_sets {
    use super::*;

    pub const BUILTIN_TYPES: TokenSet = TokenSet::new(&[
        KwInt, KwFloat, KwString, KwObject, KwMapping, KwMixed, KwFunction, KwBuffer, KwVoid,
        KwStatus, KwClosure,
    ]);

    pub const MODIFIERS: TokenSet = TokenSet::new(&[
        KwPrivate,
        KwProtected,
        KwPublic,
        KwStatic,
        KwNomask,
        KwVarargs,
        KwNosave,
        KwDeprecated,
        KwVirtual,
    ]);

    pub const LITERALS: TokenSet = TokenSet::new(&[
        IntLiteral,
        FloatLiteral,
        StringLiteral,
        CharLiteral,
        HeredocString,
        HeredocArray,
        ClosureLiteral,
        ArgPlaceholder,
    ]);

    /// Tokens that can begin a primary expression.
    pub const PRIMARY_FIRST: TokenSet = LITERALS.union(TokenSet::new(&[
        Ident,
        LParen,
        FunctionPtrOpen,
        ColonColon,
        Dollar,
        KwEfun,
        KwFunction,
    ]));

    /// Prefix operators handled by the unary level.
    pub const PREFIX_OPS: TokenSet =
        TokenSet::new(&[PlusPlus, MinusMinus, Plus, Minus, Bang, Tilde, KwRef, Amp, KwCatch]);

    pub const EXPR_FIRST: TokenSet = PRIMARY_FIRST.union(PREFIX_OPS);

    /// After `(name)` these tokens make the parenthesized name a cast. Tokens
    /// that could continue an expression (`+ - * & ++ -- (`) are left out.
    pub const CAST_FOLLOW_UNAMBIGUOUS: TokenSet = LITERALS.union(TokenSet::new(&[
        Ident,
        FunctionPtrOpen,
        Bang,
        Tilde,
        KwEfun,
        KwFunction,
        KwCatch,
        ColonColon,
        Dollar,
    ]));

    pub const ASSIGN_OPS: TokenSet = TokenSet::new(&[
        Eq, PlusEq, MinusEq, StarEq, SlashEq, PercentEq, AmpEq, PipeEq, CaretEq, ShlEq, ShrEq,
    ]);

    /// Statement boundaries used to resynchronize after an error.
    pub const STMT_RECOVERY: TokenSet = TokenSet::new(&[Semicolon, LBrace, RBrace]);

    /// Tokens an expression never swallows while reporting a missing operand.
    pub const EXPR_RECOVERY: TokenSet = TokenSet::new(&[
        Semicolon,
        LBrace,
        RBrace,
        RParen,
        RBracket,
        Comma,
        Colon,
        FunctionPtrClose,
        DotDot,
        Eof,
    ]);

    pub const STMT_KEYWORDS: TokenSet = TokenSet::new(&[
        KwIf, KwWhile, KwDo, KwFor, KwForeach, KwSwitch, KwCase, KwDefault, KwBreak, KwContinue,
        KwReturn,
    ]);
}
