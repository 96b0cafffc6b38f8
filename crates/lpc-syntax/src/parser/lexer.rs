//! Lexer for LPC.
//!
//! Produces span-based tokens without storing text. Text is sliced from the
//! source only when needed.
//!
//! ## Error handling
//!
//! Lexing never aborts. Unterminated literals become a single `Error` token
//! covering what was consumed, consecutive illegal characters are coalesced
//! into one `Error` token, and each gets one diagnostic.

use logos::{Lexer, Logos};
use rowan::{TextRange, TextSize};
use std::ops::Range;

use super::kinds::{Channel, TokenKind};
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Zero-copy token: kind, byte span and position. Text is retrieved through
/// [`Token::text`] or the owning [`TokenStream`](super::TokenStream).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
    pub channel: Channel,
    /// 1-based line of the first character.
    pub line: u32,
    /// 0-based column of the first character, in chars.
    pub column: u32,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange, line: u32, column: u32) -> Self {
        Self {
            kind,
            span,
            channel: kind.channel(),
            line,
            column,
        }
    }

    #[inline]
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        token_text(source, self)
    }

    #[inline]
    pub fn start(&self) -> TextSize {
        self.span.start()
    }

    #[inline]
    pub fn end(&self) -> TextSize {
        self.span.end()
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

/// Reasons logos callbacks reject input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    #[default]
    IllegalCharacter,
    UnterminatedString,
    UnterminatedChar,
    UnterminatedHeredoc,
    UnterminatedComment,
}

impl LexErrorKind {
    fn diagnostic(self) -> DiagnosticKind {
        match self {
            Self::IllegalCharacter => DiagnosticKind::IllegalCharacter,
            Self::UnterminatedString => DiagnosticKind::UnterminatedString,
            Self::UnterminatedChar => DiagnosticKind::UnterminatedChar,
            Self::UnterminatedHeredoc => DiagnosticKind::UnterminatedHeredoc,
            Self::UnterminatedComment => DiagnosticKind::UnterminatedComment,
        }
    }
}

/// Output of [`tokenize`]: every token plus the lexical diagnostics.
#[derive(Debug, Clone)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Tracks line/column while tokens are emitted in order.
struct Position {
    line: u32,
    column: u32,
}

impl Position {
    fn advance_over(&mut self, text: &str) {
        match text.rfind('\n') {
            Some(last) => {
                self.line += text.matches('\n').count() as u32;
                self.column = text[last + 1..].chars().count() as u32;
            }
            None => self.column += text.chars().count() as u32,
        }
    }
}

struct TokenSink<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    position: Position,
}

impl TokenSink<'_> {
    fn push(&mut self, kind: TokenKind, span: Range<usize>) {
        let token = Token::new(
            kind,
            range_to_text_range(span.clone()),
            self.position.line,
            self.position.column,
        );
        self.position.advance_over(&self.source[span]);
        self.tokens.push(token);
    }
}

/// Tokenizes source into span-based tokens terminated by an `Eof` token.
///
/// The union of all token spans equals the whole source text, in order,
/// without gaps or overlaps.
#[tracing::instrument(skip_all, fields(len = source.len()))]
pub fn tokenize(source: &str) -> Lexed {
    let mut sink = TokenSink {
        source,
        tokens: Vec::with_capacity(source.len() / 3),
        position: Position { line: 1, column: 0 },
    };
    let mut diagnostics = Diagnostics::new();
    let mut lexer = TokenKind::lexer(source);
    let mut garbage_start: Option<usize> = None;

    loop {
        let next = lexer.next();
        let span = lexer.span();

        if let Some(start) = garbage_start
            && !matches!(next, Some(Err(LexErrorKind::IllegalCharacter)))
        {
            let end = match next {
                Some(_) => span.start,
                None => source.len(),
            };
            flush_garbage(&mut sink, &mut diagnostics, start..end);
            garbage_start = None;
        }

        match next {
            // `(::name` opens a parenthesized inherited call, not a function pointer.
            Some(Ok(TokenKind::FunctionPtrOpen)) if source[span.end..].starts_with(':') => {
                lexer.bump(1);
                sink.push(TokenKind::LParen, span.start..span.start + 1);
                sink.push(TokenKind::ColonColon, span.start + 1..span.end + 1);
            }
            Some(Ok(kind)) => sink.push(kind, span),
            Some(Err(LexErrorKind::IllegalCharacter)) => {
                garbage_start.get_or_insert(span.start);
            }
            Some(Err(err)) => {
                diagnostics
                    .report(err.diagnostic(), range_to_text_range(span.clone()))
                    .emit();
                sink.push(TokenKind::Error, span);
            }
            None => break,
        }
    }

    let eof = TextSize::from(source.len() as u32);
    let (line, column) = (sink.position.line, sink.position.column);
    sink.tokens
        .push(Token::new(TokenKind::Eof, TextRange::empty(eof), line, column));

    tracing::trace!(tokens = sink.tokens.len(), errors = diagnostics.len(), "lexed");
    Lexed {
        tokens: sink.tokens,
        diagnostics,
    }
}

fn flush_garbage(sink: &mut TokenSink<'_>, diagnostics: &mut Diagnostics, span: Range<usize>) {
    let text = &sink.source[span.clone()];
    diagnostics
        .report(DiagnosticKind::IllegalCharacter, range_to_text_range(span.clone()))
        .message(text)
        .emit();
    sink.push(TokenKind::Error, span);
}

/// Tokens only, diagnostics dropped.
pub fn lex(source: &str) -> Vec<Token> {
    tokenize(source).tokens
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'q>(source: &'q str, token: &Token) -> &'q str {
    &source[std::ops::Range::<usize>::from(token.span)]
}

/// Body of a heredoc token: everything between the opener line and the
/// closing marker line. Returns the input unchanged for other text.
pub fn heredoc_body(text: &str) -> &str {
    let (Some(first), Some(last)) = (text.find('\n'), text.rfind('\n')) else {
        return text;
    };
    if first == last {
        return "";
    }
    &text[first + 1..last + 1]
}

pub(super) fn unterminated_string(_: &mut Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::UnterminatedString)
}

pub(super) fn unterminated_char(_: &mut Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    Err(LexErrorKind::UnterminatedChar)
}

/// Consumes a block comment body. Without `*/` the comment runs to the end
/// of the input.
pub(super) fn block_comment(lex: &mut Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    match lex.remainder().find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Ok(())
        }
        None => {
            lex.bump(lex.remainder().len());
            Err(LexErrorKind::UnterminatedComment)
        }
    }
}

/// Consumes the rest of a preprocessor line, following `\` continuations.
pub(super) fn directive(lex: &mut Lexer<TokenKind>) {
    let rest = lex.remainder();
    let mut end = 0;
    loop {
        let line_end = rest[end..].find('\n').map_or(rest.len(), |i| end + i);
        let continued = rest[..line_end].trim_end_matches('\r').ends_with('\\')
            || (line_end == 0 && lex.slice().ends_with('\\'));
        if continued && line_end < rest.len() {
            end = line_end + 1;
            continue;
        }
        end = line_end;
        break;
    }
    lex.bump(end);
}

/// Scans a heredoc after its `@MARK` / `@@MARK` opener.
///
/// The opener must end its line. The body runs verbatim until a line holding
/// nothing but `MARK` (or `MARK@`) apart from surrounding whitespace; the
/// `@` belongs to the token. When no closing line exists only the opener is
/// consumed.
pub(super) fn heredoc(lex: &mut Lexer<TokenKind>) -> Result<(), LexErrorKind> {
    let marker = lex.slice().trim_start_matches('@');
    let rest = lex.remainder();

    let Some(first_newline) = rest.find('\n') else {
        return Err(LexErrorKind::UnterminatedHeredoc);
    };
    if !rest[..first_newline].trim().is_empty() {
        return Err(LexErrorKind::UnterminatedHeredoc);
    }

    let mut offset = first_newline + 1;
    while offset <= rest.len() {
        let line_end = rest[offset..].find('\n').map_or(rest.len(), |i| offset + i);
        let line = &rest[offset..line_end];
        let trimmed = line.trim_start();

        if let Some(after) = trimmed.strip_prefix(marker) {
            let explicit = after.strip_prefix('@');
            if explicit.unwrap_or(after).trim().is_empty() {
                let indent = line.len() - trimmed.len();
                let close = offset + indent + marker.len() + usize::from(explicit.is_some());
                lex.bump(close);
                return Ok(());
            }
        }

        if line_end == rest.len() {
            break;
        }
        offset = line_end + 1;
    }

    Err(LexErrorKind::UnterminatedHeredoc)
}
