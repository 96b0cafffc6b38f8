use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one. Unclosed delimiters come first because everything
/// after them tends to cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Cascade sources
    UnclosedDelimiter,

    // Lexical errors
    UnterminatedString,
    UnterminatedChar,
    UnterminatedHeredoc,
    UnterminatedComment,
    IllegalCharacter,

    // User omitted something required
    ExpectedExpression,
    ExpectedToken,
    ExpectedName,
    ExpectedType,

    // User wrote something that does not belong
    NoViableAlternative,
    UnexpectedToken,

    // Resource limits
    NestingTooDeep,
    Truncated,
}

/// Error families exposed to consumers that only care about the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCategory {
    Lex,
    Syntax,
}

impl DiagnosticKind {
    pub fn category(&self) -> DiagnosticCategory {
        match self {
            Self::UnterminatedString
            | Self::UnterminatedChar
            | Self::UnterminatedHeredoc
            | Self::UnterminatedComment
            | Self::IllegalCharacter => DiagnosticCategory::Lex,
            Self::UnclosedDelimiter
            | Self::ExpectedExpression
            | Self::ExpectedToken
            | Self::ExpectedName
            | Self::ExpectedType
            | Self::NoViableAlternative
            | Self::UnexpectedToken
            | Self::NestingTooDeep
            | Self::Truncated => DiagnosticCategory::Syntax,
        }
    }

    pub fn default_severity(&self) -> Severity {
        match self {
            Self::Truncated => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Lower discriminant wins.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn is_structural_error(&self) -> bool {
        matches!(self, Self::UnclosedDelimiter)
    }

    /// Something required is missing. Suppresses structural errors at the
    /// same position.
    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedExpression | Self::ExpectedToken | Self::ExpectedName | Self::ExpectedType
        )
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedDelimiter => "unclosed delimiter",
            Self::UnterminatedString => "unterminated string literal",
            Self::UnterminatedChar => "unterminated character literal",
            Self::UnterminatedHeredoc => "unterminated heredoc",
            Self::UnterminatedComment => "unterminated block comment",
            Self::IllegalCharacter => "illegal character",
            Self::ExpectedExpression => "expected an expression",
            Self::ExpectedToken => "missing token",
            Self::ExpectedName => "expected a name",
            Self::ExpectedType => "expected a type",
            Self::NoViableAlternative => "no viable alternative",
            Self::UnexpectedToken => "unexpected token",
            Self::NestingTooDeep => "nesting is too deep",
            Self::Truncated => "parsing stopped early; the rest of the file was skipped",
        }
    }

    /// Template for a custom message, `{}` is replaced with the detail.
    fn custom_message(&self) -> String {
        match self {
            Self::ExpectedToken => "expected {}".to_string(),
            Self::IllegalCharacter => "illegal character `{}`".to_string(),
            Self::UnclosedDelimiter => "unclosed `{}`".to_string(),
            Self::UnexpectedToken => "{}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` gives the fallback message, `Some(detail)` fills the template.
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub range: TextRange,
    pub message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

/// A single lexical or syntax problem, positioned by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub kind: DiagnosticKind,
    /// The range shown to the user.
    pub range: TextRange,
    pub message: String,
    pub related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn category(&self) -> DiagnosticCategory {
        self.kind.category()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
