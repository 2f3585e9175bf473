use rowan::{TextRange, TextSize};

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// Unclosed delimiters come first because everything after them is noise.
/// Warnings sit at the end: they never fail compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Delimiters left open
    UnclosedBracket,
    UnclosedParen,
    UnterminatedString,

    // Something required is missing
    EmptySelector,
    ExpectedSelector,
    ExpectedAttributeName,
    ExpectedAttributeValue,
    ExpectedClassName,
    ExpectedIdName,
    ExpectedPseudoName,

    // Something present is wrong
    UnexpectedToken,
    InvalidPseudoArgument,
    UnbalancedXPath,
    InvalidRegex,
    NestingTooDeep,
    UnterminatedOutput,

    // Tolerated, compiled with a documented fallback
    DanglingCombinator,
    RepeatedCombinator,
    UnknownPseudoClass,
    UnsupportedNegation,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DanglingCombinator
            | Self::RepeatedCombinator
            | Self::UnknownPseudoClass
            | Self::UnsupportedNegation => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Whether this kind suppresses `other` when both start at the same offset.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedAttributeValue => Some(r#"e.g., `[type="text"]` or `[type=text]`"#),
            Self::DanglingCombinator => {
                Some("the combinator has no compound on one side and is ignored")
            }
            Self::RepeatedCombinator => {
                Some("only the first combinator between two compounds is used")
            }
            Self::UnsupportedNegation => {
                Some("`:not()` only negates id, class and attribute conditions")
            }
            Self::InvalidRegex => Some("delimited patterns look like `/body/flags`"),
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBracket => "missing closing `]`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnterminatedString => "unterminated string",

            Self::EmptySelector => "selector is empty",
            Self::ExpectedSelector => "expected a selector",
            Self::ExpectedAttributeName => "expected attribute name",
            Self::ExpectedAttributeValue => "expected attribute value",
            Self::ExpectedClassName => "expected class name after `.`",
            Self::ExpectedIdName => "expected id after `#`",
            Self::ExpectedPseudoName => "expected pseudo-class name",

            Self::UnexpectedToken => "unexpected token",
            Self::InvalidPseudoArgument => "invalid pseudo-class argument",
            Self::UnbalancedXPath => "unbalanced XPath expression",
            Self::InvalidRegex => "invalid regular expression",
            Self::NestingTooDeep => "selector nested too deeply",
            Self::UnterminatedOutput => "compiled XPath is unterminated",

            Self::DanglingCombinator => "dangling combinator",
            Self::RepeatedCombinator => "repeated combinator",
            Self::UnknownPseudoClass => "unknown pseudo-class",
            Self::UnsupportedNegation => "unsupported negation",
        }
    }

    /// Template for custom messages. `{}` is replaced by caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownPseudoClass => "unknown pseudo-class `:{}`".to_string(),
            Self::InvalidPseudoArgument => "invalid argument for `:{}`".to_string(),
            Self::UnexpectedToken => "unexpected {}".to_string(),
            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` renders the fallback message, `Some(detail)` the custom template.
    pub fn message(&self, detail: Option<&str>) -> String {
        match detail {
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
pub struct Fix {
    pub(crate) replacement: String,
    pub(crate) description: String,
}

impl Fix {
    pub fn new(replacement: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            replacement: replacement.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) fix: Option<Fix>,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        let hints = kind
            .default_hint()
            .map(|h| vec![h.to_string()])
            .unwrap_or_default();
        Self {
            kind,
            range,
            message: message.into(),
            fix: None,
            related: Vec::new(),
            hints,
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[String] {
        &self.hints
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }

    pub(crate) fn shifted(mut self, offset: TextSize) -> Self {
        self.range = shift(self.range, offset);
        for related in &mut self.related {
            related.range = shift(related.range, offset);
        }
        self
    }
}

fn shift(range: TextRange, offset: TextSize) -> TextRange {
    TextRange::new(range.start() + offset, range.end() + offset)
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
        if let Some(fix) = &self.fix {
            write!(f, " (fix: {})", fix.description)?;
        }
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
