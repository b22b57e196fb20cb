//! Sigil Error Handling
//!
//! Every failure in the pipeline is a [`SigilError`]. Reader failures carry a
//! [`SyntaxErrorKind`] plus the span and source they occurred in, so the CLI
//! can hand them to `miette` and get a labeled snippet for free. Expansion
//! failures are message-only and built with [`err_msg!`](crate::err_msg).
//!
//! An unknown macro name is never an error: the expander reads such a list
//! as a plain call.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

use crate::ast::Span;

pub type SourceArc = Arc<NamedSource<String>>;

pub type Result<T, E = SigilError> = std::result::Result<T, E>;

// ============================================================================
// CLASSIFICATION
// ============================================================================

/// Type-safe classification of a [`SigilError`], one per pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Reader failures: unexpected characters, unterminated forms
    Syntax,
    /// Macro failures and the expansion depth limit
    Expansion,
    /// Reading input files or writing output from the command line
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Syntax => "syntax",
            ErrorType::Expansion => "expansion",
            ErrorType::Io => "io",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The construct the reader was inside when input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    /// A list or an array
    Expression,
    Object,
    String,
}

impl fmt::Display for Construct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Construct::Expression => f.write_str("expression"),
            Construct::Object => f.write_str("object"),
            Construct::String => f.write_str("string"),
        }
    }
}

/// What went wrong while reading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    UnexpectedCharacter(char),
    UnexpectedEnd(Construct),
    MissingElement(&'static str),
}

impl SyntaxErrorKind {
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedCharacter(_) => "unexpected_character",
            SyntaxErrorKind::UnexpectedEnd(_) => "unexpected_end",
            SyntaxErrorKind::MissingElement(_) => "missing_element",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            SyntaxErrorKind::UnexpectedCharacter(_) => "unexpected character",
            SyntaxErrorKind::UnexpectedEnd(_) => "input ends here",
            SyntaxErrorKind::MissingElement(_) => "missing here",
        }
    }
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::UnexpectedCharacter(c) => write!(f, "unexpected character: {}", c),
            SyntaxErrorKind::UnexpectedEnd(construct) => {
                write!(f, "unexpected end of {}", construct)
            }
            SyntaxErrorKind::MissingElement(what) => write!(f, "expected {}", what),
        }
    }
}

// ============================================================================
// CONTEXT
// ============================================================================

/// Minimal error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The source this error points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span for this error (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    /// Returns an empty error context (no source, span, or help).
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a context with both source and span.
    pub fn with_source_and_span(source: SourceArc, span: Span) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: None,
        }
    }
}

// ============================================================================
// ERROR TYPE
// ============================================================================

/// Unified error type for all Sigil failure modes.
#[derive(Debug, Error)]
pub enum SigilError {
    #[error("Syntax error: {kind}")]
    Syntax {
        kind: SyntaxErrorKind,
        ctx: ErrorContext,
    },
    #[error("Expansion error: {message}")]
    Expansion { message: String, ctx: ErrorContext },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl SigilError {
    pub fn syntax(kind: SyntaxErrorKind, source: SourceArc, span: Span) -> Self {
        SigilError::Syntax {
            kind,
            ctx: ErrorContext::with_source_and_span(source, span),
        }
    }

    /// An input/output failure, keeping the underlying error as the source.
    pub fn io(
        message: impl Into<String>,
        err: impl Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    ) -> Self {
        SigilError::Io {
            message: message.into(),
            ctx: ErrorContext::none(),
            source: Some(err.into()),
        }
    }

    /// Attaches a help message.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.ctx_mut().help = Some(help.into());
        self
    }

    fn ctx(&self) -> &ErrorContext {
        match self {
            SigilError::Syntax { ctx, .. } => ctx,
            SigilError::Expansion { ctx, .. } => ctx,
            SigilError::Io { ctx, .. } => ctx,
        }
    }

    fn ctx_mut(&mut self) -> &mut ErrorContext {
        match self {
            SigilError::Syntax { ctx, .. } => ctx,
            SigilError::Expansion { ctx, .. } => ctx,
            SigilError::Io { ctx, .. } => ctx,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            SigilError::Syntax { .. } => ErrorType::Syntax,
            SigilError::Expansion { .. } => ErrorType::Expansion,
            SigilError::Io { .. } => ErrorType::Io,
        }
    }

    /// The reader failure kind, for syntax errors.
    pub fn syntax_kind(&self) -> Option<&SyntaxErrorKind> {
        match self {
            SigilError::Syntax { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        self.ctx().span
    }

    fn error_code(&self) -> String {
        match self {
            SigilError::Syntax { kind, .. } => format!("sigil::read::{}", kind.code_suffix()),
            SigilError::Expansion { .. } => "sigil::expand".to_string(),
            SigilError::Io { .. } => "sigil::io".to_string(),
        }
    }
}

impl Diagnostic for SigilError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.error_code()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.ctx().span?;
        let text = match self {
            SigilError::Syntax { kind, .. } => kind.label().to_string(),
            SigilError::Expansion { message, .. } => message.clone(),
            SigilError::Io { message, .. } => message.clone(),
        };
        // End-of-input spans are zero-width at `source.len()`.
        Some(Box::new(std::iter::once(LabeledSpan::new(
            Some(text),
            span.start,
            span.len(),
        ))))
    }
}

/// Constructs a [`SigilError`] variant with a formatted message and no context.
///
/// ```rust
/// use sigil::{err_msg, ErrorType};
/// let err = err_msg!(Expansion, "macro '{}' failed", "quote");
/// assert_eq!(err.error_type(), ErrorType::Expansion);
/// assert_eq!(err.to_string(), "Expansion error: macro 'quote' failed");
/// ```
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $($arg:tt)+) => {
        $crate::SigilError::$variant {
            message: format!($($arg)+),
            ctx: $crate::ErrorContext::none(),
        }
    };
}

/// Converts a source string into a named source for error contexts.
pub fn to_error_source(name: impl AsRef<str>, source: impl Into<String>) -> SourceArc {
    Arc::new(NamedSource::new(name, source.into()))
}

/// Prints a SigilError with full miette diagnostics to stderr.
pub fn print_error(error: SigilError) {
    let report = miette::Report::new(error);
    eprintln!("{report:?}");
}
