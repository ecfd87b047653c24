use alloc::borrow::Cow;
use core::fmt;

#[cfg(feature = "rich-diagnostics")]
use ariadne::{Color, Config, IndexType, Label, Report, ReportKind, Source};
use owo_colors::OwoColorize;
use yuri_core::Shape;
use yuri_reflect::{ReflectError, SchemaError};

/// A byte range in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Starting position in bytes
    pub start: usize,
    /// Length in bytes
    pub len: usize,
}

impl Span {
    /// Creates a new span
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// End position (start + length)
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// One step on the way from the top-level value to where decoding failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A named field (or `first` / `second` of a pair)
    Field(&'static str),
    /// A key the destination type has no field for
    UnknownField(String),
    /// An element of a list, or an entry of a map
    Index(usize),
}

/// What went wrong in a single parse step
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DecodeErrorKind {
    /// Input ran out while looking for the next token
    UnexpectedEnd {
        /// What we were looking for
        wanted: &'static str,
    },
    /// The next significant character can't start what we wanted
    UnexpectedChar {
        /// The character found
        got: char,
        /// What we were looking for
        wanted: &'static str,
    },
    /// A string never found its closing quote
    UnterminatedString,
    /// A `true`, `false` or `null` literal was misspelled
    InvalidLiteral {
        /// The literal that was expected
        wanted: &'static str,
    },
    /// A number token doesn't parse as the destination type, or is out of its range
    InvalidNumber {
        /// The token as written
        text: String,
        /// The destination type
        target: &'static Shape,
    },
    /// A `char` must be written as a string of exactly one character
    InvalidChar {
        /// The string found instead
        text: String,
    },
    /// A pair's keys must be exactly `first` then `second`
    UnexpectedKey {
        /// The key that was required
        wanted: &'static str,
        /// The key found instead
        got: String,
    },
    /// Something other than whitespace follows the top-level value
    TrailingInput,
    /// Objects, arrays and pairs are nested deeper than the decoder allows
    TooDeep {
        /// How many may be open at once
        limit: usize,
    },
    /// No codec is registered for this type
    UnregisteredType {
        /// The type that has no codec
        shape: &'static Shape,
    },
    /// The destination type has no textual form
    Unsupported {
        /// The offending shape
        shape: &'static Shape,
    },
    /// The destination value could not be written
    Reflect(ReflectError),
}

impl fmt::Display for DecodeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeErrorKind::UnexpectedEnd { wanted } => {
                write!(f, "Unexpected end of input: wanted {}", wanted.red())
            }
            DecodeErrorKind::UnexpectedChar { got, wanted } => write!(
                f,
                "Unexpected character: got '{}', wanted {}",
                got.red(),
                wanted.yellow()
            ),
            DecodeErrorKind::UnterminatedString => write!(f, "Unterminated string"),
            DecodeErrorKind::InvalidLiteral { wanted } => {
                write!(f, "Invalid literal: wanted {}", wanted.yellow())
            }
            DecodeErrorKind::InvalidNumber { text, target } => write!(
                f,
                "Number {} does not fit {}",
                text.red(),
                target.yellow()
            ),
            DecodeErrorKind::InvalidChar { text } => write!(
                f,
                "Expected a single character, got \"{}\"",
                text.red()
            ),
            DecodeErrorKind::UnexpectedKey { wanted, got } => write!(
                f,
                "Unexpected key: got \"{}\", wanted \"{}\"",
                got.red(),
                wanted.green()
            ),
            DecodeErrorKind::TrailingInput => write!(f, "Trailing input after the value"),
            DecodeErrorKind::TooDeep { limit } => {
                write!(f, "Nested more than {} levels deep", limit.red())
            }
            DecodeErrorKind::UnregisteredType { shape } => {
                write!(f, "No codec registered for {}", shape.red())
            }
            DecodeErrorKind::Unsupported { shape } => write!(
                f,
                "{} ({}) has no textual form",
                shape.red(),
                shape.def.kind_name()
            ),
            DecodeErrorKind::Reflect(e) => write!(f, "{e}"),
        }
    }
}

/// A failed parse step: what went wrong, where, and on the way to which field
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    /// What went wrong
    pub kind: DecodeErrorKind,
    /// Where it went wrong, once known
    pub span: Option<Span>,
    /// Innermost segment first
    path: Vec<PathSegment>,
}

impl DecodeError {
    /// Creates an error at a known location
    pub fn new(kind: DecodeErrorKind, span: Span) -> Self {
        Self {
            kind,
            span: Some(span),
            path: Vec::new(),
        }
    }

    /// Fills in the span if the step that failed didn't know it
    pub(crate) fn or_span(mut self, span: Span) -> Self {
        self.span.get_or_insert(span);
        self
    }

    /// Records that the failure happened inside `segment`
    pub(crate) fn within(mut self, segment: PathSegment) -> Self {
        self.path.push(segment);
        self
    }

    /// The path from the top-level value to the failure, outermost first
    pub fn path(&self) -> impl Iterator<Item = &PathSegment> + '_ {
        self.path.iter().rev()
    }

    /// The path rendered as `.field[3].other`
    pub fn path_string(&self) -> String {
        use core::fmt::Write;

        let mut out = String::new();
        for segment in self.path() {
            let _ = match segment {
                PathSegment::Field(name) => write!(out, ".{name}"),
                PathSegment::UnknownField(name) => write!(out, ".{name}"),
                PathSegment::Index(i) => write!(out, "[{i}]"),
            };
        }
        out
    }
}

impl From<ReflectError> for DecodeError {
    fn from(error: ReflectError) -> Self {
        Self {
            kind: DecodeErrorKind::Reflect(error),
            span: None,
            path: Vec::new(),
        }
    }
}

impl From<SchemaError> for DecodeError {
    fn from(error: SchemaError) -> Self {
        ReflectError::Schema(error).into()
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if !self.path.is_empty() {
            write!(f, " (in {})", self.path_string().blue())?;
        }
        Ok(())
    }
}

impl core::error::Error for DecodeError {}

/// A decode error together with the input it happened in
#[derive(Debug)]
pub struct JsonError<'input> {
    /// The input being decoded
    pub input: Cow<'input, str>,
    /// The step that failed
    pub error: DecodeError,
    /// Name of the input in rendered reports
    pub source_id: &'static str,
}

impl<'input> JsonError<'input> {
    pub(crate) fn new(input: &'input str, error: DecodeError) -> Self {
        Self {
            input: Cow::Borrowed(input),
            error,
            source_id: "json",
        }
    }

    /// Converts the error into an owned error.
    pub fn into_owned(self) -> JsonError<'static> {
        JsonError {
            input: Cow::Owned(self.input.into_owned()),
            error: self.error,
            source_id: self.source_id,
        }
    }

    /// Sets the source ID used in rendered reports
    pub fn with_source_id(mut self, source_id: &'static str) -> Self {
        self.source_id = source_id;
        self
    }

    /// What went wrong
    pub fn kind(&self) -> &DecodeErrorKind {
        &self.error.kind
    }

    /// Where it went wrong. Errors without a location point at the end of input.
    pub fn span(&self) -> Span {
        self.error
            .span
            .unwrap_or_else(|| Span::new(self.input.len(), 0))
    }
}

#[cfg(not(feature = "rich-diagnostics"))]
impl fmt::Display for JsonError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.error, self.span().start)
    }
}

#[cfg(feature = "rich-diagnostics")]
impl fmt::Display for JsonError<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source_id = self.source_id;
        let span = self.span();
        let range = span.start..span.end();

        let report = Report::build(ReportKind::Error, (source_id, range.clone()))
            .with_config(Config::new().with_index_type(IndexType::Byte))
            .with_message(&self.error)
            .with_label(
                Label::new((source_id, range))
                    .with_message(&self.error.kind)
                    .with_color(Color::Red),
            )
            .finish();

        let source = Source::from(self.input.as_ref());
        let mut out = Vec::new();
        if report.write((source_id, &source), &mut out).is_err() {
            return write!(f, "{} at byte {}", self.error, span.start);
        }
        f.write_str(&String::from_utf8_lossy(&out))
    }
}

impl core::error::Error for JsonError<'_> {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Why a value could not be encoded
#[derive(Debug)]
#[non_exhaustive]
pub enum EncodeError {
    /// No codec is registered for this type
    UnregisteredType {
        /// The type that has no codec
        shape: &'static Shape,
    },
    /// The value's shape has no textual form
    Unsupported {
        /// The offending shape
        shape: &'static Shape,
    },
    /// Reading the value failed
    Reflect(ReflectError),
    /// The writer failed
    Io(std::io::Error),
}

impl From<ReflectError> for EncodeError {
    fn from(error: ReflectError) -> Self {
        EncodeError::Reflect(error)
    }
}

impl From<SchemaError> for EncodeError {
    fn from(error: SchemaError) -> Self {
        EncodeError::Reflect(error.into())
    }
}

impl From<std::io::Error> for EncodeError {
    fn from(error: std::io::Error) -> Self {
        EncodeError::Io(error)
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::UnregisteredType { shape } => {
                write!(f, "No codec registered for {}", shape.red())
            }
            EncodeError::Unsupported { shape } => write!(
                f,
                "{} ({}) has no textual form",
                shape.red(),
                shape.def.kind_name()
            ),
            EncodeError::Reflect(e) => write!(f, "{e}"),
            EncodeError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl core::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            EncodeError::Reflect(e) => Some(e),
            EncodeError::Io(e) => Some(e),
            _ => None,
        }
    }
}
