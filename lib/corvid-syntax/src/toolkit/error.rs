use std::error::Error;
use std::ops::Range;
use std::{fmt, io};

/// A position in a text i.e. a `line` number starting from 0, a `column` number starting from 0 (in number of code points) and a global file `offset` starting from 0 (in number of bytes).
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct TextPosition {
    pub line: u64,
    pub column: u64,
    pub offset: u64,
}

/// Which bucket of the error taxonomy a [`TurtleSyntaxError`] falls into.
///
/// `BadSyntax`, `BadText` and `BadLabel` are non-fatal in lax mode (the
/// parser skips to the next newline and resumes); the rest are always
/// fatal.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub enum TurtleSyntaxErrorKind {
    /// A grammar violation.
    #[default]
    BadSyntax,
    /// An invalid UTF-8 byte sequence.
    BadText,
    /// A blank-node label clashes with a generated ID.
    BadLabel,
    /// The recursive-descent stack grew past its limit.
    BadStack,
    /// Mixed `b<n>` / `B<n>` blank IDs were used in the same document.
    IdClash,
}

/// An error in the syntax of the parsed file.
///
/// It is composed of a message, a byte range in the input and a
/// [`TurtleSyntaxErrorKind`] tag.
#[derive(Debug)]
pub struct TurtleSyntaxError {
    pub(super) location: Range<TextPosition>,
    pub(super) message: String,
    pub(super) kind: TurtleSyntaxErrorKind,
}

impl TurtleSyntaxError {
    pub(crate) fn new(location: Range<TextPosition>, message: impl Into<String>) -> Self {
        Self::with_kind(location, TurtleSyntaxErrorKind::default(), message)
    }

    pub(crate) fn with_kind(
        location: Range<TextPosition>,
        kind: TurtleSyntaxErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            location,
            kind,
            message: message.into(),
        }
    }

    /// The location of the error inside of the file.
    #[inline]
    pub fn location(&self) -> Range<TextPosition> {
        self.location.clone()
    }

    /// Which bucket of spec.md §7's error taxonomy this error belongs to.
    #[inline]
    pub fn kind(&self) -> TurtleSyntaxErrorKind {
        self.kind
    }

    /// The error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for TurtleSyntaxError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.location.start.offset + 1 >= self.location.end.offset {
            write!(
                f,
                "Parser error at line {} column {}: {}",
                self.location.start.line + 1,
                self.location.start.column + 1,
                self.message
            )
        } else if self.location.start.line == self.location.end.line {
            write!(
                f,
                "Parser error between at line {} between columns {} and column {}: {}",
                self.location.start.line + 1,
                self.location.start.column + 1,
                self.location.end.column + 1,
                self.message
            )
        } else {
            write!(
                f,
                "Parser error between line {} column {} and line {} column {}: {}",
                self.location.start.line + 1,
                self.location.start.column + 1,
                self.location.end.line + 1,
                self.location.end.column + 1,
                self.message
            )
        }
    }
}

impl Error for TurtleSyntaxError {}

impl From<TurtleSyntaxError> for io::Error {
    #[inline]
    fn from(error: TurtleSyntaxError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, error)
    }
}

/// A parsing error.
///
/// It is the union of [`TurtleSyntaxError`] and [`std::io::Error`].
#[derive(Debug)]
pub enum TurtleParseError {
    /// I/O error during parsing (file not found...).
    Io(io::Error),
    /// An error in the file syntax.
    Syntax(TurtleSyntaxError),
}

impl fmt::Display for TurtleParseError {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => e.fmt(f),
            Self::Syntax(e) => e.fmt(f),
        }
    }
}

impl Error for TurtleParseError {
    #[inline]
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(match self {
            Self::Io(e) => e,
            Self::Syntax(e) => e,
        })
    }
}

impl From<TurtleSyntaxError> for TurtleParseError {
    #[inline]
    fn from(error: TurtleSyntaxError) -> Self {
        Self::Syntax(error)
    }
}

impl From<io::Error> for TurtleParseError {
    #[inline]
    fn from(error: io::Error) -> Self {
        Self::Io(error)
    }
}

impl From<TurtleParseError> for io::Error {
    #[inline]
    fn from(error: TurtleParseError) -> Self {
        match error {
            TurtleParseError::Syntax(e) => e.into(),
            TurtleParseError::Io(e) => e,
        }
    }
}
