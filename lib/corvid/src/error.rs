//! Error types for the facade crate's own fallible boundaries: the
//! versioned store's cursor invalidation, the writer's own misuse/I/O
//! failures, and the describe traversal's repair of malformed list chains.

use std::io;
use thiserror::Error;

/// Returned when a [`crate::model::Cursor`] is advanced after the
/// [`crate::model::Store`] it was taken from has been mutated.
#[derive(Error, Debug, Clone, Copy, Eq, PartialEq)]
#[error("cursor was invalidated by a store mutation since it was created")]
pub struct BadCursor;

/// Errors the describe traversal can report while walking a dataset.
#[derive(Error, Debug)]
pub enum DescribeError {
    /// A `rdf:first`/`rdf:rest` chain loops back on a node already visited,
    /// which would otherwise traverse forever.
    #[error("list chain at blank node revisits an earlier node, refusing to loop forever")]
    CyclicList,
    /// The writer driven by the traversal failed (I/O error or misuse).
    #[error(transparent)]
    Write(#[from] WriterError),
}

/// Errors a [`crate::writer::PrettyWriter`] can report.
///
/// spec.md §4.H's failure semantics: a sink (here, the underlying
/// [`std::io::Write`]) error aborts the operation and is reported to the
/// caller; internal misuse (`end_anon`/`end_list` with no matching begin,
/// a literal written in predicate position) returns [`WriterError::BadArg`]
/// without emitting anything further.
#[derive(Error, Debug)]
pub enum WriterError {
    /// The underlying sink failed (spec.md's `BAD_WRITE`).
    #[error("write error: {0}")]
    Io(#[from] io::Error),
    /// The caller misused the writer's state machine: an `end_anon`/
    /// `end_list` with nothing open, or a directive emitted for a syntax
    /// that forbids it (spec.md's `BAD_ARG`).
    #[error("invalid writer use: {0}")]
    BadArg(&'static str),
}

impl From<WriterError> for io::Error {
    #[inline]
    fn from(error: WriterError) -> Self {
        match error {
            WriterError::Io(e) => e,
            WriterError::BadArg(msg) => io::Error::new(io::ErrorKind::InvalidInput, msg),
        }
    }
}
