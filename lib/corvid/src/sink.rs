//! The statement event sink.
//!
//! spec.md's §9 design notes flag the C original's dynamic-dispatch sink
//! (one `emit(event_kind, ...)` function pointer fanning out on a tag) as
//! exactly the kind of indirection a language with real traits should
//! replace by "a trait/interface with methods for each event kind". This
//! is that trait: one method per event kind from §6's 7-tuple statement
//! event (`BASE`, `PREFIX`, `STATEMENT`, `END`), with the 7th element of
//! that tuple (the source caret) and the `ANON_S`/`LIST_O`/... bits a
//! consumer needs to reconstruct nesting both folded into
//! [`StatementFlags`].

use corvid_model::{NamedOrBlankNodeRef, QuadRef};
use corvid_syntax::TextPosition;

/// An optional source position attached to a statement (spec.md §3): a
/// document name and a 1-based line/column.
///
/// A parser populates this from its own [`TextPosition`] (which counts
/// lines and columns from 0); the describe traversal over an in-memory
/// store has no source document and never sets one.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SourceCaret {
    pub document: Option<String>,
    pub line: u64,
    pub column: u64,
}

impl SourceCaret {
    /// Builds a caret from a parser's 0-based [`TextPosition`], converting
    /// to the 1-based line/column spec.md §3 specifies.
    pub fn from_position(document: Option<String>, position: TextPosition) -> Self {
        Self {
            document,
            line: position.line + 1,
            column: position.column + 1,
        }
    }
}

/// Which production shape produced a [`StatementSink::statement`] call.
///
/// Mirrors spec.md §3's statement-flag vocabulary. A parser sets these so
/// a sink (the describe/writer pipeline, or a caller's own collector) does
/// not need to re-detect blank-node/list structure from the triples alone.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct StatementFlags {
    /// The subject position was an anonymous `[...]` blank node.
    pub anon_subject: bool,
    /// The object position was an anonymous `[...]` blank node.
    pub anon_object: bool,
    /// The subject position opens or continues an `rdf:first`/`rdf:rest` list.
    pub list_subject: bool,
    /// The object position opens or continues an `rdf:first`/`rdf:rest` list.
    pub list_object: bool,
    /// This statement is the empty-collection shortcut (`()` as a term).
    pub empty_subject: bool,
    /// This statement's object is the empty-collection shortcut (`()`).
    pub empty_object: bool,
    /// Where this statement began in the source document, if the driver
    /// has that information.
    pub caret: Option<SourceCaret>,
}

/// Consumes the event stream a [`crate::model`] traversal or a
/// `corvid-syntax` parser produces: a base IRI, zero or more prefix
/// bindings, zero or more statements (each carrying [`StatementFlags`]),
/// and a final end-of-stream notification.
///
/// Implementors report `Err` to abort the stream; the driver (parser or
/// describe traversal) stops and propagates that error rather than
/// continuing to call other methods.
pub trait StatementSink {
    /// The error type a sink can fail with (e.g. the underlying writer's
    /// `io::Error`).
    type Error;

    /// A `@base`/`BASE` directive was read or should be (re-)emitted.
    fn base(&mut self, iri: &str) -> Result<(), Self::Error>;

    /// A `@prefix`/`PREFIX` binding was read or should be (re-)emitted.
    fn prefix(&mut self, name: &str, iri: &str) -> Result<(), Self::Error>;

    /// One statement, in whatever order-of-discovery the driver walks in.
    fn statement(&mut self, quad: QuadRef<'_>, flags: StatementFlags) -> Result<(), Self::Error>;

    /// The stream is complete; no further calls follow.
    fn end(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// A blank node's own `END` event (spec.md §6): all statements for
    /// which `node` was the subject have now been emitted, so a consumer
    /// tracking open `[...]`/`(...)` nesting by hand can close it here.
    /// The flag-based flat pipeline never needs this (a sink with no
    /// notion of nesting can ignore it); the describe traversal instead
    /// drives a writer's explicit `begin_*`/`end_*` methods directly and
    /// does not go through this event at all.
    fn end_anon(&mut self, node: NamedOrBlankNodeRef<'_>) -> Result<(), Self::Error> {
        let _ = node;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_from_position_is_one_based() {
        let position = TextPosition {
            line: 4,
            column: 9,
            offset: 120,
        };
        let caret = SourceCaret::from_position(Some("doc.ttl".to_owned()), position);
        assert_eq!(caret.document.as_deref(), Some("doc.ttl"));
        assert_eq!(caret.line, 5);
        assert_eq!(caret.column, 10);
    }

    #[test]
    fn statement_flags_default_has_no_caret() {
        assert_eq!(StatementFlags::default().caret, None);
    }
}
