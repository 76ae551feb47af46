//! The pretty-printer / writer (spec.md §4.H): a stateful output state
//! machine that turns a statement stream into canonical N-Triples,
//! N-Quads, Turtle or TriG text.
//!
//! `corvid-syntax`'s flat serializers (`TurtleSerializer` & co.) already
//! give every quad its own call and already abbreviate `rdf:type` to `a`,
//! group runs that share a subject/predicate with `;`/`,`, inline bare
//! booleans/numbers, and resolve prefixes — exactly spec.md's "direct
//! pipeline" (bytes → G → event stream → H → bytes). What they cannot do
//! on a flat per-quad call is look *inside* a blank node or list: that
//! needs a traversal with whole-graph knowledge, which is
//! [`crate::describe`]. This module is the writer half that traversal
//! drives: on top of the same separator/abbreviation/escaping vocabulary,
//! it adds explicit `begin_anon`/`end_anon` and `begin_list`/`end_list`
//! primitives so a caller that already knows the shape of a blank node or
//! a collection can emit `[ ... ]`/`( ... )` instead of a labelled
//! `_:bN`.

use crate::error::WriterError;
use crate::sink::{StatementFlags, StatementSink};
use corvid_model::vocab::{rdf, xsd};
use corvid_model::{
    GraphNameRef, LiteralRef, NamedNodeRef, NamedOrBlankNode, NamedOrBlankNodeRef, QuadRef, TermRef,
};
use corvid_numeric::{Decimal, Double};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::str::FromStr;

/// Which of the four Turtle-family syntaxes a [`PrettyWriter`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Syntax {
    NTriples,
    NQuads,
    #[default]
    Turtle,
    TriG,
}

impl Syntax {
    /// Auto-detects a syntax from a file extension, per spec.md §6.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Some(match ext {
            "nt" => Self::NTriples,
            "nq" => Self::NQuads,
            "ttl" => Self::Turtle,
            "trig" => Self::TriG,
            _ => return None,
        })
    }

    #[must_use]
    pub fn supports_graphs(self) -> bool {
        matches!(self, Self::NQuads | Self::TriG)
    }

    /// N-Triples/N-Quads forbid `@base`/`@prefix` directives outright;
    /// the writer silently updates its own environment instead of
    /// emitting them (spec.md §4.H "Base & prefix directives").
    #[must_use]
    pub fn supports_directives(self) -> bool {
        matches!(self, Self::Turtle | Self::TriG)
    }

    #[must_use]
    pub fn supports_abbreviation(self) -> bool {
        matches!(self, Self::Turtle | Self::TriG)
    }
}

/// A [`PrettyWriter`] under construction: syntax, base/root IRIs, the
/// prefix environment, and the ASCII-output flag, following the
/// `TurtleSerializer::with_prefix().with_base_iri().for_writer(...)`
/// builder shape `corvid-syntax` already uses.
#[derive(Debug, Clone)]
#[must_use]
pub struct PrettyPrinter {
    syntax: Syntax,
    ascii_output: bool,
    base: Option<String>,
    root: Option<String>,
    prefixes: BTreeMap<String, String>,
}

impl PrettyPrinter {
    pub fn new(syntax: Syntax) -> Self {
        Self {
            syntax,
            ascii_output: false,
            base: None,
            root: None,
            prefixes: BTreeMap::new(),
        }
    }

    /// ASCII-only output: non-ASCII code points are escaped as
    /// `\uXXXX`/`\UXXXXXXXX` rather than emitted as raw UTF-8
    /// (spec.md §4.H "Escaping").
    pub fn ascii_output(mut self) -> Self {
        self.ascii_output = true;
        self
    }

    pub fn with_base_iri(mut self, base_iri: impl Into<String>) -> Self {
        self.base = Some(base_iri.into());
        self
    }

    /// Bounds relativization: no URI the writer emits will ever be
    /// rendered as a reference that resolves outside of `root`
    /// (spec.md §4.D "Relativize").
    pub fn with_root_iri(mut self, root_iri: impl Into<String>) -> Self {
        self.root = Some(root_iri.into());
        self
    }

    pub fn with_prefix(mut self, prefix_name: impl Into<String>, prefix_iri: impl Into<String>) -> Self {
        self.prefixes.insert(prefix_iri.into(), prefix_name.into());
        self
    }

    pub fn for_writer<W: Write>(self, out: W) -> PrettyWriter<W> {
        PrettyWriter {
            out,
            syntax: self.syntax,
            ascii_output: self.ascii_output,
            base: self.base,
            root: self.root,
            prefixes: self.prefixes,
            prelude_written: false,
            frames: vec![Frame::default()],
            graph: None,
            current_flat_subject: None,
        }
    }
}

/// One open nesting level: the top-level document, or an open `[ ... ]`/
/// `( ... )` body. Tracks enough to know whether the next predicate-object
/// pair needs a `;`, a `,`, or nothing at all before it, matching
/// spec.md's "current (graph, subject, predicate) being continued".
#[derive(Debug, Clone, Default)]
struct Frame {
    /// `None` until the first thing is written in this frame (controls
    /// whether a separator is needed at all).
    subject_written: bool,
    current_predicate: Option<String>,
    /// depth used for indentation inside nested anon/list bodies.
    depth: usize,
}

/// The stateful Turtle-family pretty-printer described in spec.md §4.H.
///
/// Drives an underlying [`Write`] sink. The flat entry point is
/// [`StatementSink::statement`] (used by the direct parse→write pipeline
/// and by anything that already has a `QuadRef`-at-a-time stream); the
/// nested entry points (`begin_anon_object`/`end_anon_object`,
/// `begin_list_object`/`list_item`/`end_list_object`) are used by
/// [`crate::describe`], which has whole-graph knowledge of which blank
/// nodes and lists can be inlined.
pub struct PrettyWriter<W: Write> {
    out: W,
    syntax: Syntax,
    ascii_output: bool,
    base: Option<String>,
    root: Option<String>,
    prefixes: BTreeMap<String, String>,
    prelude_written: bool,
    frames: Vec<Frame>,
    /// The graph currently open (TriG `GRAPH { ... }` block), if any.
    graph: Option<NamedOrBlankNode>,
    /// The top-level subject currently open in the flat
    /// [`StatementSink::statement`] pipeline, keyed by its rendered form
    /// so a run of quads sharing a subject collapses onto one `;`-block
    /// without the caller needing to pre-group them.
    current_flat_subject: Option<String>,
}

impl<W: Write> PrettyWriter<W> {
    fn top(&mut self) -> &mut Frame {
        self.frames.last_mut().expect("frame stack is never empty")
    }

    fn ensure_prelude(&mut self) -> io::Result<()> {
        if self.prelude_written {
            return Ok(());
        }
        self.prelude_written = true;
        if self.syntax.supports_directives() {
            if let Some(base) = &self.base {
                writeln!(self.out, "@base <{base}> .")?;
            }
            for (iri, name) in &self.prefixes {
                writeln!(self.out, "@prefix {name}: <{}> .", self.relative_iri(iri))?;
            }
        }
        Ok(())
    }

    /// Writes `@base`/`@prefix` directives explicitly, ahead of any
    /// statement. Calling this is optional: [`Self::ensure_prelude`] is
    /// also invoked lazily before the first statement.
    pub fn write_prelude(&mut self) -> Result<(), WriterError> {
        Ok(self.ensure_prelude()?)
    }

    fn indent(&mut self) -> io::Result<()> {
        let depth = self.top().depth;
        for _ in 0..depth {
            write!(self.out, "    ")?;
        }
        Ok(())
    }

    /// Closes whatever statement is pending in the current frame with a
    /// terminating `.` (top level) — called by [`Self::finish`] and
    /// whenever a new top-level subject or graph block begins.
    fn close_pending_statement(&mut self) -> io::Result<()> {
        if self.top().subject_written && self.frames.len() == 1 {
            writeln!(self.out, " .")?;
        }
        Ok(())
    }

    fn close_graph_if_open(&mut self) -> io::Result<()> {
        if self.graph.take().is_some() {
            writeln!(self.out, "}}")?;
        }
        Ok(())
    }

    fn switch_graph(&mut self, graph_name: GraphNameRef<'_>) -> io::Result<()> {
        let wanted = match graph_name {
            GraphNameRef::NamedNode(n) => Some(NamedOrBlankNode::NamedNode(n.into_owned())),
            GraphNameRef::BlankNode(n) => Some(NamedOrBlankNode::BlankNode(n.into_owned())),
            GraphNameRef::DefaultGraph => None,
        };
        if wanted.as_ref() == self.graph.as_ref() {
            return Ok(());
        }
        self.close_pending_statement()?;
        self.close_graph_if_open()?;
        self.top().subject_written = false;
        self.top().current_predicate = None;
        self.current_flat_subject = None;
        if let Some(name) = &wanted {
            writeln!(self.out, "{} {{", self.abbreviate_resource(name.as_ref()))?;
        }
        self.graph = wanted;
        Ok(())
    }

    /// Writes a brand-new top-level subject, closing the previous one
    /// (`.`) first. `token` is already-formatted subject syntax (a
    /// `<iri>`/`prefix:local`/`_:bN`/`[`/`(`).
    fn begin_top_subject(&mut self, token: &str) -> io::Result<()> {
        self.ensure_prelude()?;
        self.close_pending_statement()?;
        if self.graph.is_some() {
            write!(self.out, "\t")?;
        } else {
            // a blank line between unrelated top-level subjects, unless
            // this is the very first statement of the document.
        }
        write!(self.out, "{token}")?;
        self.top().subject_written = true;
        self.top().current_predicate = None;
        Ok(())
    }

    /// Writes a predicate-object pair in the current frame, inserting the
    /// right separator (nothing if this is the frame's first pair, `;`
    /// if the predicate changed, `,` if it repeats).
    fn write_predicate_object(
        &mut self,
        predicate: NamedNodeRef<'_>,
        object_token: &str,
    ) -> io::Result<()> {
        let predicate_token = self.abbreviate_predicate(predicate);
        let repeats = self.top().current_predicate.as_deref() == Some(predicate_token.as_str());
        if repeats {
            write!(self.out, " , {object_token}")?;
        } else if self.top().subject_written && self.top().current_predicate.is_some() {
            writeln!(self.out, " ;")?;
            self.indent()?;
            write!(self.out, "\t{predicate_token} {object_token}")?;
        } else {
            write!(self.out, " {predicate_token} {object_token}")?;
        }
        self.top().subject_written = true;
        self.top().current_predicate = Some(predicate_token);
        Ok(())
    }

    /// Opens `[` for an object position known (by the caller) to be
    /// inlinable, pushing a new frame. Call [`Self::end_anon_object`] to
    /// close it.
    pub fn begin_anon_object(&mut self, predicate: NamedNodeRef<'_>) -> Result<(), WriterError> {
        let predicate_token = self.abbreviate_predicate(predicate);
        if self.top().subject_written && self.top().current_predicate.is_some() {
            if self.top().current_predicate.as_deref() == Some(predicate_token.as_str()) {
                write!(self.out, " , [")?;
            } else {
                writeln!(self.out, " ;")?;
                self.indent()?;
                write!(self.out, "\t{predicate_token} [")?;
            }
        } else {
            write!(self.out, " {predicate_token} [")?;
        }
        self.top().subject_written = true;
        self.top().current_predicate = Some(predicate_token);
        let depth = self.top().depth;
        self.frames.push(Frame {
            subject_written: false,
            current_predicate: None,
            depth: depth + 1,
        });
        Ok(())
    }

    /// Closes a frame opened by [`Self::begin_anon_object`].
    pub fn end_anon_object(&mut self) -> Result<(), WriterError> {
        let frame = self
            .frames
            .pop()
            .ok_or(WriterError::BadArg("end_anon called with no matching begin"))?;
        if frame.subject_written {
            writeln!(self.out)?;
            self.indent()?;
            write!(self.out, "]")?;
        } else {
            write!(self.out, "]")?;
        }
        Ok(())
    }

    /// Opens `(` for a list-valued object, as in [`Self::begin_anon_object`].
    pub fn begin_list_object(&mut self, predicate: NamedNodeRef<'_>) -> Result<(), WriterError> {
        let predicate_token = self.abbreviate_predicate(predicate);
        if self.top().subject_written && self.top().current_predicate.is_some() {
            if self.top().current_predicate.as_deref() == Some(predicate_token.as_str()) {
                write!(self.out, " , (")?;
            } else {
                writeln!(self.out, " ;")?;
                self.indent()?;
                write!(self.out, "\t{predicate_token} (")?;
            }
        } else {
            write!(self.out, " {predicate_token} (")?;
        }
        self.top().subject_written = true;
        self.top().current_predicate = Some(predicate_token);
        let depth = self.top().depth;
        self.frames.push(Frame {
            subject_written: false,
            current_predicate: None,
            depth: depth + 1,
        });
        Ok(())
    }

    /// Writes one item inside an open list body (space-separated).
    pub fn list_item_sep(&mut self) -> Result<(), WriterError> {
        if self.top().subject_written {
            write!(self.out, " ")?;
        }
        self.top().subject_written = true;
        Ok(())
    }

    pub fn end_list_object(&mut self) -> Result<(), WriterError> {
        self.frames
            .pop()
            .ok_or(WriterError::BadArg("end_list called with no matching begin"))?;
        write!(self.out, ")")?;
        Ok(())
    }

    /// Opens `[` for a list item known to be an inlinable anonymous node,
    /// pushing a frame the same way [`Self::begin_anon_object`] does but
    /// without a leading predicate ([`Self::list_item_sep`] already wrote
    /// the separating space).
    pub fn begin_list_item_anon(&mut self) -> Result<(), WriterError> {
        write!(self.out, "[")?;
        let depth = self.top().depth;
        self.frames.push(Frame {
            subject_written: false,
            current_predicate: None,
            depth: depth + 1,
        });
        Ok(())
    }

    pub fn end_list_item_anon(&mut self) -> Result<(), WriterError> {
        let frame = self
            .frames
            .pop()
            .ok_or(WriterError::BadArg("end_anon called with no matching begin"))?;
        if frame.subject_written {
            writeln!(self.out)?;
            self.indent()?;
        }
        write!(self.out, "]")?;
        Ok(())
    }

    /// As [`Self::begin_list_item_anon`], for a nested list item that is
    /// itself a well-formed list head.
    pub fn begin_list_item_list(&mut self) -> Result<(), WriterError> {
        write!(self.out, "(")?;
        let depth = self.top().depth;
        self.frames.push(Frame {
            subject_written: false,
            current_predicate: None,
            depth: depth + 1,
        });
        Ok(())
    }

    pub fn end_list_item_list(&mut self) -> Result<(), WriterError> {
        self.frames
            .pop()
            .ok_or(WriterError::BadArg("end_list called with no matching begin"))?;
        write!(self.out, ")")?;
        Ok(())
    }

    /// Writes a standalone term (an IRI, blank node, or literal), using
    /// the abbreviation policy for literals (bare booleans/numerics) and
    /// CURIE-or-absolute-IRI for named nodes. Used both for flat object
    /// positions and for list items the describe traversal decided not
    /// to inline further.
    pub fn write_term(&mut self, term: TermRef<'_>) -> Result<(), WriterError> {
        let token = self.abbreviate_term(term);
        write!(self.out, "{token}")?;
        Ok(())
    }

    /// The current subject position, written as a standalone labelled
    /// blank node or named node (no `[`/`(` sugar); used when the
    /// describe traversal decides a node must be referenced by label
    /// because it has more than one incoming reference.
    pub fn begin_subject(&mut self, subject: NamedOrBlankNodeRef<'_>) -> Result<(), WriterError> {
        let token = self.abbreviate_resource(subject);
        Ok(self.begin_top_subject(&token)?)
    }

    /// Begins a top-level subject written directly as `[ ... ]`
    /// (spec.md's `ANON_S`: a blank node with no incoming references at
    /// all, so it never needs its own label).
    pub fn begin_subject_anon(&mut self) -> Result<(), WriterError> {
        self.begin_top_subject("[")?;
        let depth = self.top().depth;
        self.top().subject_written = false;
        self.frames.push(Frame {
            subject_written: false,
            current_predicate: None,
            depth: depth + 1,
        });
        Ok(())
    }

    pub fn end_subject_anon(&mut self) -> Result<(), WriterError> {
        let frame = self
            .frames
            .pop()
            .ok_or(WriterError::BadArg("end_anon called with no matching begin"))?;
        if frame.subject_written {
            writeln!(self.out)?;
            self.indent()?;
            write!(self.out, "]")?;
        } else {
            write!(self.out, "]")?;
        }
        self.top().subject_written = true;
        Ok(())
    }

    /// Begins a top-level subject written as `( ... )` (spec.md's
    /// `LIST_S`: a well-formed `rdf:first`/`rdf:rest` chain that is
    /// itself the subject of further statements, not anyone's object).
    pub fn begin_subject_list(&mut self) -> Result<(), WriterError> {
        self.begin_top_subject("(")?;
        let depth = self.top().depth;
        self.top().subject_written = false;
        self.frames.push(Frame {
            subject_written: false,
            current_predicate: None,
            depth: depth + 1,
        });
        Ok(())
    }

    pub fn end_subject_list(&mut self) -> Result<(), WriterError> {
        self.frames
            .pop()
            .ok_or(WriterError::BadArg("end_list called with no matching begin"))?;
        write!(self.out, ")")?;
        self.top().subject_written = true;
        Ok(())
    }

    /// Writes one predicate-object pair of the current top-level
    /// subject, where `object` is written in full (no inlining).
    pub fn write_flat(&mut self, quad: QuadRef<'_>) -> Result<(), WriterError> {
        self.switch_graph(quad.graph_name)?;
        let token = self.abbreviate_term(quad.object);
        Ok(self.write_predicate_object(quad.predicate, &token)?)
    }

    /// Flushes the final `.`/`}` and returns the underlying writer.
    pub fn finish(mut self) -> Result<W, WriterError> {
        self.close_pending_statement()?;
        self.close_graph_if_open()?;
        Ok(self.out)
    }

    // -- abbreviation & escaping -------------------------------------------------

    fn abbreviate_predicate(&self, predicate: NamedNodeRef<'_>) -> String {
        if self.syntax.supports_abbreviation() && predicate == rdf::TYPE {
            "a".to_owned()
        } else {
            self.abbreviate_resource(NamedOrBlankNodeRef::NamedNode(predicate))
        }
    }

    fn abbreviate_resource(&self, node: NamedOrBlankNodeRef<'_>) -> String {
        match node {
            NamedOrBlankNodeRef::NamedNode(iri) => self.abbreviate_iri(iri),
            NamedOrBlankNodeRef::BlankNode(b) => format!("_:{}", b.as_str()),
        }
    }

    fn abbreviate_iri(&self, iri: NamedNodeRef<'_>) -> String {
        if self.syntax.supports_abbreviation() {
            if let Some(curie) = self.curie(iri) {
                return curie;
            }
        }
        format!("<{}>", self.escape_uri(&self.relative_iri(iri.as_str())))
    }

    fn curie(&self, iri: NamedNodeRef<'_>) -> Option<String> {
        for (prefix_iri, name) in &self.prefixes {
            if let Some(local) = iri.as_str().strip_prefix(prefix_iri.as_str()) {
                if let Some(escaped) = escape_pn_local(local) {
                    return Some(if name.is_empty() {
                        format!(":{escaped}")
                    } else {
                        format!("{name}:{escaped}")
                    });
                }
            }
        }
        None
    }

    fn abbreviate_term(&self, term: TermRef<'_>) -> String {
        match term {
            TermRef::NamedNode(n) => self.abbreviate_iri(n),
            TermRef::BlankNode(b) => format!("_:{}", b.as_str()),
            TermRef::Literal(l) => self.abbreviate_literal(l),
        }
    }

    fn abbreviate_literal(&self, literal: LiteralRef<'_>) -> String {
        let canonical_value;
        let value = match literal.datatype() {
            xsd::DOUBLE => {
                canonical_value = Double::from_str(literal.value())
                    .map_or_else(|_| literal.value().to_owned(), |d| d.to_string());
                canonical_value.as_str()
            }
            xsd::DECIMAL => {
                canonical_value = Decimal::from_str(literal.value())
                    .map_or_else(|_| literal.value().to_owned(), |d| d.to_string());
                canonical_value.as_str()
            }
            _ => literal.value(),
        };
        if self.syntax.supports_abbreviation() {
            let bare = match literal.datatype() {
                xsd::BOOLEAN => matches!(value, "true" | "false"),
                xsd::INTEGER => is_turtle_integer(value),
                xsd::DECIMAL => is_turtle_decimal(value),
                xsd::DOUBLE => is_turtle_double(value),
                _ => false,
            };
            if bare {
                return value.to_owned();
            }
        }
        let mut out = String::new();
        self.escape_literal_value(value, &mut out);
        if let Some(lang) = literal.language() {
            out.push('@');
            out.push_str(lang);
        } else if !literal.is_plain() {
            out.push_str("^^");
            out.push_str(&self.abbreviate_iri(literal.datatype()));
        }
        out
    }

    fn escape_literal_value(&self, value: &str, out: &mut String) {
        if needs_long_string(value) {
            escape_long_string(value, self.ascii_output, out);
        } else {
            escape_short_string(value, self.ascii_output, out);
        }
    }

    fn escape_uri(&self, uri: &str) -> String {
        let mut out = String::with_capacity(uri.len());
        for c in uri.chars() {
            match c {
                ' ' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                    for b in c.to_string().as_bytes() {
                        out.push_str(&format!("%{b:02X}"));
                    }
                }
                c if c.is_ascii_control() => {
                    out.push_str(&format!("\\u{:04X}", u32::from(c)));
                }
                c if !c.is_ascii() && self.ascii_output => {
                    push_unicode_escape(c, &mut out);
                }
                c => out.push(c),
            }
        }
        out
    }

    /// Relativizes `iri` against the writer's base (and never escapes an
    /// optional root), falling back to the absolute form (spec.md §4.D).
    fn relative_iri(&self, iri: &str) -> String {
        if let Some(root) = &self.root {
            if !iri.starts_with(root.as_str()) {
                return iri.to_owned();
            }
        }
        let Some(base) = &self.base else {
            return iri.to_owned();
        };
        relativize(iri, base, self.root.as_deref()).unwrap_or_else(|| iri.to_owned())
    }
}

impl<W: Write> StatementSink for PrettyWriter<W> {
    type Error = WriterError;

    fn base(&mut self, iri: &str) -> Result<(), Self::Error> {
        self.base = Some(iri.to_owned());
        if self.syntax.supports_directives() && self.prelude_written {
            writeln!(self.out, "@base <{iri}> .")?;
        }
        Ok(())
    }

    fn prefix(&mut self, name: &str, iri: &str) -> Result<(), Self::Error> {
        self.prefixes.insert(iri.to_owned(), name.to_owned());
        if self.syntax.supports_directives() && self.prelude_written {
            writeln!(self.out, "@prefix {name}: <{}> .", self.relative_iri(iri))?;
        }
        Ok(())
    }

    fn statement(&mut self, quad: QuadRef<'_>, _flags: StatementFlags) -> Result<(), Self::Error> {
        self.ensure_prelude()?;
        self.switch_graph(quad.graph_name)?;
        let subject_key = quad.subject.to_string();
        if self.current_flat_subject.as_deref() != Some(subject_key.as_str()) {
            let token = match quad.subject {
                corvid_model::SubjectRef::NamedNode(n) => self.abbreviate_iri(n),
                corvid_model::SubjectRef::BlankNode(b) => format!("_:{}", b.as_str()),
            };
            self.begin_top_subject(&token)?;
            self.current_flat_subject = Some(subject_key);
        }
        self.write_flat(quad)?;
        Ok(())
    }

    fn end(&mut self) -> Result<(), Self::Error> {
        self.close_pending_statement()?;
        self.close_graph_if_open()?;
        Ok(())
    }
}

fn is_turtle_integer(value: &str) -> bool {
    let mut value = value.as_bytes();
    if let Some(v) = value.strip_prefix(b"+").or_else(|| value.strip_prefix(b"-")) {
        value = v;
    }
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

fn is_turtle_decimal(value: &str) -> bool {
    let mut value = value.as_bytes();
    if let Some(v) = value.strip_prefix(b"+").or_else(|| value.strip_prefix(b"-")) {
        value = v;
    }
    while value.first().is_some_and(u8::is_ascii_digit) {
        value = &value[1..];
    }
    let Some(value) = value.strip_prefix(b".") else {
        return false;
    };
    !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

fn is_turtle_double(value: &str) -> bool {
    let mut value = value.as_bytes();
    if let Some(v) = value.strip_prefix(b"+").or_else(|| value.strip_prefix(b"-")) {
        value = v;
    }
    let mut with_before = false;
    while value.first().is_some_and(u8::is_ascii_digit) {
        value = &value[1..];
        with_before = true;
    }
    let mut with_after = false;
    if let Some(v) = value.strip_prefix(b".") {
        value = v;
        while value.first().is_some_and(u8::is_ascii_digit) {
            value = &value[1..];
            with_after = true;
        }
    }
    let Some(v) = value.strip_prefix(b"e").or_else(|| value.strip_prefix(b"E")) else {
        return false;
    };
    value = v;
    if let Some(v) = value.strip_prefix(b"+").or_else(|| value.strip_prefix(b"-")) {
        value = v;
    }
    (with_before || with_after) && !value.is_empty() && value.iter().all(u8::is_ascii_digit)
}

fn needs_long_string(value: &str) -> bool {
    value.contains('\n') || value.contains('\r') || value.ends_with('"') || value.contains("\"\"")
}

fn escape_short_string(value: &str, ascii_output: bool, out: &mut String) {
    out.push('"');
    for c in value.chars() {
        match c {
            '\u{08}' => out.push_str("\\b"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\u{0c}' => out.push_str("\\f"),
            '\r' => out.push_str("\\r"),
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\0'..='\u{1f}' | '\u{7f}' => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c if !c.is_ascii() && ascii_output => push_unicode_escape(c, out),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Triple-quoted long-string form, chosen when the value contains a
/// newline or a quote (spec.md §4.H "Long strings"). A run of two or more
/// `"`s, or a trailing `"`, is escaped so it cannot be mistaken for the
/// `"""` terminator.
fn escape_long_string(value: &str, ascii_output: bool, out: &mut String) {
    out.push_str("\"\"\"");
    let chars: Vec<char> = value.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => {
                let run_continues = chars.get(i + 1) == Some(&'"');
                let is_last = i + 1 == chars.len();
                if run_continues || is_last {
                    out.push_str("\\\"");
                } else {
                    out.push('"');
                }
            }
            '\0'..='\u{1f}' if c != '\n' && c != '\t' => out.push_str(&format!("\\u{:04X}", u32::from(c))),
            c if !c.is_ascii() && ascii_output => push_unicode_escape(c, out),
            c => out.push(c),
        }
    }
    out.push_str("\"\"\"");
}

fn push_unicode_escape(c: char, out: &mut String) {
    let cp = u32::from(c);
    if cp <= 0xFFFF {
        out.push_str(&format!("\\u{cp:04X}"));
    } else {
        out.push_str(&format!("\\U{cp:08X}"));
    }
}

/// Allows `prefix:local` only when `local` is a legal `PN_LOCAL` (after
/// `\`-escaping the punctuation subset the grammar permits); otherwise
/// the caller must fall back to an absolute `<iri>`.
///
/// This is a conservative, ASCII-anchored approximation of
/// `corvid-syntax`'s exact `PN_CHARS_BASE`/`PN_CHARS` Unicode ranges
/// (those tables are internal to the parser's lexer): any Unicode letter
/// or digit is accepted, which is a superset of the grammar in a few
/// corners of the Unicode range table but never produces a token the
/// parser would refuse to round-trip on the common case this writer
/// targets.
fn escape_pn_local(value: &str) -> Option<String> {
    if value.is_empty() {
        return Some(String::new());
    }
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            out.push(c);
        } else if c == '.' && chars.peek().is_some() {
            out.push(c);
        } else if can_escape_in_local_name(c) {
            out.push('\\');
            out.push(c);
        } else {
            return None;
        }
    }
    Some(out)
}

fn can_escape_in_local_name(c: char) -> bool {
    matches!(
        c,
        '_' | '~' | '.' | '-' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' | '/' | '?' | '#' | '@' | '%'
    )
}

/// Rewrites `abs` as a reference relative to `base`'s directory, never
/// producing a reference that would resolve outside `root` when one is
/// configured. Handles the common case the writer's root feature exists
/// for — `root` an ancestor directory of `base` — by counting the extra
/// `../` segments between `base`'s directory and `root`; falls back to
/// `None` (caller emits the absolute IRI) for origins that do not match.
fn relativize(abs: &str, base: &str, root: Option<&str>) -> Option<String> {
    let (abs_origin, abs_path) = split_origin(abs)?;
    let (base_origin, base_path) = split_origin(base)?;
    if abs_origin != base_origin {
        return None;
    }
    let base_dir = base_path.rsplit_once('/').map_or("", |(dir, _)| dir);
    if let Some(suffix) = abs_path.strip_prefix(base_dir) {
        let suffix = suffix.strip_prefix('/').unwrap_or(suffix);
        if !suffix.is_empty() && !suffix.contains(':') || suffix.starts_with('/') {
            return Some(suffix.to_owned());
        }
    }
    let root_dir = root.and_then(|r| split_origin(r).map(|(_, p)| p))?;
    let root_dir = root_dir.trim_end_matches('/');
    let extra = base_dir.strip_prefix(root_dir)?.trim_matches('/');
    let up_levels = if extra.is_empty() {
        0
    } else {
        extra.split('/').count()
    };
    let abs_suffix = abs_path.strip_prefix(root_dir)?.trim_start_matches('/');
    let mut out = String::new();
    for _ in 0..up_levels {
        out.push_str("../");
    }
    out.push_str(abs_suffix);
    Some(out)
}

/// Splits `scheme://authority` from the path+query+fragment tail.
fn split_origin(iri: &str) -> Option<(&str, &str)> {
    let scheme_end = iri.find(':')? + 1;
    let rest = &iri[scheme_end..];
    if let Some(path_start) = rest.strip_prefix("//").and_then(|r| r.find('/')) {
        Some(iri.split_at(scheme_end + 2 + path_start))
    } else {
        Some((iri, ""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_model::{NamedNodeRef, Quad};

    fn quad(s: &str, p: &str, o: corvid_model::Term, g: GraphNameRef<'_>) -> Quad {
        Quad::new(NamedNodeRef::new_unchecked(s), NamedNodeRef::new_unchecked(p), o, g)
    }

    #[test]
    fn writes_abbreviated_type_and_bare_integer() {
        let mut writer = PrettyPrinter::new(Syntax::Turtle)
            .with_prefix("ex", "http://example.com/")
            .for_writer(Vec::new());
        let q = quad(
            "http://example.com/s",
            "http://www.w3.org/1999/02/22-rdf-syntax-ns#type",
            NamedNodeRef::new_unchecked("http://example.com/T").into(),
            GraphNameRef::DefaultGraph,
        );
        writer.statement(q.as_ref(), StatementFlags::default()).unwrap();
        let q2 = quad(
            "http://example.com/s",
            "http://example.com/n",
            corvid_model::Literal::from(42).into(),
            GraphNameRef::DefaultGraph,
        );
        writer.statement(q2.as_ref(), StatementFlags::default()).unwrap();
        let out = writer.finish().unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("ex:s a ex:T"));
        assert!(text.contains("42"));
    }

    #[test]
    fn relativizes_under_root() {
        let rel = relativize(
            "http://example.com/a/b/c",
            "http://example.com/a/x/y",
            Some("http://example.com/a/"),
        );
        assert_eq!(rel.as_deref(), Some("../b/c"));
    }

    #[test]
    fn long_string_chosen_for_embedded_newline() {
        assert!(needs_long_string("line1\nline2"));
        assert!(!needs_long_string("plain"));
    }

    #[test]
    fn escapes_trailing_quote_in_long_string() {
        let mut out = String::new();
        escape_long_string(r#"a""b"#, false, &mut out);
        assert_eq!(out, r#"""""a\"\"b""""#);
    }
}
