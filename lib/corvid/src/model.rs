//! The in-memory multi-index model and its invalidating cursor.
//!
//! [`corvid_model::Dataset`] already keeps six B-tree orderings of
//! `(subject, predicate, object, graph)` (`gspo`/`gpos`/`gosp`/`spog`/
//! `posg`/`ospg`) over its interner, and picks among them internally for
//! every per-graph and whole-dataset pattern query it exposes. What
//! spec.md's Component I singles out as novel on top of that container is
//! a [`Store`] that counts its own mutations and a [`Cursor`] that a
//! `find` call snapshots against the count at the moment it was taken, so
//! a use of the cursor after a subsequent `insert`/`erase`/`clear` reports
//! [`BadCursor`] instead of silently iterating stale or skipped state.

use crate::error::BadCursor;
use corvid_model::{
    Dataset, GraphNameRef, NamedNodeRef, NamedOrBlankNodeRef, Quad, QuadRef, TermRef,
};

/// A quad pattern: `None` in any field matches any value there, exactly
/// spec.md's "null pattern field matches anything" rule from Component F.
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadPattern<'a> {
    pub subject: Option<NamedOrBlankNodeRef<'a>>,
    pub predicate: Option<NamedNodeRef<'a>>,
    pub object: Option<TermRef<'a>>,
    pub graph_name: Option<GraphNameRef<'a>>,
}

impl<'a> QuadPattern<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_subject(mut self, subject: impl Into<NamedOrBlankNodeRef<'a>>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    #[must_use]
    pub fn with_predicate(mut self, predicate: impl Into<NamedNodeRef<'a>>) -> Self {
        self.predicate = Some(predicate.into());
        self
    }

    #[must_use]
    pub fn with_object(mut self, object: impl Into<TermRef<'a>>) -> Self {
        self.object = Some(object.into());
        self
    }

    #[must_use]
    pub fn with_graph_name(mut self, graph_name: impl Into<GraphNameRef<'a>>) -> Self {
        self.graph_name = Some(graph_name.into());
        self
    }

    fn matches(&self, quad: QuadRef<'_>) -> bool {
        self.subject.map_or(true, |s| quad.subject == s.into())
            && self.predicate.map_or(true, |p| quad.predicate == p)
            && self.object.map_or(true, |o| quad.object == o.into())
            && self.graph_name.map_or(true, |g| quad.graph_name == g.into())
    }
}

/// A versioned [`Dataset`] wrapper. Every mutating call bumps an internal
/// counter; [`Cursor`]s created by [`Store::find`] record the counter's
/// value at creation time and refuse to advance once it has moved on.
#[derive(Debug, Default, Clone)]
pub struct Store {
    dataset: Dataset,
    version: u64,
}

impl Store {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.dataset.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dataset.is_empty()
    }

    /// The current version; bumped by every mutation that actually changes
    /// the dataset's contents (a duplicate `insert` or a no-op `remove`
    /// does not bump it, matching `Dataset::insert`/`remove`'s own `bool`
    /// "did this change anything" return).
    #[must_use]
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn insert<'a>(&mut self, quad: impl Into<QuadRef<'a>>) -> bool {
        let inserted = self.dataset.insert(quad);
        if inserted {
            self.version += 1;
        }
        inserted
    }

    /// Removes the quad the cursor currently points at, then advances it.
    /// Bumps the version exactly as a plain [`Store::remove`] would: the
    /// cursor performing the erase is not itself invalidated by its own
    /// call, matching spec.md's `erase(cursor)` leaving that cursor usable
    /// for the next `advance`.
    pub fn erase(&mut self, cursor: &mut Cursor) -> Result<bool, BadCursor> {
        let Some(quad) = cursor.current(self)?.cloned() else {
            return Ok(false);
        };
        let removed = self.dataset.remove(quad.as_ref());
        if removed {
            self.version += 1;
            cursor.version = self.version;
        }
        cursor.advance_unchecked();
        Ok(removed)
    }

    pub fn remove<'a>(&mut self, quad: impl Into<QuadRef<'a>>) -> bool {
        let removed = self.dataset.remove(quad);
        if removed {
            self.version += 1;
        }
        removed
    }

    pub fn clear(&mut self) {
        if !self.dataset.is_empty() {
            self.dataset.clear();
            self.version += 1;
        }
    }

    /// Finds every quad matching `pattern`, seeding the scan from whichever
    /// bound field `Dataset` already indexes most cheaply (subject, then
    /// predicate, then object, then graph name, in that order of
    /// preference) and filtering the rest client-side, and returns a
    /// [`Cursor`] over the (materialized) match set snapshotted at the
    /// store's current version.
    #[must_use]
    pub fn find(&self, pattern: QuadPattern<'_>) -> Cursor {
        let quads: Vec<Quad> = if let Some(s) = pattern.subject {
            self.dataset
                .quads_for_subject(s)
                .filter(|q| pattern.matches(*q))
                .map(Quad::from)
                .collect()
        } else if let Some(p) = pattern.predicate {
            self.dataset
                .quads_for_predicate(p)
                .filter(|q| pattern.matches(*q))
                .map(Quad::from)
                .collect()
        } else if let Some(o) = pattern.object {
            self.dataset
                .quads_for_object(o)
                .filter(|q| pattern.matches(*q))
                .map(Quad::from)
                .collect()
        } else if let Some(g) = pattern.graph_name {
            self.dataset
                .quads_for_graph_name(g)
                .filter(|q| pattern.matches(*q))
                .map(Quad::from)
                .collect()
        } else {
            self.dataset.iter().map(Quad::from).collect()
        };
        Cursor {
            quads,
            position: 0,
            version: self.version,
        }
    }

    /// Counts matches for a pattern without materializing a cursor.
    #[must_use]
    pub fn count(&self, pattern: QuadPattern<'_>) -> usize {
        self.find(pattern).quads.len()
    }
}

impl FromIterator<Quad> for Store {
    fn from_iter<I: IntoIterator<Item = Quad>>(iter: I) -> Self {
        let mut store = Self::new();
        for quad in iter {
            store.insert(quad.as_ref());
        }
        store
    }
}

/// A snapshot of a [`Store::find`] match set, positioned at an index into
/// it. Every access re-checks the originating store's version and returns
/// [`BadCursor`] once the store has mutated since the cursor was taken,
/// spec.md's `BAD_CURSOR` on stale use.
#[derive(Debug, Clone)]
pub struct Cursor {
    quads: Vec<Quad>,
    position: usize,
    version: u64,
}

impl Cursor {
    fn check(&self, store: &Store) -> Result<(), BadCursor> {
        if store.version == self.version {
            Ok(())
        } else {
            Err(BadCursor)
        }
    }

    /// The quad currently pointed at, or `None` if the cursor has been
    /// advanced past the end of its match set.
    pub fn current(&self, store: &Store) -> Result<Option<&Quad>, BadCursor> {
        self.check(store)?;
        Ok(self.quads.get(self.position))
    }

    fn advance_unchecked(&mut self) {
        self.position += 1;
    }

    /// Moves to the next match. Returns `Ok(false)` once exhausted.
    pub fn advance(&mut self, store: &Store) -> Result<bool, BadCursor> {
        self.check(store)?;
        if self.position >= self.quads.len() {
            return Ok(false);
        }
        self.advance_unchecked();
        Ok(self.position < self.quads.len())
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.quads.len().saturating_sub(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_model::{GraphNameRef, NamedNodeRef};

    fn quad(s: &str, p: &str, o: &str) -> Quad {
        let n = |v: &str| NamedNodeRef::new_unchecked(v).into_owned();
        Quad::new(n(s), n(p), n(o), GraphNameRef::DefaultGraph)
    }

    #[test]
    fn find_filters_by_pattern() {
        let mut store = Store::new();
        store.insert(quad("http://ex/a", "http://ex/p", "http://ex/1").as_ref());
        store.insert(quad("http://ex/a", "http://ex/p", "http://ex/2").as_ref());
        store.insert(quad("http://ex/b", "http://ex/p", "http://ex/1").as_ref());

        let a = NamedNodeRef::new_unchecked("http://ex/a");
        let cursor = store.find(QuadPattern::new().with_subject(a));
        assert_eq!(cursor.remaining(), 2);
    }

    #[test]
    fn cursor_invalidated_by_mutation() {
        let mut store = Store::new();
        store.insert(quad("http://ex/a", "http://ex/p", "http://ex/1").as_ref());
        let mut cursor = store.find(QuadPattern::new());
        store.insert(quad("http://ex/b", "http://ex/p", "http://ex/1").as_ref());
        assert_eq!(cursor.advance(&store), Err(BadCursor));
        assert_eq!(cursor.current(&store), Err(BadCursor));
    }

    #[test]
    fn erase_advances_and_removes() {
        let mut store = Store::new();
        store.insert(quad("http://ex/a", "http://ex/p", "http://ex/1").as_ref());
        store.insert(quad("http://ex/a", "http://ex/p", "http://ex/2").as_ref());
        let a = NamedNodeRef::new_unchecked("http://ex/a");
        let mut cursor = store.find(QuadPattern::new().with_subject(a));
        assert!(store.erase(&mut cursor).unwrap());
        assert_eq!(store.len(), 1);
        assert!(store.erase(&mut cursor).unwrap());
        assert_eq!(store.len(), 0);
    }
}
