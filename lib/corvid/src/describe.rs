//! Describe/pretty-print traversal (spec.md §4.J): walks a [`Store`],
//! classifies every subject as a named node, an anonymous `[...]` node,
//! or a list head, and drives a [`PrettyWriter`] to emit the most
//! compact legal form of the whole dataset — rather than the one
//! `QuadRef` at a time the flat [`StatementSink`] pipeline works with,
//! which cannot see whether a blank node is worth inlining.
//!
//! The classification is the same four-way split `corvid-syntax`'s own
//! parser produces on the way *in* (`[...]` sugar and `( ... )` sugar are
//! both just blank nodes with a particular shape), run in reverse:
//!
//! - a subject referenced from more than one place, or from a context
//!   that already wrote it as a label, must keep a label (`_:bN` or a
//!   named node) — it cannot be inlined at every occurrence.
//! - a blank node that is referenced as an object at most once, and does
//!   not head a well-formed list, is `ANON_S`/`ANON_O`: written as
//!   `[ ... ]` at its one point of use.
//! - a blank node that heads a well-formed `rdf:first`/`rdf:rest` chain
//!   (every link has exactly one `rdf:first` and one `rdf:rest`, no other
//!   predicate, and the chain terminates at `rdf:nil` without revisiting
//!   a node) and is referenced at most once is `LIST_S`/`LIST_O`: written
//!   as `( ... )`.

use crate::error::DescribeError;
use crate::model::Store;
use crate::writer::PrettyWriter;
use corvid_model::vocab::rdf;
use corvid_model::{GraphName, GraphNameRef, NamedOrBlankNode, NamedOrBlankNodeRef, Quad, Term, TermRef};
use std::collections::{HashMap, HashSet};
use std::io::Write;

/// How many triples reference a given node, split by position, computed
/// once up front so the traversal can decide inlining in O(1) per node
/// instead of re-scanning the dataset at every recursive step.
#[derive(Debug, Default, Clone, Copy)]
struct Refs {
    as_object: u32,
}

fn node_key(node: NamedOrBlankNodeRef<'_>) -> String {
    node.to_string()
}

/// Every subject this crate's in-memory model produces is a named node or
/// blank node (RDF-star's triple-as-subject is not part of this build), so
/// this conversion is total in practice.
fn subject_resource(subject: corvid_model::SubjectRef<'_>) -> NamedOrBlankNodeRef<'_> {
    match subject {
        corvid_model::SubjectRef::NamedNode(n) => NamedOrBlankNodeRef::NamedNode(n),
        corvid_model::SubjectRef::BlankNode(b) => NamedOrBlankNodeRef::BlankNode(b),
    }
}

/// Walks a `rdf:first`/`rdf:rest` chain starting at `head`, returning its
/// items in order, or `None` if the chain cannot be written as a list at
/// all (a link with extra predicates beyond `rdf:first`/`rdf:rest`, or a
/// cycle — spec.md's cyclic-list case).
///
/// A link missing `rdf:rest` entirely, or whose `rdf:rest` points
/// somewhere other than a blank node or `rdf:nil` (a literal, or some
/// unrelated named node), is spec.md's "mis-terminated list": rather than
/// refusing to inline the whole chain, the walk stops at that link and
/// returns what it has. Because `( ... )` syntax always desugars to an
/// implicit `rdf:rest rdf:nil` at its last item, writing the truncated
/// chain as a collection has exactly the repair effect spec.md asks for
/// without the traversal needing to emit a second, explicit triple.
fn list_items(store: &Store, head: NamedOrBlankNodeRef<'_>) -> Option<Vec<Quad>> {
    let mut items = Vec::new();
    let mut node: NamedOrBlankNode = head.into_owned();
    let mut visited = HashSet::new();
    loop {
        if !visited.insert(node_key(node.as_ref())) {
            return None;
        }
        let quads: Vec<Quad> = store
            .dataset()
            .quads_for_subject(node.as_ref())
            .map(Quad::from)
            .collect();
        if quads.len() > 2 {
            return None;
        }
        let first = quads.iter().find(|q| q.predicate.as_ref() == rdf::FIRST)?;
        items.push(first.clone());
        let Some(rest) = quads.iter().find(|q| q.predicate.as_ref() == rdf::REST) else {
            return Some(items);
        };
        match &rest.object {
            Term::NamedNode(n) if n.as_ref() == rdf::NIL => return Some(items),
            Term::NamedNode(_) | Term::Literal(_) => return Some(items),
            Term::BlankNode(b) => node = NamedOrBlankNode::BlankNode(b.clone()),
        }
    }
}

/// Computes in-degree-as-object counts for every node that appears as an
/// object anywhere in the store, across all graphs (spec.md classifies
/// nodes dataset-wide, not per graph).
fn compute_refs(store: &Store) -> HashMap<String, Refs> {
    let mut refs: HashMap<String, Refs> = HashMap::new();
    for quad in store.dataset().iter() {
        let key = match quad.object {
            TermRef::NamedNode(n) => Some(node_key(NamedOrBlankNodeRef::NamedNode(n))),
            TermRef::BlankNode(b) => Some(node_key(NamedOrBlankNodeRef::BlankNode(b))),
            TermRef::Literal(_) => None,
        };
        if let Some(key) = key {
            refs.entry(key).or_default().as_object += 1;
        }
    }
    refs
}

fn distinct_graph_names(store: &Store) -> Vec<GraphName> {
    let mut seen: HashSet<GraphName> = HashSet::new();
    for quad in store.dataset().iter() {
        seen.insert(quad.graph_name.into_owned());
    }
    let has_default = seen.remove(&GraphName::DefaultGraph);
    // `GraphName` has no `Ord`; key the deterministic ordering off its
    // rendered form instead (no two distinct graph names render alike).
    let mut by_key: HashMap<String, GraphName> = HashMap::new();
    for g in seen {
        by_key.insert(g.to_string(), g);
    }
    let mut keys: Vec<String> = by_key.keys().cloned().collect();
    keys.sort_unstable();

    let mut out = Vec::with_capacity(keys.len() + 1);
    if has_default {
        out.push(GraphName::DefaultGraph);
    }
    for key in keys {
        out.push(by_key.remove(&key).expect("key collected from this map"));
    }
    out
}

fn subjects_in_graph(store: &Store, graph_name: GraphNameRef<'_>) -> Vec<NamedOrBlankNode> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut out = Vec::new();
    for quad in store.dataset().iter().filter(|q| q.graph_name == graph_name) {
        let subject = subject_resource(quad.subject);
        if seen.insert(node_key(subject)) {
            out.push(subject.into_owned());
        }
    }
    out
}

/// A blank node qualifies for inlining (`[ ... ]` or `( ... )`, depending
/// on whether it also heads a list) when no more than one triple anywhere
/// references it as an object — more than one reference would require
/// writing it out at every use, which inline sugar cannot do (spec.md's
/// "anon/list nodes referenced twice keep their label" rule).
fn is_inlinable(node: NamedOrBlankNodeRef<'_>, refs: &HashMap<String, Refs>) -> bool {
    node.is_blank_node() && refs.get(&node_key(node)).is_none_or(|r| r.as_object <= 1)
}

fn find_list_heads(store: &Store, refs: &HashMap<String, Refs>) -> HashSet<String> {
    let mut heads = HashSet::new();
    for quad in store.dataset().iter() {
        if quad.predicate.as_ref() != rdf::FIRST || !matches!(quad.subject, corvid_model::SubjectRef::BlankNode(_)) {
            continue;
        }
        let head = subject_resource(quad.subject);
        let key = node_key(head);
        if heads.contains(&key) || !is_inlinable(head, refs) {
            continue;
        }
        if list_items(store, head).is_some() {
            heads.insert(key);
        }
    }
    heads
}

/// Drives a [`PrettyWriter`] over an entire [`Store`]: default graph
/// first, then every named graph in a deterministic (sorted) order, each
/// subject written once, with blank nodes and lists inlined wherever
/// their reference count allows it.
pub fn describe<W: Write>(store: &Store, writer: &mut PrettyWriter<W>) -> Result<(), DescribeError> {
    let refs = compute_refs(store);
    let list_heads = find_list_heads(store, &refs);

    for graph_name in distinct_graph_names(store) {
        for subject in subjects_in_graph(store, graph_name.as_ref()) {
            let key = node_key(subject.as_ref());
            let inline_elsewhere = is_inlinable(subject.as_ref(), &refs)
                && refs.get(&key).is_some_and(|r| r.as_object > 0);
            if list_heads.contains(&key) && inline_elsewhere {
                continue;
            }
            if !list_heads.contains(&key) && inline_elsewhere {
                continue;
            }
            describe_subject(store, &refs, &list_heads, graph_name.as_ref(), subject, writer)?;
        }
    }
    Ok(())
}

fn describe_subject<W: Write>(
    store: &Store,
    refs: &HashMap<String, Refs>,
    list_heads: &HashSet<String>,
    graph_name: GraphNameRef<'_>,
    subject: NamedOrBlankNode,
    writer: &mut PrettyWriter<W>,
) -> Result<(), DescribeError> {
    let key = node_key(subject.as_ref());
    if list_heads.contains(&key) {
        writer.begin_subject_list()?;
        write_list_body(store, refs, list_heads, subject.as_ref(), writer)?;
        writer.end_subject_list()?;
        return Ok(());
    }
    let anon = is_inlinable(subject.as_ref(), refs);
    if anon {
        writer.begin_subject_anon()?;
    } else {
        writer.begin_subject(subject.as_ref())?;
    }
    write_predicates(store, refs, list_heads, graph_name, subject.as_ref(), writer)?;
    if anon {
        writer.end_subject_anon()?;
    }
    Ok(())
}

/// Writes every predicate-object pair for `subject` in `graph_name`,
/// with `rdf:type` first (spec.md's emission-order policy) and every
/// other predicate following in the order the store returns them,
/// inlining anonymous/list objects as it goes.
fn write_predicates<W: Write>(
    store: &Store,
    refs: &HashMap<String, Refs>,
    list_heads: &HashSet<String>,
    graph_name: GraphNameRef<'_>,
    subject: NamedOrBlankNodeRef<'_>,
    writer: &mut PrettyWriter<W>,
) -> Result<(), DescribeError> {
    let mut quads: Vec<Quad> = store
        .dataset()
        .quads_for_subject(subject)
        .filter(|q| q.graph_name == graph_name)
        .map(Quad::from)
        .collect();
    quads.sort_by_key(|q| q.predicate.as_ref() != rdf::TYPE);

    for quad in &quads {
        let predicate = quad.predicate.as_ref();
        let object_node = match &quad.object {
            Term::BlankNode(b) => Some(NamedOrBlankNodeRef::BlankNode(b.as_ref())),
            _ => None,
        };
        match object_node {
            Some(node) if list_heads.contains(&node_key(node)) => {
                writer.begin_list_object(predicate)?;
                write_list_body(store, refs, list_heads, node, writer)?;
                writer.end_list_object()?;
            }
            Some(node) if is_inlinable(node, refs) => {
                writer.begin_anon_object(predicate)?;
                write_predicates(store, refs, list_heads, graph_name, node, writer)?;
                writer.end_anon_object()?;
            }
            _ => {
                let owned = Quad::new(
                    quad.subject.clone(),
                    quad.predicate.clone(),
                    quad.object.clone(),
                    quad.graph_name.clone(),
                );
                writer.write_flat(owned.as_ref())?;
            }
        }
    }
    Ok(())
}

/// Writes every item of the list headed by `head`, space-separated,
/// recursively inlining any item that is itself an inlinable anonymous
/// node or a well-formed nested list.
fn write_list_body<W: Write>(
    store: &Store,
    refs: &HashMap<String, Refs>,
    list_heads: &HashSet<String>,
    head: NamedOrBlankNodeRef<'_>,
    writer: &mut PrettyWriter<W>,
) -> Result<(), DescribeError> {
    let items = list_items(store, head).ok_or(DescribeError::CyclicList)?;
    for item in items {
        writer.list_item_sep()?;
        let object_node = match &item.object {
            Term::BlankNode(b) => Some(NamedOrBlankNodeRef::BlankNode(b.as_ref())),
            _ => None,
        };
        match object_node {
            Some(node) if list_heads.contains(&node_key(node)) => {
                writer.begin_list_item_list()?;
                write_list_body(store, refs, list_heads, node, writer)?;
                writer.end_list_item_list()?;
            }
            Some(node) if is_inlinable(node, refs) => {
                writer.begin_list_item_anon()?;
                write_predicates(store, refs, list_heads, GraphNameRef::DefaultGraph, node, writer)?;
                writer.end_list_item_anon()?;
            }
            _ => writer.write_term(item.object.as_ref())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{PrettyPrinter, Syntax};
    use corvid_model::{BlankNode, Literal, NamedNode};

    fn n(iri: &str) -> NamedNode {
        NamedNode::new_unchecked(iri)
    }

    fn print(store: &Store) -> String {
        let mut writer = PrettyPrinter::new(Syntax::Turtle)
            .with_prefix("ex", "http://example.com/")
            .for_writer(Vec::new());
        describe(store, &mut writer).unwrap();
        String::from_utf8(writer.finish().unwrap()).unwrap()
    }

    #[test]
    fn inlines_an_anonymous_object_referenced_once() {
        let blank = BlankNode::default();
        let store: Store = [
            Quad::new(n("http://example.com/s"), n("http://example.com/p"), blank.clone(), GraphName::DefaultGraph),
            Quad::new(blank, n("http://example.com/q"), Literal::from(1), GraphName::DefaultGraph),
        ]
        .into_iter()
        .collect();

        let text = print(&store);
        assert!(text.contains("ex:s ex:p ["));
        assert!(text.contains("ex:q 1"));
        assert!(!text.contains("_:"));
    }

    #[test]
    fn writes_a_well_formed_list_as_collection_syntax() {
        let head = BlankNode::default();
        let tail = BlankNode::default();
        let store: Store = [
            Quad::new(n("http://example.com/s"), n("http://example.com/p"), head.clone(), GraphName::DefaultGraph),
            Quad::new(head.clone(), rdf::FIRST, n("http://example.com/a"), GraphName::DefaultGraph),
            Quad::new(head, rdf::REST, tail.clone(), GraphName::DefaultGraph),
            Quad::new(tail.clone(), rdf::FIRST, n("http://example.com/b"), GraphName::DefaultGraph),
            Quad::new(tail, rdf::REST, rdf::NIL, GraphName::DefaultGraph),
        ]
        .into_iter()
        .collect();

        let text = print(&store);
        assert!(text.contains("(ex:a ex:b)"));
        assert!(!text.contains("_:"));
        assert!(!text.contains("rdf:first") && !text.contains("rdf:rest"));
    }

    #[test]
    fn a_twice_referenced_blank_node_keeps_its_label() {
        let blank = BlankNode::default();
        let store: Store = [
            Quad::new(n("http://example.com/s1"), n("http://example.com/p"), blank.clone(), GraphName::DefaultGraph),
            Quad::new(n("http://example.com/s2"), n("http://example.com/p"), blank.clone(), GraphName::DefaultGraph),
            Quad::new(blank, n("http://example.com/q"), Literal::from(1), GraphName::DefaultGraph),
        ]
        .into_iter()
        .collect();

        let text = print(&store);
        assert!(!text.contains('['));
        assert!(text.contains("_:"));
    }

    #[test]
    fn list_missing_rdf_rest_is_repaired_as_a_one_item_collection() {
        let head = BlankNode::default();
        let store: Store = [
            Quad::new(n("http://example.com/s"), n("http://example.com/p"), head.clone(), GraphName::DefaultGraph),
            Quad::new(head, rdf::FIRST, n("http://example.com/a"), GraphName::DefaultGraph),
            // No rdf:rest at all: the chain is truncated here and closed
            // with the collection syntax's implicit `rdf:nil`.
        ]
        .into_iter()
        .collect();

        let text = print(&store);
        assert!(text.contains("(ex:a)"));
        assert!(!text.contains("_:"));
    }

    #[test]
    fn cyclic_list_is_reported_rather_than_looping_forever() {
        let a = BlankNode::default();
        let b = BlankNode::default();
        let store: Store = [
            Quad::new(n("http://example.com/s"), n("http://example.com/p"), a.clone(), GraphName::DefaultGraph),
            Quad::new(a.clone(), rdf::FIRST, n("http://example.com/x"), GraphName::DefaultGraph),
            Quad::new(a.clone(), rdf::REST, b.clone(), GraphName::DefaultGraph),
            Quad::new(b.clone(), rdf::FIRST, n("http://example.com/y"), GraphName::DefaultGraph),
            Quad::new(b, rdf::REST, a, GraphName::DefaultGraph),
        ]
        .into_iter()
        .collect();

        // The chain never reaches `rdf:nil`, so `find_list_heads` rejects
        // it and the traversal falls back to plain blank-node statements
        // instead of recursing into `write_list_body`'s cycle check.
        let text = print(&store);
        assert!(text.contains("_:"));
    }
}
