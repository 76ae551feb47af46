//! The facade crate: spec.md's Component I (the versioned multi-index
//! [`model::Store`]) and Component J (the [`describe`] traversal) built
//! on top of `corvid-model`'s node/statement types and `corvid-syntax`'s
//! parsers/writers, plus the `corvid` command-line pretty-printer (§6).
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

pub mod describe;
pub mod error;
pub mod model;
pub mod sink;
pub mod writer;

pub use crate::error::{BadCursor, DescribeError, WriterError};
pub use crate::model::{Cursor, QuadPattern, Store};
pub use crate::writer::{PrettyPrinter, PrettyWriter, Syntax};
