//! Numeric building blocks for the Turtle family's literal forms: the
//! `xsd:boolean`/`xsd:integer`/`xsd:decimal`/`xsd:double`/`xsd:float`
//! lexical-form types, plus the arbitrary-precision [`bigint`] and
//! shortest-round-trip [`dragon4`] decimal conversion the writer uses to
//! canonicalize `xsd:double` (and, via the same machinery, `xsd:decimal`).
#![deny(unsafe_code)]
#![doc(test(attr(deny(warnings))))]

pub mod bigint;
mod boolean;
mod decimal;
mod double;
pub mod dragon4;
mod float;
mod integer;

pub use self::boolean::Boolean;
pub use self::decimal::{Decimal, ParseDecimalError, TooLargeForDecimalError};
pub use self::double::Double;
pub use self::float::Float;
pub use self::integer::Integer;
