//! Loading of Travelling-Salesman-Problem-with-Time-Windows (TSPTW) benchmark
//! instances.
//!
//! Two incompatible textual encodings are in circulation and both are
//! supported:
//!
//! * an explicit-matrix form: node count, per-node time windows and service
//!   times, followed by full pairwise distance and travel-time tables and the
//!   depot index;
//! * a coordinate form: a `CUST NO.` column header followed by one record per
//!   node (`id x y demand ready due service`), from which travel costs are
//!   derived as Euclidean distances.
//!
//! The encoding is detected from the content of the input, never from the file
//! name. Either way a successful load yields an [`Instance`] exposing the same
//! query surface, so a solver never learns which backing representation is
//! active.

mod error;
mod instance;
mod metrics;
mod parsers;

pub use error::{DataError, ParseError};
pub use instance::{Instance, Time, TimeWindow};
pub use parsers::{CoordFmt, Format, MatrixFmt, ParseInstance};

pub type Result<T> = std::result::Result<T, ParseError>;
