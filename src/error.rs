use thiserror::Error;

/// Top-level failure of a load attempt. No partially filled instance is ever
/// observable behind one of these.
#[derive(Debug, Error)]
pub enum ParseError {
  #[error("cannot read instance: {0}")]
  Io(#[from] std::io::Error),

  /// The header matches neither known grammar. Carries the first significant
  /// line of the input.
  #[error("unrecognized instance header: {0:?}")]
  Format(String),

  #[error("malformed instance: {0}")]
  MalformedData(#[from] DataError),
}

/// A recognized grammar's field failed numeric or structural validation.
#[derive(Debug, Error, PartialEq)]
pub enum DataError {
  #[error("instance has no nodes")]
  Empty,

  #[error("node {node}: {field} is {value}, expected a finite non-negative number")]
  InvalidNumber {
    node: usize,
    field: &'static str,
    value: f64,
  },

  #[error("node {node}: coordinate {field} is {value}, expected a finite number")]
  InvalidCoordinate {
    node: usize,
    field: &'static str,
    value: f64,
  },

  #[error("{matrix} entry ({row}, {col}) is {value}, expected a finite non-negative number")]
  InvalidMatrixEntry {
    matrix: &'static str,
    row: usize,
    col: usize,
    value: f64,
  },

  #[error("node {node}: time window [{start}, {end}] closes before it opens")]
  WindowInverted { node: usize, start: f64, end: f64 },

  #[error("{section}: expected {expected} entries, found {found}")]
  CountMismatch {
    section: &'static str,
    expected: usize,
    found: usize,
  },

  #[error("depot {depot} out of range for {size} nodes")]
  DepotOutOfRange { depot: usize, size: usize },

  #[error("record {row}: customer id {found} does not match its position, expected {expected}")]
  IdMismatch {
    row: usize,
    found: usize,
    expected: usize,
  },

  /// Token-level grammar violation (truncated section, non-numeric field,
  /// stray trailing content). Carries the parser trace.
  #[error("{0}")]
  Syntax(String),
}
