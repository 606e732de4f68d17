mod matrix;
pub use matrix::MatrixFmt;

mod coords;
pub use coords::CoordFmt;

mod nom_prelude {
  pub use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::*,
    combinator::*,
    error::{self, context, convert_error, FromExternalError, ParseError, VerboseError},
    multi::*,
    number::complete::double,
    sequence::*,
    Finish, IResult, Parser,
  };
  pub use std::num::{ParseFloatError, ParseIntError};
  pub use std::str::FromStr;
}

mod common;

/// The "produces an instance" seam: one impl per supported grammar, so a
/// caller that already knows its file's encoding can bypass detection.
pub trait ParseInstance<Fmt>: Sized {
  fn parse(input: Fmt) -> crate::Result<Self>;
}

/// The closed set of supported grammars.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Format {
  ExplicitMatrix,
  CoordinateBased,
}

impl Format {
  /// Decide which grammar applies from the structural shape of the input:
  /// after any blank or comment (`#`, `!!`) lines, a lone unsigned integer
  /// marks the explicit-matrix form and a `CUST` column header marks the
  /// coordinate form. Anything else is a format error, never a fallback to
  /// one of the known grammars.
  pub fn detect(data: &str) -> crate::Result<Format> {
    for line in data.lines() {
      let line = line.trim();
      if line.is_empty() || line.starts_with("!!") || line.starts_with('#') {
        continue;
      }
      if line.contains("CUST") {
        return Ok(Format::CoordinateBased);
      }
      if line.parse::<usize>().is_ok() {
        return Ok(Format::ExplicitMatrix);
      }
      return Err(crate::ParseError::Format(line.to_string()));
    }
    Err(crate::ParseError::Format(String::from("<empty input>")))
  }
}
