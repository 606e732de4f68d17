use super::{nom_prelude::*, ParseInstance};
use crate::error::DataError;
use crate::instance::{Instance, Time, TimeWindow};

/// Explicit-matrix encoding: node count, per-node time windows and service
/// times, a full distance table, a full travel-time table, then the depot
/// index. Tokens are whitespace-separated; line breaks carry no meaning.
#[derive(Debug, Copy, Clone)]
pub struct MatrixFmt<S>(pub S);

impl<S: AsRef<str>> ParseInstance<MatrixFmt<S>> for Instance {
  fn parse(input: MatrixFmt<S>) -> crate::Result<Self> {
    let data = input.0.as_ref();
    let raw = match parsers::matrix(data).finish() {
      Ok((_, raw)) => raw,
      Err(e) => return Err(DataError::Syntax(convert_error(data, e)).into()),
    };
    let instance = Instance::from_matrices(
      raw.depot,
      raw.time_windows,
      raw.service_times,
      raw.distances,
      raw.times,
    )?;
    Ok(instance)
  }
}

mod parsers {
  use super::*;
  use crate::parsers::common::*;

  pub struct RawMatrix {
    pub depot: usize,
    pub time_windows: Vec<TimeWindow>,
    pub service_times: Vec<Time>,
    pub distances: Vec<f64>,
    pub times: Vec<f64>,
  }

  fn num<'a, E>(input: &'a str) -> IResult<&'a str, f64, E>
  where
    E: ParseError<&'a str>,
  {
    preceded(multispace0, double)(input)
  }

  pub fn matrix(input: &str) -> IResult<&str, RawMatrix, VerboseError<&str>> {
    let (i, _) = skip_meta(input)?;
    let (i, n) = context("node count", preceded(multispace0, usize_))(i)?;
    let (i, time_windows) = context(
      "time windows",
      count(
        map(pair(num, num), |(start, end)| TimeWindow { start, end }),
        n,
      ),
    )(i)?;
    let (i, service_times) = context("service times", count(num, n))(i)?;
    let (i, distances) = context("distance matrix", count(num, n * n))(i)?;
    let (i, times) = context("travel time matrix", count(num, n * n))(i)?;
    let (i, depot) = context("depot", preceded(multispace0, usize_))(i)?;
    let (i, _) = preceded(multispace0, eof)(i)?;

    Ok((
      i,
      RawMatrix {
        depot,
        time_windows,
        service_times,
        distances,
        times,
      },
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ParseError;

  const SMALL: &str = "\
3
0 10
2 9
1 8
1 1 1
0 2 3
2 0 4
3 4 0
0 2.5 3
2.5 0 4
3 4 0
0
";

  #[test]
  fn small_instance() -> crate::Result<()> {
    let inst = Instance::parse(MatrixFmt(SMALL))?;
    assert_eq!(inst.size(), 3);
    assert_eq!(inst.depot(), 0);
    assert!(inst.coordinates().is_empty());
    assert_eq!(inst.total_service_time(), 3.0);
    assert_eq!(inst.time_windows()[2], TimeWindow { start: 1.0, end: 8.0 });
    let d = inst.distance_function();
    let t = inst.time_function();
    assert_eq!(d(0, 1), 2.0);
    assert_eq!(d(2, 1), 4.0);
    assert_eq!(d(1, 1), 0.0);
    assert_eq!(t(0, 1), 2.5);
    Ok(())
  }

  macro_rules! assert_malformed {
    ($name:ident, $data:expr, $pat:pat) => {
      #[test]
      fn $name() {
        match Instance::parse(MatrixFmt($data)) {
          Err(ParseError::MalformedData(e)) => {
            assert!(matches!(e, $pat), "unexpected error: {:?}", e)
          }
          other => panic!("expected malformed-data error, got {:?}", other),
        }
      }
    };
  }

  assert_malformed!(
    inverted_window,
    "2\n5 2\n0 10\n0 0\n0 1 1 0\n0 1 1 0\n0\n",
    DataError::WindowInverted { node: 0, .. }
  );

  assert_malformed!(
    negative_service_time,
    "2\n0 5\n0 5\n-1 0\n0 1 1 0\n0 1 1 0\n0\n",
    DataError::InvalidNumber {
      node: 0,
      field: "service time",
      ..
    }
  );

  assert_malformed!(
    negative_distance,
    "2\n0 5\n0 5\n0 0\n0 -1 1 0\n0 1 1 0\n0\n",
    DataError::InvalidMatrixEntry {
      row: 0,
      col: 1,
      ..
    }
  );

  assert_malformed!(
    depot_out_of_range,
    "2\n0 5\n0 5\n0 0\n0 1 1 0\n0 1 1 0\n7\n",
    DataError::DepotOutOfRange { depot: 7, size: 2 }
  );

  assert_malformed!(
    truncated_matrix,
    "2\n0 5\n0 5\n0 0\n0 1 1\n0 1 1 0\n0\n",
    DataError::Syntax(_)
  );

  assert_malformed!(
    non_numeric_field,
    "2\n0 5\n0 five\n0 0\n0 1 1 0\n0 1 1 0\n0\n",
    DataError::Syntax(_)
  );

  assert_malformed!(no_nodes, "0\n0\n", DataError::Empty);
}
