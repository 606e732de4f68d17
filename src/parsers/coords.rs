use super::{nom_prelude::*, ParseInstance};
use crate::error::DataError;
use crate::instance::{Instance, TimeWindow};

/// Coordinate encoding: a `CUST NO.` column header followed by one record per
/// node (`id x y demand ready due service`). Ids are 1-based and positional;
/// the benchmark sentinel id 999 ends the list early. The demand column is a
/// leftover of the multi-vehicle layout and is read but discarded. Travel
/// costs are derived from the coordinates, so no matrix section exists.
#[derive(Debug, Copy, Clone)]
pub struct CoordFmt<S>(pub S);

impl<S: AsRef<str>> ParseInstance<CoordFmt<S>> for Instance {
  fn parse(input: CoordFmt<S>) -> crate::Result<Self> {
    let data = input.0.as_ref();
    let records = match parsers::coord_list(data).finish() {
      Ok((_, records)) => records,
      Err(e) => return Err(DataError::Syntax(convert_error(data, e)).into()),
    };

    let mut coords = Vec::with_capacity(records.len());
    let mut time_windows = Vec::with_capacity(records.len());
    let mut service_times = Vec::with_capacity(records.len());
    for (k, r) in records.iter().enumerate() {
      if r.id != k + 1 {
        return Err(
          DataError::IdMismatch {
            row: k,
            found: r.id,
            expected: k + 1,
          }
          .into(),
        );
      }
      coords.push((r.x, r.y));
      time_windows.push(TimeWindow {
        start: r.start,
        end: r.end,
      });
      service_times.push(r.service);
    }

    let instance = Instance::from_coords(coords, time_windows, service_times)?;
    Ok(instance)
  }
}

mod parsers {
  use super::*;
  use crate::parsers::common::*;

  /// End-of-list sentinel used by the benchmark files.
  const END_OF_LIST: usize = 999;

  pub struct Record {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub start: f64,
    pub end: f64,
    pub service: f64,
  }

  fn header_line<'a, E>(input: &'a str) -> IResult<&'a str, &'a str, E>
  where
    E: ParseError<&'a str>,
  {
    verify(terminated(not_line_ending, line_ending), |line: &str| {
      line.contains("CUST")
    })(input)
  }

  fn separator_line<'a, E>(input: &'a str) -> IResult<&'a str, (), E>
  where
    E: ParseError<&'a str>,
  {
    map(
      delimited(space0, take_while1(|c| c == '-'), line_ending),
      |_| (),
    )(input)
  }

  fn record<'a, E>(input: &'a str) -> IResult<&'a str, Record, E>
  where
    E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>,
  {
    let field = |i| preceded(space1, double)(i);
    map(
      tuple((
        preceded(space0, usize_),
        field, // x
        field, // y
        field, // demand, unused in a single-vehicle problem
        field, // ready time
        field, // due date
        field, // service time
      )),
      |(id, x, y, _demand, start, end, service)| Record {
        id,
        x,
        y,
        start,
        end,
        service,
      },
    )(input)
  }

  pub fn coord_list(input: &str) -> IResult<&str, Vec<Record>, VerboseError<&str>> {
    let (i, _) = skip_meta(input)?;
    let (i, _) = context("column header", header_line)(i)?;
    let (mut i, _) = opt(separator_line)(i)?;

    let mut records = Vec::new();
    loop {
      let (rest, _) = multispace0(i)?;
      if rest.is_empty() {
        i = rest;
        break;
      }
      let (rest, record) = context("customer record", record)(rest)?;
      i = rest;
      if record.id == END_OF_LIST {
        // everything after the sentinel row is ignored
        break;
      }
      records.push(record);
    }

    Ok((i, records))
  }
}
