use super::nom_prelude::*;

pub fn usize_<'a, E>(input: &'a str) -> IResult<&'a str, usize, E>
where
  E: ParseError<&'a str> + FromExternalError<&'a str, ParseIntError>,
{
  map_res(digit1, usize::from_str)(input)
}

/// Skip leading blank and comment lines (`#` or `!!` prefixed).
pub fn skip_meta<'a, E>(input: &'a str) -> IResult<&'a str, (), E>
where
  E: ParseError<&'a str>,
{
  map(
    many0_count(delimited(
      multispace0,
      preceded(alt((tag("!!"), tag("#"))), not_line_ending),
      line_ending,
    )),
    |_| (),
  )(input)
}
