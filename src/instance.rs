use std::io::Read;
use std::path::Path;

use itertools::iproduct;
use tracing::debug;

use crate::error::DataError;
use crate::metrics::{Euclidean, Metric};
use crate::parsers::{CoordFmt, Format, MatrixFmt, ParseInstance};

pub type Time = f64;

/// Interval during which service at a node may begin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeWindow {
  pub start: Time,
  pub end: Time,
}

/// Backing representation of the travel-cost tables. Never exposed: callers
/// only ever see the closures returned by [`Instance::distance_function`] and
/// [`Instance::time_function`].
#[derive(Debug, Clone)]
enum TravelCosts {
  /// Dense row-major tables read verbatim from the file.
  Matrix { distances: Vec<f64>, times: Vec<f64> },
  /// Costs derived on demand from the node coordinates; travel time equals
  /// travel distance.
  Euclidean,
}

impl Default for TravelCosts {
  fn default() -> Self {
    TravelCosts::Matrix {
      distances: Vec::new(),
      times: Vec::new(),
    }
  }
}

/// A fully loaded TSPTW instance.
///
/// Immutable after construction, so it can be shared freely across solver
/// threads. The `Default` value is the documented "nothing loaded" state:
/// `size() == 0`, every sequence empty, every total zero. A failed load never
/// produces a partially filled value.
#[derive(Debug, Clone, Default)]
pub struct Instance {
  depot: usize,
  coords: Vec<(f64, f64)>,
  costs: TravelCosts,
  time_windows: Vec<TimeWindow>,
  service_times: Vec<Time>,
  total_service_time: Time,
}

impl Instance {
  /// Read an instance file, auto-detecting its grammar. The file handle lives
  /// only for the duration of the call.
  pub fn load_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
    let path = path.as_ref();
    debug!("loading instance from {:?}", path);
    let data = std::fs::read_to_string(path)?;
    Self::parse_str(&data)
  }

  /// Same as [`load_file`](Self::load_file), over an already-open stream.
  pub fn load_reader<R: Read>(mut reader: R) -> crate::Result<Self> {
    let mut data = String::new();
    reader.read_to_string(&mut data)?;
    Self::parse_str(&data)
  }

  pub fn parse_str(data: &str) -> crate::Result<Self> {
    let format = Format::detect(data)?;
    debug!("detected instance format {:?}", format);
    match format {
      Format::ExplicitMatrix => Self::parse(MatrixFmt(data)),
      Format::CoordinateBased => Self::parse(CoordFmt(data)),
    }
  }

  pub(crate) fn from_matrices(
    depot: usize,
    time_windows: Vec<TimeWindow>,
    service_times: Vec<Time>,
    distances: Vec<f64>,
    times: Vec<f64>,
  ) -> Result<Self, DataError> {
    let n = time_windows.len();
    check_node_data(&time_windows, &service_times)?;
    check_matrix("distance matrix", &distances, n)?;
    check_matrix("travel time matrix", &times, n)?;
    if depot >= n {
      return Err(DataError::DepotOutOfRange { depot, size: n });
    }
    let total_service_time = service_times.iter().sum();
    Ok(Instance {
      depot,
      coords: Vec::new(),
      costs: TravelCosts::Matrix { distances, times },
      time_windows,
      service_times,
      total_service_time,
    })
  }

  pub(crate) fn from_coords(
    coords: Vec<(f64, f64)>,
    time_windows: Vec<TimeWindow>,
    service_times: Vec<Time>,
  ) -> Result<Self, DataError> {
    check_node_data(&time_windows, &service_times)?;
    if coords.len() != time_windows.len() {
      return Err(DataError::CountMismatch {
        section: "coordinates",
        expected: time_windows.len(),
        found: coords.len(),
      });
    }
    for (node, &(x, y)) in coords.iter().enumerate() {
      if !x.is_finite() {
        return Err(DataError::InvalidCoordinate { node, field: "x", value: x });
      }
      if !y.is_finite() {
        return Err(DataError::InvalidCoordinate { node, field: "y", value: y });
      }
    }
    let total_service_time = service_times.iter().sum();
    Ok(Instance {
      depot: 0,
      coords,
      costs: TravelCosts::Euclidean,
      time_windows,
      service_times,
      total_service_time,
    })
  }

  pub fn depot(&self) -> usize {
    self.depot
  }

  /// Number of nodes, depot included.
  pub fn size(&self) -> usize {
    self.time_windows.len()
  }

  /// Node positions; empty when the source grammar carried no positional data.
  pub fn coordinates(&self) -> &[(f64, f64)] {
    &self.coords
  }

  pub fn time_windows(&self) -> &[TimeWindow] {
    &self.time_windows
  }

  pub fn service_times(&self) -> &[Time] {
    &self.service_times
  }

  pub fn total_service_time(&self) -> Time {
    self.total_service_time
  }

  /// Travel distance from `from` to `to`.
  ///
  /// Panics if either index is `>= size()`.
  pub fn distance(&self, from: usize, to: usize) -> f64 {
    match &self.costs {
      TravelCosts::Matrix { distances, .. } => distances[from * self.size() + to],
      TravelCosts::Euclidean => Euclidean::compute(self.coords[from], self.coords[to]),
    }
  }

  /// Travel time from `from` to `to`. Equal to [`distance`](Self::distance)
  /// for coordinate-based instances.
  pub fn travel_time(&self, from: usize, to: usize) -> f64 {
    match &self.costs {
      TravelCosts::Matrix { times, .. } => times[from * self.size() + to],
      TravelCosts::Euclidean => Euclidean::compute(self.coords[from], self.coords[to]),
    }
  }

  /// Pure function of `(from, to)`, valid for the instance's lifetime. The
  /// same index pair always yields the same value, whichever backing
  /// representation is active.
  pub fn distance_function(&self) -> impl Fn(usize, usize) -> f64 + '_ {
    move |from, to| self.distance(from, to)
  }

  pub fn time_function(&self) -> impl Fn(usize, usize) -> f64 + '_ {
    move |from, to| self.travel_time(from, to)
  }
}

fn check_non_negative(node: usize, field: &'static str, value: f64) -> Result<(), DataError> {
  if value.is_finite() && value >= 0.0 {
    Ok(())
  } else {
    Err(DataError::InvalidNumber { node, field, value })
  }
}

fn check_node_data(time_windows: &[TimeWindow], service_times: &[Time]) -> Result<(), DataError> {
  if time_windows.is_empty() {
    return Err(DataError::Empty);
  }
  if service_times.len() != time_windows.len() {
    return Err(DataError::CountMismatch {
      section: "service times",
      expected: time_windows.len(),
      found: service_times.len(),
    });
  }
  for (node, w) in time_windows.iter().enumerate() {
    check_non_negative(node, "time window start", w.start)?;
    check_non_negative(node, "time window end", w.end)?;
    if w.start > w.end {
      return Err(DataError::WindowInverted {
        node,
        start: w.start,
        end: w.end,
      });
    }
  }
  for (node, &s) in service_times.iter().enumerate() {
    check_non_negative(node, "service time", s)?;
  }
  Ok(())
}

fn check_matrix(section: &'static str, entries: &[f64], n: usize) -> Result<(), DataError> {
  if entries.len() != n * n {
    return Err(DataError::CountMismatch {
      section,
      expected: n * n,
      found: entries.len(),
    });
  }
  for (row, col) in iproduct!(0..n, 0..n) {
    let value = entries[row * n + col];
    if !value.is_finite() || value < 0.0 {
      return Err(DataError::InvalidMatrixEntry {
        matrix: section,
        row,
        col,
        value,
      });
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;

  #[test]
  fn default_is_unloaded() {
    let inst = Instance::default();
    assert_eq!(inst.size(), 0);
    assert_eq!(inst.depot(), 0);
    assert!(inst.coordinates().is_empty());
    assert!(inst.time_windows().is_empty());
    assert!(inst.service_times().is_empty());
    assert_eq!(inst.total_service_time(), 0.0);
  }

  #[test]
  fn total_service_time_is_recomputed() {
    let windows = vec![TimeWindow { start: 0.0, end: 10.0 }; 3];
    let inst = Instance::from_coords(
      vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0)],
      windows,
      vec![1.5, 2.5, 4.0],
    )
    .unwrap();
    assert_eq!(inst.total_service_time(), 8.0);
    assert_eq!(
      inst.total_service_time(),
      inst.service_times().iter().sum::<f64>()
    );
  }

  #[test]
  fn cost_functions_are_referentially_transparent() {
    let inst = Instance::from_matrices(
      1,
      vec![TimeWindow { start: 0.0, end: 5.0 }; 2],
      vec![0.0, 0.0],
      vec![0.0, 2.0, 2.0, 0.0],
      vec![0.0, 3.0, 3.0, 0.0],
    )
    .unwrap();
    let d = inst.distance_function();
    let t = inst.time_function();
    assert_eq!(d(0, 1), d(0, 1));
    assert_eq!(d(0, 1), 2.0);
    assert_eq!(t(1, 0), 3.0);
    assert_eq!(inst.depot(), 1);
  }

  #[test]
  fn mismatched_service_times_are_rejected() {
    let err = Instance::from_matrices(
      0,
      vec![TimeWindow { start: 0.0, end: 5.0 }; 2],
      vec![0.0],
      vec![0.0; 4],
      vec![0.0; 4],
    )
    .unwrap_err();
    assert_eq!(
      err,
      DataError::CountMismatch {
        section: "service times",
        expected: 2,
        found: 1
      }
    );
  }

  proptest! {
    #[test]
    fn euclidean_costs_behave_like_a_metric(
      coords in prop::collection::vec((-500.0f64..500.0, -500.0f64..500.0), 1..16)
    ) {
      let n = coords.len();
      let inst = Instance::from_coords(
        coords,
        vec![TimeWindow::default(); n],
        vec![0.0; n],
      ).unwrap();
      let d = inst.distance_function();
      let t = inst.time_function();
      for i in 0..n {
        prop_assert_eq!(d(i, i), 0.0);
        for j in 0..n {
          prop_assert!(d(i, j) >= 0.0);
          prop_assert_eq!(d(i, j), d(j, i));
          prop_assert_eq!(d(i, j), t(i, j));
        }
      }
    }
  }
}
