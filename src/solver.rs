//! Route construction and improvement.
//!
//! Both heuristics cost candidate orders on straight-line (geodesic)
//! distance over a precomputed matrix; the planner reports savings on
//! resolved (cache/provider) distance. The two metrics differ, so an order
//! optimal under one is not guaranteed optimal under the other. That split
//! is a deliberate property of the design: candidate evaluation stays cheap
//! and offline, real distances are paid for once per reported leg.

use crate::geodesic;
use crate::types::{Appointment, GeoPoint};

/// Default cap on 2-opt improvement passes.
pub const DEFAULT_TWO_OPT_ITERATIONS: usize = 100;

/// Geodesic locations of a candidate route, with the optional start point
/// folded into the shared distance matrix.
struct RouteGeometry {
    matrix: Vec<Vec<f64>>,
    start: Option<usize>,
}

impl RouteGeometry {
    fn new(appointments: &[Appointment], start: Option<GeoPoint>) -> Self {
        let mut points: Vec<GeoPoint> = appointments
            .iter()
            .filter_map(|appointment| appointment.location)
            .collect();
        let start = start.map(|point| {
            points.push(point);
            points.len() - 1
        });

        Self {
            matrix: geodesic::distance_matrix(&points),
            start,
        }
    }

    fn between(&self, from: usize, to: usize) -> f64 {
        self.matrix[from][to]
    }

    /// Total length of an order, including the start leg when a start
    /// location exists.
    fn route_length(&self, order: &[usize]) -> f64 {
        let mut total = 0.0;
        let mut prev = self.start;
        for &index in order {
            if let Some(from) = prev {
                total += self.matrix[from][index];
            }
            prev = Some(index);
        }
        total
    }
}

/// Appointments that can participate in route geometry.
fn located(appointments: &[Appointment]) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|appointment| appointment.location.is_some())
        .cloned()
        .collect()
}

/// Greedy nearest-neighbor visiting order.
///
/// Starting from `start` (or the first appointment's location when absent),
/// repeatedly append the closest unvisited appointment by straight-line
/// distance. Ties break to the first-found minimum. Appointments without a
/// location are skipped. O(n²).
pub fn nearest_neighbor_order(
    appointments: &[Appointment],
    start: Option<GeoPoint>,
) -> Vec<Appointment> {
    let located = located(appointments);
    if located.len() <= 1 {
        return located;
    }

    let geometry = RouteGeometry::new(&located, start);
    let mut remaining: Vec<usize> = (0..located.len()).collect();
    let mut order = Vec::with_capacity(located.len());
    let mut current = geometry.start.unwrap_or(0);

    while !remaining.is_empty() {
        let mut best_position = 0;
        let mut best_distance = f64::INFINITY;
        for (position, &index) in remaining.iter().enumerate() {
            let distance = geometry.between(current, index);
            if distance < best_distance {
                best_distance = distance;
                best_position = position;
            }
        }

        let index = remaining.remove(best_position);
        order.push(index);
        current = index;
    }

    order.into_iter().map(|index| located[index].clone()).collect()
}

/// 2-opt local search over an existing order.
///
/// Each pass scans every index pair `(i, j)` and reverses the segment
/// strictly after `i` through `j` whenever the reversal strictly shortens
/// the total geodesic length, adopting improvements as it goes. Stops after
/// a pass with no improvement or after `max_iterations` passes. The output
/// is always a permutation of the input; orders of length two or less are
/// returned unchanged.
pub fn two_opt_improve(
    appointments: &[Appointment],
    start: Option<GeoPoint>,
    max_iterations: usize,
) -> Vec<Appointment> {
    let located = located(appointments);
    if located.len() <= 2 {
        return located;
    }

    let geometry = RouteGeometry::new(&located, start);
    let mut order: Vec<usize> = (0..located.len()).collect();
    let mut best_length = geometry.route_length(&order);
    let n = order.len();

    for _ in 0..max_iterations {
        let mut improved = false;

        for i in 0..n - 1 {
            for j in i + 2..n {
                let mut candidate = order.clone();
                candidate[i + 1..=j].reverse();

                let candidate_length = geometry.route_length(&candidate);
                if candidate_length < best_length {
                    order = candidate;
                    best_length = candidate_length;
                    improved = true;
                }
            }
        }

        if !improved {
            break;
        }
    }

    order.into_iter().map(|index| located[index].clone()).collect()
}

/// Total straight-line length of an order in miles, the metric both
/// heuristics optimize.
pub fn geodesic_route_length(appointments: &[Appointment], start: Option<GeoPoint>) -> f64 {
    let located = located(appointments);
    let geometry = RouteGeometry::new(&located, start);
    let order: Vec<usize> = (0..located.len()).collect();
    geometry.route_length(&order)
}
