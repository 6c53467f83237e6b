//! Great-circle distance estimation.
//!
//! Used wherever a fast approximation is acceptable: constructing and
//! improving candidate orders, and as the fallback when the external
//! provider is unavailable. Less accurate than a routing provider (ignores
//! roads) but always available.

use rayon::prelude::*;

use crate::types::GeoPoint;

/// Earth radius in miles.
const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Fixed parking/walking allowance added to every travel estimate.
const STOP_BUFFER_MINUTES: f64 = 5.0;

/// Assumed average driving speed by area density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AreaType {
    Urban,
    #[default]
    Suburban,
    Rural,
}

impl AreaType {
    pub fn average_speed_mph(self) -> f64 {
        match self {
            Self::Urban => 20.0,
            Self::Suburban => 30.0,
            Self::Rural => 45.0,
        }
    }
}

/// Haversine great-circle distance between two points in miles.
///
/// Symmetric, and zero for a point against itself.
pub fn distance_miles(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.latitude.to_radians();
    let lat_b = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lng = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    EARTH_RADIUS_MILES * c
}

/// Rough door-to-door travel time: distance at the area's average speed
/// plus the fixed stop buffer, rounded up to whole minutes.
pub fn estimate_travel_minutes(distance_miles: f64, area: AreaType) -> i64 {
    let driving_minutes = distance_miles / area.average_speed_mph() * 60.0;
    (driving_minutes + STOP_BUFFER_MINUTES).ceil() as i64
}

/// Full pairwise distance matrix in miles, indexed by the input order.
///
/// Rows are computed in parallel; the solver scans this matrix heavily
/// while evaluating candidate orders.
pub fn distance_matrix(points: &[GeoPoint]) -> Vec<Vec<f64>> {
    points
        .par_iter()
        .map(|from| points.iter().map(|to| distance_miles(*from, *to)).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point_is_zero() {
        let p = GeoPoint::new(36.1, -115.1);
        assert_eq!(distance_miles(p, p), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let a = GeoPoint::new(36.17, -115.14);
        let b = GeoPoint::new(34.05, -118.24);
        assert_eq!(distance_miles(a, b), distance_miles(b, a));
    }

    #[test]
    fn test_known_distance() {
        // Las Vegas to Los Angeles, ~230 miles great-circle
        let lv = GeoPoint::new(36.17, -115.14);
        let la = GeoPoint::new(34.05, -118.24);
        let miles = distance_miles(lv, la);
        assert!(miles > 220.0 && miles < 240.0, "LV to LA was {}", miles);
    }

    #[test]
    fn test_zero_distance_is_buffer_only() {
        assert_eq!(estimate_travel_minutes(0.0, AreaType::Rural), 5);
    }

    #[test]
    fn test_suburban_estimate_rounds_up() {
        // 10 miles at 30 mph = 20 minutes driving + 5 buffer
        assert_eq!(estimate_travel_minutes(10.0, AreaType::Suburban), 25);
        // 1 mile at 20 mph = 3 minutes driving, ceil(3 + 5) = 8
        assert_eq!(estimate_travel_minutes(1.0, AreaType::Urban), 8);
    }

    #[test]
    fn test_area_speeds() {
        assert_eq!(AreaType::Urban.average_speed_mph(), 20.0);
        assert_eq!(AreaType::Suburban.average_speed_mph(), 30.0);
        assert_eq!(AreaType::Rural.average_speed_mph(), 45.0);
        assert_eq!(AreaType::default(), AreaType::Suburban);
    }

    #[test]
    fn test_matrix_diagonal_and_symmetry() {
        let points = vec![
            GeoPoint::new(36.1, -115.1),
            GeoPoint::new(36.2, -115.2),
            GeoPoint::new(36.3, -115.3),
        ];
        let matrix = distance_matrix(&points);

        for i in 0..points.len() {
            assert_eq!(matrix[i][i], 0.0);
            for j in 0..points.len() {
                assert_eq!(matrix[i][j], matrix[j][i]);
            }
        }
    }
}
