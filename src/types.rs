//! Value types shared across the planner.
//!
//! Appointments and resources are owned by the surrounding system; this
//! crate reads them through the ports in [`crate::traits`] and only ever
//! writes back per-leg travel metrics.

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A latitude/longitude pair. No identity beyond its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Workflow status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    EnRoute,
    InProgress,
    Completed,
    Cancelled,
    CannotComplete,
}

impl AppointmentStatus {
    /// Terminal statuses are excluded from route optimization by default.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Completed | Self::Cancelled | Self::CannotComplete
        )
    }
}

/// A single scheduled service call.
///
/// An appointment without a location is excluded from route geometry but
/// stays visible to calling code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub appointment_number: String,
    pub scheduled_start: NaiveDateTime,
    pub duration_minutes: i64,
    pub status: AppointmentStatus,
    pub location: Option<GeoPoint>,
    pub travel_time_minutes: Option<i64>,
    pub travel_distance_miles: Option<f64>,
}

impl Appointment {
    pub fn new(appointment_number: impl Into<String>, scheduled_start: NaiveDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            appointment_number: appointment_number.into(),
            scheduled_start,
            duration_minutes: 60,
            status: AppointmentStatus::Scheduled,
            location: None,
            travel_time_minutes: None,
            travel_distance_miles: None,
        }
    }

    /// End of the service window (start plus service duration).
    pub fn scheduled_end(&self) -> NaiveDateTime {
        self.scheduled_start + Duration::minutes(self.duration_minutes)
    }
}

/// The crew or technician appointments are assigned to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub id: Uuid,
    pub name: String,
    /// Seeds the route start point when present; otherwise the first
    /// appointment's location starts the route.
    pub base_location: Option<GeoPoint>,
}

/// Where a resolved distance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceSource {
    Cache,
    Provider,
    Geodesic,
}

/// One directed travel segment between consecutive stops.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteLeg {
    pub from: GeoPoint,
    pub to: GeoPoint,
    /// Destination appointment of this leg.
    pub appointment_id: Uuid,
    pub distance_miles: f64,
    pub duration_minutes: i64,
    pub source: DistanceSource,
}

/// A costed visiting order.
///
/// With a start location there is one leg per appointment (start to first,
/// first to second, ...); without one the first appointment has no incoming
/// leg and `legs.len() == ordered.len() - 1`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResult {
    pub ordered: Vec<Appointment>,
    pub legs: Vec<RouteLeg>,
    pub total_miles: f64,
    pub total_minutes: i64,
}

impl RouteResult {
    pub fn empty() -> Self {
        Self {
            ordered: Vec::new(),
            legs: Vec::new(),
            total_miles: 0.0,
            total_minutes: 0,
        }
    }
}
