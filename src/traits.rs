//! Core collaborator ports for the route planner.
//!
//! These are intentionally minimal. The planner never touches persistence
//! directly; concrete apps implement these for their own storage and the
//! tests use in-memory fakes.

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::error::Error;
use crate::types::{Appointment, AppointmentStatus, Resource};

/// Read/write access to appointment records.
pub trait AppointmentStore {
    /// Appointments assigned to a resource with a scheduled start inside
    /// `[window_start, window_end)`, excluding the given statuses, ordered
    /// by scheduled start ascending.
    fn appointments_in_window(
        &self,
        resource_id: Uuid,
        window_start: NaiveDateTime,
        window_end: NaiveDateTime,
        exclude_statuses: &[AppointmentStatus],
    ) -> Result<Vec<Appointment>, Error>;

    /// Write computed travel metrics onto a single appointment.
    fn update_travel_metrics(
        &self,
        appointment_id: Uuid,
        travel_time_minutes: i64,
        travel_distance_miles: f64,
    ) -> Result<(), Error>;
}

/// Resolves resource records, including the optional base location that
/// seeds a day's route.
pub trait ResourceDirectory {
    fn find_resource(&self, resource_id: Uuid) -> Result<Option<Resource>, Error>;
}
