#![allow(dead_code)]
//! Shared test fixtures: builders, in-memory collaborator fakes, and real
//! Las Vegas service sites.

pub mod las_vegas_sites;

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::NaiveDate;
use uuid::Uuid;

use dayroute_planner::error::Error;
use dayroute_planner::geodesic;
use dayroute_planner::provider::{
    DistanceProvider, EXTERNAL_PROVIDER, MatrixElement, ProviderError,
};
use dayroute_planner::traits::{AppointmentStore, ResourceDirectory};
use dayroute_planner::types::{Appointment, AppointmentStatus, GeoPoint, Resource};

pub fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

// ============================================================================
// Builders
// ============================================================================

/// Builder for appointments on the service date with sensible defaults.
#[derive(Clone)]
pub struct AppointmentBuilder {
    appointment: Appointment,
}

impl AppointmentBuilder {
    pub fn new(number: &str, hour: u32, minute: u32) -> Self {
        let start = service_date().and_hms_opt(hour, minute, 0).unwrap();
        Self {
            appointment: Appointment::new(number, start),
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.appointment.location = Some(GeoPoint::new(latitude, longitude));
        self
    }

    pub fn located(mut self, point: GeoPoint) -> Self {
        self.appointment.location = Some(point);
        self
    }

    pub fn duration(mut self, minutes: i64) -> Self {
        self.appointment.duration_minutes = minutes;
        self
    }

    pub fn status(mut self, status: AppointmentStatus) -> Self {
        self.appointment.status = status;
        self
    }

    pub fn build(self) -> Appointment {
        self.appointment
    }
}

pub fn crew_with_base(point: GeoPoint) -> Resource {
    Resource {
        id: Uuid::new_v4(),
        name: "Crew 1".to_string(),
        base_location: Some(point),
    }
}

pub fn crew_without_base() -> Resource {
    Resource {
        id: Uuid::new_v4(),
        name: "Crew 2".to_string(),
        base_location: None,
    }
}

// ============================================================================
// In-memory collaborator fakes
// ============================================================================

#[derive(Default)]
pub struct InMemoryAppointmentStore {
    by_resource: Mutex<HashMap<Uuid, Vec<Appointment>>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resource_id: Uuid, appointment: Appointment) {
        self.by_resource
            .lock()
            .unwrap()
            .entry(resource_id)
            .or_default()
            .push(appointment);
    }

    pub fn get(&self, appointment_id: Uuid) -> Option<Appointment> {
        self.by_resource
            .lock()
            .unwrap()
            .values()
            .flatten()
            .find(|appointment| appointment.id == appointment_id)
            .cloned()
    }
}

impl AppointmentStore for InMemoryAppointmentStore {
    fn appointments_in_window(
        &self,
        resource_id: Uuid,
        window_start: chrono::NaiveDateTime,
        window_end: chrono::NaiveDateTime,
        exclude_statuses: &[AppointmentStatus],
    ) -> Result<Vec<Appointment>, Error> {
        let map = self
            .by_resource
            .lock()
            .map_err(|err| Error::Store(err.to_string()))?;

        let mut result: Vec<Appointment> = map
            .get(&resource_id)
            .map(|appointments| {
                appointments
                    .iter()
                    .filter(|a| {
                        a.scheduled_start >= window_start
                            && a.scheduled_start < window_end
                            && !exclude_statuses.contains(&a.status)
                    })
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        result.sort_by_key(|a| a.scheduled_start);
        Ok(result)
    }

    fn update_travel_metrics(
        &self,
        appointment_id: Uuid,
        travel_time_minutes: i64,
        travel_distance_miles: f64,
    ) -> Result<(), Error> {
        let mut map = self
            .by_resource
            .lock()
            .map_err(|err| Error::Store(err.to_string()))?;

        for appointments in map.values_mut() {
            if let Some(appointment) = appointments
                .iter_mut()
                .find(|a| a.id == appointment_id)
            {
                appointment.travel_time_minutes = Some(travel_time_minutes);
                appointment.travel_distance_miles = Some(travel_distance_miles);
                return Ok(());
            }
        }

        Err(Error::Store(format!("unknown appointment {appointment_id}")))
    }
}

#[derive(Default)]
pub struct InMemoryResourceDirectory {
    resources: Mutex<HashMap<Uuid, Resource>>,
}

impl InMemoryResourceDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, resource: Resource) {
        self.resources
            .lock()
            .unwrap()
            .insert(resource.id, resource);
    }
}

impl ResourceDirectory for InMemoryResourceDirectory {
    fn find_resource(&self, resource_id: Uuid) -> Result<Option<Resource>, Error> {
        let resources = self
            .resources
            .lock()
            .map_err(|err| Error::Store(err.to_string()))?;
        Ok(resources.get(&resource_id).cloned())
    }
}

// ============================================================================
// Provider stub
// ============================================================================

/// Deterministic provider pricing every pair off straight-line distance at
/// 30 mph, so provider-sourced results are predictable in tests.
pub struct StraightLineProvider;

impl DistanceProvider for StraightLineProvider {
    fn matrix(
        &self,
        origins: &[GeoPoint],
        destinations: &[GeoPoint],
    ) -> Result<Vec<Vec<Option<MatrixElement>>>, ProviderError> {
        Ok(origins
            .iter()
            .map(|origin| {
                destinations
                    .iter()
                    .map(|dest| {
                        let miles = geodesic::distance_miles(*origin, *dest);
                        Some(MatrixElement {
                            distance_meters: miles * 1609.344,
                            duration_seconds: (miles * 120.0).round() as i64,
                        })
                    })
                    .collect()
            })
            .collect())
    }

    fn name(&self) -> &str {
        EXTERNAL_PROVIDER
    }
}
