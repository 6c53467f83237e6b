//! Day-route orchestration for a single resource.
//!
//! Ties the resolver and solver together: fetch a resource's day of
//! appointments, cost the stored order, build and cost an optimized order,
//! report the savings, and optionally write per-leg travel metrics back
//! onto the appointments. Note the costing here uses resolved distances
//! while the solver optimizes on geodesic ones; see [`crate::solver`].

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::cache::DistanceCache;
use crate::error::Error;
use crate::resolver::DistanceResolver;
use crate::solver::{self, DEFAULT_TWO_OPT_ITERATIONS};
use crate::traits::{AppointmentStore, ResourceDirectory};
use crate::types::{
    Appointment, AppointmentStatus, GeoPoint, RouteLeg, RouteResult,
};

/// Ordering strategy for the optimized route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Nearest-neighbor construction refined by 2-opt.
    #[default]
    TwoOpt,
    /// Nearest-neighbor construction only.
    NearestNeighbor,
}

#[derive(Debug, Clone, Default)]
pub struct OptimizeOptions {
    pub algorithm: Algorithm,
    /// Include appointments already in a terminal status.
    pub include_completed: bool,
}

/// Travel saved by the optimized order relative to the stored one.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Savings {
    pub miles: f64,
    pub minutes: i64,
    pub percent_reduction: f64,
}

impl Savings {
    fn between(original: &RouteResult, optimized: &RouteResult) -> Self {
        let miles = original.total_miles - optimized.total_miles;
        let percent_reduction = if original.total_miles > 0.0 {
            miles / original.total_miles * 100.0
        } else {
            0.0
        };

        Self {
            miles,
            minutes: original.total_minutes - optimized.total_minutes,
            percent_reduction,
        }
    }
}

#[derive(Debug, Clone)]
pub struct RouteOptimization {
    pub original: RouteResult,
    pub optimized: RouteResult,
    pub savings: Savings,
}

impl RouteOptimization {
    fn empty() -> Self {
        Self {
            original: RouteResult::empty(),
            optimized: RouteResult::empty(),
            savings: Savings::default(),
        }
    }
}

/// Outcome of a travel-metric write-back.
#[derive(Debug, Clone)]
pub struct TravelTimeUpdate {
    pub appointments_updated: usize,
    pub savings: Savings,
}

/// Statuses excluded from optimization unless `include_completed` is set.
const TERMINAL_STATUSES: [AppointmentStatus; 3] = [
    AppointmentStatus::Completed,
    AppointmentStatus::Cancelled,
    AppointmentStatus::CannotComplete,
];

pub struct RoutePlanner<S, D, C> {
    store: S,
    directory: D,
    resolver: DistanceResolver<C>,
}

impl<S, D, C> RoutePlanner<S, D, C>
where
    S: AppointmentStore,
    D: ResourceDirectory,
    C: DistanceCache,
{
    pub fn new(store: S, directory: D, resolver: DistanceResolver<C>) -> Self {
        Self {
            store,
            directory,
            resolver,
        }
    }

    pub fn resolver(&self) -> &DistanceResolver<C> {
        &self.resolver
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cost a day's route as stored, compute an optimized order, and report
    /// the savings between the two.
    ///
    /// An unknown resource is an error; a day with no qualifying
    /// appointments is an empty result with zero savings.
    #[tracing::instrument(skip(self))]
    pub fn optimize_resource_route(
        &self,
        resource_id: Uuid,
        date: NaiveDate,
        options: &OptimizeOptions,
    ) -> Result<RouteOptimization, Error> {
        let resource = self
            .directory
            .find_resource(resource_id)?
            .ok_or(Error::ResourceNotFound(resource_id))?;

        let appointments = self.day_appointments(resource_id, date, options.include_completed)?;
        let located: Vec<Appointment> = appointments
            .into_iter()
            .filter(|appointment| appointment.location.is_some())
            .collect();

        if located.is_empty() {
            return Ok(RouteOptimization::empty());
        }

        let start = resource.base_location;
        let original = self.compute_route_cost(&located, start);

        let ordered = match options.algorithm {
            Algorithm::NearestNeighbor => solver::nearest_neighbor_order(&located, start),
            Algorithm::TwoOpt => {
                let constructed = solver::nearest_neighbor_order(&located, start);
                solver::two_opt_improve(&constructed, start, DEFAULT_TWO_OPT_ITERATIONS)
            }
        };
        let optimized = self.compute_route_cost(&ordered, start);

        let savings = Savings::between(&original, &optimized);
        Ok(RouteOptimization {
            original,
            optimized,
            savings,
        })
    }

    /// Re-run optimization and write each leg's travel time and distance
    /// onto its destination appointment.
    #[tracing::instrument(skip(self))]
    pub fn update_appointment_travel_times(
        &self,
        resource_id: Uuid,
        date: NaiveDate,
    ) -> Result<TravelTimeUpdate, Error> {
        let optimization =
            self.optimize_resource_route(resource_id, date, &OptimizeOptions::default())?;

        let mut appointments_updated = 0;
        for leg in &optimization.optimized.legs {
            self.store.update_travel_metrics(
                leg.appointment_id,
                leg.duration_minutes,
                leg.distance_miles,
            )?;
            appointments_updated += 1;
        }

        Ok(TravelTimeUpdate {
            appointments_updated,
            savings: optimization.savings,
        })
    }

    /// Walk an order and cost every leg with resolved distances.
    ///
    /// With a start location the first leg runs start to first appointment;
    /// without one the first appointment has no incoming leg. Appointments
    /// without a location never produce a leg.
    pub fn compute_route_cost(
        &self,
        appointments: &[Appointment],
        start: Option<GeoPoint>,
    ) -> RouteResult {
        let mut legs = Vec::new();
        let mut total_miles = 0.0;
        let mut total_minutes = 0;
        let mut prev = start;

        for appointment in appointments {
            let Some(to) = appointment.location else {
                continue;
            };
            if let Some(from) = prev {
                let resolved = self.resolver.resolve(from, to);
                total_miles += resolved.distance_miles;
                total_minutes += resolved.duration_minutes;
                legs.push(RouteLeg {
                    from,
                    to,
                    appointment_id: appointment.id,
                    distance_miles: resolved.distance_miles,
                    duration_minutes: resolved.duration_minutes,
                    source: resolved.source,
                });
            }
            prev = Some(to);
        }

        RouteResult {
            ordered: appointments.to_vec(),
            legs,
            total_miles,
            total_minutes,
        }
    }

    fn day_appointments(
        &self,
        resource_id: Uuid,
        date: NaiveDate,
        include_completed: bool,
    ) -> Result<Vec<Appointment>, Error> {
        let window_start = day_start(date);
        let window_end = window_start + Duration::days(1);
        let excluded: &[AppointmentStatus] = if include_completed {
            &[]
        } else {
            &TERMINAL_STATUSES
        };

        self.store
            .appointments_in_window(resource_id, window_start, window_end, excluded)
    }
}

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or(NaiveDateTime::MIN)
}
