//! Insertion-cost slot suggestion for a newly requested appointment.
//!
//! Evaluates every insertion position in a day's optimized route and ranks
//! them by the marginal travel they add.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::cache::DistanceCache;
use crate::error::Error;
use crate::planner::{OptimizeOptions, RoutePlanner};
use crate::resolver::ResolvedDistance;
use crate::traits::{AppointmentStore, ResourceDirectory};
use crate::types::GeoPoint;

/// One candidate insertion of the new appointment.
#[derive(Debug, Clone)]
pub struct SlotSuggestion {
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub additional_travel_miles: f64,
    pub additional_travel_minutes: i64,
    /// Index in the optimized order the new appointment would take.
    pub insert_position: usize,
    pub previous_appointment_id: Option<Uuid>,
    pub next_appointment_id: Option<Uuid>,
}

impl<S, D, C> RoutePlanner<S, D, C>
where
    S: AppointmentStore,
    D: ResourceDirectory,
    C: DistanceCache,
{
    /// Rank every insertion position in the resource's optimized day route
    /// by additional travel, cheapest first.
    ///
    /// The marginal cost of a position is the detour through the new stop:
    /// predecessor-to-new plus new-to-successor, minus the direct
    /// predecessor-to-successor leg the detour replaces. Positions at the
    /// route boundary simply drop the absent term. An empty day yields a
    /// single suggestion at the start of the working day.
    #[tracing::instrument(skip(self))]
    pub fn suggest_optimal_time_slot(
        &self,
        location: GeoPoint,
        resource_id: Uuid,
        date: NaiveDate,
        duration_minutes: i64,
    ) -> Result<Vec<SlotSuggestion>, Error> {
        let optimization =
            self.optimize_resource_route(resource_id, date, &OptimizeOptions::default())?;
        let ordered = optimization.optimized.ordered;

        if ordered.is_empty() {
            let start_time = workday_start(date);
            return Ok(vec![SlotSuggestion {
                start_time,
                end_time: start_time + Duration::minutes(duration_minutes),
                additional_travel_miles: 0.0,
                additional_travel_minutes: 0,
                insert_position: 0,
                previous_appointment_id: None,
                next_appointment_id: None,
            }]);
        }

        let mut suggestions = Vec::with_capacity(ordered.len() + 1);
        for position in 0..=ordered.len() {
            let previous = position.checked_sub(1).and_then(|i| ordered.get(i));
            let next = ordered.get(position);
            let previous_point = previous.and_then(|a| a.location);
            let next_point = next.and_then(|a| a.location);

            let mut additional_miles = 0.0;
            let mut additional_minutes = 0;
            let mut inbound: Option<ResolvedDistance> = None;

            if let Some(from) = previous_point {
                let leg = self.resolver().resolve(from, location);
                additional_miles += leg.distance_miles;
                additional_minutes += leg.duration_minutes;
                inbound = Some(leg);
            }
            if let Some(to) = next_point {
                let leg = self.resolver().resolve(location, to);
                additional_miles += leg.distance_miles;
                additional_minutes += leg.duration_minutes;
            }
            if let (Some(from), Some(to)) = (previous_point, next_point) {
                let direct = self.resolver().resolve(from, to);
                additional_miles -= direct.distance_miles;
                additional_minutes -= direct.duration_minutes;
            }

            let start_time = match (previous, inbound) {
                (Some(prev), Some(leg)) => {
                    prev.scheduled_end() + Duration::minutes(leg.duration_minutes)
                }
                _ => workday_start(date),
            };

            suggestions.push(SlotSuggestion {
                start_time,
                end_time: start_time + Duration::minutes(duration_minutes),
                additional_travel_miles: additional_miles,
                additional_travel_minutes: additional_minutes,
                insert_position: position,
                previous_appointment_id: previous.map(|a| a.id),
                next_appointment_id: next.map(|a| a.id),
            });
        }

        suggestions.sort_by_key(|suggestion| suggestion.additional_travel_minutes);
        Ok(suggestions)
    }
}

/// 08:00 local, the default first-slot start on an empty day.
fn workday_start(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(8, 0, 0).unwrap_or(NaiveDateTime::MIN)
}
