//! dayroute-planner core
//!
//! Day-route planning for field-service crews: distance resolution with
//! caching and an external-provider fallback, nearest-neighbor route
//! construction, 2-opt improvement, and insertion-cost slot suggestion
//! for a single resource's day of appointments.

pub mod traits;
pub mod types;
pub mod error;
pub mod geodesic;
pub mod cache;
pub mod provider;
pub mod resolver;
pub mod solver;
pub mod planner;
pub mod slots;
