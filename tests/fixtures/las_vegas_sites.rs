//! Real Las Vegas service sites for realistic route fixtures.
//!
//! Coordinates sourced from OpenStreetMap. Spread across the Strip and
//! the east side so optimized orders differ visibly from stored ones.

use dayroute_planner::types::GeoPoint;

/// A named customer site.
#[derive(Debug, Clone, Copy)]
pub struct Site {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Site {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}

/// Crew depot south of the Strip.
pub const DEPOT: Site = Site::new("Depot on Dean Martin Dr", 36.0839, -115.1760);

/// Customer sites, roughly north to south with one east-side outlier.
pub const SITES: &[Site] = &[
    Site::new("Encore at Wynn", 36.1289345, -115.1653620),
    Site::new("Wynn Las Vegas", 36.1263781, -115.1658180),
    Site::new("Caesars Palace", 36.1162, -115.1745),
    Site::new("Bellagio", 36.1126, -115.1767),
    Site::new("MGM Grand", 36.1023654, -115.1688720),
    Site::new("Longhorn Casino", 36.1070664, -115.0591256),
];
