//! Electric road-trip planning: fast-charging stops and slow daily charging.

pub mod charging;
pub mod road_trip;

use serde::{Deserialize, Serialize};

pub use charging::{DailyChargingConfig, DailyChargingTable, charge_time_hours, daily_table, trip_time};
pub use road_trip::{RoadTripConfig, RoadTripPlan, plan};

/// Both trip scenarios, as read from a catalog's `[trip]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TripConfig {
    /// Fast-charging road trip (`[trip.road]`).
    pub road: RoadTripConfig,
    /// Slow daily charging (`[trip.daily]`).
    pub daily: DailyChargingConfig,
}
