//! Long-distance travel with fast-charging stops.
//!
//! For each cruising speed the planner drives a leg on the usable share of
//! the battery, stops to recharge that share, and repeats until the trip
//! distance is covered. Faster speeds shorten legs and raise energy cost;
//! the table shows what each hour saved costs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result, ensure_non_negative, ensure_positive};

/// Road-trip parameters: the vehicle's power draw at each cruising speed
/// and the charging network it relies on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoadTripConfig {
    /// Fast-charger power (kW).
    pub charge_kw: f64,
    /// Battery capacity (kWh).
    pub battery_kwh: f64,
    /// Fixed time lost per stop on top of charging (hours).
    pub stop_overhead_hours: f64,
    /// Share of the battery used between stops, `(0, 1]`.
    pub usable_fraction: f64,
    /// Charging price per kWh.
    pub energy_price: f64,
    /// Total trip distance (miles).
    pub trip_miles: f64,
    /// Cruising speeds (mph), slowest first.
    pub speeds_mph: Vec<f64>,
    /// Power drawn at each speed (kW).
    pub power_kw: Vec<f64>,
}

impl Default for RoadTripConfig {
    fn default() -> Self {
        Self {
            charge_kw: 175.0,
            battery_kwh: 82.0,
            stop_overhead_hours: 3.0 / 60.0,
            usable_fraction: 0.6,
            energy_price: 0.26,
            trip_miles: 3000.0,
            speeds_mph: vec![20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 75.0, 80.0, 90.0, 100.0],
            power_kw: [5.5, 8.0, 10.0, 13.0, 17.0, 23.0, 26.6, 31.0, 41.0, 55.0]
                .iter()
                .map(|p| p * 0.88)
                .collect(),
        }
    }
}

impl RoadTripConfig {
    /// Checks scalar ranges and that speeds and power draws pair up.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("charge_kw", self.charge_kw)?;
        ensure_positive("battery_kwh", self.battery_kwh)?;
        ensure_non_negative("stop_overhead_hours", self.stop_overhead_hours)?;
        if !(self.usable_fraction > 0.0 && self.usable_fraction <= 1.0) {
            return Err(CostError::invalid(
                "usable_fraction",
                format!("must be in (0.0, 1.0], got {}", self.usable_fraction),
            ));
        }
        ensure_non_negative("energy_price", self.energy_price)?;
        ensure_positive("trip_miles", self.trip_miles)?;
        if self.speeds_mph.is_empty() {
            return Err(CostError::invalid("speeds_mph", "must not be empty"));
        }
        if self.speeds_mph.len() != self.power_kw.len() {
            return Err(CostError::invalid(
                "power_kw",
                format!(
                    "needs one value per speed ({}), got {}",
                    self.speeds_mph.len(),
                    self.power_kw.len()
                ),
            ));
        }
        for &s in &self.speeds_mph {
            ensure_positive("speeds_mph", s)?;
        }
        for &p in &self.power_kw {
            ensure_positive("power_kw", p)?;
        }
        Ok(())
    }

    /// Hours spent at the charger per stop, excluding the fixed overhead.
    pub fn charge_stop_hours(&self) -> f64 {
        self.battery_kwh * self.usable_fraction / self.charge_kw
    }
}

/// One cruising speed of a road-trip plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadTripRow {
    pub speed_mph: f64,
    /// Consumption (Wh per mile).
    pub wh_per_mile: f64,
    /// Range on a full battery (miles).
    pub full_range_miles: f64,
    /// Distance driven between stops (miles).
    pub leg_miles: f64,
    /// Time driven between stops (hours).
    pub leg_hours: f64,
    /// Average speed including charge stops and stop overhead (mph).
    pub effective_speed_mph: f64,
    /// Time for the whole trip (hours).
    pub trip_hours: f64,
    /// Energy cost of the whole trip.
    pub trip_cost: f64,
    /// Extra dollars per hour saved relative to the previous row. `None`
    /// for the first row, or when the two rows take equally long.
    pub marginal_cost_per_hour_saved: Option<f64>,
}

/// Output of [`plan`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadTripPlan {
    /// Hours per stop spent charging the usable share.
    pub charge_stop_hours: f64,
    /// Share of the battery used between stops.
    pub usable_fraction: f64,
    pub charge_kw: f64,
    pub trip_miles: f64,
    /// One row per configured speed, in configuration order.
    pub rows: Vec<RoadTripRow>,
}

/// Builds the road-trip table for `config`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `config` fails validation.
pub fn plan(config: &RoadTripConfig) -> Result<RoadTripPlan> {
    config.validate()?;

    let charge_stop_hours = config.charge_stop_hours();
    let usable_kwh = config.battery_kwh * config.usable_fraction;

    let mut rows: Vec<RoadTripRow> = Vec::with_capacity(config.speeds_mph.len());
    for (&speed, &power) in config.speeds_mph.iter().zip(&config.power_kw) {
        let wh_per_mile = power * 1000.0 / speed;
        let full_range_miles = config.battery_kwh * 1000.0 / wh_per_mile;
        let leg_hours = usable_kwh / power;
        let leg_miles = leg_hours * speed;
        let effective_speed_mph =
            leg_miles / (leg_hours + charge_stop_hours + config.stop_overhead_hours);
        let trip_hours = config.trip_miles / effective_speed_mph;
        let trip_cost = config.trip_miles * config.energy_price * wh_per_mile / 1000.0;

        let marginal_cost_per_hour_saved = rows.last().and_then(|prev| {
            let saved = prev.trip_hours - trip_hours;
            (saved != 0.0).then(|| (trip_cost - prev.trip_cost) / saved)
        });

        rows.push(RoadTripRow {
            speed_mph: speed,
            wh_per_mile,
            full_range_miles,
            leg_miles,
            leg_hours,
            effective_speed_mph,
            trip_hours,
            trip_cost,
            marginal_cost_per_hour_saved,
        });
    }

    Ok(RoadTripPlan {
        charge_stop_hours,
        usable_fraction: config.usable_fraction,
        charge_kw: config.charge_kw,
        trip_miles: config.trip_miles,
        rows,
    })
}

impl fmt::Display for RoadTripPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:.0} mins required for {:.0}% charge at {} kW",
            self.charge_stop_hours * 60.0,
            self.usable_fraction * 100.0,
            self.charge_kw
        )?;
        writeln!(f, "Trip dist: {} mi", self.trip_miles)?;
        writeln!(f)?;
        writeln!(f, "mph   mph   mi   $/trip  batHr   tripHr  $save/Hr")?;
        for r in &self.rows {
            let marginal = r
                .marginal_cost_per_hour_saved
                .map_or_else(|| "    -".to_string(), |m| format!("{m:5.1}"));
            writeln!(
                f,
                "{:3.0}:   {:2.0}  {:3.0}     ${:3.0}   {:4.1}    {:5.1}     {}",
                r.speed_mph,
                r.effective_speed_mph,
                r.leg_miles,
                r.trip_cost,
                r.leg_hours,
                r.trip_hours,
                marginal
            )?;
        }
        Ok(())
    }
}
