//! Travel with slow charging: how far a vehicle gets when it must charge
//! at a fixed rate for part of every time window.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CostError, Result, ensure_non_negative, ensure_positive};

/// Hours spent charging within a window of `window_hours` so that driving
/// and charging balance.
///
/// With `R = speed × kwh_per_mile / charge_kw` (energy used per hour of
/// driving over energy gained per hour of charging), charging takes
/// `T × R / (1 + R)` of a window of length `T`.
///
/// # Errors
///
/// Returns `InvalidArgument` if any input is not strictly positive.
///
/// # Examples
///
/// ```
/// use vehicle_tco::trip::charging::charge_time_hours;
///
/// // 40 mph at 0.2 kWh/mi uses 8 kW, matching an 8 kW charger: half the time charging.
/// let t = charge_time_hours(40.0, 0.2, 8.0, 24.0).unwrap();
/// assert!((t - 12.0).abs() < 1e-9);
/// ```
pub fn charge_time_hours(
    speed_mph: f64,
    kwh_per_mile: f64,
    charge_kw: f64,
    window_hours: f64,
) -> Result<f64> {
    ensure_positive("speed_mph", speed_mph)?;
    ensure_positive("kwh_per_mile", kwh_per_mile)?;
    ensure_positive("charge_kw", charge_kw)?;
    ensure_positive("window_hours", window_hours)?;
    let r = speed_mph * kwh_per_mile / charge_kw;
    Ok(window_hours * r / (1.0 + r))
}

/// Miles covered in one window after setting aside [`charge_time_hours`].
///
/// # Errors
///
/// Same as [`charge_time_hours`].
pub fn miles_per_window(
    speed_mph: f64,
    kwh_per_mile: f64,
    charge_kw: f64,
    window_hours: f64,
) -> Result<f64> {
    let charging = charge_time_hours(speed_mph, kwh_per_mile, charge_kw, window_hours)?;
    Ok(speed_mph * (window_hours - charging))
}

/// Time and energy for one fixed-distance trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TripTime {
    /// Hours behind the wheel.
    pub driving_hours: f64,
    /// Hours charging to cover the energy the battery lacks.
    pub charging_hours: f64,
    /// `driving_hours + charging_hours`.
    pub total_hours: f64,
    /// Energy used over the trip (kWh).
    pub energy_kwh: f64,
    /// Energy that had to be charged on the way (kWh).
    pub supplemental_kwh: f64,
}

/// Time to drive `distance_miles` starting with `start_kwh` in the battery,
/// charging at `charge_kw` for whatever the battery cannot cover.
///
/// # Errors
///
/// Returns `InvalidArgument` for non-positive speed, efficiency or charge
/// rate, or a negative starting charge or distance.
pub fn trip_time(
    speed_mph: f64,
    kwh_per_mile: f64,
    charge_kw: f64,
    start_kwh: f64,
    distance_miles: f64,
) -> Result<TripTime> {
    ensure_positive("speed_mph", speed_mph)?;
    ensure_positive("kwh_per_mile", kwh_per_mile)?;
    ensure_positive("charge_kw", charge_kw)?;
    ensure_non_negative("start_kwh", start_kwh)?;
    ensure_non_negative("distance_miles", distance_miles)?;

    let energy_kwh = distance_miles * kwh_per_mile;
    let supplemental_kwh = (energy_kwh - start_kwh).max(0.0);
    let charging_hours = supplemental_kwh / charge_kw;
    let driving_hours = distance_miles / speed_mph;
    Ok(TripTime {
        driving_hours,
        charging_hours,
        total_hours: driving_hours + charging_hours,
        energy_kwh,
        supplemental_kwh,
    })
}

/// Slow-charging scenario: one efficiency figure per cruising speed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DailyChargingConfig {
    /// Charger power (kW).
    pub charge_kw: f64,
    /// Length of the time window driving and charging share (hours).
    pub window_hours: f64,
    /// Distance of the fixed trip (miles).
    pub distance_miles: f64,
    /// Battery energy available at departure (kWh).
    pub start_kwh: f64,
    /// Cruising speeds (mph).
    pub speeds_mph: Vec<f64>,
    /// Consumption at each speed (kWh per mile).
    pub kwh_per_mile: Vec<f64>,
}

impl Default for DailyChargingConfig {
    fn default() -> Self {
        Self {
            charge_kw: 8.0,
            window_hours: 23.0,
            distance_miles: 372.0,
            start_kwh: 65.0,
            speeds_mph: vec![30.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 100.0],
            kwh_per_mile: vec![
                0.129, 0.159, 0.174, 0.190, 0.208, 0.227, 0.249, 0.272, 0.297, 0.412,
            ],
        }
    }
}

impl DailyChargingConfig {
    /// Checks scalar ranges and that speeds and efficiencies pair up.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        ensure_positive("charge_kw", self.charge_kw)?;
        ensure_positive("window_hours", self.window_hours)?;
        ensure_non_negative("distance_miles", self.distance_miles)?;
        ensure_non_negative("start_kwh", self.start_kwh)?;
        if self.speeds_mph.is_empty() {
            return Err(CostError::invalid("speeds_mph", "must not be empty"));
        }
        if self.speeds_mph.len() != self.kwh_per_mile.len() {
            return Err(CostError::invalid(
                "kwh_per_mile",
                format!(
                    "needs one value per speed ({}), got {}",
                    self.speeds_mph.len(),
                    self.kwh_per_mile.len()
                ),
            ));
        }
        for &s in &self.speeds_mph {
            ensure_positive("speeds_mph", s)?;
        }
        for &e in &self.kwh_per_mile {
            ensure_positive("kwh_per_mile", e)?;
        }
        Ok(())
    }
}

/// One speed of the slow-charging table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyChargingRow {
    pub speed_mph: f64,
    pub wh_per_mile: f64,
    /// Hours driving within one window.
    pub driving_hours: f64,
    /// Hours charging within one window.
    pub charging_hours: f64,
    /// Miles covered per window.
    pub miles: f64,
    /// Energy used per window (kWh).
    pub kwh: f64,
    /// The fixed-distance trip at this speed.
    pub trip: TripTime,
}

/// Slow-charging table, one row per configured speed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyChargingTable {
    pub window_hours: f64,
    pub distance_miles: f64,
    pub rows: Vec<DailyChargingRow>,
}

/// Computes the slow-charging table for `config`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `config` fails validation.
pub fn daily_table(config: &DailyChargingConfig) -> Result<DailyChargingTable> {
    config.validate()?;
    let rows = config
        .speeds_mph
        .iter()
        .zip(&config.kwh_per_mile)
        .map(|(&speed, &eff)| {
            let charging_hours =
                charge_time_hours(speed, eff, config.charge_kw, config.window_hours)?;
            let driving_hours = config.window_hours - charging_hours;
            let miles = speed * driving_hours;
            let trip = trip_time(
                speed,
                eff,
                config.charge_kw,
                config.start_kwh,
                config.distance_miles,
            )?;
            Ok(DailyChargingRow {
                speed_mph: speed,
                wh_per_mile: eff * 1000.0,
                driving_hours,
                charging_hours,
                miles,
                kwh: miles * eff,
                trip,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DailyChargingTable {
        window_hours: config.window_hours,
        distance_miles: config.distance_miles,
        rows,
    })
}

impl fmt::Display for DailyChargingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Travel for {} hours", self.window_hours)?;
        writeln!(f, "  s    R   t_d   t_c     M  kWh")?;
        for r in &self.rows {
            writeln!(
                f,
                "{:3.0}  {:3.0}  {:4.1}  {:4.1}  {:4.0}  {:3.0}",
                r.speed_mph, r.wh_per_mile, r.driving_hours, r.charging_hours, r.miles, r.kwh
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Drive {} miles", self.distance_miles)?;
        writeln!(f, "  s    R   t_d   t_c     T  kWh  sup")?;
        for r in &self.rows {
            writeln!(
                f,
                "{:3.0}  {:3.0}  {:4.1}  {:4.1}  {:4.1}  {:3.0}  {:3.0}",
                r.speed_mph,
                r.wh_per_mile,
                r.trip.driving_hours,
                r.trip.charging_hours,
                r.trip.total_hours,
                r.trip.energy_kwh,
                r.trip.supplemental_kwh
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_time_balances_energy() {
        // Energy charged equals energy driven within the window.
        let (speed, eff, kw, t) = (65.0, 0.227, 8.0, 23.0);
        let tc = charge_time_hours(speed, eff, kw, t).unwrap();
        let td = t - tc;
        assert!((tc * kw - td * speed * eff).abs() < 1e-9);
    }

    #[test]
    fn miles_per_window_decreases_with_consumption() {
        let low = miles_per_window(60.0, 0.2, 8.0, 23.0).unwrap();
        let high = miles_per_window(60.0, 0.4, 8.0, 23.0).unwrap();
        assert!(high < low);
    }

    #[test]
    fn trip_within_battery_needs_no_charging() {
        let t = trip_time(60.0, 0.2, 8.0, 65.0, 300.0).unwrap();
        assert_eq!(t.charging_hours, 0.0);
        assert_eq!(t.supplemental_kwh, 0.0);
        assert!((t.total_hours - 5.0).abs() < 1e-9);
    }

    #[test]
    fn trip_beyond_battery_charges_the_shortfall() {
        let t = trip_time(50.0, 0.25, 10.0, 50.0, 400.0).unwrap();
        // 100 kWh needed, 50 kWh on board
        assert!((t.supplemental_kwh - 50.0).abs() < 1e-9);
        assert!((t.charging_hours - 5.0).abs() < 1e-9);
        assert!((t.total_hours - 13.0).abs() < 1e-9);
    }

    #[test]
    fn zero_speed_rejected() {
        assert!(charge_time_hours(0.0, 0.2, 8.0, 23.0).is_err());
        assert!(trip_time(0.0, 0.2, 8.0, 65.0, 100.0).is_err());
    }

    #[test]
    fn default_table_has_one_row_per_speed() {
        let table = daily_table(&DailyChargingConfig::default()).unwrap();
        assert_eq!(table.rows.len(), 10);
        assert_eq!(table.rows[0].wh_per_mile.round(), 129.0);
        let text = table.to_string();
        assert!(text.starts_with("Travel for 23 hours"));
        assert!(text.contains("Drive 372 miles"));
    }

    #[test]
    fn mismatched_lengths_rejected() {
        let cfg = DailyChargingConfig {
            kwh_per_mile: vec![0.2],
            ..DailyChargingConfig::default()
        };
        let err = daily_table(&cfg);
        assert!(
            matches!(err, Err(CostError::InvalidArgument { ref argument, .. }) if argument == "kwh_per_mile")
        );
    }
}
