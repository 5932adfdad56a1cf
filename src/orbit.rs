//! Stylized planet motion.
//!
//! Each planet wobbles around its base coordinates on a circle whose phase
//! follows the simulated day count. This is an animation, not an ephemeris:
//! the exaggeration constants only make the wobble visible on screen and the
//! resulting positions are not where the planets really are.

use crate::catalog::Planet;
use serde::Deserialize;
use std::f64::consts::TAU;

const DAYS_PER_OFFSET_HOUR: f64 = 24.0;

/// Visual scale applied to the orbit wobble, in ra hours and dec degrees per
/// unit of `orbit_radius_factor`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub(crate) struct OrbitExaggeration {
    pub(crate) ra: f64,
    pub(crate) dec: f64,
}

impl Default for OrbitExaggeration {
    fn default() -> Self {
        Self { ra: 5.0, dec: 3.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ApparentPosition {
    pub(crate) ra: f64,
    pub(crate) dec: f64,
}

/// Simulated day count for the orbit phase.
///
/// Each hour of time offset advances the planets a full day.
pub(crate) fn simulated_days(day_of_year: u32, time_offset_hours: f64) -> f64 {
    day_of_year as f64 + time_offset_hours * DAYS_PER_OFFSET_HOUR
}

/// Orbit phase in radians, `None` for a period that cannot divide.
pub(crate) fn orbit_angle(days: f64, period_days: f64) -> Option<f64> {
    if !period_days.is_finite() || period_days <= 0.0 {
        return None;
    }
    let d = days.rem_euclid(period_days);
    Some(TAU * d / period_days)
}

pub(crate) fn apparent_position(planet: &Planet, days: f64, k: OrbitExaggeration) -> ApparentPosition {
    let Some(angle) = orbit_angle(days, planet.orbit_period_days) else {
        return ApparentPosition { ra: planet.ra, dec: planet.dec };
    };
    let (sin, cos) = angle.sin_cos();
    ApparentPosition {
        ra: planet.ra + planet.orbit_radius_factor * cos * k.ra,
        dec: planet.dec + planet.orbit_radius_factor * sin * k.dec,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BLUE;

    const EPSILON: f64 = 1e-9;

    fn planet(period: f64) -> Planet {
        Planet {
            name: "Test".to_string(),
            ra: 2.0,
            dec: -4.0,
            magnitude: 0.0,
            color: BLUE,
            display_size: 6.0,
            orbit_radius_factor: 1.5,
            orbit_period_days: period,
        }
    }

    #[test]
    fn test_day_zero_sits_on_ra_axis() {
        let k = OrbitExaggeration::default();
        let pos = apparent_position(&planet(365.0), 0.0, k);
        assert!((pos.ra - (2.0 + 1.5 * k.ra)).abs() < EPSILON);
        assert!((pos.dec - -4.0).abs() < EPSILON);
    }

    #[test]
    fn test_quarter_period_sits_on_dec_axis() {
        let k = OrbitExaggeration::default();
        let pos = apparent_position(&planet(365.0), 365.0 / 4.0, k);
        assert!((pos.ra - 2.0).abs() < 1e-6);
        assert!((pos.dec - (-4.0 + 1.5 * k.dec)).abs() < 1e-6);
    }

    #[test]
    fn test_whole_periods_repeat() {
        let k = OrbitExaggeration::default();
        let a = apparent_position(&planet(88.0), 10.0, k);
        let b = apparent_position(&planet(88.0), 10.0 + 88.0 * 3.0, k);
        let c = apparent_position(&planet(88.0), 10.0 - 88.0 * 2.0, k);
        assert!((a.ra - b.ra).abs() < 1e-6 && (a.dec - b.dec).abs() < 1e-6);
        assert!((a.ra - c.ra).abs() < 1e-6 && (a.dec - c.dec).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_period_keeps_base_position() {
        for period in [0.0, -10.0, f64::NAN] {
            let pos = apparent_position(&planet(period), 100.0, OrbitExaggeration::default());
            assert_eq!(pos, ApparentPosition { ra: 2.0, dec: -4.0 });
        }
    }

    #[test]
    fn test_offset_hour_advances_a_day_per_hour() {
        assert!((simulated_days(100, 0.0) - 100.0).abs() < EPSILON);
        assert!((simulated_days(100, 1.0) - 124.0).abs() < EPSILON);
        assert!((simulated_days(1, -2.0) - -47.0).abs() < EPSILON);
    }

    #[test]
    fn test_one_time_step_moves_mercury_visibly() {
        let mut mercury = planet(88.0);
        mercury.orbit_radius_factor = 0.4;
        let k = OrbitExaggeration::default();
        let before = orbit_angle(simulated_days(100, 0.0), 88.0).unwrap();
        let after = orbit_angle(simulated_days(100, 1.0), 88.0).unwrap();
        // day 124 wraps to 36 of 88
        assert!((after - TAU * 36.0 / 88.0).abs() < EPSILON);
        assert!((after - before).abs() > 1.0);

        let a = apparent_position(&mercury, simulated_days(100, 0.0), k);
        let b = apparent_position(&mercury, simulated_days(100, 1.0), k);
        assert!((a.ra - b.ra).abs() > 0.5);
    }

    #[test]
    fn test_angle_stays_in_one_turn() {
        let a = orbit_angle(-1.0, 365.0).unwrap();
        assert!((0.0..TAU).contains(&a));
        assert!((a - TAU * 364.0 / 365.0).abs() < EPSILON);
    }
}
