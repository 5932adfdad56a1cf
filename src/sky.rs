//! Equatorial coordinates to the sky plane.
//!
//! This is an orthographic-style sketch, not a horizontal-coordinate
//! transform: declination alone drives the vertical axis and the hour angle
//! only spreads objects sideways.

const HOURS_PER_DAY: f64 = 24.0;
const DEGREES_PER_HOUR: f64 = 15.0;
const SCALE_DIVISOR: f64 = 2.5;

/// A point on the sky plane, relative to the canvas center.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SkyPoint {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

impl SkyPoint {
    pub(crate) fn scaled(self, s: f64) -> SkyPoint {
        SkyPoint { x: self.x * s, y: self.y * s }
    }

    pub(crate) fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Sidereal-like time in `[0, 24)`, taken straight from the wall clock.
pub(crate) fn local_sidereal_hours(now_hours: f64, time_offset_hours: f64) -> f64 {
    (now_hours + time_offset_hours).rem_euclid(HOURS_PER_DAY)
}

/// Unit sky-plane position of `(ra, dec)` at `now_hours + time_offset_hours`.
///
/// `ra` is in hours, `dec` in degrees. Nothing is validated; out-of-range
/// inputs wrap through the trigonometry and non-finite inputs come back
/// non-finite for the caller to cull.
pub(crate) fn project(ra_hours: f64, dec_deg: f64, time_offset_hours: f64, now_hours: f64) -> SkyPoint {
    let lst = local_sidereal_hours(now_hours, time_offset_hours);
    let hour_angle = ((lst - ra_hours) * DEGREES_PER_HOUR).to_radians();
    let dec = dec_deg.to_radians();
    SkyPoint {
        x: dec.cos() * hour_angle.sin(),
        y: -dec.sin(),
    }
}

/// Pixels per sky-plane unit for a canvas of the given size.
pub(crate) fn sky_scale(width: f64, height: f64) -> f64 {
    width.min(height) / SCALE_DIVISOR
}
