use chrono::{Datelike, Local, Timelike, Utc};

/// Wall-clock source for the sky's time base.
pub(crate) trait Clock {
    /// Current time of day in fractional hours, `[0, 24)`.
    fn hours_of_day(&self) -> f64;
    /// 1-based ordinal day of the current year.
    fn day_of_year(&self) -> u32;
}

pub(crate) struct SystemClock {
    pub(crate) use_utc: bool,
}

impl Clock for SystemClock {
    fn hours_of_day(&self) -> f64 {
        if self.use_utc {
            fractional_hours(&Utc::now())
        } else {
            fractional_hours(&Local::now())
        }
    }

    fn day_of_year(&self) -> u32 {
        if self.use_utc {
            Utc::now().ordinal()
        } else {
            Local::now().ordinal()
        }
    }
}

fn fractional_hours<T: Timelike>(t: &T) -> f64 {
    t.hour() as f64 + t.minute() as f64 / 60.0 + t.second() as f64 / 3600.0
}

#[cfg(test)]
pub(crate) struct FixedClock {
    pub(crate) hours: f64,
    pub(crate) day: u32,
}

#[cfg(test)]
impl Clock for FixedClock {
    fn hours_of_day(&self) -> f64 {
        self.hours
    }
    fn day_of_year(&self) -> u32 {
        self.day
    }
}
