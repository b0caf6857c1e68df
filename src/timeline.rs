use crate::error::{HistgenError, Result};
use chrono::{Duration, NaiveDateTime};
use rand::Rng;

pub const ABSENCE_PROBABILITY: f64 = 0.05;
pub const OFF_HOURS_PROBABILITY: f64 = 0.15;

/// Which kind of pause separated two commits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gap {
    /// 3 to 14 days.
    Absence,
    /// 12 to 48 hours.
    OffHours,
    /// 1 to 180 minutes.
    Burst,
}

impl Gap {
    /// The off-hours roll is independent of the absence roll, so its effective
    /// share is 0.95 * 0.15.
    pub fn roll<R: Rng>(rng: &mut R) -> Self {
        if rng.gen::<f64>() < ABSENCE_PROBABILITY {
            Gap::Absence
        } else if rng.gen::<f64>() < OFF_HOURS_PROBABILITY {
            Gap::OffHours
        } else {
            Gap::Burst
        }
    }

    pub fn delta<R: Rng>(self, rng: &mut R) -> Duration {
        match self {
            Gap::Absence => Duration::days(rng.gen_range(3..=14)),
            Gap::OffHours => Duration::hours(rng.gen_range(12..=48)),
            Gap::Burst => Duration::minutes(rng.gen_range(1..=180)),
        }
    }

    pub fn bounds(self) -> (Duration, Duration) {
        match self {
            Gap::Absence => (Duration::days(3), Duration::days(14)),
            Gap::OffHours => (Duration::hours(12), Duration::hours(48)),
            Gap::Burst => (Duration::minutes(1), Duration::minutes(180)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Clock {
    now: NaiveDateTime,
}

impl Clock {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { now: start }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.now
    }

    /// Move forward by one randomly chosen gap and return the new time.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Result<NaiveDateTime> {
        let gap = Gap::roll(rng);
        let delta = gap.delta(rng);
        self.now = self
            .now
            .checked_add_signed(delta)
            .ok_or(HistgenError::ClockOverflow(self.now))?;
        Ok(self.now)
    }
}
