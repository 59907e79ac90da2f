//! Tuning parameters for offer spawning and job countdowns.
//!
//! `JobConfig` is the raw, file-friendly form (plain `f64` seconds, optional
//! serde).  [`JobConfig::timing`] validates it once at startup and returns an
//! [`OfferTiming`] built from `Duration`s; everything downstream consumes the
//! validated form only, so a bad value can never surface mid-session.

use std::time::Duration;

use crate::{CoreError, CoreResult, SimRng};

// ── CountdownStart ────────────────────────────────────────────────────────────

/// When a job's own `time_limit` countdown starts running.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CountdownStart {
    /// The countdown only runs once the offer has been accepted.  An offer's
    /// clock is untouched while it waits, so the full limit is available
    /// from the moment of acceptance.
    #[default]
    OnAcceptance,
    /// The countdown runs from creation.  Time spent waiting in the offer
    /// list is lost, and an offer whose countdown lapses before anyone
    /// accepts it is withdrawn.
    OnCreation,
}

// ── JobConfig ─────────────────────────────────────────────────────────────────

/// Session configuration.
///
/// Typically loaded from a JSON file by the host application and handed to
/// `dl_sim::SessionBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct JobConfig {
    /// Lower bound of a job's time limit, in seconds.
    pub min_delivery_time_secs: f64,
    /// Upper bound of a job's time limit, in seconds.
    pub max_delivery_time_secs: f64,
    /// Lower bound of the pause between two spawn cycles, in seconds.
    pub min_spawn_interval_secs: f64,
    /// Upper bound of the pause between two spawn cycles, in seconds.
    pub max_spawn_interval_secs: f64,
    /// How long an offer stays available before it auto-expires, in seconds.
    pub accept_duration_secs: f64,
    pub countdown_start: CountdownStart,
    /// Master RNG seed.  The same seed and inputs replay identically.
    pub seed: u64,
}

impl Default for JobConfig {
    fn default() -> Self {
        Self {
            min_delivery_time_secs:  60.0,
            max_delivery_time_secs:  200.0,
            min_spawn_interval_secs: 10.0,
            max_spawn_interval_secs: 30.0,
            accept_duration_secs:    20.0,
            countdown_start:         CountdownStart::default(),
            seed:                    0,
        }
    }
}

impl JobConfig {
    /// Check every bound and convert to `Duration`s.
    ///
    /// Fails with [`CoreError::Config`] on a non-finite or non-positive value,
    /// or a `min > max` range.
    pub fn timing(&self) -> CoreResult<OfferTiming> {
        Ok(OfferTiming {
            delivery_time: DurationRange::from_secs(
                "delivery_time",
                self.min_delivery_time_secs,
                self.max_delivery_time_secs,
            )?,
            spawn_interval: DurationRange::from_secs(
                "spawn_interval",
                self.min_spawn_interval_secs,
                self.max_spawn_interval_secs,
            )?,
            accept_duration: positive_secs("accept_duration", self.accept_duration_secs)?,
            countdown_start: self.countdown_start,
        })
    }

    /// Shorthand for `self.timing().map(|_| ())`.
    pub fn validate(&self) -> CoreResult<()> {
        self.timing().map(|_| ())
    }
}

// ── OfferTiming ───────────────────────────────────────────────────────────────

/// Validated timing parameters.  Only obtainable through
/// [`JobConfig::timing`] or [`OfferTiming::new`], both of which enforce the
/// bounds.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct OfferTiming {
    pub delivery_time:   DurationRange,
    pub spawn_interval:  DurationRange,
    pub accept_duration: Duration,
    pub countdown_start: CountdownStart,
}

impl OfferTiming {
    pub fn new(
        delivery_time:   DurationRange,
        spawn_interval:  DurationRange,
        accept_duration: Duration,
        countdown_start: CountdownStart,
    ) -> CoreResult<Self> {
        if accept_duration.is_zero() {
            return Err(CoreError::Config("accept_duration must be positive".into()));
        }
        Ok(Self { delivery_time, spawn_interval, accept_duration, countdown_start })
    }
}

// ── DurationRange ─────────────────────────────────────────────────────────────

/// A closed interval `[min, max]` of positive durations.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct DurationRange {
    min: Duration,
    max: Duration,
}

impl DurationRange {
    /// `0 < min <= max`, else [`CoreError::Config`].
    pub fn new(min: Duration, max: Duration) -> CoreResult<Self> {
        if min.is_zero() {
            return Err(CoreError::Config(format!("range minimum must be positive, got {min:?}")));
        }
        if min > max {
            return Err(CoreError::Config(format!("range minimum {min:?} exceeds maximum {max:?}")));
        }
        Ok(Self { min, max })
    }

    fn from_secs(name: &str, min: f64, max: f64) -> CoreResult<Self> {
        let lo = positive_secs(&format!("min_{name}"), min)?;
        let hi = positive_secs(&format!("max_{name}"), max)?;
        Self::new(lo, hi).map_err(|_| {
            CoreError::Config(format!("min_{name} ({min} s) exceeds max_{name} ({max} s)"))
        })
    }

    #[inline]
    pub fn min(&self) -> Duration {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Draw uniformly from `[min, max]`.
    pub fn sample(&self, rng: &mut SimRng) -> Duration {
        if self.min == self.max {
            return self.min;
        }
        rng.gen_range(self.min..=self.max)
    }

    #[inline]
    pub fn contains(&self, d: Duration) -> bool {
        self.min <= d && d <= self.max
    }
}

fn positive_secs(name: &str, secs: f64) -> CoreResult<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(CoreError::Config(format!("{name} must be a positive number of seconds, got {secs}")));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| CoreError::Config(format!("{name} out of range: {e}")))
}
