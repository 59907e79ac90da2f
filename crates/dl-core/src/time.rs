//! Session time model.
//!
//! # Design
//!
//! Time is a virtual clock: a `SimTime` is the `Duration` elapsed since the
//! session started.  Nothing here reads the wall clock, so the same sequence
//! of `advance(dt)` calls always reaches the same instants.  Hosts that run in
//! real time simply feed their frame delta into `advance`.
//!
//! Using `Duration` (integer nanoseconds) rather than `f32` seconds keeps
//! deadline comparisons exact: a timer scheduled for `t + 20 s` fires on the
//! tick that reaches `t + 20 s`, never one tick late because of rounding.

use std::fmt;
use std::time::Duration;

// ── SimTime ───────────────────────────────────────────────────────────────────

/// An instant on the session clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub Duration);

impl SimTime {
    pub const ZERO: SimTime = SimTime(Duration::ZERO);

    /// Construct from whole seconds since session start.
    #[inline]
    pub fn from_secs(secs: u64) -> SimTime {
        SimTime(Duration::from_secs(secs))
    }

    /// Time elapsed from `earlier` to `self`; zero if `earlier` is later.
    #[inline]
    pub fn since(self, earlier: SimTime) -> Duration {
        self.0.saturating_sub(earlier.0)
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl std::ops::Add<Duration> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: Duration) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::Sub for SimTime {
    type Output = Duration;
    #[inline]
    fn sub(self, rhs: SimTime) -> Duration {
        self.since(rhs)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={:.3}s", self.0.as_secs_f64())
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// The session's virtual clock.
#[derive(Clone, Debug, Default)]
pub struct SimClock {
    now:   SimTime,
    /// Number of `advance` calls so far.
    ticks: u64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `dt` and count one tick.
    #[inline]
    pub fn advance(&mut self, dt: Duration) {
        self.now = self.now + dt;
        self.ticks += 1;
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (tick {})", self.now, self.ticks)
    }
}
