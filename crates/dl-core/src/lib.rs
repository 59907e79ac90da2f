//! `dl-core`: foundational types for the delivery-job lifecycle crates.
//!
//! This crate is a dependency of every other `dl-*` crate.  It has no `dl-*`
//! dependencies of its own.
//!
//! # What lives here
//!
//! | Module        | Contents                                                |
//! |---------------|---------------------------------------------------------|
//! | [`ids`]       | `ZoneId`, `JobId`                                       |
//! | [`zone`]      | `ZoneKind`, `ZoneRef`, `ZonePair`, `ZoneCatalog`        |
//! | [`job`]       | `DeliveryJob` state machine, `JobState`                 |
//! | [`time`]      | `SimTime`, `SimClock`                                   |
//! | [`rng`]       | `SimRng`                                                |
//! | [`config`]    | `JobConfig`, `OfferTiming`, `DurationRange`, `CountdownStart` |
//! | [`loader`]    | `load_zones_csv`, `load_zones_reader`                   |
//! | [`error`]     | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod job;
pub mod loader;
pub mod rng;
pub mod time;
pub mod zone;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{CountdownStart, DurationRange, JobConfig, OfferTiming};
pub use error::{CoreError, CoreResult};
pub use ids::{JobId, ZoneId};
pub use job::{DeliveryJob, JobState};
pub use loader::{load_zones_csv, load_zones_reader};
pub use rng::SimRng;
pub use time::{SimClock, SimTime};
pub use zone::{ZoneCatalog, ZoneKind, ZonePair, ZoneRef};
