//! `dl-jobs`: the delivery-job orchestrator.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`registry`]    | `JobRegistry`: owns offers and active jobs, publishes events |
//! | [`offers`]      | `OfferScheduler`, `OfferTimer`, `TimerOutcome`          |
//! | [`indicators`]  | `ZoneIndicators` subscriber, `relevant_zones`           |
//! | [`error`]       | `JobError`, `JobResult<T>`                              |
//!
//! # Ownership
//!
//! `JobRegistry` is the only thing that mutates a job and the only thing
//! that publishes to the bus.  The offer scheduler decides *when* and *what*
//! to offer but goes through the registry's API for every change; subscribers
//! only ever see snapshots.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                             |
//! |-----------|----------------------------------------------------|
//! | `fx-hash` | FxHash instead of SipHash for the pair index.      |

pub mod error;
pub mod indicators;
pub mod offers;
pub mod registry;


pub use error::{JobError, JobResult};
pub use indicators::{ZoneIndicators, relevant_zones};
pub use offers::{OfferScheduler, OfferTimer, TimerOutcome};
pub use registry::JobRegistry;
