//! `dl-events`: lifecycle events and the bus that carries them.
//!
//! # Crate layout
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | [`event`] | `EventKind`, `JobEvent`                          |
//! | [`bus`]   | `EventBus`, `SubscriptionId`                     |
//!
//! # Delivery model
//!
//! ```text
//! JobRegistry ──publish(&JobEvent)──▶ EventBus ──snapshot──▶ handler 1
//!                                                       ├──▶ handler 2
//!                                                       └──▶ …
//! ```
//!
//! Dispatch is synchronous and runs in the publisher's call stack, in
//! subscription order.  The bus holds no job state of its own.

pub mod bus;
pub mod event;


pub use bus::{EventBus, SubscriptionId};
pub use event::{EventKind, JobEvent};
