//! `dl-timer`: delayed work on the session's virtual clock.
//!
//! # Crate layout
//!
//! | Module           | Contents                                            |
//! |------------------|-----------------------------------------------------|
//! | [`delay`]        | `DelayScheduler` trait, `TimerHandle`               |
//! | [`timer_queue`]  | `TimerQueue<T>` (`BTreeMap<SimTime, Vec<TimerHandle>>`) |
//!
//! # Contract
//!
//! A scheduled payload is delivered once, on the first `advance` that reaches
//! its deadline, or never if it was cancelled first.  Callers that react to a
//! delivered payload must still re-check whatever state the payload refers
//! to: cancellation is allowed to lose the race.

pub mod delay;
pub mod timer_queue;


pub use delay::{DelayScheduler, TimerHandle};
pub use timer_queue::TimerQueue;
