//! `dl-sim`: the session driver for the delivery-job subsystem.
//!
//! # Advance loop
//!
//! ```text
//! session.advance(dt):
//!   for each timer due at or before now + dt, earliest first:
//!     ① Countdown  JobRegistry::tick(deadline - last): expire active jobs
//!                  (and, with CountdownStart::OnCreation, lapse offers)
//!     ② Fire       the clock stands at the deadline while the timer runs:
//!                    Spawn        → spawn_offer, schedule next cycle
//!                    Expire(job)  → withdraw the offer if still open
//!   ③ Countdown    JobRegistry::tick for whatever remains of dt
//! ```
//!
//! Player input (`accept_offer`, `deny_offer`, `on_zone_entered`) goes through
//! the same `&mut Session`, so it is serialised with the loop above.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use dl_core::{JobConfig, ZoneCatalog};
//! use dl_sim::{NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(JobConfig::default(), catalog).build()?;
//! session.start();
//! session.run_for(Duration::from_secs(120), Duration::from_secs(1), &mut NoopObserver);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod session;


pub use builder::SessionBuilder;
pub use error::{SessionError, SessionResult};
pub use observer::{NoopObserver, SessionObserver, TickSummary};
pub use session::Session;
