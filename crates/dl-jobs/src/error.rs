use dl_core::{JobId, ZoneId};
use thiserror::Error;

/// Recoverable outcomes of job operations.
///
/// None of these indicate a bug: `NotFound` in particular is the expected
/// result when a player accepts an offer in the same instant it expires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JobError {
    #[error("invalid pair {pickup} → {dropoff}: same zone, or pair already offered or active")]
    InvalidPair { pickup: ZoneId, dropoff: ZoneId },

    #[error("job time limit must be positive")]
    InvalidTimeLimit,

    #[error("job id {0} is already offered or active")]
    DuplicateId(JobId),

    #[error("no offer with id {0}")]
    NotFound(JobId),

    #[error("no valid (pickup, dropoff) pair left to offer")]
    NoValidOffers,
}

impl JobError {
    /// `true` for the outcomes a UI should treat as "already handled".
    pub fn is_benign_race(&self) -> bool {
        matches!(self, JobError::NotFound(_))
    }
}

pub type JobResult<T> = Result<T, JobError>;
