//! Core error type.
//!
//! Only startup paths produce these: configuration validation, catalog
//! construction, and zone loading.  Runtime job operations use
//! `dl_jobs::JobError` instead.

use thiserror::Error;

use crate::{ZoneId, ZoneKind};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("zone {0} appears more than once in the catalog")]
    DuplicateZone(ZoneId),

    #[error("zone {zone} is tagged {found:?} but was listed as {expected:?}")]
    ZoneKindMismatch {
        zone:     ZoneId,
        expected: ZoneKind,
        found:    ZoneKind,
    },

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `dl-core`.
pub type CoreResult<T> = Result<T, CoreError>;
