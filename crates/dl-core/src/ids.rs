//! Strongly typed identifiers.
//!
//! `ZoneId` is a stable integer handed out by whoever owns the zone catalog.
//! `JobId` is a random UUID minted when an offer is created, so ids never
//! collide across sessions.

use std::fmt;

use uuid::Uuid;

/// Stable identity of a pickup or dropoff zone.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneId(pub u32);

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZoneId({})", self.0)
    }
}

impl From<u32> for ZoneId {
    #[inline(always)]
    fn from(n: u32) -> ZoneId {
        ZoneId(n)
    }
}

/// Globally unique identity of a delivery job (and of the offer it started as).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JobId(Uuid);

impl JobId {
    /// Mint a fresh random (v4) id.
    pub fn new_v4() -> Self {
        JobId(Uuid::new_v4())
    }

    /// Build a v4 id from caller-supplied random bytes.
    ///
    /// Lets seeded runs produce reproducible ids.
    pub fn from_random_bytes(bytes: [u8; 16]) -> Self {
        JobId(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl From<Uuid> for JobId {
    fn from(id: Uuid) -> Self {
        JobId(id)
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}
