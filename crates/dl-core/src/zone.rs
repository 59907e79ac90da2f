//! Zone references and the read-only zone catalog.
//!
//! Zones are owned by whatever hosts the subsystem (a level, a map file, a
//! test fixture).  The job crates only ever read them: a `ZoneRef` is copied
//! into every job so event snapshots can name both ends of the route without
//! looking anything up.

use std::collections::HashSet;

use crate::{CoreError, CoreResult, ZoneId};

/// Which side of a delivery a zone serves.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ZoneKind {
    Pickup,
    Dropoff,
}

/// An opaque zone identity with its kind and a human-readable name.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoneRef {
    pub id:           ZoneId,
    pub kind:         ZoneKind,
    pub display_name: String,
}

impl ZoneRef {
    pub fn new(id: ZoneId, kind: ZoneKind, display_name: impl Into<String>) -> Self {
        Self { id, kind, display_name: display_name.into() }
    }

    pub fn pickup(id: u32, display_name: impl Into<String>) -> Self {
        Self::new(ZoneId(id), ZoneKind::Pickup, display_name)
    }

    pub fn dropoff(id: u32, display_name: impl Into<String>) -> Self {
        Self::new(ZoneId(id), ZoneKind::Dropoff, display_name)
    }
}

/// The `(pickup, dropoff)` identity of a job.  Unique across all offered and
/// active jobs at any instant.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZonePair {
    pub pickup:  ZoneId,
    pub dropoff: ZoneId,
}

impl ZonePair {
    #[inline]
    pub fn new(pickup: ZoneId, dropoff: ZoneId) -> Self {
        Self { pickup, dropoff }
    }

    /// `true` when both ends name the same zone.
    #[inline]
    pub fn is_degenerate(self) -> bool {
        self.pickup == self.dropoff
    }
}

// ── ZoneCatalog ───────────────────────────────────────────────────────────────

/// Two disjoint lists of zones, fixed for the lifetime of a session.
///
/// List order is preserved; the offer scheduler enumerates candidate pairs in
/// `pickups × dropoffs` order, which keeps seeded runs reproducible.
#[derive(Clone, Debug, Default)]
pub struct ZoneCatalog {
    pickups:  Vec<ZoneRef>,
    dropoffs: Vec<ZoneRef>,
}

impl ZoneCatalog {
    /// Build a catalog, checking that every zone is tagged with the kind of
    /// the list it appears in and that no id appears twice across both lists.
    pub fn new(pickups: Vec<ZoneRef>, dropoffs: Vec<ZoneRef>) -> CoreResult<Self> {
        let mut seen = HashSet::with_capacity(pickups.len() + dropoffs.len());
        for (list, expected) in [(&pickups, ZoneKind::Pickup), (&dropoffs, ZoneKind::Dropoff)] {
            for zone in list {
                if zone.kind != expected {
                    return Err(CoreError::ZoneKindMismatch {
                        zone: zone.id,
                        expected,
                        found: zone.kind,
                    });
                }
                if !seen.insert(zone.id) {
                    return Err(CoreError::DuplicateZone(zone.id));
                }
            }
        }
        Ok(Self { pickups, dropoffs })
    }

    /// A catalog with no zones.  Spawn cycles on it always come up empty.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn pickups(&self) -> &[ZoneRef] {
        &self.pickups
    }

    pub fn dropoffs(&self) -> &[ZoneRef] {
        &self.dropoffs
    }

    /// Look a zone up by id in either list.
    pub fn get(&self, id: ZoneId) -> Option<&ZoneRef> {
        self.iter().find(|z| z.id == id)
    }

    /// All zones, pickups first.
    pub fn iter(&self) -> impl Iterator<Item = &ZoneRef> {
        self.pickups.iter().chain(self.dropoffs.iter())
    }

    pub fn len(&self) -> usize {
        self.pickups.len() + self.dropoffs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pickups.is_empty() && self.dropoffs.is_empty()
    }
}
