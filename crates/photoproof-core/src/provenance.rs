//! # Provenance Credits
//!
//! Every image carries a fixed-length vector of `(TransformationId, bound)`
//! entries. A bound is the number of remaining applications of that
//! transformation; the camera sets the starting values at genesis and every
//! later step can only spend them.
//!
//! ## Security Invariant
//!
//! The provenance vector is part of the canonical image bytes, so it is
//! hashed and signed together with the pixels. Credits therefore cannot be
//! replenished without invalidating the signature. The vector reveals how
//! many credits have been spent in total, but not in which order, with
//! which parameters, or what the pixels looked like before.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Number of provenance entries carried by every image. Equal to the number
/// of registered transformations.
pub const PROVENANCE_LEN: usize = 4;

/// Stable numeric tag of a permissible transformation.
///
/// The tag doubles as the index of the transformation's entry in the
/// provenance vector. Tags are part of the hashed payload and must never be
/// renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u16)]
pub enum TransformationId {
    /// Returns the image unchanged. Its bound is a permission bit.
    Identity = 0,
    /// Blacks out everything outside a rectangle.
    Crop = 1,
    /// Quarter-turn rotation of the grid.
    Rotate = 2,
    /// Uniform brightness shift with clamping.
    Brightness = 3,
}

impl TransformationId {
    /// All registered transformations in tag order.
    pub const ALL: [TransformationId; PROVENANCE_LEN] = [
        TransformationId::Identity,
        TransformationId::Crop,
        TransformationId::Rotate,
        TransformationId::Brightness,
    ];

    /// The stable numeric tag.
    pub fn tag(self) -> u16 {
        self as u16
    }

    /// Position of this transformation's entry in the provenance vector.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look a transformation up by tag.
    pub fn from_tag(tag: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.tag() == tag)
    }

    /// Lowercase transformation name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Crop => "crop",
            Self::Rotate => "rotate",
            Self::Brightness => "brightness",
        }
    }
}

impl std::fmt::Display for TransformationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One provenance entry: which transformation it bounds and how many
/// credits remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProvenanceEntry {
    /// The transformation this entry bounds.
    pub id: TransformationId,
    /// Remaining credit.
    pub bound: u32,
}

/// Starting credits chosen by the camera admin.
///
/// Loaded from configuration by the driver; never set by an editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProvenanceBounds {
    /// `1` permits identity edits, `0` forbids them.
    pub identity: u32,
    /// Number of crops allowed.
    pub crop: u32,
    /// Number of quarter-turn rotations allowed.
    pub rotate: u32,
    /// Number of brightness adjustments allowed.
    pub brightness: u32,
}

impl Default for ProvenanceBounds {
    fn default() -> Self {
        Self {
            identity: 1,
            crop: 1,
            rotate: 4,
            brightness: 2,
        }
    }
}

impl ProvenanceBounds {
    /// The starting credit for one transformation.
    pub fn for_id(&self, id: TransformationId) -> u32 {
        match id {
            TransformationId::Identity => self.identity,
            TransformationId::Crop => self.crop,
            TransformationId::Rotate => self.rotate,
            TransformationId::Brightness => self.brightness,
        }
    }
}

/// The fixed-length provenance vector attached to an image.
///
/// Entry `i` always bounds `TransformationId::ALL[i]`. The constructors
/// build it that way and deserialization refuses any other order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[ProvenanceEntry; PROVENANCE_LEN]")]
pub struct Provenance([ProvenanceEntry; PROVENANCE_LEN]);

impl TryFrom<[ProvenanceEntry; PROVENANCE_LEN]> for Provenance {
    type Error = CoreError;

    fn try_from(entries: [ProvenanceEntry; PROVENANCE_LEN]) -> Result<Self, Self::Error> {
        for (index, (entry, expected)) in entries.iter().zip(TransformationId::ALL).enumerate() {
            if entry.id != expected {
                return Err(CoreError::ProvenanceOrder {
                    index,
                    expected,
                    actual: entry.id,
                });
            }
        }
        Ok(Self(entries))
    }
}

impl Provenance {
    /// Initialize the vector from the admin's starting credits.
    pub fn new(bounds: &ProvenanceBounds) -> Self {
        Self(TransformationId::ALL.map(|id| ProvenanceEntry {
            id,
            bound: bounds.for_id(id),
        }))
    }

    /// Rebuild a vector from bounds listed in tag order.
    pub fn from_bounds(bounds: [u32; PROVENANCE_LEN]) -> Self {
        Self(TransformationId::ALL.map(|id| ProvenanceEntry {
            id,
            bound: bounds[id.index()],
        }))
    }

    /// Remaining credit for a transformation.
    pub fn bound(&self, id: TransformationId) -> u32 {
        self.0[id.index()].bound
    }

    /// Entries in tag order.
    pub fn entries(&self) -> &[ProvenanceEntry; PROVENANCE_LEN] {
        &self.0
    }

    /// Return a copy with one credit of `id` spent.
    ///
    /// # Errors
    ///
    /// [`CoreError::BoundExhausted`] when the credit is already zero.
    pub fn consume(&self, id: TransformationId) -> Result<Self, CoreError> {
        let mut next = *self;
        let entry = &mut next.0[id.index()];
        entry.bound = entry
            .bound
            .checked_sub(1)
            .ok_or(CoreError::BoundExhausted(id))?;
        Ok(next)
    }
}

impl Default for Provenance {
    fn default() -> Self {
        Self::new(&ProvenanceBounds::default())
    }
}
