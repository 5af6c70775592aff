//! Slot identifiers, participants and roster entrants.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for whoever occupies a bracket slot.
///
/// Singles events carry individual roster ids, doubles events carry team ids.
/// The engine only compares slots for equality; the tag matters to name resolution.
#[derive(Clone, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SlotId {
    Individual(String),
    Team(String),
}

impl SlotId {
    /// The raw identifier without its tag.
    pub fn key(&self) -> &str {
        match self {
            SlotId::Individual(id) | SlotId::Team(id) => id,
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A participant as seen by the seeder: a slot plus its seed (0 = unseeded).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub slot: SlotId,
    #[serde(default)]
    pub seed: u32,
}

impl Participant {
    pub fn new(slot: SlotId, seed: u32) -> Self {
        Self { slot, seed }
    }

    pub fn unseeded(slot: SlotId) -> Self {
        Self::new(slot, 0)
    }

    pub fn is_seeded(&self) -> bool {
        self.seed > 0
    }
}

/// One member of a doubles pair.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub roll_no: String,
    pub name: String,
}

/// Display data for a slot, registered with the roster when a bracket is drawn.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Entrant {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub members: Vec<Member>,
}
