//! Match records, their statuses, and the pairings they are built from.

use crate::models::event::EventId;
use crate::models::participant::SlotId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Progress of a single match. One-way: `Pending` → `Completed`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    Pending,
    Completed,
}

/// Progress of a whole round, shared by all its matches. One-way: `Active` → `Finished`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoundStatus {
    #[default]
    Active,
    Finished,
}

/// Two slots drawn against each other; `slot2` is absent for a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub slot1: SlotId,
    pub slot2: Option<SlotId>,
}

impl Pairing {
    pub fn versus(slot1: SlotId, slot2: SlotId) -> Self {
        Self {
            slot1,
            slot2: Some(slot2),
        }
    }

    pub fn bye(slot1: SlotId) -> Self {
        Self { slot1, slot2: None }
    }

    pub fn is_bye(&self) -> bool {
        self.slot2.is_none()
    }
}

/// A single match within a bracket round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    pub event_id: EventId,
    /// 1 = first round.
    pub round: u32,
    /// 1-based position within the round.
    pub match_no: u32,
    pub slot1: SlotId,
    /// None for a bye.
    pub slot2: Option<SlotId>,
    /// None if not yet played.
    pub winner: Option<SlotId>,
    pub status: MatchStatus,
    pub is_bye: bool,
    pub round_status: RoundStatus,
    pub created_at: DateTime<Utc>,
}

impl GameMatch {
    /// A regular match awaiting its result.
    pub fn new(event_id: EventId, round: u32, match_no: u32, slot1: SlotId, slot2: SlotId) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            round,
            match_no,
            slot1,
            slot2: Some(slot2),
            winner: None,
            status: MatchStatus::Pending,
            is_bye: false,
            round_status: RoundStatus::Active,
            created_at: Utc::now(),
        }
    }

    /// A bye: born completed, the sole occupant is its own winner.
    pub fn bye(event_id: EventId, round: u32, match_no: u32, slot1: SlotId) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_id,
            round,
            match_no,
            winner: Some(slot1.clone()),
            slot1,
            slot2: None,
            status: MatchStatus::Completed,
            is_bye: true,
            round_status: RoundStatus::Active,
            created_at: Utc::now(),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Whether `slot` occupies either side of this match.
    pub fn has_slot(&self, slot: &SlotId) -> bool {
        self.slot1 == *slot || self.slot2.as_ref() == Some(slot)
    }
}
