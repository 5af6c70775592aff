//! Event (one bracketed competition), its lifecycle, and TournamentError.

use crate::models::game::MatchId;
use crate::models::participant::SlotId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur during bracket operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum TournamentError {
    /// Event or match missing.
    #[error("{0} not found")]
    NotFound(String),

    /// Fewer than two participants, duplicate ids, winner not in the match, ...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A winner was already recorded for this match.
    #[error("Winner already set for match {0}")]
    AlreadyCompleted(MatchId),

    #[error("Round {round} has {pending} unfinished match(es)")]
    RoundIncomplete { round: u32, pending: usize },

    #[error("Round {round} has already been finished")]
    RoundAlreadyAdvanced { round: u32 },

    /// A concurrent mutation won the race.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Event is {actual:?}, expected {expected:?}")]
    InvalidState {
        expected: EventStatus,
        actual: EventStatus,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

pub type TournamentResult<T> = Result<T, TournamentError>;

/// Unique identifier for an event.
pub type EventId = Uuid;

/// Whether slots are individual players or teams.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventFormat {
    #[default]
    Singles,
    Doubles,
}

impl EventFormat {
    /// Tag a raw participant id according to this format.
    pub fn slot(self, id: impl Into<String>) -> SlotId {
        match self {
            EventFormat::Singles => SlotId::Individual(id.into()),
            EventFormat::Doubles => SlotId::Team(id.into()),
        }
    }
}

/// Who may enter the event.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventCategory {
    Mens,
    Womens,
    Mixed,
}

/// Current phase of the event.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    /// Taking entries; no bracket yet.
    #[default]
    Registration,
    /// Round 1 has been drawn.
    Drawn,
    /// Matches are being played.
    Live,
    /// A champion has been declared.
    Completed,
}

/// A single-elimination event.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub format: EventFormat,
    #[serde(default)]
    pub category: Option<EventCategory>,
    pub status: EventStatus,
    /// Set once, when the final round is finished.
    pub champion: Option<SlotId>,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event in Registration state.
    pub fn new(name: impl Into<String>, format: EventFormat) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            format,
            category: None,
            status: EventStatus::Registration,
            champion: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_category(mut self, category: Option<EventCategory>) -> Self {
        self.category = category;
        self
    }

    /// Move Drawn -> Live.
    pub fn start(&mut self) -> TournamentResult<()> {
        if self.status != EventStatus::Drawn {
            return Err(TournamentError::InvalidState {
                expected: EventStatus::Drawn,
                actual: self.status,
            });
        }
        self.status = EventStatus::Live;
        Ok(())
    }

    /// Reset after a (re)draw: round 1 exists, nobody has won.
    pub fn mark_drawn(&mut self) {
        self.status = EventStatus::Drawn;
        self.champion = None;
    }

    pub fn complete(&mut self, champion: SlotId) {
        self.status = EventStatus::Completed;
        self.champion = Some(champion);
    }
}
