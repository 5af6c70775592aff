//! Persistence and name-resolution collaborators.
//!
//! The bracket logic only talks to these traits, so a document store or SQL backend can
//! replace the in-memory implementations without touching seeding or advancement.

mod memory;
mod roster;

pub use memory::InMemoryStore;
pub use roster::Roster;

use crate::models::{Entrant, Event, EventId, GameMatch, MatchId, SlotId, TournamentResult};
use async_trait::async_trait;

/// Match repository keyed by id and by `(event, round, match_no)`.
#[async_trait]
pub trait MatchStore: Send + Sync {
    /// Delete every match of the event. Returns how many were removed.
    async fn clear_event(&self, event_id: EventId) -> TournamentResult<usize>;

    /// Insert all matches of one round.
    ///
    /// Fails with `Conflict` if the event already has any match in `round`; this is the
    /// fence against creating the same round twice.
    async fn insert_round(
        &self,
        event_id: EventId,
        round: u32,
        matches: Vec<GameMatch>,
    ) -> TournamentResult<()>;

    async fn find_match(&self, id: MatchId) -> TournamentResult<Option<GameMatch>>;

    /// Matches of one round, ordered by match number.
    async fn list_round(&self, event_id: EventId, round: u32) -> TournamentResult<Vec<GameMatch>>;

    /// Every match of the event, ordered by `(round, match_no)`.
    async fn list_event(&self, event_id: EventId) -> TournamentResult<Vec<GameMatch>>;

    async fn round_exists(&self, event_id: EventId, round: u32) -> TournamentResult<bool>;

    /// Atomically move a match from Pending to Completed with `winner`.
    ///
    /// Fails with `NotFound` for an unknown id and `AlreadyCompleted` if it was
    /// completed first.
    async fn complete_match(&self, id: MatchId, winner: SlotId) -> TournamentResult<GameMatch>;

    /// Mark every match of the round Finished. Returns how many were updated.
    async fn finish_round(&self, event_id: EventId, round: u32) -> TournamentResult<usize>;
}

/// Event repository.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn insert_event(&self, event: Event) -> TournamentResult<()>;

    async fn get_event(&self, id: EventId) -> TournamentResult<Option<Event>>;

    /// All events, oldest first.
    async fn list_events(&self) -> TournamentResult<Vec<Event>>;

    /// Overwrite a stored event. Fails with `NotFound` if it was never inserted.
    async fn update_event(&self, event: &Event) -> TournamentResult<()>;
}

/// Turns a slot into a display label for an event.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve(&self, event: &Event, slot: &SlotId) -> TournamentResult<String>;

    /// Replace the event's display data after a draw. Resolvers backed by an external
    /// directory have nothing to record.
    async fn register_entrants(
        &self,
        _event_id: EventId,
        _entrants: Vec<(SlotId, Entrant)>,
    ) -> TournamentResult<()> {
        Ok(())
    }
}
