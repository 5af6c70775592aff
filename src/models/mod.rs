//! Data structures for the bracket: events, participants, matches.

mod event;
mod game;
mod participant;

pub use event::{
    Event, EventCategory, EventFormat, EventId, EventStatus, TournamentError,
    TournamentResult,
};
pub use game::{GameMatch, MatchId, MatchStatus, Pairing, RoundStatus};
pub use participant::{Entrant, Member, Participant, SlotId};
