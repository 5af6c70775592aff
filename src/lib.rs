//! Single-elimination bracket organizer: library with models, bracket logic and stores.

pub mod config;
pub mod engine;
pub mod logic;
pub mod models;
pub mod store;

pub use config::ServerConfig;
pub use engine::BracketEngine;
pub use logic::{
    build_round, collect_winners, finish_round, generate_bracket, next_power_of_two,
    pair_in_order, record_winner, seed_bracket, seeded_bye_positions, BracketView, DrawSummary,
    PendingMatch, ResolvedMatch, RoundOutcome, SeedPlan,
};
pub use models::{
    Entrant, Event, EventCategory, EventFormat, EventId, EventStatus, GameMatch, MatchId,
    MatchStatus, Member, Pairing, Participant, RoundStatus, SlotId, TournamentError,
    TournamentResult,
};
pub use store::{EventStore, InMemoryStore, MatchStore, NameResolver, Roster};
