//! Bracket business logic: seeding, drawing, recording, advancing, viewing.

mod advance;
mod bracket;
mod draw;
mod recorder;
mod seeding;
mod view;

pub use advance::{collect_winners, finish_round, RoundOutcome};
pub use bracket::{build_round, pair_in_order};
pub use draw::{generate_bracket, DrawSummary};
pub use recorder::record_winner;
pub use seeding::{
    next_power_of_two, seed_bracket, seeded_bye_positions, validate_participants, SeedPlan,
};
pub use view::{
    bracket_view, pending_matches, round_statuses, visible_rounds, BracketView, PendingMatch,
    ResolvedMatch,
};
