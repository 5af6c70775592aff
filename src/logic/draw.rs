//! Drawing round 1: seed, wipe the old bracket, persist the new first round.

use crate::logic::bracket::build_round;
use crate::logic::seeding::seed_bracket;
use crate::models::{EventId, Participant, TournamentError, TournamentResult};
use crate::store::{EventStore, MatchStore};
use rand::Rng;
use serde::Serialize;

/// What a draw produced (for API responses and logs).
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DrawSummary {
    pub total_participants: usize,
    pub bracket_size: usize,
    pub byes: usize,
    pub matches_created: usize,
    pub regular_matches: usize,
    pub bye_matches: usize,
}

/// Generate round 1 for an event, replacing any existing bracket.
///
/// Participants are validated and seeded before anything is deleted, so a rejected
/// list leaves the previous bracket intact.
pub async fn generate_bracket<S, R>(
    store: &S,
    event_id: EventId,
    participants: &[Participant],
    rng: &mut R,
) -> TournamentResult<DrawSummary>
where
    S: MatchStore + EventStore + ?Sized,
    R: Rng + Send + ?Sized,
{
    let mut event = store
        .get_event(event_id)
        .await?
        .ok_or_else(|| TournamentError::NotFound(format!("event {}", event_id)))?;

    if let Some(p) = participants
        .iter()
        .find(|p| p.slot != event.format.slot(p.slot.key()))
    {
        return Err(TournamentError::InvalidInput(format!(
            "participant {} does not match the {:?} format",
            p.slot, event.format
        )));
    }

    let plan = seed_bracket(participants, rng)?;

    let deleted = store.clear_event(event_id).await?;
    log::info!("Deleted {} old match(es) for event {}", deleted, event_id);

    let matches = build_round(event_id, 1, &plan.pairings);
    let bye_matches = matches.iter().filter(|m| m.is_bye).count();
    let summary = DrawSummary {
        total_participants: participants.len(),
        bracket_size: plan.bracket_size,
        byes: plan.byes,
        matches_created: matches.len(),
        regular_matches: matches.len() - bye_matches,
        bye_matches,
    };
    store.insert_round(event_id, 1, matches).await?;

    event.mark_drawn();
    store.update_event(&event).await?;

    log::info!(
        "Drew event {}: {} participants, bracket size {}, {} bye(s), {} regular match(es)",
        event_id,
        summary.total_participants,
        summary.bracket_size,
        summary.byes,
        summary.regular_matches
    );
    Ok(summary)
}
