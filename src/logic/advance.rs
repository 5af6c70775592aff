//! Finishing a round: completion checks, winner collection, next-round creation.

use crate::logic::bracket::{build_round, pair_in_order};
use crate::models::{
    EventId, EventStatus, GameMatch, RoundStatus, SlotId, TournamentError, TournamentResult,
};
use crate::store::{EventStore, MatchStore};
use serde::Serialize;

/// What finishing a round led to: either a next round or a champion.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RoundOutcome {
    pub round: u32,
    pub next_round: Option<u32>,
    pub advancing: usize,
    pub matches_created: usize,
    pub champion: Option<SlotId>,
}

impl RoundOutcome {
    pub fn is_tournament_complete(&self) -> bool {
        self.champion.is_some()
    }
}

/// Winners of the round in match order, byes included, each listed once.
pub fn collect_winners(matches: &[GameMatch]) -> Vec<SlotId> {
    let mut winners: Vec<SlotId> = Vec::with_capacity(matches.len());
    for w in matches.iter().filter_map(|m| m.winner.as_ref()) {
        if !winners.contains(w) {
            winners.push(w.clone());
        }
    }
    winners
}

/// Close `round` and either build round `round + 1` or crown the champion.
///
/// Rejected (nothing changes) when the round is missing, has unplayed non-bye matches,
/// or was already finished. If an earlier call recorded the successor but did not get
/// to mark the round Finished, this call completes the marking instead of advancing again.
pub async fn finish_round<S>(store: &S, event_id: EventId, round: u32) -> TournamentResult<RoundOutcome>
where
    S: MatchStore + EventStore + ?Sized,
{
    let mut event = store
        .get_event(event_id)
        .await?
        .ok_or_else(|| TournamentError::NotFound(format!("event {}", event_id)))?;

    let matches = store.list_round(event_id, round).await?;
    if matches.is_empty() {
        return Err(TournamentError::NotFound(format!(
            "round {} of event {}",
            round, event_id
        )));
    }

    let pending = matches
        .iter()
        .filter(|m| !m.is_bye && !m.is_completed())
        .count();
    if pending > 0 {
        return Err(TournamentError::RoundIncomplete { round, pending });
    }

    if matches
        .iter()
        .all(|m| m.round_status == RoundStatus::Finished)
    {
        return Err(TournamentError::RoundAlreadyAdvanced { round });
    }

    let winners = collect_winners(&matches);
    let next = round + 1;

    // A previous call wrote the successor (next round or champion) but failed before
    // the round was marked Finished: only the marking is left to do.
    let next_matches = store.list_round(event_id, next).await?;
    let crowned = match (winners.as_slice(), &event.champion) {
        ([sole], Some(champion)) => event.status == EventStatus::Completed && sole == champion,
        _ => false,
    };
    if !next_matches.is_empty() || crowned {
        log::warn!(
            "Resuming finish of round {} for event {}: successor already recorded",
            round,
            event_id
        );
        store.finish_round(event_id, round).await?;
        return Ok(RoundOutcome {
            round,
            next_round: (!next_matches.is_empty()).then_some(next),
            advancing: winners.len(),
            matches_created: 0,
            champion: event.champion.clone().filter(|_| crowned),
        });
    }

    log::info!(
        "Finishing round {} of event {}: {} match(es), {} advancing",
        round,
        event_id,
        matches.len(),
        winners.len()
    );

    // The successor is written before the round flips to Finished, so a failure in
    // between is picked up by the resume branch above on the next call.
    let outcome = match winners.as_slice() {
        [] => {
            return Err(TournamentError::InvalidInput(format!(
                "round {} has no recorded winners",
                round
            )))
        }
        [champion] => {
            event.complete(champion.clone());
            store.update_event(&event).await?;
            log::info!("Event {} completed, champion {}", event_id, champion);
            RoundOutcome {
                round,
                next_round: None,
                advancing: 1,
                matches_created: 0,
                champion: Some(champion.clone()),
            }
        }
        _ => {
            let next_matches = build_round(event_id, next, &pair_in_order(&winners));
            let created = next_matches.len();
            // Fails with Conflict if a concurrent call created the round first.
            store.insert_round(event_id, next, next_matches).await?;
            log::info!("Created {} match(es) for round {} of event {}", created, next, event_id);
            RoundOutcome {
                round,
                next_round: Some(next),
                advancing: winners.len(),
                matches_created: created,
                champion: None,
            }
        }
    };

    store.finish_round(event_id, round).await?;
    Ok(outcome)
}
