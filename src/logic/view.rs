//! Read path: bracket grouped by round with visibility gating and display names.

use crate::models::{
    Event, EventId, EventStatus, GameMatch, MatchStatus, RoundStatus, SlotId, TournamentError,
    TournamentResult,
};
use crate::store::{EventStore, MatchStore, NameResolver};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A match with its slots resolved to labels.
#[derive(Clone, Debug, Serialize)]
pub struct ResolvedMatch {
    #[serde(flatten)]
    pub game: GameMatch,
    pub slot1_name: String,
    pub slot2_name: Option<String>,
    pub winner_name: Option<String>,
}

/// The visible part of an event's bracket.
#[derive(Clone, Debug, Serialize)]
pub struct BracketView {
    pub event: Event,
    pub champion_name: Option<String>,
    pub bracket: BTreeMap<u32, Vec<ResolvedMatch>>,
    pub round_status: BTreeMap<u32, RoundStatus>,
}

/// A playable match for the coordinator's list.
#[derive(Clone, Debug, Serialize)]
pub struct PendingMatch {
    pub event_name: String,
    #[serde(flatten)]
    pub resolved: ResolvedMatch,
}

/// Round status per round, taken from the first match seen of each round.
pub fn round_statuses(matches: &[GameMatch]) -> BTreeMap<u32, RoundStatus> {
    let mut statuses = BTreeMap::new();
    for m in matches {
        statuses.entry(m.round).or_insert(m.round_status);
    }
    statuses
}

/// Round 1 is always visible; round `r > 1` only once round `r - 1` is Finished.
pub fn visible_rounds(statuses: &BTreeMap<u32, RoundStatus>) -> BTreeSet<u32> {
    statuses
        .keys()
        .copied()
        .filter(|&r| r <= 1 || statuses.get(&(r - 1)) == Some(&RoundStatus::Finished))
        .collect()
}

/// Resolve a label; failures fall back to the raw identifier.
async fn display_name<N>(names: &N, event: &Event, slot: &SlotId) -> String
where
    N: NameResolver + ?Sized,
{
    match names.resolve(event, slot).await {
        Ok(name) => name,
        Err(e) => {
            log::warn!("Could not resolve {} for event {}: {}", slot, event.id, e);
            slot.key().to_string()
        }
    }
}

async fn resolve_match<N>(names: &N, event: &Event, game: GameMatch) -> ResolvedMatch
where
    N: NameResolver + ?Sized,
{
    let slot1_name = display_name(names, event, &game.slot1).await;
    let slot2_name = match &game.slot2 {
        Some(slot) => Some(display_name(names, event, slot).await),
        None => None,
    };
    let winner_name = match &game.winner {
        Some(slot) => Some(display_name(names, event, slot).await),
        None => None,
    };
    ResolvedMatch {
        game,
        slot1_name,
        slot2_name,
        winner_name,
    }
}

/// Load the event's bracket, hiding rounds that are not open yet.
pub async fn bracket_view<S, N>(store: &S, names: &N, event_id: EventId) -> TournamentResult<BracketView>
where
    S: MatchStore + EventStore + ?Sized,
    N: NameResolver + ?Sized,
{
    let event = store
        .get_event(event_id)
        .await?
        .ok_or_else(|| TournamentError::NotFound(format!("event {}", event_id)))?;
    let matches = store.list_event(event_id).await?;

    let all_statuses = round_statuses(&matches);
    let visible = visible_rounds(&all_statuses);

    let mut bracket: BTreeMap<u32, Vec<ResolvedMatch>> = BTreeMap::new();
    for game in matches.into_iter().filter(|m| visible.contains(&m.round)) {
        let round = game.round;
        let resolved = resolve_match(names, &event, game).await;
        bracket.entry(round).or_default().push(resolved);
    }
    let round_status = all_statuses
        .into_iter()
        .filter(|(r, _)| visible.contains(r))
        .collect();

    let champion_name = match &event.champion {
        Some(slot) => Some(display_name(names, &event, slot).await),
        None => None,
    };

    Ok(BracketView {
        event,
        champion_name,
        bracket,
        round_status,
    })
}

/// Unplayed, non-bye matches of every Live event.
pub async fn pending_matches<S, N>(store: &S, names: &N) -> TournamentResult<Vec<PendingMatch>>
where
    S: MatchStore + EventStore + ?Sized,
    N: NameResolver + ?Sized,
{
    let mut pending = Vec::new();
    for event in store
        .list_events()
        .await?
        .into_iter()
        .filter(|e| e.status == EventStatus::Live)
    {
        let matches = store.list_event(event.id).await?;
        let visible = visible_rounds(&round_statuses(&matches));
        for game in matches
            .into_iter()
            .filter(|m| !m.is_bye && m.status == MatchStatus::Pending && visible.contains(&m.round))
        {
            let resolved = resolve_match(names, &event, game).await;
            pending.push(PendingMatch {
                event_name: event.name.clone(),
                resolved,
            });
        }
    }
    Ok(pending)
}
