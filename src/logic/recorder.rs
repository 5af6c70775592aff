//! Recording a single match result.

use crate::models::{GameMatch, MatchId, SlotId, TournamentError, TournamentResult};
use crate::store::MatchStore;

/// Set the winner of a pending match.
///
/// Does not touch any other match: the next round is only built by
/// [`finish_round`](crate::logic::finish_round).
pub async fn record_winner<S>(store: &S, match_id: MatchId, winner: SlotId) -> TournamentResult<GameMatch>
where
    S: MatchStore + ?Sized,
{
    let game = store
        .find_match(match_id)
        .await?
        .ok_or_else(|| TournamentError::NotFound(format!("match {}", match_id)))?;
    if game.is_completed() {
        return Err(TournamentError::AlreadyCompleted(match_id));
    }
    if !game.has_slot(&winner) {
        return Err(TournamentError::InvalidInput(format!(
            "{} is not playing in match {}",
            winner, match_id
        )));
    }

    // The store re-checks the status under its own lock; a concurrent writer loses here.
    let game = store.complete_match(match_id, winner).await?;
    log::debug!(
        "Recorded winner of round {} match {} for event {}",
        game.round,
        game.match_no,
        game.event_id
    );
    Ok(game)
}
