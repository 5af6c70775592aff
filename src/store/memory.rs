//! In-memory stores backed by `RwLock<HashMap<..>>`.

use super::{EventStore, MatchStore};
use crate::models::{
    Event, EventId, GameMatch, MatchId, MatchStatus, RoundStatus, SlotId, TournamentError,
    TournamentResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

fn lock_error<T>(_: PoisonError<T>) -> TournamentError {
    TournamentError::Storage("lock error".to_string())
}

/// Events and matches held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    events: RwLock<HashMap<EventId, Event>>,
    matches: RwLock<HashMap<MatchId, GameMatch>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn collect_sorted<F>(&self, keep: F) -> TournamentResult<Vec<GameMatch>>
    where
        F: Fn(&GameMatch) -> bool,
    {
        let g = self.matches.read().map_err(lock_error)?;
        let mut found: Vec<GameMatch> = g.values().filter(|m| keep(m)).cloned().collect();
        found.sort_by_key(|m| (m.round, m.match_no));
        Ok(found)
    }
}

#[async_trait]
impl MatchStore for InMemoryStore {
    async fn clear_event(&self, event_id: EventId) -> TournamentResult<usize> {
        let mut g = self.matches.write().map_err(lock_error)?;
        let before = g.len();
        g.retain(|_, m| m.event_id != event_id);
        Ok(before - g.len())
    }

    async fn insert_round(
        &self,
        event_id: EventId,
        round: u32,
        matches: Vec<GameMatch>,
    ) -> TournamentResult<()> {
        let mut g = self.matches.write().map_err(lock_error)?;
        if g.values().any(|m| m.event_id == event_id && m.round == round) {
            return Err(TournamentError::Conflict(format!(
                "round {} already exists for event {}",
                round, event_id
            )));
        }
        if let Some(stray) = matches
            .iter()
            .find(|m| m.event_id != event_id || m.round != round)
        {
            return Err(TournamentError::InvalidInput(format!(
                "match {} does not belong to round {} of event {}",
                stray.id, round, event_id
            )));
        }
        g.extend(matches.into_iter().map(|m| (m.id, m)));
        Ok(())
    }

    async fn find_match(&self, id: MatchId) -> TournamentResult<Option<GameMatch>> {
        let g = self.matches.read().map_err(lock_error)?;
        Ok(g.get(&id).cloned())
    }

    async fn list_round(&self, event_id: EventId, round: u32) -> TournamentResult<Vec<GameMatch>> {
        self.collect_sorted(|m| m.event_id == event_id && m.round == round)
    }

    async fn list_event(&self, event_id: EventId) -> TournamentResult<Vec<GameMatch>> {
        self.collect_sorted(|m| m.event_id == event_id)
    }

    async fn round_exists(&self, event_id: EventId, round: u32) -> TournamentResult<bool> {
        let g = self.matches.read().map_err(lock_error)?;
        Ok(g.values().any(|m| m.event_id == event_id && m.round == round))
    }

    async fn complete_match(&self, id: MatchId, winner: SlotId) -> TournamentResult<GameMatch> {
        let mut g = self.matches.write().map_err(lock_error)?;
        let m = g
            .get_mut(&id)
            .ok_or_else(|| TournamentError::NotFound(format!("match {}", id)))?;
        if m.status == MatchStatus::Completed {
            return Err(TournamentError::AlreadyCompleted(id));
        }
        m.winner = Some(winner);
        m.status = MatchStatus::Completed;
        Ok(m.clone())
    }

    async fn finish_round(&self, event_id: EventId, round: u32) -> TournamentResult<usize> {
        let mut g = self.matches.write().map_err(lock_error)?;
        let mut updated = 0;
        for m in g
            .values_mut()
            .filter(|m| m.event_id == event_id && m.round == round)
        {
            m.round_status = RoundStatus::Finished;
            updated += 1;
        }
        Ok(updated)
    }
}

#[async_trait]
impl EventStore for InMemoryStore {
    async fn insert_event(&self, event: Event) -> TournamentResult<()> {
        let mut g = self.events.write().map_err(lock_error)?;
        if g.contains_key(&event.id) {
            return Err(TournamentError::Conflict(format!(
                "event {} already exists",
                event.id
            )));
        }
        g.insert(event.id, event);
        Ok(())
    }

    async fn get_event(&self, id: EventId) -> TournamentResult<Option<Event>> {
        let g = self.events.read().map_err(lock_error)?;
        Ok(g.get(&id).cloned())
    }

    async fn list_events(&self) -> TournamentResult<Vec<Event>> {
        let g = self.events.read().map_err(lock_error)?;
        let mut events: Vec<Event> = g.values().cloned().collect();
        events.sort_by_key(|e| (e.created_at, e.id));
        Ok(events)
    }

    async fn update_event(&self, event: &Event) -> TournamentResult<()> {
        let mut g = self.events.write().map_err(lock_error)?;
        match g.get_mut(&event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(())
            }
            None => Err(TournamentError::NotFound(format!("event {}", event.id))),
        }
    }
}
