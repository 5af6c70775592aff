//! BracketEngine: the entry point for request handlers.
//!
//! Requests for the same event may arrive concurrently. Each event gets its own
//! `tokio::sync::RwLock<()>`:
//! - drawing a bracket, starting the event and finishing a round take the write half;
//! - recording a winner takes the read half (the store's compare-and-swap keeps two
//!   writers off the same match);
//! - reads take no lock.
//!
//! Locks are only created for events that exist in the store, so the lock table is
//! bounded by the number of stored events. Different events never contend.

use crate::logic::{self, BracketView, DrawSummary, PendingMatch, RoundOutcome};
use crate::models::{
    Entrant, Event, EventCategory, EventFormat, EventId, GameMatch, MatchId, Participant, SlotId,
    TournamentError, TournamentResult,
};
use crate::store::{EventStore, MatchStore, NameResolver};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;

type EventLock = Arc<RwLock<()>>;

pub struct BracketEngine<S, N> {
    store: Arc<S>,
    names: Arc<N>,
    locks: Mutex<HashMap<EventId, EventLock>>,
}

impl<S, N> BracketEngine<S, N>
where
    S: MatchStore + EventStore,
    N: NameResolver,
{
    pub fn new(store: Arc<S>, names: Arc<N>) -> Self {
        Self {
            store,
            names,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn names(&self) -> &Arc<N> {
        &self.names
    }

    /// Lock handle for an existing event; unknown ids are `NotFound` and leave no entry.
    async fn event_lock(&self, event_id: EventId) -> TournamentResult<EventLock> {
        self.load_event(event_id).await?;
        let mut g = self
            .locks
            .lock()
            .map_err(|_| TournamentError::Storage("lock error".to_string()))?;
        Ok(g.entry(event_id).or_default().clone())
    }

    /// Number of events with a lock handle.
    pub fn lock_count(&self) -> usize {
        self.locks.lock().map(|g| g.len()).unwrap_or(0)
    }

    async fn load_event(&self, event_id: EventId) -> TournamentResult<Event> {
        self.store
            .get_event(event_id)
            .await?
            .ok_or_else(|| TournamentError::NotFound(format!("event {}", event_id)))
    }

    /// Create an event in Registration state.
    pub async fn create_event(
        &self,
        name: &str,
        format: EventFormat,
        category: Option<EventCategory>,
    ) -> TournamentResult<Event> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TournamentError::InvalidInput(
                "event name must not be empty".to_string(),
            ));
        }
        let event = Event::new(name, format).with_category(category);
        self.store.insert_event(event.clone()).await?;
        log::info!("Created {:?} event {} ({})", format, event.name, event.id);
        Ok(event)
    }

    pub async fn get_event(&self, event_id: EventId) -> TournamentResult<Event> {
        self.load_event(event_id).await
    }

    /// All events, oldest first.
    pub async fn list_events(&self) -> TournamentResult<Vec<Event>> {
        self.store.list_events().await
    }

    /// Open a drawn event for play (Drawn -> Live).
    pub async fn start_event(&self, event_id: EventId) -> TournamentResult<Event> {
        let lock = self.event_lock(event_id).await?;
        let _guard = lock.write().await;
        let mut event = self.load_event(event_id).await?;
        event.start()?;
        self.store.update_event(&event).await?;
        log::info!("Event {} is live", event_id);
        Ok(event)
    }

    /// Draw round 1 with a fresh entropy-seeded RNG. Previously registered names are dropped.
    pub async fn generate_bracket(
        &self,
        event_id: EventId,
        participants: &[Participant],
    ) -> TournamentResult<DrawSummary> {
        let mut rng = StdRng::from_entropy();
        self.draw(event_id, participants, Vec::new(), &mut rng).await
    }

    /// Draw round 1 and register display names for its entrants in the same critical section.
    pub async fn generate_named_bracket(
        &self,
        event_id: EventId,
        participants: &[Participant],
        entrants: Vec<(SlotId, Entrant)>,
    ) -> TournamentResult<DrawSummary> {
        let mut rng = StdRng::from_entropy();
        self.draw(event_id, participants, entrants, &mut rng).await
    }

    /// Draw round 1 using `rng` for the unseeded shuffle.
    pub async fn generate_bracket_with_rng<R>(
        &self,
        event_id: EventId,
        participants: &[Participant],
        rng: &mut R,
    ) -> TournamentResult<DrawSummary>
    where
        R: Rng + Send + ?Sized,
    {
        self.draw(event_id, participants, Vec::new(), rng).await
    }

    /// Bracket and roster are replaced under the event's write lock, so a concurrent
    /// redraw cannot pair one draw's names with another draw's matches.
    async fn draw<R>(
        &self,
        event_id: EventId,
        participants: &[Participant],
        entrants: Vec<(SlotId, Entrant)>,
        rng: &mut R,
    ) -> TournamentResult<DrawSummary>
    where
        R: Rng + Send + ?Sized,
    {
        let lock = self.event_lock(event_id).await?;
        let _guard = lock.write().await;
        let summary = logic::generate_bracket(self.store.as_ref(), event_id, participants, rng).await?;
        self.names.register_entrants(event_id, entrants).await?;
        Ok(summary)
    }

    pub async fn record_winner(&self, match_id: MatchId, winner: SlotId) -> TournamentResult<GameMatch> {
        let game = self
            .store
            .find_match(match_id)
            .await?
            .ok_or_else(|| TournamentError::NotFound(format!("match {}", match_id)))?;
        let lock = self.event_lock(game.event_id).await?;
        let _guard = lock.read().await;
        logic::record_winner(self.store.as_ref(), match_id, winner).await
    }

    pub async fn finish_round(&self, event_id: EventId, round: u32) -> TournamentResult<RoundOutcome> {
        let lock = self.event_lock(event_id).await?;
        let _guard = lock.write().await;
        logic::finish_round(self.store.as_ref(), event_id, round).await
    }

    pub async fn bracket(&self, event_id: EventId) -> TournamentResult<BracketView> {
        logic::bracket_view(self.store.as_ref(), self.names.as_ref(), event_id).await
    }

    pub async fn pending_matches(&self) -> TournamentResult<Vec<PendingMatch>> {
        logic::pending_matches(self.store.as_ref(), self.names.as_ref()).await
    }
}
