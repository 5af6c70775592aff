//! Roster: display labels for slots, registered when a bracket is drawn.

use super::NameResolver;
use crate::models::{Entrant, Event, EventFormat, EventId, SlotId, TournamentError, TournamentResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

fn lock_error<T>(_: PoisonError<T>) -> TournamentError {
    TournamentError::Storage("lock error".to_string())
}

/// In-memory name resolver.
#[derive(Debug, Default)]
pub struct Roster {
    entries: RwLock<HashMap<EventId, HashMap<SlotId, Entrant>>>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the event's entrants.
    pub fn register(
        &self,
        event_id: EventId,
        entrants: impl IntoIterator<Item = (SlotId, Entrant)>,
    ) -> TournamentResult<()> {
        let mut g = self.entries.write().map_err(lock_error)?;
        g.insert(event_id, entrants.into_iter().collect());
        Ok(())
    }
}

/// Singles: `Name (id)`. Doubles: `A (r1) + B (r2)`, else the team name.
fn label(format: EventFormat, slot: &SlotId, entrant: &Entrant) -> String {
    match format {
        EventFormat::Singles => match &entrant.name {
            Some(name) => format!("{} ({})", name, slot.key()),
            None => slot.key().to_string(),
        },
        EventFormat::Doubles if !entrant.members.is_empty() => entrant
            .members
            .iter()
            .map(|m| format!("{} ({})", m.name, m.roll_no))
            .collect::<Vec<_>>()
            .join(" + "),
        EventFormat::Doubles => entrant
            .name
            .clone()
            .unwrap_or_else(|| slot.key().to_string()),
    }
}

#[async_trait]
impl NameResolver for Roster {
    async fn resolve(&self, event: &Event, slot: &SlotId) -> TournamentResult<String> {
        let g = self.entries.read().map_err(lock_error)?;
        let entrant = g
            .get(&event.id)
            .and_then(|slots| slots.get(slot))
            .ok_or_else(|| TournamentError::NotFound(format!("entrant {}", slot)))?;
        Ok(label(event.format, slot, entrant))
    }

    async fn register_entrants(
        &self,
        event_id: EventId,
        entrants: Vec<(SlotId, Entrant)>,
    ) -> TournamentResult<()> {
        self.register(event_id, entrants)
    }
}
