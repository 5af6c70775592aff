//! BracketBuilder: turns ordered pairings into numbered match records.

use crate::models::{EventId, GameMatch, Pairing, SlotId};

/// Pair slots two at a time in the given order; an odd one out gets a bye.
pub fn pair_in_order(slots: &[SlotId]) -> Vec<Pairing> {
    slots
        .chunks(2)
        .filter_map(|chunk| match chunk {
            [a, b] => Some(Pairing::versus(a.clone(), b.clone())),
            [a] => Some(Pairing::bye(a.clone())),
            _ => None,
        })
        .collect()
}

/// Build the matches of one round. Match numbers start at 1 and follow pairing order.
///
/// A full pairing becomes a pending match; a lone slot becomes a completed bye.
pub fn build_round(event_id: EventId, round: u32, pairings: &[Pairing]) -> Vec<GameMatch> {
    (1u32..)
        .zip(pairings)
        .map(|(match_no, pairing)| match &pairing.slot2 {
            Some(slot2) => GameMatch::new(
                event_id,
                round,
                match_no,
                pairing.slot1.clone(),
                slot2.clone(),
            ),
            None => GameMatch::bye(event_id, round, match_no, pairing.slot1.clone()),
        })
        .collect()
}
