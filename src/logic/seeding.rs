//! Seeder: bracket size, bye allocation and round-1 layout from a participant list.

use crate::models::{Pairing, Participant, SlotId, TournamentError, TournamentResult};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Output of the seeder: everything needed to build round 1.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SeedPlan {
    /// Smallest power of two >= participant count.
    pub bracket_size: usize,
    /// `bracket_size - n`.
    pub byes: usize,
    /// One pairing per round-1 match, in match order (`bracket_size / 2` entries).
    pub pairings: Vec<Pairing>,
    /// Participants that received a bye, strongest seeds first.
    pub bye_slots: Vec<SlotId>,
    /// Participants that must play in round 1, in pairing order.
    pub playing_slots: Vec<SlotId>,
}

impl SeedPlan {
    pub fn match_count(&self) -> usize {
        self.pairings.len()
    }
}

/// Smallest power of two that is >= `n` (1 for `n = 0`).
pub fn next_power_of_two(n: usize) -> usize {
    n.next_power_of_two()
}

/// Match indices for `k` seeded byes spread across `match_count` round-1 matches.
///
/// Seed `i` (0 = strongest) lands at `floor(i * (match_count - 1) / (k - 1))`, so the
/// first seed opens the bracket and the last seeded bye closes it.
pub fn seeded_bye_positions(k: usize, match_count: usize) -> Vec<usize> {
    match k {
        0 => Vec::new(),
        1 => vec![0],
        _ => (0..k)
            .map(|i| i * (match_count.saturating_sub(1)) / (k - 1))
            .collect(),
    }
}

/// Reject lists the seeder cannot lay out: fewer than two entries, blank or repeated ids.
pub fn validate_participants(participants: &[Participant]) -> TournamentResult<()> {
    if participants.len() < 2 {
        return Err(TournamentError::InvalidInput(format!(
            "need at least 2 participants, got {}",
            participants.len()
        )));
    }
    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if p.slot.key().trim().is_empty() {
            return Err(TournamentError::InvalidInput(
                "participant id must not be empty".to_string(),
            ));
        }
        if !seen.insert(&p.slot) {
            return Err(TournamentError::InvalidInput(format!(
                "participant {} listed more than once",
                p.slot
            )));
        }
    }
    Ok(())
}

/// Seed participants into a bracket.
///
/// 1. Size the bracket to the next power of two; the shortfall is the bye count.
/// 2. Byes go to seeded participants in seed order, then to shuffled unseeded ones.
/// 3. Seeded byes are spread out with [`seeded_bye_positions`]; unseeded byes take the
///    lowest free match indices.
/// 4. Every other match takes the next two players from the playing pool
///    (remaining seeds first, then remaining unseeded).
///
/// `rng` drives the only non-deterministic step: the unseeded shuffle.
pub fn seed_bracket<R: Rng + ?Sized>(
    participants: &[Participant],
    rng: &mut R,
) -> TournamentResult<SeedPlan> {
    validate_participants(participants)?;

    let n = participants.len();
    let bracket_size = next_power_of_two(n);
    let byes = bracket_size - n;
    let match_count = bracket_size / 2;

    let mut seeded: Vec<&Participant> = participants.iter().filter(|p| p.is_seeded()).collect();
    seeded.sort_by_key(|p| p.seed);
    let mut unseeded: Vec<&Participant> =
        participants.iter().filter(|p| !p.is_seeded()).collect();
    unseeded.shuffle(rng);

    let seeded_byes = byes.min(seeded.len());
    let unseeded_byes = (byes - seeded_byes).min(unseeded.len());
    // After the split, `seeded` / `unseeded` hold only the bye receivers.
    let playing_seeded = seeded.split_off(seeded_byes);
    let playing_unseeded = unseeded.split_off(unseeded_byes);

    let mut layout: Vec<Option<&Participant>> = vec![None; match_count];
    for (pos, p) in seeded_bye_positions(seeded.len(), match_count)
        .into_iter()
        .zip(seeded.iter().copied())
    {
        layout[pos] = Some(p);
    }
    let free: Vec<usize> = (0..match_count).filter(|&i| layout[i].is_none()).collect();
    for (pos, p) in free.into_iter().zip(unseeded.iter().copied()) {
        layout[pos] = Some(p);
    }

    let playing: Vec<&Participant> = playing_seeded
        .into_iter()
        .chain(playing_unseeded)
        .collect();
    let mut pool = playing.iter();
    let mut pairings = Vec::with_capacity(match_count);
    for entry in layout {
        let pairing = match entry {
            Some(p) => Pairing::bye(p.slot.clone()),
            None => match (pool.next(), pool.next()) {
                (Some(a), Some(b)) => Pairing::versus(a.slot.clone(), b.slot.clone()),
                (Some(a), None) => Pairing::bye(a.slot.clone()),
                (None, _) => {
                    return Err(TournamentError::InvalidInput(
                        "playing pool exhausted before the bracket was filled".to_string(),
                    ))
                }
            },
        };
        pairings.push(pairing);
    }

    let bye_slots = seeded
        .iter()
        .chain(unseeded.iter())
        .map(|p| p.slot.clone())
        .collect();
    let playing_slots = playing.iter().map(|p| p.slot.clone()).collect();

    Ok(SeedPlan {
        bracket_size,
        byes,
        pairings,
        bye_slots,
        playing_slots,
    })
}
