//! Seeder and bracket builder: sizes, bye allocation, seeded spacing, round-1 layout.

use knockout_bracket_web::{
    build_round, next_power_of_two, pair_in_order, seed_bracket, seeded_bye_positions,
    MatchStatus, Pairing, Participant, SlotId, TournamentError,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use uuid::Uuid;

fn slot(id: &str) -> SlotId {
    SlotId::Individual(id.to_string())
}

fn unseeded(n: usize) -> Vec<Participant> {
    (1..=n)
        .map(|i| Participant::unseeded(slot(&format!("P{i}"))))
        .collect()
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

#[test]
fn next_power_of_two_is_smallest_cover() {
    assert_eq!(next_power_of_two(2), 2);
    assert_eq!(next_power_of_two(3), 4);
    assert_eq!(next_power_of_two(4), 4);
    assert_eq!(next_power_of_two(5), 8);
    assert_eq!(next_power_of_two(9), 16);
    assert_eq!(next_power_of_two(16), 16);
    assert_eq!(next_power_of_two(17), 32);
}

#[test]
fn rejects_fewer_than_two_participants() {
    assert!(matches!(
        seed_bracket(&unseeded(1), &mut rng()),
        Err(TournamentError::InvalidInput(_))
    ));
    assert!(matches!(
        seed_bracket(&[], &mut rng()),
        Err(TournamentError::InvalidInput(_))
    ));
}

#[test]
fn rejects_duplicate_and_blank_ids() {
    let mut list = unseeded(3);
    list.push(Participant::new(slot("P2"), 4));
    assert!(matches!(
        seed_bracket(&list, &mut rng()),
        Err(TournamentError::InvalidInput(_))
    ));

    let blank = vec![Participant::unseeded(slot("A")), Participant::unseeded(slot("  "))];
    assert!(matches!(
        seed_bracket(&blank, &mut rng()),
        Err(TournamentError::InvalidInput(_))
    ));
}

#[test]
fn four_unseeded_players_need_no_byes() {
    let plan = seed_bracket(&unseeded(4), &mut rng()).unwrap();
    assert_eq!(plan.bracket_size, 4);
    assert_eq!(plan.byes, 0);
    assert_eq!(plan.match_count(), 2);
    assert!(plan.pairings.iter().all(|p| !p.is_bye()));
}

#[test]
fn three_unseeded_players_get_one_bye() {
    let plan = seed_bracket(&unseeded(3), &mut rng()).unwrap();
    assert_eq!(plan.bracket_size, 4);
    assert_eq!(plan.byes, 1);
    assert_eq!(plan.bye_slots.len(), 1);
    assert_eq!(plan.playing_slots.len(), 2);
    // The only bye takes the lowest free match index.
    assert!(plan.pairings[0].is_bye());
    assert!(!plan.pairings[1].is_bye());
}

#[test]
fn nine_players_with_three_seeds_spread_the_seeded_byes() {
    let mut list = unseeded(6);
    list.push(Participant::new(slot("S3"), 3));
    list.insert(2, Participant::new(slot("S1"), 1));
    list.insert(0, Participant::new(slot("S2"), 2));

    let plan = seed_bracket(&list, &mut rng()).unwrap();
    assert_eq!(plan.bracket_size, 16);
    assert_eq!(plan.byes, 7);
    assert_eq!(plan.match_count(), 8);

    assert_eq!(plan.pairings[0], Pairing::bye(slot("S1")));
    assert_eq!(plan.pairings[3], Pairing::bye(slot("S2")));
    assert_eq!(plan.pairings[7], Pairing::bye(slot("S3")));

    // Four unseeded byes fill the lowest unused indices: 1, 2, 4, 5.
    for i in [1, 2, 4, 5] {
        let p = &plan.pairings[i];
        assert!(p.is_bye(), "match index {i} should be a bye");
        assert!(p.slot1.key().starts_with('P'));
    }
    let regular = &plan.pairings[6];
    assert!(!regular.is_bye());
    assert!(regular.slot1.key().starts_with('P'));
    assert_eq!(plan.bye_slots[..3], [slot("S1"), slot("S2"), slot("S3")]);
}

#[test]
fn seeds_beyond_the_bye_count_play_first_in_the_pool() {
    let mut list = unseeded(2);
    for seed in 1..=4 {
        list.push(Participant::new(slot(&format!("S{seed}")), seed));
    }
    // n = 6 -> bracket 8, two byes for seeds 1 and 2 at indices 0 and 3.
    let plan = seed_bracket(&list, &mut rng()).unwrap();
    assert_eq!(plan.byes, 2);
    assert_eq!(plan.pairings[0], Pairing::bye(slot("S1")));
    assert_eq!(plan.pairings[3], Pairing::bye(slot("S2")));
    assert_eq!(plan.pairings[1], Pairing::versus(slot("S3"), slot("S4")));
    assert!(!plan.pairings[2].is_bye());
    assert_eq!(plan.playing_slots[..2], [slot("S3"), slot("S4")]);
}

#[test]
fn single_seeded_bye_opens_the_bracket() {
    let mut list = unseeded(4);
    list.push(Participant::new(slot("TOP"), 1));
    // n = 5 -> bracket 8, 3 byes: TOP at 0, unseeded at 1 and 2.
    let plan = seed_bracket(&list, &mut rng()).unwrap();
    assert_eq!(plan.pairings[0], Pairing::bye(slot("TOP")));
    assert!(plan.pairings[1].is_bye());
    assert!(plan.pairings[2].is_bye());
    assert!(!plan.pairings[3].is_bye());
}

#[test]
fn seeded_bye_positions_are_spread_and_increasing() {
    assert!(seeded_bye_positions(0, 8).is_empty());
    assert_eq!(seeded_bye_positions(1, 8), vec![0]);
    assert_eq!(seeded_bye_positions(2, 8), vec![0, 7]);
    assert_eq!(seeded_bye_positions(3, 8), vec![0, 3, 7]);
    assert_eq!(seeded_bye_positions(4, 16), vec![0, 5, 10, 15]);
}

#[test]
fn same_rng_seed_gives_same_draw() {
    let a = seed_bracket(&unseeded(11), &mut StdRng::seed_from_u64(42)).unwrap();
    let b = seed_bracket(&unseeded(11), &mut StdRng::seed_from_u64(42)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn build_round_numbers_matches_and_completes_byes() {
    let event_id = Uuid::new_v4();
    let pairings = vec![
        Pairing::bye(slot("A")),
        Pairing::versus(slot("B"), slot("C")),
        Pairing::versus(slot("D"), slot("E")),
    ];
    let matches = build_round(event_id, 1, &pairings);
    assert_eq!(matches.len(), 3);
    assert_eq!(
        matches.iter().map(|m| m.match_no).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );

    let bye = &matches[0];
    assert!(bye.is_bye);
    assert_eq!(bye.status, MatchStatus::Completed);
    assert_eq!(bye.winner, Some(slot("A")));
    assert_eq!(bye.slot2, None);

    for m in &matches[1..] {
        assert!(!m.is_bye);
        assert_eq!(m.status, MatchStatus::Pending);
        assert_eq!(m.winner, None);
        assert_eq!(m.event_id, event_id);
        assert_eq!(m.round, 1);
    }
}

#[test]
fn pair_in_order_gives_odd_one_out_a_bye() {
    let slots = vec![slot("A"), slot("B"), slot("C")];
    assert_eq!(
        pair_in_order(&slots),
        vec![Pairing::versus(slot("A"), slot("B")), Pairing::bye(slot("C"))]
    );
    assert!(pair_in_order(&[]).is_empty());
}
