// Round-level behaviour of the hunt engine, driven with a virtual clock.
// Native-friendly: no wasm/browser APIs are touched.

use croc_site::hunt::{
    EntityId, EntityState, FieldSize, HuntEngine, HuntEvent, Origin, Outcome, Phase, Rating,
};
use croc_site::HuntConfig;

fn engine(seed: u64) -> HuntEngine {
    let mut hunt = HuntEngine::with_seed(HuntConfig::default(), seed);
    hunt.set_field(FieldSize { width: 600.0, height: 300.0 });
    hunt
}

fn active_ids(hunt: &HuntEngine) -> Vec<EntityId> {
    hunt.entities().filter(|e| e.is_active()).map(|e| e.id).collect()
}

/// Counts (caught, escaped) events.
fn tally(events: &[HuntEvent]) -> (u32, u32) {
    events.iter().fold((0, 0), |(c, e), ev| match ev {
        HuntEvent::Caught { .. } => (c + 1, e),
        HuntEvent::Escaped { .. } => (c, e + 1),
        _ => (c, e),
    })
}

#[test]
fn catching_five_fish_wins_early() {
    let mut hunt = engine(1);
    hunt.start(0.0);
    let mut events = Vec::new();
    let mut t = 0.0;
    while hunt.round().caught < 5 {
        hunt.advance(t);
        for id in active_ids(&hunt) {
            if hunt.round().caught < 5 {
                assert!(hunt.catch(id, t));
            }
        }
        events.extend(hunt.drain_events());
        t += 2000.0;
    }
    let last_catch = t - 2000.0;
    assert_eq!(hunt.phase(), Phase::Active, "win waits for the catch animation");
    hunt.advance(last_catch + 500.0);
    events.extend(hunt.drain_events());

    assert_eq!(hunt.phase(), Phase::Ended(Outcome::Win));
    assert!(hunt.round().time_remaining >= 20);
    assert_eq!(hunt.round().caught_text(), "Fish Caught: 5/5");
    let ended = events.iter().find_map(|e| match e {
        HuntEvent::RoundEnded { rating, caught, .. } => Some((*rating, *caught)),
        _ => None,
    });
    assert_eq!(ended, Some((Rating::MasterHunter, 5)));
    assert_eq!(hunt.entities().count(), 0);
    assert_eq!(hunt.pending_timers(), 0);
}

#[test]
fn idle_round_times_out_as_patient_observer() {
    let mut hunt = engine(2);
    hunt.start(0.0);
    hunt.advance(29_999.0);
    assert_eq!(hunt.phase(), Phase::Active);
    assert_eq!(hunt.round().time_remaining, 1);
    hunt.advance(30_000.0);
    let events: Vec<_> = hunt.drain_events().collect();

    assert_eq!(hunt.phase(), Phase::Ended(Outcome::TimeUp));
    assert_eq!(hunt.round().time_remaining, 0);
    assert_eq!(hunt.round().caught, 0);
    let (_, escaped) = tally(&events);
    assert_eq!(hunt.round().missed, escaped);
    assert!(escaped > 0);
    assert!(events.contains(&HuntEvent::RoundEnded {
        outcome: Outcome::TimeUp,
        rating: Rating::PatientObserver,
        caught: 0,
        missed: escaped,
    }));
    // Fish still swimming at the buzzer are swept, not counted.
    assert_eq!(hunt.entities().count(), 0);
}

/// Runs an untouched round to the end, calling `advance` every `frame_ms`.
fn idle_round(seed: u64, frame_ms: f64) -> (Vec<HuntEvent>, u32, u32) {
    let mut hunt = engine(seed);
    hunt.start(0.0);
    let mut events = Vec::new();
    let mut t = 0.0;
    while hunt.is_active() {
        t += frame_ms;
        hunt.advance(t);
        events.extend(hunt.drain_events());
    }
    (events, hunt.round().missed, hunt.round().spawned)
}

#[test]
fn one_late_frame_plays_out_like_steady_frames() {
    let (steady, steady_missed, steady_spawned) = idle_round(2, 16.0);
    let (late, late_missed, late_spawned) = idle_round(2, 30_000.0);
    assert_eq!((late_missed, late_spawned), (steady_missed, steady_spawned));
    assert_eq!(late, steady);
    // Fish spawned long before the frame have already swum off.
    assert!(late_missed > 1);
}

#[test]
fn late_spawn_starts_moving_from_its_due_time() {
    let mut hunt = engine(2);
    hunt.start(0.0);
    hunt.advance(2500.0);
    let newest = hunt.entities().last().map(|e| (e.origin, e.position.x));
    let moved = match newest {
        Some((Origin::Left, x)) => x > -50.0,
        Some((Origin::Right, x)) => x < 610.0,
        None => false,
    };
    assert!(moved, "fish due at 2000 should have 10 motion ticks by 2500");
}

#[test]
fn countdown_never_goes_below_zero() {
    let mut hunt = engine(3);
    hunt.start(0.0);
    hunt.advance(120_000.0);
    let remaining: Vec<u32> = hunt
        .drain_events()
        .filter_map(|e| match e {
            HuntEvent::Countdown { remaining } => Some(remaining),
            _ => None,
        })
        .collect();
    assert_eq!(remaining.len(), 30);
    assert_eq!(remaining.last(), Some(&0));
    assert_eq!(hunt.round().time_remaining, 0);
}

#[test]
fn outcomes_balance_with_counters() {
    let mut hunt = engine(4);
    hunt.start(0.0);
    let mut events = Vec::new();
    let mut t = 0.0;
    // Catch every other fish we see until the round ends.
    let mut take = true;
    while hunt.is_active() {
        t += 250.0;
        hunt.advance(t);
        for id in active_ids(&hunt) {
            if take {
                hunt.catch(id, t);
            }
            take = !take;
        }
        events.extend(hunt.drain_events());
    }
    let (caught, escaped) = tally(&events);
    let round = hunt.round();
    assert!(round.caught <= round.max_catches);
    assert_eq!(round.caught, caught);
    assert_eq!(round.missed, escaped);
    assert!(round.caught + round.missed <= round.spawned);
}

#[test]
fn reset_right_after_start_leaves_nothing_running() {
    let mut hunt = engine(5);
    hunt.start(0.0);
    hunt.reset();
    assert_eq!(hunt.phase(), Phase::Idle);
    assert_eq!(hunt.pending_timers(), 0);
    hunt.drain_events().for_each(drop);

    hunt.advance(60_000.0);
    assert_eq!(hunt.drain_events().count(), 0);
    assert_eq!(hunt.round().caught, 0);
    assert_eq!(hunt.round().missed, 0);
    assert_eq!(hunt.round().time_remaining, 30);
    // Reset is idempotent.
    hunt.reset();
    assert_eq!(hunt.phase(), Phase::Idle);
}

#[test]
fn catches_past_the_limit_are_ignored() {
    let cfg = HuntConfig { max_catches: 1, ..HuntConfig::default() };
    let mut hunt = HuntEngine::with_seed(cfg, 6);
    hunt.start(0.0);
    hunt.advance(2000.0);
    let ids = active_ids(&hunt);
    assert_eq!(ids.len(), 2);
    assert!(hunt.catch(ids[0], 2000.0));
    assert!(!hunt.catch(ids[1], 2100.0));
    assert_eq!(hunt.round().caught, 1);
    assert_eq!(hunt.entity(ids[1]).map(|e| e.state), Some(EntityState::Active));
    hunt.advance(2500.0);
    assert_eq!(hunt.phase(), Phase::Ended(Outcome::Win));
}

#[test]
fn catching_after_the_round_is_a_no_op() {
    let mut hunt = engine(7);
    hunt.start(0.0);
    let id = active_ids(&hunt)[0];
    hunt.advance(30_000.0);
    assert!(!hunt.catch(id, 30_001.0));
    assert_eq!(hunt.round().caught, 0);
}

#[test]
fn time_up_sweeps_fish_awaiting_removal() {
    let mut hunt = engine(8);
    hunt.start(0.0);
    hunt.advance(29_800.0);
    let id = active_ids(&hunt)[0];
    hunt.catch(id, 29_800.0);
    hunt.drain_events().for_each(drop);
    hunt.advance(30_000.0);
    let events: Vec<_> = hunt.drain_events().collect();
    assert!(events.contains(&HuntEvent::Despawned { id }));
    assert!(hunt.entity(id).is_none());
    assert_eq!(hunt.round().caught, 1);
    assert!(matches!(
        events.last(),
        Some(HuntEvent::RoundEnded { rating: Rating::LearningHunter, .. })
    ));
}

#[test]
fn restart_after_end_begins_a_fresh_round() {
    let mut hunt = engine(9);
    hunt.start(0.0);
    hunt.advance(30_000.0);
    assert!(matches!(hunt.phase(), Phase::Ended(_)));
    hunt.start(40_000.0);
    assert_eq!(hunt.phase(), Phase::Active);
    assert_eq!(hunt.round().missed, 0);
    assert_eq!(hunt.round().time_remaining, 30);
    assert_eq!(hunt.entities().count(), 1);
    // The new round's clock starts from the restart time.
    hunt.advance(40_999.0);
    assert_eq!(hunt.round().time_remaining, 30);
    hunt.advance(41_000.0);
    assert_eq!(hunt.round().time_remaining, 29);
}
