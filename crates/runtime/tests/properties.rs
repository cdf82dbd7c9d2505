mod common;

use std::sync::Arc;

use creature_ai::{ArenaWorld, CastScheduler, select_proximity_target};
use creature_core::{
    CooldownTracker, Position, SpellId, UnitId, UnitKind, UnitSnapshot, UnitState,
};
use proptest::collection::vec;
use proptest::prelude::*;

use common::{CREATURE, CREATURE_FACTION, PLAYER_FACTION, Setup, arena_with_player, bolt, certain};

const CADENCE: u32 = 1_200;
const DETECTION_RANGE: f32 = 20.0;

#[derive(Clone, Debug)]
struct Candidate {
    x: f32,
    y: f32,
    kind: UnitKind,
    hostile: bool,
    sanctuary: bool,
}

fn candidate() -> impl Strategy<Value = Candidate> {
    (
        -40.0f32..40.0,
        -40.0f32..40.0,
        prop_oneof![
            Just(UnitKind::Player),
            Just(UnitKind::Creature),
            Just(UnitKind::Pet)
        ],
        any::<bool>(),
        prop::bool::weighted(0.2),
    )
        .prop_map(|(x, y, kind, hostile, sanctuary)| Candidate {
            x,
            y,
            kind,
            hostile,
            sanctuary,
        })
}

proptest! {
    #[test]
    fn cooldowns_count_down_monotonically(
        armed in 1u32..60_000,
        steps in vec(0u32..5_000, 0..40),
    ) {
        let spell = SpellId(1);
        let mut tracker = CooldownTracker::new();
        tracker.set(spell, armed);

        let mut last = armed;
        for step in steps {
            tracker.advance(step);
            let remaining = tracker.remaining(spell);
            prop_assert_eq!(remaining, last.saturating_sub(step));
            prop_assert_eq!(tracker.is_on_cooldown(spell), remaining > 0);
            last = remaining;
        }
    }

    #[test]
    fn scheduler_passes_are_spaced_by_cadence(steps in vec(1u32..700, 1..200)) {
        let mut scheduler = CastScheduler::new(CADENCE);
        let mut since_last: Option<u64> = None;

        for (index, step) in steps.into_iter().enumerate() {
            if let Some(elapsed) = since_last.as_mut() {
                *elapsed += u64::from(step);
            }
            let due = scheduler.tick(step);
            if index == 0 {
                prop_assert!(due, "first tick is always due");
            }
            if due {
                if let Some(elapsed) = since_last {
                    prop_assert!(elapsed >= u64::from(CADENCE));
                    prop_assert!(elapsed < u64::from(CADENCE) + 700);
                }
                since_last = Some(0);
            }
        }
    }

    #[test]
    fn creature_passes_follow_the_scheduler(steps in vec(1u32..2_000, 1..60)) {
        let arena = arena_with_player(10.0);
        let mut ai = Setup::new(arena.clone())
            .spell(bolt(10))
            .entry(certain(10))
            .build();
        let mut reference = CastScheduler::new(CADENCE);
        let mut passes = 0;

        for step in steps {
            let ran = ai.update(step).is_some();
            prop_assert_eq!(ran, reference.tick(step));
            passes += usize::from(ran);
            arena.finish_casts();
        }
        // No recovery time: every pass commits the single ability.
        prop_assert_eq!(arena.casts_by(CREATURE).len(), passes);
    }

    #[test]
    fn detection_picks_first_eligible_candidate(candidates in vec(candidate(), 0..12)) {
        let arena = Arc::new(ArenaWorld::new());
        arena.spawn_at(CREATURE, UnitKind::Creature, Position::ORIGIN, CREATURE_FACTION);

        let snapshots: Vec<UnitSnapshot> = candidates
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let mut unit = UnitSnapshot::new(
                    UnitId(1_000 + index as u64),
                    candidate.kind,
                    Position::new(candidate.x, candidate.y, 0.0, 0.0),
                );
                if candidate.sanctuary {
                    unit.state |= UnitState::SANCTUARY;
                }
                let faction = if candidate.hostile { PLAYER_FACTION } else { CREATURE_FACTION };
                arena.spawn(unit, faction);
                unit
            })
            .collect();

        let observer = arena.snapshot(CREATURE).expect("observer");
        let picked = select_proximity_target(
            &observer,
            DETECTION_RANGE,
            &snapshots,
            arena.as_ref(),
            arena.as_ref(),
            |_| {},
        );

        let expected = candidates
            .iter()
            .zip(&snapshots)
            .find(|(candidate, unit)| {
                candidate.kind != UnitKind::Pet
                    && candidate.hostile
                    && !candidate.sanctuary
                    && unit.distance_to(&observer) <= DETECTION_RANGE
            })
            .map(|(_, unit)| unit.id);

        prop_assert_eq!(picked.map(|unit| unit.id), expected);
        if let Some(unit) = picked {
            prop_assert!(!unit.in_sanctuary());
            prop_assert!(unit.distance_to(&observer) <= DETECTION_RANGE);
        }
    }
}
