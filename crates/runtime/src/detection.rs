//! Proximity target acquisition and rate-limited reactions.

use creature_core::{
    AiReaction, ReactionSignal, SpatialOracle, UnitId, UnitKind, UnitSnapshot, WorldOracle,
};
use tracing::debug;

use crate::services::AiServices;

/// Cool-off gate for alert reactions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AlertLimiter {
    cooldown_ms: u32,
    remaining_ms: u32,
}

impl AlertLimiter {
    pub fn new(cooldown_ms: u32) -> Self {
        Self {
            cooldown_ms,
            remaining_ms: 0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.remaining_ms == 0
    }

    pub fn remaining_ms(&self) -> u32 {
        self.remaining_ms
    }

    /// Claims the gate. Returns false while the cool-off is running.
    pub fn try_arm(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.remaining_ms = self.cooldown_ms;
        true
    }

    pub fn advance(&mut self, elapsed_ms: u32) {
        self.remaining_ms = self.remaining_ms.saturating_sub(elapsed_ms);
    }

    pub fn reset(&mut self) {
        self.remaining_ms = 0;
    }
}

/// Picks the first candidate `observer` can see, in input order.
///
/// `on_alert` fires for every real player whose probe asks for an alert, even
/// when that player stays hidden.
pub fn select_proximity_target<W, S, F>(
    observer: &UnitSnapshot,
    detection_range: f32,
    candidates: &[UnitSnapshot],
    world: &W,
    spatial: &S,
    mut on_alert: F,
) -> Option<UnitSnapshot>
where
    W: WorldOracle + ?Sized,
    S: SpatialOracle + ?Sized,
    F: FnMut(&UnitSnapshot),
{
    for victim in candidates {
        if victim.kind == UnitKind::Pet {
            continue;
        }
        if !world.is_hostile(observer.id, victim.id) {
            continue;
        }

        let distance = victim.distance_to(observer);
        if distance > detection_range {
            continue;
        }
        if victim.in_sanctuary() || victim.on_taxi() {
            continue;
        }

        let detection = spatial.detect(observer, victim, distance);
        if detection.alert && victim.is_player() {
            on_alert(victim);
        }
        if !detection.detected {
            continue;
        }

        if !spatial.line_of_sight(observer, victim) {
            continue;
        }

        return Some(*victim);
    }

    None
}

/// Emits `reaction` from `source` to `victim`.
///
/// Only alerts are rate-limited; a suppressed alert has no side effects.
pub(crate) fn send_reaction(
    services: &AiServices,
    limiter: &mut AlertLimiter,
    source: UnitId,
    victim: UnitId,
    reaction: AiReaction,
) -> bool {
    if reaction == AiReaction::Alert {
        if !limiter.try_arm() {
            debug!(
                target: "creature_ai::reaction",
                unit = %source,
                victim = %victim,
                remaining_ms = limiter.remaining_ms(),
                "alert suppressed"
            );
            return false;
        }
        services.movement.stop(source);
    }

    services.movement.face_target(source, victim);
    services
        .transport
        .enqueue(victim, ReactionSignal { source, reaction });

    debug!(
        target: "creature_ai::reaction",
        unit = %source,
        victim = %victim,
        reaction = %reaction,
        "reaction sent"
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_blocks_until_window_elapses() {
        let mut limiter = AlertLimiter::new(10_000);
        assert!(limiter.try_arm());
        assert!(!limiter.try_arm());

        limiter.advance(9_999);
        assert!(!limiter.try_arm());

        limiter.advance(1);
        assert!(limiter.try_arm());
    }

    #[test]
    fn limiter_advance_saturates() {
        let mut limiter = AlertLimiter::new(10_000);
        limiter.try_arm();
        limiter.advance(u32::MAX);
        assert_eq!(limiter.remaining_ms(), 0);
        assert!(limiter.is_ready());
    }
}
