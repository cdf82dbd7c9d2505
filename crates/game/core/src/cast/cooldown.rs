use std::collections::HashMap;

use crate::spell::SpellId;

/// Per-spell cooldowns in milliseconds, owned by one creature.
///
/// Entries that reach zero are dropped on the next [`CooldownTracker::advance`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CooldownTracker {
    remaining: HashMap<SpellId, u32>,
}

impl CooldownTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms (or re-arms) `spell` for `duration_ms`. A zero duration clears it.
    pub fn set(&mut self, spell: SpellId, duration_ms: u32) {
        if duration_ms == 0 {
            self.remaining.remove(&spell);
        } else {
            self.remaining.insert(spell, duration_ms);
        }
    }

    pub fn is_on_cooldown(&self, spell: SpellId) -> bool {
        self.remaining(spell) > 0
    }

    pub fn remaining(&self, spell: SpellId) -> u32 {
        self.remaining.get(&spell).copied().unwrap_or(0)
    }

    /// Counts every cooldown down by `elapsed_ms`, saturating at zero.
    pub fn advance(&mut self, elapsed_ms: u32) {
        self.remaining.retain(|_, left| {
            *left = left.saturating_sub(elapsed_ms);
            *left > 0
        });
    }

    pub fn clear(&mut self) {
        self.remaining.clear();
    }

    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }
}
