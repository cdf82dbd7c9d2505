/// Creature AI configuration constants and tunable parameters.
///
/// All durations are milliseconds of simulation time; the host passes elapsed
/// milliseconds to every tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Interval between two evaluation passes over a unit's ability list.
    pub casting_delay_ms: u32,

    /// Cool-off before another stealth alert reaction may be sent.
    pub alert_cooldown_ms: u32,

    /// How long out-of-combat movement pauses after a player interaction.
    pub interaction_pause_ms: u32,

    /// Seed for the AI random source. `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl AiConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_CASTING_DELAY_MS: u32 = 1200;
    pub const DEFAULT_ALERT_COOLDOWN_MS: u32 = 10_000;
    pub const DEFAULT_INTERACTION_PAUSE_MS: u32 = 180_000;

    pub fn new() -> Self {
        Self {
            casting_delay_ms: Self::DEFAULT_CASTING_DELAY_MS,
            alert_cooldown_ms: Self::DEFAULT_ALERT_COOLDOWN_MS,
            interaction_pause_ms: Self::DEFAULT_INTERACTION_PAUSE_MS,
            rng_seed: None,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::new()
        }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}
