//! Abstract reaction signals for the transport layer.

use crate::state::UnitId;

/// Client-facing AI reaction kinds.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString, strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[repr(u32)]
pub enum AiReaction {
    /// Noticed something (stealth alert); rate-limited.
    Alert = 0,
    Friendly = 1,
    /// Aggro sound/animation.
    Hostile = 2,
    Afraid = 3,
    Destroy = 4,
}

/// Reaction emitted by `source`; the transport layer encodes and delivers it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReactionSignal {
    pub source: UnitId,
    pub reaction: AiReaction,
}

/// Outbound queue towards a specific recipient.
pub trait ReactionSink: Send + Sync {
    fn enqueue(&self, recipient: UnitId, signal: ReactionSignal);
}
