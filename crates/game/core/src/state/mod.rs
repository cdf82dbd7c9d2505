//! Read-only views of world state consumed by the AI.
//!
//! The host simulation owns every unit. The AI only ever sees
//! [`UnitSnapshot`] values produced by the world oracle for the duration of a
//! single decision, and never mutates them.
mod position;
mod unit;

pub use position::Position;
pub use unit::{CombatPhase, ReactState, UnitFlags, UnitId, UnitKind, UnitSnapshot, UnitState};
