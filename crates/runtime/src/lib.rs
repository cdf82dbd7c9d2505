//! Creature combat AI engine.
//!
//! This crate turns the pure rules of `creature-core` into a tick-driven
//! engine. Hosts build one [`CreatureAi`] per controlled unit, inject the
//! collaborators it needs, and call [`CreatureAi::update`] every tick plus the
//! lifecycle methods on spawn, death, damage and combat transitions.
//!
//! Modules are organized by responsibility:
//! - [`ai`] hosts the per-creature instance and its builder
//! - [`scheduler`] runs the cast cadence and evaluation passes
//! - [`resolver`] shapes script-resolved targets into castable ones
//! - [`detection`] handles proximity acquisition and rate-limited reactions
//! - [`hooks`] provides the pluggable behavior-script callbacks
//! - [`arena`] is an in-memory host world implementing every collaborator
pub mod ai;
pub mod arena;
pub mod detection;
pub mod error;
pub mod hooks;
pub mod resolver;
pub mod scheduler;
pub mod services;

pub use ai::{CreatureAi, CreatureAiBuilder};
pub use arena::{ArenaEvent, ArenaWorld, Stealth};
pub use detection::{AlertLimiter, select_proximity_target};
pub use error::{BuildError, Result};
pub use hooks::{BehaviorScript, HookDispatcher, NoopScript};
pub use resolver::{ResolvedTarget, TargetResolver};
pub use scheduler::{CastScheduler, PassReport};
pub use services::{AiServices, ServiceFacts};
