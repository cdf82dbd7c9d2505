//! Traits describing the collaborators the creature AI talks to.
//!
//! Oracles expose read-only data (spell catalog, ability lists, unit
//! snapshots, spatial probes, threat ranking, scripted target lookup).
//! Controllers accept commands (start a cast, stop movement, attack, deliver a
//! reaction signal). The AI engine bundles one implementation of each and
//! never depends on a concrete world.
//!
//! Every call is synchronous and in-memory; none may block.
mod catalog;
mod combat;
mod script;
mod spells;
mod transport;
mod world;

pub use catalog::{AbilityListOracle, SpellOracle};
pub use combat::{CombatController, CreatureGroupNotifier, MovementController, ThreatOracle};
pub use script::TargetScriptOracle;
pub use spells::SpellExecutor;
pub use transport::{AiReaction, ReactionSignal, ReactionSink};
pub use world::{Detection, SpatialOracle, WorldOracle};
