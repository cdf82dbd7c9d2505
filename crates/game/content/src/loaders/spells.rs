//! Spell catalog loader and registry.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use creature_core::{SpellDefinition, SpellId, SpellOracle};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalog {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for spell catalogs from RON files.
pub struct SpellLoader;

impl SpellLoader {
    /// Load a spell catalog from a RON file.
    pub fn load(path: &Path) -> LoadResult<Vec<SpellDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<SpellDefinition>> {
        let catalog: SpellCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse spell catalog RON: {}", e))?;

        Ok(catalog.spells)
    }
}

/// Read-only spell store shared by every AI instance.
#[derive(Debug, Clone, Default)]
pub struct SpellRegistry {
    spells: HashMap<SpellId, Arc<SpellDefinition>>,
}

impl SpellRegistry {
    /// Builds a registry, rejecting duplicate spell ids.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = SpellDefinition>,
    ) -> LoadResult<Self> {
        let mut spells = HashMap::new();
        for spell in definitions {
            let id = spell.id;
            if spells.insert(id, Arc::new(spell)).is_some() {
                anyhow::bail!("Duplicate spell id {} in catalog", id);
            }
        }
        Ok(Self { spells })
    }

    pub fn load(path: &Path) -> LoadResult<Self> {
        Self::from_definitions(SpellLoader::load(path)?)
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = SpellId> + '_ {
        self.spells.keys().copied()
    }
}

impl SpellOracle for SpellRegistry {
    fn spell(&self, id: SpellId) -> Option<Arc<SpellDefinition>> {
        self.spells.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use creature_core::{CastPosition, EffectKind, TargetMask};

    use super::*;

    const CATALOG: &str = r#"
(
    spells: [
        (
            id: SpellId(100),
            name: "Shadow Bolt",
            targets: "UNIT | UNIT_ENEMY",
            interrupt_flags: "MOVEMENT",
            effects: [(kind: SchoolDamage, harmful: true)],
            recovery_ms: 6000,
        ),
        (
            id: SpellId(200),
            name: "Backstab",
            position: Behind,
        ),
        (
            id: SpellId(300),
            name: "Thorns",
            targets: "",
            effects: [(kind: ApplyAura, harmful: false)],
            passive: true,
        ),
    ],
)
"#;

    #[test]
    fn parses_catalog_with_defaults() {
        let spells = SpellLoader::parse(CATALOG).expect("catalog parses");
        assert_eq!(spells.len(), 3);

        let bolt = &spells[0];
        assert_eq!(bolt.targets, TargetMask::UNIT | TargetMask::UNIT_ENEMY);
        assert!(bolt.is_interrupted_by_movement());
        assert!(bolt.has_only_harmful_effects());
        assert_eq!(bolt.recovery_ms, 6000);

        let backstab = &spells[1];
        assert_eq!(backstab.position, CastPosition::Behind);
        assert_eq!(backstab.targets, TargetMask::UNIT);
        assert!(backstab.effects.is_empty());

        let thorns = &spells[2];
        assert!(thorns.is_passive());
        assert!(thorns.targets.is_self_only());
        assert!(thorns.has_effect_of_type(&[EffectKind::ApplyAura]));
    }

    #[test]
    fn registry_serves_shared_definitions() {
        let registry = SpellRegistry::from_definitions(
            SpellLoader::parse(CATALOG).expect("catalog parses"),
        )
        .expect("unique ids");

        assert_eq!(registry.len(), 3);
        let first = registry.spell(SpellId(100)).expect("known spell");
        let second = registry.spell(SpellId(100)).expect("known spell");
        assert!(Arc::ptr_eq(&first, &second));
        assert!(registry.spell(SpellId(999)).is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = SpellRegistry::from_definitions([
            SpellDefinition::new(SpellId(1), "A"),
            SpellDefinition::new(SpellId(1), "B"),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn malformed_ron_fails() {
        assert!(SpellLoader::parse("(spells: [ (id: 5) ])").is_err());
    }
}
