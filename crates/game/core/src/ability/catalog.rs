use super::{AbilityEntry, AbilityListId};
use crate::env::{AbilityListOracle, SpellOracle};
use crate::error::{AiError, ErrorSeverity};
use crate::spell::SpellId;

/// Ordered, resolved ability list of one creature.
pub type AbilityList = Vec<AbilityEntry>;

/// Content problems found while resolving an ability list.
///
/// None of these stop the creature from spawning; the offending entry is
/// dropped and the rest of the list is kept.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("ability list {0:?} not found")]
    UnknownAbilityList(AbilityListId),

    #[error("ability list {list:?} references unknown {spell}")]
    UnknownSpell { list: AbilityListId, spell: SpellId },
}

impl AiError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownAbilityList(_) => "CATALOG_UNKNOWN_ABILITY_LIST",
            Self::UnknownSpell { .. } => "CATALOG_UNKNOWN_SPELL",
        }
    }
}

/// Outcome of resolving one ability list.
#[derive(Clone, Debug, Default)]
pub struct CatalogReport {
    pub abilities: AbilityList,
    pub dropped: Vec<CatalogError>,
}

impl CatalogReport {
    /// Returns true if every raw entry survived resolution.
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

/// Resolves raw ability lists against the spell catalog.
pub struct AbilityCatalog;

impl AbilityCatalog {
    /// Resolves `list` in declared order.
    ///
    /// A creature without a list id yields an empty, clean report.
    pub fn resolve<L, S>(list: Option<AbilityListId>, lists: &L, spells: &S) -> CatalogReport
    where
        L: AbilityListOracle + ?Sized,
        S: SpellOracle + ?Sized,
    {
        let mut report = CatalogReport::default();

        let Some(list_id) = list else {
            return report;
        };

        let Some(raw_entries) = lists.ability_list(list_id) else {
            report.dropped.push(CatalogError::UnknownAbilityList(list_id));
            return report;
        };

        for raw in raw_entries {
            let Some(spell) = spells.spell(raw.spell) else {
                report.dropped.push(CatalogError::UnknownSpell {
                    list: list_id,
                    spell: raw.spell,
                });
                continue;
            };

            report.abilities.push(AbilityEntry::resolve(raw, spell));
        }

        report
    }
}
