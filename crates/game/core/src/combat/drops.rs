//! Item drops and the super-rare daily gate.

use serde::{Deserialize, Serialize};

use crate::config::DropRules;
use crate::env::{ItemDefinition, ItemOracle, OracleError, RandomSource};
use crate::reward::item_trap_difficulty;
use crate::state::SuperRareDailyState;

/// Where a drop came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropSource {
    Scripted { event_id: u32 },
    /// Packed enemy actor reference.
    Enemy { actor: u32 },
}

/// Dungeon position used to price trap difficulty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DropContext {
    pub recommended_level: u32,
    pub floor_number: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Drop {
    pub item_id: u32,
    pub super_rare: bool,
    pub trap_difficulty: u32,
    pub source: DropSource,
}

impl Drop {
    pub fn new(item: &ItemDefinition, source: DropSource, context: DropContext) -> Self {
        Self {
            item_id: item.id,
            super_rare: item.is_super_rare(),
            trap_difficulty: item_trap_difficulty(
                item.base_price,
                context.recommended_level,
                context.floor_number,
            ),
            source,
        }
    }
}

/// Rolls the drop list of one defeated enemy.
///
/// Common items roll `base_drop_percent`. Super-rare items roll
/// `super_rare_percent` only while `daily` is eligible, and every award is
/// recorded into it; an ineligible super-rare item consumes no draw.
///
/// # Errors
///
/// [`OracleError::ItemNotFound`] for an unknown item id.
pub fn roll_enemy_drops(
    actor: u32,
    drop_item_ids: &[u32],
    items: &(impl ItemOracle + ?Sized),
    rules: &DropRules,
    daily: &mut SuperRareDailyState,
    context: DropContext,
    rng: &mut impl RandomSource,
) -> Result<Vec<Drop>, OracleError> {
    let mut drops = Vec::new();
    for item_id in drop_item_ids {
        let item = items
            .definition(*item_id)
            .ok_or(OracleError::ItemNotFound(*item_id))?;
        let dropped = if item.is_super_rare() {
            daily.is_eligible(rules.super_rare_daily_limit)
                && rng.chance(rules.super_rare_percent / 100.0)
        } else {
            rng.chance(rules.base_drop_percent / 100.0)
        };
        if !dropped {
            continue;
        }
        if item.is_super_rare() {
            daily.record();
        }
        drops.push(Drop::new(&item, DropSource::Enemy { actor }, context));
    }
    Ok(drops)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::env::{ItemRarity, PcgRandom};

    struct Items(BTreeMap<u32, ItemDefinition>);

    impl ItemOracle for Items {
        fn definition(&self, id: u32) -> Option<ItemDefinition> {
            self.0.get(&id).cloned()
        }
    }

    fn items() -> Items {
        let mut map = BTreeMap::new();
        for (id, rarity, price) in [
            (1, ItemRarity::Common, 100),
            (2, ItemRarity::SuperRare, 5_000),
        ] {
            map.insert(
                id,
                ItemDefinition {
                    id,
                    name: format!("item-{id}"),
                    base_price: price,
                    rarity,
                },
            );
        }
        Items(map)
    }

    const CONTEXT: DropContext = DropContext {
        recommended_level: 4,
        floor_number: 2,
    };

    #[test]
    fn certain_common_drop_carries_trap_difficulty() {
        let rules = DropRules {
            base_drop_percent: 100.0,
            ..DropRules::default()
        };
        let mut daily = SuperRareDailyState::new(1);
        let mut rng = PcgRandom::new(1);
        let drops =
            roll_enemy_drops(1004, &[1], &items(), &rules, &mut daily, CONTEXT, &mut rng).unwrap();
        assert_eq!(drops.len(), 1);
        assert_eq!(drops[0].trap_difficulty, 36 + 20 + 4);
        assert_eq!(drops[0].source, DropSource::Enemy { actor: 1004 });
        assert_eq!(daily.awarded, 0);
    }

    #[test]
    fn super_rare_respects_daily_limit() {
        let rules = DropRules {
            super_rare_percent: 100.0,
            super_rare_daily_limit: 1,
            ..DropRules::default()
        };
        let mut daily = SuperRareDailyState::new(1);
        let mut rng = PcgRandom::new(1);
        let first =
            roll_enemy_drops(1004, &[2, 2], &items(), &rules, &mut daily, CONTEXT, &mut rng)
                .unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].super_rare);
        assert_eq!(daily.awarded, 1);

        let state_before = rng.state();
        let second =
            roll_enemy_drops(2004, &[2], &items(), &rules, &mut daily, CONTEXT, &mut rng).unwrap();
        assert!(second.is_empty());
        assert_eq!(rng.state(), state_before);
    }

    #[test]
    fn unknown_item_is_master_data_failure() {
        let mut daily = SuperRareDailyState::default();
        let mut rng = PcgRandom::new(1);
        let result = roll_enemy_drops(
            1004,
            &[9],
            &items(),
            &DropRules::default(),
            &mut daily,
            CONTEXT,
            &mut rng,
        );
        assert_eq!(result, Err(OracleError::ItemNotFound(9)));
    }
}
