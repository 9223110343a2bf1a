//! Bulk settings and the item database subset sent with them.

use bs_core::ItemSpec;
use serde::{Deserialize, Serialize};

use crate::schema::ItemDatabase;
use crate::{BagError, BagResult};

/// Everything the simulation engine needs to know about a bulk run besides
/// the item data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkSettings {
    pub items: Vec<ItemSpec>,
    /// Simulate every combination of the bag items, not only one item at a time.
    pub combinations: bool,
    /// Narrow the candidate pool over several refining rounds.
    pub fast_mode: bool,
    #[serde(default)]
    pub auto_enchant: bool,
    #[serde(default)]
    pub auto_gem: bool,
    pub iterations_per_combo: u32,
}

impl BulkSettings {
    pub fn new(
        items: Vec<ItemSpec>,
        combinations: bool,
        fast_mode: bool,
        iterations_per_combo: u32,
    ) -> Self {
        Self {
            items,
            combinations,
            fast_mode,
            auto_enchant: false,
            auto_gem: false,
            iterations_per_combo,
        }
    }
}

/// Collect the items, enchants and gems referenced by `items` out of `db`.
///
/// Each definition appears at most once in the result.
pub fn build_bulk_items_database(items: &[ItemSpec], db: &ItemDatabase) -> BagResult<ItemDatabase> {
    let mut subset = ItemDatabase::default();

    for spec in items {
        let equipped = db
            .lookup_item_spec(spec)
            .ok_or(BagError::NotInDatabase { id: spec.id })?;

        if !subset.items.iter().any(|i| i.id == equipped.item.id) {
            subset.items.push(equipped.item.clone());
        }
        if let Some(enchant) = equipped.enchant
            && !subset.enchants.iter().any(|e| e.effect_id == enchant.effect_id)
        {
            subset.enchants.push(enchant.clone());
        }
        for gem in equipped.gems.into_iter().flatten() {
            if !subset.gems.iter().any(|g| g.id == gem.id) {
                subset.gems.push(gem.clone());
            }
        }
    }

    Ok(subset)
}
