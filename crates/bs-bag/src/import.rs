//! Bag import from an in-game equipment export.

use bs_core::{EquipmentSpec, ItemSpec};

use crate::schema::ItemDatabase;
use crate::{BagError, BagResult};

/// Parse an exported bag. Unknown fields are ignored.
pub fn parse_equipment_json(data: &str) -> BagResult<EquipmentSpec> {
    let equipment: EquipmentSpec = serde_json::from_str(data)?;
    Ok(equipment)
}

/// Parse and check an exported bag against the item database.
///
/// Entries with a non-positive id are empty slots in the export and are
/// dropped. Every remaining entry must resolve, otherwise the whole import
/// fails and nothing is returned.
pub fn import_bag_items(data: &str, db: &ItemDatabase) -> BagResult<Vec<ItemSpec>> {
    let equipment = parse_equipment_json(data)?;
    let items: Vec<ItemSpec> = equipment.items.into_iter().filter(|s| s.id > 0).collect();

    for spec in &items {
        if db.lookup_item_spec(spec).is_none() {
            return Err(BagError::UnknownItem { id: spec.id });
        }
    }

    tracing::debug!(count = items.len(), "imported bag items");
    Ok(items)
}
