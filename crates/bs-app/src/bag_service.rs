//! The bag of items a bulk run is built from.
//!
//! [`BulkBag`] owns the imported item list and the two run toggles, and
//! notifies listeners after every change so views can redraw.

use std::path::Path;

use bs_bag::{BulkSettings, EnchantDef, ItemDatabase};
use bs_core::{EventId, ItemSpec, ListenerId, TypedEvent};

use crate::error::{AppError, AppResult};

pub const BAG_INTRO_TEXT: &str =
    "The following items will be simmed in all possible combinations together with your equipped gear.";

#[derive(Debug)]
pub struct BulkBag {
    items: Vec<ItemSpec>,
    combinations: bool,
    fast_mode: bool,
    items_changed: TypedEvent<()>,
}

impl Default for BulkBag {
    fn default() -> Self {
        Self::new()
    }
}

impl BulkBag {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            combinations: true,
            fast_mode: false,
            items_changed: TypedEvent::new(),
        }
    }

    pub fn on_items_changed(
        &mut self,
        listener: impl FnMut(EventId, &()) + Send + 'static,
    ) -> ListenerId {
        self.items_changed.on(listener)
    }

    pub fn off_items_changed(&mut self, id: ListenerId) -> bool {
        self.items_changed.off(id)
    }

    fn changed(&mut self) {
        self.items_changed.emit(EventId::next(), &());
    }

    /// Replace the whole item list.
    pub fn import_items(&mut self, items: Vec<ItemSpec>) {
        self.items = items;
        self.changed();
    }

    /// Import a bag export. On failure the current items are kept.
    pub fn import_from_json(&mut self, data: &str, db: &ItemDatabase) -> AppResult<usize> {
        let items = bs_bag::import_bag_items(data, db)?;
        let count = items.len();
        tracing::info!(count, "bag imported");
        self.import_items(items);
        Ok(count)
    }

    pub fn import_from_file(&mut self, path: &Path, db: &ItemDatabase) -> AppResult<usize> {
        let data = std::fs::read_to_string(path).map_err(|e| AppError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.import_from_json(&data, db)
    }

    /// A copy of the current items.
    pub fn items(&self) -> Vec<ItemSpec> {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Text shown above the item list, only when there are items.
    pub fn intro_text(&self) -> Option<&'static str> {
        (!self.items.is_empty()).then_some(BAG_INTRO_TEXT)
    }

    pub fn combinations(&self) -> bool {
        self.combinations
    }

    pub fn set_combinations(&mut self, combinations: bool) {
        self.combinations = combinations;
        self.changed();
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn set_fast_mode(&mut self, fast_mode: bool) {
        self.fast_mode = fast_mode;
        self.changed();
    }

    /// Swap the item at `index`, e.g. after picking a different enchant.
    pub fn replace_item(&mut self, index: usize, spec: ItemSpec) -> AppResult<()> {
        let len = self.items.len();
        let slot = self
            .items
            .get_mut(index)
            .ok_or(AppError::IndexOutOfRange { index, len })?;
        *slot = spec;
        self.changed();
        Ok(())
    }

    /// Remove every item equal to `spec`. Returns how many were removed.
    pub fn destroy_item(&mut self, spec: &ItemSpec) -> usize {
        let before = self.items.len();
        self.items.retain(|s| s != spec);
        let removed = before - self.items.len();
        self.changed();
        removed
    }

    pub fn clear(&mut self) {
        self.import_items(Vec::new());
    }

    pub fn create_bulk_settings(&self, iterations_per_combo: u32) -> BulkSettings {
        BulkSettings::new(
            self.items.clone(),
            self.combinations,
            self.fast_mode,
            iterations_per_combo,
        )
    }

    pub fn create_bulk_items_database(&self, db: &ItemDatabase) -> AppResult<ItemDatabase> {
        Ok(bs_bag::build_bulk_items_database(&self.items, db)?)
    }

    /// Enchants offered for the item at `index`, based on its preferred slot.
    pub fn enchants_for_item<'a>(
        &self,
        index: usize,
        db: &'a ItemDatabase,
    ) -> AppResult<Vec<&'a EnchantDef>> {
        let spec = self.items.get(index).ok_or(AppError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })?;
        let item = db
            .item(spec.id)
            .ok_or_else(|| AppError::Bag(format!("cannot find item with ID {}", spec.id)))?;
        Ok(item
            .eligible_slots()
            .first()
            .map(|slot| db.enchants_for_slot(*slot))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bs_bag::{ItemDef, ItemType};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn db() -> ItemDatabase {
        ItemDatabase {
            items: vec![
                ItemDef {
                    id: 40395,
                    name: "Torch of Holy Fire".to_string(),
                    item_type: ItemType::Weapon,
                    hand_type: None,
                    gem_sockets: 1,
                },
                ItemDef {
                    id: 40062,
                    name: "Digested Silk Robes".to_string(),
                    item_type: ItemType::Chest,
                    hand_type: None,
                    gem_sockets: 0,
                },
            ],
            enchants: vec![EnchantDef {
                effect_id: 3834,
                name: "Mighty Spellpower".to_string(),
                item_type: ItemType::Weapon,
            }],
            gems: vec![],
        }
    }

    fn counted_bag() -> (BulkBag, Arc<AtomicUsize>) {
        let mut bag = BulkBag::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        bag.on_items_changed(move |_, _| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        (bag, count)
    }

    #[test]
    fn defaults() {
        let bag = BulkBag::new();
        assert!(bag.combinations());
        assert!(!bag.fast_mode());
        assert!(bag.intro_text().is_none());
    }

    #[test]
    fn every_mutation_notifies() {
        let (mut bag, count) = counted_bag();
        bag.import_items(vec![ItemSpec::new(40395), ItemSpec::new(40062)]);
        bag.set_combinations(false);
        bag.set_fast_mode(true);
        bag.replace_item(0, ItemSpec::new(40395).with_enchant(3834)).unwrap();
        bag.destroy_item(&ItemSpec::new(40062));
        bag.clear();
        assert_eq!(count.load(Ordering::SeqCst), 6);
    }

    #[test]
    fn destroy_removes_all_equal_items() {
        let mut bag = BulkBag::new();
        bag.import_items(vec![
            ItemSpec::new(40395),
            ItemSpec::new(40062),
            ItemSpec::new(40395),
            ItemSpec::new(40395).with_enchant(3834),
        ]);
        assert_eq!(bag.destroy_item(&ItemSpec::new(40395)), 2);
        assert_eq!(
            bag.items(),
            vec![ItemSpec::new(40062), ItemSpec::new(40395).with_enchant(3834)]
        );
    }

    #[test]
    fn replace_out_of_range_keeps_items() {
        let (mut bag, count) = counted_bag();
        bag.import_items(vec![ItemSpec::new(40395)]);
        let err = bag.replace_item(3, ItemSpec::new(40062)).unwrap_err();
        assert!(matches!(err, AppError::IndexOutOfRange { index: 3, len: 1 }));
        assert_eq!(bag.items(), vec![ItemSpec::new(40395)]);
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn failed_import_keeps_current_items() {
        let mut bag = BulkBag::new();
        bag.import_items(vec![ItemSpec::new(40062)]);
        assert!(bag.import_from_json(r#"{"items":[{"id":1}]}"#, &db()).is_err());
        assert_eq!(bag.items(), vec![ItemSpec::new(40062)]);

        let count = bag
            .import_from_json(r#"{"items":[{"id":40395},{"id":0}]}"#, &db())
            .unwrap();
        assert_eq!(count, 1);
        assert_eq!(bag.intro_text(), Some(BAG_INTRO_TEXT));
    }

    #[test]
    fn settings_follow_toggles() {
        let mut bag = BulkBag::new();
        bag.import_items(vec![ItemSpec::new(40395)]);
        bag.set_fast_mode(true);
        let settings = bag.create_bulk_settings(500);
        assert!(settings.fast_mode);
        assert!(settings.combinations);
        assert_eq!(settings.iterations_per_combo, 500);
        assert_eq!(settings.items, bag.items());
    }

    #[test]
    fn enchants_follow_first_slot() {
        let mut bag = BulkBag::new();
        bag.import_items(vec![ItemSpec::new(40395), ItemSpec::new(40062)]);
        let db = db();
        let weapon = bag.enchants_for_item(0, &db).unwrap();
        assert_eq!(weapon.len(), 1);
        assert!(bag.enchants_for_item(1, &db).unwrap().is_empty());
        assert!(bag.enchants_for_item(2, &db).is_err());
    }
}
