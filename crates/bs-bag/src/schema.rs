//! Item database schema definitions.

use bs_core::{ItemSlot, ItemSpec};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDatabase {
    #[serde(default)]
    pub items: Vec<ItemDef>,
    #[serde(default)]
    pub enchants: Vec<EnchantDef>,
    #[serde(default)]
    pub gems: Vec<GemDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDef {
    pub id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hand_type: Option<HandType>,
    #[serde(default)]
    pub gem_sockets: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnchantDef {
    pub effect_id: i32,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GemDef {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ItemType {
    Head,
    Neck,
    Shoulder,
    Back,
    Chest,
    Wrist,
    Hands,
    Waist,
    Legs,
    Feet,
    Finger,
    Trinket,
    Weapon,
    Ranged,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HandType {
    #[default]
    OneHand,
    MainHand,
    OffHand,
    TwoHand,
}

impl ItemType {
    /// Item type that fits a given slot.
    pub fn for_slot(slot: ItemSlot) -> Self {
        match slot {
            ItemSlot::Head => ItemType::Head,
            ItemSlot::Neck => ItemType::Neck,
            ItemSlot::Shoulder => ItemType::Shoulder,
            ItemSlot::Back => ItemType::Back,
            ItemSlot::Chest => ItemType::Chest,
            ItemSlot::Wrist => ItemType::Wrist,
            ItemSlot::Hands => ItemType::Hands,
            ItemSlot::Waist => ItemType::Waist,
            ItemSlot::Legs => ItemType::Legs,
            ItemSlot::Feet => ItemType::Feet,
            ItemSlot::Finger1 | ItemSlot::Finger2 => ItemType::Finger,
            ItemSlot::Trinket1 | ItemSlot::Trinket2 => ItemType::Trinket,
            ItemSlot::MainHand | ItemSlot::OffHand => ItemType::Weapon,
            ItemSlot::Ranged => ItemType::Ranged,
        }
    }
}

impl ItemDef {
    /// Slots this item may be equipped in, preferred slot first.
    pub fn eligible_slots(&self) -> Vec<ItemSlot> {
        match self.item_type {
            ItemType::Head => vec![ItemSlot::Head],
            ItemType::Neck => vec![ItemSlot::Neck],
            ItemType::Shoulder => vec![ItemSlot::Shoulder],
            ItemType::Back => vec![ItemSlot::Back],
            ItemType::Chest => vec![ItemSlot::Chest],
            ItemType::Wrist => vec![ItemSlot::Wrist],
            ItemType::Hands => vec![ItemSlot::Hands],
            ItemType::Waist => vec![ItemSlot::Waist],
            ItemType::Legs => vec![ItemSlot::Legs],
            ItemType::Feet => vec![ItemSlot::Feet],
            ItemType::Finger => vec![ItemSlot::Finger1, ItemSlot::Finger2],
            ItemType::Trinket => vec![ItemSlot::Trinket1, ItemSlot::Trinket2],
            ItemType::Weapon => match self.hand_type.unwrap_or_default() {
                HandType::OneHand => vec![ItemSlot::MainHand, ItemSlot::OffHand],
                HandType::MainHand | HandType::TwoHand => vec![ItemSlot::MainHand],
                HandType::OffHand => vec![ItemSlot::OffHand],
            },
            ItemType::Ranged => vec![ItemSlot::Ranged],
        }
    }
}

/// An item spec resolved against the database.
#[derive(Debug, Clone, PartialEq)]
pub struct EquippedItem<'a> {
    pub item: &'a ItemDef,
    pub enchant: Option<&'a EnchantDef>,
    /// One entry per gem id in the `ItemSpec`; `None` for empty or unknown sockets.
    pub gems: Vec<Option<&'a GemDef>>,
}

impl EquippedItem<'_> {
    pub fn as_spec(&self) -> ItemSpec {
        ItemSpec {
            id: self.item.id,
            enchant: self.enchant.map(|e| e.effect_id).unwrap_or(0),
            gems: self
                .gems
                .iter()
                .map(|g| g.map(|g| g.id).unwrap_or(0))
                .collect(),
        }
    }
}

impl ItemDatabase {
    pub fn item(&self, id: i32) -> Option<&ItemDef> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn enchant(&self, effect_id: i32) -> Option<&EnchantDef> {
        self.enchants.iter().find(|e| e.effect_id == effect_id)
    }

    pub fn gem(&self, id: i32) -> Option<&GemDef> {
        self.gems.iter().find(|g| g.id == id)
    }

    /// Resolve a spec. Returns `None` when the item itself is unknown; unknown
    /// enchants and gems resolve to empty.
    pub fn lookup_item_spec(&self, spec: &ItemSpec) -> Option<EquippedItem<'_>> {
        let item = self.item(spec.id)?;
        let enchant = if spec.enchant != 0 {
            self.enchant(spec.enchant)
        } else {
            None
        };
        let gems = spec
            .gems
            .iter()
            .map(|&g| if g != 0 { self.gem(g) } else { None })
            .collect();
        Some(EquippedItem {
            item,
            enchant,
            gems,
        })
    }

    /// Enchants that apply to items in `slot`.
    pub fn enchants_for_slot(&self, slot: ItemSlot) -> Vec<&EnchantDef> {
        let item_type = ItemType::for_slot(slot);
        self.enchants
            .iter()
            .filter(|e| e.item_type == item_type)
            .collect()
    }

    pub fn has_item(&self, id: i32) -> bool {
        self.item(id).is_some()
    }
}
