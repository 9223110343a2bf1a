//! Item specs and equipment slots shared by import, settings and results.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::BsError;

/// A concrete item as exported from the game: item, enchant and socketed gems.
///
/// Zero means "none" for both the enchant and each gem socket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemSpec {
    #[serde(default)]
    pub id: i32,
    #[serde(default)]
    pub enchant: i32,
    #[serde(default)]
    pub gems: Vec<i32>,
}

impl ItemSpec {
    pub fn new(id: i32) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub fn with_enchant(mut self, enchant: i32) -> Self {
        self.enchant = enchant;
        self
    }

    pub fn with_gems(mut self, gems: Vec<i32>) -> Self {
        self.gems = gems;
        self
    }
}

/// A list of item specs, the shape of a bag export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSpec {
    #[serde(default)]
    pub items: Vec<ItemSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemSlot {
    #[serde(rename = "ItemSlotHead")]
    Head,
    #[serde(rename = "ItemSlotNeck")]
    Neck,
    #[serde(rename = "ItemSlotShoulder")]
    Shoulder,
    #[serde(rename = "ItemSlotBack")]
    Back,
    #[serde(rename = "ItemSlotChest")]
    Chest,
    #[serde(rename = "ItemSlotWrist")]
    Wrist,
    #[serde(rename = "ItemSlotHands")]
    Hands,
    #[serde(rename = "ItemSlotWaist")]
    Waist,
    #[serde(rename = "ItemSlotLegs")]
    Legs,
    #[serde(rename = "ItemSlotFeet")]
    Feet,
    #[serde(rename = "ItemSlotFinger1")]
    Finger1,
    #[serde(rename = "ItemSlotFinger2")]
    Finger2,
    #[serde(rename = "ItemSlotTrinket1")]
    Trinket1,
    #[serde(rename = "ItemSlotTrinket2")]
    Trinket2,
    #[serde(rename = "ItemSlotMainHand")]
    MainHand,
    #[serde(rename = "ItemSlotOffHand")]
    OffHand,
    #[serde(rename = "ItemSlotRanged")]
    Ranged,
}

impl ItemSlot {
    pub const ALL: [ItemSlot; 17] = [
        ItemSlot::Head,
        ItemSlot::Neck,
        ItemSlot::Shoulder,
        ItemSlot::Back,
        ItemSlot::Chest,
        ItemSlot::Wrist,
        ItemSlot::Hands,
        ItemSlot::Waist,
        ItemSlot::Legs,
        ItemSlot::Feet,
        ItemSlot::Finger1,
        ItemSlot::Finger2,
        ItemSlot::Trinket1,
        ItemSlot::Trinket2,
        ItemSlot::MainHand,
        ItemSlot::OffHand,
        ItemSlot::Ranged,
    ];

    /// Wire name, e.g. `ItemSlotMainHand`.
    pub fn wire_name(self) -> &'static str {
        match self {
            ItemSlot::Head => "ItemSlotHead",
            ItemSlot::Neck => "ItemSlotNeck",
            ItemSlot::Shoulder => "ItemSlotShoulder",
            ItemSlot::Back => "ItemSlotBack",
            ItemSlot::Chest => "ItemSlotChest",
            ItemSlot::Wrist => "ItemSlotWrist",
            ItemSlot::Hands => "ItemSlotHands",
            ItemSlot::Waist => "ItemSlotWaist",
            ItemSlot::Legs => "ItemSlotLegs",
            ItemSlot::Feet => "ItemSlotFeet",
            ItemSlot::Finger1 => "ItemSlotFinger1",
            ItemSlot::Finger2 => "ItemSlotFinger2",
            ItemSlot::Trinket1 => "ItemSlotTrinket1",
            ItemSlot::Trinket2 => "ItemSlotTrinket2",
            ItemSlot::MainHand => "ItemSlotMainHand",
            ItemSlot::OffHand => "ItemSlotOffHand",
            ItemSlot::Ranged => "ItemSlotRanged",
        }
    }

    /// Name shown next to a result item, the wire name without its `ItemSlot` prefix.
    pub fn display_name(self) -> &'static str {
        let wire = self.wire_name();
        wire.strip_prefix("ItemSlot").unwrap_or(wire)
    }
}

impl fmt::Display for ItemSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ItemSlot {
    type Err = BsError;

    /// Accepts either the wire name or the display name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemSlot::ALL
            .into_iter()
            .find(|slot| slot.wire_name() == s || slot.display_name() == s)
            .ok_or_else(|| BsError::UnknownSlot {
                name: s.to_string(),
            })
    }
}

/// An item placed into a specific slot by the simulation engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpecWithSlot {
    pub item: ItemSpec,
    pub slot: ItemSlot,
}
