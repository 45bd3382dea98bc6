//! Items carried in inventories or equipped by units.

use std::fmt;

use super::unit::Reach;

/// Unique identifier of an item instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item#{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub description: String,
}

impl Item {
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Equipment slot this item goes into, if it can be equipped at all.
    pub fn slot(&self) -> Option<EquipmentSlot> {
        match self.kind {
            ItemKind::Weapon { .. } => Some(EquipmentSlot::Weapon),
            ItemKind::Armor { .. } => Some(EquipmentSlot::Armor),
            _ => None,
        }
    }

    pub fn is_consumable(&self) -> bool {
        matches!(self.kind, ItemKind::Consumable { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum ItemKind {
    /// Potion-like item, removed on use.
    Consumable { heal: u32 },
    /// Weapon; when equipped its reach replaces the wearer's natural reach.
    Weapon { attack: u32, reach: Reach },
    Armor { defense: u32 },
    /// Opens locked doors; consumed by the door.
    Key,
    Trinket,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}
