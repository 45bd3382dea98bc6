//! Inventory and equipment storage for units.

use crate::config::GameConfig;
use crate::error::{ErrorSeverity, GameError};

use super::item::{EquipmentSlot, Item, ItemId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InventoryError {
    #[error("inventory is full")]
    Full,

    #[error("{0} is not held")]
    MissingItem(ItemId),

    #[error("{0} cannot be equipped")]
    NotEquippable(ItemId),
}

impl GameError for InventoryError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Full => ErrorSeverity::Recoverable,
            Self::MissingItem(_) | Self::NotEquippable(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Full => "INVENTORY_FULL",
            Self::MissingItem(_) => "INVENTORY_MISSING_ITEM",
            Self::NotEquippable(_) => "INVENTORY_NOT_EQUIPPABLE",
        }
    }
}

/// Items carried by a unit, in pickup order.
///
/// Regular additions respect [`GameConfig::MAX_INVENTORY_SLOTS`]; trade
/// rollback uses [`Inventory::restore`], which does not.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Inventory {
    items: Vec<Item>,
}

impl Inventory {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= GameConfig::MAX_INVENTORY_SLOTS
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    pub fn add(&mut self, item: Item) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full);
        }
        self.items.push(item);
        Ok(())
    }

    /// Puts an item back regardless of capacity.
    pub fn restore(&mut self, item: Item) {
        self.items.push(item);
    }

    pub fn remove(&mut self, id: ItemId) -> Result<Item, InventoryError> {
        let index = self
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(InventoryError::MissingItem(id))?;
        Ok(self.items.remove(index))
    }

    /// Empties the inventory, returning every item in order.
    pub fn drain(&mut self) -> Vec<Item> {
        std::mem::take(&mut self.items)
    }
}

/// Equipped items; one per [`EquipmentSlot`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Equipment {
    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Item>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<Item>,
}

impl Equipment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn slot(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Armor => self.armor.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.weapon.iter().chain(self.armor.iter())
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.iter().any(|item| item.id == id)
    }

    /// Equips `item`, returning whatever previously occupied its slot.
    pub fn equip(&mut self, item: Item) -> Result<Option<Item>, InventoryError> {
        let slot = item.slot().ok_or(InventoryError::NotEquippable(item.id))?;
        Ok(self.slot_mut(slot).replace(item))
    }

    pub fn unequip(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    /// Removes the equipped item with the given id from whichever slot holds it.
    pub fn remove(&mut self, id: ItemId) -> Result<Item, InventoryError> {
        let slot = self
            .iter()
            .find(|item| item.id == id)
            .and_then(Item::slot)
            .ok_or(InventoryError::MissingItem(id))?;
        self.unequip(slot).ok_or(InventoryError::MissingItem(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::item::ItemKind;

    fn potion(id: u32) -> Item {
        Item::new(ItemId(id), "Potion", ItemKind::Consumable { heal: 5 })
    }

    #[test]
    fn add_respects_capacity() {
        let mut inventory = Inventory::empty();
        for id in 0..GameConfig::MAX_INVENTORY_SLOTS as u32 {
            inventory.add(potion(id)).unwrap();
        }
        assert_eq!(inventory.add(potion(99)), Err(InventoryError::Full));

        inventory.restore(potion(99));
        assert_eq!(inventory.len(), GameConfig::MAX_INVENTORY_SLOTS + 1);
    }

    #[test]
    fn remove_missing_item_fails() {
        let mut inventory = Inventory::new(vec![potion(1)]);
        assert_eq!(
            inventory.remove(ItemId(2)),
            Err(InventoryError::MissingItem(ItemId(2)))
        );
        assert_eq!(inventory.remove(ItemId(1)).unwrap().id, ItemId(1));
        assert!(inventory.is_empty());
    }

    #[test]
    fn equip_swaps_previous_item() {
        let mut equipment = Equipment::empty();
        let mail = Item::new(ItemId(1), "Mail", ItemKind::Armor { defense: 2 });
        let plate = Item::new(ItemId(2), "Plate", ItemKind::Armor { defense: 4 });

        assert_eq!(equipment.equip(mail.clone()).unwrap(), None);
        assert_eq!(equipment.equip(plate).unwrap(), Some(mail));
        assert!(equipment.contains(ItemId(2)));
        assert_eq!(
            equipment.equip(potion(3)),
            Err(InventoryError::NotEquippable(ItemId(3)))
        );
    }
}
