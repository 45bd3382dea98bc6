//! Bookkeeping for trades made while a unit's move can still be cancelled.
//!
//! Every item or gold transfer is recorded as it happens, tagged with the
//! unit whose move opened the trade. Cancelling that unit's move replays its
//! records backwards ([`TradeLedger::rollback`]); ending its turn forgets them
//! ([`TradeLedger::commit`]). Other units' records are left alone.

use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, InventoryError, Item, ItemId, Roster, Unit};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    #[error("gold transfers must be non-negative, got {0}")]
    NegativeGold(i64),

    #[error("{donor} holds {available} gold, cannot give {requested}")]
    InsufficientGold {
        donor: EntityId,
        available: i64,
        requested: i64,
    },

    #[error("unit {0} not found")]
    UnknownUnit(EntityId),

    #[error("a unit cannot trade with itself")]
    SelfTrade,

    #[error(transparent)]
    Inventory(#[from] InventoryError),
}

impl GameError for TradeError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            TradeError::UnknownUnit(_) => ErrorSeverity::Internal,
            TradeError::Inventory(inner) => inner.severity(),
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            TradeError::NegativeGold(_) => "TRADE_NEGATIVE_GOLD",
            TradeError::InsufficientGold { .. } => "TRADE_INSUFFICIENT_GOLD",
            TradeError::UnknownUnit(_) => "TRADE_UNKNOWN_UNIT",
            TradeError::SelfTrade => "TRADE_SELF",
            TradeError::Inventory(inner) => inner.error_code(),
        }
    }
}

/// Item handed from `donor` to `recipient` during `actor`'s move.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTransfer {
    pub actor: EntityId,
    pub item: Item,
    pub donor: EntityId,
    pub recipient: EntityId,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GoldTransfer {
    pub actor: EntityId,
    pub amount: i64,
    pub donor: EntityId,
    pub recipient: EntityId,
}

#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeLedger {
    item_transfers: Vec<ItemTransfer>,
    gold_transfers: Vec<GoldTransfer>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.item_transfers.is_empty() && self.gold_transfers.is_empty()
    }

    /// Whether `actor`'s move still has trades that a cancel would undo.
    pub fn has_pending(&self, actor: EntityId) -> bool {
        self.item_transfers.iter().any(|t| t.actor == actor)
            || self.gold_transfers.iter().any(|t| t.actor == actor)
    }

    pub fn item_transfers(&self) -> &[ItemTransfer] {
        &self.item_transfers
    }

    pub fn gold_transfers(&self) -> &[GoldTransfer] {
        &self.gold_transfers
    }

    /// Records a transfer that already happened. No validation.
    pub fn record_item_transfer(
        &mut self,
        actor: EntityId,
        item: Item,
        donor: EntityId,
        recipient: EntityId,
    ) {
        self.item_transfers.push(ItemTransfer {
            actor,
            item,
            donor,
            recipient,
        });
    }

    pub fn record_gold_transfer(
        &mut self,
        actor: EntityId,
        amount: i64,
        donor: EntityId,
        recipient: EntityId,
    ) -> Result<(), TradeError> {
        if amount < 0 {
            return Err(TradeError::NegativeGold(amount));
        }
        self.gold_transfers.push(GoldTransfer {
            actor,
            amount,
            donor,
            recipient,
        });
        Ok(())
    }

    /// Moves `item` from `donor`'s bag to `recipient`'s and records it under
    /// `actor`.
    ///
    /// Leaves both bags untouched on failure.
    pub fn give_item(
        &mut self,
        roster: &mut Roster,
        actor: EntityId,
        item: ItemId,
        donor: EntityId,
        recipient: EntityId,
    ) -> Result<(), TradeError> {
        let (giver, taker) = pair(roster, donor, recipient)?;
        if taker.inventory.is_full() {
            return Err(InventoryError::Full.into());
        }
        let handed = giver.inventory.remove(item)?;
        taker.inventory.add(handed.clone())?;
        self.record_item_transfer(actor, handed, donor, recipient);
        Ok(())
    }

    /// Moves `amount` gold from `donor` to `recipient` and records it under
    /// `actor`.
    pub fn give_gold(
        &mut self,
        roster: &mut Roster,
        actor: EntityId,
        amount: i64,
        donor: EntityId,
        recipient: EntityId,
    ) -> Result<(), TradeError> {
        if amount < 0 {
            return Err(TradeError::NegativeGold(amount));
        }
        let (giver, taker) = pair(roster, donor, recipient)?;
        if giver.gold < amount {
            return Err(TradeError::InsufficientGold {
                donor,
                available: giver.gold,
                requested: amount,
            });
        }
        giver.gold -= amount;
        taker.gold += amount;
        self.record_gold_transfer(actor, amount, donor, recipient)
    }

    /// Reverses every transfer recorded under `actor`, newest first, and
    /// drops those records.
    ///
    /// Newest first rather than in recording order, so an item passed back
    /// and forth is always held by the side it is taken from.
    ///
    /// Items go back to their donor even if the donor's bag has filled up in
    /// the meantime; an item the recipient equipped is taken off first. An
    /// item the recipient no longer holds at all is still returned, and
    /// reported as [`InventoryError::MissingItem`]. Units that left the board
    /// are skipped.
    pub fn rollback(&mut self, roster: &mut Roster, actor: EntityId) -> Vec<InventoryError> {
        let mut missing = Vec::new();
        let (undone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.item_transfers)
            .into_iter()
            .partition(|transfer| transfer.actor == actor);
        self.item_transfers = kept;
        for transfer in undone.into_iter().rev() {
            if let Some(recipient) = roster.get_mut(transfer.recipient) {
                let taken = recipient
                    .inventory
                    .remove(transfer.item.id)
                    .or_else(|_| recipient.equipment.remove(transfer.item.id));
                if let Err(error) = taken {
                    missing.push(error);
                }
            }
            if let Some(donor) = roster.get_mut(transfer.donor) {
                donor.inventory.restore(transfer.item);
            }
        }

        let (undone, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.gold_transfers)
            .into_iter()
            .partition(|transfer| transfer.actor == actor);
        self.gold_transfers = kept;
        for transfer in undone.into_iter().rev() {
            if let Some(recipient) = roster.get_mut(transfer.recipient) {
                recipient.gold -= transfer.amount;
            }
            if let Some(donor) = roster.get_mut(transfer.donor) {
                donor.gold += transfer.amount;
            }
        }
        missing
    }

    /// Makes every transfer recorded under `actor` permanent.
    pub fn commit(&mut self, actor: EntityId) {
        self.item_transfers.retain(|transfer| transfer.actor != actor);
        self.gold_transfers.retain(|transfer| transfer.actor != actor);
    }

    /// Makes every recorded transfer permanent, whoever made it.
    pub fn commit_all(&mut self) {
        self.item_transfers.clear();
        self.gold_transfers.clear();
    }
}

fn pair(
    roster: &mut Roster,
    donor: EntityId,
    recipient: EntityId,
) -> Result<(&mut Unit, &mut Unit), TradeError> {
    if donor == recipient {
        return Err(TradeError::SelfTrade);
    }
    if let Some(missing) = [donor, recipient].into_iter().find(|id| !roster.contains(*id)) {
        return Err(TradeError::UnknownUnit(missing));
    }
    roster
        .pair_mut(donor, recipient)
        .ok_or(TradeError::UnknownUnit(donor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Inventory, ItemKind, Position};

    const HERO: EntityId = EntityId(1);
    const FRIEND: EntityId = EntityId(2);
    const SCOUT: EntityId = EntityId(3);

    fn potion(id: u32) -> Item {
        Item::new(ItemId(id), "Potion", ItemKind::Consumable { heal: 4 })
    }

    fn roster() -> Roster {
        Roster::new(vec![
            Unit::character(HERO, "Raimund", Position::new(0, 0))
                .with_gold(100)
                .with_inventory(Inventory::new(vec![potion(1), potion(2)])),
            Unit::character(FRIEND, "Braern", Position::new(1, 0)).with_gold(20),
            Unit::character(SCOUT, "Iselde", Position::new(2, 0))
                .with_inventory(Inventory::new(vec![potion(3)])),
        ])
        .unwrap()
    }

    #[test]
    fn negative_gold_is_rejected() {
        let mut ledger = TradeLedger::new();
        assert_eq!(
            ledger.record_gold_transfer(HERO, -5, HERO, FRIEND),
            Err(TradeError::NegativeGold(-5))
        );
        assert!(ledger.is_empty());
    }

    #[test]
    fn rollback_restores_both_parties_exactly() {
        let mut roster = roster();
        let before = roster.clone();
        let mut ledger = TradeLedger::new();

        ledger.give_item(&mut roster, HERO, ItemId(1), HERO, FRIEND).unwrap();
        ledger.give_gold(&mut roster, HERO, 30, HERO, FRIEND).unwrap();
        ledger.give_gold(&mut roster, HERO, 10, FRIEND, HERO).unwrap();
        assert_eq!(roster.get(HERO).unwrap().gold, 80);
        assert_eq!(roster.get(FRIEND).unwrap().gold, 40);
        assert!(roster.get(FRIEND).unwrap().inventory.contains(ItemId(1)));

        assert!(ledger.rollback(&mut roster, HERO).is_empty());
        assert!(ledger.is_empty());
        let hero = roster.get(HERO).unwrap();
        assert_eq!(hero.gold, 100);
        assert!(hero.inventory.contains(ItemId(1)));
        let friend = roster.get(FRIEND).unwrap();
        assert_eq!(friend.gold, before.get(FRIEND).unwrap().gold);
        assert!(friend.inventory.is_empty());
    }

    #[test]
    fn rollback_of_recorded_gold_may_go_negative() {
        let mut roster = roster();
        let mut ledger = TradeLedger::new();
        ledger.record_gold_transfer(HERO, 50, HERO, FRIEND).unwrap();
        ledger.rollback(&mut roster, HERO);
        assert_eq!(roster.get(FRIEND).unwrap().gold, -30);
        assert_eq!(roster.get(HERO).unwrap().gold, 150);
    }

    #[test]
    fn commit_makes_trades_permanent() {
        let mut roster = roster();
        let mut ledger = TradeLedger::new();
        ledger.give_item(&mut roster, HERO, ItemId(2), HERO, FRIEND).unwrap();
        ledger.commit(HERO);
        ledger.rollback(&mut roster, HERO);
        assert!(roster.get(FRIEND).unwrap().inventory.contains(ItemId(2)));
    }

    #[test]
    fn rollback_only_undoes_the_given_actor() {
        let mut roster = roster();
        let mut ledger = TradeLedger::new();
        ledger.give_item(&mut roster, HERO, ItemId(1), HERO, FRIEND).unwrap();
        ledger.give_gold(&mut roster, HERO, 5, HERO, FRIEND).unwrap();
        ledger.give_item(&mut roster, SCOUT, ItemId(3), SCOUT, FRIEND).unwrap();

        ledger.rollback(&mut roster, SCOUT);

        let friend = roster.get(FRIEND).unwrap();
        assert!(friend.inventory.contains(ItemId(1)));
        assert!(!friend.inventory.contains(ItemId(3)));
        assert_eq!(friend.gold, 25);
        assert!(roster.get(SCOUT).unwrap().inventory.contains(ItemId(3)));
        assert!(ledger.has_pending(HERO));
        assert!(!ledger.has_pending(SCOUT));
    }

    #[test]
    fn commit_leaves_other_actors_pending() {
        let mut roster = roster();
        let mut ledger = TradeLedger::new();
        ledger.give_item(&mut roster, HERO, ItemId(1), HERO, FRIEND).unwrap();
        ledger.give_item(&mut roster, SCOUT, ItemId(3), SCOUT, FRIEND).unwrap();

        ledger.commit(HERO);
        assert!(!ledger.has_pending(HERO));
        assert!(ledger.has_pending(SCOUT));

        ledger.commit_all();
        assert!(ledger.is_empty());
    }

    #[test]
    fn failed_transfers_change_nothing() {
        let mut roster = roster();
        let mut ledger = TradeLedger::new();

        let err = ledger.give_gold(&mut roster, HERO, 500, FRIEND, HERO).unwrap_err();
        assert!(matches!(err, TradeError::InsufficientGold { .. }));
        assert_eq!(
            ledger.give_item(&mut roster, HERO, ItemId(9), HERO, FRIEND),
            Err(TradeError::Inventory(InventoryError::MissingItem(ItemId(9))))
        );
        assert_eq!(
            ledger.give_item(&mut roster, HERO, ItemId(1), HERO, EntityId(42)),
            Err(TradeError::UnknownUnit(EntityId(42)))
        );
        assert!(ledger.is_empty());
        assert_eq!(roster, self::roster());
    }

    #[test]
    fn rollback_takes_back_equipped_items() {
        let sword = Item::new(
            ItemId(5),
            "Sword",
            ItemKind::Weapon {
                attack: 2,
                reach: [1].into_iter().collect(),
            },
        );
        let mut roster = roster();
        roster.get_mut(HERO).unwrap().inventory.add(sword).unwrap();
        let mut ledger = TradeLedger::new();
        ledger.give_item(&mut roster, HERO, ItemId(5), HERO, FRIEND).unwrap();

        let friend = roster.get_mut(FRIEND).unwrap();
        let sword = friend.inventory.remove(ItemId(5)).unwrap();
        friend.equipment.equip(sword).unwrap();

        assert!(ledger.rollback(&mut roster, HERO).is_empty());
        assert!(!roster.get(FRIEND).unwrap().equipment.contains(ItemId(5)));
        assert!(roster.get(HERO).unwrap().inventory.contains(ItemId(5)));
    }

    #[test]
    fn rollback_reports_items_the_recipient_no_longer_holds() {
        let mut roster = roster();
        let mut ledger = TradeLedger::new();
        ledger.give_item(&mut roster, HERO, ItemId(1), HERO, FRIEND).unwrap();
        roster
            .get_mut(FRIEND)
            .unwrap()
            .inventory
            .remove(ItemId(1))
            .unwrap();

        let missing = ledger.rollback(&mut roster, HERO);

        assert_eq!(missing, vec![InventoryError::MissingItem(ItemId(1))]);
        assert!(roster.get(HERO).unwrap().inventory.contains(ItemId(1)));
    }
}
