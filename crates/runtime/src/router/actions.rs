//! Menu action dispatch and the follow-up of resolved duels and
//! interactions.

use game_core::{
    DuelReport, EntityId, GameError, InteractionOutcome, InteractionReport, InventoryError,
    ItemKind,
};

use super::{InputSignal, InteractionRouter, PickedItem};
use crate::menu::{
    CharacterMenuAction, ItemMenuAction, MainMenuAction, MenuAction, MenuId, StatusMenuAction,
    TradeMenuAction, builders,
};

impl InteractionRouter {
    /// Chooses an entry of the active menu without a pointer, e.g. from a
    /// keyboard or a script. Actions the active menu does not offer are
    /// ignored.
    pub fn on_menu_action(&mut self, action: MenuAction) -> InputSignal {
        if self.turn.animation_in_flight() {
            return InputSignal::Continue;
        }
        let offered = self
            .menus
            .active_menu()
            .is_some_and(|menu| menu.has_action(action));
        if !offered {
            tracing::debug!(?action, "action not offered by the active menu");
            return InputSignal::Continue;
        }
        let signal = self.dispatch_menu_action(action);
        self.advance_phase();
        signal
    }

    pub(super) fn dispatch_menu_action(&mut self, action: MenuAction) -> InputSignal {
        tracing::debug!(?action, "menu action");
        match action {
            MenuAction::Close => {
                self.close_active_menu();
            }
            MenuAction::Main(action) => return self.main_action(action),
            MenuAction::Character(action) => self.character_action(action),
            MenuAction::Status(action) => self.status_action(action),
            MenuAction::PickItem {
                owner,
                item,
                equipped,
            } => self.pick_item(PickedItem {
                owner,
                item,
                equipped,
            }),
            MenuAction::Item(action) => self.item_action(action),
            MenuAction::Trade(action) => self.trade_action(action),
        }
        InputSignal::Continue
    }

    /// Closes the top menu and forgets the context it carried.
    pub(super) fn close_active_menu(&mut self) -> Option<MenuId> {
        let closed = self.menus.close_active();
        match closed {
            Some(MenuId::Item) => self.picked_item = None,
            Some(MenuId::Trade) => self.trade = None,
            _ => {}
        }
        closed
    }

    pub(super) fn clear_menus(&mut self) {
        self.menus.clear();
        self.picked_item = None;
        self.trade = None;
    }

    fn main_action(&mut self, action: MainMenuAction) -> InputSignal {
        match action {
            MainMenuAction::Save => {
                let menu = builders::save_menu(
                    self.turn.round(),
                    self.world.roster.len(),
                    self.diary.len(),
                );
                self.menus.open(menu);
            }
            MainMenuAction::Suspend => {
                tracing::info!("suspending the level");
                self.clear_menus();
                return InputSignal::Quit;
            }
            MainMenuAction::Start => {
                self.start_battle();
            }
            MainMenuAction::Diary => self.menus.open(builders::diary_menu(&self.diary)),
            MainMenuAction::EndTurn => {
                self.clear_menus();
                self.end_player_turn();
            }
        }
        InputSignal::Continue
    }

    fn character_action(&mut self, action: CharacterMenuAction) {
        let Some(id) = self.selection.selected() else {
            tracing::debug!(%action, "no unit selected");
            return;
        };
        match action {
            CharacterMenuAction::Attack => {
                let ranges = self.collaborators.ranges.as_ref();
                if self.selection.target_attacks(&mut self.world, ranges) {
                    self.close_active_menu();
                }
            }
            CharacterMenuAction::Interact => {
                if self.selection.target_interactions(&mut self.world) {
                    self.close_active_menu();
                }
            }
            CharacterMenuAction::Inventory => {
                if let Some(unit) = self.world.roster.get(id) {
                    self.menus.open(builders::inventory_menu(unit));
                }
            }
            CharacterMenuAction::Equipment => {
                if let Some(unit) = self.world.roster.get(id) {
                    self.menus.open(builders::equipment_menu(unit));
                }
            }
            CharacterMenuAction::Wait => self.finish_unit_turn(id, true),
        }
    }

    fn status_action(&mut self, action: StatusMenuAction) {
        let menu = match action {
            StatusMenuAction::Alterations(id) => {
                self.world.roster.get(id).map(builders::alterations_menu)
            }
            StatusMenuAction::Skills(id) => self.world.roster.get(id).map(builders::skills_menu),
        };
        if let Some(menu) = menu {
            self.menus.open(menu);
        }
    }

    fn pick_item(&mut self, picked: PickedItem) {
        let Some(owner) = self.world.roster.get(picked.owner) else {
            return;
        };
        let item = if picked.equipped {
            owner.equipment.iter().find(|item| item.id == picked.item)
        } else {
            owner.inventory.get(picked.item)
        };
        let Some(item) = item else {
            tracing::debug!(item = %picked.item, "picked item is gone");
            return;
        };
        self.menus.open(builders::item_menu(item, picked.equipped));
        self.picked_item = Some(picked);
    }

    fn item_action(&mut self, action: ItemMenuAction) {
        let Some(picked) = self.picked_item else {
            return;
        };
        let Some(owner) = self.world.roster.get_mut(picked.owner) else {
            return;
        };

        let outcome = match action {
            ItemMenuAction::Info => {
                let item = if picked.equipped {
                    owner.equipment.iter().find(|item| item.id == picked.item)
                } else {
                    owner.inventory.get(picked.item)
                };
                if let Some(item) = item {
                    self.menus.open(builders::item_description_menu(item));
                }
                return;
            }
            ItemMenuAction::Throw => {
                let removed = if picked.equipped {
                    owner.equipment.remove(picked.item)
                } else {
                    owner.inventory.remove(picked.item)
                };
                removed.map(|item| tracing::debug!(item = %item.name, "item thrown"))
            }
            ItemMenuAction::Use => {
                let heal = owner
                    .inventory
                    .get(picked.item)
                    .and_then(|item| match item.kind {
                        ItemKind::Consumable { heal } => Some(heal),
                        _ => None,
                    });
                match heal {
                    Some(heal) => owner.inventory.remove(picked.item).map(|_| {
                        let healed = owner.hp.restore(heal);
                        tracing::debug!(unit = %owner.id, healed, "consumable used");
                    }),
                    None => Err(InventoryError::MissingItem(picked.item)),
                }
            }
            ItemMenuAction::Equip => {
                let equippable = owner
                    .inventory
                    .get(picked.item)
                    .map(|item| item.slot().is_some());
                match equippable {
                    Some(true) => owner.inventory.remove(picked.item).and_then(|item| {
                        if let Some(previous) = owner.equipment.equip(item)? {
                            owner.inventory.restore(previous);
                        }
                        Ok(())
                    }),
                    Some(false) => Err(InventoryError::NotEquippable(picked.item)),
                    None => Err(InventoryError::MissingItem(picked.item)),
                }
            }
            ItemMenuAction::Unequip => {
                if owner.inventory.is_full() {
                    Err(InventoryError::Full)
                } else {
                    owner
                        .equipment
                        .remove(picked.item)
                        .and_then(|item| owner.inventory.add(item))
                }
            }
        };

        if let Err(error) = outcome {
            absorb("item action", &error);
            return;
        }
        self.close_active_menu();
        self.refresh_item_menus(picked.owner);
    }

    fn trade_action(&mut self, action: TradeMenuAction) {
        let Some((actor, _)) = self.trade else {
            tracing::debug!("trade action without an open trade");
            return;
        };
        let roster = &mut self.world.roster;
        let result = match action {
            TradeMenuAction::GiveItem { item, from, to } => {
                self.ledger.give_item(roster, actor, item, from, to)
            }
            TradeMenuAction::GiveGold { amount, from, to } => {
                self.ledger.give_gold(roster, actor, amount, from, to)
            }
        };
        match result {
            Ok(()) => self.refresh_trade_menu(),
            Err(error) => absorb("trade", &error),
        }
    }

    fn refresh_item_menus(&mut self, owner: EntityId) {
        let Some(unit) = self.world.roster.get(owner) else {
            return;
        };
        self.menus
            .replace(MenuId::Inventory, builders::inventory_menu(unit));
        self.menus
            .replace(MenuId::Equipment, builders::equipment_menu(unit));
    }

    fn refresh_trade_menu(&mut self) {
        let Some((actor, partner)) = self.trade else {
            return;
        };
        if let (Some(actor), Some(partner)) =
            (self.world.roster.get(actor), self.world.roster.get(partner))
        {
            let menu = builders::trade_menu(actor, partner, self.config.gold_trade_step);
            self.menus.replace(MenuId::Trade, menu);
        }
    }

    pub(super) fn after_duel(&mut self, report: DuelReport) {
        tracing::info!(
            attacker = %report.attacker,
            defender = %report.defender,
            damage = report.outcome.damage,
            counter = report.outcome.counter_damage,
            defeated = report.defender_defeated,
            "duel resolved"
        );
        if report.defender_defeated {
            self.diary.push(format!("{} was defeated", report.defender));
        }
        if report.attacker_defeated {
            self.diary.push(format!("{} fell in battle", report.attacker));
        }
        self.finish_unit_turn(report.attacker, false);
    }

    pub(super) fn after_interaction(&mut self, report: InteractionReport) {
        tracing::debug!(
            actor = %report.actor,
            target = %report.target,
            outcome = ?report.outcome,
            "interaction resolved"
        );
        match &report.outcome {
            InteractionOutcome::Loot => {
                let Some(actor) = self.world.roster.get(report.actor) else {
                    return;
                };
                let mut lines: Vec<String> = report
                    .looted
                    .iter()
                    .filter_map(|id| actor.inventory.get(*id))
                    .map(|item| format!("Found {}", item.name))
                    .collect();
                if report.gold > 0 {
                    lines.push(format!("Found {} gold", report.gold));
                }
                self.menus.open(builders::dialog_menu("Chest", &lines));
            }
            InteractionOutcome::OpenDoor { key } => {
                if let Some(error) = &report.key_error {
                    absorb("door key", error);
                }
                tracing::debug!(door = %report.target, key = ?key, "door opened");
            }
            InteractionOutcome::Locked => {
                let lines = ["The door is locked.".to_owned()];
                self.menus.open(builders::dialog_menu("Door", &lines));
            }
            InteractionOutcome::Talk { lines } => {
                let speaker = self
                    .world
                    .roster
                    .get(report.target)
                    .map_or_else(|| report.target.to_string(), |unit| unit.name.clone());
                self.diary
                    .extend(lines.iter().map(|line| format!("{speaker}: {line}")));
                self.menus.open(builders::dialog_menu(speaker, lines));
            }
            InteractionOutcome::Trade => {
                self.trade = Some((report.actor, report.target));
                if let (Some(actor), Some(partner)) = (
                    self.world.roster.get(report.actor),
                    self.world.roster.get(report.target),
                ) {
                    let menu = builders::trade_menu(actor, partner, self.config.gold_trade_step);
                    self.menus.open(menu);
                }
            }
            InteractionOutcome::Nothing => {}
        }
    }
}

/// Logs an error swallowed by an input handler.
pub(super) fn absorb(context: &'static str, error: &impl GameError) {
    if error.severity().is_internal() {
        tracing::warn!(context, code = error.error_code(), %error, "absorbed error");
    } else {
        tracing::debug!(context, code = error.error_code(), %error, "absorbed error");
    }
}
