//! Descriptors for every menu the router opens.

use game_core::{Item, ItemKind, Phase, Unit, UnitKind};

use super::{
    CharacterMenuAction, ItemMenuAction, MainMenuAction, MenuAction, MenuDescriptor, MenuId,
    StatusMenuAction, TradeMenuAction,
};

/// Main menu, with `Start` during placement and `End turn` once the battle
/// is running.
pub fn main_menu(phase: Phase) -> MenuDescriptor {
    let menu = MenuDescriptor::new(MenuId::Main, "Main menu");
    let menu = if phase == Phase::Initialization {
        menu.entry("Start", MenuAction::Main(MainMenuAction::Start))
    } else {
        menu
    };
    let menu = menu
        .entry("Save", MenuAction::Main(MainMenuAction::Save))
        .entry("Suspend", MenuAction::Main(MainMenuAction::Suspend))
        .entry("Diary", MenuAction::Main(MainMenuAction::Diary));
    if phase == Phase::Initialization {
        menu
    } else {
        menu.entry("End turn", MenuAction::Main(MainMenuAction::EndTurn))
    }
}

/// Actions offered once a unit finished walking. Attack and interact only
/// show up when something is in range.
pub fn character_menu(unit: &Unit, can_attack: bool, can_interact: bool) -> MenuDescriptor {
    let mut menu = MenuDescriptor::new(MenuId::CharacterAction, unit.name.clone());
    if can_attack {
        menu = menu.entry("Attack", MenuAction::Character(CharacterMenuAction::Attack));
    }
    if can_interact {
        menu = menu.entry("Interact", MenuAction::Character(CharacterMenuAction::Interact));
    }
    menu.entry(
        "Inventory",
        MenuAction::Character(CharacterMenuAction::Inventory),
    )
    .entry(
        "Equipment",
        MenuAction::Character(CharacterMenuAction::Equipment),
    )
    .entry("Wait", MenuAction::Character(CharacterMenuAction::Wait))
}

/// Read-only sheet of any unit.
pub fn status_menu(unit: &Unit) -> MenuDescriptor {
    let kind = match unit.kind {
        UnitKind::Character => "character".to_owned(),
        UnitKind::Creature => "creature".to_owned(),
        UnitKind::Fixture(fixture) => fixture.to_string().to_lowercase(),
    };
    MenuDescriptor::new(MenuId::Status, unit.name.clone())
        .line(format!("{} {}", unit.side, kind))
        .line(format!("HP {}/{}", unit.hp.current, unit.hp.maximum))
        .line(format!(
            "ATK {}  DEF {}  RES {}",
            unit.attack_power(),
            unit.defense_power(),
            unit.resistance
        ))
        .line(format!("MOVE {}", unit.movement_budget()))
        .entry(
            "Alterations",
            MenuAction::Status(StatusMenuAction::Alterations(unit.id)),
        )
        .entry("Skills", MenuAction::Status(StatusMenuAction::Skills(unit.id)))
        .entry("Close", MenuAction::Close)
}

pub fn alterations_menu(unit: &Unit) -> MenuDescriptor {
    let menu = MenuDescriptor::new(MenuId::Info, "Alterations");
    let menu = if unit.alterations.is_empty() {
        menu.line("None")
    } else {
        menu.lines(unit.alterations.iter().map(|alteration| {
            format!(
                "{}: {:+} {} ({} turns)",
                alteration.name, alteration.amount, alteration.stat, alteration.turns
            )
        }))
    };
    menu.entry("Close", MenuAction::Close)
}

pub fn skills_menu(unit: &Unit) -> MenuDescriptor {
    let menu = MenuDescriptor::new(MenuId::Info, "Skills");
    let menu = if unit.skills.is_empty() {
        menu.line("None")
    } else {
        menu.lines(unit.skills.iter().cloned())
    };
    menu.entry("Close", MenuAction::Close)
}

pub fn inventory_menu(unit: &Unit) -> MenuDescriptor {
    let mut menu = MenuDescriptor::new(MenuId::Inventory, "Inventory")
        .line(format!("Gold: {}", unit.gold));
    for item in unit.inventory.iter() {
        menu = menu.entry(
            item.name.clone(),
            MenuAction::PickItem {
                owner: unit.id,
                item: item.id,
                equipped: false,
            },
        );
    }
    menu.entry("Close", MenuAction::Close)
}

pub fn equipment_menu(unit: &Unit) -> MenuDescriptor {
    let mut menu = MenuDescriptor::new(MenuId::Equipment, "Equipment");
    for item in unit.equipment.iter() {
        menu = menu.entry(
            item.name.clone(),
            MenuAction::PickItem {
                owner: unit.id,
                item: item.id,
                equipped: true,
            },
        );
    }
    menu.entry("Close", MenuAction::Close)
}

pub fn item_menu(item: &Item, equipped: bool) -> MenuDescriptor {
    let mut menu = MenuDescriptor::new(MenuId::Item, item.name.clone())
        .entry("Info", MenuAction::Item(ItemMenuAction::Info))
        .entry("Throw", MenuAction::Item(ItemMenuAction::Throw));
    if item.is_consumable() && !equipped {
        menu = menu.entry("Use", MenuAction::Item(ItemMenuAction::Use));
    }
    if item.slot().is_some() {
        menu = if equipped {
            menu.entry("Unequip", MenuAction::Item(ItemMenuAction::Unequip))
        } else {
            menu.entry("Equip", MenuAction::Item(ItemMenuAction::Equip))
        };
    }
    menu.entry("Close", MenuAction::Close)
}

pub fn item_description_menu(item: &Item) -> MenuDescriptor {
    let summary = match &item.kind {
        ItemKind::Consumable { heal } => format!("Restores {heal} HP"),
        ItemKind::Weapon { attack, reach } => format!("ATK +{attack}, reach {reach:?}"),
        ItemKind::Armor { defense } => format!("DEF +{defense}"),
        ItemKind::Key => "Opens a locked door".to_owned(),
        ItemKind::Trinket => "Worth a few coins".to_owned(),
    };
    let menu = MenuDescriptor::new(MenuId::ItemDescription, item.name.clone()).line(summary);
    let menu = if item.description.is_empty() {
        menu
    } else {
        menu.line(item.description.clone())
    };
    menu.entry("Close", MenuAction::Close)
}

/// Two-way trade screen between `first` and `second`.
pub fn trade_menu(first: &Unit, second: &Unit, gold_step: i64) -> MenuDescriptor {
    let mut menu = MenuDescriptor::new(MenuId::Trade, "Trade")
        .line(format!("{}: {} gold", first.name, first.gold))
        .line(format!("{}: {} gold", second.name, second.gold));
    for (giver, taker) in [(first, second), (second, first)] {
        for item in giver.inventory.iter() {
            menu = menu.entry(
                format!("{} -> {}: {}", giver.name, taker.name, item.name),
                MenuAction::Trade(TradeMenuAction::GiveItem {
                    item: item.id,
                    from: giver.id,
                    to: taker.id,
                }),
            );
        }
    }
    for (giver, taker) in [(first, second), (second, first)] {
        if gold_step > 0 && giver.gold >= gold_step {
            menu = menu.entry(
                format!("{} -> {}: {} gold", giver.name, taker.name, gold_step),
                MenuAction::Trade(TradeMenuAction::GiveGold {
                    amount: gold_step,
                    from: giver.id,
                    to: taker.id,
                }),
            );
        }
    }
    menu.entry("Close", MenuAction::Close)
}

pub fn dialog_menu(title: impl Into<String>, lines: &[String]) -> MenuDescriptor {
    MenuDescriptor::new(MenuId::Dialog, title)
        .lines(lines.iter().cloned())
        .entry("Close", MenuAction::Close)
}

pub fn diary_menu(entries: &[String]) -> MenuDescriptor {
    let menu = MenuDescriptor::new(MenuId::Diary, "Diary");
    let menu = if entries.is_empty() {
        menu.line("Nothing written yet")
    } else {
        menu.lines(entries.iter().cloned())
    };
    menu.entry("Close", MenuAction::Close)
}

/// Summary of what a save would contain. Writing it is up to the host.
pub fn save_menu(round: u32, units: usize, diary_entries: usize) -> MenuDescriptor {
    MenuDescriptor::new(MenuId::Save, "Save")
        .line(format!("Round {round}"))
        .line(format!("{units} units on the board"))
        .line(format!("{diary_entries} diary entries"))
        .entry("Close", MenuAction::Close)
}

#[cfg(test)]
mod tests {
    use super::*;
    use game_core::{EntityId, Inventory, ItemId, Position};

    fn potion() -> Item {
        Item::new(ItemId(1), "Potion", ItemKind::Consumable { heal: 5 })
    }

    fn sword() -> Item {
        Item::new(
            ItemId(2),
            "Sword",
            ItemKind::Weapon {
                attack: 3,
                reach: [1].into_iter().collect(),
            },
        )
    }

    #[test]
    fn main_menu_variant_follows_phase() {
        let placement = main_menu(Phase::Initialization);
        assert!(placement.has_action(MenuAction::Main(MainMenuAction::Start)));
        assert!(!placement.has_action(MenuAction::Main(MainMenuAction::EndTurn)));

        let battle = main_menu(Phase::InProgress);
        assert!(!battle.has_action(MenuAction::Main(MainMenuAction::Start)));
        assert!(battle.has_action(MenuAction::Main(MainMenuAction::EndTurn)));
    }

    #[test]
    fn item_menu_offers_matching_actions() {
        let consumable = item_menu(&potion(), false);
        assert!(consumable.has_action(MenuAction::Item(ItemMenuAction::Use)));
        assert!(!consumable.has_action(MenuAction::Item(ItemMenuAction::Equip)));

        let worn = item_menu(&sword(), true);
        assert!(worn.has_action(MenuAction::Item(ItemMenuAction::Unequip)));
        assert!(!worn.has_action(MenuAction::Item(ItemMenuAction::Equip)));
    }

    #[test]
    fn trade_menu_lists_both_directions() {
        let first = Unit::character(EntityId(1), "Raimund", Position::new(0, 0))
            .with_gold(25)
            .with_inventory(Inventory::new(vec![potion()]));
        let second = Unit::character(EntityId(2), "Braern", Position::new(1, 0))
            .with_inventory(Inventory::new(vec![sword()]));
        let menu = trade_menu(&first, &second, 10);

        assert!(menu.has_action(MenuAction::Trade(TradeMenuAction::GiveItem {
            item: ItemId(1),
            from: EntityId(1),
            to: EntityId(2),
        })));
        assert!(menu.has_action(MenuAction::Trade(TradeMenuAction::GiveItem {
            item: ItemId(2),
            from: EntityId(2),
            to: EntityId(1),
        })));
        assert!(menu.has_action(MenuAction::Trade(TradeMenuAction::GiveGold {
            amount: 10,
            from: EntityId(1),
            to: EntityId(2),
        })));
        // second has no gold to give
        assert_eq!(menu.entries.len(), 4);
    }
}
