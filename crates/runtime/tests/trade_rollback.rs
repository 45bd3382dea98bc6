mod common;

use common::*;
use game_core::{EntityId, Position, Unit, UnitTurnState};
use runtime::{CharacterMenuAction, InteractionRouter, MenuAction, MenuId, TradeMenuAction};

const SCOUT: EntityId = EntityId(3);

fn scout(position: Position) -> Unit {
    Unit::character(SCOUT, "Iselde", position)
}

/// Hero walks next to the squire and opens the trade screen.
fn open_trade() -> InteractionRouter {
    open_trade_among(Vec::new())
}

fn open_trade_among(others: Vec<Unit>) -> InteractionRouter {
    let mut units = vec![hero(Position::new(0, 0)), squire(Position::new(1, 1))];
    units.extend(others);
    let mut router = battle(units);
    move_unit(&mut router, Position::new(0, 0), Position::new(0, 1));

    click_entry(
        &mut router,
        MenuAction::Character(CharacterMenuAction::Interact),
    );
    router.on_primary_click(tile(1, 1));
    assert_eq!(router.menus().active_menu_identifier(), Some(MenuId::Trade));
    router
}

#[test]
fn cancelled_move_returns_traded_goods() {
    let mut router = open_trade();

    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveItem {
            item: POTION,
            from: HERO,
            to: SQUIRE,
        }),
    );
    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveGold {
            amount: 10,
            from: HERO,
            to: SQUIRE,
        }),
    );
    {
        let roster = &router.world().roster;
        assert!(roster.get(SQUIRE).unwrap().inventory.contains(POTION));
        assert_eq!(roster.get(HERO).unwrap().gold, 30);
        assert_eq!(router.ledger().item_transfers().len(), 1);
    }

    click_entry(&mut router, MenuAction::Close);
    router.update();
    assert_eq!(
        router.menus().active_menu_identifier(),
        Some(MenuId::CharacterAction)
    );

    router.on_secondary_click();

    let roster = &router.world().roster;
    let hero = roster.get(HERO).unwrap();
    assert!(hero.inventory.contains(POTION));
    assert!(!roster.get(SQUIRE).unwrap().inventory.contains(POTION));
    assert_eq!(hero.gold, 40);
    assert_eq!(roster.get(SQUIRE).unwrap().gold, 0);
    assert_eq!(hero.position, Position::new(0, 0));
    assert_eq!(hero.turn, UnitTurnState::Waiting);
    assert!(router.ledger().is_empty());
    assert!(!router.menus().is_active());
}

#[test]
fn goods_passed_back_and_forth_still_return_to_their_donor() {
    let mut router = open_trade();

    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveItem {
            item: POTION,
            from: HERO,
            to: SQUIRE,
        }),
    );
    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveItem {
            item: DAGGER,
            from: SQUIRE,
            to: HERO,
        }),
    );
    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveItem {
            item: POTION,
            from: SQUIRE,
            to: HERO,
        }),
    );
    click_entry(&mut router, MenuAction::Close);
    router.update();
    router.on_secondary_click();

    let roster = &router.world().roster;
    assert!(roster.get(HERO).unwrap().inventory.contains(POTION));
    assert!(!roster.get(HERO).unwrap().inventory.contains(DAGGER));
    assert!(roster.get(SQUIRE).unwrap().inventory.contains(DAGGER));
    assert!(!roster.get(SQUIRE).unwrap().inventory.contains(POTION));
}

#[test]
fn waiting_commits_the_trade() {
    let mut router = open_trade();

    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveItem {
            item: DAGGER,
            from: SQUIRE,
            to: HERO,
        }),
    );
    click_entry(&mut router, MenuAction::Close);
    router.update();
    click_entry(&mut router, MenuAction::Character(CharacterMenuAction::Wait));

    assert!(router.ledger().is_empty());
    let roster = &router.world().roster;
    assert!(roster.get(HERO).unwrap().inventory.contains(DAGGER));
    assert!(roster.get(HERO).unwrap().turn_is_finished());
}

#[test]
fn right_click_on_the_trade_screen_only_closes_it() {
    let mut router = open_trade();
    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveGold {
            amount: 10,
            from: HERO,
            to: SQUIRE,
        }),
    );

    router.on_secondary_click();

    assert!(!router.menus().is_active());
    assert_eq!(router.world().roster.get(SQUIRE).unwrap().gold, 10);
    assert!(!router.ledger().is_empty());
    assert_eq!(router.selection().selected(), Some(HERO));
}

#[test]
fn cancelling_another_units_move_keeps_the_first_units_trade() {
    let mut router = open_trade_among(vec![scout(Position::new(6, 6))]);
    click_entry(
        &mut router,
        MenuAction::Trade(TradeMenuAction::GiveItem {
            item: POTION,
            from: HERO,
            to: SQUIRE,
        }),
    );
    click_entry(&mut router, MenuAction::Close);
    router.update();

    // hero starts targeting again, then clicks away and is dropped
    click_entry(
        &mut router,
        MenuAction::Character(CharacterMenuAction::Interact),
    );
    router.on_primary_click(tile(9, 0));
    assert_eq!(router.selection().selected(), None);
    assert!(router.ledger().has_pending(HERO));

    move_unit(&mut router, Position::new(6, 6), Position::new(6, 7));
    assert_eq!(
        router.menus().active_menu_identifier(),
        Some(MenuId::CharacterAction)
    );
    router.on_secondary_click();

    let roster = &router.world().roster;
    assert_eq!(roster.get(SCOUT).unwrap().position, Position::new(6, 6));
    assert_eq!(roster.get(HERO).unwrap().position, Position::new(0, 1));
    assert!(!roster.get(HERO).unwrap().inventory.contains(POTION));
    assert!(roster.get(SQUIRE).unwrap().inventory.contains(POTION));
    assert!(router.ledger().has_pending(HERO));

    // the hero's own cancel still returns the potion
    router.on_primary_click(tile(0, 1));
    router.update();
    assert_eq!(
        router.menus().active_menu_identifier(),
        Some(MenuId::CharacterAction)
    );
    router.on_secondary_click();

    let roster = &router.world().roster;
    assert_eq!(roster.get(HERO).unwrap().position, Position::new(0, 0));
    assert!(roster.get(HERO).unwrap().inventory.contains(POTION));
    assert!(!roster.get(SQUIRE).unwrap().inventory.contains(POTION));
    assert!(router.ledger().is_empty());
}
