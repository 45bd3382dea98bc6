#![allow(dead_code)]

use game_core::{
    Board, EntityId, FixtureKind, Inventory, Item, ItemId, ItemKind, Phase, Position, Side,
    TurnContext, Unit, World,
};
use runtime::{InputSignal, InteractionRouter, MenuAction, Pointer, RouterConfig, ScreenPoint};

pub const HERO: EntityId = EntityId(1);
pub const SQUIRE: EntityId = EntityId(2);
pub const GOBLIN: EntityId = EntityId(10);
pub const CHEST: EntityId = EntityId(20);

pub const POTION: ItemId = ItemId(100);
pub const DAGGER: ItemId = ItemId(101);

pub fn potion() -> Item {
    Item::new(POTION, "Potion", ItemKind::Consumable { heal: 5 })
}

pub fn dagger() -> Item {
    Item::new(
        DAGGER,
        "Dagger",
        ItemKind::Weapon {
            attack: 2,
            reach: [1].into_iter().collect(),
        },
    )
}

pub fn hero(position: Position) -> Unit {
    Unit::character(HERO, "Raimund", position)
        .with_combat(20, 4, 1)
        .with_gold(40)
        .with_inventory(Inventory::new(vec![potion()]))
}

pub fn squire(position: Position) -> Unit {
    Unit::character(SQUIRE, "Braern", position).with_inventory(Inventory::new(vec![dagger()]))
}

pub fn goblin(position: Position) -> Unit {
    Unit::creature(GOBLIN, "Goblin", Side::Foe, position).with_combat(1, 2, 0)
}

pub fn chest(position: Position) -> Unit {
    Unit::fixture(CHEST, "Chest", FixtureKind::Chest, position)
        .with_gold(15)
        .with_inventory(Inventory::new(vec![Item::new(
            ItemId(200),
            "Ring",
            ItemKind::Trinket,
        )]))
}

/// A 10x10 open board already in battle.
pub fn battle(units: Vec<Unit>) -> InteractionRouter {
    router(units, Vec::new(), Phase::InProgress)
}

pub fn router(units: Vec<Unit>, placements: Vec<Position>, phase: Phase) -> InteractionRouter {
    let world = World::new(Board::new(10, 10), units, placements.into_iter().collect()).unwrap();
    InteractionRouter::builder()
        .config(RouterConfig::default())
        .world(world)
        .turn(TurnContext::starting_at(phase))
        .build()
        .unwrap()
}

/// A click on the board, far from any menu.
pub fn tile(x: i32, y: i32) -> Pointer {
    Pointer::new(ScreenPoint::new(5_000, 5_000), Position::new(x, y))
}

/// Clicks the entry of the active menu carrying `action`.
pub fn click_entry(router: &mut InteractionRouter, action: MenuAction) -> InputSignal {
    let menu = router
        .menus()
        .active_menu()
        .cloned()
        .expect("a menu is open");
    let index = menu
        .entries
        .iter()
        .position(|entry| entry.action == action)
        .expect("the active menu offers the action");
    let point = router.config().menu_layout().entry_point(&menu, index);
    router.on_primary_click(Pointer::new(point, Position::ORIGIN))
}

/// Selects the unit at `from`, walks it to `to` and lands it.
pub fn move_unit(router: &mut InteractionRouter, from: Position, to: Position) {
    router.on_primary_click(tile(from.x, from.y));
    router.on_primary_click(tile(to.x, to.y));
    assert!(router.complete_move(), "move should complete");
}
