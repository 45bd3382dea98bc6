//! Menu identifiers, the actions their entries carry, and the gateway the
//! router talks to.
//!
//! The router never draws anything. It hands [`MenuDescriptor`]s to a
//! [`MenuGateway`] and receives [`MenuAction`]s back when an entry is
//! clicked; every action is a tagged variant dispatched with `match`.
pub mod builders;
mod stack;

pub use stack::{MenuLayout, MenuStack};

use game_core::{EntityId, ItemId};

/// Pixel coordinates on screen, before any board transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum MenuId {
    /// Post-move actions of the selected unit. Outside clicks and escape
    /// never close it; right-click cancels the move instead.
    CharacterAction,
    Main,
    Status,
    /// Alteration or skill descriptions.
    Info,
    Inventory,
    Equipment,
    Item,
    ItemDescription,
    Trade,
    Dialog,
    Diary,
    Save,
}

impl MenuId {
    pub fn is_exempt(self) -> bool {
        self == MenuId::CharacterAction
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum MainMenuAction {
    Save,
    Suspend,
    Start,
    Diary,
    EndTurn,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum CharacterMenuAction {
    Attack,
    Interact,
    Inventory,
    Equipment,
    Wait,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum StatusMenuAction {
    Alterations(EntityId),
    Skills(EntityId),
}

/// Actions on the item picked in the inventory or equipment menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum ItemMenuAction {
    Info,
    Throw,
    Use,
    Equip,
    Unequip,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TradeMenuAction {
    GiveItem {
        item: ItemId,
        from: EntityId,
        to: EntityId,
    },
    GiveGold {
        amount: i64,
        from: EntityId,
        to: EntityId,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MenuAction {
    Main(MainMenuAction),
    Character(CharacterMenuAction),
    Status(StatusMenuAction),
    /// An item button in the inventory or equipment menu.
    PickItem {
        owner: EntityId,
        item: ItemId,
        equipped: bool,
    },
    Item(ItemMenuAction),
    Trade(TradeMenuAction),
    Close,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: String,
    pub action: MenuAction,
}

/// Everything needed to show a menu: a title, read-only text lines and
/// clickable entries, top to bottom.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuDescriptor {
    pub id: MenuId,
    pub title: String,
    pub lines: Vec<String>,
    pub entries: Vec<MenuEntry>,
}

impl MenuDescriptor {
    pub fn new(id: MenuId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            lines: Vec::new(),
            entries: Vec::new(),
        }
    }

    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.lines.push(text.into());
        self
    }

    pub fn lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.lines.extend(lines);
        self
    }

    pub fn entry(mut self, label: impl Into<String>, action: MenuAction) -> Self {
        self.entries.push(MenuEntry {
            label: label.into(),
            action,
        });
        self
    }

    pub fn has_action(&self, action: MenuAction) -> bool {
        self.entries.iter().any(|entry| entry.action == action)
    }

    /// Title row, text lines and entries.
    pub fn row_count(&self) -> usize {
        1 + self.lines.len() + self.entries.len()
    }
}

/// The only component allowed to display UI.
pub trait MenuGateway {
    fn open(&mut self, menu: MenuDescriptor);

    /// Closes the top-most menu and returns its identifier.
    fn close_active(&mut self) -> Option<MenuId>;

    /// Swaps the content of an open menu in place. Returns false when no
    /// menu with `id` is open.
    fn replace(&mut self, id: MenuId, menu: MenuDescriptor) -> bool;

    fn is_position_inside(&self, point: ScreenPoint) -> bool;

    /// Top-most open menu.
    fn active_menu(&self) -> Option<&MenuDescriptor>;

    /// Forwards a click to the active menu; returns the action of the entry
    /// under the pointer, if any.
    fn click(&mut self, point: ScreenPoint) -> Option<MenuAction>;

    fn motion(&mut self, point: ScreenPoint);

    /// Row of the active menu under the pointer after the last
    /// [`motion`](Self::motion).
    fn hovered_entry(&self) -> Option<usize>;

    /// Closes every open menu.
    fn clear(&mut self);

    fn active_menu_identifier(&self) -> Option<MenuId> {
        self.active_menu().map(|menu| menu.id)
    }

    fn is_active(&self) -> bool {
        self.active_menu().is_some()
    }
}
