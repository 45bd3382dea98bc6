//! Router configuration shared by the menu stack and the trade screen.

use game_core::GameConfig;

use crate::menu::{MenuLayout, ScreenPoint};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterConfig {
    pub game_config: GameConfig,
    /// Top-left corner every menu is drawn from.
    pub menu_origin: ScreenPoint,
    pub menu_width: i32,
    pub menu_row_height: i32,
    /// Gold moved by one click on a trade menu gold entry.
    pub gold_trade_step: i64,
}

impl RouterConfig {
    pub const DEFAULT_MENU_WIDTH: i32 = 320;
    pub const DEFAULT_MENU_ROW_HEIGHT: i32 = 24;
    pub const DEFAULT_GOLD_TRADE_STEP: i64 = 10;

    pub fn menu_layout(&self) -> MenuLayout {
        MenuLayout {
            origin: self.menu_origin,
            width: self.menu_width,
            row_height: self.menu_row_height,
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            menu_origin: ScreenPoint::new(0, 0),
            menu_width: Self::DEFAULT_MENU_WIDTH,
            menu_row_height: Self::DEFAULT_MENU_ROW_HEIGHT,
            gold_trade_step: Self::DEFAULT_GOLD_TRADE_STEP,
        }
    }
}
