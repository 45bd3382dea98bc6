//! Host configuration read from the process environment.
use std::env;
use std::path::PathBuf;

use runtime::RouterConfig;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub scenario: Option<PathBuf>,
    /// Edge of one board tile in screen pixels.
    pub tile_size: i32,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub menu_row_height: Option<i32>,
    pub menu_width: Option<i32>,
}

impl ClientConfig {
    pub const DEFAULT_TILE_SIZE: i32 = 32;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_SCENARIO` - Script to replay (default: none, see CLI)
    /// - `TACTICS_TILE_SIZE` - Tile edge in pixels (default: 32)
    /// - `TACTICS_SESSION_ID` - Log session name (default: `session_<timestamp>`)
    /// - `TACTICS_LOG_DIR` - Log root (default: platform cache directory)
    /// - `TACTICS_MENU_ROW_HEIGHT` - Menu row height in pixels (default: 24)
    /// - `TACTICS_MENU_WIDTH` - Menu width in pixels (default: 320)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.scenario = env::var("TACTICS_SCENARIO").ok().map(PathBuf::from);

        if let Some(size) = read_env::<i32>("TACTICS_TILE_SIZE") {
            config.tile_size = size.max(1);
        }

        config.session_id = env::var("TACTICS_SESSION_ID").ok();
        config.log_dir = env::var("TACTICS_LOG_DIR").ok().map(PathBuf::from);

        config.menu_row_height = read_env::<i32>("TACTICS_MENU_ROW_HEIGHT").map(|h| h.max(1));
        config.menu_width = read_env::<i32>("TACTICS_MENU_WIDTH").map(|w| w.max(1));

        config
    }

    /// Router settings with the menu overrides applied.
    pub fn router_config(&self) -> RouterConfig {
        let mut router = RouterConfig::default();
        if let Some(height) = self.menu_row_height {
            router.menu_row_height = height;
        }
        if let Some(width) = self.menu_width {
            router.menu_width = width;
        }
        router
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            scenario: None,
            tile_size: Self::DEFAULT_TILE_SIZE,
            session_id: None,
            log_dir: None,
            menu_row_height: None,
            menu_width: None,
        }
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_overrides_reach_the_router() {
        let config = ClientConfig {
            menu_row_height: Some(30),
            ..ClientConfig::default()
        };
        let router = config.router_config();
        assert_eq!(router.menu_row_height, 30);
        assert_eq!(router.menu_width, RouterConfig::DEFAULT_MENU_WIDTH);
    }
}
