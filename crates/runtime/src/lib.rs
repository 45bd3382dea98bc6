//! Input routing for the tactical battle screen.
//!
//! This crate turns pointer and keyboard events into transitions of the
//! deterministic `game-core` state and keeps the menu stack in sync with
//! them. Hosts build an [`InteractionRouter`] (usually from a [`Scenario`])
//! and feed it events.
//!
//! Modules are organized by responsibility:
//! - [`router`] hosts the router, its builder and every input handler
//! - [`menu`] describes menus and provides the in-memory [`MenuStack`]
//! - [`scenario`] loads levels from JSON
//! - [`config`] and [`error`] hold the router settings and build errors
pub mod config;
pub mod error;
pub mod menu;
pub mod router;
pub mod scenario;

pub use config::RouterConfig;
pub use error::{Result, RouterError};
pub use menu::{
    CharacterMenuAction, ItemMenuAction, MainMenuAction, MenuAction, MenuDescriptor, MenuEntry,
    MenuGateway, MenuId, MenuLayout, MenuStack, ScreenPoint, StatusMenuAction, TradeMenuAction,
};
pub use router::{InputSignal, InteractionRouter, PickedItem, Pointer, RouterBuilder};
pub use scenario::{Scenario, ScenarioError};
