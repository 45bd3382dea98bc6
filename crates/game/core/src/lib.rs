//! Deterministic rules of the tactical battle screen.
//!
//! `game-core` owns the board state ([`state`]), whose side is playing
//! ([`turn`]), what the player currently has selected ([`selection`]) and the
//! trades that may still be undone ([`trade`]). Range computation, path
//! planning, duels and interactions are delegated to the collaborator traits
//! in [`env`] so hosts can replace them. Nothing here logs or performs I/O;
//! the runtime crate drives these types from pointer and keyboard input.
pub mod config;
pub mod env;
pub mod error;
pub mod selection;
pub mod state;
pub mod trade;
pub mod turn;

pub use config::GameConfig;
pub use env::{
    Collaborators, CombatResolver, DuelOutcome, GridNavigator, HitTest, InteractionOutcome,
    InteractionResolver, PathPlanner, RangeCalculator, StandardDuel, StandardInteractions,
    TileHitTest,
};
pub use error::{ErrorSeverity, GameError};
pub use selection::{
    DuelReport, InputGate, InteractionReport, SelectionMode, SelectionState, attack_targets,
    interaction_targets,
};
pub use state::{
    Alteration, AttackKind, Board, Capabilities, CardinalDirection, EntityId, Equipment,
    EquipmentSlot, FixtureKind, Inventory, InventoryError, Item, ItemId, ItemKind, Position,
    Reach, ReachableTiles, ResourceMeter, Roster, Side, Stat, TileSet, Unit, UnitKind,
    UnitTurnState, World, WorldError,
};
pub use trade::{GoldTransfer, ItemTransfer, TradeError, TradeLedger};
pub use turn::{Phase, TurnContext};
