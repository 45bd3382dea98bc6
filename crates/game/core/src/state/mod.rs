//! Board-level state: units, their belongings, and the board they stand on.
//!
//! Everything here is plain data plus small invariant-preserving helpers; the
//! selection and turn rules that mutate it live in [`crate::selection`],
//! [`crate::trade`] and [`crate::turn`].
mod common;
mod error;
mod inventory;
mod item;
mod roster;
mod unit;
mod world;

pub use common::{CardinalDirection, EntityId, Position, ReachableTiles, ResourceMeter, TileSet};
pub use error::WorldError;
pub use inventory::{Equipment, Inventory, InventoryError};
pub use item::{EquipmentSlot, Item, ItemId, ItemKind};
pub use roster::Roster;
pub use unit::{
    Alteration, AttackKind, Capabilities, FixtureKind, Reach, Side, Stat, Unit, UnitKind,
    UnitTurnState,
};
pub use world::{Board, World};
