use crate::state::{FixtureKind, ItemId, ItemKind, Position, Unit, UnitKind};

use super::InteractionResolver;

/// What interacting with a target amounts to. Applying it to the world is the
/// job of [`crate::selection::SelectionState::resolve_interact`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum InteractionOutcome {
    /// Empty the chest into the actor's bag.
    Loot,
    /// Remove the door, consuming `key` when it was locked.
    OpenDoor { key: Option<ItemId> },
    /// Locked door and no key at hand.
    Locked,
    Talk { lines: Vec<String> },
    /// Open the trade screen with a fellow character.
    Trade,
    Nothing,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct StandardInteractions;

impl InteractionResolver for StandardInteractions {
    fn resolve_interaction(
        &self,
        actor: &Unit,
        target: &Unit,
        _tile: Position,
    ) -> InteractionOutcome {
        match target.kind {
            UnitKind::Fixture(FixtureKind::Chest) => {
                if target.inventory.is_empty() && target.gold == 0 {
                    InteractionOutcome::Nothing
                } else {
                    InteractionOutcome::Loot
                }
            }
            UnitKind::Fixture(FixtureKind::Door { locked: false }) => {
                InteractionOutcome::OpenDoor { key: None }
            }
            UnitKind::Fixture(FixtureKind::Door { locked: true }) => actor
                .inventory
                .iter()
                .find(|item| matches!(item.kind, ItemKind::Key))
                .map_or(InteractionOutcome::Locked, |key| {
                    InteractionOutcome::OpenDoor { key: Some(key.id) }
                }),
            UnitKind::Fixture(FixtureKind::Npc) => InteractionOutcome::Talk {
                lines: target.dialogue.clone(),
            },
            UnitKind::Character if target.side == actor.side && target.id != actor.id => {
                InteractionOutcome::Trade
            }
            _ => InteractionOutcome::Nothing,
        }
    }
}
