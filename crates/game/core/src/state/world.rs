use crate::config::GameConfig;

use super::common::{Position, TileSet};
use super::error::WorldError;
use super::roster::Roster;
use super::unit::{Side, Unit};

/// Static board layout: a rectangle of floor tiles with impassable walls.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Board {
    pub width: u32,
    pub height: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub walls: TileSet,
}

impl Board {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            walls: TileSet::new(),
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        self.walls.extend(walls);
        self
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    pub fn is_walkable(&self, position: Position) -> bool {
        self.contains(position) && !self.walls.contains(&position)
    }
}

/// Everything the selection rules read or mutate: board, units and the
/// tiles the player may use during the placement phase.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct World {
    pub board: Board,
    pub roster: Roster,
    pub placements: TileSet,
    pub config: GameConfig,
}

impl World {
    /// Assembles a world, rejecting units outside the board or stacked on
    /// the same tile.
    pub fn new(board: Board, units: Vec<Unit>, placements: TileSet) -> Result<Self, WorldError> {
        let roster = Roster::new(units)?;
        for unit in roster.iter() {
            if !board.contains(unit.position) {
                return Err(WorldError::OutOfBounds {
                    id: unit.id,
                    position: unit.position,
                });
            }
            if let Some(other) = roster
                .iter()
                .find(|other| other.id != unit.id && other.position == unit.position)
            {
                return Err(WorldError::TileConflict {
                    first: unit.id,
                    second: other.id,
                    position: unit.position,
                });
            }
        }
        Ok(Self {
            board,
            roster,
            placements,
            config: GameConfig::default(),
        })
    }

    pub fn with_config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Walkable and nobody stands there.
    pub fn is_free(&self, position: Position) -> bool {
        self.board.is_walkable(position) && self.roster.unit_at(position).is_none()
    }

    /// True when `position` holds a unit hostile to `side`.
    pub fn hostile_at(&self, position: Position, side: Side) -> bool {
        self.roster
            .unit_at(position)
            .is_some_and(|unit| unit.side.is_hostile_to(side) && unit.is_alive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::common::EntityId;

    #[test]
    fn board_bounds_and_walls() {
        let board = Board::new(4, 3).with_walls([Position::new(1, 1)]);
        assert!(board.contains(Position::new(3, 2)));
        assert!(!board.contains(Position::new(4, 0)));
        assert!(!board.contains(Position::new(-1, 0)));
        assert!(!board.is_walkable(Position::new(1, 1)));
        assert!(board.is_walkable(Position::new(2, 1)));
    }

    #[test]
    fn world_rejects_stacked_units() {
        let units = vec![
            Unit::character(EntityId(1), "A", Position::new(1, 1)),
            Unit::character(EntityId(2), "B", Position::new(1, 1)),
        ];
        let err = World::new(Board::new(4, 4), units, TileSet::new()).unwrap_err();
        assert!(matches!(err, WorldError::TileConflict { .. }));
    }

    #[test]
    fn world_rejects_units_off_board() {
        let units = vec![Unit::character(EntityId(1), "A", Position::new(9, 1))];
        let err = World::new(Board::new(4, 4), units, TileSet::new()).unwrap_err();
        assert_eq!(
            err,
            WorldError::OutOfBounds {
                id: EntityId(1),
                position: Position::new(9, 1)
            }
        );
    }
}
