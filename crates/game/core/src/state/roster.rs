//! Ordered collection of every unit on the board.
//!
//! Iteration order is insertion order; hit-testing relies on it ("first match
//! wins").

use super::common::{EntityId, Position};
use super::error::WorldError;
use super::unit::{Side, Unit, UnitKind};

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Roster {
    units: Vec<Unit>,
}

impl Roster {
    pub fn new(units: Vec<Unit>) -> Result<Self, WorldError> {
        let mut roster = Self::default();
        for unit in units {
            roster.insert(unit)?;
        }
        Ok(roster)
    }

    pub fn insert(&mut self, unit: Unit) -> Result<(), WorldError> {
        if self.contains(unit.id) {
            return Err(WorldError::DuplicateEntity(unit.id));
        }
        self.units.push(unit);
        Ok(())
    }

    pub fn remove(&mut self, id: EntityId) -> Option<Unit> {
        let index = self.units.iter().position(|unit| unit.id == id)?;
        Some(self.units.remove(index))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.units.iter().any(|unit| unit.id == id)
    }

    pub fn get(&self, id: EntityId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|unit| unit.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter()
    }

    /// Unit standing on `position`, if any.
    pub fn unit_at(&self, position: Position) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.position == position)
    }

    pub fn of_side(&self, side: Side) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(move |unit| unit.side == side)
    }

    /// Units controlled by the player.
    pub fn players(&self) -> impl Iterator<Item = &Unit> {
        self.of_side(Side::Player)
    }

    /// Foes and allies, fixtures excluded.
    pub fn others(&self) -> impl Iterator<Item = &Unit> {
        self.units.iter().filter(|unit| {
            unit.side != Side::Player && !matches!(unit.kind, UnitKind::Fixture(_))
        })
    }

    /// Mutable access to two distinct units at once.
    pub fn pair_mut(&mut self, first: EntityId, second: EntityId) -> Option<(&mut Unit, &mut Unit)> {
        if first == second {
            return None;
        }
        let first_index = self.units.iter().position(|unit| unit.id == first)?;
        let second_index = self.units.iter().position(|unit| unit.id == second)?;
        if first_index < second_index {
            let (head, tail) = self.units.split_at_mut(second_index);
            Some((&mut head[first_index], &mut tail[0]))
        } else {
            let (head, tail) = self.units.split_at_mut(first_index);
            Some((&mut tail[0], &mut head[second_index]))
        }
    }

    /// True when every unit of `side` has finished its turn.
    pub fn all_finished(&self, side: Side) -> bool {
        self.of_side(side)
            .filter(|unit| unit.can_move())
            .all(Unit::turn_is_finished)
    }

    /// Starts a fresh turn for every unit of `side`.
    pub fn refresh_side(&mut self, side: Side) {
        self.units
            .iter_mut()
            .filter(|unit| unit.side == side)
            .for_each(Unit::new_turn);
    }
}
