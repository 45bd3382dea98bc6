//! Which unit the player is steering and which tiles are highlighted for it.
//!
//! [`SelectionState`] holds either a selected unit (one the player is about
//! to order) or a watched unit (any movable unit whose ranges are previewed),
//! never both. The three tile sets are what the board highlights; the
//! current [`SelectionMode`] is derived from which of them is populated.

use crate::env::{
    CombatResolver, DuelOutcome, InteractionOutcome, InteractionResolver, PathPlanner,
    RangeCalculator,
};
use crate::state::{
    EntityId, InventoryError, ItemId, Position, ReachableTiles, Side, TileSet, Unit, World,
};
use crate::turn::Phase;

/// Derived from the selection, in priority order move > attack > interact.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
pub enum SelectionMode {
    None,
    AwaitingMove,
    AwaitingAttack,
    AwaitingInteract,
    /// Pre-battle: the selected unit may swap onto any placement tile.
    Placement,
}

/// Conditions outside the selection that decide whether it may change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InputGate {
    pub menu_active: bool,
    pub player_turn: bool,
    pub phase: Phase,
}

impl InputGate {
    fn is_open(self) -> bool {
        !self.menu_active && self.player_turn
    }
}

/// Result of a resolved attack, after damage was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DuelReport {
    pub attacker: EntityId,
    pub defender: EntityId,
    pub outcome: DuelOutcome,
    pub defender_defeated: bool,
    pub attacker_defeated: bool,
}

/// Result of a resolved interaction, after it was applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionReport {
    pub actor: EntityId,
    pub target: EntityId,
    pub outcome: InteractionOutcome,
    /// Items that moved into the actor's bag.
    pub looted: Vec<ItemId>,
    pub gold: i64,
    /// The door named a key the actor no longer carried. The door opens
    /// regardless.
    pub key_error: Option<InventoryError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<EntityId>,
    watched: Option<EntityId>,
    placement: bool,
    reachable: ReachableTiles,
    attackable: TileSet,
    interactable: TileSet,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<EntityId> {
        self.selected
    }

    pub fn watched(&self) -> Option<EntityId> {
        self.watched
    }

    pub fn reachable_tiles(&self) -> &ReachableTiles {
        &self.reachable
    }

    pub fn attackable_tiles(&self) -> &TileSet {
        &self.attackable
    }

    pub fn interactable_tiles(&self) -> &TileSet {
        &self.interactable
    }

    pub fn mode(&self) -> SelectionMode {
        if self.selected.is_none() {
            SelectionMode::None
        } else if self.placement {
            SelectionMode::Placement
        } else if !self.reachable.is_empty() {
            SelectionMode::AwaitingMove
        } else if !self.attackable.is_empty() {
            SelectionMode::AwaitingAttack
        } else if !self.interactable.is_empty() {
            SelectionMode::AwaitingInteract
        } else {
            SelectionMode::None
        }
    }

    // ===== selection =====

    /// Selects a player unit and computes its movement and attack previews.
    ///
    /// During placement no range is computed. A unit that already moved
    /// this turn is selected without ranges; its action menu drives it.
    pub fn select(
        &mut self,
        unit: &Unit,
        world: &World,
        ranges: &dyn RangeCalculator,
        gate: InputGate,
    ) -> bool {
        if !gate.is_open() || unit.side != Side::Player || unit.turn_is_finished() {
            return false;
        }
        self.stop_watching();
        self.clear_targets();
        self.selected = Some(unit.id);
        self.placement = gate.phase == Phase::Initialization;
        if self.placement || unit.has_moved() {
            return true;
        }

        self.reachable = ranges.compute_reachable(world, unit.position, unit.movement_budget());
        if unit.can_attack() {
            let tiles =
                ranges.compute_attackable(world, &self.reachable, unit.reach(), unit.is_character());
            self.attackable = hostile_tiles(world, unit.side, tiles);
        }
        true
    }

    /// Forgets the selected unit and every highlighted tile.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.placement = false;
        self.clear_targets();
    }

    /// Starts moving the selected unit to `tile`.
    ///
    /// Fails when `tile` is not reachable; the caller deselects in that case.
    pub fn commit_move(&mut self, tile: Position, world: &mut World, paths: &dyn PathPlanner) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if self.placement || !self.reachable.contains_key(&tile) {
            return false;
        }
        let path = paths.plan_path(tile, &self.reachable);
        let Some(unit) = world.roster.get_mut(id) else {
            return false;
        };
        if !unit.set_move(path) {
            return false;
        }
        self.clear_targets();
        true
    }

    // ===== targeting =====

    /// Switches the moved unit to attack targeting from where it stands.
    pub fn target_attacks(&mut self, world: &mut World, ranges: &dyn RangeCalculator) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(unit) = world.roster.get(id) else {
            return false;
        };
        let targets = attack_targets(world, unit, ranges);
        if targets.is_empty() {
            return false;
        }
        let Some(unit) = world.roster.get_mut(id) else {
            return false;
        };
        if !unit.choose_target() {
            return false;
        }
        self.clear_targets();
        self.attackable = targets;
        true
    }

    /// Switches the moved unit to interaction targeting.
    pub fn target_interactions(&mut self, world: &mut World) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        let Some(unit) = world.roster.get(id) else {
            return false;
        };
        let targets = interaction_targets(world, unit);
        if targets.is_empty() {
            return false;
        }
        let Some(unit) = world.roster.get_mut(id) else {
            return false;
        };
        if !unit.choose_target() {
            return false;
        }
        self.clear_targets();
        self.interactable = targets;
        true
    }

    /// Leaves attack or interaction targeting; the unit goes back to waiting
    /// for an action.
    pub fn cancel_targeting(&mut self, world: &mut World) -> bool {
        if self.attackable.is_empty() && self.interactable.is_empty() {
            return false;
        }
        if let Some(unit) = self.selected.and_then(|id| world.roster.get_mut(id)) {
            unit.cancel_interaction();
        }
        self.attackable.clear();
        self.interactable.clear();
        true
    }

    /// Attacks the unit on `tile`, applies the damage, removes whoever was
    /// defeated and ends the attacker's turn.
    pub fn resolve_attack(
        &mut self,
        tile: Position,
        world: &mut World,
        combat: &dyn CombatResolver,
    ) -> Option<DuelReport> {
        let attacker_id = self.selected?;
        if !self.attackable.contains(&tile) {
            return None;
        }
        let attacker = world.roster.get(attacker_id)?;
        let defender = world.roster.unit_at(tile)?;
        let (allies, enemies): (Vec<&Unit>, Vec<&Unit>) = world
            .roster
            .iter()
            .filter(|unit| unit.can_move() && unit.is_alive())
            .partition(|unit| !unit.side.is_hostile_to(attacker.side));
        let outcome =
            combat.resolve_duel(attacker, defender, &allies, &enemies, attacker.attack_kind);
        let defender_id = defender.id;

        let (attacker, defender) = world.roster.pair_mut(attacker_id, defender_id)?;
        defender.hp.drain(outcome.damage);
        if defender.is_alive() {
            attacker.hp.drain(outcome.counter_damage);
        }
        attacker.end_turn();
        let defender_defeated = !defender.is_alive();
        let attacker_defeated = !attacker.is_alive();
        if defender_defeated {
            world.roster.remove(defender_id);
        }
        if attacker_defeated {
            world.roster.remove(attacker_id);
        }

        self.clear_selection();
        Some(DuelReport {
            attacker: attacker_id,
            defender: defender_id,
            outcome,
            defender_defeated,
            attacker_defeated,
        })
    }

    /// Interacts with the unit on `tile` and applies the outcome.
    ///
    /// Looting, opening a door and talking are irreversible: the move can no
    /// longer be cancelled afterwards. Everything else returns the actor to
    /// waiting for an action.
    pub fn resolve_interact(
        &mut self,
        tile: Position,
        world: &mut World,
        interactions: &dyn InteractionResolver,
    ) -> Option<InteractionReport> {
        let actor_id = self.selected?;
        if !self.interactable.contains(&tile) {
            return None;
        }
        let actor = world.roster.get(actor_id)?;
        let target = world.roster.unit_at(tile)?;
        let outcome = interactions.resolve_interaction(actor, target, tile);
        let target_id = target.id;
        self.interactable.clear();

        let mut looted = Vec::new();
        let mut gold = 0;
        let mut key_error = None;
        match &outcome {
            InteractionOutcome::Loot => {
                let (actor, chest) = world.roster.pair_mut(actor_id, target_id)?;
                for item in chest.inventory.drain() {
                    let id = item.id;
                    match actor.inventory.add(item.clone()) {
                        Ok(()) => looted.push(id),
                        Err(_) => chest.inventory.restore(item),
                    }
                }
                gold = std::mem::take(&mut chest.gold);
                actor.gold += gold;
                actor.settle();
            }
            InteractionOutcome::OpenDoor { key } => {
                let actor = world.roster.get_mut(actor_id)?;
                if let Some(key) = key {
                    key_error = actor.inventory.remove(*key).err();
                }
                actor.settle();
                world.roster.remove(target_id);
            }
            InteractionOutcome::Talk { .. } => world.roster.get_mut(actor_id)?.settle(),
            InteractionOutcome::Locked | InteractionOutcome::Trade | InteractionOutcome::Nothing => {
                world.roster.get_mut(actor_id)?.cancel_interaction();
            }
        }
        let report = InteractionReport {
            actor: actor_id,
            target: target_id,
            outcome,
            looted,
            gold,
            key_error,
        };
        Some(report)
    }

    // ===== watch =====

    /// Previews the ranges of any movable unit. Refused while a unit is
    /// selected.
    pub fn watch(
        &mut self,
        unit: &Unit,
        world: &World,
        ranges: &dyn RangeCalculator,
        gate: InputGate,
    ) -> bool {
        if !gate.is_open() || self.selected.is_some() || !unit.can_move() {
            return false;
        }
        self.clear_targets();
        self.watched = Some(unit.id);
        // Base movement only: alterations are not part of the preview.
        self.reachable = ranges.compute_reachable(world, unit.position, unit.max_moves);
        if unit.can_attack() {
            let tiles =
                ranges.compute_attackable(world, &self.reachable, unit.reach(), unit.is_character());
            self.attackable = hostile_tiles(world, unit.side, tiles);
        }
        true
    }

    pub fn stop_watching(&mut self) {
        if self.watched.take().is_some() {
            self.clear_targets();
        }
    }

    // ===== placement =====

    /// Moves the selected unit onto a placement tile, swapping with whoever
    /// stands there.
    pub fn place(&mut self, tile: Position, world: &mut World) -> bool {
        let Some(id) = self.selected else {
            return false;
        };
        if !self.placement || !world.placements.contains(&tile) {
            return false;
        }
        let Some(current) = world.roster.get(id).map(|unit| unit.position) else {
            return false;
        };
        if current == tile {
            return false;
        }
        if let Some(occupant) = world.roster.unit_at(tile).map(|unit| unit.id) {
            if let Some(occupant) = world.roster.get_mut(occupant) {
                occupant.position = current;
            }
        }
        if let Some(unit) = world.roster.get_mut(id) {
            unit.position = tile;
        }
        true
    }

    fn clear_targets(&mut self) {
        self.reachable.clear();
        self.attackable.clear();
        self.interactable.clear();
    }
}

/// Hostile units `unit` could hit without moving.
pub fn attack_targets(world: &World, unit: &Unit, ranges: &dyn RangeCalculator) -> TileSet {
    if !unit.can_attack() {
        return TileSet::new();
    }
    let standing = ReachableTiles::from([(unit.position, 0)]);
    let tiles = ranges.compute_attackable(world, &standing, unit.reach(), unit.is_character());
    hostile_tiles(world, unit.side, tiles)
}

/// Tiles of fixtures and fellow characters within interaction range.
pub fn interaction_targets(world: &World, unit: &Unit) -> TileSet {
    let range = world.config.interaction_range;
    world
        .roster
        .iter()
        .filter(|other| other.id != unit.id)
        .filter(|other| !other.can_move() || (other.is_character() && other.side == unit.side))
        .filter(|other| other.is_interactive())
        .filter(|other| {
            let distance = other.position.distance(unit.position);
            distance > 0 && distance <= range
        })
        .map(|other| other.position)
        .collect()
}

fn hostile_tiles(world: &World, side: Side, tiles: TileSet) -> TileSet {
    tiles
        .into_iter()
        .filter(|tile| world.hostile_at(*tile, side))
        .collect()
}
