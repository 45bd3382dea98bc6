//! Units on the board: playable characters, creatures and fixtures.
//!
//! Capability checks go through [`UnitKind::capabilities`] instead of
//! inspecting concrete types, so the router asks `can_move()` /
//! `can_attack()` and never cares which variant it holds.

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::config::GameConfig;

use super::common::{EntityId, Position, ResourceMeter};
use super::inventory::{Equipment, Inventory};
use super::item::ItemKind;

/// Attack distances supported by a unit or weapon.
pub type Reach = ArrayVec<u32, { GameConfig::MAX_REACH }>;

/// Faction a unit fights for; also identifies whose turn it is.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Side {
    Player,
    Ally,
    Foe,
}

impl Side {
    /// Side that plays after this one.
    pub fn next(self) -> Side {
        match self {
            Side::Player => Side::Ally,
            Side::Ally => Side::Foe,
            Side::Foe => Side::Player,
        }
    }

    /// Players and allies fight foes; nobody else is hostile.
    pub fn is_hostile_to(self, other: Side) -> bool {
        matches!(
            (self, other),
            (Side::Foe, Side::Player | Side::Ally) | (Side::Player | Side::Ally, Side::Foe)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum FixtureKind {
    Chest,
    Door { locked: bool },
    Npc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitKind {
    /// Playable character: moves, fights, trades, needs line of sight.
    Character,
    /// Movable combatant without an inventory screen (monsters, guards).
    Creature,
    /// Static interaction target.
    Fixture(FixtureKind),
}

bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        const MOVABLE = 1 << 0;
        const ATTACKER = 1 << 1;
        const CHARACTER = 1 << 2;
        const INTERACTIVE = 1 << 3;
    }
}

impl UnitKind {
    pub fn capabilities(self) -> Capabilities {
        match self {
            UnitKind::Character => Capabilities::all(),
            UnitKind::Creature => Capabilities::MOVABLE | Capabilities::ATTACKER,
            UnitKind::Fixture(_) => Capabilities::INTERACTIVE,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AttackKind {
    /// Mitigated by defense.
    #[default]
    Physical,
    /// Mitigated by resistance.
    Spiritual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Stat {
    Speed,
    Attack,
    Defense,
}

/// Temporary stat change (buff or debuff) lasting a number of turns.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Alteration {
    pub name: String,
    pub stat: Stat,
    pub amount: i32,
    pub turns: u32,
}

impl Alteration {
    pub fn new(name: impl Into<String>, stat: Stat, amount: i32, turns: u32) -> Self {
        Self {
            name: name.into(),
            stat,
            amount,
            turns,
        }
    }
}

/// Per-turn progress of a unit.
///
/// `origin` remembers where the unit stood before moving so a move can be
/// cancelled; `cancellable` turns false once something irreversible happened
/// after the move (a chest was opened, a door unlocked).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum UnitTurnState {
    #[default]
    Waiting,
    Moving {
        origin: Position,
        path: Vec<Position>,
    },
    PostAction {
        origin: Position,
        cancellable: bool,
    },
    Targeting {
        origin: Position,
        cancellable: bool,
    },
    Finished,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Unit {
    pub id: EntityId,
    pub name: String,
    pub side: Side,
    pub kind: UnitKind,
    pub position: Position,
    pub max_moves: u32,
    pub hp: ResourceMeter,
    pub attack: u32,
    pub defense: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub resistance: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reach: Reach,
    #[cfg_attr(feature = "serde", serde(default))]
    pub attack_kind: AttackKind,
    #[cfg_attr(feature = "serde", serde(default))]
    pub inventory: Inventory,
    #[cfg_attr(feature = "serde", serde(default))]
    pub equipment: Equipment,
    /// Signed so that trade rollback never has to clamp.
    #[cfg_attr(feature = "serde", serde(default))]
    pub gold: i64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub alterations: Vec<Alteration>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub skills: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dialogue: Vec<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub turn: UnitTurnState,
}

impl Unit {
    pub fn new(
        id: EntityId,
        name: impl Into<String>,
        side: Side,
        kind: UnitKind,
        position: Position,
    ) -> Self {
        let combatant = kind.capabilities().contains(Capabilities::ATTACKER);
        let mut reach = Reach::new();
        if combatant {
            reach.push(1);
        }
        Self {
            id,
            name: name.into(),
            side,
            kind,
            position,
            max_moves: if combatant { 3 } else { 0 },
            hp: ResourceMeter::full(10),
            attack: if combatant { 3 } else { 0 },
            defense: 0,
            resistance: 0,
            reach,
            attack_kind: AttackKind::Physical,
            inventory: Inventory::empty(),
            equipment: Equipment::empty(),
            gold: 0,
            alterations: Vec::new(),
            skills: Vec::new(),
            dialogue: Vec::new(),
            turn: UnitTurnState::Waiting,
        }
    }

    pub fn character(id: EntityId, name: impl Into<String>, position: Position) -> Self {
        Self::new(id, name, Side::Player, UnitKind::Character, position)
    }

    pub fn creature(id: EntityId, name: impl Into<String>, side: Side, position: Position) -> Self {
        Self::new(id, name, side, UnitKind::Creature, position)
    }

    /// Fixtures never take turns; they are listed on the ally side.
    pub fn fixture(
        id: EntityId,
        name: impl Into<String>,
        kind: FixtureKind,
        position: Position,
    ) -> Self {
        Self::new(id, name, Side::Ally, UnitKind::Fixture(kind), position)
    }

    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_reach(mut self, distances: &[u32]) -> Self {
        self.reach = distances
            .iter()
            .copied()
            .take(GameConfig::MAX_REACH)
            .collect();
        self
    }

    pub fn with_combat(mut self, hp: u32, attack: u32, defense: u32) -> Self {
        self.hp = ResourceMeter::full(hp);
        self.attack = attack;
        self.defense = defense;
        self
    }

    pub fn with_gold(mut self, gold: i64) -> Self {
        self.gold = gold;
        self
    }

    pub fn with_inventory(mut self, inventory: Inventory) -> Self {
        self.inventory = inventory;
        self
    }

    pub fn with_alteration(mut self, alteration: Alteration) -> Self {
        self.alterations.push(alteration);
        self
    }

    pub fn with_dialogue(mut self, lines: Vec<String>) -> Self {
        self.dialogue = lines;
        self
    }

    // ===== capabilities =====

    pub fn capabilities(&self) -> Capabilities {
        self.kind.capabilities()
    }

    pub fn can_move(&self) -> bool {
        self.capabilities().contains(Capabilities::MOVABLE)
    }

    pub fn can_attack(&self) -> bool {
        self.capabilities().contains(Capabilities::ATTACKER) && !self.reach().is_empty()
    }

    pub fn is_character(&self) -> bool {
        self.capabilities().contains(Capabilities::CHARACTER)
    }

    pub fn is_interactive(&self) -> bool {
        self.capabilities().contains(Capabilities::INTERACTIVE)
    }

    // ===== derived stats =====

    /// Sum of every active alteration on `stat`.
    pub fn stat_change(&self, stat: Stat) -> i32 {
        self.alterations
            .iter()
            .filter(|alteration| alteration.stat == stat)
            .map(|alteration| alteration.amount)
            .sum()
    }

    /// Tiles this unit may walk this turn: `max_moves` plus speed alterations.
    pub fn movement_budget(&self) -> u32 {
        apply_change(self.max_moves, self.stat_change(Stat::Speed))
    }

    /// Attack distances; an equipped weapon overrides the natural reach.
    pub fn reach(&self) -> &[u32] {
        match self.equipment.weapon.as_ref().map(|item| &item.kind) {
            Some(ItemKind::Weapon { reach, .. }) if !reach.is_empty() => reach.as_slice(),
            _ => self.reach.as_slice(),
        }
    }

    pub fn attack_power(&self) -> u32 {
        let weapon = match self.equipment.weapon.as_ref().map(|item| &item.kind) {
            Some(ItemKind::Weapon { attack, .. }) => *attack,
            _ => 0,
        };
        apply_change(self.attack + weapon, self.stat_change(Stat::Attack))
    }

    pub fn defense_power(&self) -> u32 {
        let armor = match self.equipment.armor.as_ref().map(|item| &item.kind) {
            Some(ItemKind::Armor { defense }) => *defense,
            _ => 0,
        };
        apply_change(self.defense + armor, self.stat_change(Stat::Defense))
    }

    pub fn is_alive(&self) -> bool {
        !self.hp.is_depleted()
    }

    // ===== turn progression =====

    pub fn turn_is_finished(&self) -> bool {
        matches!(self.turn, UnitTurnState::Finished)
    }

    pub fn has_moved(&self) -> bool {
        !matches!(self.turn, UnitTurnState::Waiting)
    }

    pub fn is_awaiting_action(&self) -> bool {
        matches!(self.turn, UnitTurnState::PostAction { .. })
    }

    /// Starts walking along `path`. Only a unit that has not moved yet may.
    pub fn set_move(&mut self, path: Vec<Position>) -> bool {
        if path.is_empty() || !matches!(self.turn, UnitTurnState::Waiting) {
            return false;
        }
        self.turn = UnitTurnState::Moving {
            origin: self.position,
            path,
        };
        true
    }

    /// Lands on the last tile of the current path.
    pub fn complete_move(&mut self) -> bool {
        let UnitTurnState::Moving { origin, path } = &self.turn else {
            return false;
        };
        let (origin, destination) = (*origin, path.last().copied());
        if let Some(destination) = destination {
            self.position = destination;
        }
        self.turn = UnitTurnState::PostAction {
            origin,
            cancellable: true,
        };
        true
    }

    pub fn choose_target(&mut self) -> bool {
        let UnitTurnState::PostAction {
            origin,
            cancellable,
        } = self.turn
        else {
            return false;
        };
        self.turn = UnitTurnState::Targeting {
            origin,
            cancellable,
        };
        true
    }

    pub fn cancel_interaction(&mut self) -> bool {
        let UnitTurnState::Targeting {
            origin,
            cancellable,
        } = self.turn
        else {
            return false;
        };
        self.turn = UnitTurnState::PostAction {
            origin,
            cancellable,
        };
        true
    }

    /// Returns to the post-move state and forbids cancelling the move from now on.
    pub fn settle(&mut self) {
        if let UnitTurnState::PostAction { origin, .. } | UnitTurnState::Targeting { origin, .. } =
            self.turn
        {
            self.turn = UnitTurnState::PostAction {
                origin,
                cancellable: false,
            };
        }
    }

    /// Walks the unit back to where it started this turn.
    ///
    /// Fails once the turn is over, before any move was made, or after an
    /// irreversible interaction.
    pub fn cancel_move(&mut self) -> bool {
        let origin = match &self.turn {
            UnitTurnState::Moving { origin, .. } => *origin,
            UnitTurnState::PostAction {
                origin,
                cancellable: true,
            }
            | UnitTurnState::Targeting {
                origin,
                cancellable: true,
            } => *origin,
            _ => return false,
        };
        self.position = origin;
        self.turn = UnitTurnState::Waiting;
        true
    }

    pub fn end_turn(&mut self) {
        self.turn = UnitTurnState::Finished;
    }

    /// Resets turn progress and ages alterations by one turn.
    pub fn new_turn(&mut self) {
        self.turn = UnitTurnState::Waiting;
        for alteration in &mut self.alterations {
            alteration.turns = alteration.turns.saturating_sub(1);
        }
        self.alterations.retain(|alteration| alteration.turns > 0);
    }
}

fn apply_change(base: u32, change: i32) -> u32 {
    (i64::from(base) + i64::from(change)).clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::item::{Item, ItemId};

    fn hero() -> Unit {
        Unit::character(EntityId(1), "Raimund", Position::new(2, 2))
    }

    #[test]
    fn capabilities_follow_kind() {
        let chest = Unit::fixture(EntityId(9), "Chest", FixtureKind::Chest, Position::ORIGIN);
        assert!(!chest.can_move());
        assert!(!chest.can_attack());
        assert!(chest.is_interactive());

        let goblin = Unit::creature(EntityId(2), "Goblin", Side::Foe, Position::ORIGIN);
        assert!(goblin.can_move());
        assert!(goblin.can_attack());
        assert!(!goblin.is_character());

        assert!(!hero().with_reach(&[]).can_attack());
    }

    #[test]
    fn speed_alteration_changes_budget() {
        let quick = hero()
            .with_max_moves(3)
            .with_alteration(Alteration::new("Haste", Stat::Speed, 2, 1));
        assert_eq!(quick.movement_budget(), 5);

        let slowed = hero()
            .with_max_moves(1)
            .with_alteration(Alteration::new("Mud", Stat::Speed, -4, 1));
        assert_eq!(slowed.movement_budget(), 0);
    }

    #[test]
    fn weapon_reach_overrides_natural_reach() {
        let mut archer = hero().with_reach(&[1]);
        let bow = Item::new(
            ItemId(1),
            "Bow",
            ItemKind::Weapon {
                attack: 2,
                reach: [2, 3].into_iter().collect(),
            },
        );
        archer.equipment.equip(bow).unwrap();
        assert_eq!(archer.reach(), &[2, 3]);
        assert_eq!(archer.attack_power(), 5);
    }

    #[test]
    fn cancel_move_restores_origin() {
        let mut unit = hero();
        assert!(unit.set_move(vec![Position::new(2, 2), Position::new(3, 2)]));
        assert!(unit.complete_move());
        assert_eq!(unit.position, Position::new(3, 2));

        assert!(unit.cancel_move());
        assert_eq!(unit.position, Position::new(2, 2));
        assert_eq!(unit.turn, UnitTurnState::Waiting);
        assert!(!unit.cancel_move());
    }

    #[test]
    fn settled_move_cannot_be_cancelled() {
        let mut unit = hero();
        unit.set_move(vec![Position::new(2, 3)]);
        unit.complete_move();
        assert!(unit.choose_target());
        unit.settle();
        assert!(!unit.cancel_move());
        assert_eq!(unit.position, Position::new(2, 3));
    }

    #[test]
    fn new_turn_expires_alterations() {
        let mut unit = hero()
            .with_alteration(Alteration::new("Haste", Stat::Speed, 1, 1))
            .with_alteration(Alteration::new("Guard", Stat::Defense, 2, 3));
        unit.end_turn();
        unit.new_turn();
        assert_eq!(unit.turn, UnitTurnState::Waiting);
        assert_eq!(unit.alterations.len(), 1);
        assert_eq!(unit.stat_change(Stat::Defense), 2);
    }

    #[test]
    fn hostility_is_symmetric() {
        assert!(Side::Player.is_hostile_to(Side::Foe));
        assert!(Side::Foe.is_hostile_to(Side::Ally));
        assert!(!Side::Player.is_hostile_to(Side::Ally));
        assert!(!Side::Foe.is_hostile_to(Side::Foe));
        assert_eq!(Side::Foe.next(), Side::Player);
    }
}
