//! Duel resolution between two units.

use crate::state::{AttackKind, Unit};

use super::CombatResolver;

// ============================================================================
// Duel Outcome
// ============================================================================

/// Hit points each side loses in a single exchange.
///
/// `counter_damage` is zero when the defender cannot answer (defeated, out of
/// reach, or unable to attack at all).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DuelOutcome {
    pub damage: u32,
    pub counter_damage: u32,
}

// ============================================================================
// Standard Duel
// ============================================================================

/// Default [`CombatResolver`].
///
/// # Formula
///
/// ```text
/// mitigation = defense (physical) | resistance (spiritual)
/// damage     = max(attack - mitigation + flankers, 1)
/// counter    = max(defender_attack - attacker_defense + surrounders, 1)
/// ```
///
/// `flankers` counts the attacker's allies adjacent to the defender;
/// `surrounders` counts the defender's allies adjacent to the attacker.
/// The counter only happens if the defender survives and the attacker
/// stands at one of its reach distances.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardDuel;

impl CombatResolver for StandardDuel {
    fn resolve_duel(
        &self,
        attacker: &Unit,
        defender: &Unit,
        allies: &[&Unit],
        enemies: &[&Unit],
        kind: AttackKind,
    ) -> DuelOutcome {
        let mitigation = match kind {
            AttackKind::Physical => defender.defense_power(),
            AttackKind::Spiritual => defender.resistance,
        };
        let flankers = adjacent_count(allies, defender, attacker);
        let damage = (attacker.attack_power().saturating_sub(mitigation) + flankers).max(1);

        let distance = attacker.position.distance(defender.position);
        let survives = damage < defender.hp.current;
        let answers = defender.can_attack() && defender.reach().contains(&distance);
        let counter_damage = if survives && answers {
            let surrounders = adjacent_count(enemies, attacker, defender);
            (defender
                .attack_power()
                .saturating_sub(attacker.defense_power())
                + surrounders)
                .max(1)
        } else {
            0
        };

        DuelOutcome {
            damage,
            counter_damage,
        }
    }
}

/// Units of `group` next to `target`, not counting `excluded`.
fn adjacent_count(group: &[&Unit], target: &Unit, excluded: &Unit) -> u32 {
    group
        .iter()
        .filter(|unit| unit.id != excluded.id && unit.id != target.id)
        .filter(|unit| unit.is_alive() && unit.position.distance(target.position) == 1)
        .count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EntityId, Position, Side};

    fn knight(id: u32, x: i32, y: i32) -> Unit {
        Unit::character(EntityId(id), "Knight", Position::new(x, y)).with_combat(10, 5, 1)
    }

    fn goblin(id: u32, x: i32, y: i32) -> Unit {
        Unit::creature(EntityId(id), "Goblin", Side::Foe, Position::new(x, y)).with_combat(8, 3, 2)
    }

    #[test]
    fn plain_exchange() {
        let attacker = knight(1, 0, 0);
        let defender = goblin(2, 1, 0);
        let outcome = StandardDuel.resolve_duel(
            &attacker,
            &defender,
            &[&attacker],
            &[&defender],
            AttackKind::Physical,
        );
        assert_eq!(
            outcome,
            DuelOutcome {
                damage: 3,
                counter_damage: 2
            }
        );
    }

    #[test]
    fn damage_never_drops_below_one() {
        let attacker = knight(1, 0, 0).with_combat(10, 1, 0);
        let defender = goblin(2, 1, 0).with_combat(8, 3, 9);
        let outcome =
            StandardDuel.resolve_duel(&attacker, &defender, &[], &[], AttackKind::Physical);
        assert_eq!(outcome.damage, 1);
    }

    #[test]
    fn spiritual_attacks_use_resistance() {
        let attacker = knight(1, 0, 0);
        let mut defender = goblin(2, 1, 0);
        defender.resistance = 4;
        let outcome =
            StandardDuel.resolve_duel(&attacker, &defender, &[], &[], AttackKind::Spiritual);
        assert_eq!(outcome.damage, 1);
    }

    #[test]
    fn flanking_and_surrounding_add_damage() {
        let attacker = knight(1, 1, 1);
        let flanker = knight(3, 3, 1);
        let defender = goblin(2, 2, 1);
        let surrounder = goblin(4, 1, 0);
        let outcome = StandardDuel.resolve_duel(
            &attacker,
            &defender,
            &[&attacker, &flanker],
            &[&defender, &surrounder],
            AttackKind::Physical,
        );
        assert_eq!(outcome.damage, 4);
        assert_eq!(outcome.counter_damage, 3);
    }

    #[test]
    fn no_counter_out_of_reach_or_when_defeated() {
        let archer = knight(1, 0, 0).with_reach(&[2]);
        let defender = goblin(2, 2, 0);
        let ranged =
            StandardDuel.resolve_duel(&archer, &defender, &[], &[], AttackKind::Physical);
        assert_eq!(ranged.counter_damage, 0);

        let brute = knight(1, 1, 0).with_combat(10, 20, 0);
        let lethal = StandardDuel.resolve_duel(&brute, &defender, &[], &[], AttackKind::Physical);
        assert_eq!(lethal.counter_damage, 0);
    }
}
