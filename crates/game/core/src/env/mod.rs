//! Collaborators the selection rules call into.
//!
//! Each concern the rules need but do not own (range computation, path
//! planning, duel resolution, interaction resolution, hit-testing) is a small
//! trait. Hosts can swap in their own implementation; the default grid-based
//! ones live next to the traits and are bundled by
//! [`Collaborators::standard`].
mod combat;
mod grid;
mod hit;
mod interaction;

pub use combat::{DuelOutcome, StandardDuel};
pub use grid::{GridNavigator, has_line_of_sight};
pub use hit::TileHitTest;
pub use interaction::{InteractionOutcome, StandardInteractions};

use crate::state::{AttackKind, Position, ReachableTiles, TileSet, Unit, World};

/// Movement and attack range computation.
pub trait RangeCalculator {
    /// Tiles reachable from `origin` within `budget` steps, origin included.
    fn compute_reachable(&self, world: &World, origin: Position, budget: u32) -> ReachableTiles;

    /// Tiles lying at one of the `reach` distances from any reachable tile.
    fn compute_attackable(
        &self,
        world: &World,
        reachable: &ReachableTiles,
        reach: &[u32],
        requires_line_of_sight: bool,
    ) -> TileSet;
}

pub trait PathPlanner {
    /// Ordered path from the origin of `reachable` to `destination`, both
    /// included. Empty when the destination is not reachable.
    fn plan_path(&self, destination: Position, reachable: &ReachableTiles) -> Vec<Position>;
}

pub trait CombatResolver {
    fn resolve_duel(
        &self,
        attacker: &Unit,
        defender: &Unit,
        allies: &[&Unit],
        enemies: &[&Unit],
        kind: AttackKind,
    ) -> DuelOutcome;
}

pub trait InteractionResolver {
    fn resolve_interaction(&self, actor: &Unit, target: &Unit, tile: Position)
    -> InteractionOutcome;
}

/// Containment test between a unit and a point in board coordinates.
pub trait HitTest {
    fn hit(&self, unit: &Unit, point: Position) -> bool;
}

/// Owned bundle of every collaborator.
pub struct Collaborators {
    pub ranges: Box<dyn RangeCalculator>,
    pub paths: Box<dyn PathPlanner>,
    pub combat: Box<dyn CombatResolver>,
    pub interactions: Box<dyn InteractionResolver>,
    pub hit_test: Box<dyn HitTest>,
}

impl Collaborators {
    /// Grid-based defaults for every collaborator.
    pub fn standard() -> Self {
        Self {
            ranges: Box::new(GridNavigator),
            paths: Box::new(GridNavigator),
            combat: Box::new(StandardDuel),
            interactions: Box::new(StandardInteractions),
            hit_test: Box::new(TileHitTest),
        }
    }

    pub fn with_combat(mut self, combat: impl CombatResolver + 'static) -> Self {
        self.combat = Box::new(combat);
        self
    }

    pub fn with_interactions(mut self, interactions: impl InteractionResolver + 'static) -> Self {
        self.interactions = Box::new(interactions);
        self
    }

    pub fn with_hit_test(mut self, hit_test: impl HitTest + 'static) -> Self {
        self.hit_test = Box::new(hit_test);
        self
    }
}

impl Default for Collaborators {
    fn default() -> Self {
        Self::standard()
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators").finish_non_exhaustive()
    }
}
