//! Breadth-first movement ranges and back-tracking path planning on the
//! orthogonal grid.

use crate::state::{CardinalDirection, Position, ReachableTiles, TileSet, World};

use super::{PathPlanner, RangeCalculator};

/// Default [`RangeCalculator`] and [`PathPlanner`].
///
/// Units cannot walk through walls or through other units; attack ranges
/// ignore units but may require a clear line of sight past walls.
#[derive(Clone, Copy, Debug, Default)]
pub struct GridNavigator;

impl RangeCalculator for GridNavigator {
    fn compute_reachable(&self, world: &World, origin: Position, budget: u32) -> ReachableTiles {
        let mut reachable = ReachableTiles::new();
        reachable.insert(origin, 0);

        let mut frontier = vec![origin];
        for step in 1..=budget {
            let mut next = Vec::new();
            for tile in frontier {
                for neighbor in tile.neighbors() {
                    if reachable.contains_key(&neighbor) || !world.is_free(neighbor) {
                        continue;
                    }
                    reachable.insert(neighbor, step);
                    next.push(neighbor);
                }
            }
            if next.is_empty() {
                break;
            }
            frontier = next;
        }
        reachable
    }

    fn compute_attackable(
        &self,
        world: &World,
        reachable: &ReachableTiles,
        reach: &[u32],
        requires_line_of_sight: bool,
    ) -> TileSet {
        let mut attackable = TileSet::new();
        for &from in reachable.keys() {
            for &distance in reach {
                for target in ring(from, distance) {
                    if !world.board.contains(target) {
                        continue;
                    }
                    if requires_line_of_sight
                        && distance > 1
                        && !has_line_of_sight(world, from, target)
                    {
                        continue;
                    }
                    attackable.insert(target);
                }
            }
        }
        attackable
    }
}

impl PathPlanner for GridNavigator {
    fn plan_path(&self, destination: Position, reachable: &ReachableTiles) -> Vec<Position> {
        let Some(&steps) = reachable.get(&destination) else {
            return Vec::new();
        };

        let mut path = vec![destination];
        let mut current = destination;
        for remaining in (0..steps).rev() {
            let previous = CardinalDirection::ALL
                .iter()
                .map(|&direction| current.step(direction))
                .find(|tile| reachable.get(tile) == Some(&remaining));
            match previous {
                Some(tile) => {
                    path.push(tile);
                    current = tile;
                }
                None => return Vec::new(),
            }
        }
        path.reverse();
        path
    }
}

/// Tiles at exactly `distance` from `center` (Manhattan ring).
fn ring(center: Position, distance: u32) -> Vec<Position> {
    if distance == 0 {
        return vec![center];
    }
    let d = distance as i32;
    let mut tiles = Vec::with_capacity(4 * distance as usize);
    for dx in -d..=d {
        let dy = d - dx.abs();
        tiles.push(Position::new(center.x + dx, center.y + dy));
        if dy != 0 {
            tiles.push(Position::new(center.x + dx, center.y - dy));
        }
    }
    tiles
}

/// True when no wall lies strictly between `from` and `to` (Bresenham line).
pub fn has_line_of_sight(world: &World, from: Position, to: Position) -> bool {
    let (dx, dy) = ((to.x - from.x).abs(), -(to.y - from.y).abs());
    let (sx, sy) = ((to.x - from.x).signum(), (to.y - from.y).signum());
    let mut error = dx + dy;
    let mut current = from;

    while current != to {
        let doubled = 2 * error;
        if doubled >= dy {
            error += dy;
            current.x += sx;
        }
        if doubled <= dx {
            error += dx;
            current.y += sy;
        }
        if current != to && world.board.walls.contains(&current) {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Board, EntityId, Side, Unit};

    fn open_world(width: u32, height: u32) -> World {
        World::new(Board::new(width, height), Vec::new(), TileSet::new()).unwrap()
    }

    #[test]
    fn reachable_is_a_diamond_on_an_open_board() {
        let world = open_world(11, 11);
        let origin = Position::new(5, 5);
        let reachable = GridNavigator.compute_reachable(&world, origin, 3);

        assert_eq!(reachable.len(), 25);
        assert_eq!(reachable.get(&origin), Some(&0));
        for (tile, steps) in &reachable {
            assert_eq!(tile.distance(origin), *steps);
            assert!(*steps <= 3);
        }
    }

    #[test]
    fn reachable_is_clipped_by_board_edges() {
        let world = open_world(8, 8);
        let origin = Position::new(2, 2);
        let reachable = GridNavigator.compute_reachable(&world, origin, 3);

        // the two diamond tips at x = -1 and y = -1 fall off the board
        assert_eq!(reachable.len(), 23);
        assert!(reachable.keys().all(|tile| tile.distance(origin) <= 3));
        assert!(!reachable.contains_key(&Position::new(-1, 2)));
    }

    #[test]
    fn walls_and_units_block_movement() {
        let board = Board::new(5, 1).with_walls([Position::new(3, 0)]);
        let units = vec![Unit::creature(
            EntityId(1),
            "Goblin",
            Side::Foe,
            Position::new(1, 0),
        )];
        let world = World::new(board, units, TileSet::new()).unwrap();

        let reachable = GridNavigator.compute_reachable(&world, Position::new(2, 0), 4);
        let tiles: Vec<_> = reachable.keys().copied().collect();
        assert_eq!(tiles, vec![Position::new(2, 0)]);
    }

    #[test]
    fn path_walks_back_to_origin() {
        let world = open_world(6, 6);
        let origin = Position::new(0, 0);
        let reachable = GridNavigator.compute_reachable(&world, origin, 4);

        let path = GridNavigator.plan_path(Position::new(2, 2), &reachable);
        assert_eq!(path.len(), 5);
        assert_eq!(path.first(), Some(&origin));
        assert_eq!(path.last(), Some(&Position::new(2, 2)));
        for pair in path.windows(2) {
            assert_eq!(pair[0].distance(pair[1]), 1);
        }

        assert!(
            GridNavigator
                .plan_path(Position::new(5, 5), &reachable)
                .is_empty()
        );
    }

    #[test]
    fn attackable_rings_respect_reach() {
        let world = open_world(9, 9);
        let mut reachable = ReachableTiles::new();
        reachable.insert(Position::new(4, 4), 0);

        let melee = GridNavigator.compute_attackable(&world, &reachable, &[1], true);
        assert_eq!(melee.len(), 4);

        let bow = GridNavigator.compute_attackable(&world, &reachable, &[2], false);
        assert_eq!(bow.len(), 8);
        assert!(bow.iter().all(|tile| tile.distance(Position::new(4, 4)) == 2));
    }

    #[test]
    fn walls_block_line_of_sight_for_ranged_attacks() {
        let board = Board::new(5, 1).with_walls([Position::new(1, 0)]);
        let world = World::new(board, Vec::new(), TileSet::new()).unwrap();
        let mut reachable = ReachableTiles::new();
        reachable.insert(Position::new(0, 0), 0);

        assert!(!has_line_of_sight(&world, Position::new(0, 0), Position::new(2, 0)));
        let blocked = GridNavigator.compute_attackable(&world, &reachable, &[2], true);
        assert!(!blocked.contains(&Position::new(2, 0)));
        let lobbed = GridNavigator.compute_attackable(&world, &reachable, &[2], false);
        assert!(lobbed.contains(&Position::new(2, 0)));
    }
}
