use crate::state::{Position, Unit};

use super::HitTest;

/// Hits a unit when the point is the tile it stands on.
#[derive(Clone, Copy, Debug, Default)]
pub struct TileHitTest;

impl HitTest for TileHitTest {
    fn hit(&self, unit: &Unit, point: Position) -> bool {
        unit.position == point
    }
}
