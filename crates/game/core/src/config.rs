/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Distance (in tiles) at which a unit can interact with chests, doors,
    /// NPCs and fellow characters.
    pub interaction_range: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of distinct attack distances a unit or weapon may list.
    pub const MAX_REACH: usize = 4;
    /// Inventory capacity for every unit (fixtures included).
    pub const MAX_INVENTORY_SLOTS: usize = 8;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INTERACTION_RANGE: u32 = 1;

    pub fn new() -> Self {
        Self {
            interaction_range: Self::DEFAULT_INTERACTION_RANGE,
        }
    }

    pub fn with_interaction_range(interaction_range: u32) -> Self {
        Self { interaction_range }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
