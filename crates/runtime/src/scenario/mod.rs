//! Scenario files: the board, its units and the level's opening text.
//!
//! A scenario is everything needed to build an
//! [`InteractionRouter`](crate::router::InteractionRouter) before the first input arrives:
//! terrain, roster, placement tiles and the phase the level starts in.
//! Scenarios are JSON documents.

use std::path::{Path, PathBuf};

use game_core::{Board, Phase, Position, TurnContext, Unit, World, WorldError};
use serde::{Deserialize, Serialize};

use crate::config::RouterConfig;
use crate::router::RouterBuilder;

#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse scenario: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    World(#[from] WorldError),

    #[error("placement tile {0} is not walkable")]
    BadPlacement(Position),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub board: Board,
    pub units: Vec<Unit>,

    /// Tiles the player may put units on before the battle starts.
    #[serde(default)]
    pub placements: Vec<Position>,

    #[serde(default)]
    pub phase: Phase,

    /// Prologue dialog, shown while the phase is still the very beginning.
    #[serde(default)]
    pub intro: Vec<String>,

    #[serde(default)]
    pub diary: Vec<String>,

    /// Overrides the configured interaction range for this level.
    #[serde(default)]
    pub interaction_range: Option<u32>,
}

impl Scenario {
    pub fn from_json(content: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let scenario = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            units = scenario.units.len(),
            "scenario loaded"
        );
        Ok(scenario)
    }

    /// Builds the world, rejecting placement tiles off the floor.
    pub fn create_world(&self) -> Result<World, ScenarioError> {
        if let Some(tile) = self
            .placements
            .iter()
            .find(|tile| !self.board.is_walkable(**tile))
        {
            return Err(ScenarioError::BadPlacement(*tile));
        }
        let world = World::new(
            self.board.clone(),
            self.units.clone(),
            self.placements.iter().copied().collect(),
        )?;
        Ok(world)
    }

    /// A router builder primed with this scenario's world, phase and text.
    pub fn router_builder(&self, mut config: RouterConfig) -> Result<RouterBuilder, ScenarioError> {
        if let Some(range) = self.interaction_range {
            config.game_config.interaction_range = range;
        }
        Ok(RouterBuilder::new()
            .config(config)
            .world(self.create_world()?)
            .turn(TurnContext::starting_at(self.phase))
            .intro(self.intro.clone())
            .diary(self.diary.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SKIRMISH: &str = r#"{
        "board": { "width": 6, "height": 4, "walls": [{ "x": 3, "y": 1 }] },
        "units": [
            {
                "id": 1, "name": "Raimund", "side": "player", "kind": "character",
                "position": { "x": 0, "y": 0 }, "max_moves": 3,
                "hp": { "current": 10, "maximum": 10 }, "attack": 4, "defense": 1,
                "reach": [1]
            },
            {
                "id": 2, "name": "Chest", "side": "ally", "kind": { "fixture": "chest" },
                "position": { "x": 2, "y": 0 }, "max_moves": 0,
                "hp": { "current": 1, "maximum": 1 }, "attack": 0, "defense": 0,
                "gold": 30
            }
        ],
        "placements": [{ "x": 0, "y": 0 }, { "x": 0, "y": 1 }],
        "phase": "initialization",
        "interaction_range": 2
    }"#;

    #[test]
    fn loads_from_disk_and_builds_a_router() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SKIRMISH.as_bytes()).unwrap();

        let scenario = Scenario::load(file.path()).unwrap();
        assert_eq!(scenario.units.len(), 2);
        assert_eq!(scenario.phase, Phase::Initialization);

        let router = scenario
            .router_builder(RouterConfig::default())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(router.turn().phase(), Phase::Initialization);
        assert_eq!(router.world().config.interaction_range, 2);
        assert_eq!(router.world().placements.len(), 2);
    }

    #[test]
    fn missing_file_reports_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = Scenario::load(&path).unwrap_err();
        assert!(matches!(err, ScenarioError::Io { path: ref p, .. } if *p == path));
    }

    #[test]
    fn placement_on_a_wall_is_rejected() {
        let mut scenario = Scenario::from_json(SKIRMISH).unwrap();
        scenario.placements.push(Position::new(3, 1));
        assert!(matches!(
            scenario.create_world(),
            Err(ScenarioError::BadPlacement(tile)) if tile == Position::new(3, 1)
        ));
    }

    #[test]
    fn stacked_units_are_rejected() {
        let mut scenario = Scenario::from_json(SKIRMISH).unwrap();
        scenario.units[1].position = Position::new(0, 0);
        assert!(matches!(
            scenario.create_world(),
            Err(ScenarioError::World(WorldError::TileConflict { .. }))
        ));
    }
}
