//! Scripted input: a scenario plus the pointer and keyboard events to feed
//! the router, as a host would from a real window.

use std::path::Path;

use anyhow::{Context, Result};
use game_core::Position;
use runtime::{InputSignal, InteractionRouter, Pointer, Scenario, ScreenPoint};
use serde::{Deserialize, Serialize};

/// One input event. Coordinates are screen pixels.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScriptEvent {
    PrimaryClick { x: i32, y: i32 },
    SecondaryClick,
    SecondaryDown { x: i32, y: i32 },
    PointerMove { x: i32, y: i32 },
    Escape,
    /// Clicks the entry labelled `label` in the active menu.
    Choose { label: String },
    /// The host finished animating the selected unit's walk.
    CompleteMove,
    /// One frame: lets the router open pending menus.
    Tick,
    /// A non-player side finished acting.
    PassTurn,
    AnimationStart,
    AnimationEnd,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(flatten)]
    pub scenario: Scenario,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        serde_json::from_str(&content).with_context(|| format!("parsing script {}", path.display()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub applied: usize,
    pub skipped: usize,
    pub quit: bool,
}

/// Feeds script events into a router.
#[derive(Clone, Copy, Debug)]
pub struct Replayer {
    tile_size: i32,
}

impl Replayer {
    pub fn new(tile_size: i32) -> Self {
        Self {
            tile_size: tile_size.max(1),
        }
    }

    /// Screen pixel to board tile; negative pixels map to negative tiles.
    pub fn pointer(&self, x: i32, y: i32) -> Pointer {
        Pointer::new(
            ScreenPoint::new(x, y),
            Position::new(x.div_euclid(self.tile_size), y.div_euclid(self.tile_size)),
        )
    }

    /// Applies every event in order, stopping at the first `Quit`.
    pub fn run(&self, router: &mut InteractionRouter, events: &[ScriptEvent]) -> ReplaySummary {
        let mut summary = ReplaySummary::default();
        for (index, event) in events.iter().enumerate() {
            match self.apply(router, event) {
                Some(InputSignal::Quit) => {
                    summary.applied += 1;
                    summary.quit = true;
                    tracing::info!(index, "script asked to quit");
                    break;
                }
                Some(InputSignal::Continue) => summary.applied += 1,
                None => {
                    summary.skipped += 1;
                    tracing::warn!(index, ?event, "event skipped");
                    continue;
                }
            }
            tracing::info!(
                index,
                ?event,
                phase = %router.turn().phase(),
                side = %router.turn().active_side(),
                mode = %router.selection().mode(),
                menu = ?router.menus().active_menu_identifier(),
                "event applied"
            );
        }
        summary
    }

    /// `None` when the event cannot be delivered (no such menu entry).
    pub fn apply(&self, router: &mut InteractionRouter, event: &ScriptEvent) -> Option<InputSignal> {
        let signal = match event {
            ScriptEvent::PrimaryClick { x, y } => router.on_primary_click(self.pointer(*x, *y)),
            ScriptEvent::SecondaryClick => router.on_secondary_click(),
            ScriptEvent::SecondaryDown { x, y } => {
                router.on_secondary_button_down(self.pointer(*x, *y));
                InputSignal::Continue
            }
            ScriptEvent::PointerMove { x, y } => {
                router.on_pointer_move(self.pointer(*x, *y));
                InputSignal::Continue
            }
            ScriptEvent::Escape => {
                router.on_key_escape();
                InputSignal::Continue
            }
            ScriptEvent::Choose { label } => {
                let point = entry_point(router, label)?;
                router.on_primary_click(Pointer::new(point, Position::ORIGIN))
            }
            ScriptEvent::CompleteMove => {
                router.complete_move();
                InputSignal::Continue
            }
            ScriptEvent::Tick => {
                router.update();
                InputSignal::Continue
            }
            ScriptEvent::PassTurn => {
                router.pass_turn();
                InputSignal::Continue
            }
            ScriptEvent::AnimationStart => {
                router.begin_animation();
                InputSignal::Continue
            }
            ScriptEvent::AnimationEnd => {
                router.finish_animation();
                InputSignal::Continue
            }
        };
        Some(signal)
    }
}

fn entry_point(router: &InteractionRouter, label: &str) -> Option<ScreenPoint> {
    let menu = router.menus().active_menu()?;
    let index = menu.entries.iter().position(|entry| entry.label == label)?;
    Some(router.config().menu_layout().entry_point(menu, index))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_map_to_tiles() {
        let replayer = Replayer::new(32);
        assert_eq!(replayer.pointer(0, 0).tile, Position::new(0, 0));
        assert_eq!(replayer.pointer(95, 33).tile, Position::new(2, 1));
        assert_eq!(replayer.pointer(-1, 40).tile, Position::new(-1, 1));
    }

    #[test]
    fn events_are_tagged_by_kind() {
        let events: Vec<ScriptEvent> = serde_json::from_str(
            r#"[
                { "kind": "primary_click", "x": 10, "y": 20 },
                { "kind": "choose", "label": "Wait" },
                { "kind": "complete_move" }
            ]"#,
        )
        .unwrap();
        assert_eq!(events[0], ScriptEvent::PrimaryClick { x: 10, y: 20 });
        assert_eq!(
            events[1],
            ScriptEvent::Choose {
                label: "Wait".to_owned()
            }
        );
        assert_eq!(events[2], ScriptEvent::CompleteMove);
    }
}
