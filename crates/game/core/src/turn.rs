//! Whose turn it is, which phase the level is in, and whether input is
//! currently suspended by an animation.

use crate::state::Side;

/// Level phase. Ordered so that `phase` can only ever grow.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, strum::Display,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Phase {
    /// Opening dialogs are still on screen.
    #[default]
    VeryBeginning,
    /// Pre-battle placement of the player's units.
    Initialization,
    InProgress,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnContext {
    active_side: Side,
    phase: Phase,
    animation_in_flight: bool,
    /// Incremented every time the player side gets the turn back.
    round: u32,
}

impl TurnContext {
    pub fn new() -> Self {
        Self {
            active_side: Side::Player,
            phase: Phase::VeryBeginning,
            animation_in_flight: false,
            round: 1,
        }
    }

    /// Starts directly in `phase`, e.g. when a level skips its intro dialogs.
    pub fn starting_at(phase: Phase) -> Self {
        Self {
            phase,
            ..Self::new()
        }
    }

    pub fn active_side(&self) -> Side {
        self.active_side
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn is_player_turn(&self) -> bool {
        self.active_side == Side::Player
    }

    pub fn animation_in_flight(&self) -> bool {
        self.animation_in_flight
    }

    pub fn begin_animation(&mut self) {
        self.animation_in_flight = true;
    }

    pub fn finish_animation(&mut self) {
        self.animation_in_flight = false;
    }

    /// Leaves the intro once every startup dialog is closed. Idempotent.
    pub fn advance_phase_if_ready(&mut self, no_active_menu: bool) -> bool {
        if self.phase == Phase::VeryBeginning && no_active_menu {
            self.phase = Phase::Initialization;
            return true;
        }
        false
    }

    /// Ends the placement phase. Returns false outside of placement.
    pub fn start_battle(&mut self) -> bool {
        if self.phase != Phase::Initialization {
            return false;
        }
        self.phase = Phase::InProgress;
        true
    }

    /// Passes the turn to the next side and returns it.
    pub fn end_side_turn(&mut self) -> Side {
        self.active_side = self.active_side.next();
        if self.active_side == Side::Player {
            self.round += 1;
        }
        self.active_side
    }
}

impl Default for TurnContext {
    fn default() -> Self {
        Self::new()
    }
}
