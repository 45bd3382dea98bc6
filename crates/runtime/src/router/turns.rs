use game_core::{EntityId, Phase, SelectionMode, Side, attack_targets, interaction_targets};

use super::InteractionRouter;
use crate::menu::builders;

impl InteractionRouter {
    /// Per-frame tick: offers the action menu to a selected unit that is
    /// waiting for its post-move action.
    pub fn update(&mut self) {
        if self.turn.animation_in_flight() || self.menus.is_active() {
            return;
        }
        if self.selection.mode() != SelectionMode::None {
            return;
        }
        let Some(unit) = self
            .selection
            .selected()
            .and_then(|id| self.world.roster.get(id))
        else {
            return;
        };
        if !unit.is_awaiting_action() {
            return;
        }
        let ranges = self.collaborators.ranges.as_ref();
        let can_attack = !attack_targets(&self.world, unit, ranges).is_empty();
        let can_interact = !interaction_targets(&self.world, unit).is_empty();
        self.menus
            .open(builders::character_menu(unit, can_attack, can_interact));
    }

    /// Lands the selected unit at the end of its committed path once the
    /// host finished animating it.
    pub fn complete_move(&mut self) -> bool {
        let Some(unit) = self
            .selection
            .selected()
            .and_then(|id| self.world.roster.get_mut(id))
        else {
            return false;
        };
        if !unit.complete_move() {
            return false;
        }
        tracing::debug!(unit = %unit.id, position = %unit.position, "move completed");
        self.update();
        true
    }

    /// Leaves placement. Only the main menu's Start entry calls this.
    pub(super) fn start_battle(&mut self) -> bool {
        if !self.turn.start_battle() {
            return false;
        }
        self.clear_menus();
        self.selection.clear_selection();
        tracing::info!(round = self.turn.round(), "battle started");
        true
    }

    pub(super) fn end_player_turn(&mut self) {
        if self.turn.phase() != Phase::InProgress || !self.turn.is_player_turn() {
            return;
        }
        self.end_side_turn();
    }

    /// Hands the turn over when a non-player side is done acting. Returns
    /// the side now playing.
    pub fn pass_turn(&mut self) -> Side {
        if self.turn.is_player_turn() {
            tracing::debug!("the player side passes through its own menus");
            return self.turn.active_side();
        }
        self.end_side_turn()
    }

    /// Ends `unit`'s turn, commits its pending trades and drops the
    /// selection. Ends the side turn once every player unit is done.
    ///
    /// `unit` may already be finished (a duel ends the attacker's turn) or
    /// gone from the board (defeated by the counter attack).
    pub(super) fn finish_unit_turn(&mut self, unit: EntityId, clear_menus: bool) {
        if let Some(actor) = self.world.roster.get_mut(unit) {
            actor.end_turn();
            tracing::debug!(unit = %unit, "unit turn finished");
        }
        self.ledger.commit(unit);
        self.selection.clear_selection();
        if clear_menus {
            self.clear_menus();
        }
        if self.turn.phase() == Phase::InProgress && self.world.roster.all_finished(Side::Player)
        {
            self.end_side_turn();
        }
    }

    fn end_side_turn(&mut self) -> Side {
        self.ledger.commit_all();
        self.selection.clear_selection();
        self.selection.stop_watching();
        let side = self.turn.end_side_turn();
        self.world.roster.refresh_side(side);
        tracing::info!(%side, round = self.turn.round(), "side turn started");
        side
    }
}
