//! Pointer and keyboard entry points.

use game_core::{EntityId, Position, SelectionMode};

use super::actions::absorb;
use super::{InputSignal, InteractionRouter, Pointer};
use crate::menu::builders;

impl InteractionRouter {
    /// Left click: menus first, then the board.
    pub fn on_primary_click(&mut self, pointer: Pointer) -> InputSignal {
        if self.turn.animation_in_flight() {
            tracing::debug!("click ignored during animation");
            return InputSignal::Continue;
        }
        let signal = self.primary_click(pointer);
        self.advance_phase();
        signal
    }

    /// Right click: cancels whatever is in progress, innermost first.
    pub fn on_secondary_click(&mut self) -> InputSignal {
        if self.turn.animation_in_flight() {
            tracing::debug!("right click ignored during animation");
            return InputSignal::Continue;
        }
        self.secondary_click();
        self.advance_phase();
        InputSignal::Continue
    }

    /// Escape closes the active menu, except the character action menu.
    pub fn on_key_escape(&mut self) {
        if self.turn.animation_in_flight() {
            return;
        }
        match self.menus.active_menu_identifier() {
            Some(id) if id.is_exempt() => {
                tracing::debug!("escape does not close the character action menu");
            }
            Some(_) => {
                self.close_active_menu();
            }
            None => {}
        }
    }

    /// Right button pressed: starts watching the movable unit under the
    /// pointer.
    pub fn on_secondary_button_down(&mut self, pointer: Pointer) {
        if self.turn.animation_in_flight() {
            return;
        }
        let gate = self.gate();
        if gate.menu_active || !gate.player_turn || self.selection.selected().is_some() {
            return;
        }
        let hit_test = self.collaborators.hit_test.as_ref();
        let Some(unit) = self
            .world
            .roster
            .iter()
            .filter(|unit| unit.can_move())
            .find(|unit| hit_test.hit(unit, pointer.tile))
        else {
            return;
        };
        if self
            .selection
            .watch(unit, &self.world, self.collaborators.ranges.as_ref(), gate)
        {
            tracing::debug!(unit = %unit.id, "watching");
        }
    }

    pub fn on_pointer_move(&mut self, pointer: Pointer) {
        if self.turn.animation_in_flight() {
            return;
        }
        self.menus.motion(pointer.screen);
        if self.menus.is_active() {
            return;
        }
        let hit_test = self.collaborators.hit_test.as_ref();
        self.hovered = self
            .world
            .roster
            .iter()
            .find(|unit| hit_test.hit(unit, pointer.tile))
            .map(|unit| unit.id);
    }

    fn primary_click(&mut self, pointer: Pointer) -> InputSignal {
        if let Some(active) = self.menus.active_menu_identifier() {
            if !active.is_exempt() && !self.menus.is_position_inside(pointer.screen) {
                self.close_active_menu();
            }
            return match self.menus.click(pointer.screen) {
                Some(action) => self.dispatch_menu_action(action),
                None => InputSignal::Continue,
            };
        }
        if !self.turn.is_player_turn() {
            tracing::debug!(side = %self.turn.active_side(), "board click outside player turn");
            return InputSignal::Continue;
        }
        if self.selection.selected().is_some() {
            self.click_with_selection(pointer.tile);
        } else {
            self.click_on_board(pointer.tile);
        }
        InputSignal::Continue
    }

    fn click_with_selection(&mut self, tile: Position) {
        match self.selection.mode() {
            SelectionMode::Placement => {
                if self.selection.place(tile, &mut self.world) {
                    tracing::debug!(%tile, "unit placed");
                }
            }
            SelectionMode::AwaitingMove => {
                let paths = self.collaborators.paths.as_ref();
                if self.selection.commit_move(tile, &mut self.world, paths) {
                    tracing::debug!(%tile, "move committed");
                } else {
                    tracing::debug!(%tile, "tile out of reach, deselecting");
                    self.selection.clear_selection();
                }
            }
            SelectionMode::AwaitingAttack => {
                let combat = self.collaborators.combat.as_ref();
                match self.selection.resolve_attack(tile, &mut self.world, combat) {
                    Some(report) => self.after_duel(report),
                    None => self.abandon_targeting(tile),
                }
            }
            SelectionMode::AwaitingInteract => {
                let interactions = self.collaborators.interactions.as_ref();
                match self
                    .selection
                    .resolve_interact(tile, &mut self.world, interactions)
                {
                    Some(report) => self.after_interaction(report),
                    None => self.abandon_targeting(tile),
                }
            }
            SelectionMode::None => {
                tracing::debug!("selected unit is busy");
            }
        }
    }

    fn click_on_board(&mut self, tile: Position) {
        let hit_test = self.collaborators.hit_test.as_ref();
        if let Some(player) = self
            .world
            .roster
            .players()
            .find(|unit| hit_test.hit(unit, tile))
        {
            if player.turn_is_finished() {
                self.menus.open(builders::status_menu(player));
                return;
            }
            let gate = self.gate();
            let ranges = self.collaborators.ranges.as_ref();
            if self.selection.select(player, &self.world, ranges, gate) {
                tracing::debug!(unit = %player.id, mode = %self.selection.mode(), "selected");
            }
            return;
        }
        if let Some(other) = self
            .world
            .roster
            .others()
            .find(|unit| hit_test.hit(unit, tile))
        {
            self.menus.open(builders::status_menu(other));
            return;
        }
        self.menus.open(builders::main_menu(self.turn.phase()));
    }

    fn secondary_click(&mut self) {
        let Some(selected) = self.selection.selected() else {
            self.close_active_menu();
            self.selection.stop_watching();
            return;
        };
        let mode = self.selection.mode();
        if matches!(mode, SelectionMode::AwaitingMove | SelectionMode::Placement) {
            self.selection.clear_selection();
            return;
        }
        match self.menus.active_menu_identifier() {
            Some(id) if id.is_exempt() => self.cancel_move(selected),
            Some(_) => {
                self.close_active_menu();
            }
            None => {
                if matches!(
                    mode,
                    SelectionMode::AwaitingAttack | SelectionMode::AwaitingInteract
                ) && self.selection.cancel_targeting(&mut self.world)
                {
                    self.close_active_menu();
                }
            }
        }
    }

    /// Walks the selected unit back and undoes its trades. Trades other
    /// units made during their own moves stay pending.
    fn cancel_move(&mut self, selected: EntityId) {
        let Some(unit) = self.world.roster.get_mut(selected) else {
            return;
        };
        if !unit.cancel_move() {
            tracing::debug!(unit = %selected, "move can no longer be cancelled");
            return;
        }
        for missing in self.ledger.rollback(&mut self.world.roster, selected) {
            absorb("trade rollback", &missing);
        }
        self.selection.clear_selection();
        self.clear_menus();
        tracing::debug!(unit = %selected, "move cancelled");
    }

    /// A click outside every target while targeting leaves the unit waiting
    /// for an action and drops the selection.
    fn abandon_targeting(&mut self, tile: Position) {
        tracing::debug!(%tile, "no target there, deselecting");
        self.selection.cancel_targeting(&mut self.world);
        self.selection.clear_selection();
    }
}
