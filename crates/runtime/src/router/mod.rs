//! The interaction router: turns raw pointer and keyboard events into
//! selection, movement, combat, trade and menu transitions.
//!
//! The router owns every piece of mutable battle state (world, turn context,
//! selection, trade ledger) and is their only mutator while an event is
//! handled. Units are referred to by [`EntityId`]; collaborators and the
//! menu gateway are boxed trait objects injected through the builder.
//!
//! Handlers never fail. An event that does not apply to the current state is
//! absorbed and logged at `debug` level.
mod actions;
mod input;
mod turns;

use game_core::{
    Collaborators, EntityId, InputGate, ItemId, Phase, Position, SelectionState, TradeLedger,
    TurnContext, World,
};

use crate::config::RouterConfig;
use crate::error::{Result, RouterError};
use crate::menu::{MenuGateway, MenuStack, ScreenPoint, builders};

/// A pointer event already transformed into board coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pointer {
    pub screen: ScreenPoint,
    pub tile: Position,
}

impl Pointer {
    pub fn new(screen: ScreenPoint, tile: Position) -> Self {
        Self { screen, tile }
    }
}

/// Whether the host should keep running after an event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
pub enum InputSignal {
    Continue,
    Quit,
}

/// Item picked in the inventory or equipment menu, target of the item menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PickedItem {
    pub owner: EntityId,
    pub item: ItemId,
    pub equipped: bool,
}

pub struct InteractionRouter {
    world: World,
    turn: TurnContext,
    selection: SelectionState,
    ledger: TradeLedger,
    menus: Box<dyn MenuGateway>,
    collaborators: Collaborators,
    config: RouterConfig,
    hovered: Option<EntityId>,
    picked_item: Option<PickedItem>,
    /// Units on the open trade screen: (actor, partner).
    trade: Option<(EntityId, EntityId)>,
    diary: Vec<String>,
}

impl InteractionRouter {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn turn(&self) -> &TurnContext {
        &self.turn
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn ledger(&self) -> &TradeLedger {
        &self.ledger
    }

    pub fn menus(&self) -> &dyn MenuGateway {
        self.menus.as_ref()
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Entity under the pointer while no menu is open.
    pub fn hovered(&self) -> Option<EntityId> {
        self.hovered
    }

    pub fn picked_item(&self) -> Option<PickedItem> {
        self.picked_item
    }

    pub fn diary(&self) -> &[String] {
        &self.diary
    }

    /// Suspends every handler until [`finish_animation`](Self::finish_animation).
    pub fn begin_animation(&mut self) {
        self.turn.begin_animation();
    }

    pub fn finish_animation(&mut self) {
        self.turn.finish_animation();
    }

    fn gate(&self) -> InputGate {
        InputGate {
            menu_active: self.menus.is_active(),
            player_turn: self.turn.is_player_turn(),
            phase: self.turn.phase(),
        }
    }

    fn advance_phase(&mut self) {
        if self.turn.advance_phase_if_ready(!self.menus.is_active()) {
            tracing::info!(phase = %self.turn.phase(), "intro finished");
        }
    }
}

impl std::fmt::Debug for InteractionRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InteractionRouter")
            .field("turn", &self.turn)
            .field("selection", &self.selection)
            .field("ledger", &self.ledger)
            .field("active_menu", &self.menus.active_menu_identifier())
            .field("hovered", &self.hovered)
            .finish_non_exhaustive()
    }
}

/// Builder for [`InteractionRouter`].
pub struct RouterBuilder {
    config: RouterConfig,
    world: Option<World>,
    turn: TurnContext,
    menus: Option<Box<dyn MenuGateway>>,
    collaborators: Collaborators,
    intro: Vec<String>,
    diary: Vec<String>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self {
            config: RouterConfig::default(),
            world: None,
            turn: TurnContext::new(),
            menus: None,
            collaborators: Collaborators::standard(),
            intro: Vec::new(),
            diary: Vec::new(),
        }
    }

    pub fn config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    pub fn turn(mut self, turn: TurnContext) -> Self {
        self.turn = turn;
        self
    }

    /// Defaults to a [`MenuStack`] laid out from the config.
    pub fn menus(mut self, menus: impl MenuGateway + 'static) -> Self {
        self.menus = Some(Box::new(menus));
        self
    }

    pub fn collaborators(mut self, collaborators: Collaborators) -> Self {
        self.collaborators = collaborators;
        self
    }

    /// Dialog lines shown before placement starts.
    pub fn intro(mut self, lines: Vec<String>) -> Self {
        self.intro = lines;
        self
    }

    pub fn diary(mut self, entries: Vec<String>) -> Self {
        self.diary = entries;
        self
    }

    pub fn build(self) -> Result<InteractionRouter> {
        let world = self
            .world
            .ok_or(RouterError::MissingWorld)?
            .with_config(self.config.game_config.clone());
        let menus: Box<dyn MenuGateway> = match self.menus {
            Some(menus) => menus,
            None => Box::new(MenuStack::new(self.config.menu_layout())),
        };

        let mut router = InteractionRouter {
            world,
            turn: self.turn,
            selection: SelectionState::new(),
            ledger: TradeLedger::new(),
            menus,
            collaborators: self.collaborators,
            config: self.config,
            hovered: None,
            picked_item: None,
            trade: None,
            diary: self.diary,
        };
        if router.turn.phase() == Phase::VeryBeginning && !self.intro.is_empty() {
            router.menus.open(builders::dialog_menu("Prologue", &self.intro));
        }
        router.advance_phase();
        tracing::info!(
            units = router.world.roster.len(),
            phase = %router.turn.phase(),
            "router ready"
        );
        Ok(router)
    }
}

impl Default for RouterBuilder {
    fn default() -> Self {
        Self::new()
    }
}
