//! Input resolution for the game client.
//!
//! [`InputResolver`] turns key presses and pointer clicks into player
//! intents. Movement and targeting are applied to the local player's
//! [`Character`](game_core::Character) directly; everything that belongs to
//! the UI or the network is returned as [`ClientEffect`]s.

mod coords;
mod keys;

pub use coords::{Camera, InputSnapshot, PixelPosition, PointerEvent, ScreenLayout};

use crossterm::event::KeyCode;
use game_core::{Character, EntityLookup, EntityRegistry, EntityView, GridCell, Pathfinder};

use crate::config::FrontendConfig;
use crate::cursor::{CursorFeedback, CursorRegistry, hover_cursor};
use crate::effect::{AttackIntent, ClientEffect};
use crate::services::targeting::{self, TargetClass, TargetIndicator};
use keys::KeyBinding;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    Key(KeyCode),
    Click(PointerEvent),
}

/// Game-wide flags that gate input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    /// Local game mode allows player-versus-player combat.
    pub pvp: bool,
    /// Touch layout: no hover feedback, chat input auto-hides on click.
    pub mobile: bool,
    /// A zone transition is in progress; clicks are dropped.
    pub zoning: bool,
}

/// Mirror of the chat surface, kept current by the chat collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChatState {
    /// Chat has keyboard focus.
    pub active: bool,
    pub input_visible: bool,
    pub input_empty: bool,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            active: false,
            input_visible: false,
            input_empty: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClickOutcome {
    /// Dropped, e.g. while zoning.
    Ignored,
    /// Attack sent from where the player stands.
    RangedAttack,
    Followed,
    Moved,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClickResolution {
    pub outcome: ClickOutcome,
    pub effects: Vec<ClientEffect>,
}

impl ClickResolution {
    fn new(outcome: ClickOutcome, effects: Vec<ClientEffect>) -> Self {
        Self { outcome, effects }
    }
}

/// Translates raw input into player intents.
#[derive(Clone, Debug)]
pub struct InputResolver {
    layout: ScreenLayout,
    camera: Option<Camera>,
    session: SessionState,
    chat: ChatState,
    mouse: PixelPosition,
    selected: Option<GridCell>,
    cursor: CursorFeedback,
    indicator: TargetIndicator,
}

impl InputResolver {
    pub fn new(config: &FrontendConfig) -> Self {
        Self {
            layout: ScreenLayout::from_config(&config.layout),
            camera: None,
            session: SessionState {
                pvp: config.session.pvp,
                mobile: config.session.mobile,
                zoning: false,
            },
            chat: ChatState::default(),
            mouse: PixelPosition::default(),
            selected: None,
            cursor: CursorFeedback::default(),
            indicator: TargetIndicator::default(),
        }
    }

    pub fn handle(
        &mut self,
        event: InputEvent,
        world: &mut EntityRegistry,
        pathfinder: &dyn Pathfinder,
    ) -> Vec<ClientEffect> {
        match event {
            InputEvent::Key(code) => self.key_down(code, world),
            InputEvent::Click(pointer) => match self.snapshot(pointer) {
                Some(snapshot) => self.click(snapshot.cell, world, pathfinder).effects,
                None => Vec::new(),
            },
        }
    }

    fn key_down(&mut self, code: KeyCode, world: &mut EntityRegistry) -> Vec<ClientEffect> {
        if self.chat.active {
            return vec![ClientEffect::ChatKey(code)];
        }

        match keys::binding(code) {
            Some(KeyBinding::Direction(direction)) => {
                if let Some(player) = world.player_mut() {
                    player.set_move_direction(Some(direction));
                }
                Vec::new()
            }
            Some(KeyBinding::ToggleChat) => {
                self.chat.active = !self.chat.active;
                vec![ClientEffect::ToggleChat]
            }
            Some(KeyBinding::OpenWarp) => vec![ClientEffect::OpenWarp],
            None => Vec::new(),
        }
    }

    /// Releasing any direction key clears the held direction.
    pub fn key_up(&mut self, code: KeyCode, world: &mut EntityRegistry) {
        if keys::direction(code).is_none() {
            return;
        }
        if let Some(player) = world.player_mut() {
            player.set_move_direction(None);
        }
    }

    /// Clicks `cell` unless the player is already walking.
    pub fn key_move(
        &mut self,
        cell: GridCell,
        world: &mut EntityRegistry,
        pathfinder: &dyn Pathfinder,
    ) -> Option<ClickResolution> {
        if !world.player()?.is_idle() {
            return None;
        }
        Some(self.click(cell, world, pathfinder))
    }

    /// Turns a held direction key into a step toward the adjacent cell.
    pub fn drive_direction(
        &mut self,
        world: &mut EntityRegistry,
        pathfinder: &dyn Pathfinder,
    ) -> Option<ClickResolution> {
        let player = world.player()?;
        let (dx, dy) = player.move_direction()?.delta();
        let cell = player.cell().offset(dx, dy);
        self.key_move(cell, world, pathfinder)
    }

    /// Resolves a click on `cell`: attack, follow, or walk.
    pub fn click(
        &mut self,
        cell: GridCell,
        world: &mut EntityRegistry,
        pathfinder: &dyn Pathfinder,
    ) -> ClickResolution {
        let mut effects = Vec::new();
        self.indicator = TargetIndicator::Passive;

        if self.session.mobile && self.chat.input_visible && self.chat.input_empty {
            self.chat.input_visible = false;
            effects.push(ClientEffect::HideChatInput);
        }

        if self.session.zoning {
            return ClickResolution::new(ClickOutcome::Ignored, effects);
        }

        let local = world.local_player();
        let Some(player_cell) = world.player().map(Character::cell) else {
            tracing::warn!(%cell, "click before the local player spawned");
            return ClickResolution::new(ClickOutcome::Ignored, effects);
        };
        let entity = world.entity_at(cell, cell == player_cell);
        let Some(player) = world.player_mut() else {
            return ClickResolution::new(ClickOutcome::Ignored, effects);
        };

        self.selected = Some(cell);

        match entity {
            Some(entity) => {
                self.indicator = TargetIndicator::Hostile;
                if targeting::classify(&entity, local, self.session.pvp) != TargetClass::Own {
                    if let Some(outcome) = self.engage(&entity, player, pathfinder, &mut effects) {
                        tracing::debug!(%cell, entity = %entity.id, %outcome, "click resolved");
                        return ClickResolution::new(outcome, effects);
                    }
                }
            }
            None => player.remove_target(),
        }

        effects.push(ClientEffect::HidePlayerActions);
        player.go(cell, false, pathfinder);
        effects.push(ClientEffect::HideInterface);

        tracing::debug!(%cell, "click resolved to walk");
        ClickResolution::new(ClickOutcome::Moved, effects)
    }

    fn engage(
        &self,
        entity: &EntityView,
        player: &mut Character,
        pathfinder: &dyn Pathfinder,
        effects: &mut Vec<ClientEffect>,
    ) -> Option<ClickOutcome> {
        let targetable = targeting::is_targetable(entity, self.session.pvp);
        if targetable {
            player.set_target(Some(entity.id));
        }

        if player.is_ranged()
            && targeting::is_attackable(entity, self.session.pvp)
            && targeting::is_in_ranged_reach(player.cell(), entity.cell)
        {
            effects.push(ClientEffect::SendAttack(AttackIntent::new(entity.id)));
            player.look_at(entity.cell);
            return Some(ClickOutcome::RangedAttack);
        }

        if entity.cell == player.cell() {
            effects.push(ClientEffect::SendAttack(AttackIntent::new(entity.id)));
        }

        if targetable {
            player.follow(entity, pathfinder);
            return Some(ClickOutcome::Followed);
        }

        None
    }

    /// Tracks the pointer for hover feedback.
    pub fn pointer_moved(&mut self, pointer: PointerEvent) {
        self.mouse = self.layout.to_pixel(pointer);
    }

    /// Records the pointer and resolves the cell under it. `None` until a
    /// camera is attached.
    pub fn snapshot(&mut self, pointer: PointerEvent) -> Option<InputSnapshot> {
        self.pointer_moved(pointer);
        let camera = self.camera?;
        Some(InputSnapshot {
            pixel: self.mouse,
            cell: self.layout.to_cell(self.mouse, camera),
        })
    }

    /// Per-frame hover projection: picks the cursor glyph for whatever lies
    /// under the pointer and returns the overlay notification.
    pub fn update_hover(
        &mut self,
        world: &EntityRegistry,
        cursors: &CursorRegistry,
    ) -> Option<ClientEffect> {
        if self.session.mobile {
            return None;
        }
        let camera = self.camera?;
        let player = world.player()?;

        let cell = self.layout.to_cell(self.mouse, camera);
        let entity = world.entity_at(cell, cell == player.cell());
        let (glyph, hovering) =
            hover_cursor(entity.as_ref(), player.id(), self.session.pvp, player.is_ranged());

        if let Err(error) = self.cursor.set_cursor(glyph, cursors) {
            tracing::error!(%error, "cursor could not be found");
        }
        self.cursor.set_hovering(hovering);

        Some(ClientEffect::OverlayHover(entity))
    }

    /// Requests the default cursor once sprites are loaded.
    pub fn reset_cursor(&mut self, cursors: &CursorRegistry) {
        if let Err(error) = self.cursor.reset(cursors) {
            tracing::error!(%error, "default cursor could not be found");
        }
    }

    pub fn commit_cursor(&mut self) {
        self.cursor.commit();
    }

    pub fn layout(&self) -> &ScreenLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ScreenLayout {
        &mut self.layout
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    pub fn set_camera(&mut self, camera: Option<Camera>) {
        self.camera = camera;
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn chat(&self) -> &ChatState {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatState {
        &mut self.chat
    }

    pub fn mouse(&self) -> PixelPosition {
        self.mouse
    }

    /// Cell last clicked, where the target indicator is drawn.
    pub fn selected(&self) -> Option<GridCell> {
        self.selected
    }

    pub fn cursor(&self) -> &CursorFeedback {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut CursorFeedback {
        &mut self.cursor
    }

    pub fn indicator(&self) -> TargetIndicator {
        self.indicator
    }
}
