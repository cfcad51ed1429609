//! Frontend-side input handling shared by every client surface.
//!
//! Turns raw key and pointer events into player intents: grid movement,
//! follow/attack targeting and chat routing. Side effects that belong to the
//! UI or the network layer are returned as [`ClientEffect`]s rather than
//! performed here.
pub mod config;
pub mod cursor;
pub mod effect;
pub mod input;
pub mod services;

pub use config::{FrontendConfig, LayoutConfig, SessionConfig};
pub use cursor::{
    CursorError, CursorFeedback, CursorGlyph, CursorRegistry, Hovering, SpriteId, SpriteSource,
};
pub use effect::{AttackIntent, ClientEffect, TargetOpcode};
pub use input::{
    Camera, ChatState, ClickOutcome, ClickResolution, InputEvent, InputResolver, InputSnapshot,
    PixelPosition, PointerEvent, ScreenLayout, SessionState,
};
pub use services::targeting::{self, TargetClass, TargetIndicator};
