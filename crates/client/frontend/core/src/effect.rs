//! Side effects requested by input handling.
//!
//! The resolver never talks to the network or the UI directly; it returns
//! these values and the embedding client carries them out.

use crossterm::event::KeyCode;
use game_core::{EntityId, EntityView};

/// Opcode carried by a target packet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[non_exhaustive]
pub enum TargetOpcode {
    Attack,
}

/// Attack request sent to the server.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttackIntent {
    pub opcode: TargetOpcode,
    pub entity: EntityId,
}

impl AttackIntent {
    pub fn new(entity: EntityId) -> Self {
        Self {
            opcode: TargetOpcode::Attack,
            entity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEffect {
    SendAttack(AttackIntent),
    /// Key forwarded to the chat input while it has focus.
    ChatKey(KeyCode),
    ToggleChat,
    HideChatInput,
    OpenWarp,
    HidePlayerActions,
    HideInterface,
    /// Entity now under the pointer, for the info overlay.
    OverlayHover(Option<EntityView>),
}
