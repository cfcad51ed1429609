//! Sprite animation selection.
//!
//! Directional animations are authored for three facings only: `right`, `up`
//! and `down`. Left-facing animations reuse the right-facing art and set a
//! horizontal flip; there is never a separately authored `*_left` sheet.

use std::fmt;

use crate::config::AnimationSpeeds;
use crate::state::Orientation;

/// Character action that has a directional animation.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    #[strum(serialize = "idle")]
    Idle,
    #[strum(serialize = "walk")]
    Walk,
    #[strum(serialize = "atk")]
    Attack,
}

/// Resolved sprite animation for an `(action, orientation)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationSelection {
    pub action: Action,
    /// Facing of the art sheet to play (never `Left`).
    pub art: Orientation,
    pub flip_x: bool,
    /// Milliseconds per frame.
    pub speed_ms: u32,
    /// Number of plays before stopping; `None` loops.
    pub count: Option<u32>,
}

impl AnimationSelection {
    /// Sprite sheet animation name, e.g. `walk_right`.
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// The facing this selection depicts once the flip is applied.
    pub fn facing(&self) -> Orientation {
        if self.flip_x {
            Orientation::Left
        } else {
            self.art
        }
    }
}

impl fmt::Display for AnimationSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.action, self.art)
    }
}

/// Pure mapping from action and orientation to the animation to play.
pub fn select_animation(
    action: Action,
    orientation: Orientation,
    speeds: &AnimationSpeeds,
) -> AnimationSelection {
    let (art, flip_x) = match orientation {
        Orientation::Left => (Orientation::Right, true),
        other => (other, false),
    };

    let (speed_ms, count) = match action {
        Action::Idle => (speeds.idle_ms, None),
        Action::Walk => (speeds.walk_ms, None),
        Action::Attack => (speeds.attack_ms, Some(1)),
    };

    AnimationSelection {
        action,
        art,
        flip_x,
        speed_ms,
        count,
    }
}

/// Animation currently assigned to a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    Directional(AnimationSelection),
    /// Terminal animation; no other animation may replace it.
    Death,
}

impl AnimationState {
    pub fn name(&self) -> String {
        match self {
            Self::Directional(selection) => selection.name(),
            Self::Death => "death".to_owned(),
        }
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            Self::Directional(selection) => Some(selection.action),
            Self::Death => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        self.action() == Some(Action::Idle)
    }

    pub fn is_death(&self) -> bool {
        matches!(self, Self::Death)
    }

    pub fn flip_x(&self) -> bool {
        match self {
            Self::Directional(selection) => selection.flip_x,
            Self::Death => false,
        }
    }
}
