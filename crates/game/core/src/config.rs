/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    pub animation: AnimationSpeeds,
    /// Milliseconds a character takes to traverse one tile.
    pub movement_speed_ms: u32,
}

impl GameConfig {
    // ===== gameplay constants =====
    /// Ranged attacks fire without closing distance when the target is
    /// strictly closer than this many tiles.
    pub const RANGED_ATTACK_DISTANCE: u32 = 7;
    /// How long a health bar stays visible after being triggered.
    pub const HEALTH_BAR_TIMEOUT_MS: u64 = 7_000;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MOVEMENT_SPEED_MS: u32 = 250;

    pub fn new() -> Self {
        Self {
            animation: AnimationSpeeds::default(),
            movement_speed_ms: Self::DEFAULT_MOVEMENT_SPEED_MS,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-frame playback speed (milliseconds per frame) of character animations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationSpeeds {
    pub idle_ms: u32,
    pub walk_ms: u32,
    pub attack_ms: u32,
}

impl AnimationSpeeds {
    pub const DEFAULT_IDLE_MS: u32 = 450;
    pub const DEFAULT_WALK_MS: u32 = 100;
    pub const DEFAULT_ATTACK_MS: u32 = 50;
}

impl Default for AnimationSpeeds {
    fn default() -> Self {
        Self {
            idle_ms: Self::DEFAULT_IDLE_MS,
            walk_ms: Self::DEFAULT_WALK_MS,
            attack_ms: Self::DEFAULT_ATTACK_MS,
        }
    }
}
