//! Frontend configuration structures and loaders.

use std::env;

/// Frontend-specific configuration.
#[derive(Clone, Debug)]
pub struct FrontendConfig {
    pub layout: LayoutConfig,
    pub session: SessionConfig,
    /// Period of the client frame loop in milliseconds.
    pub frame_ms: u64,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            session: SessionConfig::default(),
            frame_ms: Self::DEFAULT_FRAME_MS,
        }
    }
}

impl FrontendConfig {
    pub const DEFAULT_FRAME_MS: u64 = 16;

    pub const fn new(layout: LayoutConfig, session: SessionConfig, frame_ms: u64) -> Self {
        Self {
            layout,
            session,
            frame_ms,
        }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CLIENT_TILE_SIZE` - Tile edge in source pixels (default: 16)
    /// - `CLIENT_DRAWING_SCALE` - Integer upscale factor (default: 3)
    /// - `CLIENT_VIEWPORT_WIDTH` - Canvas width in pixels (default: 1280)
    /// - `CLIENT_VIEWPORT_HEIGHT` - Canvas height in pixels (default: 720)
    /// - `CLIENT_MOBILE_LAYOUT` - Touch layout, disables hover feedback (default: false)
    /// - `CLIENT_PVP` - Local game mode allows player-versus-player (default: false)
    /// - `CLIENT_FRAME_MS` - Frame loop period (default: 16)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(size) = read_env::<u32>("CLIENT_TILE_SIZE") {
            config.layout.tile_size = size.max(1);
        }
        if let Some(scale) = read_env::<u32>("CLIENT_DRAWING_SCALE") {
            config.layout.drawing_scale = scale.max(1);
        }
        if let Some(width) = read_env::<u32>("CLIENT_VIEWPORT_WIDTH") {
            config.layout.width = width.max(1);
        }
        if let Some(height) = read_env::<u32>("CLIENT_VIEWPORT_HEIGHT") {
            config.layout.height = height.max(1);
        }

        if let Some(mobile) = read_env_bool("CLIENT_MOBILE_LAYOUT") {
            config.session.mobile = mobile;
        }
        if let Some(pvp) = read_env_bool("CLIENT_PVP") {
            config.session.pvp = pvp;
        }

        if let Some(frame_ms) = read_env::<u64>("CLIENT_FRAME_MS") {
            config.frame_ms = frame_ms.max(1);
        }

        config
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutConfig {
    pub tile_size: u32,
    pub drawing_scale: u32,
    pub width: u32,
    pub height: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            tile_size: 16,
            drawing_scale: 3,
            width: 1280,
            height: 720,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub mobile: bool,
    pub pvp: bool,
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

fn read_env_bool(key: &str) -> Option<bool> {
    match env::var(key).ok()?.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}
