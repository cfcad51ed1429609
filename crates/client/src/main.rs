//! Gridwalk client binary.
//!
//! Composition root: loads `.env`, reads configuration, sets up logging,
//! assembles the [`Client`] around a demo scene and plays a scripted input
//! session through the frame loop.
//!
//! ```bash
//! RUST_LOG=debug CLIENT_FRAME_MS=8 cargo run -p gridwalk-client
//! ```

mod logging;

use anyhow::Result;
use client_frontend_core::{Camera, FrontendConfig};
use game_core::GameConfig;
use gridwalk_client::{Client, scene};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = FrontendConfig::from_env();
    let _guard = logging::setup_logging(std::env::var("CLIENT_SESSION_ID").ok())?;

    tracing::info!("Starting gridwalk client");
    tracing::info!(
        tile_size = config.layout.tile_size,
        drawing_scale = config.layout.drawing_scale,
        mobile = config.session.mobile,
        pvp = config.session.pvp,
        frame_ms = config.frame_ms,
        "frontend configuration"
    );

    let game = GameConfig::default();
    let world = scene::demo_world(&game)?;
    let mut client = Client::builder()
        .world(world)
        .config(config)
        .game_config(game)
        .sprites(&scene::demo_sprite)
        .camera(Camera::new(0, 0))
        .build()?;

    let script = scene::demo_script(client.resolver().layout());
    client.run(script).await?;

    if let Some(player) = client.world().player() {
        tracing::info!(cell = %player.cell(), frames = client.frame(), "client shutdown complete");
    }
    Ok(())
}
