//! Treasure Hunt Engine
//!
//! Demo host: runs one scripted hunt against the session driver the way a
//! renderer, an audio layer and a HUD would.

use std::time::Duration;

use anyhow::{bail, Result};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::timeout;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use treasure_hunt::{
    GameConfig, SessionDriver, SessionHandle, SessionNotice, TreasureId, VERSION,
};

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::from_env();

    info!("Treasure Hunt v{}", VERSION);
    info!(
        "Layout: {} treasures, radius {} m, {}% rare",
        config.placement.count, config.placement.radius, config.placement.rare_percent
    );
    info!("Restart delay: {} ms", config.restart_delay.as_millis());

    let handle = SessionDriver::spawn(config);

    // Stand-in for the audio layer
    let cue_logger = spawn_cue_logger(handle.subscribe());

    demo_hunt(&handle).await?;

    handle.shutdown().await?;
    cue_logger.abort();

    Ok(())
}

fn init_logging() -> Result<()> {
    let default_filter = if cfg!(feature = "debug-tracing") { "trace" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Log one line per collection, picking a cue by kind.
fn spawn_cue_logger(
    mut notices: broadcast::Receiver<SessionNotice>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match notices.recv().await {
                Ok(SessionNotice::Collected(notice)) => {
                    let cue = match notice.kind {
                        treasure_hunt::TreasureKind::Common => "coin.wav",
                        treasure_hunt::TreasureKind::Rare => "chest.wav",
                    };
                    info!("Cue {} for treasure {}", cue, notice.treasure_id);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!("Cue logger lagged, {} notices skipped", skipped)
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

/// Scripted play-through.
async fn demo_hunt(handle: &SessionHandle) -> Result<()> {
    info!("=== Starting Demo Hunt ===");

    let mut notices = handle.subscribe();

    handle.start().await?;
    wait_for(&mut notices, |n| matches!(n, SessionNotice::Started { .. })).await?;

    let view = handle.view().await;
    info!("Generation {}: {} treasures live", view.generation, view.remaining);
    for treasure in view.treasures.iter().take(3) {
        info!(
            "Treasure {} ({:?}) at {:?}",
            treasure.id, treasure.kind, treasure.position
        );
    }

    // Renderer reports the first five hits, one of them twice, plus a stale id
    let targets: Vec<TreasureId> = view.treasures.iter().take(5).map(|t| t.id).collect();
    for id in &targets {
        handle.collect(*id).await?;
    }
    if let Some(first) = targets.first() {
        handle.collect(*first).await?;
    }
    handle.collect(TreasureId::new(9999)).await?;

    for _ in 0..targets.len() {
        wait_for(&mut notices, |n| matches!(n, SessionNotice::Collected(_))).await?;
    }

    let view = handle.view().await;
    info!("Score {} after {} finds, {} left", view.score, view.collected, view.remaining);

    // Two restart taps in a row only seed once
    info!("=== Restarting ===");
    handle.restart().await?;
    handle.restart().await?;
    wait_for(&mut notices, |n| matches!(n, SessionNotice::Started { .. })).await?;

    let view = handle.view().await;
    info!(
        "Generation {}: score {}, {} treasures live",
        view.generation, view.score, view.remaining
    );
    info!("Final view:\n{}", serde_json::to_string_pretty(&view)?);

    Ok(())
}

/// Wait for the first notice matching `predicate`.
async fn wait_for<F>(
    notices: &mut broadcast::Receiver<SessionNotice>,
    predicate: F,
) -> Result<SessionNotice>
where
    F: Fn(&SessionNotice) -> bool,
{
    loop {
        let notice = match timeout(Duration::from_secs(5), notices.recv()).await {
            Ok(Ok(notice)) => notice,
            Ok(Err(RecvError::Lagged(skipped))) => {
                warn!("Missed {} notices", skipped);
                continue;
            }
            Ok(Err(RecvError::Closed)) => bail!("Session driver closed"),
            Err(_) => bail!("Timed out waiting for session notice"),
        };

        if predicate(&notice) {
            return Ok(notice);
        }
    }
}
