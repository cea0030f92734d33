//! Background idle motion
//!
//! While no directed operation owns the pointer, it drifts to random points
//! of the viewport with randomized rests in between. The task lives as long
//! as its cursor and ends quietly when the surface goes away.

use std::sync::Arc;

use tokio::sync::watch;

use crate::config::IdleConfig;
use crate::path::path;
use crate::stealth::Humanizer;

use super::surface::{Surface, SurfaceError};
use super::{Shared, TraceOutcome};

pub(crate) async fn run<S: Surface>(
    shared: Arc<Shared<S>>,
    config: IdleConfig,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut suppressed = shared.state.subscribe();

    loop {
        tokio::select! {
            _ = shutdown.changed() => break,
            released = until_released(&mut suppressed) => {
                if released.is_err() {
                    break;
                }
            }
        }

        if shared.surface.is_closed().await {
            log::debug!("Surface closed, stopping idle motion");
            break;
        }

        match wander(&shared, &config).await {
            Ok(TraceOutcome::SurfaceClosed) => {
                log::debug!("Surface closed during idle motion");
                break;
            }
            Ok(_) => {}
            Err(e) => {
                log::debug!("Idle motion stopped: {}", e);
                break;
            }
        }

        let rest = Humanizer::new().rest(config.move_delay, config.randomize_move_delay);
        tokio::select! {
            _ = shutdown.changed() => break,
            _ = tokio::time::sleep(rest) => {}
        }
    }
}

/// Resolves once idle motion is no longer suppressed
async fn until_released(
    suppressed: &mut watch::Receiver<bool>,
) -> Result<(), watch::error::RecvError> {
    loop {
        if !*suppressed.borrow_and_update() {
            return Ok(());
        }
        suppressed.changed().await?;
    }
}

/// One idle path to a random viewport point, abandoned as soon as a directed
/// operation takes the pointer
async fn wander<S: Surface>(
    shared: &Shared<S>,
    config: &IdleConfig,
) -> Result<TraceOutcome, SurfaceError> {
    let viewport = shared.surface.viewport().await?;
    let from = shared.state.position();
    let to = Humanizer::new().viewport_point(&viewport);
    let route = path(from, to, &config.path);

    Ok(shared.trace(&route, true).await)
}
