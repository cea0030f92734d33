//! Cursor engine
//!
//! A [`Cursor`] owns the pointer of one surface. Directed operations
//! (moves, clicks) take the pointer away from background idle motion for
//! their duration and hand it back afterwards. Moves onto elements verify
//! that the element is still under the pointer on arrival and retry when
//! layout shifted underneath them.
//!
//! ```no_run
//! # use ghost_pointer::cursor::{Cursor, Surface};
//! # use ghost_pointer::config::{ClickOptions, CursorDefaults};
//! # use ghost_pointer::geometry::ORIGIN;
//! # async fn demo<S: Surface>(page: S) -> ghost_pointer::Result<()> {
//! let cursor = Cursor::new(page, ORIGIN, true, CursorDefaults::default());
//! cursor.click(Some("#sign-in".into()), &ClickOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

mod idle;
mod state;
pub mod surface;

#[cfg(test)]
pub(crate) mod mock;

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::settings::{self, CursorDefaults};
use crate::config::{ClickOptions, IdleOptions, MoveConfig, MoveOptions};
use crate::error::{CursorError, Result};
use crate::geometry::{Point, Rect};
use crate::path::{path, plan_approach, Approach, Trajectory};
use crate::stealth::Humanizer;

use state::CursorState;
pub use surface::{MouseButton, PointerEvent, Selector, Surface, SurfaceError, Target};

/// How tracing a path ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceOutcome {
    /// Every point was attempted
    Completed,
    /// Idle motion yielded to a directed operation
    Aborted,
    /// The surface went away
    SurfaceClosed,
}

/// State and surface shared with the idle task
pub(crate) struct Shared<S: Surface> {
    surface: S,
    state: CursorState,
}

impl<S: Surface> Shared<S> {
    /// Dispatch a path point by point
    ///
    /// Failed points are skipped unless the surface has closed. With
    /// `abort_on_suppress`, tracing stops before the next point once idle
    /// motion is suppressed.
    async fn trace(&self, route: &Trajectory, abort_on_suppress: bool) -> TraceOutcome {
        for (to, timestamp) in route.steps() {
            if abort_on_suppress && self.state.is_suppressed() {
                return TraceOutcome::Aborted;
            }

            let event = PointerEvent::Move { to, timestamp };
            match self.surface.dispatch(event).await {
                Ok(()) => self.state.set_position(to),
                Err(e) => {
                    if self.surface.is_closed().await {
                        return TraceOutcome::SurfaceClosed;
                    }
                    log::debug!("Move to ({:.1}, {:.1}) failed: {}", to.x, to.y, e);
                }
            }
        }

        TraceOutcome::Completed
    }

    /// Press or release a button; failures are logged, not returned
    async fn press(&self, event: PointerEvent) {
        if let Err(e) = self.surface.dispatch(event).await {
            log::debug!("Could not {:?}: {}", event, e);
        }
    }

    async fn locate(
        &self,
        target: &Target<S::Element>,
        wait_ms: Option<u64>,
    ) -> Result<S::Element> {
        let raw = match target {
            Target::Element(element) => return Ok(element.clone()),
            Target::Selector(raw) => raw,
        };
        let selector = Selector::parse(raw);

        if let Some(ms) = wait_ms {
            match self
                .surface
                .wait_for_selector(&selector, Duration::from_millis(ms))
                .await
            {
                Ok(()) => {}
                Err(SurfaceError::Timeout(_)) => {
                    return Err(CursorError::SelectorNotFound(raw.clone()))
                }
                Err(e) => return Err(e.into()),
            }
        }

        self.surface
            .query_selector(&selector)
            .await?
            .ok_or_else(|| CursorError::SelectorNotFound(raw.clone()))
    }

    /// Move onto the target, re-measuring it from scratch on every attempt
    /// until the pointer ends up inside it
    async fn approach(&self, target: &Target<S::Element>, config: &MoveConfig) -> Result<()> {
        let tries = config.max_tries.max(1);

        for attempt in 1..=tries {
            let element = self.locate(target, config.wait_for_selector).await?;
            self.surface.scroll_into_view(&element).await?;
            let bounds = self
                .surface
                .bounding_box(&element)
                .await?
                .ok_or_else(|| CursorError::ElementHidden(target.describe()))?;

            let plan = plan_landing(self.state.position(), &bounds, config);
            for leg in plan.legs() {
                if self.trace(leg, false).await == TraceOutcome::SurfaceClosed {
                    return Ok(());
                }
            }

            let arrival = self.state.position();
            match self.surface.bounding_box(&element).await? {
                Some(settled) if settled.contains_strictly(arrival) => return Ok(()),
                settled => log::trace!(
                    "Target {} moved during attempt {}/{}: {:?} -> {:?}",
                    target.describe(),
                    attempt,
                    tries,
                    bounds,
                    settled
                ),
            }
        }

        log::warn!("Gave up on {} after {} attempts", target.describe(), tries);
        Err(CursorError::ElementUnsettled { tries })
    }
}

/// Pick a landing point inside `bounds` and plan the legs to it
fn plan_landing(from: Point, bounds: &Rect, config: &MoveConfig) -> Approach {
    let mut rng = rand::thread_rng();
    let destination = Humanizer::with_rng(&mut rng).box_point(bounds, config.padding_percentage);
    plan_approach(
        &mut rng,
        from,
        destination,
        bounds,
        config.overshoot_threshold,
        &config.path,
    )
}

async fn pause(ms: u64) {
    if ms > 0 {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
}

async fn rest(base_ms: u64, randomize: bool) {
    let wait = Humanizer::new().rest(base_ms, randomize);
    if !wait.is_zero() {
        tokio::time::sleep(wait).await;
    }
}

/// Human-like pointer controller for one surface
pub struct Cursor<S: Surface> {
    shared: Arc<Shared<S>>,
    defaults: CursorDefaults,
    shutdown: watch::Sender<bool>,
    idle_task: JoinHandle<()>,
}

impl<S: Surface> Cursor<S> {
    /// Create a cursor at `start` and spawn its idle task
    ///
    /// `idle_motion` decides whether the pointer wanders while no directed
    /// operation runs; it can be flipped later with
    /// [`toggle_idle_motion`](Self::toggle_idle_motion).
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(surface: S, start: Point, idle_motion: bool, defaults: CursorDefaults) -> Self {
        let shared = Arc::new(Shared {
            surface,
            state: CursorState::new(start, idle_motion),
        });
        let (shutdown, shutdown_receiver) = watch::channel(false);
        let idle = settings::resolve_idle(&defaults, &IdleOptions::default());
        let idle_task = tokio::spawn(idle::run(shared.clone(), idle, shutdown_receiver));

        Self {
            shared,
            defaults,
            shutdown,
            idle_task,
        }
    }

    /// The surface this cursor drives
    pub fn surface(&self) -> &S {
        &self.shared.surface
    }

    /// Current pointer position
    pub fn location(&self) -> Point {
        self.shared.state.position()
    }

    /// Enable or disable background idle motion
    pub fn toggle_idle_motion(&self, enabled: bool) {
        self.shared.state.set_suppressed(!enabled);
    }

    /// Whether idle motion is currently allowed to run
    pub fn idle_motion_enabled(&self) -> bool {
        !self.shared.state.is_suppressed()
    }

    /// Move onto a random point of `target`
    ///
    /// The target is located and measured again on every attempt. When it has
    /// shifted by the time the pointer arrives, the move starts over, up to
    /// `max_tries` times in total.
    pub async fn move_to_target(
        &self,
        target: impl Into<Target<S::Element>>,
        options: &MoveOptions,
    ) -> Result<()> {
        let config = settings::resolve_move_to_target(&self.defaults, options);
        self.directed_move(&target.into(), &config).await
    }

    async fn directed_move(&self, target: &Target<S::Element>, config: &MoveConfig) -> Result<()> {
        let guard = self.shared.state.take_pointer();
        self.shared.approach(target, config).await?;
        drop(guard);

        rest(config.move_delay, config.randomize_move_delay).await;
        Ok(())
    }

    /// Move onto an absolute point, without verification or retries
    pub async fn move_to(&self, destination: Point, options: &MoveOptions) -> Result<()> {
        let config = settings::resolve_move_to(&self.defaults, options);

        let guard = self.shared.state.take_pointer();
        let route = path(self.location(), destination, &config.path);
        self.shared.trace(&route, false).await;
        drop(guard);

        rest(config.move_delay, config.randomize_move_delay).await;
        Ok(())
    }

    /// Click, optionally moving onto `target` first
    ///
    /// The rest configured by `move_delay` is taken once, after the button is
    /// released. Failures to press or release are logged and ignored.
    pub async fn click(
        &self,
        target: Option<Target<S::Element>>,
        options: &ClickOptions,
    ) -> Result<()> {
        let config = settings::resolve_click(&self.defaults, options);

        let guard = self.shared.state.take_pointer();
        if let Some(target) = target {
            let movement = MoveConfig {
                move_delay: 0,
                ..config.movement
            };
            self.directed_move(&target, &movement).await?;
        }

        pause(config.hesitate).await;
        self.shared
            .press(PointerEvent::Down {
                button: config.button,
                click_count: config.click_count,
            })
            .await;
        pause(config.wait_for_click).await;
        self.shared
            .press(PointerEvent::Up {
                button: config.button,
                click_count: config.click_count,
            })
            .await;
        drop(guard);

        rest(
            config.movement.move_delay,
            config.movement.randomize_move_delay,
        )
        .await;
        Ok(())
    }

    /// Press a button at the current position, e.g. to start a drag
    ///
    /// Unlike [`click`](Self::click), dispatch failures are returned.
    pub async fn mouse_down(&self, options: &ClickOptions) -> Result<()> {
        let config = settings::resolve_click(&self.defaults, options);
        self.shared
            .surface
            .dispatch(PointerEvent::Down {
                button: config.button,
                click_count: config.click_count,
            })
            .await?;
        Ok(())
    }

    /// Release a button at the current position
    pub async fn mouse_up(&self, options: &ClickOptions) -> Result<()> {
        let config = settings::resolve_click(&self.defaults, options);
        self.shared
            .surface
            .dispatch(PointerEvent::Up {
                button: config.button,
                click_count: config.click_count,
            })
            .await?;
        Ok(())
    }
}

impl<S: Surface> Drop for Cursor<S> {
    fn drop(&mut self) {
        // Stop an idle path mid-flight, then end the task
        self.shared.state.set_suppressed(true);
        self.shutdown.send_replace(true);
        self.idle_task.abort();
    }
}
