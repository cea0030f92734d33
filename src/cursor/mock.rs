//! Scripted surface for engine tests

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::geometry::{Point, Rect};

use super::surface::{PointerEvent, Selector, Surface, SurfaceError};

type Geometry = Box<dyn FnMut(usize) -> Option<Rect> + Send>;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Query(String),
    Wait(String),
    Scroll,
    BoundingBox,
    Viewport,
    Dispatch(PointerEvent),
}

#[derive(Debug, Clone)]
pub struct Record {
    pub at: Instant,
    pub call: Call,
}

/// One element (`#target`) whose box is produced by a closure over the
/// number of previous measurements
pub struct MockSurface {
    present: HashSet<String>,
    geometry: Mutex<Geometry>,
    measured: AtomicUsize,
    closed: AtomicBool,
    failing_moves: AtomicUsize,
    failing_buttons: AtomicBool,
    move_latency_ms: AtomicU64,
    records: Mutex<Vec<Record>>,
}

impl MockSurface {
    pub fn new(rect: Rect) -> Self {
        Self::with_geometry(move |_| Some(rect))
    }

    pub fn with_geometry<F>(geometry: F) -> Self
    where
        F: FnMut(usize) -> Option<Rect> + Send + 'static,
    {
        Self {
            present: ["#target".to_string()].into_iter().collect(),
            geometry: Mutex::new(Box::new(geometry)),
            measured: AtomicUsize::new(0),
            closed: AtomicBool::new(false),
            failing_moves: AtomicUsize::new(0),
            failing_buttons: AtomicBool::new(false),
            move_latency_ms: AtomicU64::new(0),
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn fail_next_moves(&self, n: usize) {
        self.failing_moves.store(n, Ordering::SeqCst);
    }

    pub fn fail_buttons(&self) {
        self.failing_buttons.store(true, Ordering::SeqCst);
    }

    /// Every move takes `ms` of (virtual) time to complete
    pub fn slow_moves(&self, ms: u64) {
        self.move_latency_ms.store(ms, Ordering::SeqCst);
    }

    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.records.lock().iter().filter(|r| pred(&r.call)).count()
    }

    /// Every dispatched move target, failed or not
    pub fn moves(&self) -> Vec<Point> {
        self.records
            .lock()
            .iter()
            .filter_map(|r| match r.call {
                Call::Dispatch(PointerEvent::Move { to, .. }) => Some(to),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.records.lock().push(Record {
            at: Instant::now(),
            call,
        });
    }
}

#[async_trait]
impl Surface for MockSurface {
    type Element = u32;

    async fn query_selector(&self, selector: &Selector) -> Result<Option<u32>, SurfaceError> {
        self.record(Call::Query(selector.to_string()));
        Ok(self.present.contains(selector.as_str()).then_some(1))
    }

    async fn wait_for_selector(
        &self,
        selector: &Selector,
        timeout: Duration,
    ) -> Result<(), SurfaceError> {
        self.record(Call::Wait(selector.to_string()));
        if self.present.contains(selector.as_str()) {
            Ok(())
        } else {
            Err(SurfaceError::Timeout(timeout))
        }
    }

    async fn scroll_into_view(&self, _element: &u32) -> Result<(), SurfaceError> {
        self.record(Call::Scroll);
        Ok(())
    }

    async fn bounding_box(&self, _element: &u32) -> Result<Option<Rect>, SurfaceError> {
        self.record(Call::BoundingBox);
        let n = self.measured.fetch_add(1, Ordering::SeqCst);
        let mut geometry = self.geometry.lock();
        Ok((*geometry)(n))
    }

    async fn viewport(&self) -> Result<Rect, SurfaceError> {
        self.record(Call::Viewport);
        Ok(Rect::new(0.0, 0.0, 1280.0, 720.0))
    }

    async fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    async fn dispatch(&self, event: PointerEvent) -> Result<(), SurfaceError> {
        self.record(Call::Dispatch(event));
        let latency = self.move_latency_ms.load(Ordering::SeqCst);
        if matches!(event, PointerEvent::Move { .. }) && latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        } else {
            tokio::task::yield_now().await;
        }

        if self.closed.load(Ordering::SeqCst) {
            return Err(SurfaceError::Closed);
        }
        match event {
            PointerEvent::Move { .. } => {
                let failing = self
                    .failing_moves
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
                if failing.is_ok() {
                    return Err(SurfaceError::Protocol("move rejected".into()));
                }
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => {
                if self.failing_buttons.load(Ordering::SeqCst) {
                    return Err(SurfaceError::Protocol("button rejected".into()));
                }
            }
        }
        Ok(())
    }
}
