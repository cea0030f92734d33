//! Authoritative pointer state shared by a cursor and its idle task

use parking_lot::Mutex;
use tokio::sync::watch;

use crate::geometry::Point;

/// Pointer position and the idle-suppression flag
///
/// Suppression lives in a watch channel so the idle task can sleep until a
/// directed operation hands the pointer back.
pub(crate) struct CursorState {
    position: Mutex<Point>,
    suppressed: watch::Sender<bool>,
}

impl CursorState {
    pub fn new(start: Point, idle_motion: bool) -> Self {
        let (suppressed, _) = watch::channel(!idle_motion);
        Self {
            position: Mutex::new(start),
            suppressed,
        }
    }

    pub fn position(&self) -> Point {
        *self.position.lock()
    }

    pub fn set_position(&self, position: Point) {
        *self.position.lock() = position;
    }

    pub fn is_suppressed(&self) -> bool {
        *self.suppressed.borrow()
    }

    /// Set the flag, returning its previous value
    pub fn set_suppressed(&self, suppressed: bool) -> bool {
        self.suppressed.send_replace(suppressed)
    }

    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.suppressed.subscribe()
    }

    /// Suppress idle motion until the returned guard drops
    pub fn take_pointer(&self) -> PointerGuard<'_> {
        let previous = self.set_suppressed(true);
        PointerGuard {
            state: self,
            previous,
        }
    }
}

/// Restores the suppression flag a directed operation found on entry
pub(crate) struct PointerGuard<'a> {
    state: &'a CursorState,
    previous: bool,
}

impl Drop for PointerGuard<'_> {
    fn drop(&mut self) {
        self.state.set_suppressed(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_previous_flag() {
        let state = CursorState::new(Point::new(1.0, 2.0), true);
        assert!(!state.is_suppressed());

        {
            let _outer = state.take_pointer();
            assert!(state.is_suppressed());
            {
                let _inner = state.take_pointer();
                assert!(state.is_suppressed());
            }
            // Inner guard restores the outer operation's suppression
            assert!(state.is_suppressed());
        }
        assert!(!state.is_suppressed());
    }

    #[test]
    fn test_guard_keeps_disabled_idle_disabled() {
        let state = CursorState::new(Point::default(), false);
        drop(state.take_pointer());
        assert!(state.is_suppressed());
    }

    #[test]
    fn test_position_updates() {
        let state = CursorState::new(Point::new(1.0, 2.0), false);
        state.set_position(Point::new(3.0, 4.0));
        assert_eq!(state.position(), Point::new(3.0, 4.0));
    }
}
