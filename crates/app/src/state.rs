//! Shared UI-thread state
//!
//! Native calls made while the controller is borrowed (`SetWindowPos`,
//! `ReleaseCapture`) re-enter the window procedure synchronously. State
//! cells are therefore only ever borrowed through `with_state`, which skips
//! the nested message instead of panicking on a double borrow.

use std::cell::RefCell;

/// Run `f` against the value in `cell`.
///
/// Returns `None` when the cell is empty or already borrowed further up the
/// stack.
pub fn with_state<T, R>(cell: &RefCell<Option<T>>, f: impl FnOnce(&mut T) -> R) -> Option<R> {
    let mut guard = cell.try_borrow_mut().ok()?;
    guard.as_mut().map(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Gesture {
        active: bool,
        capture_lost: usize,
    }

    impl Gesture {
        /// Ending a gesture releases capture, which re-enters with a
        /// capture-changed notification
        fn release(&mut self, cell: &RefCell<Option<Gesture>>) -> Option<()> {
            self.active = false;
            with_state(cell, |g| g.capture_lost += 1)
        }
    }

    #[test]
    fn test_empty_cell_yields_none() {
        let cell: RefCell<Option<Gesture>> = RefCell::new(None);
        assert!(with_state(&cell, |g| g.active).is_none());
    }

    #[test]
    fn test_runs_against_value() {
        let cell = RefCell::new(Some(Gesture::default()));
        assert_eq!(with_state(&cell, |g| {
            g.active = true;
            g.active
        }), Some(true));
        assert!(cell.borrow().as_ref().is_some_and(|g| g.active));
    }

    #[test]
    fn test_nested_borrow_is_skipped() {
        let cell = RefCell::new(Some(Gesture {
            active: true,
            capture_lost: 0,
        }));

        let nested = with_state(&cell, |g| g.release(&cell));

        assert_eq!(nested, Some(None));
        let state = cell.borrow();
        let gesture = state.as_ref().unwrap();
        assert!(!gesture.active);
        assert_eq!(gesture.capture_lost, 0);
    }

    #[test]
    fn test_outstanding_shared_borrow_is_skipped() {
        let cell = RefCell::new(Some(Gesture::default()));
        let _reader = cell.borrow();
        assert!(with_state(&cell, |g| g.capture_lost += 1).is_none());
    }
}
