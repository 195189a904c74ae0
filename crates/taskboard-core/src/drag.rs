//! Drag-to-reorder gesture, independent of whatever recognises the gesture.
//!
//! Indices reported through [`DragHandler`] are positions in the displayed
//! list, not in the underlying task sequence.

use tracing::debug;

/// Callbacks an interaction layer drives while the user drags a row.
pub trait DragHandler {
    fn on_drag_start(&mut self, index: usize);

    /// `destination` is `None` when the gesture was released outside any
    /// drop target or aborted.
    fn on_drag_end(&mut self, source: usize, destination: Option<usize>);
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        origin: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Commit { source: usize, destination: usize },
    Cancelled,
    /// An end arrived with no drag in progress.
    Ignored,
}

#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn origin(&self) -> Option<usize> {
        match self.state {
            DragState::Idle => None,
            DragState::Dragging { origin } => Some(origin),
        }
    }

    /// Returns false when a drag is already active.
    pub fn start(&mut self, index: usize) -> bool {
        if let DragState::Dragging { origin } = self.state {
            debug!(origin, index, "drag start ignored: drag already active");
            return false;
        }
        self.state = DragState::Dragging { origin: index };
        true
    }

    pub fn finish(&mut self, source: usize, destination: Option<usize>) -> DragOutcome {
        let DragState::Dragging { origin } = std::mem::take(&mut self.state) else {
            debug!(source, "drag end ignored: no drag active");
            return DragOutcome::Ignored;
        };
        if origin != source {
            debug!(origin, source, "drag end reported a different source");
        }

        match destination {
            Some(destination) => DragOutcome::Commit {
                source,
                destination,
            },
            None => DragOutcome::Cancelled,
        }
    }

    pub fn cancel(&mut self) -> DragOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DragOutcome::Ignored,
            DragState::Dragging { .. } => DragOutcome::Cancelled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DragOutcome, DragSession, DragState};

    #[test]
    fn commit_returns_to_idle() {
        let mut session = DragSession::default();
        assert!(session.start(2));
        assert_eq!(session.state(), DragState::Dragging { origin: 2 });
        assert_eq!(
            session.finish(2, Some(0)),
            DragOutcome::Commit {
                source: 2,
                destination: 0
            }
        );
        assert_eq!(session.state(), DragState::Idle);
    }

    #[test]
    fn release_without_target_cancels() {
        let mut session = DragSession::default();
        session.start(1);
        assert_eq!(session.finish(1, None), DragOutcome::Cancelled);
        assert_eq!(session.origin(), None);
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let mut session = DragSession::default();
        assert!(session.start(0));
        assert!(!session.start(3));
        assert_eq!(session.origin(), Some(0));
        assert_eq!(session.cancel(), DragOutcome::Cancelled);
        assert_eq!(session.cancel(), DragOutcome::Ignored);
    }

    #[test]
    fn end_without_start_is_ignored() {
        let mut session = DragSession::default();
        assert_eq!(session.finish(0, Some(1)), DragOutcome::Ignored);
    }
}
