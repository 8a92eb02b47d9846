//! Loading state shared by the REST handlers.
//!
//! The browser disables its submit control while a generation is running.
//! The server enforces the same rule: [`try_begin`] claims the single
//! in-flight slot or refuses, and the returned [`InFlight`] guard releases it
//! when the generation finishes or the request is dropped. There is no
//! queue.

use std::sync::{Arc, Mutex};

use kalam::pipeline::Generation;
use serde::Serialize;

/// State of the one output pane this server drives.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    /// A generation is in flight.
    pub loading: bool,
    /// Output of the most recent finished generation. Cleared when a new
    /// one starts.
    pub last: Option<Generation>,
}

/// Shared handle to the session state.
pub type SharedSession = Arc<Mutex<SessionState>>;

/// Holds the in-flight slot until dropped.
pub struct InFlight {
    session: SharedSession,
}

/// Claim the in-flight slot, or return `None` if a generation is running.
pub fn try_begin(session: &SharedSession) -> Option<InFlight> {
    let mut state = session.lock().unwrap_or_else(|e| e.into_inner());
    if state.loading {
        return None;
    }
    state.loading = true;
    state.last = None;
    Some(InFlight {
        session: session.clone(),
    })
}

impl InFlight {
    /// Record the finished output and release the slot.
    pub fn finish(self, generation: &Generation) {
        let mut state = self.session.lock().unwrap_or_else(|e| e.into_inner());
        state.last = Some(generation.clone());
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let mut state = self.session.lock().unwrap_or_else(|e| e.into_inner());
        state.loading = false;
    }
}

/// Copy of the current state for serialization.
pub fn snapshot(session: &SharedSession) -> SessionState {
    session.lock().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kalam::Mode;

    fn sample() -> Generation {
        Generation {
            mode: Mode::Ask,
            display_text: "hi".into(),
            blocks: vec![],
            failed: false,
        }
    }

    #[test]
    fn second_claim_is_refused_until_release() {
        let session = SharedSession::default();
        let first = try_begin(&session).unwrap();
        assert!(snapshot(&session).loading);
        assert!(try_begin(&session).is_none());

        drop(first);
        assert!(!snapshot(&session).loading);
        assert!(try_begin(&session).is_some());
    }

    #[test]
    fn finish_records_output_and_releases() {
        let session = SharedSession::default();
        try_begin(&session).unwrap().finish(&sample());

        let state = snapshot(&session);
        assert!(!state.loading);
        assert_eq!(state.last.unwrap().display_text, "hi");
    }

    #[test]
    fn new_claim_clears_previous_output() {
        let session = SharedSession::default();
        try_begin(&session).unwrap().finish(&sample());
        let _slot = try_begin(&session).unwrap();
        assert!(snapshot(&session).last.is_none());
    }
}
