//! Scoped ownership of a [`Session`] with guaranteed completion.

use authn_provider_sdk::Session;
use tracing::{debug, error};

/// Completes the wrapped session exactly once: explicitly through
/// [`SessionGuard::close`], or on drop if the attempt unwinds first.
///
/// Completion failures are logged and never reported to the caller.
pub struct SessionGuard {
    session: Box<dyn Session>,
    closed: bool,
}

impl SessionGuard {
    #[must_use]
    pub fn new(session: Box<dyn Session>) -> Self {
        Self {
            session,
            closed: false,
        }
    }

    pub fn session_mut(&mut self) -> &mut dyn Session {
        &mut *self.session
    }

    pub fn close(&mut self) {
        if self.closed {
            return;
        }
        self.closed = true;

        match self.session.complete() {
            Ok(()) => debug!(session_id = self.session.id(), "Session completed"),
            Err(e) => error!(
                session_id = self.session.id(),
                error = %e,
                "Failed to complete authentication session"
            ),
        }
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.close();
    }
}
