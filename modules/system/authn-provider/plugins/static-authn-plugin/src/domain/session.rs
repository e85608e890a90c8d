//! In-memory sessions.

use std::sync::atomic::{AtomicU64, Ordering};

use authn_provider_sdk::{Principal, ServiceError, Session, SessionFactory};
use tracing::trace;
use uuid::Uuid;

/// Session with nothing to commit; tracks completion only.
pub struct InMemorySession {
    id: String,
    principal: Option<Principal>,
    completed: bool,
}

impl InMemorySession {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            principal: None,
            completed: false,
        }
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

impl Session for InMemorySession {
    fn id(&self) -> &str {
        &self.id
    }

    fn current_principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    fn set_current_principal(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    fn complete(&mut self) -> Result<(), ServiceError> {
        if self.completed {
            return Err(ServiceError::Session(format!(
                "session {} already completed",
                self.id
            )));
        }
        self.completed = true;
        trace!(session_id = %self.id, "Session completed");
        Ok(())
    }
}

/// Opens [`InMemorySession`]s with random ids.
#[derive(Default)]
pub struct InMemorySessionFactory {
    opened: AtomicU64,
}

impl InMemorySessionFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions opened so far.
    #[must_use]
    pub fn opened(&self) -> u64 {
        self.opened.load(Ordering::Relaxed)
    }
}

impl SessionFactory for InMemorySessionFactory {
    fn open(&self) -> Result<Box<dyn Session>, ServiceError> {
        self.opened.fetch_add(1, Ordering::Relaxed);
        Ok(Box::new(InMemorySession::new(Uuid::new_v4().to_string())))
    }
}
