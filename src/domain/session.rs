use std::sync::atomic::{AtomicBool, Ordering};

/// Session-scoped state shared by the screens of one app session.
#[derive(Debug)]
pub struct SessionContext {
    user_id: String,
    first_show_pending: AtomicBool,
}

impl SessionContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            first_show_pending: AtomicBool::new(true),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Returns true exactly once per session: the first time the one-time
    /// prompt is due.
    pub fn take_first_show(&self) -> bool {
        self.first_show_pending.swap(false, Ordering::SeqCst)
    }

    pub fn first_show_pending(&self) -> bool {
        self.first_show_pending.load(Ordering::SeqCst)
    }
}
