//! # Notifications
//!
//! The operator notification area. Components report disconnects and rejected moves here; the
//! console prints lines it has not shown yet once per UI cycle.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::info;
use std::sync::{Mutex, MutexGuard};

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A sink for operator-facing notification lines.
pub trait Notifications: Send + Sync {
    fn append_line(&self, line: &str);
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// In-memory notification area.
///
/// Every line is also written to the log at info level so it ends up in the session log. The
/// console prints the lines itself.
#[derive(Debug, Default)]
pub struct NotificationLog {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    lines: Vec<String>,
    shown: usize,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl NotificationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// All lines appended so far.
    pub fn lines(&self) -> Vec<String> {
        self.inner().lines.clone()
    }

    /// Lines appended since the last call, marking them as shown.
    pub fn take_unshown(&self) -> Vec<String> {
        let mut inner = self.inner();
        let unshown = inner.lines[inner.shown..].to_vec();
        inner.shown = inner.lines.len();
        unshown
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifications for NotificationLog {
    fn append_line(&self, line: &str) {
        info!("{}", line);
        self.inner().lines.push(String::from(line));
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
