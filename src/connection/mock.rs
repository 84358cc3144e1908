//! In-memory connection for tests and offline clients.

use crate::connection::{status_outcome, Connection};
use crate::error::Result;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A [`Connection`] backed by a fixed route table
///
/// Unknown paths answer not-found. Every request is recorded, so tests can
/// assert on exactly which fetches a resolution performed.
#[derive(Debug, Default)]
pub struct MockConnection {
    routes: Mutex<HashMap<String, Value>>,
    statuses: Mutex<HashMap<String, u16>>,
    requests: Mutex<Vec<String>>,
}

impl MockConnection {
    /// Create a connection with no routes
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `path` with `body`
    pub fn with_route(self, path: impl Into<String>, body: Value) -> Self {
        self.add_route(path, body);
        self
    }

    /// Answer `path` with an HTTP status instead of a body
    ///
    /// `404` is reported as not-found, anything else as
    /// [`LifelineError::Status`](crate::error::LifelineError::Status).
    pub fn with_status(self, path: impl Into<String>, status: u16) -> Self {
        lock(&self.statuses).insert(path.into(), status);
        self
    }

    /// Add or replace a route on a shared connection
    pub fn add_route(&self, path: impl Into<String>, body: Value) {
        lock(&self.routes).insert(path.into(), body);
    }

    /// Every path requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    /// How many times `path` was requested
    pub fn request_count(&self, path: &str) -> usize {
        lock(&self.requests).iter().filter(|p| *p == path).count()
    }

    /// Forget the recorded requests
    pub fn clear_requests(&self) {
        lock(&self.requests).clear();
    }
}

impl Connection for MockConnection {
    fn get(&self, path: &str) -> Result<Option<Value>> {
        lock(&self.requests).push(path.to_string());

        if let Some(status) = lock(&self.statuses).get(path).copied() {
            return status_outcome(status, path);
        }
        Ok(lock(&self.routes).get(path).cloned())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
