//! Shared, task-safe handle to a court.

use crate::court::Court;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Clonable handle that serializes every caller through one lock.
///
/// Operations never await while holding the court, so the lock is held only
/// for the duration of one synchronous call.
#[derive(Clone)]
pub struct CourtService {
    court: Arc<Mutex<Court>>,
}

impl CourtService {
    pub fn new(court: Court) -> Self {
        Self {
            court: Arc::new(Mutex::new(court)),
        }
    }

    /// Run `op` with exclusive access to the court.
    pub async fn execute<T>(&self, op: impl FnOnce(&mut Court) -> T) -> T {
        let mut court = self.court.lock().await;
        op(&mut *court)
    }

    /// Hold the court across several calls.
    pub async fn lock(&self) -> MutexGuard<'_, Court> {
        self.court.lock().await
    }
}
