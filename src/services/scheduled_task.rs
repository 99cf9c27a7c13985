//! Owned handles for spawned timers.
//!
//! A [`ScheduledTask`] aborts its task when cancelled or dropped, so a slot of
//! type `Option<ScheduledTask>` holds at most one pending timer of a kind and
//! replacing the slot tears the previous one down.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a spawned task that is aborted when the handle goes away.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: Option<JoinHandle<()>>,
}

impl ScheduledTask {
    /// Spawn `future` on the current runtime.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self {
            handle: Some(tokio::spawn(future)),
        }
    }

    /// Run `future` once `delay` has elapsed.
    pub fn after<F>(delay: Duration, future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self::spawn(async move {
            tokio::time::sleep(delay).await;
            future.await;
        })
    }

    /// Abort the task now.
    pub fn cancel(mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Let the task run to completion on its own.
    pub fn detach(mut self) {
        self.handle.take();
    }

    /// Whether the task has completed or been aborted.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
