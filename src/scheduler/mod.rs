//! Cancellable timers.
//!
//! Every timer-driven effect (status rotation, placeholder typing) holds a
//! [`ScheduledTask`] token. Cancelling or dropping the token guarantees the
//! callback will not run afterwards.
//!
//! Must be called from within a tokio runtime.

use std::future::Future;
use std::ops::ControlFlow;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

/// Token for a pending or repeating timer. Aborts the timer on drop.
#[derive(Debug)]
pub struct ScheduledTask {
    handle: JoinHandle<()>,
}

impl ScheduledTask {
    /// Cancel the timer. A callback that has not started yet never runs.
    pub fn cancel(self) {
        // Drop does the abort.
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ScheduledTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Run a future as a cancellable task, e.g. an in-flight request.
pub fn spawn<F>(future: F) -> ScheduledTask
where
    F: Future<Output = ()> + Send + 'static,
{
    ScheduledTask {
        handle: tokio::spawn(future),
    }
}

/// Run `f` once after `delay`.
pub fn schedule<F>(delay: Duration, f: F) -> ScheduledTask
where
    F: FnOnce() + Send + 'static,
{
    let handle = tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        f();
    });
    ScheduledTask { handle }
}

/// Run `f` every `period`, first after one full period, until it returns
/// `ControlFlow::Break` or the token is cancelled.
pub fn schedule_repeating<F>(period: Duration, mut f: F) -> ScheduledTask
where
    F: FnMut() -> ControlFlow<()> + Send + 'static,
{
    let handle = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        loop {
            ticker.tick().await;
            if f().is_break() {
                break;
            }
        }
    });
    ScheduledTask { handle }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
