use std::sync::{Arc, Mutex, Weak};

use tokio::sync::watch;
use tracing::trace;

use crate::placeholder::cycler::{PlaceholderCycler, PlaceholderState};
use crate::scheduler::{self, lock, ScheduledTask};

struct AnimatorInner {
    cycler: PlaceholderCycler,
    /// The only pending timer. Replacing it cancels the previous one.
    timer: Option<ScheduledTask>,
    running: bool,
    text_tx: watch::Sender<String>,
}

/// Plays a [`PlaceholderCycler`] back in real time.
///
/// Each tick shows one frame and schedules the next one after the frame's
/// delay. Stopping or dropping the animator cancels the pending timer; a
/// timer that still fires afterwards finds nothing to update.
pub struct PlaceholderAnimator {
    inner: Arc<Mutex<AnimatorInner>>,
}

impl PlaceholderAnimator {
    pub fn new(cycler: PlaceholderCycler) -> Self {
        let (text_tx, _) = watch::channel(String::new());
        Self {
            inner: Arc::new(Mutex::new(AnimatorInner {
                cycler,
                timer: None,
                running: false,
                text_tx,
            })),
        }
    }

    /// Start playing. Does nothing if already running.
    pub fn start(&self) {
        {
            let mut inner = lock(&self.inner);
            if inner.running {
                return;
            }
            inner.running = true;
        }
        tick(&Arc::downgrade(&self.inner));
    }

    pub fn stop(&self) {
        let pending = {
            let mut inner = lock(&self.inner);
            inner.running = false;
            inner.timer.take()
        };
        if let Some(timer) = pending {
            timer.cancel();
        }
    }

    /// Stop, rewind to the first phrase and start again.
    pub fn restart(&self) {
        self.stop();
        lock(&self.inner).cycler.reset();
        self.start();
    }

    pub fn is_running(&self) -> bool {
        lock(&self.inner).running
    }

    pub fn current(&self) -> String {
        lock(&self.inner).text_tx.borrow().clone()
    }

    pub fn state(&self) -> PlaceholderState {
        lock(&self.inner).cycler.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<String> {
        lock(&self.inner).text_tx.subscribe()
    }
}

impl Drop for PlaceholderAnimator {
    fn drop(&mut self) {
        self.stop();
    }
}

fn tick(weak: &Weak<Mutex<AnimatorInner>>) {
    let Some(inner) = weak.upgrade() else {
        return;
    };

    let previous = {
        let mut guard = lock(&inner);
        if !guard.running {
            return;
        }
        let Some(frame) = guard.cycler.next() else {
            return;
        };
        trace!("placeholder frame {:?}", frame.text);
        guard.text_tx.send_replace(frame.text);

        let next = weak.clone();
        let timer = scheduler::schedule(frame.delay, move || tick(&next));
        guard.timer.replace(timer)
    };
    // Outside the lock: this is the token of the timer that just fired.
    drop(previous);
}
