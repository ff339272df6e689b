//! Cancellable periodic timers driving elapsed-time polling.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use super::types::Tick;

/// Starts periodic callbacks; stopping them is up to the returned handle.
pub trait Scheduler {
    fn start(&mut self) -> TimerHandle;
}

/// Cancels its timer when cancelled explicitly or dropped.
#[derive(Debug)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub(crate) fn from_flag(cancelled: Arc<AtomicBool>) -> Self {
        Self { cancelled }
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    #[cfg(test)]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Runs each timer on its own thread, invoking `on_tick` every `period`.
pub struct ThreadScheduler {
    period: Duration,
    on_tick: Arc<dyn Fn() + Send + Sync>,
}

impl ThreadScheduler {
    pub fn new(period: Duration, on_tick: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            period,
            on_tick: Arc::new(on_tick),
        }
    }

    /// A scheduler whose ticks are posted to `tx`.
    pub fn posting(period: Duration, tx: Sender<Tick>) -> Self {
        Self::new(period, move || {
            let _ = tx.send(Tick);
        })
    }
}

impl Scheduler for ThreadScheduler {
    fn start(&mut self) -> TimerHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let on_tick = Arc::clone(&self.on_tick);
        let period = self.period;

        let spawned = thread::Builder::new()
            .name("tick".into())
            .spawn(move || {
                loop {
                    thread::sleep(period);
                    if flag.load(Ordering::Acquire) {
                        break;
                    }
                    on_tick();
                }
            });
        if let Err(e) = spawned {
            log::error!("could not start tick timer: {e}");
        }

        TimerHandle::from_flag(cancelled)
    }
}
