//! Background tick loop with bounded failure escalation.
//!
//! Runs a caller-supplied tick callback roughly once per interval on a tokio
//! task. Failures are retried after a short delay; a run of consecutive
//! failures halts the loop so a persistently broken callback cannot spin
//! forever. Stop is cooperative with a bounded wait.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;

use crate::libs::messages::Message;
use crate::{msg_error, msg_warning};

/// Timing and escalation parameters for the tick loop.
#[derive(Debug, Clone, Copy)]
pub struct TickerConfig {
    /// Delay between successful ticks.
    pub tick_interval: Duration,
    /// Delay before retrying after a failed tick.
    pub retry_delay: Duration,
    /// Consecutive failures after which the loop halts.
    pub max_failures: u32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            retry_delay: Duration::from_secs(2),
            max_failures: 5,
        }
    }
}

/// Handle to a running tick loop.
pub struct Ticker {
    handle: JoinHandle<()>,
    stop_flag: Arc<AtomicBool>,
    wake: Arc<Notify>,
    /// Consecutive failure count at the moment the loop halted, 0 while
    /// running normally.
    halted: Arc<AtomicU32>,
}

impl Ticker {
    /// Spawns the tick loop on the current tokio runtime.
    ///
    /// `tick` runs once per `tick_interval`. An `Err` return is logged and
    /// retried after `retry_delay`; `max_failures` consecutive errors halt
    /// the loop. A successful tick resets the failure count.
    pub fn spawn<F>(config: TickerConfig, mut tick: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + Send + 'static,
    {
        let stop_flag = Arc::new(AtomicBool::new(false));
        let wake = Arc::new(Notify::new());
        let halted = Arc::new(AtomicU32::new(0));

        let loop_stop = Arc::clone(&stop_flag);
        let loop_wake = Arc::clone(&wake);
        let loop_halted = Arc::clone(&halted);

        let handle = tokio::spawn(async move {
            let mut failures: u32 = 0;

            loop {
                // A stop requested before the first poll must not be lost.
                if loop_stop.load(Ordering::SeqCst) {
                    break;
                }

                let delay = if failures == 0 {
                    config.tick_interval
                } else {
                    config.retry_delay
                };

                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = loop_wake.notified() => {}
                }

                if loop_stop.load(Ordering::SeqCst) {
                    break;
                }

                match tick() {
                    Ok(()) => {
                        failures = 0;
                    }
                    Err(e) => {
                        failures += 1;
                        msg_warning!(Message::TickFailed {
                            attempt: failures,
                            error: e.to_string(),
                        });

                        if failures >= config.max_failures {
                            loop_halted.store(failures, Ordering::SeqCst);
                            msg_error!(Message::TickerHalted(failures));
                            break;
                        }
                    }
                }
            }
        });

        Self {
            handle,
            stop_flag,
            wake,
            halted,
        }
    }

    /// Consecutive failure count the loop halted with, or `None` while it is
    /// still running (or stopped cleanly).
    pub fn halted_failures(&self) -> Option<u32> {
        match self.halted.load(Ordering::SeqCst) {
            0 => None,
            n => Some(n),
        }
    }

    /// Requests the loop to stop and waits up to `timeout` for it to exit.
    ///
    /// The loop checks the stop flag before and after every sleep, so a
    /// stop request interrupts the current wait immediately, even one
    /// issued before the task's first poll. If the task does not finish
    /// within `timeout` (a tick callback stuck in blocking code) it is
    /// abandoned rather than awaited further.
    pub async fn stop(self, timeout: Duration) {
        self.stop_flag.store(true, Ordering::SeqCst);
        // notify_one stores a permit, so a loop that has not yet reached
        // its first `notified()` still wakes immediately.
        self.wake.notify_one();

        if tokio::time::timeout(timeout, self.handle).await.is_err() {
            msg_warning!(Message::TickerStopTimeout);
        }
    }
}
