use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// UI poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get the UI poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Background thread sending one `()` per period until cancelled.
///
/// Dropping the ticker cancels it and joins the thread.
pub struct Ticker {
    ticks: Receiver<()>,
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    pub fn every(period: Duration) -> Self {
        let (tick_tx, ticks) = mpsc::channel();
        let (stop, stop_rx) = mpsc::channel::<()>();

        let handle = thread::spawn(move || loop {
            match stop_rx.recv_timeout(period) {
                Err(RecvTimeoutError::Timeout) => {
                    if tick_tx.send(()).is_err() {
                        break;
                    }
                }
                // Stop requested or the ticker was dropped
                Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            }
        });

        Self {
            ticks,
            stop: Some(stop),
            handle: Some(handle),
        }
    }

    /// One tick per second, for the focus timer
    pub fn seconds() -> Self {
        Self::every(Duration::from_secs(1))
    }

    /// Number of ticks that arrived since the last call
    pub fn drain(&self) -> usize {
        self.ticks.try_iter().count()
    }

    pub fn cancel(&mut self) {
        // Disconnecting the stop channel wakes the thread immediately
        self.stop.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.handle.is_none()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.cancel();
    }
}
