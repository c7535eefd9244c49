//! Background driver for the clearance scheduler.
//!
//! The pile itself has no notion of wall-clock time; something has to call
//! `TablePile::on_tick` at a fixed cadence. Hosts with their own frame or
//! timer loop call it directly. Everyone else can spawn a `ClearanceTimer`.
//!
//! The timer holds only a weak reference: dropping the last `Arc` to the
//! pile ends the thread on its next wake-up.

use std::sync::{Arc, Weak};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam_channel::{RecvTimeoutError, Sender};
use tracing::{debug, warn};

use super::table::TablePile;
use crate::core::error::{PileError, PileResult};
use crate::layout::Disperser;
use crate::scene::Scene;

/// Thread ticking a pile at its configured interval.
///
/// Stops when `stop` is called, when dropped, or once the pile is gone.
#[derive(Debug)]
pub struct ClearanceTimer {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ClearanceTimer {
    /// Tick `pile` every `config().tick_interval()`.
    pub fn spawn<S, L>(pile: &Arc<TablePile<S, L>>) -> PileResult<Self>
    where
        S: Scene + 'static,
        L: Disperser + 'static,
    {
        let interval = pile.config().tick_interval();
        Self::spawn_with_interval(pile, interval)
    }

    /// Tick `pile` every `interval`.
    pub fn spawn_with_interval<S, L>(pile: &Arc<TablePile<S, L>>, interval: Duration) -> PileResult<Self>
    where
        S: Scene + 'static,
        L: Disperser + 'static,
    {
        if interval.is_zero() {
            return Err(PileError::InvalidConfig(
                "clearance timer interval must be non-zero".to_string(),
            ));
        }

        let pile: Weak<TablePile<S, L>> = Arc::downgrade(pile);
        let (stop_tx, stop_rx) = crossbeam_channel::bounded::<()>(1);

        let handle = std::thread::Builder::new()
            .name("table-pile-clearance".to_string())
            .spawn(move || {
                debug!(?interval, "clearance timer started");
                loop {
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => match pile.upgrade() {
                            Some(pile) => pile.on_tick(),
                            None => {
                                debug!("table pile dropped, clearance timer exiting");
                                break;
                            }
                        },
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!("clearance timer stopped");
            })
            .map_err(|e| PileError::TimerSpawn(e.to_string()))?;

        Ok(Self {
            stop: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Check if the timer thread is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stop the thread and wait for it to exit.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(stop) = self.stop.take() {
            // The thread may already be gone; a full or closed channel is fine.
            let _ = stop.try_send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("clearance timer thread panicked");
            }
        }
    }
}

impl Drop for ClearanceTimer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PileConfig;
    use crate::core::tick::Tick;
    use crate::scene::HeadlessScene;
    use std::time::Instant;

    fn shared_pile() -> Arc<TablePile<HeadlessScene>> {
        Arc::new(TablePile::new(HeadlessScene::new(), PileConfig::default()).unwrap())
    }

    #[test]
    fn test_timer_advances_clock() {
        let pile = shared_pile();
        let timer = ClearanceTimer::spawn_with_interval(&pile, Duration::from_millis(5)).unwrap();

        let deadline = Instant::now() + Duration::from_secs(5);
        while pile.current_tick() < Tick(3) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }

        assert!(timer.is_running());
        timer.stop();
        assert!(pile.current_tick() >= Tick(3));
    }

    #[test]
    fn test_stop_halts_ticks() {
        let pile = shared_pile();
        let timer = ClearanceTimer::spawn_with_interval(&pile, Duration::from_millis(5)).unwrap();
        timer.stop();

        let stopped_at = pile.current_tick();
        std::thread::sleep(Duration::from_millis(30));
        assert_eq!(pile.current_tick(), stopped_at);
    }

    #[test]
    fn test_exits_when_pile_dropped() {
        let pile = shared_pile();
        let timer = ClearanceTimer::spawn_with_interval(&pile, Duration::from_millis(5)).unwrap();
        drop(pile);

        let deadline = Instant::now() + Duration::from_secs(5);
        while timer.is_running() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(!timer.is_running());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let pile = shared_pile();
        let err = ClearanceTimer::spawn_with_interval(&pile, Duration::ZERO).unwrap_err();
        assert!(matches!(err, PileError::InvalidConfig(_)));
    }
}
