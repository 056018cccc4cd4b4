#![forbid(unsafe_code)]

//! Background tick source and the single-trace player loop.
//!
//! [`TickDriver`] runs a thread that sends a [`Pulse`] every interval over a
//! channel. The owning loop receives pulses between steps, so no controller
//! operation is ever interrupted mid-step. Stopping a driver signals the
//! thread, joins it, then drains any pulses already queued so a stale pulse
//! can never be applied after `pause()` or `reset()`.

use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crate::metrics::PlaybackMetrics;
use crate::playback::{PlaybackController, PlaybackError, PlaybackStatus, TickOutcome};
use crate::speed::Speed;

/// One scheduler tick. `seq` counts from 1 per driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pulse {
    pub seq: u64,
}

/// Stop flag observed by the driver thread.
#[derive(Clone)]
struct StopSignal {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopSignal {
    fn new() -> (Self, StopTrigger) {
        let inner = Arc::new((Mutex::new(false), Condvar::new()));
        let signal = Self {
            inner: Arc::clone(&inner),
        };
        (signal, StopTrigger { inner })
    }

    /// Wait for a stop or the timeout. Returns `true` if stopped.
    fn wait_timeout(&self, duration: Duration) -> bool {
        let (lock, cvar) = &*self.inner;
        let stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        if *stopped {
            return true;
        }
        let (stopped, _) = cvar
            .wait_timeout_while(stopped, duration, |stopped| !*stopped)
            .unwrap_or_else(|e| e.into_inner());
        *stopped
    }
}

struct StopTrigger {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl StopTrigger {
    fn stop(&self) {
        let (lock, cvar) = &*self.inner;
        let mut stopped = lock.lock().unwrap_or_else(|e| e.into_inner());
        *stopped = true;
        cvar.notify_all();
    }
}

/// Fixed-interval pulse source on a background thread.
pub struct TickDriver {
    interval: Duration,
    receiver: mpsc::Receiver<Pulse>,
    trigger: StopTrigger,
    thread: Option<thread::JoinHandle<()>>,
}

impl std::fmt::Debug for TickDriver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickDriver")
            .field("interval", &self.interval)
            .field("running", &self.thread.is_some())
            .finish()
    }
}

impl TickDriver {
    /// Start emitting pulses every `interval`.
    pub fn spawn(interval: Duration) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel();
        let (signal, trigger) = StopSignal::new();
        let thread = thread::Builder::new()
            .name("sortviz-tick".into())
            .spawn(move || {
                let mut seq = 0;
                loop {
                    if signal.wait_timeout(interval) {
                        break;
                    }
                    seq += 1;
                    if sender.send(Pulse { seq }).is_err() {
                        break;
                    }
                }
            })?;
        tracing::debug!(
            message = "driver.start",
            interval_ms = interval.as_millis() as u64
        );
        Ok(Self {
            interval,
            receiver,
            trigger,
            thread: Some(thread),
        })
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next pulse; `None` if the driver thread has exited.
    pub fn recv(&self) -> Option<Pulse> {
        self.receiver.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Result<Pulse, RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    pub fn try_recv(&self) -> Result<Pulse, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Signal, join, and drain. Returns the number of discarded pulses.
    pub fn stop(mut self) -> usize {
        self.trigger.stop();
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
        let stale = self.receiver.try_iter().count();
        tracing::debug!(message = "driver.stop", stale);
        stale
    }
}

impl Drop for TickDriver {
    fn drop(&mut self) {
        // Don't join in drop to avoid blocking.
        self.trigger.stop();
    }
}

/// A controller wired to its own tick driver.
///
/// The driver runs only while the controller is `Playing`; every operation
/// that leaves `Playing` stops it synchronously.
#[derive(Debug)]
pub struct Player {
    controller: PlaybackController,
    driver: Option<TickDriver>,
}

impl Player {
    #[must_use]
    pub fn new(controller: PlaybackController) -> Self {
        Self {
            controller,
            driver: None,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    #[must_use]
    pub fn is_driving(&self) -> bool {
        self.driver.is_some()
    }

    pub fn play(&mut self) -> Result<(), PlaybackError> {
        self.controller.start()?;
        self.ensure_driver()
    }

    pub fn pause(&mut self) -> Result<(), PlaybackError> {
        self.controller.pause()?;
        self.halt_driver();
        Ok(())
    }

    pub fn reset(&mut self) {
        self.halt_driver();
        self.controller.reset();
    }

    pub fn step_forward(&mut self) -> Result<(), PlaybackError> {
        self.controller.step_forward()
    }

    pub fn step_backward(&mut self) -> Result<(), PlaybackError> {
        self.controller.step_backward()
    }

    pub fn seek(&mut self, target: isize) -> Result<(), PlaybackError> {
        self.controller.seek(target)
    }

    /// Change speed; a running driver is restarted at the new interval.
    pub fn set_speed(&mut self, speed: Speed) -> Result<(), PlaybackError> {
        self.controller.set_speed(speed);
        if self.driver.is_some() {
            self.halt_driver();
            self.ensure_driver()?;
        }
        Ok(())
    }

    /// Apply every pulse already queued without blocking.
    ///
    /// Returns the number of steps advanced.
    pub fn pump(&mut self) -> usize {
        let mut advanced = 0;
        while let Some(driver) = &self.driver {
            let Ok(_pulse) = driver.try_recv() else {
                break;
            };
            match self.controller.tick() {
                TickOutcome::Advanced => advanced += 1,
                TickOutcome::Finished => {
                    advanced += 1;
                    self.halt_driver();
                }
                TickOutcome::Ignored => self.halt_driver(),
            }
        }
        advanced
    }

    /// Play to the last step, calling `on_step` after every advance.
    ///
    /// Blocks for roughly `steps × tick_interval`.
    pub fn run_to_end(
        &mut self,
        mut on_step: impl FnMut(&PlaybackController),
    ) -> Result<PlaybackMetrics, PlaybackError> {
        if self.controller.status() != PlaybackStatus::Playing {
            self.play()?;
        }
        self.ensure_driver()?;
        while self.controller.wants_tick() {
            let pulse = self.driver.as_ref().and_then(TickDriver::recv);
            if pulse.is_none() {
                self.halt_driver();
                return Err(PlaybackError::Driver(std::io::Error::other(
                    "tick driver stopped unexpectedly",
                )));
            }
            if self.controller.tick() != TickOutcome::Ignored {
                on_step(&self.controller);
            }
        }
        self.halt_driver();
        Ok(PlaybackMetrics::capture(&self.controller))
    }

    fn ensure_driver(&mut self) -> Result<(), PlaybackError> {
        if self.driver.is_none() && self.controller.wants_tick() {
            let driver =
                TickDriver::spawn(self.controller.tick_interval()).map_err(PlaybackError::Driver)?;
            self.driver = Some(driver);
        }
        Ok(())
    }

    fn halt_driver(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.stop();
        }
    }
}

impl Drop for Player {
    fn drop(&mut self) {
        self.halt_driver();
    }
}
