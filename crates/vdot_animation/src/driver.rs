//! Loop driver
//!
//! A start/stop-able repeating timer. While running, it invokes one tick
//! callback every `period`. The driver does not own a thread: the host feeds
//! it elapsed time through [`LoopDriver::advance`] (or blocks in
//! [`LoopDriver::run_blocking`]), and the driver fires however many ticks
//! fall due. Everything runs on the caller's thread.
//!
//! The tick callback receives a mutable context supplied by the host on each
//! advance, so the callback itself does not need to capture shared state.
//!
//! ```
//! use std::time::Duration;
//! use vdot_animation::{LoopControl, LoopDriver};
//!
//! let mut driver = LoopDriver::new(Duration::from_millis(30));
//! let mut count = 0u32;
//!
//! driver.start(|count: &mut u32| {
//!     *count += 1;
//!     if *count == 3 { LoopControl::Break } else { LoopControl::Continue }
//! });
//!
//! driver.advance(Duration::from_millis(300), &mut count);
//! assert_eq!(count, 3);
//! assert!(!driver.is_running());
//! ```

use std::thread;
use std::time::{Duration, Instant};

/// Default tick period
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(30);

/// Shortest period the driver will run at
const MIN_TICK_PERIOD: Duration = Duration::from_millis(1);

/// What the loop should do after a tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopControl {
    /// Keep ticking
    Continue,
    /// Stop the loop after this tick
    Break,
}

/// Tick callback type
pub type TickCallback<C> = Box<dyn FnMut(&mut C) -> LoopControl>;

/// Fixed-period repeating timer with at most one installed callback
pub struct LoopDriver<C> {
    period: Duration,
    tick: Option<TickCallback<C>>,
    /// Time accumulated since the last fired tick
    pending: Duration,
    total_ticks: u64,
}

impl<C> LoopDriver<C> {
    /// Create a stopped driver ticking every `period` (at least 1ms)
    pub fn new(period: Duration) -> Self {
        Self {
            period: period.max(MIN_TICK_PERIOD),
            tick: None,
            pending: Duration::ZERO,
            total_ticks: 0,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// A callback is installed exactly while this is true
    pub fn is_running(&self) -> bool {
        self.tick.is_some()
    }

    /// Ticks fired over the driver's lifetime
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Install `tick` and start the loop
    ///
    /// Does nothing and returns `false` if the loop is already running; the
    /// callback installed first stays in place.
    pub fn start<F>(&mut self, tick: F) -> bool
    where
        F: FnMut(&mut C) -> LoopControl + 'static,
    {
        if self.is_running() {
            return false;
        }
        tracing::debug!("LoopDriver: start (period={:?})", self.period);
        self.pending = Duration::ZERO;
        self.tick = Some(Box::new(tick));
        true
    }

    /// Stop the loop and drop the callback
    ///
    /// Returns `false` if the loop was not running.
    pub fn stop(&mut self) -> bool {
        if self.tick.take().is_none() {
            return false;
        }
        tracing::debug!("LoopDriver: stop after {} ticks", self.total_ticks);
        self.pending = Duration::ZERO;
        true
    }

    /// Account for `elapsed` wall time and fire every tick that fell due
    ///
    /// Returns the number of ticks fired. A tick returning
    /// [`LoopControl::Break`] stops the loop immediately; leftover time is
    /// discarded.
    pub fn advance(&mut self, elapsed: Duration, ctx: &mut C) -> usize {
        if !self.is_running() {
            return 0;
        }

        self.pending += elapsed;
        let mut fired = 0;
        while self.pending >= self.period {
            self.pending -= self.period;
            let Some(tick) = self.tick.as_mut() else {
                break;
            };
            let control = tick(ctx);
            fired += 1;
            self.total_ticks += 1;
            tracing::trace!("LoopDriver: tick {} -> {:?}", self.total_ticks, control);
            if control == LoopControl::Break {
                self.stop();
                break;
            }
        }
        fired
    }

    /// Drive the loop in real time on the current thread until it stops
    ///
    /// Sleeps until each tick is due, then fires it. Returns the number of
    /// ticks fired. Returns immediately if the loop is not running.
    pub fn run_blocking(&mut self, ctx: &mut C) -> usize {
        let mut fired = 0;
        let mut last = Instant::now();
        while self.is_running() {
            let due = last + self.period.saturating_sub(self.pending);
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
            let now = Instant::now();
            fired += self.advance(now - last, ctx);
            last = now;
        }
        fired
    }
}

impl<C> Default for LoopDriver<C> {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_PERIOD)
    }
}

impl<C> std::fmt::Debug for LoopDriver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopDriver")
            .field("period", &self.period)
            .field("running", &self.is_running())
            .field("pending", &self.pending)
            .field("total_ticks", &self.total_ticks)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counters {
        first: u32,
        second: u32,
    }

    #[test]
    fn test_tick_count_matches_elapsed_over_period() {
        let mut driver = LoopDriver::new(Duration::from_millis(30));
        let mut counters = Counters::default();

        driver.start(|c: &mut Counters| {
            c.first += 1;
            LoopControl::Continue
        });

        assert_eq!(driver.advance(Duration::from_millis(300), &mut counters), 10);
        assert_eq!(counters.first, 10);
        assert!(driver.is_running());
    }

    #[test]
    fn test_double_start_installs_one_callback() {
        let mut driver = LoopDriver::new(Duration::from_millis(30));
        let mut counters = Counters::default();

        assert!(driver.start(|c: &mut Counters| {
            c.first += 1;
            LoopControl::Continue
        }));
        assert!(!driver.start(|c: &mut Counters| {
            c.second += 1;
            LoopControl::Continue
        }));

        driver.advance(Duration::from_millis(600), &mut counters);
        assert_eq!(counters.first, 20);
        assert_eq!(counters.second, 0);
    }

    #[test]
    fn test_partial_periods_accumulate() {
        let mut driver = LoopDriver::new(Duration::from_millis(30));
        let mut count = 0u32;
        driver.start(|n: &mut u32| {
            *n += 1;
            LoopControl::Continue
        });

        assert_eq!(driver.advance(Duration::from_millis(20), &mut count), 0);
        assert_eq!(driver.advance(Duration::from_millis(20), &mut count), 1);
        assert_eq!(driver.advance(Duration::from_millis(20), &mut count), 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut driver: LoopDriver<u32> = LoopDriver::default();
        assert!(!driver.stop());

        driver.start(|_| LoopControl::Continue);
        assert!(driver.stop());
        assert!(!driver.stop());

        let mut count = 0;
        assert_eq!(driver.advance(Duration::from_secs(1), &mut count), 0);
    }

    #[test]
    fn test_break_stops_loop() {
        let mut driver = LoopDriver::new(Duration::from_millis(10));
        let mut count = 0u32;
        driver.start(|n: &mut u32| {
            *n += 1;
            if *n == 4 {
                LoopControl::Break
            } else {
                LoopControl::Continue
            }
        });

        assert_eq!(driver.advance(Duration::from_secs(1), &mut count), 4);
        assert!(!driver.is_running());
        assert_eq!(driver.total_ticks(), 4);

        // Restart works after a break
        assert!(driver.start(|n: &mut u32| {
            *n += 100;
            LoopControl::Break
        }));
        driver.advance(Duration::from_millis(10), &mut count);
        assert_eq!(count, 104);
    }

    #[test]
    fn test_run_blocking_until_break() {
        let mut driver = LoopDriver::new(Duration::from_millis(1));
        let mut count = 0u32;
        driver.start(|n: &mut u32| {
            *n += 1;
            if *n == 3 {
                LoopControl::Break
            } else {
                LoopControl::Continue
            }
        });

        assert_eq!(driver.run_blocking(&mut count), 3);
        assert_eq!(count, 3);
    }

    #[test]
    fn test_zero_period_is_clamped() {
        let driver: LoopDriver<()> = LoopDriver::new(Duration::ZERO);
        assert_eq!(driver.period(), MIN_TICK_PERIOD);
    }
}
