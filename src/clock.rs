//! Frame Clock
//!
//! Tracks elapsed wall-clock time and paces frames to a target rate.
//!
//! Gameplay logic never accumulates the deltas returned by [`Clock::tick`].
//! Rounds measure time as `now() - round_start`, so a slow frame shortens
//! nothing and a fast one adds nothing.

use std::time::{Duration, Instant};

/// Milliseconds one frame is allowed to take at `target_fps`.
///
/// A rate of zero means "don't pace at all".
pub fn frame_budget_ms(target_fps: u32) -> u64 {
    if target_fps == 0 {
        0
    } else {
        (1000 / target_fps as u64).max(1)
    }
}

/// Source of monotonic time plus frame pacing.
pub trait Clock {
    /// Milliseconds since the clock's epoch. Never goes backwards.
    fn now(&self) -> u64;

    /// Wait out the rest of the current frame budget.
    ///
    /// Returns the milliseconds since the previous `tick` call (or since the
    /// clock was created, for the first call).
    fn tick(&mut self, target_fps: u32) -> u64;
}

/// Real clock backed by [`Instant`], pacing with `thread::sleep`.
pub struct SystemClock {
    epoch: Instant,
    last_tick: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let now = Instant::now();
        SystemClock {
            epoch: now,
            last_tick: now,
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        self.epoch.elapsed().as_millis() as u64
    }

    fn tick(&mut self, target_fps: u32) -> u64 {
        let budget = Duration::from_millis(frame_budget_ms(target_fps));
        let spent = self.last_tick.elapsed();
        if spent < budget {
            std::thread::sleep(budget - spent);
        }

        // Instant is monotonic, so this can't underflow
        let now = Instant::now();
        let delta = now.duration_since(self.last_tick);
        self.last_tick = now;
        delta.as_millis() as u64
    }
}

/// Deterministic clock for tests and scripted runs.
///
/// Time only moves when [`ManualClock::advance`] or [`Clock::tick`] is called.
/// Each tick advances by exactly one frame budget.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: u64,
    last_tick: u64,
}

impl ManualClock {
    /// Starts the clock at `epoch` milliseconds.
    pub fn starting_at(epoch: u64) -> Self {
        ManualClock {
            now: epoch,
            last_tick: epoch,
        }
    }

    /// Moves time forward without counting a frame.
    pub fn advance(&mut self, ms: u64) {
        self.now += ms;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::starting_at(0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now
    }

    fn tick(&mut self, target_fps: u32) -> u64 {
        let budget = frame_budget_ms(target_fps);
        if self.now - self.last_tick < budget {
            self.now = self.last_tick + budget;
        }
        let delta = self.now - self.last_tick;
        self.last_tick = self.now;
        delta
    }
}
