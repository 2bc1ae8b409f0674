use std::time::{Duration, Instant};

/// Most updates run for one wake-up; a longer stall drops the backlog.
const MAX_STEPS_PER_TICK: u32 = 8;

/// Fixed-step scheduler for the update loop.
///
/// The event loop wakes up after every batch of input, far more often than
/// once per frame. Elapsed time is accumulated and converted into whole
/// steps so the simulation runs at a fixed rate however often it is ticked.
#[derive(Debug)]
pub struct FrameClock {
    step: Duration,
    last: Option<Instant>,
    accumulated: Duration,
}

impl FrameClock {
    pub fn new(step: Duration) -> Self {
        Self {
            step,
            last: None,
            accumulated: Duration::ZERO,
        }
    }

    /// Step length in seconds, the `dt` to pass to each update.
    pub fn step_secs(&self) -> f64 {
        self.step.as_secs_f64()
    }

    /// Number of updates due at `now`. The first tick only starts the clock.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let Some(last) = self.last.replace(now) else {
            return 0;
        };
        self.accumulated += now.saturating_duration_since(last);

        let mut steps = 0;
        while self.accumulated >= self.step && steps < MAX_STEPS_PER_TICK {
            self.accumulated -= self.step;
            steps += 1;
        }
        if self.accumulated >= self.step {
            log::debug!("Frame stalled, dropping {:?} of simulation", self.accumulated);
            self.accumulated = Duration::ZERO;
        }
        steps
    }
}
