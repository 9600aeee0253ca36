//! Time management utilities

use std::time::{Duration, Instant};

/// Measures the wall-clock time between consecutive frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_frame: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Start measuring from now
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Time since the previous lap (or since creation), restarting the measurement
    pub fn lap(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }
}

/// Accumulator turning variable frame times into a whole number of fixed ticks
///
/// Used when ticks and frames share one thread: every frame feeds its elapsed
/// time in and runs the returned number of ticks before drawing.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    accumulated: Duration,
    max_ticks_per_frame: u32,
}

impl FixedTimestep {
    /// Create an accumulator for the given tick length
    ///
    /// A zero `step` is raised to one nanosecond.
    pub fn new(step: Duration, max_ticks_per_frame: u32) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            accumulated: Duration::ZERO,
            max_ticks_per_frame: max_ticks_per_frame.max(1),
        }
    }

    /// Length of one tick
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Feed elapsed wall-clock time and get the number of ticks that are due
    ///
    /// At most `max_ticks_per_frame` ticks are returned; any backlog beyond
    /// that is dropped so a slow frame cannot trigger a catch-up spiral.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulated += elapsed;

        let mut ticks = 0;
        while self.accumulated >= self.step && ticks < self.max_ticks_per_frame {
            self.accumulated -= self.step;
            ticks += 1;
        }

        if ticks == self.max_ticks_per_frame && self.accumulated >= self.step {
            log::warn!(
                "Dropping {:?} of simulation backlog after {} ticks",
                self.accumulated,
                ticks
            );
            self.accumulated = Duration::ZERO;
        }

        ticks
    }

    /// Fraction of the next tick already accumulated, in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        self.accumulated.as_secs_f32() / self.step.as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_clock_restarts_on_lap() {
        let mut clock = FrameClock::new();
        std::thread::sleep(Duration::from_millis(5));

        let first = clock.lap();
        let second = clock.lap();
        assert!(first >= Duration::from_millis(5));
        assert!(second < first);
    }

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut timestep = FixedTimestep::new(Duration::from_millis(10), 5);

        assert_eq!(timestep.advance(Duration::from_millis(4)), 0);
        assert_eq!(timestep.advance(Duration::from_millis(7)), 1);
        assert_eq!(timestep.advance(Duration::from_millis(29)), 3);
        assert!(timestep.alpha() < 1.0);
    }

    #[test]
    fn test_fixed_timestep_drops_backlog() {
        let mut timestep = FixedTimestep::new(Duration::from_millis(1), 5);

        assert_eq!(timestep.advance(Duration::from_millis(100)), 5);
        assert_eq!(timestep.advance(Duration::ZERO), 0);
    }
}
