//! Small shared helpers.

use std::time::Instant;

/// Wall-clock timer for reporting solver runtimes.
#[derive(Clone, Copy, Debug)]
pub struct SearchTimer {
    started: Instant,
}

impl SearchTimer {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Restart the timer.
    pub fn reset(&mut self) {
        self.started = Instant::now();
    }

    /// Seconds elapsed since start or the last reset.
    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_is_monotonic() {
        let mut timer = SearchTimer::start();
        let first = timer.elapsed_secs();
        let second = timer.elapsed_secs();
        assert!(first >= 0.0);
        assert!(second >= first);

        timer.reset();
        assert!(timer.elapsed_secs() >= 0.0);
    }
}
