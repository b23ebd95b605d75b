//! Fixed-interval tick driver.
//!
//! The shell polls it once per frame. Stopped on game over and while the
//! menu is open; `restart()` rearms it so the first tick after a restart
//! comes a full interval later.

use std::time::{Duration, Instant};

pub struct Ticker {
    interval: Duration,
    last_fire: Instant,
    running: bool,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Ticker { interval, last_fire: now, running: true }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Resume after `stop()`. No effect while already running.
    pub fn start(&mut self, now: Instant) {
        if !self.running {
            self.running = true;
            self.last_fire = now;
        }
    }

    pub fn restart(&mut self, now: Instant) {
        self.running = true;
        self.last_fire = now;
    }

    /// True once per elapsed interval while running.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        if now.duration_since(self.last_fire) >= self.interval {
            self.last_fire = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn fires_after_interval() {
        let t0 = Instant::now();
        let mut t = Ticker::new(100 * MS, t0);
        assert!(!t.poll(t0 + 50 * MS));
        assert!(t.poll(t0 + 100 * MS));
        assert!(!t.poll(t0 + 150 * MS));
        assert!(t.poll(t0 + 205 * MS));
    }

    #[test]
    fn stopped_ticker_never_fires() {
        let t0 = Instant::now();
        let mut t = Ticker::new(100 * MS, t0);
        t.stop();
        assert!(!t.is_running());
        assert!(!t.poll(t0 + 1000 * MS));
    }

    #[test]
    fn restart_waits_a_full_interval() {
        let t0 = Instant::now();
        let mut t = Ticker::new(100 * MS, t0);
        t.stop();
        t.restart(t0 + 500 * MS);
        assert!(t.is_running());
        assert!(!t.poll(t0 + 550 * MS));
        assert!(t.poll(t0 + 600 * MS));
    }

    #[test]
    fn start_is_idempotent_while_running() {
        let t0 = Instant::now();
        let mut t = Ticker::new(100 * MS, t0);
        t.start(t0 + 90 * MS);
        // Still measured from t0.
        assert!(t.poll(t0 + 100 * MS));
    }
}
