//! Per-IP sliding-window rate limiting for registration.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use parking_lot::Mutex;

pub struct RegistrationLimiter {
    max_per_window: u32,
    window: Duration,
    attempts: Mutex<HashMap<String, Vec<Instant>>>,
}

impl RegistrationLimiter {
    pub fn new(max_per_window: u32, window: Duration) -> Self {
        Self {
            max_per_window,
            window,
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Check whether `ip` may register. Allowed attempts are recorded
    /// immediately; denied calls return the seconds until the window frees up.
    pub fn check_and_record(&self, ip: &str) -> Result<(), u64> {
        let now = Instant::now();
        let mut attempts = self.attempts.lock();
        let entry = attempts.entry(ip.to_string()).or_default();
        entry.retain(|t| now.duration_since(*t) < self.window);

        if entry.len() >= self.max_per_window as usize {
            let retry_after = entry
                .first()
                .map(|oldest| {
                    self.window
                        .saturating_sub(now.duration_since(*oldest))
                        .as_secs()
                })
                .unwrap_or_else(|| self.window.as_secs());
            return Err(retry_after.max(1));
        }

        entry.push(now);
        Ok(())
    }
}
