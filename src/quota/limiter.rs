// src/quota/limiter.rs

//! Dual sliding-window quota tracking.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

use crate::models::QuotaConfig;

/// Trailing window for the daily cap.
const DAILY_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Trailing window for the burst cap.
const SECOND_WINDOW: Duration = Duration::from_secs(1);

/// Outcome of a reservation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reservation {
    pub granted: bool,

    /// Reservations inside the trailing 24h, including this one when granted.
    pub daily_count: u32,
}

/// Read-only snapshot of quota usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct QuotaStats {
    pub daily_count: u32,
    pub remaining: u32,
    pub daily_cap: u32,
    pub per_second_cap: u32,
}

/// Sliding-window rate limiter shared by every upstream-calling path.
///
/// Check-and-reserve runs as one critical section: the window is pruned,
/// both caps are checked against the same instant, and the reservation is
/// appended before the lock is released. There is no await point inside, so
/// two tasks can never both observe "under cap" for the last remaining slot.
pub struct RateLimiter {
    config: QuotaConfig,
    window: Mutex<Vec<Instant>>,
}

impl RateLimiter {
    pub fn new(config: QuotaConfig) -> Self {
        Self {
            config,
            window: Mutex::new(Vec::new()),
        }
    }

    /// Atomically claim one unit of quota.
    ///
    /// A granted reservation is recorded immediately, before the call it
    /// protects executes: the provider bills the call regardless of its
    /// outcome, so a failed upstream request still counts.
    pub fn reserve(&self) -> Reservation {
        self.reserve_at(Instant::now())
    }

    /// Usage snapshot. Prunes the window but reserves nothing.
    pub fn stats(&self) -> QuotaStats {
        self.stats_at(Instant::now())
    }

    fn reserve_at(&self, now: Instant) -> Reservation {
        let mut window = self.lock_window();
        Self::prune(&mut window, now);

        let daily = window.len();
        // Timestamps are appended in order, so the trailing-1s view is a
        // suffix of the window rather than a second structure.
        let burst = window
            .iter()
            .rev()
            .take_while(|&&t| now.duration_since(t) < SECOND_WINDOW)
            .count();

        if daily >= self.config.daily_cap as usize {
            log::warn!(
                "reservation denied: daily cap reached ({daily}/{})",
                self.config.daily_cap
            );
            return Reservation {
                granted: false,
                daily_count: daily as u32,
            };
        }
        if burst >= self.config.per_second_cap as usize {
            log::debug!(
                "reservation denied: burst cap reached ({burst}/{})",
                self.config.per_second_cap
            );
            return Reservation {
                granted: false,
                daily_count: daily as u32,
            };
        }

        window.push(now);
        Reservation {
            granted: true,
            daily_count: (daily + 1) as u32,
        }
    }

    fn stats_at(&self, now: Instant) -> QuotaStats {
        let mut window = self.lock_window();
        Self::prune(&mut window, now);
        let daily_count = window.len() as u32;
        QuotaStats {
            daily_count,
            remaining: self.config.daily_cap.saturating_sub(daily_count),
            daily_cap: self.config.daily_cap,
            per_second_cap: self.config.per_second_cap,
        }
    }

    fn prune(window: &mut Vec<Instant>, now: Instant) {
        window.retain(|&t| now.duration_since(t) < DAILY_WINDOW);
    }

    fn lock_window(&self) -> std::sync::MutexGuard<'_, Vec<Instant>> {
        self.window.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
