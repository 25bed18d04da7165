// src/quota/pacer.rs

//! Leaky-bucket pacing between upstream calls.

use std::time::{Duration, Instant};

use tokio::sync::Mutex;

/// Enforces a minimum interval between successive upstream calls.
///
/// Callers queue on an async mutex that is held across the wait, so
/// concurrent acquirers are released one per interval in arrival order.
/// The interval is sized slightly over the inverse of the per-second cap
/// (e.g. 1.1s at a 1/s cap).
pub struct Pacer {
    interval: Duration,
    last: Mutex<Option<Instant>>,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: Mutex::new(None),
        }
    }

    /// Wait until at least one interval has passed since the previous
    /// acquisition. The first acquisition returns immediately.
    pub async fn acquire(&self) {
        let mut last = self.last.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.interval;
            let now = Instant::now();
            if ready_at > now {
                tokio::time::sleep(ready_at - now).await;
            }
        }
        *last = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_acquire_is_immediate() {
        let pacer = Pacer::new(Duration::from_secs(5));
        let start = Instant::now();
        pacer.acquire().await;
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[tokio::test]
    async fn second_acquire_waits_an_interval() {
        let pacer = Pacer::new(Duration::from_millis(120));
        pacer.acquire().await;

        let start = Instant::now();
        pacer.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(110));
    }

    #[tokio::test]
    async fn three_acquires_take_two_intervals() {
        let pacer = Pacer::new(Duration::from_millis(80));
        let start = Instant::now();
        pacer.acquire().await;
        pacer.acquire().await;
        pacer.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(150));
    }

    #[tokio::test]
    async fn zero_interval_never_waits() {
        let pacer = Pacer::new(Duration::ZERO);
        let start = Instant::now();
        for _ in 0..10 {
            pacer.acquire().await;
        }
        assert!(start.elapsed() < Duration::from_millis(100));
    }
}
