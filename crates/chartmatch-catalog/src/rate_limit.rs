//! Request pacing for the catalog API.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::time::{sleep, Duration};

/// Spaces outbound requests by a fixed interval.
///
/// A single-permit [`Semaphore`] serializes callers; each holds the
/// permit for the interval, so clones of one limiter share a budget.
/// This is a throttle for the catalog's benefit, not a correctness
/// mechanism.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    interval: Duration,
}

impl RateLimiter {
    /// A limiter that allows one request per `interval`.
    #[must_use]
    pub fn every(interval: Duration) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            interval,
        }
    }

    /// A limiter that allows at most `requests_per_second` requests/sec.
    #[must_use]
    pub fn per_second(requests_per_second: u32) -> Self {
        Self::every(Duration::from_millis(
            1000 / u64::from(requests_per_second.max(1)),
        ))
    }

    /// Waits until a request slot is available, then holds the slot for
    /// the configured interval.
    pub async fn acquire(&self) {
        // `acquire` only errors when the semaphore is closed, which we
        // never do.
        let Ok(_permit) = self.semaphore.acquire().await else {
            return;
        };
        sleep(self.interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_acquire_spaces_requests() {
        let limiter = RateLimiter::every(Duration::from_millis(20));
        let start = std::time::Instant::now();
        limiter.acquire().await;
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_millis(40));
    }

    #[test]
    fn test_per_second_interval() {
        let limiter = RateLimiter::per_second(4);
        assert_eq!(limiter.interval, Duration::from_millis(250));
    }
}
