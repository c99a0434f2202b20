/// Rate limiting for external API clients
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, OwnedSemaphorePermit, Semaphore};

/// Rate limiter for API clients
///
/// Serializes requests (one concurrent) and enforces a minimum interval
/// derived from the per-minute budget.
pub struct RateLimiter {
    semaphore: Arc<Semaphore>,
    last_request: Arc<Mutex<Option<Instant>>>,
    min_interval: Duration,
    max_per_minute: usize,
}

impl RateLimiter {
    pub fn new(max_per_minute: usize) -> Self {
        let min_interval = if max_per_minute > 0 {
            Duration::from_secs_f64(60.0 / max_per_minute as f64)
        } else {
            Duration::ZERO
        };

        Self {
            semaphore: Arc::new(Semaphore::new(1)),
            last_request: Arc::new(Mutex::new(None)),
            min_interval,
            max_per_minute,
        }
    }

    /// Wait until a request is allowed under the rate limit
    pub async fn acquire(&self) -> Result<RateLimitGuard, String> {
        let permit = self
            .semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|e| format!("Failed to acquire rate limiter permit: {}", e))?;

        if !self.min_interval.is_zero() {
            let mut last = self.last_request.lock().await;
            let now = Instant::now();

            if let Some(last_time) = *last {
                let elapsed = last_time.elapsed();
                if elapsed < self.min_interval {
                    let sleep_duration = self.min_interval - elapsed;
                    drop(last);
                    tokio::time::sleep(sleep_duration).await;
                    let mut relocked = self.last_request.lock().await;
                    *relocked = Some(Instant::now());
                } else {
                    *last = Some(now);
                }
            } else {
                *last = Some(now);
            }
        }

        Ok(RateLimitGuard { _permit: permit })
    }

    pub fn max_per_minute(&self) -> usize {
        self.max_per_minute
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// RAII guard returned by [`RateLimiter::acquire`]
pub struct RateLimitGuard {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_interval_derived_from_budget() {
        let limiter = RateLimiter::new(60);
        assert_eq!(limiter.min_interval(), Duration::from_secs(1));
        assert_eq!(limiter.max_per_minute(), 60);

        let unlimited = RateLimiter::new(0);
        assert_eq!(unlimited.min_interval(), Duration::ZERO);
    }

    #[tokio::test]
    async fn acquire_spaces_out_requests() {
        let limiter = RateLimiter::new(1200); // 50ms interval
        let start = Instant::now();
        drop(limiter.acquire().await.unwrap());
        drop(limiter.acquire().await.unwrap());
        assert!(start.elapsed() >= Duration::from_millis(45));
    }
}
