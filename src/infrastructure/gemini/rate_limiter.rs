use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{sleep, Instant};

/// Token bucket rate limiter for backend request throttling
///
/// Capacity equals the refill rate (at least one token), so up to one
/// second's worth of requests may burst before callers start waiting.
#[derive(Clone)]
pub struct TokenBucketRateLimiter {
    state: Arc<Mutex<Bucket>>,
    /// Maximum token capacity
    capacity: f64,
    /// Tokens added per second
    refill_rate: f64,
}

struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucketRateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `requests_per_second` - Requests per second allowed; must be positive
    pub fn new(requests_per_second: f64) -> Self {
        assert!(requests_per_second > 0.0, "Rate limit must be positive");
        let capacity = requests_per_second.max(1.0);

        Self {
            state: Arc::new(Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            })),
            capacity,
            refill_rate: requests_per_second,
        }
    }

    /// Acquire a token from the bucket, waiting if necessary
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.state.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                let available = (bucket.tokens + elapsed * self.refill_rate).min(self.capacity);

                if available >= 1.0 {
                    bucket.tokens = available - 1.0;
                    bucket.last_refill = now;
                    return;
                }

                let tokens_needed = 1.0 - available;
                Duration::from_secs_f64((tokens_needed / self.refill_rate).max(0.01))
            };

            sleep(wait).await;
        }
    }

    /// Get the current number of available tokens
    pub async fn available_tokens(&self) -> f64 {
        let bucket = self.state.lock().await;
        let elapsed = Instant::now()
            .duration_since(bucket.last_refill)
            .as_secs_f64();
        (bucket.tokens + elapsed * self.refill_rate).min(self.capacity)
    }
}
