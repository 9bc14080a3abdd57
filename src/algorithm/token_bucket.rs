//! Token Bucket rate limiting algorithm.
//!
//! Allows controlled bursts while enforcing an average rate limit. Tokens
//! are refilled continuously at `refill_rate` tokens/second, up to `capacity`.

/// Per-key Token Bucket state.
#[derive(Debug, Clone, Copy)]
pub struct TokenBucketState {
    capacity: u64,
    window_seconds: f64,
    refill_rate: f64,
    tokens: f64,
    last_refill_at: f64,
}

impl TokenBucketState {
    /// Create a bucket at full capacity, as if it had been idle since `now`.
    pub fn new(max_requests: u64, window_seconds: f64, now: f64) -> Self {
        Self {
            capacity: max_requests,
            window_seconds,
            refill_rate: max_requests as f64 / window_seconds,
            tokens: max_requests as f64,
            last_refill_at: now,
        }
    }

    /// Configured burst capacity (== `max_requests`).
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Configured window, used only to detect reconfiguration.
    pub fn window_seconds(&self) -> f64 {
        self.window_seconds
    }

    /// Decide whether a request at `now` is allowed, refilling first.
    pub fn allow_at(&mut self, now: f64) -> (bool, u64) {
        let elapsed = (now - self.last_refill_at).max(0.0);
        self.tokens = (self.tokens + elapsed * self.refill_rate).min(self.capacity as f64);
        self.last_refill_at = now;

        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            (true, self.tokens.floor() as u64)
        } else {
            (false, 0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn burst_then_block() {
        let mut tb = TokenBucketState::new(5, 10.0, 0.0);

        for expected_remaining in [4u64, 3, 2, 1, 0] {
            let (allowed, remaining) = tb.allow_at(0.0);
            assert!(allowed);
            assert_eq!(remaining, expected_remaining);
        }

        let (allowed, remaining) = tb.allow_at(0.0);
        assert!(!allowed);
        assert_eq!(remaining, 0);
    }

    #[test]
    fn refills_over_time() {
        let mut tb = TokenBucketState::new(5, 10.0, 0.0);
        for _ in 0..5 {
            tb.allow_at(0.0);
        }
        assert!(!tb.allow_at(0.0).0);

        // refill_rate = 0.5 tokens/sec; 4s elapsed accrues 2 tokens.
        let (allowed1, remaining1) = tb.allow_at(4.0);
        assert!(allowed1);
        let (allowed2, remaining2) = tb.allow_at(4.0);
        assert!(allowed2);
        assert_eq!(remaining1, 0);
        assert_eq!(remaining2, 0);

        assert!(!tb.allow_at(4.0).0);
    }

    #[test]
    fn tokens_never_exceed_capacity() {
        let mut tb = TokenBucketState::new(5, 10.0, 0.0);
        // Idle for a very long time; tokens must clamp at capacity.
        let (allowed, remaining) = tb.allow_at(10_000.0);
        assert!(allowed);
        assert_eq!(remaining, 4);
    }

    #[test]
    fn capacity_bound_over_any_window() {
        let mut tb = TokenBucketState::new(3, 1.0, 0.0);
        let mut allowed_count = 0;
        let mut t = 0.0;
        while t <= 5.0 {
            if tb.allow_at(t).0 {
                allowed_count += 1;
            }
            t += 0.1;
        }
        // capacity=3, refill_rate=3/s, window=5s -> bound = 3 + floor(3*5) = 18
        assert!(allowed_count <= 3 + (3.0 * 5.0).floor() as u64);
    }
}
