//! Monotonic time source for the rate limiting engine.
//!
//! Every algorithm measures elapsed time rather than reading wall clocks
//! directly, so tests can drive time deterministically with [`VirtualClock`]
//! while production code uses [`SystemClock`].

use std::sync::Arc;
use std::time::Instant;

use parking_lot::Mutex;

/// A monotonic source of seconds, injectable so algorithm and gateway tests
/// can advance time explicitly instead of sleeping.
pub trait Clock: Send + Sync + 'static {
    /// Current time in seconds. Must be monotonically non-decreasing within
    /// a process.
    fn now(&self) -> f64;
}

/// Production clock backed by [`std::time::Instant`].
#[derive(Debug, Clone, Default)]
pub struct SystemClock {
    epoch: OnceEpoch,
}

#[derive(Debug, Clone)]
struct OnceEpoch(Arc<Instant>);

impl Default for OnceEpoch {
    fn default() -> Self {
        Self(Arc::new(Instant::now()))
    }
}

impl SystemClock {
    /// Create a new system clock. The returned clock's `now()` is relative
    /// to the instant this constructor ran, not the Unix epoch.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.epoch.0.elapsed().as_secs_f64()
    }
}

/// Test clock that only advances when told to.
///
/// Cloning a `VirtualClock` shares the same underlying time — all clones
/// observe advances made through any of them.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    seconds: Arc<Mutex<f64>>,
}

impl VirtualClock {
    /// Create a virtual clock starting at `t = 0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a virtual clock starting at the given time.
    pub fn at(start: f64) -> Self {
        Self {
            seconds: Arc::new(Mutex::new(start)),
        }
    }

    /// Advance the clock by `dt` seconds. `dt` must be non-negative.
    pub fn advance(&self, dt: f64) {
        debug_assert!(dt >= 0.0, "VirtualClock must advance forward");
        *self.seconds.lock() += dt;
    }

    /// Set the clock to an absolute time. Must not move it backwards.
    pub fn set(&self, t: f64) {
        let mut guard = self.seconds.lock();
        debug_assert!(t >= *guard, "VirtualClock must not move backwards");
        *guard = t;
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> f64 {
        *self.seconds.lock()
    }
}
