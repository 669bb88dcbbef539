//! A [`TopologyStore`] wrapper that adds configurable random latency.
//!
//! `SlowTopology` wraps any `Arc<dyn TopologyStore>` and sleeps for a
//! random duration before each operation. The RNG is seeded for
//! deterministic, reproducible behaviour across test runs.
//!
//! # Example
//!
//! ```ignore
//! let slow = SlowTopology::new(inner)
//!     .read_latency(5, 20)    // 5–20 ms per read
//!     .write_latency(10, 30)  // 10–30 ms per write
//!     .seed(42);
//! ```

use std::sync::{Arc, Mutex};

use ferry_types::{DestinationId, QueueDescriptor, RegionCode};
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::error::TopologyError;
use crate::store::TopologyStore;

/// A [`TopologyStore`] wrapper that injects random latency before each
/// operation.
///
/// Useful for exercising the router's fetch timeout and for surfacing
/// races that never appear against an instant in-memory backend.
pub struct SlowTopology {
    inner: Arc<dyn TopologyStore>,
    read_latency_ms: (u64, u64),
    write_latency_ms: (u64, u64),
    rng: Mutex<StdRng>,
}

impl SlowTopology {
    /// Wrap an existing store with zero latency (pass-through) by default.
    pub fn new(inner: Arc<dyn TopologyStore>) -> Self {
        Self {
            inner,
            read_latency_ms: (0, 0),
            write_latency_ms: (0, 0),
            rng: Mutex::new(StdRng::seed_from_u64(0)),
        }
    }

    /// Set the read latency range in milliseconds (uniform random).
    pub fn read_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.read_latency_ms = (min_ms, max_ms);
        self
    }

    /// Set the write latency range in milliseconds (uniform random).
    pub fn write_latency(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.write_latency_ms = (min_ms, max_ms);
        self
    }

    /// Set the RNG seed for deterministic behaviour.
    pub fn seed(self, seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            ..self
        }
    }

    /// Sleep for a random duration in `[min, max]` milliseconds.
    async fn delay(&self, range: (u64, u64)) {
        let (min, max) = range;

        if max == 0 {
            return;
        }

        let ms = if min == max {
            min
        } else {
            self.rng.lock().unwrap().random_range(min..=max)
        };

        if ms > 0 {
            tokio::time::sleep(tokio::time::Duration::from_millis(ms)).await;
        }
    }
}

#[async_trait::async_trait]
impl TopologyStore for SlowTopology {
    async fn list_active_destinations(
        &self,
        region: &RegionCode,
    ) -> Result<Vec<QueueDescriptor>, TopologyError> {
        self.delay(self.read_latency_ms).await;
        self.inner.list_active_destinations(region).await
    }

    async fn list_active_regions(&self) -> Result<Vec<RegionCode>, TopologyError> {
        self.delay(self.read_latency_ms).await;
        self.inner.list_active_regions().await
    }

    async fn insert(&self, descriptor: QueueDescriptor) -> Result<(), TopologyError> {
        self.delay(self.write_latency_ms).await;
        self.inner.insert(descriptor).await
    }

    async fn set_active(
        &self,
        region: &RegionCode,
        destination_id: &DestinationId,
        active: bool,
    ) -> Result<(), TopologyError> {
        self.delay(self.write_latency_ms).await;
        self.inner.set_active(region, destination_id, active).await
    }
}
