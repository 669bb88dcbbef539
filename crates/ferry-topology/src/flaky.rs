//! A [`TopologyStore`] wrapper with switchable failure injection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use ferry_types::{DestinationId, QueueDescriptor, RegionCode};

use crate::error::TopologyError;
use crate::store::TopologyStore;

/// A [`TopologyStore`] wrapper that fails every operation while its
/// failure flag is set.
///
/// Used to test the router's stale-serving behaviour: prime the cache,
/// flip the flag, and verify routing continues against the cached
/// instance while fresh builds surface the error.
pub struct FlakyTopology {
    inner: Arc<dyn TopologyStore>,
    failing: AtomicBool,
}

impl FlakyTopology {
    /// Wrap an existing store; starts healthy.
    pub fn new(inner: Arc<dyn TopologyStore>) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    /// Start or stop failing all operations.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), TopologyError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TopologyError::Unavailable(
                "injected failure".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl TopologyStore for FlakyTopology {
    async fn list_active_destinations(
        &self,
        region: &RegionCode,
    ) -> Result<Vec<QueueDescriptor>, TopologyError> {
        self.check()?;
        self.inner.list_active_destinations(region).await
    }

    async fn list_active_regions(&self) -> Result<Vec<RegionCode>, TopologyError> {
        self.check()?;
        self.inner.list_active_regions().await
    }

    async fn insert(&self, descriptor: QueueDescriptor) -> Result<(), TopologyError> {
        self.check()?;
        self.inner.insert(descriptor).await
    }

    async fn set_active(
        &self,
        region: &RegionCode,
        destination_id: &DestinationId,
        active: bool,
    ) -> Result<(), TopologyError> {
        self.check()?;
        self.inner.set_active(region, destination_id, active).await
    }
}
