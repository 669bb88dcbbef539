//! In-memory topology backend.

use std::collections::HashMap;
use std::sync::RwLock;

use ferry_types::{DestinationId, QueueDescriptor, RegionCode};
use tracing::debug;

use crate::error::TopologyError;
use crate::store::TopologyStore;

/// In-memory topology backed by a `RwLock<HashMap>`.
///
/// Useful for testing and for embedded deployments that load their queue
/// list from configuration at startup. The lock is a plain std `RwLock`:
/// every critical section is pure in-memory work with no await points.
#[derive(Default)]
pub struct MemoryTopology {
    regions: RwLock<HashMap<RegionCode, Vec<QueueDescriptor>>>,
}

impl MemoryTopology {
    /// Create an empty topology.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a topology pre-populated with descriptors.
    pub fn with_descriptors(descriptors: impl IntoIterator<Item = QueueDescriptor>) -> Self {
        let mut regions: HashMap<RegionCode, Vec<QueueDescriptor>> = HashMap::new();
        for descriptor in descriptors {
            regions
                .entry(descriptor.region_code.clone())
                .or_default()
                .push(descriptor);
        }
        for queue_list in regions.values_mut() {
            queue_list.sort_by_key(|d| d.ordinal);
        }
        Self {
            regions: RwLock::new(regions),
        }
    }
}

#[async_trait::async_trait]
impl TopologyStore for MemoryTopology {
    async fn list_active_destinations(
        &self,
        region: &RegionCode,
    ) -> Result<Vec<QueueDescriptor>, TopologyError> {
        let regions = self.regions.read().expect("lock poisoned");
        let active: Vec<QueueDescriptor> = regions
            .get(region)
            .map(|queue_list| {
                queue_list
                    .iter()
                    .filter(|d| d.active)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        debug!(%region, count = active.len(), "listed active destinations");
        Ok(active)
    }

    async fn list_active_regions(&self) -> Result<Vec<RegionCode>, TopologyError> {
        let regions = self.regions.read().expect("lock poisoned");
        let mut active: Vec<RegionCode> = regions
            .iter()
            .filter(|(_, queue_list)| queue_list.iter().any(|d| d.active))
            .map(|(region, _)| region.clone())
            .collect();
        active.sort();
        Ok(active)
    }

    async fn insert(&self, descriptor: QueueDescriptor) -> Result<(), TopologyError> {
        let mut regions = self.regions.write().expect("lock poisoned");
        let queue_list = regions.entry(descriptor.region_code.clone()).or_default();
        debug!(
            region = %descriptor.region_code,
            destination = %descriptor.destination_id,
            "inserted queue descriptor"
        );
        queue_list.push(descriptor);
        queue_list.sort_by_key(|d| d.ordinal);
        Ok(())
    }

    async fn set_active(
        &self,
        region: &RegionCode,
        destination_id: &DestinationId,
        active: bool,
    ) -> Result<(), TopologyError> {
        let mut regions = self.regions.write().expect("lock poisoned");
        let descriptor = regions
            .get_mut(region)
            .and_then(|queue_list| {
                queue_list
                    .iter_mut()
                    .find(|d| &d.destination_id == destination_id)
            })
            .ok_or_else(|| TopologyError::UnknownDestination {
                region: region.clone(),
                destination_id: destination_id.clone(),
            })?;

        descriptor.active = active;
        debug!(%region, destination = %destination_id, active, "updated queue status");
        Ok(())
    }
}
