//! Administrative topology workflows.
//!
//! Changing which queues exist is a persistence write plus an immediate
//! registry refresh, so traffic shifts right away instead of waiting out
//! the cache TTL. The HTTP/CLI surface that calls these workflows lives
//! outside this crate.

use std::sync::Arc;

use ferry_topology::TopologyStore;
use ferry_types::{DestinationId, QueueDescriptor, RegionCode};
use tracing::info;

use crate::error::{AdminError, RouterError};
use crate::registry::RouterRegistry;

/// Add/remove-destination workflows over a topology store and the
/// registry that caches routers built from it.
pub struct TopologyAdmin {
    topology: Arc<dyn TopologyStore>,
    registry: Arc<RouterRegistry>,
}

impl TopologyAdmin {
    /// Create an admin facade.
    ///
    /// `topology` must be the same store the registry loads from,
    /// otherwise the refresh after each change rebuilds from a source
    /// that never saw the change.
    pub fn new(topology: Arc<dyn TopologyStore>, registry: Arc<RouterRegistry>) -> Self {
        Self { topology, registry }
    }

    /// Register a new destination and start routing to it.
    pub async fn add_destination(&self, descriptor: QueueDescriptor) -> Result<(), AdminError> {
        if descriptor.destination_id.as_str().is_empty() {
            return Err(AdminError::InvalidDescriptor(
                "destination id is empty".to_string(),
            ));
        }
        if descriptor.region_code.as_str().is_empty() {
            return Err(AdminError::InvalidDescriptor(
                "region code is empty".to_string(),
            ));
        }

        // Reject the duplicate here, at the write boundary, instead of
        // letting the next rebuild fail for every routing caller.
        let existing = self
            .topology
            .list_active_destinations(&descriptor.region_code)
            .await?;
        if descriptor.active
            && existing
                .iter()
                .any(|d| d.destination_id == descriptor.destination_id)
        {
            return Err(AdminError::DuplicateDestination {
                region: descriptor.region_code.clone(),
                destination_id: descriptor.destination_id.clone(),
            });
        }

        let region = descriptor.region_code.clone();
        let destination_id = descriptor.destination_id.clone();

        self.topology.insert(descriptor).await?;
        self.registry.refresh(&region).await?;

        info!(%region, %destination_id, "destination added");
        Ok(())
    }

    /// Deactivate a destination and stop routing to it (soft delete).
    pub async fn remove_destination(
        &self,
        region: &RegionCode,
        destination_id: &DestinationId,
    ) -> Result<(), AdminError> {
        self.topology
            .set_active(region, destination_id, false)
            .await?;

        // Removing the last destination leaves the region unconfigured;
        // that is the correct end state of the removal, not a failure.
        match self.registry.refresh(region).await {
            Ok(_) | Err(RouterError::RegionNotConfigured(_)) => {}
            Err(e) => return Err(e.into()),
        }

        info!(%region, %destination_id, "destination removed");
        Ok(())
    }
}
