//! [`RouterInstance`] — one region's immutable routing table.

use std::collections::HashSet;

use ferry_ring::{HashRing, RingError};
use ferry_types::{AssetIdentity, DestinationId, QueueDescriptor, RegionCode};
use tracing::{error, info};

use crate::error::RouterError;

/// One region's hash ring paired with the descriptors it was built from.
///
/// Instances are immutable: a topology change builds a replacement and
/// the registry swaps it in atomically, so concurrent readers never
/// observe a partially updated ring. Mutating one region's topology only
/// ever produces a new instance for that region — other regions' rings
/// are untouched.
#[derive(Debug, Clone)]
pub struct RouterInstance {
    region: RegionCode,
    ring: HashRing,
    descriptors: Vec<QueueDescriptor>,
}

impl RouterInstance {
    /// Build an instance from a region's descriptor list.
    ///
    /// Inactive descriptors contribute no ring positions. Two active
    /// descriptors sharing a destination id violate the topology
    /// contract and fail the build rather than silently last-wins.
    pub fn build(
        region: RegionCode,
        descriptors: Vec<QueueDescriptor>,
        virtual_nodes: u16,
    ) -> Result<Self, RouterError> {
        let mut seen = HashSet::new();
        let mut active = Vec::new();
        for descriptor in descriptors.iter().filter(|d| d.active) {
            if !seen.insert(descriptor.destination_id.clone()) {
                return Err(RouterError::DuplicateDestination {
                    region,
                    destination_id: descriptor.destination_id.clone(),
                });
            }
            active.push(descriptor.destination_id.clone());
        }

        let active_count = active.len();
        let ring = HashRing::build(active, virtual_nodes);

        if ring.is_empty() && active_count > 0 {
            error!(
                %region,
                active = active_count,
                virtual_nodes,
                "active destinations produced an empty ring"
            );
            return Err(RouterError::EmptyRingInvariant {
                region,
                active: active_count,
            });
        }

        info!(
            %region,
            destinations = active_count,
            vnodes = ring.vnode_count(),
            "built router instance"
        );

        Ok(Self {
            region,
            ring,
            descriptors,
        })
    }

    /// Route an asset identity to its destination queue.
    pub fn route(&self, identity: &AssetIdentity) -> Result<DestinationId, RouterError> {
        let key = identity.composite_key();
        match self.ring.lookup(&key) {
            Ok(destination) => Ok(destination.clone()),
            Err(RingError::Empty) => Err(RouterError::NoDestinations(self.region.clone())),
        }
    }

    /// The region this instance routes for.
    pub fn region(&self) -> &RegionCode {
        &self.region
    }

    /// The descriptor list the ring was built from.
    pub fn descriptors(&self) -> &[QueueDescriptor] {
        &self.descriptors
    }

    /// Number of destinations on the ring.
    pub fn destination_count(&self) -> usize {
        self.ring.destination_count()
    }
}
