//! Core trait for queue topology access.

use ferry_types::{DestinationId, QueueDescriptor, RegionCode};

use crate::error::TopologyError;

/// Source of truth for which delivery queues exist per region.
///
/// All implementations must be `Send + Sync`: the router registry is
/// shared across request workers and calls this trait on cache misses.
/// Reads are invoked under a bounded timeout, so backends should fail
/// rather than block indefinitely.
#[async_trait::async_trait]
pub trait TopologyStore: Send + Sync {
    /// Active queue descriptors for a region, ordered by ordinal.
    ///
    /// An unknown region is an empty list, not an error — the router
    /// turns it into its "region not configured" failure.
    async fn list_active_destinations(
        &self,
        region: &RegionCode,
    ) -> Result<Vec<QueueDescriptor>, TopologyError>;

    /// Every region that currently has at least one active destination.
    async fn list_active_regions(&self) -> Result<Vec<RegionCode>, TopologyError>;

    /// Persist a new queue descriptor.
    async fn insert(&self, descriptor: QueueDescriptor) -> Result<(), TopologyError>;

    /// Flip a destination's active flag (soft delete or reactivation).
    async fn set_active(
        &self,
        region: &RegionCode,
        destination_id: &DestinationId,
        active: bool,
    ) -> Result<(), TopologyError>;
}
