//! Error types for routing, dispatch, and administration.

use std::time::Duration;

use ferry_types::{DestinationId, RegionCode};

/// Errors that can occur while routing assets.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// The topology has no active destinations for the region.
    /// A configuration problem: surfaced immediately, not retried.
    #[error("no active destinations configured for region {0}")]
    RegionNotConfigured(RegionCode),

    /// The region's ring has no destinations to route to.
    #[error("no destinations available for region {0}")]
    NoDestinations(RegionCode),

    /// Loading topology failed. Transient: retryable by the caller, and
    /// the registry keeps serving an already-built instance when it has
    /// one.
    #[error("topology load failed: {0}")]
    Topology(#[from] ferry_topology::TopologyError),

    /// Loading topology exceeded the configured timeout. Transient.
    #[error("topology load timed out after {0:?}")]
    LoadTimeout(Duration),

    /// Two active descriptors share a destination id within one region,
    /// violating the topology contract.
    #[error("duplicate active destination {destination_id} in region {region}")]
    DuplicateDestination {
        /// Region whose descriptor list is inconsistent.
        region: RegionCode,
        /// The id that appears more than once.
        destination_id: DestinationId,
    },

    /// Active descriptors produced an empty ring. Should never occur;
    /// indicates a zero virtual-node configuration or a ring construction
    /// bug.
    #[error("ring is empty despite {active} active destinations in region {region}")]
    EmptyRingInvariant {
        /// Region whose ring came out empty.
        region: RegionCode,
        /// How many active descriptors went into the build.
        active: usize,
    },
}

/// Errors from dispatching an asset to its queue.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The asset could not be routed to a destination.
    #[error("routing failed: {0}")]
    Routing(#[from] RouterError),

    /// The resolved destination rejected the envelope.
    #[error("delivery failed: {0}")]
    Delivery(#[from] ferry_transport::TransportError),
}

/// Errors from administrative topology changes.
#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    /// The descriptor is malformed (empty id or region).
    #[error("invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// An active descriptor with this id already exists in the region.
    #[error("destination {destination_id} already active in region {region}")]
    DuplicateDestination {
        /// Region that already has the destination.
        region: RegionCode,
        /// The conflicting id.
        destination_id: DestinationId,
    },

    /// The topology backend failed.
    #[error(transparent)]
    Topology(#[from] ferry_topology::TopologyError),

    /// The post-change registry refresh failed.
    #[error(transparent)]
    Routing(#[from] RouterError),
}
