//! Error types for topology operations.

use ferry_types::{DestinationId, RegionCode};

/// Errors that can occur while reading or mutating queue topology.
#[derive(Debug, thiserror::Error)]
pub enum TopologyError {
    /// The backend could not be reached or answered with a failure.
    /// Retryable; the router serves a stale instance when it has one.
    #[error("topology backend unavailable: {0}")]
    Unavailable(String),

    /// No descriptor with this destination id exists in the region.
    #[error("unknown destination {destination_id} in region {region}")]
    UnknownDestination {
        /// Region that was addressed.
        region: RegionCode,
        /// The id that could not be found.
        destination_id: DestinationId,
    },
}
