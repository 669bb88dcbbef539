//! Error types for delivery transport operations.

use ferry_types::DestinationId;

/// Errors that can occur while handing an envelope to a queue.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The destination queue rejected the envelope or could not be
    /// reached.
    #[error("destination {destination} unreachable: {reason}")]
    Unreachable {
        /// The queue that was addressed.
        destination: DestinationId,
        /// Backend-specific failure description.
        reason: String,
    },

    /// The envelope could not be encoded or decoded.
    #[error("envelope codec error: {0}")]
    Codec(#[from] postcard::Error),
}
