//! Delivery transport trait and wire envelope.
//!
//! This crate is the seam between the routing core and whatever actually
//! carries payloads to queues (SQS, Kafka, an in-process buffer):
//!
//! - [`AssetEnvelope`] — the wire type (postcard-serialized).
//! - [`DeliveryTransport`] — the trait the dispatcher enqueues through.
//! - [`MemoryTransport`] — in-memory backend with failure injection,
//!   used by tests.
//!
//! Delivery guarantees — retries, at-least-once, dead-lettering — belong
//! to the backend behind the trait, not to the router.

mod error;
mod memory;
mod message;

pub use error::TransportError;
pub use memory::MemoryTransport;
pub use message::AssetEnvelope;

use ferry_types::DestinationId;

/// Trait abstracting payload delivery to a resolved destination queue.
#[async_trait::async_trait]
pub trait DeliveryTransport: Send + Sync {
    /// Enqueue an envelope on the destination queue.
    async fn enqueue(
        &self,
        destination: &DestinationId,
        envelope: &AssetEnvelope,
    ) -> Result<(), TransportError>;
}
