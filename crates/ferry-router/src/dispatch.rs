//! [`AssetDispatcher`] — route an asset and hand it to the transport.

use std::sync::Arc;

use ferry_transport::{AssetEnvelope, DeliveryTransport};
use ferry_types::DestinationId;
use tracing::{debug, info};

use crate::error::DispatchError;
use crate::registry::RouterRegistry;

/// Routes assets and enqueues them on their destination queues.
///
/// The transport only ever sees a resolved destination id; what
/// "enqueue" means (SQS, Kafka, a test buffer) is the backend's
/// business. A failed delivery is returned to the caller — the
/// dispatcher never drops or re-routes an asset on its own.
pub struct AssetDispatcher {
    registry: Arc<RouterRegistry>,
    transport: Arc<dyn DeliveryTransport>,
}

impl AssetDispatcher {
    /// Create a dispatcher over a registry and a transport.
    pub fn new(registry: Arc<RouterRegistry>, transport: Arc<dyn DeliveryTransport>) -> Self {
        Self {
            registry,
            transport,
        }
    }

    /// Route the envelope's identity and enqueue it.
    ///
    /// Returns the destination the asset was delivered to.
    pub async fn dispatch(&self, envelope: &AssetEnvelope) -> Result<DestinationId, DispatchError> {
        let destination = self.registry.route(&envelope.identity).await?;
        debug!(identity = %envelope.identity, %destination, "routed asset");

        self.transport.enqueue(&destination, envelope).await?;
        info!(
            %destination,
            payload_bytes = envelope.payload.len(),
            "asset enqueued"
        );

        Ok(destination)
    }
}
