//! Wire envelope for routed assets.
//!
//! Envelopes are serialized with postcard when crossing a process
//! boundary.

use bytes::Bytes;
use ferry_types::AssetIdentity;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// A routed asset payload handed to the delivery transport.
///
/// Carries the ring position of the asset's composite key so a consumer
/// can audit which position produced the assignment without re-deriving
/// the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEnvelope {
    /// Identity fields the asset was routed by.
    pub identity: AssetIdentity,
    /// Ring position of the asset's composite key.
    pub routing_hash: u64,
    /// Opaque asset payload.
    pub payload: Bytes,
}

impl AssetEnvelope {
    /// Wrap a payload with its routing identity.
    pub fn new(identity: AssetIdentity, payload: impl Into<Bytes>) -> Self {
        let routing_hash = ferry_ring::key_position(&identity.composite_key());
        Self {
            identity,
            routing_hash,
            payload: payload.into(),
        }
    }

    /// Serialize for the wire.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransportError> {
        Ok(postcard::to_allocvec(self)?)
    }

    /// Deserialize from the wire.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransportError> {
        Ok(postcard::from_bytes(bytes)?)
    }
}
