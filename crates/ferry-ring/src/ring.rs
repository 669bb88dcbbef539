//! Consistent hashing ring implementation.

use std::collections::{BTreeMap, HashSet};

use ferry_types::DestinationId;
use tracing::debug;

use crate::error::RingError;

/// Consistent hashing ring mapping routing keys to destinations.
///
/// Each destination is placed at `virtual_nodes` positions on a `u64`
/// ring. A key is routed by walking clockwise from the key's position to
/// the next virtual node, wrapping to the smallest position when none
/// lies ahead.
///
/// A ring is immutable once built. Topology changes build a replacement
/// ring rather than editing this one, so concurrent readers can share a
/// ring without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashRing {
    /// Virtual node positions: ring position -> owning destination.
    vnodes: BTreeMap<u64, DestinationId>,
    /// Number of distinct destinations on the ring.
    destinations: usize,
    /// Virtual nodes per destination used at build time.
    virtual_nodes: u16,
}

impl HashRing {
    /// Build a ring from a set of destination ids.
    ///
    /// Repeated ids contribute positions only once. An empty input yields
    /// an empty ring. Input order does not affect the result: placement
    /// depends only on each id's bytes.
    pub fn build<I>(destination_ids: I, virtual_nodes: u16) -> Self
    where
        I: IntoIterator<Item = DestinationId>,
    {
        let mut vnodes = BTreeMap::new();
        let mut seen = HashSet::new();

        for id in destination_ids {
            if !seen.insert(id.clone()) {
                continue;
            }
            for index in 0..virtual_nodes {
                let pos = vnode_position(&id, index);
                vnodes.insert(pos, id.clone());
            }
        }

        debug!(
            destinations = seen.len(),
            vnodes = vnodes.len(),
            "built hash ring"
        );

        Self {
            vnodes,
            destinations: seen.len(),
            virtual_nodes,
        }
    }

    /// Resolve the destination owning a routing key.
    ///
    /// Pure: the same key on the same ring always resolves to the same
    /// destination, across calls and across processes.
    pub fn lookup(&self, key: &str) -> Result<&DestinationId, RingError> {
        let pos = key_position(key);

        // Clockwise successor; wrap to the ring's smallest position when
        // the key hashes past the last vnode.
        self.vnodes
            .range(pos..)
            .next()
            .or_else(|| self.vnodes.iter().next())
            .map(|(_, destination)| destination)
            .ok_or(RingError::Empty)
    }

    /// Whether the ring has no virtual nodes.
    pub fn is_empty(&self) -> bool {
        self.vnodes.is_empty()
    }

    /// Number of distinct destinations on the ring.
    pub fn destination_count(&self) -> usize {
        self.destinations
    }

    /// Total number of virtual nodes on the ring.
    pub fn vnode_count(&self) -> usize {
        self.vnodes.len()
    }

    /// Virtual nodes per destination used at build time.
    pub fn virtual_nodes(&self) -> u16 {
        self.virtual_nodes
    }
}

/// Ring position of a routing key: `blake3(key)` truncated to `u64`.
///
/// The same function places virtual nodes, which is what makes lookup
/// meaningful. The pair (hash function, key format) is a compatibility
/// contract: changing either reassigns every key already routed but not
/// yet delivered, so any change must bump
/// [`ferry_types::KEY_FORMAT_VERSION`].
pub fn key_position(key: &str) -> u64 {
    truncated_hash(key.as_bytes())
}

/// Ring position of a virtual node: `blake3(destination_id ++ index)`
/// truncated to `u64`. The index is encoded little-endian so placement is
/// identical on every platform.
fn vnode_position(destination_id: &DestinationId, index: u16) -> u64 {
    let id = destination_id.as_bytes();
    let mut input = Vec::with_capacity(id.len() + 2);
    input.extend_from_slice(id);
    input.extend_from_slice(&index.to_le_bytes());
    truncated_hash(&input)
}

fn truncated_hash(input: &[u8]) -> u64 {
    let hash = blake3::hash(input);
    let bytes: [u8; 8] = hash.as_bytes()[..8].try_into().expect("8 bytes");
    u64::from_le_bytes(bytes)
}
