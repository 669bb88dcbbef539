//! Shared types and identifiers for Ferry.
//!
//! This crate defines the core types used across the Ferry workspace:
//! identifiers ([`DestinationId`], [`RegionCode`]), the topology record
//! ([`QueueDescriptor`]), the routing input ([`AssetIdentity`] and its
//! composite key), and configuration ([`RouterConfig`]).

use std::fmt;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{CacheSection, ConfigError, RingSection, RouterConfig, TopologySection};

// ---------------------------------------------------------------------------
// ID types
// ---------------------------------------------------------------------------

/// Opaque identifier for a delivery queue (e.g. a queue URL or ARN).
///
/// Ferry never interprets the contents; the id only has to be stable, since
/// it is hashed into ring positions. Two queues with the same id are the
/// same destination.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DestinationId(String);

impl DestinationId {
    /// Wrap a raw destination identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Return the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the raw bytes, as hashed into the ring.
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<&str> for DestinationId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DestinationId({})", self.0)
    }
}

/// A region code, normalized to trimmed upper-case at construction.
///
/// Normalizing here keeps registry cache keys and composite keys in
/// agreement no matter which boundary (admin, ingest, config) the code
/// entered through.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RegionCode(String);

impl RegionCode {
    /// Normalize and wrap a region code (`"us"` and `" US "` are the same region).
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    /// Return the normalized code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RegionCode({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// Topology records
// ---------------------------------------------------------------------------

/// One delivery queue as recorded by the topology source of truth.
///
/// Within a region, active descriptors must have unique destination ids;
/// the router refuses to build a ring from a list that violates this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueDescriptor {
    /// Opaque destination identifier handed to the delivery transport.
    pub destination_id: DestinationId,
    /// Region this queue serves.
    pub region_code: RegionCode,
    /// Position in the region's queue list (display/admin ordering only;
    /// ring placement is independent of it).
    pub ordinal: u32,
    /// Whether the queue currently receives traffic. Removal is a soft
    /// delete: the descriptor stays, the flag flips.
    pub active: bool,
}

// ---------------------------------------------------------------------------
// Asset identity and composite key
// ---------------------------------------------------------------------------

/// Delimiter between composite key fields.
pub const KEY_DELIMITER: char = '_';

/// Version of the composite key format.
///
/// The field order (region, provider, program) and [`KEY_DELIMITER`] are
/// part of the hashing contract: changing either reassigns every asset in
/// flight, exactly as a full ring rebuild would. Bump this alongside any
/// such change so mixed-version deployments can detect the mismatch.
pub const KEY_FORMAT_VERSION: u16 = 1;

/// The identity fields an asset is routed by.
///
/// Provider and program may be absent on malformed ingest records; they
/// normalize to an empty field in the composite key rather than failing,
/// so every asset routes somewhere deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIdentity {
    /// Region the asset belongs to; selects the router instance.
    pub region_code: RegionCode,
    /// Content provider identifier.
    pub provider_id: Option<String>,
    /// Program (episode/title) identifier.
    pub program_id: Option<String>,
}

impl AssetIdentity {
    /// Assemble an identity from its parts.
    pub fn new(region_code: RegionCode, provider_id: Option<&str>, program_id: Option<&str>) -> Self {
        Self {
            region_code,
            provider_id: provider_id.map(str::to_owned),
            program_id: program_id.map(str::to_owned),
        }
    }

    /// The canonical hash input: `region_provider_program`.
    ///
    /// Pure and total — missing fields become empty, so the same triple
    /// always produces the same key. Hashing the full key (rather than a
    /// bare counter) is what keeps sequential program ids from clumping
    /// on the ring.
    pub fn composite_key(&self) -> String {
        let provider = self.provider_id.as_deref().unwrap_or("");
        let program = self.program_id.as_deref().unwrap_or("");
        format!(
            "{region}{d}{provider}{d}{program}",
            region = self.region_code,
            d = KEY_DELIMITER,
        )
    }
}

impl fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.composite_key())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
