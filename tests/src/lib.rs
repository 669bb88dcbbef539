//! Shared test harness for Ferry integration tests.
//!
//! Provides [`TestRig`] — a fully wired routing stack (memory topology,
//! registry, memory transport, dispatcher, admin) exercising the same
//! pipeline a production deployment runs: identity → composite key →
//! registry → ring → transport.

use std::sync::Arc;

use ferry_router::{AssetDispatcher, RouterRegistry, TopologyAdmin};
use ferry_topology::{FlakyTopology, MemoryTopology};
use ferry_transport::{AssetEnvelope, MemoryTransport};
use ferry_types::{AssetIdentity, DestinationId, QueueDescriptor, RegionCode, RouterConfig};

/// A fully wired routing stack over in-memory collaborators.
pub struct TestRig {
    /// Backing topology, reachable for direct mutation in tests.
    pub topology: Arc<FlakyTopology>,
    /// The registry under test.
    pub registry: Arc<RouterRegistry>,
    /// Records every delivery.
    pub transport: Arc<MemoryTransport>,
    /// Routes and enqueues.
    pub dispatcher: AssetDispatcher,
    /// Add/remove-destination workflows.
    pub admin: TopologyAdmin,
}

impl TestRig {
    /// Build a rig from seed descriptors and a config.
    pub fn new(seed: Vec<QueueDescriptor>, config: &RouterConfig) -> Self {
        let topology = Arc::new(FlakyTopology::new(Arc::new(
            MemoryTopology::with_descriptors(seed),
        )));
        let registry = Arc::new(RouterRegistry::new(topology.clone(), config));
        let transport = Arc::new(MemoryTransport::new());
        let dispatcher = AssetDispatcher::new(registry.clone(), transport.clone());
        let admin = TopologyAdmin::new(topology.clone(), registry.clone());

        Self {
            topology,
            registry,
            transport,
            dispatcher,
            admin,
        }
    }

    /// Rig with `count` active queues in one region and default config.
    pub fn with_region(region_code: &str, count: u32) -> Self {
        Self::new(descriptors(region_code, count), &RouterConfig::default())
    }
}

/// Descriptor for queue `n` of a region, active.
pub fn descriptor(region_code: &str, n: u32) -> QueueDescriptor {
    QueueDescriptor {
        destination_id: DestinationId::new(format!(
            "https://queues.example.com/{}/asset-queue-{n}",
            region_code.to_lowercase()
        )),
        region_code: RegionCode::new(region_code),
        ordinal: n,
        active: true,
    }
}

/// `count` active queue descriptors for one region.
pub fn descriptors(region_code: &str, count: u32) -> Vec<QueueDescriptor> {
    (0..count).map(|n| descriptor(region_code, n)).collect()
}

/// An asset identity with all three fields present.
pub fn identity(region_code: &str, provider: &str, program: &str) -> AssetIdentity {
    AssetIdentity::new(RegionCode::new(region_code), Some(provider), Some(program))
}

/// An envelope carrying a synthetic payload for the given program id.
pub fn envelope(region_code: &str, provider: &str, program: &str) -> AssetEnvelope {
    AssetEnvelope::new(
        identity(region_code, provider, program),
        format!("asset:{program}").into_bytes(),
    )
}

/// Sequentially numbered envelopes from one provider.
pub fn program_envelopes(
    region_code: &str,
    provider: &str,
    count: usize,
) -> Vec<AssetEnvelope> {
    (0..count)
        .map(|i| envelope(region_code, provider, &format!("program-{i:06}")))
        .collect()
}
