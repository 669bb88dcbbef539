//! [`RouterRegistry`] — per-region router cache with TTL refresh.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ferry_topology::TopologyStore;
use ferry_types::{AssetIdentity, DestinationId, RegionCode, RouterConfig};
use tokio::sync::{Mutex, RwLock};
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::error::RouterError;
use crate::instance::RouterInstance;

/// A cached router with its build timestamp.
struct RegistryEntry {
    instance: Arc<RouterInstance>,
    built_at: Instant,
}

/// Region-to-router cache, rebuilt lazily from the topology store.
///
/// Routing reads share immutable [`RouterInstance`]s without locking;
/// the registry's maps are the only mutable state. Entries are replaced
/// wholesale — on TTL expiry or explicit invalidation — never edited.
pub struct RouterRegistry {
    topology: Arc<dyn TopologyStore>,
    entries: RwLock<HashMap<RegionCode, RegistryEntry>>,
    /// Per-region build locks.
    ///
    /// The outer map uses `Mutex` (not `RwLock`) to prevent a TOCTOU race
    /// where concurrent miss handlers each create their own lock for the
    /// same region and rebuild in parallel. Holding a region's lock makes
    /// that region's rebuild exclusive: every caller racing on the miss
    /// observes the one freshly built instance.
    build_locks: Mutex<HashMap<RegionCode, Arc<Mutex<()>>>>,
    virtual_nodes: u16,
    cache_ttl: Duration,
    load_timeout: Duration,
}

impl RouterRegistry {
    /// Create a registry over a topology source.
    pub fn new(topology: Arc<dyn TopologyStore>, config: &RouterConfig) -> Self {
        Self {
            topology,
            entries: RwLock::new(HashMap::new()),
            build_locks: Mutex::new(HashMap::new()),
            virtual_nodes: config.virtual_nodes(),
            cache_ttl: config.cache_ttl(),
            load_timeout: config.load_timeout(),
        }
    }

    /// Resolve the router for a region, rebuilding on miss or expiry.
    pub async fn get(&self, region: &RegionCode) -> Result<Arc<RouterInstance>, RouterError> {
        if let Some(instance) = self.lookup_fresh(region).await {
            debug!(%region, "router cache hit");
            return Ok(instance);
        }

        let build_lock = self.build_lock(region).await;
        let _guard = build_lock.lock().await;

        // Another caller may have finished the rebuild while we waited.
        if let Some(instance) = self.lookup_fresh(region).await {
            return Ok(instance);
        }

        self.rebuild(region).await
    }

    /// Route an asset through its region's router.
    pub async fn route(&self, identity: &AssetIdentity) -> Result<DestinationId, RouterError> {
        let instance = self.get(&identity.region_code).await?;
        instance.route(identity)
    }

    /// Drop a region's cached router, forcing a rebuild on next use.
    pub async fn invalidate(&self, region: &RegionCode) {
        if self.entries.write().await.remove(region).is_some() {
            debug!(%region, "invalidated router");
        }
    }

    /// Drop every cached router.
    pub async fn invalidate_all(&self) {
        let mut entries = self.entries.write().await;
        let dropped = entries.len();
        entries.clear();
        info!(regions = dropped, "invalidated all routers");
    }

    /// Invalidate and immediately rebuild one region.
    ///
    /// Used by administrative add/remove workflows so new destinations
    /// start receiving traffic (and removed ones stop) right away.
    pub async fn refresh(&self, region: &RegionCode) -> Result<Arc<RouterInstance>, RouterError> {
        info!(%region, "refreshing router");
        self.invalidate(region).await;
        self.get(region).await
    }

    /// Rebuild every region the topology currently knows about.
    pub async fn refresh_all(&self) -> Result<(), RouterError> {
        info!("refreshing all routers");
        self.invalidate_all().await;

        let regions = timeout(self.load_timeout, self.topology.list_active_regions())
            .await
            .map_err(|_| RouterError::LoadTimeout(self.load_timeout))??;

        for region in regions {
            self.get(&region).await?;
        }
        Ok(())
    }

    /// Number of cached routers, fresh or stale.
    pub async fn cached_regions(&self) -> usize {
        self.entries.read().await.len()
    }

    async fn lookup_fresh(&self, region: &RegionCode) -> Option<Arc<RouterInstance>> {
        let entries = self.entries.read().await;
        let entry = entries.get(region)?;
        if entry.built_at.elapsed() < self.cache_ttl {
            Some(entry.instance.clone())
        } else {
            None
        }
    }

    async fn lookup_any(&self, region: &RegionCode) -> Option<Arc<RouterInstance>> {
        self.entries
            .read()
            .await
            .get(region)
            .map(|entry| entry.instance.clone())
    }

    async fn build_lock(&self, region: &RegionCode) -> Arc<Mutex<()>> {
        let mut locks = self.build_locks.lock().await;
        locks
            .entry(region.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Fetch topology and swap in a freshly built router.
    ///
    /// Caller must hold the region's build lock.
    async fn rebuild(&self, region: &RegionCode) -> Result<Arc<RouterInstance>, RouterError> {
        let loaded = match timeout(
            self.load_timeout,
            self.topology.list_active_destinations(region),
        )
        .await
        {
            Ok(Ok(descriptors)) => Ok(descriptors),
            Ok(Err(e)) => Err(RouterError::Topology(e)),
            Err(_) => Err(RouterError::LoadTimeout(self.load_timeout)),
        };

        let descriptors = match loaded {
            Ok(descriptors) => descriptors,
            Err(e) => {
                // Favor availability over freshness: keep routing with the
                // expired router if one exists. A first build has nothing
                // to fall back to, so the transient error surfaces.
                if let Some(stale) = self.lookup_any(region).await {
                    warn!(%region, error = %e, "topology load failed, serving stale router");
                    return Ok(stale);
                }
                return Err(e);
            }
        };

        if descriptors.is_empty() {
            // An authoritative empty list is configuration, not an outage:
            // drop any cached router rather than keep routing to queues
            // the topology says are gone.
            self.entries.write().await.remove(region);
            return Err(RouterError::RegionNotConfigured(region.clone()));
        }

        let instance = Arc::new(RouterInstance::build(
            region.clone(),
            descriptors,
            self.virtual_nodes,
        )?);

        let mut entries = self.entries.write().await;
        entries.insert(
            region.clone(),
            RegistryEntry {
                instance: instance.clone(),
                built_at: Instant::now(),
            },
        );
        info!(
            %region,
            destinations = instance.destination_count(),
            "router entry replaced"
        );

        Ok(instance)
    }
}

impl std::fmt::Debug for RouterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterRegistry")
            .field("virtual_nodes", &self.virtual_nodes)
            .field("cache_ttl", &self.cache_ttl)
            .field("load_timeout", &self.load_timeout)
            .finish_non_exhaustive()
    }
}
