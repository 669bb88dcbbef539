//! Availability under topology backend failure.

use ferry_integration_tests::{TestRig, descriptors, envelope, identity};
use ferry_router::{DispatchError, RouterError};
use ferry_types::{RegionCode, RouterConfig};

/// Config whose entries expire immediately, so every route exercises the
/// rebuild path.
fn expiring_config() -> RouterConfig {
    RouterConfig::from_toml("[cache]\nttl_secs = 0").unwrap()
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_dispatch_continues_on_stale_router() {
    let rig = TestRig::new(descriptors("US", 4), &expiring_config());

    // Prime the cache, then take the backend down.
    rig.dispatcher
        .dispatch(&envelope("US", "tplus", "ep-0001"))
        .await
        .unwrap();
    rig.topology.set_failing(true);

    // Routing keeps serving the expired router instead of failing hard.
    for i in 2..50 {
        rig.dispatcher
            .dispatch(&envelope("US", "tplus", &format!("ep-{i:04}")))
            .await
            .unwrap();
    }
    assert_eq!(rig.transport.total_delivered().await, 49);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_stale_assignments_match_fresh_ones() {
    let rig = TestRig::new(descriptors("US", 4), &expiring_config());

    let asset = identity("US", "tplus", "ep-0042");
    let fresh = rig.registry.route(&asset).await.unwrap();

    rig.topology.set_failing(true);
    let stale = rig.registry.route(&asset).await.unwrap();
    assert_eq!(fresh, stale, "stale serving changed an assignment");
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_unprimed_region_fails_while_backend_down() {
    let mut seed = descriptors("US", 4);
    seed.extend(descriptors("KR", 2));
    let rig = TestRig::new(seed, &expiring_config());

    // Only US is primed before the outage.
    rig.registry
        .route(&identity("US", "tplus", "ep-0001"))
        .await
        .unwrap();
    rig.topology.set_failing(true);

    // US keeps routing; KR has no cached router to fall back to.
    rig.registry
        .route(&identity("US", "tplus", "ep-0002"))
        .await
        .unwrap();
    let kr = rig.registry.route(&identity("KR", "wavve", "ep-0001")).await;
    assert!(matches!(kr, Err(RouterError::Topology(_))));
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_recovery_resumes_fresh_builds() {
    let rig = TestRig::new(descriptors("US", 2), &expiring_config());
    let region = RegionCode::new("US");

    rig.registry.get(&region).await.unwrap();
    rig.topology.set_failing(true);
    rig.registry.get(&region).await.unwrap();

    rig.topology.set_failing(false);
    use ferry_topology::TopologyStore;
    rig.topology
        .insert(ferry_integration_tests::descriptor("US", 2))
        .await
        .unwrap();

    // With the backend healthy again, the expired entry is rebuilt and
    // the topology change becomes visible.
    let rebuilt = rig.registry.get(&region).await.unwrap();
    assert_eq!(rebuilt.destination_count(), 3);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_admin_fails_cleanly_while_backend_down() {
    let rig = TestRig::with_region("US", 2);
    rig.topology.set_failing(true);

    let result = rig
        .admin
        .add_destination(ferry_integration_tests::descriptor("US", 2))
        .await;
    assert!(matches!(
        result,
        Err(ferry_router::AdminError::Topology(_))
    ));

    // Routing through the primed-nothing registry surfaces the outage
    // rather than inventing a destination.
    let dispatch = rig
        .dispatcher
        .dispatch(&envelope("US", "tplus", "ep-1"))
        .await;
    assert!(matches!(dispatch, Err(DispatchError::Routing(_))));
}
