//! Full-pipeline dispatch: identity → registry → ring → transport.

use ferry_integration_tests::{TestRig, envelope, program_envelopes};
use ferry_router::DispatchError;
use ferry_types::DestinationId;

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_dispatch_delivers_every_asset() {
    let rig = TestRig::with_region("US", 4);
    let envelopes = program_envelopes("US", "tplus", 200);

    for env in &envelopes {
        rig.dispatcher.dispatch(env).await.unwrap();
    }

    assert_eq!(rig.transport.total_delivered().await, 200);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_dispatch_agrees_with_registry_routing() {
    let rig = TestRig::with_region("US", 4);

    for env in program_envelopes("US", "tplus", 100) {
        let delivered_to = rig.dispatcher.dispatch(&env).await.unwrap();
        let routed_to = rig.registry.route(&env.identity).await.unwrap();
        assert_eq!(delivered_to, routed_to);

        let recorded = rig.transport.delivered(&delivered_to).await;
        assert!(
            recorded.iter().any(|e| e == &env),
            "envelope missing from its destination queue"
        );
    }
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_redispatch_lands_on_same_queue() {
    let rig = TestRig::with_region("US", 4);
    let env = envelope("US", "tplus", "ep-0042");

    let first = rig.dispatcher.dispatch(&env).await.unwrap();
    let second = rig.dispatcher.dispatch(&env).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(rig.transport.delivered_count(&first).await, 2);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_down_destination_surfaces_delivery_error() {
    let rig = TestRig::with_region("US", 4);
    let env = envelope("US", "tplus", "ep-0042");

    let destination = rig.registry.route(&env.identity).await.unwrap();
    rig.transport.mark_down(destination.clone()).await;

    let result = rig.dispatcher.dispatch(&env).await;
    assert!(matches!(result, Err(DispatchError::Delivery(_))));

    // The asset was not silently re-routed to a surviving queue.
    assert_eq!(rig.transport.total_delivered().await, 0);
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_unconfigured_region_surfaces_routing_error() {
    let rig = TestRig::with_region("US", 4);

    let result = rig.dispatcher.dispatch(&envelope("ZZ", "tplus", "ep-1")).await;
    assert!(matches!(result, Err(DispatchError::Routing(_))));
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn test_envelope_survives_wire_roundtrip_through_queue() {
    let rig = TestRig::with_region("US", 4);
    let env = envelope("US", "tplus", "ep-0042");

    let destination: DestinationId = rig.dispatcher.dispatch(&env).await.unwrap();
    let recorded = rig.transport.delivered(&destination).await;

    let bytes = recorded[0].to_bytes().unwrap();
    let decoded = ferry_transport::AssetEnvelope::from_bytes(&bytes).unwrap();
    assert_eq!(decoded, env);
    assert_eq!(
        decoded.routing_hash,
        ferry_ring::key_position(&env.identity.composite_key())
    );
}
