use rendezvous_core::{ClientMessage, RoomId, ServerMessage};
use serde_json::json;

use crate::integration::{create_test_service, init_tracing};
use crate::utils::{Participant, call_offer, settle};

#[tokio::test]
async fn test_disconnect_reclaims_rooms_and_identity() {
    init_tracing();

    let service = create_test_service();
    let mut a = Participant::connect(&service).await.unwrap();
    let mut b = Participant::connect(&service).await.unwrap();

    a.join(&service, "a@example.com", "r1").await.unwrap();
    b.join(&service, "b@example.com", "r1").await.unwrap();
    b.join(&service, "b@example.com", "r2").await.unwrap();
    settle(service.relay()).await.unwrap();
    a.drain();
    b.drain();

    service.close(&b.id).await;

    assert_eq!(
        a.next().await.unwrap(),
        ServerMessage::UserLeft {
            email: Some("b@example.com".into()),
            id: b.id,
        }
    );

    let relay = service.relay();
    assert_eq!(relay.members(RoomId::from("r1")).await.unwrap(), vec![a.id]);
    assert!(relay.members(RoomId::from("r2")).await.unwrap().is_empty());
    assert_eq!(relay.resolve("b@example.com".into()).await.unwrap(), None);
    assert_eq!(relay.resolve("a@example.com".into()).await.unwrap(), Some(a.id));
    assert!(!service.is_open(&b.id));
    assert_eq!(service.connection_count(), 1);

    // The stale id is no longer reachable.
    a.send(&service, call_offer(b.id, json!("O1"))).await.unwrap();
    settle(relay).await.unwrap();
    assert!(a.drain().is_empty());
    assert!(b.drain().is_empty());
}

#[tokio::test]
async fn test_leave_notifies_remaining_members() {
    init_tracing();

    let service = create_test_service();
    let mut a = Participant::connect(&service).await.unwrap();
    let mut b = Participant::connect(&service).await.unwrap();

    a.join(&service, "a@example.com", "r1").await.unwrap();
    b.join(&service, "b@example.com", "r1").await.unwrap();
    settle(service.relay()).await.unwrap();
    a.drain();
    b.drain();

    b.send(&service, ClientMessage::RoomLeave { room: "r1".into() })
        .await
        .unwrap();

    assert_eq!(
        a.next().await.unwrap(),
        ServerMessage::UserLeft {
            email: Some("b@example.com".into()),
            id: b.id,
        }
    );
    assert_eq!(
        service.relay().members(RoomId::from("r1")).await.unwrap(),
        vec![a.id]
    );

    // Leaving a room you are not in is silent.
    b.send(&service, ClientMessage::RoomLeave { room: "r1".into() })
        .await
        .unwrap();
    settle(service.relay()).await.unwrap();
    assert!(a.drain().is_empty());
    assert!(b.drain().is_empty());

    // Identity survives leaving a room; only disconnect drops it.
    assert_eq!(
        service.relay().resolve("b@example.com".into()).await.unwrap(),
        Some(b.id)
    );
}
