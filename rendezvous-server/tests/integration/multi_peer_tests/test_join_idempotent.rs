use rendezvous_core::{RoomId, ServerMessage};

use crate::integration::{create_test_service, init_tracing};
use crate::utils::{Participant, count_kind, settle};

#[tokio::test]
async fn test_rejoin_does_not_duplicate_membership() {
    init_tracing();

    let service = create_test_service();
    let mut a = Participant::connect(&service).await.unwrap();
    let mut b = Participant::connect(&service).await.unwrap();

    a.join(&service, "a@example.com", "r1").await.unwrap();
    b.join(&service, "b@example.com", "r1").await.unwrap();
    b.join(&service, "b@example.com", "r1").await.unwrap();
    settle(service.relay()).await.unwrap();

    let members = service.relay().members(RoomId::from("r1")).await.unwrap();
    assert_eq!(members.len(), 2);

    // Each join is confirmed, but the room hears about B once.
    let b_signals = b.drain();
    assert_eq!(count_kind(&b_signals, "room:join"), 2);
    assert_eq!(count_kind(&b_signals, "user:joined"), 0);
    assert_eq!(count_kind(&a.drain(), "user:joined"), 1);
}

#[tokio::test]
async fn test_identity_change_on_same_connection_is_announced() {
    init_tracing();

    let service = create_test_service();
    let mut a = Participant::connect(&service).await.unwrap();
    let mut b = Participant::connect(&service).await.unwrap();

    a.join(&service, "a@example.com", "r1").await.unwrap();
    b.join(&service, "b@example.com", "r1").await.unwrap();
    b.join(&service, "bob@example.com", "r1").await.unwrap();
    settle(service.relay()).await.unwrap();

    assert_eq!(count_kind(&a.drain(), "user:joined"), 2);
    assert_eq!(count_kind(&b.drain(), "room:join"), 2);

    let relay = service.relay();
    assert_eq!(relay.resolve("b@example.com".into()).await.unwrap(), None);
    assert_eq!(relay.resolve("bob@example.com".into()).await.unwrap(), Some(b.id));
    assert_eq!(relay.members(RoomId::from("r1")).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_rename_is_announced_in_every_joined_room() {
    init_tracing();

    let service = create_test_service();
    let mut a = Participant::connect(&service).await.unwrap();
    let mut b = Participant::connect(&service).await.unwrap();
    let mut c = Participant::connect(&service).await.unwrap();

    a.join(&service, "a@example.com", "r1").await.unwrap();
    c.join(&service, "c@example.com", "r2").await.unwrap();
    b.join(&service, "b@example.com", "r1").await.unwrap();
    settle(service.relay()).await.unwrap();
    a.drain();
    b.drain();
    c.drain();

    // B moves into r2 under a new name; r1 must learn the new name too.
    b.join(&service, "bob@example.com", "r2").await.unwrap();
    settle(service.relay()).await.unwrap();

    let renamed = ServerMessage::UserJoined {
        email: "bob@example.com".into(),
        id: b.id,
    };
    assert_eq!(a.drain(), vec![renamed.clone()]);
    assert_eq!(c.drain(), vec![renamed]);
    assert_eq!(count_kind(&b.drain(), "user:joined"), 0);

    // A later departure from r1 carries the name r1 was told about.
    service.close(&b.id).await;
    assert_eq!(
        a.next().await.unwrap(),
        ServerMessage::UserLeft {
            email: Some("bob@example.com".into()),
            id: b.id,
        }
    );
}
