use rendezvous_core::{ClientMessage, ConnectionId};
use serde_json::json;

use crate::integration::{create_test_relay, create_test_service, init_tracing};
use crate::utils::{Participant, call_offer, settle};

#[tokio::test]
async fn test_unknown_addressee_is_dropped_silently() {
    init_tracing();

    let (relay, signaling, _delivery_rx) = create_test_relay();
    let sender = signaling.open_connection().await;
    let departed = signaling.open_connection().await;
    signaling.close_connection(&departed).await;

    relay
        .submit(sender, call_offer(ConnectionId::new(), json!("O1")))
        .await
        .unwrap();
    relay
        .submit(
            sender,
            ClientMessage::CallAnswer {
                to: departed,
                ans: json!("S1"),
            },
        )
        .await
        .unwrap();

    settle(&relay).await.unwrap();
    assert_eq!(signaling.delivery_count().await, 0);
}

#[tokio::test]
async fn test_sender_gets_no_error_for_unknown_addressee() {
    init_tracing();

    let service = create_test_service();
    let mut a = Participant::connect(&service).await.unwrap();

    a.send(&service, call_offer(ConnectionId::new(), json!("O1")))
        .await
        .unwrap();

    settle(service.relay()).await.unwrap();
    assert!(a.drain().is_empty());
    assert!(service.is_open(&a.id));
}
