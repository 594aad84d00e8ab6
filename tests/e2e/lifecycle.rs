mod helpers;

use helpers::{MockUpstream, RelayHarness, TestClient, UpstreamBehavior};
use relaydns_domain::{RecordType, ResponseCode};
use std::net::Ipv4Addr;
use std::time::Duration;
use tokio::net::UdpSocket;

#[tokio::test]
async fn test_unanswered_query_gets_servfail_after_timeout() {
    let upstream = MockUpstream::start(UpstreamBehavior::Silent).await.unwrap();
    let relay = RelayHarness::start_with_sweep(upstream.addr(), Some(Duration::from_secs(1))).await;
    let client = TestClient::new().await;

    client
        .send_query(relay.addr, 0x0BAD, "slow.example", RecordType::AAAA)
        .await;

    let reply = client
        .recv(Duration::from_secs(4))
        .await
        .expect("sweep should answer with SERVFAIL");

    assert_eq!(reply.id(), 0x0BAD);
    assert_eq!(reply.header.response_code(), ResponseCode::ServFail);
    assert_eq!(reply.questions[0].name, "slow.example");
    assert_eq!(relay.in_flight(), 0);
    assert_eq!(relay.cached_entries(), 0);
}

#[tokio::test]
async fn test_garbage_datagram_does_not_stop_the_loop() {
    let upstream = MockUpstream::start(UpstreamBehavior::Answer {
        ttl: 60,
        addr: Ipv4Addr::new(192, 0, 2, 1),
    })
    .await
    .unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;

    let noisy = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    noisy
        .send_to(&[0xFF, 0x00, 0x13], relay.addr)
        .await
        .unwrap();

    let client = TestClient::new().await;
    let reply = client
        .query(relay.addr, 77, "still-alive.example", RecordType::A)
        .await;

    assert_eq!(reply.id(), 77);
    assert_eq!(upstream.query_count(), 1);
}

#[tokio::test]
async fn test_receive_loop_stops_on_cancellation() {
    let upstream = MockUpstream::start(UpstreamBehavior::Answer {
        ttl: 60,
        addr: Ipv4Addr::new(192, 0, 2, 1),
    })
    .await
    .unwrap();
    let mut relay = RelayHarness::start(upstream.addr()).await;
    let client = TestClient::new().await;

    client
        .query(relay.addr, 1, "before.example", RecordType::A)
        .await;

    relay.stop().await;

    client
        .send_query(relay.addr, 2, "after.example", RecordType::A)
        .await;
    assert!(client.recv(Duration::from_millis(300)).await.is_none());
    assert_eq!(upstream.query_count(), 1);
}
