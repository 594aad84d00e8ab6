mod helpers;

use helpers::{MockUpstream, RelayHarness, TestClient, UpstreamBehavior};
use relaydns_application::ports::MessageCodec;
use relaydns_domain::{
    DnsMessage, Question, RecordData, RecordType, ResourceRecord, ResponseCode,
};
use relaydns_infrastructure::dns::WireCodec;
use std::net::Ipv4Addr;
use std::time::Duration;

const EXAMPLE_IP: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

fn answering() -> UpstreamBehavior {
    UpstreamBehavior::Answer {
        ttl: 300,
        addr: EXAMPLE_IP,
    }
}

fn a_reply_to(query: &DnsMessage, id: u16) -> Vec<u8> {
    let question = query.first_question().unwrap().clone();
    let mut reply = DnsMessage::response_to(id, question.clone(), ResponseCode::NoError);
    reply
        .answers
        .push(ResourceRecord::a(question.name, 60, Ipv4Addr::new(192, 0, 2, 7)));
    WireCodec::new().encode(&reply).unwrap()
}

#[tokio::test]
async fn test_miss_is_forwarded_once_then_served_from_cache() {
    let upstream = MockUpstream::start(answering()).await.unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;

    let first = TestClient::new().await;
    let reply = first
        .query(relay.addr, 0x1234, "example.com", RecordType::A)
        .await;

    assert_eq!(reply.id(), 0x1234);
    assert!(reply.is_response());
    assert_eq!(reply.answers.len(), 1);
    assert_eq!(reply.answers[0].data, RecordData::A(EXAMPLE_IP));
    assert_eq!(upstream.query_count(), 1);
    assert_eq!(relay.cached_entries(), 1);
    assert_eq!(relay.in_flight(), 0);

    let second = TestClient::new().await;
    let cached = second
        .query(relay.addr, 0x9999, "example.com", RecordType::A)
        .await;

    assert_eq!(cached.id(), 0x9999);
    assert_eq!(cached.answers[0].data, RecordData::A(EXAMPLE_IP));
    assert!(cached.answers[0].ttl <= 300);
    assert_eq!(upstream.query_count(), 1, "cache hit must not reach the upstream");
}

#[tokio::test]
async fn test_names_differing_in_case_share_one_entry() {
    let upstream = MockUpstream::start(answering()).await.unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;
    let client = TestClient::new().await;

    client
        .query(relay.addr, 1, "Example.COM", RecordType::A)
        .await;
    let reply = client
        .query(relay.addr, 2, "EXAMPLE.com", RecordType::A)
        .await;

    assert_eq!(upstream.query_count(), 1);
    assert_eq!(reply.id(), 2);
    assert_eq!(reply.questions[0].name, "EXAMPLE.com", "client spelling is echoed");
}

#[tokio::test]
async fn test_different_types_are_cached_separately() {
    let upstream = MockUpstream::start(answering()).await.unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;
    let client = TestClient::new().await;

    client.query(relay.addr, 1, "example.com", RecordType::A).await;
    client.query(relay.addr, 2, "example.com", RecordType::MX).await;

    assert_eq!(upstream.query_count(), 2);
    assert_eq!(relay.cached_entries(), 2);
}

#[tokio::test]
async fn test_colliding_client_ids_are_remapped_upstream() {
    let upstream = MockUpstream::start(UpstreamBehavior::Silent).await.unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;
    let alice = TestClient::new().await;
    let bob = TestClient::new().await;

    alice
        .send_query(relay.addr, 0x0001, "alice.example", RecordType::A)
        .await;
    assert!(upstream.wait_for_queries(1, Duration::from_secs(2)).await);
    bob.send_query(relay.addr, 0x0001, "bob.example", RecordType::A)
        .await;
    assert!(upstream.wait_for_queries(2, Duration::from_secs(2)).await);

    let forwarded = upstream.received();
    assert_eq!(forwarded[0].id(), 0x0001);
    assert_ne!(forwarded[1].id(), 0x0001, "second query needs a fresh upstream ID");
    assert_eq!(relay.in_flight(), 2);

    for query in forwarded.iter().rev() {
        upstream
            .send_raw(&a_reply_to(query, query.id()), relay.addr)
            .await;
    }

    let to_alice = alice.recv(Duration::from_secs(2)).await.unwrap();
    let to_bob = bob.recv(Duration::from_secs(2)).await.unwrap();

    assert_eq!(to_alice.id(), 0x0001);
    assert_eq!(to_alice.questions[0].name, "alice.example");
    assert_eq!(to_bob.id(), 0x0001);
    assert_eq!(to_bob.questions[0].name, "bob.example");
    assert_eq!(relay.in_flight(), 0);
}

#[tokio::test]
async fn test_unsolicited_and_mismatched_answers_are_dropped() {
    let upstream = MockUpstream::start(UpstreamBehavior::Silent).await.unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;
    let client = TestClient::new().await;

    client
        .send_query(relay.addr, 0x0700, "pending.example", RecordType::A)
        .await;
    assert!(upstream.wait_for_queries(1, Duration::from_secs(2)).await);
    let forwarded = upstream.received().remove(0);

    // Unknown ID
    upstream
        .send_raw(&a_reply_to(&forwarded, forwarded.id() ^ 0x5555), relay.addr)
        .await;
    // Right ID, wrong question
    let other = DnsMessage::query(
        forwarded.id(),
        Question::new("other.example", RecordType::A),
    );
    upstream
        .send_raw(&a_reply_to(&other, forwarded.id()), relay.addr)
        .await;

    assert!(client.recv(Duration::from_millis(300)).await.is_none());
    assert_eq!(relay.in_flight(), 1);
    assert_eq!(relay.cached_entries(), 0);

    upstream
        .send_raw(&a_reply_to(&forwarded, forwarded.id()), relay.addr)
        .await;
    let reply = client.recv(Duration::from_secs(2)).await.unwrap();

    assert_eq!(reply.id(), 0x0700);
    assert_eq!(relay.in_flight(), 0);
}

#[tokio::test]
async fn test_duplicate_answer_is_relayed_only_once() {
    let upstream = MockUpstream::start(UpstreamBehavior::Silent).await.unwrap();
    let relay = RelayHarness::start(upstream.addr()).await;
    let client = TestClient::new().await;

    client
        .send_query(relay.addr, 0x0042, "dup.example", RecordType::A)
        .await;
    assert!(upstream.wait_for_queries(1, Duration::from_secs(2)).await);
    let forwarded = upstream.received().remove(0);

    let answer = a_reply_to(&forwarded, forwarded.id());
    upstream.send_raw(&answer, relay.addr).await;
    upstream.send_raw(&answer, relay.addr).await;

    assert!(client.recv(Duration::from_secs(2)).await.is_some());
    assert!(client.recv(Duration::from_millis(300)).await.is_none());
}
