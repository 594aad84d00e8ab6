#![allow(dead_code)]

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use relaydns_api::{create_api_routes, AppState};
use relaydns_application::use_cases::{GetCacheSnapshotUseCase, GetPendingStatsUseCase};
use relaydns_domain::{DnsMessage, Question, RecordType, ResourceRecord, ResponseCode};
use relaydns_infrastructure::dns::{DnsCache, DnsCacheConfig, InFlightTable};
use serde_json::Value;
use std::net::Ipv4Addr;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub cache: Arc<DnsCache>,
    pub pending: Arc<InFlightTable>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let cache = Arc::new(DnsCache::new(DnsCacheConfig::default()));
        let pending = Arc::new(InFlightTable::new(64));
        let state = AppState {
            cache: Arc::new(GetCacheSnapshotUseCase::new(cache.clone())),
            pending: Arc::new(GetPendingStatsUseCase::new(pending.clone())),
        };

        Self {
            cache,
            pending,
            router: Router::new().nest("/api", create_api_routes(state)),
        }
    }

    pub async fn get_json(&self, uri: &str) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }
}

pub fn a_answer(domain: &str, ttl: u32, ips: &[[u8; 4]]) -> DnsMessage {
    let mut message =
        DnsMessage::response_to(1, Question::new(domain, RecordType::A), ResponseCode::NoError);
    for ip in ips {
        message
            .answers
            .push(ResourceRecord::a(domain, ttl, Ipv4Addr::from(*ip)));
    }
    message
}
