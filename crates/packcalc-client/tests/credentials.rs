#![allow(unused_crate_dependencies)]
#![allow(clippy::tests_outside_test_module, reason = "integration tests live in tests/ dir")]
#![allow(clippy::expect_used, reason = "integration test: panics are the assertion mechanism")]

mod common;

use chrono::Duration;
use common::{client_for, mount_token, ManualClock};
use packcalc_client::{ClientConfig, ClientError, Clock, CredentialCache};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

#[tokio::test]
async fn test_token_cached_within_window_and_refreshed_after_expiry() {
    let server = MockServer::start().await;
    mount_token(&server, "first", Some(1), 1).await;
    mount_token(&server, "second", None, 1).await;

    let clock = ManualClock::new();
    let client = client_for(&server, clock.clone());
    let credentials = client.credentials();

    assert_eq!(credentials.get_token().await.expect("first exchange"), "first");

    clock.advance(Duration::minutes(10));
    assert_eq!(credentials.get_token().await.expect("cached"), "first");

    clock.advance(Duration::minutes(46));
    assert_eq!(credentials.get_token().await.expect("second exchange"), "second");
}

#[tokio::test]
async fn test_token_expires_exactly_at_ttl() {
    let server = MockServer::start().await;
    mount_token(&server, "first", Some(1), 1).await;
    mount_token(&server, "second", None, 1).await;

    let clock = ManualClock::new();
    let client = client_for(&server, clock.clone());
    let credentials = client.credentials();

    credentials.get_token().await.expect("first exchange");
    let expiry = credentials.expires_at().await.expect("token cached");
    assert_eq!(expiry, clock.now() + Duration::minutes(55));

    clock.advance(Duration::minutes(55) - Duration::seconds(1));
    assert_eq!(credentials.get_token().await.expect("still cached"), "first");

    clock.advance(Duration::seconds(1));
    assert_eq!(credentials.get_token().await.expect("refresh at expiry"), "second");
}

#[tokio::test]
async fn test_exchange_sends_secret() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .and(body_json(json!({ "secret": common::SECRET })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "token": "t", "expires_at": 1 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ManualClock::new());
    assert_eq!(client.credentials().get_token().await.expect("exchange"), "t");
}

#[tokio::test]
async fn test_invalidate_forces_fresh_exchange() {
    let server = MockServer::start().await;
    mount_token(&server, "first", Some(1), 1).await;
    mount_token(&server, "second", None, 1).await;

    let client = client_for(&server, ManualClock::new());
    let credentials = client.credentials();

    credentials.get_token().await.expect("first exchange");
    assert!(credentials.has_token().await);

    credentials.invalidate().await;
    assert!(!credentials.has_token().await);
    assert_eq!(credentials.expires_at().await, None);

    assert_eq!(credentials.get_token().await.expect("second exchange"), "second");
}

#[tokio::test]
async fn test_rejected_exchange_is_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Invalid secret" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ManualClock::new());
    let err = client.credentials().get_token().await.expect_err("exchange must fail");

    match err {
        ClientError::Auth { status, message } => {
            assert_eq!(status, Some(401));
            assert_eq!(message, "Invalid secret");
        },
        other => panic!("expected Auth error, got {other:?}"),
    }
    assert!(!client.credentials().has_token().await);
}

#[tokio::test]
async fn test_unreachable_server_is_auth_error() {
    // Port 9 (discard) is closed on test machines; connect fails immediately.
    let config = ClientConfig::default().with_base_url("http://127.0.0.1:9");
    let credentials = CredentialCache::new(&config).expect("cache builds");

    let err = credentials.get_token().await.expect_err("exchange must fail");
    assert!(matches!(err, ClientError::Auth { status: None, .. }), "got {err:?}");
}

#[tokio::test]
async fn test_concurrent_cold_callers_share_one_exchange() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "token": "shared" }))
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, ManualClock::new());
    let credentials = client.credentials();

    let (a, b, c) =
        tokio::join!(credentials.get_token(), credentials.get_token(), credentials.get_token());
    assert_eq!(a.expect("a"), "shared");
    assert_eq!(b.expect("b"), "shared");
    assert_eq!(c.expect("c"), "shared");
}

/// Token endpoint that moves the clock forward while it answers.
struct SlowExchange {
    clock: Arc<ManualClock>,
    latency: Duration,
}

impl Respond for SlowExchange {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.clock.advance(self.latency);
        ResponseTemplate::new(200).set_body_json(json!({ "token": "slow" }))
    }
}

#[tokio::test]
async fn test_expiry_counts_from_exchange_response() {
    let server = MockServer::start().await;
    let clock = ManualClock::new();
    let started = clock.now();
    Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(SlowExchange { clock: clock.clone(), latency: Duration::seconds(30) })
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, clock.clone());
    let credentials = client.credentials();
    credentials.get_token().await.expect("exchange");

    let expiry = credentials.expires_at().await.expect("token cached");
    assert_eq!(expiry, started + Duration::seconds(30) + Duration::minutes(55));

    clock.advance(Duration::minutes(55) - Duration::seconds(1));
    assert_eq!(credentials.get_token().await.expect("still cached"), "slow");
}
