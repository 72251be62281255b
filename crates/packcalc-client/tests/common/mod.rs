#![allow(dead_code, reason = "each integration test binary uses a different subset")]

use chrono::{DateTime, Duration, TimeZone, Utc};
use packcalc_client::{Clock, ClientConfig, PackCalcClient};
use parking_lot::Mutex;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SECRET: &str = "test-secret";

/// Clock that only moves when told to.
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new() -> Arc<Self> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().expect("valid date");
        Arc::new(Self(Mutex::new(start)))
    }

    pub fn advance(&self, by: Duration) {
        *self.0.lock() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}

pub fn config_for(server: &MockServer) -> ClientConfig {
    ClientConfig::default().with_base_url(server.uri()).with_auth_secret(SECRET)
}

pub fn client_for(server: &MockServer, clock: Arc<ManualClock>) -> PackCalcClient {
    PackCalcClient::with_clock(config_for(server), clock).expect("client builds")
}

/// Mount a token endpoint answering `token`, optionally limited to `times` uses.
pub async fn mount_token(server: &MockServer, token: &str, times: Option<u64>, expect: u64) {
    let mock = Mock::given(method("POST"))
        .and(path("/auth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "token": token })));
    let mock = match times {
        Some(n) => mock.up_to_n_times(n),
        None => mock,
    };
    mock.expect(expect).mount(server).await;
}

pub fn configuration_json(id: i64, name: &str, sizes: &[u32], is_default: bool) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "pack_sizes": sizes,
        "is_default": is_default,
        "is_active": true,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-01-01T00:00:00Z"
    })
}
