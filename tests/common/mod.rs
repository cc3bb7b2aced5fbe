use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Router,
};
use motoloop::cache::{MemoryTrackCache, TrackCache};
use motoloop::models::{BikeCatalog, TemplateCatalog};
use motoloop::services::directions::{AuthMode, DirectionsProvider, OpenRouteServiceClient};
use motoloop::services::route_generator::RouteGenerator;
use motoloop::AppState;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Minimal directions response: three track points and an empty metadata block
#[allow(dead_code)]
pub const SAMPLE_GPX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="openrouteservice" xmlns="http://www.topografix.com/GPX/1/1">
<metadata><name>openrouteservice directions</name></metadata>
<trk><trkseg>
<trkpt lat="42.388900" lon="-71.129400"><ele>12.0</ele></trkpt>
<trkpt lat="42.512000" lon="-70.954000"><ele>18.5</ele></trkpt>
<trkpt lat="42.388900" lon="-71.129400"><ele>12.0</ele></trkpt>
</trkseg></trk>
</gpx>"#;

/// A request the mock directions server received
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub profile: String,
    pub authorization: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Directions server stand-in listening on an ephemeral local port
#[allow(dead_code)]
pub struct MockDirectionsServer {
    pub base_url: String,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

#[allow(dead_code)]
impl MockDirectionsServer {
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

async fn directions_handler(
    State(state): State<MockState>,
    Path(profile): Path<String>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, String) {
    let recorded = RecordedRequest {
        profile,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or(serde_json::Value::Null),
    };
    state.requests.lock().unwrap().push(recorded);

    (state.status, state.body.clone())
}

/// Start a mock `POST /{profile}/gpx` endpoint answering every call with
/// `status` and `body`
#[allow(dead_code)]
pub async fn spawn_mock_directions(status: StatusCode, body: &str) -> MockDirectionsServer {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let state = MockState {
        status,
        body: body.to_string(),
        requests: requests.clone(),
    };

    let app = Router::new()
        .route("/{profile}/gpx", post(directions_handler))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock directions server");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockDirectionsServer {
        base_url: format!("http://{}", addr),
        requests,
    }
}

/// Client pointed at a mock server, bearer auth as behind a proxy
#[allow(dead_code)]
pub fn mock_client(server: &MockDirectionsServer) -> OpenRouteServiceClient {
    OpenRouteServiceClient::with_config(
        "test-key".to_string(),
        server.base_url.clone(),
        "driving-car".to_string(),
        AuthMode::BearerHeader,
        Duration::from_secs(5),
    )
    .unwrap()
}

/// Router wired to a mock directions server with an in-memory track cache
#[allow(dead_code)]
pub fn setup_test_app(server: &MockDirectionsServer) -> axum::Router {
    let directions: Arc<dyn DirectionsProvider> = Arc::new(mock_client(server));
    let cache: Arc<dyn TrackCache> = Arc::new(MemoryTrackCache::new(3600, 100));
    let route_generator = RouteGenerator::new(
        TemplateCatalog::default(),
        BikeCatalog::default(),
        directions,
        Some(cache),
    );

    let state = Arc::new(AppState { route_generator });

    motoloop::routes::create_router(state)
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok() || std::env::var("ORS_API_KEY").is_err()
}
