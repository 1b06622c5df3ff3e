use std::collections::HashMap;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use tripflow_agents::{GenerationError, GenerationOptions, GenerativeBackend, TripPlanner};
use tripflow_api::{build_router, ApiState, Capabilities};
use tripflow_core::GeoPoint;
use tripflow_observability::AppMetrics;
use tripflow_places::{LocationBias, PlaceCandidate, PlaceResolver, PlaceSearch, ResolutionError};

const FENCED_PLAN: &str = "```json\n{\"title\":\"X\",\"days\":[{\"dayNumber\":1,\"places\":[{\"placeName\":\"Hotel Foo\",\"activityType\":\"sightseeing\",\"durationMin\":60},{\"placeName\":\"Old Town Square\",\"activityType\":\"sightseeing\",\"durationMin\":90}]}]}\n```";

enum Reply {
    Text(&'static str),
    NotConfigured,
}

struct StubBackend(Reply);

impl GenerativeBackend for StubBackend {
    async fn generate(
        &self,
        _prompt: &str,
        _options: GenerationOptions,
    ) -> Result<String, GenerationError> {
        match self.0 {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::NotConfigured => Err(GenerationError::NotConfigured("GEMINI_API_KEY is not set")),
        }
    }
}

#[derive(Default)]
struct StubSearch {
    responses: HashMap<&'static str, Vec<PlaceCandidate>>,
}

impl PlaceSearch for StubSearch {
    async fn search_text(
        &self,
        query: &str,
        _bias: Option<LocationBias>,
    ) -> Result<Vec<PlaceCandidate>, ResolutionError> {
        Ok(self.responses.get(query).cloned().unwrap_or_default())
    }

    fn photo_url(&self, photo_ref: &str, max_width_px: u32, max_height_px: u32) -> String {
        format!("https://photos.test/{photo_ref}?w={max_width_px}&h={max_height_px}")
    }
}

fn prague_search() -> StubSearch {
    let prague = GeoPoint::new(50.0755, 14.4378);
    let mut responses = HashMap::new();
    responses.insert(
        "Prague",
        vec![PlaceCandidate {
            id: "city".to_string(),
            display_name: "Prague".to_string(),
            location: Some(prague),
            ..PlaceCandidate::default()
        }],
    );
    responses.insert(
        "Old Town Square",
        vec![PlaceCandidate {
            id: "ots".to_string(),
            display_name: "Old Town Square".to_string(),
            formatted_address: Some("Staroměstské nám., Prague 1, Czechia".to_string()),
            business_status: Some("OPERATIONAL".to_string()),
            location: Some(GeoPoint::new(50.0875, 14.4213)),
            photo_refs: vec!["places/ots/photos/1".to_string()],
            types: vec!["tourist_attraction".to_string()],
            ..PlaceCandidate::default()
        }],
    );
    StubSearch { responses }
}

fn app_with(reply: Reply, search: StubSearch) -> Router {
    let metrics = AppMetrics::shared();
    build_router(ApiState {
        planner: Arc::new(TripPlanner::new(StubBackend(reply), metrics.clone())),
        resolver: Arc::new(PlaceResolver::new(
            search,
            chrono::Duration::hours(6),
            metrics.clone(),
        )),
        metrics,
        capabilities: Capabilities {
            generation: true,
            place_search: true,
        },
        allowed_origins: Arc::new(vec!["http://localhost:5173".to_string()]),
    })
}

fn app() -> Router {
    app_with(Reply::Text(FENCED_PLAN), prague_search())
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn health_reports_capabilities_and_metrics() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let parsed = read_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["capabilities"], json!({ "generation": true, "placeSearch": true }));
    assert_eq!(parsed["metrics"]["planRequestsTotal"], 0);
}

#[tokio::test]
async fn generate_plan_filters_lodging_and_pads_days() {
    let request = post_json(
        "/api/generate-plan",
        json!({
            "destination": "Prague",
            "days": 2,
            "companions": "friends",
            "style": "culture",
            "useWebSearch": false
        }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = read_json(response).await;
    assert_eq!(parsed["title"], "X");
    assert_eq!(parsed["destination"], "Prague");
    assert_eq!(
        parsed["days"],
        json!([
            {
                "dayNumber": 1,
                "places": [{
                    "order": 0,
                    "placeName": "Old Town Square",
                    "description": "",
                    "activityType": "sightseeing",
                    "durationMin": 90
                }]
            },
            { "dayNumber": 2, "places": [] }
        ])
    );
}

#[tokio::test]
async fn generate_plan_rejects_out_of_range_days() {
    let request = post_json(
        "/api/generate-plan",
        json!({ "destination": "Prague", "days": 0, "companions": "", "style": "" }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn malformed_body_is_invalid_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-plan")
        .header("content-type", "application/json")
        .body(Body::from("{\"destination\":"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(read_json(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn unparseable_model_text_is_bad_gateway() {
    let app = app_with(Reply::Text("I'd love to help you plan!"), prague_search());
    let request = post_json(
        "/api/generate-plan",
        json!({ "destination": "Prague", "days": 1, "companions": "solo", "style": "food" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(read_json(response).await["error"], "plan_parse_failed");
}

#[tokio::test]
async fn unconfigured_generation_is_service_unavailable() {
    let app = app_with(Reply::NotConfigured, prague_search());
    let request = post_json(
        "/api/generate-plan",
        json!({ "destination": "Prague", "days": 1, "companions": "solo", "style": "food" }),
    );

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(read_json(response).await["error"], "generation_unavailable");
}

#[tokio::test]
async fn resolve_places_maps_each_name_to_its_result() {
    let request = post_json(
        "/api/resolve-places",
        json!({
            "names": ["Old Town Square", "Nonexistent Cafe", "Old Town Square"],
            "destination": "Prague"
        }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = read_json(response).await;
    assert_eq!(parsed["destination"], "Prague");
    let results = parsed["results"].as_object().unwrap();
    assert_eq!(results.len(), 2);

    let square = &results["Old Town Square"];
    assert_eq!(square["found"], true);
    assert_eq!(square["googlePlaceId"], "ots");
    assert_eq!(square["photoUrl"], "https://photos.test/places/ots/photos/1?w=400&h=400");
    assert_eq!(square["hashtags"], json!(["#Landmark"]));

    assert_eq!(results["Nonexistent Cafe"], json!({ "found": false }));
}

#[tokio::test]
async fn resolve_places_rejects_empty_batch() {
    let request = post_json("/api/resolve-places", json!({ "names": [] }));

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn place_details_accepts_legacy_name_field() {
    let request = post_json(
        "/api/place-details",
        json!({ "name": "Old Town Square", "destination": "Prague" }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = read_json(response).await;
    assert_eq!(parsed["found"], true);
    assert_eq!(parsed["canonicalName"], "Old Town Square");
}

#[tokio::test]
async fn legacy_get_place_details_path_is_served() {
    let request = post_json(
        "/api/get-place-details",
        json!({ "placeName": "Old Town Square", "destination": "Prague" }),
    );

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = read_json(response).await;
    assert_eq!(parsed["found"], true);
    assert_eq!(parsed["googlePlaceId"], "ots");
}

#[tokio::test]
async fn place_details_requires_a_name() {
    let request = post_json("/api/place-details", json!({ "placeName": "   " }));

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
