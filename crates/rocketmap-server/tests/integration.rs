use axum::http::StatusCode;
use http_body_util::BodyExt;
use rocketmap_scorer::ScorerClient;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Bootstrap a minimal RocketMap project inside the given temp directory.
fn init_project(dir: &TempDir) {
    let config = rocketmap_core::config::Config::new("test-project");
    rocketmap_core::io::ensure_dir(&dir.path().join(".rocketmap")).unwrap();
    rocketmap_core::io::ensure_dir(&dir.path().join(".rocketmap/canvases")).unwrap();
    config.save(dir.path()).unwrap();
}

fn router_with_scorer(dir: &TempDir, scorer_url: &str) -> axum::Router {
    let scorer = ScorerClient::new(scorer_url, Duration::from_secs(5));
    rocketmap_server::build_router(dir.path().to_path_buf(), scorer)
}

fn router(dir: &TempDir) -> axum::Router {
    // Port 1 is never listening; fine for tests that don't reach the scorer.
    router_with_scorer(dir, "http://127.0.0.1:1")
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn send_json(
    app: axum::Router,
    method: &str,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(axum::body::Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn post_json(
    app: axum::Router,
    uri: &str,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, body).await
}

/// Fill all nine blocks of `slug` with scoreable content.
async fn fill_blocks(dir: &TempDir, slug: &str) {
    for bt in rocketmap_core::types::BlockType::all() {
        let (status, _) = send_json(
            router(dir),
            "PUT",
            &format!("/api/canvases/{slug}/blocks/{bt}"),
            serde_json::json!({ "content": format!("detailed notes about the {bt} block") }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

// ---------------------------------------------------------------------------
// Canvases
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_and_get_canvas() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (status, body) = post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Coffee Subscription Box" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "coffee-subscription-box");

    let (status, body) = get(router(&dir), "/api/canvases/coffee-subscription-box").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Coffee Subscription Box");
    assert_eq!(body["blocks"].as_array().unwrap().len(), 9);
    assert!(body["viability"].is_null());
}

#[tokio::test]
async fn duplicate_title_probes_slug() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let (_, body) = post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Same Idea" }),
    )
    .await;
    assert_eq!(body["slug"], "same-idea");

    let (status, body) = post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Same Idea" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "same-idea-2");
}

#[tokio::test]
async fn get_unknown_canvas_is_404() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let (status, body) = get(router(&dir), "/api/canvases/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("nope"));
}

#[tokio::test]
async fn list_canvases_shows_summary() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "First", "description": "tiny saas" }),
    )
    .await;

    let (status, body) = get(router(&dir), "/api/canvases").await;
    assert_eq!(status, StatusCode::OK);
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["slug"], "first");
    assert_eq!(list[0]["description"], "tiny saas");
    assert_eq!(list[0]["assumption_count"], 0);
}

#[tokio::test]
async fn update_block_and_invalid_block_type() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;

    let (status, body) = send_json(
        router(&dir),
        "PUT",
        "/api/canvases/idea/blocks/problem",
        serde_json::json!({ "content": "cafes waste beans weekly" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["block"]["content"], "cafes waste beans weekly");

    let (status, _) = send_json(
        router(&dir),
        "PUT",
        "/api/canvases/idea/blocks/vibes",
        serde_json::json!({ "content": "whatever" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Assumptions & experiments
// ---------------------------------------------------------------------------

#[tokio::test]
async fn assumption_lifecycle_via_experiment() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;

    // Block tags arrive in both shapes; both normalize.
    let (status, assumption) = post_json(
        router(&dir),
        "/api/canvases/idea/assumptions",
        serde_json::json!({
            "statement": "Cafes will pay $50/month",
            "category": "market",
            "severity_score": 8,
            "confidence_score": 20.0,
            "blocks": ["revenue_streams", { "block_type": "customer_segments" }],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(assumption["status"], "untested");
    // severity 8 derives high
    assert_eq!(assumption["risk_level"], "high");
    assert_eq!(
        assumption["blocks"],
        serde_json::json!(["revenue_streams", "customer_segments"])
    );
    let aid = assumption["id"].as_str().unwrap().to_string();

    let (status, experiment) = post_json(
        router(&dir),
        &format!("/api/canvases/idea/assumptions/{aid}/experiments"),
        serde_json::json!({
            "experiment_type": "interview",
            "success_criteria": "6 of 10 cafes agree to pay",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(experiment["status"], "planned");
    let eid = experiment["id"].as_str().unwrap().to_string();

    // Creating the experiment moved the assumption to testing.
    let (_, body) = get(router(&dir), "/api/canvases/idea/assumptions").await;
    assert_eq!(body["assumptions"][0]["status"], "testing");

    let (status, body) = post_json(
        router(&dir),
        &format!("/api/canvases/idea/assumptions/{aid}/experiments/{eid}/complete"),
        serde_json::json!({ "result": "supports", "evidence": "7 of 10 said yes" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "validated");
    assert!(!body["last_tested_at"].is_null());

    // Completing again conflicts.
    let (status, _) = post_json(
        router(&dir),
        &format!("/api/canvases/idea/assumptions/{aid}/experiments/{eid}/complete"),
        serde_json::json!({ "result": "contradicts" }),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn patch_assumption_keeps_axes_independent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    let (_, assumption) = post_json(
        router(&dir),
        "/api/canvases/idea/assumptions",
        serde_json::json!({
            "statement": "x",
            "category": "product",
            "severity_score": 2,
            "blocks": ["solution"],
        }),
    )
    .await;
    let aid = assumption["id"].as_str().unwrap().to_string();
    assert_eq!(assumption["risk_level"], "low");

    let (status, patched) = send_json(
        router(&dir),
        "PATCH",
        &format!("/api/canvases/idea/assumptions/{aid}"),
        serde_json::json!({ "status": "refuted", "risk_level": "high" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["status"], "refuted");
    assert_eq!(patched["risk_level"], "high");
    // severity untouched
    assert_eq!(patched["severity_score"], 2);
}

#[tokio::test]
async fn patch_rejects_out_of_range_confidence() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    let (_, assumption) = post_json(
        router(&dir),
        "/api/canvases/idea/assumptions",
        serde_json::json!({
            "statement": "x",
            "category": "ops",
            "severity_score": 5,
        }),
    )
    .await;
    let aid = assumption["id"].as_str().unwrap().to_string();

    let (status, _) = send_json(
        router(&dir),
        "PATCH",
        &format!("/api/canvases/idea/assumptions/{aid}"),
        serde_json::json!({ "confidence_score": 250.0 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Risk heat map
// ---------------------------------------------------------------------------

#[tokio::test]
async fn risk_endpoint_covers_all_blocks() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;

    let (status, body) = get(router(&dir), "/api/canvases/idea/risk").await;
    assert_eq!(status, StatusCode::OK);
    let blocks = body["blocks"].as_object().unwrap();
    assert_eq!(blocks.len(), 9);
    for (_, cell) in blocks {
        assert_eq!(cell["risk_score"], 0);
        assert_eq!(cell["confidence_score"], 0);
        assert_eq!(cell["border_tier"], "neutral");
        assert_eq!(cell["top_risks"], serde_json::json!([]));
    }
}

#[tokio::test]
async fn risk_endpoint_scores_untested_high() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    post_json(
        router(&dir),
        "/api/canvases/idea/assumptions",
        serde_json::json!({
            "statement": "People will switch tools",
            "category": "market",
            "risk_level": "high",
            "severity_score": 9,
            "confidence_score": 50.0,
            "blocks": ["problem"],
        }),
    )
    .await;

    let (_, body) = get(router(&dir), "/api/canvases/idea/risk").await;
    let problem = &body["blocks"]["problem"];
    assert_eq!(problem["risk_score"], 30);
    assert_eq!(problem["confidence_score"], 50);
    assert_eq!(problem["untested_high_risk"], 1);
    assert_eq!(problem["top_risks"][0], "People will switch tools");
    // other blocks untouched
    assert_eq!(body["blocks"]["solution"]["risk_score"], 0);
}

// ---------------------------------------------------------------------------
// Viability
// ---------------------------------------------------------------------------

#[tokio::test]
async fn viability_happy_path_persists_record() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/score")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"assumptions_score": 80, "market_score": 60, "unmet_need_score": 70, "reasoning": "plausible wedge"}"#,
        )
        .create_async()
        .await;

    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    fill_blocks(&dir, "idea").await;

    let (status, body) = post_json(
        router_with_scorer(&dir, &server.url()),
        "/api/canvases/idea/viability",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // round(80×0.4 + 60×0.3 + 70×0.3) = 71
    assert_eq!(body["viability"]["overall_score"], 71);
    assert_eq!(body["viability"]["assumptions_score"], 80);
    assert_eq!(body["viability"]["reasoning"], "plausible wedge");
    mock.assert_async().await;

    // A GET returns the persisted record.
    let (status, body) = get(router(&dir), "/api/canvases/idea/viability").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["viability"]["overall_score"], 71);
}

#[tokio::test]
async fn viability_precondition_skips_scorer() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/score")
        .expect(0)
        .create_async()
        .await;

    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    // Fill only 8 of 9 blocks.
    for bt in rocketmap_core::types::BlockType::all().iter().skip(1) {
        send_json(
            router(&dir),
            "PUT",
            &format!("/api/canvases/idea/blocks/{bt}"),
            serde_json::json!({ "content": "plenty of detail in this block" }),
        )
        .await;
    }

    let (status, body) = post_json(
        router_with_scorer(&dir, &server.url()),
        "/api/canvases/idea/viability",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("problem"));
    // The scorer was never contacted.
    mock.assert_async().await;
}

#[tokio::test]
async fn viability_scorer_failure_leaves_no_partial_write() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/score")
        .with_status(500)
        .with_body("scorer exploded")
        .create_async()
        .await;

    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    fill_blocks(&dir, "idea").await;

    let (status, _) = post_json(
        router_with_scorer(&dir, &server.url()),
        "/api/canvases/idea/viability",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);

    let (_, body) = get(router(&dir), "/api/canvases/idea/viability").await;
    assert!(body["viability"].is_null());
}

#[tokio::test]
async fn viability_repeat_overwrites_record() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    let mut server = mockito::Server::new_async().await;
    let first = server
        .mock("POST", "/v1/score")
        .with_status(200)
        .with_body(
            r#"{"assumptions_score": 10, "market_score": 10, "unmet_need_score": 10, "reasoning": "weak"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    post_json(
        router(&dir),
        "/api/canvases",
        serde_json::json!({ "title": "Idea" }),
    )
    .await;
    fill_blocks(&dir, "idea").await;

    post_json(
        router_with_scorer(&dir, &server.url()),
        "/api/canvases/idea/viability",
        serde_json::json!({}),
    )
    .await;
    first.assert_async().await;

    server
        .mock("POST", "/v1/score")
        .with_status(200)
        .with_body(
            r#"{"assumptions_score": 90, "market_score": 90, "unmet_need_score": 90, "reasoning": "strong"}"#,
        )
        .create_async()
        .await;

    let (_, body) = post_json(
        router_with_scorer(&dir, &server.url()),
        "/api/canvases/idea/viability",
        serde_json::json!({}),
    )
    .await;
    assert_eq!(body["viability"]["overall_score"], 90);
    assert_eq!(body["viability"]["reasoning"], "strong");
}
