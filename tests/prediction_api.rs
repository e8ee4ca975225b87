//! Integration tests for the HTTP prediction client.
//!
//! Each test spins up a small axum fixture server on an ephemeral port and
//! exercises the real reqwest-backed client against it, covering the
//! defensive response-handling protocol: detail extraction on rejections,
//! synthesized messages for non-JSON failure bodies, malformed success
//! bodies, and the wire round-trip of a draft built field by field.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::post;
use axum::Router;
use serde_json::{json, Value};

use loan_sherpa::adapters::HttpPredictionService;
use loan_sherpa::config::ApiConfig;
use loan_sherpa::domain::{LoanApplication, WizardSession};
use loan_sherpa::ports::{PredictionError, PredictionService};

/// Serves the router on an ephemeral port and returns its base URL.
async fn spawn_fixture(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client_for(base_url: &str) -> HttpPredictionService {
    // Trailing slash on purpose; the client must strip it.
    let config = ApiConfig {
        base_url: format!("{}/", base_url),
        timeout_secs: 5,
    };
    HttpPredictionService::new(&config)
}

fn success_payload() -> Value {
    json!({
        "loan_id": "LP000123",
        "approval_probability": 71.4,
        "rejection_probability": 28.6,
        "model_confidence": 71.4,
        "decision": "approved",
        "feature_impacts": [
            {
                "feature": "Credit_History",
                "value": 1,
                "impact": 0.325,
                "direction": "positive",
                "description": "Credit history is a strong indicator of loan repayment reliability"
            }
        ],
        "recommendations": [
            {
                "category": "credit",
                "priority": "high",
                "message": "Maintain excellent credit history",
                "action": "Continue making timely payments on all debts"
            }
        ],
        "what_if_scenarios": {
            "reduce_loan_amount": {
                "current": 150.0,
                "target": 112.5,
                "new_probability": 77.4,
                "impact": "+6%"
            }
        }
    })
}

#[tokio::test]
async fn successful_prediction_parses_the_full_payload() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async { Json(success_payload()) }),
    );
    let base_url = spawn_fixture(router).await;
    let client = client_for(&base_url);

    let response = client.predict(&LoanApplication::default()).await.unwrap();

    assert_eq!(response.loan_id, "LP000123");
    assert_eq!(response.decision, "approved");
    assert_eq!(response.feature_impacts.len(), 1);
    assert!(response.what_if_scenarios.get("reduce_loan_amount").is_some());
}

#[tokio::test]
async fn draft_round_trips_through_the_wire_format() {
    // The fixture records the request body it received.
    let received: Arc<Mutex<Option<Value>>> = Arc::new(Mutex::new(None));
    let router = Router::new()
        .route(
            "/api/predict",
            post(
                |State(received): State<Arc<Mutex<Option<Value>>>>, Json(body): Json<Value>| async move {
                    *received.lock().unwrap() = Some(body);
                    Json(success_payload())
                },
            ),
        )
        .with_state(received.clone());
    let base_url = spawn_fixture(router).await;
    let client = client_for(&base_url);

    let mut session = WizardSession::new();
    session.update_field("Gender", "Female").unwrap();
    session.update_field("Married", "No").unwrap();
    session.update_field("Dependents", "2").unwrap();
    session.advance().unwrap();
    session.update_field("Self_Employed", "Yes").unwrap();
    session.update_field("ApplicantIncome", "6400").unwrap();
    session.update_field("CoapplicantIncome", "1200.5").unwrap();
    session.advance().unwrap();
    session.update_field("LoanAmount", "210").unwrap();
    session.update_field("Loan_Amount_Term", "180").unwrap();
    session.advance().unwrap();
    session.update_field("Credit_History", "0").unwrap();
    session.update_field("Property_Area", "Semiurban").unwrap();

    let draft = session.begin_submission().unwrap();
    client.predict(&draft).await.unwrap();

    let body = received.lock().unwrap().take().unwrap();
    let echoed: LoanApplication = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(echoed, draft);

    // Exactly the 11 wire keys, numerics as numbers.
    let map = body.as_object().unwrap();
    assert_eq!(map.len(), 11);
    assert_eq!(map["Married"], json!("No"));
    assert_eq!(map["ApplicantIncome"], json!(6400.0));
    assert_eq!(map["Loan_Amount_Term"], json!(180));
    assert_eq!(map["Credit_History"], json!(0));
}

#[tokio::test]
async fn rejection_with_detail_surfaces_the_detail_verbatim() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async {
            (StatusCode::BAD_REQUEST, Json(json!({"detail": "income too low"})))
        }),
    );
    let base_url = spawn_fixture(router).await;
    let client = client_for(&base_url);

    let err = client.predict(&LoanApplication::default()).await.unwrap_err();

    assert_eq!(err, PredictionError::rejected("income too low"));
    assert_eq!(err.to_string(), "income too low");
}

#[tokio::test]
async fn bad_gateway_html_synthesizes_status_and_body_preview() {
    let router = Router::new().route(
        "/api/predict",
        post(|| async {
            (StatusCode::BAD_GATEWAY, Html("<html>Bad Gateway</html>")).into_response()
        }),
    );
    let base_url = spawn_fixture(router).await;
    let client = client_for(&base_url);

    let err = client.predict(&LoanApplication::default()).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("502"), "message was: {}", message);
    assert!(message.contains("<html>Bad Gateway</html>"), "message was: {}", message);
    assert!(matches!(err, PredictionError::Rejected { .. }));
}

#[tokio::test]
async fn long_failure_bodies_are_truncated_to_100_chars() {
    let long_body = "e".repeat(400);
    let router = Router::new().route(
        "/api/predict",
        post(move || async move { (StatusCode::INTERNAL_SERVER_ERROR, long_body) }),
    );
    let base_url = spawn_fixture(router).await;
    let client = client_for(&base_url);

    let err = client.predict(&LoanApplication::default()).await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains(&"e".repeat(100)));
    assert!(!message.contains(&"e".repeat(101)));
}

#[tokio::test]
async fn unparsable_success_body_is_malformed() {
    let router = Router::new().route("/api/predict", post(|| async { "not json" }));
    let base_url = spawn_fixture(router).await;
    let client = client_for(&base_url);

    let err = client.predict(&LoanApplication::default()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Malformed { .. }));
    assert!(err.to_string().contains("not json"));
}

#[tokio::test]
async fn unreachable_service_is_a_network_error() {
    // Bind and immediately drop a listener so the port is closed.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client_for(&format!("http://{}", addr));
    let err = client.predict(&LoanApplication::default()).await.unwrap_err();

    assert!(matches!(err, PredictionError::Network { .. }));
}
