use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use cpacalc::api::{CALCULATIONS_PATH, CalculationRecord, ValidationError};
use cpacalc::server::storage::{SqliteStore, migrate};
use cpacalc::server::{AppState, app_router};

async fn test_router() -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    migrate(&pool).await.unwrap();
    let state = Arc::new(AppState {
        store: Arc::new(SqliteStore::new(pool)),
    });
    app_router(state)
}

fn post_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(CALCULATIONS_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[test_log::test(tokio::test)]
async fn test_create_returns_201_with_stored_row() {
    let app = test_router().await;

    let response = app
        .oneshot(post_request(
            r#"{"lifetimeProfit":"5000","acquisitionBudgetPct":"50","conversionRatePct":"10"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let record: CalculationRecord = read_json(response).await;
    assert!(record.id >= 1);
    assert_eq!(
        Decimal::from_str(&record.lifetime_profit).unwrap(),
        Decimal::from_str("5000").unwrap()
    );
    assert_eq!(
        Decimal::from_str(&record.acquisition_budget_pct).unwrap(),
        Decimal::from_str("50").unwrap()
    );
    assert_eq!(
        Decimal::from_str(&record.conversion_rate_pct).unwrap(),
        Decimal::from_str("10").unwrap()
    );
}

#[test_log::test(tokio::test)]
async fn test_create_missing_field_returns_400_naming_the_field() {
    let app = test_router().await;

    let response = app
        .oneshot(post_request(
            r#"{"lifetimeProfit":"5000","conversionRatePct":"10"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ValidationError = read_json(response).await;
    assert_eq!(error.field.as_deref(), Some("acquisitionBudgetPct"));
    assert!(!error.message.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_create_non_decimal_field_returns_400() {
    let app = test_router().await;

    let response = app
        .oneshot(post_request(
            r#"{"lifetimeProfit":"plenty","acquisitionBudgetPct":"50","conversionRatePct":"10"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let error: ValidationError = read_json(response).await;
    assert_eq!(error.field.as_deref(), Some("lifetimeProfit"));
}

#[test_log::test(tokio::test)]
async fn test_list_returns_created_records_by_id() {
    let app = test_router().await;

    let first: CalculationRecord = read_json(
        app.clone()
            .oneshot(post_request(
                r#"{"lifetimeProfit":"1000","acquisitionBudgetPct":"20","conversionRatePct":"5"}"#,
            ))
            .await
            .unwrap(),
    )
    .await;
    let second: CalculationRecord = read_json(
        app.clone()
            .oneshot(post_request(
                r#"{"lifetimeProfit":"2000.50","acquisitionBudgetPct":"40","conversionRatePct":"8"}"#,
            ))
            .await
            .unwrap(),
    )
    .await;
    assert_ne!(first.id, second.id);

    let response = app
        .oneshot(
            Request::builder()
                .uri(CALCULATIONS_PATH)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let records: Vec<CalculationRecord> = read_json(response).await;
    assert!(records.len() >= 2);
    let by_id = |id: i64| records.iter().find(|r| r.id == id);
    assert_eq!(by_id(first.id).unwrap().lifetime_profit, "1000");
    assert_eq!(by_id(second.id).unwrap().lifetime_profit, "2000.50");
}

#[test_log::test(tokio::test)]
async fn test_double_submission_creates_two_rows() {
    let app = test_router().await;
    let body = r#"{"lifetimeProfit":"5000","acquisitionBudgetPct":"50","conversionRatePct":"10"}"#;

    let first: CalculationRecord =
        read_json(app.clone().oneshot(post_request(body)).await.unwrap()).await;
    let second: CalculationRecord =
        read_json(app.clone().oneshot(post_request(body)).await.unwrap()).await;

    // No deduplication: the backend assigns a fresh id per call
    assert_ne!(first.id, second.id);
    assert_eq!(first.lifetime_profit, second.lifetime_profit);
}
