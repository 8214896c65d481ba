use std::env;
use std::sync::Arc;

use axum::{body::Body, http::Request, http::StatusCode};
use business_ar_api::business_service::BusinessService;
use business_ar_api::config::Config;
use business_ar_api::db::Database;
use business_ar_api::handlers::{business_routes, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_config(db_url: String) -> Config {
    Config {
        database_url: db_url,
        port: 0,
        db_max_connections: 2,
        colin_api_url: String::new(),
        colin_api_svc_client_id: String::new(),
        colin_api_svc_client_secret: String::new(),
        auth_token_url: String::new(),
        rest_timeout_secs: 5,
    }
}

fn test_database_url() -> anyhow::Result<String> {
    env::var("TEST_DATABASE_URL")
        .or_else(|_| env::var("DATABASE_URL"))
        .map_err(|_| anyhow::anyhow!("Set TEST_DATABASE_URL or DATABASE_URL to run this test"))
}

/// Integration smoke test for the business lookup against a real database.
/// Marked ignored to avoid running against production by accident; set TEST_DATABASE_URL to run.
#[tokio::test]
#[ignore]
async fn find_by_business_identifier_smoke_test() -> anyhow::Result<()> {
    let db_url = test_database_url()?;

    let db = Database::new(&db_url, 2).await?;

    sqlx::query(
        "INSERT INTO businesses (identifier, legal_name, legal_type, founding_date, created_at)
         VALUES ($1, $2, $3, $4, NOW())
         ON CONFLICT (identifier) DO NOTHING",
    )
    .bind("BC9990001")
    .bind("SMOKE TEST LTD.")
    .bind("BC")
    .bind(chrono::NaiveDate::from_ymd_opt(2019, 7, 1))
    .execute(&db.pool)
    .await?;

    let config = test_config(db_url);
    let service = BusinessService::new(&config, db.pool.clone())?;

    let business = service
        .find_by_business_identifier("BC9990001")
        .await?
        .ok_or_else(|| anyhow::anyhow!("inserted business not found"))?;
    assert_eq!(business.legal_type, "BC");

    let missing = service.find_by_business_identifier("BC0000000").await?;
    assert!(missing.is_none());
    Ok(())
}

/// Both business routes answer 404 for an identifier with no stored record,
/// and the details route never reaches COLIN.
#[tokio::test]
#[ignore]
async fn unknown_business_routes_return_not_found() -> anyhow::Result<()> {
    let db_url = test_database_url()?;
    let db = Database::new(&db_url, 2).await?;
    let business_service = BusinessService::new(&test_config(db_url), db.pool.clone())?;
    let state = Arc::new(AppState { business_service });

    for uri in ["/v1/business/BC0000000", "/v1/business/BC0000000/details"] {
        let response = business_routes()
            .with_state(state.clone())
            .oneshot(Request::builder().uri(uri).body(Body::empty())?)
            .await?;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        assert_eq!(body, json!({"error": "No matching business."}), "{}", uri);
    }
    Ok(())
}
