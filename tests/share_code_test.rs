//! Integration tests for the share-code bridge: mint on the platform,
//! import from the editor extension.

mod helpers;

use chrono::{DateTime, Utc};
use http::StatusCode;

const CODE_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

#[tokio::test]
async fn test_generate_and_import_roundtrip() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let (token, _) = app.signup().await;
    let snippet_id = app.create_snippet(&token, "public").await;

    // Minting needs no authentication.
    let minted = app
        .request(
            "POST",
            &format!("/api/snippets/{snippet_id}/generate-code"),
            None,
            None,
        )
        .await;
    assert_eq!(minted.status, StatusCode::CREATED);

    let code = minted.body["data"]["code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| CODE_ALPHABET.contains(c)));

    let expires_at: DateTime<Utc> = minted.body["data"]["expires_at"]
        .as_str()
        .unwrap()
        .parse()
        .unwrap();
    let window = expires_at - Utc::now();
    assert!(window.num_seconds() > 290 && window.num_seconds() <= 300);

    let imported = app
        .request("GET", &format!("/api/snippets/import/{code}"), None, None)
        .await;
    assert_eq!(imported.status, StatusCode::OK);
    assert_eq!(
        imported.body["data"]["id"].as_str().unwrap(),
        snippet_id.to_string()
    );

    // Codes are not single-use.
    let again = app
        .request("GET", &format!("/api/snippets/import/{code}"), None, None)
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_share_code_bypasses_visibility() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let (token, _) = app.signup().await;
    let snippet_id = app.create_snippet(&token, "private").await;

    let minted = app
        .request(
            "POST",
            &format!("/api/snippets/{snippet_id}/generate-code"),
            None,
            None,
        )
        .await;
    assert_eq!(minted.status, StatusCode::CREATED);
    let code = minted.body["data"]["code"].as_str().unwrap();

    // An active code grants read access even to a private snippet.
    let imported = app
        .request("GET", &format!("/api/snippets/import/{code}"), None, None)
        .await;
    assert_eq!(imported.status, StatusCode::OK);
}

#[tokio::test]
async fn test_generate_for_missing_snippet() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let response = app
        .request(
            "POST",
            &format!("/api/snippets/{}/generate-code", uuid::Uuid::new_v4()),
            None,
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_import_unknown_code() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    // Well-formed, never issued.
    let response = app
        .request("GET", "/api/snippets/import/zzzzz9", None, None)
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_expired_code_returns_gone_then_not_found() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let (token, _) = app.signup().await;
    let snippet_id = app.create_snippet(&token, "public").await;

    let minted = app
        .request(
            "POST",
            &format!("/api/snippets/{snippet_id}/generate-code"),
            None,
            None,
        )
        .await;
    let code = minted.body["data"]["code"].as_str().unwrap().to_string();

    // Age the row past its window.
    sqlx::query("UPDATE share_codes SET expires_at = NOW() - INTERVAL '1 second' WHERE code = $1")
        .bind(&code)
        .execute(&app.db_pool)
        .await
        .expect("Failed to age share code");

    // First read: known but expired, and the read deletes the row.
    let expired = app
        .request("GET", &format!("/api/snippets/import/{code}"), None, None)
        .await;
    assert_eq!(expired.status, StatusCode::GONE);

    // Second read: the row is gone entirely.
    let gone = app
        .request("GET", &format!("/api/snippets/import/{code}"), None, None)
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_active_share_code_endpoint() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let (token, _) = app.signup().await;
    let snippet_id = app.create_snippet(&token, "public").await;
    let path = format!("/api/snippets/{snippet_id}/share-code");

    // No code yet.
    let none = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(none.status, StatusCode::NOT_FOUND);

    let first = app
        .request(
            "POST",
            &format!("/api/snippets/{snippet_id}/generate-code"),
            None,
            None,
        )
        .await;
    let second = app
        .request(
            "POST",
            &format!("/api/snippets/{snippet_id}/generate-code"),
            None,
            None,
        )
        .await;
    let first_code = first.body["data"]["code"].as_str().unwrap();
    let second_code = second.body["data"]["code"].as_str().unwrap();
    assert_ne!(first_code, second_code);

    // Both are active; the endpoint surfaces the most recent.
    let active = app.request("GET", &path, None, Some(&token)).await;
    assert_eq!(active.status, StatusCode::OK);
    assert_eq!(active.body["data"]["code"].as_str().unwrap(), second_code);

    // The earlier code still resolves on its own.
    let imported = app
        .request(
            "GET",
            &format!("/api/snippets/import/{first_code}"),
            None,
            None,
        )
        .await;
    assert_eq!(imported.status, StatusCode::OK);
}

#[tokio::test]
async fn test_snippet_deletion_cascades_to_codes() {
    let Some(app) = helpers::TestApp::try_new().await else {
        return;
    };

    let (token, _) = app.signup().await;
    let snippet_id = app.create_snippet(&token, "public").await;

    let minted = app
        .request(
            "POST",
            &format!("/api/snippets/{snippet_id}/generate-code"),
            None,
            None,
        )
        .await;
    let code = minted.body["data"]["code"].as_str().unwrap().to_string();

    let deleted = app
        .request(
            "DELETE",
            &format!("/api/snippets/{snippet_id}"),
            None,
            Some(&token),
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let imported = app
        .request("GET", &format!("/api/snippets/import/{code}"), None, None)
        .await;
    assert_eq!(imported.status, StatusCode::NOT_FOUND);
}
