mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn guarded_route_rejects_missing_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/myFood/someone@example.com", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "unauthorized access");
    Ok(())
}

#[tokio::test]
async fn garbage_token_is_unauthorized() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/purchase-food/someone@example.com", server.base_url))
        .header("cookie", "token=not.a.jwt")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn token_sets_httponly_strict_cookie() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/token", server.base_url))
        .json(&json!({ "email": "someone@example.com" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res
        .headers()
        .get("set-cookie")
        .expect("missing set-cookie header")
        .to_str()?
        .to_string();
    assert!(cookie.starts_with("token="), "unexpected cookie: {}", cookie);
    assert!(cookie.contains("HttpOnly"), "cookie not HTTP-only: {}", cookie);
    assert!(cookie.contains("SameSite=Strict"), "cookie not strict: {}", cookie);
    assert!(cookie.contains("Max-Age=3600"), "cookie lifetime off: {}", cookie);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);
    Ok(())
}

#[tokio::test]
async fn token_without_email_is_bad_request() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/token", server.base_url))
        .json(&json!({ "name": "no email here" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn cookie_identity_mismatch_is_forbidden() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    let res = client
        .post(format!("{}/token", server.base_url))
        .json(&json!({ "email": "owner@example.com" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Same valid cookie, somebody else's resources
    let res = client
        .get(format!("{}/myFood/other@example.com", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "forbidden access");

    let res = client
        .get(format!("{}/purchase-food/other@example.com", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn matching_email_passes_the_guard() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    client
        .post(format!("{}/token", server.base_url))
        .json(&json!({ "email": "owner@example.com" }))
        .send()
        .await?;

    // The guard and the ownership check both pass; only the store lookup
    // itself may fail when no database is running, and that is not an auth
    // status.
    let res = client
        .get(format!("{}/myFood/owner@example.com", server.base_url))
        .send()
        .await?;
    assert_ne!(res.status(), StatusCode::UNAUTHORIZED);
    assert_ne!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}

#[tokio::test]
async fn logout_clears_the_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::builder().cookie_store(true).build()?;

    client
        .post(format!("{}/token", server.base_url))
        .json(&json!({ "email": "someone@example.com" }))
        .send()
        .await?;

    let res = client
        .get(format!("{}/logout", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let cookie = res
        .headers()
        .get("set-cookie")
        .expect("missing set-cookie header")
        .to_str()?
        .to_string();
    assert!(cookie.starts_with("token=;"), "cookie not cleared: {}", cookie);
    assert!(cookie.contains("Max-Age=0"), "cookie not expired: {}", cookie);

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["success"], true);

    // The cookie store honored the expiry, so the next request carries no
    // token and the guard rejects it
    let res = client
        .get(format!("{}/myFood/someone@example.com", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
