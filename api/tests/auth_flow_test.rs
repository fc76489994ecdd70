//! Endpoint tests for the authentication flows, driven over the full app
//! with in-memory mocks behind it.

mod common;

use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};

use srm_api::app::create_app;
use srm_core::domain::entities::token::TokenPair;
use srm_core::repositories::{TokenStore, UserRepository};
use srm_core::services::auth::LinkPurpose;

use common::{test_context, test_rate_limiter};

const EMAIL: &str = "alice@example.com";
const PASSWORD: &str = "sw0rdfish!42";
const REDIRECT: &str = "http://localhost:3000/verify/";

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(create_app(
            $ctx.app_state.clone(),
            $ctx.guards.clone(),
            test_rate_limiter(),
        ))
        .await
    };
}

macro_rules! post_json {
    ($app:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! post_bearer {
    ($app:expr, $uri:expr, $token:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .insert_header(("Authorization", format!("Bearer {}", $token)))
            .to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! get {
    ($app:expr, $uri:expr) => {{
        let req = test::TestRequest::get().uri($uri).to_request();
        test::call_service(&$app, req).await
    }};
}

macro_rules! body_json {
    ($resp:expr) => {
        test::read_body_json::<Value, _>($resp).await
    };
}

macro_rules! signup {
    ($app:expr) => {{
        post_json!(
            $app,
            "/api/v1/auth/signup",
            json!({
                "name": "alice",
                "email": EMAIL,
                "password": PASSWORD,
                "redirect_uri": REDIRECT,
            })
        )
    }};
}

macro_rules! verify_account {
    ($ctx:expr, $app:expr) => {{
        let token = $ctx
            .link_tokens
            .encode(EMAIL, LinkPurpose::VerifyEmail)
            .unwrap();
        let resp = post_json!(
            $app,
            &format!("/api/v1/auth/verify/{}", token),
            json!({})
        );
        assert_eq!(resp.status(), StatusCode::OK);
    }};
}

macro_rules! login {
    ($app:expr) => {{
        let resp = post_json!(
            $app,
            "/api/v1/auth/login",
            json!({ "email": EMAIL, "password": PASSWORD })
        );
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_json!(resp);
        TokenPair::new(
            body["access_token"].as_str().unwrap().to_string(),
            body["refresh_token"].as_str().unwrap().to_string(),
            0,
            0,
        )
    }};
}

#[actix_rt::test]
async fn test_signup_verify_login_me_flow() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);

    let pair = login!(app);

    // Unverified account clears the guard chain but not the role gate
    let resp = post_bearer!(app, "/api/v1/auth/me", pair.access_token);
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json!(resp)["error"], "account_not_verified");

    verify_account!(ctx, app);

    let resp = post_bearer!(app, "/api/v1/auth/me", pair.access_token);
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json!(resp);
    assert_eq!(body["user"]["email"], EMAIL);
    assert_eq!(body["user"]["role"], "user");

    // The verification email went out in the background
    let mut tries = 0;
    while ctx.email.sent_count().await == 0 && tries < 50 {
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        tries += 1;
    }
    let sent = ctx.email.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].recipients, vec![EMAIL.to_string()]);
    assert!(sent[0].html_body.contains(REDIRECT));
}

#[actix_rt::test]
async fn test_signup_duplicate_email() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);

    let resp = signup!(app);
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json!(resp)["error"], "user_already_exists");
}

#[actix_rt::test]
async fn test_signup_rejects_foreign_redirect_uri() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = post_json!(
        app,
        "/api/v1/auth/signup",
        json!({
            "name": "alice",
            "email": EMAIL,
            "password": PASSWORD,
            "redirect_uri": "https://evil.example/verify/",
        })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json!(resp)["error"], "validation_error");
}

#[actix_rt::test]
async fn test_protected_route_requires_bearer() {
    let ctx = test_context();
    let app = init_app!(ctx);

    // No Authorization header
    let resp = post_json!(app, "/api/v1/auth/me", json!({}));
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage bearer
    let resp = post_bearer!(app, "/api/v1/auth/me", "garbage");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json!(resp)["error"], "invalid_token");
}

#[actix_rt::test]
async fn test_wrong_token_kind_is_rejected() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    verify_account!(ctx, app);
    let pair = login!(app);

    // Refresh token on an access-guarded endpoint
    let resp = post_bearer!(app, "/api/v1/auth/me", pair.refresh_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json!(resp)["error"], "access_token_required");

    // Access token on a refresh-guarded endpoint
    let resp = post_bearer!(app, "/api/v1/auth/refresh_token", pair.access_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json!(resp)["error"], "refresh_token_required");
}

#[actix_rt::test]
async fn test_refresh_rotation_kills_old_pair() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    verify_account!(ctx, app);
    let old_pair = login!(app);

    let resp = post_bearer!(app, "/api/v1/auth/refresh_token", old_pair.refresh_token);
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json!(resp);
    let new_access = body["access_token"].as_str().unwrap().to_string();

    // Re-using the rotated refresh token fails
    let resp = post_bearer!(app, "/api/v1/auth/refresh_token", old_pair.refresh_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json!(resp)["error"], "invalid_token");

    // The rotated-away access token is dead too, the fresh one works
    let resp = post_bearer!(app, "/api/v1/auth/me", old_pair.access_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_bearer!(app, "/api/v1/auth/me", new_access);
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_logout_invalidates_session() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    verify_account!(ctx, app);
    let pair = login!(app);

    let resp = post_bearer!(app, "/api/v1/auth/logout", pair.refresh_token);
    assert_eq!(resp.status(), StatusCode::OK);

    // Both tokens of the pair are revoked
    let resp = post_bearer!(app, "/api/v1/auth/refresh_token", pair.refresh_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_bearer!(app, "/api/v1/auth/me", pair.access_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_logout_leaves_other_sessions_alive() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    verify_account!(ctx, app);
    let session_a = login!(app);
    let session_b = login!(app);

    let resp = post_bearer!(app, "/api/v1/auth/logout", session_a.refresh_token);
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = post_bearer!(app, "/api/v1/auth/me", session_a.access_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = post_bearer!(app, "/api/v1/auth/me", session_b.access_token);
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_password_reset_flow() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    verify_account!(ctx, app);
    let pair = login!(app);

    let resp = post_json!(
        app,
        "/api/v1/auth/password_reset",
        json!({ "email": EMAIL, "redirect_uri": REDIRECT })
    );
    assert_eq!(resp.status(), StatusCode::OK);

    let token = ctx
        .link_tokens
        .encode(EMAIL, LinkPurpose::ResetPassword)
        .unwrap();
    let resp = post_json!(
        app,
        &format!("/api/v1/auth/password_reset_confirm/{}", token),
        json!({
            "new_password": "completely-new-1",
            "confirm_new_password": "completely-new-1",
        })
    );
    assert_eq!(resp.status(), StatusCode::OK);

    // Every session is revoked
    let resp = post_bearer!(app, "/api/v1/auth/me", pair.access_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Old password is gone, new one works
    let resp = post_json!(
        app,
        "/api/v1/auth/login",
        json!({ "email": EMAIL, "password": PASSWORD })
    );
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = post_json!(
        app,
        "/api/v1/auth/login",
        json!({ "email": EMAIL, "password": "completely-new-1" })
    );
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn test_password_reset_unknown_email() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = post_json!(
        app,
        "/api/v1/auth/password_reset",
        json!({ "email": "nobody@example.com", "redirect_uri": REDIRECT })
    );
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[actix_rt::test]
async fn test_password_reset_confirm_mismatch() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);

    let token = ctx
        .link_tokens
        .encode(EMAIL, LinkPurpose::ResetPassword)
        .unwrap();
    let resp = post_json!(
        app,
        &format!("/api/v1/auth/password_reset_confirm/{}", token),
        json!({
            "new_password": "completely-new-1",
            "confirm_new_password": "does-not-match-1",
        })
    );
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json!(resp)["error"], "password_mismatch");
}

#[actix_rt::test]
async fn test_verify_rejects_reset_token() {
    // A reset-password link token must not verify an account
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);

    let token = ctx
        .link_tokens
        .encode(EMAIL, LinkPurpose::ResetPassword)
        .unwrap();
    let resp = post_json!(app, &format!("/api/v1/auth/verify/{}", token), json!({}));
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json!(resp)["error"], "invalid_link_token");
}

#[actix_rt::test]
async fn test_resend_verification_hits_cooldown() {
    let ctx = test_context();
    let app = init_app!(ctx);

    // Signup opens the cooldown window
    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    let pair = login!(app);

    let resp = post_bearer!(
        app,
        &format!(
            "/api/v1/auth/resend_verification?redirect_uri={}",
            REDIRECT
        ),
        pair.access_token
    );
    assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json!(resp);
    assert_eq!(body["error"], "cooldown_active");
    assert!(body["details"]["retry_after_seconds"].as_i64().unwrap() > 0);
}

#[actix_rt::test]
async fn test_oauth_token_handoff_is_one_shot() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let pair = TokenPair::new("access-x".to_string(), "refresh-x".to_string(), 600, 604800);
    ctx.app_state
        .auth_service
        .tokens()
        .stage_handoff("state-42", &pair)
        .await
        .unwrap();

    let resp = get!(app, "/api/v1/auth/oauth/tokens?state=state-42");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json!(resp);
    assert_eq!(body["access_token"], "access-x");
    assert_eq!(body["token_type"], "bearer");

    // Replaying the state fails
    let resp = get!(app, "/api/v1/auth/oauth/tokens?state=state-42");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_store_record_deletion_dominates_signature() {
    let ctx = test_context();
    let app = init_app!(ctx);

    assert_eq!(signup!(app).status(), StatusCode::CREATED);
    verify_account!(ctx, app);
    let pair = login!(app);

    let resp = post_bearer!(app, "/api/v1/auth/me", pair.access_token);
    assert_eq!(resp.status(), StatusCode::OK);

    // Drop the access record straight out of the store: the signature is
    // still valid, the guard must reject anyway
    let user = ctx.users.find_by_email(EMAIL).await.unwrap().unwrap();
    let deleted = ctx
        .store
        .delete_prefix(&format!("{}:access:", user.id))
        .await
        .unwrap();
    assert_eq!(deleted, 1);

    let resp = post_bearer!(app, "/api/v1/auth/me", pair.access_token);
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json!(resp)["error"], "invalid_token");
}

#[actix_rt::test]
async fn test_google_login_unconfigured() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = get!(
        app,
        "/api/v1/auth/google/login?redirect_uri=http://localhost:3000/login"
    );
    assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
}

#[actix_rt::test]
async fn test_health_endpoint() {
    let ctx = test_context();
    let app = init_app!(ctx);

    let resp = get!(app, "/health");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json!(resp)["status"], "healthy");
}
