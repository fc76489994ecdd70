//! Application factory
//!
//! Builds the actix application from injected state: routes, CORS, rate
//! limiting and request logging. Construction of the state itself happens
//! in `main`, so tests can wire the same app against mock services.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::middleware::auth::AuthGuards;
use crate::middleware::cors::create_cors;
use crate::middleware::rate_limit::RateLimiter;
use crate::routes::auth::{
    login::login, logout::logout, me::me, oauth::google_callback, oauth::google_login,
    oauth::oauth_tokens, password_reset::password_reset,
    password_reset::password_reset_confirm, refresh::refresh,
    resend_verification::resend_verification, signup::signup, verify::verify, AppState,
};
use crate::routes::reddit::{format::format_post, suggest::suggest_subreddits};

use srm_core::repositories::{TokenStore, UserRepository};

/// Create and configure the application with all dependencies
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    guards: web::Data<AuthGuards>,
    rate_limiter: RateLimiter,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: TokenStore + 'static,
{
    let cors = create_cors();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(guards)
        // Add middleware (order matters: rate limiting first, then CORS, then logging)
        .wrap(Logger::default())
        .wrap(cors)
        .wrap(rate_limiter)
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1")
                // Auth routes
                .service(
                    web::scope("/auth")
                        .route("/signup", web::post().to(signup::<U, S>))
                        .route("/login", web::post().to(login::<U, S>))
                        .route("/refresh_token", web::post().to(refresh::<U, S>))
                        .route("/logout", web::post().to(logout::<U, S>))
                        .route("/me", web::post().to(me))
                        .route(
                            "/resend_verification",
                            web::post().to(resend_verification::<U, S>),
                        )
                        .route("/verify/{token}", web::post().to(verify::<U, S>))
                        .route("/password_reset", web::post().to(password_reset::<U, S>))
                        .route(
                            "/password_reset_confirm/{token}",
                            web::post().to(password_reset_confirm::<U, S>),
                        )
                        .route("/google/login", web::get().to(google_login::<U, S>))
                        .route("/google/callback", web::get().to(google_callback::<U, S>))
                        .route("/oauth/tokens", web::get().to(oauth_tokens::<U, S>)),
                )
                // Post advisor routes
                .service(
                    web::scope("/reddit")
                        .route(
                            "/suggest_subreddits",
                            web::post().to(suggest_subreddits::<U, S>),
                        )
                        .route("/format_post", web::post().to(format_post::<U, S>)),
                ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "subrmatch-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "error": "not_found",
        "message": "The requested resource was not found"
    }))
}
