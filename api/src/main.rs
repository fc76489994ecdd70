use std::io;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use log::info;

mod app;
mod dto;
mod handlers;
mod middleware;
mod routes;

use app::create_app;
use middleware::auth::{AuthGuards, BearerAuthenticator};
use middleware::rate_limit::RateLimiter;
use routes::auth::AppState;

use srm_core::services::ai::PostAdvisor;
use srm_core::services::auth::{AuthService, CooldownService, LinkTokenCodec, OauthProvider};
use srm_core::services::email::EmailService;
use srm_core::services::token::{TokenService, TokenServiceConfig};
use srm_infra::ai::ChatCompletionClient;
use srm_infra::cache::{RedisClient, RedisTokenStore};
use srm_infra::database::{create_pool, MySqlUserRepository};
use srm_infra::email::HttpRelayEmailService;
use srm_infra::oauth::GoogleOauthProvider;
use srm_infra::reddit::RedditApiClient;
use srm_shared::config::AppConfig;

fn io_error(error: impl std::fmt::Display) -> io::Error {
    io::Error::new(io::ErrorKind::Other, error.to_string())
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting SubRMatch API server");

    // Load configuration
    let config = Arc::new(AppConfig::from_env());
    if config.auth.jwt.is_using_default_secret() {
        log::warn!("JWT_SECRET_KEY is not set; using the development default");
    }

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    // Infrastructure clients
    let pool = create_pool(&config.database).await.map_err(io_error)?;
    let redis = RedisClient::new(&config.cache).await.map_err(io_error)?;
    let store = Arc::new(RedisTokenStore::new(
        redis,
        Duration::from_secs(config.cache.response_timeout),
    ));

    // Repositories and services
    let users = Arc::new(MySqlUserRepository::new(pool));
    let token_service = TokenService::new(
        Arc::clone(&store),
        TokenServiceConfig::from(&config.auth.jwt),
    );
    let auth_service = Arc::new(AuthService::new(Arc::clone(&users), token_service));
    let cooldowns = Arc::new(CooldownService::new(
        Arc::clone(&store),
        config.auth.mail_cooldown_seconds,
    ));
    let link_tokens = Arc::new(LinkTokenCodec::new(
        &config.auth.jwt.secret,
        config.auth.link_token_lifetime_hours,
    ));
    let email: Arc<dyn EmailService> = Arc::new(HttpRelayEmailService::new(config.mail.clone()));
    let advisor = Arc::new(PostAdvisor::new(
        Arc::new(RedditApiClient::new(config.reddit.clone())),
        Arc::new(ChatCompletionClient::new(config.ai.clone())),
    ));
    let oauth: Option<Arc<dyn OauthProvider>> = config
        .auth
        .google
        .clone()
        .map(|google| Arc::new(GoogleOauthProvider::new(google)) as Arc<dyn OauthProvider>);

    if oauth.is_none() {
        info!("Google OAuth is not configured; /auth/google routes are disabled");
    }

    // Guard chain state shared by the bearer extractors
    let authenticator: Arc<dyn BearerAuthenticator> = auth_service.clone();
    let guards = web::Data::new(AuthGuards::new(authenticator));

    let app_state = web::Data::new(AppState {
        auth_service,
        cooldowns,
        link_tokens,
        email,
        oauth,
        advisor,
        config: Arc::clone(&config),
    });

    let rate_limiter = RateLimiter::new(&config.cache.url).map_err(io_error)?;

    HttpServer::new(move || {
        create_app(app_state.clone(), guards.clone(), rate_limiter.clone())
    })
    .bind(&bind_address)?
    .run()
    .await
}
