//! Shared wiring for endpoint tests: the full app over in-memory mocks.

use std::sync::Arc;

use actix_web::web;
use async_trait::async_trait;

use srm_api::middleware::auth::{AuthGuards, BearerAuthenticator};
use srm_api::middleware::rate_limit::RateLimiter;
use srm_api::routes::auth::AppState;

use srm_core::errors::DomainError;
use srm_core::repositories::{MockTokenStore, MockUserRepository};
use srm_core::services::ai::{CompletionClient, PostAdvisor};
use srm_core::services::auth::{AuthService, CooldownService, LinkTokenCodec};
use srm_core::services::email::{EmailService, MockEmailService};
use srm_core::services::reddit::{RedditGateway, SubredditInfo, SubredditRule};
use srm_core::services::token::{TokenService, TokenServiceConfig};
use srm_shared::config::AppConfig;

/// Reddit gateway stub resolving every subreddit with fixed data
pub struct StubRedditGateway;

#[async_trait]
impl RedditGateway for StubRedditGateway {
    async fn subreddit_info(&self, name: &str) -> Result<SubredditInfo, DomainError> {
        Ok(SubredditInfo {
            name: name.to_string(),
            subscribers: 4242,
            rules: vec![SubredditRule {
                short_name: "Be kind".to_string(),
                description: "No abuse".to_string(),
            }],
        })
    }
}

/// Completion stub answering with a fixed subreddit list
pub struct StubCompletionClient;

#[async_trait]
impl CompletionClient for StubCompletionClient {
    async fn complete(&self, prompt: &str) -> Result<String, DomainError> {
        if prompt.contains("format it") {
            Ok("Title: formatted\n\nbody".to_string())
        } else {
            Ok(r#"["rust", "webdev"]"#.to_string())
        }
    }
}

/// Everything an endpoint test needs to drive and inspect the app
pub struct TestContext {
    pub app_state: web::Data<AppState<MockUserRepository, MockTokenStore>>,
    pub guards: web::Data<AuthGuards>,
    pub users: Arc<MockUserRepository>,
    pub store: Arc<MockTokenStore>,
    pub email: Arc<MockEmailService>,
    pub link_tokens: Arc<LinkTokenCodec>,
}

/// Build app state over fresh mocks
pub fn test_context() -> TestContext {
    let config = Arc::new(AppConfig::default());

    let users = Arc::new(MockUserRepository::new());
    let store = Arc::new(MockTokenStore::new());
    let email = Arc::new(MockEmailService::new());

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
    let advisor = Arc::new(PostAdvisor::new(
        Arc::new(StubRedditGateway),
        Arc::new(StubCompletionClient),
    ));

    let authenticator: Arc<dyn BearerAuthenticator> = auth_service.clone();
    let guards = web::Data::new(AuthGuards::new(authenticator));

    let email_port: Arc<dyn EmailService> = email.clone();
    let app_state = web::Data::new(AppState {
        auth_service,
        cooldowns,
        link_tokens: Arc::clone(&link_tokens),
        email: email_port,
        oauth: None,
        advisor,
        config,
    });

    TestContext {
        app_state,
        guards,
        users,
        store,
        email,
        link_tokens,
    }
}

/// Rate limiter pointed at a closed port: every check fails open, so tests
/// never need a Redis server
pub fn test_rate_limiter() -> RateLimiter {
    RateLimiter::new("redis://127.0.0.1:1").expect("static test URL must parse")
}
