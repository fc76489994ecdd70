//! Rate limiting middleware for API endpoints
//!
//! Fixed-window per-IP limiting backed by Redis, so limits hold across
//! every instance of the service. The limiter degrades open: when Redis
//! cannot be reached the request is let through and the failure is logged,
//! keeping the limiter an availability guard rather than a single point of
//! failure.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorTooManyRequests,
    Error,
};
use futures_util::future::LocalBoxFuture;
use redis::{AsyncCommands, Client};
use serde_json::json;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

/// Rate limit configuration
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    /// API calls allowed per IP per window
    pub requests_per_window: u32,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_window: 120,
            window_seconds: 60,
        }
    }
}

/// Rate limiter middleware factory
#[derive(Clone)]
pub struct RateLimiter {
    redis_client: Arc<Client>,
    config: RateLimitConfig,
}

impl RateLimiter {
    /// Create a new rate limiter with default limits
    pub fn new(redis_url: &str) -> Result<Self, redis::RedisError> {
        Self::with_config(redis_url, RateLimitConfig::default())
    }

    /// Create a new rate limiter with custom configuration
    pub fn with_config(
        redis_url: &str,
        config: RateLimitConfig,
    ) -> Result<Self, redis::RedisError> {
        let client = Client::open(redis_url)?;
        Ok(Self {
            redis_client: Arc::new(client),
            config,
        })
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterMiddleware {
            service: Rc::new(service),
            redis_client: self.redis_client.clone(),
            config: self.config,
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimiterMiddleware<S> {
    service: Rc<S>,
    redis_client: Arc<Client>,
    config: RateLimitConfig,
}

impl<S, B> Service<ServiceRequest> for RateLimiterMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let redis_client = self.redis_client.clone();
        let config = self.config;

        Box::pin(async move {
            let ip = get_client_ip(&req);

            match check_rate_limit(&redis_client, &ip, &config).await {
                Ok(RateLimitStatus::Ok) => service.call(req).await,
                Ok(RateLimitStatus::Exceeded {
                    retry_after_seconds,
                }) => Err(ErrorTooManyRequests(json!({
                    "error": "rate_limit_exceeded",
                    "message": "Too many requests. Please slow down",
                    "details": { "retry_after_seconds": retry_after_seconds },
                }))),
                Err(error) => {
                    // Fail open: a broken limiter must not take the API down
                    log::warn!("Rate limiter unavailable, letting request pass: {}", error);
                    service.call(req).await
                }
            }
        })
    }
}

/// Rate limit check outcome
enum RateLimitStatus {
    Ok,
    Exceeded { retry_after_seconds: u64 },
}

/// Check and advance the fixed-window counter for an IP
async fn check_rate_limit(
    client: &Arc<Client>,
    ip: &str,
    config: &RateLimitConfig,
) -> Result<RateLimitStatus, redis::RedisError> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let key = format!("api_limit:{}", ip);

    let count: i64 = conn.incr(&key, 1).await?;
    if count == 1 {
        conn.expire::<_, ()>(&key, config.window_seconds as i64)
            .await?;
    }

    if count > config.requests_per_window as i64 {
        let ttl: i64 = conn.ttl(&key).await?;
        return Ok(RateLimitStatus::Exceeded {
            retry_after_seconds: ttl.max(0) as u64,
        });
    }

    Ok(RateLimitStatus::Ok)
}

/// Get client IP address from request
fn get_client_ip(req: &ServiceRequest) -> String {
    // Prefer X-Forwarded-For in reverse proxy scenarios
    if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
        if let Ok(forwarded_str) = forwarded_for.to_str() {
            if let Some(ip) = forwarded_str.split(',').next() {
                return ip.trim().to_string();
            }
        }
    }

    if let Some(real_ip) = req.headers().get("X-Real-IP") {
        if let Ok(ip_str) = real_ip.to_str() {
            return ip_str.to_string();
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}
