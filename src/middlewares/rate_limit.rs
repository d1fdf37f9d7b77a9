/*!
 * Fixed-window rate limiting.
 *
 * Requests are counted per key (authenticated user id, else client IP) and
 * per preset prefix. Once a window is exhausted the request is answered with
 * `429` and a `Retry-After` header until the window expires.
 *
 * ```rust,ignore
 * web::resource("/login")
 *     .wrap(RateLimit::login())
 *     .route(web::post().to(login))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use moka::future::Cache;
use once_cell::sync::Lazy;
use std::net::IpAddr;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::models::{ApiResponse, ErrorCode, users::entities::User};

/// Counter of one key within its current window.
#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

impl Window {
    /// Counts a hit at `now`, opening a fresh window once the previous one expired.
    fn hit(previous: Option<Window>, now: Instant, length: Duration) -> Window {
        match previous {
            Some(w) if now.duration_since(w.started) < length => Window {
                started: w.started,
                count: w.count.saturating_add(1),
            },
            _ => Window {
                started: now,
                count: 1,
            },
        }
    }

    fn retry_after(&self, now: Instant, length: Duration) -> u64 {
        length
            .saturating_sub(now.duration_since(self.started))
            .as_secs()
            .max(1)
    }
}

// Idle entries outlive any preset window, so expiry never cuts a window short.
static RATE_LIMIT_WINDOWS: Lazy<Cache<String, Window>> = Lazy::new(|| {
    Cache::builder()
        .time_to_idle(Duration::from_secs(3600))
        .max_capacity(100_000)
        .build()
});

#[derive(Clone)]
pub struct RateLimit {
    max_requests: u32,
    window: Duration,
    key_prefix: &'static str,
}

impl RateLimit {
    pub fn new(max_requests: u32, window_secs: u64, key_prefix: &'static str) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            key_prefix,
        }
    }

    /// 5 per minute per IP.
    pub fn login() -> Self {
        Self::new(5, 60, "login")
    }

    pub fn register() -> Self {
        Self::new(3, 60, "register")
    }

    pub fn refresh_token() -> Self {
        Self::new(10, 60, "refresh")
    }

    /// Spreadsheet imports are heavy; 5 per minute per user.
    pub fn import() -> Self {
        Self::new(5, 60, "import")
    }

    /// Manual job triggers (financial calculation, reminder dispatch).
    pub fn job_trigger() -> Self {
        Self::new(10, 60, "jobs")
    }
}

/// Client IP, preferring the connection peer over forwarding headers.
///
/// Behind a reverse proxy the proxy must set `X-Forwarded-For`/`X-Real-IP`.
fn client_ip(req: &ServiceRequest) -> String {
    let from_connection = req
        .connection_info()
        .realip_remote_addr()
        .map(str::to_string);

    if let Some(ip) = &from_connection
        && ip.parse::<IpAddr>().is_ok()
    {
        return ip.clone();
    }

    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next());
    let real_ip = req.headers().get("X-Real-IP").and_then(|v| v.to_str().ok());

    forwarded
        .into_iter()
        .chain(real_ip)
        .map(str::trim)
        .find(|ip| ip.parse::<IpAddr>().is_ok())
        .map(str::to_string)
        .or(from_connection)
        .unwrap_or_else(|| "unknown".to_string())
}

fn too_many_requests(retry_after: u64) -> HttpResponse {
    HttpResponse::build(StatusCode::TOO_MANY_REQUESTS)
        .insert_header(("Retry-After", retry_after.to_string()))
        .insert_header(("X-RateLimit-Remaining", "0"))
        .json(ApiResponse::<()>::error_empty(
            ErrorCode::RateLimitExceeded,
            "Too many requests, please try again later",
        ))
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limit: self.clone(),
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limit: RateLimit,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let limit = self.limit.clone();

        Box::pin(async move {
            let caller = req
                .extensions()
                .get::<User>()
                .map(|user| format!("user:{}", user.id));
            let key = format!(
                "{}:{}",
                limit.key_prefix,
                caller.unwrap_or_else(|| format!("ip:{}", client_ip(&req)))
            );

            let now = Instant::now();
            let length = limit.window;
            let window = RATE_LIMIT_WINDOWS
                .entry(key.clone())
                .and_upsert_with(|existing| {
                    let previous = existing.map(|entry| entry.into_value());
                    std::future::ready(Window::hit(previous, now, length))
                })
                .await
                .into_value();

            if window.count > limit.max_requests {
                warn!(
                    "Rate limit exceeded for {} ({}/{})",
                    key, window.count, limit.max_requests
                );
                let retry_after = window.retry_after(now, length);
                return Ok(req.into_response(too_many_requests(retry_after).map_into_right_body()));
            }

            Ok(srv.call(req).await?.map_into_left_body())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let login = RateLimit::login();
        assert_eq!(login.max_requests, 5);
        assert_eq!(login.window, Duration::from_secs(60));
        assert_eq!(login.key_prefix, "login");
        assert_eq!(RateLimit::register().max_requests, 3);
        assert_eq!(RateLimit::import().key_prefix, "import");
    }

    #[test]
    fn test_window_counts_then_resets() {
        let length = Duration::from_secs(60);
        let start = Instant::now();

        let mut window = Window::hit(None, start, length);
        for _ in 0..4 {
            window = Window::hit(Some(window), start + Duration::from_secs(10), length);
        }
        assert_eq!(window.count, 5);
        assert_eq!(window.retry_after(start + Duration::from_secs(10), length), 50);

        let reset = Window::hit(Some(window), start + Duration::from_secs(61), length);
        assert_eq!(reset.count, 1);
    }
}
