/*!
 * Bearer-token authentication.
 *
 * Wrap a scope with `RequireJWT` and every request must carry
 * `Authorization: Bearer <access token>`. The token is verified, the account
 * is loaded (cache first, then storage) and must be active. The `User` is
 * stored in the request extensions for handlers and `RequireRole`.
 *
 * ```rust,ignore
 * web::scope("/api/v1/students")
 *     .wrap(RequireJWT)
 *     .route("", web::get().to(list_students))
 * ```
 *
 * Handlers read the caller back with [`RequireJWT::extract_user_claims`],
 * [`RequireJWT::extract_user_id`] or [`RequireJWT::extract_user_role`].
 */

use crate::cache::{self, ObjectCache};
use crate::config::AppConfig;
use crate::models::users::entities::{User, UserRole, UserStatus};
use crate::models::ErrorCode;
use crate::storage::Storage;
use crate::utils::jwt::JwtUtils;
use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage, HttpRequest, HttpResponse,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{Method, StatusCode},
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::{rc::Rc, sync::Arc};
use tracing::{debug, error, info};

use super::create_error_response;

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Clone)]
pub struct RequireJWT;

fn bearer_token(req: &ServiceRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn authenticate(req: &ServiceRequest) -> Result<User, &'static str> {
    let token = bearer_token(req).ok_or("Missing or invalid Authorization header")?;

    let claims = JwtUtils::verify_access_token(token).map_err(|err| {
        info!("Access token rejected: {}", err);
        "Invalid or expired access token"
    })?;

    let cache = req
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone());

    let key = cache::user_key(token);
    if let Some(cache) = &cache
        && let Some(user) = cache.get_json::<User>(&key).await
    {
        return Ok(user);
    }

    let storage = req
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            error!("Storage is not registered as app data");
            "Authentication unavailable"
        })?;

    let user_id = claims.user_id().ok_or("Invalid subject in access token")?;
    let user = storage
        .get_user_by_id(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user {}: {}", user_id, e);
            "Authentication unavailable"
        })?
        .ok_or("User not found")?;

    if user.status != UserStatus::Active {
        return Err("User is not active");
    }

    if let Some(cache) = &cache {
        cache
            .insert_json(key, &user, AppConfig::get().cache.default_ttl)
            .await;
    }

    Ok(user)
}

impl<S, B> Transform<S, ServiceRequest> for RequireJWT
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireJWTMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireJWTMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct RequireJWTMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireJWTMiddleware<S>
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
        Box::pin(async move {
            // CORS preflight carries no credentials
            if req.method() == Method::OPTIONS {
                return Ok(req.into_response(HttpResponse::NoContent().finish().map_into_right_body()));
            }

            match authenticate(&req).await {
                Ok(user) => {
                    debug!("Authenticated user {} ({})", user.id, user.user_type);
                    req.extensions_mut().insert(user);
                    Ok(srv.call(req).await?.map_into_left_body())
                }
                Err(reason) => {
                    info!("Authentication failed for {}: {}", req.path(), reason);
                    Ok(req.into_response(
                        create_error_response(
                            StatusCode::UNAUTHORIZED,
                            ErrorCode::Unauthorized,
                            reason,
                        )
                        .map_into_right_body(),
                    ))
                }
            }
        })
    }
}

impl RequireJWT {
    /// The authenticated caller; `None` outside a `RequireJWT` scope.
    pub fn extract_user_claims(req: &HttpRequest) -> Option<User> {
        req.extensions().get::<User>().cloned()
    }

    pub fn extract_user_id(req: &HttpRequest) -> Option<i64> {
        req.extensions().get::<User>().map(|user| user.id)
    }

    pub fn extract_user_role(req: &HttpRequest) -> Option<UserRole> {
        req.extensions()
            .get::<User>()
            .map(|user| user.user_type)
    }
}
