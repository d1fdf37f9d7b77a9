/*!
 * Role-based access control.
 *
 * Must sit inside a `RequireJWT` scope; it reads the caller's `user_type`
 * from the request extensions.
 *
 * ```rust,ignore
 * web::scope("/api/v1/financials")
 *     .wrap(RequireJWT)
 *     .service(
 *         web::scope("")
 *             .wrap(RequireRole::new_any(UserRole::management_roles()))
 *             .route("/summary", web::get().to(summary)),
 *     )
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::{
    ErrorCode,
    users::entities::{User, UserRole},
};

use super::create_error_response;

#[derive(Clone)]
pub struct RequireRole {
    allowed_roles: Rc<[UserRole]>,
}

impl RequireRole {
    pub fn new(role: &UserRole) -> Self {
        Self {
            allowed_roles: Rc::from(vec![*role]),
        }
    }

    /// Any one of `roles` is enough.
    pub fn new_any(roles: &[&UserRole]) -> Self {
        Self {
            allowed_roles: roles.iter().map(|r| **r).collect(),
        }
    }

    fn allows(allowed: &[UserRole], role: &UserRole) -> bool {
        allowed.contains(role)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed_roles: self.allowed_roles.clone(),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed_roles: Rc<[UserRole]>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
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
        let allowed_roles = self.allowed_roles.clone();

        Box::pin(async move {
            let caller = req
                .extensions()
                .get::<User>()
                .map(|user| (user.id, user.user_type));

            let Some((user_id, role)) = caller else {
                info!("Role check without an authenticated user on {}", req.path());
                return Ok(req.into_response(
                    create_error_response(
                        StatusCode::UNAUTHORIZED,
                        ErrorCode::Unauthorized,
                        "Authentication required",
                    )
                    .map_into_right_body(),
                ));
            };

            if RequireRole::allows(&allowed_roles, &role) {
                return Ok(srv.call(req).await?.map_into_left_body());
            }

            info!(
                "Access denied for user {} (role: {}) on {}; allowed: {:?}",
                user_id,
                role,
                req.path(),
                allowed_roles
            );
            Ok(req.into_response(
                create_error_response(
                    StatusCode::FORBIDDEN,
                    ErrorCode::Forbidden,
                    "You do not have permission to perform this action",
                )
                .map_into_right_body(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_groups() {
        let office = RequireRole::new_any(UserRole::office_roles());
        assert!(RequireRole::allows(&office.allowed_roles, &UserRole::Staff));
        assert!(!RequireRole::allows(&office.allowed_roles, &UserRole::Instructor));

        let attendance = RequireRole::new_any(UserRole::attendance_roles());
        assert!(RequireRole::allows(&attendance.allowed_roles, &UserRole::Instructor));
        assert!(!RequireRole::allows(&attendance.allowed_roles, &UserRole::Member));

        let admin = RequireRole::new(&UserRole::Admin);
        assert!(!RequireRole::allows(&admin.allowed_roles, &UserRole::Manager));
    }
}
