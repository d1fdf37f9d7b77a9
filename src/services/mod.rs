pub mod attendance;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod financials;
pub mod instructors;
pub mod invoices;
pub mod members;
pub mod notifications;
pub mod payment_plans;
pub mod payments;
pub mod students;
pub mod system;
pub mod users;

pub use attendance::AttendanceService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use enrollments::EnrollmentService;
pub use financials::FinancialService;
pub use instructors::InstructorService;
pub use invoices::InvoiceService;
pub use members::MemberService;
pub use notifications::NotificationService;
pub use payment_plans::PaymentPlanService;
pub use payments::PaymentService;
pub use students::StudentService;
pub use system::SystemService;
pub use users::UserService;

use actix_web::{HttpResponse, http::StatusCode};
use tracing::error;

use crate::errors::CoopError;
use crate::models::{ApiResponse, ErrorCode};

/// Declares a service holding an optional storage handle.
///
/// Without an injected handle the storage registered as app data is used.
macro_rules! storage_service {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        pub struct $name {
            storage: Option<std::sync::Arc<dyn crate::storage::Storage>>,
        }

        impl $name {
            pub fn new_lazy() -> Self {
                Self { storage: None }
            }

            #[allow(dead_code)]
            pub fn with_storage(storage: std::sync::Arc<dyn crate::storage::Storage>) -> Self {
                Self {
                    storage: Some(storage),
                }
            }

            pub(crate) fn get_storage(
                &self,
                request: &actix_web::HttpRequest,
            ) -> actix_web::Result<std::sync::Arc<dyn crate::storage::Storage>> {
                if let Some(storage) = &self.storage {
                    return Ok(storage.clone());
                }
                request
                    .app_data::<actix_web::web::Data<std::sync::Arc<dyn crate::storage::Storage>>>()
                    .map(|data| data.get_ref().clone())
                    .ok_or_else(|| {
                        actix_web::error::ErrorInternalServerError("Storage not found in app data")
                    })
            }
        }
    };
}
pub(crate) use storage_service;

fn status_for(err: &CoopError) -> StatusCode {
    match err {
        CoopError::Validation(_) | CoopError::DateParse(_) | CoopError::Import(_) => {
            StatusCode::BAD_REQUEST
        }
        CoopError::NotFound(_) => StatusCode::NOT_FOUND,
        CoopError::Conflict(_) | CoopError::CapacityExceeded(_) | CoopError::PeriodFinalized(_) => {
            StatusCode::CONFLICT
        }
        CoopError::Authentication(_) => StatusCode::UNAUTHORIZED,
        CoopError::Authorization(_) => StatusCode::FORBIDDEN,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Maps an error raised below the service layer onto the JSON envelope.
pub(crate) fn error_response(err: CoopError) -> HttpResponse {
    let code = ErrorCode::for_error(&err);
    error_response_with(code, err)
}

/// Same as [`error_response`] with a more specific code for client errors.
pub(crate) fn error_response_with(code: ErrorCode, err: CoopError) -> HttpResponse {
    let status = status_for(&err);
    if status.is_server_error() {
        error!("{}", err);
        return HttpResponse::build(status).json(ApiResponse::error_empty(
            ErrorCode::for_error(&err),
            err.format_simple(),
        ));
    }
    HttpResponse::build(status).json(ApiResponse::error_empty(code, err.message()))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            error_response(CoopError::capacity_exceeded("full")).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            error_response(CoopError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            error_response(CoopError::not_found("gone")).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            error_response(CoopError::database_operation("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
