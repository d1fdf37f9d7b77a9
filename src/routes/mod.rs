pub mod attendance;
pub mod auth;
pub mod courses;
pub mod enrollments;
pub mod financials;
pub mod frontend;
pub mod instructors;
pub mod invoices;
pub mod members;
pub mod notifications;
pub mod payment_plans;
pub mod payments;
pub mod students;
pub mod system;
pub mod users;

pub use attendance::configure_attendance_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use enrollments::configure_enrollment_routes;
pub use financials::configure_financial_routes;
pub use frontend::configure_frontend_routes;
pub use instructors::configure_instructor_routes;
pub use invoices::configure_invoice_routes;
pub use members::configure_member_routes;
pub use notifications::configure_notification_routes;
pub use payment_plans::configure_payment_plan_routes;
pub use payments::configure_payment_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use users::configure_user_routes;

use actix_web::web;

/// Every API scope, in registration order. The frontend fallback is not included.
pub fn configure_api_routes(cfg: &mut web::ServiceConfig) {
    configure_auth_routes(cfg);
    configure_user_routes(cfg);
    configure_student_routes(cfg);
    configure_instructor_routes(cfg);
    configure_member_routes(cfg);
    configure_course_routes(cfg);
    configure_enrollment_routes(cfg);
    configure_attendance_routes(cfg);
    configure_payment_routes(cfg);
    configure_invoice_routes(cfg);
    configure_payment_plan_routes(cfg);
    configure_financial_routes(cfg);
    configure_notification_routes(cfg);
    configure_system_routes(cfg);
}
