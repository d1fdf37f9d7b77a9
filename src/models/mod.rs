//! API-facing data types: domain entities, request payloads and responses.

pub mod attendance;
pub mod auth;
pub mod common;
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

pub use common::{ApiResponse, PaginatedResponse, PaginationInfo, PaginationQuery, page_params};

use crate::errors::CoopError;

/// Process start, used for uptime reporting.
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// Numeric codes carried in `ApiResponse::code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // General
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    Conflict = 1009,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    // Accounts
    AuthFailed = 2000,
    AccountLocked = 2001,
    RegisterFailed = 2002,
    PasswordMismatch = 2003,
    UserPasswordInvalid = 2004,
    UserNameInvalid = 2005,
    UserEmailInvalid = 2006,
    UserNameAlreadyExists = 2007,
    UserEmailAlreadyExists = 2008,
    UserNotFound = 2009,
    UserUpdateFailed = 2010,
    UserDeleteFailed = 2011,
    CanNotDeleteCurrentUser = 2012,
    UserCreationFailed = 2013,
    UserRoleForbidden = 2014,

    // People and courses
    StudentNotFound = 3000,
    StudentInvalid = 3001,
    InstructorNotFound = 3010,
    InstructorInvalid = 3011,
    MemberNotFound = 3020,
    MemberInvalid = 3021,
    CourseNotFound = 3030,
    CourseInvalid = 3031,
    CourseFull = 3032,
    CourseInstructorNotFound = 3033,
    EnrollmentNotFound = 3040,
    EnrollmentDuplicate = 3041,
    EnrollmentInvalid = 3042,
    AttendanceNotFound = 3050,
    AttendanceInvalid = 3051,

    // Billing
    PaymentNotFound = 4000,
    PaymentInvalid = 4001,
    PaymentStateInvalid = 4002,
    InvoiceNotFound = 4010,
    InvoiceInvalid = 4011,
    InvoiceRenderFailed = 4012,
    PaymentPlanNotFound = 4020,
    PaymentPlanInvalid = 4021,
    InstallmentsAlreadyGenerated = 4022,

    // Financials
    FinancialPeriodInvalid = 5000,
    FinancialPeriodNotFound = 5001,
    FinancialPeriodFinalized = 5002,
    FinancialCalculationFailed = 5003,
    InstructorPaymentNotFound = 5010,
    DistributionNotFound = 5020,
    ExpenseNotFound = 5030,
    ExpenseInvalid = 5031,
    BudgetNotFound = 5040,
    BudgetInvalid = 5041,
    StatusTransitionInvalid = 5050,

    // Notifications
    NotificationNotFound = 6000,
    NotificationInvalid = 6001,
    TemplateNotFound = 6010,
    TemplateInvalid = 6011,

    // Import / export
    FileUploadFailed = 7000,
    ImportFileMissingColumn = 7001,
    ImportFileParseFailed = 7002,
    ImportFileDataInvalid = 7003,
    ExportFailed = 7010,

    // Settings
    SettingNotFound = 8000,
    SettingInvalid = 8001,
    SettingUpdateFailed = 8002,
}

impl ErrorCode {
    /// Generic code for an error raised below the service layer.
    pub fn for_error(err: &CoopError) -> Self {
        match err {
            CoopError::Validation(_) | CoopError::DateParse(_) => ErrorCode::BadRequest,
            CoopError::NotFound(_) => ErrorCode::NotFound,
            CoopError::Conflict(_) => ErrorCode::Conflict,
            CoopError::CapacityExceeded(_) => ErrorCode::CourseFull,
            CoopError::PeriodFinalized(_) => ErrorCode::FinancialPeriodFinalized,
            CoopError::Authentication(_) => ErrorCode::Unauthorized,
            CoopError::Authorization(_) => ErrorCode::Forbidden,
            CoopError::DocumentRender(_) => ErrorCode::InvoiceRenderFailed,
            CoopError::Import(_) => ErrorCode::ImportFileParseFailed,
            _ => ErrorCode::InternalServerError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_stable() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::CourseFull as i32, 3032);
        assert_eq!(ErrorCode::FinancialPeriodFinalized as i32, 5002);
    }

    #[test]
    fn test_for_error() {
        assert_eq!(
            ErrorCode::for_error(&CoopError::capacity_exceeded("full")),
            ErrorCode::CourseFull
        );
        assert_eq!(
            ErrorCode::for_error(&CoopError::database_operation("boom")),
            ErrorCode::InternalServerError
        );
    }
}
