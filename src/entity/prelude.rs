//! Short aliases for the entities.

pub use super::attendance::{
    ActiveModel as AttendanceActiveModel, Entity as Attendances, Model as AttendanceModel,
};
pub use super::attendance_summaries::{
    ActiveModel as AttendanceSummaryActiveModel, Entity as AttendanceSummaries,
    Model as AttendanceSummaryModel,
};
pub use super::budget_allocations::{
    ActiveModel as BudgetAllocationActiveModel, Entity as BudgetAllocations,
    Model as BudgetAllocationModel,
};
pub use super::course_instructors::{
    ActiveModel as CourseInstructorActiveModel, Entity as CourseInstructors,
    Model as CourseInstructorModel,
};
pub use super::courses::{ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel};
pub use super::enrollments::{
    ActiveModel as EnrollmentActiveModel, Entity as Enrollments, Model as EnrollmentModel,
};
pub use super::expenses::{
    ActiveModel as ExpenseActiveModel, Entity as Expenses, Model as ExpenseModel,
};
pub use super::instructor_payments::{
    ActiveModel as InstructorPaymentActiveModel, Entity as InstructorPayments,
    Model as InstructorPaymentModel,
};
pub use super::instructors::{
    ActiveModel as InstructorActiveModel, Entity as Instructors, Model as InstructorModel,
};
pub use super::invoices::{
    ActiveModel as InvoiceActiveModel, Entity as Invoices, Model as InvoiceModel,
};
pub use super::login_attempts::{
    ActiveModel as LoginAttemptActiveModel, Entity as LoginAttempts, Model as LoginAttemptModel,
};
pub use super::member_distributions::{
    ActiveModel as MemberDistributionActiveModel, Entity as MemberDistributions,
    Model as MemberDistributionModel,
};
pub use super::members::{ActiveModel as MemberActiveModel, Entity as Members, Model as MemberModel};
pub use super::monthly_financials::{
    ActiveModel as MonthlyFinancialActiveModel, Entity as MonthlyFinancials,
    Model as MonthlyFinancialModel,
};
pub use super::notification_templates::{
    ActiveModel as NotificationTemplateActiveModel, Entity as NotificationTemplates,
    Model as NotificationTemplateModel,
};
pub use super::notifications::{
    ActiveModel as NotificationActiveModel, Entity as Notifications, Model as NotificationModel,
};
pub use super::payment_plans::{
    ActiveModel as PaymentPlanActiveModel, Entity as PaymentPlans, Model as PaymentPlanModel,
};
pub use super::payments::{
    ActiveModel as PaymentActiveModel, Entity as Payments, Model as PaymentModel,
};
pub use super::students::{
    ActiveModel as StudentActiveModel, Entity as Students, Model as StudentModel,
};
pub use super::system_settings::{
    ActiveModel as SystemSettingActiveModel, Entity as SystemSettings, Model as SystemSettingModel,
};
pub use super::system_settings_audit::{
    ActiveModel as SystemSettingAuditActiveModel, Entity as SystemSettingsAudit,
    Model as SystemSettingAuditModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
