//! Persistence boundary.
//!
//! Services only see [`Storage`]; the SeaORM implementation lives in
//! [`sea_orm_storage`].

use std::sync::Arc;

use crate::errors::Result;
use crate::finance::Period;
use crate::models::{
    PaginatedResponse,
    attendance::{
        entities::{Attendance, AttendanceInput, AttendanceSummary},
        requests::{AttendanceListQuery, AttendanceSummaryQuery, UpdateAttendanceRequest},
    },
    courses::{
        entities::{Course, CourseDetail, CourseInstructor},
        requests::{
            AssignInstructorRequest, CourseListQuery, CreateCourseRequest, UpdateAssignmentRequest,
            UpdateCourseRequest,
        },
    },
    enrollments::{
        entities::{Enrollment, EnrollmentDetail},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
    },
    financials::{
        entities::{
            BudgetAllocation, DistributionStatus, Expense, ExpenseStatus, InstructorPayment,
            InstructorPaymentStatus, MemberDistribution, MonthlyFinancial,
        },
        requests::{
            BudgetListQuery, CreateBudgetRequest, CreateExpenseRequest, DistributionListQuery,
            ExpenseListQuery, InstructorPaymentListQuery, MonthlyFinancialListQuery,
            PaymentDetails, UpdateBudgetRequest, UpdateExpenseRequest,
        },
        responses::DashboardStats,
    },
    instructors::{
        entities::{Instructor, InstructorStats},
        requests::{CreateInstructorRequest, InstructorListQuery, UpdateInstructorRequest},
    },
    invoices::{
        entities::Invoice,
        requests::{CreateInvoiceRequest, InvoiceListQuery, UpdateInvoiceRequest},
    },
    members::{
        entities::Member,
        requests::{CreateMemberRequest, MemberListQuery, UpdateMemberRequest},
    },
    notifications::{
        entities::{NewNotification, Notification, NotificationTemplate},
        requests::{
            CreateTemplateRequest, NotificationListQuery, TemplateListQuery,
            UpdateNotificationRequest, UpdateTemplateRequest,
        },
    },
    payment_plans::{
        entities::PaymentPlan,
        requests::{CreatePaymentPlanRequest, PaymentPlanListQuery, UpdatePaymentPlanRequest},
    },
    payments::{
        entities::{Payment, PaymentMethod},
        requests::{CreatePaymentRequest, MarkPaidRequest, PaymentListQuery, UpdatePaymentRequest},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentStatistics,
    },
    system::{
        entities::{SettingAudit, SystemSetting},
        requests::SettingAuditQuery,
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use chrono::NaiveDate;
use rust_decimal::Decimal;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    // Accounts
    async fn create_user(&self, req: CreateUserRequest) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    async fn delete_user(&self, id: i64) -> Result<bool>;
    async fn count_users(&self) -> Result<u64>;
    async fn record_login_attempt(
        &self,
        identifier: &str,
        ip_address: Option<String>,
        success: bool,
    ) -> Result<()>;
    async fn count_failed_logins_since(&self, identifier: &str, since: i64) -> Result<u64>;

    // Students
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn find_student_by_name_and_parent_phone(
        &self,
        full_name: &str,
        parent_phone: &str,
    ) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    async fn list_all_students(&self, query: StudentListQuery) -> Result<Vec<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    async fn student_statistics(&self) -> Result<StudentStatistics>;

    // Instructors
    async fn create_instructor(&self, req: CreateInstructorRequest) -> Result<Instructor>;
    async fn get_instructor_by_id(&self, id: i64) -> Result<Option<Instructor>>;
    async fn list_instructors_with_pagination(
        &self,
        query: InstructorListQuery,
    ) -> Result<PaginatedResponse<Instructor>>;
    async fn update_instructor(
        &self,
        id: i64,
        update: UpdateInstructorRequest,
    ) -> Result<Option<Instructor>>;
    async fn delete_instructor(&self, id: i64) -> Result<bool>;
    async fn instructor_stats(&self, id: i64) -> Result<InstructorStats>;

    // Members
    async fn create_member(&self, req: CreateMemberRequest) -> Result<Member>;
    async fn get_member_by_id(&self, id: i64) -> Result<Option<Member>>;
    async fn list_members_with_pagination(
        &self,
        query: MemberListQuery,
    ) -> Result<PaginatedResponse<Member>>;
    async fn update_member(&self, id: i64, update: UpdateMemberRequest) -> Result<Option<Member>>;
    async fn delete_member(&self, id: i64) -> Result<bool>;
    async fn member_distributions_total(&self, member_id: i64) -> Result<Decimal>;

    // Courses and instructor assignments
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_detail(&self, id: i64) -> Result<Option<CourseDetail>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<CourseDetail>>;
    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;
    async fn list_course_students(&self, course_id: i64) -> Result<Vec<Student>>;
    async fn list_course_instructors(&self, course_id: i64) -> Result<Vec<CourseInstructor>>;
    async fn assign_instructor(
        &self,
        course_id: i64,
        req: AssignInstructorRequest,
    ) -> Result<CourseInstructor>;
    async fn update_assignment(
        &self,
        course_id: i64,
        instructor_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<CourseInstructor>>;
    async fn remove_assignment(&self, course_id: i64, instructor_id: i64) -> Result<bool>;

    // Enrollments
    async fn create_enrollment(&self, req: CreateEnrollmentRequest) -> Result<Enrollment>;
    async fn get_enrollment_detail(&self, id: i64) -> Result<Option<EnrollmentDetail>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>>;
    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>>;
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;

    // Attendance and monthly summaries
    async fn create_attendance(&self, input: AttendanceInput) -> Result<Attendance>;
    async fn upsert_attendance(&self, input: AttendanceInput) -> Result<(Attendance, bool)>;
    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>>;
    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<Attendance>>;
    async fn list_attendance_by_course_date(
        &self,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>>;
    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>>;
    async fn delete_attendance(&self, id: i64) -> Result<bool>;
    async fn list_attendance_summaries(
        &self,
        query: AttendanceSummaryQuery,
    ) -> Result<PaginatedResponse<AttendanceSummary>>;
    async fn recalculate_attendance_summaries(
        &self,
        period: Period,
        student_id: Option<i64>,
        course_id: Option<i64>,
    ) -> Result<Vec<AttendanceSummary>>;

    // Payments, invoices and payment plans
    async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment>;
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>>;
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<Payment>>;
    async fn update_payment(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>>;
    async fn delete_payment(&self, id: i64) -> Result<bool>;
    async fn mark_payment_paid(&self, id: i64, req: MarkPaidRequest) -> Result<Option<Payment>>;
    async fn list_overdue_payments(&self, today: NaiveDate) -> Result<Vec<Payment>>;
    async fn list_payments_due_on(&self, date: NaiveDate) -> Result<Vec<Payment>>;
    async fn list_open_payments_due_on(&self, date: NaiveDate) -> Result<Vec<Payment>>;
    async fn mark_payment_overdue(&self, id: i64) -> Result<bool>;
    async fn list_plan_installments(&self, plan_id: i64) -> Result<Vec<Payment>>;
    async fn create_invoice(&self, req: CreateInvoiceRequest) -> Result<Invoice>;
    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>>;
    async fn list_invoices_with_pagination(
        &self,
        query: InvoiceListQuery,
    ) -> Result<PaginatedResponse<Invoice>>;
    async fn update_invoice(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
    ) -> Result<Option<Invoice>>;
    async fn delete_invoice(&self, id: i64) -> Result<bool>;
    async fn set_invoice_pdf_path(&self, id: i64, path: &str) -> Result<bool>;
    async fn create_payment_plan(&self, req: CreatePaymentPlanRequest) -> Result<PaymentPlan>;
    async fn get_payment_plan_by_id(&self, id: i64) -> Result<Option<PaymentPlan>>;
    async fn list_payment_plans_with_pagination(
        &self,
        query: PaymentPlanListQuery,
    ) -> Result<PaginatedResponse<PaymentPlan>>;
    async fn update_payment_plan(
        &self,
        id: i64,
        update: UpdatePaymentPlanRequest,
    ) -> Result<Option<PaymentPlan>>;
    async fn delete_payment_plan(&self, id: i64) -> Result<bool>;
    async fn generate_installments(
        &self,
        plan_id: i64,
        method: PaymentMethod,
    ) -> Result<Option<Vec<Payment>>>;

    // Payroll, profit, distributions, expenses and budgets
    async fn calculate_instructor_payments(&self, period: Period) -> Result<Vec<InstructorPayment>>;
    async fn calculate_monthly_profit(
        &self,
        period: Period,
        retained_earnings_percentage: Decimal,
    ) -> Result<(MonthlyFinancial, Vec<MemberDistribution>)>;
    async fn list_instructor_payments(
        &self,
        query: InstructorPaymentListQuery,
    ) -> Result<PaginatedResponse<InstructorPayment>>;
    async fn transition_instructor_payment(
        &self,
        id: i64,
        next: InstructorPaymentStatus,
        details: PaymentDetails,
    ) -> Result<Option<InstructorPayment>>;
    async fn get_monthly_financial_by_id(&self, id: i64) -> Result<Option<MonthlyFinancial>>;
    async fn get_monthly_financial_by_period(
        &self,
        period: Period,
    ) -> Result<Option<MonthlyFinancial>>;
    async fn list_monthly_financials(
        &self,
        query: MonthlyFinancialListQuery,
    ) -> Result<PaginatedResponse<MonthlyFinancial>>;
    async fn finalize_monthly_financial(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> Result<Option<MonthlyFinancial>>;
    async fn list_distributions(
        &self,
        query: DistributionListQuery,
    ) -> Result<PaginatedResponse<MemberDistribution>>;
    async fn list_monthly_distributions(
        &self,
        monthly_financial_id: i64,
    ) -> Result<Vec<MemberDistribution>>;
    async fn transition_distribution(
        &self,
        id: i64,
        next: DistributionStatus,
        details: PaymentDetails,
    ) -> Result<Option<MemberDistribution>>;
    async fn create_expense(&self, req: CreateExpenseRequest) -> Result<Expense>;
    async fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>>;
    async fn list_expenses(&self, query: ExpenseListQuery) -> Result<PaginatedResponse<Expense>>;
    async fn update_expense(
        &self,
        id: i64,
        update: UpdateExpenseRequest,
    ) -> Result<Option<Expense>>;
    async fn delete_expense(&self, id: i64) -> Result<bool>;
    async fn transition_expense(
        &self,
        id: i64,
        next: ExpenseStatus,
        actor: Option<i64>,
    ) -> Result<Option<Expense>>;
    async fn create_budget(&self, req: CreateBudgetRequest) -> Result<BudgetAllocation>;
    async fn get_budget_by_id(&self, id: i64) -> Result<Option<BudgetAllocation>>;
    async fn list_budgets(
        &self,
        query: BudgetListQuery,
    ) -> Result<PaginatedResponse<BudgetAllocation>>;
    async fn update_budget(
        &self,
        id: i64,
        update: UpdateBudgetRequest,
    ) -> Result<Option<BudgetAllocation>>;
    async fn delete_budget(&self, id: i64) -> Result<bool>;

    // Dashboard
    async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats>;

    // Notifications and templates
    async fn create_notification(&self, new: NewNotification) -> Result<Notification>;
    async fn queue_notification_once(&self, new: NewNotification) -> Result<Option<Notification>>;
    async fn reminder_key_exists(&self, key: &str) -> Result<bool>;
    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>>;
    async fn list_notifications(
        &self,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<Notification>>;
    async fn update_notification(
        &self,
        id: i64,
        update: UpdateNotificationRequest,
    ) -> Result<Option<Notification>>;
    async fn delete_notification(&self, id: i64) -> Result<bool>;
    async fn list_due_notifications(&self, now: i64, limit: u64) -> Result<Vec<Notification>>;
    async fn mark_notification_sent(&self, id: i64) -> Result<Option<Notification>>;
    async fn mark_notification_failed(
        &self,
        id: i64,
        error: &str,
        max_attempts: i32,
    ) -> Result<Option<Notification>>;
    async fn create_template(&self, req: CreateTemplateRequest) -> Result<NotificationTemplate>;
    async fn get_template_by_id(&self, id: i64) -> Result<Option<NotificationTemplate>>;
    async fn get_template_by_name(&self, name: &str) -> Result<Option<NotificationTemplate>>;
    async fn list_templates(
        &self,
        query: TemplateListQuery,
    ) -> Result<PaginatedResponse<NotificationTemplate>>;
    async fn update_template(
        &self,
        id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<NotificationTemplate>>;
    async fn delete_template(&self, id: i64) -> Result<bool>;

    // System settings
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>>;
    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting>;
    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<PaginatedResponse<SettingAudit>>;}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
