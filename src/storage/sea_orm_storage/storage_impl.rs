use super::SeaOrmStorage;
use crate::storage::Storage;
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

#[async_trait::async_trait]
impl Storage for SeaOrmStorage {
    // Accounts
    async fn create_user(&self, req: CreateUserRequest) -> Result<User> {
        self.create_user_impl(req).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    async fn record_login_attempt(
        &self,
        identifier: &str,
        ip_address: Option<String>,
        success: bool,
    ) -> Result<()> {
        self.record_login_attempt_impl(identifier, ip_address, success).await
    }

    async fn count_failed_logins_since(&self, identifier: &str, since: i64) -> Result<u64> {
        self.count_failed_logins_since_impl(identifier, since).await
    }

    // Students
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn find_student_by_name_and_parent_phone(
        &self,
        full_name: &str,
        parent_phone: &str,
    ) -> Result<Option<Student>> {
        self.find_student_by_name_and_parent_phone_impl(full_name, parent_phone).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn list_all_students(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        self.list_all_students_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn student_statistics(&self) -> Result<StudentStatistics> {
        self.student_statistics_impl().await
    }

    // Instructors
    async fn create_instructor(&self, req: CreateInstructorRequest) -> Result<Instructor> {
        self.create_instructor_impl(req).await
    }

    async fn get_instructor_by_id(&self, id: i64) -> Result<Option<Instructor>> {
        self.get_instructor_by_id_impl(id).await
    }

    async fn list_instructors_with_pagination(
        &self,
        query: InstructorListQuery,
    ) -> Result<PaginatedResponse<Instructor>> {
        self.list_instructors_with_pagination_impl(query).await
    }

    async fn update_instructor(
        &self,
        id: i64,
        update: UpdateInstructorRequest,
    ) -> Result<Option<Instructor>> {
        self.update_instructor_impl(id, update).await
    }

    async fn delete_instructor(&self, id: i64) -> Result<bool> {
        self.delete_instructor_impl(id).await
    }

    async fn instructor_stats(&self, id: i64) -> Result<InstructorStats> {
        self.instructor_stats_impl(id).await
    }

    // Members
    async fn create_member(&self, req: CreateMemberRequest) -> Result<Member> {
        self.create_member_impl(req).await
    }

    async fn get_member_by_id(&self, id: i64) -> Result<Option<Member>> {
        self.get_member_by_id_impl(id).await
    }

    async fn list_members_with_pagination(
        &self,
        query: MemberListQuery,
    ) -> Result<PaginatedResponse<Member>> {
        self.list_members_with_pagination_impl(query).await
    }

    async fn update_member(&self, id: i64, update: UpdateMemberRequest) -> Result<Option<Member>> {
        self.update_member_impl(id, update).await
    }

    async fn delete_member(&self, id: i64) -> Result<bool> {
        self.delete_member_impl(id).await
    }

    async fn member_distributions_total(&self, member_id: i64) -> Result<Decimal> {
        self.member_distributions_total_impl(member_id).await
    }

    // Courses and instructor assignments
    async fn create_course(&self, req: CreateCourseRequest) -> Result<Course> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_detail(&self, id: i64) -> Result<Option<CourseDetail>> {
        self.get_course_detail_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<CourseDetail>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(&self, id: i64, update: UpdateCourseRequest) -> Result<Option<Course>> {
        self.update_course_impl(id, update).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    async fn list_course_students(&self, course_id: i64) -> Result<Vec<Student>> {
        self.list_course_students_impl(course_id).await
    }

    async fn list_course_instructors(&self, course_id: i64) -> Result<Vec<CourseInstructor>> {
        self.list_course_instructors_impl(course_id).await
    }

    async fn assign_instructor(
        &self,
        course_id: i64,
        req: AssignInstructorRequest,
    ) -> Result<CourseInstructor> {
        self.assign_instructor_impl(course_id, req).await
    }

    async fn update_assignment(
        &self,
        course_id: i64,
        instructor_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<CourseInstructor>> {
        self.update_assignment_impl(course_id, instructor_id, update).await
    }

    async fn remove_assignment(&self, course_id: i64, instructor_id: i64) -> Result<bool> {
        self.remove_assignment_impl(course_id, instructor_id).await
    }

    // Enrollments
    async fn create_enrollment(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        self.create_enrollment_impl(req).await
    }

    async fn get_enrollment_detail(&self, id: i64) -> Result<Option<EnrollmentDetail>> {
        self.get_enrollment_detail_impl(id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        self.update_enrollment_impl(id, update).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    // Attendance and monthly summaries
    async fn create_attendance(&self, input: AttendanceInput) -> Result<Attendance> {
        self.create_attendance_impl(input).await
    }

    async fn upsert_attendance(&self, input: AttendanceInput) -> Result<(Attendance, bool)> {
        self.upsert_attendance_impl(input).await
    }

    async fn get_attendance_by_id(&self, id: i64) -> Result<Option<Attendance>> {
        self.get_attendance_by_id_impl(id).await
    }

    async fn list_attendance_with_pagination(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<Attendance>> {
        self.list_attendance_with_pagination_impl(query).await
    }

    async fn list_attendance_by_course_date(
        &self,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>> {
        self.list_attendance_by_course_date_impl(course_id, date).await
    }

    async fn update_attendance(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        self.update_attendance_impl(id, update).await
    }

    async fn delete_attendance(&self, id: i64) -> Result<bool> {
        self.delete_attendance_impl(id).await
    }

    async fn list_attendance_summaries(
        &self,
        query: AttendanceSummaryQuery,
    ) -> Result<PaginatedResponse<AttendanceSummary>> {
        self.list_attendance_summaries_impl(query).await
    }

    async fn recalculate_attendance_summaries(
        &self,
        period: Period,
        student_id: Option<i64>,
        course_id: Option<i64>,
    ) -> Result<Vec<AttendanceSummary>> {
        self.recalculate_attendance_summaries_impl(period, student_id, course_id).await
    }

    // Payments, invoices and payment plans
    async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment> {
        self.create_payment_impl(req).await
    }

    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(id).await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<Payment>> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn update_payment(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        self.update_payment_impl(id, update).await
    }

    async fn delete_payment(&self, id: i64) -> Result<bool> {
        self.delete_payment_impl(id).await
    }

    async fn mark_payment_paid(&self, id: i64, req: MarkPaidRequest) -> Result<Option<Payment>> {
        self.mark_payment_paid_impl(id, req).await
    }

    async fn list_overdue_payments(&self, today: NaiveDate) -> Result<Vec<Payment>> {
        self.list_overdue_payments_impl(today).await
    }

    async fn list_payments_due_on(&self, date: NaiveDate) -> Result<Vec<Payment>> {
        self.list_payments_due_on_impl(date).await
    }

    async fn list_open_payments_due_on(&self, date: NaiveDate) -> Result<Vec<Payment>> {
        self.list_open_payments_due_on_impl(date).await
    }

    async fn mark_payment_overdue(&self, id: i64) -> Result<bool> {
        self.mark_payment_overdue_impl(id).await
    }

    async fn list_plan_installments(&self, plan_id: i64) -> Result<Vec<Payment>> {
        self.list_plan_installments_impl(plan_id).await
    }

    async fn create_invoice(&self, req: CreateInvoiceRequest) -> Result<Invoice> {
        self.create_invoice_impl(req).await
    }

    async fn get_invoice_by_id(&self, id: i64) -> Result<Option<Invoice>> {
        self.get_invoice_by_id_impl(id).await
    }

    async fn list_invoices_with_pagination(
        &self,
        query: InvoiceListQuery,
    ) -> Result<PaginatedResponse<Invoice>> {
        self.list_invoices_with_pagination_impl(query).await
    }

    async fn update_invoice(
        &self,
        id: i64,
        update: UpdateInvoiceRequest,
    ) -> Result<Option<Invoice>> {
        self.update_invoice_impl(id, update).await
    }

    async fn delete_invoice(&self, id: i64) -> Result<bool> {
        self.delete_invoice_impl(id).await
    }

    async fn set_invoice_pdf_path(&self, id: i64, path: &str) -> Result<bool> {
        self.set_invoice_pdf_path_impl(id, path).await
    }

    async fn create_payment_plan(&self, req: CreatePaymentPlanRequest) -> Result<PaymentPlan> {
        self.create_payment_plan_impl(req).await
    }

    async fn get_payment_plan_by_id(&self, id: i64) -> Result<Option<PaymentPlan>> {
        self.get_payment_plan_by_id_impl(id).await
    }

    async fn list_payment_plans_with_pagination(
        &self,
        query: PaymentPlanListQuery,
    ) -> Result<PaginatedResponse<PaymentPlan>> {
        self.list_payment_plans_with_pagination_impl(query).await
    }

    async fn update_payment_plan(
        &self,
        id: i64,
        update: UpdatePaymentPlanRequest,
    ) -> Result<Option<PaymentPlan>> {
        self.update_payment_plan_impl(id, update).await
    }

    async fn delete_payment_plan(&self, id: i64) -> Result<bool> {
        self.delete_payment_plan_impl(id).await
    }

    async fn generate_installments(
        &self,
        plan_id: i64,
        method: PaymentMethod,
    ) -> Result<Option<Vec<Payment>>> {
        self.generate_installments_impl(plan_id, method).await
    }

    // Payroll, profit, distributions, expenses and budgets

    async fn calculate_instructor_payments(&self, period: Period) -> Result<Vec<InstructorPayment>> {
        self.calculate_instructor_payments_impl(period).await
    }

    async fn calculate_monthly_profit(
        &self,
        period: Period,
        retained_earnings_percentage: Decimal,
    ) -> Result<(MonthlyFinancial, Vec<MemberDistribution>)> {
        self.calculate_monthly_profit_impl(period, retained_earnings_percentage).await
    }

    async fn list_instructor_payments(
        &self,
        query: InstructorPaymentListQuery,
    ) -> Result<PaginatedResponse<InstructorPayment>> {
        self.list_instructor_payments_impl(query).await
    }

    async fn transition_instructor_payment(
        &self,
        id: i64,
        next: InstructorPaymentStatus,
        details: PaymentDetails,
    ) -> Result<Option<InstructorPayment>> {
        self.transition_instructor_payment_impl(id, next, details).await
    }

    async fn get_monthly_financial_by_id(&self, id: i64) -> Result<Option<MonthlyFinancial>> {
        self.get_monthly_financial_by_id_impl(id).await
    }

    async fn get_monthly_financial_by_period(
        &self,
        period: Period,
    ) -> Result<Option<MonthlyFinancial>> {
        self.get_monthly_financial_by_period_impl(period).await
    }

    async fn list_monthly_financials(
        &self,
        query: MonthlyFinancialListQuery,
    ) -> Result<PaginatedResponse<MonthlyFinancial>> {
        self.list_monthly_financials_impl(query).await
    }

    async fn finalize_monthly_financial(
        &self,
        id: i64,
        notes: Option<String>,
    ) -> Result<Option<MonthlyFinancial>> {
        self.finalize_monthly_financial_impl(id, notes).await
    }

    async fn list_distributions(
        &self,
        query: DistributionListQuery,
    ) -> Result<PaginatedResponse<MemberDistribution>> {
        self.list_distributions_impl(query).await
    }

    async fn list_monthly_distributions(
        &self,
        monthly_financial_id: i64,
    ) -> Result<Vec<MemberDistribution>> {
        self.list_monthly_distributions_impl(monthly_financial_id).await
    }

    async fn transition_distribution(
        &self,
        id: i64,
        next: DistributionStatus,
        details: PaymentDetails,
    ) -> Result<Option<MemberDistribution>> {
        self.transition_distribution_impl(id, next, details).await
    }

    async fn create_expense(&self, req: CreateExpenseRequest) -> Result<Expense> {
        self.create_expense_impl(req).await
    }

    async fn get_expense_by_id(&self, id: i64) -> Result<Option<Expense>> {
        self.get_expense_by_id_impl(id).await
    }

    async fn list_expenses(&self, query: ExpenseListQuery) -> Result<PaginatedResponse<Expense>> {
        self.list_expenses_impl(query).await
    }

    async fn update_expense(
        &self,
        id: i64,
        update: UpdateExpenseRequest,
    ) -> Result<Option<Expense>> {
        self.update_expense_impl(id, update).await
    }

    async fn delete_expense(&self, id: i64) -> Result<bool> {
        self.delete_expense_impl(id).await
    }

    async fn transition_expense(
        &self,
        id: i64,
        next: ExpenseStatus,
        actor: Option<i64>,
    ) -> Result<Option<Expense>> {
        self.transition_expense_impl(id, next, actor).await
    }

    async fn create_budget(&self, req: CreateBudgetRequest) -> Result<BudgetAllocation> {
        self.create_budget_impl(req).await
    }

    async fn get_budget_by_id(&self, id: i64) -> Result<Option<BudgetAllocation>> {
        self.get_budget_by_id_impl(id).await
    }

    async fn list_budgets(
        &self,
        query: BudgetListQuery,
    ) -> Result<PaginatedResponse<BudgetAllocation>> {
        self.list_budgets_impl(query).await
    }

    async fn update_budget(
        &self,
        id: i64,
        update: UpdateBudgetRequest,
    ) -> Result<Option<BudgetAllocation>> {
        self.update_budget_impl(id, update).await
    }

    async fn delete_budget(&self, id: i64) -> Result<bool> {
        self.delete_budget_impl(id).await
    }

    // Dashboard
    async fn dashboard_stats(&self, today: NaiveDate) -> Result<DashboardStats> {
        self.dashboard_stats_impl(today).await
    }

    // Notifications and templates
    async fn create_notification(&self, new: NewNotification) -> Result<Notification> {
        self.create_notification_impl(new).await
    }

    async fn queue_notification_once(&self, new: NewNotification) -> Result<Option<Notification>> {
        self.queue_notification_once_impl(new).await
    }

    async fn reminder_key_exists(&self, key: &str) -> Result<bool> {
        self.reminder_key_exists_impl(key).await
    }

    async fn get_notification_by_id(&self, id: i64) -> Result<Option<Notification>> {
        self.get_notification_by_id_impl(id).await
    }

    async fn list_notifications(
        &self,
        query: NotificationListQuery,
    ) -> Result<PaginatedResponse<Notification>> {
        self.list_notifications_impl(query).await
    }

    async fn update_notification(
        &self,
        id: i64,
        update: UpdateNotificationRequest,
    ) -> Result<Option<Notification>> {
        self.update_notification_impl(id, update).await
    }

    async fn delete_notification(&self, id: i64) -> Result<bool> {
        self.delete_notification_impl(id).await
    }

    async fn list_due_notifications(&self, now: i64, limit: u64) -> Result<Vec<Notification>> {
        self.list_due_notifications_impl(now, limit).await
    }

    async fn mark_notification_sent(&self, id: i64) -> Result<Option<Notification>> {
        self.mark_notification_sent_impl(id).await
    }

    async fn mark_notification_failed(
        &self,
        id: i64,
        error: &str,
        max_attempts: i32,
    ) -> Result<Option<Notification>> {
        self.mark_notification_failed_impl(id, error, max_attempts).await
    }

    async fn create_template(&self, req: CreateTemplateRequest) -> Result<NotificationTemplate> {
        self.create_template_impl(req).await
    }

    async fn get_template_by_id(&self, id: i64) -> Result<Option<NotificationTemplate>> {
        self.get_template_by_id_impl(id).await
    }

    async fn get_template_by_name(&self, name: &str) -> Result<Option<NotificationTemplate>> {
        self.get_template_by_name_impl(name).await
    }

    async fn list_templates(
        &self,
        query: TemplateListQuery,
    ) -> Result<PaginatedResponse<NotificationTemplate>> {
        self.list_templates_impl(query).await
    }

    async fn update_template(
        &self,
        id: i64,
        update: UpdateTemplateRequest,
    ) -> Result<Option<NotificationTemplate>> {
        self.update_template_impl(id, update).await
    }

    async fn delete_template(&self, id: i64) -> Result<bool> {
        self.delete_template_impl(id).await
    }

    // System settings
    async fn list_all_settings(&self) -> Result<Vec<SystemSetting>> {
        self.list_all_settings_impl().await
    }

    async fn update_setting(
        &self,
        key: &str,
        value: &str,
        user_id: i64,
        ip_address: Option<String>,
    ) -> Result<SystemSetting> {
        self.update_setting_impl(key, value, user_id, ip_address).await
    }

    async fn list_setting_audits(
        &self,
        query: SettingAuditQuery,
    ) -> Result<PaginatedResponse<SettingAudit>> {
        self.list_setting_audits_impl(query).await
    }
}
