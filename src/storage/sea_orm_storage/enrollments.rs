use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::{attendance, courses, payments, students};
use crate::errors::{CoopError, Result};
use crate::finance::{attendance::AttendanceCounts, today};
use crate::models::{
    PaginatedResponse, page_params,
    enrollments::{
        entities::{Enrollment, EnrollmentDetail, EnrollmentStatus},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
    },
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// Checks seats and duplicates inside one transaction.
    pub async fn create_enrollment_impl(&self, req: CreateEnrollmentRequest) -> Result<Enrollment> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start enrollment"))?;

        if students::Entity::find_by_id(req.student_id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load student"))?
            .is_none()
        {
            return Err(CoopError::not_found(format!(
                "Student {} not found",
                req.student_id
            )));
        }

        let course = courses::Entity::find_by_id(req.course_id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load course"))?
            .ok_or_else(|| CoopError::not_found(format!("Course {} not found", req.course_id)))?;

        let duplicate = Enrollments::find()
            .filter(Column::StudentId.eq(req.student_id))
            .filter(Column::CourseId.eq(req.course_id))
            .one(&txn)
            .await
            .map_err(db_error("Failed to check enrollment"))?;
        if duplicate.is_some() {
            return Err(CoopError::conflict(format!(
                "Student {} is already enrolled in course {}",
                req.student_id, req.course_id
            )));
        }

        ensure_seat(&txn, &course, None).await?;

        let now = now_ts();
        let model = ActiveModel {
            student_id: Set(req.student_id),
            course_id: Set(req.course_id),
            enrollment_date: Set(req.enrollment_date.unwrap_or_else(today)),
            status: Set(req.status.unwrap_or(EnrollmentStatus::Active).to_string()),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(db_error("Failed to create enrollment"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit enrollment"))?;

        Ok(model.into_enrollment())
    }

    pub async fn get_enrollment_by_id_impl(&self, id: i64) -> Result<Option<Enrollment>> {
        let result = Enrollments::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load enrollment"))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// Enrollment with attendance rate and billing position.
    pub async fn get_enrollment_detail_impl(&self, id: i64) -> Result<Option<EnrollmentDetail>> {
        let Some(enrollment) = self.get_enrollment_by_id_impl(id).await? else {
            return Ok(None);
        };

        let student_name = students::Entity::find_by_id(enrollment.student_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?
            .map(|s| s.full_name);
        let course = courses::Entity::find_by_id(enrollment.course_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load course"))?;

        let statuses: Vec<String> = attendance::Entity::find()
            .select_only()
            .column(attendance::Column::Status)
            .filter(attendance::Column::StudentId.eq(enrollment.student_id))
            .filter(attendance::Column::CourseId.eq(enrollment.course_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load attendance"))?;
        let mut counts = AttendanceCounts::default();
        for status in &statuses {
            counts.record(status);
        }

        let paid: Vec<Decimal> = payments::Entity::find()
            .select_only()
            .column(payments::Column::AmountPaid)
            .filter(payments::Column::EnrollmentId.eq(id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load enrollment payments"))?;
        let total_paid: Decimal = paid.into_iter().sum();

        let total_due = course
            .as_ref()
            .map(|c| c.fee_per_month * Decimal::from(c.duration_months))
            .unwrap_or_default();

        Ok(Some(EnrollmentDetail {
            enrollment,
            student_name,
            course_name: course.map(|c| c.course_name),
            attendance_rate: counts.enrollment_rate(),
            total_paid,
            total_due,
            balance: total_due - total_paid,
        }))
    }

    pub async fn list_enrollments_with_pagination_impl(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Enrollments::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select
                    .order_by_desc(Column::EnrollmentDate)
                    .order_by_desc(Column::Id),
                page,
                size,
                "Failed to list enrollments",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_enrollment()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_enrollment_impl(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<Enrollment>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start enrollment update"))?;

        let Some(existing) = Enrollments::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error("Failed to load enrollment"))?
        else {
            return Ok(None);
        };

        let active = EnrollmentStatus::Active.to_string();
        if update.status == Some(EnrollmentStatus::Active) && existing.status != active {
            let course = courses::Entity::find_by_id(existing.course_id)
                .one(&txn)
                .await
                .map_err(db_error("Failed to load course"))?
                .ok_or_else(|| {
                    CoopError::not_found(format!("Course {} not found", existing.course_id))
                })?;
            ensure_seat(&txn, &course, Some(existing.id)).await?;
        }

        let mut model = existing.into_active_model();
        model.updated_at = Set(now_ts());

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
            if status == EnrollmentStatus::Completed && update.completion_date.is_none() {
                model.completion_date = Set(Some(today()));
            }
        }
        if let Some(v) = update.final_grade {
            model.final_grade = Set(Some(v));
        }
        if let Some(v) = update.completion_date {
            model.completion_date = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }

        let updated = model
            .update(&txn)
            .await
            .map_err(db_error("Failed to update enrollment"))?;

        txn.commit()
            .await
            .map_err(db_error("Failed to commit enrollment"))?;

        Ok(Some(updated.into_enrollment()))
    }

    pub async fn delete_enrollment_impl(&self, id: i64) -> Result<bool> {
        let result = Enrollments::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete enrollment"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_active_enrollments_impl(&self) -> Result<u64> {
        Enrollments::find()
            .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count enrollments"))
    }
}

/// Fails when every seat of `course` is taken by another active enrollment.
async fn ensure_seat<C: ConnectionTrait>(
    conn: &C,
    course: &courses::Model,
    excluding: Option<i64>,
) -> Result<()> {
    let mut select = Enrollments::find()
        .filter(Column::CourseId.eq(course.id))
        .filter(Column::Status.eq(EnrollmentStatus::Active.to_string()));
    if let Some(id) = excluding {
        select = select.filter(Column::Id.ne(id));
    }
    let enrolled = select
        .count(conn)
        .await
        .map_err(db_error("Failed to count enrollments"))?;

    if enrolled >= course.max_students.max(0) as u64 {
        return Err(CoopError::capacity_exceeded(format!(
            "Course '{}' is full ({} seats)",
            course.course_name, course.max_students
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::courses::{entities::CourseType, requests::CreateCourseRequest};
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use chrono::NaiveDate;

    fn student(name: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            full_name: name.to_string(),
            date_of_birth: None,
            gender: None,
            email: None,
            phone: None,
            address: None,
            parent_name: "Parent".to_string(),
            parent_phone: "+212600000000".to_string(),
            parent_email: None,
            education_level: None,
            school_name: None,
            registration_date: None,
            status: None,
            medical_notes: None,
            notes: None,
        }
    }

    fn course(max_students: i32) -> CreateCourseRequest {
        CreateCourseRequest {
            course_name: "Physics".to_string(),
            course_type: CourseType::Academic,
            subject: "Physics".to_string(),
            description: None,
            fee_per_month: Decimal::new(25000, 2),
            max_students: Some(max_students),
            duration_months: Some(2),
            schedule_days: vec![],
            schedule_time: None,
            hours_per_session: None,
            classroom: None,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            status: None,
        }
    }

    fn enroll(student_id: i64, course_id: i64) -> CreateEnrollmentRequest {
        CreateEnrollmentRequest {
            student_id,
            course_id,
            enrollment_date: None,
            status: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_capacity_and_duplicates() {
        let storage = memory_storage().await;
        let c = storage.create_course_impl(course(1)).await.unwrap();
        let a = storage.create_student_impl(student("A")).await.unwrap();
        let b = storage.create_student_impl(student("B")).await.unwrap();

        storage
            .create_enrollment_impl(enroll(a.id, c.id))
            .await
            .unwrap();

        let dup = storage.create_enrollment_impl(enroll(a.id, c.id)).await;
        assert!(matches!(dup, Err(CoopError::Conflict(_))));

        let full = storage.create_enrollment_impl(enroll(b.id, c.id)).await;
        assert!(matches!(full, Err(CoopError::CapacityExceeded(_))));

        let missing = storage.create_enrollment_impl(enroll(999, c.id)).await;
        assert!(matches!(missing, Err(CoopError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reactivation_respects_capacity() {
        let storage = memory_storage().await;
        let c = storage.create_course_impl(course(1)).await.unwrap();
        let a = storage.create_student_impl(student("A")).await.unwrap();
        let b = storage.create_student_impl(student("B")).await.unwrap();

        let first = storage
            .create_enrollment_impl(enroll(a.id, c.id))
            .await
            .unwrap();
        let status = |s| UpdateEnrollmentRequest {
            status: Some(s),
            ..Default::default()
        };

        // Re-saving an active enrollment does not count against itself
        storage
            .update_enrollment_impl(first.id, status(EnrollmentStatus::Active))
            .await
            .unwrap()
            .unwrap();

        storage
            .update_enrollment_impl(first.id, status(EnrollmentStatus::Dropped))
            .await
            .unwrap()
            .unwrap();
        storage
            .create_enrollment_impl(enroll(b.id, c.id))
            .await
            .unwrap();

        let back = storage
            .update_enrollment_impl(first.id, status(EnrollmentStatus::Active))
            .await;
        assert!(matches!(back, Err(CoopError::CapacityExceeded(_))));

        let kept = storage.get_enrollment_by_id_impl(first.id).await.unwrap().unwrap();
        assert_eq!(kept.status, EnrollmentStatus::Dropped);
        assert_eq!(storage.count_active_enrollments_impl().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_detail_without_attendance_or_payments() {
        let storage = memory_storage().await;
        let c = storage.create_course_impl(course(5)).await.unwrap();
        let s = storage.create_student_impl(student("A")).await.unwrap();
        let e = storage
            .create_enrollment_impl(enroll(s.id, c.id))
            .await
            .unwrap();

        let detail = storage.get_enrollment_detail_impl(e.id).await.unwrap().unwrap();
        assert_eq!(detail.attendance_rate, None);
        assert_eq!(detail.total_due, Decimal::from(500));
        assert_eq!(detail.balance, Decimal::from(500));
        assert_eq!(detail.course_name.as_deref(), Some("Physics"));
    }
}
