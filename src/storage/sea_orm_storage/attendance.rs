use std::collections::BTreeMap;

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::attendance::{ActiveModel, Column, Entity as AttendanceRecords, Model};
use crate::entity::{attendance_summaries, enrollments};
use crate::errors::Result;
use crate::finance::{Period, attendance::AttendanceCounts};
use crate::models::{
    PaginatedResponse, page_params,
    attendance::{
        entities::{Attendance, AttendanceInput, AttendanceSummary},
        requests::{AttendanceListQuery, AttendanceSummaryQuery, UpdateAttendanceRequest},
    },
    enrollments::entities::EnrollmentStatus,
};
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// The student's active enrollment in the course, if any.
    async fn active_enrollment_id<C: ConnectionTrait>(
        conn: &C,
        student_id: i64,
        course_id: i64,
    ) -> Result<Option<i64>> {
        let enrollment = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .one(conn)
            .await
            .map_err(db_error("Failed to look up enrollment"))?;

        Ok(enrollment.map(|e| e.id))
    }

    async fn find_for_day(
        &self,
        student_id: i64,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Option<Model>> {
        AttendanceRecords::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.eq(date))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attendance"))
    }

    /// Inserts a record; the (student, course, date) key must be free.
    pub async fn create_attendance_impl(&self, input: AttendanceInput) -> Result<Attendance> {
        let enrollment_id = match input.enrollment_id {
            Some(id) => Some(id),
            None => Self::active_enrollment_id(&self.db, input.student_id, input.course_id).await?,
        };

        let now = now_ts();
        let model = ActiveModel {
            student_id: Set(input.student_id),
            course_id: Set(input.course_id),
            enrollment_id: Set(enrollment_id),
            date: Set(input.date),
            status: Set(input.status.to_string()),
            check_in_time: Set(input.check_in_time),
            check_out_time: Set(input.check_out_time),
            notes: Set(input.notes),
            recorded_by: Set(input.recorded_by),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to record attendance"))?;

        Ok(model.into_attendance())
    }

    /// Inserts or overwrites the record for (student, course, date).
    /// Returns the record and whether it was newly created.
    pub async fn upsert_attendance_impl(&self, input: AttendanceInput) -> Result<(Attendance, bool)> {
        let Some(existing) = self
            .find_for_day(input.student_id, input.course_id, input.date)
            .await?
        else {
            return Ok((self.create_attendance_impl(input).await?, true));
        };

        let mut model = existing.into_active_model();
        model.status = Set(input.status.to_string());
        model.check_in_time = Set(input.check_in_time);
        model.check_out_time = Set(input.check_out_time);
        model.notes = Set(input.notes);
        model.recorded_by = Set(input.recorded_by);
        if let Some(enrollment_id) = input.enrollment_id {
            model.enrollment_id = Set(Some(enrollment_id));
        }
        model.updated_at = Set(now_ts());

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update attendance"))?;

        Ok((updated.into_attendance(), false))
    }

    pub async fn get_attendance_by_id_impl(&self, id: i64) -> Result<Option<Attendance>> {
        let result = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attendance"))?;

        Ok(result.map(|m| m.into_attendance()))
    }

    pub async fn list_attendance_with_pagination_impl(
        &self,
        query: AttendanceListQuery,
    ) -> Result<PaginatedResponse<Attendance>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = AttendanceRecords::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(date) = query.date {
            select = select.filter(Column::Date.eq(date));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(Column::Date).order_by_asc(Column::StudentId),
                page,
                size,
                "Failed to list attendance",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_attendance()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn list_attendance_by_course_date_impl(
        &self,
        course_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<Attendance>> {
        let rows = AttendanceRecords::find()
            .filter(Column::CourseId.eq(course_id))
            .filter(Column::Date.eq(date))
            .order_by_asc(Column::StudentId)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list attendance"))?;

        Ok(rows.into_iter().map(|m| m.into_attendance()).collect())
    }

    pub async fn update_attendance_impl(
        &self,
        id: i64,
        update: UpdateAttendanceRequest,
    ) -> Result<Option<Attendance>> {
        let Some(existing) = AttendanceRecords::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load attendance"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(now_ts());
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.check_in_time {
            model.check_in_time = Set(Some(v));
        }
        if let Some(v) = update.check_out_time {
            model.check_out_time = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update attendance"))?;

        Ok(Some(updated.into_attendance()))
    }

    pub async fn delete_attendance_impl(&self, id: i64) -> Result<bool> {
        let result = AttendanceRecords::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete attendance"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn list_attendance_summaries_impl(
        &self,
        query: AttendanceSummaryQuery,
    ) -> Result<PaginatedResponse<AttendanceSummary>> {
        use attendance_summaries::Column as S;

        let (page, size) = page_params(query.page, query.size);

        let mut select = attendance_summaries::Entity::find();
        if let Some(student_id) = query.student_id {
            select = select.filter(S::StudentId.eq(student_id));
        }
        if let Some(course_id) = query.course_id {
            select = select.filter(S::CourseId.eq(course_id));
        }
        if let Some(month) = query.month {
            select = select.filter(S::Month.eq(Period::containing(month).first_day()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select
                    .order_by_desc(S::Month)
                    .order_by_asc(S::StudentId)
                    .order_by_asc(S::CourseId),
                page,
                size,
                "Failed to list attendance summaries",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_summary()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// Rebuilds the month's summaries from raw records, optionally narrowed
    /// to one student and/or course. Summaries left without records are
    /// removed.
    pub async fn recalculate_attendance_summaries_impl(
        &self,
        period: Period,
        student_id: Option<i64>,
        course_id: Option<i64>,
    ) -> Result<Vec<AttendanceSummary>> {
        use attendance_summaries::Column as S;

        let txn = self
            .db
            .begin()
            .await
            .map_err(db_error("Failed to start summary recalculation"))?;

        let mut records = AttendanceRecords::find()
            .filter(Column::Date.gte(period.first_day()))
            .filter(Column::Date.lte(period.last_day()));
        let mut stale = attendance_summaries::Entity::delete_many()
            .filter(S::Month.eq(period.first_day()));
        if let Some(id) = student_id {
            records = records.filter(Column::StudentId.eq(id));
            stale = stale.filter(S::StudentId.eq(id));
        }
        if let Some(id) = course_id {
            records = records.filter(Column::CourseId.eq(id));
            stale = stale.filter(S::CourseId.eq(id));
        }

        let rows = records
            .all(&txn)
            .await
            .map_err(db_error("Failed to load attendance"))?;

        let mut grouped: BTreeMap<(i64, i64), AttendanceCounts> = BTreeMap::new();
        for row in &rows {
            grouped
                .entry((row.student_id, row.course_id))
                .or_default()
                .record(&row.status);
        }

        stale
            .exec(&txn)
            .await
            .map_err(db_error("Failed to clear attendance summaries"))?;

        let now = now_ts();
        let mut summaries = Vec::with_capacity(grouped.len());
        for ((student_id, course_id), counts) in grouped {
            let model = attendance_summaries::ActiveModel {
                student_id: Set(student_id),
                course_id: Set(course_id),
                month: Set(period.first_day()),
                total_sessions: Set(counts.total()),
                present_count: Set(counts.present),
                absent_count: Set(counts.absent),
                late_count: Set(counts.late),
                excused_count: Set(counts.excused),
                attendance_rate: Set(counts.summary_rate()),
                updated_at: Set(now),
                ..Default::default()
            }
            .insert(&txn)
            .await
            .map_err(db_error("Failed to store attendance summary"))?;
            summaries.push(model.into_summary());
        }

        txn.commit()
            .await
            .map_err(db_error("Failed to commit attendance summaries"))?;

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::attendance::entities::AttendanceStatus;
    use crate::models::courses::{entities::CourseType, requests::CreateCourseRequest};
    use crate::models::students::requests::CreateStudentRequest;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use rust_decimal::Decimal;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    async fn seed(storage: &SeaOrmStorage) -> (i64, i64) {
        let student = storage
            .create_student_impl(CreateStudentRequest {
                full_name: "Salma".into(),
                date_of_birth: None,
                gender: None,
                email: None,
                phone: None,
                address: None,
                parent_name: "Parent".into(),
                parent_phone: "+212600000001".into(),
                parent_email: None,
                education_level: None,
                school_name: None,
                registration_date: None,
                status: None,
                medical_notes: None,
                notes: None,
            })
            .await
            .unwrap();
        let course = storage
            .create_course_impl(CreateCourseRequest {
                course_name: "English".into(),
                course_type: CourseType::Language,
                subject: "English".into(),
                description: None,
                fee_per_month: Decimal::from(200),
                max_students: None,
                duration_months: None,
                schedule_days: vec![],
                schedule_time: None,
                hours_per_session: None,
                classroom: None,
                start_date: day(1),
                end_date: day(31),
                status: None,
            })
            .await
            .unwrap();
        (student.id, course.id)
    }

    fn input(student_id: i64, course_id: i64, d: u32, status: AttendanceStatus) -> AttendanceInput {
        AttendanceInput {
            student_id,
            course_id,
            enrollment_id: None,
            date: day(d),
            status,
            check_in_time: None,
            check_out_time: None,
            notes: None,
            recorded_by: None,
        }
    }

    #[tokio::test]
    async fn test_upsert_overwrites_same_day() {
        let storage = memory_storage().await;
        let (s, c) = seed(&storage).await;

        let (first, created) = storage
            .upsert_attendance_impl(input(s, c, 3, AttendanceStatus::Absent))
            .await
            .unwrap();
        assert!(created);

        let (second, created) = storage
            .upsert_attendance_impl(input(s, c, 3, AttendanceStatus::Late))
            .await
            .unwrap();
        assert!(!created);
        assert_eq!(first.id, second.id);
        assert_eq!(second.status, AttendanceStatus::Late);
    }

    #[tokio::test]
    async fn test_recalculate_counts_late_as_attended() {
        let storage = memory_storage().await;
        let (s, c) = seed(&storage).await;

        for (d, status) in [
            (3, AttendanceStatus::Present),
            (5, AttendanceStatus::Late),
            (10, AttendanceStatus::Absent),
            (12, AttendanceStatus::Present),
        ] {
            storage
                .create_attendance_impl(input(s, c, d, status))
                .await
                .unwrap();
        }

        let period = Period::containing(day(1));
        let summaries = storage
            .recalculate_attendance_summaries_impl(period, None, None)
            .await
            .unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_sessions, 4);
        assert_eq!(summaries[0].attendance_rate, Decimal::from(75));

        // Running again replaces rather than duplicates
        let again = storage
            .recalculate_attendance_summaries_impl(period, Some(s), None)
            .await
            .unwrap();
        assert_eq!(again.len(), 1);
        let listed = storage
            .list_attendance_summaries_impl(AttendanceSummaryQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 1);
    }
}
