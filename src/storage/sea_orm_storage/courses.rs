use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::courses::{ActiveModel, Column, Entity as Courses};
use crate::entity::{course_instructors, enrollments, instructors, students};
use crate::errors::Result;
use crate::finance::today;
use crate::models::{
    PaginatedResponse, page_params,
    courses::{
        entities::{Course, CourseDetail, CourseInstructor, CourseStatus, encode_schedule_days},
        requests::{
            AssignInstructorRequest, CourseListQuery, CreateCourseRequest, UpdateAssignmentRequest,
            UpdateCourseRequest,
        },
    },
    enrollments::entities::EnrollmentStatus,
    students::entities::Student,
};
use crate::utils::escape_like_pattern;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, sea_query::Expr,
};

const DEFAULT_MAX_STUDENTS: i32 = 20;
const DEFAULT_DURATION_MONTHS: i32 = 1;

fn default_hours_per_session() -> Decimal {
    Decimal::new(15, 1)
}

impl SeaOrmStorage {
    pub async fn create_course_impl(&self, req: CreateCourseRequest) -> Result<Course> {
        let now = now_ts();

        let model = ActiveModel {
            course_name: Set(req.course_name),
            course_type: Set(req.course_type.to_string()),
            subject: Set(req.subject),
            description: Set(req.description),
            fee_per_month: Set(req.fee_per_month),
            max_students: Set(req.max_students.unwrap_or(DEFAULT_MAX_STUDENTS)),
            duration_months: Set(req.duration_months.unwrap_or(DEFAULT_DURATION_MONTHS)),
            schedule_days: Set(encode_schedule_days(&req.schedule_days)),
            schedule_time: Set(req.schedule_time),
            hours_per_session: Set(req
                .hours_per_session
                .unwrap_or_else(default_hours_per_session)),
            classroom: Set(req.classroom),
            start_date: Set(req.start_date),
            end_date: Set(req.end_date),
            status: Set(req.status.unwrap_or(CourseStatus::Pending).to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create course"))?;

        Ok(result.into_course())
    }

    pub async fn get_course_by_id_impl(&self, id: i64) -> Result<Option<Course>> {
        let result = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load course"))?;

        Ok(result.map(|m| m.into_course()))
    }

    /// Active enrollments in the course.
    pub async fn course_enrolled_count_impl(&self, course_id: i64) -> Result<i64> {
        let count = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count enrollments"))?;

        Ok(count as i64)
    }

    pub async fn get_course_detail_impl(&self, id: i64) -> Result<Option<CourseDetail>> {
        let Some(course) = self.get_course_by_id_impl(id).await? else {
            return Ok(None);
        };
        let enrolled = self.course_enrolled_count_impl(id).await?;
        Ok(Some(course.with_enrollment(enrolled)))
    }

    pub async fn list_courses_with_pagination_impl(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<CourseDetail>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Courses::find();
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(course_type) = query.course_type {
            select = select.filter(Column::CourseType.eq(course_type.to_string()));
        }
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let escaped = escape_like_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::CourseName.contains(&escaped))
                    .add(Column::Subject.contains(&escaped)),
            );
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(Column::StartDate).order_by_asc(Column::CourseName),
                page,
                size,
                "Failed to list courses",
            )
            .await?;

        let ids: Vec<i64> = rows.iter().map(|c| c.id).collect();
        let course_ids: Vec<i64> = enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::CourseId)
            .filter(enrollments::Column::CourseId.is_in(ids))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to count enrollments"))?;

        let mut counts: HashMap<i64, i64> = HashMap::new();
        for id in course_ids {
            *counts.entry(id).or_insert(0) += 1;
        }

        let items = rows
            .into_iter()
            .map(|m| {
                let enrolled = counts.get(&m.id).copied().unwrap_or(0);
                m.into_course().with_enrollment(enrolled)
            })
            .collect();

        Ok(PaginatedResponse::new(items, page, size, total, pages))
    }

    pub async fn update_course_impl(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<Course>> {
        let Some(existing) = Courses::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load course"))?
        else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        model.updated_at = Set(now_ts());

        if let Some(v) = update.course_name {
            model.course_name = Set(v);
        }
        if let Some(v) = update.course_type {
            model.course_type = Set(v.to_string());
        }
        if let Some(v) = update.subject {
            model.subject = Set(v);
        }
        if let Some(v) = update.description {
            model.description = Set(Some(v));
        }
        if let Some(v) = update.fee_per_month {
            model.fee_per_month = Set(v);
        }
        if let Some(v) = update.max_students {
            model.max_students = Set(v);
        }
        if let Some(v) = update.duration_months {
            model.duration_months = Set(v);
        }
        if let Some(v) = update.schedule_days {
            model.schedule_days = Set(encode_schedule_days(&v));
        }
        if let Some(v) = update.schedule_time {
            model.schedule_time = Set(Some(v));
        }
        if let Some(v) = update.hours_per_session {
            model.hours_per_session = Set(v);
        }
        if let Some(v) = update.classroom {
            model.classroom = Set(Some(v));
        }
        if let Some(v) = update.start_date {
            model.start_date = Set(v);
        }
        if let Some(v) = update.end_date {
            model.end_date = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update course"))?;

        Ok(Some(updated.into_course()))
    }

    pub async fn delete_course_impl(&self, id: i64) -> Result<bool> {
        let result = Courses::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete course"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_courses_impl(&self) -> Result<u64> {
        Courses::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count courses"))
    }

    /// Students holding an active enrollment in the course.
    pub async fn list_course_students_impl(&self, course_id: i64) -> Result<Vec<Student>> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(course_id))
            .filter(enrollments::Column::Status.eq(EnrollmentStatus::Active.to_string()))
            .find_also_related(students::Entity)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list course students"))?;

        let today = today();
        let mut students: Vec<Student> = rows
            .into_iter()
            .filter_map(|(_, student)| student.map(|s| s.into_student(today)))
            .collect();
        students.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(students)
    }

    pub async fn list_course_instructors_impl(
        &self,
        course_id: i64,
    ) -> Result<Vec<CourseInstructor>> {
        let rows = course_instructors::Entity::find()
            .filter(course_instructors::Column::CourseId.eq(course_id))
            .order_by_desc(course_instructors::Column::IsPrimary)
            .order_by_asc(course_instructors::Column::AssignedAt)
            .find_also_related(instructors::Entity)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list course instructors"))?;

        Ok(rows
            .into_iter()
            .map(|(a, i)| a.into_assignment(i.map(|i| i.full_name)))
            .collect())
    }

    async fn get_assignment(
        &self,
        course_id: i64,
        instructor_id: i64,
    ) -> Result<Option<course_instructors::Model>> {
        course_instructors::Entity::find()
            .filter(course_instructors::Column::CourseId.eq(course_id))
            .filter(course_instructors::Column::InstructorId.eq(instructor_id))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load course assignment"))
    }

    /// A course has at most one primary instructor.
    async fn clear_primary(&self, course_id: i64, except_instructor: i64) -> Result<()> {
        course_instructors::Entity::update_many()
            .col_expr(course_instructors::Column::IsPrimary, Expr::value(false))
            .filter(course_instructors::Column::CourseId.eq(course_id))
            .filter(course_instructors::Column::InstructorId.ne(except_instructor))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to update course assignments"))?;
        Ok(())
    }

    pub async fn assign_instructor_impl(
        &self,
        course_id: i64,
        req: AssignInstructorRequest,
    ) -> Result<CourseInstructor> {
        let instructor_name = instructors::Entity::find_by_id(req.instructor_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load instructor"))?
            .map(|i| i.full_name);

        let model = course_instructors::ActiveModel {
            course_id: Set(course_id),
            instructor_id: Set(req.instructor_id),
            is_primary: Set(req.is_primary),
            hours_taught: Set(req.hours_taught.unwrap_or_default()),
            assigned_at: Set(now_ts()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to assign instructor"))?;

        if model.is_primary {
            self.clear_primary(course_id, model.instructor_id).await?;
        }

        Ok(model.into_assignment(instructor_name))
    }

    pub async fn update_assignment_impl(
        &self,
        course_id: i64,
        instructor_id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<CourseInstructor>> {
        let Some(existing) = self.get_assignment(course_id, instructor_id).await? else {
            return Ok(None);
        };

        let mut model = existing.into_active_model();
        if let Some(v) = update.is_primary {
            model.is_primary = Set(v);
        }
        if let Some(v) = update.hours_taught {
            model.hours_taught = Set(v);
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update course assignment"))?;

        if updated.is_primary {
            self.clear_primary(course_id, instructor_id).await?;
        }

        let name = instructors::Entity::find_by_id(instructor_id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load instructor"))?
            .map(|i| i.full_name);

        Ok(Some(updated.into_assignment(name)))
    }

    pub async fn remove_assignment_impl(&self, course_id: i64, instructor_id: i64) -> Result<bool> {
        let result = course_instructors::Entity::delete_many()
            .filter(course_instructors::Column::CourseId.eq(course_id))
            .filter(course_instructors::Column::InstructorId.eq(instructor_id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to remove course assignment"))?;

        Ok(result.rows_affected > 0)
    }
}
