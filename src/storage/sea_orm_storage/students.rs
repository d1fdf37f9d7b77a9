use std::collections::HashMap;

use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::errors::Result;
use crate::finance::today;
use crate::models::{
    PaginatedResponse, page_params,
    students::{
        entities::{EducationLevel, Student, StudentStatus},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentStatistics,
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Set,
};

fn filtered(query: &StudentListQuery) -> Select<Students> {
    let mut select = Students::find();

    if let Some(status) = query.status {
        select = select.filter(Column::Status.eq(status.to_string()));
    }
    if let Some(level) = query.education_level {
        select = select.filter(Column::EducationLevel.eq(level.to_string()));
    }
    if let Some(gender) = query.gender {
        select = select.filter(Column::Gender.eq(gender.to_string()));
    }
    if let Some(search) = query.search.as_deref().map(str::trim)
        && !search.is_empty()
    {
        let escaped = escape_like_pattern(search);
        select = select.filter(
            Condition::any()
                .add(Column::FullName.contains(&escaped))
                .add(Column::ParentName.contains(&escaped))
                .add(Column::Email.contains(&escaped))
                .add(Column::ParentEmail.contains(&escaped)),
        );
    }

    select
        .order_by_desc(Column::RegistrationDate)
        .order_by_asc(Column::FullName)
}

impl SeaOrmStorage {
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = now_ts();
        let today = today();

        let model = ActiveModel {
            full_name: Set(req.full_name),
            date_of_birth: Set(req.date_of_birth),
            gender: Set(req.gender.map(|g| g.to_string())),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            parent_name: Set(req.parent_name),
            parent_phone: Set(req.parent_phone),
            parent_email: Set(req.parent_email),
            education_level: Set(req
                .education_level
                .unwrap_or(EducationLevel::Other)
                .to_string()),
            school_name: Set(req.school_name),
            registration_date: Set(req.registration_date.unwrap_or(today)),
            status: Set(req.status.unwrap_or(StudentStatus::Active).to_string()),
            medical_notes: Set(req.medical_notes),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create student"))?;

        Ok(result.into_student(today))
    }

    pub async fn get_student_by_id_impl(&self, id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?;

        Ok(result.map(|m| m.into_student(today())))
    }

    /// Duplicate detection for imports.
    pub async fn find_student_by_name_and_parent_phone_impl(
        &self,
        full_name: &str,
        parent_phone: &str,
    ) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::FullName.eq(full_name))
            .filter(Column::ParentPhone.eq(parent_phone))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to look up student"))?;

        Ok(result.map(|m| m.into_student(today())))
    }

    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        let (page, size) = page_params(query.page, query.size);
        let (rows, total, pages) = self
            .fetch_page(filtered(&query), page, size, "Failed to list students")
            .await?;

        let today = today();
        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_student(today)).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    /// Every matching student, unpaginated (exports).
    pub async fn list_all_students_impl(&self, query: StudentListQuery) -> Result<Vec<Student>> {
        let rows = filtered(&query)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to list students"))?;

        let today = today();
        Ok(rows.into_iter().map(|m| m.into_student(today)).collect())
    }

    pub async fn update_student_impl(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        if Students::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load student"))?
            .is_none()
        {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };

        if let Some(v) = update.full_name {
            model.full_name = Set(v);
        }
        if let Some(v) = update.date_of_birth {
            model.date_of_birth = Set(Some(v));
        }
        if let Some(v) = update.gender {
            model.gender = Set(Some(v.to_string()));
        }
        if let Some(v) = update.email {
            model.email = Set(Some(v));
        }
        if let Some(v) = update.phone {
            model.phone = Set(Some(v));
        }
        if let Some(v) = update.address {
            model.address = Set(Some(v));
        }
        if let Some(v) = update.parent_name {
            model.parent_name = Set(v);
        }
        if let Some(v) = update.parent_phone {
            model.parent_phone = Set(v);
        }
        if let Some(v) = update.parent_email {
            model.parent_email = Set(Some(v));
        }
        if let Some(v) = update.education_level {
            model.education_level = Set(v.to_string());
        }
        if let Some(v) = update.school_name {
            model.school_name = Set(Some(v));
        }
        if let Some(v) = update.registration_date {
            model.registration_date = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.medical_notes {
            model.medical_notes = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update student"))?;

        Ok(Some(updated.into_student(today())))
    }

    pub async fn delete_student_impl(&self, id: i64) -> Result<bool> {
        let result = Students::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete student"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_students_impl(&self, status: Option<StudentStatus>) -> Result<u64> {
        let mut select = Students::find();
        if let Some(status) = status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        select
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count students"))
    }

    pub async fn student_statistics_impl(&self) -> Result<StudentStatistics> {
        let total = self.count_students_impl(None).await? as i64;
        let active = self.count_students_impl(Some(StudentStatus::Active)).await? as i64;

        // Grouped in memory so the same code runs on every backend
        let rows: Vec<(String, Option<String>)> = Students::find()
            .select_only()
            .column(Column::EducationLevel)
            .column(Column::Gender)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load student statistics"))?;

        let mut by_education_level = HashMap::new();
        let mut by_gender = HashMap::new();
        for (level, gender) in rows {
            *by_education_level.entry(level).or_insert(0) += 1;
            *by_gender
                .entry(gender.unwrap_or_else(|| "unspecified".to_string()))
                .or_insert(0) += 1;
        }

        Ok(StudentStatistics {
            total,
            active,
            by_education_level,
            by_gender,
        })
    }
}
