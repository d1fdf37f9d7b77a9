use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::instructors::{ActiveModel, Column, Entity as Instructors};
use crate::entity::{course_instructors, courses, instructor_payments};
use crate::errors::Result;
use crate::finance::today;
use crate::models::{
    PaginatedResponse, page_params,
    courses::entities::CourseStatus,
    financials::entities::InstructorPaymentStatus,
    instructors::{
        entities::{EmploymentType, Instructor, InstructorStats, InstructorStatus},
        requests::{CreateInstructorRequest, InstructorListQuery, UpdateInstructorRequest},
    },
};
use crate::utils::escape_like_pattern;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// `req.tax_rate_percentage` must already carry the configured default.
    pub async fn create_instructor_impl(&self, req: CreateInstructorRequest) -> Result<Instructor> {
        let now = now_ts();

        let model = ActiveModel {
            full_name: Set(req.full_name),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            specialization: Set(req.specialization),
            qualifications: Set(req.qualifications),
            years_of_experience: Set(req.years_of_experience.unwrap_or(0)),
            employment_type: Set(req
                .employment_type
                .unwrap_or(EmploymentType::FullTime)
                .to_string()),
            hire_date: Set(req.hire_date.unwrap_or_else(today)),
            status: Set(req.status.unwrap_or(InstructorStatus::Active).to_string()),
            hourly_rate: Set(req.hourly_rate),
            tax_rate_percentage: Set(req.tax_rate_percentage.unwrap_or_default()),
            bank_name: Set(req.bank_name),
            account_number: Set(req.account_number),
            rib: Set(req.rib),
            bio: Set(req.bio),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create instructor"))?;

        Ok(result.into_instructor())
    }

    pub async fn get_instructor_by_id_impl(&self, id: i64) -> Result<Option<Instructor>> {
        let result = Instructors::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load instructor"))?;

        Ok(result.map(|m| m.into_instructor()))
    }

    pub async fn list_instructors_with_pagination_impl(
        &self,
        query: InstructorListQuery,
    ) -> Result<PaginatedResponse<Instructor>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Instructors::find();
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(employment_type) = query.employment_type {
            select = select.filter(Column::EmploymentType.eq(employment_type.to_string()));
        }
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let escaped = escape_like_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::Specialization.contains(&escaped)),
            );
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_asc(Column::FullName),
                page,
                size,
                "Failed to list instructors",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_instructor()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_instructor_impl(
        &self,
        id: i64,
        update: UpdateInstructorRequest,
    ) -> Result<Option<Instructor>> {
        if self.get_instructor_by_id_impl(id).await?.is_none() {
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
        if let Some(v) = update.email {
            model.email = Set(v);
        }
        if let Some(v) = update.phone {
            model.phone = Set(v);
        }
        if let Some(v) = update.address {
            model.address = Set(Some(v));
        }
        if let Some(v) = update.specialization {
            model.specialization = Set(v);
        }
        if let Some(v) = update.qualifications {
            model.qualifications = Set(Some(v));
        }
        if let Some(v) = update.years_of_experience {
            model.years_of_experience = Set(v);
        }
        if let Some(v) = update.employment_type {
            model.employment_type = Set(v.to_string());
        }
        if let Some(v) = update.hire_date {
            model.hire_date = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.hourly_rate {
            model.hourly_rate = Set(v);
        }
        if let Some(v) = update.tax_rate_percentage {
            model.tax_rate_percentage = Set(v);
        }
        if let Some(v) = update.bank_name {
            model.bank_name = Set(Some(v));
        }
        if let Some(v) = update.account_number {
            model.account_number = Set(Some(v));
        }
        if let Some(v) = update.rib {
            model.rib = Set(Some(v));
        }
        if let Some(v) = update.bio {
            model.bio = Set(Some(v));
        }
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update instructor"))?;

        Ok(Some(updated.into_instructor()))
    }

    pub async fn delete_instructor_impl(&self, id: i64) -> Result<bool> {
        let result = Instructors::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete instructor"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn instructor_stats_impl(&self, id: i64) -> Result<InstructorStats> {
        let assignments = course_instructors::Entity::find()
            .filter(course_instructors::Column::InstructorId.eq(id))
            .find_also_related(courses::Entity)
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load instructor assignments"))?;

        let active = CourseStatus::Active.to_string();
        let mut stats = InstructorStats::default();
        for (assignment, course) in assignments {
            stats.total_hours_taught += assignment.hours_taught;
            if course.is_some_and(|c| c.status == active) {
                stats.active_courses_count += 1;
            }
        }

        let paid: Vec<Decimal> = instructor_payments::Entity::find()
            .select_only()
            .column(instructor_payments::Column::NetAmount)
            .filter(instructor_payments::Column::InstructorId.eq(id))
            .filter(instructor_payments::Column::Status.eq(InstructorPaymentStatus::Paid.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load instructor earnings"))?;
        stats.total_earnings = paid.into_iter().sum();

        Ok(stats)
    }
}
