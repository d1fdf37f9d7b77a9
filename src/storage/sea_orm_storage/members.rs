use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::member_distributions;
use crate::entity::members::{ActiveModel, Column, Entity as Members};
use crate::errors::Result;
use crate::finance::today;
use crate::models::{
    PaginatedResponse, page_params,
    financials::entities::DistributionStatus,
    members::{
        entities::{Member, MemberStatus},
        requests::{CreateMemberRequest, MemberListQuery, UpdateMemberRequest},
    },
};
use crate::utils::escape_like_pattern;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    Set,
};

impl SeaOrmStorage {
    /// `req.membership_number` must already be assigned.
    pub async fn create_member_impl(&self, req: CreateMemberRequest) -> Result<Member> {
        let now = now_ts();

        let model = ActiveModel {
            full_name: Set(req.full_name),
            email: Set(req.email),
            phone: Set(req.phone),
            address: Set(req.address),
            membership_number: Set(req.membership_number.unwrap_or_default()),
            join_date: Set(req.join_date.unwrap_or_else(today)),
            status: Set(req.status.unwrap_or(MemberStatus::Active).to_string()),
            employment_status: Set(req.employment_status.to_string()),
            employer_name: Set(req.employer_name),
            share_percentage: Set(req.share_percentage),
            bank_name: Set(req.bank_name),
            account_number: Set(req.account_number),
            rib: Set(req.rib),
            notes: Set(req.notes),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create member"))?;

        Ok(result.into_member())
    }

    pub async fn get_member_by_id_impl(&self, id: i64) -> Result<Option<Member>> {
        let result = Members::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load member"))?;

        Ok(result.map(|m| m.into_member()))
    }

    pub async fn list_members_with_pagination_impl(
        &self,
        query: MemberListQuery,
    ) -> Result<PaginatedResponse<Member>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Members::find();
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(employment_status) = query.employment_status {
            select = select.filter(Column::EmploymentStatus.eq(employment_status.to_string()));
        }
        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let escaped = escape_like_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::FullName.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::MembershipNumber.contains(&escaped)),
            );
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_asc(Column::FullName),
                page,
                size,
                "Failed to list members",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_member()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_member_impl(
        &self,
        id: i64,
        update: UpdateMemberRequest,
    ) -> Result<Option<Member>> {
        if self.get_member_by_id_impl(id).await?.is_none() {
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
        if let Some(v) = update.join_date {
            model.join_date = Set(v);
        }
        if let Some(v) = update.status {
            model.status = Set(v.to_string());
        }
        if let Some(v) = update.employment_status {
            model.employment_status = Set(v.to_string());
        }
        if let Some(v) = update.employer_name {
            model.employer_name = Set(Some(v));
        }
        if let Some(v) = update.share_percentage {
            model.share_percentage = Set(v);
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
        if let Some(v) = update.notes {
            model.notes = Set(Some(v));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update member"))?;

        Ok(Some(updated.into_member()))
    }

    pub async fn delete_member_impl(&self, id: i64) -> Result<bool> {
        let result = Members::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete member"))?;

        Ok(result.rows_affected > 0)
    }

    /// Sum of paid distributions.
    pub async fn member_distributions_total_impl(&self, member_id: i64) -> Result<Decimal> {
        let amounts: Vec<Decimal> = member_distributions::Entity::find()
            .select_only()
            .column(member_distributions::Column::Amount)
            .filter(member_distributions::Column::MemberId.eq(member_id))
            .filter(member_distributions::Column::Status.eq(DistributionStatus::Paid.to_string()))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_error("Failed to load member distributions"))?;

        Ok(amounts.into_iter().sum())
    }
}
