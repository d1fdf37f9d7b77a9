use super::{SeaOrmStorage, db_error, now_ts};
use crate::entity::login_attempts;
use crate::entity::users::{ActiveModel, Column, Entity as Users};
use crate::errors::Result;
use crate::models::{
    PaginatedResponse, page_params,
    users::{
        entities::{User, UserStatus},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, sea_query::Expr,
};

impl SeaOrmStorage {
    /// `req.password` must already be hashed.
    pub async fn create_user_impl(&self, req: CreateUserRequest) -> Result<User> {
        let now = now_ts();

        let model = ActiveModel {
            username: Set(req.username),
            email: Set(req.email),
            password_hash: Set(req.password),
            user_type: Set(req.user_type.to_string()),
            status: Set(UserStatus::Active.to_string()),
            full_name: Set(req.full_name),
            phone: Set(req.phone),
            instructor_id: Set(req.instructor_id),
            member_id: Set(req.member_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(db_error("Failed to create user"))?;

        Ok(result.into_user())
    }

    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_impl(&self, username: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn get_user_by_username_or_email_impl(
        &self,
        identifier: &str,
    ) -> Result<Option<User>> {
        let result = Users::find()
            .filter(
                Condition::any()
                    .add(Column::Username.eq(identifier))
                    .add(Column::Email.eq(identifier)),
            )
            .one(&self.db)
            .await
            .map_err(db_error("Failed to load user"))?;

        Ok(result.map(|m| m.into_user()))
    }

    pub async fn list_users_with_pagination_impl(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        let (page, size) = page_params(query.page, query.size);

        let mut select = Users::find();

        if let Some(search) = query.search.as_deref().map(str::trim)
            && !search.is_empty()
        {
            let escaped = escape_like_pattern(search);
            select = select.filter(
                Condition::any()
                    .add(Column::Username.contains(&escaped))
                    .add(Column::Email.contains(&escaped))
                    .add(Column::FullName.contains(&escaped)),
            );
        }
        if let Some(user_type) = query.user_type {
            select = select.filter(Column::UserType.eq(user_type.to_string()));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let (rows, total, pages) = self
            .fetch_page(
                select.order_by_desc(Column::CreatedAt),
                page,
                size,
                "Failed to list users",
            )
            .await?;

        Ok(PaginatedResponse::new(
            rows.into_iter().map(|m| m.into_user()).collect(),
            page,
            size,
            total,
            pages,
        ))
    }

    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let result = Users::update_many()
            .col_expr(Column::LastLogin, Expr::value(now_ts()))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to update last login"))?;

        Ok(result.rows_affected > 0)
    }

    /// `update.password`, when present, must already be hashed.
    pub async fn update_user_impl(
        &self,
        id: i64,
        update: UpdateUserRequest,
    ) -> Result<Option<User>> {
        if self.get_user_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(now_ts()),
            ..Default::default()
        };

        if let Some(email) = update.email {
            model.email = Set(email);
        }
        if let Some(password) = update.password {
            model.password_hash = Set(password);
        }
        if let Some(user_type) = update.user_type {
            model.user_type = Set(user_type.to_string());
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(full_name) = update.full_name {
            model.full_name = Set(Some(full_name));
        }
        if let Some(phone) = update.phone {
            model.phone = Set(Some(phone));
        }
        if let Some(instructor_id) = update.instructor_id {
            model.instructor_id = Set(Some(instructor_id));
        }
        if let Some(member_id) = update.member_id {
            model.member_id = Set(Some(member_id));
        }

        model
            .update(&self.db)
            .await
            .map_err(db_error("Failed to update user"))?;

        self.get_user_by_id_impl(id).await
    }

    pub async fn delete_user_impl(&self, id: i64) -> Result<bool> {
        let result = Users::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error("Failed to delete user"))?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count_users_impl(&self) -> Result<u64> {
        Users::find()
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count users"))
    }

    pub async fn record_login_attempt_impl(
        &self,
        identifier: &str,
        ip_address: Option<String>,
        success: bool,
    ) -> Result<()> {
        login_attempts::ActiveModel {
            identifier: Set(identifier.to_lowercase()),
            ip_address: Set(ip_address),
            success: Set(success),
            attempted_at: Set(now_ts()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(db_error("Failed to record login attempt"))?;

        Ok(())
    }

    /// Failed attempts for `identifier` at or after `since` (Unix seconds).
    pub async fn count_failed_logins_since_impl(&self, identifier: &str, since: i64) -> Result<u64> {
        login_attempts::Entity::find()
            .filter(login_attempts::Column::Identifier.eq(identifier.to_lowercase()))
            .filter(login_attempts::Column::Success.eq(false))
            .filter(login_attempts::Column::AttemptedAt.gte(since))
            .count(&self.db)
            .await
            .map_err(db_error("Failed to count login attempts"))
    }
}
