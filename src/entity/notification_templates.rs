//! Message templates

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "notification_templates")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub name: String,
    pub notification_type: String,
    pub channel: String,
    pub subject: Option<String>,
    pub body: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_template(self) -> crate::models::notifications::entities::NotificationTemplate {
        use crate::models::notifications::entities::{
            NotificationChannel, NotificationTemplate, NotificationType,
        };

        NotificationTemplate {
            id: self.id,
            name: self.name,
            notification_type: self
                .notification_type
                .parse::<NotificationType>()
                .unwrap_or(NotificationType::General),
            channel: self
                .channel
                .parse::<NotificationChannel>()
                .unwrap_or(NotificationChannel::Sms),
            subject: self.subject,
            body: self.body,
            is_active: self.is_active,
            created_at: super::ts_to_datetime(self.created_at),
            updated_at: super::ts_to_datetime(self.updated_at),
        }
    }
}
