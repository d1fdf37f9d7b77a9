use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Outgoing notifications
        manager
            .create_table(
                Table::create()
                    .table(Notifications::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notifications::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Channel).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::RecipientType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::RecipientContact)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Notifications::Subject).string().null())
                    .col(ColumnDef::new(Notifications::Message).text().not_null())
                    .col(ColumnDef::new(Notifications::Status).string().not_null())
                    .col(
                        ColumnDef::new(Notifications::ScheduledTime)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Notifications::SentTime).big_integer().null())
                    .col(
                        ColumnDef::new(Notifications::DeliveryAttempts)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Notifications::ErrorMessage).text().null())
                    .col(
                        ColumnDef::new(Notifications::RelatedPaymentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::ReminderKey)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Notifications::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Notifications::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Notifications::Table, Notifications::RelatedPaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Message templates
        manager
            .create_table(
                Table::create()
                    .table(NotificationTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(NotificationTemplates::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::NotificationType)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::Channel)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::Subject)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(NotificationTemplates::Body).text().not_null())
                    .col(
                        ColumnDef::new(NotificationTemplates::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(NotificationTemplates::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_status_scheduled")
                    .table(Notifications::Table)
                    .col(Notifications::Status)
                    .col(Notifications::ScheduledTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_notifications_recipient")
                    .table(Notifications::Table)
                    .col(Notifications::RecipientType)
                    .col(Notifications::RecipientId)
                    .to_owned(),
            )
            .await?;

        // Built-in reminder templates used by the reminder job
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();

        let default_templates = [
            (
                "payment_reminder_sms",
                "payment_reminder",
                "sms",
                "Payment reminder",
                "Dear {parent_name}, the payment of {amount} {currency} for {student_name} is due on {due_date}. {cooperative_name}",
            ),
            (
                "payment_overdue_sms",
                "payment_overdue",
                "sms",
                "Payment overdue",
                "Dear {parent_name}, the payment of {balance} {currency} for {student_name} is {days_overdue} day(s) overdue (due {due_date}). {cooperative_name}",
            ),
        ];

        for (name, kind, channel, subject, body) in default_templates {
            let insert = Query::insert()
                .into_table(NotificationTemplates::Table)
                .columns([
                    NotificationTemplates::Name,
                    NotificationTemplates::NotificationType,
                    NotificationTemplates::Channel,
                    NotificationTemplates::Subject,
                    NotificationTemplates::Body,
                    NotificationTemplates::IsActive,
                    NotificationTemplates::CreatedAt,
                    NotificationTemplates::UpdatedAt,
                ])
                .values_panic([
                    name.into(),
                    kind.into(),
                    channel.into(),
                    subject.into(),
                    body.into(),
                    true.into(),
                    now.into(),
                    now.into(),
                ])
                .to_owned();

            manager.exec_stmt(insert).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(NotificationTemplates::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Notifications::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Notifications {
    #[sea_orm(iden = "notifications")]
    Table,
    Id,
    NotificationType,
    Channel,
    RecipientType,
    RecipientId,
    RecipientContact,
    Subject,
    Message,
    Status,
    ScheduledTime,
    SentTime,
    DeliveryAttempts,
    ErrorMessage,
    RelatedPaymentId,
    ReminderKey,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum NotificationTemplates {
    #[sea_orm(iden = "notification_templates")]
    Table,
    Id,
    Name,
    NotificationType,
    Channel,
    Subject,
    Body,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
