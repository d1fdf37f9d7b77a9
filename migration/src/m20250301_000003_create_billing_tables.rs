use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Payment plans come first so installments can reference them
        manager
            .create_table(
                Table::create()
                    .table(PaymentPlans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PaymentPlans::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PaymentPlans::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentPlans::EnrollmentId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(PaymentPlans::TotalAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentPlans::InstallmentAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentPlans::NumberOfInstallments)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PaymentPlans::StartDate).date().not_null())
                    .col(ColumnDef::new(PaymentPlans::Status).string().not_null())
                    .col(ColumnDef::new(PaymentPlans::Notes).text().null())
                    .col(
                        ColumnDef::new(PaymentPlans::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PaymentPlans::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PaymentPlans::Table, PaymentPlans::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(PaymentPlans::Table, PaymentPlans::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Student payments
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Payments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Payments::EnrollmentId).big_integer().null())
                    .col(ColumnDef::new(Payments::PaymentPlanId).big_integer().null())
                    .col(
                        ColumnDef::new(Payments::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Payments::AmountPaid)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Payments::PaymentMethod).string().not_null())
                    .col(ColumnDef::new(Payments::DueDate).date().not_null())
                    .col(ColumnDef::new(Payments::PaymentDate).date().null())
                    .col(ColumnDef::new(Payments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Payments::ReceiptNumber)
                            .string()
                            .null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Payments::TransactionReference)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(Payments::Notes).text().null())
                    .col(ColumnDef::new(Payments::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Payments::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Payments::Table, Payments::PaymentPlanId)
                            .to(PaymentPlans::Table, PaymentPlans::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Invoices
        manager
            .create_table(
                Table::create()
                    .table(Invoices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Invoices::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Invoices::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::EnrollmentId).big_integer().null())
                    .col(
                        ColumnDef::new(Invoices::InvoiceNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::InvoiceDate).date().not_null())
                    .col(ColumnDef::new(Invoices::DueDate).date().not_null())
                    .col(
                        ColumnDef::new(Invoices::Subtotal)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Invoices::Discount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::Tax).decimal_len(12, 2).not_null())
                    .col(
                        ColumnDef::new(Invoices::Total)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Invoices::Status).string().not_null())
                    .col(
                        ColumnDef::new(Invoices::PaymentId)
                            .big_integer()
                            .null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Invoices::PdfPath).string().null())
                    .col(ColumnDef::new(Invoices::Notes).text().null())
                    .col(ColumnDef::new(Invoices::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Invoices::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Invoices::Table, Invoices::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Invoices::Table, Invoices::PaymentId)
                            .to(Payments::Table, Payments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_status_due_date")
                    .table(Payments::Table)
                    .col(Payments::Status)
                    .col(Payments::DueDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_student_id")
                    .table(Payments::Table)
                    .col(Payments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_payment_date")
                    .table(Payments::Table)
                    .col(Payments::PaymentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_invoices_student_id")
                    .table(Invoices::Table)
                    .col(Invoices::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Invoices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentPlans::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum PaymentPlans {
    #[sea_orm(iden = "payment_plans")]
    Table,
    Id,
    StudentId,
    EnrollmentId,
    TotalAmount,
    InstallmentAmount,
    NumberOfInstallments,
    StartDate,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    StudentId,
    EnrollmentId,
    PaymentPlanId,
    Amount,
    AmountPaid,
    PaymentMethod,
    DueDate,
    PaymentDate,
    Status,
    ReceiptNumber,
    TransactionReference,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Invoices {
    #[sea_orm(iden = "invoices")]
    Table,
    Id,
    StudentId,
    EnrollmentId,
    InvoiceNumber,
    InvoiceDate,
    DueDate,
    Subtotal,
    Discount,
    Tax,
    Total,
    Status,
    PaymentId,
    PdfPath,
    Notes,
    CreatedAt,
    UpdatedAt,
}
