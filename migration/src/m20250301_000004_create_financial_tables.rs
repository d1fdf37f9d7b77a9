use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Instructor payroll, one row per instructor and month
        manager
            .create_table(
                Table::create()
                    .table(InstructorPayments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(InstructorPayments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::PeriodMonth)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::TotalHours)
                            .decimal_len(8, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::HourlyRate)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::GrossAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::TaxRate)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::TaxAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::NetAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::PaymentDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::PaymentMethod)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::PaymentReference)
                            .string()
                            .null(),
                    )
                    .col(ColumnDef::new(InstructorPayments::Notes).text().null())
                    .col(
                        ColumnDef::new(InstructorPayments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(InstructorPayments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(InstructorPayments::Table, InstructorPayments::InstructorId)
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Monthly profit and loss
        manager
            .create_table(
                Table::create()
                    .table(MonthlyFinancials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MonthlyFinancials::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::PeriodMonth)
                            .date()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::TotalRevenue)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::InstructorPayments)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::OperationalExpenses)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::OtherExpenses)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::TotalExpenses)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::GrossProfit)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::RetainedEarningsPercentage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::RetainedEarnings)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::DistributableProfit)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::IsFinalized)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::FinalizedDate)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(MonthlyFinancials::Notes).text().null())
                    .col(
                        ColumnDef::new(MonthlyFinancials::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MonthlyFinancials::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Profit shares per member and month
        manager
            .create_table(
                Table::create()
                    .table(MemberDistributions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MemberDistributions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::MemberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::MonthlyFinancialId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::SharePercentage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::Status)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::IsPublicEmployee)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::PaymentDate)
                            .date()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::PaymentReference)
                            .string()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MemberDistributions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(MemberDistributions::Table, MemberDistributions::MemberId)
                            .to(Members::Table, Members::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(
                                MemberDistributions::Table,
                                MemberDistributions::MonthlyFinancialId,
                            )
                            .to(MonthlyFinancials::Table, MonthlyFinancials::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Operating expenses
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Expenses::Category).string().not_null())
                    .col(ColumnDef::new(Expenses::Description).string().not_null())
                    .col(
                        ColumnDef::new(Expenses::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::ExpenseDate).date().not_null())
                    .col(ColumnDef::new(Expenses::PeriodMonth).date().not_null())
                    .col(ColumnDef::new(Expenses::Status).string().not_null())
                    .col(ColumnDef::new(Expenses::Vendor).string().null())
                    .col(ColumnDef::new(Expenses::ReceiptNumber).string().null())
                    .col(ColumnDef::new(Expenses::ApprovedBy).big_integer().null())
                    .col(ColumnDef::new(Expenses::Notes).text().null())
                    .col(ColumnDef::new(Expenses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Expenses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Budgets per month and category
        manager
            .create_table(
                Table::create()
                    .table(BudgetAllocations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BudgetAllocations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BudgetAllocations::PeriodMonth)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetAllocations::Category)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetAllocations::AllocatedAmount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BudgetAllocations::Notes).text().null())
                    .col(
                        ColumnDef::new(BudgetAllocations::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BudgetAllocations::UpdatedAt)
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
                    .name("uq_instructor_payments_instructor_period")
                    .table(InstructorPayments::Table)
                    .col(InstructorPayments::InstructorId)
                    .col(InstructorPayments::PeriodMonth)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_member_distributions_member_financial")
                    .table(MemberDistributions::Table)
                    .col(MemberDistributions::MemberId)
                    .col(MemberDistributions::MonthlyFinancialId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_budget_allocations_period_category")
                    .table(BudgetAllocations::Table)
                    .col(BudgetAllocations::PeriodMonth)
                    .col(BudgetAllocations::Category)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_expenses_period_status")
                    .table(Expenses::Table)
                    .col(Expenses::PeriodMonth)
                    .col(Expenses::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BudgetAllocations::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MemberDistributions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MonthlyFinancials::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(InstructorPayments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Instructors {
    #[sea_orm(iden = "instructors")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Members {
    #[sea_orm(iden = "members")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum InstructorPayments {
    #[sea_orm(iden = "instructor_payments")]
    Table,
    Id,
    InstructorId,
    PeriodMonth,
    TotalHours,
    HourlyRate,
    GrossAmount,
    TaxRate,
    TaxAmount,
    NetAmount,
    Status,
    PaymentDate,
    PaymentMethod,
    PaymentReference,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MonthlyFinancials {
    #[sea_orm(iden = "monthly_financials")]
    Table,
    Id,
    PeriodMonth,
    TotalRevenue,
    InstructorPayments,
    OperationalExpenses,
    OtherExpenses,
    TotalExpenses,
    GrossProfit,
    RetainedEarningsPercentage,
    RetainedEarnings,
    DistributableProfit,
    IsFinalized,
    FinalizedDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum MemberDistributions {
    #[sea_orm(iden = "member_distributions")]
    Table,
    Id,
    MemberId,
    MonthlyFinancialId,
    SharePercentage,
    Amount,
    Status,
    IsPublicEmployee,
    PaymentDate,
    PaymentReference,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    #[sea_orm(iden = "expenses")]
    Table,
    Id,
    Category,
    Description,
    Amount,
    ExpenseDate,
    PeriodMonth,
    Status,
    Vendor,
    ReceiptNumber,
    ApprovedBy,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BudgetAllocations {
    #[sea_orm(iden = "budget_allocations")]
    Table,
    Id,
    PeriodMonth,
    Category,
    AllocatedAmount,
    Notes,
    CreatedAt,
    UpdatedAt,
}
