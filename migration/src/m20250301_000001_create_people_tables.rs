use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Accounts
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::UserType).string().not_null())
                    .col(ColumnDef::new(Users::Status).string().not_null())
                    .col(ColumnDef::new(Users::FullName).string().null())
                    .col(ColumnDef::new(Users::Phone).string().null())
                    .col(ColumnDef::new(Users::InstructorId).big_integer().null())
                    .col(ColumnDef::new(Users::MemberId).big_integer().null())
                    .col(ColumnDef::new(Users::LastLogin).big_integer().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Login attempts (lockout window)
        manager
            .create_table(
                Table::create()
                    .table(LoginAttempts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LoginAttempts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LoginAttempts::Identifier)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LoginAttempts::IpAddress).string().null())
                    .col(ColumnDef::new(LoginAttempts::Success).boolean().not_null())
                    .col(
                        ColumnDef::new(LoginAttempts::AttemptedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Students
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Students::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Students::FullName).string().not_null())
                    .col(ColumnDef::new(Students::DateOfBirth).date().null())
                    .col(ColumnDef::new(Students::Gender).string_len(1).null())
                    .col(ColumnDef::new(Students::Email).string().null())
                    .col(ColumnDef::new(Students::Phone).string().null())
                    .col(ColumnDef::new(Students::Address).text().null())
                    .col(ColumnDef::new(Students::ParentName).string().not_null())
                    .col(ColumnDef::new(Students::ParentPhone).string().not_null())
                    .col(ColumnDef::new(Students::ParentEmail).string().null())
                    .col(
                        ColumnDef::new(Students::EducationLevel)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::SchoolName).string().null())
                    .col(
                        ColumnDef::new(Students::RegistrationDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Students::Status).string().not_null())
                    .col(ColumnDef::new(Students::MedicalNotes).text().null())
                    .col(ColumnDef::new(Students::Notes).text().null())
                    .col(ColumnDef::new(Students::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Students::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Instructors
        manager
            .create_table(
                Table::create()
                    .table(Instructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Instructors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Instructors::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Instructors::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Instructors::Phone).string().not_null())
                    .col(ColumnDef::new(Instructors::Address).text().null())
                    .col(
                        ColumnDef::new(Instructors::Specialization)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Instructors::Qualifications).text().null())
                    .col(
                        ColumnDef::new(Instructors::YearsOfExperience)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Instructors::EmploymentType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Instructors::HireDate).date().not_null())
                    .col(ColumnDef::new(Instructors::Status).string().not_null())
                    .col(
                        ColumnDef::new(Instructors::HourlyRate)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Instructors::TaxRatePercentage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Instructors::BankName).string().null())
                    .col(ColumnDef::new(Instructors::AccountNumber).string().null())
                    .col(ColumnDef::new(Instructors::Rib).string().null())
                    .col(ColumnDef::new(Instructors::Bio).text().null())
                    .col(ColumnDef::new(Instructors::Notes).text().null())
                    .col(
                        ColumnDef::new(Instructors::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Instructors::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Cooperative members
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Members::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Members::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Members::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Members::Phone).string().not_null())
                    .col(ColumnDef::new(Members::Address).text().null())
                    .col(
                        ColumnDef::new(Members::MembershipNumber)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Members::JoinDate).date().not_null())
                    .col(ColumnDef::new(Members::Status).string().not_null())
                    .col(
                        ColumnDef::new(Members::EmploymentStatus)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Members::EmployerName).string().null())
                    .col(
                        ColumnDef::new(Members::SharePercentage)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Members::BankName).string().null())
                    .col(ColumnDef::new(Members::AccountNumber).string().null())
                    .col(ColumnDef::new(Members::Rib).string().null())
                    .col(ColumnDef::new(Members::Notes).text().null())
                    .col(ColumnDef::new(Members::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Members::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Indexes
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_users_user_type")
                    .table(Users::Table)
                    .col(Users::UserType)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_login_attempts_identifier_time")
                    .table(LoginAttempts::Table)
                    .col(LoginAttempts::Identifier)
                    .col(LoginAttempts::AttemptedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_status")
                    .table(Students::Table)
                    .col(Students::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_parent_phone")
                    .table(Students::Table)
                    .col(Students::ParentPhone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_instructors_status")
                    .table(Instructors::Table)
                    .col(Instructors::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_members_status")
                    .table(Members::Table)
                    .col(Members::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Members::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Instructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LoginAttempts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    #[sea_orm(iden = "users")]
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    UserType,
    Status,
    FullName,
    Phone,
    InstructorId,
    MemberId,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum LoginAttempts {
    #[sea_orm(iden = "login_attempts")]
    Table,
    Id,
    Identifier,
    IpAddress,
    Success,
    AttemptedAt,
}

#[derive(DeriveIden)]
enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    FullName,
    DateOfBirth,
    Gender,
    Email,
    Phone,
    Address,
    ParentName,
    ParentPhone,
    ParentEmail,
    EducationLevel,
    SchoolName,
    RegistrationDate,
    Status,
    MedicalNotes,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Instructors {
    #[sea_orm(iden = "instructors")]
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Address,
    Specialization,
    Qualifications,
    YearsOfExperience,
    EmploymentType,
    HireDate,
    Status,
    HourlyRate,
    TaxRatePercentage,
    BankName,
    AccountNumber,
    Rib,
    Bio,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Members {
    #[sea_orm(iden = "members")]
    Table,
    Id,
    FullName,
    Email,
    Phone,
    Address,
    MembershipNumber,
    JoinDate,
    Status,
    EmploymentStatus,
    EmployerName,
    SharePercentage,
    BankName,
    AccountNumber,
    Rib,
    Notes,
    CreatedAt,
    UpdatedAt,
}
