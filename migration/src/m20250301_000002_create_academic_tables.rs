use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Courses
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::CourseName).string().not_null())
                    .col(ColumnDef::new(Courses::CourseType).string().not_null())
                    .col(ColumnDef::new(Courses::Subject).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(
                        ColumnDef::new(Courses::FeePerMonth)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Courses::MaxStudents)
                            .integer()
                            .not_null()
                            .default(20),
                    )
                    .col(
                        ColumnDef::new(Courses::DurationMonths)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(ColumnDef::new(Courses::ScheduleDays).text().not_null())
                    .col(ColumnDef::new(Courses::ScheduleTime).time().null())
                    .col(
                        ColumnDef::new(Courses::HoursPerSession)
                            .decimal_len(4, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Courses::Classroom).string().null())
                    .col(ColumnDef::new(Courses::StartDate).date().not_null())
                    .col(ColumnDef::new(Courses::EndDate).date().not_null())
                    .col(ColumnDef::new(Courses::Status).string().not_null())
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Instructor assignments, one row per (course, instructor)
        manager
            .create_table(
                Table::create()
                    .table(CourseInstructors::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseInstructors::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CourseInstructors::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseInstructors::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseInstructors::IsPrimary)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(CourseInstructors::HoursTaught)
                            .decimal_len(8, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseInstructors::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseInstructors::Table, CourseInstructors::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseInstructors::Table, CourseInstructors::InstructorId)
                            .to(Instructors::Table, Instructors::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Enrollments
        manager
            .create_table(
                Table::create()
                    .table(Enrollments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Enrollments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::EnrollmentDate)
                            .date()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Enrollments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Enrollments::FinalGrade)
                            .decimal_len(5, 2)
                            .null(),
                    )
                    .col(ColumnDef::new(Enrollments::CompletionDate).date().null())
                    .col(ColumnDef::new(Enrollments::Notes).text().null())
                    .col(
                        ColumnDef::new(Enrollments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Enrollments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Enrollments::Table, Enrollments::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Attendance records
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Attendance::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Attendance::StudentId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::EnrollmentId).big_integer().null())
                    .col(ColumnDef::new(Attendance::Date).date().not_null())
                    .col(ColumnDef::new(Attendance::Status).string().not_null())
                    .col(ColumnDef::new(Attendance::CheckInTime).time().null())
                    .col(ColumnDef::new(Attendance::CheckOutTime).time().null())
                    .col(ColumnDef::new(Attendance::Notes).text().null())
                    .col(ColumnDef::new(Attendance::RecordedBy).big_integer().null())
                    .col(ColumnDef::new(Attendance::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Attendance::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Attendance::Table, Attendance::EnrollmentId)
                            .to(Enrollments::Table, Enrollments::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Monthly attendance summaries
        manager
            .create_table(
                Table::create()
                    .table(AttendanceSummaries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AttendanceSummaries::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(AttendanceSummaries::Month).date().not_null())
                    .col(
                        ColumnDef::new(AttendanceSummaries::TotalSessions)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::PresentCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::AbsentCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::LateCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::ExcusedCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::AttendanceRate)
                            .decimal_len(5, 2)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AttendanceSummaries::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSummaries::Table, AttendanceSummaries::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(AttendanceSummaries::Table, AttendanceSummaries::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Uniqueness constraints
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_course_instructors_course_instructor")
                    .table(CourseInstructors::Table)
                    .col(CourseInstructors::CourseId)
                    .col(CourseInstructors::InstructorId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_enrollments_student_course")
                    .table(Enrollments::Table)
                    .col(Enrollments::StudentId)
                    .col(Enrollments::CourseId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_student_course_date")
                    .table(Attendance::Table)
                    .col(Attendance::StudentId)
                    .col(Attendance::CourseId)
                    .col(Attendance::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("uq_attendance_summaries_student_course_month")
                    .table(AttendanceSummaries::Table)
                    .col(AttendanceSummaries::StudentId)
                    .col(AttendanceSummaries::CourseId)
                    .col(AttendanceSummaries::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Lookup indexes
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_status")
                    .table(Courses::Table)
                    .col(Courses::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_course_status")
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .col(Enrollments::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_attendance_course_date")
                    .table(Attendance::Table)
                    .col(Attendance::CourseId)
                    .col(Attendance::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AttendanceSummaries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Enrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseInstructors::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
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
enum Instructors {
    #[sea_orm(iden = "instructors")]
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    CourseName,
    CourseType,
    Subject,
    Description,
    FeePerMonth,
    MaxStudents,
    DurationMonths,
    ScheduleDays,
    ScheduleTime,
    HoursPerSession,
    Classroom,
    StartDate,
    EndDate,
    Status,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum CourseInstructors {
    #[sea_orm(iden = "course_instructors")]
    Table,
    Id,
    CourseId,
    InstructorId,
    IsPrimary,
    HoursTaught,
    AssignedAt,
}

#[derive(DeriveIden)]
enum Enrollments {
    #[sea_orm(iden = "enrollments")]
    Table,
    Id,
    StudentId,
    CourseId,
    EnrollmentDate,
    Status,
    FinalGrade,
    CompletionDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Attendance {
    #[sea_orm(iden = "attendance")]
    Table,
    Id,
    StudentId,
    CourseId,
    EnrollmentId,
    Date,
    Status,
    CheckInTime,
    CheckOutTime,
    Notes,
    RecordedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum AttendanceSummaries {
    #[sea_orm(iden = "attendance_summaries")]
    Table,
    Id,
    StudentId,
    CourseId,
    Month,
    TotalSessions,
    PresentCount,
    AbsentCount,
    LateCount,
    ExcusedCount,
    AttendanceRate,
    UpdatedAt,
}
