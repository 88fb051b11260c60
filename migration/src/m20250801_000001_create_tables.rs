use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学院表
        manager
            .create_table(
                Table::create()
                    .table(Colleges::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Colleges::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Colleges::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建院系表
        manager
            .create_table(
                Table::create()
                    .table(Faculties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Faculties::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Faculties::CollegeId).big_integer().not_null())
                    .col(ColumnDef::new(Faculties::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Faculties::Table, Faculties::CollegeId)
                            .to(Colleges::Table, Colleges::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建课程表
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
                    .col(ColumnDef::new(Courses::FacultyId).big_integer().not_null())
                    .col(ColumnDef::new(Courses::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Courses::Table, Courses::FacultyId)
                            .to(Faculties::Table, Faculties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建班级表
        manager
            .create_table(
                Table::create()
                    .table(Classes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Classes::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Classes::CourseId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::FacultyId).big_integer().not_null())
                    .col(ColumnDef::new(Classes::Name).string().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Classes::Table, Classes::FacultyId)
                            .to(Faculties::Table, Faculties::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建用户表
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
                    .col(ColumnDef::new(Users::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Users::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Users::Role).string().not_null())
                    .col(ColumnDef::new(Users::CollegeId).big_integer().null())
                    .col(ColumnDef::new(Users::FacultyId).big_integer().null())
                    .col(ColumnDef::new(Users::CourseId).big_integer().null())
                    .col(ColumnDef::new(Users::ClassId).big_integer().null())
                    .col(ColumnDef::new(Users::Prn).string().null())
                    .col(ColumnDef::new(Users::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建作业表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::ClassId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(
                        ColumnDef::new(Assignments::DueDate)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Assignments::Table, Assignments::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建提交表，(assignment_id, student_id) 唯一：每对只保留一条当前提交
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Submissions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Submissions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::FileToken).string().not_null())
                    .col(ColumnDef::new(Submissions::FileName).string().not_null())
                    .col(ColumnDef::new(Submissions::Status).string().not_null())
                    .col(ColumnDef::new(Submissions::Marks).integer().null())
                    .col(ColumnDef::new(Submissions::Feedback).text().null())
                    .col(
                        ColumnDef::new(Submissions::SubmittedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Submissions::Table, Submissions::StudentId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_submissions_assignment_student")
                    .table(Submissions::Table)
                    .col(Submissions::AssignmentId)
                    .col(Submissions::StudentId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 创建评语表
        manager
            .create_table(
                Table::create()
                    .table(Remarks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Remarks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Remarks::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Remarks::TeacherId).big_integer().not_null())
                    .col(ColumnDef::new(Remarks::Message).text().not_null())
                    .col(
                        ColumnDef::new(Remarks::ResubmissionRequired)
                            .boolean()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Remarks::ResubmissionDeadline)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Remarks::CreatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Remarks::Table, Remarks::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Remarks::Table, Remarks::TeacherId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建聊天群组表，每个作业一个群组
        manager
            .create_table(
                Table::create()
                    .table(ChatGroups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatGroups::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChatGroups::AssignmentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(ChatGroups::ExpiresAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChatGroups::Table, ChatGroups::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建聊天消息表
        manager
            .create_table(
                Table::create()
                    .table(ChatMessages::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ChatMessages::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ChatMessages::GroupId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ChatMessages::UserId).big_integer().null())
                    .col(ColumnDef::new(ChatMessages::Content).text().not_null())
                    .col(ColumnDef::new(ChatMessages::SentAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ChatMessages::Table, ChatMessages::GroupId)
                            .to(ChatGroups::Table, ChatGroups::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_chat_messages_group_sent")
                    .table(ChatMessages::Table)
                    .col(ChatMessages::GroupId)
                    .col(ChatMessages::SentAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ChatMessages::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ChatGroups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Remarks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Submissions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Classes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faculties::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Colleges::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Colleges {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Faculties {
    Table,
    Id,
    CollegeId,
    Name,
}

#[derive(DeriveIden)]
enum Courses {
    Table,
    Id,
    FacultyId,
    Name,
}

#[derive(DeriveIden)]
enum Classes {
    Table,
    Id,
    CourseId,
    FacultyId,
    Name,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    FullName,
    Email,
    PasswordHash,
    Role,
    CollegeId,
    FacultyId,
    CourseId,
    ClassId,
    Prn,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Assignments {
    Table,
    Id,
    ClassId,
    TeacherId,
    Title,
    Description,
    DueDate,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    AssignmentId,
    StudentId,
    FileToken,
    FileName,
    Status,
    Marks,
    Feedback,
    SubmittedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Remarks {
    Table,
    Id,
    SubmissionId,
    TeacherId,
    Message,
    ResubmissionRequired,
    ResubmissionDeadline,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ChatGroups {
    Table,
    Id,
    AssignmentId,
    ExpiresAt,
}

#[derive(DeriveIden)]
enum ChatMessages {
    Table,
    Id,
    GroupId,
    UserId,
    Content,
    SentAt,
}
