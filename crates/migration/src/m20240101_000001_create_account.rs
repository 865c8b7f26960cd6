//! Create `account` table.
//!
//! The unique index on `email` is what keeps one account per address when two
//! registrations race past the duplicate check.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Account::Table)
                    .if_not_exists()
                    .col(uuid(Account::Id).primary_key())
                    .col(string_len(Account::Name, 100).not_null())
                    .col(string_len(Account::Email, 255).unique_key().not_null())
                    .col(string_len(Account::PasswordHash, 255).not_null())
                    .col(timestamp_with_time_zone(Account::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Account::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Account { Table, Id, Name, Email, PasswordHash, CreatedAt }
