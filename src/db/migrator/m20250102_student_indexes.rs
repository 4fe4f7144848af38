use crate::entities::{prelude::*, students};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const GENDER_INDEX: &str = "idx_students_gender";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Exact-match filter and the two gender buckets both hit this column.
        manager
            .create_index(
                Index::create()
                    .name(GENDER_INDEX)
                    .table(Students)
                    .col(students::Column::Gender)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(GENDER_INDEX).table(Students).to_owned())
            .await
    }
}
