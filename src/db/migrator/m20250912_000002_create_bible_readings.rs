use crate::entities::bible_readings;
use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        manager
            .create_table(
                schema
                    .create_table_from_entity(BibleReadings)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        // Listing filters by owner and sorts by date; cover both.
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_bible_readings_user_date")
                    .table(BibleReadings)
                    .col(bible_readings::Column::UserId)
                    .col(bible_readings::Column::DateRead)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BibleReadings).to_owned())
            .await?;

        Ok(())
    }
}
