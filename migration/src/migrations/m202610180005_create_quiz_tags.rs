use sea_orm_migration::prelude::*;

pub struct Migration;

impl MigrationName for Migration {
    fn name(&self) -> &str {
        "m202610180005_create_quiz_tags"
    }
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Alias::new("quiz_tags"))
                    .if_not_exists()
                    .col(ColumnDef::new(Alias::new("quiz_id")).integer().not_null())
                    .col(ColumnDef::new(Alias::new("tag_id")).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(Alias::new("quiz_id"))
                            .col(Alias::new("tag_id")),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_tags_quiz")
                            .from(Alias::new("quiz_tags"), Alias::new("quiz_id"))
                            .to(Alias::new("quizzes"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_quiz_tags_tag")
                            .from(Alias::new("quiz_tags"), Alias::new("tag_id"))
                            .to(Alias::new("tags"), Alias::new("id"))
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Alias::new("quiz_tags")).to_owned())
            .await
    }
}
