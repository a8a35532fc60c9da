use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait, QueryFilter, QueryOrder};
use serde::Serialize;

/// Link row of the quiz/tag many-to-many relation (`quiz_tags`).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "quiz_tags")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub quiz_id: i64,
    #[sea_orm(primary_key, auto_increment = false)]
    pub tag_id: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::quiz::Entity",
        from = "Column::QuizId",
        to = "super::quiz::Column::Id",
        on_delete = "Cascade"
    )]
    Quiz,

    #[sea_orm(
        belongs_to = "super::tag::Entity",
        from = "Column::TagId",
        to = "super::tag::Column::Id",
        on_delete = "Cascade"
    )]
    Tag,
}

impl Related<super::quiz::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Quiz.def()
    }
}

impl Related<super::tag::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tag.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Bulk inserts `(quiz_id, tag_id)` link rows, returning how many were written.
///
/// An empty batch is a no-op. A repeated pair violates the composite key and
/// fails the whole batch.
pub async fn link_all<C, I>(db: &C, pairs: I) -> Result<u64, DbErr>
where
    C: ConnectionTrait,
    I: IntoIterator<Item = (i64, i64)>,
{
    let rows: Vec<ActiveModel> = pairs
        .into_iter()
        .map(|(quiz_id, tag_id)| ActiveModel {
            quiz_id: Set(quiz_id),
            tag_id: Set(tag_id),
        })
        .collect();

    if rows.is_empty() {
        return Ok(0);
    }

    Entity::insert_many(rows).exec_without_returning(db).await
}

/// Links of a single quiz, ordered by tag.
pub async fn for_quiz<C: ConnectionTrait>(db: &C, quiz_id: i64) -> Result<Vec<Model>, DbErr> {
    Entity::find()
        .filter(Column::QuizId.eq(quiz_id))
        .order_by_asc(Column::TagId)
        .all(db)
        .await
}
