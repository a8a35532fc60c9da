pub mod models;
pub mod test_utils;

use common::config::AppConfig;
use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Iterable,
    PrimaryKeyToColumn, QueryOrder,
};
use std::path::Path;

/// Connects to the database named by `DATABASE_PATH`.
///
/// A value that is already a DSN is used as-is; anything else is treated as a
/// SQLite file path, created on first use.
pub async fn connect() -> Result<DatabaseConnection, DbErr> {
    let (url, file) = {
        let config = AppConfig::global();
        (config.database_url(), config.sqlite_file().map(str::to_owned))
    };

    // SQLite won't create intermediate dirs.
    if let Some(parent) = file.as_deref().and_then(|f| Path::new(f).parent()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| DbErr::Custom(format!("cannot create {}: {}", parent.display(), e)))?;
    }

    log::debug!("connecting to {}", url);
    Database::connect(&url).await
}

/// Every row of `E`, ordered by primary key.
pub async fn query_all<E, C>(db: &C) -> Result<Vec<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    let mut select = E::find();
    for key in E::PrimaryKey::iter() {
        select = select.order_by_asc(key.into_column());
    }
    select.all(db).await
}

#[cfg(test)]
mod tests {
    use super::query_all;
    use crate::models::tag::{self, NewTag};
    use crate::test_utils::setup_test_db;

    #[tokio::test]
    async fn query_all_returns_rows_in_insertion_order() {
        let db = setup_test_db().await;

        for name in ["rust", "sql", "async"] {
            NewTag { name: name.to_string() }.insert(&db).await.unwrap();
        }

        let tags = query_all::<tag::Entity, _>(&db).await.unwrap();
        let names: Vec<_> = tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["rust", "sql", "async"]);
        assert!(tags.windows(2).all(|w| w[0].id < w[1].id));
    }
}
