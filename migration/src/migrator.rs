use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m202610180001_create_users::Migration),
            Box::new(migrations::m202610180002_create_courses::Migration),
            Box::new(migrations::m202610180003_create_quizzes::Migration),
            Box::new(migrations::m202610180004_create_tags::Migration),
            Box::new(migrations::m202610180005_create_quiz_tags::Migration),
            Box::new(migrations::m202610180006_create_questions::Migration),
            Box::new(migrations::m202610180007_create_options::Migration),
            Box::new(migrations::m202610180008_create_results::Migration),
            Box::new(migrations::m202610180009_create_responses::Migration),
        ]
    }
}
