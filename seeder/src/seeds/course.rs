use crate::seed::Seeder;
use db::models::course::Model as CourseModel;
use db::models::user::Model as UserModel;
use sea_orm::DatabaseConnection;

pub struct CourseSeeder;

#[async_trait::async_trait]
impl Seeder for CourseSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(Some(grace)) = UserModel::get_by_username(db, "grace").await else {
            return;
        };

        let _ = CourseModel::create(
            db,
            "Compiler Construction",
            "CS445",
            Some("Lexing to code generation in one semester"),
            80,
            grace.id,
        )
        .await;

        let _ = CourseModel::create(
            db,
            "Programming Fundamentals",
            "CS101",
            None,
            250,
            grace.id,
        )
        .await;
    }
}
