use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::course::Entity as CourseEntity;
use db::models::session::Model as SessionModel;
use sea_orm::{DatabaseConnection, EntityTrait};

pub struct SessionSeeder;

#[async_trait::async_trait]
impl Seeder for SessionSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(courses) = CourseEntity::find().all(db).await else {
            return;
        };

        for course in courses {
            // one past (closed) and one current (open) meeting per course
            let yesterday = (Utc::now() - Duration::days(1)).date_naive();
            let _ = SessionModel::create(
                db,
                course.id,
                &format!("{} lecture", course.code),
                yesterday,
                false,
                None,
                None,
            )
            .await;

            let today = Utc::now().date_naive();
            let _ = SessionModel::create(
                db,
                course.id,
                &format!("{} practical", course.code),
                today,
                true,
                None,
                None,
            )
            .await;
        }
    }
}
