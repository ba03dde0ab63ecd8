use crate::seed::Seeder;
use chrono::{Duration, Utc};
use db::models::attendance::Model as AttendanceModel;
use db::models::course::Entity as CourseEntity;
use db::models::session::{Column as SessionCol, Entity as SessionEntity};
use fake::{
    Fake,
    faker::name::en::{FirstName, LastName},
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

pub struct AttendanceSeeder;

#[async_trait::async_trait]
impl Seeder for AttendanceSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        let Ok(courses) = CourseEntity::find().all(db).await else {
            return;
        };

        for course in courses {
            let Ok(sessions) = SessionEntity::find()
                .filter(SessionCol::CourseId.eq(course.id))
                .all(db)
                .await
            else {
                continue;
            };

            for session in sessions {
                // check_in refuses inactive sessions, so seed against an
                // opened copy and restore the flag afterwards.
                let was_active = session.active;
                let session = if was_active {
                    session
                } else {
                    match session.set_active(db, true).await {
                        Ok(s) => s,
                        Err(_) => continue,
                    }
                };

                let start = Utc::now() - Duration::hours(2);
                for i in 0..8u32 {
                    let name: String = FirstName().fake();
                    let surname: String = LastName().fake();
                    let student_id = format!("u{:08}", fastrand::u32(..100_000_000));
                    let checked_in = start + Duration::minutes(i as i64);

                    let row = AttendanceModel::check_in(
                        db,
                        &session,
                        &course.name,
                        &name,
                        &surname,
                        Some(&student_id),
                        Some("198.51.100.23"),
                        Some("seeder"),
                        checked_in,
                    )
                    .await;

                    // roughly half the class also checks out
                    if row.is_ok() && i % 2 == 0 {
                        let _ = AttendanceModel::check_out(
                            db,
                            &session,
                            &name,
                            &surname,
                            checked_in + Duration::minutes(45),
                        )
                        .await;
                    }
                }

                if !was_active {
                    let _ = session.set_active(db, false).await;
                }
            }
        }
    }
}
