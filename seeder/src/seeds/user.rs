use crate::seed::Seeder;
use db::models::user::{Model, Role};
use fake::{Fake, faker::name::en::Name};
use sea_orm::DatabaseConnection;

pub struct UserSeeder;

#[async_trait::async_trait]
impl Seeder for UserSeeder {
    async fn seed(&self, db: &DatabaseConnection) {
        // Fixed admin
        let _ = Model::create(
            db,
            "admin",
            "password123",
            Role::Admin,
            "Site Admin",
            Some("admin@example.edu"),
        )
        .await;

        // Fixed instructor used by the other seeders
        let _ = Model::create(
            db,
            "grace",
            "password123",
            Role::Instructor,
            "Grace Hopper",
            Some("grace@example.edu"),
        )
        .await;

        // Random instructors
        for i in 0..3 {
            let full_name: String = Name().fake();
            let username = format!("instructor{:02}", i + 1);
            let _ = Model::create(db, &username, "password123", Role::Instructor, &full_name, None)
                .await;
        }
    }
}
