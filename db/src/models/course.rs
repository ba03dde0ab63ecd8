use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    Set,
};
use serde::Serialize;

/// Represents a taught course in the `courses` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Short catalogue code, e.g. "CS101".
    pub code: String,
    pub description: Option<String>,
    pub max_students: i32,
    /// Owning instructor (foreign key to `users`).
    pub instructor_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::InstructorId",
        to = "super::user::Column::Id"
    )]
    Instructor,
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instructor.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Creates a new course record owned by `instructor_id`.
    pub async fn create(
        db: &DatabaseConnection,
        name: &str,
        code: &str,
        description: Option<&str>,
        max_students: i32,
        instructor_id: i64,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let course = ActiveModel {
            name: Set(name.to_owned()),
            code: Set(code.to_owned()),
            description: Set(description.map(|d| d.to_owned())),
            max_students: Set(max_students),
            instructor_id: Set(instructor_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        course.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// All courses, newest first. Admin view.
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Courses owned by one instructor, newest first.
    pub async fn list_for_instructor(
        db: &DatabaseConnection,
        instructor_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::InstructorId.eq(instructor_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Deletes a course by ID. Sessions and attendances follow via FK cascade.
    /// Returns the number of rows removed (0 when the ID is unknown).
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
