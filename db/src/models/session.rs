use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set,
};
use serde::Serialize;

/// A scheduled class meeting for which attendance is collected
/// (distinct from an HTTP session).
///
/// Each row carries two independent unguessable tokens: students scan the
/// entry token to check in and the exit token to check out.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub course_id: i64,
    pub name: String,
    pub session_date: NaiveDate,
    pub active: bool,
    pub entry_token: String,
    pub exit_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::attendance::Entity")]
    Attendances,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl Related<super::attendance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attendances.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 32 random bytes from the OS CSPRNG, hex-encoded (64 URL-safe chars).
fn generate_token() -> String {
    use rand::RngCore;
    let mut buf = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    hex::encode(buf)
}

impl Model {
    /// Creates a session for a course with freshly generated entry/exit tokens.
    ///
    /// Explicit tokens may be supplied for deterministic tests.
    pub async fn create(
        db: &DatabaseConnection,
        course_id: i64,
        name: &str,
        session_date: NaiveDate,
        active: bool,
        entry_token: Option<&str>,
        exit_token: Option<&str>,
    ) -> Result<Self, DbErr> {
        let now = Utc::now();
        let session = ActiveModel {
            course_id: Set(course_id),
            name: Set(name.to_owned()),
            session_date: Set(session_date),
            active: Set(active),
            entry_token: Set(entry_token.map(|t| t.to_owned()).unwrap_or_else(generate_token)),
            exit_token: Set(exit_token.map(|t| t.to_owned()).unwrap_or_else(generate_token)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        session.insert(db).await
    }

    pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> Result<Option<Self>, DbErr> {
        Entity::find_by_id(id).one(db).await
    }

    /// Resolves an entry token. `/attend/{token}` and `/attend/entry/{token}`
    /// both go through here.
    pub async fn find_by_entry_token(
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::EntryToken.eq(token))
            .one(db)
            .await
    }

    /// Resolves an exit token for `/attend/exit/{token}`.
    pub async fn find_by_exit_token(
        db: &DatabaseConnection,
        token: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::ExitToken.eq(token))
            .one(db)
            .await
    }

    /// Sessions of a course, newest first.
    pub async fn list_for_course(
        db: &DatabaseConnection,
        course_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::CourseId.eq(course_id))
            .order_by_desc(Column::CreatedAt)
            .all(db)
            .await
    }

    /// Flips the active flag; an inactive session rejects new submissions.
    pub async fn set_active(self, db: &DatabaseConnection, active: bool) -> Result<Self, DbErr> {
        let mut am = self.into_active_model();
        am.active = Set(active);
        am.updated_at = Set(Utc::now());
        am.update(db).await
    }

    /// Deletes a session by ID. Attendances follow via FK cascade.
    pub async fn delete_by_id(db: &DatabaseConnection, id: i64) -> Result<u64, DbErr> {
        let res = Entity::delete_many()
            .filter(Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
