use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One student's presence record for one session.
///
/// Rows are keyed for duplicate rejection by (session_id, name, surname);
/// the submitter IP and user agent are recorded as evidence but are not part
/// of the identity. A row is written at check-in and completed in place at
/// check-out.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "attendances")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub session_id: i64,
    pub name: String,
    pub surname: String,
    pub student_id: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Course name at submission time, denormalized for exports.
    pub course_name: String,
    pub status: Status,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub duration_minutes: Option<i64>,
    pub created_at: DateTime<Utc>,
}

#[derive(
    Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Display, EnumString, Deserialize,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "attendance_status_type")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Status {
    /// Checked in, not yet checked out.
    #[sea_orm(string_value = "present")]
    Present,

    /// Checked in and out; duration recorded.
    #[sea_orm(string_value = "completed")]
    Completed,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::session::Entity",
        from = "Column::SessionId",
        to = "super::session::Column::Id"
    )]
    Session,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
    fn via() -> Option<RelationDef> {
        None
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Looks up the row identifying (session, name, surname), trimmed.
    pub async fn find_for_identity(
        db: &DatabaseConnection,
        session_id: i64,
        name: &str,
        surname: &str,
    ) -> Result<Option<Self>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .filter(Column::Name.eq(name.trim()))
            .filter(Column::Surname.eq(surname.trim()))
            .one(db)
            .await
    }

    /// Records a check-in against an entry token's session.
    ///
    /// Domain rule violations surface as `DbErr::Custom` so handlers can map
    /// them to 400 responses; anything else is a real database failure.
    #[allow(clippy::too_many_arguments)]
    pub async fn check_in(
        db: &DatabaseConnection,
        session: &super::session::Model,
        course_name: &str,
        name: &str,
        surname: &str,
        student_id: Option<&str>,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, DbErr> {
        if !session.active {
            return Err(DbErr::Custom("Session is not active".into()));
        }

        let name = name.trim();
        let surname = surname.trim();
        if name.is_empty() || surname.is_empty() {
            return Err(DbErr::Custom("Name and surname are required".into()));
        }

        if Self::find_for_identity(db, session.id, name, surname)
            .await?
            .is_some()
        {
            return Err(DbErr::Custom(
                "Attendance already submitted for this session".into(),
            ));
        }

        let row = ActiveModel {
            session_id: Set(session.id),
            name: Set(name.to_owned()),
            surname: Set(surname.to_owned()),
            student_id: Set(student_id
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_owned())),
            ip_address: Set(ip_address.map(|s| s.to_owned())),
            user_agent: Set(user_agent.map(|s| s.to_owned())),
            course_name: Set(course_name.to_owned()),
            status: Set(Status::Present),
            entry_time: Set(now),
            exit_time: Set(None),
            duration_minutes: Set(None),
            created_at: Set(now),
            ..Default::default()
        };

        match row.insert(db).await {
            Ok(m) => Ok(m),
            // Two simultaneous identical submissions race past the lookup;
            // the unique index breaks the tie and both report as duplicates.
            Err(e) if e.to_string().contains("UNIQUE constraint failed") => Err(DbErr::Custom(
                "Attendance already submitted for this session".into(),
            )),
            Err(e) => Err(e),
        }
    }

    /// Records a check-out against an exit token's session.
    ///
    /// Requires a prior check-in for the same identity and rejects a second
    /// check-out; stores the whole-minute duration between the two stamps.
    pub async fn check_out(
        db: &DatabaseConnection,
        session: &super::session::Model,
        name: &str,
        surname: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, DbErr> {
        if !session.active {
            return Err(DbErr::Custom("Session is not active".into()));
        }

        let name = name.trim();
        let surname = surname.trim();
        if name.is_empty() || surname.is_empty() {
            return Err(DbErr::Custom("Name and surname are required".into()));
        }

        let Some(row) = Self::find_for_identity(db, session.id, name, surname).await? else {
            return Err(DbErr::Custom("No matching check-in found".into()));
        };

        if row.exit_time.is_some() {
            return Err(DbErr::Custom("Already checked out".into()));
        }

        let duration = (now - row.entry_time).num_minutes().max(0);
        let mut am = row.into_active_model();
        am.exit_time = Set(Some(now));
        am.duration_minutes = Set(Some(duration));
        am.status = Set(Status::Completed);
        am.update(db).await
    }

    pub async fn count_for_session(db: &DatabaseConnection, session_id: i64) -> Result<u64, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .count(db)
            .await
    }

    /// All rows of a session, oldest check-in first (export order).
    pub async fn list_for_session(
        db: &DatabaseConnection,
        session_id: i64,
    ) -> Result<Vec<Self>, DbErr> {
        Entity::find()
            .filter(Column::SessionId.eq(session_id))
            .order_by_asc(Column::EntryTime)
            .all(db)
            .await
    }
}
