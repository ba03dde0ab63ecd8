use db::models::course::Model as Course;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, message = "Course name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Course code is required"))]
    pub code: String,

    pub description: Option<String>,

    #[validate(range(min = 1, message = "max_students must be positive"))]
    pub max_students: Option<i32>,

    /// Admin-only: assign the course to another instructor.
    pub instructor_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    pub id: i64,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub max_students: i32,
    pub instructor_id: i64,
    pub session_count: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            name: c.name,
            code: c.code,
            description: c.description,
            max_students: c.max_students,
            instructor_id: c.instructor_id,
            session_count: 0,
            created_at: c.created_at.to_rfc3339(),
            updated_at: c.updated_at.to_rfc3339(),
        }
    }
}

impl CourseResponse {
    pub fn from_with_count(c: Course, session_count: i64) -> Self {
        let mut base = Self::from(c);
        base.session_count = session_count;
        base
    }
}
