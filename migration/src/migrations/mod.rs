pub mod m202606010001_create_users;
pub mod m202606010002_create_courses;
pub mod m202606010003_create_sessions;
pub mod m202606010004_create_attendances;
