pub mod attendance;
pub mod course;
pub mod session;
pub mod user;

pub use attendance::Entity as Attendance;
pub use course::Entity as Course;
pub use session::Entity as Session;
pub use user::Entity as User;
