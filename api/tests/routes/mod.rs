mod analytics_test;
mod attend_test;
mod auth_test;
mod health_test;
mod users_test;
