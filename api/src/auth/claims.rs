use db::models::user::Role;
use serde::{Deserialize, Serialize};

/// JWT payload. Besides the subject and expiry it carries what the login
/// response needs to echo about the user: role, username and display name.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub username: String,
    pub full_name: String,
    pub role: Role,
    pub exp: usize,
}

impl Claims {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
