//! Account role names stored in `users.role` and embedded in access tokens.

pub const ROLE_USER: &str = "user";
pub const ROLE_ADMIN: &str = "admin";
