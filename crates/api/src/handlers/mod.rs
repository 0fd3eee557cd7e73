pub mod auth;
pub mod checkin;
pub mod escape;
pub mod garden;
pub mod me;
pub mod tree;
