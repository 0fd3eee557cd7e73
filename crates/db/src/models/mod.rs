//! Row structs and DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the table and,
//! where needed, the input DTOs and outcome types its repository works with.
//! Serialized field names are camelCase to match the public API.

pub mod catalog;
pub mod checkin;
pub mod escape;
pub mod garden;
pub mod reward;
pub mod tree;
pub mod user;
