//! Domain logic for the Escapade reward engine.
//!
//! Everything in this crate is storage-agnostic: the streak and cycle
//! algorithms, tree growth planning, escape validation, and garden layout
//! rules are pure functions so they can be tested without a database.

pub mod checkin;
pub mod clock;
pub mod error;
pub mod escape;
pub mod garden;
pub mod reward;
pub mod roles;
pub mod tree_growth;
pub mod types;
