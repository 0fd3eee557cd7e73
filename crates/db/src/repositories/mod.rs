//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Multi-statement award flows open
//! their own transaction; the `*_in` helpers take `&mut PgConnection` so they
//! can join a transaction owned by another repository.

pub mod catalog_repo;
pub mod checkin_repo;
pub mod escape_repo;
pub mod garden_repo;
pub mod reward_repo;
pub mod tree_repo;
pub mod user_repo;

pub use catalog_repo::CatalogRepo;
pub use checkin_repo::CheckinRepo;
pub use escape_repo::EscapeRepo;
pub use garden_repo::GardenRepo;
pub use reward_repo::RewardRepo;
pub use tree_repo::TreeRepo;
pub use user_repo::UserRepo;
