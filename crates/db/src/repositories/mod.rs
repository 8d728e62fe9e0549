//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod ad_repo;
pub mod proposal_repo;
pub mod user_repo;

pub use ad_repo::AdRepo;
pub use proposal_repo::ProposalRepo;
pub use user_repo::UserRepo;
