//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod client_repo;
pub mod detail_loader;
pub mod project_repo;
pub mod subtask_repo;
pub mod task_repo;
pub mod user_repo;

pub use client_repo::ClientRepo;
pub use detail_loader::DetailLoader;
pub use project_repo::ProjectRepo;
pub use subtask_repo::SubtaskRepo;
pub use task_repo::TaskRepo;
pub use user_repo::UserRepo;
