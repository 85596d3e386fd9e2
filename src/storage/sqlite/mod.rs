mod connection;
mod follow_repository;

pub use connection::SqliteStorage;
pub use follow_repository::SqliteFollowRepository;
