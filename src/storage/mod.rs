pub mod traits;
pub mod sqlite;

pub use traits::FollowRepository;
pub use sqlite::{SqliteFollowRepository, SqliteStorage};
