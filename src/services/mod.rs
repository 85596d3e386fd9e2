pub mod follow_service;
pub mod home_feed_service;

pub use follow_service::FollowService;
pub use home_feed_service::{FeedLoad, FeedLoadHandle, HomeFeedService};
