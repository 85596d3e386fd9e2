pub mod article;
pub mod section;
pub mod state;
pub mod session;

pub use article::{Article, ArticleId};
pub use section::{Section, SectionState};
pub use state::HomeFeedState;
pub use session::SessionContext;
