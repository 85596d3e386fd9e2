pub mod traits;
pub mod graphql;

pub use traits::ArticleGateway;
pub use graphql::GraphQlGateway;
