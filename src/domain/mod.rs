pub mod article;
pub mod category;
pub mod search;

pub use article::{Article, ArticleId};
pub use category::Category;
pub use search::SearchResult;
