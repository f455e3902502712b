//! Content module - blog posts, project records, and the stores that load them

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod project;
pub mod store;

pub use error::ContentError;
pub use frontmatter::BlogFrontmatter;
pub use loader::FsContentStore;
pub use markdown::MarkdownRenderer;
pub use post::{sort_newest_first, BlogPost};
pub use project::Project;
pub use store::ContentStore;
