//! Blog post model

use serde::{Deserialize, Serialize};

use super::BlogFrontmatter;

/// A blog post loaded from one MDX document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    /// Slug (filename stem)
    pub slug: String,

    /// Parsed header block
    pub frontmatter: BlogFrontmatter,

    /// Rendered HTML body
    pub content: String,
}

impl BlogPost {
    pub fn new(slug: String, frontmatter: BlogFrontmatter, content: String) -> Self {
        Self {
            slug,
            frontmatter,
            content,
        }
    }

    pub fn title(&self) -> &str {
        &self.frontmatter.title
    }
}

/// Sort posts newest first; undated posts go last, ties break on slug
pub fn sort_newest_first(posts: &mut [BlogPost]) {
    posts.sort_by(|a, b| {
        b.frontmatter
            .parsed_date()
            .cmp(&a.frontmatter.parsed_date())
            .then_with(|| a.slug.cmp(&b.slug))
    });
}
