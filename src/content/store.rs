//! Storage-agnostic content access

use async_trait::async_trait;

use super::{post, BlogFrontmatter, BlogPost, ContentError, Project};

/// Read-only access to blog posts and project records.
///
/// Lookups by slug return `Ok(None)` when nothing matches; `Err` is reserved
/// for content that exists but cannot be read or parsed.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// All known blog slugs, sorted. An unreadable store yields an empty list.
    async fn list_blog_slugs(&self) -> Vec<String>;

    /// Front-matter of the post with exactly this slug
    async fn blog_frontmatter(&self, slug: &str) -> Result<Option<BlogFrontmatter>, ContentError>;

    /// Front-matter and rendered body of the post with exactly this slug
    async fn blog_post(&self, slug: &str) -> Result<Option<BlogPost>, ContentError>;

    /// Project records in manifest order
    async fn projects(&self) -> Result<Vec<Project>, ContentError>;

    /// The project record with exactly this slug
    async fn project(&self, slug: &str) -> Result<Option<Project>, ContentError> {
        if !is_valid_slug(slug) {
            return Ok(None);
        }
        Ok(self.projects().await?.into_iter().find(|p| p.slug == slug))
    }

    /// Every post, newest first
    async fn blog_posts(&self) -> Result<Vec<BlogPost>, ContentError> {
        let mut posts = Vec::new();
        for slug in self.list_blog_slugs().await {
            if let Some(post) = self.blog_post(&slug).await? {
                posts.push(post);
            }
        }
        post::sort_newest_first(&mut posts);
        Ok(posts)
    }
}

/// Slugs name a single file; anything that could walk the tree never matches
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
        && !slug.contains("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("hello-world"));
        assert!(is_valid_slug("2024.notes"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("../secret"));
        assert!(!is_valid_slug("a/b"));
        assert!(!is_valid_slug(".hidden"));
    }
}
