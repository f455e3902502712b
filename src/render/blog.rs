//! Blog index and detail pages

use crate::config::SiteConfig;
use crate::content::{BlogFrontmatter, BlogPost, ContentError, ContentStore};
use crate::helpers::{html_escape, link_to, tag_list, time_tag};

use super::layout::{page, PageMeta};
use super::{PageOutcome, Route};

/// Title shown when the requested post does not exist
pub const NOT_FOUND_TITLE: &str = "Blog not found";

/// Head metadata for a post
pub fn blog_metadata(frontmatter: Option<&BlogFrontmatter>, config: &SiteConfig) -> PageMeta {
    match frontmatter {
        Some(fm) => PageMeta {
            title: format!("{} | {}", fm.title, config.author),
            description: Some(fm.description.clone()),
        },
        None => PageMeta::titled(NOT_FOUND_TITLE),
    }
}

/// Body markup for one post
pub fn post_body(post: &BlogPost) -> String {
    let fm = &post.frontmatter;
    let date = fm
        .parsed_date()
        .map(|d| format!(r#"<p class="post-date">{}</p>"#, time_tag(&d)))
        .unwrap_or_default();

    format!(
        r#"<article class="post"><h1>{title}</h1><p class="post-description">{description}</p>{date}{tags}<div class="prose">{content}</div></article>"#,
        title = html_escape(&fm.title),
        description = html_escape(&fm.description),
        date = date,
        tags = tag_list(&fm.tags),
        content = post.content,
    )
}

/// Detail page; an unknown slug redirects to the blog index
pub async fn render_post(
    store: &dyn ContentStore,
    config: &SiteConfig,
    slug: &str,
) -> Result<PageOutcome, ContentError> {
    let meta = blog_metadata(store.blog_frontmatter(slug).await?.as_ref(), config);

    let Some(post) = store.blog_post(slug).await? else {
        tracing::debug!("No post '{}', redirecting to index", slug);
        return Ok(PageOutcome::Redirect(Route::BlogIndex));
    };

    let route = Route::BlogPost(post.slug.clone());
    Ok(PageOutcome::Page(page(config, &route, &meta, &post_body(&post))))
}

/// Index of every post, newest first
pub async fn render_index(
    store: &dyn ContentStore,
    config: &SiteConfig,
) -> Result<PageOutcome, ContentError> {
    let posts = store.blog_posts().await?;

    let items: String = posts
        .iter()
        .map(|post| {
            let fm = &post.frontmatter;
            let date = fm.parsed_date().map(|d| time_tag(&d)).unwrap_or_default();
            format!(
                r#"<li class="post-item"><h2>{}</h2>{}<p>{}</p>{}</li>"#,
                link_to(&Route::BlogPost(post.slug.clone()).path(), &fm.title),
                date,
                html_escape(&fm.description),
                tag_list(&fm.tags),
            )
        })
        .collect();

    let body = format!(
        r#"<section class="blog"><h1>Blog</h1><ul class="post-list">{}</ul></section>"#,
        items
    );
    let meta = PageMeta::titled(format!("Blog | {}", config.author));
    Ok(PageOutcome::Page(page(config, &Route::BlogIndex, &meta, &body)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::tests::MemoryStore;

    fn fm(title: &str, date: &str, tags: &[&str]) -> BlogFrontmatter {
        BlogFrontmatter {
            title: title.to_string(),
            description: format!("About {}", title),
            date: date.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        }
    }

    fn store() -> MemoryStore {
        MemoryStore::default()
            .with_post("hello", fm("Hello", "2024-03-05", &["rust", "web"]), "<p>Hi!</p>")
            .with_post("older", fm("Older", "2023-01-01", &[]), "<p>Old</p>")
    }

    #[test]
    fn test_metadata() {
        let config = SiteConfig::default();
        let meta = blog_metadata(Some(&fm("Hello", "", &[])), &config);
        assert_eq!(meta.title, "Hello | John Doe");
        assert_eq!(meta.description.as_deref(), Some("About Hello"));
        assert_eq!(blog_metadata(None, &config).title, NOT_FOUND_TITLE);
    }

    #[tokio::test]
    async fn test_render_post() {
        let config = SiteConfig::default();
        let outcome = render_post(&store(), &config, "hello").await.unwrap();
        let PageOutcome::Page(html) = outcome else {
            panic!("expected a page, got {:?}", outcome);
        };
        assert!(html.contains("<title>Hello | John Doe</title>"));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("Tuesday, Mar 5, 2024"));
        assert!(html.contains(r#"<li class="tag">rust</li>"#));
        assert!(html.contains("<p>Hi!</p>"));
    }

    #[tokio::test]
    async fn test_post_without_tags_or_date() {
        let config = SiteConfig::default();
        let store = MemoryStore::default().with_post("bare", fm("Bare", "someday", &[]), "");
        let PageOutcome::Page(html) = render_post(&store, &config, "bare").await.unwrap() else {
            panic!("expected a page");
        };
        assert!(!html.contains(r#"class="tags""#));
        assert!(!html.contains("post-date"));
    }

    #[tokio::test]
    async fn test_unknown_post_redirects() {
        let config = SiteConfig::default();
        let outcome = render_post(&store(), &config, "nope").await.unwrap();
        assert_eq!(outcome, PageOutcome::Redirect(Route::BlogIndex));
    }

    #[tokio::test]
    async fn test_index_newest_first() {
        let config = SiteConfig::default();
        let PageOutcome::Page(html) = render_index(&store(), &config).await.unwrap() else {
            panic!("expected a page");
        };
        let hello = html.find("/blog/hello/").unwrap();
        let older = html.find("/blog/older/").unwrap();
        assert!(hello < older);
    }
}
