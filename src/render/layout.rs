//! Page shell shared by every route

use crate::config::SiteConfig;
use crate::helpers::{full_url_for, html_escape};

use super::Route;

/// Title and description of one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: Option<String>,
}

impl PageMeta {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
        }
    }
}

/// Wrap `body` in the document shell with head metadata and navigation
pub fn page(config: &SiteConfig, route: &Route, meta: &PageMeta, body: &str) -> String {
    let description = meta
        .description
        .as_deref()
        .filter(|d| !d.is_empty())
        .or(Some(config.description.as_str()).filter(|d| !d.is_empty()))
        .map(|d| format!(r#"<meta name="description" content="{}">"#, html_escape(d)))
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
{description}
<link rel="canonical" href="{canonical}">
<link rel="stylesheet" href="/static/site.css">
</head>
<body>
<header class="site-header"><nav><a href="/">{site}</a> <a href="{blog}">Blog</a> <a href="{projects}">Projects</a> <a href="/#contact">Contact</a></nav></header>
<main>
{body}
</main>
<footer class="site-footer">&copy; {author}</footer>
</body>
</html>
"#,
        title = html_escape(&meta.title),
        description = description,
        canonical = html_escape(&full_url_for(config, &route.path())),
        site = html_escape(&config.title),
        blog = Route::BlogIndex.path(),
        projects = Route::ProjectsIndex.path(),
        body = body,
        author = html_escape(&config.author),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_shell() {
        let config = SiteConfig::default();
        let meta = PageMeta {
            title: "Hello & welcome".to_string(),
            description: Some("About me".to_string()),
        };
        let html = page(&config, &Route::Home, &meta, "<p>body</p>");
        assert!(html.contains("<title>Hello &amp; welcome</title>"));
        assert!(html.contains(r#"<meta name="description" content="About me">"#));
        assert!(html.contains(r#"<link rel="canonical" href="http://localhost:4000/">"#));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_no_description() {
        let html = page(&SiteConfig::default(), &Route::Home, &PageMeta::titled("T"), "");
        assert!(!html.contains(r#"name="description""#));
    }
}
