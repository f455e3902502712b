//! Projects index and detail pages

use crate::config::SiteConfig;
use crate::content::{ContentError, ContentStore, Project};
use crate::helpers::{html_escape, image_tag, tag_list};

use super::layout::{page, PageMeta};
use super::widgets::{project_card, project_links};
use super::{PageOutcome, Route};

/// Inline message for an unknown project slug
pub const NOT_FOUND_MESSAGE: &str = "Project not found.";

/// Body markup for one project
pub fn project_body(project: &Project) -> String {
    let image = if project.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="project-image">{}</div>"#,
            image_tag(&project.image, &project.title)
        )
    };

    format!(
        r#"<article class="project"><h1>{title}</h1>{image}<p class="project-description">{description}</p>{tags}{links}</article>"#,
        title = html_escape(&project.title),
        image = image,
        description = html_escape(&project.description),
        tags = tag_list(&project.tags),
        links = project_links(project),
    )
}

/// Markup for the not-found view, and nothing else
pub fn not_found_body() -> String {
    format!(r#"<div class="not-found">{}</div>"#, NOT_FOUND_MESSAGE)
}

/// Detail page; an unknown slug renders an inline not-found message
pub async fn render_project(
    store: &dyn ContentStore,
    config: &SiteConfig,
    slug: &str,
) -> Result<PageOutcome, ContentError> {
    let route = Route::Project(slug.to_string());

    match store.project(slug).await? {
        Some(project) => {
            let meta = PageMeta {
                title: format!("{} | {}", project.title, config.author),
                description: Some(project.description.clone()),
            };
            Ok(PageOutcome::Page(page(config, &route, &meta, &project_body(&project))))
        }
        None => {
            tracing::debug!("No project '{}'", slug);
            let meta = PageMeta::titled(NOT_FOUND_MESSAGE);
            Ok(PageOutcome::NotFound(page(config, &route, &meta, &not_found_body())))
        }
    }
}

/// One card per manifest entry, in manifest order
pub async fn render_index(
    store: &dyn ContentStore,
    config: &SiteConfig,
) -> Result<PageOutcome, ContentError> {
    let projects = store.projects().await?;
    let cards: String = projects.iter().map(project_card).collect();

    let body = format!(
        r#"<section class="projects"><h1>Projects</h1><div class="project-grid">{}</div></section>"#,
        cards
    );
    let meta = PageMeta::titled(format!("Projects | {}", config.author));
    Ok(PageOutcome::Page(page(config, &Route::ProjectsIndex, &meta, &body)))
}
