//! Stateless display widgets

use crate::config::Skill;
use crate::content::Project;
use crate::helpers::{external_link, html_escape, image_tag, link_to, tag_list};

use super::Route;

/// Skills grid; an empty list renders nothing
pub fn skills_list(skills: &[Skill]) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let items: String = skills
        .iter()
        .map(|skill| {
            let icon = skill
                .icon
                .as_deref()
                .map(|icon| format!(r#" data-icon="{}""#, html_escape(icon)))
                .unwrap_or_default();
            format!(
                r#"<li class="skill"{}><span>{}</span></li>"#,
                icon,
                html_escape(&skill.name)
            )
        })
        .collect();

    format!(
        r#"<section class="skills"><h2>Skills</h2><ul class="skill-grid">{}</ul></section>"#,
        items
    )
}

/// Demo and code links for a project, whichever are present
pub fn project_links(project: &Project) -> String {
    let links: Vec<String> = [
        project.demo_url().map(|url| external_link(url, "Demo", "demo-link")),
        project.code_url().map(|url| external_link(url, "Code", "code-link")),
    ]
    .into_iter()
    .flatten()
    .collect();

    if links.is_empty() {
        String::new()
    } else {
        format!(r#"<div class="project-links">{}</div>"#, links.join(""))
    }
}

/// Card used on the projects index
pub fn project_card(project: &Project) -> String {
    let image = if project.image.is_empty() {
        String::new()
    } else {
        format!(
            r#"<div class="card-image">{}</div>"#,
            image_tag(&project.image, &project.title)
        )
    };

    format!(
        r#"<article class="project-card">{image}<h2>{title}</h2><p>{description}</p>{tags}{links}</article>"#,
        image = image,
        title = link_to(&Route::Project(project.slug.clone()).path(), &project.title),
        description = html_escape(&project.description),
        tags = tag_list(&project.tags),
        links = project_links(project),
    )
}
