//! List site content

use anyhow::Result;
use std::collections::HashMap;

use crate::content::ContentStore;
use crate::render::static_routes;
use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let store = folio.store();

    match content_type {
        "post" | "posts" => {
            let posts = store.blog_posts().await?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                let date = post
                    .frontmatter
                    .parsed_date()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "----------".to_string());
                println!("  {} - {} [{}]", date, post.title(), post.slug);
            }
        }
        "project" | "projects" => {
            let projects = store.projects().await?;
            println!("Projects ({}):", projects.len());
            for project in projects {
                println!("  {} [{}]", project.title, project.slug);
            }
        }
        "tag" | "tags" => {
            let mut tags: HashMap<String, usize> = HashMap::new();
            for post in store.blog_posts().await? {
                for tag in post.frontmatter.tags {
                    *tags.entry(tag).or_insert(0) += 1;
                }
            }
            println!("Tags ({}):", tags.len());
            let mut tags: Vec<_> = tags.into_iter().collect();
            tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        "route" | "routes" => {
            let routes = static_routes(&store).await;
            println!("Routes ({}):", routes.len());
            for route in routes {
                println!("  {}", route);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, project, tag, route",
                content_type
            );
        }
    }

    Ok(())
}
