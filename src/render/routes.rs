//! Route surface of the site

use std::fmt;
use std::path::PathBuf;

use crate::content::store::is_valid_slug;
use crate::content::ContentStore;
use crate::helpers::encode_segment;

/// Every page the site can serve
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    BlogIndex,
    BlogPost(String),
    ProjectsIndex,
    Project(String),
}

impl Route {
    /// URL path with a trailing slash; slugs are percent-encoded
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::BlogIndex => "/blog/".to_string(),
            Route::BlogPost(slug) => format!("/blog/{}/", encode_segment(slug)),
            Route::ProjectsIndex => "/projects/".to_string(),
            Route::Project(slug) => format!("/projects/{}/", encode_segment(slug)),
        }
    }

    /// Output file relative to the public directory
    pub fn output_file(&self) -> PathBuf {
        let mut file = PathBuf::new();
        match self {
            Route::Home => {}
            Route::BlogIndex => file.push("blog"),
            Route::BlogPost(slug) => {
                file.push("blog");
                file.push(slug);
            }
            Route::ProjectsIndex => file.push("projects"),
            Route::Project(slug) => {
                file.push("projects");
                file.push(slug);
            }
        }
        file.join("index.html")
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Enumerate every statically known route.
///
/// An unreadable manifest only drops the project detail routes. Slugs that
/// could escape their directory are never turned into routes.
pub async fn static_routes(store: &dyn ContentStore) -> Vec<Route> {
    let mut routes = vec![Route::Home, Route::BlogIndex, Route::ProjectsIndex];

    let posts = store.list_blog_slugs().await;
    let projects = match store.projects().await {
        Ok(projects) => projects.into_iter().map(|p| p.slug).collect(),
        Err(e) => {
            tracing::warn!("Skipping project pages: {}", e);
            Vec::new()
        }
    };

    let details = posts
        .into_iter()
        .map(Route::BlogPost)
        .chain(projects.into_iter().map(Route::Project));
    for route in details {
        match &route {
            Route::BlogPost(slug) | Route::Project(slug) if !is_valid_slug(slug) => {
                tracing::warn!("Skipping route with unusable slug {:?}", slug);
            }
            _ => routes.push(route),
        }
    }

    routes
}
