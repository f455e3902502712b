//! Page rendering - turns store content into complete HTML documents

pub mod blog;
mod home;
mod layout;
pub mod projects;
mod routes;
pub mod widgets;

pub use home::{render_home, ContactDelivery, CONTACT_ACTION};
pub use layout::{page, PageMeta};
pub use routes::{static_routes, Route};

use crate::config::SiteConfig;
use crate::contact::ContactState;
use crate::content::{ContentError, ContentStore};

/// Result of rendering a route.
///
/// Blog and project detail pages handle a missing slug differently; both
/// arrive here so callers treat them the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    /// A complete document
    Page(String),
    /// Navigate elsewhere instead of rendering
    Redirect(Route),
    /// A complete document explaining the content does not exist
    NotFound(String),
}

/// Render any route from the store as a standalone page.
///
/// The home page's contact form submits from the browser, since no server
/// stands behind generated output.
pub async fn render_route(
    store: &dyn ContentStore,
    config: &SiteConfig,
    route: &Route,
) -> Result<PageOutcome, ContentError> {
    match route {
        Route::Home => Ok(PageOutcome::Page(render_home(
            config,
            &ContactState::default(),
            ContactDelivery::Browser,
        ))),
        Route::BlogIndex => blog::render_index(store, config).await,
        Route::BlogPost(slug) => blog::render_post(store, config, slug).await,
        Route::ProjectsIndex => projects::render_index(store, config).await,
        Route::Project(slug) => projects::render_project(store, config, slug).await,
    }
}
