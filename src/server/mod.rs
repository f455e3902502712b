//! Development server rendering pages straight from the content store

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::contact::{reduce, ContactClient, ContactEvent, ContactFormData, ContactState, SubmissionStatus};
use crate::content::{ContentError, ContentStore};
use crate::render::{self, page, render_home, ContactDelivery, PageMeta, PageOutcome, Route};
use crate::Folio;

/// Server state
struct ServerState {
    folio: Folio,
    store: Arc<dyn ContentStore>,
    contact: ContactClient,
}

/// Build the router for a site and store
pub fn router(folio: &Folio, store: Arc<dyn ContentStore>) -> Router {
    let static_dir = folio.base_dir.join(&folio.config.static_dir);
    let state = Arc::new(ServerState {
        folio: folio.clone(),
        store,
        contact: ContactClient::new(folio.config.contact.endpoint.clone()),
    });

    Router::new()
        .route("/", get(home_handler))
        .route(render::CONTACT_ACTION, get(home_handler).post(contact_handler))
        .route("/blog", get(blog_index_handler))
        .route("/blog/", get(blog_index_handler))
        .route("/blog/:slug", get(blog_post_handler))
        .route("/blog/:slug/", get(blog_post_handler))
        .route("/projects", get(projects_index_handler))
        .route("/projects/", get(projects_index_handler))
        .route("/projects/:slug", get(project_handler))
        .route("/projects/:slug/", get(project_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, open: bool) -> Result<()> {
    let app = router(folio, Arc::new(folio.store()));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    Html(render_home(
        &state.folio.config,
        &ContactState::default(),
        ContactDelivery::Server,
    ))
    .into_response()
}

/// Runs the contact state machine for one form post and re-renders the home page
async fn contact_handler(
    State(state): State<Arc<ServerState>>,
    Form(form): Form<ContactFormData>,
) -> Response {
    let mut contact = reduce(ContactState::with_form(form), ContactEvent::Submit);

    if contact.status == SubmissionStatus::Sending {
        let event = match state.contact.send(&contact.form).await {
            Ok(_) => ContactEvent::Delivered,
            Err(e) => {
                tracing::warn!("Contact message failed: {}", e);
                ContactEvent::Failed(e.to_string())
            }
        };
        contact = reduce(contact, event);
    }

    let status = match contact.status {
        SubmissionStatus::Success => StatusCode::OK,
        SubmissionStatus::Error => StatusCode::BAD_GATEWAY,
        _ => StatusCode::UNPROCESSABLE_ENTITY,
    };
    let html = render_home(&state.folio.config, &contact, ContactDelivery::Server);
    (status, Html(html)).into_response()
}

async fn blog_index_handler(State(state): State<Arc<ServerState>>) -> Response {
    respond(render::blog::render_index(state.store.as_ref(), &state.folio.config).await)
}

async fn blog_post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    respond(render::blog::render_post(state.store.as_ref(), &state.folio.config, &slug).await)
}

async fn projects_index_handler(State(state): State<Arc<ServerState>>) -> Response {
    respond(render::projects::render_index(state.store.as_ref(), &state.folio.config).await)
}

async fn project_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
) -> Response {
    respond(render::projects::render_project(state.store.as_ref(), &state.folio.config, &slug).await)
}

async fn fallback_handler(State(state): State<Arc<ServerState>>) -> Response {
    let body = r#"<div class="not-found">Page not found.</div>"#;
    let html = page(
        &state.folio.config,
        &Route::Home,
        &PageMeta::titled("Page not found"),
        body,
    );
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}

/// Map a render result onto an HTTP response
fn respond(result: Result<PageOutcome, ContentError>) -> Response {
    match result {
        Ok(PageOutcome::Page(html)) => Html(html).into_response(),
        Ok(PageOutcome::Redirect(route)) => Redirect::temporary(&route.path()).into_response(),
        Ok(PageOutcome::NotFound(html)) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
