//! Home page: introduction, skills and the contact form

use crate::config::SiteConfig;
use crate::contact::{render_contact, submit_script, ContactState};
use crate::helpers::html_escape;

use super::layout::{page, PageMeta};
use super::widgets::skills_list;
use super::Route;

/// Where the contact form posts when served by the built-in server
pub const CONTACT_ACTION: &str = "/contact";

/// How the contact form reaches the mail endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactDelivery {
    /// Form-encoded post to [`CONTACT_ACTION`], relayed by the built-in server
    Server,
    /// An inline script posts JSON to the configured endpoint
    Browser,
}

/// Render the home page with the contact form in `contact`'s state
pub fn render_home(config: &SiteConfig, contact: &ContactState, delivery: ContactDelivery) -> String {
    let form = match delivery {
        ContactDelivery::Server => render_contact(contact, &config.contact, CONTACT_ACTION),
        ContactDelivery::Browser => format!(
            "{}{}",
            render_contact(contact, &config.contact, &config.contact.endpoint),
            submit_script(&config.contact)
        ),
    };

    let intro = format!(
        r#"<section class="hero"><h1>{}</h1><p>{}</p></section>"#,
        html_escape(&config.author),
        html_escape(&config.description)
    );

    let body = format!(
        "{}{}{}",
        intro,
        skills_list(&config.skills),
        form
    );

    let meta = PageMeta {
        title: config.title.clone(),
        description: Some(config.description.clone()),
    };
    page(config, &Route::Home, &meta, &body)
}
