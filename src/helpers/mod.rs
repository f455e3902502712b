//! Helper functions for page rendering
//!
//! Small formatting and markup builders shared by the page renderers
//! and widgets.

mod date;
mod html;
mod url;

pub use date::*;
pub use html::*;
pub use url::*;
