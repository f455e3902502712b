//! HTML helper functions

/// Generate a link that opens in a new browsing context
///
/// # Examples
/// ```ignore
/// external_link("https://github.com/me/x", "Code")
/// // -> <a href="https://github.com/me/x" target="_blank" rel="noopener noreferrer">Code</a>
/// ```
pub fn external_link(href: &str, text: &str, class: &str) -> String {
    format!(
        r#"<a class="{}" href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        class,
        html_escape(href),
        html_escape(text)
    )
}

/// Generate an in-site anchor tag
pub fn link_to(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}">{}</a>"#,
        html_escape(href),
        html_escape(text)
    )
}

/// Generate an image tag
pub fn image_tag(src: &str, alt: &str) -> String {
    format!(
        r#"<img src="{}" alt="{}" loading="lazy">"#,
        html_escape(src),
        html_escape(alt)
    )
}

/// Render tags as a list of chips; empty input renders nothing
pub fn tag_list(tags: &[String]) -> String {
    if tags.is_empty() {
        return String::new();
    }

    let items: String = tags
        .iter()
        .map(|tag| format!(r#"<li class="tag">{}</li>"#, html_escape(tag)))
        .collect();
    format!(r#"<ul class="tags">{}</ul>"#, items)
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_link() {
        let html = external_link("https://x.dev/?a=1&b=2", "Demo", "demo-link");
        assert_eq!(
            html,
            r#"<a class="demo-link" href="https://x.dev/?a=1&amp;b=2" target="_blank" rel="noopener noreferrer">Demo</a>"#
        );
    }

    #[test]
    fn test_tag_list() {
        assert_eq!(tag_list(&[]), "");
        let html = tag_list(&["rust".to_string(), "<web>".to_string()]);
        assert_eq!(
            html,
            r#"<ul class="tags"><li class="tag">rust</li><li class="tag">&lt;web&gt;</li></ul>"#
        );
    }
}
