//! Markup for the contact form

use super::{ContactState, Field, NoticeKind, SubmissionStatus};
use crate::config::ContactConfig;
use crate::helpers::html_escape;

const THANK_YOU: &str = "Thank you for your message! I'll get back to you soon.";

/// Browser-side driver for pages without a server behind the form.
/// Mirrors `reduce`: same messages, same status flow, JSON body to the endpoint.
const SUBMIT_SCRIPT: &str = r#"(function () {
  var form = document.querySelector("form.contact-form");
  if (!form) return;
  var endpoint = __ENDPOINT__, resetMs = __RESET_MS__;
  var button = form.querySelector("button.send");
  var required = { name: "Name is required", email: "Email is required", subject: "Subject is required", message: "Message is required" };
  var status = "idle";

  function setStatus(next) {
    status = next;
    form.dataset.status = next;
    button.disabled = next === "sending";
    button.textContent = next === "sending" ? "Sending..." : next === "success" ? "Message Sent!" : "Send Message";
  }

  function notice(kind, message) {
    var el = form.parentNode.querySelector(".notice");
    if (!kind) { if (el) el.remove(); return; }
    if (!el) {
      el = document.createElement("div");
      el.setAttribute("role", "status");
      form.parentNode.insertBefore(el, form);
    }
    el.className = "notice " + kind;
    el.textContent = message;
  }

  function fieldError(name, message) {
    var input = form.elements[name];
    var field = input.closest(".field");
    var el = field.querySelector(".field-error");
    if (!message) {
      input.classList.remove("invalid");
      if (el) el.remove();
      return;
    }
    input.classList.add("invalid");
    if (!el) {
      el = document.createElement("p");
      el.className = "field-error";
      field.appendChild(el);
    }
    el.textContent = message;
  }

  Object.keys(required).forEach(function (name) {
    form.elements[name].addEventListener("input", function () { fieldError(name, null); });
  });

  form.addEventListener("submit", function (event) {
    event.preventDefault();
    if (status === "sending") return;

    var data = {}, valid = true;
    Object.keys(required).forEach(function (name) {
      var value = form.elements[name].value, message = null;
      data[name] = value;
      if (!value.trim()) message = required[name];
      else if (name === "email" && !/\S+@\S+\.\S+/.test(value)) message = "Please enter a valid email";
      if (message) { fieldError(name, message); valid = false; }
    });
    if (!valid) return;

    setStatus("sending");
    notice(null);
    fetch(endpoint, { method: "POST", headers: { "Content-Type": "application/json" }, body: JSON.stringify(data) })
      .then(function (res) {
        var type = res.headers.get("content-type") || "";
        var body = type.indexOf("application/json") !== -1
          ? res.json()
          : res.text().then(function () { return { message: "Received non-JSON response" }; });
        return body.then(function (json) {
          if (!res.ok) throw new Error((json && json.message) || "Error: " + res.status);
        });
      })
      .then(function () {
        setStatus("success");
        form.reset();
        notice("success", "Message sent successfully!");
        setTimeout(function () {
          if (status === "success") { setStatus("idle"); notice(null); }
        }, resetMs);
      }, function (err) {
        setStatus("error");
        notice("error", "Error: " + (err && err.message ? err.message : "Unknown error"));
      });
  });
})();"#;

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Name => "Your name",
        Field::Email => "your.email@example.com",
        Field::Subject => "What's this about?",
        Field::Message => "Tell me about your project, idea, or just say hello...",
    }
}

/// Button label, and whether the button is disabled
pub fn button_label(status: SubmissionStatus) -> (&'static str, bool) {
    match status {
        SubmissionStatus::Sending => ("Sending...", true),
        SubmissionStatus::Success => ("Message Sent!", false),
        SubmissionStatus::Idle | SubmissionStatus::Error => ("Send Message", false),
    }
}

fn render_field(state: &ContactState, field: Field) -> String {
    let key = field.key();
    let value = html_escape(state.form.get(field));
    let error = state.errors.get(field);
    let invalid = if error.is_some() { " invalid" } else { "" };

    let control = match field {
        Field::Message => format!(
            r#"<textarea id="{key}" name="{key}" rows="6" class="input{invalid}" placeholder="{}">{value}</textarea>"#,
            placeholder(field)
        ),
        _ => {
            let kind = if field == Field::Email { "email" } else { "text" };
            format!(
                r#"<input type="{kind}" id="{key}" name="{key}" value="{value}" class="input{invalid}" placeholder="{}">"#,
                html_escape(placeholder(field))
            )
        }
    };

    let error = error
        .map(|msg| format!(r#"<p class="field-error">{}</p>"#, html_escape(msg)))
        .unwrap_or_default();

    format!(
        r#"<div class="field"><label for="{key}">{}</label>{control}{error}</div>"#,
        field.label()
    )
}

/// Inline `<script>` that submits the form as JSON straight to the endpoint
pub fn submit_script(config: &ContactConfig) -> String {
    let endpoint = serde_json::to_string(&config.endpoint)
        .unwrap_or_else(|_| "\"\"".to_string())
        .replace("</", "<\\/");
    let script = SUBMIT_SCRIPT
        .replace("__ENDPOINT__", &endpoint)
        .replace("__RESET_MS__", &config.reset_after_secs.saturating_mul(1000).to_string());
    format!("<script>{}</script>", script)
}

/// Render the whole contact section for `state`
pub fn render_contact(state: &ContactState, config: &ContactConfig, action: &str) -> String {
    let mut html = String::from(
        r#"<section id="contact" class="contact"><h2>Get In Touch</h2><p class="lead">I'd love to hear from you. Send me a message and I'll respond as soon as possible.</p>"#,
    );

    if let Some(notice) = &state.notice {
        let class = match notice.kind {
            NoticeKind::Success => "notice success",
            NoticeKind::Error => "notice error",
        };
        html.push_str(&format!(
            r#"<div class="{}" role="status">{}</div>"#,
            class,
            html_escape(&notice.message)
        ));
    }

    html.push_str(&format!(
        r#"<form method="post" action="{}" class="contact-form" data-status="{}">"#,
        html_escape(action),
        state.status
    ));
    for field in Field::ALL {
        html.push_str(&render_field(state, field));
    }

    let (label, disabled) = button_label(state.status);
    let disabled = if disabled { " disabled" } else { "" };
    html.push_str(&format!(
        r#"<button type="submit" class="send"{}>{}</button></form>"#,
        disabled, label
    ));

    if state.status == SubmissionStatus::Success {
        html.push_str(&format!(r#"<div class="thank-you">{}</div>"#, THANK_YOU));
    }

    if let Some(email) = config.email.as_deref().filter(|e| !e.is_empty()) {
        let email = html_escape(email);
        html.push_str(&format!(
            r#"<p class="direct">You can also reach me directly at <a href="mailto:{email}">{email}</a></p>"#
        ));
    }

    html.push_str("</section>");
    html
}
