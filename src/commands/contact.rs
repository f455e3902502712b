//! Send a contact message from the command line

use anyhow::Result;

use crate::contact::{ContactFormData, ContactWidget, Field, SubmissionStatus};
use crate::Folio;

/// Submit `form` through the configured endpoint, reporting the outcome
pub async fn run(folio: &Folio, form: ContactFormData) -> Result<()> {
    let mut widget = ContactWidget::from_config(&folio.config.contact);
    for field in Field::ALL {
        widget.edit(field, form.get(field));
    }

    let status = widget.submit().await;
    let state = widget.state();

    match status {
        SubmissionStatus::Success => {
            if let Some(notice) = state.notice {
                println!("{}", notice.message);
            }
            Ok(())
        }
        SubmissionStatus::Error => {
            let message = state
                .notice
                .map(|n| n.message)
                .unwrap_or_else(|| "Error: Unknown error".to_string());
            anyhow::bail!(message)
        }
        _ => {
            for field in Field::ALL {
                if let Some(error) = state.errors.get(field) {
                    eprintln!("  --{}: {}", field.key(), error);
                }
            }
            anyhow::bail!("Message not sent: {} invalid field(s)", state.errors.len())
        }
    }
}
