//! Async driver for the contact form

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use super::{reduce, ContactClient, ContactEvent, ContactState, Field, SubmissionStatus};
use crate::config::ContactConfig;

/// Holds one form's state, talks to the endpoint and runs the reset timer.
///
/// Dropping the widget cancels a pending success reset.
pub struct ContactWidget {
    state: Arc<Mutex<ContactState>>,
    client: ContactClient,
    reset_after: Duration,
    status_tx: broadcast::Sender<SubmissionStatus>,
    reset_task: Option<JoinHandle<()>>,
}

impl ContactWidget {
    pub fn new(client: ContactClient, reset_after: Duration) -> Self {
        let (status_tx, _) = broadcast::channel(16);
        Self {
            state: Arc::new(Mutex::new(ContactState::default())),
            client,
            reset_after,
            status_tx,
            reset_task: None,
        }
    }

    /// Widget posting to the configured endpoint
    pub fn from_config(config: &ContactConfig) -> Self {
        Self::new(
            ContactClient::new(config.endpoint.clone()),
            Duration::from_secs(config.reset_after_secs),
        )
    }

    /// Snapshot of the current state
    pub fn state(&self) -> ContactState {
        lock(&self.state).clone()
    }

    pub fn status(&self) -> SubmissionStatus {
        lock(&self.state).status
    }

    /// Receive every status change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<SubmissionStatus> {
        self.status_tx.subscribe()
    }

    /// Update one field
    pub fn edit(&self, field: Field, value: impl Into<String>) {
        self.apply(ContactEvent::Edit(field, value.into()));
    }

    /// Validate and, if valid, send the form. Returns the resulting status.
    ///
    /// Does nothing while a send is already in flight.
    pub async fn submit(&mut self) -> SubmissionStatus {
        if self.status() == SubmissionStatus::Sending {
            return SubmissionStatus::Sending;
        }

        let before = self.status();
        let after = self.apply(ContactEvent::Submit);
        if after.status != SubmissionStatus::Sending {
            tracing::debug!("Contact form invalid: {} field error(s)", after.errors.len());
            return before;
        }

        // A new attempt supersedes any pending reset
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }

        let outcome = self.client.send(&after.form).await;
        let state = match outcome {
            Ok(_) => {
                tracing::info!("Contact message delivered");
                let state = self.apply(ContactEvent::Delivered);
                self.schedule_reset();
                state
            }
            Err(e) => {
                tracing::warn!("Contact message failed: {}", e);
                self.apply(ContactEvent::Failed(e.to_string()))
            }
        };

        state.status
    }

    fn schedule_reset(&mut self) {
        let state = self.state.clone();
        let status_tx = self.status_tx.clone();
        let delay = self.reset_after;

        self.reset_task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            transition(&state, &status_tx, ContactEvent::ResetElapsed);
        }));
    }

    fn apply(&self, event: ContactEvent) -> ContactState {
        transition(&self.state, &self.status_tx, event)
    }
}

impl Drop for ContactWidget {
    fn drop(&mut self) {
        if let Some(task) = self.reset_task.take() {
            task.abort();
        }
    }
}

/// Run one event through the reducer and announce status changes
fn transition(
    state: &Mutex<ContactState>,
    status_tx: &broadcast::Sender<SubmissionStatus>,
    event: ContactEvent,
) -> ContactState {
    let mut guard = lock(state);
    let before = guard.status;
    let next = reduce(std::mem::take(&mut *guard), event);
    *guard = next.clone();
    drop(guard);

    if next.status != before {
        tracing::debug!("Contact status {} -> {}", before, next.status);
        // No subscribers is fine
        let _ = status_tx.send(next.status);
    }
    next
}

/// A panic mid-transition leaves a consistent state behind, so poisoning is ignored
fn lock(state: &Mutex<ContactState>) -> MutexGuard<'_, ContactState> {
    state.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::client::tests::spawn_endpoint;
    use crate::contact::{ContactFormData, NoticeKind};
    use axum::http::StatusCode;

    fn fill(widget: &ContactWidget) {
        widget.edit(Field::Name, "Ada");
        widget.edit(Field::Email, "ada@example.com");
        widget.edit(Field::Subject, "Hi");
        widget.edit(Field::Message, "Hello there");
    }

    fn drain(rx: &mut broadcast::Receiver<SubmissionStatus>) -> Vec<SubmissionStatus> {
        let mut seen = Vec::new();
        while let Ok(status) = rx.try_recv() {
            seen.push(status);
        }
        seen
    }

    #[tokio::test]
    async fn test_empty_submit_stays_idle() {
        let (url, inbox) = spawn_endpoint(StatusCode::OK, "application/json", "{}").await;
        let mut widget = ContactWidget::new(ContactClient::new(url), Duration::from_secs(3));
        let mut rx = widget.subscribe();

        assert_eq!(widget.submit().await, SubmissionStatus::Idle);
        assert_eq!(widget.state().errors.len(), 4);
        assert!(drain(&mut rx).is_empty());
        assert!(inbox.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_success_clears_and_reverts() {
        let (url, inbox) = spawn_endpoint(StatusCode::OK, "application/json", "{}").await;
        let mut widget = ContactWidget::new(ContactClient::new(url), Duration::from_millis(50));
        let mut rx = widget.subscribe();
        fill(&widget);

        assert_eq!(widget.submit().await, SubmissionStatus::Success);
        let state = widget.state();
        assert_eq!(state.form, ContactFormData::default());
        assert!(state.errors.is_empty());
        assert_eq!(state.notice.map(|n| n.kind), Some(NoticeKind::Success));
        assert_eq!(inbox.lock().unwrap().len(), 1);

        tokio::time::sleep(Duration::from_millis(300)).await;
        assert_eq!(widget.status(), SubmissionStatus::Idle);
        assert_eq!(
            drain(&mut rx),
            vec![
                SubmissionStatus::Sending,
                SubmissionStatus::Success,
                SubmissionStatus::Idle
            ]
        );
    }

    #[tokio::test]
    async fn test_server_error_preserves_fields() {
        let (url, _) = spawn_endpoint(
            StatusCode::INTERNAL_SERVER_ERROR,
            "application/json",
            r#"{"message":"boom"}"#,
        )
        .await;
        let mut widget = ContactWidget::new(ContactClient::new(url), Duration::from_millis(50));
        let mut rx = widget.subscribe();
        fill(&widget);

        assert_eq!(widget.submit().await, SubmissionStatus::Error);
        let state = widget.state();
        assert_eq!(state.form.name, "Ada");
        assert_eq!(state.form.message, "Hello there");
        let notice = state.notice.unwrap();
        assert_eq!(notice.kind, NoticeKind::Error);
        assert!(notice.message.contains("boom"));

        // Errors stay until the user tries again
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(widget.status(), SubmissionStatus::Error);
        assert_eq!(
            drain(&mut rx),
            vec![SubmissionStatus::Sending, SubmissionStatus::Error]
        );
    }

    #[tokio::test]
    async fn test_drop_cancels_reset() {
        let (url, _) = spawn_endpoint(StatusCode::OK, "application/json", "{}").await;
        let mut widget = ContactWidget::new(ContactClient::new(url), Duration::from_millis(50));
        fill(&widget);
        widget.submit().await;

        let mut rx = widget.subscribe();
        drop(widget);
        tokio::time::sleep(Duration::from_millis(200)).await;
        // Sender went away with the widget and the timer never fired
        assert!(matches!(
            rx.try_recv(),
            Err(broadcast::error::TryRecvError::Closed)
        ));
    }
}
