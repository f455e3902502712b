//! Contact form - field state, submission state machine, and delivery

pub mod client;
mod form;
mod view;
mod widget;

pub use client::{ContactClient, ContactError, ContactReply};
pub use form::{
    reduce, ContactEvent, ContactFormData, ContactState, Field, FieldErrors, Notice, NoticeKind,
    SubmissionStatus,
};
pub use view::{button_label, render_contact, submit_script};
pub use widget::ContactWidget;
