use std::sync::Arc;

use chrono_tz::Tz;
use tera::{Context, Tera};
use tracing::info;

use crate::domain::models::event::Event;
use crate::domain::ports::EmailService;
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;

pub const EVENT_CREATED_TEMPLATE: &str = "event_created.html";

pub struct EventCreatedMail {
    pub subject: String,
    pub html_body: String,
    pub ics: Option<String>,
}

pub fn render_event_created(templates: &Tera, event: &Event, tz: Tz, share_url: &str) -> Result<EventCreatedMail, AppError> {
    let mut context = Context::new();
    context.insert("creator_name", &event.creator_name);
    context.insert("event_title", &event.title);
    context.insert("event_description", &event.description);
    context.insert("date", &event.date.format("%Y-%m-%d").to_string());
    context.insert("start_time", &event.start_time.format("%H:%M").to_string());
    context.insert("end_time", &event.end_time.format("%H:%M").to_string());
    context.insert("share_url", share_url);

    let html_body = templates
        .render(EVENT_CREATED_TEMPLATE, &context)
        .map_err(|e| AppError::InternalWithMsg(format!("Tera render error: {:?}", e)))?;

    Ok(EventCreatedMail {
        subject: format!("Lunch created: {}", event.title),
        html_body,
        ics: generate_ics(event, tz, share_url),
    })
}

/// Sends the share link to the organizer.
pub async fn send_event_created(
    email_service: Arc<dyn EmailService>,
    templates: Arc<Tera>,
    event: Event,
    tz: Tz,
    share_url: String,
) -> Result<(), AppError> {
    let recipient = match event.creator_email.as_deref() {
        Some(r) => r.to_string(),
        None => return Ok(()),
    };

    let mail = render_event_created(&templates, &event, tz, &share_url)?;
    let (attachment_name, attachment_data) = match mail.ics {
        Some(ics) => (Some("lunch.ics"), Some(ics.into_bytes())),
        None => (None, None),
    };

    email_service
        .send(&recipient, &mail.subject, &mail.html_body, attachment_name, attachment_data.as_deref())
        .await?;
    info!("Sent share link for event {} to organizer", event.id);
    Ok(())
}
