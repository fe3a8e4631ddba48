pub mod cron;
pub mod event;
pub mod external;
pub mod health;
pub mod location;
pub mod participant;
pub mod restaurant;

use crate::domain::models::event::Event;
use crate::domain::services::{i18n::Lang, identity::{authorize_creator, IdentityError}};
use crate::error::AppError;
use crate::state::AppState;

pub(crate) async fn load_event(state: &AppState, token: &str, lang: Lang) -> Result<Event, AppError> {
    state.event_repo.find_by_token(token).await?
        .ok_or_else(|| AppError::NotFound(lang.pick("Event not found", "イベントが見つかりません").into()))
}

pub(crate) fn ensure_creator(event: &Event, submitted: Option<&str>, lang: Lang) -> Result<(), AppError> {
    if authorize_creator(event.creator_password_hash.as_deref(), submitted) {
        Ok(())
    } else {
        Err(IdentityError::CreatorPasswordMismatch.localized(lang))
    }
}
