pub mod i18n;
pub mod validation;
pub mod identity;
pub mod tally;
pub mod reset;
pub mod calendar;
pub mod notification;
