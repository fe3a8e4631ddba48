use crate::domain::models::event::Event;
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, DateTime};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event as IcalEvent, EventLike};

fn to_utc(tz: Tz, date: NaiveDate, time: NaiveTime) -> Option<DateTime<Utc>> {
    tz.from_local_datetime(&date.and_time(time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Generates an iCalendar (.ics) string for a lunch event, or `None` when its
/// local window does not exist in `tz`.
pub fn generate_ics(event: &Event, tz: Tz, share_url: &str) -> Option<String> {
    let starts = to_utc(tz, event.date, event.start_time)?;
    let ends = to_utc(tz, event.date, event.end_time)?;

    let description = if event.description.is_empty() {
        share_url.to_string()
    } else {
        format!("{}\n\n{}", event.description, share_url)
    };

    let mut ical_event = IcalEvent::new();
    ical_event
        .summary(&event.title)
        .description(&description)
        .starts(starts)
        .ends(ends)
        .uid(&event.id);

    let mut calendar = Calendar::new();
    calendar.push(ical_event.done());
    Some(calendar.to_string())
}
