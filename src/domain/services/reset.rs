use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::domain::ports::EventRepository;
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ResetReport {
    pub date: NaiveDate,
    pub reset_count: usize,
    pub event_ids: Vec<String>,
}

pub fn today_in(tz: Tz, now: DateTime<Utc>) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// Clears yesterday's answers from every auto-reset event and rolls it forward to `today`.
/// Safe to run repeatedly: events already on `today` are not selected again.
pub async fn run_daily_reset(repo: &dyn EventRepository, today: NaiveDate) -> Result<ResetReport, AppError> {
    let due = repo.list_due_for_reset(today).await?;
    let mut event_ids = Vec::with_capacity(due.len());

    for event in due {
        match repo.reset_for_day(&event.id, today).await {
            Ok(true) => {
                info!("Reset event {} from {} to {}", event.id, event.date, today);
                event_ids.push(event.id);
            }
            Ok(false) => debug!("Event {} is no longer due, skipping", event.id),
            Err(e) => error!("Failed to reset event {}: {:?}", event.id, e),
        }
    }

    Ok(ResetReport { date: today, reset_count: event_ids.len(), event_ids })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::event::{Event, NewEventParams};
    use async_trait::async_trait;
    use chrono::{NaiveTime, TimeZone};
    use std::sync::Mutex;

    /// Holds events in memory; resetting `broken` always fails.
    struct MemoryRepo {
        events: Mutex<Vec<Event>>,
        broken: String,
    }

    #[async_trait]
    impl EventRepository for MemoryRepo {
        async fn create(&self, event: &Event) -> Result<Event, AppError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(event.clone())
        }
        async fn find_by_token(&self, token: &str) -> Result<Option<Event>, AppError> {
            Ok(self.events.lock().unwrap().iter().find(|e| e.token == token).cloned())
        }
        async fn update(&self, event: &Event) -> Result<Event, AppError> {
            Ok(event.clone())
        }
        async fn delete(&self, _id: &str) -> Result<(), AppError> {
            Ok(())
        }
        async fn list_due_for_reset(&self, today: NaiveDate) -> Result<Vec<Event>, AppError> {
            Ok(self.events.lock().unwrap().iter().filter(|e| e.auto_reset && e.date < today).cloned().collect())
        }
        async fn reset_for_day(&self, event_id: &str, today: NaiveDate) -> Result<bool, AppError> {
            if event_id == self.broken {
                return Err(AppError::InternalWithMsg("disk full".into()));
            }
            let mut events = self.events.lock().unwrap();
            match events.iter_mut().find(|e| e.id == event_id && e.auto_reset && e.date < today) {
                Some(event) => {
                    event.date = today;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    fn event(date: NaiveDate, auto_reset: bool) -> Event {
        Event::new(NewEventParams {
            creator_name: "Aki".into(),
            creator_email: None,
            creator_password_hash: None,
            date,
            start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            title: "Lunch".into(),
            description: String::new(),
            auto_reset,
            latitude: None,
            longitude: None,
        })
    }

    #[tokio::test]
    async fn failed_events_are_skipped_and_retried_next_run() {
        let yesterday = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();

        let ok = event(yesterday, true);
        let broken = event(yesterday, true);
        let one_off = event(yesterday, false);
        let repo = MemoryRepo {
            broken: broken.id.clone(),
            events: Mutex::new(vec![ok.clone(), broken.clone(), one_off]),
        };

        let report = run_daily_reset(&repo, today).await.unwrap();
        assert_eq!(report.reset_count, 1);
        assert_eq!(report.event_ids, vec![ok.id.clone()]);

        let again = run_daily_reset(&repo, today).await.unwrap();
        assert_eq!(again.reset_count, 0);
        assert_eq!(repo.list_due_for_reset(today).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn events_moved_after_listing_are_not_counted() {
        let yesterday = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 4, 2).unwrap();

        let moved = event(yesterday, true);
        let repo = MemoryRepo { broken: String::new(), events: Mutex::new(vec![moved.clone()]) };

        let due = repo.list_due_for_reset(today).await.unwrap();
        repo.events.lock().unwrap()[0].date = NaiveDate::from_ymd_opt(2025, 4, 9).unwrap();

        assert!(!repo.reset_for_day(&due[0].id, today).await.unwrap());
        let report = run_daily_reset(&repo, today).await.unwrap();
        assert_eq!(report.reset_count, 0);
        assert!(report.event_ids.is_empty());
    }

    #[test]
    fn today_follows_configured_timezone() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 20, 0, 0).unwrap();
        assert_eq!(today_in(chrono_tz::Asia::Tokyo, now), NaiveDate::from_ymd_opt(2025, 1, 2).unwrap());
        assert_eq!(today_in(chrono_tz::UTC, now), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
        assert_eq!(today_in(chrono_tz::America::Los_Angeles, now), NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    }
}
