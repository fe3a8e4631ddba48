use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use rand::{distributions::Alphanumeric, Rng};

/// Times travel as `HH:MM` in both directions.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&time.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&raw, "%H:%M").map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub token: String,
    pub creator_name: String,
    #[serde(skip_serializing)]
    pub creator_email: Option<String>,
    #[serde(skip_serializing)]
    pub creator_password_hash: Option<String>,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "hhmm")]
    pub end_time: NaiveTime,
    pub title: String,
    pub description: String,
    pub auto_reset: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewEventParams {
    pub creator_name: String,
    pub creator_email: Option<String>,
    pub creator_password_hash: Option<String>,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub title: String,
    pub description: String,
    pub auto_reset: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Event {
    pub fn new(params: NewEventParams) -> Self {
        let token: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(32)
            .map(char::from)
            .collect();
        let now = Utc::now();

        Self {
            id: Uuid::new_v4().to_string(),
            token,
            creator_name: params.creator_name,
            creator_email: params.creator_email,
            creator_password_hash: params.creator_password_hash,
            date: params.date,
            start_time: params.start_time,
            end_time: params.end_time,
            title: params.title,
            description: params.description,
            auto_reset: params.auto_reset,
            latitude: params.latitude,
            longitude: params.longitude,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Event {
        Event::new(NewEventParams {
            creator_name: "Aki".into(),
            creator_email: Some("aki@example.com".into()),
            creator_password_hash: Some("$argon2id$fake".into()),
            date: NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(13, 0, 0).unwrap(),
            title: "Team lunch".into(),
            description: String::new(),
            auto_reset: false,
            latitude: None,
            longitude: None,
        })
    }

    #[test]
    fn new_event_gets_share_token() {
        let event = sample();
        assert_eq!(event.token.len(), 32);
        assert!(event.token.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(event.token, sample().token);
    }

    #[test]
    fn serialized_event_hides_creator_secrets() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("creator_password_hash").is_none());
        assert!(json.get("creator_email").is_none());
        assert_eq!(json["start_time"], "12:00");
        assert_eq!(json["end_time"], "13:00");
        assert_eq!(json["date"], "2025-04-01");
    }
}
