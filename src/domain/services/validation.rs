use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use thiserror::Error;

use crate::domain::services::i18n::Lang;
use crate::error::AppError;

pub const MAX_NAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 4;
pub const MAX_PASSWORD_LEN: usize = 72;
pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const MAX_COMMENT_LEN: usize = 200;
pub const MAX_CANDIDATE_NAME_LEN: usize = 100;
pub const MAX_QUERY_LEN: usize = 100;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static DATE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static TIME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").unwrap());

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Name is required")]
    NameEmpty,
    #[error("Name must be at most 50 characters")]
    NameTooLong,
    #[error("Password must be between 4 and 72 characters")]
    PasswordLength,
    #[error("Invalid email address")]
    EmailInvalid,
    #[error("Title is required")]
    TitleEmpty,
    #[error("Title must be at most 100 characters")]
    TitleTooLong,
    #[error("Description must be at most 500 characters")]
    DescriptionTooLong,
    #[error("Comment must be at most 200 characters")]
    CommentTooLong,
    #[error("Invalid date (expected YYYY-MM-DD)")]
    DateInvalid,
    #[error("Invalid time (expected HH:MM)")]
    TimeInvalid,
    #[error("End time must be after start time")]
    TimeWindowInvalid,
    #[error("Location name is required")]
    CandidateNameEmpty,
    #[error("Location name must be at most 100 characters")]
    CandidateNameTooLong,
    #[error("Either a location name or a restaurant is required")]
    CandidateSourceMissing,
    #[error("This location is already a candidate")]
    CandidateDuplicate,
    #[error("Latitude and longitude must be given together")]
    CoordinatesIncomplete,
    #[error("Coordinates are out of range")]
    CoordinatesInvalid,
    #[error("Search keyword must be between 1 and 100 characters")]
    QueryInvalid,
    #[error("Place id is required")]
    PlaceIdEmpty,
}

impl ValidationError {
    pub fn message(&self, lang: Lang) -> String {
        match lang {
            Lang::En => self.to_string(),
            Lang::Ja => self.message_ja(),
        }
    }

    fn message_ja(&self) -> String {
        match self {
            ValidationError::NameEmpty => "名前を入力してください".to_string(),
            ValidationError::NameTooLong => format!("名前は{}文字以内で入力してください", MAX_NAME_LEN),
            ValidationError::PasswordLength => format!("パスワードは{}〜{}文字で入力してください", MIN_PASSWORD_LEN, MAX_PASSWORD_LEN),
            ValidationError::EmailInvalid => "メールアドレスの形式が正しくありません".to_string(),
            ValidationError::TitleEmpty => "タイトルを入力してください".to_string(),
            ValidationError::TitleTooLong => format!("タイトルは{}文字以内で入力してください", MAX_TITLE_LEN),
            ValidationError::DescriptionTooLong => format!("説明は{}文字以内で入力してください", MAX_DESCRIPTION_LEN),
            ValidationError::CommentTooLong => format!("コメントは{}文字以内で入力してください", MAX_COMMENT_LEN),
            ValidationError::DateInvalid => "日付の形式が正しくありません（YYYY-MM-DD）".to_string(),
            ValidationError::TimeInvalid => "時刻の形式が正しくありません（HH:MM）".to_string(),
            ValidationError::TimeWindowInvalid => "終了時刻は開始時刻より後にしてください".to_string(),
            ValidationError::CandidateNameEmpty => "場所の名前を入力してください".to_string(),
            ValidationError::CandidateNameTooLong => format!("場所の名前は{}文字以内で入力してください", MAX_CANDIDATE_NAME_LEN),
            ValidationError::CandidateSourceMissing => "場所の名前またはお店を指定してください".to_string(),
            ValidationError::CandidateDuplicate => "この場所はすでに候補に追加されています".to_string(),
            ValidationError::CoordinatesIncomplete => "緯度と経度は両方指定してください".to_string(),
            ValidationError::CoordinatesInvalid => "緯度・経度の値が範囲外です".to_string(),
            ValidationError::QueryInvalid => format!("検索キーワードは1〜{}文字で入力してください", MAX_QUERY_LEN),
            ValidationError::PlaceIdEmpty => "店舗IDを指定してください".to_string(),
        }
    }

    pub fn localized(self, lang: Lang) -> AppError {
        let message = self.message(lang);
        match self {
            ValidationError::CandidateDuplicate => AppError::Conflict(message),
            _ => AppError::Validation(message),
        }
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameEmpty);
    }
    if char_len(name) > MAX_NAME_LEN {
        return Err(ValidationError::NameTooLong);
    }
    Ok(name.to_string())
}

/// An empty password is the same as no password.
pub fn validate_password(raw: Option<&str>) -> Result<Option<&str>, ValidationError> {
    match raw {
        None | Some("") => Ok(None),
        Some(p) => {
            let len = char_len(p);
            if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
                return Err(ValidationError::PasswordLength);
            }
            Ok(Some(p))
        }
    }
}

pub fn validate_email(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    let email = match raw.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(e) => e,
    };
    if email.len() > MAX_EMAIL_LEN || !EMAIL_RE.is_match(email) {
        return Err(ValidationError::EmailInvalid);
    }
    Ok(Some(email.to_string()))
}

pub fn validate_title(raw: &str) -> Result<String, ValidationError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(ValidationError::TitleEmpty);
    }
    if char_len(title) > MAX_TITLE_LEN {
        return Err(ValidationError::TitleTooLong);
    }
    Ok(title.to_string())
}

pub fn validate_description(raw: &str) -> Result<String, ValidationError> {
    let description = raw.trim();
    if char_len(description) > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::DescriptionTooLong);
    }
    Ok(description.to_string())
}

pub fn validate_comment(raw: Option<&str>) -> Result<Option<String>, ValidationError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(c) if char_len(c) > MAX_COMMENT_LEN => Err(ValidationError::CommentTooLong),
        Some(c) => Ok(Some(c.to_string())),
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, ValidationError> {
    if !DATE_RE.is_match(raw) {
        return Err(ValidationError::DateInvalid);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| ValidationError::DateInvalid)
}

pub fn parse_time(raw: &str) -> Result<NaiveTime, ValidationError> {
    if !TIME_RE.is_match(raw) {
        return Err(ValidationError::TimeInvalid);
    }
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| ValidationError::TimeInvalid)
}

pub fn validate_time_window(start: NaiveTime, end: NaiveTime) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::TimeWindowInvalid);
    }
    Ok(())
}

pub fn validate_candidate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::CandidateNameEmpty);
    }
    if char_len(name) > MAX_CANDIDATE_NAME_LEN {
        return Err(ValidationError::CandidateNameTooLong);
    }
    Ok(name.to_string())
}

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(f64, f64), ValidationError> {
    if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
        return Err(ValidationError::CoordinatesInvalid);
    }
    Ok((latitude, longitude))
}

pub fn validate_optional_coordinates(latitude: Option<f64>, longitude: Option<f64>) -> Result<Option<(f64, f64)>, ValidationError> {
    match (latitude, longitude) {
        (None, None) => Ok(None),
        (Some(lat), Some(lon)) => validate_coordinates(lat, lon).map(Some),
        _ => Err(ValidationError::CoordinatesIncomplete),
    }
}

pub fn validate_place_id(raw: &str) -> Result<String, ValidationError> {
    let place_id = raw.trim();
    if place_id.is_empty() {
        return Err(ValidationError::PlaceIdEmpty);
    }
    Ok(place_id.to_string())
}

pub fn validate_query(raw: &str) -> Result<String, ValidationError> {
    let query = raw.trim();
    if query.is_empty() || char_len(query) > MAX_QUERY_LEN {
        return Err(ValidationError::QueryInvalid);
    }
    Ok(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_boundaries() {
        assert_eq!(validate_name("  Hana  ").unwrap(), "Hana");
        assert_eq!(validate_name("   "), Err(ValidationError::NameEmpty));
        assert!(validate_name(&"a".repeat(50)).is_ok());
        assert_eq!(validate_name(&"a".repeat(51)), Err(ValidationError::NameTooLong));
        // counted in characters, not bytes
        assert!(validate_name(&"あ".repeat(50)).is_ok());
    }

    #[test]
    fn password_is_optional_but_bounded() {
        assert_eq!(validate_password(None), Ok(None));
        assert_eq!(validate_password(Some("")), Ok(None));
        assert_eq!(validate_password(Some("abc")), Err(ValidationError::PasswordLength));
        assert_eq!(validate_password(Some("abcd")), Ok(Some("abcd")));
        assert_eq!(validate_password(Some("x".repeat(73).as_str())), Err(ValidationError::PasswordLength));
    }

    #[test]
    fn email_format() {
        assert_eq!(validate_email(Some("  a@b.co ")).unwrap(), Some("a@b.co".to_string()));
        assert_eq!(validate_email(Some("")), Ok(None));
        assert_eq!(validate_email(Some("not-an-email")), Err(ValidationError::EmailInvalid));
        assert_eq!(validate_email(Some("a b@c.d")), Err(ValidationError::EmailInvalid));
    }

    #[test]
    fn date_and_time_formats() {
        assert!(parse_date("2025-02-28").is_ok());
        assert_eq!(parse_date("2025-02-30"), Err(ValidationError::DateInvalid));
        assert_eq!(parse_date("2025/02/28"), Err(ValidationError::DateInvalid));
        assert_eq!(parse_date("25-2-28"), Err(ValidationError::DateInvalid));

        assert!(parse_time("00:00").is_ok());
        assert!(parse_time("23:59").is_ok());
        assert_eq!(parse_time("24:00"), Err(ValidationError::TimeInvalid));
        assert_eq!(parse_time("9:30"), Err(ValidationError::TimeInvalid));
        assert_eq!(parse_time("12:00:00"), Err(ValidationError::TimeInvalid));
    }

    #[test]
    fn time_window_must_be_forward() {
        let noon = parse_time("12:00").unwrap();
        let one = parse_time("13:00").unwrap();
        assert!(validate_time_window(noon, one).is_ok());
        assert_eq!(validate_time_window(noon, noon), Err(ValidationError::TimeWindowInvalid));
        assert_eq!(validate_time_window(one, noon), Err(ValidationError::TimeWindowInvalid));
    }

    #[test]
    fn coordinates_need_both_halves() {
        assert_eq!(validate_optional_coordinates(None, None), Ok(None));
        assert_eq!(validate_optional_coordinates(Some(35.6), None), Err(ValidationError::CoordinatesIncomplete));
        assert_eq!(validate_optional_coordinates(Some(91.0), Some(0.0)), Err(ValidationError::CoordinatesInvalid));
        assert_eq!(validate_optional_coordinates(Some(35.68), Some(139.76)), Ok(Some((35.68, 139.76))));
    }

    #[test]
    fn localized_messages() {
        assert_eq!(ValidationError::TimeInvalid.message(Lang::En), "Invalid time (expected HH:MM)");
        assert_eq!(ValidationError::NameTooLong.message(Lang::Ja), "名前は50文字以内で入力してください");
        assert!(matches!(ValidationError::CandidateDuplicate.localized(Lang::En), AppError::Conflict(_)));
        assert!(matches!(ValidationError::NameEmpty.localized(Lang::Ja), AppError::Validation(_)));
    }
}
