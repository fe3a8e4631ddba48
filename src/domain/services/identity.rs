//! Ownerless identity: rows are claimed by a (name, optional password) pair.
//!
//! Hashes are salted, so a submitted pair is matched by verifying the password
//! against every row that carries the same name.

use argon2::{password_hash::{SaltString, PasswordHasher}, Argon2, PasswordHash, PasswordVerifier};
use rand::rngs::OsRng;
use thiserror::Error;

use crate::domain::models::Credentialed;
use crate::domain::services::i18n::Lang;
use crate::error::AppError;

#[derive(Debug)]
pub enum Resolution<T> {
    /// A row with this name and password already exists.
    Existing(T),
    /// Nobody in scope uses this name yet.
    New,
    /// The name is in use, but not with this password.
    Collision,
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityError {
    #[error("This name is already used by someone else. Check your password or choose another name")]
    NameTaken,
    #[error("No entry matches this name and password")]
    NoMatch,
    #[error("The organizer password is incorrect")]
    CreatorPasswordMismatch,
}

impl IdentityError {
    pub fn message(&self, lang: Lang) -> String {
        match lang {
            Lang::En => self.to_string(),
            Lang::Ja => match self {
                IdentityError::NameTaken => "この名前はすでに使われています。パスワードを確認するか、別の名前を入力してください",
                IdentityError::NoMatch => "名前とパスワードに一致する回答が見つかりません",
                IdentityError::CreatorPasswordMismatch => "幹事のパスワードが正しくありません",
            }.to_string(),
        }
    }

    pub fn localized(self, lang: Lang) -> AppError {
        let message = self.message(lang);
        match self {
            IdentityError::NameTaken => AppError::Conflict(message),
            IdentityError::NoMatch => AppError::NotFound(message),
            IdentityError::CreatorPasswordMismatch => AppError::Forbidden(message),
        }
    }
}

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing failed: {}", e)))?
        .to_string();
    Ok(hash)
}

pub fn hash_optional(password: Option<&str>) -> Result<Option<String>, AppError> {
    password.map(hash_password).transpose()
}

pub fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

/// A row without a password only matches a submission without one.
pub fn matches(stored_hash: Option<&str>, submitted: Option<&str>) -> bool {
    match (stored_hash, submitted) {
        (None, None) => true,
        (Some(hash), Some(password)) => verify_password(password, hash),
        _ => false,
    }
}

pub fn resolve<T: Credentialed>(same_name_rows: Vec<T>, submitted: Option<&str>) -> Resolution<T> {
    if same_name_rows.is_empty() {
        return Resolution::New;
    }
    same_name_rows
        .into_iter()
        .find(|row| matches(row.password_hash(), submitted))
        .map_or(Resolution::Collision, Resolution::Existing)
}

/// Events created without a password can be edited by anyone holding the link.
pub fn authorize_creator(stored_hash: Option<&str>, submitted: Option<&str>) -> bool {
    match stored_hash {
        None => true,
        Some(hash) => submitted.is_some_and(|p| verify_password(p, hash)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row(Option<String>, &'static str);

    impl Credentialed for Row {
        fn password_hash(&self) -> Option<&str> {
            self.0.as_deref()
        }
    }

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let a = hash_password("secret").unwrap();
        let b = hash_password("secret").unwrap();
        assert_ne!(a, b);
        assert!(verify_password("secret", &a));
        assert!(!verify_password("Secret", &a));
        assert!(!verify_password("secret", "not-a-phc-string"));
    }

    #[test]
    fn pair_matching_rules() {
        let hash = hash_password("pw12").unwrap();
        assert!(matches(None, None));
        assert!(!matches(None, Some("pw12")));
        assert!(!matches(Some(&hash), None));
        assert!(matches(Some(&hash), Some("pw12")));
        assert!(!matches(Some(&hash), Some("nope")));
    }

    #[test]
    fn resolve_picks_the_matching_row() {
        let rows = vec![
            Row(Some(hash_password("first").unwrap()), "a"),
            Row(Some(hash_password("second").unwrap()), "b"),
        ];
        match resolve(rows, Some("second")) {
            Resolution::Existing(row) => assert_eq!(row.1, "b"),
            other => panic!("expected existing row, got {:?}", other.is_new()),
        }
    }

    #[test]
    fn resolve_new_and_collision() {
        assert!(resolve(Vec::<Row>::new(), None).is_new());
        let rows = vec![Row(None, "a")];
        assert!(resolve(rows, Some("pw12")).is_collision());
    }

    #[test]
    fn creator_authorization() {
        let hash = hash_password("boss").unwrap();
        assert!(authorize_creator(None, None));
        assert!(authorize_creator(None, Some("anything")));
        assert!(authorize_creator(Some(&hash), Some("boss")));
        assert!(!authorize_creator(Some(&hash), None));
        assert!(!authorize_creator(Some(&hash), Some("bosss")));
    }

    impl<T> Resolution<T> {
        fn is_new(&self) -> bool {
            matches!(self, Resolution::New)
        }

        fn is_collision(&self) -> bool {
            matches!(self, Resolution::Collision)
        }
    }
}
