pub mod event;
pub mod participant;
pub mod location;
pub mod restaurant;
pub mod external;

/// Rows owned by an anonymous (name, password) identity rather than an account.
pub trait Credentialed {
    fn password_hash(&self) -> Option<&str>;
}
