pub mod cron_auth;
pub mod lang;
