pub mod sqlite_event_repo;
pub mod sqlite_participant_repo;
pub mod sqlite_location_repo;
pub mod sqlite_restaurant_repo;

pub mod postgres_event_repo;
pub mod postgres_participant_repo;
pub mod postgres_location_repo;
pub mod postgres_restaurant_repo;
