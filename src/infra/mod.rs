pub mod email;
pub mod external;
pub mod factory;
pub mod repositories;
