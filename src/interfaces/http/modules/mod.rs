pub mod metrics;
pub mod probe;
pub mod request_id;
pub mod roles;
pub mod users;
