//! Infrastructure layer - external concerns

pub mod cache;
pub mod crypto;
pub mod database;
pub mod excel;

pub use cache::{create_cache, Cache, InMemoryCache, RedisCache, SharedCache};
pub use database::{init_database, DatabaseConfig};
