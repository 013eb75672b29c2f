//! Infrastructure adapters for the visibility engine ports.

#![forbid(unsafe_code)]

mod in_memory_registration_cache;
mod in_memory_visibility_repository;
mod postgres_visibility_repository;
mod redis_registration_cache;
mod visibility_engine;
mod visibility_engine_config;

pub use in_memory_registration_cache::InMemoryRegistrationCache;
pub use in_memory_visibility_repository::InMemoryVisibilityRepository;
pub use postgres_visibility_repository::PostgresVisibilityRepository;
pub use redis_registration_cache::RedisRegistrationCache;
pub use visibility_engine::{
    VisibilityEngine, build_visibility_engine, build_visibility_engine_with_pool,
};
pub use visibility_engine_config::{RegistrationCacheProvider, VisibilityEngineConfig};
