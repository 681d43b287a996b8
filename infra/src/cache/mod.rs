//! Cache module for Redis-based caching
//!
//! Provides the Redis connection used by the session revocation store.

pub mod redis_client;


pub use redis_client::RedisClient;

// Re-export commonly used types
pub use ua_shared::config::CacheConfig;
