//! Cache
//!
//! Este módulo contiene el sistema de cache de contenido sobre Redis:
//! claves deterministas por dominio, read-through e invalidación por
//! patterns.

pub mod cache_config;
pub mod content_cache;
pub mod domain;
pub mod invalidation;
pub mod keys;
pub mod manager;
pub mod read_through;
pub mod redis_store;
pub mod store;

pub use cache_config::CacheConfig;
pub use content_cache::ContentCache;
pub use domain::{CacheDomain, CACHE_NAMESPACE};
pub use manager::{CacheManager, CacheStats};
pub use read_through::CacheOptions;
pub use redis_store::RedisStore;
pub use store::{CacheError, CacheStore, MemoryStore};
