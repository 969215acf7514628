#[allow(clippy::module_inception)]
mod cache;
mod document_cache;

pub use cache::Cache;
pub use cache::CacheConfigurationError;
pub use document_cache::DocumentCache;
pub use document_cache::DocumentCacheConfig;
pub use document_cache::DocumentError;
pub use document_cache::DocumentFingerprint;

#[cfg(test)]
mod tests;
