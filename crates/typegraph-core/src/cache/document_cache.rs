use crate::ast;
use crate::cache::Cache;
use crate::cache::CacheConfigurationError;
use sha2::Digest;
use sha2::Sha256;
use std::num::NonZeroUsize;
use std::sync::Arc;
use thiserror::Error;

const DEFAULT_CAPACITY: NonZeroUsize = match NonZeroUsize::new(100) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Identifies an executable document by the SHA-256 digest of its source
/// text (hex encoded).
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DocumentFingerprint(String);
impl DocumentFingerprint {
    pub fn of(source: &str) -> Self {
        Self(hex::encode(Sha256::digest(source.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}
impl std::fmt::Display for DocumentFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DocumentError {
    #[error("Error parsing document `{document_id}`: {err}")]
    ParseError {
        document_id: String,
        err: String,
    },
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct DocumentCacheConfig {
    /// The maximum number of parsed documents kept at once.
    pub capacity: usize,
}
impl Default for DocumentCacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY.get(),
        }
    }
}

/// A [`Cache`] of parsed executable documents (operations and fragments).
///
/// Documents are keyed by an id chosen by the caller, or by their
/// [`DocumentFingerprint`] when parsed through
/// [`DocumentCache::get_or_parse()`]. Concurrent requests for the same
/// uncached document parse it only once.
#[derive(Debug)]
pub struct DocumentCache {
    cache: Cache<Arc<ast::query::Document>, DocumentError>,
}
impl DocumentCache {
    pub fn new(capacity: usize) -> Result<Self, CacheConfigurationError> {
        Ok(Self {
            cache: Cache::new(capacity)?,
        })
    }

    pub fn from_config(config: &DocumentCacheConfig) -> Result<Self, CacheConfigurationError> {
        Self::new(config.capacity)
    }

    pub fn capacity(&self) -> usize {
        self.cache.capacity()
    }

    pub fn clear(&self) {
        self.cache.clear()
    }

    /// The number of documents currently cached.
    pub fn count(&self) -> usize {
        self.cache.len()
    }

    /// Parse `source` (or reuse the cached parse of identical source text).
    pub fn get_or_parse(
        &self,
        source: &str,
    ) -> Result<(DocumentFingerprint, Arc<ast::query::Document>), DocumentError> {
        let fingerprint = DocumentFingerprint::of(source);
        let document = self.get_or_parse_with_id(fingerprint.as_str(), source)?;
        Ok((fingerprint, document))
    }

    /// Parse `source` and cache it under `document_id` unless a document is
    /// already cached under that id, in which case the cached document is
    /// returned and `source` is never parsed.
    pub fn get_or_parse_with_id(
        &self,
        document_id: &str,
        source: &str,
    ) -> Result<Arc<ast::query::Document>, DocumentError> {
        self.cache.try_get_or_create(document_id, || {
            log::debug!("Parsing document `{document_id}`.");
            ast::query::parse(source)
                .map(Arc::new)
                .map_err(|err| DocumentError::ParseError {
                    document_id: document_id.to_string(),
                    err: err.to_string(),
                })
        })
    }

    pub fn try_add_document(&self, document_id: &str, document: Arc<ast::query::Document>) -> bool {
        self.cache.try_add(document_id, document)
    }

    pub fn try_get_document(&self, document_id: &str) -> Option<Arc<ast::query::Document>> {
        self.cache.try_get(document_id)
    }
}
impl Default for DocumentCache {
    fn default() -> Self {
        Self {
            cache: Cache::with_capacity(DEFAULT_CAPACITY),
        }
    }
}
