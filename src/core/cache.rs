//! Process-wide cache of loaded models.
//!
//! Loading a fine-tuned BERT head means reading several hundred megabytes of
//! weights. The cache makes sure each weight file is materialised at most once
//! per device, no matter how many pipelines are built from it.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Trait implemented by model option types to generate a stable cache key.
pub trait ModelOptions {
    fn cache_key(&self) -> String;
}

type CacheStorage = HashMap<(TypeId, String), Arc<dyn Any + Send + Sync>>;

/// A thread-safe cache for model instances.
///
/// Entries are keyed by the model type and a string key. Hits return a clone,
/// which shares the underlying tensors with the cached instance.
pub struct ModelCache {
    cache: Arc<Mutex<CacheStorage>>,
}

impl ModelCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Return the cached model for `key`, or run `loader` and cache its result.
    ///
    /// A failing loader leaves the cache untouched.
    pub async fn get_or_create<M, F>(&self, key: &str, loader: F) -> anyhow::Result<M>
    where
        M: Clone + Send + Sync + 'static,
        F: FnOnce() -> anyhow::Result<M>,
    {
        let cache_key = (TypeId::of::<M>(), key.to_string());

        {
            let cache = self.cache.lock().await;
            if let Some(model) = cache
                .get(&cache_key)
                .and_then(|cached| cached.downcast_ref::<M>())
            {
                tracing::debug!(key, "model cache hit");
                return Ok(model.clone());
            }
        }

        tracing::debug!(key, "model cache miss, loading");
        let model = loader()?;

        let mut cache = self.cache.lock().await;
        cache.insert(cache_key, Arc::new(model.clone()) as Arc<dyn Any + Send + Sync>);

        Ok(model)
    }

    pub async fn clear(&self) {
        self.cache.lock().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.cache.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.cache.lock().await.is_empty()
    }
}

impl Default for ModelCache {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_MODEL_CACHE: once_cell::sync::Lazy<ModelCache> =
    once_cell::sync::Lazy::new(ModelCache::new);

/// Get a reference to the global model cache.
pub fn global_cache() -> &'static ModelCache {
    &GLOBAL_MODEL_CACHE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct StubHead {
        weights: String,
    }

    #[tokio::test]
    async fn second_request_reuses_loaded_model() {
        let cache = ModelCache::new();

        let first = cache
            .get_or_create::<StubHead, _>("mood-models/mood_model.pt", || {
                Ok(StubHead {
                    weights: "first-load".to_string(),
                })
            })
            .await
            .unwrap();

        let second = cache
            .get_or_create::<StubHead, _>("mood-models/mood_model.pt", || {
                Ok(StubHead {
                    weights: "reloaded".to_string(),
                })
            })
            .await
            .unwrap();

        assert_eq!(first.weights, "first-load");
        assert_eq!(second.weights, "first-load");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let cache = ModelCache::new();

        let failed = cache
            .get_or_create::<StubHead, _>("risk", || anyhow::bail!("missing weights"))
            .await;
        assert!(failed.is_err());
        assert!(cache.is_empty().await);

        let loaded = cache
            .get_or_create::<StubHead, _>("risk", || {
                Ok(StubHead {
                    weights: "risk".to_string(),
                })
            })
            .await
            .unwrap();
        assert_eq!(loaded.weights, "risk");
    }
}
