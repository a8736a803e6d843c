use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::{QueryCache, QueryInvalidator};
use crate::config::core_config::CoreConfig;
use crate::model::entity::ListEntity;

type AnyCache = Arc<dyn Any + Send + Sync>;

/// One [`QueryCache`] per entity family, shared by every controller of that family.
#[derive(Default)]
pub struct QueryCacheRegistry {
    caches: Mutex<HashMap<&'static str, (AnyCache, Arc<dyn QueryInvalidator>)>>,
}

impl QueryCacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cache of `E`, creating it from the family's list config on first use.
    pub fn cache_for<E: ListEntity>(&self, config: &CoreConfig) -> Arc<QueryCache<E>> {
        let mut caches = self.caches.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(cache) = caches
            .get(E::RESOURCE)
            .and_then(|(cache, _)| cache.clone().downcast::<QueryCache<E>>().ok())
        {
            return cache;
        }

        let list_config = config.list_config_for(E::RESOURCE);
        let cache = Arc::new(QueryCache::<E>::new(
            list_config.stale_time,
            list_config.cache_size,
        ));
        caches.insert(E::RESOURCE, (cache.clone(), cache.clone()));

        cache
    }

    /// Drops cached pages of `family`, whatever its entity type.
    pub fn invalidate_family(&self, family: &str) -> usize {
        self.caches
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(family)
            .map(|(_, invalidator)| invalidator.invalidate_family(family))
            .unwrap_or_default()
    }
}
