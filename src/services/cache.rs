use std::time::Duration;

use crate::models::Grant;

/// In-process TTL cache for grants fetched from the registry
///
/// Registry grants change rarely, so detail lookups are served from
/// memory until the TTL lapses.
#[derive(Clone)]
pub struct GrantCache {
    grants: moka::future::Cache<String, Grant>,
}

impl GrantCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let grants = moka::future::CacheBuilder::new(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self { grants }
    }

    pub async fn get(&self, grant_id: &str) -> Option<Grant> {
        let key = CacheKey::grant(grant_id);
        let hit = self.grants.get(&key).await;
        if hit.is_some() {
            tracing::trace!("Grant cache hit: {}", key);
        } else {
            tracing::trace!("Grant cache miss: {}", key);
        }
        hit
    }

    pub async fn insert(&self, grant: Grant) {
        let key = CacheKey::grant(&grant.id);
        self.grants.insert(key, grant).await;
    }

}

/// Cache key builder
pub struct CacheKey;

impl CacheKey {
    /// Build a cache key for a registry grant
    pub fn grant(grant_id: &str) -> String {
        format!("grant:{}", grant_id)
    }
}
