use moka::future::{Cache, CacheBuilder};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use crate::models::MatchOverviewResponse;

const OVERVIEW_KEY: &str = "match:overview";

/// In-process cache for the team-TA overview
///
/// The overview only changes when an allocation run replaces the links, so
/// the route layer invalidates it right after a successful write. The TTL
/// bounds staleness from roster edits made by other services.
///
/// Every invalidation bumps a generation counter. A reader takes the
/// generation before querying and hands it to [`OverviewCache::set`], which
/// drops the entry again if an invalidation landed in between.
#[derive(Clone)]
pub struct OverviewCache {
    entries: Cache<&'static str, Arc<MatchOverviewResponse>>,
    generation: Arc<AtomicU64>,
}

impl OverviewCache {
    pub fn new(ttl_secs: u64) -> Self {
        let entries = CacheBuilder::new(1)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();

        Self {
            entries,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Current generation, to be read before loading the overview from storage
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub async fn get(&self) -> Option<Arc<MatchOverviewResponse>> {
        let hit = self.entries.get(OVERVIEW_KEY).await;
        tracing::trace!("Overview cache {}", if hit.is_some() { "hit" } else { "miss" });
        hit
    }

    /// Store an overview loaded at `generation`
    ///
    /// The entry is removed again if the cache was invalidated after
    /// `generation` was read, so a pre-write overview never outlives the write.
    pub async fn set(
        &self,
        overview: MatchOverviewResponse,
        generation: u64,
    ) -> Arc<MatchOverviewResponse> {
        let overview = Arc::new(overview);
        self.entries.insert(OVERVIEW_KEY, overview.clone()).await;

        if self.generation() != generation {
            self.entries.invalidate(OVERVIEW_KEY).await;
            tracing::debug!("Discarded overview loaded before an invalidation");
        }

        overview
    }

    pub async fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.entries.invalidate(OVERVIEW_KEY).await;
        tracing::debug!("Invalidated overview cache");
    }
}
