use crate::errors::RiskResult;
use std::time::{Duration, Instant};

/// Index-price snapshot with an explicit time-to-live.
///
/// Owned by whoever serves requests and passed by reference; there is no
/// process-wide cache. Callers supply `now` so freshness is deterministic.
#[derive(Debug, Clone)]
pub struct IndexPriceCache {
    ttl: Duration,
    entry: Option<(f64, Instant)>,
}

impl IndexPriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Cached price if still fresh. Non-positive prices count as absent.
    pub fn get(&self, now: Instant) -> Option<f64> {
        let (price, stored_at) = self.entry?;
        let fresh = now.saturating_duration_since(stored_at) < self.ttl;
        (fresh && price > 0.0).then_some(price)
    }

    pub fn put(&mut self, price: f64, now: Instant) {
        self.entry = Some((price, now));
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Cached price, or the result of `fetch` when stale. A failed fetch
    /// leaves the cache untouched.
    pub fn get_or_refresh<F>(&mut self, now: Instant, fetch: F) -> RiskResult<f64>
    where
        F: FnOnce() -> RiskResult<f64>,
    {
        if let Some(price) = self.get(now) {
            return Ok(price);
        }

        let price = fetch()?;
        tracing::debug!(price, ttl_secs = self.ttl.as_secs(), "index price refreshed");
        self.put(price, now);
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::RiskError;
    use std::cell::Cell;

    #[test]
    fn test_fresh_hit_skips_fetch() {
        let t0 = Instant::now();
        let mut cache = IndexPriceCache::new(Duration::from_secs(120));
        let calls = Cell::new(0);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok(2500.0)
        };
        assert_eq!(cache.get_or_refresh(t0, fetch).unwrap(), 2500.0);
        assert_eq!(
            cache.get_or_refresh(t0 + Duration::from_secs(60), || Ok(9999.0)).unwrap(),
            2500.0
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_expires_after_ttl() {
        let t0 = Instant::now();
        let mut cache = IndexPriceCache::new(Duration::from_secs(120));
        cache.put(2500.0, t0);
        assert_eq!(cache.get(t0 + Duration::from_secs(119)), Some(2500.0));
        assert_eq!(cache.get(t0 + Duration::from_secs(120)), None);
        let refreshed = cache.get_or_refresh(t0 + Duration::from_secs(121), || Ok(2600.0)).unwrap();
        assert_eq!(refreshed, 2600.0);
    }

    #[test]
    fn test_invalidate_and_zero_price() {
        let t0 = Instant::now();
        let mut cache = IndexPriceCache::new(Duration::from_secs(120));
        cache.put(0.0, t0);
        assert_eq!(cache.get(t0), None);
        cache.put(2500.0, t0);
        cache.invalidate();
        assert_eq!(cache.get(t0), None);
    }

    #[test]
    fn test_failed_fetch_keeps_previous_entry() {
        let t0 = Instant::now();
        let mut cache = IndexPriceCache::new(Duration::from_secs(10));
        cache.put(2500.0, t0);
        let later = t0 + Duration::from_secs(30);
        let err = cache.get_or_refresh(later, || Err(RiskError::Snapshot("feed down".into())));
        assert!(err.is_err());
        // Entry untouched by the failed refresh.
        assert_eq!(cache.get(t0), Some(2500.0));
    }
}
