use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::client::{ApiClient, Envelope, Operation};
use crate::endpoints;
use crate::errors::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VenueIdentity {
    venue_id: i64,
    user_id: Option<i64>,
}

/// Memoized id of the caller's own venue.
///
/// The lock is held across the fetch, so concurrent first callers share one
/// request. Login and logout call [`invalidate`](Self::invalidate).
#[derive(Default)]
pub struct VenueIdentityCache {
    inner: Mutex<Option<VenueIdentity>>,
}

impl VenueIdentityCache {
    pub fn new() -> Self { Self::default() }

    pub async fn get_my_venue_id(&self, client: &ApiClient) -> Result<i64, ClientError> {
        let mut guard = self.inner.lock().await;
        if let Some(identity) = *guard {
            return Ok(identity.venue_id);
        }

        let resp = client
            .call(Operation::get(endpoints::MY_VENUE).with_envelope(Envelope::Data))
            .await?;
        let identity = parse_identity(&resp.data)?;
        info!(venue_id = identity.venue_id, user_id = ?identity.user_id, "venue identity cached");
        *guard = Some(identity);
        Ok(identity.venue_id)
    }

    pub async fn cached_venue_id(&self) -> Option<i64> {
        self.inner.lock().await.map(|i| i.venue_id)
    }

    pub async fn cached_user_id(&self) -> Option<i64> {
        self.inner.lock().await.and_then(|i| i.user_id)
    }

    pub async fn clear_cache(&self) {
        if self.inner.lock().await.take().is_some() {
            debug!("venue identity cleared");
        }
    }

    pub async fn invalidate(&self) { self.clear_cache().await }
}

fn parse_identity(data: &Value) -> Result<VenueIdentity, ClientError> {
    let venue_id = data
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| ClientError::Decode("my-venue response has no id".into()))?;
    let user_id = data.get("user").and_then(|u| u.get("id")).and_then(Value::as_i64);
    Ok(VenueIdentity { venue_id, user_id })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use super::*;
    use crate::test_support::Harness;

    #[tokio::test]
    async fn fetches_once_then_serves_from_cache() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"id": 7, "user": {"id": 42}}}));
        let cache = VenueIdentityCache::new();

        assert_eq!(cache.get_my_venue_id(&h.client).await, Ok(7));
        assert_eq!(cache.get_my_venue_id(&h.client).await, Ok(7));
        assert_eq!(cache.cached_user_id().await, Some(42));
        assert_eq!(h.transport.request_count(), 1);
        assert!(h.transport.last_request().unwrap().url.ends_with(endpoints::MY_VENUE));
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"id": 7}}));
        h.transport.push_json(200, json!({"data": {"id": 8}}));
        let cache = VenueIdentityCache::new();

        assert_eq!(cache.get_my_venue_id(&h.client).await, Ok(7));
        cache.invalidate().await;
        assert_eq!(cache.cached_venue_id().await, None);
        assert_eq!(cache.get_my_venue_id(&h.client).await, Ok(8));
        assert_eq!(cache.cached_user_id().await, None);
    }

    #[tokio::test]
    async fn failure_propagates_and_caches_nothing() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(500, json!({"error": "boom"}));
        let cache = VenueIdentityCache::new();
        let err = cache.get_my_venue_id(&h.client).await.unwrap_err();
        assert_eq!(err, ClientError::RequestFailed { status: 500, message: "boom".into() });
        assert_eq!(cache.cached_venue_id().await, None);
    }

    #[tokio::test]
    async fn payload_without_id_is_decode_error() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"data": {"name": "Blue"}}));
        let cache = VenueIdentityCache::new();
        assert!(matches!(cache.get_my_venue_id(&h.client).await, Err(ClientError::Decode(_))));
    }

    #[tokio::test]
    async fn concurrent_callers_share_one_fetch() {
        let h = Harness::logged_in("t").await;
        h.transport.push_json(200, json!({"id": 3}));
        let cache = Arc::new(VenueIdentityCache::new());
        let (a, b) =
            tokio::join!(cache.get_my_venue_id(&h.client), cache.get_my_venue_id(&h.client));
        assert_eq!((a, b), (Ok(3), Ok(3)));
        assert_eq!(h.transport.request_count(), 1);
    }
}
