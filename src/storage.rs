use chrono::{NaiveDate, Utc};
use serde::{de::DeserializeOwned, Serialize};
use std::{marker::PhantomData, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    error::StoreError,
    kv::KeyValueStore,
    models::{AdminSettings, Analytics, ProfileData},
};

pub const PROFILE_KEY: &str = "social-link-manager-profile";
pub const ADMIN_KEY: &str = "social-link-manager-admin";
pub const ANALYTICS_KEY: &str = "social-link-manager-analytics";

// ── Records ────────────────────────────────────────────────────────────────

/// A singleton record persisted as JSON under a fixed key.
pub trait Record: Serialize + DeserializeOwned + Default + Send + Sync + 'static {
    const KEY: &'static str;
}

impl Record for ProfileData {
    const KEY: &'static str = PROFILE_KEY;
}

impl Record for AdminSettings {
    const KEY: &'static str = ADMIN_KEY;
}

impl Record for Analytics {
    const KEY: &'static str = ANALYTICS_KEY;
}

// ── Generic store ──────────────────────────────────────────────────────────

/// Read/overwrite access to one record type.
///
/// Writes always replace the whole record; callers read, modify and write
/// back the full value.
pub struct RecordStore<R> {
    backend: Arc<dyn KeyValueStore>,
    _record: PhantomData<fn() -> R>,
}

impl<R> Clone for RecordStore<R> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> RecordStore<R> {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            _record: PhantomData,
        }
    }

    /// Read the stored record. `Ok(None)` means nothing has been stored yet.
    pub async fn load(&self) -> Result<Option<R>, StoreError> {
        let Some(raw) = self.backend.get(R::KEY).await? else {
            return Ok(None);
        };

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                key: R::KEY,
                source,
            })
    }

    /// Read the stored record, never failing.
    ///
    /// On first access the default record is persisted and returned. A
    /// corrupt value or an unreachable backend yields the default record
    /// without touching what is stored.
    pub async fn get(&self) -> R {
        match self.load().await {
            Ok(Some(record)) => record,
            Ok(None) => {
                let record = R::default();
                match self.set(&record).await {
                    Ok(()) => tracing::info!("Seeded default record for '{}'", R::KEY),
                    Err(e) => tracing::warn!("Failed to seed default for '{}': {}", R::KEY, e),
                }
                record
            }
            Err(e) => {
                tracing::warn!("Using default for '{}': {}", R::KEY, e);
                R::default()
            }
        }
    }

    /// Overwrite the stored record.
    pub async fn set(&self, record: &R) -> Result<(), StoreError> {
        let json = serde_json::to_string(record).map_err(|source| StoreError::Serialize {
            key: R::KEY,
            source,
        })?;
        self.backend.set(R::KEY, &json).await
    }
}

pub type ProfileStore = RecordStore<ProfileData>;
pub type AdminSettingsStore = RecordStore<AdminSettings>;

// ── Analytics ──────────────────────────────────────────────────────────────

/// Analytics record plus the view and click counters.
///
/// Each counter update is a read-modify-write of the whole record. Updates
/// made through one `AnalyticsStore` are serialized so concurrent requests
/// do not lose increments; writers going straight to the backend are not.
pub struct AnalyticsStore {
    records: RecordStore<Analytics>,
    write_lock: Mutex<()>,
}

impl AnalyticsStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            records: RecordStore::new(backend),
            write_lock: Mutex::new(()),
        }
    }

    pub async fn get(&self) -> Analytics {
        self.records.get().await
    }

    pub async fn set(&self, analytics: &Analytics) -> Result<(), StoreError> {
        let _guard = self.write_lock.lock().await;
        self.records.set(analytics).await
    }

    /// Count one click on `link_id` and return the updated record.
    /// The id is not checked against any profile link.
    pub async fn increment_link_click(&self, link_id: &str) -> Result<Analytics, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut analytics = self.records.get().await;
        analytics.record_click(link_id);
        self.records.set(&analytics).await?;
        Ok(analytics)
    }

    /// Count one page view for today (UTC).
    pub async fn increment_page_view(&self) -> Result<Analytics, StoreError> {
        self.increment_page_view_on(Utc::now().date_naive()).await
    }

    /// Count one page view on `date` and return the updated record.
    pub async fn increment_page_view_on(&self, date: NaiveDate) -> Result<Analytics, StoreError> {
        let _guard = self.write_lock.lock().await;
        let mut analytics = self.records.get().await;
        analytics.record_view(date);
        self.records.set(&analytics).await?;
        Ok(analytics)
    }
}

// ── Bundle ─────────────────────────────────────────────────────────────────

/// The three record stores sharing one backend. Built once at startup and
/// handed to everything that reads or writes persisted state.
pub struct Stores {
    pub profile: ProfileStore,
    pub admin: AdminSettingsStore,
    pub analytics: AnalyticsStore,
}

impl Stores {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            profile: ProfileStore::new(backend.clone()),
            admin: AdminSettingsStore::new(backend.clone()),
            analytics: AnalyticsStore::new(backend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{kv::MemoryStore, models::DAILY_VIEWS_RETENTION};
    use async_trait::async_trait;

    /// Backend whose medium is never reachable.
    struct Unavailable;

    #[async_trait]
    impl KeyValueStore for Unavailable {
        async fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
            Err(StoreError::Backend(sqlx::Error::PoolClosed))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
            Err(StoreError::Backend(sqlx::Error::PoolClosed))
        }

        async fn remove(&self, _key: &str) -> Result<bool, StoreError> {
            Err(StoreError::Backend(sqlx::Error::PoolClosed))
        }
    }

    fn memory() -> (MemoryStore, Stores) {
        let backend = MemoryStore::new();
        let stores = Stores::new(Arc::new(backend.clone()));
        (backend, stores)
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn first_get_seeds_default_record() {
        let (backend, stores) = memory();

        let profile = stores.profile.get().await;
        assert_eq!(profile, ProfileData::default());
        assert!(backend.get(PROFILE_KEY).await.unwrap().is_some());
        assert_eq!(stores.profile.get().await, profile);

        assert_eq!(stores.admin.get().await, AdminSettings::default());
        assert_eq!(stores.analytics.get().await, Analytics::default());
        assert_eq!(backend.len(), 3);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let (_, stores) = memory();

        let mut profile = ProfileData::default();
        profile.name = "Ada".into();
        profile.social_links.remove(1);
        profile.custom_css = None;
        stores.profile.set(&profile).await.unwrap();

        assert_eq!(stores.profile.get().await, profile);
    }

    #[tokio::test]
    async fn corrupt_value_falls_back_without_overwrite() {
        let (backend, stores) = memory();
        backend.set(ADMIN_KEY, "{not json").await.unwrap();

        assert!(matches!(
            stores.admin.load().await,
            Err(StoreError::Parse { key: ADMIN_KEY, .. })
        ));
        assert_eq!(stores.admin.get().await, AdminSettings::default());
        assert_eq!(
            backend.get(ADMIN_KEY).await.unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[tokio::test]
    async fn unavailable_backend_yields_defaults() {
        let stores = Stores::new(Arc::new(Unavailable));

        assert_eq!(stores.profile.get().await, ProfileData::default());
        assert!(stores.profile.set(&ProfileData::default()).await.is_err());
        assert!(stores.analytics.increment_link_click("1").await.is_err());
    }

    #[tokio::test]
    async fn missing_theme_is_patched_on_read() {
        let (backend, stores) = memory();

        let mut value = serde_json::to_value(ProfileData::default()).unwrap();
        value.as_object_mut().unwrap().remove("theme");
        backend
            .set(PROFILE_KEY, &value.to_string())
            .await
            .unwrap();

        let profile = stores.profile.get().await;
        assert_eq!(profile.theme, crate::defaults::default_theme());
    }

    #[tokio::test]
    async fn stored_json_uses_camel_case_keys() {
        let (backend, stores) = memory();
        stores.admin.set(&AdminSettings::default()).await.unwrap();

        let raw = backend.get(ADMIN_KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["isLocked"], false);
        assert_eq!(value["password"], "admin123");
        assert_eq!(value["theme"], "dark");
    }

    #[tokio::test]
    async fn link_clicks_add_up_from_seeded_counts() {
        let (_, stores) = memory();

        let mut seeded = Analytics::default();
        seeded.total_clicks = 89;
        seeded.link_clicks.insert("1".into(), 45);
        stores.analytics.set(&seeded).await.unwrap();

        for _ in 0..3 {
            stores.analytics.increment_link_click("1").await.unwrap();
        }

        let analytics = stores.analytics.get().await;
        assert_eq!(analytics.total_clicks, 92);
        assert_eq!(analytics.link_clicks["1"], 48);
        assert_eq!(analytics.top_links, seeded.top_links);
    }

    #[tokio::test]
    async fn clicks_on_unknown_ids_create_counters() {
        let (_, stores) = memory();
        let before = stores.analytics.get().await.total_clicks;

        for _ in 0..5 {
            stores.analytics.increment_link_click("ghost").await.unwrap();
        }

        let analytics = stores.analytics.get().await;
        assert_eq!(analytics.link_clicks["ghost"], 5);
        assert_eq!(analytics.total_clicks, before + 5);
    }

    #[tokio::test]
    async fn page_views_on_same_date_share_an_entry() {
        let (_, stores) = memory();
        let before = stores.analytics.get().await;
        let today = date("2024-02-01");

        stores.analytics.increment_page_view_on(today).await.unwrap();
        let after_first = stores.analytics.get().await;
        assert_eq!(after_first.daily_views.len(), before.daily_views.len() + 1);
        assert_eq!(after_first.total_views, before.total_views + 1);

        stores.analytics.increment_page_view_on(today).await.unwrap();
        stores.analytics.increment_page_view_on(today).await.unwrap();
        let after = stores.analytics.get().await;
        assert_eq!(after.daily_views.len(), after_first.daily_views.len());
        assert_eq!(after.daily_views.last().unwrap().views, 3);
    }

    #[tokio::test]
    async fn daily_views_are_capped() {
        let (_, stores) = memory();
        let start = date("2024-03-01");

        for n in 0..45u64 {
            stores
                .analytics
                .increment_page_view_on(start + chrono::Days::new(n))
                .await
                .unwrap();
        }

        let analytics = stores.analytics.get().await;
        assert_eq!(analytics.daily_views.len(), DAILY_VIEWS_RETENTION);
        assert_eq!(
            analytics.daily_views[0].date,
            start + chrono::Days::new(15)
        );
    }

    #[tokio::test]
    async fn concurrent_clicks_are_not_lost() {
        let (_, stores) = memory();
        let stores = Arc::new(stores);
        stores.analytics.get().await;

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let stores = stores.clone();
                tokio::spawn(async move {
                    stores.analytics.increment_link_click("race").await.unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(stores.analytics.get().await.link_clicks["race"], 20);
    }
}
