use crate::{models::AdminSettings, AppState};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
};
use axum_extra::extract::CookieJar;
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::RwLock;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "session_id";

// ── Session Store ──────────────────────────────────────────────────────────

/// Admin sessions keyed by cookie token, each with the instant it lapses.
pub struct SessionStore {
    expiries: RwLock<HashMap<String, Instant>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(session_duration_hours: u64) -> Self {
        Self {
            expiries: RwLock::new(HashMap::new()),
            ttl: Duration::from_secs(session_duration_hours * 3600),
        }
    }

    /// How long a fresh session stays valid.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token; lapsed entries are dropped on the way.
    pub async fn create(&self) -> String {
        let token = Uuid::new_v4().simple().to_string();
        let now = Instant::now();

        let mut expiries = self.expiries.write().await;
        expiries.retain(|_, expires_at| *expires_at > now);
        expiries.insert(token.clone(), now + self.ttl);
        token
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        self.expiries
            .read()
            .await
            .get(token)
            .is_some_and(|expires_at| Instant::now() < *expires_at)
    }

    /// Drop one session. Returns `true` if the token was known.
    pub async fn remove(&self, token: &str) -> bool {
        self.expiries.write().await.remove(token).is_some()
    }

    /// Drop every session, e.g. after the admin password changes.
    pub async fn revoke_all(&self) -> usize {
        let mut expiries = self.expiries.write().await;
        let revoked = expiries.len();
        expiries.clear();
        revoked
    }
}

// ── Password check ─────────────────────────────────────────────────────────

/// Plain-text comparison against the stored admin password.
pub fn password_matches(settings: &AdminSettings, submitted: &str) -> bool {
    settings.password == submitted
}

/// Wait out the configured login delay, then check `submitted` against the
/// stored settings. Nothing is written either way.
pub async fn verify_password(state: &AppState, submitted: &str) -> bool {
    if state.config.login_delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(state.config.login_delay_ms)).await;
    }

    let settings = state.stores.admin.get().await;
    password_matches(&settings, submitted)
}

// ── AuthUser extractor ─────────────────────────────────────────────────────

/// Extractor guarding the admin handlers.
///
/// While the panel is unlocked every request passes. Once locked, the
/// request must carry a valid `session_id` cookie, otherwise the handler
/// never runs and the caller gets a 401.
pub struct AuthUser;

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = Arc::<AppState>::from_ref(state);

        if !state.stores.admin.get().await.is_locked {
            return Ok(AuthUser);
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let valid = match jar.get(SESSION_COOKIE) {
            Some(cookie) => state.sessions.is_valid(cookie.value()).await,
            None => false,
        };

        if valid {
            Ok(AuthUser)
        } else {
            Err((StatusCode::UNAUTHORIZED, "Admin panel is locked."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sessions_lapse_and_can_be_removed() {
        let store = SessionStore::new(1);
        let token = store.create().await;
        assert!(store.is_valid(&token).await);
        assert!(!store.is_valid("unknown").await);

        assert!(store.remove(&token).await);
        assert!(!store.remove(&token).await);
        assert!(!store.is_valid(&token).await);

        let lapsed = SessionStore::new(0);
        let token = lapsed.create().await;
        assert!(!lapsed.is_valid(&token).await);
    }

    #[tokio::test]
    async fn revoke_all_ends_every_session() {
        let store = SessionStore::new(1);
        let a = store.create().await;
        let b = store.create().await;

        assert_eq!(store.revoke_all().await, 2);
        assert!(!store.is_valid(&a).await);
        assert!(!store.is_valid(&b).await);
    }

    #[test]
    fn password_is_compared_verbatim() {
        let settings = AdminSettings::default();
        assert!(password_matches(&settings, "admin123"));
        assert!(!password_matches(&settings, "wrong"));
        assert!(!password_matches(&settings, "admin123 "));
    }
}
