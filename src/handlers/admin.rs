use crate::{
    auth::{self, AuthUser, SESSION_COOKIE},
    defaults,
    editor::{sanitize_page_url, BottomImagePatch, SocialLinkPatch},
    error::StoreError,
    models::{AdminSettings, DailyViews, ProfileData, TopLink},
    AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Number of trailing days shown on the dashboard.
const DASHBOARD_DAYS: usize = 7;

// ── Request / response types ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub total_views: u64,
    pub total_clicks: u64,
    pub click_through_rate: f64,
    pub active_links: usize,
    pub recent_views: Vec<DailyViews>,
    /// As stored; not derived from the per-link counters.
    pub top_links: Vec<TopLink>,
    pub profile_url: String,
}

// ── Login / Logout ─────────────────────────────────────────────────────────

/// POST /admin/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(form): Json<LoginRequest>,
) -> Response {
    if !auth::verify_password(&state, &form.password).await {
        tracing::warn!("Rejected admin login attempt");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Invalid password. Please try again." })),
        )
            .into_response();
    }

    let jar = start_session(&state, jar).await;
    tracing::info!("Admin logged in");
    (jar, Json(json!({ "authenticated": true }))).into_response()
}

/// POST /admin/logout
pub async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.remove(cookie.value()).await;
    }

    let removal = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .max_age(time::Duration::seconds(0))
        .build();

    (jar.add(removal), StatusCode::NO_CONTENT).into_response()
}

// ── Dashboard / analytics ──────────────────────────────────────────────────

/// GET /admin/dashboard
pub async fn dashboard(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    let analytics = state.stores.analytics.get().await;
    let profile = state.stores.profile.get().await;

    Json(Dashboard {
        total_views: analytics.total_views,
        total_clicks: analytics.total_clicks,
        click_through_rate: analytics.click_through_rate(),
        active_links: profile.social_links.iter().filter(|l| l.enabled).count(),
        recent_views: analytics.recent_daily_views(DASHBOARD_DAYS).to_vec(),
        top_links: analytics.top_links,
        profile_url: state.config.profile_url(&profile.page_url),
    })
}

/// GET /admin/analytics
pub async fn analytics(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Response {
    Json(state.stores.analytics.get().await).into_response()
}

// ── Profile ────────────────────────────────────────────────────────────────

/// GET /admin/profile
pub async fn get_profile(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Response {
    Json(state.stores.profile.get().await).into_response()
}

/// PUT /admin/profile
/// Replaces the whole record; the page slug is normalized first.
pub async fn put_profile(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Json(mut profile): Json<ProfileData>,
) -> Response {
    profile.page_url = sanitize_page_url(&profile.page_url);
    save_profile(&state, profile, StatusCode::OK).await
}

/// POST /admin/links
pub async fn add_link(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Response {
    let mut profile = state.stores.profile.get().await;
    let link = profile.add_social_link();
    match state.stores.profile.set(&profile).await {
        Ok(()) => (StatusCode::CREATED, Json(link)).into_response(),
        Err(e) => save_failed(e),
    }
}

/// PATCH /admin/links/:id
pub async fn update_link(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<SocialLinkPatch>,
) -> Response {
    let mut profile = state.stores.profile.get().await;
    if !profile.update_social_link(&id, patch) {
        return (StatusCode::NOT_FOUND, "Link not found.").into_response();
    }
    save_profile(&state, profile, StatusCode::OK).await
}

/// DELETE /admin/links/:id
pub async fn delete_link(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut profile = state.stores.profile.get().await;
    if !profile.remove_social_link(&id) {
        return (StatusCode::NOT_FOUND, "Link not found.").into_response();
    }
    save_profile(&state, profile, StatusCode::OK).await
}

/// POST /admin/featured
pub async fn add_featured(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Response {
    let mut profile = state.stores.profile.get().await;
    let item = profile.add_bottom_image();
    match state.stores.profile.set(&profile).await {
        Ok(()) => (StatusCode::CREATED, Json(item)).into_response(),
        Err(e) => save_failed(e),
    }
}

/// PATCH /admin/featured/:id
pub async fn update_featured(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<BottomImagePatch>,
) -> Response {
    let mut profile = state.stores.profile.get().await;
    if !profile.update_bottom_image(&id, patch) {
        return (StatusCode::NOT_FOUND, "Featured item not found.").into_response();
    }
    save_profile(&state, profile, StatusCode::OK).await
}

/// DELETE /admin/featured/:id
pub async fn delete_featured(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let mut profile = state.stores.profile.get().await;
    if !profile.remove_bottom_image(&id) {
        return (StatusCode::NOT_FOUND, "Featured item not found.").into_response();
    }
    save_profile(&state, profile, StatusCode::OK).await
}

// ── Themes ─────────────────────────────────────────────────────────────────

/// GET /admin/themes
pub async fn list_themes(_auth: AuthUser) -> Response {
    Json(defaults::themes()).into_response()
}

/// POST /admin/themes/:id
pub async fn apply_theme(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    let Some(theme) = defaults::find_theme(&id) else {
        return (StatusCode::NOT_FOUND, "Theme not found.").into_response();
    };

    let mut profile = state.stores.profile.get().await;
    profile.apply_theme(theme);
    save_profile(&state, profile, StatusCode::OK).await
}

// ── Settings ───────────────────────────────────────────────────────────────

/// GET /admin/settings
pub async fn get_settings(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Response {
    Json(state.stores.admin.get().await).into_response()
}

/// PUT /admin/settings
pub async fn put_settings(
    _auth: AuthUser,
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(settings): Json<AdminSettings>,
) -> Response {
    let previous = state.stores.admin.get().await;
    if let Err(e) = state.stores.admin.set(&settings).await {
        return save_failed(e);
    }

    if previous.password == settings.password {
        return Json(settings).into_response();
    }

    // A new password signs everyone out; the caller gets a fresh session.
    let revoked = state.sessions.revoke_all().await;
    tracing::info!("Admin password changed; {} session(s) revoked", revoked);
    let jar = start_session(&state, jar).await;
    (jar, Json(settings)).into_response()
}

/// POST /admin/lock
///
/// The caller keeps access through a fresh session, as if they had just
/// logged in.
pub async fn lock(_auth: AuthUser, State(state): State<Arc<AppState>>, jar: CookieJar) -> Response {
    let mut settings = state.stores.admin.get().await;
    settings.is_locked = true;
    if let Err(e) = state.stores.admin.set(&settings).await {
        return save_failed(e);
    }

    tracing::info!("Admin panel locked");
    let jar = start_session(&state, jar).await;
    (jar, Json(settings)).into_response()
}

/// POST /admin/unlock
pub async fn unlock(_auth: AuthUser, State(state): State<Arc<AppState>>) -> Response {
    let mut settings = state.stores.admin.get().await;
    settings.is_locked = false;
    match state.stores.admin.set(&settings).await {
        Ok(()) => {
            tracing::info!("Admin panel unlocked");
            Json(settings).into_response()
        }
        Err(e) => save_failed(e),
    }
}

// ── Private helpers ────────────────────────────────────────────────────────

/// Issue a session and attach its cookie.
async fn start_session(state: &AppState, jar: CookieJar) -> CookieJar {
    let token = state.sessions.create().await;

    let cookie = Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::seconds(state.sessions.ttl().as_secs() as i64))
        .build();

    jar.add(cookie)
}

/// Persist the whole profile and echo it back.
async fn save_profile(state: &AppState, profile: ProfileData, status: StatusCode) -> Response {
    match state.stores.profile.set(&profile).await {
        Ok(()) => (status, Json(profile)).into_response(),
        Err(e) => save_failed(e),
    }
}

fn save_failed(e: StoreError) -> Response {
    tracing::error!("Failed to save changes: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Failed to save changes" })),
    )
        .into_response()
}
