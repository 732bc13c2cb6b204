use crate::{models::ProfileData, AppState};
use axum::{
    extract::{Path, State},
    http::{header, header::InvalidHeaderValue, HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use std::sync::Arc;

// ── Views ──────────────────────────────────────────────────────────────────

/// Page title and description derived from the requested slug.
#[derive(Debug, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

impl PageMeta {
    pub fn for_slug(slug: &str) -> Self {
        Self {
            title: format!("{slug} - Social Link Manager"),
            description: format!("Visit {slug}'s social media links and profile"),
        }
    }
}

/// What a visitor sees: the profile with hidden links stripped out.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub meta: PageMeta,
    pub handle: String,
    pub profile: ProfileData,
}

// ── Handlers ───────────────────────────────────────────────────────────────

/// GET /
/// Send visitors to the configured profile slug. An empty slug would
/// redirect back here, so the profile is served in place instead.
pub async fn index(State(state): State<Arc<AppState>>) -> Response {
    let profile = state.stores.profile.get().await;
    if !profile.page_url.is_empty() {
        if let Ok(response) = see_other(&format!("/{}", profile.page_url)) {
            return response;
        }
        tracing::warn!("Stored page slug '{}' is not a usable path", profile.page_url);
    }
    render_profile(&state, profile.handle()).await
}

/// GET /:slug
///
/// There is a single profile; the slug only feeds the page metadata.
pub async fn profile(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    render_profile(&state, slug).await
}

/// Every render counts as one page view.
async fn render_profile(state: &AppState, slug: String) -> Response {
    let mut profile = state.stores.profile.get().await;

    if let Err(e) = state.stores.analytics.increment_page_view().await {
        tracing::error!("Failed to record page view for '{}': {}", slug, e);
    }

    profile.social_links.retain(|link| link.is_visible());

    Json(PublicProfile {
        meta: PageMeta::for_slug(&slug),
        handle: profile.handle(),
        profile,
    })
    .into_response()
}

/// GET /:slug/go/:link_id
///
/// 1. Count the click against `link_id`, whether or not it exists.
/// 2. Redirect to the matching social link or featured item.
pub async fn follow_link(
    State(state): State<Arc<AppState>>,
    Path((_slug, link_id)): Path<(String, String)>,
) -> Response {
    if let Err(e) = state.stores.analytics.increment_link_click(&link_id).await {
        tracing::error!("Failed to record click on '{}': {}", link_id, e);
    }

    let profile = state.stores.profile.get().await;
    match profile.target_url(&link_id) {
        // Stored URLs are not validated, so one may not fit in a header.
        Some(url) => match see_other(url) {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("Link '{}' has an unusable URL: {}", link_id, e);
                (StatusCode::BAD_REQUEST, "Link URL is invalid").into_response()
            }
        },
        None => {
            tracing::warn!("Click on unknown link '{}'", link_id);
            (StatusCode::NOT_FOUND, "Link not found").into_response()
        }
    }
}

/// A 303 to `location`, or the header error when it contains bytes a
/// header cannot carry.
fn see_other(location: &str) -> Result<Response, InvalidHeaderValue> {
    let location = HeaderValue::try_from(location)?;
    Ok((StatusCode::SEE_OTHER, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meta_uses_slug_verbatim() {
        let meta = PageMeta::for_slug("Jane");
        assert_eq!(meta.title, "Jane - Social Link Manager");
        assert_eq!(meta.description, "Visit Jane's social media links and profile");
    }

    #[test]
    fn see_other_rejects_control_characters() {
        assert!(see_other("https://example.com/a\nb").is_err());

        let response = see_other("https://example.com/ok").unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com/ok");
    }
}
