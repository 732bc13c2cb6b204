use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Oldest entries beyond this many are dropped from `Analytics::daily_views`.
pub const DAILY_VIEWS_RETENTION: usize = 30;

// ── Display enums ──────────────────────────────────────────────────────────

/// Animation applied to a single social link button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkAnimation {
    Bounce,
    Pulse,
    Glow,
    Slide,
    #[default]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    #[default]
    Solid,
    Outline,
    Glass,
    Gradient,
}

/// Page-level animation carried by a theme preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeAnimation {
    #[default]
    None,
    Float,
    Pulse,
    Glow,
    /// Written by the `linktree` and `fire` presets.
    Bounce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundPattern {
    #[default]
    None,
    Dots,
    Grid,
    Waves,
    GradientMesh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ButtonAnimation {
    None,
    #[default]
    HoverLift,
    HoverGlow,
    HoverBounce,
    HoverSlide,
}

/// Admin panel color scheme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    #[default]
    Dark,
    Auto,
}

// ── Profile ────────────────────────────────────────────────────────────────

/// One outbound link on the public page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLink {
    pub id: String,
    pub platform: String,
    pub url: String,
    pub icon: String,
    pub color: String,
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<LinkAnimation>,
}

impl SocialLink {
    /// Whether the link appears on the public page.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.url.is_empty()
    }
}

/// A featured content card shown below the social links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottomImage {
    pub id: String,
    pub title: String,
    pub url: String,
    pub icon: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clicks: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A named styling preset. Profiles hold a copy, not a reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub background: String,
    pub button_style: ButtonStyle,
    pub button_color: String,
    pub text_color: String,
    pub accent_color: String,
    pub animation: ThemeAnimation,
}

/// The singleton profile record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileData {
    pub name: String,
    pub bio: String,
    pub profile_picture: String,
    pub profile_border: bool,
    pub page_url: String,
    pub background_color: String,
    pub button_color: String,
    pub social_links: Vec<SocialLink>,
    pub bottom_images: Vec<BottomImage>,
    /// Older records were written without a theme; the first preset is patched in.
    #[serde(default = "crate::defaults::default_theme")]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    pub show_analytics: bool,
    pub total_views: u64,
    pub total_clicks: u64,
    pub is_verified: bool,
    pub custom_font: String,
    pub background_pattern: BackgroundPattern,
    pub button_animation: ButtonAnimation,
}

// ── Admin settings ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSettings {
    /// Stored and compared as plain text.
    pub password: String,
    pub is_locked: bool,
    pub theme: ColorScheme,
    pub notifications: bool,
}

// ── Analytics ──────────────────────────────────────────────────────────────

/// Views counted on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViews {
    pub date: NaiveDate,
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopLink {
    pub id: String,
    pub platform: String,
    pub clicks: u64,
}

/// The singleton analytics record.
///
/// `top_links` is stored data and is never recomputed from `link_clicks`;
/// nothing ties `total_clicks` to the sum of `link_clicks` either.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    pub total_views: u64,
    pub total_clicks: u64,
    pub link_clicks: BTreeMap<String, u64>,
    pub daily_views: Vec<DailyViews>,
    pub top_links: Vec<TopLink>,
}

impl Analytics {
    /// Count one click on `link_id`. Unknown ids get a fresh counter.
    pub fn record_click(&mut self, link_id: &str) {
        self.total_clicks += 1;
        *self.link_clicks.entry(link_id.to_owned()).or_insert(0) += 1;
    }

    /// Count one page view on `date`, then trim the daily log to the
    /// most recent `DAILY_VIEWS_RETENTION` entries.
    pub fn record_view(&mut self, date: NaiveDate) {
        self.total_views += 1;

        match self.daily_views.iter_mut().find(|entry| entry.date == date) {
            Some(entry) => entry.views += 1,
            None => self.daily_views.push(DailyViews { date, views: 1 }),
        }

        if self.daily_views.len() > DAILY_VIEWS_RETENTION {
            let excess = self.daily_views.len() - DAILY_VIEWS_RETENTION;
            self.daily_views.drain(..excess);
        }
    }

    /// Clicks per hundred views, or zero before the first view.
    pub fn click_through_rate(&self) -> f64 {
        if self.total_views == 0 {
            return 0.0;
        }
        self.total_clicks as f64 * 100.0 / self.total_views as f64
    }

    /// The last `n` entries of the daily log, oldest first.
    pub fn recent_daily_views(&self, n: usize) -> &[DailyViews] {
        let start = self.daily_views.len().saturating_sub(n);
        &self.daily_views[start..]
    }
}
