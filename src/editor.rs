use serde::Deserialize;
use uuid::Uuid;

use crate::{
    defaults::FEATURED_PLACEHOLDER_IMAGE,
    models::{BottomImage, LinkAnimation, ProfileData, SocialLink, Theme},
};

/// Background color applied when a preset's background is a gradient.
const GRADIENT_FALLBACK_BACKGROUND: &str = "#1a1a2e";

// ── Patches ────────────────────────────────────────────────────────────────

/// Fields to overwrite on one social link. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinkPatch {
    pub platform: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub color: Option<String>,
    pub enabled: Option<bool>,
    pub clicks: Option<u64>,
    pub custom_title: Option<String>,
    pub animation: Option<LinkAnimation>,
}

impl SocialLinkPatch {
    fn apply(self, link: &mut SocialLink) {
        if let Some(v) = self.platform {
            link.platform = v;
        }
        if let Some(v) = self.url {
            link.url = v;
        }
        if let Some(v) = self.icon {
            link.icon = v;
        }
        if let Some(v) = self.color {
            link.color = v;
        }
        if let Some(v) = self.enabled {
            link.enabled = v;
        }
        if self.clicks.is_some() {
            link.clicks = self.clicks;
        }
        if self.custom_title.is_some() {
            link.custom_title = self.custom_title;
        }
        if self.animation.is_some() {
            link.animation = self.animation;
        }
    }
}

/// Fields to overwrite on one featured item.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BottomImagePatch {
    pub title: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub image: Option<String>,
    pub clicks: Option<u64>,
    pub description: Option<String>,
}

impl BottomImagePatch {
    fn apply(self, item: &mut BottomImage) {
        if let Some(v) = self.title {
            item.title = v;
        }
        if let Some(v) = self.url {
            item.url = v;
        }
        if let Some(v) = self.icon {
            item.icon = v;
        }
        if let Some(v) = self.image {
            item.image = v;
        }
        if self.clicks.is_some() {
            item.clicks = self.clicks;
        }
        if self.description.is_some() {
            item.description = self.description;
        }
    }
}

// ── Profile edits ──────────────────────────────────────────────────────────

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

impl ProfileData {
    /// Append a blank "Custom" link and return a copy of it.
    pub fn add_social_link(&mut self) -> SocialLink {
        let link = SocialLink {
            id: new_id(),
            platform: "Custom".into(),
            url: String::new(),
            icon: "Globe".into(),
            color: "#6366F1".into(),
            enabled: true,
            clicks: Some(0),
            custom_title: Some(String::new()),
            animation: Some(LinkAnimation::None),
        };
        self.social_links.push(link.clone());
        link
    }

    /// Merge `patch` into the link with `id`. Returns `false` if no link matched.
    pub fn update_social_link(&mut self, id: &str, patch: SocialLinkPatch) -> bool {
        match self.social_links.iter_mut().find(|link| link.id == id) {
            Some(link) => {
                patch.apply(link);
                true
            }
            None => false,
        }
    }

    /// Drop every link with `id`. Returns `true` if anything was removed.
    pub fn remove_social_link(&mut self, id: &str) -> bool {
        let before = self.social_links.len();
        self.social_links.retain(|link| link.id != id);
        self.social_links.len() != before
    }

    /// Append a placeholder featured item and return a copy of it.
    pub fn add_bottom_image(&mut self) -> BottomImage {
        let item = BottomImage {
            id: new_id(),
            title: "New Featured Item".into(),
            url: String::new(),
            icon: "ExternalLink".into(),
            image: FEATURED_PLACEHOLDER_IMAGE.into(),
            clicks: Some(0),
            description: Some("Add a description".into()),
        };
        self.bottom_images.push(item.clone());
        item
    }

    pub fn update_bottom_image(&mut self, id: &str, patch: BottomImagePatch) -> bool {
        match self.bottom_images.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                patch.apply(item);
                true
            }
            None => false,
        }
    }

    pub fn remove_bottom_image(&mut self, id: &str) -> bool {
        let before = self.bottom_images.len();
        self.bottom_images.retain(|item| item.id != id);
        self.bottom_images.len() != before
    }

    /// Copy `theme` into the profile and derive the page colors from it.
    pub fn apply_theme(&mut self, theme: Theme) {
        self.background_color = if theme.background.contains("gradient") {
            GRADIENT_FALLBACK_BACKGROUND.into()
        } else {
            theme.background.clone()
        };
        self.button_color = theme.button_color.clone();
        self.theme = theme;
    }

    /// URL for the link or featured item with `id`. Social links win when
    /// both lists use the same id.
    pub fn target_url(&self, id: &str) -> Option<&str> {
        self.social_links
            .iter()
            .find(|link| link.id == id)
            .map(|link| link.url.as_str())
            .or_else(|| {
                self.bottom_images
                    .iter()
                    .find(|item| item.id == id)
                    .map(|item| item.url.as_str())
            })
            .filter(|url| !url.is_empty())
    }

    /// The `@handle` shown under the avatar.
    pub fn handle(&self) -> String {
        self.name
            .to_lowercase()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

/// Reduce a page slug to lowercase ASCII letters and digits.
pub fn sanitize_page_url(input: &str) -> String {
    input
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}
