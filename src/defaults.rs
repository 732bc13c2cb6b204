//! Records seeded on first access, and the built-in theme presets.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{
    AdminSettings, Analytics, BackgroundPattern, BottomImage, ButtonAnimation, ButtonStyle,
    ColorScheme, DailyViews, LinkAnimation, ProfileData, SocialLink, Theme, ThemeAnimation,
    TopLink,
};

pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

pub const FEATURED_PLACEHOLDER_IMAGE: &str = "https://images.pexels.com/photos/196644/pexels-photo-196644.jpeg?auto=compress&cs=tinysrgb&w=400&h=200";

fn theme(
    id: &str,
    name: &str,
    background: &str,
    button_color: &str,
    text_color: &str,
    accent_color: &str,
    animation: ThemeAnimation,
) -> Theme {
    Theme {
        id: id.into(),
        name: name.into(),
        background: background.into(),
        button_style: ButtonStyle::Solid,
        button_color: button_color.into(),
        text_color: text_color.into(),
        accent_color: accent_color.into(),
        animation,
    }
}

/// The built-in presets, in display order.
pub fn themes() -> Vec<Theme> {
    vec![
        default_theme(),
        theme(
            "sunset",
            "Sunset Vibes",
            "linear-gradient(135deg, #FA8BFF 0%, #2BD2FF 50%, #2BFF88 100%)",
            "#FFFFFF",
            "#000000",
            "#FA8BFF",
            ThemeAnimation::Pulse,
        ),
        theme(
            "ocean",
            "Ocean Breeze",
            "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
            "#FFFFFF",
            "#FFFFFF",
            "#667eea",
            ThemeAnimation::Glow,
        ),
        theme(
            "fire",
            "Fire Gradient",
            "linear-gradient(135deg, #f093fb 0%, #f5576c 100%)",
            "#FFFFFF",
            "#FFFFFF",
            "#f5576c",
            ThemeAnimation::Bounce,
        ),
        theme(
            "neon",
            "Neon Dreams",
            "linear-gradient(135deg, #a8edea 0%, #fed6e3 100%)",
            "#000000",
            "#000000",
            "#a8edea",
            ThemeAnimation::Pulse,
        ),
    ]
}

/// Look up a preset by id.
pub fn find_theme(id: &str) -> Option<Theme> {
    themes().into_iter().find(|t| t.id == id)
}

/// The first preset; used when a stored profile has no theme.
pub fn default_theme() -> Theme {
    theme(
        "linktree",
        "Linktree Classic",
        "linear-gradient(135deg, #43E97B 0%, #38F9D7 100%)",
        "#FFFFFF",
        "#000000",
        "#43E97B",
        ThemeAnimation::Bounce,
    )
}

fn social_link(
    id: &str,
    platform: &str,
    url: &str,
    icon: &str,
    color: &str,
    title: &str,
    animation: LinkAnimation,
) -> SocialLink {
    SocialLink {
        id: id.into(),
        platform: platform.into(),
        url: url.into(),
        icon: icon.into(),
        color: color.into(),
        enabled: true,
        clicks: Some(0),
        custom_title: Some(title.into()),
        animation: Some(animation),
    }
}

impl Default for ProfileData {
    fn default() -> Self {
        Self {
            name: "Your Name".into(),
            bio: "Welcome to my digital space! ✨ Connect with me across all platforms.".into(),
            profile_picture: "https://images.pexels.com/photos/771742/pexels-photo-771742.jpeg?auto=compress&cs=tinysrgb&w=200&h=200".into(),
            profile_border: true,
            page_url: "yourname".into(),
            background_color: "#43E97B".into(),
            button_color: "#FFFFFF".into(),
            social_links: vec![
                social_link(
                    "1",
                    "Instagram",
                    "https://instagram.com/yourhandle",
                    "Instagram",
                    "#E4405F",
                    "Follow my journey",
                    LinkAnimation::Bounce,
                ),
                social_link(
                    "2",
                    "Twitter",
                    "https://twitter.com/yourhandle",
                    "Twitter",
                    "#1DA1F2",
                    "Latest thoughts",
                    LinkAnimation::Pulse,
                ),
                social_link(
                    "3",
                    "LinkedIn",
                    "https://linkedin.com/in/yourprofile",
                    "Linkedin",
                    "#0077B5",
                    "Professional network",
                    LinkAnimation::Glow,
                ),
            ],
            bottom_images: vec![BottomImage {
                id: "1".into(),
                title: "Latest Project".into(),
                url: "https://example.com".into(),
                icon: "ExternalLink".into(),
                image: FEATURED_PLACEHOLDER_IMAGE.into(),
                clicks: Some(0),
                description: Some("Check out my latest work".into()),
            }],
            theme: default_theme(),
            custom_css: Some(String::new()),
            show_analytics: true,
            total_views: 1247,
            total_clicks: 89,
            is_verified: false,
            custom_font: "Inter".into(),
            background_pattern: BackgroundPattern::None,
            button_animation: ButtonAnimation::HoverLift,
        }
    }
}

impl Default for AdminSettings {
    fn default() -> Self {
        Self {
            password: DEFAULT_ADMIN_PASSWORD.into(),
            is_locked: false,
            theme: ColorScheme::Dark,
            notifications: true,
        }
    }
}

impl Default for Analytics {
    fn default() -> Self {
        let daily = [23, 45, 67, 34, 89, 56, 78];
        let daily_views = daily
            .iter()
            .zip(1u32..)
            .filter_map(|(&views, day)| {
                NaiveDate::from_ymd_opt(2024, 1, day).map(|date| DailyViews { date, views })
            })
            .collect();

        let top_link = |id: &str, platform: &str, clicks: u64| TopLink {
            id: id.into(),
            platform: platform.into(),
            clicks,
        };

        Self {
            total_views: 1247,
            total_clicks: 89,
            link_clicks: BTreeMap::from([
                ("1".to_owned(), 45),
                ("2".to_owned(), 32),
                ("3".to_owned(), 12),
            ]),
            daily_views,
            top_links: vec![
                top_link("1", "Instagram", 45),
                top_link("2", "Twitter", 32),
                top_link("3", "LinkedIn", 12),
            ],
        }
    }
}
