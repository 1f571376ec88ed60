//! Persisted user settings.
//!
//! Everything the settings window can change lives here. The host persists
//! the whole struct as one TOML document; missing fields fall back to their
//! defaults so older files keep loading after new options are added.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Current settings document version
pub const SETTINGS_VERSION: u32 = 1;

// ═══════════════════════════════════════════════════════════════════════════
// Colors
// ═══════════════════════════════════════════════════════════════════════════

/// A packed `0xAABBGGRR` color, the layout the host's draw lists consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    /// Alpha channel (0-255)
    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Same color with the alpha channel forced to fully opaque.
    /// Used for rectangle outlines.
    pub fn opaque(self) -> PackedColor {
        PackedColor(self.0 | 0xFF00_0000)
    }
}

/// Color palette for party-frame highlights and in-world labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightColors {
    /// Dead player that already carries a pending revival
    pub raised: PackedColor,
    /// Dead player someone is currently raising
    pub currently_raising: PackedColor,
    /// Local player is casting on a target someone else already covers
    pub double_raise: PackedColor,
    /// Label background for revival labels
    pub in_world_background_raise: PackedColor,
    /// Label background for cleanse labels
    pub in_world_background_cleanse: PackedColor,
    /// Player carrying a monitored status nobody is cleansing yet
    pub dispellable: PackedColor,
    /// Player carrying a monitored status that is being cleansed
    pub currently_cleansing: PackedColor,
}

impl Default for HighlightColors {
    fn default() -> Self {
        Self {
            raised: PackedColor(0x60D2_FF00),
            currently_raising: PackedColor(0x6000_FF00),
            double_raise: PackedColor(0x6000_00FF),
            in_world_background_raise: PackedColor(0xC814_3C0A),
            in_world_background_cleanse: PackedColor(0xC814_0A3C),
            dispellable: PackedColor(0x60FF_00CA),
            currently_cleansing: PackedColor(0x60FF_FFFF),
        }
    }
}

/// How party-frame rectangles are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RectStyle {
    Fill,
    OnlyOutline,
    OnlyFullAlphaOutline,
    #[default]
    FillAndFullAlphaOutline,
}

impl RectStyle {
    pub fn fills(self) -> bool {
        matches!(self, RectStyle::Fill | RectStyle::FillAndFullAlphaOutline)
    }

    pub fn outlines(self) -> bool {
        !matches!(self, RectStyle::Fill)
    }

    /// Outline color for a given fill color under this style
    pub fn outline_color(self, color: PackedColor) -> PackedColor {
        match self {
            RectStyle::OnlyOutline => color,
            _ => color.opaque(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Settings
// ═══════════════════════════════════════════════════════════════════════════

/// All persisted watcher settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherSettings {
    pub version: u32,
    /// Master switch; the watcher only scans while this is set
    pub enabled: bool,

    // ─── Display ─────────────────────────────────────────────────────────────
    pub icon_scale: f32,
    pub rect_style: RectStyle,
    pub show_caster_names: bool,
    pub show_alliance_frame: bool,
    pub show_group_frame: bool,
    /// Skip in-world markers drawn over the local player
    pub hide_symbols_on_self: bool,
    pub colors: HighlightColors,

    // ─── Revival ─────────────────────────────────────────────────────────────
    pub enabled_raise: bool,
    /// Only show revival highlights while playing a job that can revive
    pub restricted_jobs: bool,
    pub show_icon: bool,
    pub show_in_world_text: bool,

    // ─── Cleanse ─────────────────────────────────────────────────────────────
    pub enabled_dispel: bool,
    /// Only show cleanse highlights while playing a job that can cleanse
    pub restricted_jobs_dispel: bool,
    pub show_icon_dispel: bool,
    pub show_in_world_text_dispel: bool,

    /// Dispellable status ids the user chose to ignore.
    /// Every other dispellable status is monitored.
    pub unmonitored_statuses: BTreeSet<u16>,
}

impl Default for WatcherSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_VERSION,
            enabled: true,
            icon_scale: 1.0,
            rect_style: RectStyle::default(),
            show_caster_names: true,
            show_alliance_frame: true,
            show_group_frame: true,
            hide_symbols_on_self: false,
            colors: HighlightColors::default(),
            enabled_raise: true,
            restricted_jobs: false,
            show_icon: true,
            show_in_world_text: true,
            enabled_dispel: true,
            restricted_jobs_dispel: false,
            show_icon_dispel: true,
            show_in_world_text_dispel: true,
            unmonitored_statuses: BTreeSet::new(),
        }
    }
}
