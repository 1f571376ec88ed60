//! Shared configuration types for rezwatch.
//!
//! Kept free of engine dependencies so settings UIs and hosts can depend on
//! this crate alone.

pub mod settings;

pub use settings::{
    HighlightColors, PackedColor, RectStyle, SETTINGS_VERSION, WatcherSettings,
};
