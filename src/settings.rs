//! Demo configuration: defaults, JSON file, then command-line overrides.

use std::path::Path;

use iced::{Color, Size};
use serde::{Deserialize, Serialize};

use crate::picker::Bounds;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(String),

    #[error("invalid settings json: {0}")]
    Json(String),

    #[error("invalid accent colour {0:?}, expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub title: String,
    pub subtitle: String,
    pub icon: String,
    /// Hex colour, `#RRGGBB` or `#RRGGBBAA`.
    pub accent: String,
    pub max_width: f32,
    pub max_height: f32,
    pub top_padding: f32,
    /// Horizontal padding around the screen content.
    pub content_padding: f32,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            title: "Drag & Drop Image".to_string(),
            subtitle: "Tap to add an Image".to_string(),
            icon: "⬆".to_string(),
            accent: "#007AFF".to_string(),
            max_width: 300.0,
            max_height: 250.0,
            top_padding: 30.0,
            content_padding: 16.0,
            window_width: 420.0,
            window_height: 640.0,
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path).map_err(|err| SettingsError::Io(format!("{}: {err}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, SettingsError> {
        serde_json::from_str(raw).map_err(|err| SettingsError::Json(err.to_string()))
    }

    pub fn accent_color(&self) -> Result<Color, SettingsError> {
        parse_hex_color(&self.accent).ok_or_else(|| SettingsError::InvalidColor(self.accent.clone()))
    }

    pub fn window_size(&self) -> Size {
        Size::new(self.window_width, self.window_height)
    }

    /// Rendered picker bounds for a given window size: the configured maximum, narrowed
    /// to the window's content width.
    pub fn picker_bounds(&self, window: Size) -> Bounds {
        let available = (window.width - self.content_padding * 2.0).max(0.0);
        Bounds::from_size(Size::new(available.min(self.max_width), self.max_height))
    }
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if !digits.is_ascii() || !matches!(digits.len(), 6 | 8) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    let alpha = if digits.len() == 8 { channel(6)? } else { 255 };
    Some(Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, alpha as f32 / 255.0))
}
