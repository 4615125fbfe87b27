//! Core value types shared by the avatar component and the editor

use serde::{Deserialize, Serialize};

/// Frame image plus the ratios that place the avatar inside it.
///
/// Ratios are relative to the container width. The recommended ranges are
/// 0.3-0.9 for `avatar_scale` and ±0.2 for the offsets; nothing clamps them.
/// Every edit replaces the whole value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorderConfig {
    pub gif_url: String,
    pub avatar_scale: f64,
    pub top_offset_ratio: f64,
    pub left_offset_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotate: Option<f64>,
}

impl BorderConfig {
    pub fn new(gif_url: impl Into<String>, avatar_scale: f64, top_offset_ratio: f64, left_offset_ratio: f64) -> Self {
        Self {
            gif_url: gif_url.into(),
            avatar_scale,
            top_offset_ratio,
            left_offset_ratio,
            border_radius: None,
            rotate: None,
        }
    }

    /// Zeroed stand-in used when the selected preset carries no frame
    pub fn placeholder() -> Self {
        Self::new("", 0.0, 0.0, 0.0)
    }

    /// Frameless layout: the avatar fills the container
    pub fn bare() -> Self {
        Self::new("", 1.0, 0.0, 0.0)
    }

    /// A frame is drawn only when there is an image to draw
    pub fn has_border(&self) -> bool {
        !self.gif_url.is_empty()
    }

    /// True for the zeroed stand-in of a frameless preset
    pub fn is_placeholder(&self) -> bool {
        !self.has_border()
            && self.avatar_scale == 0.0
            && self.top_offset_ratio == 0.0
            && self.left_offset_ratio == 0.0
    }

    pub fn with_gif_url(self, gif_url: impl Into<String>) -> Self {
        Self {
            gif_url: gif_url.into(),
            ..self
        }
    }
}

/// Pixel geometry derived from a container width and a [`BorderConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionState {
    pub container_width_px: i32,
    pub avatar_size_px: i32,
    pub top_offset_px: i32,
    pub left_offset_px: i32,
}

/// Notification severity understood by every sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case_without_absent_optionals() {
        let config = BorderConfig::new("frame.gif", 0.55, 0.37, 0.21);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(
            json,
            r#"{"gifUrl":"frame.gif","avatarScale":0.55,"topOffsetRatio":0.37,"leftOffsetRatio":0.21}"#
        );
    }

    #[test]
    fn test_optionals_survive_serialization() {
        let config = BorderConfig {
            border_radius: Some("30%".to_string()),
            rotate: Some(-12.5),
            ..BorderConfig::new("frame.gif", 0.6, 0.2, 0.2)
        };
        let json = serde_json::to_string(&config).unwrap();
        let parsed: BorderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_placeholder_has_no_border() {
        assert!(!BorderConfig::placeholder().has_border());
        assert!(BorderConfig::placeholder().is_placeholder());
        assert!(!BorderConfig::bare().is_placeholder());
        assert_eq!(BorderConfig::placeholder().avatar_scale, 0.0);
        assert!(BorderConfig::new("x.gif", 0.5, 0.0, 0.0).has_border());
    }

    #[test]
    fn test_with_gif_url_keeps_ratios() {
        let config = BorderConfig::new("a.gif", 0.6, 0.1, -0.1).with_gif_url("b.gif");
        assert_eq!(config.gif_url, "b.gif");
        assert_eq!(config.avatar_scale, 0.6);
        assert_eq!(config.left_offset_ratio, -0.1);
    }
}
