//! Built-in preset table

use serde::Serialize;

use crate::types::BorderConfig;

/// Preset selected at startup
pub const DEFAULT_PRESET: &str = "preset1";

/// A named avatar + frame combination.
/// Missing `avatar_url` / `border_config` means "no avatar" / "no frame".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetEntry {
    pub key: String,
    pub display_name_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_config: Option<BorderConfig>,
    pub size: String,
}

pub fn builtin_presets() -> Vec<PresetEntry> {
    vec![
        PresetEntry {
            key: "preset1".to_string(),
            display_name_key: "preset.preset1".to_string(),
            avatar_url: Some("assets/images/avatar/avatar1.jpg".to_string()),
            border_config: Some(BorderConfig::new("assets/images/gif/gif1.gif", 0.55, 0.37, 0.21)),
            size: "150px".to_string(),
        },
        PresetEntry {
            key: "preset2".to_string(),
            display_name_key: "preset.preset2".to_string(),
            avatar_url: Some("assets/images/avatar/avatar2.jpg".to_string()),
            border_config: Some(BorderConfig {
                rotate: Some(0.0),
                ..BorderConfig::new("assets/images/gif/gif2.gif", 0.60, 0.20, 0.20)
            }),
            size: "150px".to_string(),
        },
        PresetEntry {
            key: "plain".to_string(),
            display_name_key: "preset.plain".to_string(),
            avatar_url: Some("assets/images/avatar/avatar1.jpg".to_string()),
            border_config: None,
            size: "120px".to_string(),
        },
    ]
}

pub fn find<'a>(presets: &'a [PresetEntry], key: &str) -> Option<&'a PresetEntry> {
    presets.iter().find(|p| p.key == key)
}
