//! Editor form presentations
//!
//! A [`Form`] distinguishes user input (which emits a change) from
//! programmatic patches (which never emit, and are counted).

use crate::constants::avatar::DEFAULT_BORDER_RADIUS;
use crate::constants::form::DEFAULT_ROTATE;
use crate::constants::geometry::{RECOMMENDED_OFFSET_MAX, RECOMMENDED_SCALE_MAX, RECOMMENDED_SCALE_MIN};
use crate::types::BorderConfig;

#[derive(Debug, Clone)]
pub struct Form<V> {
    value: V,
    revision: u64,
}

impl<V: Clone + PartialEq> Form<V> {
    pub fn new(value: V) -> Self {
        Self { value, revision: 0 }
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    /// User edit. Returns the value to dispatch when it actually changed.
    pub fn input(&mut self, value: V) -> Option<V> {
        if value == self.value {
            return None;
        }
        self.value = value.clone();
        Some(value)
    }

    /// Controller push; never emits a change event
    pub fn patch(&mut self, value: V) {
        self.value = value;
        self.revision += 1;
    }

    /// Number of controller pushes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

/// Structured fields of the quick parameters panel, as typed
#[derive(Debug, Clone, PartialEq)]
pub struct QuickParams {
    pub avatar_scale: String,
    pub top_offset_ratio: String,
    pub left_offset_ratio: String,
    pub rotate: String,
    pub border_radius: String,
}

impl QuickParams {
    /// Field text for a config; missing rotate/radius show their defaults
    pub fn from_config(config: &BorderConfig) -> Self {
        Self {
            avatar_scale: format_number(config.avatar_scale),
            top_offset_ratio: format_number(config.top_offset_ratio),
            left_offset_ratio: format_number(config.left_offset_ratio),
            rotate: format_number(config.rotate.unwrap_or(DEFAULT_ROTATE)),
            border_radius: config
                .border_radius
                .clone()
                .unwrap_or_else(|| DEFAULT_BORDER_RADIUS.to_string()),
        }
    }

    /// Merge the fields over `base`, keeping its frame image.
    ///
    /// Coercion: a ratio that does not parse keeps the value from `base`;
    /// a rotation that does not parse becomes 0; a blank radius is dropped.
    pub fn merge_into(&self, base: &BorderConfig) -> BorderConfig {
        let radius = self.border_radius.trim();
        BorderConfig {
            gif_url: base.gif_url.clone(),
            avatar_scale: parse_number(&self.avatar_scale).unwrap_or(base.avatar_scale),
            top_offset_ratio: parse_number(&self.top_offset_ratio).unwrap_or(base.top_offset_ratio),
            left_offset_ratio: parse_number(&self.left_offset_ratio).unwrap_or(base.left_offset_ratio),
            rotate: Some(parse_number(&self.rotate).unwrap_or(DEFAULT_ROTATE)),
            border_radius: (!radius.is_empty()).then(|| radius.to_string()),
        }
    }

    /// True when a parsed ratio falls outside the documented sweet spot.
    /// Advisory only; nothing is clamped.
    pub fn outside_recommended(&self) -> bool {
        let scale_off = parse_number(&self.avatar_scale)
            .is_some_and(|s| !(RECOMMENDED_SCALE_MIN..=RECOMMENDED_SCALE_MAX).contains(&s));
        let offset_off = [&self.top_offset_ratio, &self.left_offset_ratio]
            .into_iter()
            .filter_map(|text| parse_number(text))
            .any(|o| o.abs() > RECOMMENDED_OFFSET_MAX);
        scale_off || offset_off
    }
}

/// Debug panel fields: image URLs, display size and the JSON draft
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DebugFields {
    pub avatar_url: String,
    pub border_gif_url: String,
    pub avatar_size: String,
    pub config_json: String,
}

/// Finite number from trimmed text
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn format_number(value: f64) -> String {
    format!("{value}")
}
