//! Avatar display instance: frame image plus a proportionally placed avatar
//!
//! Owns the derived [`DimensionState`] for one rendered avatar. Width changes
//! arrive through [`BorderAvatar::observe_resize`] and are debounced; config
//! changes recompute immediately.

use std::time::Instant;
use tracing::{debug, trace};

use crate::constants::avatar::{DEFAULT_ALT_TEXT, DEFAULT_BORDER_RADIUS, DEFAULT_IMAGE_URL, DEFAULT_SIZE};
use crate::constants::geometry::RESIZE_DEBOUNCE_MS;
use crate::debounce::Debouncer;
use crate::geometry;
use crate::types::{BorderConfig, DimensionState};

/// Events reported back to the host
#[derive(Debug, Clone, PartialEq)]
pub enum AvatarEvent {
    Click,
    ImageLoad,
    ImageError(String),
}

/// Everything the renderer needs to place the avatar image
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarStyle {
    pub size_px: i32,
    pub top_px: i32,
    pub left_px: i32,
    pub rotate_deg: Option<f64>,
    pub border_radius: String,
}

impl AvatarStyle {
    pub fn transform(&self) -> String {
        match self.rotate_deg {
            Some(deg) => format!("rotate({deg}deg)"),
            None => "none".to_string(),
        }
    }

    /// Corner radius in pixels for the current avatar size
    pub fn corner_radius_px(&self) -> f32 {
        corner_radius_px(&self.border_radius, self.size_px)
    }
}

#[derive(Debug)]
pub struct BorderAvatar {
    config: BorderConfig,
    avatar_url: String,
    default_image_url: String,
    size: String,
    alt_text: String,
    clickable: bool,

    dimensions: Option<DimensionState>,
    measured_width: i32,
    resize: Debouncer<i32>,
    mounted: bool,
    destroyed: bool,

    loading: bool,
    has_error: bool,
}

impl BorderAvatar {
    pub fn new() -> Self {
        Self {
            config: BorderConfig::bare(),
            avatar_url: String::new(),
            default_image_url: DEFAULT_IMAGE_URL.to_string(),
            size: DEFAULT_SIZE.to_string(),
            alt_text: DEFAULT_ALT_TEXT.to_string(),
            clickable: false,
            dimensions: None,
            measured_width: 0,
            resize: Debouncer::from_millis(RESIZE_DEBOUNCE_MS),
            mounted: false,
            destroyed: false,
            loading: true,
            has_error: false,
        }
    }

    pub fn with_config(mut self, config: BorderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_avatar_url(mut self, url: impl Into<String>) -> Self {
        self.avatar_url = url.into();
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_default_image_url(mut self, url: impl Into<String>) -> Self {
        self.default_image_url = url.into();
        self
    }

    pub fn with_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = alt.into();
        self
    }

    pub fn clickable(mut self, clickable: bool) -> Self {
        self.clickable = clickable;
        self
    }

    /// First layout pass
    pub fn mount(&mut self, measured_width: i32) {
        if self.destroyed {
            return;
        }
        self.mounted = true;
        self.measured_width = measured_width;
        self.calculate();
    }

    /// Container width changed; applied after the resize quiet period
    pub fn observe_resize(&mut self, width: i32, now: Instant) {
        if self.destroyed {
            return;
        }
        trace!(width, "Container resize observed");
        self.resize.push(width, now);
    }

    /// Deliver a debounced resize if its quiet period has elapsed.
    /// Returns true when the dimensions were recomputed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.resize.poll(now) {
            Some(width) => {
                self.measured_width = width;
                self.calculate()
            }
            None => false,
        }
    }

    /// When the pending resize, if any, will be applied
    pub fn next_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    pub fn set_config(&mut self, config: BorderConfig) {
        if self.config == config {
            return;
        }
        self.config = config;
        self.calculate();
    }

    pub fn set_size(&mut self, size: &str) {
        if self.size == size {
            return;
        }
        self.size = size.to_string();
        self.calculate();
    }

    pub fn set_avatar_url(&mut self, url: &str) {
        if self.avatar_url == url {
            return;
        }
        self.avatar_url = url.to_string();
        self.loading = true;
        self.has_error = false;
    }

    /// Recompute immediately, for hosts that know the layout changed
    pub fn recalculate(&mut self) -> bool {
        self.calculate()
    }

    /// Tear down: pending resizes are dropped and no later resize is accepted
    pub fn destroy(&mut self) {
        if self.resize.cancel() {
            debug!("Cancelled pending resize on destroy");
        }
        self.destroyed = true;
        self.dimensions = None;
    }

    fn calculate(&mut self) -> bool {
        if !self.mounted || self.destroyed {
            return false;
        }
        let width = geometry::resolve_width(self.measured_width, &self.size);
        let layout = self.layout_config();
        let changed = geometry::recompute(&mut self.dimensions, width, &layout);
        if changed {
            debug!(width, dimensions = ?self.dimensions, "Avatar dimensions recomputed");
        }
        changed
    }

    /// The frameless placeholder lays the avatar out over the whole container
    fn layout_config(&self) -> BorderConfig {
        if self.config.is_placeholder() {
            BorderConfig::bare()
        } else {
            self.config.clone()
        }
    }

    pub fn dimensions(&self) -> Option<DimensionState> {
        self.dimensions
    }

    pub fn config(&self) -> &BorderConfig {
        &self.config
    }

    pub fn size(&self) -> &str {
        &self.size
    }

    pub fn alt_text(&self) -> &str {
        &self.alt_text
    }

    pub fn avatar_style(&self) -> Option<AvatarStyle> {
        let dims = self.dimensions?;
        Some(AvatarStyle {
            size_px: dims.avatar_size_px,
            top_px: dims.top_offset_px,
            left_px: dims.left_offset_px,
            rotate_deg: self.config.rotate.filter(|deg| *deg != 0.0),
            border_radius: self
                .config
                .border_radius
                .clone()
                .filter(|r| !r.is_empty())
                .unwrap_or_else(|| DEFAULT_BORDER_RADIUS.to_string()),
        })
    }

    /// Frame image, if one should be drawn
    pub fn border_image(&self) -> Option<&str> {
        self.config.has_border().then_some(self.config.gif_url.as_str())
    }

    /// Image to draw inside the frame
    pub fn image_source(&self) -> &str {
        if self.showing_default_image() {
            &self.default_image_url
        } else {
            &self.avatar_url
        }
    }

    /// True when the fallback image is shown instead of the avatar URL
    pub fn showing_default_image(&self) -> bool {
        self.avatar_url.is_empty() || self.has_error
    }

    pub fn on_click(&self) -> Option<AvatarEvent> {
        self.clickable.then_some(AvatarEvent::Click)
    }

    pub fn on_image_load(&mut self) -> AvatarEvent {
        self.loading = false;
        AvatarEvent::ImageLoad
    }

    pub fn on_image_error(&mut self, reason: impl Into<String>) -> AvatarEvent {
        self.loading = false;
        self.has_error = true;
        AvatarEvent::ImageError(reason.into())
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }
}

impl Default for BorderAvatar {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve a CSS-like radius ("50%", "12px", "8") against the avatar size
pub fn corner_radius_px(radius: &str, size_px: i32) -> f32 {
    let radius = radius.trim();
    let size = size_px.max(0) as f32;
    let value = if let Some(percent) = radius.strip_suffix('%') {
        percent.trim().parse::<f32>().ok().map(|p| size * p / 100.0)
    } else {
        radius.trim_end_matches("px").trim().parse::<f32>().ok()
    };
    value.unwrap_or(size / 2.0).clamp(0.0, size / 2.0)
}
