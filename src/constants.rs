//! Application-wide constants
//!
//! This module contains all magic numbers and string literals used throughout
//! the application, providing a single source of truth for constant values.

/// Container geometry and resize handling
pub mod geometry {
    /// Quiet period before a burst of resize notifications triggers a recompute
    pub const RESIZE_DEBOUNCE_MS: u64 = 150;

    /// Recommended avatar scale range (documented, never clamped)
    pub const RECOMMENDED_SCALE_MIN: f64 = 0.3;
    pub const RECOMMENDED_SCALE_MAX: f64 = 0.9;

    /// Recommended offset ratio magnitude (documented, never clamped)
    pub const RECOMMENDED_OFFSET_MAX: f64 = 0.2;
}

/// Editor form handling
pub mod form {
    /// Quiet period before form value changes are dispatched
    pub const FORM_DEBOUNCE_MS: u64 = 100;

    /// Rotation shown in the quick params form when a config has none
    pub const DEFAULT_ROTATE: f64 = 0.0;
}

/// Avatar component defaults
pub mod avatar {
    /// Display size used when the host does not provide one
    pub const DEFAULT_SIZE: &str = "120px";

    /// Corner radius applied when a config has no border_radius
    pub const DEFAULT_BORDER_RADIUS: &str = "50%";

    /// Alt text for the avatar image
    pub const DEFAULT_ALT_TEXT: &str = "Avatar";

    /// Gray "No Image" tile shown when the avatar URL is empty or broken
    pub const DEFAULT_IMAGE_URL: &str = "data:image/svg+xml,%3Csvg xmlns=%22http://www.w3.org/2000/svg%22 width=%22100%22 height=%22100%22%3E%3Crect fill=%22%23ddd%22 width=%22100%22 height=%22100%22/%3E%3Ctext x=%2250%25%22 y=%2250%25%22 dominant-baseline=%22middle%22 text-anchor=%22middle%22 font-family=%22Arial%22 font-size=%2214%22 fill=%22%23999%22%3ENo Image%3C/text%3E%3C/svg%3E";
}

/// Local image import
pub mod upload {
    /// Largest accepted image file (5 MB)
    pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

    /// MIME prefix every accepted file must carry
    pub const IMAGE_MIME_PREFIX: &str = "image/";
}

/// Config export
pub mod export {
    /// File name used when downloading the current config
    pub const DOWNLOAD_FILENAME: &str = "border-avatar-config.json";
}

/// Notification display durations
pub mod toast {
    pub const DEFAULT_DURATION_MS: u64 = 3000;
    pub const ERROR_DURATION_MS: u64 = 5000;
}

/// Settings file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "border-avatar";

    /// Settings file name
    pub const FILENAME: &str = "settings.json";
}
