//! Image sources for the preview: data URLs and local files, decoded with
//! the `image` crate into (possibly animated) egui textures

use std::fs;
use std::io::Cursor;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use eframe::egui;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, ImageFormat, RgbaImage};
use tracing::{debug, warn};

use border_avatar::data_url;

use crate::gui::constants::{GIF_FALLBACK_FRAME_DELAY_MS, GIF_MIN_FRAME_DELAY_MS};

/// One decoded frame and how long it stays on screen
pub struct DecodedFrame {
    pub image: RgbaImage,
    pub delay: Duration,
}

/// Raw bytes behind an image URL
pub fn load_bytes(url: &str) -> Result<Vec<u8>> {
    if data_url::is_data_url(url) {
        let decoded = data_url::decode(url).ok_or_else(|| anyhow!("Malformed data URL"))?;
        return Ok(decoded.bytes);
    }
    if url.starts_with("http://") || url.starts_with("https://") {
        bail!("Remote images are not supported: {url}");
    }

    let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
    fs::read(path).with_context(|| format!("Failed to read image {:?}", path))
}

/// Decode every frame; still images yield a single frame
pub fn decode_frames(bytes: &[u8]) -> Result<Vec<DecodedFrame>> {
    let format = image::guess_format(bytes).context("Unrecognised image format")?;

    if format == ImageFormat::Gif {
        let decoder = GifDecoder::new(Cursor::new(bytes)).context("Failed to open GIF")?;
        let frames = decoder
            .into_frames()
            .collect_frames()
            .context("Failed to decode GIF frames")?;
        if frames.is_empty() {
            bail!("GIF has no frames");
        }
        return Ok(frames
            .into_iter()
            .map(|frame| {
                let (numer, denom) = frame.delay().numer_denom_ms();
                DecodedFrame {
                    delay: frame_delay(numer, denom),
                    image: frame.into_buffer(),
                }
            })
            .collect());
    }

    let image = image::load_from_memory_with_format(bytes, format).context("Failed to decode image")?;
    Ok(vec![DecodedFrame {
        image: image.to_rgba8(),
        delay: Duration::ZERO,
    }])
}

/// Browsers treat near-zero GIF delays as 100ms; so do we
fn frame_delay(numer: u32, denom: u32) -> Duration {
    let ms = if denom == 0 { 0 } else { numer / denom };
    if ms < GIF_MIN_FRAME_DELAY_MS {
        Duration::from_millis(GIF_FALLBACK_FRAME_DELAY_MS)
    } else {
        Duration::from_millis(u64::from(ms))
    }
}

/// Uploaded frames of one image
pub struct AnimatedTexture {
    frames: Vec<(egui::TextureHandle, Duration)>,
    cycle: Duration,
}

impl AnimatedTexture {
    fn upload(ctx: &egui::Context, name: &str, decoded: Vec<DecodedFrame>) -> Self {
        let frames: Vec<_> = decoded
            .into_iter()
            .enumerate()
            .map(|(i, frame)| {
                let size = [frame.image.width() as usize, frame.image.height() as usize];
                let pixels = egui::ColorImage::from_rgba_unmultiplied(size, frame.image.as_raw());
                let handle = ctx.load_texture(format!("{name}#{i}"), pixels, egui::TextureOptions::LINEAR);
                (handle, frame.delay)
            })
            .collect();
        let cycle = frames.iter().map(|(_, delay)| *delay).sum();
        Self { frames, cycle }
    }

    pub fn is_animated(&self) -> bool {
        self.frames.len() > 1 && !self.cycle.is_zero()
    }

    /// Frame to show `elapsed` after playback started
    pub fn frame_at(&self, elapsed: Duration) -> &egui::TextureHandle {
        if !self.is_animated() {
            return &self.frames[0].0;
        }

        let mut t = Duration::from_nanos((elapsed.as_nanos() % self.cycle.as_nanos()) as u64);
        for (handle, delay) in &self.frames {
            if t < *delay {
                return handle;
            }
            t -= *delay;
        }
        &self.frames[0].0
    }

    /// Shortest delay, used to schedule repaints while animating
    pub fn min_delay(&self) -> Option<Duration> {
        self.is_animated()
            .then(|| self.frames.iter().map(|(_, delay)| *delay).min())
            .flatten()
    }
}

/// Outcome of resolving a slot for the current frame
pub enum Resolved<'a> {
    Ready { texture: &'a AnimatedTexture, fresh: bool },
    Failed { reason: &'a str, fresh: bool },
}

/// Caches the texture for one URL and reloads when the URL changes
pub struct TextureSlot {
    name: &'static str,
    url: Option<String>,
    state: Option<Result<AnimatedTexture, String>>,
}

impl TextureSlot {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            url: None,
            state: None,
        }
    }

    pub fn resolve(&mut self, ctx: &egui::Context, url: &str) -> Resolved<'_> {
        let fresh = self.url.as_deref() != Some(url);
        if fresh {
            debug!(slot = self.name, len = url.len(), "Loading image");
            let state = load_bytes(url)
                .and_then(|bytes| decode_frames(&bytes))
                .map(|frames| AnimatedTexture::upload(ctx, self.name, frames))
                .map_err(|e| {
                    warn!(slot = self.name, error = ?e, "Image failed to load");
                    format!("{e:#}")
                });
            self.url = Some(url.to_string());
            self.state = Some(state);
        }

        match &self.state {
            Some(Ok(texture)) => Resolved::Ready { texture, fresh },
            Some(Err(reason)) => Resolved::Failed { reason, fresh },
            None => Resolved::Failed { reason: "", fresh },
        }
    }
}
