use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{debug, info};

use border_avatar::avatar::{AvatarEvent, BorderAvatar};
use border_avatar::geometry;

use crate::gui::constants::*;
use crate::gui::textures::{Resolved, TextureSlot};

/// Rendering state for one avatar preview
pub struct AvatarView {
    avatar_slot: TextureSlot,
    frame_slot: TextureSlot,
    observed_width: Option<i32>,
    started: Instant,
    repaint_after: Option<Duration>,
}

impl AvatarView {
    pub fn new() -> Self {
        Self {
            avatar_slot: TextureSlot::new("avatar"),
            frame_slot: TextureSlot::new("frame"),
            observed_width: None,
            started: Instant::now(),
            repaint_after: None,
        }
    }

    /// Delay until the next animation frame, if anything is animating
    pub fn repaint_after(&self) -> Option<Duration> {
        self.repaint_after
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, avatar: &mut BorderAvatar, now: Instant) -> Vec<AvatarEvent> {
        let mut events = Vec::new();
        self.repaint_after = None;

        // Requested size, shrunk to what the panel can give
        let requested = geometry::resolve_width(0, avatar.size());
        let available = ui.available_width().floor() as i32;
        let width = if requested > 0 { requested.min(available) } else { available };

        match self.observed_width {
            None => {
                avatar.mount(width);
                self.observed_width = Some(width);
            }
            Some(previous) if previous != width => {
                avatar.observe_resize(width, now);
                self.observed_width = Some(width);
            }
            Some(_) => {}
        }
        avatar.tick(now);

        let Some(dims) = avatar.dimensions() else {
            ui.label("…");
            return events;
        };

        let side = dims.container_width_px as f32;
        let (container, response) = ui.allocate_exact_size(egui::vec2(side, side), egui::Sense::click());
        if response.clicked() {
            if let Some(event) = avatar.on_click() {
                info!("Avatar clicked");
                events.push(event);
            }
        }

        let elapsed = now.saturating_duration_since(self.started);
        let ctx = ui.ctx().clone();
        let painter = ui.painter_at(container);

        if let Some(style) = avatar.avatar_style() {
            let rect = egui::Rect::from_min_size(
                container.min + egui::vec2(style.left_px as f32, style.top_px as f32),
                egui::vec2(style.size_px as f32, style.size_px as f32),
            );
            let radius = style.corner_radius_px();
            let showing_default = avatar.showing_default_image();
            let source = avatar.image_source().to_string();

            match self.avatar_slot.resolve(&ctx, &source) {
                Resolved::Ready { texture, fresh } => {
                    let mut image = egui::Image::from_texture(texture.frame_at(elapsed)).corner_radius(radius);
                    if let Some(deg) = style.rotate_deg {
                        image = image.rotate((deg as f32).to_radians(), egui::Vec2::splat(0.5));
                    }
                    image.paint_at(ui, rect);
                    schedule(&mut self.repaint_after, texture.min_delay());

                    if fresh && avatar.is_loading() {
                        events.push(avatar.on_image_load());
                    }
                }
                Resolved::Failed { reason, fresh } => {
                    if showing_default {
                        paint_placeholder(&painter, rect, radius);
                        if fresh && avatar.is_loading() {
                            events.push(avatar.on_image_load());
                        }
                    } else if fresh {
                        debug!(reason, "Avatar image failed, falling back to default");
                        events.push(avatar.on_image_error(reason));
                        ctx.request_repaint();
                    }
                }
            }
        }

        if let Some(url) = avatar.border_image().map(str::to_string) {
            match self.frame_slot.resolve(&ctx, &url) {
                Resolved::Ready { texture, .. } => {
                    egui::Image::from_texture(texture.frame_at(elapsed)).paint_at(ui, container);
                    schedule(&mut self.repaint_after, texture.min_delay());
                }
                Resolved::Failed { .. } => {
                    painter.rect_stroke(
                        container,
                        egui::CornerRadius::ZERO,
                        egui::Stroke::new(1.0, PLACEHOLDER_TEXT),
                        egui::StrokeKind::Inside,
                    );
                }
            }
        }

        response.on_hover_text(avatar.alt_text());
        events
    }
}

impl Default for AvatarView {
    fn default() -> Self {
        Self::new()
    }
}

fn schedule(repaint_after: &mut Option<Duration>, delay: Option<Duration>) {
    if let Some(delay) = delay {
        *repaint_after = Some(repaint_after.map_or(delay, |current| current.min(delay)));
    }
}

fn paint_placeholder(painter: &egui::Painter, rect: egui::Rect, radius: f32) {
    painter.rect_filled(rect, radius, PLACEHOLDER_FILL);
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "No Image",
        egui::FontId::proportional(14.0),
        PLACEHOLDER_TEXT,
    );
}
