//! Transient on-screen notifications

use std::time::{Duration, Instant};

use eframe::egui;

use border_avatar::constants::toast::{DEFAULT_DURATION_MS, ERROR_DURATION_MS};
use border_avatar::notify::{Notifier, log_notification};
use border_avatar::types::Severity;

use crate::gui::constants::*;

struct Toast {
    text: String,
    severity: Severity,
    expires: Instant,
}

#[derive(Default)]
pub struct ToastQueue {
    toasts: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, text: &str, severity: Severity, now: Instant) {
        let ms = match severity {
            Severity::Error => ERROR_DURATION_MS,
            _ => DEFAULT_DURATION_MS,
        };
        self.toasts.push(Toast {
            text: text.to_string(),
            severity,
            expires: now + Duration::from_millis(ms),
        });
    }

    pub fn expire(&mut self, now: Instant) {
        self.toasts.retain(|t| t.expires > now);
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn next_expiry(&self) -> Option<Instant> {
        self.toasts.iter().map(|t| t.expires).min()
    }

    pub fn show(&mut self, ctx: &egui::Context, now: Instant) {
        self.expire(now);
        if self.toasts.is_empty() {
            return;
        }

        let mut dismissed = None;
        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -SECTION_SPACING])
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                for (idx, toast) in self.toasts.iter().enumerate() {
                    let response = egui::Frame::popup(ui.style())
                        .fill(color(toast.severity))
                        .show(ui, |ui| {
                            ui.set_width(TOAST_WIDTH);
                            ui.label(egui::RichText::new(&toast.text).color(egui::Color32::WHITE));
                        })
                        .response
                        .interact(egui::Sense::click());
                    if response.clicked() {
                        dismissed = Some(idx);
                    }
                    ui.add_space(ITEM_SPACING / 2.0);
                }
            });

        if let Some(idx) = dismissed {
            self.toasts.remove(idx);
        }
    }
}

impl Notifier for ToastQueue {
    fn notify(&mut self, message: &str, severity: Severity) {
        log_notification(message, severity);
        self.push(message, severity, Instant::now());
    }
}

fn color(severity: Severity) -> egui::Color32 {
    match severity {
        Severity::Info => TOAST_INFO,
        Severity::Success => TOAST_SUCCESS,
        Severity::Warning => TOAST_WARNING,
        Severity::Error => TOAST_ERROR,
    }
}
