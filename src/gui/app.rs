//! Demo window: preset picker, quick params and debug panel on the left,
//! live avatar preview in the middle

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{debug, error, info};

use border_avatar::avatar::{AvatarEvent, BorderAvatar};
use border_avatar::editor::{ConfigSync, Presentation};
use border_avatar::i18n::{Label, Language};
use border_avatar::settings::Settings;
use border_avatar::types::Severity;

use super::components::avatar_view::AvatarView;
use super::components::debug_panel::{DebugAction, DebugPanelState};
use super::components::{preset_selector, quick_params};
use super::constants::*;
use super::toasts::ToastQueue;

struct DemoApp {
    editor: ConfigSync<ToastQueue>,
    avatar: BorderAvatar,
    avatar_view: AvatarView,
    debug_panel: DebugPanelState,
    settings: Settings,
    applied_signals: Option<u64>,
}

impl DemoApp {
    fn new(_cc: &CreationContext<'_>, settings: Settings) -> Self {
        info!(lang = settings.lang.code(), "Initializing demo window");

        let mut editor = ConfigSync::with_builtin_presets(ToastQueue::default());
        editor.set_language(settings.lang);

        let signals = editor.signals().clone();
        let avatar = BorderAvatar::new()
            .with_config(signals.border_config)
            .with_avatar_url(signals.avatar_url)
            .with_size(signals.avatar_size)
            .with_alt_text(Label::AvatarAlt.text(settings.lang))
            .clickable(true);
        let applied_signals = Some(editor.revision(Presentation::Signals));

        Self {
            editor,
            avatar,
            avatar_view: AvatarView::new(),
            debug_panel: DebugPanelState::default(),
            settings,
            applied_signals,
        }
    }

    fn lang(&self) -> Language {
        self.settings.lang
    }

    /// Hand new signal values to the avatar component
    fn apply_signals(&mut self) {
        let revision = self.editor.revision(Presentation::Signals);
        if self.applied_signals == Some(revision) {
            return;
        }
        let signals = self.editor.signals();
        self.avatar.set_config(signals.border_config.clone());
        self.avatar.set_size(&signals.avatar_size);
        self.avatar.set_avatar_url(&signals.avatar_url);
        self.applied_signals = Some(revision);
        debug!(revision, "Signals applied to avatar");
    }

    fn toggle_language(&mut self) {
        self.settings.lang = self.settings.lang.toggled();
        self.editor.set_language(self.settings.lang);
        info!(lang = self.settings.lang.code(), "Language switched");
        if let Err(err) = self.settings.save() {
            error!(error = ?err, "Failed to save settings");
            self.editor.notifier_mut().push(&format!("{err:#}"), Severity::Warning, Instant::now());
        }
    }

    fn handle_debug_action(&mut self, ctx: &egui::Context, action: DebugAction, now: Instant) {
        match action {
            DebugAction::Edited(fields) => self.editor.debug_form_input(fields, now),
            DebugAction::ChooseFile(target, path) => {
                self.editor.select_file(target, path);
            }
            DebugAction::Import => {
                self.editor.import_config();
            }
            DebugAction::Copy => {
                self.editor.copy_config(|text| {
                    ctx.copy_text(text.to_string());
                    Ok(())
                });
            }
            DebugAction::Download => {
                self.editor.download_config(&download_dir());
            }
        }
    }

    fn handle_avatar_event(&self, event: AvatarEvent) {
        match event {
            AvatarEvent::Click => info!("Avatar click event"),
            AvatarEvent::ImageLoad => debug!("Avatar image loaded"),
            AvatarEvent::ImageError(reason) => error!(reason = %reason, "Avatar image failed to load"),
        }
    }

    /// Earliest moment something time-driven needs another frame
    fn next_wakeup(&self, now: Instant) -> Option<Duration> {
        let deadlines = [
            self.editor.next_deadline(),
            self.avatar.next_deadline(),
            self.editor.notifier().next_expiry(),
        ];
        let mut wait = deadlines
            .into_iter()
            .flatten()
            .map(|deadline| deadline.saturating_duration_since(now))
            .min();

        if let Some(frame) = self.avatar_view.repaint_after() {
            wait = Some(wait.map_or(frame, |w| w.min(frame)));
        }
        if self.editor.file_read_in_flight() {
            wait = Some(wait.map_or(FILE_POLL_INTERVAL, |w| w.min(FILE_POLL_INTERVAL)));
        }
        wait
    }
}

const FILE_POLL_INTERVAL: Duration = Duration::from_millis(50);

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.editor.poll(now);
        self.apply_signals();
        let lang = self.lang();

        egui::TopBottomPanel::top("title_bar").show(ctx, |ui| {
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                ui.heading(Label::Title.text(lang));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(Label::SwitchLanguage.text(lang)).clicked() {
                        self.toggle_language();
                    }
                });
            });
            ui.add_space(ITEM_SPACING);
        });

        let mut debug_actions = Vec::new();
        egui::SidePanel::left("editor_panel")
            .default_width(SIDE_PANEL_WIDTH)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    if let Some(key) = preset_selector::ui(ui, self.editor.presets(), self.editor.selected_preset(), lang) {
                        self.editor.select_preset(&key);
                    }
                    ui.add_space(SECTION_SPACING);

                    if let Some(params) = quick_params::ui(ui, self.editor.quick_params(), lang) {
                        self.editor.quick_params_input(params, now);
                    }
                    ui.add_space(SECTION_SPACING);

                    debug_actions = self.debug_panel.ui(ui, self.editor.debug_form(), lang);
                });
            });
        for action in debug_actions {
            self.handle_debug_action(ctx, action, now);
        }

        // Pushes made above must reach the avatar in this frame
        self.apply_signals();

        let mut avatar_events = Vec::new();
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(egui::RichText::new(Label::Preview.text(lang)).strong());
            ui.add_space(SECTION_SPACING);
            ui.vertical_centered(|ui| {
                avatar_events = self.avatar_view.ui(ui, &mut self.avatar, now);
            });
        });
        for event in avatar_events {
            self.handle_avatar_event(event);
        }

        self.editor.notifier_mut().show(ctx, now);

        if let Some(wait) = self.next_wakeup(now) {
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.avatar.destroy();
        info!("Demo window exiting");
    }
}

/// Where downloaded configs go
fn download_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn run_gui(settings: Settings) -> Result<()> {
    let title = Label::Title.text(settings.lang);
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title(title),
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |cc| Ok(Box::new(DemoApp::new(cc, settings)))),
    )
    .map_err(|err| anyhow!("Failed to launch demo window: {err}"))
}
