//! Editor state: one canonical border config mirrored across presentations
//!
//! Presentations:
//! - **quick params**: structured fields (scale, offsets, rotate, radius)
//! - **debug form**: avatar/frame URLs, display size and the JSON draft
//! - **preset selector**
//! - **signals**: the values the avatar renderer consumes
//!
//! An edit enters through exactly one presentation, replaces the canonical
//! config and is fanned out to the rest. Pushes never emit change events and
//! cancel any pending debounced edit they overwrite; inbound handlers skip
//! values equal to what was last settled. A structured-field push only
//! rewrites the JSON text of the debug form. Imports apply a pending debug
//! form edit before they run.

pub mod form;
pub mod json;
pub mod presets;

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, trace, warn};

use crate::constants::export::DOWNLOAD_FILENAME;
use crate::constants::form::FORM_DEBOUNCE_MS;
use crate::debounce::Debouncer;
use crate::i18n::{Language, Message};
use crate::notify::Notifier;
use crate::types::{BorderConfig, Severity};
use crate::upload::{Completion, FileLoader, UploadTarget};

use form::{DebugFields, Form, QuickParams};
use presets::PresetEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncPhase {
    Idle,
    Propagating,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presentation {
    QuickParams,
    DebugForm,
    PresetSelector,
    Signals,
}

/// Inputs handed to the avatar renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Signals {
    pub avatar_url: String,
    pub border_gif_url: String,
    pub avatar_size: String,
    pub border_config: BorderConfig,
}

/// Where the edit being fanned out came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edit {
    QuickParams,
    JsonImport,
    Preset,
    DebugField,
    FileImport,
}

/// Avatar values carried by an edit alongside the border config
#[derive(Debug, Default)]
struct AvatarOverrides {
    avatar_url: Option<String>,
    avatar_size: Option<String>,
}

impl AvatarOverrides {
    fn is_empty(&self) -> bool {
        self.avatar_url.is_none() && self.avatar_size.is_none()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct HandlerRuns {
    quick_params: u64,
    debug_form: u64,
}

pub struct ConfigSync<N: Notifier> {
    presets: Vec<PresetEntry>,
    selected_preset: Form<String>,

    border_config: BorderConfig,
    config_json: String,

    quick_params: Form<QuickParams>,
    settled_quick: QuickParams,
    quick_debounce: Debouncer<QuickParams>,

    debug_form: Form<DebugFields>,
    settled_debug: DebugFields,
    debug_debounce: Debouncer<DebugFields>,

    signals: Form<Signals>,

    phase: SyncPhase,
    handler_runs: HandlerRuns,
    files: FileLoader,
    language: Language,
    notifier: N,
}

impl<N: Notifier> ConfigSync<N> {
    /// Start from `initial_preset`, or the first preset when that key is unknown
    pub fn new(presets: Vec<PresetEntry>, initial_preset: &str, notifier: N) -> Self {
        let initial = presets::find(&presets, initial_preset)
            .or_else(|| presets.first())
            .cloned();

        let (key, avatar_url, avatar_size, border_config) = match initial {
            Some(preset) => (
                preset.key,
                preset.avatar_url.unwrap_or_default(),
                preset.size,
                preset.border_config.unwrap_or_else(BorderConfig::placeholder),
            ),
            None => (
                String::new(),
                String::new(),
                crate::constants::avatar::DEFAULT_SIZE.to_string(),
                BorderConfig::placeholder(),
            ),
        };

        let config_json = json::serialize(&border_config);
        let quick = QuickParams::from_config(&border_config);
        let debug = DebugFields {
            avatar_url: avatar_url.clone(),
            border_gif_url: border_config.gif_url.clone(),
            avatar_size: avatar_size.clone(),
            config_json: config_json.clone(),
        };
        let signals = Signals {
            avatar_url,
            border_gif_url: border_config.gif_url.clone(),
            avatar_size,
            border_config: border_config.clone(),
        };

        info!(preset = %key, "Editor initialised");

        Self {
            presets,
            selected_preset: Form::new(key),
            border_config,
            config_json,
            quick_params: Form::new(quick.clone()),
            settled_quick: quick,
            quick_debounce: Debouncer::from_millis(FORM_DEBOUNCE_MS),
            debug_form: Form::new(debug.clone()),
            settled_debug: debug,
            debug_debounce: Debouncer::from_millis(FORM_DEBOUNCE_MS),
            signals: Form::new(signals),
            phase: SyncPhase::Idle,
            handler_runs: HandlerRuns::default(),
            files: FileLoader::new(),
            language: Language::default(),
            notifier,
        }
    }

    pub fn with_builtin_presets(notifier: N) -> Self {
        Self::new(presets::builtin_presets(), presets::DEFAULT_PRESET, notifier)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn border_config(&self) -> &BorderConfig {
        &self.border_config
    }

    /// Text last shown by the JSON presentation
    pub fn config_json(&self) -> &str {
        &self.config_json
    }

    pub fn quick_params(&self) -> &QuickParams {
        self.quick_params.value()
    }

    pub fn debug_form(&self) -> &DebugFields {
        self.debug_form.value()
    }

    pub fn signals(&self) -> &Signals {
        self.signals.value()
    }

    pub fn presets(&self) -> &[PresetEntry] {
        &self.presets
    }

    pub fn selected_preset(&self) -> &str {
        self.selected_preset.value()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Controller pushes into a presentation so far
    pub fn revision(&self, presentation: Presentation) -> u64 {
        match presentation {
            Presentation::QuickParams => self.quick_params.revision(),
            Presentation::DebugForm => self.debug_form.revision(),
            Presentation::PresetSelector => self.selected_preset.revision(),
            Presentation::Signals => self.signals.revision(),
        }
    }

    /// Inbound change handler invocations so far
    pub fn handler_runs(&self, presentation: Presentation) -> u64 {
        match presentation {
            Presentation::QuickParams => self.handler_runs.quick_params,
            Presentation::DebugForm => self.handler_runs.debug_form,
            Presentation::PresetSelector | Presentation::Signals => 0,
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    // ------------------------------------------------------------------
    // Event intake
    // ------------------------------------------------------------------

    /// User typed into the quick params panel
    pub fn quick_params_input(&mut self, values: QuickParams, now: Instant) {
        if let Some(changed) = self.quick_params.input(values) {
            self.quick_debounce.push(changed, now);
        }
    }

    /// User typed into the debug panel
    pub fn debug_form_input(&mut self, values: DebugFields, now: Instant) {
        if let Some(changed) = self.debug_form.input(values) {
            self.debug_debounce.push(changed, now);
        }
    }

    /// Dispatch debounced edits and finished file reads.
    /// Returns true when anything was delivered.
    pub fn poll(&mut self, now: Instant) -> bool {
        let mut delivered = false;

        if let Some(values) = self.quick_debounce.poll(now) {
            self.handle_quick_params(values);
            delivered = true;
        }
        if let Some(values) = self.debug_debounce.poll(now) {
            self.handle_debug_form(values);
            delivered = true;
        }
        for completion in self.files.poll() {
            self.handle_file_completion(completion);
            delivered = true;
        }

        delivered
    }

    /// Earliest time a pending debounced edit becomes deliverable
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.quick_debounce.deadline(), self.debug_debounce.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn file_read_in_flight(&self) -> bool {
        self.files.in_flight()
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn handle_quick_params(&mut self, values: QuickParams) {
        if self.phase == SyncPhase::Propagating {
            trace!("Quick params change suppressed during propagation");
            return;
        }
        self.handler_runs.quick_params += 1;

        if values == self.settled_quick {
            trace!("Quick params unchanged, skipping");
            return;
        }

        let config = values.merge_into(&self.border_config);
        debug!(
            scale = config.avatar_scale,
            top = config.top_offset_ratio,
            left = config.left_offset_ratio,
            "Quick params applied"
        );
        self.settled_quick = values;
        self.border_config = config;
        self.fan_out(Edit::QuickParams, AvatarOverrides::default());
    }

    fn handle_debug_form(&mut self, values: DebugFields) {
        if self.phase == SyncPhase::Propagating {
            trace!("Debug form change suppressed during propagation");
            return;
        }
        self.handler_runs.debug_form += 1;

        // Drafts are only parsed on import, and the form holds the newest one
        // even when this snapshot predates a push
        self.settled_debug.config_json = self.debug_form.value().config_json.clone();

        if values.avatar_url == self.settled_debug.avatar_url
            && values.avatar_size == self.settled_debug.avatar_size
            && values.border_gif_url == self.settled_debug.border_gif_url
        {
            trace!(draft_len = values.config_json.len(), "Debug fields unchanged, skipping");
            return;
        }

        let overrides = AvatarOverrides {
            avatar_url: (values.avatar_url != self.settled_debug.avatar_url).then(|| values.avatar_url.clone()),
            avatar_size: (values.avatar_size != self.settled_debug.avatar_size).then(|| values.avatar_size.clone()),
        };

        if values.border_gif_url != self.settled_debug.border_gif_url {
            self.apply_border_gif_url(values.border_gif_url, Edit::DebugField, overrides);
        } else if !overrides.is_empty() {
            self.apply_avatar(overrides);
        }
    }

    /// Parse the JSON draft and adopt it. Invalid text changes nothing.
    pub fn import_config(&mut self) -> bool {
        // Parse the text as shown, even if a field edit applied below rewrites it
        let draft = self.debug_form.value().config_json.clone();
        self.flush_debug_edit();
        match json::parse(&draft) {
            Ok(doc) => {
                info!(gif_url = %doc.border.gif_url, "Config imported");
                self.border_config = doc.border;
                self.config_json = draft;
                self.fan_out(
                    Edit::JsonImport,
                    AvatarOverrides {
                        avatar_url: doc.avatar_url,
                        avatar_size: doc.avatar_size,
                    },
                );
                self.notify(Message::ImportSucceeded, Severity::Success);
                true
            }
            Err(e) => {
                warn!(error = %e, "Config import rejected");
                self.notify(Message::ImportFailed(e.to_string()), Severity::Error);
                false
            }
        }
    }

    /// Switch preset. Unknown keys are ignored.
    pub fn select_preset(&mut self, key: &str) -> bool {
        let Some(preset) = presets::find(&self.presets, key).cloned() else {
            debug!(preset = %key, "Unknown preset, ignoring");
            return false;
        };

        info!(preset = %key, has_border = preset.border_config.is_some(), "Preset selected");
        self.selected_preset.patch(preset.key);
        self.border_config = preset.border_config.unwrap_or_else(BorderConfig::placeholder);
        self.fan_out(
            Edit::Preset,
            AvatarOverrides {
                avatar_url: Some(preset.avatar_url.unwrap_or_default()),
                avatar_size: Some(preset.size),
            },
        );
        true
    }

    /// Replace only the frame image, as if typed into the debug panel
    pub fn set_border_gif_url(&mut self, url: &str) {
        self.flush_debug_edit();
        self.apply_border_gif_url(url.to_string(), Edit::FileImport, AvatarOverrides::default());
    }

    /// Replace the avatar image, as if typed into the debug panel
    pub fn set_avatar_url(&mut self, url: &str) {
        self.flush_debug_edit();
        let mut fields = self.debug_form.value().clone();
        fields.avatar_url = url.to_string();
        self.debug_form.patch(fields);
        self.apply_avatar(AvatarOverrides {
            avatar_url: Some(url.to_string()),
            avatar_size: None,
        });
    }

    /// Start importing a local image; validation failures are reported here
    pub fn select_file(&mut self, target: UploadTarget, path: PathBuf) -> bool {
        match self.files.request(target, path) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Image file rejected");
                self.notify(e.message(), Severity::Error);
                false
            }
        }
    }

    fn handle_file_completion(&mut self, completion: Completion) {
        match completion.result {
            Ok(url) => {
                info!(upload = ?completion.target, ticket = completion.ticket, len = url.len(), "Image file loaded");
                match completion.target {
                    UploadTarget::Border => self.set_border_gif_url(&url),
                    UploadTarget::Avatar => self.set_avatar_url(&url),
                }
            }
            Err(e) => {
                error!(error = %e, "Image file read failed");
                self.notify(e.message(), Severity::Error);
            }
        }
    }

    /// Deliver a typed but still debounced debug edit right away
    fn flush_debug_edit(&mut self) {
        if let Some(values) = self.debug_debounce.flush() {
            debug!("Applying pending debug form edit first");
            self.handle_debug_form(values);
        }
    }

    /// Swap the frame image only; ratios and optionals are kept
    fn apply_border_gif_url(&mut self, url: String, edit: Edit, overrides: AvatarOverrides) {
        debug!(len = url.len(), "Frame image replaced");
        self.border_config = self.border_config.clone().with_gif_url(url);
        self.fan_out(edit, overrides);
    }

    /// Avatar-only change: the border config and the JSON text are untouched
    fn apply_avatar(&mut self, overrides: AvatarOverrides) {
        let mut signals = self.signals.value().clone();
        if let Some(url) = overrides.avatar_url {
            debug!(len = url.len(), "Avatar image replaced");
            self.settled_debug.avatar_url = url.clone();
            signals.avatar_url = url;
        }
        if let Some(size) = overrides.avatar_size {
            debug!(size = %size, "Avatar display size changed");
            self.settled_debug.avatar_size = size.clone();
            signals.avatar_size = size;
        }
        self.signals.patch(signals);
    }

    /// Push the canonical config into every presentation except the origin
    fn fan_out(&mut self, edit: Edit, overrides: AvatarOverrides) {
        self.phase = SyncPhase::Propagating;
        let config = self.border_config.clone();

        if edit != Edit::QuickParams {
            if self.quick_debounce.cancel() {
                debug!("Dropped pending quick params edit superseded by {:?}", edit);
            }
            let values = QuickParams::from_config(&config);
            self.settled_quick = values.clone();
            self.quick_params.patch(values);
        }

        // An imported draft stays exactly as the user wrote it
        if edit != Edit::JsonImport {
            self.config_json = json::serialize(&config);
        }

        if edit == Edit::Preset && self.debug_debounce.cancel() {
            debug!("Dropped pending debug form edit superseded by {:?}", edit);
        }

        let current = self.signals.value();
        let signals = Signals {
            avatar_url: overrides.avatar_url.unwrap_or_else(|| current.avatar_url.clone()),
            avatar_size: overrides.avatar_size.unwrap_or_else(|| current.avatar_size.clone()),
            border_gif_url: config.gif_url.clone(),
            border_config: config,
        };
        let settled = DebugFields {
            avatar_url: signals.avatar_url.clone(),
            border_gif_url: signals.border_gif_url.clone(),
            avatar_size: signals.avatar_size.clone(),
            config_json: self.config_json.clone(),
        };
        let fields = if edit == Edit::QuickParams {
            // Only the JSON text depends on the structured fields; whatever
            // is being typed into the other debug fields stays put
            DebugFields {
                config_json: self.config_json.clone(),
                ..self.debug_form.value().clone()
            }
        } else {
            settled.clone()
        };

        self.settled_debug = settled;
        self.debug_form.patch(fields);
        self.signals.patch(signals);

        self.phase = SyncPhase::Idle;
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Hand the JSON text to a clipboard writer. Empty text is a silent no-op.
    pub fn copy_config<F>(&mut self, write: F) -> bool
    where
        F: FnOnce(&str) -> Result<()>,
    {
        let text = self.debug_form.value().config_json.clone();
        if text.trim().is_empty() {
            debug!("No config to copy");
            return false;
        }

        match write(&text) {
            Ok(()) => {
                self.notify(Message::ConfigCopied, Severity::Success);
                true
            }
            Err(e) => {
                warn!(error = ?e, "Clipboard write failed");
                self.notify(Message::CopyFailed, Severity::Error);
                false
            }
        }
    }

    /// Write the JSON text to `dir`. Empty text is a silent no-op.
    pub fn download_config(&mut self, dir: &Path) -> Option<PathBuf> {
        let text = self.debug_form.value().config_json.clone();
        if text.trim().is_empty() {
            debug!("No config to download");
            return None;
        }

        let path = dir.join(DOWNLOAD_FILENAME);
        match write_export(&path, &text) {
            Ok(()) => {
                info!(path = %path.display(), "Config exported");
                self.notify(Message::DownloadStarted(path.display().to_string()), Severity::Success);
                Some(path)
            }
            Err(e) => {
                error!(error = ?e, "Config export failed");
                self.notify(Message::DownloadFailed, Severity::Error);
                None
            }
        }
    }

    fn notify(&mut self, message: Message, severity: Severity) {
        let text = message.text(self.language);
        self.notifier.notify(&text, severity);
    }
}

fn write_export(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("Failed to create export directory {:?}", parent))?;
    }
    fs::write(path, text).with_context(|| format!("Failed to write config to {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingNotifier;
    use std::fs::File;
    use std::time::Duration;

    fn editor() -> ConfigSync<RecordingNotifier> {
        ConfigSync::with_builtin_presets(RecordingNotifier::default())
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("border-avatar-editor-{}-{}", name, std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn wait_for_file(sync: &mut ConfigSync<RecordingNotifier>) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if sync.poll(Instant::now()) {
                return;
            }
            std::thread::sleep(ms(10));
        }
        panic!("file read never completed");
    }

    fn revisions(sync: &ConfigSync<RecordingNotifier>) -> [u64; 4] {
        [
            sync.revision(Presentation::QuickParams),
            sync.revision(Presentation::DebugForm),
            sync.revision(Presentation::PresetSelector),
            sync.revision(Presentation::Signals),
        ]
    }

    #[test]
    fn test_starts_from_default_preset() {
        let sync = editor();
        assert_eq!(sync.selected_preset(), presets::DEFAULT_PRESET);
        assert_eq!(sync.border_config(), &BorderConfig::new("assets/images/gif/gif1.gif", 0.55, 0.37, 0.21));
        assert_eq!(sync.quick_params().avatar_scale, "0.55");
        assert_eq!(sync.debug_form().config_json, sync.config_json());
        assert_eq!(sync.signals().avatar_size, "150px");
        assert_eq!(revisions(&sync), [0, 0, 0, 0]);
        assert_eq!(sync.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_quick_params_edit_fans_out_once() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut params = sync.quick_params().clone();
        params.avatar_scale = "0.6".to_string();
        sync.quick_params_input(params, t0);

        assert!(!sync.poll(t0 + ms(50)));
        assert!(sync.poll(t0 + ms(FORM_DEBOUNCE_MS)));

        assert_eq!(sync.border_config().avatar_scale, 0.6);
        assert_eq!(sync.border_config().gif_url, "assets/images/gif/gif1.gif");
        assert!(sync.config_json().contains("\"avatarScale\": 0.6"));
        assert_eq!(sync.debug_form().config_json, sync.config_json());
        assert_eq!(sync.signals().border_config, *sync.border_config());

        // origin untouched, every other presentation pushed exactly once
        assert_eq!(revisions(&sync), [0, 1, 0, 1]);
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 1);
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 0);

        assert!(!sync.poll(t0 + Duration::from_secs(1)));
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 1);
        assert_eq!(sync.phase(), SyncPhase::Idle);
    }

    #[test]
    fn test_quick_params_burst_delivers_latest() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut params = sync.quick_params().clone();
        params.top_offset_ratio = "0.3".to_string();
        sync.quick_params_input(params.clone(), t0);
        params.top_offset_ratio = "0.25".to_string();
        sync.quick_params_input(params, t0 + ms(60));

        assert!(!sync.poll(t0 + ms(120)));
        assert!(sync.poll(t0 + ms(160)));
        assert_eq!(sync.border_config().top_offset_ratio, 0.25);
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 1);
    }

    #[test]
    fn test_quick_params_reverted_before_delivery_is_skipped() {
        let mut sync = editor();
        let t0 = Instant::now();
        let original = sync.quick_params().clone();

        let mut params = original.clone();
        params.left_offset_ratio = "0.5".to_string();
        sync.quick_params_input(params, t0);
        sync.quick_params_input(original, t0 + ms(20));

        assert!(sync.poll(t0 + ms(200)));
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 1);
        assert_eq!(revisions(&sync), [0, 0, 0, 0]);
        assert_eq!(sync.border_config().left_offset_ratio, 0.21);
    }

    #[test]
    fn test_invalid_rotate_becomes_zero() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut params = sync.quick_params().clone();
        params.rotate = "abc".to_string();
        params.avatar_scale = "".to_string();
        sync.quick_params_input(params, t0);
        sync.poll(t0 + ms(FORM_DEBOUNCE_MS));

        assert_eq!(sync.border_config().rotate, Some(0.0));
        assert_eq!(sync.border_config().avatar_scale, 0.55);
    }

    #[test]
    fn test_preset_switch_fans_out_once() {
        let mut sync = editor();
        assert!(sync.select_preset("preset2"));

        assert_eq!(sync.selected_preset(), "preset2");
        assert_eq!(sync.border_config().avatar_scale, 0.60);
        assert_eq!(sync.border_config().rotate, Some(0.0));
        assert_eq!(sync.quick_params().avatar_scale, "0.6");
        assert_eq!(sync.signals().avatar_url, "assets/images/avatar/avatar2.jpg");
        assert_eq!(sync.signals().border_gif_url, "assets/images/gif/gif2.gif");
        assert_eq!(sync.debug_form().config_json, sync.config_json());

        assert_eq!(revisions(&sync), [1, 1, 1, 1]);
        assert!(!sync.poll(Instant::now() + Duration::from_secs(1)));
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 0);
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 0);
    }

    #[test]
    fn test_frameless_preset_zeroes_border_but_updates_avatar() {
        let mut sync = editor();
        assert!(sync.select_preset("plain"));

        assert!(sync.border_config().is_placeholder());
        assert!(!sync.signals().border_config.has_border());
        assert_eq!(sync.signals().border_gif_url, "");
        assert_eq!(sync.signals().avatar_url, "assets/images/avatar/avatar1.jpg");
        assert_eq!(sync.signals().avatar_size, "120px");
        assert_eq!(sync.quick_params().avatar_scale, "0");
        assert_eq!(sync.quick_params().top_offset_ratio, "0");
    }

    #[test]
    fn test_unknown_preset_is_noop() {
        let mut sync = editor();
        let before = sync.border_config().clone();

        assert!(!sync.select_preset("preset99"));
        assert_eq!(sync.border_config(), &before);
        assert_eq!(sync.selected_preset(), "preset1");
        assert_eq!(revisions(&sync), [0, 0, 0, 0]);
        assert!(sync.notifier().messages.is_empty());
    }

    #[test]
    fn test_preset_switch_cancels_pending_quick_edit() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut params = sync.quick_params().clone();
        params.avatar_scale = "0.9".to_string();
        sync.quick_params_input(params, t0);
        assert!(sync.next_deadline().is_some());

        sync.select_preset("preset2");
        assert!(sync.next_deadline().is_none());
        assert!(!sync.poll(t0 + Duration::from_secs(1)));
        assert_eq!(sync.border_config().avatar_scale, 0.60);
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 0);
    }

    #[test]
    fn test_import_replaces_config_and_avatar_size() {
        let mut sync = editor();
        let t0 = Instant::now();
        let draft = r#"{"gifUrl":"new.gif","avatarScale":0.7,"topOffsetRatio":0.1,"leftOffsetRatio":-0.1,"avatarSize":"200px"}"#;

        let mut fields = sync.debug_form().clone();
        fields.config_json = draft.to_string();
        sync.debug_form_input(fields, t0);
        assert!(sync.import_config());

        assert_eq!(sync.border_config(), &BorderConfig::new("new.gif", 0.7, 0.1, -0.1));
        assert_eq!(sync.config_json(), draft);
        assert_eq!(sync.debug_form().config_json, draft);
        assert_eq!(sync.debug_form().border_gif_url, "new.gif");
        assert_eq!(sync.quick_params().avatar_scale, "0.7");
        assert_eq!(sync.signals().avatar_size, "200px");
        assert_eq!(sync.signals().avatar_url, "assets/images/avatar/avatar1.jpg");

        assert_eq!(revisions(&sync), [1, 1, 0, 1]);
        // the typed draft was flushed by the import, nothing is left to deliver
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 1);
        assert!(!sync.poll(t0 + Duration::from_secs(1)));
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 1);

        assert_eq!(sync.notifier().count(Severity::Success), 1);
        assert_eq!(sync.notifier().count(Severity::Error), 0);
    }

    #[test]
    fn test_malformed_import_changes_nothing() {
        let mut sync = editor();
        let t0 = Instant::now();
        let before = sync.border_config().clone();
        let quick_before = sync.quick_params().clone();

        let mut fields = sync.debug_form().clone();
        fields.config_json = "{gifUrl:}".to_string();
        sync.debug_form_input(fields, t0);

        assert!(!sync.import_config());
        assert_eq!(sync.border_config(), &before);
        assert_eq!(sync.quick_params(), &quick_before);
        assert_eq!(sync.revision(Presentation::QuickParams), 0);
        assert_eq!(sync.notifier().messages.len(), 1);
        assert_eq!(sync.notifier().count(Severity::Error), 1);

        // the draft itself settled without touching anything else
        assert!(!sync.poll(t0 + ms(FORM_DEBOUNCE_MS)));
        assert_eq!(sync.border_config(), &before);
        assert_eq!(revisions(&sync), [0, 0, 0, 0]);
        assert_eq!(sync.debug_form().config_json, "{gifUrl:}");
    }

    #[test]
    fn test_import_applies_pending_avatar_size_first() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut fields = sync.debug_form().clone();
        fields.avatar_size = "200px".to_string();
        sync.debug_form_input(fields, t0);
        assert!(sync.import_config());

        assert_eq!(sync.signals().avatar_size, "200px");
        assert_eq!(sync.debug_form().avatar_size, "200px");
        assert!(sync.next_deadline().is_none());
        assert!(!sync.poll(t0 + Duration::from_secs(1)));
        assert_eq!(sync.debug_form().avatar_size, sync.signals().avatar_size);
    }

    #[test]
    fn test_quick_edit_keeps_avatar_url_being_typed() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut params = sync.quick_params().clone();
        params.avatar_scale = "0.6".to_string();
        sync.quick_params_input(params, t0);

        let mut fields = sync.debug_form().clone();
        fields.avatar_url = "me.png".to_string();
        sync.debug_form_input(fields, t0 + ms(50));

        // quick params settle first; the debug field keeps the typed text
        assert!(sync.poll(t0 + ms(100)));
        assert_eq!(sync.border_config().avatar_scale, 0.6);
        assert_eq!(sync.debug_form().avatar_url, "me.png");
        assert_eq!(sync.debug_form().config_json, sync.config_json());

        assert!(sync.poll(t0 + ms(200)));
        assert_eq!(sync.signals().avatar_url, "me.png");
        assert_eq!(sync.debug_form().avatar_url, sync.signals().avatar_url);
        assert_eq!(sync.debug_form().config_json, sync.config_json());
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 1);
    }

    #[test]
    fn test_stale_draft_in_delivered_edit_does_not_regress_json() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut fields = sync.debug_form().clone();
        fields.avatar_size = "90px".to_string();
        sync.debug_form_input(fields, t0 + ms(50));

        let mut params = sync.quick_params().clone();
        params.top_offset_ratio = "0.3".to_string();
        sync.quick_params_input(params, t0);

        assert!(sync.poll(t0 + ms(100)));
        assert!(sync.poll(t0 + ms(200)));
        assert!(sync.config_json().contains("\"topOffsetRatio\": 0.3"));
        assert_eq!(sync.debug_form().config_json, sync.config_json());

        // importing the visible text keeps the newer ratio
        assert!(sync.import_config());
        assert_eq!(sync.border_config().top_offset_ratio, 0.3);
        assert_eq!(sync.signals().avatar_size, "90px");
    }

    #[test]
    fn test_edits_during_propagation_are_suppressed() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut params = sync.quick_params().clone();
        params.avatar_scale = "0.9".to_string();
        sync.quick_params_input(params, t0);
        let mut fields = sync.debug_form().clone();
        fields.avatar_url = "x.png".to_string();
        sync.debug_form_input(fields, t0);

        sync.phase = SyncPhase::Propagating;
        assert!(sync.poll(t0 + ms(FORM_DEBOUNCE_MS)));

        assert_eq!(sync.border_config().avatar_scale, 0.55);
        assert_eq!(sync.signals().avatar_url, "assets/images/avatar/avatar1.jpg");
        assert_eq!(sync.handler_runs(Presentation::QuickParams), 0);
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 0);
        assert_eq!(revisions(&sync), [0, 0, 0, 0]);
    }

    #[test]
    fn test_import_with_missing_field_reports_error() {
        let mut sync = editor();
        let mut fields = sync.debug_form().clone();
        fields.config_json = r#"{"gifUrl":"x.gif","avatarScale":0.5}"#.to_string();
        sync.debug_form_input(fields, Instant::now());

        assert!(!sync.import_config());
        assert_eq!(sync.border_config().gif_url, "assets/images/gif/gif1.gif");
        let (message, severity) = &sync.notifier().messages[0];
        assert_eq!(*severity, Severity::Error);
        assert!(message.contains("topOffsetRatio"));
    }

    #[test]
    fn test_notifications_follow_language() {
        let mut sync = editor();
        sync.set_language(Language::Zh);
        let mut fields = sync.debug_form().clone();
        fields.config_json = "{gifUrl:}".to_string();
        sync.debug_form_input(fields, Instant::now());

        sync.import_config();
        assert!(sync.notifier().messages[0].0.starts_with("导入失败"));
    }

    #[test]
    fn test_gif_url_edit_keeps_ratios_and_updates_json() {
        let mut sync = editor();
        let t0 = Instant::now();

        let mut fields = sync.debug_form().clone();
        fields.border_gif_url = "other.gif".to_string();
        sync.debug_form_input(fields, t0);
        assert!(sync.poll(t0 + ms(FORM_DEBOUNCE_MS)));

        assert_eq!(sync.border_config(), &BorderConfig::new("other.gif", 0.55, 0.37, 0.21));
        assert!(sync.config_json().contains("other.gif"));
        assert_eq!(sync.debug_form().config_json, sync.config_json());
        assert_eq!(sync.signals().border_gif_url, "other.gif");
        assert_eq!(revisions(&sync), [1, 1, 0, 1]);
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 1);

        assert!(!sync.poll(t0 + Duration::from_secs(1)));
        assert_eq!(sync.handler_runs(Presentation::DebugForm), 1);
    }

    #[test]
    fn test_avatar_field_edit_only_touches_signals() {
        let mut sync = editor();
        let t0 = Instant::now();
        let json_before = sync.config_json().to_string();

        let mut fields = sync.debug_form().clone();
        fields.avatar_url = "me.png".to_string();
        fields.avatar_size = "96px".to_string();
        sync.debug_form_input(fields, t0);
        assert!(sync.poll(t0 + ms(FORM_DEBOUNCE_MS)));

        assert_eq!(sync.signals().avatar_url, "me.png");
        assert_eq!(sync.signals().avatar_size, "96px");
        assert_eq!(sync.config_json(), json_before);
        assert_eq!(revisions(&sync), [0, 0, 0, 1]);
    }

    #[test]
    fn test_avatar_file_import_updates_avatar() {
        let dir = temp_dir("avatar");
        let path = dir.join("face.png");
        fs::write(&path, b"\x89PNG").unwrap();

        let mut sync = editor();
        let before = sync.border_config().clone();
        assert!(sync.select_file(UploadTarget::Avatar, path));
        wait_for_file(&mut sync);

        assert_eq!(sync.signals().avatar_url, "data:image/png;base64,iVBORw==");
        assert_eq!(sync.debug_form().avatar_url, "data:image/png;base64,iVBORw==");
        assert_eq!(sync.border_config(), &before);
        assert!(!sync.file_read_in_flight());
    }

    #[test]
    fn test_border_file_import_acts_like_gif_url_edit() {
        let dir = temp_dir("border");
        let path = dir.join("frame.gif");
        fs::write(&path, b"GIF89a").unwrap();

        let mut sync = editor();
        assert!(sync.select_file(UploadTarget::Border, path));
        wait_for_file(&mut sync);

        assert_eq!(sync.border_config().gif_url, "data:image/gif;base64,R0lGODlh");
        assert_eq!(sync.border_config().avatar_scale, 0.55);
        assert!(sync.config_json().contains("data:image/gif;base64,R0lGODlh"));
        assert_eq!(sync.revision(Presentation::QuickParams), 1);
    }

    #[test]
    fn test_oversized_avatar_file_is_rejected() {
        let dir = temp_dir("oversized");
        let path = dir.join("huge.jpg");
        File::create(&path).unwrap().set_len(8 * 1024 * 1024).unwrap();

        let mut sync = editor();
        let avatar_before = sync.signals().avatar_url.clone();

        assert!(!sync.select_file(UploadTarget::Avatar, path.clone()));
        assert!(!sync.file_read_in_flight());
        assert_eq!(sync.notifier().messages.len(), 1);
        assert_eq!(sync.notifier().messages[0].0, Message::FileTooLarge.text(Language::En));
        assert_eq!(sync.signals().avatar_url, avatar_before);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_non_image_file_is_rejected() {
        let dir = temp_dir("text");
        let path = dir.join("notes.txt");
        fs::write(&path, b"hello").unwrap();

        let mut sync = editor();
        assert!(!sync.select_file(UploadTarget::Border, path));
        assert_eq!(sync.notifier().messages[0].0, Message::InvalidImageType.text(Language::En));
    }

    #[test]
    fn test_copy_config() {
        let mut sync = editor();
        let mut copied = String::new();
        assert!(sync.copy_config(|text| {
            copied = text.to_string();
            Ok(())
        }));
        assert_eq!(copied, sync.config_json());
        assert_eq!(sync.notifier().count(Severity::Success), 1);

        assert!(!sync.copy_config(|_| Err(anyhow::anyhow!("clipboard unavailable"))));
        assert_eq!(sync.notifier().count(Severity::Error), 1);
    }

    #[test]
    fn test_copy_of_empty_text_is_silent() {
        let mut sync = editor();
        let mut fields = sync.debug_form().clone();
        fields.config_json = "   ".to_string();
        sync.debug_form_input(fields, Instant::now());

        assert!(!sync.copy_config(|_| Ok(())));
        assert!(sync.download_config(&std::env::temp_dir()).is_none());
        assert!(sync.notifier().messages.is_empty());
    }

    #[test]
    fn test_download_config_writes_file() {
        let dir = temp_dir("download");
        let mut sync = editor();

        let path = sync.download_config(&dir).unwrap();
        assert_eq!(path, dir.join(DOWNLOAD_FILENAME));
        assert_eq!(fs::read_to_string(&path).unwrap(), sync.config_json());
        assert_eq!(sync.notifier().count(Severity::Success), 1);
    }
}
