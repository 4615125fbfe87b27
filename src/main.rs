#![forbid(unsafe_code)]

mod gui;

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level as TraceLevel, info};
use tracing_subscriber::FmtSubscriber;

use border_avatar::avatar::BorderAvatar;
use border_avatar::editor::{ConfigSync, json, presets};
use border_avatar::i18n::Language;
use border_avatar::notify::LogNotifier;
use border_avatar::settings::Settings;
use border_avatar::types::BorderConfig;

#[derive(Parser, Debug)]
#[command(name = "border-avatar", version, about = "Avatar frame editor and preview")]
struct Cli {
    /// Log level (trace, debug, info, warn, error); overrides LOG_LEVEL
    #[arg(long)]
    log_level: Option<String>,

    /// Interface language for this session
    #[arg(long, value_enum)]
    lang: Option<Language>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print avatar geometry for a container width as JSON
    Compute {
        /// Container width in pixels
        width: i32,

        /// Preset key to take the border config from
        #[arg(long, conflicts_with = "config")]
        preset: Option<String>,

        /// Config JSON file to take the border config from
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the built-in preset table as JSON
    Presets,
    /// Check a config JSON file and print it normalised
    Validate {
        file: PathBuf,
    },
}

fn parse_level(level: &str) -> TraceLevel {
    match level.to_lowercase().as_str() {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    }
}

fn load_config_file(path: &Path) -> Result<json::ConfigDocument> {
    let text = fs::read_to_string(path).with_context(|| format!("Failed to read config {:?}", path))?;
    json::parse(&text).with_context(|| format!("Invalid config in {:?}", path))
}

fn cmd_compute(width: i32, preset: Option<String>, config: Option<PathBuf>) -> Result<()> {
    if width <= 0 {
        bail!("Container width must be positive, got {width}");
    }

    let border = match (preset, config) {
        (_, Some(path)) => load_config_file(&path)?.border,
        (key, None) => {
            let key = key.unwrap_or_else(|| presets::DEFAULT_PRESET.to_string());
            let table = presets::builtin_presets();
            let entry = presets::find(&table, &key).with_context(|| format!("Unknown preset '{key}'"))?;
            entry.border_config.clone().unwrap_or_else(BorderConfig::placeholder)
        }
    };

    let mut avatar = BorderAvatar::new().with_config(border);
    avatar.mount(width);
    let dims = avatar
        .dimensions()
        .context("Avatar could not be laid out at this width")?;

    println!("{}", serde_json::to_string_pretty(&dims)?);
    Ok(())
}

fn cmd_presets() -> Result<()> {
    let table = presets::builtin_presets();
    println!("{}", serde_json::to_string_pretty(&table).context("Failed to serialize presets")?);
    Ok(())
}

/// Run the file through the editor's import, reporting to the log
fn cmd_validate(file: &Path, lang: Language) -> Result<String> {
    let text = fs::read_to_string(file).with_context(|| format!("Failed to read config {:?}", file))?;

    let mut editor = ConfigSync::with_builtin_presets(LogNotifier);
    editor.set_language(lang);
    let mut fields = editor.debug_form().clone();
    fields.config_json = text;
    editor.debug_form_input(fields, Instant::now());
    if !editor.import_config() {
        bail!("Invalid config in {:?}", file);
    }

    info!(path = %file.display(), gif_url = %editor.border_config().gif_url, "Config is valid");
    Ok(json::serialize(editor.border_config()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Parse log level from the flag or the environment
    let level = cli
        .log_level
        .clone()
        .or_else(|| std::env::var("LOG_LEVEL").ok())
        .unwrap_or_else(|| "info".to_string());

    let subscriber = FmtSubscriber::builder()
        .with_max_level(parse_level(&level))
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install log subscriber")?;

    match cli.command {
        Some(Command::Compute { width, preset, config }) => cmd_compute(width, preset, config),
        Some(Command::Presets) => cmd_presets(),
        Some(Command::Validate { file }) => {
            let normalised = cmd_validate(&file, cli.lang.unwrap_or_default())?;
            println!("{normalised}");
            Ok(())
        }
        None => {
            let mut settings = Settings::load();
            if let Some(lang) = cli.lang {
                settings.lang = lang;
            }
            info!(lang = settings.lang.code(), "Starting border-avatar");
            gui::run_gui(settings)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), TraceLevel::DEBUG);
        assert_eq!(parse_level("warn"), TraceLevel::WARN);
        assert_eq!(parse_level("nonsense"), TraceLevel::INFO);
    }

    #[test]
    fn test_cli_parses_compute() {
        let cli = Cli::try_parse_from(["border-avatar", "compute", "150", "--preset", "preset2"]).unwrap();
        match cli.command {
            Some(Command::Compute { width, preset, config }) => {
                assert_eq!(width, 150);
                assert_eq!(preset.as_deref(), Some("preset2"));
                assert!(config.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_without_subcommand_launches_gui() {
        let cli = Cli::try_parse_from(["border-avatar", "--lang", "zh"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.lang, Some(Language::Zh));
    }

    #[test]
    fn test_validate_normalises_and_rejects() {
        let dir = std::env::temp_dir().join(format!("border-avatar-validate-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();

        let good = dir.join("good.json");
        fs::write(&good, r#"{"gifUrl":"a.gif","avatarScale":0.5,"topOffsetRatio":0.25,"leftOffsetRatio":0.25}"#).unwrap();
        let normalised = cmd_validate(&good, Language::En).unwrap();
        assert!(normalised.starts_with("{\n  \"gifUrl\": \"a.gif\""));

        let bad = dir.join("bad.json");
        fs::write(&bad, "{gifUrl:}").unwrap();
        assert!(cmd_validate(&bad, Language::Zh).is_err());
        assert!(cmd_validate(&dir.join("missing.json"), Language::En).is_err());
    }

    #[test]
    fn test_compute_rejects_unknown_preset() {
        assert!(cmd_compute(150, Some("missing".to_string()), None).is_err());
        assert!(cmd_compute(0, None, None).is_err());
    }
}
