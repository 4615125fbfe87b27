//! English/Chinese text for notifications and UI labels

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    fn pick(self, en: &'static str, zh: &'static str) -> &'static str {
        match self {
            Language::En => en,
            Language::Zh => zh,
        }
    }
}

/// User-facing notification text
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    ImportSucceeded,
    ImportFailed(String),
    InvalidImageType,
    FileTooLarge,
    FileReadFailed,
    ConfigCopied,
    CopyFailed,
    DownloadStarted(String),
    DownloadFailed,
}

impl Message {
    pub fn text(&self, lang: Language) -> String {
        match self {
            Message::ImportSucceeded => lang.pick("Config imported successfully!", "配置导入成功！").to_string(),
            Message::ImportFailed(reason) => match lang {
                Language::En => format!("Import failed: {reason}"),
                Language::Zh => format!("导入失败: {reason}"),
            },
            Message::InvalidImageType => lang.pick("Please select a valid image file", "请选择有效的图片文件").to_string(),
            Message::FileTooLarge => lang.pick("File size must be less than 5MB", "文件大小必须小于 5MB").to_string(),
            Message::FileReadFailed => lang.pick("Failed to read file", "读取文件失败").to_string(),
            Message::ConfigCopied => lang.pick("Config copied to clipboard!", "已复制到剪贴板！").to_string(),
            Message::CopyFailed => lang.pick("Failed to copy config", "复制失败").to_string(),
            Message::DownloadStarted(path) => match lang {
                Language::En => format!("Config saved to {path}"),
                Language::Zh => format!("配置已保存到 {path}"),
            },
            Message::DownloadFailed => lang.pick("Failed to save config", "保存配置失败").to_string(),
        }
    }
}

/// Static UI labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Title,
    Presets,
    Preview,
    QuickParams,
    AvatarScale,
    TopOffset,
    LeftOffset,
    Rotate,
    BorderRadius,
    DebugPanel,
    AvatarUrl,
    BorderGifUrl,
    AvatarSize,
    ConfigJson,
    ChooseFile,
    Import,
    Copy,
    Download,
    SwitchLanguage,
    AvatarAlt,
    OutsideRecommended,
}

impl Label {
    pub fn text(self, lang: Language) -> &'static str {
        match self {
            Label::Title => lang.pick("Border Avatar", "头像边框"),
            Label::Presets => lang.pick("Presets", "预设"),
            Label::Preview => lang.pick("Preview", "预览"),
            Label::QuickParams => lang.pick("Quick Parameters", "快速参数"),
            Label::AvatarScale => lang.pick("Avatar scale", "头像缩放"),
            Label::TopOffset => lang.pick("Top offset", "垂直偏移"),
            Label::LeftOffset => lang.pick("Left offset", "水平偏移"),
            Label::Rotate => lang.pick("Rotate", "旋转"),
            Label::BorderRadius => lang.pick("Border radius", "圆角"),
            Label::DebugPanel => lang.pick("Debug", "调试"),
            Label::AvatarUrl => lang.pick("Avatar URL", "头像地址"),
            Label::BorderGifUrl => lang.pick("Border image URL", "边框地址"),
            Label::AvatarSize => lang.pick("Display size", "显示尺寸"),
            Label::ConfigJson => lang.pick("Config JSON", "配置 JSON"),
            Label::ChooseFile => lang.pick("Choose file", "选择文件"),
            Label::Import => lang.pick("Import", "导入"),
            Label::Copy => lang.pick("Copy", "复制"),
            Label::Download => lang.pick("Download", "下载"),
            Label::SwitchLanguage => lang.pick("中文", "English"),
            Label::AvatarAlt => lang.pick("Avatar", "头像"),
            Label::OutsideRecommended => lang.pick(
                "Outside the recommended range (scale 0.3-0.9, offsets ±0.2)",
                "超出推荐范围（缩放 0.3-0.9，偏移 ±0.2）",
            ),
        }
    }
}

/// Display name for a preset's name key
pub fn preset_name(lang: Language, name_key: &str) -> String {
    let text = match name_key {
        "preset.preset1" => lang.pick("Classic frame", "经典边框"),
        "preset.preset2" => lang.pick("Wide frame", "宽边框"),
        "preset.plain" => lang.pick("No frame", "无边框"),
        _ => return name_key.to_string(),
    };
    text.to_string()
}
