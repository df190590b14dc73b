use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{BoardError, Result};
use crate::export::{ExportFormat, DEFAULT_SHEET_NAME};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_export_dir")]
    pub export_dir: String,
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_format")]
    pub default_format: String,
}

fn default_export_dir() -> String {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("claimsboard")
        .join("exports")
        .to_string_lossy()
        .to_string()
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_page_size() -> usize {
    25
}

fn default_format() -> String {
    "csv".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            export_dir: default_export_dir(),
            sheet_name: default_sheet_name(),
            page_size: default_page_size(),
            default_format: default_format(),
        }
    }
}

impl Settings {
    /// Configured default format; an unrecognised value falls back to CSV.
    pub fn format(&self) -> ExportFormat {
        self.default_format.parse().unwrap_or(ExportFormat::Csv)
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("claimsboard")
}

pub fn settings_path() -> PathBuf {
    config_dir().join("settings.json")
}

pub fn load_settings() -> Settings {
    let path = settings_path();
    if path.exists() {
        let content = std::fs::read_to_string(&path).unwrap_or_default();
        parse_settings(&content)
    } else {
        Settings::default()
    }
}

/// Parse settings JSON, falling back to defaults when unreadable.
pub fn parse_settings(content: &str) -> Settings {
    match serde_json::from_str(content) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("ignoring unreadable settings: {e}");
            Settings::default()
        }
    }
}

pub fn save_settings(settings: &Settings) -> Result<()> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)?;
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| BoardError::Settings(e.to_string()))?;
    std::fs::write(settings_path(), format!("{json}\n"))?;
    Ok(())
}

pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches('/'));
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        let settings = Settings {
            export_dir: "/tmp/exports".to_string(),
            sheet_name: "Claims".to_string(),
            page_size: 50,
            default_format: "xlsx".to_string(),
        };
        let json = serde_json::to_string_pretty(&settings).unwrap();
        std::fs::write(&path, &json).unwrap();
        let loaded = parse_settings(&std::fs::read_to_string(&path).unwrap());
        assert_eq!(loaded.export_dir, "/tmp/exports");
        assert_eq!(loaded.sheet_name, "Claims");
        assert_eq!(loaded.page_size, 50);
        assert_eq!(loaded.format(), ExportFormat::Xlsx);
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.sheet_name, "Report");
        assert_eq!(s.page_size, 25);
        assert_eq!(s.format(), ExportFormat::Csv);
        assert!(s.export_dir.ends_with("exports"));
    }

    #[test]
    fn test_partial_file_merges_with_defaults() {
        let s = parse_settings(r#"{"page_size": 10}"#);
        assert_eq!(s.page_size, 10);
        assert_eq!(s.sheet_name, "Report");
    }

    #[test]
    fn test_garbage_falls_back_to_defaults() {
        let s = parse_settings("not json");
        assert_eq!(s.page_size, 25);
    }

    #[test]
    fn test_unknown_format_falls_back_to_csv() {
        let s = parse_settings(r#"{"default_format": "pdf"}"#);
        assert_eq!(s.format(), ExportFormat::Csv);
    }

    #[test]
    fn test_expand_path() {
        assert_eq!(expand_path("/tmp/x"), PathBuf::from("/tmp/x"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~/exports"), home.join("exports"));
        }
    }
}
