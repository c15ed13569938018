use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::features::stamp::StampSpec;

/// Font shipped with the app assets; resolved relative to the host's working directory.
pub const DEFAULT_FONT_PATH: &str = "OpenSans-Regular.ttf";

/// Runtime configuration, delivered by the host in the `init` command.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SignerConfig {
    pub font_path: Option<String>,
    /// Directory for preview files. Falls back to the system temp dir.
    pub preview_dir: Option<String>,
    pub stamp: StampSpec,
    pub log_level: Option<String>,
}

impl SignerConfig {
    pub const fn new() -> Self {
        Self {
            font_path: None,
            preview_dir: None,
            stamp: StampSpec::new(),
            log_level: None,
        }
    }

    pub fn font_path(&self) -> &str {
        self.font_path
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or(DEFAULT_FONT_PATH)
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
            .as_deref()
            .and_then(|lvl| lvl.trim().parse::<LevelFilter>().ok())
            .unwrap_or(LevelFilter::Info)
    }
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: SignerConfig =
            serde_json::from_str(r#"{"font_path":"/assets/fonts/Sans.ttf","stamp":{"font_size":18}}"#)
                .unwrap();
        assert_eq!(cfg.font_path(), "/assets/fonts/Sans.ttf");
        assert_eq!(cfg.stamp.font_size, 18.0);
        assert_eq!(cfg.stamp.text, "Signed PDF");
        assert_eq!(cfg.stamp.offset_right, 140.0);
        assert_eq!(cfg.log_level(), LevelFilter::Info);
    }

    #[test]
    fn blank_font_path_uses_default() {
        let cfg = SignerConfig {
            font_path: Some("  ".into()),
            log_level: Some("debug".into()),
            ..SignerConfig::new()
        };
        assert_eq!(cfg.font_path(), DEFAULT_FONT_PATH);
        assert_eq!(cfg.log_level(), LevelFilter::Debug);
    }
}
