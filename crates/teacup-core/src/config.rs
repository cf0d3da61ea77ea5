//! Engine configuration, loaded from JSON.

use crate::error::{EngineError, EngineResult};
use crate::font::{DEFAULT_FONT_DIR, FontRegistry};
use crate::style::StyleOverrides;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Frame rate used when nothing else is configured.
pub const DEFAULT_TARGET_FPS: u32 = 60;

/// Settings the engine reads on init.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Frame rate `Engine::run_frame` paces to. `0` runs uncapped.
    pub target_fps: u32,
    /// Directory the built-in font table resolves against.
    pub font_dir: Option<PathBuf>,
    /// Extra fonts, by logical name.
    pub fonts: BTreeMap<String, PathBuf>,
    /// Overlay applied to every window's style on creation.
    pub window_style: StyleOverrides,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_fps: DEFAULT_TARGET_FPS,
            font_dir: None,
            fonts: BTreeMap::new(),
            window_style: StyleOverrides::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> EngineResult<Self> {
        serde_json::from_str(json).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> EngineResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> EngineResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| EngineError::Config(e.to_string()))
    }

    /// Built-in fonts under `font_dir`, then the extra `fonts` on top.
    pub fn font_registry(&self) -> FontRegistry {
        let dir = self
            .font_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_FONT_DIR));
        let mut registry = FontRegistry::with_builtin(dir);
        for (name, path) in &self.fonts {
            registry.register_font(name.clone(), path.clone());
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json_str(
            r#"{"target_fps": 30, "window_style": {"background-color": [30, 30, 30, 255]}}"#,
        )
        .unwrap();
        assert_eq!(config.target_fps, 30);
        assert_eq!(
            config.window_style.background_color,
            Some(Color::rgb(30, 30, 30))
        );
        assert!(config.fonts.is_empty());
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let result = EngineConfig::from_json_str(r#"{"target_fps": "fast"}"#);
        assert!(matches!(result, Err(EngineError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"font_dir": "/fonts", "fonts": {{"Mono": "/tmp/mono.ttf"}}}}"#
        )
        .unwrap();

        let config = EngineConfig::load(file.path()).unwrap();
        let fonts = config.font_registry();

        assert_eq!(fonts.path("Mono"), Some(Path::new("/tmp/mono.ttf")));
        assert_eq!(
            fonts.path("Inter"),
            Some(Path::new("/fonts/Inter_24pt-Regular.ttf"))
        );
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(EngineError::Io(_))));
    }

    #[test]
    fn test_round_trip_through_json() {
        let mut config = EngineConfig::default();
        config.target_fps = 0;
        config.fonts.insert("Serif".into(), PathBuf::from("serif.ttf"));

        let json = config.to_json_string().unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }
}
