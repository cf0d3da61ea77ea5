//! Logical font names mapped to font files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Directory the built-in font table resolves against by default.
pub const DEFAULT_FONT_DIR: &str = "assets";

/// Font families every registry starts with.
const BUILTIN_FONTS: &[(&str, &str)] = &[
    ("Inter", "Inter_24pt-Regular.ttf"),
    ("Roboto", "Roboto-Regular.ttf"),
    ("Source Serif 4", "SourceSerif4-Regular.ttf"),
    ("IBM Plex Mono", "IBMPlexMono-Regular.ttf"),
    ("Noto Sans", "NotoSans-Regular.ttf"),
];

/// A font resolved for one size, handed to the backend for text rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FontFace {
    pub name: String,
    pub path: PathBuf,
    pub size: u32,
}

/// Mapping from logical font name to font file path.
#[derive(Debug, Clone)]
pub struct FontRegistry {
    fonts: BTreeMap<String, PathBuf>,
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::with_builtin(DEFAULT_FONT_DIR)
    }
}

impl FontRegistry {
    /// Registry with no fonts at all.
    pub fn empty() -> Self {
        Self {
            fonts: BTreeMap::new(),
        }
    }

    /// Registry holding the built-in families, resolved under `dir`.
    pub fn with_builtin(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let fonts = BUILTIN_FONTS
            .iter()
            .map(|(name, file)| (name.to_string(), dir.join(file)))
            .collect();
        Self { fonts }
    }

    /// Add or replace a font. Registered names can be loaded with [`FontRegistry::load`].
    pub fn register_font(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let name = name.into();
        let path = path.into();
        log::debug!("Registered font '{}' -> {}", name, path.display());
        self.fonts.insert(name, path);
    }

    /// All registered names, sorted.
    pub fn font_names(&self) -> Vec<&str> {
        self.fonts.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fonts.contains_key(name)
    }

    pub fn path(&self, name: &str) -> Option<&Path> {
        self.fonts.get(name).map(PathBuf::as_path)
    }

    /// Resolve `name` at `size`. Unknown names yield `None`, not an error.
    pub fn load(&self, name: &str, size: u32) -> Option<FontFace> {
        self.fonts.get(name).map(|path| FontFace {
            name: name.to_string(),
            path: path.clone(),
            size,
        })
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}
