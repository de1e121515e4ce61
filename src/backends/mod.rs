//! Export formats for a finished palette.

pub mod css;
pub mod json;
pub mod text;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::theme::Palette;

/// A target format the presentation layer (or the user) can consume.
pub trait ExportBackend {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    /// File extension used by [`ExportBackend::install`].
    fn extension(&self) -> &str;

    /// Render the palette in this backend's format.
    fn serialize(&self, palette: &Palette, palette_name: &str) -> String;

    /// Write the palette to an arbitrary path.
    fn write_to(&self, palette: &Palette, palette_name: &str, path: &Path) -> Result<()> {
        let content = self.serialize(palette, palette_name);
        std::fs::write(path, content)
            .with_context(|| format!("failed to write palette to {}", path.display()))?;
        Ok(())
    }

    /// Save the palette under the user's config directory and return the path.
    fn install(&self, palette: &Palette, palette_name: &str) -> Result<PathBuf> {
        self.install_in(palette, palette_name, &palettes_dir())
    }

    /// Save the palette into `dir` as `<slug>.<extension>`.
    ///
    /// The file stem is reduced to `[a-z0-9-]`, so a name can never leave `dir`.
    fn install_in(&self, palette: &Palette, palette_name: &str, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create palettes directory: {}", dir.display()))?;

        let stem = match slug(palette_name) {
            s if s.is_empty() => "palette".to_string(),
            s => s,
        };
        let path = dir.join(format!("{}.{}", stem, self.extension()));
        self.write_to(palette, palette_name, &path)?;
        Ok(path)
    }
}

/// Resolve `$XDG_CONFIG_HOME/deckpal/palettes`, falling back to `~/.config`.
pub fn palettes_dir() -> PathBuf {
    let config_home = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "~".to_string());
            PathBuf::from(home).join(".config")
        });
    palettes_dir_in(&config_home)
}

pub fn palettes_dir_in(config_home: &Path) -> PathBuf {
    config_home.join("deckpal").join("palettes")
}

/// Lowercase, with anything outside `[a-z0-9-]` replaced by `-` and
/// leading/trailing dashes removed. May be empty.
pub(crate) fn slug(name: &str) -> String {
    let mapped: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    mapped.trim_matches('-').to_string()
}

/// Output formats selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// `role = #rrggbb` lines
    #[default]
    Text,
    /// CSS custom properties
    Css,
    /// JSON object
    Json,
}

impl Format {
    pub fn backend(self) -> Box<dyn ExportBackend> {
        match self {
            Format::Text => Box::new(text::TextBackend),
            Format::Css => Box::new(css::CssBackend),
            Format::Json => Box::new(json::JsonBackend),
        }
    }
}
