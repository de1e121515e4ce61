use std::path::PathBuf;

use clap::Parser;

use crate::backends::Format;
use crate::pipeline::extract::{SamplerOptions, DEFAULT_COLORS, DEFAULT_MAX_DIM};

/// Derive a five-role slide palette (primary, secondary, accent, dark, light)
/// from an image.
#[derive(Parser, Debug)]
#[command(name = "deckpal", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Palette name (defaults to image filename stem)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Number of dominant colors to sample
    #[arg(short = 'k', long = "colors", default_value_t = DEFAULT_COLORS)]
    pub colors: usize,

    /// Downscale images larger than this (pixels per side) before sampling
    #[arg(long, default_value_t = DEFAULT_MAX_DIM)]
    pub max_dim: u32,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Write palette to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Save palette to ~/.config/deckpal/palettes/
    #[arg(long, conflicts_with = "output")]
    pub install: bool,

    /// Print a colored terminal preview of the palette
    #[arg(long)]
    pub preview: bool,

    /// Launch the interactive palette editor
    #[arg(long)]
    pub tui: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    pub fn sampler_options(&self) -> SamplerOptions {
        SamplerOptions {
            colors: self.colors,
            max_dim: self.max_dim,
            ..SamplerOptions::default()
        }
    }

    /// Name to embed in exported palettes.
    pub fn palette_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            self.image
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "palette".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["deckpal", "slides/cover.jpg"]);
        assert_eq!(args.colors, 6);
        assert_eq!(args.format, Format::Text);
        assert_eq!(args.palette_name(), "cover");
        assert_eq!(args.sampler_options(), SamplerOptions::default());
    }

    #[test]
    fn explicit_options() {
        let args = Args::parse_from([
            "deckpal", "cover.png", "-k", "8", "--max-dim", "128", "-f", "css", "-n", "brand",
            "-vv",
        ]);
        assert_eq!(args.sampler_options().colors, 8);
        assert_eq!(args.sampler_options().max_dim, 128);
        assert_eq!(args.format, Format::Css);
        assert_eq!(args.palette_name(), "brand");
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn install_conflicts_with_output() {
        let result = Args::try_parse_from(["deckpal", "a.png", "--install", "-o", "x.txt"]);
        assert!(result.is_err());
    }
}
