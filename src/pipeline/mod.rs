//! Image to palette: decode and sample dominant colors, then derive roles.

pub mod derive;
pub mod extract;

use std::path::Path;

use tracing::{info, instrument};

use crate::error::Result;
use crate::theme::Palette;
use extract::{ExtractedColor, SamplerOptions};

/// The result of one successful extraction.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Sampled colors in dominance order.
    pub samples: Vec<ExtractedColor>,
    pub palette: Palette,
}

/// Run the whole pipeline on one image. Either failure is terminal: no
/// partial palette comes back.
#[instrument(skip(path, options), fields(path = %path.display(), k = options.colors))]
pub fn extract_palette(path: &Path, options: &SamplerOptions) -> Result<Extraction> {
    let pixels = extract::load_and_prepare(path, options.max_dim)?;
    let samples = extract::sample_colors(&pixels, options.colors, options.seed);
    let palette = derive::derive_from_extracted(&samples)?;
    info!(samples = samples.len(), "extracted palette");
    Ok(Extraction { samples, palette })
}
