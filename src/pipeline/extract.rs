use std::path::Path;

use image::imageops::FilterType;
use kmeans_colors::get_kmeans_hamerly;
use palette::{IntoColor, Lab, Srgb};
use tracing::{debug, instrument};

use crate::color::Color;
use crate::error::{PaletteError, Result};

/// A color sampled from the image with its cluster weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtractedColor {
    pub color: Color,
    /// Fraction of sampled pixels assigned to this color, in (0, 1].
    pub weight: f32,
}

/// Knobs for the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerOptions {
    /// Number of K-means clusters to request.
    pub colors: usize,
    /// Images larger than this on either side are downscaled first.
    pub max_dim: u32,
    pub seed: u64,
}

pub const DEFAULT_COLORS: usize = 6;
pub const DEFAULT_MAX_DIM: u32 = 256;

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            colors: DEFAULT_COLORS,
            max_dim: DEFAULT_MAX_DIM,
            seed: 42,
        }
    }
}

const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const DEDUP_THRESHOLD: f32 = 25.0; // ΔE² < 25 means ΔE < 5

/// Load an image, resize to fit within `max_dim` (preserving aspect ratio),
/// and convert all pixels to CIELAB space.
#[instrument(level = "debug", skip(path), fields(path = %path.display()))]
pub fn load_and_prepare(path: &Path, max_dim: u32) -> Result<Vec<Lab>> {
    let img = image::open(path).map_err(|e| PaletteError::ImageLoad {
        path: path.to_path_buf(),
        reason: if !path.exists() {
            "file not found".to_string()
        } else {
            format!(
                "unsupported or corrupt image ({e}). Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF"
            )
        },
    })?;
    debug!(width = img.width(), height = img.height(), "decoded image");

    let img = if img.width() > max_dim || img.height() > max_dim {
        img.resize(max_dim, max_dim, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb_img = img.to_rgb8();

    let pixels: Vec<Lab> = rgb_img
        .pixels()
        .map(|p| {
            let srgb: Srgb<f32> = Srgb::new(p[0], p[1], p[2]).into_format();
            srgb.into_color()
        })
        .collect();

    Ok(pixels)
}

/// Run K-means on LAB pixels to find the dominant colors.
///
/// Returns deduplicated colors in dominance order (weight descending).
/// Uses Hamerly's algorithm with K-means++ initialization and a fixed seed,
/// so the same pixels always give the same samples.
#[instrument(level = "debug", skip(pixels), fields(pixels = pixels.len()))]
pub fn sample_colors(pixels: &[Lab], k: usize, seed: u64) -> Vec<ExtractedColor> {
    if pixels.is_empty() || k == 0 {
        return Vec::new();
    }
    let result = get_kmeans_hamerly(k, MAX_ITER, CONVERGE, false, pixels, seed);

    let total = pixels.len() as f32;

    // Count pixels per centroid to compute weights
    let mut counts = vec![0u32; result.centroids.len()];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let mut colors: Vec<ExtractedColor> = result
        .centroids
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, lab)| ExtractedColor {
            color: Color::from_lab(*lab),
            weight: counts[i] as f32 / total,
        })
        .collect();

    deduplicate(&mut colors);

    colors.sort_by(|a, b| b.weight.total_cmp(&a.weight));
    debug!(found = colors.len(), "sampled dominant colors");

    colors
}

/// Merge colors that are too similar (ΔE < 5 in LAB space).
/// Keeps the first color and accumulates the weight.
fn deduplicate(colors: &mut Vec<ExtractedColor>) {
    let mut i = 0;
    while i < colors.len() {
        let lab_i = colors[i].color.to_lab();
        let mut j = i + 1;
        while j < colors.len() {
            let lab_j = colors[j].color.to_lab();
            let delta_e_sq = (lab_i.l - lab_j.l).powi(2)
                + (lab_i.a - lab_j.a).powi(2)
                + (lab_i.b - lab_j.b).powi(2);
            if delta_e_sq < DEDUP_THRESHOLD {
                colors[i].weight += colors[j].weight;
                colors.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
}
