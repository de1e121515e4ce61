use tracing::{debug, warn};

use crate::color::Color;
use crate::error::{PaletteError, Result};
use crate::pipeline::extract::ExtractedColor;
use crate::theme::Palette;

/// Minimum number of samples [`derive`] accepts.
pub const MIN_SAMPLES: usize = 3;

/// Brightness shift applied to `primary` when no second sample exists.
const SECONDARY_LIFT: f32 = 20.0;
/// Brightness shift applied to the darkest sample to get `dark`.
const DARK_DROP: f32 = -30.0;

/// Turn dominance-ordered samples into a five-role palette.
///
/// `primary` and `secondary` follow dominance rank, `accent` is the most
/// saturated sample, `dark` is the lowest-luminance sample pushed 30% darker
/// and `light` is the highest-luminance sample as-is.
pub fn derive(samples: &[Color]) -> Result<Palette> {
    if samples.len() < MIN_SAMPLES {
        return Err(PaletteError::InsufficientSamples {
            found: samples.len(),
        });
    }

    // Stable sort: equal-luminance samples keep dominance order.
    let mut by_luminance = samples.to_vec();
    by_luminance.sort_by(|a, b| a.luminance().total_cmp(&b.luminance()));

    let primary = samples[0];
    let secondary = samples
        .get(1)
        .copied()
        .unwrap_or_else(|| primary.adjust_brightness(SECONDARY_LIFT));
    let accent = most_vibrant(samples).unwrap_or(primary);
    let dark = by_luminance
        .first()
        .copied()
        .unwrap_or(primary)
        .adjust_brightness(DARK_DROP);
    let light = by_luminance.last().copied().unwrap_or(primary);

    let palette = Palette {
        primary,
        secondary,
        accent,
        dark,
        light,
    };
    debug!(
        primary = %palette.primary,
        secondary = %palette.secondary,
        accent = %palette.accent,
        dark = %palette.dark,
        light = %palette.light,
        "derived palette"
    );
    Ok(palette)
}

/// The sample with the strictly highest saturation. On ties the earlier
/// sample wins, so scan order must stay the dominance order.
pub fn most_vibrant(samples: &[Color]) -> Option<Color> {
    let mut best: Option<(Color, f32)> = None;
    for &color in samples {
        let saturation = color.saturation();
        match best {
            Some((_, top)) if saturation <= top => {}
            _ => best = Some((color, saturation)),
        }
    }
    best.map(|(color, _)| color)
}

/// Derive from sampler output, checking its dominance ordering first.
///
/// Samples whose weights are not non-increasing are logged and stably
/// re-sorted by weight before derivation.
pub fn derive_from_extracted(samples: &[ExtractedColor]) -> Result<Palette> {
    let ordered = samples.windows(2).all(|w| w[0].weight >= w[1].weight);
    let colors: Vec<Color> = if ordered {
        samples.iter().map(|s| s.color).collect()
    } else {
        warn!(
            count = samples.len(),
            "sampler output not in dominance order, re-sorting by weight"
        );
        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        sorted.iter().map(|s| s.color).collect()
    };
    derive(&colors)
}
