use std::path::{Path, PathBuf};
use std::process::Command;

use deckpal::backends::text::TextBackend;
use deckpal::backends::ExportBackend;
use deckpal::color::Color;
use deckpal::editor::{Outcome, PaletteEditor};
use deckpal::error::PaletteError;
use deckpal::pipeline::derive::derive;
use deckpal::pipeline::extract::{load_and_prepare, sample_colors, SamplerOptions};
use deckpal::pipeline::extract_palette;
use deckpal::theme::Palette;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn create_slide_photo(path: &Path) {
    // Navy background, a red title bar, an off-white text panel.
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        if y < 12 {
            image::Rgb([210, 40, 40])
        } else if (16..48).contains(&x) && (20..56).contains(&y) {
            image::Rgb([240, 236, 228])
        } else {
            image::Rgb([20, 30, 70])
        }
    });
    img.save(path).unwrap();
}

fn create_colorful(path: &Path) {
    let img = image::RgbImage::from_fn(64, 64, |x, y| {
        let region = (x / 16) + (y / 16) * 4;
        match region % 6 {
            0 => image::Rgb([220, 50, 50]),
            1 => image::Rgb([50, 200, 50]),
            2 => image::Rgb([50, 50, 220]),
            3 => image::Rgb([220, 220, 50]),
            4 => image::Rgb([20, 20, 20]),
            _ => image::Rgb([240, 240, 240]),
        }
    });
    img.save(path).unwrap();
}

fn create_solid(path: &Path) {
    let img = image::RgbImage::from_fn(32, 32, |_, _| image::Rgb([90, 120, 150]));
    img.save(path).unwrap();
}

struct Fixtures {
    dir: tempfile::TempDir,
}

impl Fixtures {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        create_slide_photo(&dir.path().join("slide.png"));
        create_colorful(&dir.path().join("colorful.png"));
        create_solid(&dir.path().join("solid.png"));
        std::fs::write(dir.path().join("not_an_image.txt"), "this is not an image").unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }
}

fn assert_valid_hex(hex: &str) {
    assert_eq!(hex.len(), 7, "hex should be 7 chars: '{hex}'");
    assert!(hex.starts_with('#'));
    assert!(
        hex[1..]
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)),
        "invalid hex: '{hex}'"
    );
}

// ---------------------------------------------------------------------------
// Pipeline tests
// ---------------------------------------------------------------------------

#[test]
fn slide_photo_roles_follow_image() {
    let fixtures = Fixtures::new();
    let extraction = extract_palette(&fixtures.path("slide.png"), &SamplerOptions::default()).unwrap();
    let palette = extraction.palette;

    assert!(extraction.samples.len() >= 3);
    // Navy covers the most area.
    assert!(palette.primary.b > palette.primary.r, "primary {}", palette.primary);
    // Red title bar is the most saturated region.
    assert!(palette.accent.r > 150 && palette.accent.g < 100, "accent {}", palette.accent);
    // Off-white panel is the lightest sample.
    assert!(palette.light.luminance() > 0.85, "light {}", palette.light);
    assert!(palette.dark.luminance() < palette.primary.luminance());
}

#[test]
fn colorful_image_has_every_role() {
    let fixtures = Fixtures::new();
    let palette = extract_palette(&fixtures.path("colorful.png"), &SamplerOptions::default())
        .unwrap()
        .palette;
    for (_, color) in palette.iter() {
        assert_valid_hex(&color.to_hex());
    }
}

#[test]
fn solid_image_is_insufficient() {
    let fixtures = Fixtures::new();
    let err = extract_palette(&fixtures.path("solid.png"), &SamplerOptions::default()).unwrap_err();
    assert!(
        matches!(err, PaletteError::InsufficientSamples { .. }),
        "expected InsufficientSamples, got {err:?}"
    );
}

#[test]
fn missing_image_is_load_failure() {
    let err = extract_palette(Path::new("/nonexistent/cover.png"), &SamplerOptions::default())
        .unwrap_err();
    assert!(matches!(err, PaletteError::ImageLoad { .. }));
}

#[test]
fn extraction_is_deterministic() {
    let fixtures = Fixtures::new();
    let path = fixtures.path("colorful.png");
    let first = extract_palette(&path, &SamplerOptions::default()).unwrap();
    let second = extract_palette(&path, &SamplerOptions::default()).unwrap();
    assert_eq!(first.palette, second.palette);
}

#[test]
fn sampler_and_deriver_compose() {
    let fixtures = Fixtures::new();
    let pixels = load_and_prepare(&fixtures.path("slide.png"), 256).unwrap();
    let samples = sample_colors(&pixels, 6, 42);
    let colors: Vec<Color> = samples.iter().map(|s| s.color).collect();
    let palette = derive(&colors).unwrap();
    assert_eq!(palette.primary, colors[0]);
    assert_eq!(palette.secondary, colors[1]);
}

#[test]
fn editor_keeps_palette_when_extraction_fails() {
    let fixtures = Fixtures::new();
    let mut editor = PaletteEditor::new(Palette::fallback());

    let ok = editor.begin_extraction();
    let result = extract_palette(&fixtures.path("colorful.png"), &SamplerOptions::default());
    assert_eq!(editor.finish_extraction(ok, result), Outcome::Applied);
    let extracted = *editor.current();

    let bad = editor.begin_extraction();
    let result = extract_palette(&fixtures.path("not_an_image.txt"), &SamplerOptions::default());
    assert_eq!(editor.finish_extraction(bad, result), Outcome::Rejected);
    assert_eq!(*editor.current(), extracted);
}

#[test]
fn saved_palette_loads_back() {
    let fixtures = Fixtures::new();
    let palette = extract_palette(&fixtures.path("slide.png"), &SamplerOptions::default())
        .unwrap()
        .palette;
    let out = fixtures.path("slide.palette");
    TextBackend.write_to(&palette, "slide", &out).unwrap();

    let text = std::fs::read_to_string(&out).unwrap();
    assert_eq!(Palette::parse(&text).unwrap(), palette);
}

// ---------------------------------------------------------------------------
// CLI integration tests (run the actual binary)
// ---------------------------------------------------------------------------

fn cargo_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_deckpal"))
}

#[test]
fn cli_stdout_produces_text_palette() {
    let fixtures = Fixtures::new();
    let output = Command::new(cargo_bin())
        .arg(fixtures.path("slide.png"))
        .output()
        .expect("failed to run binary");

    assert!(output.status.success(), "binary exited with error");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("# slide\n"));
    let palette = Palette::parse(&stdout).unwrap();
    assert_valid_hex(&palette.accent.to_hex());
}

#[test]
fn cli_css_format() {
    let fixtures = Fixtures::new();
    let output = Command::new(cargo_bin())
        .args([
            fixtures.path("colorful.png").to_str().unwrap(),
            "--format",
            "css",
            "--name",
            "Pitch Deck",
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":root {"));
    assert!(stdout.contains("--pitch-deck-accent: #"));
}

#[test]
fn cli_output_flag_writes_file() {
    let fixtures = Fixtures::new();
    let out_path = fixtures.path("out.json");

    let output = Command::new(cargo_bin())
        .args([
            fixtures.path("slide.png").to_str().unwrap(),
            "-f",
            "json",
            "--output",
            out_path.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let content = std::fs::read_to_string(&out_path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["name"], "slide");
    assert_valid_hex(value["palette"]["dark"].as_str().unwrap());
}

#[test]
fn cli_preview_goes_to_stderr() {
    let fixtures = Fixtures::new();
    let output = Command::new(cargo_bin())
        .args([fixtures.path("slide.png").to_str().unwrap(), "--preview"])
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("primary"));
    assert!(Palette::parse(&String::from_utf8_lossy(&output.stdout)).is_ok());
}

#[test]
fn cli_help_output() {
    let output = Command::new(cargo_bin())
        .arg("--help")
        .output()
        .expect("failed to run binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("deckpal"));
    assert!(stdout.contains("--colors"));
    assert!(stdout.contains("--format"));
    assert!(stdout.contains("--install"));
    assert!(stdout.contains("--tui"));
}

#[test]
fn cli_file_not_found_error() {
    let output = Command::new(cargo_bin())
        .arg("/nonexistent/image.png")
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("file not found"),
        "expected file-not-found error, got: {stderr}"
    );
}

#[test]
fn cli_unsupported_format_error() {
    let fixtures = Fixtures::new();
    let output = Command::new(cargo_bin())
        .arg(fixtures.path("not_an_image.txt"))
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unsupported"),
        "expected unsupported format error, got: {stderr}"
    );
}

#[test]
fn cli_insufficient_samples_error() {
    let fixtures = Fixtures::new();
    let output = Command::new(cargo_bin())
        .arg(fixtures.path("solid.png"))
        .output()
        .expect("failed to run binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("insufficient samples"), "got: {stderr}");
}
