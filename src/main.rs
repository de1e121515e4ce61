use std::io::Write;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::{self, Stylize};
use tracing::info;

use deckpal::cli::Args;
use deckpal::pipeline::extract_palette;
use deckpal::theme::Palette;
use deckpal::tui::{self, TuiApp};

fn main() -> Result<()> {
    let args = Args::parse();
    deckpal::logging::init(args.verbose);

    let options = args.sampler_options();
    let name = args.palette_name();

    if args.tui {
        let app = TuiApp::new(args.image.clone(), name, options, args.format);
        return tui::run(app);
    }

    let extraction = extract_palette(&args.image, &options)
        .with_context(|| format!("could not build a palette from {}", args.image.display()))?;
    let palette = extraction.palette;

    if args.preview {
        print_preview(&palette)?;
    }

    let backend = args.format.backend();
    if args.install {
        let path = backend.install(&palette, &name)?;
        info!(path = %path.display(), backend = backend.name(), "installed palette");
        eprintln!("installed {}", path.display());
    } else if let Some(path) = &args.output {
        backend.write_to(&palette, &name, path)?;
        info!(path = %path.display(), backend = backend.name(), "wrote palette");
    } else {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(backend.serialize(&palette, &name).as_bytes())
            .context("failed to write palette to stdout")?;
    }

    Ok(())
}

/// One truecolor swatch per role on stderr, so stdout stays machine-readable.
fn print_preview(palette: &Palette) -> Result<()> {
    let mut stderr = std::io::stderr().lock();
    for (role, color) in palette.iter() {
        let text = color.readable_text();
        let swatch = format!("  {:<10}", role.key())
            .with(style::Color::Rgb {
                r: text.r,
                g: text.g,
                b: text.b,
            })
            .on(style::Color::Rgb {
                r: color.r,
                g: color.g,
                b: color.b,
            });
        writeln!(stderr, "{swatch} {color}")?;
    }
    Ok(())
}
