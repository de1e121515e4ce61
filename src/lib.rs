//! Slide-deck palette engine: sample dominant colors from an image and derive
//! the five semantic roles every slide block is themed with.

pub mod backends;
pub mod cli;
pub mod color;
pub mod editor;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod theme;
pub mod tui;

pub use color::Color;
pub use error::PaletteError;
pub use theme::{Palette, Role};
