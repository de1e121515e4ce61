use crate::theme::Palette;

use super::ExportBackend;

/// Plain key/value text, the persistence format read back by [`Palette::parse`].
pub struct TextBackend;

impl ExportBackend for TextBackend {
    fn name(&self) -> &str {
        "Text"
    }

    fn extension(&self) -> &str {
        "palette"
    }

    fn serialize(&self, palette: &Palette, palette_name: &str) -> String {
        format!("# {palette_name}\n{}", palette.serialize())
    }
}
