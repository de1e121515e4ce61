use serde::Serialize;

use crate::theme::Palette;

use super::ExportBackend;

/// Pretty-printed JSON `{ "name": …, "palette": { "primary": "#…", … } }`.
pub struct JsonBackend;

#[derive(Serialize)]
struct Document<'a> {
    name: &'a str,
    palette: &'a Palette,
}

impl ExportBackend for JsonBackend {
    fn name(&self) -> &str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn serialize(&self, palette: &Palette, palette_name: &str) -> String {
        let doc = Document {
            name: palette_name,
            palette,
        };
        // Only strings inside; serialization cannot fail.
        let mut out = serde_json::to_string_pretty(&doc).unwrap_or_default();
        out.push('\n');
        out
    }
}
