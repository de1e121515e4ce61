use crate::theme::Palette;

use super::{slug, ExportBackend};

/// CSS custom properties on `:root`, one per role plus a readable text color
/// for each role used as a background.
pub struct CssBackend;

impl ExportBackend for CssBackend {
    fn name(&self) -> &str {
        "CSS"
    }

    fn extension(&self) -> &str {
        "css"
    }

    fn serialize(&self, palette: &Palette, palette_name: &str) -> String {
        let prefix = css_ident(palette_name);

        let mut out = String::new();
        out.push_str(&format!("/* {} */\n", palette_name.replace("*/", "* /")));
        out.push_str(":root {\n");
        for (role, color) in palette.iter() {
            out.push_str(&format!("  --{prefix}-{role}: {color};\n"));
        }
        for (role, color) in palette.iter() {
            out.push_str(&format!(
                "  --{prefix}-on-{role}: {};\n",
                color.readable_text()
            ));
        }
        out.push_str("}\n");

        out
    }
}

/// A custom-property-safe prefix: a slug that never starts with a digit.
fn css_ident(name: &str) -> String {
    let ident = slug(name);
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        format!("deck-{ident}").trim_end_matches('-').to_string()
    } else {
        ident
    }
}
