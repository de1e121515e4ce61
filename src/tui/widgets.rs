use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::pipeline::extract::ExtractedColor;
use crate::theme::{Palette, Role};

const SWATCH_WIDTH: usize = 11;

fn to_color(c: &AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

fn swatch_style(c: &AppColor) -> Style {
    Style::default().bg(to_color(c)).fg(to_color(&c.readable_text()))
}

/// A widget that renders the five palette roles as a row of colored swatches
/// with their hex values. Highlights the currently selected role.
pub struct PaletteWidget<'a> {
    palette: &'a Palette,
    selected: Option<Role>,
}

impl<'a> PaletteWidget<'a> {
    pub fn new(palette: &'a Palette, selected: Option<Role>) -> Self {
        Self { palette, selected }
    }
}

/// Build the swatch row. Each swatch is centered on its own background;
/// the selected one gets bold + underline.
fn build_swatch_row(palette: &Palette, selected: Option<Role>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (role, color) in palette.iter() {
        let mut style = swatch_style(&color);
        if selected == Some(role) {
            style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
        }
        spans.push(Span::styled(
            format!("{:^width$}", role.key(), width = SWATCH_WIDTH),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn build_hex_row(palette: &Palette, selected: Option<Role>) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (role, color) in palette.iter() {
        let style = if selected == Some(role) {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(
            format!("{:^width$}", color.to_hex(), width = SWATCH_WIDTH),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

impl Widget for PaletteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Palette");
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            build_swatch_row(self.palette, self.selected),
            build_hex_row(self.palette, self.selected),
        ];

        if let Some(role) = self.selected {
            let color = self.palette.get(role);
            let on_dark = AppColor::contrast_ratio(&color, &self.palette.dark);
            let on_light = AppColor::contrast_ratio(&color, &self.palette.light);
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("  {role}  "), swatch_style(&color)),
                Span::raw(format!(
                    "  {color}  luma {:.2}  sat {:.2}  vs dark {on_dark:.1}:1  vs light {on_light:.1}:1",
                    color.luminance(),
                    color.saturation(),
                )),
            ]));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// The sampler's colors in dominance order with their share of the image.
pub struct SamplesWidget<'a> {
    samples: &'a [ExtractedColor],
}

impl<'a> SamplesWidget<'a> {
    pub fn new(samples: &'a [ExtractedColor]) -> Self {
        Self { samples }
    }
}

impl Widget for SamplesWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered().title("Samples");
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = if self.samples.is_empty() {
            vec![Line::styled(
                "  no samples",
                Style::default().fg(Color::DarkGray),
            )]
        } else {
            self.samples
                .iter()
                .enumerate()
                .map(|(rank, sample)| {
                    Line::from(vec![
                        Span::raw(format!("  {:>2} ", rank + 1)),
                        Span::styled("    ", swatch_style(&sample.color)),
                        Span::raw(format!(
                            " {}  {:>5.1}%",
                            sample.color,
                            sample.weight * 100.0
                        )),
                    ])
                })
                .collect()
        };

        Paragraph::new(lines).render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn palette_widget_shows_roles_and_hex() {
        let palette = Palette::fallback();
        let area = Rect::new(0, 0, 70, 8);
        let mut buf = Buffer::empty(area);
        PaletteWidget::new(&palette, None).render(area, &mut buf);

        let text = buffer_text(&buf);
        for role in Role::ALL {
            assert!(text.contains(role.key()), "missing {role}");
        }
        assert!(text.contains("#444444"));
        assert!(!text.contains("vs dark"));
    }

    #[test]
    fn selected_role_gets_info_line() {
        let palette = Palette::fallback();
        let area = Rect::new(0, 0, 100, 8);
        let mut buf = Buffer::empty(area);
        PaletteWidget::new(&palette, Some(Role::Accent)).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("#666666  luma"));
        assert!(text.contains("vs dark"));
    }

    #[test]
    fn samples_widget_lists_weights() {
        let samples = [
            ExtractedColor {
                color: AppColor::new(0x20, 0x20, 0x20),
                weight: 0.625,
            },
            ExtractedColor {
                color: AppColor::new(0xff, 0, 0),
                weight: 0.375,
            },
        ];
        let area = Rect::new(0, 0, 40, 5);
        let mut buf = Buffer::empty(area);
        SamplesWidget::new(&samples).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("#202020   62.5%"));
        assert!(text.contains("#ff0000   37.5%"));
    }

    #[test]
    fn samples_widget_handles_empty() {
        let area = Rect::new(0, 0, 40, 4);
        let mut buf = Buffer::empty(area);
        SamplesWidget::new(&[]).render(area, &mut buf);
        assert!(buffer_text(&buf).contains("no samples"));
    }
}
