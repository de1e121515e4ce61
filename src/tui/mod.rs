pub mod widgets;

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::backends::Format;
use crate::color::Color as AppColor;
use crate::editor::{PaletteEditor, PaletteEvent};
use crate::pipeline::extract::{ExtractedColor, SamplerOptions};
use crate::pipeline::extract_palette;
use crate::theme::{Palette, Role};
use widgets::{PaletteWidget, SamplesWidget};

const HELP: &str = "←/→ select  e edit  r re-extract  s save  q quit";

/// State for the interactive palette editor.
pub struct TuiApp {
    pub editor: PaletteEditor,
    events: Receiver<PaletteEvent>,
    pub samples: Vec<ExtractedColor>,
    pub image_path: PathBuf,
    pub options: SamplerOptions,
    pub format: Format,
    pub palette_name: String,
    pub selected: Role,
    /// Hex being typed while editing the selected role.
    pub input: Option<String>,
    pub status: String,
    pub should_quit: bool,
}

impl TuiApp {
    /// Start with a neutral palette; [`run`] replaces it with the first extraction.
    pub fn new(
        image_path: PathBuf,
        palette_name: String,
        options: SamplerOptions,
        format: Format,
    ) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            editor: PaletteEditor::new(Palette::fallback()).with_updates(tx),
            events: rx,
            samples: Vec::new(),
            image_path,
            options,
            format,
            palette_name,
            selected: Role::Primary,
            input: None,
            status: HELP.to_string(),
            should_quit: false,
        }
    }

    /// Run the pipeline on the image again and hand the result to the editor.
    pub fn reextract(&mut self) {
        let request = self.editor.begin_extraction();
        let result = extract_palette(&self.image_path, &self.options);
        if let Ok(extraction) = &result {
            self.samples = extraction.samples.clone();
        }
        self.editor.finish_extraction(request, result);
        self.drain_events();
    }

    /// Save the current palette with the selected export format.
    pub fn save(&mut self) {
        let backend = self.format.backend();
        self.status = match backend.install(self.editor.current(), &self.palette_name) {
            Ok(path) => format!("saved {}", path.display()),
            Err(err) => format!("save failed: {err:#}"),
        };
    }

    /// Fold pending editor events into the status line.
    fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            self.status = match event {
                PaletteEvent::Extracted { palette, .. } => {
                    format!("extracted palette, primary {}", palette.primary)
                }
                PaletteEvent::Edited { role, color } => format!("{role} set to {color}"),
                PaletteEvent::Failed { message, .. } => {
                    format!("extraction failed, palette kept: {message}")
                }
            };
        }
    }

    fn step_selection(&mut self, forward: bool) {
        let index = Role::ALL
            .iter()
            .position(|&r| r == self.selected)
            .unwrap_or(0);
        let len = Role::ALL.len();
        let next = if forward {
            (index + 1) % len
        } else {
            (index + len - 1) % len
        };
        self.selected = Role::ALL[next];
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if let Some(input) = &mut self.input {
            match key.code {
                KeyCode::Esc => {
                    self.input = None;
                    self.status = HELP.to_string();
                }
                KeyCode::Enter => {
                    match input.parse::<AppColor>() {
                        Ok(color) => {
                            self.input = None;
                            self.editor.edit(self.selected, color);
                            self.drain_events();
                        }
                        Err(err) => self.status = err.to_string(),
                    }
                }
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) if input.len() < 7 => input.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => self.step_selection(true),
            KeyCode::Left | KeyCode::BackTab | KeyCode::Char('h') => self.step_selection(false),
            KeyCode::Char('e') | KeyCode::Enter => {
                self.input = Some(self.editor.current().get(self.selected).to_hex());
                self.status = "type a hex color, Enter to apply, Esc to cancel".to_string();
            }
            KeyCode::Char('r') => self.reextract(),
            KeyCode::Char('s') => self.save(),
            _ => {}
        }
    }
}

/// Draw the whole editor into one frame.
pub fn render(app: &TuiApp, frame: &mut Frame) {
    let [title, palette, samples, status] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(6),
        Constraint::Min(3),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    frame.render_widget(
        Paragraph::new(format!(
            " deckpal · {} · {}",
            app.palette_name,
            app.image_path.display()
        )),
        title,
    );
    frame.render_widget(
        PaletteWidget::new(app.editor.current(), Some(app.selected)),
        palette,
    );
    frame.render_widget(SamplesWidget::new(&app.samples), samples);

    let status_line = match &app.input {
        Some(input) => Line::styled(
            format!(" {}: {input}_", app.selected),
            Style::default().fg(Color::Yellow),
        ),
        None => Line::raw(format!(" {}", app.status)),
    };
    frame.render_widget(Paragraph::new(status_line), status);
}

/// Launch the TUI application.
pub fn run(mut app: TuiApp) -> Result<()> {
    app.reextract();

    let mut terminal = ratatui::init();
    let result = (|| -> Result<()> {
        while !app.should_quit {
            terminal.draw(|frame| render(&app, frame))?;
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        Ok(())
    })();
    ratatui::restore();
    result
}
