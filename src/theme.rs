use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PaletteError, Result};

/// One of the five semantic slots slide blocks look colors up by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
    Accent,
    Dark,
    Light,
}

impl Role {
    /// Canonical order, used by every text format.
    pub const ALL: [Role; 5] = [
        Role::Primary,
        Role::Secondary,
        Role::Accent,
        Role::Dark,
        Role::Light,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Role::Primary => "primary",
            Role::Secondary => "secondary",
            Role::Accent => "accent",
            Role::Dark => "dark",
            Role::Light => "light",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Role {
    type Err = PaletteError;

    fn from_str(s: &str) -> Result<Self> {
        Role::ALL
            .into_iter()
            .find(|role| role.key() == s)
            .ok_or_else(|| PaletteError::UnknownRole(s.to_string()))
    }
}

/// A complete five-role palette. Every role is always populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub dark: Color,
    pub light: Color,
}

impl Palette {
    /// Neutral grayscale palette for callers that need something to show
    /// before the first extraction.
    pub fn fallback() -> Self {
        Self {
            primary: Color::new(0x44, 0x44, 0x44),
            secondary: Color::new(0x88, 0x88, 0x88),
            accent: Color::new(0x66, 0x66, 0x66),
            dark: Color::new(0x11, 0x11, 0x11),
            light: Color::new(0xee, 0xee, 0xee),
        }
    }

    pub fn get(&self, role: Role) -> Color {
        match role {
            Role::Primary => self.primary,
            Role::Secondary => self.secondary,
            Role::Accent => self.accent,
            Role::Dark => self.dark,
            Role::Light => self.light,
        }
    }

    /// Overwrite a single role. This is the manual-edit path and never goes
    /// through derivation.
    pub fn set(&mut self, role: Role, color: Color) {
        match role {
            Role::Primary => self.primary = color,
            Role::Secondary => self.secondary = color,
            Role::Accent => self.accent = color,
            Role::Dark => self.dark = color,
            Role::Light => self.light = color,
        }
    }

    /// Roles and their colors in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, Color)> + '_ {
        Role::ALL.into_iter().map(|role| (role, self.get(role)))
    }

    /// Serialize to the plain `role = #rrggbb` key/value format.
    pub fn serialize(&self) -> String {
        self.iter()
            .map(|(role, color)| format!("{role} = {color}\n"))
            .collect()
    }

    /// Parse the key/value format written by [`Palette::serialize`].
    ///
    /// Blank lines and lines starting with `#` are skipped. Every role must
    /// appear exactly once; unknown keys are rejected.
    pub fn parse(text: &str) -> Result<Self> {
        let mut slots: [Option<Color>; 5] = [None; 5];

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let (key, value) = line.split_once('=').ok_or_else(|| PaletteError::Parse {
                line: line_no,
                message: format!("expected `role = #rrggbb`, got {line:?}"),
            })?;
            let role: Role = key.trim().parse().map_err(|e: PaletteError| PaletteError::Parse {
                line: line_no,
                message: e.to_string(),
            })?;
            let color: Color = value.parse().map_err(|e: PaletteError| PaletteError::Parse {
                line: line_no,
                message: e.to_string(),
            })?;
            let slot = &mut slots[role as usize];
            if slot.is_some() {
                return Err(PaletteError::Parse {
                    line: line_no,
                    message: format!("role `{role}` assigned twice"),
                });
            }
            *slot = Some(color);
        }

        let lookup = |role: Role| slots[role as usize].ok_or(PaletteError::MissingRole(role));
        Ok(Self {
            primary: lookup(Role::Primary)?,
            secondary: lookup(Role::Secondary)?,
            accent: lookup(Role::Accent)?,
            dark: lookup(Role::Dark)?,
            light: lookup(Role::Light)?,
        })
    }
}
