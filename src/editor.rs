//! The editor's single "current palette" slot.
//!
//! The palette is an explicit value owned by [`PaletteEditor`]. Every change
//! is announced on an update channel so views can redraw without sharing
//! mutable state.

use std::sync::mpsc::Sender;

use tracing::{debug, info, warn};

use crate::color::Color;
use crate::error::PaletteError;
use crate::pipeline::Extraction;
use crate::theme::{Palette, Role};

/// Identifies one extraction attempt. Later requests compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

/// Emitted on the update channel after the current palette changes, or after
/// an extraction attempt fails.
#[derive(Debug, Clone, PartialEq)]
pub enum PaletteEvent {
    Extracted { request: RequestId, palette: Palette },
    Edited { role: Role, color: Color },
    Failed { request: RequestId, message: String },
}

/// What happened to a finished extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    /// The palette was kept because the extraction failed.
    Rejected,
    /// A newer request was issued in the meantime; the result was dropped.
    Stale,
}

pub struct PaletteEditor {
    current: Palette,
    latest: u64,
    updates: Option<Sender<PaletteEvent>>,
}

impl PaletteEditor {
    /// Start from a caller-supplied palette. There is no built-in default.
    pub fn new(initial: Palette) -> Self {
        Self {
            current: initial,
            latest: 0,
            updates: None,
        }
    }

    /// Attach the channel change events are sent on.
    pub fn with_updates(mut self, updates: Sender<PaletteEvent>) -> Self {
        self.updates = Some(updates);
        self
    }

    pub fn current(&self) -> &Palette {
        &self.current
    }

    /// Reserve an id for a new extraction. Any earlier outstanding request
    /// becomes stale.
    pub fn begin_extraction(&mut self) -> RequestId {
        self.latest += 1;
        RequestId(self.latest)
    }

    /// Apply the result of an extraction if it is still the newest request.
    ///
    /// On failure the current palette is left untouched.
    pub fn finish_extraction(
        &mut self,
        request: RequestId,
        result: Result<Extraction, PaletteError>,
    ) -> Outcome {
        if request.0 != self.latest {
            debug!(?request, latest = self.latest, "dropping stale extraction");
            return Outcome::Stale;
        }
        match result {
            Ok(extraction) => {
                self.current = extraction.palette;
                info!(?request, "palette replaced by extraction");
                self.emit(PaletteEvent::Extracted {
                    request,
                    palette: self.current,
                });
                Outcome::Applied
            }
            Err(err) => {
                warn!(?request, error = %err, "extraction failed, keeping palette");
                self.emit(PaletteEvent::Failed {
                    request,
                    message: err.to_string(),
                });
                Outcome::Rejected
            }
        }
    }

    /// Manually overwrite one role. Bypasses derivation entirely.
    pub fn edit(&mut self, role: Role, color: Color) {
        self.current.set(role, color);
        debug!(%role, %color, "role edited");
        self.emit(PaletteEvent::Edited { role, color });
    }

    fn emit(&self, event: PaletteEvent) {
        if let Some(tx) = &self.updates {
            // A dropped receiver just means nobody is listening any more.
            let _ = tx.send(event);
        }
    }
}
