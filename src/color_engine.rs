// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

use crate::color_utils::{self, Color};

pub const DEFAULT_HEX_COLOR: &str = "#283d46";
const DEFAULT_COLOR: Color = Color::new(40, 61, 70);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    NativePicker,
    HexField,
    RgbSliders,
}

// a raw edit coming from one of the input surfaces
#[derive(Debug, Clone, PartialEq)]
pub enum ColorSource {
    NativePicker(String),
    HexField(String),
    RgbSliders([u8; 3]),
}

impl ColorSource {
    pub fn kind(&self) -> SourceKind {
        match self {
            ColorSource::NativePicker(_) => SourceKind::NativePicker,
            ColorSource::HexField(_) => SourceKind::HexField,
            ColorSource::RgbSliders(_) => SourceKind::RgbSliders,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorSnapshot {
    pub color: Color,
    pub hex: String,
    pub ox_hex: String,
}

impl ColorSnapshot {
    pub fn from_color(color: Color) -> Self {
        let hex = color_utils::rgb_to_hex(color.red, color.green, color.blue);
        let ox_hex = color_utils::hex_to_ox_format(&hex);
        Self { color, hex, ox_hex }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SyncResult {
    Updated(ColorSnapshot),
    NoOp,
}

/// A view that displays the canonical color.
///
/// Every surface receives the full snapshot after each successful update,
/// including the surface the edit came from.
pub trait ColorSurface {
    fn render(&mut self, snapshot: &ColorSnapshot, origin: SourceKind);
}

pub struct ColorEngine {
    snapshot: ColorSnapshot,
}

impl Default for ColorEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorEngine {
    pub fn new() -> Self {
        Self {
            snapshot: ColorSnapshot::from_color(DEFAULT_COLOR),
        }
    }

    pub fn with_initial_hex(hex: &str) -> Option<Self> {
        let color = color_utils::hex_to_rgb(hex)?;
        Some(Self {
            snapshot: ColorSnapshot::from_color(color),
        })
    }

    pub fn snapshot(&self) -> &ColorSnapshot {
        &self.snapshot
    }

    pub fn synchronize(&mut self, source: ColorSource) -> SyncResult {
        let color = match source {
            ColorSource::NativePicker(hex) => match color_utils::hex_to_rgb(&hex) {
                Some(color) => color,
                None => {
                    log::warn!("Color picker produced an undecodable value '{}'", hex);
                    return SyncResult::NoOp;
                }
            },
            ColorSource::HexField(text) => {
                let hex = normalize_hex_field_input(&text);
                if !color_utils::is_valid_hex(&hex) {
                    log::debug!("Ignoring incomplete hex input '{}'", text);
                    return SyncResult::NoOp;
                }
                match color_utils::hex_to_rgb(&hex) {
                    Some(color) => color,
                    None => return SyncResult::NoOp,
                }
            }
            ColorSource::RgbSliders(rgb) => Color::from(rgb),
        };

        self.snapshot = ColorSnapshot::from_color(color);
        log::debug!("Color updated to {}", self.snapshot.hex);
        SyncResult::Updated(self.snapshot.clone())
    }

    // returns true if the surface was updated
    pub fn apply(&mut self, source: ColorSource, surface: &mut dyn ColorSurface) -> bool {
        let origin = source.kind();
        match self.synchronize(source) {
            SyncResult::Updated(snapshot) => {
                surface.render(&snapshot, origin);
                true
            }
            SyncResult::NoOp => false,
        }
    }
}

pub fn normalize_hex_field_input(raw: &str) -> String {
    let hex = raw.trim();
    if !hex.is_empty() && !hex.starts_with('#') {
        format!("#{}", hex)
    } else {
        hex.to_string()
    }
}
