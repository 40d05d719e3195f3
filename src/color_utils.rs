// Copyright (C) Pavel Grebnev 2023-2024
// Distributed under the MIT License (license terms are at http://opensource.org/licenses/MIT).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }
}

impl From<[u8; 3]> for Color {
    fn from(rgb: [u8; 3]) -> Self {
        Color::new(rgb[0], rgb[1], rgb[2])
    }
}

impl From<Color> for iced::Color {
    fn from(color: Color) -> Self {
        iced::Color::from_rgb8(color.red, color.green, color.blue)
    }
}

fn strip_hash(hex: &str) -> &str {
    hex.strip_prefix('#').unwrap_or(hex)
}

fn has_valid_digit_count(digits: &str) -> bool {
    // all characters are checked to be ascii, so the byte length is the digit count
    digits.chars().all(|c| c.is_ascii_hexdigit()) && (digits.len() == 3 || digits.len() == 6)
}

/// Accepts `#rgb`, `rgb`, `#rrggbb` and `rrggbb` in any letter case.
pub fn hex_to_rgb(hex: &str) -> Option<Color> {
    let digits = strip_hash(hex);
    if !has_valid_digit_count(digits) {
        return None;
    }

    let expanded = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        digits.to_string()
    };

    let red = u8::from_str_radix(&expanded[0..2], 16).ok()?;
    let green = u8::from_str_radix(&expanded[2..4], 16).ok()?;
    let blue = u8::from_str_radix(&expanded[4..6], 16).ok()?;
    Some(Color { red, green, blue })
}

pub fn rgb_to_hex(red: u8, green: u8, blue: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", red, green, blue)
}

// textual only, the input is expected to be already validated
pub fn hex_to_ox_format(hex: &str) -> String {
    format!("0x{}", strip_hash(hex))
}

pub fn is_valid_hex(text: &str) -> bool {
    has_valid_digit_count(strip_hash(text))
}
