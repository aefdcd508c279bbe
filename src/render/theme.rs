use crate::error::{GraphError, Result};

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parses `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let invalid = || GraphError::InvalidColor(hex.to_string());
        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 0xff };
        Ok(Self {
            r: channel(0)?,
            g: channel(2)?,
            b: channel(4)?,
            a,
        })
    }
}

/// Colours used by the graph renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub background_color: Color,
    pub divider_color: Color,
    pub theme_color: Color,
    pub cursor_color: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background_color: Color::rgb(0x25, 0x25, 0x25),
            divider_color: Color::rgb(0x4d, 0x4d, 0x4d),
            theme_color: Color::rgb(0x5f, 0x97, 0xff),
            cursor_color: Color::rgb(0xff, 0x5f, 0x5f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("#5f97ff").unwrap(), Color::rgb(0x5f, 0x97, 0xff));
        assert_eq!(
            Color::from_hex("#00000080").unwrap(),
            Color::rgb(0, 0, 0).with_alpha(0x80)
        );
    }

    #[test]
    fn test_from_hex_rejects_malformed() {
        assert!(Color::from_hex("5f97ff").is_err());
        assert!(Color::from_hex("#5f97f").is_err());
        assert!(Color::from_hex("#zz97ff").is_err());
    }
}
