//! Color format conversion.
//!
//! The two public converters keep the exact semantics callers have relied on
//! for card configuration values: `hex_to_rgba` injects a caller-supplied
//! opacity (an 8-digit hex has its own alpha pair discarded first), and
//! `rgb_to_hex` extracts the first three integer channels it finds. Draw-time
//! resolution of arbitrary color strings goes through `csscolorparser`
//! instead, which accepts every format the configuration may carry.

use piet_common::Color;

use crate::error::CardError;

/// Converts a `#RGB`/`#RRGGBB`/`#RRGGBBAA` hex string into an
/// `rgba(r,g,b,opacity)` string.
///
/// 3-digit shorthand is expanded by doubling each digit. The hex's own alpha
/// channel (8-digit form) is discarded; `opacity` is injected in its place.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> Result<String, CardError> {
    let mut hex = hex.trim();
    if hex.len() == 9 && hex.starts_with('#') && hex.is_ascii() {
        hex = &hex[..7];
    }
    let digits = hex
        .strip_prefix('#')
        .filter(|d| (d.len() == 3 || d.len() == 6) && d.bytes().all(|b| b.is_ascii_hexdigit()))
        .ok_or_else(|| CardError::ColorFormat(hex.to_owned()))?;

    let full: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_owned()
    };
    let value =
        u32::from_str_radix(&full, 16).map_err(|_| CardError::ColorFormat(hex.to_owned()))?;

    let (r, g, b) = ((value >> 16) & 255, (value >> 8) & 255, value & 255);
    Ok(format!("rgba({r},{g},{b},{opacity})"))
}

/// Converts an `rgb(r,g,b)` / `rgba(r,g,b,a)` string into a lowercase
/// `#rrggbb` string. Any alpha component is dropped.
pub fn rgb_to_hex(rgb: &str) -> Result<String, CardError> {
    let err = || CardError::ColorFormat(rgb.to_owned());
    let trimmed = rgb.trim();
    let rest = trimmed
        .strip_prefix("rgba")
        .or_else(|| trimmed.strip_prefix("rgb"))
        .and_then(|r| r.strip_prefix('('))
        .ok_or_else(err)?;

    let mut channels = [0u8; 3];
    let mut parts = rest.split(',');
    for channel in &mut channels {
        let digits: String = parts
            .next()
            .ok_or_else(err)?
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            return Err(err());
        }
        *channel = digits.parse().map_err(|_| err())?;
    }

    let [r, g, b] = channels;
    Ok(format!("#{r:02x}{g:02x}{b:02x}"))
}

/// Resolves any supported color string to a paintable color.
pub(crate) fn resolve(color: &str) -> Result<Color, CardError> {
    let parsed =
        csscolorparser::parse(color).map_err(|_| CardError::ColorFormat(color.to_owned()))?;
    let [r, g, b, a] = parsed.to_rgba8();
    Ok(Color::rgba8(r, g, b, a))
}

/// Resolves a color string and scales its alpha channel, for the decorative
/// overlays and the progress bar track which carry their own opacities.
pub(crate) fn resolve_with_opacity(color: &str, opacity: f64) -> Result<Color, CardError> {
    let parsed =
        csscolorparser::parse(color).map_err(|_| CardError::ColorFormat(color.to_owned()))?;
    let [r, g, b, a] = parsed.to_rgba8();
    let a = (f64::from(a) * opacity).round() as u8;
    Ok(Color::rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_to_rgba_expands_shorthand() {
        assert_eq!(hex_to_rgba("#fff", 1.0).unwrap(), "rgba(255,255,255,1)");
    }

    #[test]
    fn hex_to_rgba_injects_opacity() {
        assert_eq!(
            hex_to_rgba("#0CA7FF", 0.5).unwrap(),
            "rgba(12,167,255,0.5)"
        );
    }

    #[test]
    fn hex_to_rgba_discards_own_alpha() {
        assert_eq!(
            hex_to_rgba("#0CA7FF80", 0.31).unwrap(),
            "rgba(12,167,255,0.31)"
        );
    }

    #[test]
    fn hex_to_rgba_rejects_garbage() {
        assert!(hex_to_rgba("not-a-color", 1.0).is_err());
        assert!(hex_to_rgba("#12", 1.0).is_err());
        assert!(hex_to_rgba("0CA7FF", 1.0).is_err());
        assert!(hex_to_rgba("#0CA7FG", 1.0).is_err());
    }

    #[test]
    fn rgb_to_hex_parses_both_forms() {
        assert_eq!(rgb_to_hex("rgb(12,167,255)").unwrap(), "#0ca7ff");
        assert_eq!(rgb_to_hex("rgba(12, 167, 255, 0.5)").unwrap(), "#0ca7ff");
    }

    #[test]
    fn rgb_to_hex_rejects_garbage() {
        assert!(rgb_to_hex("bogus").is_err());
        assert!(rgb_to_hex("rgb(,,)").is_err());
        assert!(rgb_to_hex("rgb(300,0,0)").is_err());
    }

    #[test]
    fn hex_rgba_round_trips() {
        for hex in ["#0ca7ff", "#000000", "#ffffff", "#7f8384", "#f44336"] {
            let rgba = hex_to_rgba(hex, 1.0).unwrap();
            assert_eq!(rgb_to_hex(&rgba).unwrap(), hex);
        }
    }

    #[test]
    fn resolve_accepts_hex_and_rgb() {
        let expected = Color::rgba8(12, 167, 255, 255).as_rgba_u32();
        assert_eq!(resolve("#0CA7FF").unwrap().as_rgba_u32(), expected);
        assert_eq!(resolve("rgb(12,167,255)").unwrap().as_rgba_u32(), expected);
        assert!(resolve("not-a-color").is_err());
    }

    #[test]
    fn resolve_with_opacity_scales_alpha() {
        assert_eq!(
            resolve_with_opacity("#0CA7FF", 0.5).unwrap().as_rgba_u32(),
            Color::rgba8(12, 167, 255, 128).as_rgba_u32()
        );
    }
}
