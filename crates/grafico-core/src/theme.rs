// File: crates/grafico-core/src/theme.rs
// Summary: Default colours, series palette generation and CSS colour parsing.

use crate::error::{ChartError, Result};

pub const LABEL: &str = "#000";
pub const GRID: &str = "#ccc";
pub const HOVER_TEXT: &str = "#fff";
pub const MEANLINE: &str = "#BBBBBB";
pub const WATERMARK_OPACITY: f64 = 0.4;

/// Hue increment between generated series colours (golden ratio conjugate),
/// keeps neighbouring series apart without a random source.
const HUE_STEP: f64 = 0.618_033_988_749_895;

/// 8-bit RGBA colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb`, `rgb(r, g, b)`, `rgba(r, g, b, a)`, `none`,
    /// `transparent` and a handful of named colours.
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let bad = || ChartError::invalid(format!("unrecognised colour `{s}`"));
        if let Some(hex) = s.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(bad)?;
            return match digits.as_slice() {
                [r, g, b] => Ok(Self::rgb(r * 17, g * 17, b * 17)),
                [r1, r2, g1, g2, b1, b2] => Ok(Self::rgb(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
                _ => Err(bad()),
            };
        }
        let lower = s.to_ascii_lowercase();
        if let Some(body) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|b| b.strip_suffix(')'))
        {
            let parts: Vec<&str> = body.split(',').map(str::trim).collect();
            let channel = |p: &str| p.parse::<u8>().map_err(|_| bad());
            return match parts.as_slice() {
                [r, g, b] => Ok(Self::rgb(channel(r)?, channel(g)?, channel(b)?)),
                [r, g, b, a] => {
                    let alpha: f64 = a.parse().map_err(|_| bad())?;
                    Ok(Self {
                        r: channel(r)?,
                        g: channel(g)?,
                        b: channel(b)?,
                        a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
                    })
                }
                _ => Err(bad()),
            };
        }
        match lower.as_str() {
            "none" | "transparent" => Ok(Self::TRANSPARENT),
            "black" => Ok(Self::rgb(0, 0, 0)),
            "white" => Ok(Self::rgb(255, 255, 255)),
            "red" => Ok(Self::rgb(255, 0, 0)),
            "green" => Ok(Self::rgb(0, 128, 0)),
            "blue" => Ok(Self::rgb(0, 0, 255)),
            "gray" | "grey" => Ok(Self::rgb(128, 128, 128)),
            _ => Err(bad()),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// HSB (all components in 0..=1) to RGB.
pub fn hsb_to_rgb(hue: f64, saturation: f64, brightness: f64) -> Rgba {
    let h = hue.rem_euclid(1.0) * 6.0;
    let c = brightness * saturation;
    let x = c * (1.0 - ((h % 2.0) - 1.0).abs());
    let m = brightness - c;
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let to8 = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgba::rgb(to8(r), to8(g), to8(b))
}

/// Colour for the series at `position`: full saturation, 75% brightness,
/// hues spread by the golden ratio.
pub fn series_colour(position: usize) -> String {
    hsb_to_rgb(position as f64 * HUE_STEP, 1.0, 0.75).to_hex()
}
