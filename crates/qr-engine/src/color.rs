//! Hex color parsing and per-module color masks.

use std::str::FromStr;

use image::Rgba;

use crate::EngineError;

/// Parse a `#RRGGBB` hex string (leading `#` optional) into an opaque color.
pub fn parse_hex(value: &str) -> Result<Rgba<u8>, EngineError> {
    let trimmed = value.trim();
    let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(EngineError::InvalidColor(value.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16)
            .map_err(|_| EngineError::InvalidColor(value.to_string()))
    };

    Ok(Rgba([channel(0..2)?, channel(2..4)?, channel(4..6)?, 255]))
}

/// Coloring scheme selection, as offered by the form UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorStyle {
    Solid,
    SquareGradient,
    RadialGradient,
}

impl ColorStyle {
    pub const ALL: [ColorStyle; 3] = [
        ColorStyle::Solid,
        ColorStyle::SquareGradient,
        ColorStyle::RadialGradient,
    ];

    /// Wire value accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ColorStyle::Solid => "solid",
            ColorStyle::SquareGradient => "square-gradient",
            ColorStyle::RadialGradient => "radial-gradient",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorStyle::Solid => "Solid",
            ColorStyle::SquareGradient => "Square Gradient",
            ColorStyle::RadialGradient => "Radial Gradient",
        }
    }
}

impl FromStr for ColorStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| EngineError::UnknownOption {
                kind: "color style",
                value: s.to_string(),
            })
    }
}

/// Rule assigning a color to each dark module.
///
/// Gradients interpolate between the center and edge colors by the module
/// center's normalized distance from the image center: Chebyshev distance
/// for the square gradient, Euclidean for the radial one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMask {
    Solid {
        front: Rgba<u8>,
        back: Rgba<u8>,
    },
    SquareGradient {
        center: Rgba<u8>,
        edge: Rgba<u8>,
        back: Rgba<u8>,
    },
    RadialGradient {
        center: Rgba<u8>,
        edge: Rgba<u8>,
        back: Rgba<u8>,
    },
}

impl ColorMask {
    pub fn background(&self) -> Rgba<u8> {
        match *self {
            ColorMask::Solid { back, .. }
            | ColorMask::SquareGradient { back, .. }
            | ColorMask::RadialGradient { back, .. } => back,
        }
    }

    /// Color for a module whose center sits at `(x, y)` in a `side`-pixel
    /// square raster.
    pub fn module_color(&self, x: f32, y: f32, side: f32) -> Rgba<u8> {
        let half = side / 2.0;
        match *self {
            ColorMask::Solid { front, .. } => front,
            ColorMask::SquareGradient { center, edge, .. } => {
                let t = ((x - half).abs().max((y - half).abs()) / half).min(1.0);
                lerp(center, edge, t)
            }
            ColorMask::RadialGradient { center, edge, .. } => {
                let (dx, dy) = (x - half, y - half);
                let t = ((dx * dx + dy * dy).sqrt() / half).min(1.0);
                lerp(center, edge, t)
            }
        }
    }
}

fn lerp(a: Rgba<u8>, b: Rgba<u8>, t: f32) -> Rgba<u8> {
    let inv = 1.0 - t;
    Rgba([
        (f32::from(a[0]) * inv + f32::from(b[0]) * t) as u8,
        (f32::from(a[1]) * inv + f32::from(b[1]) * t) as u8,
        (f32::from(a[2]) * inv + f32::from(b[2]) * t) as u8,
        255,
    ])
}
