//! Generation request types and wire-level option parsing.

use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::EngineError;
use crate::color::ColorMask;

/// Pixel edge length of a single module.
pub const BOX_SIZE_RANGE: RangeInclusive<u32> = 5..=20;
/// Quiet zone width in modules.
pub const BORDER_RANGE: RangeInclusive<u32> = 1..=10;

/// Error correction level, mapped 1:1 onto the `qrcode` crate's levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    Low,
    Medium,
    Quartile,
    High,
}

impl EcLevel {
    pub const ALL: [EcLevel; 4] = [
        EcLevel::Low,
        EcLevel::Medium,
        EcLevel::Quartile,
        EcLevel::High,
    ];

    /// Wire value accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            EcLevel::Low => "low",
            EcLevel::Medium => "medium",
            EcLevel::Quartile => "quartile",
            EcLevel::High => "high",
        }
    }

    /// Human-readable label with the approximate recovery capacity.
    pub fn label(self) -> &'static str {
        match self {
            EcLevel::Low => "Low (7%)",
            EcLevel::Medium => "Medium (15%)",
            EcLevel::Quartile => "Quartile (25%)",
            EcLevel::High => "High (30%)",
        }
    }

    pub(crate) fn to_qrcode(self) -> qrcode::EcLevel {
        match self {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}

impl FromStr for EcLevel {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EcLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| EngineError::UnknownOption {
                kind: "error correction",
                value: s.to_string(),
            })
    }
}

/// Shape used to draw each dark module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleStyle {
    Square,
    Rounded,
    Circle,
    GappedSquare,
    VerticalBars,
    HorizontalBars,
}

impl ModuleStyle {
    pub const ALL: [ModuleStyle; 6] = [
        ModuleStyle::Square,
        ModuleStyle::Rounded,
        ModuleStyle::Circle,
        ModuleStyle::GappedSquare,
        ModuleStyle::VerticalBars,
        ModuleStyle::HorizontalBars,
    ];

    /// Wire value accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleStyle::Square => "square",
            ModuleStyle::Rounded => "rounded",
            ModuleStyle::Circle => "circle",
            ModuleStyle::GappedSquare => "gapped-square",
            ModuleStyle::VerticalBars => "vertical-bars",
            ModuleStyle::HorizontalBars => "horizontal-bars",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ModuleStyle::Square => "Square",
            ModuleStyle::Rounded => "Rounded",
            ModuleStyle::Circle => "Circle",
            ModuleStyle::GappedSquare => "Gapped Square",
            ModuleStyle::VerticalBars => "Vertical Bars",
            ModuleStyle::HorizontalBars => "Horizontal Bars",
        }
    }
}

impl FromStr for ModuleStyle {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModuleStyle::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| EngineError::UnknownOption {
                kind: "module style",
                value: s.to_string(),
            })
    }
}

/// One styled QR generation request, fully resolved from the wire form.
#[derive(Debug, Clone)]
pub struct QrRequest {
    pub payload: String,
    pub ec_level: EcLevel,
    pub box_size: u32,
    pub border: u32,
    pub module_style: ModuleStyle,
    pub mask: ColorMask,
    /// Raw bytes of an uploaded PNG/JPEG logo, decoded during compositing.
    pub logo: Option<Vec<u8>>,
}

impl QrRequest {
    pub(crate) fn validate(&self) -> Result<(), EngineError> {
        if self.payload.is_empty() {
            return Err(EngineError::EmptyPayload);
        }
        if !BOX_SIZE_RANGE.contains(&self.box_size) {
            return Err(EngineError::BoxSizeOutOfRange(self.box_size));
        }
        if !BORDER_RANGE.contains(&self.border) {
            return Err(EngineError::BorderOutOfRange(self.border));
        }
        Ok(())
    }
}
