//! Styled QR code generation pipeline.
//!
//! Encodes a payload with the `qrcode` crate, renders the module grid with
//! a selectable module shape and color mask, optionally embeds a centered
//! logo, and exports lossless PNG bytes.

pub mod color;
pub mod compose;
pub mod encode;
pub mod export;
pub mod options;
pub mod render;

pub use image::{Rgba, RgbaImage};

pub use color::{ColorMask, ColorStyle, parse_hex};
pub use options::{BORDER_RANGE, BOX_SIZE_RANGE, EcLevel, ModuleStyle, QrRequest};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Payload must not be empty")]
    EmptyPayload,

    #[error("Box size {0} out of range (5-20)")]
    BoxSizeOutOfRange(u32),

    #[error("Border {0} out of range (1-10)")]
    BorderOutOfRange(u32),

    #[error("Unknown {kind} option: {value}")]
    UnknownOption { kind: &'static str, value: String },

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    #[error("QR encode error: {0}")]
    Encode(qrcode::types::QrError),

    #[error("Could not decode logo image: {0}")]
    Logo(image::ImageError),

    #[error("PNG export error: {0}")]
    Export(image::ImageError),
}

/// Run the full pipeline up to the in-memory raster.
pub fn generate(request: &QrRequest) -> Result<RgbaImage, EngineError> {
    request.validate()?;

    let matrix = encode::encode(&request.payload, request.ec_level)?;
    let mut img = render::render(
        &matrix,
        request.module_style,
        &request.mask,
        request.box_size,
        request.border,
    );

    if let Some(logo) = &request.logo {
        compose::overlay_logo(&mut img, logo, request.mask.background())?;
    }

    Ok(img)
}

/// Run the full pipeline and serialize the result to PNG bytes.
pub fn generate_png(request: &QrRequest) -> Result<Vec<u8>, EngineError> {
    let img = generate(request)?;
    export::to_png(&img)
}
