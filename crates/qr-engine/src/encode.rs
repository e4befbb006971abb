//! QR symbol encoding via the `qrcode` crate.

use qrcode::QrCode;

use crate::EngineError;
use crate::options::EcLevel;

/// Dark/light module grid produced by the encoder.
///
/// Out-of-bounds lookups read as light so shape drawers can probe
/// neighbors without bounds arithmetic.
#[derive(Debug, Clone)]
pub struct Matrix {
    width: usize,
    modules: Vec<bool>,
}

impl Matrix {
    pub(crate) fn new(width: usize, modules: Vec<bool>) -> Self {
        debug_assert_eq!(width * width, modules.len());
        Self { width, modules }
    }

    /// Modules per side.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.width as i32 {
            return false;
        }
        self.modules[y as usize * self.width + x as usize]
    }
}

/// Encode a payload into a module grid, growing the symbol version to fit.
pub fn encode(payload: &str, ec_level: EcLevel) -> Result<Matrix, EngineError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), ec_level.to_qrcode())
        .map_err(EngineError::Encode)?;

    let width = code.width();
    let modules = code
        .to_colors()
        .into_iter()
        .map(|color| color == qrcode::Color::Dark)
        .collect();

    tracing::debug!(modules_per_side = width, "Encoded QR symbol");
    Ok(Matrix::new(width, modules))
}
