//! PNG serialization of the rendered raster.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

use crate::EngineError;

/// Serialize the raster into lossless PNG bytes.
pub fn to_png(img: &RgbaImage) -> Result<Vec<u8>, EngineError> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(EngineError::Export)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn exported_png_round_trips_dimensions_and_format() {
        let img = RgbaImage::from_pixel(120, 120, Rgba([10, 20, 30, 255]));
        let bytes = to_png(&img).unwrap();

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 120);
        assert_eq!(decoded.height(), 120);
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
        assert_eq!(*decoded.to_rgba8().get_pixel(60, 60), Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn export_is_deterministic() {
        let img = RgbaImage::from_pixel(40, 40, Rgba([0, 0, 0, 255]));
        assert_eq!(to_png(&img).unwrap(), to_png(&img).unwrap());
    }
}
