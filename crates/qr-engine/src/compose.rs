//! Centered logo overlay onto a rendered QR raster.

use image::imageops::FilterType;
use image::{Rgba, RgbaImage};
use tracing::debug;

use crate::EngineError;

/// The logo tile edge is this fraction of the raster edge.
const LOGO_FRACTION: u32 = 5;

/// Decode, resize, and paste a logo into the center of `base`.
///
/// The logo is squashed to a square one-fifth of the raster width, its
/// transparency flattened onto `back`, and the resulting tile pasted as an
/// opaque overwrite. Alpha-blending against the QR pattern underneath would
/// leave partially covered modules that scanners misread; higher error
/// correction levels are the supported way to keep logos scannable.
pub fn overlay_logo(
    base: &mut RgbaImage,
    logo_bytes: &[u8],
    back: Rgba<u8>,
) -> Result<(), EngineError> {
    let logo = image::load_from_memory(logo_bytes).map_err(EngineError::Logo)?;

    let (w, h) = base.dimensions();
    let size = (w / LOGO_FRACTION).max(1);
    let resized = logo.resize_exact(size, size, FilterType::Lanczos3);
    debug!(size, "Resized logo for overlay");

    // Flatten transparency onto the background color so the pasted tile
    // never lets the QR pattern show through.
    let mut tile = RgbaImage::from_pixel(size, size, back);
    for (x, y, pixel) in resized.to_rgba8().enumerate_pixels() {
        let alpha = f32::from(pixel[3]) / 255.0;
        if alpha > 0.99 {
            tile.put_pixel(x, y, *pixel);
        } else if alpha > 0.01 {
            let blended = blend_pixel(tile.get_pixel(x, y), pixel, alpha);
            tile.put_pixel(x, y, blended);
        }
    }

    let x0 = (w - size) / 2;
    let y0 = (h - size) / 2;
    for (x, y, pixel) in tile.enumerate_pixels() {
        if x0 + x < w && y0 + y < h {
            base.put_pixel(x0 + x, y0 + y, *pixel);
        }
    }

    Ok(())
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (f32::from(fg[0]) * alpha + f32::from(bg[0]) * inv) as u8,
        (f32::from(fg[1]) * alpha + f32::from(bg[1]) * inv) as u8,
        (f32::from(fg[2]) * alpha + f32::from(bg[2]) * inv) as u8,
        255,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn png_bytes(img: &RgbaImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn overlay_preserves_base_dimensions() {
        let mut base = RgbaImage::from_pixel(200, 200, WHITE);
        let logo = png_bytes(&RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255])));
        overlay_logo(&mut base, &logo, WHITE).unwrap();
        assert_eq!(base.dimensions(), (200, 200));
    }

    #[test]
    fn opaque_logo_overwrites_the_centered_tile() {
        let mut base = RgbaImage::from_pixel(200, 200, BLACK);
        let logo = png_bytes(&RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 255])));
        overlay_logo(&mut base, &logo, WHITE).unwrap();

        // 40x40 tile centered at (80, 80).
        let center = *base.get_pixel(100, 100);
        assert!(center[0] > 200 && center[1] < 50 && center[2] < 50);
        assert_eq!(*base.get_pixel(100, 120), BLACK);
        assert_eq!(*base.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn transparent_logo_flattens_to_the_background_color() {
        // Dark base so the flattened tile is distinguishable from it.
        let mut base = RgbaImage::from_pixel(200, 200, BLACK);
        let logo = png_bytes(&RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 0])));
        overlay_logo(&mut base, &logo, WHITE).unwrap();

        assert_eq!(*base.get_pixel(100, 100), WHITE);
        assert_eq!(*base.get_pixel(0, 0), BLACK);
    }

    #[test]
    fn semi_transparent_logo_blends_with_background_not_base() {
        let mut base = RgbaImage::from_pixel(200, 200, BLACK);
        let logo = png_bytes(&RgbaImage::from_pixel(64, 64, Rgba([255, 0, 0, 128])));
        overlay_logo(&mut base, &logo, WHITE).unwrap();

        // Half red over white: red stays high and green/blue land mid-range;
        // blending against the black base would pull them near zero.
        let center = *base.get_pixel(100, 100);
        assert!(center[0] > 200);
        assert!(center[1] > 80 && center[1] < 180);
        assert!(center[2] > 80 && center[2] < 180);
    }

    #[test]
    fn tiny_logo_is_upscaled_to_the_tile() {
        let mut base = RgbaImage::from_pixel(100, 100, WHITE);
        let logo = png_bytes(&RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 255])));
        overlay_logo(&mut base, &logo, WHITE).unwrap();

        let center = *base.get_pixel(50, 50);
        assert!(center[2] > 200);
    }

    #[test]
    fn garbage_bytes_surface_as_logo_error() {
        let mut base = RgbaImage::from_pixel(100, 100, WHITE);
        let err = overlay_logo(&mut base, b"not an image", WHITE).unwrap_err();
        assert!(matches!(err, EngineError::Logo(_)));
    }
}
