//! Styled rendering of an encoded module grid onto an RGBA raster.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;

use crate::color::ColorMask;
use crate::encode::Matrix;
use crate::options::ModuleStyle;

/// Dark/light occupancy of the four orthogonal neighbors of a module.
///
/// Shape drawers use this to merge adjacent modules and to round only
/// exposed corners.
#[derive(Debug, Clone, Copy)]
struct Neighbors {
    above: bool,
    below: bool,
    left: bool,
    right: bool,
}

/// Render the module grid at `box_size` pixels per module with a quiet zone
/// of `border` modules on every side.
pub fn render(
    matrix: &Matrix,
    style: ModuleStyle,
    mask: &ColorMask,
    box_size: u32,
    border: u32,
) -> RgbaImage {
    let modules = matrix.width() as u32;
    let side = (modules + 2 * border) * box_size;
    let mut img = RgbaImage::from_pixel(side, side, mask.background());

    for my in 0..modules as i32 {
        for mx in 0..modules as i32 {
            if !matrix.is_dark(mx, my) {
                continue;
            }

            let x0 = (border as i32 + mx) * box_size as i32;
            let y0 = (border as i32 + my) * box_size as i32;
            let half = box_size as f32 / 2.0;
            let color = mask.module_color(x0 as f32 + half, y0 as f32 + half, side as f32);

            let neighbors = Neighbors {
                above: matrix.is_dark(mx, my - 1),
                below: matrix.is_dark(mx, my + 1),
                left: matrix.is_dark(mx - 1, my),
                right: matrix.is_dark(mx + 1, my),
            };

            draw_module(&mut img, style, neighbors, x0, y0, box_size as i32, color);
        }
    }

    img
}

fn draw_module(
    img: &mut RgbaImage,
    style: ModuleStyle,
    n: Neighbors,
    x0: i32,
    y0: i32,
    s: i32,
    color: Rgba<u8>,
) {
    match style {
        ModuleStyle::Square => {
            draw_filled_rect_mut(img, Rect::at(x0, y0).of_size(s as u32, s as u32), color);
        }
        ModuleStyle::GappedSquare => {
            let gap = (s / 10).max(1);
            let inner = (s - 2 * gap) as u32;
            draw_filled_rect_mut(img, Rect::at(x0 + gap, y0 + gap).of_size(inner, inner), color);
        }
        ModuleStyle::Circle => {
            let r = (s - 1) / 2;
            draw_filled_circle_mut(img, (x0 + s / 2, y0 + s / 2), r, color);
        }
        ModuleStyle::Rounded => draw_rounded(img, n, x0, y0, s, color),
        ModuleStyle::VerticalBars => draw_vertical_bar(img, n, x0, y0, s, color),
        ModuleStyle::HorizontalBars => draw_horizontal_bar(img, n, x0, y0, s, color),
    }
}

/// Full cell with quarter-circle corners wherever both orthogonal
/// neighbors touching that corner are light.
fn draw_rounded(img: &mut RgbaImage, n: Neighbors, x0: i32, y0: i32, s: i32, color: Rgba<u8>) {
    let r = (s - 1) / 2;

    // Cross of two bands covers everything except the four corner blocks.
    draw_filled_rect_mut(
        img,
        Rect::at(x0, y0 + r).of_size(s as u32, (s - 2 * r) as u32),
        color,
    );
    draw_filled_rect_mut(
        img,
        Rect::at(x0 + r, y0).of_size((s - 2 * r) as u32, s as u32),
        color,
    );

    // (circle center, rounded?, square corner origin)
    let corners = [
        ((x0 + r, y0 + r), !n.above && !n.left, (x0, y0)),
        ((x0 + s - 1 - r, y0 + r), !n.above && !n.right, (x0 + s - r, y0)),
        ((x0 + r, y0 + s - 1 - r), !n.below && !n.left, (x0, y0 + s - r)),
        (
            (x0 + s - 1 - r, y0 + s - 1 - r),
            !n.below && !n.right,
            (x0 + s - r, y0 + s - r),
        ),
    ];

    for (center, rounded, corner) in corners {
        if rounded {
            draw_filled_circle_mut(img, center, r, color);
        } else {
            draw_filled_rect_mut(
                img,
                Rect::at(corner.0, corner.1).of_size(r as u32, r as u32),
                color,
            );
        }
    }
}

/// Centered bar at 4/5 cell width with semicircular caps on exposed ends;
/// flush ends merge with vertically adjacent modules.
fn draw_vertical_bar(img: &mut RgbaImage, n: Neighbors, x0: i32, y0: i32, s: i32, color: Rgba<u8>) {
    let w = ((s * 4) / 5).max(1);
    let xo = (s - w) / 2;
    let r = (w - 1) / 2;

    let top = if n.above { y0 } else { y0 + r };
    let bottom = if n.below { y0 + s } else { y0 + s - r };
    draw_filled_rect_mut(
        img,
        Rect::at(x0 + xo, top).of_size(w as u32, (bottom - top) as u32),
        color,
    );

    if !n.above {
        draw_filled_circle_mut(img, (x0 + xo + r, y0 + r), r, color);
    }
    if !n.below {
        draw_filled_circle_mut(img, (x0 + xo + r, y0 + s - 1 - r), r, color);
    }
}

/// The transpose of [`draw_vertical_bar`].
fn draw_horizontal_bar(
    img: &mut RgbaImage,
    n: Neighbors,
    x0: i32,
    y0: i32,
    s: i32,
    color: Rgba<u8>,
) {
    let h = ((s * 4) / 5).max(1);
    let yo = (s - h) / 2;
    let r = (h - 1) / 2;

    let left = if n.left { x0 } else { x0 + r };
    let right = if n.right { x0 + s } else { x0 + s - r };
    draw_filled_rect_mut(
        img,
        Rect::at(left, y0 + yo).of_size((right - left) as u32, h as u32),
        color,
    );

    if !n.left {
        draw_filled_circle_mut(img, (x0 + r, y0 + yo + r), r, color);
    }
    if !n.right {
        draw_filled_circle_mut(img, (x0 + s - 1 - r, y0 + yo + r), r, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn solid() -> ColorMask {
        ColorMask::Solid { front: BLACK, back: WHITE }
    }

    /// 2x2 grid with a single dark module in the top-left corner.
    fn lone_module() -> Matrix {
        Matrix::new(2, vec![true, false, false, false])
    }

    /// 2x2 grid with a dark left column.
    fn dark_column() -> Matrix {
        Matrix::new(2, vec![true, false, true, false])
    }

    #[test]
    fn output_side_accounts_for_modules_border_and_box_size() {
        let matrix = crate::encode::encode("dims", crate::EcLevel::Medium).unwrap();
        for (box_size, border) in [(5, 1), (10, 4), (20, 10)] {
            let img = render(&matrix, ModuleStyle::Square, &solid(), box_size, border);
            let expected = (matrix.width() as u32 + 2 * border) * box_size;
            assert_eq!(img.dimensions(), (expected, expected));
        }
    }

    #[test]
    fn square_fills_the_whole_cell() {
        let img = render(&lone_module(), ModuleStyle::Square, &solid(), 10, 1);
        // Cell spans pixels 10..20 on both axes.
        assert_eq!(*img.get_pixel(10, 10), BLACK);
        assert_eq!(*img.get_pixel(19, 19), BLACK);
        assert_eq!(*img.get_pixel(9, 9), WHITE);
    }

    #[test]
    fn gapped_square_leaves_the_cell_edge_clear() {
        let img = render(&lone_module(), ModuleStyle::GappedSquare, &solid(), 10, 1);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
        assert_eq!(*img.get_pixel(15, 15), BLACK);
    }

    #[test]
    fn circle_clears_cell_corners() {
        let img = render(&lone_module(), ModuleStyle::Circle, &solid(), 10, 1);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
        assert_eq!(*img.get_pixel(15, 15), BLACK);
    }

    #[test]
    fn rounded_lone_module_clears_exposed_corners() {
        let img = render(&lone_module(), ModuleStyle::Rounded, &solid(), 10, 1);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
        assert_eq!(*img.get_pixel(15, 15), BLACK);
    }

    #[test]
    fn rounded_keeps_corners_square_toward_dark_neighbors() {
        let img = render(&dark_column(), ModuleStyle::Rounded, &solid(), 10, 1);
        // Corner between the two stacked modules stays filled.
        assert_eq!(*img.get_pixel(10, 19), BLACK);
        assert_eq!(*img.get_pixel(10, 20), BLACK);
    }

    #[test]
    fn vertical_bars_merge_stacked_modules() {
        let img = render(&dark_column(), ModuleStyle::VerticalBars, &solid(), 10, 1);
        // Bar is continuous across the cell boundary at y = 20.
        assert_eq!(*img.get_pixel(15, 19), BLACK);
        assert_eq!(*img.get_pixel(15, 20), BLACK);
        // Top-left of the upper cell is outside the capped bar.
        assert_eq!(*img.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn horizontal_bars_cap_exposed_ends() {
        let img = render(&lone_module(), ModuleStyle::HorizontalBars, &solid(), 10, 1);
        assert_eq!(*img.get_pixel(15, 15), BLACK);
        assert_eq!(*img.get_pixel(10, 10), WHITE);
    }

    #[test]
    fn rendering_is_deterministic() {
        let matrix = crate::encode::encode("determinism", crate::EcLevel::Medium).unwrap();
        let a = render(&matrix, ModuleStyle::Rounded, &solid(), 7, 2);
        let b = render(&matrix, ModuleStyle::Rounded, &solid(), 7, 2);
        assert_eq!(a.as_raw(), b.as_raw());
    }
}
