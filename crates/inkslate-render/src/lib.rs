//! Inkslate Render Library
//!
//! Software rasterization of stroke history into bitmaps.

mod bitmap;
mod raster;

pub use bitmap::{Bitmap, RenderError, RenderResult};
pub use raster::RasterCanvas;

use inkslate_core::{Canvas, DrawingSurface};

/// Flatten the surface's active strokes over its background color, at the
/// surface's current size.
pub fn render_to_bitmap(surface: &DrawingSurface) -> Bitmap {
    // set_size keeps both sides finite and within MAX_SURFACE_DIMENSION
    let size = surface.size();
    let mut canvas = RasterCanvas::new(size.width.ceil() as u32, size.height.ceil() as u32);
    surface.render_to(&mut canvas);
    log::debug!(
        "Rendered {} stroke(s) to {:?} bitmap",
        surface.active_records().len(),
        canvas.size()
    );
    canvas.into_bitmap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use inkslate_core::{Point, Rgba, Size, SurfaceConfig};

    fn surface(width: u32, height: u32) -> DrawingSurface {
        DrawingSurface::new(SurfaceConfig {
            width,
            height,
            line_width: 2.0,
            ..SurfaceConfig::default()
        })
        .unwrap()
    }

    fn draw(surface: &mut DrawingSurface, points: &[(f64, f64)]) {
        let (x, y) = points[0];
        surface.begin_stroke(Point::new(x, y));
        for &(x, y) in &points[1..] {
            surface.extend_stroke(Point::new(x, y)).unwrap();
        }
        surface.end_stroke().unwrap();
    }

    #[test]
    fn test_empty_surface_is_background() {
        let mut surface = surface(8, 6);
        let bg = Rgba::rgb(12, 34, 56);
        surface.set_background_color(bg);

        let bitmap = render_to_bitmap(&surface);
        assert_eq!(bitmap.width, 8);
        assert_eq!(bitmap.height, 6);
        assert!(bitmap.pixels().all(|p| p == bg));
    }

    #[test]
    fn test_stroke_is_drawn() {
        let mut surface = surface(20, 20);
        surface.set_color(Rgba::rgb(255, 0, 0));
        draw(&mut surface, &[(2.0, 10.0), (10.0, 10.0), (18.0, 10.0)]);

        let bitmap = render_to_bitmap(&surface);
        assert_eq!(bitmap.pixel(10, 9), Some(Rgba::rgb(255, 0, 0)));
        assert_eq!(bitmap.pixel(10, 2), Some(Rgba::WHITE));
    }

    #[test]
    fn test_single_point_draws_dot() {
        let mut surface = surface(10, 10);
        surface.set_line_width(4.0).unwrap();
        draw(&mut surface, &[(5.0, 5.0)]);

        let bitmap = render_to_bitmap(&surface);
        assert_eq!(bitmap.pixel(5, 5), Some(Rgba::BLACK));
        assert_eq!(bitmap.pixel(0, 0), Some(Rgba::WHITE));
    }

    #[test]
    fn test_eraser_undo_is_pixel_identical() {
        let mut surface = surface(32, 32);
        draw(&mut surface, &[(4.0, 4.0), (16.0, 16.0), (28.0, 4.0)]);
        draw(&mut surface, &[(4.0, 28.0), (28.0, 28.0)]);
        let before = render_to_bitmap(&surface);

        surface.set_eraser_mode(true);
        draw(&mut surface, &[(0.0, 16.0), (32.0, 16.0), (16.0, 30.0)]);
        surface.set_eraser_mode(false);
        let erased = render_to_bitmap(&surface);
        assert_ne!(before, erased);

        surface.undo();
        assert_eq!(render_to_bitmap(&surface), before);
    }

    #[test]
    fn test_eraser_paints_background() {
        let mut surface = surface(20, 20);
        draw(&mut surface, &[(0.0, 10.0), (20.0, 10.0)]);
        surface.set_eraser_mode(true);
        draw(&mut surface, &[(10.0, 0.0), (10.0, 20.0)]);

        let bitmap = render_to_bitmap(&surface);
        assert_eq!(bitmap.pixel(10, 10), Some(Rgba::WHITE));
        assert_eq!(bitmap.pixel(2, 10), Some(Rgba::BLACK));
    }

    #[test]
    fn test_bitmap_follows_surface_size() {
        let mut surface = surface(4, 4);
        surface.set_size(Size::new(12.0, 7.5)).unwrap();
        let bitmap = render_to_bitmap(&surface);
        assert_eq!((bitmap.width, bitmap.height), (12, 8));
    }

    #[test]
    fn test_rejected_size_keeps_previous_bitmap_size() {
        let mut surface = surface(6, 5);
        assert!(surface.set_size(Size::new(f64::INFINITY, 10.0)).is_err());
        assert!(surface.set_size(Size::new(1e12, 1e12)).is_err());

        let bitmap = render_to_bitmap(&surface);
        assert_eq!((bitmap.width, bitmap.height), (6, 5));
    }

    #[test]
    fn test_background_change_recolors_erased_pixels() {
        let mut surface = surface(20, 20);
        draw(&mut surface, &[(0.0, 10.0), (20.0, 10.0)]);
        surface.set_eraser_mode(true);
        draw(&mut surface, &[(10.0, 0.0), (10.0, 20.0)]);

        let dark = Rgba::rgb(20, 20, 40);
        surface.set_background_color(dark);
        let bitmap = render_to_bitmap(&surface);
        assert_eq!(bitmap.pixel(10, 10), Some(dark));
        assert_eq!(bitmap.pixel(10, 2), Some(dark));
        assert_eq!(bitmap.pixel(2, 10), Some(Rgba::BLACK));
    }
}
