//! Rendering seam between the stroke engine and a 2D backend.

use crate::eraser::paint_color;
use crate::geometry::StrokeGeometry;
use crate::record::StrokeRecord;
use crate::types::Rgba;
use kurbo::Size;

/// A drawing target. Pixel work happens in the implementation.
pub trait Canvas {
    /// Drawable area in pixels.
    fn size(&self) -> Size;

    /// Fill the entire canvas with `color`.
    fn clear(&mut self, color: Rgba);

    /// Stroke `geometry` with round caps and joins.
    fn paint(&mut self, geometry: &StrokeGeometry, width: f64, color: Rgba);

    /// Fill the area enclosed by `geometry` (non-zero winding).
    fn fill(&mut self, geometry: &StrokeGeometry, color: Rgba);
}

/// Draw `records` in order over a blank `background`.
pub fn composite<'a, C, I>(canvas: &mut C, records: I, background: Rgba)
where
    C: Canvas + ?Sized,
    I: IntoIterator<Item = &'a StrokeRecord>,
{
    canvas.clear(background);
    for record in records {
        paint_record(canvas, record, background);
    }
}

/// Draw a single committed record.
pub fn paint_record<C: Canvas + ?Sized>(canvas: &mut C, record: &StrokeRecord, background: Rgba) {
    if !record.is_eraser() && !record.fill_color().is_transparent() {
        canvas.fill(record.geometry(), record.fill_color());
    }
    canvas.paint(
        record.geometry(),
        record.line_width(),
        paint_color(record, background),
    );
}
