//! CPU canvas backed by an RGBA8 pixel buffer.

use crate::bitmap::Bitmap;
use image::{GrayImage, Rgba as Pixel, RgbaImage};
use inkslate_core::{Canvas, Rgba, StrokeGeometry};
use kurbo::{PathEl, Point, Rect, Size, Vec2};

/// Maximum deviation when flattening curves into line segments.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Software canvas. Strokes are stamped as round-capped capsules along the
/// flattened path; pixels are sampled at their centers without antialiasing.
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Transparent canvas of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Hand the pixels over as a [`Bitmap`].
    pub fn into_bitmap(self) -> Bitmap {
        let (width, height) = self.image.dimensions();
        Bitmap {
            rgba_data: self.image.into_raw(),
            width,
            height,
        }
    }

    /// Pixel index range covered by `rect`, clipped to the canvas.
    fn pixel_span(&self, rect: Rect) -> Option<(u32, u32, u32, u32)> {
        let x0 = rect.x0.floor().max(0.0);
        let y0 = rect.y0.floor().max(0.0);
        let x1 = rect.x1.ceil().min(f64::from(self.width()));
        let y1 = rect.y1.ceil().min(f64::from(self.height()));
        (x0 < x1 && y0 < y1).then(|| (x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl Canvas for RasterCanvas {
    fn size(&self) -> Size {
        Size::new(f64::from(self.width()), f64::from(self.height()))
    }

    fn clear(&mut self, color: Rgba) {
        let pixel = Pixel([color.r, color.g, color.b, color.a]);
        for px in self.image.pixels_mut() {
            *px = pixel;
        }
    }

    fn paint(&mut self, geometry: &StrokeGeometry, width: f64, color: Rgba) {
        if color.is_transparent() || width <= 0.0 {
            return;
        }
        let segments = flatten_segments(geometry);
        let Some((first, _)) = segments.first() else {
            return;
        };
        let radius = width / 2.0;
        let bounds = segments
            .iter()
            .fold(Rect::from_points(*first, *first), |acc, (a, b)| {
                acc.union_pt(*a).union_pt(*b)
            })
            .inflate(radius, radius);
        let Some((ox, oy, ox1, oy1)) = self.pixel_span(bounds) else {
            return;
        };

        // Each pixel is blended at most once so overlapping segments of a
        // translucent stroke do not darken at the joins.
        let mut stamped = GrayImage::new(ox1 - ox, oy1 - oy);
        for &(a, b) in &segments {
            let Some((x0, y0, x1, y1)) = self.pixel_span(Rect::from_points(a, b).inflate(radius, radius))
            else {
                continue;
            };
            for y in y0..y1 {
                for x in x0..x1 {
                    let mark = stamped.get_pixel_mut(x - ox, y - oy);
                    if mark.0[0] != 0 {
                        continue;
                    }
                    let center = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                    if distance_to_segment(center, a, b) <= radius {
                        mark.0[0] = 255;
                        blend(self.image.get_pixel_mut(x, y), color);
                    }
                }
            }
        }
    }

    fn fill(&mut self, geometry: &StrokeGeometry, color: Rgba) {
        if color.is_transparent() || geometry.segment_count() == 0 {
            return;
        }
        let mut edges = flatten_segments(geometry);
        // filled as if closed
        if let (Some(start), Some(&(_, end))) = (geometry.start_point(), edges.last()) {
            if start != end {
                edges.push((end, start));
            }
        }
        let Some((x0, y0, x1, y1)) = self.pixel_span(geometry.bounds()) else {
            return;
        };

        let mut crossings: Vec<(f64, i32)> = Vec::new();
        for y in y0..y1 {
            let cy = f64::from(y) + 0.5;
            crossings.clear();
            for &(a, b) in &edges {
                if (a.y <= cy) != (b.y <= cy) {
                    let x = a.x + (cy - a.y) / (b.y - a.y) * (b.x - a.x);
                    crossings.push((x, if b.y > a.y { 1 } else { -1 }));
                }
            }
            crossings.sort_by(|p, q| p.0.total_cmp(&q.0));

            let mut winding = 0;
            for pair in crossings.windows(2) {
                winding += pair[0].1;
                if winding == 0 {
                    continue;
                }
                // pixel centers inside [left, right)
                let from = (pair[0].0 - 0.5).ceil().max(f64::from(x0)) as u32;
                let to = (pair[1].0 - 0.5).ceil().min(f64::from(x1)).max(f64::from(from)) as u32;
                for x in from..to {
                    blend(self.image.get_pixel_mut(x, y), color);
                }
            }
        }
    }
}

/// Line segments of the flattened path.
fn flatten_segments(geometry: &StrokeGeometry) -> Vec<(Point, Point)> {
    let mut segments = Vec::new();
    let mut start = None;
    let mut last = None;
    kurbo::flatten(geometry.path().iter(), FLATTEN_TOLERANCE, |el| match el {
        PathEl::MoveTo(p) => {
            start = Some(p);
            last = Some(p);
        }
        PathEl::LineTo(p) => {
            if let Some(from) = last {
                segments.push((from, p));
            }
            last = Some(p);
        }
        PathEl::ClosePath => {
            if let (Some(from), Some(to)) = (last, start) {
                segments.push((from, to));
            }
            last = start;
        }
        // flatten only emits the three variants above
        PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
    });
    segments
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let ab: Vec2 = b - a;
    let len_sq = ab.hypot2();
    if len_sq < f64::EPSILON {
        return (point - a).hypot();
    }
    let t = ((point - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (point - (a + ab * t)).hypot()
}

/// Source-over blend of a straight-alpha color.
fn blend(dst: &mut Pixel<u8>, src: Rgba) {
    if src.a == 255 {
        *dst = Pixel([src.r, src.g, src.b, 255]);
        return;
    }
    let sa = u32::from(src.a);
    let inv = 255 - sa;
    let mix = |s: u8, d: u8| ((u32::from(s) * sa + u32::from(d) * inv + 127) / 255) as u8;
    let Pixel([r, g, b, a]) = *dst;
    *dst = Pixel([
        mix(src.r, r),
        mix(src.g, g),
        mix(src.b, b),
        (sa + (u32::from(a) * inv + 127) / 255) as u8,
    ]);
}
