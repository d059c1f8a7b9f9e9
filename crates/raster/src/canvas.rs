//! Drawing surface over an `image::RgbImage`

use image::imageops::{self, FilterType};
use image::{Rgb, RgbImage};
use imageproc::drawing::{
    draw_filled_circle_mut, draw_filled_ellipse_mut, draw_hollow_circle_mut,
    draw_hollow_ellipse_mut, draw_line_segment_mut, draw_polygon_mut,
};
use imageproc::point::Point;

/// An RGB drawing surface at the upscaled working resolution.
pub struct Canvas {
    img: RgbImage,
}

impl Canvas {
    /// Creates a surface of `width` x `height` pixels filled with
    /// `background`.
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, background),
        }
    }

    pub fn width(&self) -> u32 {
        self.img.width()
    }

    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Fills a polygon. Consecutive duplicate vertices are collapsed first;
    /// anything with fewer than 3 distinct vertices is skipped because the
    /// underlying rasterizer rejects degenerate paths.
    pub fn fill_polygon(&mut self, vertices: &[(i32, i32)], fill: Rgb<u8>) {
        let points = open_path(vertices);
        if points.len() < 3 {
            return;
        }
        draw_polygon_mut(&mut self.img, &points, fill);
    }

    /// Strokes a closed polygon outline with the given line width.
    pub fn stroke_polygon(&mut self, vertices: &[(i32, i32)], color: Rgb<u8>, width: u32) {
        let n = vertices.len();
        if n < 2 {
            return;
        }
        for i in 0..n {
            let a = vertices[i];
            let b = vertices[(i + 1) % n];
            self.line(a, b, color, width);
        }
    }

    /// Filled polygon with a contrasting outline on top.
    pub fn fill_outlined_polygon(
        &mut self,
        vertices: &[(i32, i32)],
        fill: Rgb<u8>,
        outline: Rgb<u8>,
        outline_width: u32,
    ) {
        self.fill_polygon(vertices, fill);
        self.stroke_polygon(vertices, outline, outline_width);
    }

    /// Line segment from `a` to `b`. Widths above one pixel are drawn as a
    /// filled quad perpendicular to the segment direction.
    pub fn line(&mut self, a: (i32, i32), b: (i32, i32), color: Rgb<u8>, width: u32) {
        if width <= 1 || a == b {
            draw_line_segment_mut(
                &mut self.img,
                (a.0 as f32, a.1 as f32),
                (b.0 as f32, b.1 as f32),
                color,
            );
            return;
        }
        let dx = f64::from(b.0 - a.0);
        let dy = f64::from(b.1 - a.1);
        let len = (dx * dx + dy * dy).sqrt();
        let half = f64::from(width) / 2.0;
        // Unit normal scaled to half the stroke width.
        let nx = -dy / len * half;
        let ny = dx / len * half;
        let quad = [
            (
                (f64::from(a.0) + nx).round() as i32,
                (f64::from(a.1) + ny).round() as i32,
            ),
            (
                (f64::from(b.0) + nx).round() as i32,
                (f64::from(b.1) + ny).round() as i32,
            ),
            (
                (f64::from(b.0) - nx).round() as i32,
                (f64::from(b.1) - ny).round() as i32,
            ),
            (
                (f64::from(a.0) - nx).round() as i32,
                (f64::from(a.1) - ny).round() as i32,
            ),
        ];
        let points = open_path(&quad);
        if points.len() < 3 {
            draw_line_segment_mut(
                &mut self.img,
                (a.0 as f32, a.1 as f32),
                (b.0 as f32, b.1 as f32),
                color,
            );
        } else {
            draw_polygon_mut(&mut self.img, &points, color);
        }
    }

    /// Filled axis-aligned ellipse with semi-axes `rx`, `ry`.
    pub fn fill_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, fill: Rgb<u8>) {
        if rx <= 0 || ry <= 0 {
            return;
        }
        draw_filled_ellipse_mut(&mut self.img, (cx, cy), rx, ry, fill);
    }

    /// Hollow ellipse outline, thickened by drawing concentric rings.
    pub fn stroke_ellipse(&mut self, cx: i32, cy: i32, rx: i32, ry: i32, color: Rgb<u8>, width: u32) {
        if rx <= 0 || ry <= 0 {
            return;
        }
        for w in 0..width.max(1) as i32 {
            let (erx, ery) = ((rx - w).max(1), (ry - w).max(1));
            draw_hollow_ellipse_mut(&mut self.img, (cx, cy), erx, ery, color);
        }
    }

    pub fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, fill: Rgb<u8>) {
        if radius <= 0 {
            return;
        }
        draw_filled_circle_mut(&mut self.img, (cx, cy), radius, fill);
    }

    pub fn stroke_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Rgb<u8>, width: u32) {
        if radius <= 0 {
            return;
        }
        for w in 0..width.max(1) as i32 {
            let r = (radius - w).max(1);
            draw_hollow_circle_mut(&mut self.img, (cx, cy), r, color);
        }
    }

    /// Shaded fill over a bounding region: every pixel in
    /// `[min_x..=max_x] x [min_y..=max_y]` for which `inside` holds gets the
    /// color `color_at` produces for it. Shape gradients (radial sphere
    /// shading, cone side shading, torus rim shading) are built on this.
    pub fn fill_shaded<P, F>(
        &mut self,
        (min_x, min_y, max_x, max_y): (i32, i32, i32, i32),
        inside: P,
        color_at: F,
    ) where
        P: Fn(i32, i32) -> bool,
        F: Fn(i32, i32) -> Rgb<u8>,
    {
        let x0 = min_x.max(0);
        let y0 = min_y.max(0);
        let x1 = max_x.min(self.img.width() as i32 - 1);
        let y1 = max_y.min(self.img.height() as i32 - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                if inside(x, y) {
                    self.img.put_pixel(x as u32, y as u32, color_at(x, y));
                }
            }
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb<u8>> {
        if x < self.img.width() && y < self.img.height() {
            Some(*self.img.get_pixel(x, y))
        } else {
            None
        }
    }

    /// Downsamples to `width` x `height` with Lanczos3 and consumes the
    /// surface.
    pub fn into_final(self, width: u32, height: u32) -> RgbImage {
        if self.img.width() == width && self.img.height() == height {
            return self.img;
        }
        imageops::resize(&self.img, width, height, FilterType::Lanczos3)
    }

    pub fn into_image(self) -> RgbImage {
        self.img
    }
}

/// Collapses consecutive duplicates and drops a closing vertex equal to the
/// first, producing the open path form the rasterizer expects.
fn open_path(vertices: &[(i32, i32)]) -> Vec<Point<i32>> {
    let mut points: Vec<Point<i32>> = Vec::with_capacity(vertices.len());
    for &(x, y) in vertices {
        let p = Point::new(x, y);
        if points.last() != Some(&p) {
            points.push(p);
        }
    }
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}
