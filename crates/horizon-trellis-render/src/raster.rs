//! Offscreen bitmap with a software rasterizer.
//!
//! A [`Bitmap`] holds the canvas pixels as non-premultiplied RGBA and a
//! display list of every primitive drawn into it since the last clear. The
//! display list is what a blit-free consumer (or a test) inspects; the pixels
//! are what gets presented on screen.
//!
//! Coverage is sampled at pixel centers without anti-aliasing. Each primitive
//! builds a coverage mask first and blends it once, so overlapping triangles
//! from one tessellation never double-blend.

use glam::Affine2;
use horizon_trellis_core::{PointF, RectF, SizeI};
use image::{Rgba, RgbaImage};
use lyon::path::Path as LyonPath;
use tracing::debug;

use crate::path::{
    DEFAULT_TOLERANCE, Path, PathCommand, TessellatedPath, clip_segment, dash_path,
    is_finite_path, tessellate_stroke, to_lyon_path,
};
use crate::paint::Stroke;
use crate::types::{Color, Font};

/// One primitive recorded in a bitmap's display list.
///
/// Points are in device space; rectangles are in user space with the
/// transform they were drawn under.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A single straight line.
    Line {
        from: PointF,
        to: PointF,
        color: Color,
        width: f32,
    },
    /// A filled path.
    FillPath { path: Path, color: Color },
    /// A stroked path.
    StrokePath { path: Path, stroke: Stroke },
    /// A filled rectangle.
    FillRect {
        rect: RectF,
        transform: Affine2,
        color: Color,
    },
    /// A stroked rectangle outline.
    StrokeRect {
        rect: RectF,
        transform: Affine2,
        stroke: Stroke,
    },
    /// A rectangle reset to the background.
    ClearRect { rect: RectF, transform: Affine2 },
    /// Text anchored at its baseline origin.
    Text {
        text: String,
        origin: PointF,
        font: Font,
        color: Color,
    },
    /// An image drawn with its top-left corner at `origin`.
    Image {
        origin: PointF,
        width: u32,
        height: u32,
    },
}

/// Pixels plus display list for one canvas.
#[derive(Debug, Clone)]
pub struct Bitmap {
    pixels: RgbaImage,
    commands: Vec<DrawCommand>,
    background: Color,
}

impl Bitmap {
    /// Allocate a bitmap filled with `background`.
    pub fn new(size: SizeI, background: Color) -> Self {
        let width = size.width.max(0) as u32;
        let height = size.height.max(0) as u32;
        let pixels = RgbaImage::from_pixel(width, height, Rgba(background.to_rgba8()));
        Self {
            pixels,
            commands: Vec::new(),
            background,
        }
    }

    /// Size in pixels.
    pub fn size(&self) -> SizeI {
        SizeI::new(self.pixels.width() as i32, self.pixels.height() as i32)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// The background the bitmap was cleared to.
    pub fn background(&self) -> Color {
        self.background
    }

    /// The pixel buffer.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Read one pixel as non-premultiplied RGBA.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Primitives drawn since the last clear, in draw order.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Reset every pixel to the background and empty the display list.
    pub fn clear(&mut self) {
        let fill = Rgba(self.background.to_rgba8());
        for pixel in self.pixels.pixels_mut() {
            *pixel = fill;
        }
        self.commands.clear();
    }

    /// Append to the display list without touching pixels.
    pub fn record(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    /// Draw a straight line and record it.
    ///
    /// Only the part of the line near the bitmap is rasterized; a line with
    /// a non-finite end is recorded but not drawn.
    pub fn draw_line(&mut self, from: PointF, to: PointF, color: Color, width: f32) {
        if width > 1.5 {
            if let Some((a, b)) = clip_segment(from, to, self.bounds(width + 1.0)) {
                let mut path = Path::new();
                path.push(PathCommand::MoveTo(a));
                path.push(PathCommand::LineTo(b));
                let mesh = tessellate_stroke(
                    &to_lyon_path(&path),
                    &Stroke::new(color, width),
                    DEFAULT_TOLERANCE,
                );
                self.cover_mesh(&mesh, color);
            }
        } else {
            self.plot_line(from, to, color);
        }
        self.record(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    /// Stroke a lyon path, applying the stroke's dash pattern. The caller
    /// records what it represents.
    pub fn stroke_path(&mut self, path: &LyonPath, stroke: &Stroke, tolerance: f32) {
        if !is_finite_path(path) {
            debug!(
                target: "horizon_trellis_render::backend",
                "path has non-finite points; stroke skipped"
            );
            return;
        }
        let mesh = if stroke.dash.is_solid() {
            tessellate_stroke(path, stroke, tolerance)
        } else {
            let dashed = dash_path(path, &stroke.dash, self.stroke_bounds(stroke), tolerance);
            tessellate_stroke(&dashed, stroke, tolerance)
        };
        self.cover_mesh(&mesh, stroke.color);
    }

    /// Device rectangle outside which no part of a stroke can land on a pixel.
    pub fn stroke_bounds(&self, stroke: &Stroke) -> RectF {
        self.bounds(stroke.width * stroke.miter_limit.max(1.0) + 1.0)
    }

    /// Blend a tessellated mesh. The caller records what it represents.
    pub fn cover_mesh(&mut self, mesh: &TessellatedPath, color: Color) {
        let mut mask = self.mask();
        for [a, b, c] in mesh.triangles() {
            mask.cover_triangle(
                PointF::new(a[0], a[1]),
                PointF::new(b[0], b[1]),
                PointF::new(c[0], c[1]),
            );
        }
        self.blend_mask(&mask, color);
    }

    /// Fill a rectangle under a transform and record it.
    pub fn fill_rect(&mut self, rect: RectF, transform: Affine2, color: Color) {
        let mask = self.quad_mask(rect, transform);
        self.blend_mask(&mask, color);
        self.record(DrawCommand::FillRect {
            rect,
            transform,
            color,
        });
    }

    /// Stroke a rectangle outline under a transform and record it.
    pub fn stroke_rect(&mut self, rect: RectF, transform: Affine2, stroke: Stroke) {
        let mut path = Path::new();
        let corners = [
            rect.top_left(),
            rect.top_right(),
            rect.bottom_right(),
            rect.bottom_left(),
        ];
        for (i, p) in corners.into_iter().enumerate() {
            let d = transform.transform_point2(glam::Vec2::new(p.x, p.y));
            let d = PointF::new(d.x, d.y);
            path.push(if i == 0 {
                PathCommand::MoveTo(d)
            } else {
                PathCommand::LineTo(d)
            });
        }
        path.push(PathCommand::Close);

        self.stroke_path(&to_lyon_path(&path), &stroke, DEFAULT_TOLERANCE);
        self.record(DrawCommand::StrokeRect {
            rect,
            transform,
            stroke,
        });
    }

    /// Reset a rectangle to the background and record it.
    pub fn clear_rect(&mut self, rect: RectF, transform: Affine2) {
        let mask = self.quad_mask(rect, transform);
        let fill = Rgba(self.background.to_rgba8());
        for (index, covered) in mask.covered.iter().enumerate() {
            if *covered {
                let (x, y) = mask.position(index);
                self.pixels.put_pixel(x, y, fill);
            }
        }
        self.record(DrawCommand::ClearRect { rect, transform });
    }

    /// Copy an image with its top-left corner at `origin`, blending by alpha.
    pub fn draw_image(&mut self, image: &RgbaImage, origin: PointF) {
        let left = origin.x.round() as i64;
        let top = origin.y.round() as i64;
        for (x, y, pixel) in image.enumerate_pixels() {
            let dx = left + x as i64;
            let dy = top + y as i64;
            if dx < 0 || dy < 0 || dx >= self.width() as i64 || dy >= self.height() as i64 {
                continue;
            }
            let [r, g, b, a] = pixel.0;
            self.blend_pixel(dx as u32, dy as u32, Color::from_rgba8(r, g, b, a));
        }
        self.record(DrawCommand::Image {
            origin,
            width: image.width(),
            height: image.height(),
        });
    }

    fn plot_line(&mut self, from: PointF, to: PointF, color: Color) {
        let Some((from, to)) = clip_segment(from, to, self.bounds(0.0)) else {
            return;
        };
        let (mut x0, mut y0) = (from.x.floor() as i64, from.y.floor() as i64);
        let (x1, y1) = (to.x.floor() as i64, to.y.floor() as i64);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut mask = self.mask();
        loop {
            mask.set(x0, y0);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
        self.blend_mask(&mask, color);
    }

    fn quad_mask(&self, rect: RectF, transform: Affine2) -> Mask {
        let corners = [
            rect.top_left(),
            rect.top_right(),
            rect.bottom_right(),
            rect.bottom_left(),
        ]
        .map(|p| {
            let d = transform.transform_point2(glam::Vec2::new(p.x, p.y));
            PointF::new(d.x, d.y)
        });
        let mut mask = self.mask();
        mask.cover_triangle(corners[0], corners[1], corners[2]);
        mask.cover_triangle(corners[0], corners[2], corners[3]);
        mask
    }

    fn mask(&self) -> Mask {
        Mask::new(self.width(), self.height())
    }

    fn bounds(&self, margin: f32) -> RectF {
        RectF::new(
            -margin,
            -margin,
            self.width() as f32 + 2.0 * margin,
            self.height() as f32 + 2.0 * margin,
        )
    }

    fn blend_mask(&mut self, mask: &Mask, color: Color) {
        for (index, covered) in mask.covered.iter().enumerate() {
            if *covered {
                let (x, y) = mask.position(index);
                self.blend_pixel(x, y, color);
            }
        }
    }

    /// Source-over blend of a premultiplied color.
    fn blend_pixel(&mut self, x: u32, y: u32, src: Color) {
        if src.is_opaque() {
            self.pixels.put_pixel(x, y, Rgba(src.to_rgba8()));
            return;
        }
        let [r, g, b, a] = self.pixels.get_pixel(x, y).0;
        let dst = Color::from_rgba8(r, g, b, a);
        let inv = 1.0 - src.a;
        let out = Color::new(
            src.r + dst.r * inv,
            src.g + dst.g * inv,
            src.b + dst.b * inv,
            src.a + dst.a * inv,
        );
        self.pixels.put_pixel(x, y, Rgba(out.to_rgba8()));
    }
}

/// Per-pixel coverage for one primitive.
struct Mask {
    width: u32,
    height: u32,
    covered: Vec<bool>,
}

impl Mask {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            covered: vec![false; width as usize * height as usize],
        }
    }

    fn position(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        (index % self.width, index / self.width)
    }

    fn set(&mut self, x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        self.covered[y as usize * self.width as usize + x as usize] = true;
    }

    /// Mark pixels whose centers fall inside the triangle.
    fn cover_triangle(&mut self, a: PointF, b: PointF, c: PointF) {
        let edge = |p: PointF, q: PointF, x: f32, y: f32| (q.x - p.x) * (y - p.y) - (q.y - p.y) * (x - p.x);
        let area = edge(a, b, c.x, c.y);
        if area == 0.0 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
        let max_x = (a.x.max(b.x).max(c.x).ceil() as i64).min(self.width as i64 - 1);
        let max_y = (a.y.max(b.y).max(c.y).ceil() as i64).min(self.height as i64 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let (cx, cy) = (x as f32 + 0.5, y as f32 + 0.5);
                let w0 = edge(b, c, cx, cy);
                let w1 = edge(c, a, cx, cy);
                let w2 = edge(a, b, cx, cy);
                let inside = if area > 0.0 {
                    w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0
                } else {
                    w0 <= 0.0 && w1 <= 0.0 && w2 <= 0.0
                };
                if inside {
                    self.set(x, y);
                }
            }
        }
    }
}
