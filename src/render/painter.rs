//! Thin drawing surface over a `vello_cpu` render context.
//!
//! Every drawing call in the crate goes through [`Painter`], so plotters, effects and the static
//! layer never touch the rasterizer directly and geometry stays in crate `kurbo` types.

use std::sync::Arc;

use crate::assets::decode::PremulImage;
use crate::foundation::core::{Affine, BezPath, Point, Rect, Rgba8};
use crate::foundation::error::{AudiogramError, AudiogramResult};

/// Drawing surface handed to per-frame renderers and static-layer delegates.
pub struct Painter<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
}

impl<'a> Painter<'a> {
    /// Wrap a render context. The caller owns flushing and readback.
    pub fn new(ctx: &'a mut vello_cpu::RenderContext) -> Self {
        Self { ctx }
    }

    /// Fill `path` with a solid color (nonzero winding).
    pub fn fill_path(&mut self, path: &BezPath, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_path(&bezpath_to_cpu(path));
    }

    /// Stroke `path` with a solid color.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(width.max(0.0)));
        self.ctx.stroke_path(&bezpath_to_cpu(path));
    }

    /// Fill an axis-aligned rectangle.
    pub fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// Stroke an axis-aligned rectangle outline.
    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: Rgba8) {
        self.reset_transforms();
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx
            .set_stroke(vello_cpu::kurbo::Stroke::new(width.max(0.0)));
        self.ctx.stroke_rect(&rect_to_cpu(rect));
    }

    /// Fill a disc.
    pub fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        use kurbo::Shape as _;
        let circle = kurbo::Circle::new(center, radius.max(0.0));
        self.fill_path(&circle.to_path(0.1), color);
    }

    /// Draw a prepared pixmap with its top-left corner at `origin`.
    pub fn draw_pixmap(&mut self, pixmap: &Arc<vello_cpu::Pixmap>, origin: Point, opacity: f32) {
        let (w, h) = (f64::from(pixmap.width()), f64::from(pixmap.height()));
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(pixmap.clone()),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.draw_paint(paint, Affine::translate(origin.to_vec2()), w, h, opacity);
    }

    /// Draw a premultiplied RGBA8 image with its top-left corner at `origin`.
    pub fn draw_image(
        &mut self,
        image: &PremulImage,
        origin: Point,
        opacity: f32,
    ) -> AudiogramResult<()> {
        let pixmap = Arc::new(premul_image_to_pixmap(image)?);
        self.draw_pixmap(&pixmap, origin, opacity);
        Ok(())
    }

    /// Fill a run of positioned glyphs from one font face.
    pub fn fill_glyphs(
        &mut self,
        font: &vello_cpu::peniko::FontData,
        font_size: f32,
        origin: Point,
        color: Rgba8,
        glyphs: impl Iterator<Item = vello_cpu::Glyph>,
    ) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx
            .set_transform(affine_to_cpu(Affine::translate(origin.to_vec2())));
        self.ctx.set_paint(to_cpu_color(color));
        self.ctx.glyph_run(font).font_size(font_size).fill_glyphs(glyphs);
    }

    fn draw_paint(&mut self, paint: vello_cpu::Image, transform: Affine, w: f64, h: f64, opacity: f32) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);
        let layered = opacity < 1.0;
        if layered {
            self.ctx.push_opacity_layer(opacity.clamp(0.0, 1.0));
        }
        self.ctx
            .fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
        if layered {
            self.ctx.pop_layer();
        }
    }

    fn reset_transforms(&mut self) {
        self.ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    }
}

/// Rasterize `draw` into a fresh transparent pixmap of `width x height`.
pub fn render_offscreen(
    width: u16,
    height: u16,
    draw: impl FnOnce(&mut Painter<'_>) -> AudiogramResult<()>,
) -> AudiogramResult<vello_cpu::Pixmap> {
    let mut ctx = vello_cpu::RenderContext::new(width, height);
    draw(&mut Painter::new(&mut ctx))?;
    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap)
}

/// Fill every pixel of `pixmap` with one premultiplied RGBA8 value.
pub fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, premul: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&premul);
    }
}

/// Copy a premultiplied image into a `vello_cpu` pixmap.
pub fn premul_image_to_pixmap(image: &PremulImage) -> AudiogramResult<vello_cpu::Pixmap> {
    let w: u16 = image
        .width
        .try_into()
        .map_err(|_| AudiogramError::resource("image width exceeds u16"))?;
    let h: u16 = image
        .height
        .try_into()
        .map_err(|_| AudiogramError::resource("image height exceeds u16"))?;
    if image.data.len() != image.width as usize * image.height as usize * 4 {
        return Err(AudiogramError::resource("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(image.width as usize * image.height as usize);
    for px in image.data.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

/// Copy a pixmap back into a premultiplied image.
pub fn pixmap_to_premul_image(pixmap: &vello_cpu::Pixmap) -> PremulImage {
    PremulImage {
        width: u32::from(pixmap.width()),
        height: u32::from(pixmap.height()),
        data: pixmap.data_as_u8_slice().to_vec(),
    }
}

fn to_cpu_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
