//! The background composite built once per job: images, then shapes, then texts, each group in
//! z-order.

use std::sync::Arc;

use crate::assets::decode::{PremulImage, decode_image};
use crate::assets::resolver::ResourceResolver;
use crate::effects::{blur, image_fx};
use crate::foundation::core::{Canvas, Point, Rect};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::render::painter::{Painter, render_offscreen};
use crate::render::shapes::{ShapeRenderer, draw_shape};
use crate::render::text::TextRenderer;
use crate::scene::model::{
    FilterType, ImageAlign, ImageEffect, ImageLayer, MaskType, SceneDescription,
};

/// Collaborators used while building the static layer.
pub struct StaticLayerDeps<'a> {
    pub resolver: &'a dyn ResourceResolver,
    pub shapes: &'a dyn ShapeRenderer,
    pub text: &'a mut dyn TextRenderer,
    /// Noise source for the jitter effect.
    pub rng: &'a mut fastrand::Rng,
}

/// Stable z-order: ascending `z`, ties keep declaration order.
pub fn z_ordered<T>(items: &[T], z: impl Fn(&T) -> i32) -> Vec<&T> {
    let mut sorted: Vec<&T> = items.iter().collect();
    sorted.sort_by_key(|item| z(item));
    sorted
}

/// Left edge of an image of `image_width` aligned on a canvas of `canvas_width`.
pub fn aligned_x(align: ImageAlign, pos_x: f64, canvas_width: f64, image_width: f64) -> f64 {
    let free = canvas_width - image_width;
    match align {
        ImageAlign::None => pos_x,
        ImageAlign::Center => free / 2.0,
        ImageAlign::Right => free * 3.0 / 4.0,
        ImageAlign::Left => free / 4.0,
    }
}

/// Run the per-image pipeline: decode, resize, effect, filter, align, mask, rotate.
/// Returns the processed image and its top-left position on the canvas.
pub fn prepare_image(
    layer: &ImageLayer,
    canvas: Canvas,
    resolver: &dyn ResourceResolver,
    rng: &mut fastrand::Rng,
) -> AudiogramResult<(PremulImage, Point)> {
    let decoded = decode_image(&resolver.resolve(&layer.url)?)?;
    let mut img = image_fx::resize(&decoded, layer.width, layer.height)?;

    match layer.image_effect {
        ImageEffect::None => {}
        ImageEffect::Blur => {
            img.data = blur::blur_radius(&img.data, img.width, img.height, layer.blur_radius)?;
        }
        ImageEffect::Monochrome => image_fx::grayscale(&mut img),
        ImageEffect::Jitter => image_fx::jitter(&mut img, rng),
    }

    if layer.filter == FilterType::Screen {
        let fill = layer
            .filter_fill
            .ok_or_else(|| AudiogramError::config("screen filter requires filterFill"))?;
        image_fx::screen(&mut img, fill);
    }

    let x = aligned_x(
        layer.align,
        layer.pos_x,
        f64::from(canvas.width),
        f64::from(img.width),
    );

    match layer.mask {
        MaskType::None => {}
        MaskType::Circle => image_fx::mask_circle(&mut img),
        MaskType::Square => image_fx::mask_square(&mut img),
    }

    if let Some(deg) = layer.rotation_degrees()? {
        img = image_fx::rotate(&img, deg);
    }

    Ok((img, Point::new(x, layer.pos_y)))
}

fn draw_image_layer(
    layer: &ImageLayer,
    canvas: Canvas,
    deps: &mut StaticLayerDeps<'_>,
    painter: &mut Painter<'_>,
) -> AudiogramResult<()> {
    let (img, origin) = prepare_image(layer, canvas, deps.resolver, deps.rng)?;
    painter.draw_image(&img, origin, (layer.opacity / 100.0) as f32)?;

    if layer.mask != MaskType::Circle
        && let (Some(width), Some(color)) = (layer.frame.stroke_width(), layer.frame_color)
    {
        let bounds = Rect::new(
            origin.x,
            origin.y,
            origin.x + f64::from(img.width),
            origin.y + f64::from(img.height),
        );
        painter.stroke_rect(bounds, width, color);
    }
    Ok(())
}

/// Composite the static layer for `scene`.
#[tracing::instrument(skip_all, fields(
    images = scene.images.len(),
    shapes = scene.shapes.len(),
    texts = scene.texts.len(),
))]
pub fn build_static_layer(
    scene: &SceneDescription,
    mut deps: StaticLayerDeps<'_>,
) -> AudiogramResult<Arc<vello_cpu::Pixmap>> {
    let canvas = scene.video;
    let (w, h) = canvas.size_u16()?;

    let pixmap = render_offscreen(w, h, |painter| {
        for (n, layer) in z_ordered(&scene.images, |i| i.z_index).into_iter().enumerate() {
            draw_image_layer(layer, canvas, &mut deps, painter).map_err(|e| {
                tracing::debug!(index = n, url = %layer.url, "image layer failed");
                e
            })?;
        }
        for shape in z_ordered(&scene.shapes, |s| s.z_index) {
            draw_shape(deps.shapes, shape, deps.resolver, painter)?;
        }
        for text in z_ordered(&scene.texts, |t| t.z_index) {
            deps.text.draw_text(text, painter)?;
        }
        Ok(())
    })?;

    tracing::debug!(width = w, height = h, "static layer ready");
    Ok(Arc::new(pixmap))
}

#[cfg(test)]
#[path = "../../tests/unit/render/static_layer.rs"]
mod tests;
