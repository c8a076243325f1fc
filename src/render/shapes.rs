use kurbo::Shape as _;

use crate::assets::resolver::ResourceResolver;
use crate::assets::svg_raster::{parse_svg, rasterize_svg};
use crate::foundation::core::{BezPath, Point, Rect};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::render::painter::Painter;
use crate::scene::model::{ShapeLayer, ShapeType};

/// Draws shape layers onto the static layer.
pub trait ShapeRenderer {
    /// Box, circle or line.
    fn draw_basic_shape(&self, shape: &ShapeLayer, painter: &mut Painter<'_>) -> AudiogramResult<()>;

    /// SVG-backed shape.
    fn draw_vector_shape(
        &self,
        shape: &ShapeLayer,
        resolver: &dyn ResourceResolver,
        painter: &mut Painter<'_>,
    ) -> AudiogramResult<()>;
}

/// Primitive shapes through the painter, SVG shapes through `resvg`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultShapeRenderer;

impl ShapeRenderer for DefaultShapeRenderer {
    fn draw_basic_shape(&self, shape: &ShapeLayer, painter: &mut Painter<'_>) -> AudiogramResult<()> {
        let color = shape.fill.with_opacity_percent(shape.opacity);
        let bounds = Rect::new(
            shape.pos_x,
            shape.pos_y,
            shape.pos_x + shape.width,
            shape.pos_y + shape.height,
        );
        match shape.shape_type {
            ShapeType::Box => painter.fill_rect(bounds, color),
            ShapeType::Circle => {
                let ellipse = kurbo::Ellipse::from_rect(bounds);
                painter.fill_path(&ellipse.to_path(0.1), color);
            }
            ShapeType::Line => {
                let y = bounds.center().y;
                let mut line = BezPath::new();
                line.move_to(Point::new(bounds.x0, y));
                line.line_to(Point::new(bounds.x1, y));
                let width = if shape.stroke_width > 0.0 {
                    shape.stroke_width
                } else {
                    shape.height.max(1.0)
                };
                painter.stroke_path(&line, width, color);
            }
            ShapeType::Svg => {
                return Err(AudiogramError::config(
                    "svg shapes are drawn by draw_vector_shape",
                ));
            }
        }
        Ok(())
    }

    fn draw_vector_shape(
        &self,
        shape: &ShapeLayer,
        resolver: &dyn ResourceResolver,
        painter: &mut Painter<'_>,
    ) -> AudiogramResult<()> {
        let url = shape
            .url
            .as_deref()
            .ok_or_else(|| AudiogramError::config("svg shapes require a url"))?;
        let tree = parse_svg(&resolver.resolve(url)?)?;
        let raster = rasterize_svg(&tree, shape.width, shape.height)?;
        painter.draw_image(
            &raster,
            Point::new(shape.pos_x, shape.pos_y),
            (shape.opacity / 100.0) as f32,
        )
    }
}

/// Route a shape to the delegate method its type needs.
pub fn draw_shape(
    renderer: &dyn ShapeRenderer,
    shape: &ShapeLayer,
    resolver: &dyn ResourceResolver,
    painter: &mut Painter<'_>,
) -> AudiogramResult<()> {
    if shape.shape_type == ShapeType::Svg {
        renderer.draw_vector_shape(shape, resolver, painter)
    } else {
        renderer.draw_basic_shape(shape, painter)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/shapes.rs"]
mod tests;
