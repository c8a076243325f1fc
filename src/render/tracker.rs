use crate::foundation::core::{BezPath, Point, Rect};
use crate::render::painter::Painter;
use crate::scene::model::{TrackerLayer, TrackerType};

/// Height of the horizontal bar.
pub const BAR_HEIGHT: f64 = 10.0;
/// Stroke width of the box border trace.
pub const BORDER_WIDTH: f64 = 4.0;

/// Filled part of the horizontal bar at `progress` in `0..=1`.
pub fn bar_rect(layer: &TrackerLayer, progress: f64) -> Rect {
    let len = layer.length * progress.clamp(0.0, 1.0);
    Rect::new(layer.pos_x, layer.pos_y, layer.pos_x + len, layer.pos_y + BAR_HEIGHT)
}

/// Outline of the `length x height` box traced clockwise from its top-left corner over
/// `progress` of the perimeter. `None` before anything is traced.
pub fn border_trace(layer: &TrackerLayer, progress: f64) -> Option<BezPath> {
    let (w, h) = (layer.length, layer.height);
    let mut remaining = 2.0 * (w + h) * progress.clamp(0.0, 1.0);
    if remaining <= 0.0 {
        return None;
    }

    let o = Point::new(layer.pos_x, layer.pos_y);
    let corners = [
        o,
        Point::new(o.x + w, o.y),
        Point::new(o.x + w, o.y + h),
        Point::new(o.x, o.y + h),
        o,
    ];
    let mut path = BezPath::new();
    path.move_to(o);
    for pair in corners.windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let side = (to - from).hypot();
        if remaining >= side {
            path.line_to(to);
            remaining -= side;
        } else {
            path.line_to(from.lerp(to, remaining / side));
            break;
        }
    }
    Some(path)
}

/// Draw the tracker at `progress` in `0..=1`.
pub fn draw_tracker(layer: &TrackerLayer, progress: f64, painter: &mut Painter<'_>) {
    if !layer.display {
        return;
    }
    let color = layer.fill.with_opacity_percent(layer.opacity);
    match layer.kind {
        TrackerType::HorizontalBar => {
            let rect = bar_rect(layer, progress);
            if rect.width() > 0.0 {
                painter.fill_rect(rect, color);
            }
        }
        TrackerType::BoxBorder => {
            if let Some(path) = border_trace(layer, progress) {
                painter.stroke_path(&path, BORDER_WIDTH, color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/tracker.rs"]
mod tests;
