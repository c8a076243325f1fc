use std::collections::HashMap;
use std::sync::Arc;

use usvg::fontdb;

use crate::assets::fonts::{library, query_face};
use crate::foundation::core::Point;
use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::render::painter::Painter;
use crate::scene::model::{FontStyle, TextAlign, TextLayer};

/// Height of every text box; lines whose bottom falls below it are dropped, except the first.
pub const TEXT_BOX_HEIGHT: f32 = 100.0;

/// Draws text layers onto the static layer.
pub trait TextRenderer {
    fn draw_text(&mut self, text: &TextLayer, painter: &mut Painter<'_>) -> AudiogramResult<()>;
}

struct LoadedFace {
    family: String,
    font: vello_cpu::peniko::FontData,
}

/// Shapes text with `parley`, picking faces from the process font library.
pub struct ParleyTextRenderer {
    fonts: Arc<fontdb::Database>,
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<(String, u16, bool), LoadedFace>,
}

impl Default for ParleyTextRenderer {
    fn default() -> Self {
        Self::new(library())
    }
}

impl ParleyTextRenderer {
    pub fn new(fonts: Arc<fontdb::Database>) -> Self {
        Self {
            fonts,
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn face(&mut self, family: &str, weight: u16, italic: bool) -> AudiogramResult<&LoadedFace> {
        let key = (family.to_string(), weight, italic);
        if !self.faces.contains_key(&key) {
            let (bytes, index) = query_face(&self.fonts, family, weight, italic)
                .ok_or_else(|| AudiogramError::resource(format!("no font face for \"{family}\"")))?;
            let registered = self
                .font_ctx
                .collection
                .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
            let family_id = registered.first().map(|(id, _)| *id).ok_or_else(|| {
                AudiogramError::resource(format!("font for \"{family}\" has no families"))
            })?;
            let family_name = self
                .font_ctx
                .collection
                .family_name(family_id)
                .ok_or_else(|| AudiogramError::resource("registered font family has no name"))?
                .to_string();
            let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index);
            self.faces.insert(
                key.clone(),
                LoadedFace {
                    family: family_name,
                    font,
                },
            );
        }
        self.faces
            .get(&key)
            .ok_or_else(|| AudiogramError::resource("font cache miss"))
    }
}

impl TextRenderer for ParleyTextRenderer {
    fn draw_text(&mut self, text: &TextLayer, painter: &mut Painter<'_>) -> AudiogramResult<()> {
        let weight = text.font_weight.numeric();
        let italic = text.font_style == FontStyle::Italic;
        let (family, font) = {
            let face = self.face(&text.font, weight, italic)?;
            (face.family.clone(), face.font.clone())
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, &text.value, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(text.font_size));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(weight)),
        ));
        if italic {
            builder.push_default(parley::style::StyleProperty::FontStyle(
                parley::style::FontStyle::Italic,
            ));
        }
        builder.push_default(parley::style::StyleProperty::LetterSpacing(
            text.spacing.tracking_em() * text.font_size,
        ));

        let box_width = text.width as f32;
        let mut layout: parley::Layout<()> = builder.build(&text.value);
        layout.break_all_lines(Some(box_width));
        layout.align(
            Some(box_width),
            parley::Alignment::Start,
            parley::AlignmentOptions::default(),
        );

        let color = text.color.with_opacity_percent(text.opacity);
        for (i, line) in layout.lines().enumerate() {
            let metrics = line.metrics();
            if !line_visible(i, metrics.baseline + metrics.descent) {
                break;
            }
            let dx = line_offset(text.align, box_width, metrics.advance);
            let origin = Point::new(text.pos_x + f64::from(dx), text.pos_y);
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let font_size = run.run().font_size();
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                painter.fill_glyphs(&font, font_size, origin, color, glyphs);
            }
        }
        Ok(())
    }
}

/// Horizontal shift of a line of `line_width` inside a box of `box_width`.
pub fn line_offset(align: TextAlign, box_width: f32, line_width: f32) -> f32 {
    let slack = (box_width - line_width).max(0.0);
    match align {
        TextAlign::Left => 0.0,
        TextAlign::Center => slack / 2.0,
        TextAlign::Right => slack,
    }
}

/// Whether line `index` with its bottom at `bottom` (relative to the box top) is drawn.
pub fn line_visible(index: usize, bottom: f32) -> bool {
    index == 0 || bottom <= TEXT_BOX_HEIGHT
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
