//! Declarative description of one audiogram render job.
//!
//! The model is deserialized once from JSON, validated with [`SceneDescription::validate`], and
//! then treated as read-only for the duration of the render.

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{AudiogramError, AudiogramResult};
use serde::{Deserialize, Serialize};

fn hundred() -> f64 {
    100.0
}

fn default_blur_radius() -> u32 {
    200
}

fn default_particle_band() -> f64 {
    200.0
}

fn yes() -> bool {
    true
}

/// Root of the scene description.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    /// Output canvas.
    pub video: Canvas,
    /// Static image layers.
    #[serde(default)]
    pub images: Vec<ImageLayer>,
    /// Static text layers.
    #[serde(default)]
    pub texts: Vec<TextLayer>,
    /// Static shape layers.
    #[serde(default)]
    pub shapes: Vec<ShapeLayer>,
    /// Animated waveform.
    #[serde(default)]
    pub waveform: Option<WaveformLayer>,
    /// Progress tracker.
    #[serde(default)]
    pub tracker: Option<TrackerLayer>,
    /// Per-frame effects, drawn below the waveform.
    #[serde(default)]
    pub effects: Vec<EffectLayer>,
    /// Optional background video resource.
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Horizontal placement policy for images.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageAlign {
    /// Keep the explicit `posX`.
    #[default]
    #[serde(alias = "NONE")]
    None,
    /// Center horizontally.
    #[serde(alias = "CENTER")]
    Center,
    /// Place at a quarter of the free width.
    #[serde(alias = "LEFT")]
    Left,
    /// Place at three quarters of the free width.
    #[serde(alias = "RIGHT")]
    Right,
}

/// Pixel effect applied to an image before compositing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageEffect {
    /// No effect.
    #[default]
    #[serde(alias = "NONE")]
    None,
    /// Separable Gaussian blur.
    #[serde(alias = "BLUR")]
    Blur,
    /// Additive noise.
    #[serde(alias = "JITTER")]
    Jitter,
    /// Luminance grayscale.
    #[serde(alias = "MONOCHROME")]
    Monochrome,
}

/// Flat color filter over an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// No filter.
    #[default]
    #[serde(alias = "NONE")]
    None,
    /// 50% flat color overlay.
    #[serde(alias = "SCREEN")]
    Screen,
}

/// Alpha mask applied to an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskType {
    /// No mask.
    #[default]
    #[serde(alias = "NONE")]
    None,
    /// Largest inscribed circle.
    #[serde(alias = "CIRCLE")]
    Circle,
    /// Largest centered square.
    #[serde(alias = "SQUARE")]
    Square,
}

/// Rectangular border drawn around an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameType {
    /// No border.
    #[default]
    #[serde(alias = "NONE")]
    None,
    /// 2 px.
    #[serde(alias = "THIN")]
    Thin,
    /// 5 px.
    #[serde(alias = "NORMAL")]
    Normal,
    /// 10 px.
    #[serde(alias = "SOLID")]
    Solid,
}

impl FrameType {
    /// Border stroke width in pixels, `None` when no border is drawn.
    pub fn stroke_width(self) -> Option<f64> {
        match self {
            FrameType::None => None,
            FrameType::Thin => Some(2.0),
            FrameType::Normal => Some(5.0),
            FrameType::Solid => Some(10.0),
        }
    }
}

/// Static image layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageLayer {
    /// Resource identifier passed to the resolver.
    pub url: String,
    /// Left edge in canvas pixels (overridden by `align`).
    #[serde(default)]
    pub pos_x: f64,
    /// Top edge in canvas pixels.
    #[serde(default)]
    pub pos_y: f64,
    /// Target width, `0` keeps the native size.
    #[serde(default)]
    pub width: f64,
    /// Target height, `0` keeps the native size.
    #[serde(default)]
    pub height: f64,
    /// Draw order among images.
    #[serde(default)]
    pub z_index: i32,
    /// Opacity percentage.
    #[serde(default = "hundred")]
    pub opacity: f64,
    /// Horizontal alignment.
    #[serde(default)]
    pub align: ImageAlign,
    /// Pixel effect.
    #[serde(default)]
    pub image_effect: ImageEffect,
    /// Blur kernel radius; sigma is `radius / 3`.
    #[serde(default = "default_blur_radius")]
    pub blur_radius: u32,
    /// Flat color filter.
    #[serde(default)]
    pub filter: FilterType,
    /// Filter color, required by [`FilterType::Screen`].
    #[serde(default)]
    pub filter_fill: Option<Rgba8>,
    /// Alpha mask.
    #[serde(default)]
    pub mask: MaskType,
    /// `"none"` or `"rotate: <degrees>"`.
    #[serde(default)]
    pub transform: Option<String>,
    /// Border style.
    #[serde(default)]
    pub frame: FrameType,
    /// Border color, required when `frame` is set.
    #[serde(default)]
    pub frame_color: Option<Rgba8>,
}

impl ImageLayer {
    /// Parse the rotation in degrees out of `transform`.
    pub fn rotation_degrees(&self) -> AudiogramResult<Option<f64>> {
        let Some(t) = self.transform.as_deref() else {
            return Ok(None);
        };
        let t = t.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        let raw = t.rsplit(':').next().unwrap_or(t).trim();
        let deg: f64 = raw
            .parse()
            .map_err(|_| AudiogramError::config(format!("invalid image transform \"{t}\"")))?;
        if !deg.is_finite() {
            return Err(AudiogramError::config(format!(
                "image rotation must be finite, got \"{t}\""
            )));
        }
        Ok(Some(deg))
    }
}

/// Shape primitive kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapeType {
    /// Filled rectangle.
    #[serde(alias = "BOX")]
    Box,
    /// Filled ellipse inscribed in the shape box.
    #[serde(alias = "CIRCLE")]
    Circle,
    /// Horizontal line across the shape width.
    #[serde(alias = "LINE")]
    Line,
    /// Vector shape loaded from an SVG resource.
    #[serde(alias = "SVG")]
    Svg,
}

/// Static shape layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeLayer {
    /// Primitive kind.
    pub shape_type: ShapeType,
    /// Left edge.
    #[serde(default)]
    pub pos_x: f64,
    /// Top edge.
    #[serde(default)]
    pub pos_y: f64,
    /// Width.
    #[serde(default)]
    pub width: f64,
    /// Height.
    #[serde(default)]
    pub height: f64,
    /// Fill (and line stroke) color.
    pub fill: Rgba8,
    /// Opacity percentage.
    #[serde(default = "hundred")]
    pub opacity: f64,
    /// Stroke width used by lines.
    #[serde(default)]
    pub stroke_width: f64,
    /// Draw order among shapes.
    #[serde(default)]
    pub z_index: i32,
    /// SVG resource identifier for [`ShapeType::Svg`].
    #[serde(default)]
    pub url: Option<String>,
}

/// Font posture.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontStyle {
    /// Upright.
    #[default]
    #[serde(alias = "NONE")]
    None,
    /// Italic.
    #[serde(alias = "ITALIC")]
    Italic,
}

/// Font weight tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    /// Same as [`FontWeight::Normal`].
    #[serde(alias = "NONE")]
    None,
    /// Light.
    #[serde(alias = "THIN")]
    Thin,
    /// Regular.
    #[default]
    #[serde(alias = "NORMAL")]
    Normal,
    /// Bold.
    #[serde(alias = "BOLD")]
    Bold,
}

impl FontWeight {
    /// CSS-style numeric weight.
    pub fn numeric(self) -> u16 {
        match self {
            FontWeight::Thin => 300,
            FontWeight::None | FontWeight::Normal => 400,
            FontWeight::Bold => 700,
        }
    }
}

/// Letter tracking tier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spacing {
    /// -0.1 em.
    #[serde(alias = "TIGHT")]
    Tight,
    /// 0 em.
    #[default]
    #[serde(alias = "NORMAL")]
    Normal,
    /// +0.1 em.
    #[serde(alias = "LOOSE")]
    Loose,
}

impl Spacing {
    /// Tracking in em units.
    pub fn tracking_em(self) -> f32 {
        match self {
            Spacing::Tight => -0.1,
            Spacing::Normal => 0.0,
            Spacing::Loose => 0.1,
        }
    }
}

/// Horizontal text alignment inside the wrap box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAlign {
    /// Flush left.
    #[default]
    #[serde(alias = "LEFT")]
    Left,
    /// Centered.
    #[serde(alias = "CENTER")]
    Center,
    /// Flush right.
    #[serde(alias = "RIGHT")]
    Right,
}

/// Static text layer.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextLayer {
    /// Text content.
    pub value: String,
    /// Font family name.
    pub font: String,
    /// Font size in pixels.
    pub font_size: f32,
    /// Posture.
    #[serde(default)]
    pub font_style: FontStyle,
    /// Weight tier.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Tracking tier.
    #[serde(default)]
    pub spacing: Spacing,
    /// Text color.
    pub color: Rgba8,
    /// Opacity percentage.
    #[serde(default = "hundred")]
    pub opacity: f64,
    /// Left edge of the text box.
    #[serde(default)]
    pub pos_x: f64,
    /// Top edge of the text box.
    #[serde(default)]
    pub pos_y: f64,
    /// Wrap width of the text box.
    pub width: f64,
    /// Alignment inside the box.
    #[serde(default)]
    pub align: TextAlign,
    /// Draw order among texts.
    #[serde(default)]
    pub z_index: i32,
}

/// Which amplitude series a waveform consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformType {
    /// Time-domain signal amplitude.
    #[serde(alias = "SAD")]
    Sad,
    /// Frequency-domain amplitude.
    #[serde(alias = "FAD")]
    Fad,
}

/// Declared waveform design variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveformDesign {
    /// Amplitude ribbon.
    #[default]
    #[serde(alias = "DEFAULT")]
    Default,
    /// Radial spectral-flux ring.
    #[serde(alias = "SPECTRAL_FLUX")]
    SpectralFlux,
    /// Declared, not rendered.
    #[serde(alias = "FRINGE")]
    Fringe,
    /// Declared, not rendered.
    #[serde(alias = "ARC_REACTOR")]
    ArcReactor,
}

/// Soft halo drawn behind a waveform.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlowSpec {
    /// Halo color.
    pub color: Rgba8,
    /// Blur radius of the halo in pixels.
    pub size: u32,
    /// Opacity of the white core, `0..=1`.
    #[serde(default = "one_f32")]
    pub opacity: f32,
}

fn one_f32() -> f32 {
    1.0
}

/// Animated waveform descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveformLayer {
    /// Series selector.
    #[serde(rename = "type")]
    pub kind: WaveformType,
    /// Design variant.
    #[serde(default)]
    pub design: WaveformDesign,
    /// Ribbon baseline start / ring center x.
    pub pos_x: f64,
    /// Ribbon baseline / ring center y.
    pub pos_y: f64,
    /// Ribbon width / ring diameter.
    pub width: f64,
    /// Primary fill.
    #[serde(alias = "fill_1")]
    pub fill1: Rgba8,
    /// Secondary fill (radial inner ring).
    #[serde(default, alias = "fill_2")]
    pub fill2: Option<Rgba8>,
    /// Tertiary fill (radial innermost ring).
    #[serde(default, alias = "fill_3")]
    pub fill3: Option<Rgba8>,
    /// Optional glow.
    #[serde(default)]
    pub glow: Option<GlowSpec>,
}

/// Progress tracker styles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerType {
    /// Growing filled bar.
    #[serde(alias = "HORIZONTAL_BAR")]
    HorizontalBar,
    /// Outline traced around a box.
    #[serde(alias = "BOX_BORDER")]
    BoxBorder,
}

/// Progress tracker descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerLayer {
    /// Whether the tracker is drawn at all.
    #[serde(default = "yes")]
    pub display: bool,
    /// Style.
    #[serde(rename = "type")]
    pub kind: TrackerType,
    /// Left edge.
    pub pos_x: f64,
    /// Top edge.
    pub pos_y: f64,
    /// Full-progress length.
    pub length: f64,
    /// Box height, used by [`TrackerType::BoxBorder`].
    #[serde(default)]
    pub height: f64,
    /// Color.
    pub fill: Rgba8,
    /// Opacity percentage.
    #[serde(default = "hundred")]
    pub opacity: f64,
}

/// Effect kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectType {
    /// Particle drift.
    #[serde(alias = "PARTICLE")]
    Particle,
    /// Declared, not rendered.
    #[serde(alias = "DISTORTION")]
    Distortion,
    /// Declared, not rendered.
    #[serde(alias = "VINYL")]
    Vinyl,
}

/// Effect descriptor.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectLayer {
    /// Kind.
    pub effect_type: EffectType,
    /// Amplitude-reactive (large pool) or static (small pool).
    #[serde(default = "yes")]
    pub reactive: bool,
    /// Spawn rectangle left edge.
    pub pos_x: f64,
    /// Spawn rectangle top edge.
    pub pos_y: f64,
    /// Spawn rectangle width.
    pub width: f64,
    /// Spawn rectangle height.
    #[serde(default = "default_particle_band")]
    pub height: f64,
    /// Particle color.
    pub fill: Rgba8,
}

impl SceneDescription {
    /// Parse and validate a scene description from JSON.
    pub fn from_json(json: &str) -> AudiogramResult<Self> {
        let scene: Self = serde_json::from_str(json)
            .map_err(|e| AudiogramError::config(format!("scene json: {e}")))?;
        scene.validate()?;
        Ok(scene)
    }

    /// Validate the scene before any job work starts.
    pub fn validate(&self) -> AudiogramResult<()> {
        let Canvas { width, height } = self.video;
        if width == 0 || height == 0 {
            return Err(AudiogramError::config("video width/height must be non-zero"));
        }
        if !width.is_multiple_of(2) || !height.is_multiple_of(2) {
            return Err(AudiogramError::config(
                "video width/height must be even (required for yuv420p output)",
            ));
        }
        self.video.size_u16()?;

        for (i, img) in self.images.iter().enumerate() {
            validate_image(img).map_err(|e| prefix(e, &format!("images[{i}]")))?;
        }
        for (i, s) in self.shapes.iter().enumerate() {
            check_opacity(s.opacity).map_err(|e| prefix(e, &format!("shapes[{i}]")))?;
            if s.shape_type == ShapeType::Svg && s.url.is_none() {
                return Err(AudiogramError::config(format!(
                    "shapes[{i}]: svg shapes require a url"
                )));
            }
            if !(s.width >= 0.0 && s.height >= 0.0) {
                return Err(AudiogramError::config(format!(
                    "shapes[{i}]: width/height must be >= 0"
                )));
            }
        }
        for (i, t) in self.texts.iter().enumerate() {
            check_opacity(t.opacity).map_err(|e| prefix(e, &format!("texts[{i}]")))?;
            if !t.font_size.is_finite() || t.font_size <= 0.0 {
                return Err(AudiogramError::config(format!(
                    "texts[{i}]: fontSize must be finite and > 0"
                )));
            }
            if !(t.width > 0.0) {
                return Err(AudiogramError::config(format!(
                    "texts[{i}]: width must be > 0"
                )));
            }
        }
        if let Some(wf) = &self.waveform {
            crate::plot::PlotStrategy::select(wf)?;
        }
        if let Some(tracker) = &self.tracker {
            check_opacity(tracker.opacity).map_err(|e| prefix(e, "tracker"))?;
            if !(tracker.length >= 0.0) {
                return Err(AudiogramError::config("tracker: length must be >= 0"));
            }
            if tracker.kind == TrackerType::BoxBorder && !(tracker.height > 0.0) {
                return Err(AudiogramError::config(
                    "tracker: box_border requires height > 0",
                ));
            }
        }
        for (i, fx) in self.effects.iter().enumerate() {
            if fx.effect_type != EffectType::Particle {
                return Err(AudiogramError::config(format!(
                    "effects[{i}]: effect type {:?} is not supported",
                    fx.effect_type
                )));
            }
            if !(fx.width >= 0.0 && fx.height >= 0.0) {
                return Err(AudiogramError::config(format!(
                    "effects[{i}]: width/height must be >= 0"
                )));
            }
        }
        Ok(())
    }
}

fn validate_image(img: &ImageLayer) -> AudiogramResult<()> {
    check_opacity(img.opacity)?;
    if !(img.width >= 0.0 && img.height >= 0.0) {
        return Err(AudiogramError::config("width/height must be >= 0"));
    }
    let max = f64::from(crate::effects::image_fx::MAX_IMAGE_DIM);
    if img.width > max || img.height > max {
        return Err(AudiogramError::config(format!(
            "width/height must be <= {max}"
        )));
    }
    if img.image_effect == ImageEffect::Blur && img.blur_radius < 1 {
        return Err(AudiogramError::config("blurRadius must be >= 1"));
    }
    if img.filter == FilterType::Screen && img.filter_fill.is_none() {
        return Err(AudiogramError::config("screen filter requires filterFill"));
    }
    if img.frame != FrameType::None && img.frame_color.is_none() {
        return Err(AudiogramError::config("frame requires frameColor"));
    }
    img.rotation_degrees()?;
    Ok(())
}

fn check_opacity(opacity: f64) -> AudiogramResult<()> {
    if !(0.0..=100.0).contains(&opacity) {
        return Err(AudiogramError::config(format!(
            "opacity must be within 0..=100, got {opacity}"
        )));
    }
    Ok(())
}

fn prefix(err: AudiogramError, at: &str) -> AudiogramError {
    match err {
        AudiogramError::InvalidConfiguration(msg) => {
            AudiogramError::config(format!("{at}: {msg}"))
        }
        other => other,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
