//! Resource access: resolver, image/SVG decoding, fonts and the background video source.

pub mod decode;
pub mod fonts;
pub mod media;
pub mod resolver;
pub mod svg_raster;
