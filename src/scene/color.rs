use crate::foundation::core::Rgba8;
use serde::{Deserialize, Deserializer};

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_color(&s).map_err(serde::de::Error::custom),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Rgba8::rgb(*r, *g, *b)),
                [r, g, b, a] => Ok(Rgba8 {
                    r: *r,
                    g: *g,
                    b: *b,
                    a: *a,
                }),
                _ => Err(serde::de::Error::custom(
                    "rgb array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

/// Parse `#RRGGBB`, `#RRGGBBAA` or `0xRRGGBB` (case-insensitive).
pub fn parse_color(s: &str) -> Result<Rgba8, String> {
    let t = s.trim();
    let hex = t
        .strip_prefix('#')
        .or_else(|| t.strip_prefix("0x"))
        .or_else(|| t.strip_prefix("0X"))
        .ok_or_else(|| format!("color \"{s}\" must start with '#' or '0x'"))?;

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if !hex.is_ascii() {
        return Err(format!("color \"{s}\" is not ascii hex"));
    }
    match hex.len() {
        6 => Ok(Rgba8::rgb(
            hex_byte(&hex[0..2])?,
            hex_byte(&hex[2..4])?,
            hex_byte(&hex[4..6])?,
        )),
        8 => Ok(Rgba8 {
            r: hex_byte(&hex[0..2])?,
            g: hex_byte(&hex[2..4])?,
            b: hex_byte(&hex[4..6])?,
            a: hex_byte(&hex[6..8])?,
        }),
        _ => Err(format!(
            "color \"{s}\" must be #RRGGBB or #RRGGBBAA (case-insensitive)"
        )),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/color.rs"]
mod tests;
