//! Particle effects and image-processing passes.

pub mod blur;
pub mod glow;
pub mod image_fx;
pub mod particles;

use crate::foundation::error::{AudiogramError, AudiogramResult};
use crate::render::Renders;
use crate::scene::model::{EffectLayer, EffectType};

/// Instantiate one renderer per effect descriptor.
///
/// With a `seed`, effect `i` draws from an RNG seeded with `seed + i` so runs are repeatable.
pub fn build_effects(
    layers: &[EffectLayer],
    seed: Option<u64>,
) -> AudiogramResult<Vec<Box<dyn Renders>>> {
    layers
        .iter()
        .enumerate()
        .map(|(i, layer)| -> AudiogramResult<Box<dyn Renders>> {
            let rng = match seed {
                Some(s) => fastrand::Rng::with_seed(s.wrapping_add(i as u64)),
                None => fastrand::Rng::new(),
            };
            match layer.effect_type {
                EffectType::Particle => Ok(Box::new(particles::ParticleEffect::new(
                    layer.clone(),
                    rng,
                ))),
                other => Err(AudiogramError::config(format!(
                    "effects[{i}]: effect type {other:?} is not supported"
                ))),
            }
        })
        .collect()
}
