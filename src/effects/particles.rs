use crate::foundation::core::{Point, Rgba8};
use crate::foundation::error::AudiogramResult;
use crate::render::painter::Painter;
use crate::render::{FrameContext, Renders};
use crate::scene::amplitude::bin;
use crate::scene::model::EffectLayer;

/// Pool size of an amplitude-reactive particle effect.
pub const REACTIVE_CAPACITY: usize = 1000;
/// Pool size of a static particle effect.
pub const STATIC_CAPACITY: usize = 100;

/// Opacity percentage and radius factor of the three discs drawn per particle, outermost first.
const DISCS: [(f64, f64); 3] = [(10.0, 1.0), (30.0, 0.75), (60.0, 0.5)];

/// One live particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    /// Center in canvas pixels.
    pub position: Point,
    /// Own downward drift per frame, in `[1, 5)`.
    pub drift: f64,
    /// Outer disc radius, in `[1, 5)`.
    pub radius: f64,
    /// Frames left; the particle is culled once this drops below zero.
    pub lifespan: f64,
}

impl Particle {
    fn spawn(layer: &EffectLayer, rng: &mut fastrand::Rng) -> Self {
        Self {
            position: Point::new(
                layer.pos_x + rng.f64() * layer.width + 1.0,
                layer.pos_y + rng.f64() * layer.height + 1.0,
            ),
            drift: rng.f64() * 4.0 + 1.0,
            radius: rng.f64() * 4.0 + 1.0,
            lifespan: rng.f64() * 299.0 + 1.0,
        }
    }

    fn tick(&mut self, velocity: i32) {
        self.position.y += (self.drift + f64::from(velocity)).trunc();
        self.lifespan -= 1.0;
    }

    /// Draw the three concentric discs.
    pub fn draw(&self, fill: Rgba8, painter: &mut Painter<'_>) {
        for (opacity, factor) in DISCS {
            painter.fill_circle(
                self.position,
                self.radius * factor,
                fill.with_opacity_percent(opacity),
            );
        }
    }
}

/// Extra per-frame fall speed from the first two bins of a spectrum frame.
pub fn amplitude_velocity(frame: &[f32]) -> AudiogramResult<i32> {
    let sum = f64::from(bin(frame, 0)?) + f64::from(bin(frame, 1)?);
    Ok((sum / 20.0).trunc() as i32)
}

/// A particle pool bound to one effect descriptor.
pub struct ParticleEffect {
    layer: EffectLayer,
    capacity: usize,
    rng: fastrand::Rng,
    particles: Vec<Particle>,
}

impl ParticleEffect {
    /// Empty pool; capacity follows `layer.reactive`.
    pub fn new(layer: EffectLayer, rng: fastrand::Rng) -> Self {
        let capacity = if layer.reactive {
            REACTIVE_CAPACITY
        } else {
            STATIC_CAPACITY
        };
        Self {
            layer,
            capacity,
            rng,
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// One simulation step: refill to capacity, then cull expired particles and hand every
    /// survivor to `draw` before moving it.
    pub fn advance(&mut self, velocity: i32, mut draw: impl FnMut(&Particle)) {
        while self.particles.len() < self.capacity {
            self.particles
                .push(Particle::spawn(&self.layer, &mut self.rng));
        }
        self.particles.retain_mut(|p| {
            if p.lifespan < 0.0 {
                return false;
            }
            draw(p);
            p.tick(velocity);
            true
        });
    }
}

impl Renders for ParticleEffect {
    fn render(&mut self, frame: &FrameContext<'_>, painter: &mut Painter<'_>) -> AudiogramResult<()> {
        let spectrum = &frame.amplitudes.spectrum;
        let velocity = if self.layer.reactive && !spectrum.is_empty() {
            amplitude_velocity(spectrum.frame(frame.index)?)?
        } else {
            0
        };
        let fill = self.layer.fill;
        self.advance(velocity, |p| p.draw(fill, painter));
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/particles.rs"]
mod tests;
