use super::*;
use crate::foundation::error::AudiogramError;
use crate::scene::model::EffectType;

fn layer(reactive: bool) -> EffectLayer {
    EffectLayer {
        effect_type: EffectType::Particle,
        reactive,
        pos_x: 50.0,
        pos_y: 20.0,
        width: 300.0,
        height: 200.0,
        fill: Rgba8::WHITE,
    }
}

#[test]
fn capacity_follows_reactivity() {
    let reactive = ParticleEffect::new(layer(true), fastrand::Rng::with_seed(1));
    let still = ParticleEffect::new(layer(false), fastrand::Rng::with_seed(1));
    assert_eq!(reactive.capacity(), REACTIVE_CAPACITY);
    assert_eq!(still.capacity(), STATIC_CAPACITY);
}

#[test]
fn pool_never_exceeds_capacity() {
    for reactive in [true, false] {
        let mut fx = ParticleEffect::new(layer(reactive), fastrand::Rng::with_seed(7));
        for frame in 0..700 {
            let mut drawn = 0;
            fx.advance((frame % 5) as i32, |_| drawn += 1);
            assert!(fx.particles().len() <= fx.capacity());
            assert!(drawn <= fx.capacity());
        }
    }
}

#[test]
fn first_step_fills_the_pool_and_draws_everything() {
    let mut fx = ParticleEffect::new(layer(false), fastrand::Rng::with_seed(3));
    let mut drawn = 0;
    fx.advance(0, |_| drawn += 1);
    assert_eq!(drawn, STATIC_CAPACITY);
    assert_eq!(fx.particles().len(), STATIC_CAPACITY);
}

#[test]
fn spawned_particles_respect_ranges() {
    let mut fx = ParticleEffect::new(layer(true), fastrand::Rng::with_seed(11));
    let mut seen = Vec::new();
    fx.advance(0, |p| seen.push(p.clone()));
    for p in seen {
        assert!((51.0..351.0).contains(&p.position.x), "{p:?}");
        assert!((21.0..221.0).contains(&p.position.y), "{p:?}");
        assert!((1.0..=5.0).contains(&p.radius));
        assert!((1.0..=5.0).contains(&p.drift));
        assert!((1.0..=300.0).contains(&p.lifespan));
    }
}

#[test]
fn step_moves_by_truncated_drift_plus_velocity() {
    let mut fx = ParticleEffect::new(layer(false), fastrand::Rng::with_seed(5));
    let mut before = Vec::new();
    fx.advance(3, |p| before.push(p.clone()));
    for (old, new) in before.iter().zip(fx.particles()) {
        let moved = new.position.y - old.position.y;
        assert!((moved - (old.drift + 3.0).trunc()).abs() < 1e-9);
        assert_eq!(new.position.x, old.position.x);
        assert_eq!(new.lifespan, old.lifespan - 1.0);
    }
}

#[test]
fn expired_particles_are_culled_then_replaced() {
    let mut fx = ParticleEffect::new(layer(false), fastrand::Rng::with_seed(9));
    // Every particle starts with lifespan <= 300, so all originals are gone after 302 steps.
    fx.advance(0, |_| {});
    let originals: Vec<f64> = fx.particles().iter().map(|p| p.position.x).collect();
    for _ in 0..302 {
        fx.advance(0, |_| {});
    }
    assert_eq!(fx.particles().len(), STATIC_CAPACITY);
    let survivors = fx
        .particles()
        .iter()
        .filter(|p| originals.contains(&p.position.x))
        .count();
    assert_eq!(survivors, 0);
}

#[test]
fn same_seed_same_simulation() {
    let run = |seed| {
        let mut fx = ParticleEffect::new(layer(true), fastrand::Rng::with_seed(seed));
        for _ in 0..10 {
            fx.advance(1, |_| {});
        }
        fx.particles().to_vec()
    };
    assert_eq!(run(42), run(42));
}

#[test]
fn velocity_from_first_two_bins() {
    assert_eq!(amplitude_velocity(&[30.0, 15.0, 900.0]).unwrap(), 2);
    assert_eq!(amplitude_velocity(&[0.0, 19.0]).unwrap(), 0);
    assert!(matches!(
        amplitude_velocity(&[5.0]),
        Err(AudiogramError::IndexOutOfRange { index: 1, len: 1, .. })
    ));
}
