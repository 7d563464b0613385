use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::foundation::core::Point;
use crate::foundation::math::wrap_into;
use crate::scene::config::SparkleConfig;

/// One sky sparkle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Particle {
    /// Base x, as a fraction of viewport width.
    pub x: f64,
    /// Base y, as a fraction of the sparkle band height.
    pub y: f64,
    /// Base radius.
    pub radius: f64,
    /// Phase accumulator; only ever grows.
    pub phase: f64,
    /// Phase growth per painted frame, before the global step factor.
    pub speed: f64,
    /// Twinkle weight. Drawn at construction but not used by the shading.
    pub weight: f64,
}

/// Where and how bright a particle is drawn for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sparkle {
    /// Centre in viewport units.
    pub center: Point,
    /// Circle radius after twinkle.
    pub radius: f64,
    /// Fill alpha of the white dot.
    pub alpha: f32,
}

/// Fixed-size particle collection owned by a renderer.
///
/// The count is fixed at construction; particles are never added, removed or reset.
#[derive(Clone, Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
}

fn sample(rng: &mut StdRng, [min, span]: [f64; 2]) -> f64 {
    min + span * rng.random::<f64>()
}

impl ParticleField {
    /// Draw `cfg.count` particles from a generator seeded with `seed`.
    pub fn seeded(seed: u64, cfg: &SparkleConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = (0..cfg.count)
            .map(|_| Particle {
                x: rng.random::<f64>(),
                y: rng.random::<f64>(),
                radius: sample(&mut rng, cfg.radius_range),
                phase: rng.random::<f64>(),
                speed: sample(&mut rng, cfg.speed_range),
                weight: sample(&mut rng, cfg.weight_range),
            })
            .collect();
        Self { particles }
    }

    /// Number of particles; constant for the field's lifetime.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// `true` when the field holds no particles.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles in creation order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Advance every phase by one painted frame.
    pub fn advance(&mut self, cfg: &SparkleConfig) {
        for p in &mut self.particles {
            p.phase += p.speed * cfg.phase_step;
        }
    }

    /// Placement of every particle at time `t` on a `width × height` viewport.
    ///
    /// x wraps into `[0, width)`; y is left unwrapped and may drift slightly outside the band.
    pub fn sparkles<'a>(
        &'a self,
        t: f64,
        width: f64,
        height: f64,
        cfg: &'a SparkleConfig,
    ) -> impl Iterator<Item = Sparkle> + 'a {
        self.particles.iter().map(move |p| {
            let tw = 0.5 + 0.5 * (cfg.twinkle_rate * t + cfg.twinkle_phase * p.phase).sin();
            let drift_x =
                cfg.drift_x_amplitude * (cfg.drift_x_rate * t + cfg.drift_x_phase * p.phase).sin();
            let drift_y =
                cfg.drift_y_amplitude * (cfg.drift_y_rate * t + cfg.drift_y_phase * p.phase).cos();
            Sparkle {
                center: Point::new(
                    wrap_into(p.x * width + drift_x + width, width),
                    p.y * height * cfg.sky_band + drift_y,
                ),
                radius: p.radius * (cfg.radius_base + cfg.radius_twinkle * tw),
                alpha: (cfg.alpha_base + cfg.alpha_twinkle * tw) as f32,
            }
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/particles.rs"]
mod tests;
