use crate::config::{Direction, SparklesConfig};
use crate::constants::{
    SPARKLES_DRIFT_PER_SEC, SPARKLES_JITTER, SPARKLES_MAX_DT_SEC, SPARKLES_MAX_PARTICLES,
    SPARKLES_REFERENCE_AREA, SPARKLES_TWINKLE_HZ,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

/// A single sparkle. Position and velocity are in normalized canvas units
/// (`[0, 1)` on both axes, y down); `size` is a radius in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: [f32; 2],
    pub vel: [f32; 2],
    pub size: f32,
    pub twinkle_phase: f32,
    pub twinkle_hz: f32,
}

/// Number of particles for a canvas of the given CSS size.
pub fn target_count(density: f32, css_width: f32, css_height: f32) -> usize {
    let area = css_width.max(0.0) * css_height.max(0.0);
    let n = (density.max(0.0) * area / SPARKLES_REFERENCE_AREA).round();
    (n as usize).clamp(1, SPARKLES_MAX_PARTICLES)
}

#[inline]
fn wrap_unit(v: f32) -> f32 {
    let w = v.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs
    if w >= 1.0 {
        0.0
    } else {
        w
    }
}

pub struct ParticleField {
    config: SparklesConfig,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    pub fn new(config: SparklesConfig, css_width: f32, css_height: f32, seed: u64) -> Self {
        let mut field = Self {
            config,
            particles: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
        };
        field.resize(css_width, css_height);
        field
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn config(&self) -> &SparklesConfig {
        &self.config
    }

    /// Re-target the particle count for a new canvas size. Survivors keep
    /// their normalized position, so the field does not jump on resize.
    pub fn resize(&mut self, css_width: f32, css_height: f32) {
        let want = target_count(self.config.density, css_width, css_height);
        if want < self.particles.len() {
            self.particles.truncate(want);
        } else {
            while self.particles.len() < want {
                let p = self.spawn();
                self.particles.push(p);
            }
        }
    }

    pub fn step(&mut self, dt_sec: f32) {
        let dt = dt_sec.clamp(0.0, SPARKLES_MAX_DT_SEC);
        for p in self.particles.iter_mut() {
            p.pos[0] = wrap_unit(p.pos[0] + p.vel[0] * dt);
            p.pos[1] = wrap_unit(p.pos[1] + p.vel[1] * dt);
            p.twinkle_phase = (p.twinkle_phase + TAU * p.twinkle_hz * dt).rem_euclid(TAU);
        }
    }

    /// Current opacity of a particle, always within the configured range.
    pub fn opacity(&self, p: &Particle) -> f32 {
        let lo = self.config.min_opacity.min(self.config.max_opacity);
        let hi = self.config.max_opacity.max(self.config.min_opacity);
        let t = 0.5 + 0.5 * p.twinkle_phase.sin();
        (lo + (hi - lo) * t).clamp(lo, hi)
    }

    fn spawn(&mut self) -> Particle {
        let drift = SPARKLES_DRIFT_PER_SEC * self.config.speed * self.rng.gen_range(0.5..=1.0);
        let jitter = drift * SPARKLES_JITTER * self.rng.gen_range(-1.0..=1.0);
        let vel = match self.config.direction {
            Direction::None => [
                drift * SPARKLES_JITTER * self.rng.gen_range(-1.0..=1.0),
                drift * SPARKLES_JITTER * self.rng.gen_range(-1.0..=1.0),
            ],
            dir => {
                let [ux, uy] = dir.unit();
                // jitter runs perpendicular to the drift
                [ux * drift + uy.abs() * jitter, uy * drift + ux.abs() * jitter]
            }
        };
        let (lo, hi) = (
            self.config.min_size.min(self.config.max_size),
            self.config.max_size.max(self.config.min_size),
        );
        Particle {
            pos: [self.rng.gen_range(0.0..1.0), self.rng.gen_range(0.0..1.0)],
            vel,
            size: if hi > lo { self.rng.gen_range(lo..=hi) } else { lo },
            twinkle_phase: self.rng.gen_range(0.0..TAU),
            twinkle_hz: self.rng.gen_range(0.1..=SPARKLES_TWINKLE_HZ),
        }
    }
}
