// Host-side tests for the sparkles particle field.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod error {
    include!("../src/error.rs");
}
mod config {
    include!("../src/config.rs");
}
mod sparkles {
    pub mod field {
        include!("../src/sparkles/field.rs");
    }
}

use config::{Direction, SparklesConfig};
use constants::*;
use sparkles::field::*;

fn field(direction: Direction) -> ParticleField {
    let config = SparklesConfig {
        direction,
        ..SparklesConfig::default()
    };
    ParticleField::new(config, 1280.0, 720.0, 42)
}

#[test]
fn count_scales_with_area() {
    assert_eq!(target_count(1800.0, 1920.0, 1080.0), 1800);
    assert_eq!(target_count(1800.0, 960.0, 1080.0), 900);
}

#[test]
fn count_is_clamped() {
    assert_eq!(target_count(1800.0, 0.0, 0.0), 1);
    assert_eq!(target_count(0.0, 1920.0, 1080.0), 1);
    assert_eq!(
        target_count(1800.0, 7680.0, 4320.0),
        SPARKLES_MAX_PARTICLES
    );
}

#[test]
fn same_seed_gives_same_field() {
    let a = field(Direction::Top);
    let b = field(Direction::Top);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn spawned_particles_respect_configured_ranges() {
    let f = field(Direction::Top);
    assert!(!f.is_empty());
    for p in f.particles() {
        assert!((0.0..1.0).contains(&p.pos[0]) && (0.0..1.0).contains(&p.pos[1]));
        assert!(p.size >= SPARKLES_MIN_SIZE && p.size <= SPARKLES_MAX_SIZE);
        let o = f.opacity(p);
        assert!(o >= SPARKLES_MIN_OPACITY - 1e-6 && o <= SPARKLES_MAX_OPACITY + 1e-6);
    }
}

#[test]
fn top_direction_drifts_upward() {
    let f = field(Direction::Top);
    assert!(f.particles().iter().all(|p| p.vel[1] < 0.0));
}

#[test]
fn right_direction_drifts_rightward() {
    let f = field(Direction::Right);
    assert!(f.particles().iter().all(|p| p.vel[0] > 0.0));
}

#[test]
fn positions_stay_in_unit_square_while_stepping() {
    let mut f = field(Direction::Bottom);
    for _ in 0..600 {
        f.step(1.0 / 60.0);
    }
    for p in f.particles() {
        assert!(p.pos[0] >= 0.0 && p.pos[0] < 1.0, "x out of range: {:?}", p);
        assert!(p.pos[1] >= 0.0 && p.pos[1] < 1.0, "y out of range: {:?}", p);
        assert!(f.opacity(p) <= SPARKLES_MAX_OPACITY + 1e-6);
    }
}

#[test]
fn long_frame_gaps_are_clamped() {
    let mut a = field(Direction::Top);
    let mut b = field(Direction::Top);
    a.step(SPARKLES_MAX_DT_SEC);
    b.step(30.0);
    assert_eq!(a.particles(), b.particles());
}

#[test]
fn negative_dt_does_not_move_particles() {
    let mut f = field(Direction::Left);
    let before: Vec<_> = f.particles().iter().map(|p| p.pos).collect();
    f.step(-1.0);
    let after: Vec<_> = f.particles().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);
}

#[test]
fn resize_retargets_and_keeps_survivors() {
    let mut f = field(Direction::Top);
    let first = f.particles()[0];
    f.resize(640.0, 360.0);
    assert_eq!(f.len(), target_count(f.config().density, 640.0, 360.0));
    assert_eq!(f.particles()[0], first);
    f.resize(1920.0, 1080.0);
    assert_eq!(f.len(), 1800);
    assert_eq!(f.particles()[0], first);
}

#[test]
fn zero_speed_keeps_particles_still() {
    let config = SparklesConfig {
        speed: 0.0,
        ..SparklesConfig::default()
    };
    let mut f = ParticleField::new(config, 800.0, 600.0, 7);
    let before: Vec<_> = f.particles().iter().map(|p| p.pos).collect();
    f.step(0.05);
    let after: Vec<_> = f.particles().iter().map(|p| p.pos).collect();
    assert_eq!(before, after);
}
