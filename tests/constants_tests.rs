// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn globe_defaults_are_within_reasonable_bounds() {
    assert!(GLOBE_DARK >= 0.0 && GLOBE_DARK <= 1.0);
    assert!(GLOBE_OPACITY > 0.0 && GLOBE_OPACITY <= 1.0);
    assert!(GLOBE_SCALE > 0.0);
    assert!(GLOBE_DIFFUSE > 0.0);
    assert!(GLOBE_MAP_BRIGHTNESS > 0.0);
    assert!(GLOBE_MAP_SAMPLES > 0);
    for c in GLOBE_BASE_COLOR
        .iter()
        .chain(&GLOBE_MARKER_COLOR)
        .chain(&GLOBE_GLOW_COLOR)
    {
        assert!((0.0..=1.0).contains(c));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn globe_rotation_is_slow_and_surface_is_oversampled() {
    assert_eq!(GLOBE_PHI_STEP, 0.003);
    assert_eq!(GLOBE_OVERSAMPLE, 2.0);
    assert!(GLOBE_MAX_SURFACE_PX >= 2048);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn sparkles_ranges_are_ordered() {
    assert!(SPARKLES_MIN_SIZE > 0.0 && SPARKLES_MIN_SIZE < SPARKLES_MAX_SIZE);
    assert!(SPARKLES_MIN_OPACITY >= 0.0 && SPARKLES_MIN_OPACITY < SPARKLES_MAX_OPACITY);
    assert!(SPARKLES_MAX_OPACITY <= 1.0);
    assert!(SPARKLES_TWINKLE_HZ > 0.1);
    assert!(SPARKLES_MAX_DT_SEC > 0.0 && SPARKLES_MAX_DT_SEC < 1.0);
    assert!(SPARKLES_DENSITY as usize <= SPARKLES_MAX_PARTICLES);
}

#[test]
fn sparkles_default_color_is_48b6ff() {
    let rgb = SPARKLES_COLOR.map(|c| (c * 255.0).round() as u8);
    assert_eq!(rgb, [0x48, 0xb6, 0xff]);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn music_defaults() {
    assert_eq!(MUSIC_SRC, "/music/background-music.mp3");
    assert!(MUSIC_AUTOPLAY);
    assert_eq!(MUSIC_VOLUME, 1.0);
}

#[test]
fn mount_point_ids_are_distinct() {
    let ids = [
        GLOBE_CONTAINER_ID,
        SPARKLES_CONTAINER_ID,
        MUSIC_ROOT_ID,
        OVERLAY_ROOT_ID,
    ];
    for (i, a) in ids.iter().enumerate() {
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn created_canvases_get_an_explicit_css_size() {
    for style in [SPARKLES_CANVAS_STYLE, GLOBE_CANVAS_STYLE] {
        assert!(style.contains("width:100%"), "{}", style);
        assert!(style.contains("height:100%"), "{}", style);
        assert!(style.contains("display:block"), "{}", style);
    }
    assert!(GLOBE_CANVAS_STYLE.contains("aspect-ratio:1"));
}
