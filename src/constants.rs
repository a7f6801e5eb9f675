// Page defaults and tuning constants.
//
// These are the values the page uses when `<body>` carries no `data-*`
// override; see `config.rs` for the attribute names.
pub const PAGE_TITLE: &str = "Glowbe - Interstellar Experience";

// Mount points
pub const GLOBE_CONTAINER_ID: &str = "globe";
pub const SPARKLES_CONTAINER_ID: &str = "sparkles";
pub const MUSIC_ROOT_ID: &str = "music";
pub const OVERLAY_ROOT_ID: &str = "overlay";

// Inline styles for the canvases the widgets create. Without an explicit CSS
// size a canvas takes its backing size as its layout size, which the resize
// handlers would then feed back into the backing size.
pub const SPARKLES_CANVAS_STYLE: &str = "display:block;width:100%;height:100%";
pub const GLOBE_CANVAS_STYLE: &str = "display:block;width:100%;height:100%;aspect-ratio:1";

// Globe appearance
pub const GLOBE_THETA: f32 = 0.25; // tilt, radians
pub const GLOBE_DARK: f32 = 1.0;
pub const GLOBE_SCALE: f32 = 1.1;
pub const GLOBE_DIFFUSE: f32 = 1.2;
pub const GLOBE_MAP_SAMPLES: u32 = 40_000;
pub const GLOBE_MAP_BRIGHTNESS: f32 = 6.0;
pub const GLOBE_OPACITY: f32 = 1.0;
pub const GLOBE_BASE_COLOR: [f32; 3] = [0.4, 0.6509, 1.0];
pub const GLOBE_MARKER_COLOR: [f32; 3] = [1.0, 0.0, 0.0];
pub const GLOBE_GLOW_COLOR: [f32; 3] = [0.2745, 0.5765, 0.898];
pub const GLOBE_MAX_MARKERS: usize = 8;

// Globe surface and motion
pub const GLOBE_OVERSAMPLE: f64 = 2.0; // backing pixels per CSS pixel
pub const GLOBE_PHI_STEP: f64 = 0.003; // radians per rendered frame
pub const GLOBE_MAX_SURFACE_PX: u32 = 4096;

// Sparkles
pub const SPARKLES_DENSITY: f32 = 1800.0;
pub const SPARKLES_SPEED: f32 = 1.2;
pub const SPARKLES_COLOR: [f32; 3] = [0x48 as f32 / 255.0, 0xb6 as f32 / 255.0, 1.0]; // #48b6ff
pub const SPARKLES_MIN_SIZE: f32 = 0.4; // CSS px radius
pub const SPARKLES_MAX_SIZE: f32 = 1.4;
pub const SPARKLES_MIN_OPACITY: f32 = 0.1;
pub const SPARKLES_MAX_OPACITY: f32 = 1.0;
pub const SPARKLES_TWINKLE_HZ: f32 = 0.6; // upper bound of per-particle twinkle rate
pub const SPARKLES_REFERENCE_AREA: f32 = 1920.0 * 1080.0;
pub const SPARKLES_MAX_PARTICLES: usize = 4000;
// Fraction of the canvas height travelled per second at speed 1.0
pub const SPARKLES_DRIFT_PER_SEC: f32 = 0.04;
pub const SPARKLES_JITTER: f32 = 0.25; // lateral velocity as a fraction of drift
pub const SPARKLES_MAX_DT_SEC: f32 = 0.1; // clamp for tab switches

// Background music
pub const MUSIC_SRC: &str = "/music/background-music.mp3";
pub const MUSIC_AUTOPLAY: bool = true;
pub const MUSIC_VOLUME: f64 = 1.0;

// Overlay buttons
pub const GITHUB_URL: &str = "https://github.com/";
