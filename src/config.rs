use crate::constants::*;
use crate::error::ConfigError;
use glam::Vec3;
use smallvec::SmallVec;

// Page configuration.
//
// Defaults come from `constants.rs`; overrides are read once at mount from
// `data-*` attributes on `<body>` through a lookup closure so the parsing can
// run off-browser. Nothing here is re-read after mount.

/// A highlighted point on the globe, in degrees. `size` is the marker's
/// angular radius in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Marker {
    pub lat_deg: f32,
    pub lon_deg: f32,
    pub size: f32,
}

impl Marker {
    /// Unit direction in globe space (y up, longitude measured from +x towards +z).
    pub fn direction(&self) -> Vec3 {
        let lat = self.lat_deg.to_radians();
        let lon = self.lon_deg.to_radians();
        Vec3::new(lat.cos() * lon.cos(), lat.sin(), lat.cos() * lon.sin())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GlobeConfig {
    pub theta: f32,
    pub dark: f32,
    pub scale: f32,
    pub diffuse: f32,
    pub map_samples: u32,
    pub map_brightness: f32,
    pub opacity: f32,
    pub base_color: [f32; 3],
    pub marker_color: [f32; 3],
    pub glow_color: [f32; 3],
    /// Offset of the sphere centre in backing pixels.
    pub offset: [f32; 2],
    pub markers: SmallVec<[Marker; GLOBE_MAX_MARKERS]>,
    pub phi_step: f64,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            theta: GLOBE_THETA,
            dark: GLOBE_DARK,
            scale: GLOBE_SCALE,
            diffuse: GLOBE_DIFFUSE,
            map_samples: GLOBE_MAP_SAMPLES,
            map_brightness: GLOBE_MAP_BRIGHTNESS,
            opacity: GLOBE_OPACITY,
            base_color: GLOBE_BASE_COLOR,
            marker_color: GLOBE_MARKER_COLOR,
            glow_color: GLOBE_GLOW_COLOR,
            offset: [0.0, 0.0],
            markers: SmallVec::new(),
            phi_step: GLOBE_PHI_STEP,
        }
    }
}

/// Drift direction of the sparkles, in screen space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
    None,
}

impl Direction {
    /// Unit drift vector with y pointing down the screen.
    pub fn unit(self) -> [f32; 2] {
        match self {
            Direction::Top => [0.0, -1.0],
            Direction::Bottom => [0.0, 1.0],
            Direction::Left => [-1.0, 0.0],
            Direction::Right => [1.0, 0.0],
            Direction::None => [0.0, 0.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SparklesConfig {
    /// Particles on a 1920x1080 canvas; scaled by area for other sizes.
    pub density: f32,
    pub speed: f32,
    pub color: [f32; 3],
    pub direction: Direction,
    pub min_size: f32,
    pub max_size: f32,
    pub min_opacity: f32,
    pub max_opacity: f32,
}

impl Default for SparklesConfig {
    fn default() -> Self {
        Self {
            density: SPARKLES_DENSITY,
            speed: SPARKLES_SPEED,
            color: SPARKLES_COLOR,
            direction: Direction::Top,
            min_size: SPARKLES_MIN_SIZE,
            max_size: SPARKLES_MAX_SIZE,
            min_opacity: SPARKLES_MIN_OPACITY,
            max_opacity: SPARKLES_MAX_OPACITY,
        }
    }
}

impl SparklesConfig {
    /// CSS color string for the canvas fill style.
    pub fn css_color(&self) -> String {
        let [r, g, b] = self.color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8);
        format!("rgb({}, {}, {})", r, g, b)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MusicConfig {
    pub src: String,
    pub autoplay: bool,
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            src: MUSIC_SRC.to_string(),
            autoplay: MUSIC_AUTOPLAY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub github_url: String,
    pub show_github: bool,
    pub show_fullscreen: bool,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            github_url: GITHUB_URL.to_string(),
            show_github: true,
            show_fullscreen: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PageConfig {
    pub title: String,
    pub globe: GlobeConfig,
    pub sparkles: SparklesConfig,
    pub music: MusicConfig,
    pub overlay: OverlayConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: PAGE_TITLE.to_string(),
            globe: GlobeConfig::default(),
            sparkles: SparklesConfig::default(),
            music: MusicConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl PageConfig {
    /// Build the page configuration from attribute lookups.
    ///
    /// `lookup` receives the attribute name without the `data-` prefix
    /// (e.g. `globe-theta`) and returns its raw value when present. Values that
    /// fail to parse are logged and replaced by the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let attrs = Attrs { lookup };
        let d = PageConfig::default();

        let globe = GlobeConfig {
            theta: attrs.get("globe-theta", d.globe.theta, parse_f32),
            dark: attrs.get("globe-dark", d.globe.dark, parse_unit_f32),
            scale: attrs.get("globe-scale", d.globe.scale, parse_positive_f32),
            diffuse: attrs.get("globe-diffuse", d.globe.diffuse, parse_positive_f32),
            map_samples: attrs.get("globe-map-samples", d.globe.map_samples, parse_samples),
            map_brightness: attrs.get(
                "globe-map-brightness",
                d.globe.map_brightness,
                parse_positive_f32,
            ),
            opacity: attrs.get("globe-opacity", d.globe.opacity, parse_unit_f32),
            base_color: attrs.get("globe-base-color", d.globe.base_color, parse_color),
            marker_color: attrs.get("globe-marker-color", d.globe.marker_color, parse_color),
            glow_color: attrs.get("globe-glow-color", d.globe.glow_color, parse_color),
            offset: d.globe.offset,
            markers: attrs.get("globe-markers", d.globe.markers, parse_markers),
            phi_step: d.globe.phi_step,
        };

        let sparkles = SparklesConfig {
            density: attrs.get("sparkles-density", d.sparkles.density, parse_positive_f32),
            speed: attrs.get("sparkles-speed", d.sparkles.speed, parse_non_negative_f32),
            color: attrs.get("sparkles-color", d.sparkles.color, parse_color),
            direction: attrs.get(
                "sparkles-direction",
                d.sparkles.direction,
                parse_direction,
            ),
            ..d.sparkles
        };

        let music = MusicConfig {
            src: attrs.get("audio-src", d.music.src, parse_string),
            autoplay: attrs.get("autoplay", d.music.autoplay, parse_bool),
        };

        let overlay = OverlayConfig {
            github_url: attrs.get("github-url", d.overlay.github_url, parse_string),
            show_github: attrs.get("show-github", d.overlay.show_github, parse_bool),
            show_fullscreen: attrs.get(
                "show-fullscreen",
                d.overlay.show_fullscreen,
                parse_bool,
            ),
        };

        PageConfig {
            title: attrs.get("title", d.title, parse_string),
            globe,
            sparkles,
            music,
            overlay,
        }
    }
}

struct Attrs<F> {
    lookup: F,
}

impl<F> Attrs<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get<T>(&self, key: &str, default: T, parse: fn(&str, &str) -> Result<T, ConfigError>) -> T {
        match (self.lookup)(key) {
            None => default,
            Some(raw) => match parse(key, raw.trim()) {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("[config] {}; using default", e);
                    default
                }
            },
        }
    }
}

// ---------------- Attribute parsers ----------------

fn invalid_number(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidNumber {
        key: key.to_string(),
        value: value.to_string(),
    }
}

pub fn parse_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    value
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| invalid_number(key, value))
}

pub fn parse_positive_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    parse_f32(key, value).and_then(|v| {
        if v > 0.0 {
            Ok(v)
        } else {
            Err(invalid_number(key, value))
        }
    })
}

pub fn parse_non_negative_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    parse_f32(key, value).and_then(|v| {
        if v >= 0.0 {
            Ok(v)
        } else {
            Err(invalid_number(key, value))
        }
    })
}

pub fn parse_unit_f32(key: &str, value: &str) -> Result<f32, ConfigError> {
    parse_f32(key, value).and_then(|v| {
        if (0.0..=1.0).contains(&v) {
            Ok(v)
        } else {
            Err(invalid_number(key, value))
        }
    })
}

pub fn parse_samples(key: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|v| *v > 0)
        .ok_or_else(|| invalid_number(key, value))
}

pub fn parse_string(key: &str, value: &str) -> Result<String, ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Empty {
            key: key.to_string(),
        });
    }
    Ok(value.to_string())
}

/// `true`/`false`, `1`/`0`, `yes`/`no`; an attribute present without a value
/// counts as `true`.
pub fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "" | "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// `#rrggbb` or three comma separated floats in `[0, 1]`.
pub fn parse_color(key: &str, value: &str) -> Result<[f32; 3], ConfigError> {
    let invalid = || ConfigError::InvalidColor {
        key: key.to_string(),
        value: value.to_string(),
    };
    if let Some(hex) = value.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let mut out = [0.0f32; 3];
        for (i, c) in out.iter_mut().enumerate() {
            let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
            *c = byte as f32 / 255.0;
        }
        return Ok(out);
    }
    let parts: SmallVec<[f32; 3]> = value
        .split(',')
        .map(|p| p.trim().parse::<f32>().ok())
        .collect::<Option<_>>()
        .ok_or_else(invalid)?;
    if parts.len() != 3 || parts.iter().any(|c| !(0.0..=1.0).contains(c)) {
        return Err(invalid());
    }
    Ok([parts[0], parts[1], parts[2]])
}

pub fn parse_direction(key: &str, value: &str) -> Result<Direction, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "top" => Ok(Direction::Top),
        "bottom" => Ok(Direction::Bottom),
        "left" => Ok(Direction::Left),
        "right" => Ok(Direction::Right),
        "none" => Ok(Direction::None),
        _ => Err(ConfigError::InvalidDirection {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

/// `lat,lon,size;lat,lon,size;...`. Markers past the shader limit are dropped.
pub fn parse_markers(
    key: &str,
    value: &str,
) -> Result<SmallVec<[Marker; GLOBE_MAX_MARKERS]>, ConfigError> {
    let mut markers = SmallVec::new();
    for entry in value.split(';').map(str::trim).filter(|e| !e.is_empty()) {
        let invalid = || ConfigError::InvalidMarker {
            key: key.to_string(),
            value: entry.to_string(),
        };
        let nums: SmallVec<[f32; 3]> = entry
            .split(',')
            .map(|p| p.trim().parse::<f32>().ok().filter(|v| v.is_finite()))
            .collect::<Option<_>>()
            .ok_or_else(invalid)?;
        if nums.len() != 3 || !(-90.0..=90.0).contains(&nums[0]) || nums[2] <= 0.0 {
            return Err(invalid());
        }
        if markers.len() == GLOBE_MAX_MARKERS {
            log::warn!(
                "[config] data-{}: only {} markers supported, ignoring the rest",
                key,
                GLOBE_MAX_MARKERS
            );
            break;
        }
        markers.push(Marker {
            lat_deg: nums[0],
            lon_deg: nums[1],
            size: nums[2],
        });
    }
    Ok(markers)
}
