use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::Rgba;
use crate::numeric::NumericInput;

pub const DEFAULT_MOUNT: &str = "body";
pub const DEFAULT_FOV_DEGREES: f64 = 26.0;
pub const DEFAULT_SPEED: f64 = 0.3;
pub const DEFAULT_RINGS_GAP: f64 = 38.0;
pub const DEFAULT_GRID_GAP: f64 = 44.0;
pub const DEFAULT_DENSITY: usize = 140;
pub const DEFAULT_MESH_DENSITY_BASE: f64 = 5200.0;

/// Options recognised by backdrop initialisation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropConfig {
    /// CSS selector of the mount element.
    pub mount: String,
    /// Beam width in degrees.
    pub fov: f64,
    /// Sweep speed in radians per second; the sign picks the direction.
    pub speed: f64,
    pub rings_gap: f64,
    pub grid_gap: f64,
    /// Far-field (starfield) population.
    pub density: usize,
    /// Canvas area per near-field point.
    pub mesh_density_base: f64,
    pub colors: Palette,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            mount: DEFAULT_MOUNT.to_string(),
            fov: DEFAULT_FOV_DEGREES,
            speed: DEFAULT_SPEED,
            rings_gap: DEFAULT_RINGS_GAP,
            grid_gap: DEFAULT_GRID_GAP,
            density: DEFAULT_DENSITY,
            mesh_density_base: DEFAULT_MESH_DENSITY_BASE,
            colors: Palette::default(),
        }
    }
}

impl BackdropConfig {
    /// Returns a copy every drawing routine can trust: finite numbers, gaps
    /// of at least one pixel and a field of view inside a full turn.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let or_default = |value: f64, default: f64| if value.is_finite() { value } else { default };

        self.fov = or_default(self.fov, DEFAULT_FOV_DEGREES).clamp(0.0, 360.0);
        self.speed = or_default(self.speed, DEFAULT_SPEED);
        self.rings_gap = or_default(self.rings_gap, DEFAULT_RINGS_GAP).max(1.0);
        self.grid_gap = or_default(self.grid_gap, DEFAULT_GRID_GAP).max(1.0);
        self.mesh_density_base = or_default(self.mesh_density_base, DEFAULT_MESH_DENSITY_BASE);
        if self.mesh_density_base <= 0.0 {
            self.mesh_density_base = DEFAULT_MESH_DENSITY_BASE;
        }
        if self.mount.trim().is_empty() {
            self.mount = DEFAULT_MOUNT.to_string();
        }
        self
    }

    pub fn fov_radians(&self) -> f64 {
        self.fov.to_radians()
    }

    /// Reads a loosely typed options object field by field. A field that
    /// cannot be used keeps its default and is logged; the rest still apply.
    /// Numbers follow unary `+`, and `density` rounds up since it bounds a
    /// `i < density` loop.
    pub fn from_options(options: &Value) -> Self {
        let mut config = Self::default();
        let Value::Object(fields) = options else {
            return config;
        };

        for (key, value) in fields {
            if value.is_null() {
                continue;
            }
            match key.as_str() {
                "mount" => match value.as_str() {
                    Some(mount) => config.mount = mount.to_string(),
                    None => log::warn!("ignoring non-string mount option"),
                },
                "fov" => config.fov = option_number(value),
                "speed" => config.speed = option_number(value),
                "ringsGap" => config.rings_gap = option_number(value),
                "gridGap" => config.grid_gap = option_number(value),
                "meshDensityBase" => config.mesh_density_base = option_number(value),
                "density" => config.density = option_number(value).ceil().max(0.0) as usize,
                "colors" => config.colors = Palette::from_options(value),
                _ => {}
            }
        }
        config
    }
}

fn option_number(value: &Value) -> f64 {
    match value {
        Value::Number(number) => NumericInput::Number(number.as_f64().unwrap_or(f64::NAN)),
        Value::String(text) => NumericInput::Text(text.as_str()),
        Value::Bool(flag) => NumericInput::Bool(*flag),
        _ => NumericInput::Number(f64::NAN),
    }
    .coerce()
}

/// Colors for every visual layer.
///
/// `beam_dot`, `link` and `mesh_link` are drawn with a per-element alpha, so
/// only their RGB channels are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Palette {
    pub beam_start: Rgba,
    pub beam_end: Rgba,
    pub beam_wash: Rgba,
    pub beam_edge: Rgba,
    pub ring: Rgba,
    pub grid: Rgba,
    pub bg_dot: Rgba,
    pub beam_dot: Rgba,
    pub link: Rgba,
    pub halo0: Rgba,
    pub halo1: Rgba,
    pub halo_fade: Rgba,
    pub mesh_dot: Rgba,
    pub mesh_link: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            beam_start: Rgba::new(64, 224, 208, 0.16),
            beam_end: Rgba::new(255, 255, 255, 0.04),
            beam_wash: Rgba::new(125, 236, 255, 0.03),
            beam_edge: Rgba::new(126, 234, 217, 0.55),
            ring: Rgba::new(0, 169, 149, 0.06),
            grid: Rgba::new(0, 144, 255, 0.40),
            bg_dot: Rgba::new(34, 148, 175, 0.08),
            beam_dot: Rgba::new(0, 198, 169, 1.0),
            link: Rgba::new(0, 144, 255, 1.0),
            halo0: Rgba::new(167, 247, 236, 0.14),
            halo1: Rgba::new(186, 230, 253, 0.08),
            halo_fade: Rgba::new(186, 230, 253, 0.0),
            mesh_dot: Rgba::new(0, 144, 255, 0.07),
            mesh_link: Rgba::new(0, 144, 255, 1.0),
        }
    }
}

impl Palette {
    /// Overrides the default palette with every valid color in `options`.
    /// Unparseable colors are logged and skipped.
    pub fn from_options(options: &Value) -> Self {
        let Value::Object(overrides) = options else {
            log::warn!("ignoring non-object colors option");
            return Self::default();
        };
        let Ok(Value::Object(mut merged)) = serde_json::to_value(Self::default()) else {
            return Self::default();
        };

        for (key, color) in overrides {
            if !merged.contains_key(key) {
                continue;
            }
            match serde_json::from_value::<Rgba>(color.clone()) {
                Ok(_) => {
                    merged.insert(key.clone(), color.clone());
                }
                Err(err) => log::warn!("ignoring colors.{key}: {err}"),
            }
        }
        serde_json::from_value(Value::Object(merged)).unwrap_or_default()
    }
}
