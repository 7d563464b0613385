//! Design constants of the scene, grouped per layer.
//!
//! [`SceneConfig::default`] holds the sunset scene as shipped: 38 reflection bands, 30 wave bands,
//! 90 sparkles and the two named figures. Every field can be overridden from JSON (missing fields
//! fall back to their defaults).

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::core::Rgba;
use crate::foundation::error::{ShorelineError, ShorelineResult};

/// One stop of a gradient paint.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GradientStop {
    /// Position along the gradient in `[0, 1]`.
    pub offset: f32,
    /// Stop color.
    pub color: Rgba,
}

impl GradientStop {
    /// Build a stop.
    pub fn new(offset: f32, color: Rgba) -> Self {
        Self { offset, color }
    }
}

fn stop(offset: f32, r: u8, g: u8, b: u8, a: f32) -> GradientStop {
    GradientStop::new(offset, Rgba::new(r, g, b, a))
}

/// Drop-shadow styling, in viewport units.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShadowStyle {
    /// Shadow color.
    pub color: Rgba,
    /// Blur radius (canvas `shadowBlur` semantics: Gaussian sigma is half of it).
    pub blur: f64,
    /// Horizontal offset.
    pub offset_x: f64,
    /// Vertical offset.
    pub offset_y: f64,
}

/// Sky stop whose RGB channels swing with the slow ambient pulse.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PulsingStop {
    /// Position along the sky gradient.
    pub offset: f32,
    /// Channel values at pulse 0.
    pub base: [f64; 3],
    /// Channel increase at pulse 1.
    pub swing: [f64; 3],
}

/// Horizon, beach and character placement.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Sky/ocean boundary as a fraction of viewport height.
    pub horizon_frac: f64,
    /// Ocean/sand boundary as a fraction of viewport height.
    pub beach_frac: f64,
    /// Fraction of the sand band (below the beach line) where figures sit.
    pub sit_frac: f64,
    /// Horizontal distance of each figure from the centre.
    pub character_offset: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            horizon_frac: 0.56,
            beach_frac: 0.78,
            sit_frac: 0.55,
            character_offset: 90.0,
        }
    }
}

/// Sky gradient with a slow color pulse.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SkyConfig {
    /// Angular rate of the color pulse (rad/s).
    pub pulse_rate: f64,
    /// Gradient stops from the top of the viewport down to the horizon.
    pub stops: Vec<PulsingStop>,
}

impl Default for SkyConfig {
    fn default() -> Self {
        Self {
            pulse_rate: 0.25,
            stops: vec![
                PulsingStop {
                    offset: 0.0,
                    base: [42.0, 43.0, 111.0],
                    swing: [10.0, 6.0, 10.0],
                },
                PulsingStop {
                    offset: 0.5,
                    base: [255.0, 85.0, 120.0],
                    swing: [0.0, 20.0, 10.0],
                },
                PulsingStop {
                    offset: 1.0,
                    base: [255.0, 175.0, 90.0],
                    swing: [0.0, 20.0, 10.0],
                },
            ],
        }
    }
}

/// Sun disk with its radial halo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SunConfig {
    /// Horizontal position as a fraction of viewport width.
    pub x_frac: f64,
    /// Rest position above the horizon, as a fraction of viewport height.
    pub lift_frac: f64,
    /// Vertical bob, in viewport units.
    pub bob_amplitude: f64,
    /// Angular rate of the bob (rad/s).
    pub bob_rate: f64,
    /// Disk radius as a fraction of the shorter viewport side.
    pub radius_frac: f64,
    /// Inner glow radius, as a multiple of the disk radius.
    pub glow_inner: f64,
    /// Outer glow radius, as a multiple of the disk radius.
    pub glow_outer: f64,
    /// Radial stops of the halo.
    pub glow_stops: Vec<GradientStop>,
    /// Inner radius of the disk gradient, as a multiple of the disk radius.
    pub disk_inner: f64,
    /// Radial stops of the disk.
    pub disk_stops: Vec<GradientStop>,
}

impl Default for SunConfig {
    fn default() -> Self {
        Self {
            x_frac: 0.5,
            lift_frac: 0.08,
            bob_amplitude: 6.0,
            bob_rate: 0.25,
            radius_frac: 0.085,
            glow_inner: 0.3,
            glow_outer: 3.0,
            glow_stops: vec![
                stop(0.0, 255, 255, 255, 0.35),
                stop(0.35, 255, 220, 160, 0.22),
                stop(1.0, 255, 170, 120, 0.0),
            ],
            disk_inner: 0.2,
            disk_stops: vec![
                stop(0.0, 255, 255, 255, 0.98),
                stop(0.55, 255, 245, 220, 0.98),
                stop(1.0, 255, 210, 150, 0.98),
            ],
        }
    }
}

/// A vertical band filled with a gradient (ocean, sand).
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BandConfig {
    /// Stops from the top edge of the band to its bottom edge.
    pub stops: Vec<GradientStop>,
}

impl BandConfig {
    fn ocean() -> Self {
        Self {
            stops: vec![stop(0.0, 9, 42, 68, 0.92), stop(1.0, 6, 24, 45, 0.98)],
        }
    }

    fn sand() -> Self {
        Self {
            stops: vec![stop(0.0, 35, 18, 16, 0.92), stop(1.0, 10, 8, 12, 0.98)],
        }
    }
}

/// Horizontal bands of sun reflection on the water.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ReflectionConfig {
    /// Number of shimmer bands between horizon and beach.
    pub bands: u32,
    /// Widest band, as a fraction of viewport width.
    pub width_frac: f64,
    /// Narrowest band, as a fraction of the widest.
    pub min_width_frac: f64,
    /// Gap below the horizon before the first band.
    pub top_inset: f64,
    /// Gap above the beach line after the last band.
    pub bottom_inset: f64,
    /// Global alpha applied to every band.
    pub alpha: f32,
    /// Angular rates of the two summed shimmer sinusoids.
    pub wave_rates: [f64; 2],
    /// Per-band phase step of the two shimmer sinusoids.
    pub wave_band_phase: [f64; 2],
    /// Share of the band width that follows the shimmer.
    pub width_wobble: f64,
    /// Vertical shimmer displacement, in viewport units.
    pub vertical_wobble: f64,
    /// Height of a regular band.
    pub band_height: f64,
    /// Every n-th band is one unit thicker.
    pub thick_every: u32,
    /// Vertical stops shared by all bands, horizon to beach.
    pub stops: Vec<GradientStop>,
}

impl Default for ReflectionConfig {
    fn default() -> Self {
        Self {
            bands: 38,
            width_frac: 0.30,
            min_width_frac: 0.15,
            top_inset: 8.0,
            bottom_inset: 14.0,
            alpha: 0.85,
            wave_rates: [1.6, 0.9],
            wave_band_phase: [0.55, 0.9],
            width_wobble: 0.15,
            vertical_wobble: 3.0,
            band_height: 2.0,
            thick_every: 3,
            stops: vec![
                stop(0.0, 255, 230, 170, 0.55),
                stop(0.45, 255, 200, 150, 0.18),
                stop(1.0, 255, 180, 120, 0.0),
            ],
        }
    }
}

/// Translucent wave bands drawn over the ocean.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WaveConfig {
    /// Number of wave bands between horizon and beach.
    pub bands: u32,
    /// Global alpha applied to every band.
    pub alpha: f32,
    /// Fill color of a band.
    pub color: Rgba,
    /// Horizontal distance between samples of a band's top edge.
    pub sample_step: f64,
    /// Amplitude of the first band.
    pub base_amplitude: f64,
    /// Amplitude added per band index.
    pub amplitude_per_band: f64,
    /// Factor applied to the amplitude when sampling the edge.
    pub amplitude_scale: f64,
    /// Spatial frequency of the edge (rad per unit).
    pub spatial_freq: f64,
    /// Angular rate of the travelling wave (rad/s).
    pub time_rate: f64,
    /// Phase offset per band index.
    pub band_phase: f64,
    /// Distance from the band baseline to its flat bottom edge.
    pub thickness: f64,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            bands: 30,
            alpha: 0.35,
            color: Rgba::new(255, 255, 255, 0.25),
            sample_step: 18.0,
            base_amplitude: 6.0,
            amplitude_per_band: 0.06,
            amplitude_scale: 0.18,
            spatial_freq: 0.012,
            time_rate: 1.25,
            band_phase: 0.35,
            thickness: 6.0,
        }
    }
}

/// Radial darkening towards the viewport edges.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VignetteConfig {
    /// Centre height as a fraction of viewport height.
    pub center_y_frac: f64,
    /// Inner radius as a fraction of the shorter viewport side.
    pub inner: f64,
    /// Outer radius as a fraction of the shorter viewport side.
    pub outer: f64,
    /// Radial stops, inner to outer.
    pub stops: Vec<GradientStop>,
}

impl Default for VignetteConfig {
    fn default() -> Self {
        Self {
            center_y_frac: 0.6,
            inner: 0.25,
            outer: 0.85,
            stops: vec![stop(0.0, 0, 0, 0, 0.0), stop(1.0, 0, 0, 0, 0.36)],
        }
    }
}

/// Sky sparkles: particle initialization, drift and twinkle.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SparkleConfig {
    /// Number of particles, fixed for the renderer lifetime.
    pub count: usize,
    /// Phase advance per painted frame, before scaling by the particle's drift speed.
    pub phase_step: f64,
    /// Angular rate of the twinkle (rad/s).
    pub twinkle_rate: f64,
    /// Twinkle phase per unit of particle phase.
    pub twinkle_phase: f64,
    /// Angular rate of the horizontal drift (rad/s).
    pub drift_x_rate: f64,
    /// Horizontal drift phase per unit of particle phase.
    pub drift_x_phase: f64,
    /// Horizontal drift, in viewport units.
    pub drift_x_amplitude: f64,
    /// Angular rate of the vertical drift (rad/s).
    pub drift_y_rate: f64,
    /// Vertical drift phase per unit of particle phase.
    pub drift_y_phase: f64,
    /// Vertical drift, in viewport units.
    pub drift_y_amplitude: f64,
    /// Fraction of viewport height the sparkles spread over.
    pub sky_band: f64,
    /// Radius multiplier at twinkle 0.
    pub radius_base: f64,
    /// Radius multiplier added at twinkle 1.
    pub radius_twinkle: f64,
    /// Alpha at twinkle 0.
    pub alpha_base: f64,
    /// Alpha added at twinkle 1.
    pub alpha_twinkle: f64,
    /// Initial radius range `[min, min + span)`.
    pub radius_range: [f64; 2],
    /// Initial drift speed range `[min, min + span)`.
    pub speed_range: [f64; 2],
    /// Initial twinkle weight range `[min, min + span)`.
    pub weight_range: [f64; 2],
}

impl Default for SparkleConfig {
    fn default() -> Self {
        Self {
            count: 90,
            phase_step: 0.003,
            twinkle_rate: 1.3,
            twinkle_phase: 6.0,
            drift_x_rate: 0.08,
            drift_x_phase: 3.2,
            drift_x_amplitude: 18.0,
            drift_y_rate: 0.06,
            drift_y_phase: 2.4,
            drift_y_amplitude: 10.0,
            sky_band: 0.55,
            radius_base: 0.6,
            radius_twinkle: 0.8,
            alpha_base: 0.08,
            alpha_twinkle: 0.22,
            radius_range: [0.6, 1.8],
            speed_range: [0.1, 0.35],
            weight_range: [0.6, 1.2],
        }
    }
}

/// Elliptical contact shadows under the figures.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GroundShadowConfig {
    /// Ellipse centre offset below the sit line.
    pub drop: f64,
    /// Horizontal ellipse radius.
    pub radius_x: f64,
    /// Vertical ellipse radius.
    pub radius_y: f64,
    /// Fill color.
    pub color: Rgba,
    /// Global alpha applied to both ellipses.
    pub alpha: f32,
}

impl Default for GroundShadowConfig {
    fn default() -> Self {
        Self {
            drop: 18.0,
            radius_x: 80.0,
            radius_y: 18.0,
            color: Rgba::new(0, 0, 0, 0.55),
            alpha: 0.5,
        }
    }
}

/// Block silhouettes of the two seated characters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    /// Uniform scale of both silhouettes.
    pub scale: f64,
    /// Angular rate of the rocking motion (rad/s).
    pub rock_rate: f64,
    /// Rocking amplitude, in radians.
    pub rock_amplitude: f64,
    /// Rest tilt of the left figure, in radians.
    pub left_tilt: f64,
    /// Rest tilt of the right figure, in radians.
    pub right_tilt: f64,
    /// Local y of the fill gradient start (before scaling).
    pub gradient_top: f64,
    /// Local y of the fill gradient end (before scaling).
    pub gradient_bottom: f64,
    /// Vertical fill stops shared by all blocks.
    pub stops: Vec<GradientStop>,
    /// Drop shadow cast by the silhouette.
    pub shadow: ShadowStyle,
    /// Global alpha of the two arm blocks.
    pub arm_alpha: f32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rock_rate: 0.9,
            rock_amplitude: 0.015,
            left_tilt: -0.05,
            right_tilt: 0.04,
            gradient_top: -220.0,
            gradient_bottom: 40.0,
            stops: vec![stop(0.0, 20, 12, 10, 0.96), stop(1.0, 8, 6, 8, 0.98)],
            shadow: ShadowStyle {
                color: Rgba::new(0, 0, 0, 0.6),
                blur: 30.0,
                offset_x: 0.0,
                offset_y: 18.0,
            },
            arm_alpha: 0.95,
        }
    }
}

/// Name pills above the characters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Left and right label text.
    pub names: Vec<String>,
    /// Label centre height above the sit line.
    pub rise: f64,
    /// Uniform scale of the label.
    pub scale: f64,
    /// Font size at scale 1, floored after scaling.
    pub font_size: f64,
    /// Horizontal padding on each side of the text.
    pub padding_x: f64,
    /// Extra backing height added to the line height.
    pub padding_y: f64,
    /// Line height of the backing at scale 1.
    pub line_height: f64,
    /// Backing corner radius, clamped to half the backing size.
    pub corner_radius: f64,
    /// Backing fill color.
    pub backing: Rgba,
    /// Drop shadow of the backing.
    pub backing_shadow: ShadowStyle,
    /// Text color.
    pub text: Rgba,
    /// Drop shadow of the text.
    pub text_shadow: ShadowStyle,
    /// CSS-style family list resolved against system fonts.
    pub font_family: String,
    /// Optional TTF/OTF file used instead of system fonts.
    pub font_path: Option<PathBuf>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            names: vec!["Isabel".to_owned(), "Angelina".to_owned()],
            rise: 205.0,
            scale: 1.0,
            font_size: 16.0,
            padding_x: 12.0,
            padding_y: 8.0,
            line_height: 28.0,
            corner_radius: 12.0,
            backing: Rgba::new(0, 0, 0, 0.22),
            backing_shadow: ShadowStyle {
                color: Rgba::new(0, 0, 0, 0.35),
                blur: 20.0,
                offset_x: 0.0,
                offset_y: 10.0,
            },
            text: Rgba::new(255, 255, 255, 0.92),
            text_shadow: ShadowStyle {
                color: Rgba::new(0, 0, 0, 0.35),
                blur: 10.0,
                offset_x: 0.0,
                offset_y: 6.0,
            },
            font_family: "ui-sans-serif, system-ui, sans-serif".to_owned(),
            font_path: None,
        }
    }
}

/// Ambient glow blended over the characters.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GlowConfig {
    /// Centre height above the sit line.
    pub rise: f64,
    /// Rest radius.
    pub radius: f64,
    /// Radius swing of the breathing motion.
    pub breathe_amplitude: f64,
    /// Angular rate of the breathing motion (rad/s).
    pub breathe_rate: f64,
    /// Radial stops, centre outwards.
    pub stops: Vec<GradientStop>,
}

impl Default for GlowConfig {
    fn default() -> Self {
        Self {
            rise: 90.0,
            radius: 120.0,
            breathe_amplitude: 8.0,
            breathe_rate: 1.1,
            stops: vec![
                stop(0.0, 255, 210, 170, 0.12),
                stop(0.55, 255, 160, 140, 0.05),
                stop(1.0, 255, 160, 140, 0.0),
            ],
        }
    }
}

/// Complete configuration table of the scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Seed for particle initialization; equal seeds give identical animations.
    pub seed: u64,
    /// Horizon, beach and figure placement.
    pub layout: LayoutConfig,
    /// Pulsing sky gradient.
    pub sky: SkyConfig,
    /// Sun disk and halo.
    pub sun: SunConfig,
    /// Ocean band between horizon and beach.
    pub ocean: BandConfig,
    /// Shimmering sun reflection on the water.
    pub reflection: ReflectionConfig,
    /// Translucent wave bands.
    pub waves: WaveConfig,
    /// Sand band below the beach line.
    pub sand: BandConfig,
    /// Darkened edges.
    pub vignette: VignetteConfig,
    /// Twinkling sky particles.
    pub sparkles: SparkleConfig,
    /// Contact shadows under the figures.
    pub ground_shadows: GroundShadowConfig,
    /// Seated silhouettes.
    pub figures: FigureConfig,
    /// Name labels above the figures.
    pub labels: LabelConfig,
    /// Ambient glow around the figures.
    pub glow: GlowConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EA5_1DE,
            layout: LayoutConfig::default(),
            sky: SkyConfig::default(),
            sun: SunConfig::default(),
            ocean: BandConfig::ocean(),
            reflection: ReflectionConfig::default(),
            waves: WaveConfig::default(),
            sand: BandConfig::sand(),
            vignette: VignetteConfig::default(),
            sparkles: SparkleConfig::default(),
            ground_shadows: GroundShadowConfig::default(),
            figures: FigureConfig::default(),
            labels: LabelConfig::default(),
            glow: GlowConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> ShorelineResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShorelineError::validation(format!("open scene config '{}': {e}", path.display()))
        })?;
        let cfg: Self = serde_json::from_reader(BufReader::new(f))
            .map_err(|e| ShorelineError::serde(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse and validate a JSON configuration string.
    pub fn from_json_str(json: &str) -> ShorelineResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| ShorelineError::serde(format!("parse scene config JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pretty-printed JSON form of this configuration.
    pub fn to_json_pretty(&self) -> ShorelineResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ShorelineError::serde(format!("serialize scene config: {e}")))
    }

    /// Check structural constraints the painters rely on.
    ///
    /// Every number must be finite; counts, rates and radii must be positive.
    pub fn validate(&self) -> ShorelineResult<()> {
        let l = &self.layout;
        if !(0.0..1.0).contains(&l.horizon_frac)
            || !(0.0..=1.0).contains(&l.beach_frac)
            || l.horizon_frac >= l.beach_frac
        {
            return Err(ShorelineError::validation(
                "layout requires 0 <= horizon_frac < beach_frac <= 1",
            ));
        }
        unit("layout.sit_frac", l.sit_frac)?;
        finite("layout.character_offset", l.character_offset)?;

        positive("sky.pulse_rate", self.sky.pulse_rate)?;
        if self.sky.stops.is_empty() {
            return Err(ShorelineError::validation("sky.stops must not be empty"));
        }
        for s in &self.sky.stops {
            for v in s.base.iter().chain(&s.swing) {
                finite("sky.stops channel", *v)?;
            }
        }

        let sun = &self.sun;
        finite("sun.x_frac", sun.x_frac)?;
        finite("sun.lift_frac", sun.lift_frac)?;
        finite("sun.bob_amplitude", sun.bob_amplitude)?;
        positive("sun.bob_rate", sun.bob_rate)?;
        positive("sun.radius_frac", sun.radius_frac)?;
        non_negative("sun.glow_inner", sun.glow_inner)?;
        positive("sun.glow_outer", sun.glow_outer)?;
        non_negative("sun.disk_inner", sun.disk_inner)?;

        let r = &self.reflection;
        if r.bands < 2 {
            return Err(ShorelineError::validation(
                "reflection.bands must be at least 2",
            ));
        }
        if r.thick_every == 0 {
            return Err(ShorelineError::validation(
                "reflection.thick_every must be > 0",
            ));
        }
        positive("reflection.width_frac", r.width_frac)?;
        non_negative("reflection.min_width_frac", r.min_width_frac)?;
        finite("reflection.top_inset", r.top_inset)?;
        finite("reflection.bottom_inset", r.bottom_inset)?;
        alpha("reflection.alpha", r.alpha)?;
        for (rate, phase) in r.wave_rates.iter().zip(&r.wave_band_phase) {
            positive("reflection.wave_rates", *rate)?;
            finite("reflection.wave_band_phase", *phase)?;
        }
        finite("reflection.width_wobble", r.width_wobble)?;
        finite("reflection.vertical_wobble", r.vertical_wobble)?;
        positive("reflection.band_height", r.band_height)?;

        let w = &self.waves;
        if w.bands == 0 {
            return Err(ShorelineError::validation("waves.bands must be > 0"));
        }
        if !w.sample_step.is_finite() || w.sample_step < MIN_WAVE_SAMPLE_STEP {
            return Err(ShorelineError::validation(format!(
                "waves.sample_step must be finite and >= {MIN_WAVE_SAMPLE_STEP}, got {}",
                w.sample_step
            )));
        }
        alpha("waves.alpha", w.alpha)?;
        finite("waves.base_amplitude", w.base_amplitude)?;
        finite("waves.amplitude_per_band", w.amplitude_per_band)?;
        finite("waves.amplitude_scale", w.amplitude_scale)?;
        finite("waves.spatial_freq", w.spatial_freq)?;
        positive("waves.time_rate", w.time_rate)?;
        finite("waves.band_phase", w.band_phase)?;
        positive("waves.thickness", w.thickness)?;

        let v = &self.vignette;
        finite("vignette.center_y_frac", v.center_y_frac)?;
        non_negative("vignette.inner", v.inner)?;
        if !(v.outer.is_finite() && v.outer > v.inner) {
            return Err(ShorelineError::validation(
                "vignette.outer must be finite and larger than vignette.inner",
            ));
        }

        let sp = &self.sparkles;
        if sp.count == 0 {
            return Err(ShorelineError::validation("sparkles.count must be > 0"));
        }
        positive("sparkles.phase_step", sp.phase_step)?;
        positive("sparkles.twinkle_rate", sp.twinkle_rate)?;
        positive("sparkles.drift_x_rate", sp.drift_x_rate)?;
        positive("sparkles.drift_y_rate", sp.drift_y_rate)?;
        for (name, v) in [
            ("sparkles.twinkle_phase", sp.twinkle_phase),
            ("sparkles.drift_x_phase", sp.drift_x_phase),
            ("sparkles.drift_x_amplitude", sp.drift_x_amplitude),
            ("sparkles.drift_y_phase", sp.drift_y_phase),
            ("sparkles.drift_y_amplitude", sp.drift_y_amplitude),
            ("sparkles.sky_band", sp.sky_band),
            ("sparkles.radius_base", sp.radius_base),
            ("sparkles.radius_twinkle", sp.radius_twinkle),
            ("sparkles.alpha_base", sp.alpha_base),
            ("sparkles.alpha_twinkle", sp.alpha_twinkle),
        ] {
            finite(name, v)?;
        }
        positive("sparkles.radius_range min", sp.radius_range[0])?;
        positive("sparkles.speed_range min", sp.speed_range[0])?;
        finite("sparkles.weight_range min", sp.weight_range[0])?;
        for (name, range) in [
            ("sparkles.radius_range span", sp.radius_range),
            ("sparkles.speed_range span", sp.speed_range),
            ("sparkles.weight_range span", sp.weight_range),
        ] {
            non_negative(name, range[1])?;
        }

        let g = &self.ground_shadows;
        finite("ground_shadows.drop", g.drop)?;
        positive("ground_shadows.radius_x", g.radius_x)?;
        positive("ground_shadows.radius_y", g.radius_y)?;
        alpha("ground_shadows.alpha", g.alpha)?;

        let f = &self.figures;
        positive("figures.scale", f.scale)?;
        positive("figures.rock_rate", f.rock_rate)?;
        finite("figures.rock_amplitude", f.rock_amplitude)?;
        finite("figures.left_tilt", f.left_tilt)?;
        finite("figures.right_tilt", f.right_tilt)?;
        finite("figures.gradient_top", f.gradient_top)?;
        finite("figures.gradient_bottom", f.gradient_bottom)?;
        alpha("figures.arm_alpha", f.arm_alpha)?;
        shadow("figures.shadow", &f.shadow)?;

        let lb = &self.labels;
        if lb.names.len() != 2 {
            return Err(ShorelineError::validation(format!(
                "labels.names must hold exactly 2 names, got {}",
                lb.names.len()
            )));
        }
        positive("labels.scale", lb.scale)?;
        positive("labels.font_size", lb.font_size)?;
        finite("labels.rise", lb.rise)?;
        non_negative("labels.padding_x", lb.padding_x)?;
        non_negative("labels.padding_y", lb.padding_y)?;
        positive("labels.line_height", lb.line_height)?;
        non_negative("labels.corner_radius", lb.corner_radius)?;
        shadow("labels.backing_shadow", &lb.backing_shadow)?;
        shadow("labels.text_shadow", &lb.text_shadow)?;

        let gl = &self.glow;
        finite("glow.rise", gl.rise)?;
        positive("glow.radius", gl.radius)?;
        positive("glow.breathe_rate", gl.breathe_rate)?;
        non_negative("glow.breathe_amplitude", gl.breathe_amplitude)?;
        if gl.breathe_amplitude >= gl.radius {
            return Err(ShorelineError::validation(
                "glow.breathe_amplitude must be smaller than glow.radius",
            ));
        }

        let gradients: [(&str, &[GradientStop]); 8] = [
            ("sun.glow_stops", &self.sun.glow_stops),
            ("sun.disk_stops", &self.sun.disk_stops),
            ("ocean.stops", &self.ocean.stops),
            ("reflection.stops", &self.reflection.stops),
            ("sand.stops", &self.sand.stops),
            ("vignette.stops", &self.vignette.stops),
            ("figures.stops", &self.figures.stops),
            ("glow.stops", &self.glow.stops),
        ];
        for (name, stops) in gradients {
            validate_stops(name, stops.iter().map(|s| s.offset))?;
        }
        validate_stops("sky.stops", self.sky.stops.iter().map(|s| s.offset))?;
        Ok(())
    }
}

/// Smallest horizontal spacing between wave samples, in viewport units.
pub const MIN_WAVE_SAMPLE_STEP: f64 = 1.0;

fn finite(name: &str, v: f64) -> ShorelineResult<()> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(ShorelineError::validation(format!(
            "{name} must be finite, got {v}"
        )))
    }
}

fn positive(name: &str, v: f64) -> ShorelineResult<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(ShorelineError::validation(format!(
            "{name} must be finite and > 0, got {v}"
        )))
    }
}

fn non_negative(name: &str, v: f64) -> ShorelineResult<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(ShorelineError::validation(format!(
            "{name} must be finite and >= 0, got {v}"
        )))
    }
}

fn unit(name: &str, v: f64) -> ShorelineResult<()> {
    if (0.0..=1.0).contains(&v) {
        Ok(())
    } else {
        Err(ShorelineError::validation(format!(
            "{name} must lie in [0, 1], got {v}"
        )))
    }
}

fn alpha(name: &str, v: f32) -> ShorelineResult<()> {
    unit(name, f64::from(v))
}

fn shadow(name: &str, s: &ShadowStyle) -> ShorelineResult<()> {
    non_negative(&format!("{name}.blur"), s.blur)?;
    finite(&format!("{name}.offset_x"), s.offset_x)?;
    finite(&format!("{name}.offset_y"), s.offset_y)
}

fn validate_stops(name: &str, offsets: impl Iterator<Item = f32>) -> ShorelineResult<()> {
    let mut prev = 0.0f32;
    let mut n = 0usize;
    for off in offsets {
        if !(0.0..=1.0).contains(&off) || off < prev {
            return Err(ShorelineError::validation(format!(
                "{name}: stop offsets must be ascending within [0, 1]"
            )));
        }
        prev = off;
        n += 1;
    }
    if n == 0 {
        return Err(ShorelineError::validation(format!(
            "{name}: at least one stop is required"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/scene/config.rs"]
mod tests;
