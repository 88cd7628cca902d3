use crate::error::{ensure_finite, ensure_positive, ConfigError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breathing: BreathingConfig,

    #[serde(default)]
    pub road: RoadConfig,

    #[serde(default)]
    pub carousel: CarouselConfig,

    #[serde(default)]
    pub parallax: ParallaxConfig,
}

/// Timing of the guided breathing session. All durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_prepare_ms")]
    pub prepare_ms: u64,
    #[serde(default = "default_inhale_ms")]
    pub inhale_ms: u64,
    #[serde(default = "default_hold_ms")]
    pub hold_ms: u64,
    #[serde(default = "default_exhale_ms")]
    pub exhale_ms: u64,
    #[serde(default = "default_cycles")]
    pub cycles: u32,
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Session-elapsed boundaries between narrative bands.
    #[serde(default = "default_narrative_thresholds_ms")]
    pub narrative_thresholds_ms: Vec<u64>,
    /// CSS `cubic-bezier(x1, y1, x2, y2)` used for the sphere shrink.
    #[serde(default = "default_sphere_easing")]
    pub sphere_easing: [f64; 4],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadConfig {
    #[serde(default = "default_road_p0")]
    pub p0: [f64; 2],
    #[serde(default = "default_road_p1")]
    pub p1: [f64; 2],
    #[serde(default = "default_road_p2")]
    pub p2: [f64; 2],
    #[serde(default = "default_milestones")]
    pub milestones: Vec<f64>,
    #[serde(default = "default_lead_in")]
    pub lead_in: f64,
    #[serde(default = "default_trigger_start_fraction")]
    pub trigger_start_fraction: f64,
    #[serde(default = "default_trigger_end_offset")]
    pub trigger_end_offset: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarouselConfig {
    #[serde(default = "default_item_count")]
    pub item_count: usize,
    #[serde(default = "default_breakpoint_width")]
    pub breakpoint_width: f64,
    #[serde(default = "default_mobile_layout")]
    pub mobile: CarouselLayout,
    #[serde(default = "default_desktop_layout")]
    pub desktop: CarouselLayout,
    #[serde(default = "default_min_opacity")]
    pub min_opacity: f64,
    #[serde(default = "default_max_opacity")]
    pub max_opacity: f64,
    #[serde(default = "default_base_scale")]
    pub base_scale: f64,
    #[serde(default = "default_scale_gain")]
    pub scale_gain: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CarouselLayout {
    pub item_extent: f64,
    pub start_offset: f64,
    pub focal_center: f64,
    pub falloff_radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    #[serde(default = "default_max_shift_px")]
    pub max_shift_px: f64,
    #[serde(default = "default_tilt_range_deg")]
    pub tilt_range_deg: f64,
    #[serde(default = "default_tilt_neutral_beta")]
    pub tilt_neutral_beta: f64,
    #[serde(default = "default_wheel_sensitivity")]
    pub wheel_sensitivity: f64,
    #[serde(default = "default_min_zoom")]
    pub min_zoom: f64,
    #[serde(default = "default_max_zoom")]
    pub max_zoom: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breathing: BreathingConfig::default(),
            road: RoadConfig::default(),
            carousel: CarouselConfig::default(),
            parallax: ParallaxConfig::default(),
        }
    }
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            prepare_ms: default_prepare_ms(),
            inhale_ms: default_inhale_ms(),
            hold_ms: default_hold_ms(),
            exhale_ms: default_exhale_ms(),
            cycles: default_cycles(),
            poll_interval_ms: default_poll_interval_ms(),
            narrative_thresholds_ms: default_narrative_thresholds_ms(),
            sphere_easing: default_sphere_easing(),
        }
    }
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            p0: default_road_p0(),
            p1: default_road_p1(),
            p2: default_road_p2(),
            milestones: default_milestones(),
            lead_in: default_lead_in(),
            trigger_start_fraction: default_trigger_start_fraction(),
            trigger_end_offset: default_trigger_end_offset(),
        }
    }
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_count: default_item_count(),
            breakpoint_width: default_breakpoint_width(),
            mobile: default_mobile_layout(),
            desktop: default_desktop_layout(),
            min_opacity: default_min_opacity(),
            max_opacity: default_max_opacity(),
            base_scale: default_base_scale(),
            scale_gain: default_scale_gain(),
        }
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            max_shift_px: default_max_shift_px(),
            tilt_range_deg: default_tilt_range_deg(),
            tilt_neutral_beta: default_tilt_neutral_beta(),
            wheel_sensitivity: default_wheel_sensitivity(),
            min_zoom: default_min_zoom(),
            max_zoom: default_max_zoom(),
        }
    }
}

fn default_prepare_ms() -> u64 {
    4000
}

fn default_inhale_ms() -> u64 {
    4000
}

fn default_hold_ms() -> u64 {
    7000
}

fn default_exhale_ms() -> u64 {
    8000
}

fn default_cycles() -> u32 {
    4
}

fn default_poll_interval_ms() -> u64 {
    50
}

fn default_narrative_thresholds_ms() -> Vec<u64> {
    vec![15000, 40000, 65000]
}

fn default_sphere_easing() -> [f64; 4] {
    [0.25, 1.0, 0.5, 1.0]
}

// Road layout is drawn in a 1200x500 box; the ends overhang it by 10%.
fn default_road_p0() -> [f64; 2] {
    [-120.0, 350.0]
}

fn default_road_p1() -> [f64; 2] {
    [600.0, 200.0]
}

fn default_road_p2() -> [f64; 2] {
    [1320.0, 350.0]
}

fn default_milestones() -> Vec<f64> {
    vec![0.15, 0.5, 0.85]
}

fn default_lead_in() -> f64 {
    0.05
}

fn default_trigger_start_fraction() -> f64 {
    0.6
}

fn default_trigger_end_offset() -> f64 {
    -50.0
}

fn default_item_count() -> usize {
    6
}

fn default_breakpoint_width() -> f64 {
    768.0
}

fn default_mobile_layout() -> CarouselLayout {
    CarouselLayout {
        item_extent: 240.0,
        start_offset: 100.0,
        focal_center: 200.0,
        falloff_radius: 250.0,
    }
}

fn default_desktop_layout() -> CarouselLayout {
    CarouselLayout {
        item_extent: 280.0,
        start_offset: 100.0,
        focal_center: 300.0,
        falloff_radius: 350.0,
    }
}

fn default_min_opacity() -> f64 {
    0.1
}

fn default_max_opacity() -> f64 {
    1.0
}

fn default_base_scale() -> f64 {
    0.95
}

fn default_scale_gain() -> f64 {
    0.05
}

fn default_max_shift_px() -> f64 {
    30.0
}

fn default_tilt_range_deg() -> f64 {
    45.0
}

fn default_tilt_neutral_beta() -> f64 {
    45.0
}

fn default_wheel_sensitivity() -> f64 {
    0.001
}

fn default_min_zoom() -> f64 {
    1.1
}

fn default_max_zoom() -> f64 {
    1.5
}

impl BreathingConfig {
    fn checked_cycle_ms(&self) -> Option<u64> {
        self.inhale_ms
            .checked_add(self.hold_ms)?
            .checked_add(self.exhale_ms)
    }

    fn checked_total_ms(&self) -> Option<u64> {
        self.checked_cycle_ms()?.checked_mul(u64::from(self.cycles))
    }

    /// Saturates on overflow; `validate` rejects such configs.
    pub fn cycle_ms(&self) -> u64 {
        self.checked_cycle_ms().unwrap_or(u64::MAX)
    }

    pub fn total_ms(&self) -> u64 {
        self.checked_total_ms().unwrap_or(u64::MAX)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        // A zero hold or prepare is a valid (if abrupt) session.
        if self.inhale_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "inhale_ms" });
        }
        if self.exhale_ms == 0 {
            return Err(ConfigError::ZeroDuration { field: "exhale_ms" });
        }
        if self.cycles == 0 {
            return Err(ConfigError::ZeroCycles);
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        let total = self
            .checked_total_ms()
            .ok_or(ConfigError::DurationOverflow { field: "session length" })?;
        // Lead-in plus session must still fit on the clock.
        total
            .checked_add(self.prepare_ms)
            .ok_or(ConfigError::DurationOverflow { field: "prepare_ms" })?;
        if self.narrative_thresholds_ms.windows(2).any(|w| w[0] >= w[1]) {
            return Err(ConfigError::UnorderedThresholds(
                self.narrative_thresholds_ms.clone(),
            ));
        }
        for v in self.sphere_easing {
            ensure_finite("sphere_easing", v)?;
        }
        let [x1, _, x2, _] = self.sphere_easing;
        if !(0.0..=1.0).contains(&x1) || !(0.0..=1.0).contains(&x2) {
            return Err(ConfigError::EasingControl { x1, x2 });
        }
        Ok(())
    }
}

impl RoadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for v in self.p0.iter().chain(&self.p1).chain(&self.p2) {
            ensure_finite("road control point", *v)?;
        }
        if !(0.0..1.0).contains(&self.lead_in) {
            return Err(ConfigError::LeadInOutOfRange(self.lead_in));
        }
        if let Some(&bad) = self
            .milestones
            .iter()
            .find(|t| !(0.0..=1.0).contains(*t))
        {
            return Err(ConfigError::MilestoneOutOfRange(bad));
        }
        ensure_finite("trigger_start_fraction", self.trigger_start_fraction)?;
        ensure_finite("trigger_end_offset", self.trigger_end_offset)?;
        Ok(())
    }
}

impl CarouselLayout {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_positive("item_extent", self.item_extent)?;
        ensure_positive("falloff_radius", self.falloff_radius)?;
        ensure_finite("start_offset", self.start_offset)?;
        ensure_finite("focal_center", self.focal_center)?;
        Ok(())
    }
}

impl CarouselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.mobile.validate()?;
        self.desktop.validate()?;
        ensure_finite("breakpoint_width", self.breakpoint_width)?;
        ensure_finite("base_scale", self.base_scale)?;
        ensure_finite("scale_gain", self.scale_gain)?;
        let (min, max) = (self.min_opacity, self.max_opacity);
        if !(0.0..=1.0).contains(&min) || !(0.0..=1.0).contains(&max) || min > max {
            return Err(ConfigError::OpacityBounds { min, max });
        }
        Ok(())
    }
}

impl ParallaxConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_finite("max_shift_px", self.max_shift_px)?;
        ensure_positive("tilt_range_deg", self.tilt_range_deg)?;
        ensure_finite("tilt_neutral_beta", self.tilt_neutral_beta)?;
        ensure_finite("wheel_sensitivity", self.wheel_sensitivity)?;
        let (min, max) = (self.min_zoom, self.max_zoom);
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(ConfigError::ZoomBounds { min, max });
        }
        Ok(())
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.breathing.validate()?;
        self.road.validate()?;
        self.carousel.validate()?;
        self.parallax.validate()?;
        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("sunpath").join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::path()?;

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)
                .with_context(|| format!("reading {}", config_path.display()))?;
            let config = Self::from_toml(&contents)
                .with_context(|| format!("parsing {}", config_path.display()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::path()?;
        if let Some(dir) = config_path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, contents)?;

        Ok(())
    }
}
