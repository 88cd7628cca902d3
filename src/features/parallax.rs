//! Background view that follows the pointer or device tilt and zooms with
//! the wheel.

use crate::config::ParallaxConfig;
use crate::error::ConfigError;
use glam::DVec2;

#[derive(Debug, Clone)]
pub struct ParallaxView {
    config: ParallaxConfig,
    /// Normalized look direction, each axis in [-1, 1].
    pub pos: DVec2,
    pub zoom: f64,
}

impl ParallaxView {
    pub fn new(config: ParallaxConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let zoom = config.min_zoom;
        Ok(Self {
            config,
            pos: DVec2::ZERO,
            zoom,
        })
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64, width: f64, height: f64) {
        if !(width > 0.0 && height > 0.0) {
            return;
        }
        self.pos = DVec2::new(x / width * 2.0 - 1.0, y / height * 2.0 - 1.0);
    }

    /// Device orientation in degrees. Missing or zero readings are ignored,
    /// since browsers report zero before the sensor settles.
    pub fn orientation_changed(&mut self, beta: Option<f64>, gamma: Option<f64>) -> bool {
        let (Some(beta), Some(gamma)) = (beta, gamma) else {
            return false;
        };
        if beta == 0.0 || gamma == 0.0 || !beta.is_finite() || !gamma.is_finite() {
            return false;
        }
        let range = self.config.tilt_range_deg;
        self.pos = DVec2::new(
            (gamma / range).clamp(-1.0, 1.0),
            ((beta - self.config.tilt_neutral_beta) / range).clamp(-1.0, 1.0),
        );
        true
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let next = self.zoom - delta_y * self.config.wheel_sensitivity;
        self.zoom = next.clamp(self.config.min_zoom, self.config.max_zoom);
    }

    /// Pixel translation for the background, opposite to the look direction.
    pub fn offset_px(&self) -> DVec2 {
        -self.pos * self.config.max_shift_px
    }
}
